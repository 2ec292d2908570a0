//! # Error 模块
//!
//! 定义 dialogue-runtime 中使用的错误类型。
//!
//! 注意：引擎的导航操作（启动场景、前进、选择分支）不使用错误类型。
//! 失败以 `None` 表达——"没有产生台词"是正常的控制流结果，
//! 不是需要恢复的异常（见 [`crate::engine`]）。
//! 错误类型只覆盖剧本加载和服务端名册这两条真正的失败边界。

use thiserror::Error;

/// 剧本加载错误
#[derive(Error, Debug)]
pub enum SceneError {
    /// JSON 解析失败
    #[error("场景解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 服务端名册错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    /// 服务端未启动
    #[error("服务端未启动，无法注册客户端")]
    NotRunning,

    /// 已达容量上限
    #[error("客户端数量已达上限 {max}")]
    AtCapacity { max: usize },
}
