//! # State 模块
//!
//! 定义引擎的运行时状态：游标和情绪记忆。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**
//! - 所有状态必须**可序列化**
//! - 不允许隐式全局状态

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 未知角色的缺省情绪
pub const DEFAULT_EMOTION: &str = "neutral";

/// 游标
///
/// 记录当前演出位置：活动场景 ID 和从 0 开始的台词索引。
///
/// # 状态模型
///
/// ```text
/// Idle   -> scene_id 为 None，未开始任何场景
/// Active -> scene_id 为 Some，line_index 指向台词或越过末尾（已耗尽）
/// ```
///
/// 索引单调递增，只有 [`Cursor::start`] 会重置它。
/// 越过末尾后索引继续增长，"已耗尽"是索引与场景长度的关系，
/// 不是独立状态。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// 活动场景 ID（None 表示尚未开始）
    pub scene_id: Option<String>,
    /// 当前台词索引（从 0 开始）
    pub line_index: usize,
}

impl Cursor {
    /// 创建空闲游标
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否处于空闲状态
    pub fn is_idle(&self) -> bool {
        self.scene_id.is_none()
    }

    /// 切换到指定场景的开头
    ///
    /// 这是唯一重置台词索引的操作。
    pub fn start(&mut self, scene_id: impl Into<String>) {
        self.scene_id = Some(scene_id.into());
        self.line_index = 0;
    }

    /// 前进到下一句台词
    pub fn advance(&mut self) {
        self.line_index += 1;
    }
}

/// 情绪记忆
///
/// 记录每个角色最近一次出现时的情绪，跨场景持续，
/// 与引擎实例同生命周期。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionMemory {
    /// 角色名 -> 最近观察到的情绪
    emotions: HashMap<String, String>,
}

impl EmotionMemory {
    /// 创建空记忆
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录角色情绪（覆盖旧值）
    pub fn record(&mut self, character: impl Into<String>, emotion: impl Into<String>) {
        self.emotions.insert(character.into(), emotion.into());
    }

    /// 查询角色情绪
    ///
    /// 从未出现过的角色返回 [`DEFAULT_EMOTION`]。
    pub fn get(&self, character: &str) -> &str {
        self.emotions
            .get(character)
            .map(String::as_str)
            .unwrap_or(DEFAULT_EMOTION)
    }

    /// 已记录的角色数量
    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }
}
