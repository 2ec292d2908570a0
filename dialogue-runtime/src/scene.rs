//! # Scene 模块
//!
//! 定义剧本的结构化数据模型。
//!
//! ## 设计说明
//!
//! Scene 是创作阶段的产物，注册到引擎后不再变化。
//! 引擎读取 Scene 并维护游标，不修改剧本内容。
//! 分支目标在注册时**不做校验**，只在选择时惰性解析
//! （静态检查见 [`crate::diagnostic`]）。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SceneError;

/// 一句台词
///
/// 剧本中的最小执行单元，创作后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 台词编号（场景内唯一，不要求全局唯一或连续）
    pub line_id: u32,
    /// 说话角色
    pub character: String,
    /// 台词文本
    pub text: String,
    /// 情绪标签
    pub emotion: String,
    /// 舞台指示（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl Line {
    /// 创建新台词
    pub fn new(
        line_id: u32,
        character: impl Into<String>,
        text: impl Into<String>,
        emotion: impl Into<String>,
    ) -> Self {
        Self {
            line_id,
            character: character.into(),
            text: text.into(),
            emotion: emotion.into(),
            direction: None,
        }
    }

    /// 设置舞台指示
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }
}

/// 一个场景
///
/// 包含有序台词列表和分支映射（选项标签 -> 目标场景 ID）。
/// 台词列表允许为空；空场景无法被启动，只能作为创作中间态存在。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 场景标识符（注册表的键，重复注册时后写覆盖）
    pub scene_id: String,
    /// 场景标题
    pub title: String,
    /// 台词列表（按演出顺序）
    #[serde(default)]
    pub lines: Vec<Line>,
    /// 分支映射：选项标签 -> 目标场景 ID
    ///
    /// 目标场景不要求已注册，解析推迟到选择时。
    #[serde(default)]
    pub branches: HashMap<String, String>,
}

impl Scene {
    /// 创建新场景
    pub fn new(scene_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            scene_id: scene_id.into(),
            title: title.into(),
            lines: Vec::new(),
            branches: HashMap::new(),
        }
    }

    /// 追加一句台词
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// 追加一个分支
    pub fn with_branch(
        mut self,
        choice: impl Into<String>,
        target_scene: impl Into<String>,
    ) -> Self {
        self.branches.insert(choice.into(), target_scene.into());
        self
    }

    /// 获取指定索引的台词
    pub fn get_line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// 台词数量
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// 是否没有台词
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 从 JSON 文本加载单个场景
    pub fn from_json(text: &str) -> Result<Scene, SceneError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// 从 JSON 文本加载场景列表
///
/// 输入为场景对象数组。列表内的重复 `scene_id` 不视为错误，
/// 与注册表的后写覆盖语义一致。
pub fn load_scenes(text: &str) -> Result<Vec<Scene>, SceneError> {
    Ok(serde_json::from_str(text)?)
}
