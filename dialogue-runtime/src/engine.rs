//! # Engine 模块
//!
//! 对话演出的核心状态机。
//!
//! ## 执行模型
//!
//! 引擎持有剧本注册表、游标和情绪记忆，按宿主请求推进演出：
//!
//! ```text
//! register_scene(scene)      -> 注册/覆盖剧本
//! start_scene(id)            -> Option<Line>   切到场景开头
//! advance()                  -> Option<Line>   线性前进
//! choose_branch(label)       -> Option<Line>   解析分支并切场景
//! ```
//!
//! ## 失败模型
//!
//! 所有导航操作以 `None` 表达软失败（场景未注册、空场景、
//! 空闲状态、无此选项、已耗尽），不抛错误。失败时状态保持不变，
//! 唯一例外是 `advance` 越过末尾后索引仍会增长——"已耗尽"本身
//! 就是有意义的状态，不是需要回退的错误。

use std::collections::HashMap;

use crate::scene::{Line, Scene};
use crate::state::{Cursor, EmotionMemory};

/// 对话引擎
///
/// 单线程、同步、纯内存的状态机。一个实例对应**一场演出**；
/// 多会话宿主应为每个会话创建独立实例，引擎内部不做同步。
///
/// # 使用示例
///
/// ```ignore
/// let mut engine = DialogueEngine::new();
/// engine.register_scene(scene);
///
/// let first = engine.start_scene("opening");
/// while let Some(line) = engine.advance() {
///     host.show(line);
/// }
/// engine.choose_branch("go_left");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DialogueEngine {
    /// 剧本注册表（场景 ID -> 场景，后写覆盖）
    scenes: HashMap<String, Scene>,
    /// 游标
    cursor: Cursor,
    /// 情绪记忆
    emotions: EmotionMemory,
}

impl DialogueEngine {
    /// 创建空引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册场景
    ///
    /// 同 ID 重复注册时覆盖旧场景（剧本是创作内容，后写即新版本）。
    /// 不影响游标和情绪记忆，注册永远成功。
    pub fn register_scene(&mut self, scene: Scene) {
        self.scenes.insert(scene.scene_id.clone(), scene);
    }

    /// 启动场景
    ///
    /// 场景未注册或没有台词时返回 `None`，游标保持原样（失败不产生
    /// 部分变更）。成功时游标切到该场景第 0 句，记录首句情绪，
    /// 返回首句台词。
    ///
    /// 这是唯一重置台词索引的操作，分支解析内部也经由它完成切换。
    pub fn start_scene(&mut self, scene_id: &str) -> Option<Line> {
        let scene = self.scenes.get(scene_id)?;
        let line = scene.get_line(0)?.clone();

        self.cursor.start(scene_id);
        self.emotions.record(&line.character, &line.emotion);
        Some(line)
    }

    /// 前进到下一句台词
    ///
    /// 空闲状态下返回 `None` 且不做任何事。活动状态下索引加一：
    /// 仍在范围内则记录情绪并返回该句；越过末尾则返回 `None`，
    /// 游标停在末尾之后（场景已耗尽，之后的每次调用都继续返回
    /// `None`，索引继续增长但外部不可观察）。
    ///
    /// 索引单调：除 [`Self::start_scene`] 外不会回退。
    pub fn advance(&mut self) -> Option<Line> {
        let scene_id = self.cursor.scene_id.as_deref()?;
        let scene = self.scenes.get(scene_id)?;

        self.cursor.advance();
        let line = scene.get_line(self.cursor.line_index)?.clone();

        self.emotions.record(&line.character, &line.emotion);
        Some(line)
    }

    /// 解析分支选择
    ///
    /// 空闲状态、活动场景不在注册表、或选项标签不存在时返回 `None`。
    /// 命中选项后委托给 [`Self::start_scene`] 切换到目标场景——
    /// 目标未注册或为空场景时同样软失败，此时游标**仍停留在来源
    /// 场景**（start_scene 失败不变更状态）。选择只有在目标完全
    /// 解析成功时才真正"消费"。
    pub fn choose_branch(&mut self, choice: &str) -> Option<Line> {
        let scene_id = self.cursor.scene_id.as_deref()?;
        let scene = self.scenes.get(scene_id)?;
        let target = scene.branches.get(choice)?.clone();

        self.start_scene(&target)
    }

    /// 查询角色情绪
    ///
    /// 返回该角色最近一次被演到时的情绪；从未出现过则返回
    /// [`crate::state::DEFAULT_EMOTION`]。
    pub fn character_emotion(&self, character: &str) -> &str {
        self.emotions.get(character)
    }

    /// 获取当前可用分支
    ///
    /// 返回活动场景分支映射的快照；空闲状态下返回空映射。
    /// 修改返回值不影响引擎状态。
    pub fn available_branches(&self) -> HashMap<String, String> {
        self.cursor
            .scene_id
            .as_deref()
            .and_then(|id| self.scenes.get(id))
            .map(|scene| scene.branches.clone())
            .unwrap_or_default()
    }

    /// 已注册的场景数量
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// 当前活动场景 ID
    pub fn active_scene(&self) -> Option<&str> {
        self.cursor.scene_id.as_deref()
    }

    /// 获取游标（宿主可据此展示进度）
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// 获取情绪记忆
    pub fn emotions(&self) -> &EmotionMemory {
        &self.emotions
    }
}
