//! # History 模块
//!
//! 交互记录数据模型，供会话层记录观察性审计轨迹。
//!
//! ## 设计原则
//!
//! - 只记录"发生了什么"（动作名、时间戳、附带数据）
//! - 纯观察性：引擎的正确性不依赖任何记录
//! - 所有数据可序列化，便于宿主导出

use serde::{Deserialize, Serialize};

/// 一条交互记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// 动作名（如 `connect`、`start_scene`、`choose`）
    pub action: String,
    /// 时间戳（Unix 秒）
    pub timestamp: u64,
    /// 附带数据（结构随动作而异）
    pub data: serde_json::Value,
}

impl InteractionEvent {
    /// 创建交互记录（自动打当前时间戳）
    pub fn new(action: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            action: action.into(),
            timestamp: current_timestamp(),
            data,
        }
    }
}

/// 交互记录容器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionLog {
    /// 记录列表（按时间顺序）
    events: Vec<InteractionEvent>,
    /// 最大记录数（防止内存无限增长）
    max_events: usize,
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionLog {
    /// 创建新的交互记录
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            max_events: 1000, // 默认最多记录 1000 条
        }
    }

    /// 设置最大记录数
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// 添加记录
    pub fn push(&mut self, event: InteractionEvent) {
        self.events.push(event);

        // 超出上限时丢弃最早的记录
        while self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }

    /// 获取所有记录
    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    /// 统计某个动作出现的次数
    pub fn count_action(&self, action: &str) -> usize {
        self.events.iter().filter(|e| e.action == action).count()
    }

    /// 记录总数
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 清空记录
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// 获取当前时间戳（Unix 秒）
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
