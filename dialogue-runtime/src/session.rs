//! # Session 模块
//!
//! 客户端会话包装：在引擎之上叠加连接状态和交互记录。
//!
//! ## 设计说明
//!
//! - 引擎本身没有"连接"概念，门禁由会话层负责：
//!   未连接时导航操作一律返回 `None`，不触碰引擎
//! - 交互记录是纯观察性的审计轨迹，见 [`crate::history`]
//! - 一个客户端持有一个独立引擎实例（一场演出一个状态机）

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::engine::DialogueEngine;
use crate::history::{InteractionEvent, InteractionLog};
use crate::scene::{Line, Scene};

/// 客户端角色
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    /// 观众
    #[default]
    Audience,
    /// 演员
    Performer,
}

impl fmt::Display for ClientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audience => write!(f, "audience"),
            Self::Performer => write!(f, "performer"),
        }
    }
}

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 客户端标识符
    pub client_id: String,
    /// 角色
    pub role: ClientRole,
    /// 自动推进提示（宿主层据此决定是否自动调用 advance）
    pub auto_advance: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            role: ClientRole::default(),
            auto_advance: false,
        }
    }
}

impl ClientConfig {
    /// 创建指定 ID 的配置
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    /// 设置角色
    pub fn with_role(mut self, role: ClientRole) -> Self {
        self.role = role;
        self
    }

    /// 设置自动推进提示
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }
}

/// 基于当前时间生成缺省客户端 ID
fn default_client_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("client-{millis}")
}

/// 对话客户端
///
/// 包装一个 [`DialogueEngine`]，叠加连接门禁与交互审计。
/// 导航操作只在已连接时委托给引擎；剧本加载不受门禁限制
/// （内容分发先于连接是合法的）。
pub struct DialogueClient {
    /// 配置
    config: ClientConfig,
    /// 引擎实例（一个客户端一场演出）
    engine: DialogueEngine,
    /// 连接状态
    connected: bool,
    /// 交互记录
    interactions: InteractionLog,
}

impl DialogueClient {
    /// 创建新客户端
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            engine: DialogueEngine::new(),
            connected: false,
            interactions: InteractionLog::new(),
        }
    }

    /// 连接到对话会话
    ///
    /// 返回状态消息，如 `"client-1 connected as audience"`。
    pub fn connect(&mut self) -> String {
        self.connected = true;
        self.record("connect", json!({ "role": self.config.role }));
        format!("{} connected as {}", self.config.client_id, self.config.role)
    }

    /// 断开连接
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.record("disconnect", json!({}));
    }

    /// 加载场景到客户端引擎
    pub fn load_scene(&mut self, scene: Scene) {
        self.record("load_scene", json!({ "scene_id": scene.scene_id }));
        self.engine.register_scene(scene);
    }

    /// 启动场景并取得首句台词
    ///
    /// 未连接时返回 `None`。成功时才记录交互。
    pub fn start_scene(&mut self, scene_id: &str) -> Option<Line> {
        if !self.connected {
            return None;
        }
        let line = self.engine.start_scene(scene_id)?;
        self.record(
            "start_scene",
            json!({ "scene_id": scene_id, "line_id": line.line_id }),
        );
        Some(line)
    }

    /// 前进到下一句台词
    ///
    /// 未连接时返回 `None`。成功时才记录交互。
    pub fn advance(&mut self) -> Option<Line> {
        if !self.connected {
            return None;
        }
        let line = self.engine.advance()?;
        self.record("advance", json!({ "line_id": line.line_id }));
        Some(line)
    }

    /// 做出分支选择
    ///
    /// 未连接时返回 `None`。选择动作无论是否解析成功都会记录
    /// ——观众按下了按钮，这件事本身就值得留痕。
    pub fn choose(&mut self, choice: &str) -> Option<Line> {
        if !self.connected {
            return None;
        }
        self.record("choose", json!({ "choice": choice }));
        self.engine.choose_branch(choice)
    }

    /// 客户端 ID
    pub fn client_id(&self) -> &str {
        &self.config.client_id
    }

    /// 客户端角色
    pub fn role(&self) -> ClientRole {
        self.config.role
    }

    /// 是否已连接
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// 配置
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 交互记录数量
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// 获取交互记录
    pub fn interactions(&self) -> &[InteractionEvent] {
        self.interactions.events()
    }

    /// 获取底层引擎
    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    /// 获取底层引擎（可变）
    ///
    /// 供宿主直接查询/操作引擎，绕过门禁时由宿主自行负责。
    pub fn engine_mut(&mut self) -> &mut DialogueEngine {
        &mut self.engine
    }

    fn record(&mut self, action: &str, data: serde_json::Value) {
        self.interactions.push(InteractionEvent::new(action, data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_scene() -> Scene {
        Scene::new("s1", "第一幕")
            .with_line(Line::new(1, "Alice", "开场白。", "curious"))
            .with_line(Line::new(2, "Bob", "接话。", "thoughtful"))
            .with_branch("go", "s2")
    }

    #[test]
    fn test_client_defaults() {
        let client = DialogueClient::new(ClientConfig::default());
        assert!(!client.is_connected());
        assert_eq!(client.role(), ClientRole::Audience);
        assert!(client.client_id().starts_with("client-"));
        assert_eq!(client.interaction_count(), 0);
    }

    #[test]
    fn test_connect_message() {
        let mut client =
            DialogueClient::new(ClientConfig::new("c1").with_role(ClientRole::Performer));

        let message = client.connect();
        assert_eq!(message, "c1 connected as performer");
        assert!(client.is_connected());
        assert_eq!(client.interaction_count(), 1);
        assert_eq!(client.interactions()[0].action, "connect");
    }

    #[test]
    fn test_navigation_gated_on_connection() {
        let mut client = DialogueClient::new(ClientConfig::new("c1"));
        client.load_scene(demo_scene());

        // 未连接：导航一律 None，引擎不被触碰
        assert!(client.start_scene("s1").is_none());
        assert!(client.advance().is_none());
        assert!(client.choose("go").is_none());
        assert!(client.engine().active_scene().is_none());

        client.connect();
        assert!(client.start_scene("s1").is_some());
        assert!(client.advance().is_some());

        client.disconnect();
        assert!(client.advance().is_none());
        // 断开不清引擎状态
        assert_eq!(client.engine().active_scene(), Some("s1"));
    }

    #[test]
    fn test_load_scene_allowed_before_connect() {
        let mut client = DialogueClient::new(ClientConfig::new("c1"));
        client.load_scene(demo_scene());
        assert_eq!(client.engine().scene_count(), 1);
        assert_eq!(client.interactions()[0].action, "load_scene");
    }

    #[test]
    fn test_interaction_recording() {
        let mut client = DialogueClient::new(ClientConfig::new("c1"));
        client.load_scene(demo_scene());
        client.connect();
        client.start_scene("s1");
        client.advance();
        // 耗尽后的失败 advance 不记录
        client.advance();
        // choose 无论成败都记录（目标 s2 未加载，解析失败）
        assert!(client.choose("go").is_none());

        let log = client.interactions();
        let actions: Vec<&str> = log.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(
            actions,
            vec!["load_scene", "connect", "start_scene", "advance", "choose"]
        );
        assert_eq!(log[2].data["line_id"], 1);
        assert_eq!(log[4].data["choice"], "go");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ClientRole::Performer).unwrap();
        assert_eq!(json, r#""performer""#);

        let role: ClientRole = serde_json::from_str(r#""audience""#).unwrap();
        assert_eq!(role, ClientRole::Audience);
    }
}
