//! # Server 模块
//!
//! 演出协调层：名册、容量与广播簿记。
//!
//! ## 设计说明
//!
//! - 与传输无关：这里只有参与者集合和计数，不含任何网络协议
//! - 不持有引擎：当前场景如何扇出到各客户端引擎是宿主的策略
//!   （每会话一个引擎，或一个引擎广播给所有人）
//! - `scenes_played` 只在 [`DialogueServer::set_scene`] 时递增，
//!   是广播口径的统计，与任何引擎游标无关

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::error::ServerError;

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 客户端容量上限
    pub max_clients: usize,
    /// 单场景时长（宿主层的排期提示，核心不使用计时器）
    pub scene_duration: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_clients: 50,
            scene_duration: Duration::from_secs(300),
        }
    }
}

/// 服务端状态快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    /// 在册客户端数量
    pub active_clients: usize,
    /// 当前广播的场景
    pub current_scene: Option<String>,
    /// 已播出的场景数
    pub scenes_played: usize,
    /// 是否运行中
    pub is_running: bool,
}

/// 对话服务端
///
/// 协调一场多客户端演出的名册与场景广播簿记。
#[derive(Debug, Clone)]
pub struct DialogueServer {
    /// 配置
    config: ServerConfig,
    /// 在册客户端
    clients: HashSet<String>,
    /// 当前广播的场景
    current_scene: Option<String>,
    /// 已播出的场景数
    scenes_played: usize,
    /// 是否运行中
    running: bool,
}

impl Default for DialogueServer {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

impl DialogueServer {
    /// 创建新服务端（未启动）
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            clients: HashSet::new(),
            current_scene: None,
            scenes_played: 0,
            running: false,
        }
    }

    /// 启动服务端
    ///
    /// 已在运行时返回 `false`。
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// 停止服务端
    ///
    /// 未在运行时返回 `false`。停止会清除当前场景，
    /// 但保留名册和播出计数。
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.current_scene = None;
        true
    }

    /// 注册客户端
    ///
    /// 未启动或已达容量上限时失败。重复注册同一 ID 是幂等的。
    pub fn register_client(&mut self, client_id: impl Into<String>) -> Result<(), ServerError> {
        if !self.running {
            return Err(ServerError::NotRunning);
        }
        if self.clients.len() >= self.config.max_clients {
            return Err(ServerError::AtCapacity {
                max: self.config.max_clients,
            });
        }
        self.clients.insert(client_id.into());
        Ok(())
    }

    /// 移除客户端
    ///
    /// 返回该客户端此前是否在册。
    pub fn remove_client(&mut self, client_id: &str) -> bool {
        self.clients.remove(client_id)
    }

    /// 设置当前广播场景
    ///
    /// 每次设置都计入 `scenes_played`。
    pub fn set_scene(&mut self, scene_id: impl Into<String>) {
        self.current_scene = Some(scene_id.into());
        self.scenes_played += 1;
    }

    /// 在册客户端列表（按 ID 排序的快照）
    pub fn clients(&self) -> Vec<String> {
        let mut list: Vec<String> = self.clients.iter().cloned().collect();
        list.sort();
        list
    }

    /// 获取状态快照
    pub fn state(&self) -> ServerState {
        ServerState {
            active_clients: self.clients.len(),
            current_scene: self.current_scene.clone(),
            scenes_played: self.scenes_played,
            is_running: self.running,
        }
    }

    /// 配置
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_start_stop() {
        let mut server = DialogueServer::default();
        assert!(!server.state().is_running);

        assert!(server.start());
        assert!(!server.start()); // 重复启动
        assert!(server.state().is_running);

        assert!(server.stop());
        assert!(!server.stop()); // 重复停止
        assert!(!server.state().is_running);
    }

    #[test]
    fn test_register_requires_running() {
        let mut server = DialogueServer::default();
        assert_eq!(
            server.register_client("c1"),
            Err(ServerError::NotRunning)
        );

        server.start();
        assert!(server.register_client("c1").is_ok());
        assert_eq!(server.state().active_clients, 1);
    }

    #[test]
    fn test_register_capacity() {
        let mut server = DialogueServer::new(ServerConfig {
            max_clients: 2,
            ..ServerConfig::default()
        });
        server.start();

        server.register_client("c1").unwrap();
        server.register_client("c2").unwrap();
        assert_eq!(
            server.register_client("c3"),
            Err(ServerError::AtCapacity { max: 2 })
        );

        // 重复注册幂等，不占新名额
        assert!(server.register_client("c2").is_ok());
        assert_eq!(server.state().active_clients, 2);
    }

    #[test]
    fn test_remove_client() {
        let mut server = DialogueServer::default();
        server.start();
        server.register_client("c1").unwrap();

        assert!(server.remove_client("c1"));
        assert!(!server.remove_client("c1"));
        assert_eq!(server.state().active_clients, 0);
    }

    #[test]
    fn test_set_scene_counts_plays() {
        let mut server = DialogueServer::default();
        server.start();

        server.set_scene("s1");
        server.set_scene("s2");
        server.set_scene("s2"); // 重播也计数

        let state = server.state();
        assert_eq!(state.current_scene.as_deref(), Some("s2"));
        assert_eq!(state.scenes_played, 3);
    }

    #[test]
    fn test_stop_clears_scene_keeps_roster() {
        let mut server = DialogueServer::default();
        server.start();
        server.register_client("c1").unwrap();
        server.set_scene("s1");

        server.stop();
        let state = server.state();
        assert_eq!(state.current_scene, None);
        assert_eq!(state.active_clients, 1);
        assert_eq!(state.scenes_played, 1);
    }

    #[test]
    fn test_clients_sorted_snapshot() {
        let mut server = DialogueServer::default();
        server.start();
        server.register_client("b").unwrap();
        server.register_client("a").unwrap();
        server.register_client("c").unwrap();

        assert_eq!(server.clients(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_state_serialization() {
        let mut server = DialogueServer::default();
        server.start();
        server.set_scene("s1");

        let state = server.state();
        let json = serde_json::to_string(&state).unwrap();
        let loaded: ServerState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, loaded);
    }
}
