//! # Dialogue Runtime
//!
//! 互动戏剧对话系统的核心运行时库。
//!
//! ## 架构概述
//!
//! `dialogue-runtime` 是纯逻辑核心，不依赖任何 IO 或网络传输。
//! 宿主层（Host）按请求驱动引擎推进演出：
//!
//! ```text
//! Host                          Engine
//!   │                              │
//!   │──── start_scene(id) ───────►│
//!   │◄─── Option<Line> ───────────│
//!   │──── advance() ─────────────►│
//!   │◄─── Option<Line> ───────────│
//!   │──── choose_branch(label) ──►│
//!   │◄─── Option<Line> ───────────│
//! ```
//!
//! ## 失败模型
//!
//! 导航操作以 `None` 表达软失败（场景未注册、空场景、已耗尽、
//! 无此选项），不是错误——"没有产生台词"是正常的控制流结果。
//! 宿主只需区分"有台词"和"没有台词"。
//!
//! ## 核心类型
//!
//! - [`DialogueEngine`]：对话状态机（一个实例对应一场演出）
//! - [`Scene`] / [`Line`]：剧本数据模型
//! - [`DialogueClient`]：带连接门禁和交互审计的会话包装
//! - [`DialogueServer`]：名册与广播簿记的协调层
//!
//! ## 使用示例
//!
//! ```ignore
//! use dialogue_runtime::{DialogueEngine, Line, Scene};
//!
//! let mut engine = DialogueEngine::new();
//! engine.register_scene(
//!     Scene::new("opening", "第一幕")
//!         .with_line(Line::new(1, "Alice", "开场白。", "curious"))
//!         .with_branch("go_left", "left_path"),
//! );
//!
//! let first = engine.start_scene("opening");
//! while let Some(line) = engine.advance() {
//!     // 宿主展示台词……
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`scene`]：剧本数据模型与 JSON 加载
//! - [`state`]：游标与情绪记忆
//! - [`engine`]：对话状态机
//! - [`history`]：交互审计记录
//! - [`session`]：客户端会话包装
//! - [`server`]：演出协调层
//! - [`diagnostic`]：剧本静态检查
//! - [`error`]：错误类型定义

pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod history;
pub mod scene;
pub mod server;
pub mod session;
pub mod state;

// 重导出核心类型
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_scenes};
pub use engine::DialogueEngine;
pub use error::{SceneError, ServerError};
pub use history::{InteractionEvent, InteractionLog};
pub use scene::{Line, Scene, load_scenes};
pub use server::{DialogueServer, ServerConfig, ServerState};
pub use session::{ClientConfig, ClientRole, DialogueClient};
pub use state::{Cursor, DEFAULT_EMOTION, EmotionMemory};
