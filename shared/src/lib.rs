//! LomaLinda 后台控制台的平台无关核心
//!
//! - 领域模型：`catalog`、`inventory`、`purchase`、`pagination`
//! - 传输协议：`protocol`（端点定义）、`transport`（HTTP 抽象）
//! - 会话与客户端：`session`、`client`、`storage`
//! - 资源访问模块：`resources`
//! - 采购录入草稿：`draft`
//!
//! 这里不依赖浏览器 API，可在本地直接运行测试；
//! 浏览器相关的适配器（fetch、localStorage）位于前端 crate。

pub mod catalog;
pub mod client;
pub mod decimal;
pub mod draft;
pub mod error;
pub mod inventory;
pub mod pagination;
pub mod protocol;
pub mod purchase;
pub mod resources;
pub mod session;
pub mod storage;
pub mod transport;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 所有后端路径的版本前缀
pub const API_PREFIX: &str = "/api/v1";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

pub use client::{ApiClient, SessionProvider};
pub use decimal::DecimalText;
pub use error::{ApiError, ApiResult};
pub use resources::Api;
pub use session::{Session, SessionStore};
