//! 后端访问入口
//!
//! 应用根部创建唯一的 `ApiClient`，与认证上下文一起放进 `Backend`。
//! 页面在异步任务中通过 `backend.api(&client)` 获得资源模块：
//!
//! ```ignore
//! let backend = use_backend();
//! spawn_local(async move {
//!     let client = backend.client()?;
//!     backend.api(&client).stock().list().await
//! });
//! ```

use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::web::FetchTransport;
use leptos::prelude::*;
use lomalinda_shared::error::{ApiError, ApiResult};
use lomalinda_shared::{Api, ApiClient};

pub type Client = ApiClient<FetchTransport>;

#[derive(Clone, Copy)]
pub struct Backend {
    client: StoredValue<Option<Client>>,
    pub auth: AuthContext,
    pub page_size: u64,
}

impl Backend {
    pub fn new(config: &AppConfig, auth: AuthContext) -> Self {
        let client = match ApiClient::new(&config.api_base_url, FetchTransport) {
            Ok(client) => Some(client),
            Err(e) => {
                log::error!("invalid API base url {:?}: {}", config.api_base_url, e);
                None
            }
        };
        Self {
            client: StoredValue::new(client),
            auth,
            page_size: config.page_size,
        }
    }

    /// 客户端副本，可移动进异步任务
    pub fn client(&self) -> ApiResult<Client> {
        self.client
            .try_get_value()
            .flatten()
            .ok_or_else(|| ApiError::Encode("API client is not configured".to_string()))
    }

    /// 以当前会话身份访问资源模块
    pub fn api<'a>(&'a self, client: &'a Client) -> Api<'a, FetchTransport, AuthContext> {
        Api::new(client, &self.auth)
    }
}

pub fn provide_backend(config: &AppConfig, auth: AuthContext) -> Backend {
    let backend = Backend::new(config, auth);
    provide_context(backend);
    backend
}

pub fn use_backend() -> Backend {
    use_context::<Backend>().expect("Backend should be provided")
}
