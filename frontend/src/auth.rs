//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 会话本身由共享层的 `SessionStore` 持有（令牌写入 LocalStorage），
//! 这里再镜像一份到信号中驱动界面；`ApiClient` 判定会话过期时同样经过这里。

use crate::web::BrowserStorage;
use leptos::prelude::*;
use lomalinda_shared::client::{ApiClient, SessionProvider};
use lomalinda_shared::error::{ApiError, ApiResult};
use lomalinda_shared::session::{Session, SessionStore};
use lomalinda_shared::transport::HttpTransport;
use std::rc::Rc;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话存储（仅限当前线程）
    store: StoredValue<Rc<SessionStore<BrowserStorage>>, LocalStorage>,
    /// 认证状态（只读）
    pub state: ReadSignal<Session>,
    /// 设置认证状态（写入）
    set_state: WriteSignal<Session>,
}

impl AuthContext {
    /// 创建新的认证上下文，并从 LocalStorage 恢复令牌
    pub fn new() -> Self {
        let store = SessionStore::hydrate(BrowserStorage);
        let session = store.session();
        if session.is_authenticated() {
            log::info!("restored persisted session");
        }

        let (state, set_state) = signal(session);
        Self {
            store: StoredValue::new_local(Rc::new(store)),
            state,
            set_state,
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(Session::is_authenticated))
    }

    fn store(&self) -> Option<Rc<SessionStore<BrowserStorage>>> {
        self.store.try_get_value()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for AuthContext {
    fn token(&self) -> Option<String> {
        let token = self.store().and_then(|s| s.token());
        // 其它标签页已登出：同步界面状态，路由随之跳转到登录页
        if token.is_none() && self.state.with_untracked(Session::is_authenticated) {
            self.set_state.set(Session::default());
        }
        token
    }

    fn expire(&self) {
        if let Some(store) = self.store() {
            store.expire();
        }
        self.set_state.set(Session::default());
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录
///
/// 成功后更新认证信号，路由服务会监听到变化并跳转到采购页。
pub async fn login<T: HttpTransport>(
    ctx: AuthContext,
    client: &ApiClient<T>,
    username: &str,
    password: &str,
) -> ApiResult<Session> {
    let Some(store) = ctx.store() else {
        return Err(ApiError::Encode("session store is disposed".to_string()));
    };
    let session = store.login(client, username, password).await?;
    ctx.set_state.set(session.clone());
    Ok(session)
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    if let Some(store) = ctx.store() {
        store.logout();
    }
    ctx.set_state.set(Session::default());
    log::info!("signed out");
}
