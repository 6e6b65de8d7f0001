//! 会话存储
//!
//! 令牌持久化在 `auth_token` 键下，刷新页面后由 `hydrate` 恢复。
//! 登录时清除遗留的 `auth_user` 键；登出或会话过期时两个键都会被删除。

use crate::client::{ApiClient, SessionProvider};
use crate::error::{ApiError, ApiResult, extract_message};
use crate::protocol::{ApiRequest, HttpMethod, json_body};
use crate::storage::KeyValueStore;
use crate::transport::HttpTransport;
use crate::API_PREFIX;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

pub const TOKEN_STORAGE_KEY: &str = "auth_token";
pub const LEGACY_USER_STORAGE_KEY: &str = "auth_user";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserIdentity {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub token: Option<String>,
    /// 仅在本次登录后可知，刷新后不会恢复
    pub user: Option<UserIdentity>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

// =========================================================
// 登录端点
// =========================================================

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{API_PREFIX}/auth/login")
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(self)
    }
}

// =========================================================
// SessionStore
// =========================================================

pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    session: RefCell<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// 从持久化存储恢复会话
    pub fn hydrate(storage: S) -> Self {
        let token = persisted_token(&storage);
        Self {
            storage,
            session: RefCell::new(Session { token, user: None }),
        }
    }

    pub fn session(&self) -> Session {
        self.sync();
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sync().is_some()
    }

    /// 以持久化的令牌为准刷新内存会话
    ///
    /// 其它标签页登录或登出后存储会变化；令牌变化时用户名不再可信。
    fn sync(&self) -> Option<String> {
        let token = persisted_token(&self.storage);
        let mut session = self.session.borrow_mut();
        if session.token != token {
            log::debug!("persisted token changed outside this store");
            *session = Session {
                token: token.clone(),
                user: None,
            };
        }
        token
    }

    /// 用户名密码登录
    ///
    /// 失败时不写入任何状态，错误为 `InvalidCredentials`（含后端消息）或网络错误。
    pub async fn login<T: HttpTransport>(
        &self,
        client: &ApiClient<T>,
        username: &str,
        password: &str,
    ) -> ApiResult<Session> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = client.execute(None, &req).await?;
        if !resp.is_success() {
            log::info!("login rejected with status {}", resp.status);
            return Err(ApiError::InvalidCredentials(
                extract_message(&resp.body).unwrap_or_default(),
            ));
        }

        let tokens = LoginRequest::decode(&resp.body)?;
        if tokens.access.trim().is_empty() {
            return Err(ApiError::Decode("empty access token".to_string()));
        }

        self.storage.set(TOKEN_STORAGE_KEY, &tokens.access);
        self.storage.delete(LEGACY_USER_STORAGE_KEY);

        let session = Session {
            token: Some(tokens.access),
            user: Some(UserIdentity {
                username: req.username,
            }),
        };
        *self.session.borrow_mut() = session.clone();
        log::info!("signed in as {}", session.username().unwrap_or_default());
        Ok(session)
    }

    /// 清除内存与持久化中的会话
    pub fn logout(&self) {
        self.storage.delete(TOKEN_STORAGE_KEY);
        self.storage.delete(LEGACY_USER_STORAGE_KEY);
        *self.session.borrow_mut() = Session::default();
    }
}

impl<S: KeyValueStore> SessionProvider for SessionStore<S> {
    /// 每次请求前读取持久化的令牌
    fn token(&self) -> Option<String> {
        self.sync()
    }

    fn expire(&self) {
        log::info!("session expired");
        self.logout();
    }
}

fn persisted_token<S: KeyValueStore>(storage: &S) -> Option<String> {
    storage
        .get(TOKEN_STORAGE_KEY)
        .filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::transport::mock::MockTransport;
    use serde_json::json;

    const LOGIN_URL: &str = "http://127.0.0.1:8000/api/v1/auth/login";

    fn client() -> ApiClient<MockTransport> {
        ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap()
    }

    #[tokio::test]
    async fn login_persists_token_and_survives_reload() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            json!({"access": "jwt-abc", "refresh": "jwt-ref"}),
        );

        let storage = MemoryStore::new();
        storage.set(LEGACY_USER_STORAGE_KEY, r#"{"username":"old"}"#);
        let store = SessionStore::hydrate(storage.clone());
        assert!(!store.is_authenticated());

        let session = store.login(&client, "admin", "secret").await.unwrap();
        assert_eq!(session.token.as_deref(), Some("jwt-abc"));
        assert_eq!(session.username(), Some("admin"));
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).as_deref(), Some("jwt-abc"));
        assert!(!storage.contains(LEGACY_USER_STORAGE_KEY));

        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.json_body(), json!({"username": "admin", "password": "secret"}));
        assert!(!sent.headers.contains_key("Authorization"));

        let reloaded = SessionStore::hydrate(storage.clone());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().as_deref(), Some("jwt-abc"));
        assert_eq!(reloaded.session().user, None);
    }

    #[tokio::test]
    async fn failed_login_stores_nothing() {
        let client = client();
        client.transport().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            401,
            json!({"detail": "Credenciales inválidas"}),
        );

        let storage = MemoryStore::new();
        let store = SessionStore::hydrate(storage.clone());
        let err = store.login(&client, "admin", "bad").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::InvalidCredentials("Credenciales inválidas".to_string())
        );
        assert!(!store.is_authenticated());
        assert!(!storage.contains(TOKEN_STORAGE_KEY));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let client = client();
        client.transport().go_offline();
        let store = SessionStore::hydrate(MemoryStore::new());
        let err = store.login(&client, "admin", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn logout_clears_both_keys() {
        let storage = MemoryStore::new();
        storage.set(TOKEN_STORAGE_KEY, "jwt");
        storage.set(LEGACY_USER_STORAGE_KEY, "{}");
        let store = SessionStore::hydrate(storage.clone());
        assert!(store.is_authenticated());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!storage.contains(TOKEN_STORAGE_KEY));
        assert!(!storage.contains(LEGACY_USER_STORAGE_KEY));
    }

    #[test]
    fn token_follows_storage_changes() {
        let storage = MemoryStore::new();
        storage.set(TOKEN_STORAGE_KEY, "jwt-abc");
        let store = SessionStore::hydrate(storage.clone());
        assert_eq!(store.token().as_deref(), Some("jwt-abc"));

        storage.delete(TOKEN_STORAGE_KEY);
        assert_eq!(store.token(), None);
        assert!(!store.is_authenticated());

        storage.set(TOKEN_STORAGE_KEY, "jwt-new");
        assert_eq!(store.token().as_deref(), Some("jwt-new"));
        assert_eq!(store.session().token.as_deref(), Some("jwt-new"));
        assert_eq!(store.session().user, None);
    }

    #[tokio::test]
    async fn username_is_sent_as_typed() {
        let client = client();
        client
            .transport()
            .mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({"access": "jwt"}));
        let store = SessionStore::hydrate(MemoryStore::new());

        let session = store.login(&client, " Admin ", "pw").await.unwrap();
        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.json_body()["username"], json!(" Admin "));
        assert_eq!(session.username(), Some(" Admin "));
    }

    #[test]
    fn blank_stored_token_is_ignored() {
        let storage = MemoryStore::new();
        storage.set(TOKEN_STORAGE_KEY, "  ");
        assert!(!SessionStore::hydrate(storage).is_authenticated());
    }
}
