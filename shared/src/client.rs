//! 带认证的 API 客户端
//!
//! 所有资源模块都通过 `ApiClient::send` 访问后端：
//! 拼接基础地址、附加 `Authorization: Bearer <token>`、对请求体设置 JSON 头，
//! 并把非 2xx 响应归类为 `ApiError`。

use crate::error::{ApiError, ApiResult};
use crate::protocol::ApiRequest;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::{HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use url::Url;

/// 当前会话令牌的提供者
///
/// 客户端在每次请求时读取令牌；已认证请求收到 401 时调用 `expire`。
pub trait SessionProvider {
    fn token(&self) -> Option<String>;
    fn expire(&self);
}

/// 无会话（登录请求等匿名调用）
pub struct Anonymous;

impl SessionProvider for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }

    fn expire(&self) {}
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    /// 创建客户端，基础地址必须是合法的绝对 URL
    pub fn new(base_url: &str, transport: T) -> ApiResult<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Encode(format!("invalid base url: {base_url}")));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 构造完整 URL（含查询参数）
    pub fn url_for(&self, path: &str, query: &[(&'static str, String)]) -> ApiResult<String> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    /// 发送请求并返回原始响应，不做状态码归类
    pub async fn execute<R: ApiRequest + ?Sized>(
        &self,
        token: Option<&str>,
        req: &R,
    ) -> ApiResult<HttpResponse> {
        let url = self.url_for(&req.path(), &req.query())?;
        let mut http = HttpRequest::new(&url, R::METHOD);

        if let Some(token) = token {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        if let Some(body) = req.body()? {
            http = http
                .with_header(HEADER_CONTENT_TYPE, "application/json")
                .with_body(body);
        }

        log::debug!("{} {}", R::METHOD.as_str(), url);
        self.transport.send(http).await
    }

    /// 以当前会话身份发送请求并解码响应
    pub async fn send<R, S>(&self, session: &S, req: &R) -> ApiResult<R::Response>
    where
        R: ApiRequest + ?Sized,
        S: SessionProvider + ?Sized,
    {
        let token = session.token();
        let resp = self.execute(token.as_deref(), req).await?;

        if resp.status == 401 && token.is_some() {
            log::warn!(
                "{} {} returned 401, clearing session",
                R::METHOD.as_str(),
                req.path()
            );
            session.expire();
            return Err(ApiError::SessionExpired);
        }

        if !resp.is_success() {
            return Err(ApiError::from_response(resp.status, &resp.body));
        }

        R::decode(&resp.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HttpMethod;
    use crate::transport::mock::MockTransport;
    use serde_json::json;
    use std::cell::Cell;

    struct Ping;

    impl ApiRequest for Ping {
        type Response = serde_json::Value;
        const METHOD: HttpMethod = HttpMethod::Get;

        fn path(&self) -> String {
            "/api/v1/ping/".to_string()
        }

        fn query(&self) -> Vec<(&'static str, String)> {
            vec![("search", "a b".to_string())]
        }
    }

    struct FixedToken {
        expired: Cell<bool>,
    }

    impl SessionProvider for FixedToken {
        fn token(&self) -> Option<String> {
            Some("tok-1".to_string())
        }

        fn expire(&self) {
            self.expired.set(true);
        }
    }

    const PING_URL: &str = "http://127.0.0.1:8000/api/v1/ping/?search=a+b";

    #[test]
    fn rejects_relative_base_url() {
        assert!(ApiClient::new("not a url", MockTransport::new()).is_err());
    }

    #[tokio::test]
    async fn attaches_bearer_token() {
        let client = ApiClient::new("http://127.0.0.1:8000/", MockTransport::new()).unwrap();
        client
            .transport()
            .mock_response(HttpMethod::Get, PING_URL, 200, json!({"ok": true}));

        let session = FixedToken {
            expired: Cell::new(false),
        };
        let body = client.send(&session, &Ping).await.unwrap();
        assert_eq!(body, json!({"ok": true}));

        let req = client.transport().last_request().unwrap();
        assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer tok-1");
        assert!(!req.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_token() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        client
            .transport()
            .mock_response(HttpMethod::Get, PING_URL, 200, json!([]));

        client.send(&Anonymous, &Ping).await.unwrap();
        let req = client.transport().last_request().unwrap();
        assert!(!req.headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn unauthorized_expires_the_session() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        client.transport().mock_response(
            HttpMethod::Get,
            PING_URL,
            401,
            json!({"detail": "Token inválido"}),
        );

        let session = FixedToken {
            expired: Cell::new(false),
        };
        let err = client.send(&session, &Ping).await.unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert!(session.expired.get());
    }

    #[tokio::test]
    async fn other_failures_are_classified() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        client.transport().mock_response(
            HttpMethod::Get,
            PING_URL,
            409,
            json!({"detail": "Conflicto"}),
        );

        let err = client.send(&Anonymous, &Ping).await.unwrap_err();
        assert_eq!(err.message(), Some("Conflicto"));
    }

    #[tokio::test]
    async fn network_failure_is_reported() {
        let client = ApiClient::new("http://127.0.0.1:8000", MockTransport::new()).unwrap();
        client.transport().go_offline();
        let err = client.send(&Anonymous, &Ping).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
