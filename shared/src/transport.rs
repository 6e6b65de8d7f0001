use crate::error::ApiResult;
use crate::protocol::HttpMethod;
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 传输特性 (Trait)
///
/// 浏览器中由 `fetch` 实现，测试中由 `MockTransport` 实现。
/// (?Send) 是因为浏览器环境下的 Future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockTransport
// =========================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::ApiError;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// 记录下来的请求 (URL, Method, Headers, Body)
    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub url: String,
        pub method: HttpMethod,
        pub headers: HashMap<String, String>,
        pub body: Option<String>,
    }

    impl Recorded {
        pub fn json_body(&self) -> serde_json::Value {
            serde_json::from_str(self.body.as_deref().unwrap_or("null")).unwrap()
        }
    }

    /// 按 (Method, URL) 返回预设响应
    ///
    /// 同一端点可预设多个响应，依次返回；队列只剩一个时重复返回它。
    pub struct MockTransport {
        responses: RefCell<HashMap<(HttpMethod, String), VecDeque<(u16, String)>>>,
        offline: RefCell<bool>,
        pub requests: RefCell<Vec<Recorded>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                offline: RefCell::new(false),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn mock_response(
            &self,
            method: HttpMethod,
            url: &str,
            status: u16,
            body: serde_json::Value,
        ) {
            self.mock_raw(method, url, status, &body.to_string());
        }

        pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .entry((method, url.to_string()))
                .or_default()
                .push_back((status, body.to_string()));
        }

        /// 之后的所有请求都以网络错误失败
        pub fn go_offline(&self) {
            *self.offline.borrow_mut() = true;
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<Recorded> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.borrow_mut().push(Recorded {
                url: req.url.clone(),
                method: req.method,
                headers: req.headers.clone(),
                body: req.body.clone(),
            });

            if *self.offline.borrow() {
                return Err(ApiError::Network("connection refused".to_string()));
            }

            let mut responses = self.responses.borrow_mut();
            match responses.get_mut(&(req.method, req.url.clone())) {
                Some(queue) if queue.len() > 1 => {
                    let (status, body) = queue.pop_front().unwrap();
                    Ok(HttpResponse { status, body })
                }
                Some(queue) if !queue.is_empty() => {
                    let (status, body) = queue[0].clone();
                    Ok(HttpResponse { status, body })
                }
                _ => Ok(HttpResponse {
                    status: 404,
                    body: r#"{"detail": "Not found."}"#.to_string(),
                }),
            }
        }
    }
}
