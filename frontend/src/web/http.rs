//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享层的 `HttpTransport`。
//! 状态码归类与认证头都由 `ApiClient` 处理，这里只负责收发。

use async_trait::async_trait;
use lomalinda_shared::error::{ApiError, ApiResult};
use lomalinda_shared::transport::{HttpRequest, HttpResponse, HttpTransport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP 错误类型
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "response unreadable: {}", msg),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RequestBuildFailed(msg) => ApiError::Encode(msg),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// 把 JS 异常转换为错误文本
fn js_error(context: &str, e: JsValue) -> String {
    format!("{context}: {e:?}")
}

fn build_request(req: &HttpRequest) -> Result<Request, HttpError> {
    let headers =
        Headers::new().map_err(|e| HttpError::RequestBuildFailed(js_error("Headers", e)))?;
    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| HttpError::RequestBuildFailed(js_error(key, e)))?;
    }

    let init = RequestInit::new();
    init.set_method(req.method.as_str());
    init.set_headers(&headers.into());
    if let Some(body) = &req.body {
        init.set_body(&JsValue::from_str(body));
    }

    Request::new_with_str_and_init(&req.url, &init)
        .map_err(|e| HttpError::RequestBuildFailed(js_error(&req.url, e)))
}

async fn fetch(request: &Request) -> Result<HttpResponse, HttpError> {
    let window = web_sys::window()
        .ok_or_else(|| HttpError::NetworkError("window is unavailable".to_string()))?;

    let response: Response = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| HttpError::NetworkError(format!("{e:?}")))?
        .dyn_into()
        .map_err(|e| HttpError::ResponseParseFailed(js_error("not a Response", e)))?;

    // 非 2xx 也读取响应体，交给 ApiClient 归类
    let text = response
        .text()
        .map_err(|e| HttpError::ResponseParseFailed(format!("{e:?}")))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| HttpError::ResponseParseFailed(format!("{e:?}")))?
        .as_string()
        .ok_or_else(|| HttpError::ResponseParseFailed("body is not a string".to_string()))?;

    Ok(HttpResponse {
        status: response.status(),
        body,
    })
}

/// 基于浏览器 fetch 的传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let result = async {
            let request = build_request(&req)?;
            fetch(&request).await
        }
        .await;
        result
            .inspect_err(|e| log::error!("{} {} failed: {}", req.method.as_str(), req.url, e))
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_failures_are_encode_errors() {
        let err = ApiError::from(HttpError::RequestBuildFailed("bad header".to_string()));
        assert!(matches!(err, ApiError::Encode(msg) if msg == "bad header"));
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let err = ApiError::from(HttpError::NetworkError("offline".to_string()));
        assert!(matches!(err, ApiError::Network(msg) if msg == "network error: offline"));

        let err = ApiError::from(HttpError::ResponseParseFailed("eof".to_string()));
        assert!(matches!(err, ApiError::Network(msg) if msg.contains("eof")));
    }
}
