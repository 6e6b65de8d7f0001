use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are absolute (they already carry the `/api/v1` prefix) and are appended to the
/// client's base address. Record ids are part of the path, so `path` takes `&self`.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, e.g. `/api/v1/productos/12/`.
    fn path(&self) -> String;

    /// Query string pairs, empty by default.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Serialized JSON body, `None` for body-less requests.
    fn body(&self) -> ApiResult<Option<String>> {
        Ok(None)
    }

    /// Decodes a successful response body.
    ///
    /// An empty body (e.g. `204 No Content`) is decoded as JSON `null`, which
    /// suits `()`, `Option<_>` and `IgnoredAny` responses.
    fn decode(body: &str) -> ApiResult<Self::Response> {
        decode_json(body)
    }
}

/// Serializes a request body.
pub fn json_body<T: Serialize>(value: &T) -> ApiResult<Option<String>> {
    serde_json::to_string(value)
        .map(Some)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(ApiError::from)
}
