//! 错误模型
//!
//! 所有后端调用都收敛到 `ApiError`。页面通过 `user_message` 获得可直接展示的文本：
//! 优先使用后端响应体中的可读消息，缺失时使用页面提供的本地化兜底文案。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// =========================================================
// 字段级校验错误
// =========================================================

/// 后端按字段返回的校验错误，如 `{"nombre": ["Este campo es requerido."]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub messages: Vec<String>,
}

impl FieldError {
    fn render(&self) -> String {
        format!("{}: {}", self.field, self.messages.join(", "))
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 请求未能到达后端，或响应体无法读取
    #[error("network error: {0}")]
    Network(String),
    /// 登录时凭据被拒绝
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    /// 已认证请求返回 401，令牌失效或过期
    #[error("session expired")]
    SessionExpired,
    /// 后端按字段返回的校验失败
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },
    /// 其它非 2xx 响应（业务规则拒绝、404、5xx 等）
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    /// 响应体与预期结构不符
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// 请求构建失败（URL 非法、请求体序列化失败）
    #[error("failed to build request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// 将非成功响应归类为具体错误
    ///
    /// 401 的会话过期处理由 `ApiClient` 负责，这里只按响应体归类。
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        if status == 400 {
            if let Some(value) = parsed.as_ref() {
                if value.get("detail").is_none() {
                    let fields = extract_field_errors(value);
                    if !fields.is_empty() {
                        let message = render_fields(&fields);
                        return ApiError::Validation { message, fields };
                    }
                }
            }
        }

        ApiError::Rejected {
            status,
            message: parsed.as_ref().and_then(message_from_value).unwrap_or_default(),
        }
    }

    /// 后端提供的可读消息（若有）
    pub fn message(&self) -> Option<&str> {
        let msg = match self {
            ApiError::InvalidCredentials(m) => m.as_str(),
            ApiError::Validation { message, .. } => message.as_str(),
            ApiError::Rejected { message, .. } => message.as_str(),
            _ => return None,
        };
        if msg.trim().is_empty() { None } else { Some(msg) }
    }

    /// 页面展示用的文本
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::SessionExpired => {
                "La sesión expiró. Inicie sesión nuevamente.".to_string()
            }
            _ => self
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// 字段级错误列表，非校验错误时为空
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Encode(e.to_string())
    }
}

// =========================================================
// 响应体消息提取
// =========================================================

/// 从失败响应体中提取可读消息
///
/// 顺序：`detail` 字符串 -> 纯 JSON 字符串 -> 字段错误汇总。
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    message_from_value(&value)
}

fn message_from_value(value: &Value) -> Option<String> {
    if let Some(detail) = value.get("detail").and_then(Value::as_str) {
        return Some(detail.to_string());
    }
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }
    let fields = extract_field_errors(value);
    if fields.is_empty() {
        None
    } else {
        Some(render_fields(&fields))
    }
}

/// 解析 `{字段: [消息, ...]}` 结构
pub fn extract_field_errors(value: &Value) -> Vec<FieldError> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    map.iter()
        .map(|(field, v)| FieldError {
            field: field.clone(),
            messages: match v {
                Value::Array(items) => items.iter().map(value_text).collect(),
                other => vec![value_text(other)],
            },
        })
        .collect()
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(FieldError::render)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_wins() {
        let body = r#"{"detail": "No se puede desactivar: tiene compras asociadas."}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("No se puede desactivar: tiene compras asociadas.")
        );
        let err = ApiError::from_response(409, body);
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 409,
                message: "No se puede desactivar: tiene compras asociadas.".into()
            }
        );
    }

    #[test]
    fn plain_string_body_is_a_message() {
        assert_eq!(extract_message(r#""Bodega inactiva""#).as_deref(), Some("Bodega inactiva"));
    }

    #[test]
    fn field_map_becomes_validation_error() {
        let body = r#"{"nombre": ["Este campo es requerido."], "email": ["Correo inválido.", "Muy largo."]}"#;
        let err = ApiError::from_response(400, body);
        let ApiError::Validation { message, fields } = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(fields.len(), 2);
        assert!(message.contains("nombre: Este campo es requerido."));
        assert!(message.contains("email: Correo inválido., Muy largo."));
        assert!(message.contains(" | "));
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn non_json_body_falls_back() {
        let err = ApiError::from_response(500, "<html>Server Error</html>");
        assert_eq!(err.message(), None);
        assert_eq!(err.user_message("No se pudo guardar."), "No se pudo guardar.");
    }

    #[test]
    fn network_errors_use_the_fallback() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("Error de red"), "Error de red");
    }

    #[test]
    fn session_expiry_has_its_own_message() {
        assert!(ApiError::SessionExpired.user_message("x").contains("sesión"));
        assert!(ApiError::SessionExpired.is_session_expired());
    }
}
