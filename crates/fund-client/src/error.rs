use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback when the server gives no usable detail.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";
const MAX_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected the submission (4xx other than 401).
    #[error("Submission rejected ({status}): {detail}")]
    Validation { status: u16, detail: String },
    /// 401: the session is no longer authenticated.
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// Network failures, 5xx responses and unreadable bodies.
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// Maps a non-2xx response onto the error taxonomy.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => ApiError::Auth(detail),
            400..=499 => ApiError::Validation { status, detail },
            _ => ApiError::Transport(format!("server returned {status}: {detail}")),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Transport("request timed out".into())
        } else if error.is_decode() {
            ApiError::Transport(format!("invalid response body: {error}"))
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Pulls a human readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}` and
/// `{"message": "..."}`; other bodies are returned trimmed and truncated.
pub fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => detail_from_value(&value).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.into()),
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                DEFAULT_ERROR_MESSAGE.into()
            } else {
                trimmed.chars().take(MAX_DETAIL_CHARS).collect()
            }
        }
    }
}

fn detail_from_value(value: &Value) -> Option<String> {
    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .or_else(|| item.get("message"))
                        .and_then(Value::as_str)
                })
                .collect();
            if !messages.is_empty() {
                return Some(messages.join(", "));
            }
        }
        _ => {}
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let err = ApiError::from_response(422, r#"{"detail":"id_number already exists"}"#);
        assert_eq!(
            err,
            ApiError::Validation {
                status: 422,
                detail: "id_number already exists".into()
            }
        );
    }

    #[test]
    fn validation_list_is_joined() {
        let body = r#"{"detail":[{"loc":["body","next_of_kin","phone"],"msg":"field required"},{"msg":"value is not a valid email address"}]}"#;
        assert_eq!(
            extract_detail(body),
            "field required, value is not a valid email address"
        );
    }

    #[test]
    fn unauthorized_maps_to_auth() {
        let err = ApiError::from_response(401, r#"{"detail":"Could not validate credentials"}"#);
        assert!(err.is_auth());
    }

    #[test]
    fn server_errors_are_transport_failures() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(
            err,
            ApiError::Transport("server returned 502: <html>Bad Gateway</html>".into())
        );
    }

    #[test]
    fn empty_bodies_fall_back_to_default_message() {
        assert_eq!(extract_detail(""), DEFAULT_ERROR_MESSAGE);
        assert_eq!(extract_detail("{}"), DEFAULT_ERROR_MESSAGE);
        assert_eq!(extract_detail(r#"{"message":"Member suspended"}"#), "Member suspended");
    }
}
