//! API Errors
//!
//! Failure taxonomy for calls against the ticket service.

use thiserror::Error;

/// Common result type for ticket service operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Coarse category a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    NotFound,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (network down, CORS, aborted)
    #[error("Error de red: {0}")]
    Transport(String),

    /// Non-2xx response that is neither not-found nor validation
    #[error("Error del servidor ({status}): {detail}")]
    Http { status: u16, detail: String },

    /// Body did not match the expected schema
    #[error("Respuesta inválida: {0}")]
    Malformed(String),

    #[error("No encontrado: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::Http { .. } | ApiError::Malformed(_) => {
                ErrorKind::Transport
            }
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Map a non-2xx status and its body to an error.
    ///
    /// FastAPI bodies look like `{"detail": "..."}` or `{"detail": [{"msg": ...}]}`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            404 => ApiError::NotFound(detail),
            400 | 422 => ApiError::Validation(detail),
            _ => ApiError::Http { status, detail },
        }
    }
}

fn extract_detail(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(|v| v.get("detail"));
    match detail {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(entries)) => entries
            .iter()
            .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        _ if body.trim().is_empty() => "sin detalle".to_string(),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from_status(404, r#"{"detail": "Ticket not found"}"#);
        assert_eq!(not_found, ApiError::NotFound("Ticket not found".into()));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let invalid = ApiError::from_status(
            422,
            r#"{"detail": [{"msg": "too short"}, {"msg": "missing user_name"}]}"#,
        );
        assert_eq!(invalid, ApiError::Validation("too short; missing user_name".into()));

        let server = ApiError::from_status(502, "");
        assert_eq!(server.kind(), ErrorKind::Transport);
        assert_eq!(server.to_string(), "Error del servidor (502): sin detalle");
    }

    #[test]
    fn test_malformed_counts_as_transport() {
        assert_eq!(ApiError::Malformed("x".into()).kind(), ErrorKind::Transport);
    }
}
