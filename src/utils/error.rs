use thiserror::Error;

/// Fallback shown when neither the server nor the transport produced any text.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Request failed with status code {status}")]
    HttpError {
        status: u16,
        body: Option<ErrorBody>,
    },

    #[error("{0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Failed to decode response from {endpoint}: {message}")]
    DecodeError { endpoint: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Structured error payload a backend may return alongside a failing status.
///
/// `detail` is what FastAPI-style servers send; it is usually a string but can be a list
/// of validation errors, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Server-provided text, `detail` first, then `message`.
    pub fn server_message(&self) -> Option<String> {
        let detail = self.detail.as_ref().and_then(|detail| match detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => non_empty(text),
            other => Some(other.to_string()),
        });

        detail.or_else(|| self.message.as_deref().and_then(non_empty))
    }
}

/// Returns `text`, or [`FALLBACK_ERROR_MESSAGE`] when it is blank.
pub fn message_or_fallback(text: &str) -> String {
    non_empty(text).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for the CLI: input and configuration problems 1, network and
    /// server failures 2, local system failures 3.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

/// Exit status for a run whose worst failure was `worst`.
pub fn exit_code_for(worst: Option<ErrorSeverity>) -> i32 {
    worst.map_or(0, ErrorSeverity::exit_code)
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::TransportError(_) => ErrorCategory::Network,
            SearchError::HttpError { .. } => ErrorCategory::Server,
            SearchError::DecodeError { .. }
            | SearchError::SerializationError(_)
            | SearchError::CsvError(_) => ErrorCategory::Data,
            SearchError::ConfigError { .. }
            | SearchError::MissingConfigError { .. }
            | SearchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SearchError::ValidationError { .. } => ErrorCategory::Input,
            SearchError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Server | ErrorCategory::Data => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Human-readable message with fallback order: server `detail`, server `message`,
    /// transport or status text, then [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        if let SearchError::HttpError {
            body: Some(body), ..
        } = self
        {
            if let Some(message) = body.server_message() {
                return message;
            }
        }

        message_or_fallback(&self.to_string())
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the server: {}", self.user_message()),
            ErrorCategory::Server => format!("The server rejected the request: {}", self.user_message()),
            _ => self.user_message(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the backend URL and your network connection",
            ErrorCategory::Server => "Check the search term and your auth token, then try again",
            ErrorCategory::Data => "The backend returned an unexpected payload; check the endpoint",
            ErrorCategory::Configuration => "Fix the configuration file, flags or environment",
            ErrorCategory::Input => "Correct the input and try again",
            ErrorCategory::System => "Check file permissions for the storage directory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http_error(body: serde_json::Value) -> SearchError {
        SearchError::HttpError {
            status: 400,
            body: Some(serde_json::from_value(body).unwrap()),
        }
    }

    #[test]
    fn test_detail_wins_over_message() {
        let err = http_error(json!({"detail": "X", "message": "Y"}));
        assert_eq!(err.user_message(), "X");
    }

    #[test]
    fn test_message_used_when_detail_missing() {
        let err = http_error(json!({"message": "Y"}));
        assert_eq!(err.user_message(), "Y");
    }

    #[test]
    fn test_structured_detail_rendered_as_json() {
        let err = http_error(json!({"detail": [{"msg": "field required"}]}));
        assert_eq!(err.user_message(), r#"[{"msg":"field required"}]"#);
    }

    #[test]
    fn test_status_text_when_body_has_no_message() {
        let err = http_error(json!({"other": true}));
        assert_eq!(err.user_message(), "Request failed with status code 400");

        let err = SearchError::HttpError {
            status: 502,
            body: None,
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_fallback_when_no_text_at_all() {
        assert_eq!(message_or_fallback("  "), FALLBACK_ERROR_MESSAGE);
        assert_eq!(message_or_fallback("timed out"), "timed out");
    }

    #[test]
    fn test_blank_detail_falls_through() {
        let err = http_error(json!({"detail": "", "message": "Y"}));
        assert_eq!(err.user_message(), "Y");
    }

    #[test]
    fn test_severity_mapping() {
        let err = SearchError::ValidationError {
            message: "bad".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.category(), ErrorCategory::Input);

        let err = SearchError::IoError(std::io::Error::other("disk"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(None), 0);
        assert_eq!(exit_code_for(Some(ErrorSeverity::High)), 1);
        assert_eq!(exit_code_for(Some(ErrorSeverity::Medium)), 2);
        assert_eq!(exit_code_for(Some(ErrorSeverity::Critical)), 3);

        // The worst failure of a session decides, not the last one.
        let session = [Some(ErrorSeverity::High), None, Some(ErrorSeverity::Medium)];
        assert_eq!(exit_code_for(session.into_iter().flatten().max()), 1);
    }
}
