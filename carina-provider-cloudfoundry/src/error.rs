//! Error types for Cloud Foundry API calls

use serde::Deserialize;
use thiserror::Error;

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default()
}

/// Errors returned by the Cloud Foundry client
#[derive(Debug, Error)]
pub enum CfError {
    /// The API answered with a non-success status
    #[error("Request failed with status {status}{}: {description}", code_suffix(.error_code))]
    RequestFailure {
        status: u16,
        error_code: Option<String>,
        description: String,
    },

    /// A name lookup matched nothing
    #[error("{kind} '{name}' was not found")]
    NotFound { kind: &'static str, name: String },

    /// Transport failure (connect, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Client could not be constructed from the configuration
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl CfError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// HTTP status of a failed request, if the API answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True only for a 404 answer from the API.
    ///
    /// A name lookup with no match is a different failure and returns false.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Build a `RequestFailure` from a status and the raw response body
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::RequestFailure {
                status,
                error_code: parsed.error_code,
                description: parsed
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            },
            Err(_) => Self::RequestFailure {
                status,
                error_code: None,
                description: format!("HTTP {}", status),
            },
        }
    }
}

/// Error body of the CF v2 API, e.g.
/// `{"code": 40004, "description": "The app space could not be found", "error_code": "CF-SpaceNotFound"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

pub type CfResult<T> = Result<T, CfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_cf_error_body() {
        let body = r#"{"code":40004,"description":"The app space could not be found: abc","error_code":"CF-SpaceNotFound"}"#;
        let err = CfError::from_response(404, body);

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Request failed with status 404 (CF-SpaceNotFound): The app space could not be found: abc"
        );
    }

    #[test]
    fn falls_back_when_body_is_not_json() {
        let err = CfError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.status_code(), Some(502));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Request failed with status 502: HTTP 502");
    }

    #[test]
    fn lookup_miss_is_not_a_404() {
        let err = CfError::not_found("Organization", "acme");
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.to_string(), "Organization 'acme' was not found");
    }
}
