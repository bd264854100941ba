use thiserror::Error;

/// Failure talking to a section's collection endpoint.
/// Every variant is recoverable: the timeline controller turns it into an
/// inline banner or a transient notification, never a crash.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Short, user-facing description used in notifications and banners.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            ApiError::Http(_) => "Could not reach the server".to_string(),
            ApiError::Status { status, .. } => format!("The server rejected the request ({status})"),
            ApiError::Parse(_) => "The server returned an unexpected response".to_string(),
        }
    }
}

/// Violations of the label-config invariants when a section is assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("Label key '{0}' does not name a field of the section entity")]
    UnknownLabelKey(String),

    #[error("Label key '{0}' appears more than once")]
    DuplicateLabelKey(String),

    #[error("Section entity must serialize to a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store has been disposed")]
    Disposed,

    #[error("Invalid field path '{0}'")]
    InvalidPath(String),
}

/// A section name that is not one of the list-based résumé sections.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

/// A custom field attribute other than `title`, `content` or `icon`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown custom field attribute '{0}'")]
pub struct UnknownFieldKey(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_mentions_code() {
        let err = ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.user_message(), "The server rejected the request (503)");
        assert_eq!(err.to_string(), "API error (status 503): maintenance");
    }

    #[test]
    fn test_parse_errors_work_with_anyhow_context() {
        use anyhow::Context;

        let err = Err::<(), _>(UnknownSection("hobbies".into()))
            .context("SECTIONS is invalid")
            .unwrap_err();
        assert_eq!(err.root_cause().to_string(), "unknown section 'hobbies'");
        assert_eq!(
            UnknownFieldKey("label".into()).to_string(),
            "unknown custom field attribute 'label'"
        );
    }
}
