use thiserror::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    MalformedResponse,
    UnexpectedShape,
    Unknown,
}

/// Failure while talking to the emotion service.
///
/// `Display` is the message handed back to callers. The underlying cause is kept in `detail()` for logs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error("HTTP request failed")]
    Transport { detail: String },

    #[error("JSON decode error")]
    Decode { detail: String },

    #[error("Missing key in JSON response: '{key}'")]
    MissingKey { key: String },

    #[error("An unexpected error occurred")]
    Unexpected { detail: String },
}

impl AnalyzeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzeError::Transport { .. } => ErrorKind::TransportFailure,
            AnalyzeError::Decode { .. } => ErrorKind::MalformedResponse,
            AnalyzeError::MissingKey { .. } => ErrorKind::UnexpectedShape,
            AnalyzeError::Unexpected { .. } => ErrorKind::Unknown,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AnalyzeError::Transport { detail } => detail,
            AnalyzeError::Decode { detail } => detail,
            AnalyzeError::MissingKey { key } => key,
            AnalyzeError::Unexpected { detail } => detail,
        }
    }

    pub(crate) fn missing(key: &str) -> Self {
        AnalyzeError::MissingKey { key: key.to_owned() }
    }

    pub(crate) fn unexpected(detail: impl Into<String>) -> Self {
        AnalyzeError::Unexpected { detail: detail.into() }
    }
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(value: reqwest::Error) -> Self {
        AnalyzeError::Transport { detail: value.to_string() }
    }
}

impl From<serde_json::Error> for AnalyzeError {
    fn from(value: serde_json::Error) -> Self {
        AnalyzeError::Decode { detail: value.to_string() }
    }
}
