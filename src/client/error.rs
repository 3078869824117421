//! Client error type.

/// Everything that can go wrong between the calendar and the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response
    Transport(String),
    /// The backend answered with a non-success status
    Api {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    /// The response body did not match the expected shape
    Decode(String),
    /// A local check failed before anything was sent
    Precondition(String),
}

impl ClientError {
    /// Message worth showing to the user, when the failure carries one.
    ///
    /// Transport and decode failures return `None` so callers fall back to a
    /// generic localized string.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            ClientError::Precondition(msg) => Some(msg),
            ClientError::Transport(_) | ClientError::Decode(_) => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport error: {}", msg),
            ClientError::Api {
                status,
                code,
                message,
            } => write!(
                f,
                "api error {} ({}): {}",
                status,
                code.as_deref().unwrap_or("UNKNOWN"),
                message.as_deref().unwrap_or("no message")
            ),
            ClientError::Decode(msg) => write!(f, "decode error: {}", msg),
            ClientError::Precondition(msg) => write!(f, "precondition failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
