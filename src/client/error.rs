//! Errors returned by [`ApiClient`](super::ApiClient).

/// Client error type.
#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response
    Network(String),
    /// The backend answered with a non-success status
    Http { status: u16, message: String },
    /// A success body did not match the expected shape
    Decode(String),
    /// The session store could not be read or written
    Store(String),
    /// The request could not be built, so nothing was sent
    InvalidRequest(String),
}

impl ClientError {
    /// Get the error message, as shown to the user.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Network(msg)
            | ClientError::Decode(msg)
            | ClientError::Store(msg)
            | ClientError::InvalidRequest(msg) => msg,
            ClientError::Http { message, .. } => message,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http { message, .. } => f.write_str(message),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ClientError::Store(msg) => write!(f, "Session store error: {}", msg),
            ClientError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Store(err.to_string())
    }
}
