use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The request never completed, or the server answered with a non-2xx status.
    #[error("{message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("You need to log in to access this page.")]
    AuthRequired,

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Session(#[from] std::io::Error),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Network { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, StoreError::AuthRequired)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Network {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
