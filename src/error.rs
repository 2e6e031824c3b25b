use reqwest::StatusCode;

/// Why a search request produced no usable response.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid api base url {base:?}: {reason}")]
    InvalidBase { base: String, reason: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: StatusCode },

    #[error("malformed response body (HTTP {status}): {source}")]
    Malformed {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse failure classes shown to the user. Transport covers DNS, connect and
/// read errors alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Server,
    Malformed,
}

impl RequestError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status } | RequestError::Malformed { status, .. } => {
                Some(*status)
            }
            RequestError::Transport(e) => e.status(),
            RequestError::InvalidBase { .. } => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            RequestError::InvalidBase { .. } | RequestError::Transport(_) => {
                FailureKind::Transport
            }
            RequestError::Status { .. } => FailureKind::Server,
            RequestError::Malformed { .. } => FailureKind::Malformed,
        }
    }
}
