use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Panel returned {status} for {url}: {body}")]
    StatusError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Malformed panel response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Invalid panel configuration: {0}")]
    ConfigError(String),
}

impl PanelError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PanelError::StatusError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Worth retrying: transport failures, rate limits and 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            PanelError::HttpError(_) => true,
            PanelError::StatusError { status, .. } => *status == 429 || *status >= 500,
            PanelError::MalformedResponse { .. } | PanelError::ConfigError(_) => false,
        }
    }
}

// Convert reqwest errors to PanelError
impl From<reqwest::Error> for PanelError {
    fn from(err: reqwest::Error) -> Self {
        PanelError::HttpError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> PanelError {
        PanelError::StatusError {
            status,
            url: "https://panel.example.com/api/client".into(),
            body: String::new(),
        }
    }

    #[test]
    fn only_transport_and_server_errors_are_transient() {
        assert!(PanelError::HttpError("connection reset".into()).is_transient());
        assert!(status(502).is_transient());
        assert!(status(429).is_transient());

        for permanent in [400, 401, 403, 404, 413] {
            assert!(!status(permanent).is_transient(), "{} retried", permanent);
        }
        assert!(!PanelError::MalformedResponse {
            url: "x".into(),
            reason: "y".into()
        }
        .is_transient());
    }
}
