use std::fmt;

use thiserror::Error;

/// The closed set of failure kinds surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimit,
    NotFound,
    ServerError,
    Unknown,
}

impl ErrorKind {
    /// Rate limits and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::RateLimit | ErrorKind::ServerError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ServerError => "server_error",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after_ms: Option<u64>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("{0}")]
    Unknown(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RateLimited { .. } => ErrorKind::RateLimit,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::ServerError { .. } => ErrorKind::ServerError,
            // A request that never produced a status counts as a 500.
            Error::Network(e) if e.is_connect() || e.is_timeout() => ErrorKind::ServerError,
            _ => ErrorKind::Unknown,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Suggested wait before the next attempt, when the server supplied one.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Error::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }

    /// Folds ambient failures into the four-kind taxonomy. Already
    /// classified errors pass through untouched.
    pub fn into_classified(self, operation: &str) -> Error {
        match self {
            Error::RateLimited { .. }
            | Error::NotFound(_)
            | Error::ServerError { .. }
            | Error::Unknown(_) => self,
            Error::Network(ref e) if e.is_connect() || e.is_timeout() => Error::ServerError {
                status: 500,
                message: format!("Failed to {}: {}", operation, e),
            },
            other => Error::Unknown(format!("Failed to {}: {}", operation, other)),
        }
    }

    /// Message meant for the person running the wrap.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::RateLimit => match self.retry_after_ms() {
                Some(ms) => format!(
                    "GitHub API rate limit exceeded. Please try again in {} seconds.",
                    ms.div_ceil(1000)
                ),
                None => "GitHub API rate limit exceeded. Please try again later.".to_string(),
            },
            ErrorKind::NotFound => {
                "User or resource not found. Please check the username and try again.".to_string()
            }
            ErrorKind::ServerError => "GitHub API server error. Please try again later.".to_string(),
            ErrorKind::Unknown => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_retryability() {
        let rate = Error::RateLimited {
            message: "slow down".into(),
            retry_after_ms: Some(1500),
        };
        assert_eq!(rate.kind(), ErrorKind::RateLimit);
        assert!(rate.is_retryable());
        assert_eq!(rate.retry_after_ms(), Some(1500));

        assert!(!Error::NotFound("alice".into()).is_retryable());
        assert!(Error::ServerError {
            status: 502,
            message: "bad gateway".into()
        }
        .is_retryable());
        assert!(!Error::Unknown("teapot".into()).is_retryable());
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_into_classified_wraps_ambient_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let classified = Error::from(err).into_classified("fetch profile for alice");
        match classified {
            Error::Unknown(msg) => assert!(msg.starts_with("Failed to fetch profile for alice")),
            other => panic!("unexpected: {other:?}"),
        }

        let kept = Error::NotFound("alice".into()).into_classified("anything");
        assert_eq!(kept.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_user_messages() {
        let rate = Error::RateLimited {
            message: String::new(),
            retry_after_ms: Some(1200),
        };
        assert!(rate.user_message().contains("2 seconds"));

        let rate = Error::RateLimited {
            message: String::new(),
            retry_after_ms: None,
        };
        assert!(rate.user_message().ends_with("try again later."));

        assert!(Error::NotFound("x".into())
            .user_message()
            .contains("check the username"));
        assert_eq!(Error::Unknown("boom".into()).user_message(), "boom");
    }
}
