use std::fmt;

use reqwest::StatusCode;

/// Coarse classification of a [`ForecastError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Parse,
}

/// Errors from the forecast pipeline
///
/// `Display` yields the message shown to widget users.
#[derive(Debug)]
pub enum ForecastError {
    /// Missing or malformed forecast URL
    Validation(String),
    /// Upstream unreachable or answered with a failure status
    Transport(TransportError),
    /// Upstream document is malformed or flags an error; the reason is for logs only
    Parse(String),
}

/// Failure talking to the upstream forecast host
#[derive(Debug)]
pub enum TransportError {
    Unreachable(reqwest::Error),
    BadStatus { key: String, status: StatusCode },
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Transport(e) => write!(f, "{e}"),
            Self::Parse(_) => write!(f, "Error: Could not parse XML from yr.no"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(_) => write!(f, "Could not fetch data from yr.no"),
            Self::BadStatus { key, .. } => write!(
                f,
                "Could not retrieve data from {key} - are you sure this is a valid URL?"
            ),
        }
    }
}

impl std::error::Error for ForecastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreachable(e) => Some(e),
            Self::BadStatus { .. } => None,
        }
    }
}

impl From<TransportError> for ForecastError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Unreachable(err))
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_message_names_key() {
        let err = ForecastError::from(TransportError::BadStatus {
            key: "www.yr.no/place/Nowhere/forecast.xml".to_string(),
            status: StatusCode::NOT_FOUND,
        });
        assert_eq!(
            err.to_string(),
            "Could not retrieve data from www.yr.no/place/Nowhere/forecast.xml - are you sure this is a valid URL?"
        );
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_parse_error_hides_reason() {
        let err = ForecastError::Parse("unexpected <script> in document".to_string());
        assert_eq!(err.to_string(), "Error: Could not parse XML from yr.no");
        assert!(!err.to_string().contains("script"));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ForecastError::Validation("Missing url".to_string());
        assert_eq!(err.to_string(), "Missing url");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
