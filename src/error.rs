use thiserror::Error;

/// Errors raised while validating geographic input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("invalid radius: {0} meters")]
    InvalidRadius(f64),
}

/// Errors raised by a listing source while retrieving records
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("listing service returned status {0}")]
    Status(u16),
    #[error("failed to decode listing payload: {0}")]
    Decode(String),
    #[error("fetch cancelled")]
    Cancelled,
}

/// Coarse classification of a fetch failure, carried by a failed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Timeout,
    Server,
    Decode,
    Cancelled,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(e) if e.is_timeout() => FetchErrorKind::Timeout,
            FetchError::Transport(e) if e.is_decode() => FetchErrorKind::Decode,
            FetchError::Transport(_) => FetchErrorKind::Network,
            FetchError::Status(_) => FetchErrorKind::Server,
            FetchError::Decode(_) => FetchErrorKind::Decode,
            FetchError::Cancelled => FetchErrorKind::Cancelled,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Errors raised when a review violates its rating invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_non_transport_errors() {
        assert_eq!(FetchError::Status(503).kind(), FetchErrorKind::Server);
        assert_eq!(
            FetchError::Decode("bad".into()).kind(),
            FetchErrorKind::Decode
        );
        assert_eq!(FetchError::Cancelled.kind(), FetchErrorKind::Cancelled);
    }

    #[test]
    fn json_errors_become_decode_failures() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert_eq!(FetchError::from(err).kind(), FetchErrorKind::Decode);
    }
}
