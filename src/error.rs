//! Error taxonomy for funds operations
//!
//! Every variant is recovered at the operation boundary and turned into a
//! status message; none of them ever terminates the application.

use thiserror::Error;

use crate::constants::{MSG_INVALID_AMOUNT, MSG_MISSING_TOKEN};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FundsError {
    /// No bearer token has been entered. No request was attempted.
    #[error("{}", MSG_MISSING_TOKEN)]
    MissingCredential,

    /// The amount field does not hold a positive number. No request was attempted.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// The server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    RequestFailed { status: u16 },

    /// Network or decoding failure before a usable response was obtained
    #[error("{0}")]
    TransportError(String),
}

impl FundsError {
    /// Build a transport error from a reqwest failure
    pub fn from_transport(e: &reqwest::Error) -> Self {
        let detail = if e.is_timeout() {
            "Request timed out".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_decode() {
            format!("Invalid response body: {}", e)
        } else {
            format!("Request failed: {}", e)
        };
        FundsError::TransportError(detail)
    }

    /// User-facing message for a precondition failure.
    ///
    /// Network failures are prefixed by the operation that hit them instead.
    pub fn precondition_message(&self) -> Option<&'static str> {
        match self {
            FundsError::MissingCredential => Some(MSG_MISSING_TOKEN),
            FundsError::InvalidAmount(_) => Some(MSG_INVALID_AMOUNT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_names_status() {
        let err = FundsError::RequestFailed { status: 401 };
        assert_eq!(err.to_string(), "HTTP error! status: 401");
        assert_eq!(err.precondition_message(), None);
    }

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            FundsError::MissingCredential.precondition_message(),
            Some(MSG_MISSING_TOKEN)
        );
        assert_eq!(
            FundsError::InvalidAmount("0".into()).precondition_message(),
            Some(MSG_INVALID_AMOUNT)
        );
        assert_eq!(FundsError::TransportError("x".into()).precondition_message(), None);
    }
}
