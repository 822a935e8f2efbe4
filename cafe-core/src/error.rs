//! Failures surfaced to the customer. None of them are fatal: each one ends the
//! action that raised it and leaves the cart and session untouched.
use thiserror::Error;

use crate::api::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields")]
    EmptyField,
    #[error("Cart is empty")]
    EmptyCart,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("cannot reach server")]
    ServerUnreachable,
    /// Backend declined; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("please log in to place an order")]
    NotAuthenticated,
    #[error("cannot reach server")]
    ServerUnreachable,
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        log::warn!("auth request failed: {err}");
        Self::ServerUnreachable
    }
}

impl From<TransportError> for OrderError {
    fn from(err: TransportError) -> Self {
        log::warn!("order request failed: {err}");
        Self::ServerUnreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_backend_message_verbatim() {
        assert_eq!(
            AuthError::Rejected("bad credentials".into()).to_string(),
            "bad credentials"
        );
        assert_eq!(
            OrderError::Rejected("Cart is empty".into()).to_string(),
            "Cart is empty"
        );
    }

    #[test]
    fn transport_failures_collapse_to_unreachable() {
        let err: AuthError = TransportError::Decode("<html>".into()).into();
        assert_eq!(err, AuthError::ServerUnreachable);
        let err: OrderError = TransportError::Unreachable("refused".into()).into();
        assert_eq!(err, OrderError::ServerUnreachable);
        assert_eq!(err.to_string(), "cannot reach server");
    }
}
