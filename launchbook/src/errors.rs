//! Error taxonomy for the booking domain.
//!
//! Every business-rule violation is raised immediately at the point of
//! detection and propagates unchanged to the workflow boundary; no partial
//! state is ever committed. Callers branch on the error kind, never on the
//! message text - the presentation layer owns final formatting and the
//! mapping to transport status codes.

use thiserror::Error;

use crate::types::{
    BookingIdError, FlightIdError, PassengerNameError, RocketIdError, RocketNameError,
    TransactionIdError,
};

/// Errors raised by the booking/flight domain.
///
/// The five kinds cover every failure the domain can attribute:
///
/// - `Validation`: malformed or out-of-policy input
/// - `NotFound`: a referenced flight or rocket does not exist
/// - `Capacity`: the flight cannot accept another passenger
/// - `Payment`: the payment collaborator rejected or failed
/// - `Internal`: an invariant broke in a way the domain cannot attribute to
///   caller input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or out-of-policy input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced flight or rocket does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The flight cannot accept another passenger.
    #[error("Capacity exceeded: {0}")]
    Capacity(String),

    /// The payment collaborator rejected the payment.
    #[error("Payment failed: {0}")]
    Payment(String),

    /// An unexpected internal invariant violation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Builds a `Validation` error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds a `NotFound` error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Builds a `Capacity` error with the given message.
    pub fn capacity(message: impl Into<String>) -> Self {
        Self::Capacity(message.into())
    }

    /// Builds a `Payment` error with the given message.
    pub fn payment(message: impl Into<String>) -> Self {
        Self::Payment(message.into())
    }

    /// Builds an `Internal` error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Type alias for domain operation results.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<FlightIdError> for DomainError {
    fn from(err: FlightIdError) -> Self {
        Self::Validation(format!("Invalid flight id: {err}"))
    }
}

impl From<RocketIdError> for DomainError {
    fn from(err: RocketIdError) -> Self {
        Self::Validation(format!("Invalid rocket id: {err}"))
    }
}

impl From<BookingIdError> for DomainError {
    fn from(err: BookingIdError) -> Self {
        Self::Validation(format!("Invalid booking id: {err}"))
    }
}

impl From<PassengerNameError> for DomainError {
    fn from(err: PassengerNameError) -> Self {
        Self::Validation(format!("Invalid passenger name: {err}"))
    }
}

impl From<RocketNameError> for DomainError {
    fn from(err: RocketNameError) -> Self {
        Self::Validation(format!("Invalid rocket name: {err}"))
    }
}

// A booking cannot exist without a successful payment, so a missing or blank
// transaction reference is a payment-class failure, not a validation one.
impl From<TransactionIdError> for DomainError {
    fn from(err: TransactionIdError) -> Self {
        Self::Payment(format!("Payment transaction is required: {err}"))
    }
}
