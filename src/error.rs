//! Error types for the payment application.

use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that can occur during application operation.
///
/// Every error aborts the triggering operation with no partial state
/// mutation: a failed constructor produces no user, a failed payment
/// changes no balance and appends no feed entries, a failed friendship
/// leaves both friend lists alone.
#[derive(Error, Debug)]
pub enum AppError {
    /// Username fails the format rules, or is already registered
    #[error("username error: {0}")]
    Username(String),

    /// Invalid card number, or the user already holds a card
    #[error("credit card error: {0}")]
    CreditCard(String),

    /// Self-payment, non-positive amount, uncovered amount with no card,
    /// or a processor-level decline
    #[error("payment error: {0}")]
    Payment(String),

    /// Attempting to add an already-present friend
    #[error("duplicate friend: {0}")]
    DuplicateFriend(String),

    /// Operation references a username with no registered user
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// Failed to write rendered output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
