//! Commerce error types.

use crate::catalog::FetchStatus;
use thiserror::Error;

/// Errors that can occur in catalog and cart operations.
///
/// None of these are fatal: a rejected operation leaves the state it targeted
/// exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Fetch lifecycle transition not allowed from the current status.
    #[error("Invalid fetch transition from {from} to {to}")]
    InvalidFetchTransition { from: FetchStatus, to: FetchStatus },

    /// Price range bounds out of order or negative.
    #[error("Invalid price range: {min} to {max}")]
    InvalidPriceRange { min: String, max: String },

    /// Rating range bounds out of order, outside [0, 5], or not finite.
    #[error("Invalid rating range: {min} to {max}")]
    InvalidRatingRange { min: f64, max: f64 },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
