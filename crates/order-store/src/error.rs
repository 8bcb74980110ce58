//! Order store error types.

use thiserror::Error;

/// Errors that can occur while persisting orders.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// The id retry budget is spent without finding a free identifier.
    ///
    /// Fatal: signals an operational problem (RNG health or id-space
    /// pressure), not a condition to retry at a higher level.
    #[error(
        "could not acquire a unique order id after {attempts} attempts; investigate RNG health or id-space pressure"
    )]
    IdSpaceExhausted { attempts: u32 },
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, OrderStoreError>;
