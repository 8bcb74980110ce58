//! Storage contract for order aggregates.

use domain::{Order, OrderId};
use thiserror::Error;

/// Signal from a store that the order's id is already taken.
///
/// Wraps whatever duplicate-key condition the underlying driver reports
/// into one domain-neutral signal. Recoverable: the retry protocol in
/// [`crate::OrderRepository`] reacts by re-trying under a fresh id.
#[derive(Debug, Error)]
#[error("duplicate order id: {0}")]
pub struct DuplicateOrderId(pub OrderId);

/// Storage collaborator contract.
///
/// `persist` either accepts the aggregate or reports an identifier
/// collision; no other storage semantics (transactions, queries) are part
/// of the contract. The store owns the uniqueness guarantee on order ids.
pub trait OrderStore {
    /// Persists the order, failing only on an id collision.
    fn persist(&mut self, order: &Order) -> Result<(), DuplicateOrderId>;
}
