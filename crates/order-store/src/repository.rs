//! Order repository with the unique-id retry protocol.

use domain::{Order, OrderId};

use crate::error::{OrderStoreError, Result};
use crate::store::{DuplicateOrderId, OrderStore};

/// Retry budget for id collisions. Exceeding it is an operational
/// incident (RNG health, id-space pressure), not a condition to retry at
/// a higher level.
pub const MAX_ID_ATTEMPTS: u32 = 5;

/// Source of fresh order identifiers.
///
/// Injected into the repository instead of reaching for ambient
/// randomness, so tests can script the exact id sequence the retry loop
/// will draw.
pub trait OrderIdSource {
    /// Returns the next identifier to try.
    fn next_id(&mut self) -> OrderId;
}

/// Default identifier source: random ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl OrderIdSource for RandomIdSource {
    fn next_id(&mut self) -> OrderId {
        OrderId::generate()
    }
}

/// Persists orders, owning the uniqueness protocol around their ids.
///
/// The retry contract: when the store reports a duplicate id, draw a
/// fresh one, rebind the aggregate, and try again. The full item list
/// and customer fields ride along unchanged. Callers get back the order
/// actually persisted and must treat its id as authoritative, since it
/// may differ from the one they built.
pub struct OrderRepository<S, G = RandomIdSource> {
    store: S,
    ids: G,
}

impl<S: OrderStore> OrderRepository<S> {
    /// Creates a repository drawing random ids on collision.
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: RandomIdSource,
        }
    }
}

impl<S: OrderStore, G: OrderIdSource> OrderRepository<S, G> {
    /// Creates a repository with an explicit identifier source.
    pub fn with_id_source(store: S, ids: G) -> Self {
        Self { store, ids }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persists an order, retrying with a fresh id on duplicate-id
    /// collisions.
    ///
    /// Fails with [`OrderStoreError::IdSpaceExhausted`] once
    /// [`MAX_ID_ATTEMPTS`] attempts have collided.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    pub fn save(&mut self, order: Order) -> Result<Order> {
        let mut candidate = order;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            match self.store.persist(&candidate) {
                Ok(()) => {
                    tracing::debug!(order_id = %candidate.id(), attempt, "order persisted");
                    return Ok(candidate);
                }
                Err(DuplicateOrderId(id)) => {
                    tracing::warn!(
                        order_id = %id,
                        attempt,
                        "order id collision, retrying with a fresh id"
                    );
                    candidate = candidate.with_id(self.ids.next_id());
                }
            }
        }

        Err(OrderStoreError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}
