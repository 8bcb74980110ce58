//! In-memory order store.

use std::collections::HashMap;

use domain::{Order, OrderId};

use crate::store::{DuplicateOrderId, OrderStore};

/// In-memory [`OrderStore`] implementation for tests and examples.
///
/// Keyed by order id, reporting the same duplicate-id signal a real
/// database's unique constraint would produce.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: HashMap<OrderId, Order>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a persisted order by id.
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Returns the number of persisted orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if nothing has been persisted.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn persist(&mut self, order: &Order) -> Result<(), DuplicateOrderId> {
        if self.orders.contains_key(order.id()) {
            return Err(DuplicateOrderId(order.id().clone()));
        }
        self.orders.insert(order.id().clone(), order.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_id(id: &str) -> Order {
        Order::builder()
            .order_id(OrderId::parse(id).unwrap())
            .customer_id("CUST-1")
            .customer_email("a@b.test")
            .build()
            .unwrap()
    }

    #[test]
    fn persist_then_get() {
        let mut store = InMemoryOrderStore::new();
        let order = order_with_id("AAAA2222");

        store.persist(&order).unwrap();

        assert_eq!(store.len(), 1);
        let stored = store.get(order.id()).unwrap();
        assert_eq!(stored.customer_id().as_str(), "CUST-1");
    }

    #[test]
    fn persist_rejects_a_taken_id() {
        let mut store = InMemoryOrderStore::new();
        store.persist(&order_with_id("AAAA2222")).unwrap();

        let clash = order_with_id("AAAA2222");
        let err = store.persist(&clash).unwrap_err();
        assert_eq!(err.0, OrderId::parse("AAAA2222").unwrap());
        assert_eq!(store.len(), 1);
    }
}
