//! The Order aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Currency, CustomerId, ItemId, ItemStatus, Money, OrderError, OrderId, OrderItem, OrderStatus,
};

/// Single source of truth for a customer's travel purchase.
///
/// One cart bundling flight segments and ancillary products, with one
/// payment lifecycle. Every mutation of a child [`OrderItem`] goes through
/// this type; the item collection is only ever exposed read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Human-readable order identifier; unique per store, see
    /// `order_store::OrderRepository`.
    id: OrderId,

    /// Customer who owns the purchase.
    customer_id: CustomerId,

    /// Contact address for lifecycle notifications.
    customer_email: String,

    /// Current lifecycle state.
    status: OrderStatus,

    /// Items in insertion order.
    items: Vec<OrderItem>,

    /// Set once at construction.
    created_at: DateTime<Utc>,

    /// Refreshed on every successful mutation.
    updated_at: DateTime<Utc>,
}

// Query methods
impl Order {
    /// Starts building an order.
    pub fn builder() -> OrderBuilder {
        OrderBuilder::default()
    }

    /// Returns the order id.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the customer id.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the customer email.
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Read-only view of the items, in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by id, across both variants.
    pub fn item(&self, item_id: ItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    /// Items still contributing to the order.
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|item| item.is_active())
    }

    /// Items of the flight-segment variant.
    pub fn flight_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|item| item.is_flight())
    }

    /// Items of the ancillary variant.
    pub fn ancillary_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|item| item.is_ancillary())
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last successful mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Derived total over currently-Active items, recomputed on every
    /// call. Never cached, so it cannot drift from the item list.
    ///
    /// Returns zero USD when no items are active. Fails with
    /// [`OrderError::MixedCurrencies`] if active items span more than one
    /// currency; multi-currency totals are unsupported.
    pub fn calculate_total(&self) -> Result<Money, OrderError> {
        let mut active = self.active_items();
        let Some(first) = active.next() else {
            return Ok(Money::zero(Currency::usd()));
        };

        let mut total = first.price().clone();
        for item in active {
            if item.price().currency() != total.currency() {
                return Err(OrderError::MixedCurrencies {
                    order_id: self.id.clone(),
                    expected: total.currency().clone(),
                    found: item.price().currency().clone(),
                });
            }
            total = total.add(item.price())?;
        }
        Ok(total)
    }
}

// Command methods
impl Order {
    /// Appends an item to the order.
    ///
    /// No duplicate-id check is performed; callers supply items with
    /// unique ids.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        self.ensure_not_cancelled()?;
        self.items.push(item);
        self.touch();
        Ok(())
    }

    /// Cancels a single item. The order itself stays in its current
    /// status.
    pub fn cancel_item(&mut self, item_id: ItemId) -> Result<(), OrderError> {
        let order_id = self.id.clone();
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| OrderError::ItemNotFound { order_id, item_id })?;
        item.transition_status(ItemStatus::Cancelled)?;
        self.touch();
        Ok(())
    }

    /// Created → PendingPayment. Refuses if there are no active items.
    pub fn initiate_payment(&mut self) -> Result<(), OrderError> {
        self.ensure_not_cancelled()?;
        if self.active_items().next().is_none() {
            return Err(OrderError::NoActiveItems {
                order_id: self.id.clone(),
            });
        }
        self.transition_status(OrderStatus::PendingPayment)
    }

    /// PendingPayment → Confirmed.
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        self.transition_status(OrderStatus::Confirmed)
    }

    /// Cancels the order and cascades to every non-cancelled item.
    ///
    /// Cancellation is legal from both live item states, so the cascade
    /// goes through the same per-item transition guard as everything
    /// else.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure_not_cancelled()?;
        for item in &mut self.items {
            if item.status() != ItemStatus::Cancelled {
                item.transition_status(ItemStatus::Cancelled)?;
            }
        }
        self.transition_status(OrderStatus::Cancelled)
    }

    /// Rebinds the aggregate to a fresh identifier, leaving items,
    /// customer fields, and `created_at` untouched.
    ///
    /// Persistence-retry path only: the repository calls this when the
    /// store reports an id collision. Application code has no reason to
    /// change an order's identity.
    pub fn with_id(mut self, id: OrderId) -> Order {
        self.id = id;
        self.touch();
        self
    }

    fn transition_status(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::IllegalOrderTransition {
                order_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    fn ensure_not_cancelled(&self) -> Result<(), OrderError> {
        if self.status == OrderStatus::Cancelled {
            return Err(OrderError::OrderCancelled {
                order_id: self.id.clone(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Builder for [`Order`].
///
/// The normal path auto-generates the order id; `order_id` exists for the
/// persistence-retry path and for rehydrating a known id.
#[derive(Debug, Default)]
pub struct OrderBuilder {
    order_id: Option<OrderId>,
    customer_id: Option<CustomerId>,
    customer_email: Option<String>,
}

impl OrderBuilder {
    /// Supplies an explicit order id instead of generating one.
    pub fn order_id(mut self, id: OrderId) -> Self {
        self.order_id = Some(id);
        self
    }

    /// Sets the owning customer. Required, non-blank.
    pub fn customer_id(mut self, id: impl Into<CustomerId>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    /// Sets the contact email. Required, non-blank.
    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Validates and builds the order in status Created with no items.
    pub fn build(self) -> Result<Order, OrderError> {
        let customer_id = self
            .customer_id
            .filter(|id| !id.as_str().trim().is_empty())
            .ok_or_else(|| OrderError::InvalidOrder {
                reason: "customer id must not be blank".to_string(),
            })?;
        let customer_email = self
            .customer_email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| OrderError::InvalidOrder {
                reason: "customer email must not be blank".to_string(),
            })?;

        let now = Utc::now();
        Ok(Order {
            id: self.order_id.unwrap_or_else(OrderId::generate),
            customer_id,
            customer_email,
            status: OrderStatus::Created,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}
