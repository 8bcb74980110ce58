//! Order aggregate and related types.

mod aggregate;
mod item;
mod status;
mod value_objects;

pub use aggregate::{Order, OrderBuilder};
pub use item::{
    Ancillary, AncillaryBuilder, AncillaryType, FlightSegment, FlightSegmentBuilder, ItemId,
    ItemKind, OrderItem,
};
pub use status::{ItemStatus, OrderStatus};
pub use value_objects::{AirportCode, Currency, CustomerId, Money, MoneyError, OrderId};

use thiserror::Error;

/// Errors that can occur while building or mutating an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order builder input violated a construction rule.
    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// Item builder input violated a construction rule.
    #[error("invalid item: {reason}")]
    InvalidItem { reason: String },

    /// The item status machine rejected a transition.
    #[error("illegal status transition on item [{item_id}]: {from} -> {to}")]
    IllegalItemTransition {
        item_id: ItemId,
        from: ItemStatus,
        to: ItemStatus,
    },

    /// The order status machine rejected a transition.
    #[error("illegal status transition on order [{order_id}]: {from} -> {to}")]
    IllegalOrderTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Mutation attempted on a terminally cancelled order.
    #[error("order [{order_id}] is cancelled, no further operations allowed")]
    OrderCancelled { order_id: OrderId },

    /// Payment initiated with zero active items.
    #[error("order [{order_id}] has no active items")]
    NoActiveItems { order_id: OrderId },

    /// Cancellation requested for an id not present in the order.
    #[error("no item [{item_id}] in order [{order_id}]")]
    ItemNotFound { order_id: OrderId, item_id: ItemId },

    /// Total requested over active items spanning multiple currencies.
    #[error("order [{order_id}] mixes currencies: {expected} vs {found}")]
    MixedCurrencies {
        order_id: OrderId,
        expected: Currency,
        found: Currency,
    },

    /// A monetary value violation surfaced through an order operation.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
