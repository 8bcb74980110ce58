//! Travel order domain model.
//!
//! This crate provides the aggregate-root consistency core for travel
//! purchases:
//! - `Money` and `Currency` value objects with currency-checked arithmetic
//! - `ItemStatus` / `OrderStatus` state machines
//! - The `OrderItem` family (flight segments and ancillary products)
//! - The `Order` aggregate root owning the item collection
//!
//! Persistence lives in the sibling `order-store` crate; this crate is
//! synchronous and storage-agnostic.

pub mod order;

pub use order::{
    AirportCode, Ancillary, AncillaryBuilder, AncillaryType, Currency, CustomerId, FlightSegment,
    FlightSegmentBuilder, ItemId, ItemKind, ItemStatus, Money, MoneyError, Order, OrderBuilder,
    OrderError, OrderId, OrderItem, OrderStatus,
};
