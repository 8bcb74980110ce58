//! The purchasable item family: flight segments and ancillary products.
//!
//! Every item shares one identity/status/price record; what varies per
//! variant lives behind [`ItemKind`]. Items are entities: equality is by
//! (variant, id), never by content, never across variants.

use std::hash::{Hash, Hasher};
use std::mem;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AirportCode, ItemStatus, Money, OrderError};

/// Unique identifier for an order item.
///
/// Wraps a UUID to prevent mixing item ids up with other UUID-based
/// identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a new random item id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an item id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ItemId> for Uuid {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Catalogue discriminator for ancillary products.
///
/// The catalogue grows over time (lounge access, priority boarding, ...),
/// so downstream matches must carry a wildcard arm.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AncillaryType {
    Baggage,
    Meal,
    Wifi,
    SeatUpgrade,
    Insurance,
}

impl AncillaryType {
    /// Returns the catalogue tag as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            AncillaryType::Baggage => "Baggage",
            AncillaryType::Meal => "Meal",
            AncillaryType::Wifi => "Wifi",
            AncillaryType::SeatUpgrade => "SeatUpgrade",
            AncillaryType::Insurance => "Insurance",
        }
    }
}

impl std::fmt::Display for AncillaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flight leg. Multi-leg trips are modelled as multiple flight items
/// in the same order, one per segment.
///
/// Fields are immutable after construction: if a flight changes, the
/// domain action is to cancel this item and add a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSegment {
    origin: AirportCode,
    destination: AirportCode,
    flight_number: String,
    departure_time: DateTime<Utc>,
    arrival_time: Option<DateTime<Utc>>,
}

impl FlightSegment {
    /// Departure airport.
    pub fn origin(&self) -> &AirportCode {
        &self.origin
    }

    /// Arrival airport.
    pub fn destination(&self) -> &AirportCode {
        &self.destination
    }

    /// Marketing flight number, e.g. "BA178".
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Scheduled departure.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    /// Scheduled arrival, if known at booking time.
    pub fn arrival_time(&self) -> Option<DateTime<Utc>> {
        self.arrival_time
    }
}

/// A non-flight product sold alongside the flights: bag, meal, Wi-Fi,
/// insurance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ancillary {
    name: String,
    kind: AncillaryType,
    /// None ⇒ order-level (e.g. trip-wide Wi-Fi); Some ⇒ tied to one
    /// flight item. The link is caller-maintained: it is never checked
    /// against the order's item set.
    linked_flight_item: Option<ItemId>,
}

impl Ancillary {
    /// Product display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalogue type tag.
    pub fn kind(&self) -> AncillaryType {
        self.kind
    }

    /// The flight item this product is tied to, if any.
    pub fn linked_flight_item(&self) -> Option<ItemId> {
        self.linked_flight_item
    }

    /// Returns true when this product is tied to a specific flight
    /// segment.
    pub fn is_linked_to_flight(&self) -> bool {
        self.linked_flight_item.is_some()
    }
}

/// Variant payload of an [`OrderItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ItemKind {
    Flight(FlightSegment),
    Ancillary(Ancillary),
}

/// A purchasable item inside an order.
///
/// The status is the one mutable field, and it only moves through
/// [`OrderItem::transition_status`]; id, price, and the variant payload
/// are fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    id: ItemId,
    status: ItemStatus,
    price: Money,
    kind: ItemKind,
}

impl OrderItem {
    /// Starts building a flight segment item.
    pub fn flight() -> FlightSegmentBuilder {
        FlightSegmentBuilder::default()
    }

    /// Starts building an ancillary product item.
    pub fn ancillary() -> AncillaryBuilder {
        AncillaryBuilder::default()
    }

    /// Returns the item id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the current status.
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Returns the price.
    pub fn price(&self) -> &Money {
        &self.price
    }

    /// Returns the variant payload.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Returns the flight payload if this is a flight item.
    pub fn flight_segment(&self) -> Option<&FlightSegment> {
        match &self.kind {
            ItemKind::Flight(segment) => Some(segment),
            ItemKind::Ancillary(_) => None,
        }
    }

    /// Returns the ancillary payload if this is an ancillary item.
    pub fn ancillary_product(&self) -> Option<&Ancillary> {
        match &self.kind {
            ItemKind::Ancillary(ancillary) => Some(ancillary),
            ItemKind::Flight(_) => None,
        }
    }

    /// Returns true if this is a flight item.
    pub fn is_flight(&self) -> bool {
        matches!(self.kind, ItemKind::Flight(_))
    }

    /// Returns true if this is an ancillary item.
    pub fn is_ancillary(&self) -> bool {
        matches!(self.kind, ItemKind::Ancillary(_))
    }

    /// Returns true if the item still contributes to the order.
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    /// Moves the item to `next`, delegating legality to the
    /// [`ItemStatus`] machine.
    pub fn transition_status(&mut self, next: ItemStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::IllegalItemTransition {
                item_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

// Entity identity: two items are equal iff they are the same variant with
// the same id. Content never participates.
impl PartialEq for OrderItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && mem::discriminant(&self.kind) == mem::discriminant(&other.kind)
    }
}

impl Eq for OrderItem {}

impl Hash for OrderItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        mem::discriminant(&self.kind).hash(state);
    }
}

fn invalid_item(reason: impl Into<String>) -> OrderError {
    OrderError::InvalidItem {
        reason: reason.into(),
    }
}

/// Staged builder for flight segment items.
///
/// Defaults: generated id, status Active. All validation runs at
/// [`FlightSegmentBuilder::build`], never lazily.
#[derive(Debug, Default)]
pub struct FlightSegmentBuilder {
    item_id: Option<ItemId>,
    status: Option<ItemStatus>,
    price: Option<Money>,
    origin: Option<String>,
    destination: Option<String>,
    flight_number: Option<String>,
    departure_time: Option<DateTime<Utc>>,
    arrival_time: Option<DateTime<Utc>>,
}

impl FlightSegmentBuilder {
    /// Overrides the generated item id.
    pub fn item_id(mut self, id: ItemId) -> Self {
        self.item_id = Some(id);
        self
    }

    /// Overrides the initial status (defaults to Active).
    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the price. Required.
    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the departure airport code. Required.
    pub fn origin(mut self, code: impl Into<String>) -> Self {
        self.origin = Some(code.into());
        self
    }

    /// Sets the arrival airport code. Required.
    pub fn destination(mut self, code: impl Into<String>) -> Self {
        self.destination = Some(code.into());
        self
    }

    /// Sets the flight number. Required.
    pub fn flight_number(mut self, number: impl Into<String>) -> Self {
        self.flight_number = Some(number.into());
        self
    }

    /// Sets the scheduled departure. Required.
    pub fn departure_time(mut self, departure: DateTime<Utc>) -> Self {
        self.departure_time = Some(departure);
        self
    }

    /// Sets the scheduled arrival, which must be strictly after departure.
    pub fn arrival_time(mut self, arrival: DateTime<Utc>) -> Self {
        self.arrival_time = Some(arrival);
        self
    }

    /// Validates and builds the item.
    pub fn build(self) -> Result<OrderItem, OrderError> {
        let price = self.price.ok_or_else(|| invalid_item("price is required"))?;

        let origin = match self.origin {
            Some(code) => AirportCode::new(&code).map_err(|_| {
                invalid_item(format!("origin must be a 3-letter IATA code, got '{code}'"))
            })?,
            None => return Err(invalid_item("origin is required")),
        };
        let destination = match self.destination {
            Some(code) => AirportCode::new(&code).map_err(|_| {
                invalid_item(format!(
                    "destination must be a 3-letter IATA code, got '{code}'"
                ))
            })?,
            None => return Err(invalid_item("destination is required")),
        };
        if origin == destination {
            return Err(invalid_item(
                "origin and destination cannot be the same airport",
            ));
        }

        let flight_number = self
            .flight_number
            .filter(|number| !number.trim().is_empty())
            .ok_or_else(|| invalid_item("flight number must not be blank"))?;

        let departure_time = self
            .departure_time
            .ok_or_else(|| invalid_item("departure time is required"))?;
        if let Some(arrival) = self.arrival_time
            && arrival <= departure_time
        {
            return Err(invalid_item("arrival time must be after departure time"));
        }

        Ok(OrderItem {
            id: self.item_id.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            price,
            kind: ItemKind::Flight(FlightSegment {
                origin,
                destination,
                flight_number,
                departure_time,
                arrival_time: self.arrival_time,
            }),
        })
    }
}

/// Staged builder for ancillary product items.
///
/// Defaults: generated id, status Active, no linked flight (order-level
/// product).
#[derive(Debug, Default)]
pub struct AncillaryBuilder {
    item_id: Option<ItemId>,
    status: Option<ItemStatus>,
    price: Option<Money>,
    name: Option<String>,
    kind: Option<AncillaryType>,
    linked_flight_item: Option<ItemId>,
}

impl AncillaryBuilder {
    /// Overrides the generated item id.
    pub fn item_id(mut self, id: ItemId) -> Self {
        self.item_id = Some(id);
        self
    }

    /// Overrides the initial status (defaults to Active).
    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the price. Required.
    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the product display name. Required.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the catalogue type tag. Required.
    pub fn kind(mut self, kind: AncillaryType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Ties the product to one flight item. Omit for order-level
    /// products.
    pub fn linked_flight_item(mut self, flight_item_id: ItemId) -> Self {
        self.linked_flight_item = Some(flight_item_id);
        self
    }

    /// Validates and builds the item.
    pub fn build(self) -> Result<OrderItem, OrderError> {
        let price = self.price.ok_or_else(|| invalid_item("price is required"))?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| invalid_item("ancillary name must not be blank"))?;
        let kind = self
            .kind
            .ok_or_else(|| invalid_item("ancillary type is required"))?;

        Ok(OrderItem {
            id: self.item_id.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            price,
            kind: ItemKind::Ancillary(Ancillary {
                name,
                kind,
                linked_flight_item: self.linked_flight_item,
            }),
        })
    }
}
