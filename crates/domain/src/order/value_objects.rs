//! Value objects for the order domain.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::OrderError;

/// Alphabet for order identifiers: Crockford Base32. The letters I, L, O
/// and U are excluded so an id read over the phone cannot be misheard as
/// 1 or 0.
const ORDER_ID_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of an order identifier in symbols (32^8 ≈ 1.1 trillion ids).
const ORDER_ID_LENGTH: usize = 8;

/// Human-readable order identifier.
///
/// Eight Crockford Base32 symbols, effectively random. Uniqueness is
/// enforced by the persistence layer, not here: the collision probability
/// is small but non-zero, and `order_store::OrderRepository` retries with
/// a fresh id when the store reports a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Generates a new random order id.
    pub fn generate() -> Self {
        let bytes = Uuid::new_v4().into_bytes();

        // Bytes 10..15 of a v4 UUID sit entirely below the version and
        // variant fields: 40 unstructured random bits, one 5-bit group per
        // Base32 symbol.
        let mut acc = 0u64;
        for byte in &bytes[10..15] {
            acc = (acc << 8) | u64::from(*byte);
        }

        let mut id = String::with_capacity(ORDER_ID_LENGTH);
        for _ in 0..ORDER_ID_LENGTH {
            id.push(ORDER_ID_ALPHABET[(acc & 0x1f) as usize] as char);
            acc >>= 5;
        }
        Self(id)
    }

    /// Parses an externally supplied order id, normalizing to upper-case.
    pub fn parse(id: impl Into<String>) -> Result<Self, OrderError> {
        let id: String = id.into();
        let id = id.trim().to_ascii_uppercase();
        if id.len() != ORDER_ID_LENGTH || !id.bytes().all(|b| ORDER_ID_ALPHABET.contains(&b)) {
            return Err(OrderError::InvalidOrder {
                reason: format!(
                    "order id must be {ORDER_ID_LENGTH} Base32 symbols, got '{id}'"
                ),
            });
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OrderId {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Customer identifier, owned by the customer subsystem.
///
/// Opaque to this crate: any non-blank string is accepted (validated when
/// the order is built).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a customer id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the customer id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CustomerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CustomerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Three-letter IATA airport code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Parses an airport code, normalizing to upper-case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, OrderError> {
        let code = code.as_ref().trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(OrderError::InvalidItem {
                reason: format!("not a 3-letter IATA airport code: '{code}'"),
            });
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}

/// ISO 4217 currency code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parses a currency code, normalizing to upper-case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, MoneyError> {
        let code = code.as_ref().trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency {
                code: code.to_string(),
            });
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// US dollars, the fallback currency for empty order totals.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// Errors raised by [`Money`] construction and arithmetic.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Amount is negative.
    #[error("money amount cannot be negative, got {amount}")]
    InvalidAmount { amount: Decimal },

    /// Currency code is not three ASCII letters.
    #[error("not a 3-letter ISO currency code: '{code}'")]
    InvalidCurrency { code: String },

    /// Arithmetic attempted across two different currencies.
    #[error("cannot operate on different currencies: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// Decimal arithmetic exceeded the representable range.
    #[error("money arithmetic overflowed")]
    AmountOverflow,
}

/// Immutable monetary amount in a specific currency.
///
/// Amounts are normalized once, at construction, to scale 2 with half-up
/// rounding; every derived value goes through the same constructor, so
/// repeated arithmetic never drifts scale. Equality is by value
/// (amount, currency) and insensitive to trailing zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a monetary value, rejecting negative amounts.
    pub fn of(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::InvalidAmount { amount });
        }
        let mut normalized =
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(2);
        Ok(Self {
            amount: normalized,
            currency,
        })
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        let mut amount = Decimal::ZERO;
        amount.rescale(2);
        Self { amount, currency }
    }

    /// Returns the normalized amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Adds another amount of the same currency.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::AmountOverflow)?;
        Money::of(sum, self.currency.clone())
    }

    /// Subtracts another amount of the same currency.
    ///
    /// Fails with [`MoneyError::InvalidAmount`] if the result would be
    /// negative.
    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::AmountOverflow)?;
        Money::of(difference, self.currency.clone())
    }

    /// Multiplies by a whole factor.
    pub fn multiply(&self, factor: u32) -> Result<Money, MoneyError> {
        let product = self
            .amount
            .checked_mul(Decimal::from(factor))
            .ok_or(MoneyError::AmountOverflow)?;
        Money::of(product, self.currency.clone())
    }

    /// Compares two amounts of the same currency.
    pub fn is_greater_than(&self, other: &Money) -> Result<bool, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
