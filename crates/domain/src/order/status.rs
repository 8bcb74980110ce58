//! Item and order status machines.
//!
//! Two independent lifecycles: a single item can be cancelled while its
//! parent order stays Confirmed. Both machines are pure transition tables
//! used as guards by the owning entities.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single item inside an order.
///
/// State transitions:
/// ```text
/// Active ◄────► ModificationPending
///    │                 │
///    └──► Cancelled ◄──┘   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    /// Item contributes to the order and its total.
    #[default]
    Active,

    /// A change (rebooking, swap) is in flight; the item can return to
    /// Active or be cancelled.
    ModificationPending,

    /// Item was cancelled (terminal state).
    Cancelled,
}

impl ItemStatus {
    /// Returns true if the machine allows moving from this state to
    /// `target`.
    pub fn can_transition_to(self, target: ItemStatus) -> bool {
        match self {
            ItemStatus::Active => matches!(
                target,
                ItemStatus::ModificationPending | ItemStatus::Cancelled
            ),
            ItemStatus::ModificationPending => {
                matches!(target, ItemStatus::Active | ItemStatus::Cancelled)
            }
            ItemStatus::Cancelled => false,
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Cancelled)
    }

    /// Returns the state name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::ModificationPending => "ModificationPending",
            ItemStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level lifecycle of an order.
///
/// State transitions:
/// ```text
/// Created ──► PendingPayment ──► Confirmed
///    │              │                │
///    └──────────────┴────────────────┴──► Cancelled   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order is being assembled; items can be added.
    #[default]
    Created,

    /// Payment has been initiated and is awaited.
    PendingPayment,

    /// Payment settled; the purchase is confirmed.
    Confirmed,

    /// Order was cancelled (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the machine allows moving from this state to
    /// `target`.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        match self {
            OrderStatus::Created => {
                matches!(target, OrderStatus::PendingPayment | OrderStatus::Cancelled)
            }
            OrderStatus::PendingPayment => {
                matches!(target, OrderStatus::Confirmed | OrderStatus::Cancelled)
            }
            OrderStatus::Confirmed => matches!(target, OrderStatus::Cancelled),
            OrderStatus::Cancelled => false,
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Returns the state name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::PendingPayment => "PendingPayment",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
