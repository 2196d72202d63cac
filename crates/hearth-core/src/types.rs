//! # Domain Types
//!
//! Core domain types shared by every store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name, type     │   │  userId         │   │  email          │       │
//! │  │  price          │   │  items[]        │   │  name           │       │
//! │  │  oldPrice?      │   │  total, status  │   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderItem     │   │  OrderStatus    │   │      Role       │       │
//! │  │  (snapshot of   │   │  Processing     │   │  admin          │       │
//! │  │   name + price) │   │  Shipped        │   │  moderator      │       │
//! │  └─────────────────┘   │  Delivered      │   │  visitor        │       │
//! │                        │  Cancelled      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Field names serialize in camelCase (`oldPrice`, `imageURL`,
//! `purchaseCount`, `userId`, `trackingInfo`) so persisted snapshots and the
//! generated TypeScript bindings keep the shape the mobile screens consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// The product categories offered by the shop, in display order.
pub const PRODUCT_TYPES: [&str; 10] = [
    "Sofas",
    "Chairs",
    "Tables",
    "Beds",
    "Cabinets",
    "Desks",
    "Bookshelves",
    "Wardrobes",
    "Lighting",
    "Decor",
];

/// A product in the catalog.
///
/// Reference data: seeded at startup and only changed by admin-panel edits
/// on the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Current price.
    pub price: Money,

    /// Price before markdown. Products with an old price are promotions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub old_price: Option<Money>,

    /// Category, one of [`PRODUCT_TYPES`].
    #[serde(rename = "type")]
    pub product_type: String,

    /// Average rating, 0 to 5.
    pub rating: f64,

    /// Product photo.
    #[serde(rename = "imageURL")]
    pub image_url: String,

    /// Times purchased; drives "popularity" sorting.
    pub purchase_count: u32,

    /// Long description shown on the product page.
    pub description: String,

    /// Whether the product can be ordered.
    pub in_stock: bool,
}

impl Product {
    /// True when the product carries a markdown from an old price.
    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.old_price.is_some()
    }

    /// Discount badge percentage, if the product is marked down.
    pub fn discount_percent(&self) -> Option<u32> {
        self.old_price
            .and_then(|old| self.price.discount_percent_from(old))
    }
}

// =============================================================================
// Role
// =============================================================================

/// The role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    /// Full admin panel access.
    Admin,
    /// Admin panel access limited to the catalog.
    Moderator,
    /// Regular shopper. Default for new accounts.
    #[default]
    Visitor,
}

impl Role {
    /// Lowercase name, also the translation key for the role label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Visitor => "visitor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "moderator" => Ok(Role::Moderator),
            "visitor" => Ok(Role::Visitor),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{}'", other),
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notifications_enabled: Option<bool>,
    #[serde(default)]
    pub role: Role,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// ## State Machine
/// ```text
/// ┌────────────┐     ┌─────────┐     ┌───────────┐
/// │ Processing │────►│ Shipped │────►│ Delivered │  (terminal)
/// └─────┬──────┘     └─────────┘     └───────────┘
///       │
///       │            ┌───────────┐
///       └───────────►│ Cancelled │  (terminal)
///                    └───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Placed, not yet shipped. The only cancellable state.
    #[default]
    Processing,
    /// Handed to the courier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled by the customer or an admin.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order (admin status picker).
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    /// Delivered and Cancelled orders never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Translation key for the status label.
    pub fn message_key(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown order status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line of an order.
///
/// Uses the snapshot pattern: name and price are frozen at order time so
/// later catalog edits never change order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    /// Product name at time of order (frozen).
    pub name: String,
    /// Unit price at time of order (frozen).
    pub price: Money,
}

impl OrderItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// Shipment tracking details for an order on its way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrackingInfo {
    pub tracking_number: String,
    #[ts(as = "String")]
    pub estimated_delivery: DateTime<Utc>,
    pub current_location: String,
    /// Delivery progress, 0 to 100.
    pub progress: u8,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    /// When the order was placed (ISO-8601 on the wire).
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    /// Amount charged, delivery fee included.
    pub total: Money,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tracking_info: Option<TrackingInfo>,
}

impl Order {
    /// Total number of units across all items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of the item lines, without delivery.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "theme".to_string(),
                reason: format!("unknown theme '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
