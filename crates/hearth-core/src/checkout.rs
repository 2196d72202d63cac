//! # Checkout
//!
//! Turns a cart plus the checkout form into an order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  1. CHECK FORM                                                          │
//! │     ├── Phone always required                                          │
//! │     └── Courier: address, city and postal code required                │
//! │                                                                         │
//! │  2. PRICE IT                                                            │
//! │     ├── Subtotal = Σ price × qty                                       │
//! │     ├── Delivery = courier fee, or 0 for pickup                        │
//! │     └── Total = subtotal + delivery                                    │
//! │                                                                         │
//! │  3. BUILD ORDER                                                         │
//! │     ├── Items frozen from the cart (name + price snapshot)             │
//! │     ├── Status: Processing                                             │
//! │     └── Address: "{address}, {city}, {postalCode}" or pickup label     │
//! │                                                                         │
//! │  Payment latency, saving the order and clearing the cart happen in     │
//! │  the storefront app, not here.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::new_order_id;
use crate::types::{Order, OrderStatus, User};
use crate::validation::{require, ValidationResult};

/// Default courier delivery fee.
pub const COURIER_FEE: Money = Money::from_units(500);

/// Address recorded for pickup orders.
pub const PICKUP_ADDRESS: &str = "Pickup from store";

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DeliveryMethod {
    #[default]
    Courier,
    Pickup,
}

impl DeliveryMethod {
    /// Delivery charge for this method.
    pub fn fee(&self, courier_fee: Money) -> Money {
        match self {
            DeliveryMethod::Courier => courier_fee,
            DeliveryMethod::Pickup => Money::zero(),
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            DeliveryMethod::Courier => "courierDelivery",
            DeliveryMethod::Pickup => "pickupFromStore",
        }
    }
}

/// How the customer pays. No payment is actually processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn message_key(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "cardPayment",
            PaymentMethod::Cash => "cashOnDelivery",
        }
    }
}

/// The checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutForm {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    pub phone: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
}

impl CheckoutForm {
    /// Checks required fields for the chosen delivery method.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.delivery_method == DeliveryMethod::Courier {
            require("address", &self.address)?;
            require("city", &self.city)?;
            require("postalCode", &self.postal_code)?;
        }
        require("phone", &self.phone)?;
        Ok(())
    }

    /// The address recorded on the order.
    pub fn shipping_address(&self) -> String {
        match self.delivery_method {
            DeliveryMethod::Courier => format!(
                "{}, {}, {}",
                self.address.trim(),
                self.city.trim(),
                self.postal_code.trim()
            ),
            DeliveryMethod::Pickup => PICKUP_ADDRESS.to_string(),
        }
    }
}

/// Price breakdown shown above the "Place order" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub subtotal: Money,
    pub delivery: Money,
    pub total: Money,
}

impl CheckoutSummary {
    pub fn new(cart: &Cart, delivery_method: DeliveryMethod, courier_fee: Money) -> Self {
        let subtotal = cart.total();
        let delivery = delivery_method.fee(courier_fee);
        CheckoutSummary {
            subtotal,
            delivery,
            total: subtotal + delivery,
        }
    }
}

/// Builds a Processing order for `user` from the cart and form.
///
/// ## Errors
/// - [`CoreError::EmptyCart`] if the cart has no lines
/// - [`CoreError::Validation`] if the form is incomplete
pub fn build_order(
    user: &User,
    cart: &Cart,
    form: &CheckoutForm,
    courier_fee: Money,
    placed_at: DateTime<Utc>,
) -> CoreResult<Order> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    form.validate()?;

    let summary = CheckoutSummary::new(cart, form.delivery_method, courier_fee);

    Ok(Order {
        id: new_order_id(),
        user_id: user.id.clone(),
        date: placed_at,
        items: cart.to_order_items(),
        total: summary.total,
        status: OrderStatus::Processing,
        address: Some(form.shipping_address()),
        tracking_info: None,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::seed;

    fn courier_form() -> CheckoutForm {
        CheckoutForm {
            address: "ул. Ленина 1".to_string(),
            city: "Москва".to_string(),
            postal_code: "123456".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            ..Default::default()
        }
    }

    fn filled_cart() -> Cart {
        let products = seed::products();
        let mut cart = Cart::new();
        cart.add(&products[8], 2); // Pendant Ceiling Light, 8 990
        cart
    }

    #[test]
    fn test_courier_requires_address_fields() {
        let mut form = courier_form();
        assert!(form.validate().is_ok());

        form.city = "  ".to_string();
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "city".to_string() });
        assert_eq!(err.message_key(), "fillAllFields");
    }

    #[test]
    fn test_pickup_requires_only_phone() {
        let form = CheckoutForm {
            phone: "123".to_string(),
            delivery_method: DeliveryMethod::Pickup,
            ..Default::default()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.shipping_address(), PICKUP_ADDRESS);

        let no_phone = CheckoutForm {
            delivery_method: DeliveryMethod::Pickup,
            ..Default::default()
        };
        assert!(no_phone.validate().is_err());
    }

    #[test]
    fn test_summary_includes_courier_fee() {
        let cart = filled_cart();

        let courier = CheckoutSummary::new(&cart, DeliveryMethod::Courier, COURIER_FEE);
        assert_eq!(courier.subtotal, Money::from_units(17980));
        assert_eq!(courier.total, Money::from_units(18480));

        let pickup = CheckoutSummary::new(&cart, DeliveryMethod::Pickup, COURIER_FEE);
        assert_eq!(pickup.delivery, Money::zero());
        assert_eq!(pickup.total, Money::from_units(17980));
    }

    #[test]
    fn test_build_order() {
        let user = seed::users().remove(0);
        let placed_at = Utc::now();
        let order = build_order(&user, &filled_cart(), &courier_form(), COURIER_FEE, placed_at)
            .unwrap();

        assert_eq!(order.user_id, "1");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total, Money::from_units(18480));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, "Pendant Ceiling Light");
        assert_eq!(order.date, placed_at);
        assert_eq!(
            order.address.as_deref(),
            Some("ул. Ленина 1, Москва, 123456")
        );
    }

    #[test]
    fn test_build_order_empty_cart() {
        let user = seed::users().remove(0);
        let result = build_order(&user, &Cart::new(), &courier_form(), COURIER_FEE, Utc::now());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_build_order_invalid_form() {
        let user = seed::users().remove(0);
        let result = build_order(
            &user,
            &filled_cart(),
            &CheckoutForm::default(),
            COURIER_FEE,
            Utc::now(),
        );
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
