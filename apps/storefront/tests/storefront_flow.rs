//! End-to-end storefront flow over file storage: browse, fill the cart,
//! sign in, check out, then restart and find everything where it was left.

use hearth_core::checkout::{CheckoutForm, DeliveryMethod};
use hearth_core::i18n::Language;
use hearth_core::{OrderStatus, Theme};
use hearth_storefront::commands::{account, cart, catalog, checkout, preferences};
use hearth_storefront::error::ErrorCode;
use hearth_storefront::state::{AppState, ConfigState, LatencyConfig};
use hearth_store::{Storage, StorageConfig};

fn config_for(dir: &std::path::Path) -> ConfigState {
    ConfigState {
        data_dir: Some(dir.to_path_buf()),
        latency: LatencyConfig::none(),
        ..Default::default()
    }
}

fn open(dir: &std::path::Path) -> AppState {
    hearth_storefront::open(config_for(dir)).unwrap()
}

#[tokio::test]
async fn test_checkout_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let order_id = {
        let state = open(dir.path());
        assert!(!catalog::list_products(&state.catalog).await.is_empty());

        cart::add_to_cart(&state.catalog, &state.cart, "1", Some(2)).unwrap();
        cart::add_to_cart(&state.catalog, &state.cart, "2", None).unwrap();
        account::sign_in(&state, "user@example.com", "password")
            .await
            .unwrap();

        let form = CheckoutForm {
            address: "Lenina 1".to_string(),
            city: "Moscow".to_string(),
            postal_code: "101000".to_string(),
            phone: "+7 900 000 00 00".to_string(),
            delivery_method: DeliveryMethod::Courier,
            ..Default::default()
        };
        let summary = checkout::checkout_summary(&state, DeliveryMethod::Courier);
        let placed = checkout::place_order(&state, form).await.unwrap();
        assert_eq!(placed.order.total, summary.total);
        placed.order.id
    };

    let state = open(dir.path());
    assert!(state.auth.is_authenticated());
    assert_eq!(cart::get_cart(&state.cart).totals.item_count, 0);

    let order = account::track_order(&state, &order_id).unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.item_count(), 3);
}

#[tokio::test]
async fn test_cart_and_preferences_persist() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = open(dir.path());
        cart::add_to_cart(&state.catalog, &state.cart, "3", Some(4)).unwrap();
        cart::decrement_item(&state.cart, "3");
        preferences::set_theme(&state.theme, None);
        preferences::set_language(&state.language, Language::Ru);
    }

    let state = open(dir.path());
    let response = cart::get_cart(&state.cart);
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].quantity, 3);

    let prefs = preferences::get_preferences(&state.theme, &state.language);
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(prefs.language, Language::Ru);
}

#[tokio::test]
async fn test_sign_out_is_remembered() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = open(dir.path());
        account::sign_in(&state, "admin@example.com", "password")
            .await
            .unwrap();
        account::sign_out(&state);
    }

    let state = open(dir.path());
    assert!(!state.auth.is_authenticated());
    assert_eq!(
        account::my_orders(&state).unwrap_err().code,
        ErrorCode::Unauthorized
    );
}

#[test]
fn test_cancelled_order_persists() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = open(dir.path());
        state.orders.cancel("order2").unwrap();
    }

    let state = open(dir.path());
    assert_eq!(
        state.orders.track("order2").map(|o| o.status),
        Some(OrderStatus::Cancelled)
    );
}

#[test]
fn test_foreign_snapshot_version_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let cart_file = dir.path().join("cart-storage.json");
    std::fs::write(
        &cart_file,
        r#"{"version":99,"savedAt":"2024-03-01T12:00:00Z","state":{"items":"garbage"}}"#,
    )
    .unwrap();

    let state = open(dir.path());
    assert_eq!(cart::get_cart(&state.cart).totals.item_count, 0);

    // The next write replaces the unusable snapshot
    cart::add_to_cart(&state.catalog, &state.cart, "1", None).unwrap();
    let storage = Storage::open(StorageConfig::new(dir.path())).unwrap();
    let saved = storage.cart().load().unwrap().unwrap();
    assert_eq!(saved.count(), 1);
}

#[test]
fn test_corrupt_snapshot_falls_back_to_seed_orders() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("order-storage.json"), "{not json").unwrap();

    let state = open(dir.path());
    assert_eq!(state.orders.len(), hearth_core::seed::orders().len());
}
