//! # Catalog Commands
//!
//! Home screen, catalog tab and product page.
//!
//! ## Screens → Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Home tab ──────────► list_promotions()   (promotions carousel)        │
//! │                       list_products()     (popular grid)               │
//! │                                                                         │
//! │  Catalog tab ───────► browse_products(query, filter, sort)             │
//! │                       search_products(query)                            │
//! │                                                                         │
//! │  Product page ──────► get_product(id)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listing commands fetch (with the simulated latency) the first time they
//! run and read the fetched list afterwards.

use hearth_core::catalog::{CatalogFilter, SortOption};
use hearth_core::validation::validate_search_query;
use hearth_core::{CoreError, Product};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, CatalogState};

/// Product page data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    /// Percent off the old price, for the sale badge.
    pub discount_percent: Option<u32>,
    /// How many are already in the cart.
    pub in_cart: u32,
}

async fn ensure_fetched(catalog: &CatalogState) -> Vec<Product> {
    let products = catalog.products();
    if products.is_empty() {
        catalog.fetch_products().await
    } else {
        products
    }
}

/// All products.
pub async fn list_products(catalog: &CatalogState) -> Vec<Product> {
    debug!("list_products command");
    ensure_fetched(catalog).await
}

/// Products with an old price.
pub async fn list_promotions(catalog: &CatalogState) -> Vec<Product> {
    debug!("list_promotions command");
    let promotions = catalog.promotions();
    if promotions.is_empty() {
        catalog.fetch_promotions().await
    } else {
        promotions
    }
}

/// Case-insensitive search across name, type and description.
pub async fn search_products(state: &AppState, query: &str) -> ApiResult<Vec<Product>> {
    let query = validate_search_query(query)
        .map_err(|e| ApiError::localized(e.into(), state.language.current()))?;
    debug!(query = %query, "search_products command");

    ensure_fetched(&state.catalog).await;
    Ok(state.catalog.search(&query))
}

/// Search, filter, then sort.
///
/// `filter: None` uses the reset filter for the current products.
pub async fn browse_products(
    state: &AppState,
    query: &str,
    filter: Option<CatalogFilter>,
    sort: SortOption,
) -> ApiResult<Vec<Product>> {
    let query = validate_search_query(query)
        .map_err(|e| ApiError::localized(e.into(), state.language.current()))?;
    debug!(query = %query, ?sort, "browse_products command");

    ensure_fetched(&state.catalog).await;
    let filter = filter.unwrap_or_else(|| state.catalog.default_filter());
    Ok(state.catalog.browse(&query, &filter, sort))
}

/// Product page.
pub fn get_product(state: &AppState, product_id: &str) -> ApiResult<ProductDetail> {
    debug!(product_id, "get_product command");
    let product = state
        .catalog
        .get(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    Ok(ProductDetail {
        discount_percent: product.discount_percent(),
        in_cart: state.cart.with_cart(|c| c.quantity_of(product_id)),
        product,
    })
}
