//! # Catalog State
//!
//! The product catalog as the screens see it.
//!
//! ## Two Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  source: Catalog (mock backend)      view: what has been fetched        │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐   │
//! │  │ seed::products()          │  fetch │ products   (fetch_products)  │   │
//! │  │ + admin insert/update/   │ ─────► │ promotions (fetch_promotions)│   │
//! │  │   remove (memory only)   │ latency│ is_loading / error           │   │
//! │  └──────────────────────────┘        └──────────────────────────────┘   │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                                    search() / browse() read the view    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is not persisted. Admin edits refresh whatever lists the
//! view has already fetched.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use hearth_core::catalog::{self, Catalog, CatalogFilter, ProductDraft, SortOption};
use hearth_core::{seed, CoreResult, Product};
use tracing::{debug, info};

use super::{lock, Loading, LoadingGuard};

#[derive(Debug, Default)]
struct CatalogView {
    products: Option<Vec<Product>>,
    promotions: Option<Vec<Product>>,
    pending: usize,
    error: Option<String>,
}

impl Loading for CatalogView {
    fn pending_mut(&mut self) -> &mut usize {
        &mut self.pending
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Shared catalog state.
#[derive(Debug, Clone)]
pub struct CatalogState {
    source: Arc<Mutex<Catalog>>,
    view: Arc<Mutex<CatalogView>>,
    products_latency: Duration,
    promotions_latency: Duration,
}

impl CatalogState {
    /// Catalog over the mock products. Nothing is fetched yet.
    pub fn new(products_latency: Duration, promotions_latency: Duration) -> Self {
        Self::with_products(seed::products(), products_latency, promotions_latency)
    }

    pub fn with_products(
        products: Vec<Product>,
        products_latency: Duration,
        promotions_latency: Duration,
    ) -> Self {
        CatalogState {
            source: Arc::new(Mutex::new(Catalog::new(products))),
            view: Arc::new(Mutex::new(CatalogView::default())),
            products_latency,
            promotions_latency,
        }
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Loads the full product list into the view. Always succeeds.
    pub async fn fetch_products(&self) -> Vec<Product> {
        let _loading = LoadingGuard::start(&self.view);
        tokio::time::sleep(self.products_latency).await;

        let products = lock(&self.source).products().to_vec();
        debug!(count = products.len(), "Products fetched");
        lock(&self.view).products = Some(products.clone());
        products
    }

    /// Loads the products on sale into the view. Always succeeds.
    pub async fn fetch_promotions(&self) -> Vec<Product> {
        let _loading = LoadingGuard::start(&self.view);
        tokio::time::sleep(self.promotions_latency).await;

        let promotions = lock(&self.source).promotions();
        debug!(count = promotions.len(), "Promotions fetched");
        lock(&self.view).promotions = Some(promotions.clone());
        promotions
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetched products; empty before the first fetch.
    pub fn products(&self) -> Vec<Product> {
        lock(&self.view).products.clone().unwrap_or_default()
    }

    pub fn promotions(&self) -> Vec<Product> {
        lock(&self.view).promotions.clone().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.view).pending > 0
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.view).error.clone()
    }

    pub fn clear_error(&self) {
        lock(&self.view).error = None;
    }

    /// Product detail lookup against the full catalog.
    pub fn get(&self, id: &str) -> Option<Product> {
        lock(&self.source).get(id).cloned()
    }

    /// Case-insensitive search over the fetched products. A blank query
    /// returns them all.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let view = lock(&self.view);
        let products = view.products.as_deref().unwrap_or_default();
        catalog::search(products, query).into_iter().cloned().collect()
    }

    /// Search, filter, then sort the fetched products.
    pub fn browse(&self, query: &str, filter: &CatalogFilter, sort: SortOption) -> Vec<Product> {
        let view = lock(&self.view);
        let products = view.products.as_deref().unwrap_or_default();
        catalog::browse(products, query, filter, sort)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Reset state of the filter sheet for the fetched products.
    pub fn default_filter(&self) -> CatalogFilter {
        let view = lock(&self.view);
        CatalogFilter::for_products(view.products.as_deref().unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        lock(&self.source).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.source).is_empty()
    }

    // =========================================================================
    // Admin Edits
    // =========================================================================

    pub fn add_product(&self, draft: ProductDraft) -> CoreResult<Product> {
        let product = lock(&self.source).insert(draft)?;
        info!(product_id = %product.id, name = %product.name, "Product added");
        self.refresh_view();
        Ok(product)
    }

    pub fn update_product(&self, id: &str, draft: ProductDraft) -> CoreResult<Product> {
        let product = lock(&self.source).update(id, draft)?;
        info!(product_id = %product.id, "Product updated");
        self.refresh_view();
        Ok(product)
    }

    pub fn delete_product(&self, id: &str) -> CoreResult<Product> {
        let product = lock(&self.source).remove(id)?;
        info!(product_id = %product.id, "Product deleted");
        self.refresh_view();
        Ok(product)
    }

    /// Re-copies already-fetched lists from the source.
    fn refresh_view(&self) {
        let source = lock(&self.source);
        let mut view = lock(&self.view);
        if view.products.is_some() {
            view.products = Some(source.products().to_vec());
        }
        if view.promotions.is_some() {
            view.promotions = Some(source.promotions());
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Money;

    fn catalog() -> CatalogState {
        CatalogState::new(Duration::from_millis(1000), Duration::from_millis(800))
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_fetch() {
        let catalog = catalog();
        assert!(catalog.products().is_empty());
        assert!(catalog.search("").is_empty());

        let fetched = catalog.fetch_products().await;
        assert_eq!(fetched.len(), seed::products().len());
        assert_eq!(catalog.products(), fetched);
        assert!(!catalog.is_loading());
        assert_eq!(catalog.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_over_fetched_products() {
        let catalog = catalog();
        catalog.fetch_products().await;

        assert_eq!(catalog.search("   ").len(), catalog.len());
        assert!(catalog.search("zzz-no-such-thing").is_empty());

        let sofas = catalog.search("SOFA");
        assert!(!sofas.is_empty());
        assert!(sofas.iter().all(|p| {
            let haystack = format!("{} {} {}", p.name, p.product_type, p.description);
            haystack.to_lowercase().contains("sofa")
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_promotions_have_old_price() {
        let catalog = catalog();
        let promotions = catalog.fetch_promotions().await;
        assert!(!promotions.is_empty());
        assert!(promotions.iter().all(Product::is_promotion));
        assert!(catalog.products().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_browse_sorts_by_price() {
        let catalog = catalog();
        catalog.fetch_products().await;

        let sorted = catalog.browse("", &CatalogFilter::default(), SortOption::PriceAsc);
        assert_eq!(sorted.len(), catalog.len());
        assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[tokio::test(start_paused = true)]
    async fn test_admin_edits_refresh_fetched_view() {
        let catalog = catalog();
        catalog.fetch_products().await;

        let draft = ProductDraft {
            name: "Oak Bench".to_string(),
            price: Money::from_units(12_000),
            ..Default::default()
        };
        let added = catalog.add_product(draft).unwrap();
        assert!(catalog.products().iter().any(|p| p.id == added.id));
        assert_eq!(catalog.search("oak bench").len(), 1);

        catalog.delete_product(&added.id).unwrap();
        assert!(catalog.get(&added.id).is_none());
        assert!(catalog.search("oak bench").is_empty());
    }

    #[test]
    fn test_delete_unknown_product() {
        let catalog = catalog();
        assert!(catalog.delete_product("missing").is_err());
    }
}
