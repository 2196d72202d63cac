//! # Catalog
//!
//! The product list plus the search, filter and sort rules the catalog
//! screen applies on top of it.
//!
//! ## Browse Pipeline
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌──────────────────┐   ┌─────────┐
//! │ all products │──►│ search (substring │──►│ filter (price,   │──►│  sort   │
//! │              │   │ name/type/descr.) │   │ types, rating)   │   │ stable  │
//! └──────────────┘   └───────────────────┘   └──────────────────┘   └─────────┘
//! ```
//!
//! Search is a plain case-insensitive substring match. There is no index.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, PRODUCT_TYPES};
use crate::validation::validate_product_draft;

/// Image used for admin-created products without a photo.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// Lower bound for the top of the price slider.
pub const MIN_PRICE_CEILING: Money = Money::from_units(100_000);

// =============================================================================
// Search
// =============================================================================

/// Case-insensitive substring search across name, type and description.
///
/// An empty or whitespace-only query returns every product, in order.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim();
    if query.is_empty() {
        return products.iter().collect();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.product_type.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products carrying an old price, in catalog order.
pub fn promotions(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_promotion()).cloned().collect()
}

// =============================================================================
// Filter & Sort
// =============================================================================

/// Catalog filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogFilter {
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound; `None` is unbounded.
    #[serde(default)]
    pub max_price: Option<Money>,
    /// Selected product types. Empty selects every type.
    #[serde(default)]
    pub types: Vec<String>,
    /// Minimum rating, 0 keeps everything.
    #[serde(default)]
    pub min_rating: f64,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        CatalogFilter {
            min_price: Money::zero(),
            max_price: None,
            types: Vec::new(),
            min_rating: 0.0,
        }
    }
}

impl CatalogFilter {
    /// The reset state of the filter sheet: full price range up to the most
    /// expensive product (never below [`MIN_PRICE_CEILING`]).
    pub fn for_products(products: &[Product]) -> Self {
        CatalogFilter {
            max_price: Some(max_price(products)),
            ..Default::default()
        }
    }

    /// Whether any narrowing beyond the price range is active (the dot on the
    /// filter button).
    pub fn is_narrowing(&self) -> bool {
        !self.types.is_empty() || self.min_rating > 0.0
    }

    pub fn matches(&self, product: &Product) -> bool {
        let price_ok = product.price >= self.min_price
            && self.max_price.map_or(true, |max| product.price <= max);
        let type_ok = self.types.is_empty() || self.types.contains(&product.product_type);
        let rating_ok = product.rating >= self.min_rating;

        price_ok && type_ok && rating_ok
    }
}

/// Top of the price slider for a product list.
pub fn max_price(products: &[Product]) -> Money {
    products
        .iter()
        .map(|p| p.price)
        .max()
        .map_or(MIN_PRICE_CEILING, |max| max.max(MIN_PRICE_CEILING))
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    /// Most purchased first.
    #[default]
    Popularity,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    /// Translation key for the sort label.
    pub fn message_key(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "priceLowToHigh",
            SortOption::PriceDesc => "priceHighToLow",
            SortOption::Popularity => "popularity",
            SortOption::Rating => "rating",
        }
    }

    /// Sorts in place. The sort is stable, ties keep catalog order.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::Popularity => {
                products.sort_by(|a, b| b.purchase_count.cmp(&a.purchase_count))
            }
            SortOption::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

impl std::str::FromStr for SortOption {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "popularity" => Ok(SortOption::Popularity),
            "rating" => Ok(SortOption::Rating),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: format!("unknown sort option '{}'", other),
            }),
        }
    }
}

/// Search, filter, then sort.
pub fn browse<'a>(
    products: &'a [Product],
    query: &str,
    filter: &CatalogFilter,
    sort: SortOption,
) -> Vec<&'a Product> {
    let mut found: Vec<&Product> = search(products, query)
        .into_iter()
        .filter(|p| filter.matches(p))
        .collect();
    sort.apply(&mut found);
    found
}

// =============================================================================
// Admin Edits
// =============================================================================

/// The admin panel's product form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub old_price: Option<Money>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub rating: f64,
    /// Blank falls back to [`PLACEHOLDER_IMAGE_URL`].
    #[serde(default, rename = "imageURL")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: String,
    pub in_stock: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        ProductDraft {
            name: String::new(),
            price: Money::zero(),
            old_price: None,
            product_type: PRODUCT_TYPES[0].to_string(),
            rating: 4.5,
            image_url: None,
            description: String::new(),
            in_stock: true,
        }
    }
}

impl ProductDraft {
    /// Pre-fills the form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            price: product.price,
            old_price: product.old_price,
            product_type: product.product_type.clone(),
            rating: product.rating,
            image_url: Some(product.image_url.clone()),
            description: product.description.clone(),
            in_stock: product.in_stock,
        }
    }

    fn into_product(self, id: String, purchase_count: u32) -> Product {
        let image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        Product {
            id,
            name: self.name.trim().to_string(),
            price: self.price,
            old_price: self.old_price,
            product_type: self.product_type,
            rating: self.rating,
            image_url,
            purchase_count,
            description: self.description,
            in_stock: self.in_stock,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The in-memory product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn promotions(&self) -> Vec<Product> {
        promotions(&self.products)
    }

    pub fn search(&self, query: &str) -> Vec<Product> {
        search(&self.products, query).into_iter().cloned().collect()
    }

    pub fn browse(&self, query: &str, filter: &CatalogFilter, sort: SortOption) -> Vec<Product> {
        browse(&self.products, query, filter, sort)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Creates a product from a validated draft with a fresh `prod-` id.
    pub fn insert(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        validate_product_draft(&draft)?;

        let id = format!("prod-{}", Uuid::new_v4().simple());
        let product = draft.into_product(id, 0);
        self.products.push(product.clone());
        Ok(product)
    }

    /// Replaces a product's editable fields. Id and purchase count are kept.
    pub fn update(&mut self, id: &str, draft: ProductDraft) -> CoreResult<Product> {
        validate_product_draft(&draft)?;

        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        *slot = draft.into_product(slot.id.clone(), slot.purchase_count);
        Ok(slot.clone())
    }

    pub fn remove(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
