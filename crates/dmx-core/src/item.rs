use serde::{Deserialize, Serialize};

/// A product kept by the region filter and reshaped for CSV export.
///
/// Immutable once constructed: the transformer builds each instance in one
/// pass and nothing downstream mutates it. Every instance is guaranteed to
/// have at least one source region in the target region set, a flat
/// `available` string, and a scalar (or absent) `old_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Source identifier. Numeric IDs from the API are stored as strings to
    /// avoid precision loss.
    pub id: Option<String>,
    /// Display name of the product.
    pub title: Option<String>,
    /// The retained price descriptor. The scalar is extracted only at write
    /// time, so a missing price survives normalization and fails the export.
    pub price: Option<PriceTag>,
    /// Comma-joined region ISO codes the product is available in offline,
    /// e.g. `"RU-MOW, RU-SPE"`.
    pub available: String,
    /// Pre-discount price, flattened from the nested descriptor during
    /// construction.
    pub old_price: Option<f64>,
    /// The retained link descriptor.
    pub link: Option<ProductLink>,
}

impl CatalogItem {
    /// Identifier used in error messages when a row cannot be exported.
    #[must_use]
    pub fn id_label(&self) -> &str {
        self.id.as_deref().unwrap_or("<unknown id>")
    }

    /// Returns `true` when the item carries a pre-discount price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.old_price.is_some()
    }
}

/// Price descriptor as returned by the API, e.g. `{ "price": 2599 }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTag {
    pub price: Option<f64>,
}

/// Link descriptor as returned by the API, e.g.
/// `{ "web_url": "https://www.detmir.ru/product/index/id/123/" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLink {
    pub web_url: Option<String>,
}
