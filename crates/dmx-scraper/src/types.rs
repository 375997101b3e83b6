//! Raw product types for the Detmir `/v2/products` endpoint.
//!
//! ## Observed shape from live responses
//!
//! ### `id`
//! A JSON number in practice, but kept loose and stringified during
//! normalization so large IDs never lose precision.
//!
//! ### `price` / `old_price`
//! `price` is a mapping, e.g. `{ "price": 2599 }`. `old_price` is either
//! absent, `null`, or the same mapping shape; a handful of records carry a
//! bare number instead.
//!
//! ### `available`
//! A mapping with the offline region list nested two levels down:
//! `{ "offline": { "region_iso_codes": ["RU-MOW", "RU-SPE"] } }`.
//!
//! ### `link`
//! A mapping carrying the storefront URL under `web_url`.
//!
//! The heterogeneous fields are deserialized as `serde_json::Value` so a
//! single misshapen record surfaces as a per-item validation error during
//! normalization instead of failing the parse of the whole response list.
//! Unknown fields (the endpoint returns dozens) are ignored.

use serde::Deserialize;
use serde_json::Value;

/// A single product record from `GET /v2/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<Value>,

    /// Display name of the product.
    #[serde(default)]
    pub title: Option<String>,

    /// Price descriptor, e.g. `{ "price": 2599 }`.
    #[serde(default)]
    pub price: Option<Value>,

    /// Availability descriptor; the offline region codes drive the filter.
    #[serde(default)]
    pub available: Option<Value>,

    /// Pre-discount price descriptor, or a bare number, or absent.
    #[serde(default)]
    pub old_price: Option<Value>,

    /// Link descriptor carrying `web_url`.
    #[serde(default)]
    pub link: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_full_record() {
        let raw: RawProduct = serde_json::from_value(json!({
            "id": 123,
            "title": "LEGO City 60292",
            "price": { "price": 2599 },
            "available": { "offline": { "region_iso_codes": ["RU-MOW"] } },
            "old_price": { "price": 2999 },
            "link": { "web_url": "https://www.detmir.ru/product/index/id/123/" }
        }))
        .expect("full record should deserialize");

        assert_eq!(raw.title.as_deref(), Some("LEGO City 60292"));
        assert!(raw.id.is_some());
        assert!(raw.available.is_some());
    }

    #[test]
    fn missing_fields_default_to_none() {
        let raw: RawProduct =
            serde_json::from_value(json!({})).expect("empty record should deserialize");
        assert!(raw.id.is_none());
        assert!(raw.title.is_none());
        assert!(raw.price.is_none());
        assert!(raw.available.is_none());
        assert!(raw.old_price.is_none());
        assert!(raw.link.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw: RawProduct = serde_json::from_value(json!({
            "id": 7,
            "title": "Toy",
            "brand": { "name": "LEGO" },
            "pictures": [{ "web": "https://example.com/1.jpg" }],
            "rating": 4.8
        }))
        .expect("extra fields should be ignored");
        assert_eq!(raw.title.as_deref(), Some("Toy"));
    }

    #[test]
    fn explicit_null_old_price_deserializes_as_absent() {
        let raw: RawProduct = serde_json::from_value(json!({ "old_price": null }))
            .expect("null old_price should deserialize");
        assert!(matches!(raw.old_price, None | Some(Value::Null)));
    }
}
