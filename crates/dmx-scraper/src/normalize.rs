//! Normalization from raw API records to [`dmx_core::CatalogItem`].
//!
//! Region filtering and flattening happen together here: the filter keeps
//! items whose offline region codes intersect the target set, and each kept
//! item is reshaped in one pass. Pure functions; shape problems surface as
//! [`ValidationError`].

use dmx_core::{CatalogItem, PriceTag, ProductLink, ValidationError};
use serde_json::{Map, Value};

use crate::types::RawProduct;

/// Filters `items` to those available offline in at least one of
/// `target_regions` and normalizes each kept item. Stable: kept items stay
/// in input order.
///
/// Items with no availability descriptor cannot match any region and are
/// discarded; a descriptor that is present but misshapen is an error.
///
/// # Errors
///
/// Returns [`ValidationError`] when an availability descriptor cannot be
/// read or a kept item fails to normalize.
pub fn normalize_catalog(
    items: Vec<RawProduct>,
    target_regions: &[String],
) -> Result<Vec<CatalogItem>, ValidationError> {
    let mut kept = Vec::new();
    for item in items {
        let Some(available) = item.available.as_ref() else {
            continue;
        };
        if available.is_null() {
            continue;
        }
        let codes = region_codes(available, &item_label(&item))?;
        if !codes.iter().any(|code| target_regions.contains(code)) {
            continue;
        }
        kept.push(normalize_item(&item)?);
    }
    Ok(kept)
}

/// Normalizes a single raw record into a [`CatalogItem`].
///
/// Absent fields default to `None`; the availability descriptor is required
/// and flattened to the comma-joined region-code string; `old_price` is
/// flattened to a scalar.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when `available` is absent and
/// [`ValidationError::IncompatibleShape`] when a field cannot be read as the
/// expected shape.
pub fn normalize_item(item: &RawProduct) -> Result<CatalogItem, ValidationError> {
    let label = item_label(item);

    let id = match &item.id {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(incompatible(&label, "id", "a scalar identifier", other));
        }
    };

    let available = flatten_available(item.available.as_ref(), &label)?;

    let price = match &item.price {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(PriceTag {
            price: number_field(map, "price", "price", &label)?,
        }),
        Some(other) => {
            return Err(incompatible(&label, "price", "a price descriptor", other));
        }
    };

    let old_price = flatten_old_price(item.old_price.as_ref(), &label)?;

    let link = match &item.link {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(ProductLink {
            web_url: match map.get("web_url") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    return Err(incompatible(&label, "link", "a web_url string", other));
                }
            },
        }),
        Some(other) => {
            return Err(incompatible(&label, "link", "a link descriptor", other));
        }
    };

    Ok(CatalogItem {
        id,
        title: item.title.clone(),
        price,
        available,
        old_price,
        link,
    })
}

/// Reads the region ISO codes out of an availability value.
///
/// Accepts the API's nested descriptor (`offline.region_iso_codes`) or an
/// already-flattened comma-joined string, which makes the flattening step
/// idempotent.
fn region_codes(available: &Value, item: &str) -> Result<Vec<String>, ValidationError> {
    match available {
        Value::String(flat) => Ok(flat
            .split(',')
            .map(|code| code.trim().to_owned())
            .filter(|code| !code.is_empty())
            .collect()),
        Value::Object(map) => {
            let offline = map
                .get("offline")
                .and_then(Value::as_object)
                .ok_or_else(|| ValidationError::IncompatibleShape {
                    item: item.to_owned(),
                    field: "available",
                    reason: "descriptor has no offline section".to_owned(),
                })?;
            let codes = offline
                .get("region_iso_codes")
                .and_then(Value::as_array)
                .ok_or_else(|| ValidationError::IncompatibleShape {
                    item: item.to_owned(),
                    field: "available",
                    reason: "offline section has no region_iso_codes list".to_owned(),
                })?;
            Ok(codes
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect())
        }
        other => Err(incompatible(
            item,
            "available",
            "a region descriptor or flat string",
            other,
        )),
    }
}

/// Flattens an availability value to the comma-joined region-code string.
fn flatten_available(available: Option<&Value>, item: &str) -> Result<String, ValidationError> {
    let Some(value) = available else {
        return Err(ValidationError::MissingField {
            item: item.to_owned(),
            field: "available",
        });
    };
    Ok(region_codes(value, item)?.join(", "))
}

/// Flattens an old-price value to a scalar: bare numbers pass through,
/// descriptors contribute their `price` sub-field, null/absent stays absent.
fn flatten_old_price(
    old_price: Option<&Value>,
    item: &str,
) -> Result<Option<f64>, ValidationError> {
    match old_price {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::Object(map)) => match map.get("price") {
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::Null) => Ok(None),
            None => Err(ValidationError::IncompatibleShape {
                item: item.to_owned(),
                field: "old_price",
                reason: "descriptor has no price field".to_owned(),
            }),
            Some(other) => Err(incompatible(item, "old_price", "a price scalar", other)),
        },
        Some(other) => Err(incompatible(
            item,
            "old_price",
            "a price scalar or descriptor",
            other,
        )),
    }
}

/// Reads an optional numeric sub-field out of a descriptor mapping.
fn number_field(
    map: &Map<String, Value>,
    key: &str,
    field: &'static str,
    item: &str,
) -> Result<Option<f64>, ValidationError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(incompatible(item, field, "a number", other)),
    }
}

fn incompatible(
    item: &str,
    field: &'static str,
    expected: &str,
    got: &Value,
) -> ValidationError {
    ValidationError::IncompatibleShape {
        item: item.to_owned(),
        field,
        reason: format!("expected {expected}, got {}", value_kind(got)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn item_label(item: &RawProduct) -> String {
    match &item.id {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "<unknown id>".to_owned(),
    }
}
