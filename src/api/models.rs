//! Wire models for the catalog endpoint
//!
//! Request bodies are `{"action": <name>, "params": {...}}`, which maps
//! directly onto an adjacently tagged enum. Responses are `{"result": ...}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder shown for a product without a brand
pub const MISSING_BRAND: &str = "Н/Д";

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers and records
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque product identifier
///
/// The service uses string ids, but nothing about the protocol forbids
/// numeric ones, so any JSON string or number is accepted and compared by
/// value. Numbers keep their exact JSON form (`1.5`, `u64::MAX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A product record as returned by `get_items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Product name
    #[serde(default)]
    pub product: String,
    pub price: f64,
    #[serde(default)]
    pub brand: Option<String>,
}

impl Product {
    /// Brand for display, falling back to the placeholder when absent or blank
    pub fn brand_display(&self) -> &str {
        match self.brand.as_deref() {
            Some(b) if !b.trim().is_empty() => b,
            _ => MISSING_BRAND,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// A product attribute usable as a filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Product,
    Price,
    Brand,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Product, Field::Price, Field::Brand];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Price => "price",
            Self::Brand => "brand",
        }
    }

    /// Label used in the filter form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Название",
            Self::Price => "Цена",
            Self::Brand => "Бренд",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "name" => Ok(Self::Product),
            "price" => Ok(Self::Price),
            "brand" => Ok(Self::Brand),
            other => Err(format!(
                "unknown field '{}' (expected product, price or brand)",
                other
            )),
        }
    }
}

/// A scalar value to match a field against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Convert a value returned by `get_fields` into a filter value
    ///
    /// Returns None for nulls and for non-scalar values.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Field criteria; an empty mapping means "list everything"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria(BTreeMap<Field, FilterValue>);

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn set(&mut self, field: Field, value: FilterValue) {
        self.0.insert(field, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &FilterValue)> {
        self.0.iter()
    }
}

// Builders and lookups for assertions
#[cfg(test)]
impl FilterCriteria {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FilterValue> {
        self.0.get(&field)
    }

    pub fn with(mut self, field: Field, value: FilterValue) -> Self {
        self.set(field, value);
        self
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("без фильтра");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters for `get_ids`
///
/// Filter criteria are flattened in so the total-count request can carry the
/// active filter alongside (or instead of) offset/limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(flatten)]
    pub filter: FilterCriteria,
}

/// Parameters for `get_fields`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// One of the four remote operations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum Action {
    GetIds(IdsParams),
    Filter(FilterCriteria),
    GetItems { ids: Vec<ProductId> },
    GetFields(FieldsParams),
}

impl Action {
    /// Wire name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetIds(_) => "get_ids",
            Self::Filter(_) => "filter",
            Self::GetItems { .. } => "get_items",
            Self::GetFields(_) => "get_fields",
        }
    }

    /// `get_ids` for one page of the unfiltered listing
    pub fn page_of_ids(offset: u64, limit: u64) -> Self {
        Self::GetIds(IdsParams {
            offset: Some(offset),
            limit: Some(limit),
            filter: FilterCriteria::default(),
        })
    }

    /// `get_fields` for the values of one field
    pub fn field_values(field: Field) -> Self {
        Self::GetFields(FieldsParams {
            field: Some(field),
            ..Default::default()
        })
    }
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub result: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_ids_body_shape() {
        let body = serde_json::to_value(Action::page_of_ids(100, 50)).unwrap();
        assert_eq!(
            body,
            json!({"action": "get_ids", "params": {"offset": 100, "limit": 50}})
        );
    }

    #[test]
    fn test_get_ids_with_filter_params() {
        let action = Action::GetIds(IdsParams {
            filter: FilterCriteria::new().with(Field::Brand, FilterValue::Text("Acme".into())),
            ..Default::default()
        });
        let body = serde_json::to_value(action).unwrap();
        assert_eq!(
            body,
            json!({"action": "get_ids", "params": {"brand": "Acme"}})
        );
    }

    #[test]
    fn test_empty_get_ids_has_empty_params() {
        let body = serde_json::to_value(Action::GetIds(IdsParams::default())).unwrap();
        assert_eq!(body, json!({"action": "get_ids", "params": {}}));
    }

    #[test]
    fn test_filter_body_shape() {
        let criteria = FilterCriteria::new()
            .with(Field::Price, FilterValue::Number(17500.0))
            .with(Field::Product, FilterValue::Text("Золотое кольцо".into()));
        let body = serde_json::to_value(Action::Filter(criteria)).unwrap();
        assert_eq!(
            body,
            json!({"action": "filter", "params": {"product": "Золотое кольцо", "price": 17500.0}})
        );
    }

    #[test]
    fn test_get_items_and_fields_body_shape() {
        let body = serde_json::to_value(Action::GetItems {
            ids: vec!["abc".into(), ProductId::Number(7i64.into())],
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"action": "get_items", "params": {"ids": ["abc", 7]}})
        );

        let body = serde_json::to_value(Action::field_values(Field::Brand)).unwrap();
        assert_eq!(
            body,
            json!({"action": "get_fields", "params": {"field": "brand"}})
        );
    }

    #[test]
    fn test_product_parses_null_brand() {
        let product: Product = serde_json::from_value(json!({
            "id": "1789ecf3-f81c-4f49-ada2-83804dcc74b0",
            "product": "Кольцо",
            "price": 16700.0,
            "brand": null
        }))
        .unwrap();
        assert_eq!(product.brand, None);
        assert_eq!(product.brand_display(), MISSING_BRAND);
    }

    #[test]
    fn test_blank_brand_falls_back() {
        let product = Product {
            id: "x".into(),
            product: "Серьги".into(),
            price: 1.0,
            brand: Some("  ".into()),
        };
        assert_eq!(product.brand_display(), MISSING_BRAND);

        let branded = Product {
            brand: Some("Piaget".into()),
            ..product
        };
        assert_eq!(branded.brand_display(), "Piaget");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("Brand".parse::<Field>(), Ok(Field::Brand));
        assert_eq!("name".parse::<Field>(), Ok(Field::Product));
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn test_filter_value_from_json() {
        assert_eq!(
            FilterValue::from_json(&json!("Acme")),
            Some(FilterValue::Text("Acme".into()))
        );
        assert_eq!(
            FilterValue::from_json(&json!(500)),
            Some(FilterValue::Number(500.0))
        );
        assert_eq!(FilterValue::from_json(&json!(null)), None);
        assert_eq!(FilterValue::from_json(&json!([1])), None);
    }

    #[test]
    fn test_product_id_equality_by_value() {
        assert_eq!(ProductId::from("a"), ProductId::Text("a".into()));
        assert_ne!(ProductId::Number(1i64.into()), ProductId::Text("1".into()));
        assert_eq!(ProductId::Number(42i64.into()).to_string(), "42");
    }
}
