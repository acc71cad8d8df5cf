//! Canonical event taxonomy: the commerce and app events every analytics
//! provider agrees on. Field names serialize in camelCase so events can be
//! replayed from the JSON shape emitted by app code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngageResult;

/// Fields shared by every canonical event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generics {
    #[serde(default)]
    pub event_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_action: Option<String>,
}

impl Generics {
    pub fn new(event_category: impl Into<String>, event_action: impl Into<String>) -> Self {
        Self {
            event_category: event_category.into(),
            event_action: Some(event_action.into()),
        }
    }

    /// Generics with no `eventAction`.
    pub fn category(event_category: impl Into<String>) -> Self {
        Self {
            event_category: event_category.into(),
            event_action: None,
        }
    }
}

/// A quantity or price: app code sends either a number or a preformatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write_number(f, *n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Renders numbers the way app code stringifies them: shortest round-trip
/// digits, `NaN`/`Infinity`, `0` for negative zero, and exponent notation
/// (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&formatted),
        };
    }
    write!(f, "{n}")
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickGeneric {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCall {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEmail {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionGeneric {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDirections {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchGeneric {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Page or screen view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenview {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionProduct {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
}

/// Line item of a completed transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProduct {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub products: Vec<TransactionProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAction {
    #[serde(default)]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupons: Vec<String>,
}

/// Line item returned in a partial refund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundProduct {
    #[serde(default)]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRefund {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub products: Vec<RefundProduct>,
}

/// App lifecycle event (launch, background, close).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(flatten)]
    pub generics: Generics,
    #[serde(default)]
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_installer_id: Option<String>,
}

/// Tag identifying a canonical event kind. Keys the normalizer registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    ClickGeneric,
    ContactCall,
    ContactEmail,
    ImpressionGeneric,
    LocationDirections,
    Pageview,
    Screenview,
    SearchGeneric,
    AddProduct,
    Checkout,
    CheckoutOption,
    ClickProduct,
    ClickPromotion,
    ImpressionProduct,
    ImpressionPromotion,
    DetailProduct,
    Purchase,
    RefundAll,
    RefundPartial,
    RemoveProduct,
    Lifecycle,
}

impl EventKind {
    pub const ALL: [EventKind; 21] = [
        EventKind::ClickGeneric,
        EventKind::ContactCall,
        EventKind::ContactEmail,
        EventKind::ImpressionGeneric,
        EventKind::LocationDirections,
        EventKind::Pageview,
        EventKind::Screenview,
        EventKind::SearchGeneric,
        EventKind::AddProduct,
        EventKind::Checkout,
        EventKind::CheckoutOption,
        EventKind::ClickProduct,
        EventKind::ClickPromotion,
        EventKind::ImpressionProduct,
        EventKind::ImpressionPromotion,
        EventKind::DetailProduct,
        EventKind::Purchase,
        EventKind::RefundAll,
        EventKind::RefundPartial,
        EventKind::RemoveProduct,
        EventKind::Lifecycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ClickGeneric => "clickGeneric",
            EventKind::ContactCall => "contactCall",
            EventKind::ContactEmail => "contactEmail",
            EventKind::ImpressionGeneric => "impressionGeneric",
            EventKind::LocationDirections => "locationDirections",
            EventKind::Pageview => "pageview",
            EventKind::Screenview => "screenview",
            EventKind::SearchGeneric => "searchGeneric",
            EventKind::AddProduct => "addProduct",
            EventKind::Checkout => "checkout",
            EventKind::CheckoutOption => "checkoutOption",
            EventKind::ClickProduct => "clickProduct",
            EventKind::ClickPromotion => "clickPromotion",
            EventKind::ImpressionProduct => "impressionProduct",
            EventKind::ImpressionPromotion => "impressionPromotion",
            EventKind::DetailProduct => "detailProduct",
            EventKind::Purchase => "purchase",
            EventKind::RefundAll => "refundAll",
            EventKind::RefundPartial => "refundPartial",
            EventKind::RemoveProduct => "removeProduct",
            EventKind::Lifecycle => "lifecycle",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One canonical event together with its action payload, if the kind has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CanonicalEvent {
    ClickGeneric(ClickGeneric),
    ContactCall(ContactCall),
    ContactEmail(ContactEmail),
    ImpressionGeneric(ImpressionGeneric),
    LocationDirections(LocationDirections),
    Pageview(Screenview),
    Screenview(Screenview),
    SearchGeneric(SearchGeneric),
    AddProduct(Product),
    Checkout {
        properties: Checkout,
        #[serde(default)]
        action: CheckoutAction,
    },
    CheckoutOption {
        properties: Generics,
        #[serde(default)]
        action: CheckoutAction,
    },
    ClickProduct {
        properties: Product,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action: Option<ProductAction>,
    },
    ClickPromotion(Promotion),
    ImpressionProduct(ImpressionProduct),
    ImpressionPromotion(Promotion),
    DetailProduct {
        properties: Product,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action: Option<ProductAction>,
    },
    Purchase {
        properties: Transaction,
        action: TransactionAction,
    },
    RefundAll {
        properties: Generics,
        action: TransactionAction,
    },
    RefundPartial {
        properties: TransactionRefund,
        action: TransactionAction,
    },
    RemoveProduct(Product),
    Lifecycle(App),
}

impl CanonicalEvent {
    /// Parse a single event from its tagged JSON form.
    pub fn from_json(json: &str) -> EngageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            CanonicalEvent::ClickGeneric(_) => EventKind::ClickGeneric,
            CanonicalEvent::ContactCall(_) => EventKind::ContactCall,
            CanonicalEvent::ContactEmail(_) => EventKind::ContactEmail,
            CanonicalEvent::ImpressionGeneric(_) => EventKind::ImpressionGeneric,
            CanonicalEvent::LocationDirections(_) => EventKind::LocationDirections,
            CanonicalEvent::Pageview(_) => EventKind::Pageview,
            CanonicalEvent::Screenview(_) => EventKind::Screenview,
            CanonicalEvent::SearchGeneric(_) => EventKind::SearchGeneric,
            CanonicalEvent::AddProduct(_) => EventKind::AddProduct,
            CanonicalEvent::Checkout { .. } => EventKind::Checkout,
            CanonicalEvent::CheckoutOption { .. } => EventKind::CheckoutOption,
            CanonicalEvent::ClickProduct { .. } => EventKind::ClickProduct,
            CanonicalEvent::ClickPromotion(_) => EventKind::ClickPromotion,
            CanonicalEvent::ImpressionProduct(_) => EventKind::ImpressionProduct,
            CanonicalEvent::ImpressionPromotion(_) => EventKind::ImpressionPromotion,
            CanonicalEvent::DetailProduct { .. } => EventKind::DetailProduct,
            CanonicalEvent::Purchase { .. } => EventKind::Purchase,
            CanonicalEvent::RefundAll { .. } => EventKind::RefundAll,
            CanonicalEvent::RefundPartial { .. } => EventKind::RefundPartial,
            CanonicalEvent::RemoveProduct(_) => EventKind::RemoveProduct,
            CanonicalEvent::Lifecycle(_) => EventKind::Lifecycle,
        }
    }

    /// The category/action pair carried by every event.
    pub fn generics(&self) -> &Generics {
        match self {
            CanonicalEvent::ClickGeneric(p) => &p.generics,
            CanonicalEvent::ContactCall(p) => &p.generics,
            CanonicalEvent::ContactEmail(p) => &p.generics,
            CanonicalEvent::ImpressionGeneric(p) => &p.generics,
            CanonicalEvent::LocationDirections(p) => &p.generics,
            CanonicalEvent::Pageview(p) | CanonicalEvent::Screenview(p) => &p.generics,
            CanonicalEvent::SearchGeneric(p) => &p.generics,
            CanonicalEvent::AddProduct(p) | CanonicalEvent::RemoveProduct(p) => &p.generics,
            CanonicalEvent::Checkout { properties, .. } => &properties.generics,
            CanonicalEvent::CheckoutOption { properties, .. } => properties,
            CanonicalEvent::ClickProduct { properties, .. }
            | CanonicalEvent::DetailProduct { properties, .. } => &properties.generics,
            CanonicalEvent::ClickPromotion(p) | CanonicalEvent::ImpressionPromotion(p) => {
                &p.generics
            }
            CanonicalEvent::ImpressionProduct(p) => &p.generics,
            CanonicalEvent::Purchase { properties, .. } => &properties.generics,
            CanonicalEvent::RefundAll { properties, .. } => properties,
            CanonicalEvent::RefundPartial { properties, .. } => &properties.generics,
            CanonicalEvent::Lifecycle(p) => &p.generics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from(2).to_string(), "2");
        assert_eq!(FieldValue::from(9.99).to_string(), "9.99");
        assert_eq!(FieldValue::from("12.00").to_string(), "12.00");
    }

    #[test]
    fn test_field_value_display_edge_numbers() {
        assert_eq!(FieldValue::from(1e21).to_string(), "1e+21");
        assert_eq!(FieldValue::from(1.5e25).to_string(), "1.5e+25");
        assert_eq!(FieldValue::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(FieldValue::from(1e-7).to_string(), "1e-7");
        assert_eq!(FieldValue::from(-1.5e-7).to_string(), "-1.5e-7");
        assert_eq!(FieldValue::from(0.000001).to_string(), "0.000001");
        assert_eq!(FieldValue::from(-0.0).to_string(), "0");
        assert_eq!(FieldValue::from(f64::NAN).to_string(), "NaN");
        assert_eq!(FieldValue::from(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_field_value_untagged() {
        let parsed: FieldValue = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, FieldValue::Number(3.0));
        let parsed: FieldValue = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(parsed, FieldValue::Text("3".into()));
    }

    #[test]
    fn test_event_kind_tags_match_serde() {
        for kind in EventKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::json!(kind.as_str()));
        }
    }

    #[test]
    fn test_parse_purchase_event() {
        let event = CanonicalEvent::from_json(
            r#"{
                "type": "purchase",
                "properties": {
                    "eventCategory": "Checkout",
                    "eventAction": "Complete",
                    "products": [
                        {"identifier": "sku-1", "name": "Boot", "quantity": 1, "price": "49.50"}
                    ]
                },
                "action": {"identifier": "order-77", "revenue": 49.5}
            }"#,
        )
        .unwrap();

        assert_eq!(event.kind(), EventKind::Purchase);
        assert_eq!(event.generics().event_category, "Checkout");
        match event {
            CanonicalEvent::Purchase { properties, action } => {
                assert_eq!(properties.products.len(), 1);
                assert_eq!(properties.products[0].price, Some(FieldValue::Text("49.50".into())));
                assert_eq!(action.identifier, "order-77");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_missing_event_action_parses_as_none() {
        let event = CanonicalEvent::from_json(
            r#"{"type": "screenview", "eventCategory": "Home", "url": "/"}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), EventKind::Screenview);
        assert_eq!(event.generics(), &Generics::category("Home"));
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let err = CanonicalEvent::from_json(r#"{"type": "teleport"}"#);
        assert!(err.is_err());
    }
}
