//! Adobe product-string encoding and hit-name derivation.
//!
//! Products travel in the `&&products` context key as
//! `category;name;quantity;price`, comma-joined for multi-product hits. The
//! key and format are read by existing Adobe report suites and must not change.

use engage_core::events::{
    FieldValue, ImpressionProduct, Product, RefundProduct, TransactionProduct,
};
use serde::{Deserialize, Serialize};

/// Context key carrying serialized products.
pub const PRODUCTS_KEY: &str = "&&products";

/// The four product attributes the Adobe encoding carries. Missing values
/// serialize as empty segments.
pub trait ProductFields {
    fn category(&self) -> Option<String>;
    fn name(&self) -> Option<String>;
    fn quantity(&self) -> Option<String>;
    fn price(&self) -> Option<String>;
}

/// Standalone product record, for callers that build product strings outside
/// of a canonical event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
}

fn render(value: &Option<FieldValue>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

impl ProductFields for ProductRecord {
    fn category(&self) -> Option<String> {
        self.category.clone()
    }
    fn name(&self) -> Option<String> {
        self.name.clone()
    }
    fn quantity(&self) -> Option<String> {
        render(&self.quantity)
    }
    fn price(&self) -> Option<String> {
        render(&self.price)
    }
}

impl ProductFields for Product {
    fn category(&self) -> Option<String> {
        self.category.clone()
    }
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }
    fn quantity(&self) -> Option<String> {
        render(&self.quantity)
    }
    fn price(&self) -> Option<String> {
        render(&self.price)
    }
}

impl ProductFields for ImpressionProduct {
    fn category(&self) -> Option<String> {
        self.category.clone()
    }
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }
    // Impressions carry no quantity.
    fn quantity(&self) -> Option<String> {
        None
    }
    fn price(&self) -> Option<String> {
        render(&self.price)
    }
}

impl ProductFields for TransactionProduct {
    fn category(&self) -> Option<String> {
        self.category.clone()
    }
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }
    fn quantity(&self) -> Option<String> {
        render(&self.quantity)
    }
    fn price(&self) -> Option<String> {
        render(&self.price)
    }
}

impl ProductFields for RefundProduct {
    fn category(&self) -> Option<String> {
        None
    }
    fn name(&self) -> Option<String> {
        None
    }
    fn quantity(&self) -> Option<String> {
        render(&self.quantity)
    }
    fn price(&self) -> Option<String> {
        render(&self.price)
    }
}

/// `category;name;quantity;price`, with empty segments for missing fields.
pub fn serialize_product<P: ProductFields + ?Sized>(product: &P) -> String {
    [
        product.category().unwrap_or_default(),
        product.name().unwrap_or_default(),
        product.quantity().unwrap_or_default(),
        product.price().unwrap_or_default(),
    ]
    .join(";")
}

/// Comma-joined [`serialize_product`] of every product, in order.
pub fn serialize_products<P: ProductFields>(products: &[P]) -> String {
    products
        .iter()
        .map(serialize_product)
        .collect::<Vec<_>>()
        .join(",")
}

/// Hit name: `"{action} {category}"`, action first; a missing action is empty.
pub fn generate_action_name(event_category: &str, event_action: Option<&str>) -> String {
    format!("{} {}", event_action.unwrap_or_default(), event_category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_core::events::Generics;

    fn record(
        category: &str,
        name: &str,
        quantity: FieldValue,
        price: FieldValue,
    ) -> ProductRecord {
        ProductRecord {
            category: Some(category.into()),
            name: Some(name.into()),
            quantity: Some(quantity),
            price: Some(price),
        }
    }

    #[test]
    fn test_serialize_product() {
        let product = record("A", "B", 2.into(), 9.99.into());
        assert_eq!(serialize_product(&product), "A;B;2;9.99");
    }

    #[test]
    fn test_serialize_empty_product() {
        assert_eq!(serialize_product(&ProductRecord::default()), ";;;");
    }

    #[test]
    fn test_serialize_string_quantities_verbatim() {
        let product = record("Shoes", "Runner", "1".into(), "59.00".into());
        assert_eq!(serialize_product(&product), "Shoes;Runner;1;59.00");
    }

    #[test]
    fn test_serialize_products_joins_with_comma() {
        let p1 = record("A", "B", 2.into(), 9.99.into());
        let p2 = record("C", "D", 1.into(), 5.into());
        assert_eq!(
            serialize_products(&[p1.clone(), p2.clone()]),
            format!("{},{}", serialize_product(&p1), serialize_product(&p2))
        );
        assert_eq!(serialize_products::<ProductRecord>(&[]), "");
    }

    #[test]
    fn test_serialize_event_products() {
        let product = Product {
            generics: Generics::new("Cart", "Add"),
            identifier: "sku-9".into(),
            name: "Hat".into(),
            category: Some("Apparel".into()),
            quantity: Some(3.into()),
            ..Default::default()
        };
        assert_eq!(serialize_product(&product), "Apparel;Hat;3;");

        let impression = ImpressionProduct {
            name: "Hat".into(),
            price: Some(12.5.into()),
            ..Default::default()
        };
        assert_eq!(serialize_product(&impression), ";Hat;;12.5");

        let refund = RefundProduct {
            identifier: "sku-9".into(),
            quantity: Some(1.into()),
            price: None,
        };
        assert_eq!(serialize_product(&refund), ";;1;");
    }

    #[test]
    fn test_generate_action_name() {
        assert_eq!(generate_action_name("Cat", Some("Act")), "Act Cat");
        assert_eq!(generate_action_name("Cat", None), " Cat");
        assert_eq!(generate_action_name("Cat", Some("")), " Cat");
    }
}
