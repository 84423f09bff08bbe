use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Wire names accepted for each field, in order of preference.
///
/// Producers emit either capitalized keys or snake_case keys; lower-camel
/// spellings are accepted as well. The first key holding a present value wins.
mod keys {
    pub const ORDER_UID: &[&str] = &["OrderUID", "order_uid", "orderUID", "orderUid"];
    pub const TRACK_NUMBER: &[&str] = &["TrackNumber", "track_number", "trackNumber"];
    pub const DELIVERY: &[&str] = &["Delivery", "delivery"];
    pub const PAYMENT: &[&str] = &["Payment", "payment"];
    pub const ITEMS: &[&str] = &["Items", "items"];

    pub const NAME: &[&str] = &["Name", "name"];
    pub const ADDRESS: &[&str] = &["Address", "address"];
    pub const CITY: &[&str] = &["City", "city"];
    pub const REGION: &[&str] = &["Region", "region"];
    pub const ZIP: &[&str] = &["Zip", "zip"];
    pub const PHONE: &[&str] = &["Phone", "phone"];
    pub const EMAIL: &[&str] = &["Email", "email"];

    pub const PROVIDER: &[&str] = &["Provider", "provider"];
    pub const AMOUNT: &[&str] = &["Amount", "amount"];
    pub const CURRENCY: &[&str] = &["Currency", "currency"];
    pub const BANK: &[&str] = &["Bank", "bank"];
    pub const TRANSACTION: &[&str] = &["Transaction", "transaction"];

    pub const SALE: &[&str] = &["Sale", "sale"];
    pub const TOTAL_PRICE: &[&str] = &["TotalPrice", "total_price", "totalPrice"];
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("order payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Canonical order record.
///
/// Deserializes from either wire casing; serializes to snake_case only.
/// Every field is optional, absent sub-records become empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Order {
    pub order_uid: Option<String>,
    pub track_number: Option<String>,
    pub delivery: Delivery,
    pub payment: Payment,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub provider: Option<String>,
    /// Kept as display text, numeric or not.
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub bank: Option<String>,
    pub transaction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: Option<String>,
    /// Quantity.
    pub sale: Option<String>,
    pub total_price: Option<String>,
}

impl TryFrom<Value> for Order {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Order::from(&fields)),
            other => Err(ModelError::NotAnObject(json_kind(&other))),
        }
    }
}

impl From<&Map<String, Value>> for Order {
    fn from(fields: &Map<String, Value>) -> Self {
        Self {
            order_uid: text(fields, keys::ORDER_UID),
            track_number: text(fields, keys::TRACK_NUMBER),
            delivery: record(fields, keys::DELIVERY).map(Delivery::from).unwrap_or_default(),
            payment: record(fields, keys::PAYMENT).map(Payment::from).unwrap_or_default(),
            items: sequence(fields, keys::ITEMS)
                .map(|items| items.iter().map(Item::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<&Map<String, Value>> for Delivery {
    fn from(fields: &Map<String, Value>) -> Self {
        Self {
            name: text(fields, keys::NAME),
            address: text(fields, keys::ADDRESS),
            city: text(fields, keys::CITY),
            region: text(fields, keys::REGION),
            zip: text(fields, keys::ZIP),
            phone: text(fields, keys::PHONE),
            email: text(fields, keys::EMAIL),
        }
    }
}

impl From<&Map<String, Value>> for Payment {
    fn from(fields: &Map<String, Value>) -> Self {
        Self {
            provider: text(fields, keys::PROVIDER),
            amount: text(fields, keys::AMOUNT),
            currency: text(fields, keys::CURRENCY),
            bank: text(fields, keys::BANK),
            transaction: text(fields, keys::TRANSACTION),
        }
    }
}

impl From<&Value> for Item {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                name: text(fields, keys::NAME),
                sale: text(fields, keys::SALE),
                total_price: text(fields, keys::TOTAL_PRICE),
            },
            // A non-object entry still occupies a line in the items card.
            _ => Self::default(),
        }
    }
}

/// First present scalar among `keys`, as display text.
///
/// `null`, empty strings and non-scalars count as absent so that a blank
/// capitalized key falls through to its lower-case twin.
fn text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn record<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|key| fields.get(*key)?.as_object())
}

fn sequence<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|key| fields.get(*key)?.as_array())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capitalized_and_snake_case_payloads_normalize_to_same_shape() {
        let upper: Order = serde_json::from_value(json!({
            "OrderUID": "b563feb7b2b84b6test",
            "TrackNumber": "WBILMTESTTRACK",
            "Delivery": {
                "Name": "Test Testov", "Phone": "+9720000000", "Zip": "2639809",
                "City": "Kiryat Mozkin", "Address": "Ploshad Mira 15",
                "Region": "Kraiot", "Email": "test@gmail.com"
            },
            "Payment": {
                "Transaction": "b563feb7b2b84b6test", "Currency": "USD",
                "Provider": "wbpay", "Amount": 1817, "Bank": "alpha"
            },
            "Items": [{ "Name": "Mascaras", "Sale": 30, "TotalPrice": 317 }]
        }))
        .unwrap();
        let lower: Order = serde_json::from_value(json!({
            "order_uid": "b563feb7b2b84b6test",
            "track_number": "WBILMTESTTRACK",
            "delivery": {
                "name": "Test Testov", "phone": "+9720000000", "zip": "2639809",
                "city": "Kiryat Mozkin", "address": "Ploshad Mira 15",
                "region": "Kraiot", "email": "test@gmail.com"
            },
            "payment": {
                "transaction": "b563feb7b2b84b6test", "currency": "USD",
                "provider": "wbpay", "amount": 1817, "bank": "alpha"
            },
            "items": [{ "name": "Mascaras", "sale": 30, "total_price": 317 }]
        }))
        .unwrap();

        let expected = Order {
            order_uid: Some("b563feb7b2b84b6test".to_string()),
            track_number: Some("WBILMTESTTRACK".to_string()),
            delivery: Delivery {
                name: Some("Test Testov".to_string()),
                address: Some("Ploshad Mira 15".to_string()),
                city: Some("Kiryat Mozkin".to_string()),
                region: Some("Kraiot".to_string()),
                zip: Some("2639809".to_string()),
                phone: Some("+9720000000".to_string()),
                email: Some("test@gmail.com".to_string()),
            },
            payment: Payment {
                provider: Some("wbpay".to_string()),
                amount: Some("1817".to_string()),
                currency: Some("USD".to_string()),
                bank: Some("alpha".to_string()),
                transaction: Some("b563feb7b2b84b6test".to_string()),
            },
            items: vec![Item {
                name: Some("Mascaras".to_string()),
                sale: Some("30".to_string()),
                total_price: Some("317".to_string()),
            }],
        };
        assert_eq!(upper, expected);
        assert_eq!(lower, expected);
    }

    #[test]
    fn lower_camel_keys_are_accepted() {
        let order: Order = serde_json::from_value(json!({
            "orderUID": "abc",
            "trackNumber": "TRACK",
            "items": [{ "name": "Pen", "sale": 1, "totalPrice": 5 }]
        }))
        .unwrap();
        assert_eq!(order.order_uid.as_deref(), Some("abc"));
        assert_eq!(order.track_number.as_deref(), Some("TRACK"));
        assert_eq!(order.items[0].total_price.as_deref(), Some("5"));
    }

    #[test]
    fn capitalized_key_wins_when_both_are_present() {
        let order: Order = serde_json::from_value(json!({
            "OrderUID": "upper",
            "order_uid": "lower",
            "Delivery": { "Name": "Upper Name" },
            "delivery": { "name": "Lower Name" }
        }))
        .unwrap();
        assert_eq!(order.order_uid.as_deref(), Some("upper"));
        assert_eq!(order.delivery.name.as_deref(), Some("Upper Name"));
    }

    #[test]
    fn blank_capitalized_value_falls_through() {
        let order: Order =
            serde_json::from_value(json!({ "OrderUID": "", "order_uid": "lower" })).unwrap();
        assert_eq!(order.order_uid.as_deref(), Some("lower"));
    }

    #[test]
    fn missing_sub_records_default_to_empty() {
        let order: Order = serde_json::from_value(json!({ "order_uid": "x" })).unwrap();
        assert_eq!(order.delivery, Delivery::default());
        assert_eq!(order.payment, Payment::default());
        assert!(order.items.is_empty());
    }

    #[test]
    fn wrongly_typed_sub_records_degrade_to_defaults() {
        let order: Order = serde_json::from_value(json!({
            "delivery": "nowhere",
            "payment": null,
            "items": { "name": "not a list" }
        }))
        .unwrap();
        assert_eq!(order.delivery, Delivery::default());
        assert_eq!(order.payment, Payment::default());
        assert!(order.items.is_empty());
    }

    #[test]
    fn non_object_item_keeps_its_slot() {
        let order: Order =
            serde_json::from_value(json!({ "items": [42, { "name": "Pen" }] })).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0], Item::default());
        assert_eq!(order.items[1].name.as_deref(), Some("Pen"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = serde_json::from_str::<Order>("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn canonical_form_reads_back_unchanged() {
        let order: Order = serde_json::from_value(json!({
            "OrderUID": "abc",
            "Payment": { "Currency": "EUR", "Amount": "12.50" },
            "Items": [{ "Name": "Pen", "Sale": 3 }]
        }))
        .unwrap();
        let canonical = serde_json::to_value(&order).unwrap();
        assert_eq!(canonical["order_uid"], "abc");
        assert_eq!(canonical["payment"]["amount"], "12.50");

        let reread: Order = serde_json::from_value(canonical).unwrap();
        assert_eq!(reread, order);
    }
}
