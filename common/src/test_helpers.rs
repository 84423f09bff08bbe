//! Shared test fixtures for order payloads
//!
//! The order service emits field names in two conventions depending on the
//! producer: Go-style capitalized keys (`OrderUID`, `TotalPrice`) and
//! snake_case keys (`order_uid`, `total_price`). Fixtures for both live here
//! so viewer tests don't duplicate them.

use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Global counter for unique identifiers across parallel tests
static GLOBAL_TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique order identifier in the format "{prefix}-{timestamp}-{counter}"
pub fn generate_unique_id(prefix: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let counter = GLOBAL_TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}", prefix, timestamp, counter)
}

/// Full order using capitalized keys.
pub fn capitalized_order_json(order_uid: &str) -> Value {
    json!({
        "OrderUID": order_uid,
        "TrackNumber": "WBILMTESTTRACK",
        "Entry": "WBIL",
        "Delivery": {
            "Name": "Test Testov",
            "Phone": "+9720000000",
            "Zip": "2639809",
            "City": "Kiryat Mozkin",
            "Address": "Ploshad Mira 15",
            "Region": "Kraiot",
            "Email": "test@gmail.com"
        },
        "Payment": {
            "Transaction": order_uid,
            "Currency": "USD",
            "Provider": "wbpay",
            "Amount": 1817,
            "Bank": "alpha",
            "DeliveryCost": 1500
        },
        "Items": [
            {
                "ChrtID": 9934930,
                "Name": "Mascaras",
                "Sale": 30,
                "TotalPrice": 317,
                "Brand": "Vivienne Sabo"
            }
        ]
    })
}

/// Full order using snake_case keys.
pub fn snake_case_order_json(order_uid: &str) -> Value {
    json!({
        "order_uid": order_uid,
        "track_number": "WBILMSNAKETRACK",
        "entry": "WBIL",
        "delivery": {
            "name": "Ivan Petrov",
            "phone": "+79990001122",
            "zip": "101000",
            "city": "Moscow",
            "address": "Tverskaya 1",
            "region": "Moscow Oblast",
            "email": "ivan@example.com"
        },
        "payment": {
            "transaction": order_uid,
            "currency": "RUB",
            "provider": "sbp",
            "amount": 2400,
            "bank": "sber"
        },
        "items": [
            { "name": "Kettle", "sale": 2, "total_price": 1200 },
            { "name": "Mug", "sale": 4, "total_price": 1200 }
        ]
    })
}

/// Order carrying only its identifiers.
pub fn minimal_order_json(order_uid: &str) -> Value {
    json!({ "order_uid": order_uid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_do_not_repeat() {
        let a = generate_unique_id("ORDER");
        let b = generate_unique_id("ORDER");
        assert_ne!(a, b);
        assert!(a.starts_with("ORDER-"));
    }
}
