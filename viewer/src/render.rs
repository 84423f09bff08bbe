use serde::Serialize;
use tera::{Context, Tera};

use crate::error::RenderError;
use crate::model::{Item, Order};

const ORDER_TEMPLATE: &str = "order.html";
const ERROR_TEMPLATE: &str = "error.html";
const PAGE_TEMPLATE: &str = "page.html";

const ORDER_HTML: &str = r#"
<div class="card">
    <div class="card-title">Order</div>
    <div><span class="label">UID:</span> <span class="value">{{ order.uid }}</span></div>
    <div><span class="label">Track:</span> <span class="value">{{ order.track }}</span></div>
</div>

<div class="card">
    <div class="card-title">Delivery</div>
    <div><span class="label">Name:</span> <span class="value">{{ delivery.name }}</span></div>
    <div><span class="label">Address:</span> <span class="value">{{ delivery.address }}</span></div>
    <div><span class="label">City:</span> <span class="value">{{ delivery.city }}</span></div>
    <div><span class="label">Region:</span> <span class="value">{{ delivery.region }}</span></div>
    <div><span class="label">Zip:</span> <span class="value">{{ delivery.zip }}</span></div>
    <div><span class="label">Phone:</span> <span class="value">{{ delivery.phone }}</span></div>
    <div><span class="label">Email:</span> <span class="value">{{ delivery.email }}</span></div>
</div>

<div class="card">
    <div class="card-title">Payment</div>
    <div><span class="label">Provider:</span> <span class="value">{{ payment.provider }}</span></div>
    <div><span class="label">Amount:</span> <span class="value">{{ payment.amount }} {{ payment.currency }}</span></div>
    <div><span class="label">Bank:</span> <span class="value">{{ payment.bank }}</span></div>
    <div><span class="label">Transaction:</span> <span class="value">{{ payment.transaction }}</span></div>
</div>

<div class="card">
    <div class="card-title">Items</div>
{%- if has_items %}
{%- for item in items %}
    <div class="item">
        <span class="label">Name:</span> <span class="value">{{ item.name }}</span><br>
        <span class="label">Count:</span> <span class="value">{{ item.count }}</span><br>
        <span class="label">Price:</span> <span class="value">{{ item.price }} {{ payment.currency }}</span>
    </div>
{%- endfor %}
{%- else %}
    <div class="item">No items</div>
{%- endif %}
</div>
"#;

const ERROR_HTML: &str = r#"<div class="card" style="color:red">{{ message }}</div>"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
    <style>
        body { font-family: sans-serif; background: #f4f5f7; margin: 2rem; }
        .card { background: #fff; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.12); }
        .card-title { font-weight: bold; font-size: 1.1rem; margin-bottom: 0.5rem; }
        .label { color: #6b7280; }
        .value { font-weight: 500; }
        .item { border-top: 1px solid #e5e7eb; padding: 0.5rem 0; }
    </style>
</head>
<body>
<div id="result">
{{ content | safe }}
</div>
</body>
</html>
"#;

/// Placeholder texts for absent fields.
const MISSING_ID: &str = "-";
const MISSING_ITEM_NAME: &str = "Item";
const MISSING_ITEM_COUNT: &str = "0";
const MISSING_ITEM_PRICE: &str = "-";

#[derive(Serialize)]
struct OrderView<'a> {
    uid: &'a str,
    track: &'a str,
}

#[derive(Serialize)]
struct DeliveryView<'a> {
    name: &'a str,
    address: &'a str,
    city: &'a str,
    region: &'a str,
    zip: &'a str,
    phone: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct PaymentView<'a> {
    provider: &'a str,
    amount: &'a str,
    currency: &'a str,
    bank: &'a str,
    transaction: &'a str,
}

#[derive(Serialize)]
struct ItemView<'a> {
    name: &'a str,
    count: &'a str,
    price: &'a str,
}

impl<'a> From<&'a Item> for ItemView<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            name: or(&item.name, MISSING_ITEM_NAME),
            count: or(&item.sale, MISSING_ITEM_COUNT),
            price: or(&item.total_price, MISSING_ITEM_PRICE),
        }
    }
}

fn or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().unwrap_or(placeholder)
}

/// Turns canonical orders into the four-card markup.
///
/// Values are HTML-escaped. Rendering is a pure function of the order, so
/// the same order always yields the same markup.
pub struct OrderRenderer {
    tera: Tera,
}

impl OrderRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (ORDER_TEMPLATE, ORDER_HTML),
            (ERROR_TEMPLATE, ERROR_HTML),
            (PAGE_TEMPLATE, PAGE_HTML),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_order(&self, order: &Order) -> Result<String, RenderError> {
        let d = &order.delivery;
        let p = &order.payment;
        let items: Vec<ItemView> = order.items.iter().map(ItemView::from).collect();

        let mut context = Context::new();
        context.insert(
            "order",
            &OrderView {
                uid: or(&order.order_uid, MISSING_ID),
                track: or(&order.track_number, MISSING_ID),
            },
        );
        context.insert(
            "delivery",
            &DeliveryView {
                name: or(&d.name, ""),
                address: or(&d.address, ""),
                city: or(&d.city, ""),
                region: or(&d.region, ""),
                zip: or(&d.zip, ""),
                phone: or(&d.phone, ""),
                email: or(&d.email, ""),
            },
        );
        context.insert(
            "payment",
            &PaymentView {
                provider: or(&p.provider, ""),
                amount: or(&p.amount, ""),
                currency: or(&p.currency, ""),
                bank: or(&p.bank, ""),
                transaction: or(&p.transaction, ""),
            },
        );
        context.insert("has_items", &!items.is_empty());
        context.insert("items", &items);

        Ok(self.tera.render(ORDER_TEMPLATE, &context)?)
    }

    /// Single red card carrying `message`.
    pub fn render_error(&self, message: &str) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("message", message);
        Ok(self.tera.render(ERROR_TEMPLATE, &context)?)
    }

    /// Wraps an already rendered fragment in a standalone HTML document.
    pub fn render_page(&self, title: &str, content: &str) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("content", content);
        Ok(self.tera.render(PAGE_TEMPLATE, &context)?)
    }
}
