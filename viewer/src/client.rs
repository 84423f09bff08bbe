use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::Order;

/// Where orders come from.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetches one order. `order_uid` is already trimmed and non-empty.
    async fn fetch_order(&self, order_uid: &str) -> Result<Order, FetchError>;
}

/// `GET {base_url}{order_path}{order_uid}` against the order service.
#[derive(Clone)]
pub struct HttpOrderSource {
    client: Client,
    base_url: String,
    order_path: String,
}

impl HttpOrderSource {
    pub fn new(base_url: impl Into<String>, order_path: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, order_path)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        order_path: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::info!("Initializing order source at {}", base_url);
        Self {
            client,
            base_url,
            order_path: order_path.into(),
        }
    }

    /// Plain concatenation; the URL parser percent-encodes what it must and nothing more.
    pub fn order_url(&self, order_uid: &str) -> Result<Url, FetchError> {
        Ok(Url::parse(&format!(
            "{}{}{}",
            self.base_url, self.order_path, order_uid
        ))?)
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn fetch_order(&self, order_uid: &str) -> Result<Order, FetchError> {
        let url = self.order_url(order_uid)?;
        debug!(%url, "Fetching order");

        let t0 = Instant::now();
        let response = self.client.get(url).send().await;
        metrics::histogram!("order_viewer_fetch_seconds").record(t0.elapsed().as_secs_f64());
        let response = response?;

        let status = response.status();
        if !status.is_success() {
            warn!(order_uid, status = status.as_u16(), "Order lookup returned non-success status");
            return Err(FetchError::NotFound {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let order = serde_json::from_str::<Order>(&body)?;
        debug!(order_uid, items = order.items.len(), "Decoded order");
        Ok(order)
    }
}
