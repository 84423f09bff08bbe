use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::client::OrderSource;
use crate::display::Elements;
use crate::error::RenderError;
use crate::model::Order;
use crate::render::OrderRenderer;

pub const EMPTY_INPUT_MESSAGE: &str = "Enter order UID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Idle,
    Loading { token: u64, order_uid: String },
    Rendered { token: u64, order_uid: String },
    Failed { token: u64, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to look up; the user was notified and no request was made.
    EmptyInput,
    Rendered(Order),
    /// The error card was shown with this message.
    Failed(String),
    /// A newer submission was issued while this one was in flight; its response was dropped.
    Superseded { token: u64 },
}

impl SubmitOutcome {
    fn label(&self) -> &'static str {
        match self {
            SubmitOutcome::EmptyInput => "empty_input",
            SubmitOutcome::Rendered(_) => "rendered",
            SubmitOutcome::Failed(_) => "failed",
            SubmitOutcome::Superseded { .. } => "superseded",
        }
    }
}

struct Inner {
    latest_token: u64,
    state: ViewerState,
}

/// Looks up one order per submission and renders it into the result area.
///
/// Each submission takes a fresh token. Only the response carrying the latest
/// token may touch the display; older responses are discarded on arrival.
pub struct OrderViewer {
    source: Arc<dyn OrderSource>,
    renderer: OrderRenderer,
    elements: Elements,
    inner: Mutex<Inner>,
}

impl OrderViewer {
    pub fn new(source: Arc<dyn OrderSource>, renderer: OrderRenderer, elements: Elements) -> Self {
        info!("Initializing new OrderViewer");
        Self {
            source,
            renderer,
            elements,
            inner: Mutex::new(Inner {
                latest_token: 0,
                state: ViewerState::Idle,
            }),
        }
    }

    pub fn state(&self) -> ViewerState {
        self.lock().state.clone()
    }

    pub fn renderer(&self) -> &OrderRenderer {
        &self.renderer
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the input, fetches the order and updates the display.
    ///
    /// Fetch failures are outcomes, not errors: they end up as the error card.
    /// `Err` only comes from the template engine.
    pub async fn submit(&self) -> Result<SubmitOutcome, RenderError> {
        let order_uid = self.elements.input.value().trim().to_string();
        if order_uid.is_empty() {
            debug!("Empty order UID submitted");
            self.elements.notifier.alert(EMPTY_INPUT_MESSAGE);
            return Ok(record(SubmitOutcome::EmptyInput));
        }

        let token = {
            let mut inner = self.lock();
            inner.latest_token += 1;
            let token = inner.latest_token;
            inner.state = ViewerState::Loading {
                token,
                order_uid: order_uid.clone(),
            };
            self.elements.indicator.show();
            self.elements.result.clear();
            token
        };
        info!(order_uid = %order_uid, token, "Looking up order");

        let fetched = self.source.fetch_order(&order_uid).await;

        let rendered = match fetched {
            Ok(order) => self
                .renderer
                .render_order(&order)
                .map(|html| (SubmitOutcome::Rendered(order), html)),
            Err(e) => {
                let message = e.to_string();
                warn!(order_uid = %order_uid, token, error = %e, "Order lookup failed");
                self.renderer
                    .render_error(&message)
                    .map(|html| (SubmitOutcome::Failed(message), html))
            }
        };

        let mut inner = self.lock();
        if inner.latest_token != token {
            warn!(
                order_uid = %order_uid,
                token,
                latest = inner.latest_token,
                "Discarding response of superseded lookup"
            );
            return Ok(record(SubmitOutcome::Superseded { token }));
        }

        self.elements.indicator.hide();
        match rendered {
            Ok((outcome, html)) => {
                inner.state = match &outcome {
                    SubmitOutcome::Failed(message) => ViewerState::Failed {
                        token,
                        message: message.clone(),
                    },
                    _ => ViewerState::Rendered { token, order_uid },
                };
                self.elements.result.set_html(html);
                Ok(record(outcome))
            }
            Err(e) => {
                inner.state = ViewerState::Failed {
                    token,
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }
}

fn record(outcome: SubmitOutcome) -> SubmitOutcome {
    metrics::counter!("order_viewer_lookups_total", "outcome" => outcome.label()).increment(1);
    outcome
}
