#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use order_viewer::display::{BufferedResult, Elements, FlagIndicator, Notifier, TextInput};
use order_viewer::Order;

/// Notifier that remembers every alert.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Concrete handles to every element, kept for assertions.
pub struct Surface {
    pub input: Arc<TextInput>,
    pub indicator: Arc<FlagIndicator>,
    pub result: Arc<BufferedResult>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Surface {
    pub fn new() -> Self {
        Self {
            input: Arc::new(TextInput::default()),
            indicator: Arc::new(FlagIndicator::default()),
            result: Arc::new(BufferedResult::default()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn elements(&self) -> Elements {
        Elements {
            input: self.input.clone(),
            indicator: self.indicator.clone(),
            result: self.result.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

pub fn capitalized_order(order_uid: &str) -> Order {
    serde_json::from_value(common::capitalized_order_json(order_uid)).unwrap()
}

pub fn snake_case_order(order_uid: &str) -> Order {
    serde_json::from_value(common::snake_case_order_json(order_uid)).unwrap()
}

/// Counts `<div class="card"` openings, red or not.
pub fn card_count(html: &str) -> usize {
    html.matches(r#"<div class="card""#).count()
}
