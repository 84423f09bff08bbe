//! Display surface the viewer drives: an identifier input, a loading
//! indicator, the result area and a blocking notifier.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub trait IdentifierInput: Send + Sync {
    /// Raw, untrimmed contents.
    fn value(&self) -> String;
}

pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

pub trait ResultArea: Send + Sync {
    /// Replaces the whole area.
    fn set_html(&self, html: String);

    fn clear(&self) {
        self.set_html(String::new());
    }
}

pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Handles to the elements a viewer owns.
#[derive(Clone)]
pub struct Elements {
    pub input: Arc<dyn IdentifierInput>,
    pub indicator: Arc<dyn LoadingIndicator>,
    pub result: Arc<dyn ResultArea>,
    pub notifier: Arc<dyn Notifier>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Text field whose value can be replaced between submissions.
#[derive(Default)]
pub struct TextInput {
    value: Mutex<String>,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
        }
    }

    pub fn set(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }
}

impl IdentifierInput for TextInput {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }
}

#[derive(Default)]
pub struct FlagIndicator {
    visible: AtomicBool,
}

impl FlagIndicator {
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for FlagIndicator {
    fn show(&self) {
        tracing::debug!("Loading...");
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }
}

/// Result area kept in memory; readers take the latest markup.
#[derive(Default)]
pub struct BufferedResult {
    html: Mutex<String>,
}

impl BufferedResult {
    pub fn html(&self) -> String {
        lock(&self.html).clone()
    }
}

impl ResultArea for BufferedResult {
    fn set_html(&self, html: String) {
        *lock(&self.html) = html;
    }
}

/// Prints alerts to stderr.
#[derive(Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(message, "Blocking notification");
        eprintln!("{}", message);
    }
}
