pub mod client;
pub mod display;
pub mod error;
pub mod executable_utils;
pub mod model;
pub mod render;
pub mod viewer;

pub use client::{HttpOrderSource, OrderSource};
pub use error::{FetchError, RenderError};
pub use model::Order;
pub use render::OrderRenderer;
pub use viewer::{OrderViewer, SubmitOutcome, ViewerState};
