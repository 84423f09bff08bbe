pub mod config;
pub mod yaml_include;

/// Common utilities shared across the order viewer workspace
///
/// This crate provides shared functionality used by the viewer library and
/// its executables:
///
/// - Layered YAML configuration (`!include` resolution, env overrides)
/// - Order payload fixtures for tests in both wire casings

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{
    capitalized_order_json, generate_unique_id, minimal_order_json, snake_case_order_json,
};
