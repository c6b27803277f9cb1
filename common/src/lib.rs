pub mod config;

/// Common utilities shared across the PaySecure fraud detection service
///
/// This crate provides shared functionality used by the `processing` crate:
///
/// - Service configuration loading
/// - Shared test utilities and request helpers

// Test helpers module - available for test builds and the `test-helpers` feature
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{generate_unique_id, transaction_json};
