//! Test support utilities and fixtures for cachebust tests

pub mod fixtures;
pub mod mocks;

// Re-export commonly used helpers
pub use fixtures::TestProject;
pub use mocks::{mock_content_source, MockContentSource};
