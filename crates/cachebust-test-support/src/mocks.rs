//! Mock implementations for testing

use cachebust_foundation::ContentSource;
use mockall::mock;
use std::io;
use std::path::Path;

mock! {
    pub ContentSource {}

    impl ContentSource for ContentSource {
        fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    }
}

/// Create a mock content source for testing
pub fn mock_content_source() -> MockContentSource {
    MockContentSource::new()
}
