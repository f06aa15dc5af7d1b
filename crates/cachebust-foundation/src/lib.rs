//! Foundation Layer - error taxonomy, shared model types, and storage access
//!
//! This crate provides the building blocks shared by every cachebust crate:
//! - `BustError` / `BustResult`, the error surface of the transform
//! - Model types describing import sites and rewrite records
//! - The `ContentSource` seam through which target files are read

pub mod error;
pub mod model;
pub mod storage;

// Re-export commonly used types for convenience
pub use error::*;
pub use model::*;
pub use storage::{ContentSource, FsContentSource};
