//! Cache-busting import rewriter for the swc ECMAScript pipeline
//!
//! Appends `?v=<content hash>` to relative script imports so browsers and CDNs
//! fetch a fresh copy whenever the imported file changes:
//!
//! ```text
//! import x from './lib/mod.js'   =>   import x from './lib/mod.js?v=a1b2c3d4'
//! import('./lib/mod.js')         =>   import('./lib/mod.js?v=a1b2c3d4')
//! ```
//!
//! # Architecture
//!
//! - [`specifier`]: decides which specifiers qualify and resolves their targets
//! - [`hash_cache`]: content hash per absolute path, computed once per process
//! - [`rewriter`]: applies the decision policy to one specifier
//! - [`visitor`]: the `VisitMut` pass hooking static and dynamic imports
//! - [`pipeline`]: parse / transform / print host for whole source files

pub mod hash_cache;
pub mod pipeline;
pub mod rewriter;
pub mod specifier;
pub mod visitor;

// Re-exports
pub use hash_cache::{content_hash, ContentHashCache};
pub use pipeline::{CacheBuster, TransformOutput};
pub use rewriter::Rewriter;
pub use specifier::{classify, SpecifierClass};
pub use visitor::{rewrite_import_node, CacheBustVisitor, FileState, ImportNode};

pub use cachebust_config::BustConfig;
pub use cachebust_foundation::{BustError, BustResult, ImportKind, RewriteRecord};
