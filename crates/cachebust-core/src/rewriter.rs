//! Specifier rewriting
//!
//! [`Rewriter::rewrite`] applies the decision policy to one specifier:
//! package imports and non-script imports pass through verbatim; relative
//! script imports get the content hash of their target appended as a query
//! parameter.

use crate::hash_cache::ContentHashCache;
use crate::specifier::{bust_specifier, classify, resolve_target, SpecifierClass};
use cachebust_config::BustConfig;
use cachebust_foundation::BustResult;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct Rewriter {
    extensions: Vec<String>,
    query_key: String,
    cache: Arc<ContentHashCache>,
}

impl Rewriter {
    pub fn new(config: &BustConfig, cache: Arc<ContentHashCache>) -> Self {
        Self {
            extensions: config.extensions.clone(),
            query_key: config.query_key.clone(),
            cache,
        }
    }

    /// Rewrite `specifier` as imported from `importing_file`.
    ///
    /// Returns the input unchanged (borrowed) when it is not eligible. Fails
    /// when the target of an eligible specifier cannot be read.
    pub fn rewrite<'a>(
        &self,
        importing_file: &Path,
        specifier: &'a str,
    ) -> BustResult<Cow<'a, str>> {
        Ok(self
            .rewrite_target(importing_file, specifier)?
            .map_or(Cow::Borrowed(specifier), Cow::Owned))
    }

    /// Like [`rewrite`](Self::rewrite) but `None` when nothing changes.
    pub fn rewrite_target(
        &self,
        importing_file: &Path,
        specifier: &str,
    ) -> BustResult<Option<String>> {
        let extension = match classify(specifier, self.extensions.as_slice()) {
            SpecifierClass::Rewritable { extension } => extension,
            class => {
                trace!(specifier, ?class, "Specifier passed through");
                return Ok(None);
            }
        };

        let target = resolve_target(importing_file, specifier)?;
        let hash = self.cache.hash_of(&target)?;
        let rewritten = bust_specifier(specifier, extension, &self.query_key, &hash);

        debug!(
            importing_file = %importing_file.display(),
            specifier,
            rewritten = %rewritten,
            "Rewrote import specifier"
        );

        Ok(Some(rewritten))
    }

    pub fn cache(&self) -> &Arc<ContentHashCache> {
        &self.cache
    }
}
