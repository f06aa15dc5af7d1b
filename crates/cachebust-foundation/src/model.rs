//! Shared model types

use serde::{Deserialize, Serialize};

/// Syntactic form of an import site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    /// `import x from './a.js'`
    Static,
    /// `import('./a.js')`
    Dynamic,
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Dynamic => f.write_str("dynamic"),
        }
    }
}

/// One specifier rewritten by the pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRecord {
    pub kind: ImportKind,
    /// 1-based line of the import in the importing file
    pub line: usize,
    pub original: String,
    pub rewritten: String,
}
