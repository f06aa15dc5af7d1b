//! swc visitor pass
//!
//! The pass hooks two node kinds: static `import ... from '...'`
//! declarations and dynamic `import(...)` calls. Both funnel into
//! [`rewrite_import_node`] through the [`ImportNode`] variant, so the decision
//! policy lives in exactly one place.

use crate::rewriter::Rewriter;
use cachebust_foundation::{BustError, BustResult, ImportKind, RewriteRecord};
use std::path::PathBuf;
use swc_common::{sync::Lrc, SourceMap, Span};
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, ImportDecl, Lit, Str};
use swc_ecma_visit::{VisitMut, VisitMutWith};

/// Per-file state handed to the pass by the host
pub struct FileState {
    /// Path of the file being transformed
    pub path: PathBuf,
    /// Source map that produced the tree, used for line numbers in errors
    pub source_map: Lrc<SourceMap>,
}

impl FileState {
    pub fn new(path: impl Into<PathBuf>, source_map: Lrc<SourceMap>) -> Self {
        Self {
            path: path.into(),
            source_map,
        }
    }

    /// 1-based line of `span`, or 0 for synthesized nodes
    pub fn line_of(&self, span: Span) -> usize {
        if span.is_dummy() {
            return 0;
        }
        self.source_map.lookup_char_pos(span.lo).line
    }
}

/// An import site found during traversal
pub enum ImportNode<'a> {
    Static(&'a mut ImportDecl),
    Dynamic(&'a mut CallExpr),
}

/// Rewrite the specifier of one import site in place.
///
/// Returns a record when the specifier changed. A dynamic import whose first
/// argument is not a string literal fails without touching the node.
pub fn rewrite_import_node(
    rewriter: &Rewriter,
    node: ImportNode<'_>,
    state: &FileState,
) -> BustResult<Option<RewriteRecord>> {
    let (kind, span, literal) = match node {
        ImportNode::Static(decl) => (ImportKind::Static, decl.span, &mut *decl.src),
        ImportNode::Dynamic(call) => {
            let span = match &call.callee {
                Callee::Import(import) => import.span,
                _ => call.span,
            };
            let literal = match call.args.first_mut() {
                Some(ExprOrSpread { spread: None, expr }) => string_literal(expr),
                _ => None,
            };
            match literal {
                Some(literal) => (ImportKind::Dynamic, span, literal),
                None => {
                    return Err(BustError::non_literal_dynamic_import(
                        &state.path,
                        state.line_of(span),
                    ))
                }
            }
        }
    };

    // Lone surrogates have no UTF-8 form and cannot name a file on disk
    let Some(original) = literal.value.as_atom() else {
        return Ok(None);
    };
    let original = original.to_string();

    let Some(rewritten) = rewriter.rewrite_target(&state.path, &original)? else {
        return Ok(None);
    };

    literal.value = rewritten.clone().into();
    literal.raw = None;

    Ok(Some(RewriteRecord {
        kind,
        line: state.line_of(span),
        original,
        rewritten,
    }))
}

/// `'./x.js'` or `('./x.js')`
fn string_literal(expr: &mut Expr) -> Option<&mut Str> {
    match expr {
        Expr::Lit(Lit::Str(literal)) => Some(literal),
        Expr::Paren(paren) => string_literal(&mut paren.expr),
        _ => None,
    }
}

/// The cache-busting pass over one file.
///
/// swc visitors cannot return errors, so the first failure is recorded and
/// every later import site is left alone. Call [`finish`](Self::finish) after
/// the traversal to get the outcome.
pub struct CacheBustVisitor<'a> {
    rewriter: &'a Rewriter,
    state: &'a FileState,
    records: Vec<RewriteRecord>,
    error: Option<BustError>,
}

impl<'a> CacheBustVisitor<'a> {
    pub fn new(rewriter: &'a Rewriter, state: &'a FileState) -> Self {
        Self {
            rewriter,
            state,
            records: Vec::new(),
            error: None,
        }
    }

    /// Rewrites performed so far, or the error that stopped the pass
    pub fn finish(self) -> BustResult<Vec<RewriteRecord>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }

    fn apply(&mut self, node: ImportNode<'_>) {
        if self.error.is_some() {
            return;
        }

        match rewrite_import_node(self.rewriter, node, self.state) {
            Ok(Some(record)) => self.records.push(record),
            Ok(None) => {}
            Err(err) => self.error = Some(err),
        }
    }
}

impl VisitMut for CacheBustVisitor<'_> {
    fn visit_mut_import_decl(&mut self, node: &mut ImportDecl) {
        self.apply(ImportNode::Static(node));
    }

    fn visit_mut_call_expr(&mut self, node: &mut CallExpr) {
        if matches!(node.callee, Callee::Import(_)) {
            self.apply(ImportNode::Dynamic(node));
        }
        node.visit_mut_children_with(self);
    }
}
