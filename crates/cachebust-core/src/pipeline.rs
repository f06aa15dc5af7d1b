//! Minimal swc host for the cache-busting pass
//!
//! Hosts that already run an swc pipeline only need [`CacheBuster::transform_module`].
//! The source-level entry points parse, run the pass, and print the module
//! again, which is what the integration tests and simple build scripts use.

use crate::hash_cache::ContentHashCache;
use crate::rewriter::Rewriter;
use crate::visitor::{CacheBustVisitor, FileState};
use cachebust_config::{logging, BustConfig};
use cachebust_foundation::{
    BustError, BustResult, ContentSource, FsContentSource, RewriteRecord,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use swc_common::{
    comments::SingleThreadedComments, sync::Lrc, FileName, FilePathMapping, SourceMap, Spanned,
};
use swc_ecma_ast::Module;
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::VisitMutWith;
use tracing::{debug, info, warn};

/// Result of transforming one file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub path: PathBuf,
    /// Transformed code; the untouched input when nothing was rewritten
    pub code: String,
    pub rewrites: Vec<RewriteRecord>,
}

impl TransformOutput {
    pub fn changed(&self) -> bool {
        !self.rewrites.is_empty()
    }
}

/// The cache-busting transform with its content hash cache
pub struct CacheBuster {
    config: BustConfig,
    rewriter: Rewriter,
}

impl CacheBuster {
    /// Transform reading import targets from the local file system
    pub fn new(config: BustConfig) -> BustResult<Self> {
        Self::with_source(config, Arc::new(FsContentSource))
    }

    /// Transform reading import targets through `source`
    pub fn with_source(config: BustConfig, source: Arc<dyn ContentSource>) -> BustResult<Self> {
        config.validate()?;
        let cache = Arc::new(ContentHashCache::new(source, config.hash_length)?);
        Ok(Self::build(config, cache))
    }

    /// Transform sharing an existing cache.
    ///
    /// The cache must hash to `config.hash_length` characters. Hosts that
    /// rebuild in one long-lived process can hand each build a fresh cache
    /// this way.
    pub fn with_cache(config: BustConfig, cache: Arc<ContentHashCache>) -> BustResult<Self> {
        config.validate()?;
        if cache.hash_length() != config.hash_length {
            return Err(BustError::config(format!(
                "Cache hashes to {} characters but hashLength is {}",
                cache.hash_length(),
                config.hash_length
            )));
        }
        Ok(Self::build(config, cache))
    }

    fn build(config: BustConfig, cache: Arc<ContentHashCache>) -> Self {
        let rewriter = Rewriter::new(&config, cache);
        Self { config, rewriter }
    }

    pub fn config(&self) -> &BustConfig {
        &self.config
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn cache(&self) -> &Arc<ContentHashCache> {
        self.rewriter.cache()
    }

    /// Run the pass over an already parsed module
    pub fn transform_module(
        &self,
        module: &mut Module,
        state: &FileState,
    ) -> BustResult<Vec<RewriteRecord>> {
        let mut visitor = CacheBustVisitor::new(&self.rewriter, state);
        module.visit_mut_with(&mut visitor);
        visitor.finish()
    }

    /// Parse `source` as the contents of `path`, run the pass, and print it
    pub fn transform_source(&self, path: &Path, source: &str) -> BustResult<TransformOutput> {
        let span = logging::file_span(path);
        let _enter = span.enter();

        let cm = Lrc::new(SourceMap::new(FilePathMapping::empty()));
        let file_name = Lrc::new(FileName::Real(path.to_path_buf()));
        let source_file = cm.new_source_file(file_name, source.to_string());
        let comments = SingleThreadedComments::default();

        let lexer = Lexer::new(
            syntax_for(path),
            Default::default(),
            StringInput::from(&*source_file),
            Some(&comments),
        );
        let mut parser = Parser::new_from(lexer);

        let mut module = parser.parse_module().map_err(|e| {
            let line = cm.lookup_char_pos(e.span().lo).line;
            BustError::parse(path, line, e.kind().msg())
        })?;

        let recovered = parser.take_errors();
        for e in &recovered {
            let line = cm.lookup_char_pos(e.span().lo).line;
            warn!(line, message = %e.kind().msg(), "Parser diagnostic");
        }
        if let Some(e) = recovered.first() {
            let line = cm.lookup_char_pos(e.span().lo).line;
            return Err(BustError::parse(path, line, e.kind().msg()));
        }

        let state = FileState::new(path, cm.clone());
        let rewrites = self.transform_module(&mut module, &state)?;

        if rewrites.is_empty() {
            debug!("No import specifiers rewritten");
            return Ok(TransformOutput {
                path: path.to_path_buf(),
                code: source.to_string(),
                rewrites,
            });
        }

        let mut buf = vec![];
        {
            let mut emitter = Emitter {
                cfg: Default::default(),
                cm: cm.clone(),
                comments: Some(&comments),
                wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
            };

            emitter
                .emit_module(&module)
                .map_err(|e| BustError::emit(path, e.to_string()))?;
        }

        let code = String::from_utf8(buf).map_err(|e| {
            BustError::emit(path, format!("Emitted code is not valid UTF-8: {}", e))
        })?;

        info!(rewrites = rewrites.len(), "Transformed file");

        Ok(TransformOutput {
            path: path.to_path_buf(),
            code,
            rewrites,
        })
    }

    /// Read `path` from disk and transform it
    pub fn transform_file(&self, path: &Path) -> BustResult<TransformOutput> {
        let source = std::fs::read_to_string(path).map_err(|e| BustError::io(path, e))?;
        self.transform_source(path, &source)
    }

    /// Transform files in order, stopping at the first failure
    pub fn transform_files<P: AsRef<Path>>(&self, paths: &[P]) -> BustResult<Vec<TransformOutput>> {
        paths
            .iter()
            .map(|path| self.transform_file(path.as_ref()))
            .collect()
    }
}

/// Parser syntax for a file, chosen by extension
fn syntax_for(path: &Path) -> Syntax {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext @ ("ts" | "tsx" | "mts" | "cts")) => Syntax::Typescript(TsSyntax {
            tsx: ext == "tsx",
            decorators: true,
            ..Default::default()
        }),
        Some(ext) => Syntax::Es(EsSyntax {
            jsx: matches!(ext, "js" | "jsx"),
            ..Default::default()
        }),
        None => Syntax::Es(Default::default()),
    }
}
