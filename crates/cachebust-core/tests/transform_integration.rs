//! End-to-end transforms over real files in a temporary project

use cachebust_core::{
    content_hash, BustConfig, BustError, CacheBuster, ContentHashCache, ImportKind,
};
use cachebust_foundation::FsContentSource;
use cachebust_test_support::TestProject;
use pretty_assertions::assert_eq;
use std::sync::Arc;

const MOD_JS: &str = "export const answer = 42;\n";

fn buster() -> CacheBuster {
    CacheBuster::new(BustConfig::default()).unwrap()
}

#[test]
fn rewrites_static_import_to_hashed_specifier() {
    let project = TestProject::with_app_and_lib();

    let out = buster().transform_file(&project.path("src/app.js")).unwrap();

    let expected = format!("./lib/mod.js?v={}", content_hash(MOD_JS.as_bytes(), 8));
    assert!(out.code.contains(&expected), "code was:\n{}", out.code);
    assert_eq!(out.rewrites.len(), 1);
    assert_eq!(out.rewrites[0].kind, ImportKind::Static);
    assert_eq!(out.rewrites[0].original, "./lib/mod.js");
    assert_eq!(out.rewrites[0].rewritten, expected);
}

#[test]
fn dynamic_and_static_imports_agree() {
    let project = TestProject::new();
    project.write("src/lib/mod.js", MOD_JS);
    let app = project.write(
        "src/app.js",
        "import { answer } from './lib/mod.js';\nexport const lazy = () => import('./lib/mod.js');\n",
    );

    let out = buster().transform_file(&app).unwrap();

    assert_eq!(out.rewrites.len(), 2);
    assert_eq!(out.rewrites[0].rewritten, out.rewrites[1].rewritten);
    assert_eq!(out.rewrites[1].kind, ImportKind::Dynamic);
    assert_eq!(out.rewrites[1].line, 2);
}

#[test]
fn identical_content_at_different_paths_shares_hash() {
    let project = TestProject::new();
    project.write("src/a.js", "export default 'same';\n");
    project.write("src/nested/b.js", "export default 'same';\n");
    let app = project.write(
        "src/app.js",
        "import a from './a.js';\nimport b from './nested/b.js';\n",
    );

    let out = buster().transform_file(&app).unwrap();

    let hash_a = out.rewrites[0].rewritten.split_once("?v=").unwrap().1;
    let hash_b = out.rewrites[1].rewritten.split_once("?v=").unwrap().1;
    assert_eq!(hash_a, hash_b);
}

#[test]
fn assets_and_packages_pass_through() {
    let project = TestProject::new();
    let code = "import React from 'react';\nimport './app.css';\nimport data from './data.json';\n";
    let app = project.write("src/app.js", code);

    let out = buster().transform_file(&app).unwrap();

    assert!(!out.changed());
    assert_eq!(out.code, code);
}

#[test]
fn missing_target_aborts_with_path() {
    let project = TestProject::new();
    let app = project.write("src/app.js", "import x from './does-not-exist.js';\n");

    let err = buster().transform_file(&app).unwrap_err();

    match err {
        BustError::FileAccess { path, .. } => {
            assert_eq!(path, project.path("src/does-not-exist.js"));
        }
        other => panic!("expected FileAccess, got {other:?}"),
    }
}

#[test]
fn non_literal_dynamic_import_names_file_and_line() {
    let project = TestProject::new();
    project.write("src/lib/mod.js", MOD_JS);
    let app = project.write(
        "src/app.js",
        "import './lib/mod.js';\nconst which = './lib/mod.js';\nimport(which);\n",
    );

    let err = buster().transform_file(&app).unwrap_err();

    assert_eq!(err.line(), Some(3));
    assert_eq!(err.file(), Some(app.as_path()));
    assert!(err.to_string().contains("not string literal"));
}

#[test]
fn missing_importing_file_is_io_error() {
    let project = TestProject::new();
    let err = buster()
        .transform_file(&project.path("src/nope.js"))
        .unwrap_err();
    assert!(matches!(err, BustError::Io { .. }));
}

#[test]
fn cache_is_not_invalidated_within_one_buster() {
    let project = TestProject::with_app_and_lib();
    let buster = buster();

    let first = buster.transform_file(&project.path("src/app.js")).unwrap();
    project.write("src/lib/mod.js", "export const answer = 43;\n");
    let second = buster.transform_file(&project.path("src/app.js")).unwrap();

    assert_eq!(first.rewrites[0].rewritten, second.rewrites[0].rewritten);
    assert_eq!(buster.cache().len(), 1);
}

#[test]
fn fresh_cache_sees_new_content() {
    let project = TestProject::with_app_and_lib();
    let config = BustConfig::default();

    let first = CacheBuster::new(config.clone())
        .unwrap()
        .transform_file(&project.path("src/app.js"))
        .unwrap();

    project.write("src/lib/mod.js", "export const answer = 43;\n");
    let cache = Arc::new(ContentHashCache::new(Arc::new(FsContentSource), 8).unwrap());
    let second = CacheBuster::with_cache(config, cache)
        .unwrap()
        .transform_file(&project.path("src/app.js"))
        .unwrap();

    assert_ne!(first.rewrites[0].rewritten, second.rewrites[0].rewritten);
}

#[test]
fn transform_files_shares_one_cache() {
    let project = TestProject::with_app_and_lib();
    project.write("src/other.js", "export * from './lib/mod.js';\nimport './lib/mod.js';\n");
    let buster = buster();

    let outputs = buster
        .transform_files(&[project.path("src/app.js"), project.path("src/other.js")])
        .unwrap();

    assert_eq!(outputs.len(), 2);
    // re-exports are not import declarations and stay as written
    assert_eq!(outputs[1].rewrites.len(), 1);
    assert_eq!(outputs[0].rewrites[0].rewritten, outputs[1].rewrites[0].rewritten);
    assert_eq!(buster.cache().len(), 1);
}

#[test]
fn options_from_json_change_query_and_length() {
    let project = TestProject::with_app_and_lib();
    let config = BustConfig::from_json_str(r#"{ "queryKey": "rev", "hashLength": 12 }"#).unwrap();

    let out = CacheBuster::new(config)
        .unwrap()
        .transform_file(&project.path("src/app.js"))
        .unwrap();

    assert_eq!(
        out.rewrites[0].rewritten,
        format!("./lib/mod.js?rev={}", content_hash(MOD_JS.as_bytes(), 12))
    );
}
