//! Specifier classification and path resolution

use cachebust_foundation::{BustError, BustResult};
use std::path::{Component, Path, PathBuf};

/// Why a specifier is or is not eligible for rewriting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierClass<'a> {
    /// Package or absolute import, left alone
    NotRelative,
    /// Relative import of something that is not a script module (styles, assets)
    ForeignExtension,
    /// Relative script import ending in `extension`
    Rewritable { extension: &'a str },
}

/// Classify a specifier against the recognized module extensions.
///
/// Only the first character decides relativeness, so `./x.js`, `../x.js`
/// and `.hidden.js` all qualify. When several extensions match, the longest
/// one wins.
pub fn classify<'a, S: AsRef<str>>(specifier: &str, extensions: &'a [S]) -> SpecifierClass<'a> {
    if !specifier.starts_with('.') {
        return SpecifierClass::NotRelative;
    }

    extensions
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|ext| specifier.ends_with(*ext))
        .max_by_key(|ext| ext.len())
        .map_or(SpecifierClass::ForeignExtension, |extension| {
            SpecifierClass::Rewritable { extension }
        })
}

/// Build the cache-busted specifier: `<base><extension>?<query_key>=<hash>`.
///
/// `specifier` must end with `extension`.
pub fn bust_specifier(specifier: &str, extension: &str, query_key: &str, hash: &str) -> String {
    let base = &specifier[..specifier.len() - extension.len()];
    format!("{}{}?{}={}", base, extension, query_key, hash)
}

/// Absolute path of the file `specifier` points at, seen from `importing_file`.
///
/// A relative `importing_file` is anchored at the process working directory.
/// `.` and `..` are folded lexically; symlinks are not followed.
pub fn resolve_target(importing_file: &Path, specifier: &str) -> BustResult<PathBuf> {
    let importing_file = if importing_file.is_absolute() {
        importing_file.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| BustError::io(importing_file, e))?
            .join(importing_file)
    };

    let dir = importing_file.parent().unwrap_or_else(|| Path::new("/"));
    Ok(normalize_path(&dir.join(specifier)))
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            _ => result.push(component.as_os_str()),
        }
    }
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JS: &[&str] = &[".js"];

    #[test]
    fn test_package_imports_are_not_relative() {
        assert_eq!(classify("lodash", JS), SpecifierClass::NotRelative);
        assert_eq!(classify("@scope/pkg/index.js", JS), SpecifierClass::NotRelative);
        assert_eq!(classify("/abs/mod.js", JS), SpecifierClass::NotRelative);
        assert_eq!(classify("", JS), SpecifierClass::NotRelative);
    }

    #[test]
    fn test_relative_non_script_passes_through() {
        assert_eq!(classify("./styles.css", JS), SpecifierClass::ForeignExtension);
        assert_eq!(classify("./data.json", JS), SpecifierClass::ForeignExtension);
        assert_eq!(classify("./lib/mod", JS), SpecifierClass::ForeignExtension);
        assert_eq!(classify("./lib/mod.jsx", JS), SpecifierClass::ForeignExtension);
    }

    #[test]
    fn test_relative_script_is_rewritable() {
        assert_eq!(
            classify("./lib/mod.js", JS),
            SpecifierClass::Rewritable { extension: ".js" }
        );
        assert_eq!(
            classify("../mod.js", JS),
            SpecifierClass::Rewritable { extension: ".js" }
        );
        assert_eq!(
            classify(".hidden.js", JS),
            SpecifierClass::Rewritable { extension: ".js" }
        );
    }

    #[test]
    fn test_longest_extension_wins() {
        let exts = vec![".js".to_string(), ".min.js".to_string()];
        assert_eq!(
            classify("./vendor/lib.min.js", &exts),
            SpecifierClass::Rewritable {
                extension: ".min.js"
            }
        );
    }

    #[test]
    fn test_bust_specifier_keeps_base() {
        assert_eq!(
            bust_specifier("./lib/mod.js", ".js", "v", "a1b2c3d4"),
            "./lib/mod.js?v=a1b2c3d4"
        );
        assert_eq!(
            bust_specifier("../x.mjs", ".mjs", "rev", "00ff"),
            "../x.mjs?rev=00ff"
        );
    }

    #[test]
    fn test_resolve_sibling_directory() {
        let resolved = resolve_target(Path::new("/proj/src/app.js"), "./lib/mod.js").unwrap();
        assert_eq!(resolved, PathBuf::from("/proj/src/lib/mod.js"));
    }

    #[test]
    fn test_resolve_parent_directory() {
        let resolved =
            resolve_target(Path::new("/proj/src/pages/home.js"), "../shared/./util.js").unwrap();
        assert_eq!(resolved, PathBuf::from("/proj/src/shared/util.js"));
    }

    #[test]
    fn test_resolve_relative_importer_uses_cwd() {
        let resolved = resolve_target(Path::new("src/app.js"), "./mod.js").unwrap();
        let expected = std::env::current_dir().unwrap().join("src/mod.js");
        assert_eq!(resolved, normalize_path(&expected));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_equivalent_specifiers_resolve_to_same_key() {
        let a = resolve_target(Path::new("/proj/src/app.js"), "./lib/mod.js").unwrap();
        let b = resolve_target(Path::new("/proj/src/lib/other.js"), "./mod.js").unwrap();
        let c = resolve_target(Path::new("/proj/src/app.js"), "./lib/../lib/mod.js").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}
