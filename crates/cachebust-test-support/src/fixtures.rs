//! Temporary project trees for end-to-end transform tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway project directory, removed when dropped
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp project"),
        }
    }

    /// Absolute path of a project-relative file
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories as needed
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Standard layout: `src/app.js` importing `src/lib/mod.js`
    pub fn with_app_and_lib() -> Self {
        let project = Self::new();
        project.write("src/lib/mod.js", "export const answer = 42;\n");
        project.write(
            "src/app.js",
            "import { answer } from './lib/mod.js';\nconsole.log(answer);\n",
        );
        project
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
