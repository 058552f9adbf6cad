//! Call-site scanning
//!
//! Finds API symbols referenced in a source tree, either called directly
//! (`glClear(`) or through their aliased name (`tsglClear`). Matching is
//! purely textual, so comments and string literals count as uses.

use glsync_core::config::{NamingConfig, ScanConfig};
use glsync_core::{Error, Result, Symbol};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Regex-based call-site scanner
pub struct CallSiteScanner {
    pattern: Regex,
    extensions: Vec<String>,
}

impl CallSiteScanner {
    /// Create a scanner for the configured prefixes and extensions
    pub fn new(naming: &NamingConfig, scan: &ScanConfig) -> Result<Self> {
        let api = regex::escape(&naming.api_prefix);
        let alias = regex::escape(&naming.alias_prefix);
        let pattern = Regex::new(&format!(
            r"({api}[A-Z][a-zA-Z0-9]+)\(|{alias}({api}[A-Z][a-zA-Z0-9]+)"
        ))
        .map_err(|e| Error::Pattern(e.to_string()))?;

        Ok(Self {
            pattern,
            extensions: scan.extensions.clone(),
        })
    }

    /// Symbols referenced in one piece of source text
    pub fn scan_source(&self, source: &str) -> BTreeSet<Symbol> {
        self.pattern
            .captures_iter(source)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| Symbol::new(m.as_str()))
            .collect()
    }

    /// Symbols referenced anywhere under `dir`
    pub fn scan_directory(&self, dir: &Path) -> Result<BTreeSet<Symbol>> {
        let files = self.source_files(dir)?;
        info!("Scanning {} source files in {}", files.len(), dir.display());

        let mut symbols = BTreeSet::new();
        for path in &files {
            let source = std::fs::read_to_string(path).map_err(|e| Error::input(path, e))?;
            let found = self.scan_source(&source);
            debug!("{}: {} symbols", path.display(), found.len());
            symbols.extend(found);
        }

        Ok(symbols)
    }

    /// Files under `dir` with a scanned extension
    pub fn source_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                Error::input(path, e.into())
            })?;

            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        Ok(paths)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> CallSiteScanner {
        CallSiteScanner::new(&NamingConfig::default(), &ScanConfig::default()).unwrap()
    }

    fn names(set: &BTreeSet<Symbol>) -> Vec<&str> {
        set.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_direct_call() {
        let found = scanner().scan_source("void f(void) { glClear(0); }");
        assert_eq!(names(&found), vec!["glClear"]);
    }

    #[test]
    fn test_aliased_reference_strips_prefix() {
        let found = scanner().scan_source("GLDEF_PTR p = (void*)tsglBindBuffer;");
        assert_eq!(names(&found), vec!["glBindBuffer"]);
    }

    #[test]
    fn test_bare_name_without_call_is_ignored() {
        let found = scanner().scan_source("void *p = glClear;");
        assert!(found.is_empty());
    }

    #[test]
    fn test_lowercase_after_prefix_is_ignored() {
        let found = scanner().scan_source("global(1); glx(2); gl_Foo(3);");
        assert!(found.is_empty());
    }

    #[test]
    fn test_comments_and_strings_count() {
        let found = scanner().scan_source("// glEnable(GL_BLEND)\nlog(\"glDisable(x)\");");
        assert_eq!(names(&found), vec!["glDisable", "glEnable"]);
    }

    #[test]
    fn test_space_before_paren_is_not_a_call() {
        let found = scanner().scan_source("glClear (0);");
        assert!(found.is_empty());
    }

    #[test]
    fn test_custom_prefixes() {
        let naming = NamingConfig {
            api_prefix: "vk".into(),
            alias_prefix: "dyn_".into(),
            ..NamingConfig::default()
        };
        let scanner = CallSiteScanner::new(&naming, &ScanConfig::default()).unwrap();
        let found = scanner.scan_source("vkCreateDevice(a); dyn_vkDestroyDevice; glClear(0);");
        assert_eq!(names(&found), vec!["vkCreateDevice", "vkDestroyDevice"]);
    }

    #[test]
    fn test_scan_directory_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("renderer/gl33")).unwrap();
        fs::write(root.join("main.c"), "glViewport(0, 0, w, h);").unwrap();
        fs::write(root.join("renderer/gl33/gl33.c"), "tsglUseProgram;").unwrap();
        fs::write(root.join("renderer/gl33/gl33.h"), "glIgnored(1);").unwrap();
        fs::write(root.join("notes.txt"), "glAlsoIgnored(1);").unwrap();

        let found = scanner().scan_directory(root).unwrap();
        assert_eq!(names(&found), vec!["glUseProgram", "glViewport"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_source_scanned() {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared");
        let src = dir.path().join("src");
        fs::create_dir_all(&shared).unwrap();
        fs::create_dir_all(&src).unwrap();
        fs::write(shared.join("clear.c"), "glClear(0);").unwrap();
        std::os::unix::fs::symlink(shared.join("clear.c"), src.join("shared.c")).unwrap();

        let found = scanner().scan_directory(&src).unwrap();
        assert_eq!(names(&found), vec!["glClear"]);
    }

    #[test]
    fn test_scan_directory_no_matches() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.c"), "int main(void) { return 0; }").unwrap();
        assert!(scanner().scan_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let result = scanner().scan_directory(Path::new("/nonexistent/glsync/src"));
        assert!(matches!(result, Err(Error::InputAccess { .. })));
    }

    #[test]
    fn test_unreadable_source_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.c"), [0xff, 0xfe, 0x00, 0x67]).unwrap();
        let result = scanner().scan_directory(dir.path());
        assert!(matches!(result, Err(Error::InputAccess { .. })));
    }
}
