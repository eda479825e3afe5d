//! Mapping from module identifiers to source files under the source root.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;

/// Extension appended to a module identifier to get its file name.
pub const MODULE_EXTENSION: &str = "rs";

/// A source file read fully into memory as raw lines.
///
/// Each line keeps its `\n` terminator; a final line without one is kept as-is.
/// The file handle is released before [`SourceFile::open`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name relative to the source root, e.g. `util.rs`
    name: String,
    /// Resolved path on disk
    path: PathBuf,
    lines: Vec<String>,
}

impl SourceFile {
    pub fn open(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let name = name.into();
        let path = path.into();
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read source file '{name}' at {}", path.display()))?;
        debug!("Read {} ({} bytes)", path.display(), contents.len());
        Ok(Self::from_source(name, path, &contents))
    }

    /// Build a source file from text already in memory.
    pub fn from_source(name: impl Into<String>, path: impl Into<PathBuf>, source: &str) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            lines: source.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Resolves module identifiers and entry file names against a fixed source root.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    source_root: PathBuf,
}

impl ModuleResolver {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// `util` -> `util.rs`
    pub fn module_file_name(module_name: &str) -> String {
        format!("{module_name}.{MODULE_EXTENSION}")
    }

    /// Path a module identifier maps to. Pure: does not touch the file system.
    pub fn resolve_module_path(&self, module_name: &str) -> PathBuf {
        self.source_root.join(Self::module_file_name(module_name))
    }

    /// Open the file for `module_name`.
    pub fn open_module(&self, module_name: &str) -> Result<SourceFile> {
        let file_name = Self::module_file_name(module_name);
        let path = self.source_root.join(&file_name);
        SourceFile::open(file_name, &path)
            .with_context(|| format!("cannot resolve module '{module_name}'"))
    }

    /// Open an entry file such as `main.rs` by its file name.
    pub fn open_entry(&self, file_name: &str) -> Result<SourceFile> {
        SourceFile::open(file_name, self.source_root.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_resolve_module_path_appends_extension() {
        let resolver = ModuleResolver::new("src");
        assert_eq!(
            resolver.resolve_module_path("small_set"),
            Path::new("src").join("small_set.rs")
        );
    }

    #[test]
    fn test_source_file_keeps_terminators() {
        let file = SourceFile::from_source("a.rs", "src/a.rs", "one\ntwo\n\nlast");
        let lines: Vec<&str> = file.lines().collect();
        assert_eq!(lines, vec!["one\n", "two\n", "\n", "last"]);
    }

    #[test]
    fn test_empty_source_has_no_lines() {
        let file = SourceFile::from_source("a.rs", "src/a.rs", "");
        assert_eq!(file.lines().count(), 0);
    }

    #[test]
    fn test_open_module_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("util.rs"), "pub fn f() {}\n").unwrap();

        let resolver = ModuleResolver::new(temp_dir.path());
        let file = resolver.open_module("util").unwrap();
        assert_eq!(file.name(), "util.rs");
        assert_eq!(file.path(), temp_dir.path().join("util.rs"));
        assert_eq!(file.lines().collect::<Vec<_>>(), vec!["pub fn f() {}\n"]);
    }

    #[test]
    fn test_open_missing_module_names_module() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = ModuleResolver::new(temp_dir.path());

        let err = resolver.open_module("missing").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("cannot resolve module 'missing'"), "{message}");
        assert!(message.contains("missing.rs"), "{message}");
    }
}
