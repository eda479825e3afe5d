//! Run configuration.
//!
//! The source root and entry file names follow Cargo's layout and are not
//! configurable. The only inputs are the project directory, the output path, the
//! topology, and the package name used to wrap the library.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use serde::Deserialize;

pub const MANIFEST_FILE: &str = "Cargo.toml";
pub const SOURCE_DIR: &str = "src";
pub const LIBRARY_ENTRY: &str = "lib.rs";
pub const MAIN_ENTRY: &str = "main.rs";

/// Entry-point arrangement of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topology {
    /// Expand one entry file with no enclosing boundary.
    SingleEntry { entry: String },
    /// Expand the library inside `pub mod <package> { ... }`, then the main file
    /// unwrapped.
    LibraryPlusMain {
        library: String,
        main: String,
        package: String,
    },
}

impl Topology {
    pub fn single_entry() -> Self {
        Self::SingleEntry {
            entry: MAIN_ENTRY.to_owned(),
        }
    }

    pub fn library_plus_main(package: impl Into<String>) -> Self {
        Self::LibraryPlusMain {
            library: LIBRARY_ENTRY.to_owned(),
            main: MAIN_ENTRY.to_owned(),
            package: package.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing `Cargo.toml` and `src/`
    pub project_dir: PathBuf,
    /// Bundle destination, truncated at the start of each run
    pub output: PathBuf,
    pub topology: Topology,
}

impl Config {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        topology: Topology,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            output: output.into(),
            topology,
        }
    }

    pub fn source_root(&self) -> PathBuf {
        self.project_dir.join(SOURCE_DIR)
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<NamedTarget>,
    lib: Option<NamedTarget>,
}

#[derive(Debug, Deserialize)]
struct NamedTarget {
    name: Option<String>,
}

/// Name of the module wrapping the library: `package` if given, otherwise the crate
/// name from the project's manifest.
pub fn resolve_package_name(project_dir: &Path, package: Option<&str>) -> Result<String> {
    match package {
        Some(package) => package_module_name(package),
        None => crate_name_from_manifest(project_dir),
    }
}

/// Map `-` to `_` and check the result is usable as `mod <name>`.
pub fn package_module_name(package: &str) -> Result<String> {
    let name = package.replace('-', "_");
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') || name == "_" {
        bail!("package name '{package}' is not a valid module identifier");
    }
    Ok(name)
}

/// Crate name as it appears in `use` paths: the `[lib] name` if set, otherwise the
/// `[package] name` with `-` replaced by `_`.
pub fn crate_name_from_manifest(project_dir: &Path) -> Result<String> {
    let manifest_path = project_dir.join(MANIFEST_FILE);
    let contents = fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let name = crate_name_from_toml(&contents)
        .with_context(|| format!("invalid manifest {}", manifest_path.display()))?;
    debug!("Using crate name '{name}' from {}", manifest_path.display());
    Ok(name)
}

fn crate_name_from_toml(contents: &str) -> Result<String> {
    let manifest: Manifest = toml::from_str(contents)?;

    let name = manifest
        .lib
        .and_then(|lib| lib.name)
        .or_else(|| manifest.package.and_then(|package| package.name))
        .ok_or_else(|| anyhow!("no [package] name or [lib] name"))?;
    package_module_name(&name)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_package_name_hyphens_become_underscores() {
        let name =
            crate_name_from_toml("[package]\nname = \"sudoku-game\"\nversion = \"0.1.0\"\n")
                .unwrap();
        assert_eq!(name, "sudoku_game");
    }

    #[test]
    fn test_lib_name_takes_precedence() {
        let name = crate_name_from_toml(
            "[package]\nname = \"player\"\n\n[lib]\nname = \"engine\"\npath = \"src/lib.rs\"\n",
        )
        .unwrap();
        assert_eq!(name, "engine");
    }

    #[test]
    fn test_workspace_manifest_without_name_is_rejected() {
        let err = crate_name_from_toml("[workspace]\nmembers = [\"a\"]\n").unwrap_err();
        assert!(err.to_string().contains("no [package] name"));
    }

    #[test]
    fn test_missing_manifest_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let err = crate_name_from_manifest(temp_dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Cargo.toml"));
    }

    #[test]
    fn test_package_override_is_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let name = resolve_package_name(temp_dir.path(), Some("my-game")).unwrap();
        assert_eq!(name, "my_game");
    }

    #[test]
    fn test_package_falls_back_to_manifest() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(MANIFEST_FILE),
            "[package]\nname = \"sudoku-game\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        assert_eq!(
            resolve_package_name(temp_dir.path(), None).unwrap(),
            "sudoku_game"
        );
        assert_eq!(
            resolve_package_name(temp_dir.path(), Some("engine")).unwrap(),
            "engine"
        );
    }

    #[test]
    fn test_invalid_package_names_are_rejected() {
        for package in ["", "_", "1game", "my game", "game::core", "my.game"] {
            let err = package_module_name(package).unwrap_err();
            assert!(
                err.to_string().contains("not a valid module identifier"),
                "package: {package:?}"
            );
        }
        assert_eq!(package_module_name("_private").unwrap(), "_private");
        assert_eq!(package_module_name("Game2").unwrap(), "Game2");
    }

    #[test]
    fn test_invalid_manifest_name_is_rejected() {
        let err = crate_name_from_toml("[lib]\nname = \"bad name\"\n").unwrap_err();
        assert!(err.to_string().contains("not a valid module identifier"));
    }

    #[test]
    fn test_source_root_is_under_project_dir() {
        let config = Config::new("/work/game", "out.rs", Topology::single_entry());
        assert_eq!(config.source_root(), Path::new("/work/game").join("src"));
    }
}
