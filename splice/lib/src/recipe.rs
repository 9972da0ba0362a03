//! TOML recipes describing a single splice.
//!
//! ```toml
//! path = "frontend/src/pages/DashboardPage.js"
//! start = "<SalesTrendChart"
//! end = "</SalesTrendChart>"
//! replacement_file = "snippets/profit_chart.jsx"
//! ```
//!
//! Relative paths resolve against the recipe's own directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SpliceError};
use crate::file::read_text;
use crate::span::Markers;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecipe {
    path: PathBuf,
    start: String,
    end: String,
    replacement: Option<String>,
    replacement_file: Option<PathBuf>,
}

/// A fully resolved splice: target, markers and replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub path: PathBuf,
    pub markers: Markers,
    pub replacement: String,
}

impl Recipe {
    /// Loads and resolves a recipe file.
    ///
    /// ## Errors
    ///
    /// Returns [`SpliceError::Recipe`] for unreadable or malformed TOML, or when
    /// not exactly one of `replacement` / `replacement_file` is set. Reading a
    /// `replacement_file` can fail like any other text read.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| invalid(path, e.to_string()))?;
        Self::from_toml(&source, path)
    }

    /// Parses recipe TOML that was read from `recipe_path`.
    ///
    /// Relative paths resolve against `recipe_path`'s directory, and errors
    /// name `recipe_path`.
    pub fn from_toml(source: &str, recipe_path: &Path) -> Result<Self> {
        let base = recipe_path.parent().unwrap_or_else(|| Path::new(""));
        let raw: RawRecipe =
            toml::from_str(source).map_err(|e| invalid(recipe_path, e.message().to_string()))?;

        let replacement = match (raw.replacement, raw.replacement_file) {
            (Some(text), None) => text,
            (None, Some(file)) => {
                let file = resolve(base, &file);
                debug!(file = %file.display(), "reading replacement file");
                read_text(&file)?
            }
            (Some(_), Some(_)) => {
                return Err(invalid(
                    recipe_path,
                    "set only one of `replacement` or `replacement_file`",
                ));
            }
            (None, None) => {
                return Err(invalid(
                    recipe_path,
                    "missing `replacement` or `replacement_file`",
                ));
            }
        };

        let markers = Markers::new(raw.start, raw.end);
        markers.validate()?;

        Ok(Self {
            path: resolve(base, &raw.path),
            markers,
            replacement,
        })
    }
}

fn invalid(recipe_path: &Path, message: impl Into<String>) -> SpliceError {
    SpliceError::Recipe {
        path: recipe_path.to_path_buf(),
        message: message.into(),
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn inline_replacement_resolves_relative_path() {
        let recipe = Recipe::from_toml(
            r#"
path = "src/pages/DashboardPage.js"
start = "<SalesTrendChart"
end = "</SalesTrendChart>"
replacement = "<ProfitabilityTrendChart />"
"#,
            Path::new("/work/frontend/swap.toml"),
        )
        .unwrap();

        assert_eq!(recipe.path, PathBuf::from("/work/frontend/src/pages/DashboardPage.js"));
        assert_eq!(recipe.markers, Markers::new("<SalesTrendChart", "</SalesTrendChart>"));
        assert_eq!(recipe.replacement, "<ProfitabilityTrendChart />");
    }

    #[test]
    fn absolute_path_is_kept() {
        let recipe = Recipe::from_toml(
            "path = \"/abs/page.js\"\nstart = \"<A>\"\nend = \"</A>\"\nreplacement = \"\"\n",
            Path::new("/elsewhere/swap.toml"),
        )
        .unwrap();
        assert_eq!(recipe.path, PathBuf::from("/abs/page.js"));
    }

    #[test]
    fn replacement_file_is_read_relative_to_base() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("chart.jsx"), "<Bar />").unwrap();

        let recipe = Recipe::from_toml(
            "path = \"page.js\"\nstart = \"<A>\"\nend = \"</A>\"\nreplacement_file = \"chart.jsx\"\n",
            &dir.path().join("swap.toml"),
        )
        .unwrap();

        assert_eq!(recipe.replacement, "<Bar />");
        assert_eq!(recipe.path, dir.path().join("page.js"));
    }

    #[test]
    fn both_replacement_sources_are_rejected() {
        let err = Recipe::from_toml(
            "path = \"p\"\nstart = \"<A>\"\nend = \"</A>\"\nreplacement = \"x\"\nreplacement_file = \"y\"\n",
            Path::new("recipes/swap.toml"),
        )
        .unwrap_err();
        match err {
            SpliceError::Recipe { path, .. } => assert_eq!(path, PathBuf::from("recipes/swap.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_replacement_is_rejected() {
        let err = Recipe::from_toml(
            "path = \"p\"\nstart = \"<A>\"\nend = \"</A>\"\n",
            Path::new("swap.toml"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid recipe `swap.toml`: missing `replacement` or `replacement_file`"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Recipe::from_toml(
            "path = \"p\"\nstart = \"<A>\"\nend = \"</A>\"\nreplacement = \"x\"\nbackup = true\n",
            Path::new("swap.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, SpliceError::Recipe { .. }));
    }

    #[test]
    fn load_reports_recipe_path() {
        let dir = TempDir::new().unwrap();
        let recipe_path = dir.path().join("swap.toml");
        fs::write(&recipe_path, "path = 3").unwrap();

        match Recipe::load(&recipe_path).unwrap_err() {
            SpliceError::Recipe { path, .. } => assert_eq!(path, recipe_path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
