//! pomgraph configuration loading from `.pomgraph.toml`.
//!
//! Configuration is optional; without a file every setting takes its
//! built-in default. Command-line flags override anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [scanner]
//! ignore = ["legacy/", "samples/"]
//! respect_gitignore = true
//! include_hidden = false
//! follow_symlinks = false
//!
//! [graph]
//! relations = ["parent", "module", "dependency"]
//! parallel_reads = true
//!
//! [output]
//! format = "graphml"
//! pretty = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use pomgraph_core::{ExportFormat, RelationKind};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".pomgraph.toml";

/// Root configuration structure loaded from `.pomgraph.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct PomgraphConfig {
    /// Descriptor discovery settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Which relations to build and how.
    #[serde(default)]
    pub graph: GraphConfig,

    /// Output preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Scanner configuration controlling descriptor discovery.
#[derive(Debug, Deserialize)]
pub struct ScannerConfig {
    /// Additional glob patterns to ignore during scanning.
    ///
    /// These are combined with the built-in defaults (`target/`, `.git/`)
    /// and any `.gitignore` / `.pomgraphignore` rules.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Honour `.gitignore`, global git excludes and `.git/info/exclude`.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Descend into hidden directories.
    #[serde(default)]
    pub include_hidden: bool,

    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            respect_gitignore: true,
            include_hidden: false,
            follow_symlinks: false,
        }
    }
}

/// Graph construction settings.
#[derive(Debug, Deserialize)]
pub struct GraphConfig {
    /// Relation kinds to build. `None` means all three.
    #[serde(default)]
    pub relations: Option<Vec<String>>,

    /// Read descriptors in parallel before building.
    #[serde(default = "default_true")]
    pub parallel_reads: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            relations: None,
            parallel_reads: true,
        }
    }
}

/// Output preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default export format: `graphml`, `json` or `dot`.
    #[serde(default)]
    pub format: Option<String>,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

/// Default ignore patterns that are always included.
///
/// Maven copies each module's descriptor into
/// `target/classes/META-INF/maven/<group>/<artifact>/pom.xml`.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &["target/", ".git/"];

impl PomgraphConfig {
    /// Load `.pomgraph.toml` from `root`.
    ///
    /// If the file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => return Self::parse_or_default(&content, &config_path),
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", config_path.display(), e);
                }
            }
        }
        Self::default()
    }

    /// Load an explicitly named config file.
    ///
    /// Unlike [`PomgraphConfig::load`], a file that cannot be read is an
    /// error. Parse failures still fall back to defaults with a warning.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Ok(Self::parse_or_default(&content, path))
    }

    fn parse_or_default(content: &str, path: &Path) -> Self {
        match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get ignore patterns for the scanner, with defaults included.
    ///
    /// User patterns come first; defaults are appended unless already
    /// present.
    pub fn ignore_patterns(&self) -> Vec<String> {
        let mut patterns = self.scanner.ignore.clone();

        for default in DEFAULT_IGNORE_PATTERNS {
            if !patterns.iter().any(|p| p == default) {
                patterns.push(default.to_string());
            }
        }

        patterns
    }

    /// Configured relation kinds, if any.
    ///
    /// Unknown names are skipped with a warning.
    pub fn relations(&self) -> Option<Vec<RelationKind>> {
        let names = self.graph.relations.as_ref()?;
        let kinds = names
            .iter()
            .filter_map(|name| match name.parse() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    tracing::warn!("Ignoring [graph].relations entry: {}", e);
                    None
                }
            })
            .collect();
        Some(kinds)
    }

    /// Get the default export format, if configured and valid.
    pub fn default_format(&self) -> Option<ExportFormat> {
        let name = self.output.format.as_deref()?;
        match name.parse() {
            Ok(format) => Some(format),
            Err(e) => {
                tracing::warn!("Ignoring [output].format: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PomgraphConfig::default();
        assert!(config.scanner.respect_gitignore);
        assert!(!config.scanner.include_hidden);
        assert!(config.graph.parallel_reads);
        assert!(config.relations().is_none());
        assert!(config.default_format().is_none());
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[scanner]
ignore = ["legacy/"]
respect_gitignore = false
include_hidden = true
follow_symlinks = true

[graph]
relations = ["dependency", "Parent"]
parallel_reads = false

[output]
format = "json"
pretty = true
"#;
        let config: PomgraphConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.scanner.ignore, vec!["legacy/"]);
        assert!(!config.scanner.respect_gitignore);
        assert!(config.scanner.include_hidden);
        assert!(config.scanner.follow_symlinks);

        assert_eq!(
            config.relations(),
            Some(vec![RelationKind::Dependency, RelationKind::Parent])
        );
        assert!(!config.graph.parallel_reads);

        assert_eq!(config.default_format(), Some(ExportFormat::Json));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: PomgraphConfig = toml::from_str("[scanner]\ninclude_hidden = true\n").unwrap();
        assert!(config.scanner.respect_gitignore);
        assert!(config.graph.parallel_reads);
    }

    #[test]
    fn test_ignore_patterns_with_defaults() {
        let config: PomgraphConfig =
            toml::from_str("[scanner]\nignore = [\"legacy/\", \"target/\"]\n").unwrap();
        let patterns = config.ignore_patterns();

        assert_eq!(patterns[0], "legacy/");
        assert_eq!(patterns.iter().filter(|p| *p == "target/").count(), 1);
        assert!(patterns.contains(&".git/".to_string()));
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let toml_content = r#"
[graph]
relations = ["parent", "import"]

[output]
format = "svg"
"#;
        let config: PomgraphConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.relations(), Some(vec![RelationKind::Parent]));
        assert_eq!(config.default_format(), None);
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let config = PomgraphConfig::load(dir.path());
        assert!(config.scanner.ignore.is_empty());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[scanner\nignore = 1").unwrap();
        let config = PomgraphConfig::load(dir.path());
        assert!(config.scanner.ignore.is_empty());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\nformat = \"dot\"\n").unwrap();

        let config = PomgraphConfig::load_from(&path).unwrap();
        assert_eq!(config.default_format(), Some(ExportFormat::Dot));

        assert!(PomgraphConfig::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
