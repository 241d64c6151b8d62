//! Configuration for the `pbm` command line tool
//!
//! Loaded from an optional TOML file passed with `--config`:
//!
//! ```toml
//! [pipeline]
//! steps = ["dedupe", "datefolders", "starred"]
//!
//! [filter]
//! skip_folders = ["chrome", "bookmarklets", "quicklinks", "starred", "all", "private"]
//!
//! [options]
//! "datefolders.mode" = "merge"
//! quicklinks = { prefix = "~" }
//! ```

use anyhow::{Context, Result};
use pbm_core::FilterConfig;
use pbm_pipeline::{StepOptions, DEFAULT_SEQUENCE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbmConfig {
    pub pipeline: PipelineConfig,
    pub filter: FilterConfig,
    /// Per-step options, flat (`"step.key"`) or nested (`step = { key }`)
    pub options: StepOptions,
}

/// `[pipeline]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Step names, run in order
    pub steps: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_SEQUENCE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PbmConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(path = %path.display(), steps = config.pipeline.steps.len(), "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line overrides on top of the file
    ///
    /// `steps` replaces the configured sequence; each `KEY=VALUE` option is
    /// parsed as JSON when possible and taken as a plain string otherwise.
    pub fn apply_overrides(&mut self, steps: Option<Vec<String>>, options: &[String]) -> Result<()> {
        if let Some(steps) = steps {
            self.pipeline.steps = steps.iter().map(|s| s.trim().to_string()).collect();
        }
        for option in options {
            let (key, value) = parse_option(option)?;
            self.options.insert(key, value);
        }
        self.validate()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.steps.is_empty() {
            anyhow::bail!("pipeline.steps must name at least one step");
        }
        if let Some(blank) = self.pipeline.steps.iter().position(|s| s.trim().is_empty()) {
            anyhow::bail!("pipeline.steps[{}] is empty", blank);
        }
        if self.filter.skip_folders.iter().any(|s| s.is_empty()) {
            anyhow::bail!("filter.skip_folders must not contain empty names");
        }
        Ok(())
    }
}

/// Parse a `KEY=VALUE` step option
pub fn parse_option(option: &str) -> Result<(String, Value)> {
    let (key, raw) = option
        .split_once('=')
        .with_context(|| format!("Invalid option '{}': expected KEY=VALUE", option))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid option '{}': empty key", option);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Annotated example configuration, printed by `pbm config --example`
pub fn example_config() -> String {
    format!(
        r#"# pbm configuration
#
# Pass with: pbm organize --config pbm.toml Bookmarks

[pipeline]
# Steps run in this order; see `pbm steps` for the catalogue
steps = [{steps}]

[filter]
# Folders whose contents are never collected by the steps
skip_folders = ["chrome", "bookmarklets", "quicklinks", "starred", "all"]

[options]
# "replace" rebuilds the date folders, "merge" keeps unrelated top-level folders
"datefolders.mode" = "replace"
# Pad month and day in folder names ("2014-01-02" instead of "2014-1-2")
"datefolders.zero_pad" = false
# Top-level folders whose name starts with this prefix are kept as-is
"quicklinks.prefix" = "quicklinks"
"#,
        steps = DEFAULT_SEQUENCE
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
