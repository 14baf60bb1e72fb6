//! Configuration file support
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.sorarc.json` in project root
//! 3. `sora.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::containment::AdjacentAreaPolicy;
use crate::engine::SoraEngine;
use crate::report::ReportFormat;
use crate::tables::{load_tables_file, ReferenceTables};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sora configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoraConfig {
    /// Alternate reference table set (relative to the config file)
    #[serde(default)]
    pub tables: Option<PathBuf>,

    /// Adjacent-area distance rule
    #[serde(default)]
    pub adjacent_area: Option<AdjacentAreaConfig>,

    /// Default output format
    #[serde(default)]
    pub format: Option<ReportFormat>,
}

/// Adjacent-area distance rule overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjacentAreaConfig {
    /// Seconds of flight at max speed (default: 180)
    pub flight_seconds: Option<f64>,
    /// Distance floor in meters (default: 5000)
    pub min_distance_m: Option<f64>,
    /// Distance cap in meters (default: 35000)
    pub max_distance_m: Option<f64>,
}

impl AdjacentAreaConfig {
    fn policy(&self) -> AdjacentAreaPolicy {
        let defaults = AdjacentAreaPolicy::default();
        AdjacentAreaPolicy {
            flight_seconds: self.flight_seconds.unwrap_or(defaults.flight_seconds),
            min_distance_m: self.min_distance_m.unwrap_or(defaults.min_distance_m),
            max_distance_m: self.max_distance_m.unwrap_or(defaults.max_distance_m),
        }
    }
}

/// Resolved configuration with the table set loaded
#[derive(Debug)]
pub struct ResolvedConfig {
    pub tables: ReferenceTables,
    pub adjacent_area: AdjacentAreaPolicy,
    pub format: Option<ReportFormat>,
    /// Path the table set was loaded from (None if built in)
    pub tables_path: Option<PathBuf>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl SoraConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref area) = self.adjacent_area {
            area.policy().validate()?;
        }

        if let Some(ref tables) = self.tables {
            if tables.as_os_str().is_empty() {
                anyhow::bail!("tables must not be an empty path");
            }
        }

        Ok(())
    }

    /// Resolve config into a form ready for use
    ///
    /// `base_dir` anchors a relative `tables` path.
    pub fn resolve(&self, base_dir: &Path) -> Result<ResolvedConfig> {
        self.validate()?;

        let (tables, tables_path) = match &self.tables {
            Some(path) => {
                let full = if path.is_relative() {
                    base_dir.join(path)
                } else {
                    path.clone()
                };
                (load_tables_file(&full)?, Some(full))
            }
            None => (ReferenceTables::sora_2_5(), None),
        };

        let adjacent_area = self
            .adjacent_area
            .as_ref()
            .map(AdjacentAreaConfig::policy)
            .unwrap_or_default();

        Ok(ResolvedConfig {
            tables,
            adjacent_area,
            format: self.format,
            tables_path,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        ResolvedConfig {
            tables: ReferenceTables::sora_2_5(),
            adjacent_area: AdjacentAreaPolicy::default(),
            format: None,
            tables_path: None,
            config_path: None,
        }
    }

    /// Engine over the resolved tables and policy
    pub fn engine(&self) -> Result<SoraEngine> {
        let engine = SoraEngine::new(self.tables.clone())
            .context("resolved reference tables are invalid")?;
        engine
            .with_adjacent_area(self.adjacent_area)
            .context("invalid adjacent_area policy")
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.sorarc.json`
/// 2. `sora.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(SoraConfig, PathBuf)>> {
    for name in [".sorarc.json", "sora.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<SoraConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: SoraConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(
    project_root: &Path,
    config_path: Option<&Path>,
) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (SoraConfig::default(), None),
        }
    };

    let base_dir = source_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(project_root)
        .to_path_buf();

    let mut resolved = config.resolve(&base_dir)?;
    resolved.config_path = source_path;
    Ok(resolved)
}
