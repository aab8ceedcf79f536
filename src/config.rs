//! Scan configuration helpers.
//!
//! Defaults match a stock Flutter layout; a project may override them with a
//! `.assetval.json` at its root, and CLI flags override both.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const CONFIG_FILE_REL: &str = ".assetval.json";
pub const DEFAULT_MANIFEST_REL: &str = "pubspec.yaml";
pub const DEFAULT_EXTENSIONS: &[&str] = &["dart"];
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules"];

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST_REL.to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS
        .iter()
        .map(|dir| dir.to_string())
        .collect()
}

/// Where to find the manifest and which files count as source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            manifest: default_manifest(),
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

/// CLI-provided values; empty/`None` fields leave the loaded config alone.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub manifest: Option<String>,
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

/// Load `.assetval.json` from the project root, or defaults when absent.
pub fn load_config(project_root: &Path) -> Result<ScanConfig> {
    let path = project_root.join(CONFIG_FILE_REL);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ScanConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read config {}", path.display()));
        }
    };
    let config: ScanConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(normalize_config(config))
}

/// Apply CLI overrides on top of a loaded config.
pub fn apply_overrides(mut config: ScanConfig, overrides: &ConfigOverrides) -> ScanConfig {
    if let Some(manifest) = overrides.manifest.as_ref() {
        config.manifest = manifest.clone();
    }
    if !overrides.extensions.is_empty() {
        config.extensions = overrides.extensions.clone();
    }
    if !overrides.exclude_dirs.is_empty() {
        config.exclude_dirs = overrides.exclude_dirs.clone();
    }
    normalize_config(config)
}

fn normalize_config(mut config: ScanConfig) -> ScanConfig {
    config.manifest = config.manifest.trim().to_string();
    config.extensions = config
        .extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .collect();
    config.exclude_dirs = config
        .exclude_dirs
        .iter()
        .map(|dir| dir.trim().trim_end_matches('/').to_string())
        .collect();
    config
}

/// Validate schema version and user-provided paths.
pub fn validate_config(config: &ScanConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.manifest.is_empty() {
        return Err(anyhow!("manifest must be non-empty"));
    }
    validate_relative_path(&config.manifest, "manifest")?;
    if config.extensions.is_empty() {
        return Err(anyhow!("extensions must list at least one extension"));
    }
    for ext in &config.extensions {
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(anyhow!("invalid source extension {ext:?}"));
        }
    }
    for dir in &config.exclude_dirs {
        let mut components = Path::new(dir).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single {
            return Err(anyhow!(
                "exclude_dirs entries must be a single directory name (got {dir:?})"
            ));
        }
    }
    Ok(())
}

fn validate_relative_path(rel: &str, label: &str) -> Result<()> {
    let path = Path::new(rel);
    if path.is_absolute() {
        return Err(anyhow!("{label} must be a relative path (got {rel:?})"));
    }
    if path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(anyhow!("{label} must not contain '..' (got {rel:?})"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
