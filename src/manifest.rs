//! Manifest reader for declared assets.
//!
//! Only the `flutter.assets` list is read; every other key in the manifest is
//! ignored. A missing file or key is "no declaration", a YAML syntax error is
//! fatal for the run.
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Nested key path holding the asset list.
pub const ASSETS_KEY_PATH: &[&str] = &["flutter", "assets"];

/// Read the declared asset list from the manifest at `root/manifest_rel`.
///
/// Returns `Ok(None)` when the file, the key path, or a list under it is
/// absent, and `Ok(Some(vec![]))` for an explicitly empty list.
pub fn read_declared_assets(root: &Path, manifest_rel: &str) -> Result<Option<Vec<String>>> {
    let path = root.join(manifest_rel);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "manifest not found");
            return Ok(None);
        }
        Err(err) => return Err(err).with_context(|| format!("read manifest {}", path.display())),
    };
    let document: Value = serde_yaml::from_str(&text)
        .with_context(|| format!("parse manifest YAML {}", path.display()))?;
    Ok(declared_assets_from_value(&document))
}

/// Extract the asset list from an already-parsed manifest document.
pub fn declared_assets_from_value(document: &Value) -> Option<Vec<String>> {
    let mut current = document;
    for key in ASSETS_KEY_PATH {
        current = current.as_mapping()?.get(*key)?;
    }
    let entries = current.as_sequence()?;
    let mut assets = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(asset) => assets.push(asset.clone()),
            other => {
                tracing::warn!(entry = ?other, "skipping non-string asset entry");
            }
        }
    }
    Some(assets)
}
