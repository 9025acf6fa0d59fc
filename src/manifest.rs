//! Addon manifest: the metadata descriptor the loader consumes at install
//! time.
//!
//! The manifest names the addon, declares its dependencies and behavior
//! flags, and lists the data files to load in order. Order matters:
//! access-rule files must come before the view files that reference the
//! permissions they grant, and [`AddonManifest::validate`] rejects a
//! manifest that lists them the other way round.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// What kind of data file a manifest entry refers to, judged by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFileKind {
    /// Tabular access rules (`.csv`), loaded into the access table.
    AccessRules,
    /// Declarative UI descriptor (`.xml`), validated for presence only.
    View,
    Other,
}

impl DataFileKind {
    pub fn of(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("csv") => DataFileKind::AccessRules,
            Some("xml") => DataFileKind::View,
            _ => DataFileKind::Other,
        }
    }
}

/// Addon metadata descriptor, deserialized from `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonManifest {
    /// Display name shown in an apps listing.
    pub name: String,
    /// Addon version string.
    pub version: String,
    /// Short description for listings.
    pub summary: String,
    /// Long description.
    pub description: String,
    pub author: String,
    pub website: String,
    pub category: String,
    /// License identifier. Required.
    pub license: String,
    /// Addons this one requires. Must include `"base"`.
    pub depends: Vec<String>,
    /// Data files to load at install time, in order.
    pub data: Vec<String>,
    /// Demo data files, loaded only on demo installs. Never loaded here.
    pub demo: Vec<String>,
    /// Whether the addon can be installed at all.
    pub installable: bool,
    /// Whether the addon is a full application rather than a small module.
    pub application: bool,
    /// Install automatically once all dependencies are present.
    pub auto_install: bool,
}

impl Default for AddonManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            summary: String::new(),
            description: String::new(),
            author: String::new(),
            website: String::new(),
            category: "Uncategorized".to_string(),
            license: String::new(),
            depends: Vec::new(),
            data: Vec::new(),
            demo: Vec::new(),
            installable: true,
            application: false,
            auto_install: false,
        }
    }
}

impl AddonManifest {
    /// Reads and validates a manifest from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Manifest(format!("cannot read manifest {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parses and validates a manifest from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, StoreError> {
        let manifest: AddonManifest = serde_json::from_str(content)
            .map_err(|e| StoreError::Manifest(format!("invalid manifest JSON: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks the manifest invariants: identity fields present, `base` in
    /// the dependency list, and access-rule files listed before view files.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Manifest("manifest name is required".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(StoreError::Manifest(
                "manifest version is required".to_string(),
            ));
        }
        if self.license.trim().is_empty() {
            return Err(StoreError::Manifest(
                "manifest license is required".to_string(),
            ));
        }
        if !self.depends.iter().any(|d| d == "base") {
            return Err(StoreError::Manifest(
                "manifest must depend on 'base'".to_string(),
            ));
        }

        let mut seen_view = false;
        for file in &self.data {
            match DataFileKind::of(file) {
                DataFileKind::View => seen_view = true,
                DataFileKind::AccessRules if seen_view => {
                    return Err(StoreError::Manifest(format!(
                        "access-rule file '{file}' must be listed before view files"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Data files of one kind, in manifest order.
    pub fn data_files(&self, kind: DataFileKind) -> Vec<&str> {
        self.data
            .iter()
            .filter(|f| DataFileKind::of(f) == kind)
            .map(String::as_str)
            .collect()
    }
}
