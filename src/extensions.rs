// Extensions module - installed extension discovery
//
// Lists the extensions installed in the configured directories and joins
// them with the registry's compatibility verdicts. Extensions that created
// components without being found on disk (loaded from elsewhere) are
// appended so every attributed name shows up.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::ExtensionsConfig;
use crate::interceptor::{ExtensionCompatibility, InterceptionRegistry};

/// Directory name that holds extensions shipped with the host
const BUILTIN_DIR: &str = "extensions-builtin";

/// An extension directory found on disk
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstalledExtension {
    pub name: String,
    pub path: PathBuf,
    pub builtin: bool,
    pub enabled: bool,
    /// Directory modification time
    pub modified: Option<DateTime<Utc>>,
}

/// Compatibility block attached to each listed extension
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslationLayerInfo {
    pub supported: Option<bool>,
    pub component_types: Vec<String>,
    pub unsupported_types: Vec<String>,
    pub component_count: usize,
}

impl From<ExtensionCompatibility> for TranslationLayerInfo {
    fn from(compat: ExtensionCompatibility) -> Self {
        Self {
            supported: compat.supported,
            component_types: compat.component_types,
            unsupported_types: compat.unsupported_types,
            component_count: compat.component_count,
        }
    }
}

/// One row of the extensions listing
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionEntry {
    pub name: String,
    /// `None` for extensions only known from attribution
    pub path: Option<PathBuf>,
    pub builtin: bool,
    pub enabled: bool,
    pub modified: Option<DateTime<Utc>>,
    pub translation_layer: TranslationLayerInfo,
}

/// Scans extension directories
#[derive(Debug, Clone)]
pub struct ExtensionCatalog {
    dirs: Vec<PathBuf>,
    disabled: BTreeSet<String>,
}

impl ExtensionCatalog {
    pub fn new(config: &ExtensionsConfig) -> Self {
        Self {
            dirs: config.dirs.clone(),
            disabled: config.disabled.iter().cloned().collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Installed extensions, sorted by name
    ///
    /// Missing directories are skipped. When two directories hold the same
    /// name, the first configured one wins.
    pub fn scan(&self) -> Result<Vec<InstalledExtension>> {
        let mut found: Vec<InstalledExtension> = Vec::new();
        let mut seen = BTreeSet::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                tracing::debug!("Extension directory {} not present, skipping", dir.display());
                continue;
            }
            for ext in self.scan_dir(dir)? {
                if seen.insert(ext.name.clone()) {
                    found.push(ext);
                }
            }
        }

        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    fn scan_dir(&self, dir: &Path) -> Result<Vec<InstalledExtension>> {
        let builtin = dir.file_name().is_some_and(|n| n == BUILTIN_DIR);
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read extension directory {}", dir.display()))?;

        let mut out = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to list {}", dir.display()))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            // Hidden directories (.git, __pycache__ leftovers) are not extensions
            if name.starts_with('.') {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Utc>::from);

            out.push(InstalledExtension {
                enabled: !self.disabled.contains(&name),
                name,
                path,
                builtin,
                modified,
            });
        }
        Ok(out)
    }

    /// Join a scan result with the registry's verdicts
    ///
    /// Touches no files, so callers can scan without the registry lock and
    /// hold it only for this step.
    pub fn join(
        &self,
        installed: Vec<InstalledExtension>,
        registry: &InterceptionRegistry,
    ) -> Vec<ExtensionEntry> {
        let mut verdicts = registry.all_extensions_compatibility();

        let mut entries: Vec<ExtensionEntry> = installed
            .into_iter()
            .map(|ext| {
                let compat = verdicts
                    .remove(&ext.name)
                    .unwrap_or_else(|| registry.extension_compatibility(&ext.name));
                ExtensionEntry {
                    name: ext.name,
                    path: Some(ext.path),
                    builtin: ext.builtin,
                    enabled: ext.enabled,
                    modified: ext.modified,
                    translation_layer: compat.into(),
                }
            })
            .collect();

        // Whatever is left was attributed without being found on disk
        entries.extend(verdicts.into_iter().map(|(name, compat)| ExtensionEntry {
            enabled: !self.disabled.contains(&name),
            translation_layer: compat.into(),
            name,
            path: None,
            builtin: false,
            modified: None,
        }));

        entries
    }
}
