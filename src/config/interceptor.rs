//! Interceptor and extension catalog configuration
//!
//! - `[interceptor]`: skip policy, attribution markers, renderer set
//! - `[extensions]`: where installed extensions live on disk

use serde::Deserialize;
use std::path::PathBuf;

use crate::interceptor::registry::{
    RegistryOptions, DEFAULT_ELEM_ID_BLACKLIST, DEFAULT_MAX_DEPTH,
};
use crate::interceptor::origin::DEFAULT_PLUGIN_ROOTS;

// ─────────────────────────────────────────────────────────────────────────────
// Interceptor
// ─────────────────────────────────────────────────────────────────────────────

/// Interceptor settings
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Activate the registry at startup
    pub enabled: bool,
    /// Maximum open-container nesting per extension
    pub max_depth: usize,
    /// `elem_id` fragments that mark help/documentation panels (case-insensitive)
    pub elem_id_blacklist: Vec<String>,
    /// Directory names that hold plugins in call-context paths
    pub plugin_roots: Vec<String>,
    /// Component types the frontend renders beyond the built-in set
    pub extra_supported_types: Vec<String>,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_depth: DEFAULT_MAX_DEPTH,
            elem_id_blacklist: DEFAULT_ELEM_ID_BLACKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            plugin_roots: DEFAULT_PLUGIN_ROOTS.iter().map(|s| s.to_string()).collect(),
            extra_supported_types: Vec::new(),
        }
    }
}

/// Interceptor settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileInterceptor {
    pub enabled: Option<bool>,
    pub max_depth: Option<usize>,
    pub elem_id_blacklist: Option<Vec<String>>,
    pub plugin_roots: Option<Vec<String>>,
    pub extra_supported_types: Option<Vec<String>>,
}

impl InterceptorConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileInterceptor>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: file.enabled.unwrap_or(defaults.enabled),
            max_depth: file.max_depth.unwrap_or(defaults.max_depth),
            elem_id_blacklist: file
                .elem_id_blacklist
                .unwrap_or(defaults.elem_id_blacklist),
            plugin_roots: file.plugin_roots.unwrap_or(defaults.plugin_roots),
            extra_supported_types: file
                .extra_supported_types
                .unwrap_or(defaults.extra_supported_types),
        }
    }

    /// Registry tunables derived from these settings
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            max_depth: self.max_depth,
            elem_id_blacklist: self.elem_id_blacklist.clone(),
            plugin_roots: self.plugin_roots.clone(),
            extra_supported_types: self.extra_supported_types.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extension Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// Where installed extensions are discovered
#[derive(Debug, Clone)]
pub struct ExtensionsConfig {
    /// Directories whose subdirectories are extensions
    pub dirs: Vec<PathBuf>,
    /// Extension names the host has disabled
    pub disabled: Vec<String>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            dirs: vec![
                PathBuf::from("./extensions"),
                PathBuf::from("./extensions-builtin"),
            ],
            disabled: Vec::new(),
        }
    }
}

/// Extension catalog settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileExtensions {
    pub dirs: Option<Vec<String>>,
    pub disabled: Option<Vec<String>>,
}

impl ExtensionsConfig {
    /// Create from file config; an environment override replaces all directories
    pub fn from_file(file: Option<FileExtensions>, env_dir: Option<PathBuf>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let dirs = match (env_dir, file.dirs) {
            (Some(dir), _) => vec![dir],
            (None, Some(dirs)) => dirs.into_iter().map(PathBuf::from).collect(),
            (None, None) => defaults.dirs,
        };

        Self {
            dirs,
            disabled: file.disabled.unwrap_or(defaults.disabled),
        }
    }
}
