//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Render a string list as a TOML inline array
fn toml_array<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("\"{}\"", s.as_ref().replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let extension_dirs: Vec<String> = self
            .extensions
            .dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect();

        format!(
            r#"# translayer configuration

# HTTP facade bind address (TRANSLAYER_BIND overrides)
bind_addr = "{bind}"

# ─────────────────────────────────────────────────────────────────────────────
# COMPONENT INTERCEPTOR
# ─────────────────────────────────────────────────────────────────────────────
# Records the host UI layout as it is constructed and attributes every
# component to the extension that created it.

[interceptor]
enabled = {enabled}
# Containers nested deeper than this (per extension) are not tracked
max_depth = {max_depth}
# Components whose elem_id contains one of these (case-insensitive) are skipped
elem_id_blacklist = {blacklist}
# Path segments that mark an extension directory in a call context
plugin_roots = {plugin_roots}
# Component types the frontend renders in addition to the built-in set
extra_supported_types = {extra_types}

# ─────────────────────────────────────────────────────────────────────────────
# INSTALLED EXTENSIONS
# ─────────────────────────────────────────────────────────────────────────────
# Each subdirectory of these directories is listed as an extension.
# TRANSLAYER_EXTENSIONS_DIR replaces the list with a single directory.

[extensions]
dirs = {ext_dirs}
disabled = {disabled}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            bind = self.bind_addr,
            enabled = self.interceptor.enabled,
            max_depth = self.interceptor.max_depth,
            blacklist = toml_array(&self.interceptor.elem_id_blacklist),
            plugin_roots = toml_array(&self.interceptor.plugin_roots),
            extra_types = toml_array(&self.interceptor.extra_supported_types),
            ext_dirs = toml_array(&extension_dirs),
            disabled = toml_array(&self.extensions.disabled),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
