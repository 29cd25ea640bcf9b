//! Configuration for the translation layer service
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/translayer/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod interceptor;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use interceptor::{ExtensionsConfig, FileExtensions, FileInterceptor, InterceptorConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address for the HTTP facade
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7870";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP facade to
    pub bind_addr: SocketAddr,

    /// Demo mode: replay a scripted host layout through the hooks at startup
    pub demo_mode: bool,

    /// Registry behaviour
    pub interceptor: InterceptorConfig,

    /// Installed-extension discovery
    pub extensions: ExtensionsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7870)),
            demo_mode: false,
            interceptor: InterceptorConfig::default(),
            extensions: ExtensionsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,

    /// Optional [interceptor] section
    pub interceptor: Option<FileInterceptor>,

    /// Optional [extensions] section
    pub extensions: Option<FileExtensions>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Print a boxed config error and exit
fn config_error(
    title: &str,
    path: &std::path::Path,
    detail: &dyn std::fmt::Display,
    tips: &[&str],
) -> ! {
    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║  CONFIG ERROR - {:<45}║", title);
    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
    eprintln!("  File: {}\n", path.display());
    eprintln!("  Error: {}\n", detail);
    if !tips.is_empty() {
        eprintln!("  Tip: Check for:\n");
        for tip in tips {
            eprintln!("    - {}", tip);
        }
        eprintln!("\n  To reset, run `translayer config --reset`.\n");
    }
    std::process::exit(1);
}

impl Config {
    /// Get the config file path: ~/.config/translayer/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("translayer").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is fatal.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => config_error(
                    "Failed to parse configuration file",
                    &path,
                    &e,
                    &[
                        "Missing quotes around string values",
                        "Invalid boolean values (use true/false)",
                        "Malformed array syntax",
                        "Typos in section names",
                    ],
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => config_error("Cannot read configuration file", &path, &e, &[]),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let env = |key: &str| std::env::var(key).ok();
        match Self::resolve(file, env) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        // Bind address: env > file > default
        let bind_raw = env("TRANSLAYER_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", bind_raw))?;

        // Demo mode: env only (runtime flag)
        let demo_mode = env("TRANSLAYER_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let interceptor = InterceptorConfig::from_file(file.interceptor);
        // Extension directory: env > file > default
        let extensions_dir = env("TRANSLAYER_EXTENSIONS_DIR").map(PathBuf::from);
        let extensions = ExtensionsConfig::from_file(file.extensions, extensions_dir);
        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            bind_addr,
            demo_mode,
            interceptor,
            extensions,
            logging,
        })
    }
}
