// Startup module - displays banner and module loading status
//
// Printed once the registry and catalog are initialized so the status
// reflects what actually came up, then mirrored into the log.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
#[derive(Debug, Clone)]
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

/// What came up during initialization
#[derive(Debug, Clone, Default)]
pub struct StartupReport {
    /// Registry accepted registrations at startup
    pub interceptor_active: bool,
    /// Extensions found on disk, `None` when the scan failed
    pub installed_extensions: Option<usize>,
    /// Components captured by the demo layout
    pub demo_components: Option<usize>,
}

/// Status of all modules based on config and initialization results
pub fn module_status(config: &Config, report: &StartupReport) -> Vec<ModuleStatus> {
    let mut modules = vec![
        ModuleStatus {
            name: "api",
            enabled: true, // Core, always on
            description: "HTTP facade".to_string(),
        },
        ModuleStatus {
            name: "interceptor",
            enabled: report.interceptor_active,
            description: format!("Component capture (max depth {})", config.interceptor.max_depth),
        },
        ModuleStatus {
            name: "extensions",
            enabled: report.installed_extensions.is_some(),
            description: match report.installed_extensions {
                Some(n) => format!("{} installed", n),
                None => "Scan failed".to_string(),
            },
        },
        ModuleStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: "JSON log files".to_string(),
        },
    ];

    // Demo layout: only show when requested
    if config.demo_mode {
        modules.push(ModuleStatus {
            name: "demo",
            enabled: report.demo_components.is_some(),
            description: format!(
                "Scripted layout ({} components)",
                report.demo_components.unwrap_or(0)
            ),
        });
    }

    modules
}

/// Print the startup banner and module loading status
pub fn print_startup(config: &Config, report: &StartupReport) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}translayer{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Component tree capture for extension UIs{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Loading modules...{RESET}");
    for module in &module_status(config, report) {
        print_module_status(module);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} API listening on {BOLD}http://{}/translation-layer{RESET}",
        config.bind_addr
    );
    if config.demo_mode {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(scripted layout){RESET}");
    }
    println!();
}

/// Print a single module's status
fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Mirror the startup status into the log
pub fn log_startup(config: &Config, report: &StartupReport) {
    tracing::info!("translayer v{}", VERSION);

    for module in &module_status(config, report) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    tracing::info!("▸ Listening on {}", config.bind_addr);
}
