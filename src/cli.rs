// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the interactive TUI starts. Subcommands:
// - list: print one page of the catalog (headless)
// - fields: print the distinct values of a field (headless)
// - config --show/--path/--reset: configuration management

use crate::api::models::Field;
use crate::config::{Config, VERSION};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// Catalog browser - terminal client for a remote product catalog
#[derive(Parser)]
#[command(name = "catalog")]
#[command(version = VERSION)]
#[command(about = "Browse and filter a remote product catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of products with their details
    List(ListArgs),

    /// Print the distinct values of a field (field names when omitted)
    Fields {
        /// product, price or brand
        field: Option<Field>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Page and filter for `list`
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u64,

    /// Filter by product name
    #[arg(long)]
    pub product: Option<String>,

    /// Filter by price
    #[arg(long)]
    pub price: Option<String>,

    /// Filter by brand
    #[arg(long)]
    pub brand: Option<String>,
}

/// What to run after argument parsing
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Tui,
    List(ListArgs),
    Fields(Option<Field>),
}

/// Parse arguments and run config commands
///
/// Returns None when a config command was handled (exit after).
pub fn handle_cli() -> Option<Mode> {
    mode_for(Cli::parse())
}

fn mode_for(cli: Cli) -> Option<Mode> {
    match cli.command {
        None => Some(Mode::Tui),
        Some(Commands::List(args)) => Some(Mode::List(args)),
        Some(Commands::Fields { field }) => Some(Mode::Fields(field)),
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                println!("Usage: catalog config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            None
        }
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("api_url = {:?}", config.api_url);
    println!("password = \"{}\"", redact(&config.password));
    println!("request_timeout_secs = {}", config.request_timeout_secs);
    println!("theme = {:?}", config.theme);
    println!("tui = {}", config.enable_tui);
    println!();
    println!("[catalog]");
    println!("page_size = {}", config.catalog.page_size);
    println!("detail_concurrency = {}", config.catalog.detail_concurrency);
    println!("count_strategy = {:?}", config.catalog.count_strategy.as_str());
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

/// Keep the first and last character of a secret
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => String::new(),
        1..=3 => "*".repeat(chars.len()),
        n => format!("{}{}{}", chars[0], "*".repeat(n - 2), chars[n - 1]),
    }
}
