//! totp-generator - Keyring TOTP Generator
//!
//! Generates TOTP codes for named services and keeps the shared secrets in
//! the system keyring.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use totp_core::config::toml_config;
use totp_core::error::CoreError;
use totp_core::manager::CredentialManager;
use totp_core::{init_logging, LevelFilter};
use tracing::debug;

use cli::generate::GenerateOptions;
use cli::AppContext;

mod cli;
mod platform;

const PROGNAME: &str = "Keyring TOTP Generator";

#[derive(Parser)]
#[command(name = "totp-generator")]
#[command(about = "Keyring TOTP Generator\n\nUtility that generates TOTP codes and stores the TOTP secrets in your system keyring.")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Add a TOTP service
    #[arg(short, long)]
    add: bool,

    /// Copy TOTP code to clipboard after generating
    #[arg(short, long)]
    copy: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Edit a TOTP service
    #[arg(short, long)]
    edit: bool,

    /// Export all credentials to a plain text JSON file
    #[arg(long = "export", value_name = "FILE")]
    export_file: Option<PathBuf>,

    /// Import a JSON dump of credentials
    #[arg(long = "import", value_name = "FILE")]
    import_file: Option<PathBuf>,

    /// List TOTP services
    #[arg(short, long)]
    list: bool,

    /// Remove a TOTP service
    #[arg(short, long)]
    remove: bool,

    /// Specify a TOTP service instead of picking from a list
    #[arg(short, long, value_name = "NAME")]
    service: Option<String>,

    /// Show version and exit
    #[arg(short = 'v', long)]
    version: bool,

    /// With --copy, do not print the code; with --service, print only the code
    #[arg(short, long)]
    quiet: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

enum Action {
    Version,
    Add,
    Remove,
    Edit,
    Import(PathBuf),
    Export(PathBuf),
    List,
    Generate(GenerateOptions),
}

impl Cli {
    /// The single action to run; earlier flags win when several are given
    fn action(&self) -> Action {
        if self.version {
            Action::Version
        } else if self.add {
            Action::Add
        } else if self.remove {
            Action::Remove
        } else if self.edit {
            Action::Edit
        } else if let Some(path) = &self.import_file {
            Action::Import(path.clone())
        } else if let Some(path) = &self.export_file {
            Action::Export(path.clone())
        } else if self.list {
            Action::List
        } else {
            Action::Generate(GenerateOptions {
                service: self.service.clone(),
                copy: self.copy,
                quiet: self.quiet,
            })
        }
    }
}

fn version_string() -> String {
    format!("{} version {}", PROGNAME, env!("CARGO_PKG_VERSION"))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    if let Err(e) = init_logging(level, cli.debug) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    // Keyring unlock prompts name the requesting process
    platform::title::select_title().set("totp-generator");
    platform::interrupt::install_interrupt_handler();

    let result = run(&cli);

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool, CoreError> {
    let action = cli.action();
    if let Action::Version = action {
        println!("{}", version_string());
        return Ok(true);
    }

    let settings = match &cli.config {
        Some(path) => toml_config::load_settings_from_path(path)?,
        None => toml_config::load_settings()?,
    };
    let context = AppContext {
        clipboard: platform::clipboard::select_clipboard(&settings.clipboard),
        settings,
    };

    let mut manager = CredentialManager::from_settings(&context.settings)?;
    debug!(
        "Credential store that will be used: {}",
        manager.store_name()
    );

    let mut console = cli::console::stdio();

    match action {
        Action::Version => Ok(true),
        Action::Add => cli::service::run_add(&mut manager, &mut console),
        Action::Remove => cli::service::run_remove(&mut manager, &mut console),
        Action::Edit => cli::service::run_edit(&mut manager, &mut console),
        Action::Import(path) => cli::transfer::run_import(&mut manager, &mut console, &path),
        Action::Export(path) => cli::transfer::run_export(&manager, &mut console, &path),
        Action::List => cli::service::run_list(&manager, &mut console),
        Action::Generate(options) => cli::generate::run_generate(
            &manager,
            &mut console,
            context.clipboard.as_ref(),
            &options,
        ),
    }
}
