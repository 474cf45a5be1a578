use adw::prelude::*;
use anyhow::{Context, Result};
use clap::Parser;
use escape_dialog::config::user::{self, Config};
use escape_dialog::config::APP_ID;
use escape_dialog::ui::app::{self, DialogRequest};
use escape_dialog::Response;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::cell::Cell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

/// Ask a yes/no question whose "no" button is hard to catch.
///
/// Exits with status 0 when accepted and 1 when rejected.
#[derive(Parser, Debug)]
#[command(name = "escape-dialog", version, about)]
struct Args {
    /// Window title
    #[arg(long, default_value = "Confirm")]
    title: String,

    /// Question shown above the buttons
    #[arg(long, default_value = "Are you sure?")]
    message: String,

    /// Label of the button that stays put
    #[arg(long, default_value = "OK")]
    stay_label: String,

    /// Label of the button that runs away
    #[arg(long, default_value = "Cancel")]
    evade_label: String,

    /// Config file to use instead of ~/.config/escape-dialog/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    SimpleLogger::new()
        .with_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init()
        .context("Failed to initialize logger")?;

    let config_path = args.config.clone().unwrap_or_else(user::config_path);
    if args.config.is_some() && !args.write_config && !config_path.exists() {
        anyhow::bail!("Config file {} does not exist", config_path.display());
    }
    let config = Config::load_from(&config_path);
    info!("Configuration loaded from {}", config_path.display());

    if args.write_config {
        config
            .write_template(&config_path)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        info!("Settings written to {}", config_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let request = DialogRequest {
        title: args.title,
        message: args.message,
        stay_label: args.stay_label,
        evade_label: args.evade_label,
        seed: args.seed,
    };

    let result = Rc::new(Cell::new(None));
    let application = adw::Application::builder().application_id(APP_ID).build();
    app::setup_dialog_ui(&application, request, config, Rc::clone(&result));

    // Arguments were already handled by clap.
    application.run_with_args::<&str>(&[]);

    Ok(match result.get() {
        Some(Response::Accepted) => ExitCode::SUCCESS,
        Some(Response::Rejected) | None => ExitCode::from(1),
    })
}
