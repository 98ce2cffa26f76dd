#![forbid(unsafe_code)]

mod cli;
mod color;
mod config;
mod configurator;
mod constants;
mod effects;
mod gui;
mod ipc;
mod overlay;
mod render;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

use config::{Field, ModuleName};

#[derive(Parser)]
#[command(name = "crosshair-overlay")]
#[command(about = "Screen crosshair overlay with a live configurator")]
#[command(version)]
struct Cli {
    /// Config file read and watched by the overlay
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the configurator window (default)
    Gui,
    /// Run the crosshair overlay
    Overlay,
    /// Print the stored settings as JSON
    Show,
    /// Change one setting, e.g. `set size 30` or `set opacity 50%`
    Set { field: String, value: String },
    /// Flip a module: dynamicColor, outline, centerDot, pulsing
    Toggle { module: String },
    /// Restore the default settings
    Reset,
    /// Print the draw commands for the stored settings
    Render,
}

fn main() -> Result<()> {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::config_path);

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => gui::run_gui(config_path),
        Command::Overlay => overlay::run_overlay(config_path),
        Command::Show => cli::show(config_path),
        Command::Set { field, value } => cli::set(config_path, field.parse::<Field>()?, &value),
        Command::Toggle { module } => cli::toggle(config_path, module.parse::<ModuleName>()?),
        Command::Reset => cli::reset(config_path),
        Command::Render => cli::render_loaded(config_path),
    }
}
