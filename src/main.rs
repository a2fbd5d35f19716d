use std::fs::File;
use std::ops::ControlFlow;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use tessel::core::config::{self, CliOverrides};
use tessel::gallery::{self, Demo};
use tessel::tui::{self, Effect, KeyBinding, KeyMap, Theme};

#[derive(Parser)]
#[command(name = "tessel", about = "Browse the tessel primitive gallery")]
struct Args {
    /// Screen to open first (list, list2, actions, ...)
    #[arg(short, long)]
    screen: Option<String>,

    /// Config file to use instead of ~/.tessel/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> tessel::Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            initial_screen: args.screen.as_deref(),
            log_level: args.log_level.as_deref(),
        },
    )?;

    // Log to a file; the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    let initial = match resolved.initial_screen.as_deref() {
        Some(name) => name.parse::<Demo>()?,
        None => Demo::List,
    };
    let mut keys = KeyMap::from_config(&resolved)?;
    if keys.exit.is_none() {
        keys.exit = Some(KeyBinding::ctrl('c'));
    }
    let theme = Theme::from_config(&resolved.theme)?;

    info!("tessel starting on {initial}");
    let mut runtime = gallery::runtime(initial, keys, theme)?;
    tui::run(&mut runtime, |effect| {
        match effect {
            Effect::Action(name) => info!("Action: {name}"),
            Effect::Link(url) => info!("Link: {url}"),
            other => warn!("Unexpected effect from runtime: {other:?}"),
        }
        ControlFlow::<()>::Continue(())
    })?;
    info!("tessel exited");
    Ok(())
}
