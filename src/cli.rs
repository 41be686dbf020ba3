use std::{
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};

mod menu;
mod prompt;
mod terminal;

use anyhow::Context;
use catalog::{ColorChoice, Config};
use clap::ArgAction;
use menu::Menu;
use prompt::{LinePrompter, TerminalPrompter};
use terminal::Palette;
use tracing::instrument;

/// Configuration file read from the working directory when `--config` is not
/// given.
const DEFAULT_CONFIG: &str = "catalog.toml";

/// Parse a color choice, accepting any letter case.
fn parse_color(s: &str) -> Result<ColorChoice, String> {
    s.parse()
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    ///
    /// Defaults to 'catalog.toml' in the working directory, if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// When to color output: auto, always or never
    ///
    /// Overrides the 'color' key of the configuration file.
    #[arg(long, value_parser = parse_color)]
    color: Option<ColorChoice>,

    /// Read plain lines from stdin instead of interactive prompts
    #[arg(long)]
    plain: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = load_config(self.config.as_deref())?;
        if let Some(color) = self.color {
            config.color = color;
        }
        let palette = Palette::detect(config.color);

        if self.plain || !io::stdin().is_terminal() {
            tracing::debug!("using line prompts");
            let prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
            Menu::new(prompter, io::stdout(), &config, palette).run()
        } else {
            let prompter = TerminalPrompter::new(palette.is_enabled());
            Menu::new(prompter, io::stdout(), &config, palette).run()
        }
    }

    /// Sends logs to stderr at the level chosen by `-v`, refined by
    /// `RUST_LOG`.
    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(log_level(verbosity).into());

        // stdout carries the menu
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Maps the `-v` count to the most verbose level logged.
const fn log_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Loads the configuration from `path`, or from [`DEFAULT_CONFIG`] if it
/// exists, falling back to defaults.
#[instrument]
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => {
            tracing::debug!("no config file, using defaults");
            return Ok(Config::default());
        }
    };

    let config = Config::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}
