// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use festfeed::app_config::{self, Config};
use festfeed::app_controller::{Controller, write_page};
use festfeed::language_utils::get_language_name;
use festfeed::view::render::NoteOrder;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the feed and render the page (default command)
    Render(RenderArgs),

    /// Fetch and parse the feed, then print entry counts
    Check,

    /// Generate shell completions for festfeed
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct RenderArgs {
    /// Feed URL (overrides the configured one)
    #[arg(short, long)]
    url: Option<String>,

    /// Shuffle culture notes
    #[arg(long)]
    shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    /// Look up images for notes without one
    #[arg(short, long)]
    images: bool,

    /// Write the page to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// festfeed - Festival feed renderer
///
/// Loads the festival XML feed and renders the program list and culture
/// notes into a bilingual HTML page.
#[derive(Parser, Debug)]
#[command(name = "festfeed")]
#[command(version)]
#[command(about = "Festival feed renderer")]
#[command(long_about = "festfeed loads a festival's XML feed and renders its stage program and culture notes.

EXAMPLES:
    festfeed                                    # Render using default config
    festfeed -o index.html                      # Write the page to a file
    festfeed --shuffle --seed 7                 # Reproducible note order
    festfeed --images                           # Fill missing note images from image search
    festfeed check --log-level debug            # Validate the feed only
    festfeed completions bash > festfeed.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    render: RenderArgs,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself lets everything through; the max level filters
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "festfeed", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check) => {
            let config = load_config(&cli.config_path, cli.log_level, &RenderArgs::default())?;
            run_check(config).await
        }
        Some(Commands::Render(args)) => {
            let config = load_config(&cli.config_path, cli.log_level, &args)?;
            run_render(config, args.output).await
        }
        None => {
            let config = load_config(&cli.config_path, cli.log_level, &cli.render)?;
            run_render(config, cli.render.output).await
        }
    }
}

/// Load or create the configuration, apply CLI overrides and validate it
fn load_config(config_path: &str, log_level: Option<CliLogLevel>, args: &RenderArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(config_path)?;

    if let Some(url) = &args.url {
        config.feed.url = url.clone();
    }
    if args.shuffle {
        config.notes.order = NoteOrder::Shuffled;
    }
    if let Some(seed) = args.seed {
        config.notes.seed = Some(seed);
    }
    if args.images {
        config.image_search.enabled = true;
    }
    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;

    // Config level applies unless the command line already set one
    log::set_max_level(config.log_level.to_level_filter());

    if config.image_search.enabled && config.image_search.api_key.is_empty() {
        warn!("Image search is enabled without an API key; lookups may be rejected");
    }

    Ok(config)
}

fn fetch_spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(format!("Fetching {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn run_render(config: Config, output: Option<PathBuf>) -> Result<()> {
    let start_time = std::time::Instant::now();
    let spinner = fetch_spinner(&config.feed.url);

    let mut controller = Controller::with_config(config)?;
    let mut page = controller.build_page();
    let report = controller.run(&mut page).await;
    spinner.finish_and_clear();

    match &output {
        Some(path) => {
            write_page(&page, path).context(format!("Failed to write page to file: {}", path.display()))?;
        }
        None => {
            let html = page.to_html();
            let mut stdout = std::io::stdout();
            stdout.write_all(html.as_bytes()).context("Failed to write page to stdout")?;
            stdout.flush()?;
        }
    }

    match report.error {
        Some(e) => Err(anyhow!("Feed could not be loaded: {}", e)),
        None => {
            info!(
                "Rendered {} program item(s), {} culture note(s), {} image(s) found in {:.2?}",
                report.programs,
                report.notes,
                report.images_found,
                start_time.elapsed()
            );
            Ok(())
        }
    }
}

async fn run_check(config: Config) -> Result<()> {
    let spinner = fetch_spinner(&config.feed.url);
    let ui_language = config.page.ui_language.clone();
    let controller = Controller::with_config(config)?;
    let result = controller.check().await;
    spinner.finish_and_clear();

    let (programs, notes) = result.context("Feed check failed")?;
    println!("program items: {}", programs);
    println!("culture notes: {}", notes);
    match get_language_name(&ui_language) {
        Ok(name) => println!("page language: {} ({})", name, ui_language),
        Err(_) => println!("page language: {}", ui_language),
    }
    Ok(())
}
