mod cli;
mod tui;

use cli::{USAGE, parse_cli_options};
use sheetcal::{SelectionMode, storage::config::Config};

fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return Ok(());
        }
    };

    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_create()?,
    };
    if options.range {
        config.calendar.mode = SelectionMode::Range;
    }

    let form = tui::run_tui(&config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&form)?);
    }
    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "sheetcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("sheetcal started");
}
