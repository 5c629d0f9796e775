use anyhow::{Context, Result};
use clap::Parser;
use toastr::cli::Cli;
use tracing_appender::non_blocking::WorkerGuard;

/// Initialize tracing, to `log_file` when given and stderr otherwise
fn init_logging(log_file: Option<&std::path::Path>) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let log_dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    let file_name = log_file
        .file_name()
        .context("Log file path has no file name")?;

    // Write to file
    let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let guard = init_logging(cli.log_file.as_deref())?;

    let result = cli.execute();

    // Flush buffered log lines before exiting
    drop(guard);

    result
}
