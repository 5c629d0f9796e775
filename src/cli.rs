use crate::config::{get_config_path, Config};
use crate::host::{EXIT_CLASS, TITLE_CLASS};
use crate::manager::ToastManager;
use crate::script::{Script, Snapshot};
use crate::widgets::toast::render_to_lines;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Play toast notification timelines in the terminal
#[derive(Parser, Debug)]
#[command(name = "toastr", version, about = "Play toast notification timelines in the terminal", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/toastr/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a toast script and print a snapshot after every step
    Play {
        /// Path to the script (TOML)
        script: PathBuf,
        /// Snapshot output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Terminal width for `--format tui`
        #[arg(long, default_value_t = 80)]
        width: u16,
        /// Terminal height for `--format tui`
        #[arg(long, default_value_t = 16)]
        height: u16,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One summary line per toast
    Text,
    /// HTML markup of the host
    Markup,
    /// JSON snapshots, one per line
    Json,
    /// Rendered terminal frames
    Tui,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config_path = self.config.clone().unwrap_or_else(get_config_path);
        match self.command {
            Commands::Play {
                script,
                format,
                width,
                height,
            } => Self::cmd_play(&config_path, &script, format, width, height),
            Commands::Config => Self::cmd_config(&config_path),
        }
    }

    fn cmd_play(
        config_path: &Path,
        script_path: &Path,
        format: OutputFormat,
        width: u16,
        height: u16,
    ) -> Result<()> {
        let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
        let script = Script::load(script_path)?;
        tracing::info!(
            "Playing {:?} ({} steps)",
            script_path,
            script.steps.len()
        );

        ToastManager::init_instance(&config);
        let snapshots = script.play(&mut ToastManager::lock());

        for snapshot in &snapshots {
            match format {
                OutputFormat::Text => print_text(snapshot),
                OutputFormat::Markup => {
                    println!("[{}ms] {}", snapshot.at_ms, snapshot.host.to_markup());
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string(snapshot).context("Failed to serialize snapshot")?
                ),
                OutputFormat::Tui => print_frame(snapshot, width, height),
            }
        }
        Ok(())
    }

    fn cmd_config(config_path: &Path) -> Result<()> {
        let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
        println!("# {}", config_path.display());
        print!("{}", config.to_toml()?);
        Ok(())
    }
}

fn print_text(snapshot: &Snapshot) {
    let current = snapshot
        .current
        .map_or_else(|| "none".to_string(), |id| id.to_string());
    let position = snapshot.host.position().unwrap_or_default();
    println!(
        "[{}ms] {} live, current: {}, host: {}",
        snapshot.at_ms, snapshot.records, current, position
    );
    for node in snapshot.host.toast_nodes() {
        let state = if node.has_class(EXIT_CLASS) {
            "exiting"
        } else {
            "displayed"
        };
        let title = node
            .find_descendant_by_class(TITLE_CLASS)
            .map(|t| t.text_content())
            .unwrap_or_default();
        println!("  {:<9} {}", state, title);
    }
}

fn print_frame(snapshot: &Snapshot, width: u16, height: u16) {
    println!("[{}ms]", snapshot.at_ms);
    println!("+{}+", "-".repeat(width as usize));
    for line in render_to_lines(&snapshot.host, width, height) {
        let padding = (width as usize).saturating_sub(line.chars().count());
        println!("|{}{}|", line, " ".repeat(padding));
    }
    println!("+{}+", "-".repeat(width as usize));
}
