//! First-link Wikipedia game player.
//!
//! `play` runs a single game and prints its step trace, `batch` runs every
//! record of an input file and writes a report, `first-link` inspects a saved
//! article page offline, and `init-config` writes the default config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use scraper::Html;
use wikigame::batch::run_batch_file;
use wikigame::core::batch_format::format_result;
use wikigame::core::extractor::first_link;
use wikigame::core::styles::MarkupStyles;
use wikigame::core::types::{GameRequest, StepEvent, StepKind};
use wikigame::exit_codes;
use wikigame::game::GameEngine;
use wikigame::io::batch_file::ReportFormat;
use wikigame::io::config::{GameConfig, init_config, load_config};
use wikigame::io::fetcher::HttpFetcher;
use wikigame::logging;

#[derive(Parser)]
#[command(
    name = "wikigame",
    version,
    about = "Follow first links through Wikipedia until the target or a circle"
)]
struct Cli {
    /// TOML config file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "wikigame.toml")]
    config: PathBuf,

    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a single game and print every visited article.
    Play {
        /// Start article title (default from config: `Special:Random`).
        #[arg(long)]
        start: Option<String>,
        /// Target article title (default from config: `Philosophy`).
        #[arg(long)]
        target: Option<String>,
        /// Wikipedia language code (default from config: `en`).
        #[arg(long)]
        language: Option<String>,
        /// Give up after this many link follows.
        #[arg(long)]
        max_steps: Option<u32>,
        /// Print the result as JSON instead of the step trace.
        #[arg(long)]
        json: bool,
    },
    /// Run each `start|target|language` record of a file and write a report.
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Give up on a record after this many link follows.
        #[arg(long)]
        max_steps: Option<u32>,
    },
    /// Print the first qualifying link of a saved article HTML file.
    FirstLink { file: PathBuf },
    /// Write a config file with the default settings to `--config`.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Play {
            start,
            target,
            language,
            max_steps,
            json,
        } => {
            let config = load_with_overrides(&cli.config, max_steps)?;
            let defaults = config.defaults.request();
            let request = GameRequest {
                start_title: start.unwrap_or(defaults.start_title),
                target_title: target.unwrap_or(defaults.target_title),
                language: language.unwrap_or(defaults.language),
            };
            cmd_play(config, &request, json)
        }
        Command::Batch {
            input,
            output,
            format,
            max_steps,
        } => {
            let config = load_with_overrides(&cli.config, max_steps)?;
            let fetcher = HttpFetcher::new(&config)?;
            let mut engine = GameEngine::new(fetcher, config);
            let results = run_batch_file(&mut engine, &input, &output, format, |_, result| {
                print!("{}", format_result(result));
            })?;
            eprintln!("wrote {} results to {}", results.len(), output.display());
            Ok(exit_codes::OK)
        }
        Command::FirstLink { file } => cmd_first_link(&file),
        Command::InitConfig { force } => {
            init_config(&cli.config, force)?;
            println!("wrote {}", cli.config.display());
            Ok(exit_codes::OK)
        }
    }
}

fn load_with_overrides(path: &Path, max_steps: Option<u32>) -> Result<GameConfig> {
    let mut config = load_config(path)?;
    if max_steps.is_some() {
        config.max_steps = max_steps;
    }
    config.validate().context("apply command line overrides")?;
    Ok(config)
}

fn cmd_play(config: GameConfig, request: &GameRequest, json: bool) -> Result<i32> {
    let fetcher = HttpFetcher::new(&config)?;
    let mut engine = GameEngine::new(fetcher, config);
    let result = engine.run_game_with(request, |event| {
        if !json {
            print_step(event);
        }
    });
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("serialize result")?
        );
    } else {
        print!("{}", format_result(&result));
    }
    Ok(exit_codes::for_result(&result))
}

fn print_step(event: &StepEvent) {
    let branch = match event.kind {
        StepKind::Start => "",
        StepKind::Visit => "├─ ",
        StepKind::Finish => "└─ ",
    };
    println!(
        "{:3} {branch}{} ({})",
        event.step, event.article.title, event.article.url
    );
}

fn cmd_first_link(file: &Path) -> Result<i32> {
    let html = fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
    let document = Html::parse_document(&html);
    let candidate = first_link(&document, &MarkupStyles)
        .with_context(|| format!("extract link from {}", file.display()))?;
    match candidate {
        Some(candidate) => {
            println!("{}", candidate.href);
            Ok(exit_codes::OK)
        }
        None => {
            eprintln!("no qualifying link in {}", file.display());
            Ok(exit_codes::NO_LINK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_play_defaults() {
        let cli = Cli::parse_from(["wikigame", "play"]);
        assert_eq!(cli.config, PathBuf::from("wikigame.toml"));
        assert!(matches!(
            cli.command,
            Command::Play {
                start: None,
                target: None,
                language: None,
                max_steps: None,
                json: false,
            }
        ));
    }

    #[test]
    fn parse_play_with_overrides() {
        let cli = Cli::parse_from([
            "wikigame",
            "-vv",
            "play",
            "--start",
            "Albert Einstein",
            "--language",
            "de",
            "--max-steps",
            "40",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Play {
                start,
                language,
                max_steps,
                ..
            } => {
                assert_eq!(start.as_deref(), Some("Albert Einstein"));
                assert_eq!(language.as_deref(), Some("de"));
                assert_eq!(max_steps, Some(40));
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn parse_batch_format() {
        let cli = Cli::parse_from([
            "wikigame",
            "batch",
            "--input",
            "input.txt",
            "--output",
            "output.json",
            "--format",
            "json",
            "--config",
            "custom.toml",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(
            cli.command,
            Command::Batch {
                format: ReportFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn parse_init_config_force() {
        let cli = Cli::parse_from(["wikigame", "init-config", "--force"]);
        assert!(matches!(cli.command, Command::InitConfig { force: true }));
    }

    #[test]
    fn zero_max_steps_override_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_with_overrides(&temp.path().join("missing.toml"), Some(0)).unwrap_err();
        assert!(format!("{err:#}").contains("max_steps"));
    }
}
