use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use richpost_config::Config;
use richpost_engine::{
    Document, DeliveryOptions, PunctuationSplitter, SpanRecord, prepare_for_delivery,
};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "richpost", version, about = "Edit and deliver marked-up posts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the plain text and spans of a marked-up post as JSON.
    Parse {
        /// Markup file; stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Render plain text plus a JSON span list back to markup.
    Render {
        /// JSON array of span records.
        #[arg(long)]
        spans: PathBuf,
        /// Plain text file; stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Clean up a post (invisible characters, blank lines, bullets).
    Clear { input: Option<PathBuf> },
    /// Append the delivery sections and cut the post to the configured budget.
    Prepare {
        /// Text of the "more info" section.
        #[arg(long)]
        more_info: Option<String>,
        /// Config file; defaults to ~/.config/richpost/config.toml.
        #[arg(long)]
        config: Option<PathBuf>,
        input: Option<PathBuf>,
    },
    /// Write a config file holding the default settings.
    InitConfig {
        /// Where to write; defaults to ~/.config/richpost/config.toml.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct ParsedPost {
    plain: String,
    spans: Vec<SpanRecord>,
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match loaded {
        Some(config) => Ok(config),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn delivery_options(config: &Config) -> DeliveryOptions {
    let delivery = &config.delivery;
    DeliveryOptions {
        preferred_len: delivery.preferred_len,
        max_len: delivery.max_len,
        language: delivery.language.clone(),
        more_info_title: delivery.more_info_title.clone(),
        more_info_placeholder: delivery.more_info_placeholder.clone(),
        truncation_notice: delivery.truncation_notice.clone(),
        promo: delivery.promo(),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse { input } => {
            let doc = Document::from_markup(&read_input(input.as_deref())?);
            let parsed = ParsedPost {
                plain: doc.plain(),
                spans: doc.span_records(),
            };
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Render { spans, input } => {
            let plain = read_input(input.as_deref())?;
            let spans_json = std::fs::read_to_string(&spans)
                .with_context(|| format!("failed to read {}", spans.display()))?;
            let doc = Document::from_plain_and_json(&plain, &spans_json)?;
            println!("{}", doc.to_markup());
        }
        Command::Clear { input } => {
            let doc = Document::from_markup(&read_input(input.as_deref())?);
            println!("{}", doc.clear().to_markup());
        }
        Command::Prepare {
            more_info,
            config,
            input,
        } => {
            let config = load_config(config.as_deref())?;
            let options = delivery_options(&config);
            let doc = Document::from_markup(&read_input(input.as_deref())?);
            let post = prepare_for_delivery(
                &doc,
                more_info.as_deref(),
                &options,
                &PunctuationSplitter,
            )?;
            log::info!("Prepared post: {} units of markup", post.markup_len());
            println!("{}", post.to_markup());
        }
        Command::InitConfig { config, force } => {
            let target = config.clone().unwrap_or_else(Config::config_path);
            if target.exists() && !force {
                bail!(
                    "config file {} already exists, pass --force to replace it",
                    target.display()
                );
            }
            let defaults = Config::default();
            match config {
                Some(path) => defaults.save_to_path(&path)?,
                None => defaults.save()?,
            }
            log::info!("Wrote default config to {}", target.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    run(Cli::parse())
}
