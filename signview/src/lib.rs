mod config;
mod tui;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use comfy_table::Table;
use signview_flow::{IndexFlow, Outcome, ReviewError, Screen, StepFlow};
use signview_tx::{Transaction, TxError};
use thiserror::Error;
use tokio::fs::read_to_string;
use tracing::info;

pub use crate::config::{Config, ConfigError, DEFAULT_LOG, HostKind};
use crate::tui::{Session, TuiError, review};

#[derive(Parser, Debug)]
#[command(name = "signview", version, about = "Transaction review simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Cmd,

    #[arg(long = "config", env = "SIGNVIEW_CONFIG", global = true)]
    pub config_path: Option<PathBuf>,

    #[arg(long = "log", env = "SIGNVIEW_LOG", global = true)]
    pub log: Option<String>,

    #[doc = " Allow reviewing arbitrary contract scripts"]
    #[arg(long = "allow-scripts", global = true)]
    pub allow_scripts: bool,
}

impl Cli {
    /// Log filter to use before a config has been loaded.
    pub fn startup_log(&self) -> &str {
        self.log.as_deref().unwrap_or(DEFAULT_LOG)
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    #[doc = " Print every page a host would show"]
    Pages {
        #[doc = " Transaction snapshot (json)"]
        #[arg(long = "tx")]
        tx_path: PathBuf,

        #[arg(long = "host", value_enum)]
        host: Option<HostKind>,
    },
    #[doc = " Review a transaction on a simulated device"]
    Review {
        #[doc = " Transaction snapshot (json)"]
        #[arg(long = "tx")]
        tx_path: PathBuf,

        #[arg(long = "host", value_enum)]
        host: Option<HostKind>,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read transaction file {path}: {source}")]
    ReadTransaction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load transaction file {path}: {source}")]
    ParseTransaction {
        path: PathBuf,
        #[source]
        source: TxError,
    },

    #[error("review refused: {0}")]
    Review(#[from] ReviewError),

    #[error(transparent)]
    Tui(#[from] TuiError),
}

pub async fn get_config(cli: &Cli) -> Result<Config, AppError> {
    let config = Config::load(cli.config_path.as_deref(), cli).await?;
    Ok(config)
}

pub async fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    match cli.command {
        Cmd::Pages { tx_path, host } => {
            cmd_pages(&config, &tx_path, host.unwrap_or(config.host)).await
        }
        Cmd::Review { tx_path, host } => {
            cmd_review(&config, &tx_path, host.unwrap_or(config.host)).await
        }
    }
}

async fn load_transaction(path: &Path) -> Result<Transaction, AppError> {
    let json = read_to_string(path)
        .await
        .map_err(|source| AppError::ReadTransaction {
            path: path.to_owned(),
            source,
        })?;
    Transaction::from_json(&json).map_err(|source| AppError::ParseTransaction {
        path: path.to_owned(),
        source,
    })
}

async fn cmd_pages(config: &Config, tx_path: &Path, host: HostKind) -> Result<(), AppError> {
    let tx = load_transaction(tx_path).await?;
    let rows = match host {
        HostKind::Step => step_rows(&mut StepFlow::new(&tx, &config.settings)?),
        HostKind::Index => index_rows(&mut IndexFlow::new(&tx, &config.settings)?),
    };

    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
        .set_header(vec!["#", "title", "text"]);

    for (index, (title, text)) in rows.iter().enumerate() {
        table.add_row(vec![&index.to_string(), title, text]);
    }

    println!("{table}");
    Ok(())
}

async fn cmd_review(config: &Config, tx_path: &Path, host: HostKind) -> Result<(), AppError> {
    let tx = load_transaction(tx_path).await?;
    let session = match host {
        HostKind::Step => Session::step(StepFlow::new(&tx, &config.settings)?),
        HostKind::Index => Session::index(IndexFlow::new(&tx, &config.settings)?),
    };

    let outcome = review(session).await?;
    info!(?outcome, %host, "review finished");
    match outcome {
        Outcome::Approved => println!("approved"),
        Outcome::Rejected => println!("rejected"),
    }
    Ok(())
}

/// Every screen of a step review, walking `next` from the first step.
fn step_rows(flow: &mut StepFlow<'_>) -> Vec<(String, String)> {
    let mut rows = vec![screen_row(flow.current())];
    while !flow.at_end() {
        flow.next();
        rows.push(screen_row(flow.current()));
    }
    rows
}

fn index_rows(flow: &mut IndexFlow<'_>) -> Vec<(String, String)> {
    (0..flow.len())
        .filter_map(|index| {
            flow.pair(index)
                .map(|(title, text)| (title.to_owned(), text.to_owned()))
        })
        .collect()
}

fn screen_row(screen: Screen<'_>) -> (String, String) {
    match screen {
        Screen::Info { title, text } => (title.to_owned(), text.to_owned()),
        Screen::Confirm(action) => (action.label().to_owned(), String::new()),
    }
}
