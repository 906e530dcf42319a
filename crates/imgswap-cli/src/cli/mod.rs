//! CLI for the imgswap media cache.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgswap_core::classify::Category;
use imgswap_core::config;
use std::path::PathBuf;

use commands::{run_known, run_resolve};

/// Top-level CLI for imgswap.
#[derive(Debug, Parser)]
#[command(name = "imgswap")]
#[command(about = "imgswap: cache remote media locally under content-addressed names", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve media URLs to local cached copies, fetching any not seen before.
    Resolve {
        /// Media category the URLs are expected to hold: img, video or audio.
        #[arg(long, short = 'k', default_value = "img", value_parser = parse_category)]
        kind: Category,

        /// Media directory (default: ./imgswap_media, per config `media_dir_name`).
        #[arg(long, value_name = "DIR")]
        media: Option<PathBuf>,

        /// URLs to resolve, in order.
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,
    },

    /// List every URL recorded in the media directory's ledger.
    Known {
        /// Media directory (default: ./imgswap_media, per config `media_dir_name`).
        #[arg(long, value_name = "DIR")]
        media: Option<PathBuf>,
    },
}

fn parse_category(s: &str) -> std::result::Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let default_media = || -> Result<PathBuf> {
            Ok(std::env::current_dir()?.join(&cfg.media_dir_name))
        };

        match cli.command {
            CliCommand::Resolve { kind, media, urls } => {
                let media = match media {
                    Some(m) => m,
                    None => default_media()?,
                };
                run_resolve(&cfg, &media, kind, &urls)?;
            }
            CliCommand::Known { media } => {
                let media = match media {
                    Some(m) => m,
                    None => default_media()?,
                };
                run_known(&media)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
