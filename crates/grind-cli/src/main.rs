//! `grind` — terminal front end for the grind practice tracker.
//!
//! # Usage
//!
//! ```
//! grind add https://codeforces.com/problemset/problem/1900/D --rating 1600
//! grind list all --filter unsolved
//! grind calendar --month 2024-01
//! grind --data-dir /tmp/grind stats
//! ```
//!
//! The data directory resolves from, in order: the `--data-dir` flag, the
//! `GRIND_DATA_DIR` environment variable or config file, then
//! `~/.local/share/grind`.

mod app;
mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use grind_store_json::JsonStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "grind",
  about = "Track competitive-programming practice from the terminal"
)]
struct Args {
  /// Path to a TOML config file (default: ~/.config/grind/config.toml).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Directory holding data.json and the accent file.
  #[arg(long, value_name = "DIR")]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file / `GRIND_*` environment overlay.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
  #[serde(default)]
  data_dir: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Optional config file, then environment (GRIND_DATA_DIR etc.) on top.
  let config_path = args
    .config
    .clone()
    .or_else(|| home_join(".config/grind/config.toml"));
  let mut builder = config::Config::builder();
  if let Some(path) = config_path {
    builder = builder.add_source(config::File::from(path).required(false));
  }
  let settings = builder
    .add_source(config::Environment::with_prefix("GRIND"))
    .build()
    .context("failed to read configuration")?;
  let file_cfg: FileConfig = settings
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  // CLI flag overrides config, which overrides the default location.
  let data_dir = args
    .data_dir
    .or(file_cfg.data_dir)
    .or_else(|| home_join(".local/share/grind"))
    .context("cannot resolve a data directory (set --data-dir or $HOME)")?;
  let data_dir = expand_tilde(&data_dir);

  let store = JsonStore::open(&data_dir)
    .with_context(|| format!("failed to open store at {}", data_dir.display()))?;

  app::App::new(store).run(args.command)
}

/// `$HOME/<rest>`, if `$HOME` is set.
fn home_join(rest: &str) -> Option<PathBuf> {
  std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(rest))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
