use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::identity::DEFAULT_HOST;
use crate::record::DEFAULT_MAINTAINER_THRESHOLD;
use crate::store;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "icontribute",
    version,
    about = "Collect repository contributors from Git history and serve them as JSON",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Read Git history and (re)write the contributor JSON files
  Collect(CollectArgs),
  /// Serve the persisted contributors over HTTP
  Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct CollectArgs {
  /// Path inside a Git repository (default: current dir)
  #[arg(long, default_value = ".")]
  pub repo: PathBuf,

  /// Directory for contributors.json and the per-contributor files
  #[arg(long, env = "CONTRIBUTORS_DIR", default_value = store::DEFAULT_DIR)]
  pub out: PathBuf,

  /// Minimum commit count for the Maintainer role
  #[arg(long, env = "MAINTAINER_THRESHOLD", default_value_t = DEFAULT_MAINTAINER_THRESHOLD)]
  pub threshold: u64,

  /// Code-hosting platform used for noreply addresses and avatar URLs
  #[arg(long, env = "ICONTRIBUTE_HOST", default_value = DEFAULT_HOST)]
  pub host: String,

  /// Skip avatar probes; every avatar falls back to the generated image
  #[arg(long)]
  pub offline: bool,

  /// Per-probe timeout in seconds
  #[arg(long, default_value_t = 5)]
  pub probe_timeout_secs: u64,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
  /// Directory holding contributors.json
  #[arg(long, env = "CONTRIBUTORS_DIR", default_value = store::DEFAULT_DIR)]
  pub data_dir: PathBuf,

  /// Port to listen on (all interfaces)
  #[arg(long, env = "PORT", default_value_t = 3000)]
  pub port: u16,
}

#[derive(Debug, Clone)]
pub struct CollectConfig {
  pub repo: String, // absolute path for stability
  pub out_dir: String,
  pub threshold: u64,
  pub host: String,
  pub offline: bool,
  pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
  pub data_dir: String,
  pub port: u16,
}

#[derive(Debug)]
pub enum Action {
  Collect(CollectConfig),
  Serve(ServeConfig),
}

pub fn normalize(cli: Cli) -> Result<Action> {
  let command = match cli.command {
    Some(c) => c,
    None => bail!("Provide a subcommand: collect | serve"),
  };

  match command {
    Command::Collect(args) => {
      let host = args.host.trim().trim_end_matches('/').to_string();
      if host.is_empty() {
        bail!("--host must not be empty");
      }
      if args.probe_timeout_secs == 0 {
        bail!("--probe-timeout-secs must be at least 1");
      }

      Ok(Action::Collect(CollectConfig {
        repo: util::canonicalize_lossy(&args.repo),
        out_dir: util::canonicalize_lossy(&args.out),
        threshold: args.threshold,
        host,
        offline: args.offline,
        probe_timeout_secs: args.probe_timeout_secs,
      }))
    }
    Command::Serve(args) => Ok(Action::Serve(ServeConfig {
      data_dir: util::canonicalize_lossy(&args.data_dir),
      port: args.port,
    })),
  }
}
