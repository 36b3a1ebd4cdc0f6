use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use icontribute::cli::{normalize, Action, Cli};
use icontribute::{collect, server, util};

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI into an explicit config
  match normalize(cli)? {
    // Phase 2a: batch run
    Action::Collect(cfg) => {
      tracing::debug!(?cfg, "collect");
      collect::run(&cfg)?;
      Ok(())
    }
    // Phase 2b: read-only API
    Action::Serve(cfg) => {
      tracing::debug!(?cfg, "serve");
      let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
      rt.block_on(server::serve(&cfg))
    }
  }
}
