use color_eyre::eyre::Result;
use log::LevelFilter;

mod batch;
mod cli;
mod config;
mod error;
mod html;

use cli::Cli;
use config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during manifest loading
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let config = Config::load(&cli)?;

  // Per-entry failures are counted, not propagated; the batch always runs
  // to completion over the manifest
  batch::run(&config)?;

  Ok(())
}
