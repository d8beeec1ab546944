#![forbid(unsafe_code)]

//! # Job Board
//!
//! Filter a job catalog by category, region and keyword.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p jobboard -- --locale en
//! cargo run -p jobboard -- --self-check --data jobs.json
//! ```

use anyhow::Context;
use jobboard::app::App;
use jobboard::catalog::Catalog;
use jobboard::cli::Cli;
use jobboard::config::Config;
use jobboard::{logging, terminal};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(&cli)?;
    logging::init(&config).context("failed to set up logging")?;

    let catalog = match &config.data {
        Some(path) => Catalog::load(path)?,
        None => Catalog::sample().context("built-in catalog is invalid")?,
    };
    info!(
        jobs = catalog.jobs.len(),
        locale = %config.locale,
        "catalog loaded"
    );

    let app = App::new(catalog, &config);
    if config.self_check {
        println!("{}", app.view());
        return Ok(());
    }

    let options = terminal::Options {
        mouse: config.mouse,
    };
    let app = terminal::run(app, options)?;
    info!(filter = ?app.filter(), "job board closed");
    Ok(())
}
