use bank::Result;

use anyhow::Context;

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Rejected commands show up at `warn`; `RUST_LOG=debug` traces every row
pub fn configure_app() -> Result {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_utc_timestamps()
        .env()
        .init()
        .context("Couldn't install the logger")?;

    return Ok(());
}
