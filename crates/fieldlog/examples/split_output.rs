//! Split output example: colored console for people, JSON for machines.
//!
//! Run with: LOG_LEVEL=debug cargo run --example split_output -- <user-format>
//! Where <user-format> is one of: plain, plain-notime, color, color-notime, json

use fieldlog::{setup, Format, Level, SetupOptions, SplitWriter, StructuredError};
use fieldlog_config::ConfigLoader;
use std::env;

fn main() -> anyhow::Result<()> {
    let user_format = env::args().nth(1).unwrap_or_else(|| "color".to_string());
    let config = ConfigLoader::new().load_env()?;

    let split = SplitWriter::new(
        std::io::stdout(),
        std::io::stderr(),
        user_format.as_str(),
        "json",
        "info",
        config.log_level.as_str(),
    );

    let logger = setup(
        SetupOptions::new()
            .with_config(&config)
            .with_format(Format::Custom)
            .with_level(Level::Trace)
            .with_level_output(split),
    )?;

    tracing::info!("Application started");
    tracing::debug!(request_id = "abc123", duration_ms = 42, "Processing request");

    let err = StructuredError::wrap(
        StructuredError::new("row locked").with_field("table", "orders"),
        "update failed",
    )
    .with_field("order_id", 42)
    .with_stack();
    fieldlog::log_err!(Some(&err), "Order update failed");

    fieldlog::log_fatal!("Shutting down after fatal error");

    logger.flush()?;
    Ok(())
}
