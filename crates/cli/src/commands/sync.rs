// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::cli::OutputFormat;
use crate::display::format_drain_report;
use crate::error::Result;

use super::Session;

/// Runs one drain pass. The session has already probed the remote.
pub async fn run(session: &Session, output: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let report = session.engine.drain().await?;
    match output {
        OutputFormat::Text => writeln!(out, "{}", format_drain_report(&report))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
