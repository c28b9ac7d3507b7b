// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::cli::OutputFormat;
use crate::display::format_summary;
use crate::error::Result;

use super::Session;

pub fn run(session: &Session, output: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let summary = session.engine.summary();
    match output {
        OutputFormat::Text => writeln!(out, "{}", format_summary(&summary))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
