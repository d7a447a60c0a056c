//! Output formatting for CLI display
//!
//! This module provides utilities for formatting catalog entries and sweep
//! results in the CLI.

use crate::catalog::CatalogEntry;
use crate::reconcile::{ArchivedFile, SweepReport};
use colored::Colorize;

/// Format an entry as a single list line
#[must_use]
pub fn entry_line(entry: &CatalogEntry, quiet: bool) -> String {
    if quiet {
        return entry.id.to_string();
    }

    let mut line = format!("  {} {}", entry.name.bold(), format!("[{}]", entry.id).dimmed());
    if !entry.description.is_empty() {
        line.push_str(&format!(" - {}", entry.description));
    }
    if entry.preview.is_some() {
        line.push_str(&format!(" {}", "(preview)".cyan()));
    }
    line
}

/// Format every field of an entry for the show command
#[must_use]
pub fn entry_details(entry: &CatalogEntry) -> String {
    let preview = entry
        .preview
        .as_ref()
        .map_or_else(|| "none".to_string(), |p| p.display().to_string());

    [
        format!("{}", entry.name.bold()),
        format!("  Wildcard:        {}", entry.id),
        format!("  Category:        {}", entry.category),
        format!("  Sidecar:         {}", entry.filename.display()),
        format!("  Hash:            {}", entry.shorthash),
        format!("  Preview:         {preview}"),
        format!("  Description:     {}", entry.record.description),
        format!("  Activation text: {}", entry.prompt),
        format!("  Negative text:   {}", entry.negative_prompt),
        format!("  Notes:           {}", entry.record.notes),
    ]
    .join("\n")
}

/// Format one archived file
#[must_use]
pub fn archived_line(archived: &ArchivedFile) -> String {
    format!(
        "  {} {} -> {}",
        format!("[{}]", archived.reason).yellow(),
        archived.source.display(),
        archived.destination.display()
    )
}

/// Status line for a finished sweep, green when nothing failed
#[must_use]
pub fn sweep_status(report: &SweepReport) -> String {
    let message = report.status_message();
    if report.failures.is_empty() {
        message.green().to_string()
    } else {
        message.red().to_string()
    }
}
