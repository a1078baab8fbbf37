//! Run summary: terminal report and optional machine-readable dump.

use crate::models::Prefix;
use crate::processing::count_addresses;
use colored::Colorize;
use serde::Serialize;
use std::error::Error;

/// Machine-readable result of one run.
#[derive(Debug, Serialize)]
pub struct RouteSummary<'a> {
    pub generated: String,
    pub next_hop: String,
    pub ipv4_count: usize,
    pub ipv6_count: usize,
    pub ipv4: &'a [Prefix],
    pub ipv6: &'a [Prefix],
}

/// Write the collected live sets as a JSON file.
pub fn write_json_summary(
    file: &str,
    ipv4: &[Prefix],
    ipv6: &[Prefix],
    next_hop: &str,
) -> Result<(), Box<dyn Error>> {
    let summary = RouteSummary {
        generated: chrono::Utc::now()
            .with_timezone(&chrono_tz::Asia::Shanghai)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        next_hop: next_hop.to_string(),
        ipv4_count: ipv4.len(),
        ipv6_count: ipv6.len(),
        ipv4,
        ipv6,
    };
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("Error serializing summary JSON: {e}"))?;
    std::fs::write(file, json).map_err(|e| format!("Error writing summary file {file}: {e}"))?;
    log::info!("wrote run summary to {file}");
    Ok(())
}

/// Print the per-family block and address counts to the terminal.
pub fn print_summary(ipv4: &[Prefix], ipv6: &[Prefix]) {
    println!(
        "#{}# ipv4: {} live blocks covering {} addresses",
        "DONE".on_blue(),
        ipv4.len(),
        count_addresses(ipv4)
    );
    println!(
        "#{}# ipv6: {} live blocks covering {} addresses",
        "DONE".on_blue(),
        ipv6.len(),
        count_addresses(ipv6)
    );
}
