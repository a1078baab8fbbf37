//! IANA IPv4 address-space registry parsing.
//!
//! The registry CSV lists every top-level /8 with its allocation status;
//! only `ALLOCATED` and `LEGACY` records become base-space roots.

use crate::models::Prefix;
use std::error::Error;

/// Parse the `ipv4-address-space.csv` registry into base allocation prefixes,
/// keeping record order.
pub fn parse_registry_csv(text: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let mut prefixes = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        // Skip the title row.
        if lineno == 0 || line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_fields(line);
        if fields.len() < 6 {
            return Err(format!(
                "registry line {}: expected at least 6 fields, got {}: {line}",
                lineno + 1,
                fields.len()
            )
            .into());
        }
        let status = fields[5].trim();
        if status == "ALLOCATED" || status == "LEGACY" {
            prefixes.push(block_to_prefix(&fields[0])?);
        }
    }
    log::info!("registry: {} allocated/legacy top-level blocks", prefixes.len());
    Ok(prefixes)
}

/// Convert the registry's zero-padded block syntax ("003/8") to a prefix
/// ("3.0.0.0/8").
fn block_to_prefix(block: &str) -> Result<Prefix, Box<dyn Error>> {
    let (octet, len) = block
        .trim()
        .split_once('/')
        .ok_or_else(|| format!("invalid registry block: {block}"))?;
    let octet: u8 = octet
        .parse()
        .map_err(|_| format!("invalid registry block octet: {block}"))?;
    Ok(Prefix::new(&format!("{octet}.0.0.0/{len}"))?)
}

/// Split one CSV line into fields, honoring double-quoted fields so
/// designations like `"Administered by ARIN, Inc."` stay intact.
fn split_csv_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
