//! Flat national IP list parsing.
//!
//! The supplementary list is one CIDR per line (the ipip.net style
//! `china_ip_list.txt`), used additively with the delegation feed.

use crate::models::Prefix;
use std::error::Error;

/// Parse a CIDR-per-line list. Blank lines and `#` comments are skipped;
/// anything else must parse as a canonical prefix.
pub fn parse_national_list(text: &str) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let mut prefixes = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let prefix =
            Prefix::new(line).map_err(|e| format!("national list line {}: {e}", lineno + 1))?;
        prefixes.push(prefix);
    }
    log::info!("national list: {} ranges", prefixes.len());
    Ok(prefixes)
}
