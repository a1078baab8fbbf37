//! RIR delegation feed parsing.
//!
//! Extracts one country's ipv4/ipv6 delegations from a
//! `delegated-<rir>-latest` feed. IPv4 records carry an address count that
//! must be an exact power of two; IPv6 records carry the prefix length
//! directly.

use crate::models::Prefix;
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::net::IpAddr;

lazy_static! {
    static ref DELEGATION: Regex = Regex::new(
        r"^(?P<registry>[a-z][a-z.]*)\|(?P<cc>[A-Z]{2})\|(?P<family>ipv4|ipv6)\|(?P<start>[0-9a-fA-F:.]+)\|(?P<value>\d+)\|"
    )
    .expect("Invalid Regex?");
}

/// Parsed delegations for a single country, split per address family.
#[derive(Debug, Default)]
pub struct Delegations {
    pub ipv4: Vec<Prefix>,
    pub ipv6: Vec<Prefix>,
}

/// Parse a delegation feed, keeping only records for `country` (ISO 3166
/// alpha-2, e.g. "CN"). Comment lines, summary lines and other countries'
/// records are skipped; malformed counts in a matching record are an error.
pub fn parse_delegated(text: &str, country: &str) -> Result<Delegations, Box<dyn Error>> {
    let mut delegations = Delegations::default();
    for line in text.lines() {
        let caps = match DELEGATION.captures(line) {
            Some(caps) => caps,
            None => continue,
        };
        if &caps["cc"] != country {
            continue;
        }
        let start: IpAddr = caps["start"]
            .parse()
            .map_err(|_| format!("invalid delegation start address: {line}"))?;
        let value: u64 = caps["value"]
            .parse()
            .map_err(|_| format!("invalid delegation value: {line}"))?;
        match &caps["family"] {
            "ipv4" => delegations.ipv4.push(
                Prefix::from_count(start, value)
                    .map_err(|e| format!("delegation record '{line}': {e}"))?,
            ),
            _ => {
                if value > 128 {
                    return Err(format!("delegation record '{line}': bad ipv6 length").into());
                }
                delegations.ipv6.push(
                    Prefix::from_parts(start, value as u8)
                        .map_err(|e| format!("delegation record '{line}': {e}"))?,
                );
            }
        }
    }
    log::info!(
        "delegated feed: {} ipv4 and {} ipv6 records for {country}",
        delegations.ipv4.len(),
        delegations.ipv6.len()
    );
    Ok(delegations)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2|apnic|20260820|12345|19830613|20260819|+1000
apnic|*|asn|*|10000|summary
apnic|JP|ipv4|1.0.16.0|4096|20110412|allocated
apnic|CN|ipv4|1.0.1.0|256|20110414|allocated
apnic|CN|ipv4|27.8.0.0|131072|20100806|allocated
apnic|CN|ipv6|2400:8900::|32|20100806|allocated
apnic|AU|ipv6|2401:d002::|32|20110105|allocated
";

    #[test]
    fn test_parse_delegated_filters_country() {
        let d = parse_delegated(SAMPLE, "CN").unwrap();
        assert_eq!(
            d.ipv4,
            vec![
                Prefix::new("1.0.1.0/24").unwrap(),
                Prefix::new("27.8.0.0/15").unwrap(),
            ]
        );
        assert_eq!(d.ipv6, vec![Prefix::new("2400:8900::/32").unwrap()]);
    }

    #[test]
    fn test_parse_delegated_other_country() {
        let d = parse_delegated(SAMPLE, "JP").unwrap();
        assert_eq!(d.ipv4, vec![Prefix::new("1.0.16.0/20").unwrap()]);
        assert!(d.ipv6.is_empty());
    }

    #[test]
    fn test_summary_and_version_lines_skipped() {
        let d = parse_delegated(SAMPLE, "US").unwrap();
        assert!(d.ipv4.is_empty());
        assert!(d.ipv6.is_empty());
    }

    #[test]
    fn test_non_power_of_two_count_is_an_error() {
        let bad = "apnic|CN|ipv4|1.0.1.0|768|20110414|allocated\n";
        let err = parse_delegated(bad, "CN").unwrap_err();
        assert!(err.to_string().contains("power of two"), "{err}");
    }

    #[test]
    fn test_bad_ipv6_length_is_an_error() {
        let bad = "apnic|CN|ipv6|2400:8900::|300|20100806|allocated\n";
        assert!(parse_delegated(bad, "CN").is_err());
    }
}
