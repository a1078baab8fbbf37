// cargo watch -x 'fmt' -x 'run'  // 'run -- --some-arg'

pub mod cli;
pub mod models;
pub mod output;
pub mod processing;
pub mod sources;

use models::{Family, Forest, Prefix};
use std::error::Error;

/// The single IPv6 base root: the global-unicast block.
pub const IPV6_UNICAST: &str = "2000::/3";

/// Seed the per-family base forests from the registry CSV text.
pub fn build_base_forests(registry_csv: &str) -> Result<(Forest, Forest), Box<dyn Error>> {
    let base4 = sources::parse_registry_csv(registry_csv)?;
    let forest4 = Forest::from_prefixes(Family::V4, &base4);
    let forest6 = Forest::from_prefixes(Family::V6, &[Prefix::new(IPV6_UNICAST)?]);
    Ok((forest4, forest6))
}

/// Parse operator-supplied exclusion strings and split them per family.
pub fn split_operator_excludes(
    excludes: &[String],
) -> Result<(Vec<Prefix>, Vec<Prefix>), Box<dyn Error>> {
    let mut ipv4 = Vec::new();
    let mut ipv6 = Vec::new();
    for cidr in excludes {
        let prefix = Prefix::new(cidr)?;
        match prefix.family() {
            Family::V4 => ipv4.push(prefix),
            Family::V6 => ipv6.push(prefix),
        }
    }
    Ok((ipv4, ipv6))
}

/// Run the full subtraction sequence over freshly seeded forests.
///
/// Sources are applied in fixed order: delegation feed, supplementary
/// national list, operator exclusions, built-in reserved tables last. The
/// final live set does not depend on this order, only the amount of
/// splitting does.
pub fn compute_forests(
    texts: &sources::SourceTexts,
    country: &str,
    use_apnic: bool,
    use_ipip: bool,
    operator_excludes: &[String],
) -> Result<(Forest, Forest), Box<dyn Error>> {
    let (mut forest4, mut forest6) = build_base_forests(&texts.registry)?;

    let delegations = sources::parse_delegated(&texts.delegated, country)?;
    if use_apnic {
        processing::subtract(&mut forest4, &delegations.ipv4)?;
    }
    processing::subtract(&mut forest6, &delegations.ipv6)?;

    if use_ipip {
        let national = sources::parse_national_list(&texts.national)?;
        processing::subtract(&mut forest4, &national)?;
    }

    let (operator4, operator6) = split_operator_excludes(operator_excludes)?;
    processing::subtract(&mut forest4, &operator4)?;
    processing::subtract(&mut forest6, &operator6)?;

    // Reserved space always goes last.
    processing::subtract(&mut forest4, &processing::reserved_ipv4())?;
    processing::subtract(&mut forest6, &processing::reserved_ipv6())?;

    log::info!(
        "subtraction done: {} ipv4 nodes, {} ipv6 nodes",
        forest4.node_count(),
        forest6.node_count()
    );
    Ok((forest4, forest6))
}

/// Convenience wrapper returning the collected live sets per family.
pub fn compute_live_sets(
    texts: &sources::SourceTexts,
    country: &str,
    use_apnic: bool,
    use_ipip: bool,
    operator_excludes: &[String],
) -> Result<(Vec<Prefix>, Vec<Prefix>), Box<dyn Error>> {
    let (forest4, forest6) =
        compute_forests(texts, country, use_apnic, use_ipip, operator_excludes)?;
    Ok((processing::collect(&forest4), processing::collect(&forest6)))
}
