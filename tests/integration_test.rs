//! Integration tests for bypass-route-summary
//!
//! These tests run the full subtraction workflow over checked-in sample
//! datasets and verify the resulting live sets address-for-address.

use bypass_route_summary::models::Prefix;
use bypass_route_summary::processing::count_addresses;
use bypass_route_summary::sources::SourceTexts;
use bypass_route_summary::{compute_forests, compute_live_sets};

fn sample_texts() -> SourceTexts {
    SourceTexts {
        registry: std::fs::read_to_string("src/tests/test_data/ipv4-address-space-sample.csv")
            .expect("Failed to read registry sample"),
        delegated: std::fs::read_to_string("src/tests/test_data/delegated-apnic-sample.txt")
            .expect("Failed to read delegated sample"),
        national: std::fs::read_to_string("src/tests/test_data/china-ip-list-sample.txt")
            .expect("Failed to read national list sample"),
    }
}

// Sample base space: 1/8 + 3/8 + 27/8 + 192/8 = 4 * 2^24 addresses.
const BASE_V4: u128 = 4 << 24;
// Reserved entries that fall inside the sample base space:
// 192.0.0.0/29 + 192.0.0.170/31 + 192.0.2.0/24 + 192.168.0.0/16.
const RESERVED_IN_BASE: u128 = 8 + 2 + 256 + 65536;

#[test]
fn test_full_workflow_both_lists() {
    let texts = sample_texts();
    let (live4, live6) = compute_live_sets(&texts, "CN", true, true, &[]).unwrap();

    // apnic: 1.0.1.0/24 + 27.8.0.0/15; ipip adds 1.0.2.0/23, overlaps on the /24.
    let excluded = 256 + 131072 + 512 + RESERVED_IN_BASE;
    assert_eq!(count_addresses(&live4), BASE_V4 - excluded);

    // IPv6: 2000::/3 minus the single /32 delegation, one sibling per level.
    assert_eq!(live6.len(), 29);
    assert_eq!(
        count_addresses(&live6),
        (1u128 << 125) - (1u128 << 96)
    );

    // Nothing live may touch an excluded range.
    let cn_block = Prefix::new("27.8.0.0/15").unwrap();
    for p in &live4 {
        assert!(!cn_block.contains(p) && !p.contains(&cn_block), "{p}");
    }
}

#[test]
fn test_apnic_only() {
    let texts = sample_texts();
    let (live4, _) = compute_live_sets(&texts, "CN", true, false, &[]).unwrap();
    let excluded = 256 + 131072 + RESERVED_IN_BASE;
    assert_eq!(count_addresses(&live4), BASE_V4 - excluded);
}

#[test]
fn test_ipip_only() {
    let texts = sample_texts();
    let (live4, _) = compute_live_sets(&texts, "CN", false, true, &[]).unwrap();
    let excluded = 256 + 512 + RESERVED_IN_BASE;
    assert_eq!(count_addresses(&live4), BASE_V4 - excluded);
}

#[test]
fn test_operator_excludes() {
    let texts = sample_texts();
    let excludes = vec!["3.0.0.0/8".to_string(), "2400:9000::/32".to_string()];
    let (live4, live6) = compute_live_sets(&texts, "CN", true, true, &excludes).unwrap();

    let excluded4 = 256 + 131072 + 512 + RESERVED_IN_BASE + (1u128 << 24);
    assert_eq!(count_addresses(&live4), BASE_V4 - excluded4);
    assert!(live4
        .iter()
        .all(|p| *p != Prefix::new("3.0.0.0/8").unwrap()));

    assert_eq!(
        count_addresses(&live6),
        (1u128 << 125) - 2 * (1u128 << 96)
    );
}

#[test]
fn test_other_country_filter() {
    let texts = sample_texts();
    let (live4, live6) = compute_live_sets(&texts, "JP", true, false, &[]).unwrap();
    // Only the JP /20 is delegated in the sample.
    let excluded = 4096 + RESERVED_IN_BASE;
    assert_eq!(count_addresses(&live4), BASE_V4 - excluded);
    // No JP ipv6 records: the whole unicast block stays live.
    assert_eq!(live6, vec![Prefix::new("2000::/3").unwrap()]);
}

#[test]
fn test_live_set_is_disjoint_and_deterministic() {
    let texts = sample_texts();
    let (first, _) = compute_live_sets(&texts, "CN", true, true, &[]).unwrap();
    let (second, _) = compute_live_sets(&texts, "CN", true, true, &[]).unwrap();
    assert_eq!(first, second);

    for (i, a) in first.iter().enumerate() {
        for b in first.iter().skip(i + 1) {
            assert!(!a.contains(b) && !b.contains(a), "{a} overlaps {b}");
        }
    }
}

#[test]
fn test_exact_root_exclusion_keeps_tree_small() {
    let texts = sample_texts();
    let excludes = vec!["3.0.0.0/8".to_string()];
    let (forest4, _) = compute_forests(&texts, "CN", false, false, &excludes).unwrap();

    // The 3/8 root is excluded in place, never split.
    let root = forest4
        .roots
        .iter()
        .find(|r| r.prefix == Prefix::new("3.0.0.0/8").unwrap())
        .expect("3/8 root present");
    assert!(root.is_leaf());
    assert!(root.excluded);
}
