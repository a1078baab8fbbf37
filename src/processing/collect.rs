//! Final walk over a subtracted forest.

use crate::models::{Forest, Prefix, PrefixNode};

/// Collect the live blocks of a subtracted forest, depth first.
///
/// Split nodes emit nothing themselves, live leaves emit their prefix,
/// excluded leaves emit nothing. The traversal order is stable, so the same
/// forest always yields the same list.
pub fn collect(forest: &Forest) -> Vec<Prefix> {
    let mut out = Vec::new();
    for root in &forest.roots {
        collect_node(root, false, &mut out);
    }
    out
}

/// Collect the excluded leaves instead; live-plus-excluded always adds up to
/// the base space exactly.
pub fn collect_excluded(forest: &Forest) -> Vec<Prefix> {
    let mut out = Vec::new();
    for root in &forest.roots {
        collect_node(root, true, &mut out);
    }
    out
}

fn collect_node(node: &PrefixNode, excluded: bool, out: &mut Vec<Prefix>) {
    if !node.is_leaf() {
        for child in &node.children {
            collect_node(child, excluded, out);
        }
    } else if node.excluded == excluded {
        out.push(node.prefix);
    }
}

/// Total number of addresses covered by a collected set.
pub fn count_addresses(prefixes: &[Prefix]) -> u128 {
    prefixes.iter().map(|p| p.num_addresses()).sum()
}
