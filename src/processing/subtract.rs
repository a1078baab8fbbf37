//! Frontier subtraction of exclusion prefixes from a forest.
//!
//! The forest only ever grows: a leaf that must lose a sub-range is split
//! into children that exactly partition it, and removed ranges become
//! excluded leaves. Nothing is deleted during a run.

use crate::models::{Forest, Prefix, PrefixNode};
use std::error::Error;

/// Subtract a sequence of exclusion prefixes from the forest, in input order.
///
/// Exclusions that fall outside the base space (or belong to the other
/// address family) are silently ignored; national lists and reserved tables
/// routinely reference space the base allocation does not cover.
/// Re-applying an exclusion is a no-op, and the final live set does not
/// depend on the order exclusion sources are applied in.
pub fn subtract(forest: &mut Forest, exclusions: &[Prefix]) -> Result<(), Box<dyn Error>> {
    for exclude in exclusions {
        let matched = subtract_one(&mut forest.roots, exclude)?;
        if !matched {
            log::debug!(
                "exclusion {exclude} is outside the {} base space, ignored",
                forest.family
            );
        }
    }
    Ok(())
}

/// Resolve a single exclusion against the current frontier.
///
/// Returns true if any node was affected (or the region was already removed).
fn subtract_one(nodes: &mut [PrefixNode], exclude: &Prefix) -> Result<bool, Box<dyn Error>> {
    let mut matched = false;
    for node in nodes.iter_mut() {
        if exclude.contains(&node.prefix) {
            // The exclusion covers this whole node, split or not. A wider
            // exclusion may cover following siblings too, so only an exact
            // match ends the scan.
            node.exclude_all();
            matched = true;
            if node.prefix == *exclude {
                break;
            }
        } else if node.prefix.contains(exclude) {
            if !node.is_leaf() {
                matched = subtract_one(&mut node.children, exclude)?;
            } else if node.excluded {
                // Region already removed by an earlier, wider exclusion.
                matched = true;
            } else {
                node.children = split_leaf(&node.prefix, exclude)?;
                matched = true;
            }
            // At most one node on a level strictly contains the target.
            break;
        }
    }
    Ok(matched)
}

/// Materialize the children of a leaf that loses `exclude`: the live sibling
/// blocks plus one excluded leaf for `exclude` itself, sorted ascending so
/// they partition the parent in address order.
fn split_leaf(prefix: &Prefix, exclude: &Prefix) -> Result<Vec<PrefixNode>, Box<dyn Error>> {
    let mut children: Vec<PrefixNode> = prefix
        .split(exclude)?
        .into_iter()
        .map(PrefixNode::new)
        .collect();
    children.push(PrefixNode {
        prefix: *exclude,
        children: Vec::new(),
        excluded: true,
    });
    children.sort_by_key(|c| c.prefix);
    Ok(children)
}
