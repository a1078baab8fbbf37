//! Prefix-tree node.

use crate::models::Prefix;

/// A node in the subtraction tree.
///
/// A node either is a leaf (live unless `excluded`) or owns children that
/// exactly partition its prefix. Interior nodes are never themselves
/// excluded; a fully removed region is expressed by excluded leaves. Nodes
/// are only ever added during a run, never deleted.
#[derive(Debug, Clone)]
pub struct PrefixNode {
    /// The block this node covers.
    pub prefix: Prefix,
    /// Child nodes partitioning `prefix`, sorted ascending. Empty for leaves.
    pub children: Vec<PrefixNode>,
    /// Leaf marker: the whole block is removed from the live set.
    pub excluded: bool,
}

impl PrefixNode {
    /// Create a live leaf node.
    pub fn new(prefix: Prefix) -> PrefixNode {
        PrefixNode {
            prefix,
            children: Vec::new(),
            excluded: false,
        }
    }

    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Remove this node's entire block from the live set.
    ///
    /// Leaves are marked excluded; split nodes recurse so the marker only
    /// ever sits on leaves.
    pub fn exclude_all(&mut self) {
        if self.is_leaf() {
            self.excluded = true;
        } else {
            for child in &mut self.children {
                child.exclude_all();
            }
        }
    }

    /// Render this subtree as indented lines, one node per line.
    ///
    /// Diagnostics only; the `+` depth markers stand in for a parent
    /// back-reference.
    pub fn dump_into(&self, depth: usize, out: &mut Vec<String>) {
        let marker = if self.excluded { " dead" } else { "" };
        out.push(format!("{}{}{}", "+".repeat(depth), self.prefix, marker));
        for child in &self.children {
            child.dump_into(depth + 1, out);
        }
    }
}
