//! Forest of root prefix nodes, one per top-level allocation.

use crate::models::{Family, Prefix, PrefixNode};

/// The base address space of one family as an ordered set of disjoint roots.
///
/// Built once from the base allocation table, mutated in place by the
/// subtraction passes, then walked for the final live set and discarded.
#[derive(Debug, Clone)]
pub struct Forest {
    /// Address family every root belongs to.
    pub family: Family,
    /// Root nodes, pairwise disjoint, in allocation-table order.
    pub roots: Vec<PrefixNode>,
}

impl Forest {
    /// Create an empty forest for one address family.
    pub fn new(family: Family) -> Forest {
        Forest {
            family,
            roots: Vec::new(),
        }
    }

    /// Seed a forest from the base allocation table.
    ///
    /// Prefixes of the wrong family are a caller bug; the sources layer
    /// splits its output per family before we get here.
    pub fn from_prefixes(family: Family, prefixes: &[Prefix]) -> Forest {
        let roots = prefixes
            .iter()
            .filter(|p| p.family() == family)
            .map(|p| PrefixNode::new(*p))
            .collect::<Vec<_>>();
        log::debug!("seeded {} forest with {} roots", family, roots.len());
        Forest { family, roots }
    }

    /// Total number of nodes currently in the tree, for diagnostics.
    pub fn node_count(&self) -> usize {
        fn count(node: &PrefixNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }

    /// Render the whole forest as indented lines, for trace logging.
    pub fn dump(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for root in &self.roots {
            root.dump_into(0, &mut lines);
        }
        lines
    }
}
