//! Summary statistics for a built suffix tree

use super::builder::SuffixTree;
use serde::Serialize;

/// Shape of a suffix tree, reported by `sfx stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Text length, sentinel included
    pub text_len: usize,
    /// All nodes, root included
    pub node_count: usize,
    /// Internal nodes, root included
    pub internal_count: usize,
    pub leaf_count: usize,
    /// Longest path label of an internal node (longest repeated substring)
    pub max_internal_depth: usize,
    /// Largest number of children at any node
    pub max_fanout: usize,
}

impl SuffixTree {
    pub fn stats(&self) -> TreeStats {
        let depths = self.node_depths();
        let mut stats = TreeStats {
            text_len: self.len(),
            node_count: self.node_count(),
            ..Default::default()
        };

        for (node, depth) in self.nodes().iter().zip(&depths) {
            if node.is_leaf() {
                stats.leaf_count += 1;
            } else {
                stats.internal_count += 1;
                stats.max_internal_depth = stats.max_internal_depth.max(*depth);
            }
            stats.max_fanout = stats.max_fanout.max(node.child_count());
        }
        stats
    }
}
