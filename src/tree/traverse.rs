//! Ordered traversal of a built suffix tree
//!
//! Children are visited in ascending order of their first symbol, which
//! visits leaves in lexicographic order of the suffixes they spell. The
//! walk uses an explicit stack so deep trees (e.g. `aaaa...$`) cannot
//! overflow the call stack.

use super::builder::SuffixTree;
use super::types::NodeId;

/// One step of a depth-first walk below the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// Entering `node`; `depth` is its path-label length
    Descend { node: NodeId, depth: usize },
    /// Leaving `node` after all of its children
    Ascend { node: NodeId, depth: usize },
}

/// Depth-first iterator over [`DfsEvent`]s, root excluded
pub struct Dfs<'a> {
    tree: &'a SuffixTree,
    stack: Vec<DfsEvent>,
}

impl<'a> Dfs<'a> {
    fn new(tree: &'a SuffixTree) -> Self {
        let mut dfs = Self {
            tree,
            stack: Vec::new(),
        };
        dfs.push_children(NodeId::ROOT, 0);
        dfs
    }

    fn push_children(&mut self, node: NodeId, depth: usize) {
        // Reversed so the smallest first symbol is popped first
        for (_, child) in self.tree.node(node).sorted_children().into_iter().rev() {
            self.stack.push(DfsEvent::Descend {
                node: child,
                depth: depth + self.tree.edge_len(child),
            });
        }
    }
}

impl Iterator for Dfs<'_> {
    type Item = DfsEvent;

    fn next(&mut self) -> Option<DfsEvent> {
        let event = self.stack.pop()?;
        if let DfsEvent::Descend { node, depth } = event {
            self.stack.push(DfsEvent::Ascend { node, depth });
            self.push_children(node, depth);
        }
        Some(event)
    }
}

impl SuffixTree {
    /// Depth-first walk in lexicographic child order
    pub fn dfs(&self) -> Dfs<'_> {
        Dfs::new(self)
    }

    /// 1-based start position of the suffix spelled by a leaf at `depth`
    #[inline]
    pub fn suffix_start(&self, depth: usize) -> usize {
        self.len() - depth + 1
    }

    /// Suffix array: 1-based suffix starts in lexicographic order
    pub fn suffix_array(&self) -> Vec<usize> {
        let mut sa = Vec::with_capacity(self.len());
        for event in self.dfs() {
            if let DfsEvent::Descend { node, depth } = event {
                if self.node(node).is_leaf() {
                    sa.push(self.suffix_start(depth));
                }
            }
        }
        sa
    }

    /// Path-label length of every node, indexed by arena position
    pub fn node_depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.node_count()];
        for event in self.dfs() {
            if let DfsEvent::Descend { node, depth } = event {
                depths[node.index()] = depth;
            }
        }
        depths
    }

    /// Concatenated edge labels from the root down to `node`
    ///
    /// `depths` must come from [`SuffixTree::node_depths`].
    pub fn path_label<'t>(&'t self, node: NodeId, depths: &[usize]) -> &'t [u8] {
        match self.edge_range(node) {
            Some((_, end)) => &self.text[end + 1 - depths[node.index()]..=end],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banana_suffix_array() {
        let tree = SuffixTree::build(b"banana$").unwrap();
        assert_eq!(tree.suffix_array(), vec![7, 6, 4, 2, 1, 5, 3]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let tree = SuffixTree::build(b"banana$").unwrap();
        assert_eq!(tree.suffix_array(), tree.suffix_array());
    }

    #[test]
    fn test_single_symbol_texts() {
        assert_eq!(SuffixTree::build(b"a$").unwrap().suffix_array(), vec![2, 1]);
        assert_eq!(SuffixTree::build(b"$").unwrap().suffix_array(), vec![1]);
    }

    #[test]
    fn test_mississippi_suffix_array() {
        let tree = SuffixTree::build(b"mississippi$").unwrap();
        assert_eq!(
            tree.suffix_array(),
            vec![12, 11, 8, 5, 2, 1, 10, 9, 7, 4, 6, 3]
        );
    }

    #[test]
    fn test_events_are_balanced() {
        let tree = SuffixTree::build(b"abcabxabcd$").unwrap();
        let mut open = 0i64;
        for event in tree.dfs() {
            match event {
                DfsEvent::Descend { .. } => open += 1,
                DfsEvent::Ascend { .. } => open -= 1,
            }
            assert!(open >= 0);
        }
        assert_eq!(open, 0);
    }

    #[test]
    fn test_leaf_path_labels_are_suffixes() {
        let text = b"abab$";
        let tree = SuffixTree::build(text).unwrap();
        let depths = tree.node_depths();
        for (i, node) in tree.nodes().iter().enumerate() {
            if node.is_leaf() {
                let label = tree.path_label(NodeId::from_index(i), &depths);
                let start = tree.suffix_start(label.len());
                assert_eq!(label, &text[start - 1..]);
            }
        }
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        let mut text = vec![b'a'; 50_000];
        text.push(b'$');
        let tree = SuffixTree::build(&text).unwrap();
        let sa = tree.suffix_array();
        assert_eq!(sa.len(), text.len());
        assert_eq!(sa[0], text.len());
        assert_eq!(sa[1], text.len() - 1);
        assert_eq!(*sa.last().unwrap(), 1);
    }
}
