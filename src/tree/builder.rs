//! Online suffix tree builder (Ukkonen)
//!
//! Processes the text one symbol per phase. Each phase runs extensions
//! until either every pending suffix has been made explicit or one is
//! found to be already present, at which point all shorter ones are too.
//!
//! State carried between phases:
//! - the active point (node, edge symbol, length)
//! - `remainder`, the number of suffixes not yet explicit
//! - the open end shared by every leaf edge
//!
//! The internal node still waiting for its suffix link lives in a
//! [`PhaseState`] created fresh at the start of every phase.

use super::types::*;
use crate::error::{Error, Result};
use tracing::{debug, trace};

/// Resumption cursor: `length` symbols down the edge leaving `node`
/// whose first symbol is `edge`
#[derive(Debug, Clone, Copy)]
struct ActivePoint {
    node: NodeId,
    edge: Symbol,
    length: usize,
}

/// Per-phase state handed to every extension step
#[derive(Debug)]
struct PhaseState {
    /// Text position processed by this phase
    index: usize,
    /// Internal node created earlier in this phase with no suffix link yet
    pending: Option<NodeId>,
}

impl PhaseState {
    fn new(index: usize) -> Self {
        Self {
            index,
            pending: None,
        }
    }

    /// Point the pending node's suffix link at `target`, clearing the slot
    fn resolve(&mut self, nodes: &mut [Node], target: NodeId) {
        if let Some(pending) = self.pending.take() {
            trace!(
                from = pending.number(),
                to = target.number(),
                "suffix link resolved"
            );
            nodes[pending.index()].suffix_link = Some(target);
        }
    }
}

/// Builder for constructing a suffix tree one phase at a time
pub struct SuffixTreeBuilder {
    tree: SuffixTree,
    active: ActivePoint,
    remainder: usize,
    next_phase: usize,
}

impl SuffixTreeBuilder {
    /// Create a builder over `text`
    ///
    /// The text should end with a symbol that occurs nowhere else; the
    /// builder does not check this.
    pub fn new(text: &[Symbol]) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::invalid_input(
                "cannot build a suffix tree over an empty text",
            ));
        }

        // Leaves plus at most as many internal nodes, plus the root
        let mut nodes = Vec::with_capacity(2 * text.len() + 1);
        let mut root = Node::root();
        root.suffix_link = Some(NodeId::ROOT);
        nodes.push(root);

        Ok(Self {
            tree: SuffixTree {
                text: text.to_vec(),
                nodes,
                open_end: 0,
            },
            active: ActivePoint {
                node: NodeId::ROOT,
                edge: text[0],
                length: 0,
            },
            remainder: 0,
            next_phase: 0,
        })
    }

    /// Number of phases already processed
    pub fn phases_done(&self) -> usize {
        self.next_phase
    }

    /// Whether every text position has been processed
    pub fn is_complete(&self) -> bool {
        self.next_phase == self.tree.text.len()
    }

    /// Process the next text symbol
    ///
    /// Returns `false` once every phase has run.
    pub fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        let i = self.next_phase;
        self.run_phase(i);
        self.next_phase += 1;
        true
    }

    /// Run all remaining phases and return the finished tree
    pub fn finish(mut self) -> SuffixTree {
        while self.step() {}
        debug!(
            text_len = self.tree.text.len(),
            nodes = self.tree.nodes.len(),
            "suffix tree built"
        );
        self.tree
    }

    fn run_phase(&mut self, i: usize) {
        self.tree.open_end = i;
        self.remainder += 1;
        let mut phase = PhaseState::new(i);

        while self.remainder > 0 {
            let rule = self.extend(&mut phase);
            trace!(
                phase = i + 1,
                ?rule,
                active_node = self.active.node.number(),
                active_length = self.active.length,
                remainder = self.remainder,
                "extension"
            );
            match rule {
                Rule::WalkDown => continue,
                Rule::AlreadyPresent => break,
                Rule::NewLeaf | Rule::Split => {
                    self.remainder -= 1;
                    self.advance_active(i);
                }
            }
        }

        // Nothing later in this phase can claim it
        phase.resolve(&mut self.tree.nodes, NodeId::ROOT);
        debug_assert!(phase.pending.is_none());
    }

    /// One extension attempt at the active point
    fn extend(&mut self, phase: &mut PhaseState) -> Rule {
        let i = phase.index;
        let symbol = self.tree.text[i];
        if self.active.length == 0 {
            self.active.edge = symbol;
        }

        let active_node = self.active.node;
        let Some(next) = self.tree.nodes[active_node.index()].child(self.active.edge) else {
            let leaf = self.tree.push_node(Node::leaf(i));
            self.tree.nodes[active_node.index()]
                .children
                .insert(self.active.edge, leaf);
            phase.resolve(&mut self.tree.nodes, active_node);
            return Rule::NewLeaf;
        };

        let edge = self.tree.edge_of(next);
        let edge_len = edge.len_at(self.tree.open_end);
        if self.active.length >= edge_len {
            self.active.length -= edge_len;
            self.active.node = next;
            if self.active.length > 0 {
                // First symbol below `next` on the path of the current suffix
                self.active.edge = self.tree.text[i - self.active.length];
            }
            return Rule::WalkDown;
        }

        let split_pos = edge.start + self.active.length;
        if self.tree.text[split_pos] == symbol {
            self.active.length += 1;
            if active_node != NodeId::ROOT {
                phase.resolve(&mut self.tree.nodes, active_node);
            }
            return Rule::AlreadyPresent;
        }

        // Mismatch inside the edge: the new internal node takes the prefix,
        // `next` keeps the rest (and its open end, if it is a leaf)
        let split = self
            .tree
            .push_node(Node::internal(edge.start, split_pos - 1));
        self.tree.nodes[active_node.index()]
            .children
            .insert(self.active.edge, split);
        let leaf = self.tree.push_node(Node::leaf(i));
        match self.tree.nodes[next.index()].edge.as_mut() {
            Some(next_edge) => next_edge.start = split_pos,
            None => unreachable!("split below node {} without an edge", next.number()),
        }
        let split_node = &mut self.tree.nodes[split.index()];
        split_node.children.insert(self.tree.text[split_pos], next);
        split_node.children.insert(symbol, leaf);
        debug_assert_eq!(split_node.child_count(), 2);

        phase.resolve(&mut self.tree.nodes, split);
        phase.pending = Some(split);
        Rule::Split
    }

    /// Move the active point to the next shorter suffix after a rule 2
    fn advance_active(&mut self, i: usize) {
        if self.active.node == NodeId::ROOT && self.active.length > 0 {
            self.active.length -= 1;
            if let Some(&symbol) = self.tree.text.get(i + 1 - self.remainder) {
                self.active.edge = symbol;
            }
        } else {
            self.active.node = self.tree.nodes[self.active.node.index()]
                .suffix_link
                .unwrap_or(NodeId::ROOT);
        }
    }
}

/// A completed suffix tree; read-only once built
#[derive(Debug, Clone)]
pub struct SuffixTree {
    pub(crate) text: Vec<Symbol>,
    pub(crate) nodes: Vec<Node>,
    /// Position every open leaf edge currently ends at
    pub(crate) open_end: usize,
}

impl SuffixTree {
    /// Build a suffix tree over `text` (which should end in a unique sentinel)
    pub fn build(text: &[Symbol]) -> Result<Self> {
        Ok(SuffixTreeBuilder::new(text)?.finish())
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        trace!(
            node = id.number(),
            leaf = node.edge.is_some_and(|e| e.end == EdgeEnd::Open),
            "node created"
        );
        self.nodes.push(node);
        id
    }

    /// Incoming edge of a non-root node
    #[inline]
    fn edge_of(&self, id: NodeId) -> Edge {
        debug_assert!(id != NodeId::ROOT, "the root has no incoming edge");
        match self.nodes[id.index()].edge {
            Some(edge) => edge,
            None => unreachable!("node {} has no incoming edge", id.number()),
        }
    }

    /// The indexed text, sentinel included
    pub fn text(&self) -> &[Symbol] {
        &self.text
    }

    /// Text length `N`, sentinel included
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: empty texts are rejected at build time
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolved incoming edge range `[start, end]`, 0-based inclusive
    pub fn edge_range(&self, id: NodeId) -> Option<(usize, usize)> {
        self.nodes[id.index()]
            .edge
            .map(|e| (e.start, e.end_at(self.open_end)))
    }

    /// Length of the incoming edge (0 for the root)
    pub fn edge_len(&self, id: NodeId) -> usize {
        self.nodes[id.index()]
            .edge
            .map_or(0, |e| e.len_at(self.open_end))
    }

    /// Symbols on the incoming edge
    pub fn edge_label(&self, id: NodeId) -> &[Symbol] {
        match self.edge_range(id) {
            Some((start, end)) => &self.text[start..=end],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_count(tree: &SuffixTree) -> usize {
        tree.nodes().iter().filter(|n| n.is_leaf()).count()
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            SuffixTree::build(b""),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_single_sentinel() {
        let tree = SuffixTree::build(b"$").unwrap();
        assert_eq!(tree.node_count(), 2);
        let root = tree.node(tree.root());
        assert_eq!(root.child_count(), 1);
        let leaf = root.child(b'$').unwrap();
        assert!(tree.node(leaf).is_leaf());
        assert_eq!(tree.edge_range(leaf), Some((0, 0)));
    }

    #[test]
    fn test_two_symbols() {
        let tree = SuffixTree::build(b"a$").unwrap();
        let root = tree.node(tree.root());
        assert_eq!(root.child_count(), 2);
        let a = root.child(b'a').unwrap();
        let end = root.child(b'$').unwrap();
        assert_eq!(tree.edge_label(a), b"a$");
        assert_eq!(tree.edge_label(end), b"$");
    }

    #[test]
    fn test_root_links_to_itself() {
        let tree = SuffixTree::build(b"mississippi$").unwrap();
        assert_eq!(tree.node(tree.root()).suffix_link(), Some(NodeId::ROOT));
    }

    #[test]
    fn test_one_leaf_per_suffix() {
        for text in [&b"banana$"[..], b"mississippi$", b"aaaaaa$", b"abcabxabcd$"] {
            let tree = SuffixTree::build(text).unwrap();
            assert_eq!(leaf_count(&tree), text.len(), "text {:?}", text);
        }
    }

    #[test]
    fn test_banana_structure() {
        let tree = SuffixTree::build(b"banana$").unwrap();
        // 7 leaves, internal nodes for "a", "ana", "na" and the root
        assert_eq!(tree.node_count(), 11);

        let root = tree.node(tree.root());
        let a = root.child(b'a').unwrap();
        assert_eq!(tree.edge_label(a), b"a");
        assert_eq!(tree.node(a).child_count(), 2);

        let na = root.child(b'n').unwrap();
        assert_eq!(tree.edge_label(na), b"na");

        let ana = tree.node(a).child(b'n').unwrap();
        assert_eq!(tree.edge_label(ana), b"na");

        // "ana" -> "na" -> "a" -> root
        assert_eq!(tree.node(ana).suffix_link(), Some(na));
        assert_eq!(tree.node(na).suffix_link(), Some(a));
        assert_eq!(tree.node(a).suffix_link(), Some(NodeId::ROOT));
    }

    #[test]
    fn test_leaf_edges_share_open_end() {
        let tree = SuffixTree::build(b"abab$").unwrap();
        for node in tree.nodes().iter().filter(|n| n.is_leaf()) {
            let edge = node.edge().unwrap();
            assert_eq!(edge.end, EdgeEnd::Open);
            assert_eq!(edge.end_at(tree.open_end), 4);
        }
    }

    #[test]
    fn test_stepwise_build_matches_full_build() {
        let text = b"abcabxabcd$";
        let mut builder = SuffixTreeBuilder::new(text).unwrap();
        let mut steps = 0;
        while builder.step() {
            steps += 1;
            assert_eq!(builder.phases_done(), steps);
        }
        assert!(builder.is_complete());
        let stepped = builder.finish();
        let full = SuffixTree::build(text).unwrap();
        assert_eq!(stepped.node_count(), full.node_count());
    }

    #[test]
    fn test_phase_state_starts_empty() {
        let phase = PhaseState::new(5);
        assert_eq!(phase.index, 5);
        assert!(phase.pending.is_none());
    }

    #[test]
    fn test_phase_state_resolve_links_and_clears() {
        let mut nodes = vec![Node::root(), Node::internal(0, 1), Node::internal(1, 1)];
        let mut phase = PhaseState::new(2);
        phase.pending = Some(NodeId::from_index(1));

        phase.resolve(&mut nodes, NodeId::from_index(2));
        assert_eq!(nodes[1].suffix_link, Some(NodeId::from_index(2)));
        assert!(phase.pending.is_none());

        // Nothing pending: no link changes
        phase.resolve(&mut nodes, NodeId::ROOT);
        assert_eq!(nodes[1].suffix_link, Some(NodeId::from_index(2)));
        assert_eq!(nodes[2].suffix_link, None);
    }

    #[test]
    fn test_pending_split_linked_to_root_at_phase_end() {
        // Phase 4 splits the "aba" leaf at "a", then finds "a" already
        // present at the root; the split node is still pending when the
        // phase ends
        let mut builder = SuffixTreeBuilder::new(b"abaa$").unwrap();
        for _ in 0..3 {
            builder.step();
        }
        assert_eq!(builder.tree.node_count(), 3);

        builder.step();
        let split = builder.tree.node(NodeId::ROOT).child(b'a').unwrap();
        assert!(!builder.tree.node(split).is_leaf());
        assert_eq!(builder.tree.edge_label(split), b"a");
        assert_eq!(builder.tree.node(split).suffix_link(), Some(NodeId::ROOT));
    }

    #[test]
    fn test_every_internal_node_linked_after_each_phase() {
        for text in [&b"abaa$"[..], b"abcabxabcd$", b"mississippi$", b"aabaaabaab$"] {
            let mut builder = SuffixTreeBuilder::new(text).unwrap();
            while builder.step() {
                for (index, node) in builder.tree.nodes().iter().enumerate() {
                    assert!(
                        node.is_leaf() || node.suffix_link().is_some(),
                        "{:?}: node {} unlinked after phase {}",
                        String::from_utf8_lossy(text),
                        index + 1,
                        builder.phases_done()
                    );
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "no incoming edge")]
    fn test_root_edge_lookup_is_fatal() {
        let tree = SuffixTree::build(b"banana$").unwrap();
        let _ = tree.edge_of(NodeId::ROOT);
    }
}
