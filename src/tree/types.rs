//! Types for suffix tree construction
//!
//! Nodes live in a single arena owned by the tree and refer to each other
//! by [`NodeId`]. Leaf edges never store their end position: they are
//! marked [`EdgeEnd::Open`] and resolved against the tree's open-end
//! counter, so advancing that counter extends every leaf at once.

use rustc_hash::FxHashMap;

/// Symbol type (one byte per text position)
pub type Symbol = u8;

/// Index of a node in the tree arena, in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node created
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Position in the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based creation number (the root is node 1)
    #[inline]
    pub fn number(self) -> u32 {
        self.0 + 1
    }
}

/// End of an edge label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// Inclusive end position fixed at split time
    Fixed(usize),
    /// Leaf edge that tracks the tree's open end
    Open,
}

/// Incoming edge label `[start, end]` (0-based, inclusive) into the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub end: EdgeEnd,
}

impl Edge {
    /// Resolve the end position against the current open end
    #[inline]
    pub fn end_at(&self, open_end: usize) -> usize {
        match self.end {
            EdgeEnd::Fixed(end) => end,
            EdgeEnd::Open => open_end,
        }
    }

    /// Number of symbols on the edge
    #[inline]
    pub fn len_at(&self, open_end: usize) -> usize {
        self.end_at(open_end) + 1 - self.start
    }
}

/// A vertex of the suffix tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Children keyed by the first symbol of their incoming edge
    pub(crate) children: FxHashMap<Symbol, NodeId>,
    /// Incoming edge, `None` for the root
    pub(crate) edge: Option<Edge>,
    /// Suffix link, set for the root and for internal nodes once resolved
    pub(crate) suffix_link: Option<NodeId>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            children: FxHashMap::default(),
            edge: None,
            suffix_link: None,
        }
    }

    pub(crate) fn leaf(start: usize) -> Self {
        Self {
            children: FxHashMap::default(),
            edge: Some(Edge {
                start,
                end: EdgeEnd::Open,
            }),
            suffix_link: None,
        }
    }

    pub(crate) fn internal(start: usize, end: usize) -> Self {
        Self {
            children: FxHashMap::default(),
            edge: Some(Edge {
                start,
                end: EdgeEnd::Fixed(end),
            }),
            suffix_link: None,
        }
    }

    /// Child whose edge starts with `symbol`
    #[inline]
    pub fn child(&self, symbol: Symbol) -> Option<NodeId> {
        self.children.get(&symbol).copied()
    }

    /// Incoming edge (`None` for the root)
    #[inline]
    pub fn edge(&self) -> Option<Edge> {
        self.edge
    }

    #[inline]
    pub fn suffix_link(&self) -> Option<NodeId> {
        self.suffix_link
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children in ascending order of first symbol
    pub fn sorted_children(&self) -> Vec<(Symbol, NodeId)> {
        let mut children: Vec<_> = self.children.iter().map(|(&s, &id)| (s, id)).collect();
        children.sort_unstable_by_key(|&(s, _)| s);
        children
    }
}

/// Outcome of a single extension step during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Rule 2: a new leaf hangs directly off the active node
    NewLeaf,
    /// Rule 2: an edge was split and a leaf attached to the new internal node
    Split,
    /// Rule 3: the extension is already implicit in the tree; the phase ends
    AlreadyPresent,
    /// The active point moved down one edge; the same extension is retried
    WalkDown,
}
