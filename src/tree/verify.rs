//! Structural verification of a built suffix tree
//!
//! Used by tests and by `sfx stats --verify`. A failure here means the
//! builder has a defect; it is never the caller's fault.

use super::builder::SuffixTree;
use super::types::NodeId;
use crate::error::{Error, Result};

impl SuffixTree {
    /// Check every structural invariant of the tree
    ///
    /// - every non-root node has an incoming edge, the root has none
    /// - internal nodes have at least two children (the root may have one
    ///   only when the text is a single symbol)
    /// - there is exactly one leaf per suffix and each spells its suffix
    /// - the root links to itself; every other internal node links to an
    ///   internal node whose path label is its own minus the first symbol
    pub fn check_invariants(&self) -> Result<()> {
        let n = self.len();
        let depths = self.node_depths();
        let mut leaves = 0;

        for (index, node) in self.nodes().iter().enumerate() {
            let id = NodeId::from_index(index);
            let is_root = id == NodeId::ROOT;

            if is_root == node.edge().is_some() {
                return Err(Error::structural(format!(
                    "node {} has an unexpected incoming edge state",
                    id.number()
                )));
            }

            if node.is_leaf() && !is_root {
                leaves += 1;
                let label = self.path_label(id, &depths);
                let start = self.suffix_start(label.len());
                if label != &self.text()[start - 1..] {
                    return Err(Error::structural(format!(
                        "leaf {} does not spell suffix {}",
                        id.number(),
                        start
                    )));
                }
                continue;
            }

            let min_children = if is_root && n == 1 { 1 } else { 2 };
            if node.child_count() < min_children {
                return Err(Error::structural(format!(
                    "node {} has {} child(ren)",
                    id.number(),
                    node.child_count()
                )));
            }

            let Some(link) = node.suffix_link() else {
                return Err(Error::structural(format!(
                    "internal node {} has no suffix link",
                    id.number()
                )));
            };
            if is_root {
                if link != NodeId::ROOT {
                    return Err(Error::structural("root suffix link is not a self-loop"));
                }
                continue;
            }
            if self.node(link).is_leaf() {
                return Err(Error::structural(format!(
                    "node {} links to leaf {}",
                    id.number(),
                    link.number()
                )));
            }
            let label = self.path_label(id, &depths);
            if self.path_label(link, &depths) != label.get(1..).unwrap_or(&[]) {
                return Err(Error::structural(format!(
                    "suffix link {} -> {} does not drop exactly one symbol",
                    id.number(),
                    link.number()
                )));
            }
        }

        if leaves != n {
            return Err(Error::structural(format!(
                "{leaves} leaves for a text of length {n}"
            )));
        }
        Ok(())
    }
}
