// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered selection set.

use smallvec::SmallVec;

use crate::types::NodeId;

/// The selected nodes, in the order they were selected.
///
/// Click-selection may hold several nodes for bulk delete. Keyboard navigation
/// and appends always act on the [primary](Selection::primary) node, the first one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: SmallVec<[NodeId; 4]>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first selected node.
    pub fn primary(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected nodes in selection order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Replace the selection, dropping repeats but keeping first-seen order.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Select exactly one node.
    pub fn set_single(&mut self, id: NodeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only the nodes for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }
}
