// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row layout: child indices, visibility, leaf spans, and rows.
//!
//! The layout is recomputed from scratch for every node reachable from the root
//! in three passes, each depending only on the previous one:
//!
//! 1. Pre-order: `child_index`, `child_count`, `depth`, and `visible`.
//! 2. Post-order: `leaf_span`, counting visible rows only.
//! 3. Pre-order: `row`. A first child shares its parent's row; a later sibling
//!    starts one row below the last row reserved by the sibling before it.

use alloc::vec::Vec;
use core::mem;

use crate::tree::Outline;
use crate::types::NodeId;

/// Extent of the visible tree after a commit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutSummary {
    /// Number of columns in use: deepest visible depth plus one.
    pub columns: usize,
    /// Number of rows in use: largest visible row plus one.
    pub rows: usize,
    /// Number of visible nodes.
    pub visible: usize,
}

impl Outline {
    /// Recompute the derived layout of every node reachable from the root.
    ///
    /// Detached nodes are left untouched. The returned summary is also
    /// available afterwards through [`Outline::summary`].
    pub fn commit(&mut self) -> LayoutSummary {
        let order: Vec<NodeId> = self.iter().collect();

        self.assign_indices(&order);
        self.assign_leaf_spans(&order);
        self.assign_rows(&order);

        let mut summary = LayoutSummary::default();
        for &id in &order {
            let layout = self.node(id).layout;
            if !layout.visible {
                continue;
            }
            summary.visible += 1;
            summary.columns = summary.columns.max(layout.depth + 1);
            summary.rows = summary.rows.max(layout.row + 1);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = order.len(),
            visible = summary.visible,
            rows = summary.rows,
            columns = summary.columns,
            "outline.commit"
        );

        self.set_summary(summary);
        summary
    }

    fn assign_indices(&mut self, order: &[NodeId]) {
        let root = self.root();
        let layout = &mut self.node_mut(root).layout;
        layout.child_index = 0;
        layout.depth = 0;
        layout.visible = true;

        for &id in order {
            let node = self.node_mut(id);
            let depth = node.layout.depth;
            let children_visible = node.layout.visible && !node.collapse.is_collapsed();
            node.layout.child_count = node.children.len();
            let children = mem::take(&mut node.children);

            for (i, &child) in children.iter().enumerate() {
                let layout = &mut self.node_mut(child).layout;
                layout.child_index = i;
                layout.depth = depth + 1;
                layout.visible = children_visible;
            }
            self.node_mut(id).children = children;
        }
    }

    fn assign_leaf_spans(&mut self, order: &[NodeId]) {
        // Reverse pre-order visits every child before its parent.
        for &id in order.iter().rev() {
            let node = self.node(id);
            let span = if node.layout.visible {
                node.children
                    .iter()
                    .map(|&c| self.node(c).layout)
                    .filter(|l| l.visible)
                    // Each visible child takes one row, plus the rows its own
                    // leaves need beyond the one it shares with its first child.
                    .map(|l| 1 + l.leaf_span.saturating_sub(1))
                    .sum()
            } else {
                0
            };
            self.node_mut(id).layout.leaf_span = span;
        }
    }

    fn assign_rows(&mut self, order: &[NodeId]) {
        let root = self.root();
        self.node_mut(root).layout.row = 0;

        for &id in order {
            let node = self.node_mut(id);
            let parent_row = node.layout.row;
            let children = mem::take(&mut node.children);

            let mut previous: Option<(usize, usize)> = None;
            for &child in &children {
                let layout = &mut self.node_mut(child).layout;
                layout.row = match previous {
                    Some((row, span)) if layout.visible => row + span.saturating_sub(1) + 1,
                    _ => parent_row,
                };
                previous = Some((layout.row, layout.leaf_span));
            }
            self.node_mut(id).children = children;
        }
    }
}
