// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move legality and drag drop zones.
//!
//! A move names a target parent and an insertion index counted *before* the moved
//! node is taken out of its current list. [`settled_index`] converts that into the
//! index the node will actually occupy, and [`is_legal_move`] rejects moves that
//! would leave the node exactly where it is.

use alloc::vec::Vec;

use crate::tree::Outline;
use crate::types::{NodeFlags, NodeId};

/// Returns `false` if moving `node` to (`target_parent`, `target_index`, `target_depth`)
/// would leave it in an indistinguishable position.
///
/// `target_index` must already be settled (see [`settled_index`]). Stale nodes are
/// never legal to move.
pub fn is_legal_move(
    outline: &Outline,
    node: NodeId,
    target_parent: NodeId,
    target_index: usize,
    target_depth: usize,
) -> bool {
    let Some(layout) = outline.layout(node) else {
        return false;
    };
    let same_parent = outline.parent_of(node) == Some(target_parent);
    !(same_parent && layout.child_index == target_index && layout.depth == target_depth)
}

/// The index `node` will occupy once inserted at `index` under `parent`.
///
/// Indices past the end are clamped to an append. When `parent` is the node's
/// current parent and `index` lies after it, the node's own removal shifts the
/// index down by one.
pub fn settled_index(outline: &Outline, node: NodeId, parent: NodeId, index: usize) -> usize {
    let index = index.min(outline.children_of(parent).len());
    let current = outline.layout(node).map(|l| l.child_index);
    match current {
        Some(current) if outline.parent_of(node) == Some(parent) && current < index => index - 1,
        _ => index,
    }
}

/// A place a dragged node can be dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DropZone {
    /// Parent the node would be inserted under.
    pub parent: NodeId,
    /// Insertion index, counted before the dragged node is removed.
    pub index: usize,
    /// Depth the dropped node would have.
    pub depth: usize,
    /// Node the zone is drawn against: the zone sits just above it, or just below
    /// it when [`DropZone::after`] is set.
    pub anchor: NodeId,
    /// The zone follows the last child of `parent`.
    pub after: bool,
    /// Dropping here would change the tree.
    pub enabled: bool,
}

/// Drop zones offered while `dragged` is being dragged, in pre-order of their anchors.
///
/// Every visible non-root node gets a zone just above it, and every last child a
/// second one just below it. A zone is disabled when its anchor is `dragged` or
/// lies inside its subtree, when its anchor is an input slot, or when it is the
/// position directly after `dragged` among its own siblings.
pub fn drop_zones(outline: &Outline, dragged: NodeId) -> Vec<DropZone> {
    let mut zones = Vec::new();
    let Some(dragged_layout) = outline.layout(dragged) else {
        return zones;
    };
    let dragged_parent = outline.parent_of(dragged);

    for anchor in outline.iter() {
        let Some(parent) = outline.parent_of(anchor) else {
            continue;
        };
        let Some(layout) = outline.layout(anchor) else {
            continue;
        };
        if !layout.visible {
            continue;
        }
        let blocked = outline.is_in_subtree(dragged, anchor)
            || outline
                .flags(anchor)
                .is_some_and(|f| f.contains(NodeFlags::INPUT_SLOT));
        let zone = |index: usize, after: bool| {
            let right_after_self =
                dragged_parent == Some(parent) && dragged_layout.child_index + 1 == index;
            DropZone {
                parent,
                index,
                depth: layout.depth,
                anchor,
                after,
                enabled: !blocked && !right_after_self,
            }
        };

        zones.push(zone(layout.child_index, false));
        if layout.child_index + 1 == outline.children_of(parent).len() {
            zones.push(zone(layout.child_index + 1, true));
        }
    }
    zones
}
