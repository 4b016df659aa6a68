// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional keyboard navigation over the laid-out outline.
//!
//! Moves use the committed `row`, `depth`, and `child_index` only; no pixel
//! geometry is consulted. Only visible nodes are candidates.

use crate::tree::Outline;
use crate::types::NodeId;

/// Direction of a selection move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Nearest node above at the same depth.
    Up,
    /// Nearest node below at the same depth.
    Down,
    /// The parent.
    Left,
    /// The first child.
    Right,
}

/// Compute the node a selection should move to from `origin`.
///
/// Returns `None` when there is no candidate in that direction or `origin` is stale;
/// callers keep the current selection in that case.
pub fn navigate(outline: &Outline, origin: NodeId, direction: Direction) -> Option<NodeId> {
    let from = outline.layout(origin)?;
    match direction {
        Direction::Left => outline.parent_of(origin),
        Direction::Right => {
            let first = *outline.children_of(origin).first()?;
            let layout = outline.layout(first)?;
            (layout.visible && layout.child_index == 0 && layout.depth == from.depth + 1)
                .then_some(first)
        }
        Direction::Up | Direction::Down => {
            let mut best: Option<(NodeId, usize)> = None;
            for id in outline.iter() {
                let Some(candidate) = outline.layout(id) else {
                    continue;
                };
                if !candidate.visible || candidate.depth != from.depth {
                    continue;
                }
                let closer = match (direction, best) {
                    (Direction::Up, _) if candidate.row >= from.row => false,
                    (Direction::Down, _) if candidate.row <= from.row => false,
                    (_, None) => true,
                    // Ties go to the later node going up and the earlier one going down.
                    (Direction::Up, Some((_, row))) => candidate.row >= row,
                    (_, Some((_, row))) => candidate.row < row,
                };
                if closer {
                    best = Some((id, candidate.row));
                }
            }
            best.map(|(id, _)| id)
        }
    }
}
