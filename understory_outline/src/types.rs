// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline: node identifiers, flags, collapse state, and derived layout.

use core::fmt;

/// Identifier for a node in an [`Outline`](crate::Outline).
///
/// Identifiers come from the loaded [`Document`](crate::Document) or are assigned by the
/// outline when nodes are created. They are never reused while the outline is alive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Wrap a raw document identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Node flags describing how the editor may treat a node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Placeholder created by an append, waiting for its first name.
        const TEMP       = 0b0000_0001;
        /// Synthetic answer slot managed by [`sync_input_slots`](crate::sync_input_slots).
        ///
        /// Input slots cannot be moved, renamed, dragged, or given children.
        const INPUT_SLOT = 0b0000_0010;
    }
}

/// Collapse state of a node.
///
/// A node that has never been toggled is [`Collapse::Unset`], which lays out as open.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Collapse {
    /// Never toggled; open by default.
    #[default]
    Unset,
    /// Children are hidden.
    Collapsed,
    /// Explicitly reopened.
    Expanded,
}

impl Collapse {
    /// Returns `true` if descendants of the node are hidden.
    pub const fn is_collapsed(self) -> bool {
        matches!(self, Self::Collapsed)
    }

    /// The state after one toggle. The first toggle of an unset node collapses it.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unset | Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }
}

/// Minimum/maximum leaf-count bounds declared by a node.
///
/// Bounds are only meaningful when both values are non-negative; see [`LeafBounds::is_active`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeafBounds {
    /// Minimum number of answers.
    pub minimum: i64,
    /// Maximum number of answers.
    pub maximum: i64,
}

impl LeafBounds {
    /// Build bounds from the optional document fields; `None` unless both are present.
    pub fn from_parts(minimum: Option<i64>, maximum: Option<i64>) -> Option<Self> {
        Some(Self {
            minimum: minimum?,
            maximum: maximum?,
        })
    }

    /// Whether these bounds require an input slot under the node.
    pub const fn is_active(&self) -> bool {
        self.minimum >= 0 && self.maximum >= 0
    }
}

/// Layout data derived by [`Outline::commit`](crate::Outline::commit).
///
/// None of these fields are set by hand; they are recomputed for the whole tree on
/// every commit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeLayout {
    /// Position among siblings, from 0.
    pub child_index: usize,
    /// Number of children, visible or not.
    pub child_count: usize,
    /// Distance from the root; also the column.
    pub depth: usize,
    /// `false` if any ancestor is collapsed.
    pub visible: bool,
    /// Rows reserved below this node for its visible leaves.
    pub leaf_span: usize,
    /// Vertical slot, shared by a node and its first child.
    pub row: usize,
}

impl NodeLayout {
    /// Column of the node; always equal to its depth.
    pub const fn column(&self) -> usize {
        self.depth
    }
}
