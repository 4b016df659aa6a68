// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary to whatever draws the outline.

use alloc::{string::String, vec::Vec};

use crate::editor::Session;
use crate::tree::Outline;
use crate::types::{Collapse, NodeFlags, NodeId, NodeLayout};

/// Snapshot of one node handed to a [`Renderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeView {
    /// Node identifier; stable across edits, suitable as a render key.
    pub id: NodeId,
    /// Parent, or `None` for the root.
    pub parent: Option<NodeId>,
    /// Current label.
    pub name: String,
    /// Temp / input-slot flags.
    pub flags: NodeFlags,
    /// Collapse state, for drawing the toggle.
    pub collapse: Collapse,
    /// Committed layout.
    pub layout: NodeLayout,
    /// Number of children of the parent, counting this node; 1 for the root.
    pub siblings: usize,
    /// Part of the selection.
    pub selected: bool,
    /// Currently being renamed.
    pub editing: bool,
    /// The dragged node or one of its descendants.
    pub dragging: bool,
}

impl NodeView {
    /// First among its siblings.
    pub fn is_first(&self) -> bool {
        self.layout.child_index == 0
    }

    /// Last among its siblings.
    pub fn is_last(&self) -> bool {
        self.layout.child_index + 1 == self.siblings
    }

    /// Has at least one child.
    pub fn is_branch(&self) -> bool {
        self.layout.child_count > 0
    }
}

/// Host-side collaborator that draws the outline and asks the user questions.
///
/// Every method has a default, so hosts implement only what they need. The
/// unit type `()` is a renderer that draws nothing and declines every
/// confirmation.
pub trait Renderer {
    /// Redraw from the full list of nodes, in pre-order.
    fn update(&mut self, nodes: &[NodeView]) {
        let _ = nodes;
    }

    /// Open an inline text editor on `node`.
    fn begin_rename(&mut self, node: NodeId) {
        let _ = node;
    }

    /// Ask the user whether `node` and its descendants should be deleted.
    ///
    /// Declines by default, so deleting a branch without a host never succeeds.
    fn confirm_delete(&mut self, node: NodeId) -> bool {
        let _ = node;
        false
    }
}

impl Renderer for () {}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn update(&mut self, nodes: &[NodeView]) {
        (**self).update(nodes);
    }

    fn begin_rename(&mut self, node: NodeId) {
        (**self).begin_rename(node);
    }

    fn confirm_delete(&mut self, node: NodeId) -> bool {
        (**self).confirm_delete(node)
    }
}

impl Outline {
    /// Snapshot every node reachable from the root, in pre-order.
    ///
    /// Hidden nodes are included with `layout.visible == false` so hosts can
    /// animate them out.
    pub fn views(&self) -> Vec<NodeView> {
        collect_views(self, None)
    }
}

pub(crate) fn collect_views(outline: &Outline, session: Option<&Session>) -> Vec<NodeView> {
    let dragged = session.and_then(|s| s.dragging()).map(|d| d.node);
    outline
        .iter()
        .map(|id| {
            let node = outline.node(id);
            NodeView {
                id,
                parent: node.parent,
                name: node.name.clone(),
                flags: node.flags,
                collapse: node.collapse,
                layout: node.layout,
                siblings: node.parent.map_or(1, |p| outline.children_of(p).len()),
                selected: session.is_some_and(|s| s.selection().contains(id)),
                editing: session.is_some_and(|s| s.editing() == Some(id)),
                dragging: dragged.is_some_and(|d| outline.is_in_subtree(d, id)),
            }
        })
        .collect()
}
