// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core outline storage: arena, structural queries, and structural primitives.

use alloc::{string::String, vec, vec::Vec};
use hashbrown::HashMap;

use crate::error::OutlineError;
use crate::layout::LayoutSummary;
use crate::types::{Collapse, LeafBounds, NodeFlags, NodeId, NodeLayout};

/// An editable outline tree with a single root.
///
/// Nodes live in an arena keyed by [`NodeId`]; parent and child links are stored
/// as identifiers. Stored child order *is* sibling order.
///
/// Structural changes ([`Outline::insert_child`], [`Outline::detach_child`]) and
/// data changes (name, collapse state, leaf bounds) do **not** update the derived
/// [`NodeLayout`]. Call [`Outline::commit`] afterwards to recompute it for the
/// whole tree. [`Editor`](crate::Editor) does this after every edit.
///
/// ## Example
///
/// ```rust
/// use understory_outline::{NodeId, Outline};
///
/// let mut outline = Outline::new(NodeId::new(1), "root");
/// let a = outline.create_node("A").unwrap();
/// outline.insert_child(outline.root(), a, None).unwrap();
/// let b = outline.create_node("B").unwrap();
/// outline.insert_child(outline.root(), b, None).unwrap();
///
/// let summary = outline.commit();
/// assert_eq!(summary.rows, 2);
/// assert_eq!(outline.layout(b).unwrap().row, 1);
/// ```
#[derive(Clone)]
pub struct Outline {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    /// next identifier handed out; above every id ever seen, `None` once `u64::MAX` is taken
    next_id: Option<u64>,
    summary: LayoutSummary,
}

impl core::fmt::Debug for Outline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Outline")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("next_id", &self.next_id)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
    pub(crate) collapse: Collapse,
    pub(crate) bounds: Option<LeafBounds>,
    pub(crate) layout: NodeLayout,
}

impl Node {
    fn new(name: String, flags: NodeFlags) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            flags,
            collapse: Collapse::Unset,
            bounds: None,
            layout: NodeLayout::default(),
        }
    }
}

impl Outline {
    /// Create an outline holding only a root node, already committed.
    pub fn new(root: NodeId, name: impl Into<String>) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(name.into(), NodeFlags::empty()));
        let mut outline = Self {
            nodes,
            root,
            next_id: root.0.checked_add(1),
            summary: LayoutSummary::default(),
        };
        outline.commit();
        outline
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: an outline has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Result of the last [`Outline::commit`].
    pub fn summary(&self) -> LayoutSummary {
        self.summary
    }

    /// Create a detached node with a fresh identifier.
    ///
    /// The node takes part in layout only once it has been attached with
    /// [`Outline::insert_child`].
    ///
    /// Fails with [`OutlineError::IdsExhausted`] once `u64::MAX` has been handed
    /// out or loaded, since identifiers are never reused.
    pub fn create_node(&mut self, name: impl Into<String>) -> Result<NodeId, OutlineError> {
        self.alloc(name.into(), NodeFlags::empty())
    }

    /// Returns the parent of a node, or `None` for the root, detached nodes, or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |n| &n.children)
    }

    /// Returns true if the node has at least one child, visible or not.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children_of(id).is_empty()
    }

    /// Returns true if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Returns true if `id` is `root` or lies below it.
    pub fn is_in_subtree(&self, root: NodeId, id: NodeId) -> bool {
        root == id || self.is_ancestor_of(root, id)
    }

    /// Label of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.name.as_str())
    }

    /// Flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.nodes.get(&id).map(|n| n.flags)
    }

    /// Collapse state of a node.
    pub fn collapse(&self, id: NodeId) -> Option<Collapse> {
        self.nodes.get(&id).map(|n| n.collapse)
    }

    /// Leaf-count bounds declared by a node, if any.
    pub fn leaf_bounds(&self, id: NodeId) -> Option<LeafBounds> {
        self.nodes.get(&id).and_then(|n| n.bounds)
    }

    /// Derived layout of a node as of the last [`Outline::commit`].
    pub fn layout(&self, id: NodeId) -> Option<NodeLayout> {
        self.nodes.get(&id).map(|n| n.layout)
    }

    /// Update the label of a node. Takes effect immediately; no commit needed.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.name = name.into();
        }
    }

    /// Update the collapse state of a node.
    pub fn set_collapse(&mut self, id: NodeId, collapse: Collapse) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.collapse = collapse;
        }
    }

    /// Update the leaf-count bounds of a node.
    ///
    /// Input slots are not adjusted here; run
    /// [`sync_input_slots`](crate::sync_input_slots) afterwards.
    pub fn set_leaf_bounds(&mut self, id: NodeId, bounds: Option<LeafBounds>) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.bounds = bounds;
        }
    }

    /// Insert a detached `node` as a child of `parent` at `index`.
    ///
    /// `None` or an index past the end appends. The depth of `node` and of its
    /// whole subtree is updated right away, regardless of collapse state; the rest
    /// of the layout waits for [`Outline::commit`].
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        node: NodeId,
        index: Option<usize>,
    ) -> Result<(), OutlineError> {
        if !self.contains(parent) {
            return Err(OutlineError::InvalidParent(parent));
        }
        let Some(n) = self.nodes.get(&node) else {
            return Err(OutlineError::UnknownNode(node));
        };
        if n.parent.is_some() || node == self.root {
            return Err(OutlineError::AlreadyAttached(node));
        }
        if self.is_in_subtree(node, parent) {
            return Err(OutlineError::Cycle { parent, node });
        }

        let parent_node = self.node_mut(parent);
        let depth = parent_node.layout.depth + 1;
        match index {
            Some(i) if i < parent_node.children.len() => parent_node.children.insert(i, node),
            _ => parent_node.children.push(node),
        }
        self.node_mut(node).parent = Some(parent);
        self.set_subtree_depth(node, depth);
        Ok(())
    }

    /// Remove `node` from the children of `parent`, leaving it detached.
    pub fn detach_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), OutlineError> {
        let Some(p) = self.nodes.get_mut(&parent) else {
            return Err(OutlineError::InvalidParent(parent));
        };
        let Some(pos) = p.children.iter().position(|&c| c == node) else {
            return Err(OutlineError::NotFound { parent, node });
        };
        p.children.remove(pos);
        self.node_mut(node).parent = None;
        Ok(())
    }

    /// Get the next node in depth-first (pre-order) traversal.
    ///
    /// Returns `None` after the last node or for stale ids.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if let Some(&first_child) = self.children_of(current).first() {
            return Some(first_child);
        }

        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Get the previous node in depth-first (pre-order) traversal.
    ///
    /// Returns `None` for the root, detached nodes, and stale ids.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(current)?;
        let siblings = self.children_of(parent);
        let pos = siblings.iter().position(|&id| id == current)?;
        let Some(&prev) = pos.checked_sub(1).and_then(|i| siblings.get(i)) else {
            return Some(parent);
        };
        let mut node = prev;
        while let Some(&last) = self.children_of(node).last() {
            node = last;
        }
        Some(node)
    }

    /// Iterate the nodes reachable from the root in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(Some(self.root), |&id| self.next_depth_first(id))
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(&id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(&id).expect("dangling NodeId")
    }

    pub(crate) fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.flags = flags;
        }
    }

    pub(crate) fn set_summary(&mut self, summary: LayoutSummary) {
        self.summary = summary;
    }

    /// Allocate a detached node with the next unused identifier.
    pub(crate) fn alloc(
        &mut self,
        name: String,
        flags: NodeFlags,
    ) -> Result<NodeId, OutlineError> {
        let raw = self.next_id.ok_or(OutlineError::IdsExhausted)?;
        self.next_id = raw.checked_add(1);
        let id = NodeId(raw);
        self.nodes.insert(id, Node::new(name, flags));
        Ok(id)
    }

    /// How many more identifiers [`Outline::alloc`] can hand out.
    pub(crate) fn free_ids(&self) -> u64 {
        self.next_id.map_or(0, |n| (u64::MAX - n).saturating_add(1))
    }

    /// Allocate a detached node under a caller-chosen identifier.
    ///
    /// Returns `false` and leaves the arena untouched if the id is taken.
    pub(crate) fn alloc_with_id(&mut self, id: NodeId, name: String, flags: NodeFlags) -> bool {
        if self.contains(id) {
            return false;
        }
        self.next_id = match (self.next_id, id.0.checked_add(1)) {
            (Some(next), Some(above)) => Some(next.max(above)),
            _ => None,
        };
        self.nodes.insert(id, Node::new(name, flags));
        true
    }

    /// Detach `id` if attached and free it together with its subtree.
    ///
    /// Returns the freed identifiers in pre-order. The root is never freed.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.root || !self.contains(id) {
            return Vec::new();
        }
        if let Some(parent) = self.parent_of(id) {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children.iter().rev());
                removed.push(current);
            }
        }
        removed
    }

    fn set_subtree_depth(&mut self, id: NodeId, depth: usize) {
        let mut stack = vec![(id, depth)];
        while let Some((current, depth)) = stack.pop() {
            let node = self.node_mut(current);
            node.layout.depth = depth;
            stack.extend(node.children.iter().map(|&c| (c, depth + 1)));
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }
}
