// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive editing on top of an [`Outline`].
//!
//! [`Editor`] owns the tree, the interaction [`Session`] (selection, the node being
//! renamed, the node being dragged), and a [`Renderer`]. Every applied edit
//! recomputes the layout of the whole tree and hands the new node list to the
//! renderer. Edits that are defined to do nothing come back as
//! [`Outcome::Skipped`] with the reason; only references to nodes that do not
//! exist are errors.
//!
//! ## Example
//!
//! ```rust
//! use understory_outline::{Document, Editor, EditorConfig, Outcome};
//!
//! let doc = Document::leaf(0, "root")
//!     .child(Document::leaf(1, "A"))
//!     .child(Document::leaf(2, "B"));
//! let mut editor = Editor::load(&doc, EditorConfig::default(), ()).unwrap();
//!
//! let a = editor.outline().children_of(editor.outline().root())[0];
//! let Ok(Outcome::Inserted(temp)) = editor.append_sibling(a) else {
//!     panic!("append should apply");
//! };
//! editor.commit_rename("A'").unwrap();
//! assert_eq!(editor.outline().name(temp), Some("A'"));
//! assert_eq!(editor.outline().layout(temp).unwrap().row, 1);
//! ```

use alloc::{string::String, vec::Vec};

use crate::document::Document;
use crate::error::{LoadError, OutlineError};
use crate::host::{NodeView, Renderer, collect_views};
use crate::moves::{DropZone, drop_zones, is_legal_move, settled_index};
use crate::navigation::{Direction, navigate};
use crate::selection::Selection;
use crate::slots::{DEFAULT_INPUT_SLOT_LABEL, SlotSync, sync_input_slots};
use crate::tree::Outline;
use crate::types::{Collapse, LeafBounds, NodeFlags, NodeId};

/// Switches for the editing gestures a host allows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Appending siblings and children.
    pub addable: bool,
    /// Renaming nodes.
    pub editable: bool,
    /// Dragging and moving nodes.
    pub draggable: bool,
    /// Label given to generated input slots.
    pub input_slot_label: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            addable: true,
            editable: true,
            draggable: true,
            input_slot_label: String::from(DEFAULT_INPUT_SLOT_LABEL),
        }
    }
}

/// A drag in progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Drag {
    /// The node being dragged.
    pub node: NodeId,
}

/// Interaction state between edits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    editing: Option<NodeId>,
    dragging: Option<Drag>,
    selection: Selection,
}

impl Session {
    /// The node whose name is being edited.
    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    /// The drag in progress.
    pub fn dragging(&self) -> Option<&Drag> {
        self.dragging.as_ref()
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// Why an edit was a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Skip {
    /// The move would leave the node where it is, or put it inside itself.
    IllegalMove,
    /// The renderer declined to delete a node with children.
    DeleteDeclined,
    /// The root cannot be moved, deleted, dragged, or given siblings.
    RootConstraint,
    /// Input slots cannot be moved, renamed, deleted, dragged, or given children,
    /// and nothing may be placed before one.
    InputSlot,
    /// A rename is in progress; commit or cancel it first.
    Editing,
    /// The gesture is switched off in [`EditorConfig`].
    Disabled,
    /// The new name is blank.
    EmptyName,
    /// Nothing to act on: no edit, no drag, or no node in that direction.
    NoTarget,
    /// Nothing is selected.
    NoSelection,
}

/// Result of an applied or skipped edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A placeholder node was added and opened for renaming.
    Inserted(NodeId),
    /// A node took a new name.
    Renamed(NodeId),
    /// An empty rename left the node as it was.
    Reverted(NodeId),
    /// These nodes were removed, in pre-order.
    Deleted(Vec<NodeId>),
    /// A node was moved.
    Moved {
        /// The moved node.
        node: NodeId,
        /// Its new parent.
        parent: NodeId,
        /// Its new index among siblings.
        index: usize,
    },
    /// A node was collapsed or expanded.
    Toggled {
        /// The toggled node.
        node: NodeId,
        /// Its new state.
        collapse: Collapse,
    },
    /// Keyboard navigation selected a node.
    Focused(NodeId),
    /// The selection was replaced or cleared.
    SelectionChanged,
    /// A rename started.
    EditStarted(NodeId),
    /// A drag started.
    DragStarted(NodeId),
    /// A drag ended without a drop.
    DragCancelled,
    /// Leaf-count bounds changed and input slots were brought in line.
    BoundsChanged(SlotSync),
    /// Nothing changed.
    Skipped(Skip),
}

/// Keys the editor reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Delete the selection.
    Delete,
    /// Append a sibling after the primary selection.
    Enter,
    /// Append a child to the primary selection.
    Tab,
    /// Navigate up.
    Up,
    /// Navigate down.
    Down,
    /// Navigate to the parent.
    Left,
    /// Navigate to the first child.
    Right,
}

/// A user gesture reported by the host, for [`Editor::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// [`Editor::append_sibling`].
    AppendSibling(NodeId),
    /// [`Editor::append_child`].
    AppendChild(NodeId),
    /// [`Editor::begin_edit`].
    BeginEdit(NodeId),
    /// [`Editor::commit_rename`].
    Rename(String),
    /// [`Editor::rename`].
    RenameNode {
        /// Node to rename.
        node: NodeId,
        /// New label.
        name: String,
    },
    /// [`Editor::cancel_edit`].
    CancelEdit,
    /// [`Editor::delete`].
    Delete(NodeId),
    /// [`Editor::delete_selection`].
    DeleteSelection,
    /// [`Editor::move_node`].
    Move {
        /// Node to move.
        node: NodeId,
        /// Target parent.
        parent: NodeId,
        /// Index counted before the node leaves its current list.
        index: usize,
    },
    /// [`Editor::toggle`].
    Toggle(NodeId),
    /// [`Editor::set_leaf_bounds`].
    SetLeafBounds(NodeId, Option<LeafBounds>),
    /// [`Editor::select`].
    Select(Vec<NodeId>),
    /// [`Editor::clear_selection`].
    ClearSelection,
    /// [`Editor::navigate`].
    Navigate(Direction),
    /// [`Editor::begin_drag`].
    BeginDrag(NodeId),
    /// [`Editor::end_drag`].
    EndDrag(Option<DropZone>),
    /// [`Editor::handle_key`].
    Key(Key),
}

/// An outline together with its interaction session and renderer.
#[derive(Debug)]
pub struct Editor<R: Renderer = ()> {
    outline: Outline,
    session: Session,
    config: EditorConfig,
    renderer: R,
}

impl<R: Renderer> Editor<R> {
    /// Wrap an outline, bring its input slots in line, and draw it once.
    ///
    /// Fails with [`OutlineError::IdsExhausted`] if a missing input slot cannot
    /// be given an identifier.
    pub fn new(
        mut outline: Outline,
        config: EditorConfig,
        renderer: R,
    ) -> Result<Self, OutlineError> {
        sync_input_slots(&mut outline, &config.input_slot_label)?;
        let mut editor = Self {
            outline,
            session: Session::default(),
            config,
            renderer,
        };
        editor.settle();
        Ok(editor)
    }

    /// Build the outline from a document and draw it once.
    pub fn load(doc: &Document, config: EditorConfig, renderer: R) -> Result<Self, LoadError> {
        let outline = Outline::from_document(doc, &config.input_slot_label)?;
        Ok(Self::new(outline, config, renderer)?)
    }

    /// The tree.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// The interaction state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give up the editor, returning the tree and the renderer.
    pub fn into_parts(self) -> (Outline, R) {
        (self.outline, self.renderer)
    }

    /// The node list the renderer was last given.
    pub fn views(&self) -> Vec<NodeView> {
        collect_views(&self.outline, Some(&self.session))
    }

    /// Drop zones for the drag in progress; empty when nothing is dragged.
    pub fn drop_zones(&self) -> Vec<DropZone> {
        self.session
            .dragging
            .map_or_else(Vec::new, |d| drop_zones(&self.outline, d.node))
    }

    /// Dispatch a host gesture to the matching operation.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome, OutlineError> {
        match intent {
            Intent::AppendSibling(node) => self.append_sibling(node),
            Intent::AppendChild(node) => self.append_child(node),
            Intent::BeginEdit(node) => self.begin_edit(node),
            Intent::Rename(name) => self.commit_rename(&name),
            Intent::RenameNode { node, name } => self.rename(node, &name),
            Intent::CancelEdit => self.cancel_edit(),
            Intent::Delete(node) => self.delete(node),
            Intent::DeleteSelection => self.delete_selection(),
            Intent::Move {
                node,
                parent,
                index,
            } => self.move_node(node, parent, index),
            Intent::Toggle(node) => self.toggle(node),
            Intent::SetLeafBounds(node, bounds) => self.set_leaf_bounds(node, bounds),
            Intent::Select(ids) => self.select(ids),
            Intent::ClearSelection => self.clear_selection(),
            Intent::Navigate(direction) => self.navigate(direction),
            Intent::BeginDrag(node) => self.begin_drag(node),
            Intent::EndDrag(zone) => self.end_drag(zone),
            Intent::Key(key) => self.handle_key(key),
        }
    }

    /// Insert a placeholder right after `anchor` among its siblings and start renaming it.
    pub fn append_sibling(&mut self, anchor: NodeId) -> Result<Outcome, OutlineError> {
        self.append(anchor, false)
    }

    /// Append a placeholder as the last child of `anchor` and start renaming it.
    ///
    /// A collapsed anchor is expanded so the placeholder is visible.
    pub fn append_child(&mut self, anchor: NodeId) -> Result<Outcome, OutlineError> {
        self.append(anchor, true)
    }

    fn append(&mut self, anchor: NodeId, as_child: bool) -> Result<Outcome, OutlineError> {
        self.ensure_live(anchor)?;
        if !self.config.addable {
            return skip(Skip::Disabled);
        }
        if self.session.editing.is_some() {
            return skip(Skip::Editing);
        }
        if as_child && self.is_slot(anchor) {
            return skip(Skip::InputSlot);
        }

        let (parent, index) = if as_child {
            (anchor, None)
        } else {
            let Some(parent) = self.outline.parent_of(anchor) else {
                return skip(Skip::RootConstraint);
            };
            let index = self.outline.layout(anchor).map(|l| l.child_index + 1);
            (parent, index)
        };

        let temp = self.outline.alloc(String::new(), NodeFlags::TEMP)?;
        if let Err(err) = self.outline.insert_child(parent, temp, index) {
            self.outline.remove_subtree(temp);
            return Err(err);
        }
        if as_child && self.outline.collapse(parent) == Some(Collapse::Collapsed) {
            self.outline.set_collapse(parent, Collapse::Expanded);
        }

        self.session.selection.set_single(temp);
        self.session.editing = Some(temp);
        self.settle();
        self.renderer.begin_rename(temp);

        #[cfg(feature = "tracing")]
        tracing::debug!(node = %temp, %parent, "placeholder inserted");
        Ok(Outcome::Inserted(temp))
    }

    /// Start renaming `node`.
    pub fn begin_edit(&mut self, node: NodeId) -> Result<Outcome, OutlineError> {
        self.ensure_live(node)?;
        if !self.config.editable {
            return skip(Skip::Disabled);
        }
        if self.is_slot(node) {
            return skip(Skip::InputSlot);
        }
        if self.session.editing.is_some() {
            return skip(Skip::Editing);
        }
        self.session.editing = Some(node);
        self.session.selection.set_single(node);
        self.refresh();
        self.renderer.begin_rename(node);
        Ok(Outcome::EditStarted(node))
    }

    /// Finish the rename in progress with `name`.
    ///
    /// A name with non-blank text is stored as given and the node stops being a
    /// placeholder. A blank name removes a placeholder and leaves any other
    /// node unchanged.
    pub fn commit_rename(&mut self, name: &str) -> Result<Outcome, OutlineError> {
        let Some(node) = self.session.editing.take() else {
            return skip(Skip::NoTarget);
        };
        self.ensure_live(node)?;
        let flags = self.outline.flags(node).unwrap_or_default();

        if !name.trim().is_empty() {
            self.outline.set_name(node, name);
            self.outline.set_flags(node, flags.difference(NodeFlags::TEMP));
            self.settle();
            #[cfg(feature = "tracing")]
            tracing::debug!(%node, new_name = name, "node renamed");
            return Ok(Outcome::Renamed(node));
        }

        if flags.contains(NodeFlags::TEMP) {
            let removed = self.remove(node);
            self.settle();
            #[cfg(feature = "tracing")]
            tracing::debug!(%node, "blank placeholder dropped");
            return Ok(Outcome::Deleted(removed));
        }

        self.refresh();
        Ok(Outcome::Reverted(node))
    }

    /// Rename `node` directly, without a rename session.
    ///
    /// Ends the rename in progress if it is on `node`.
    pub fn rename(&mut self, node: NodeId, name: &str) -> Result<Outcome, OutlineError> {
        self.ensure_live(node)?;
        if !self.config.editable {
            return skip(Skip::Disabled);
        }
        if self.is_slot(node) {
            return skip(Skip::InputSlot);
        }
        if name.trim().is_empty() {
            return skip(Skip::EmptyName);
        }
        if self.session.editing == Some(node) {
            self.session.editing = None;
        }
        let flags = self.outline.flags(node).unwrap_or_default();
        self.outline.set_name(node, name);
        self.outline.set_flags(node, flags.difference(NodeFlags::TEMP));
        self.settle();
        Ok(Outcome::Renamed(node))
    }

    /// Abandon the rename in progress. Same as committing a blank name.
    pub fn cancel_edit(&mut self) -> Result<Outcome, OutlineError> {
        self.commit_rename("")
    }

    /// Delete `node` and its subtree.
    ///
    /// A node with children is only deleted if [`Renderer::confirm_delete`] agrees.
    pub fn delete(&mut self, node: NodeId) -> Result<Outcome, OutlineError> {
        match self.try_delete(node)? {
            Ok(removed) => {
                self.settle();
                Ok(Outcome::Deleted(removed))
            }
            Err(reason) => skip(reason),
        }
    }

    /// Delete every selected node, in selection order.
    ///
    /// Nodes already removed with an earlier selected ancestor are passed over.
    /// When nothing could be deleted the first reason is reported.
    pub fn delete_selection(&mut self) -> Result<Outcome, OutlineError> {
        let targets: Vec<NodeId> = self.session.selection.iter().collect();
        if targets.is_empty() {
            return skip(Skip::NoSelection);
        }
        let mut removed = Vec::new();
        let mut first_skip = None;
        for node in targets {
            if !self.outline.contains(node) {
                continue;
            }
            match self.try_delete(node)? {
                Ok(ids) => removed.extend(ids),
                Err(reason) => {
                    first_skip.get_or_insert(reason);
                }
            }
        }
        if removed.is_empty() {
            return skip(first_skip.unwrap_or(Skip::NoTarget));
        }
        self.settle();
        Ok(Outcome::Deleted(removed))
    }

    fn try_delete(&mut self, node: NodeId) -> Result<Result<Vec<NodeId>, Skip>, OutlineError> {
        self.ensure_live(node)?;
        if node == self.outline.root() {
            return Ok(Err(Skip::RootConstraint));
        }
        if self.is_slot(node) {
            return Ok(Err(Skip::InputSlot));
        }
        if self
            .session
            .editing
            .is_some_and(|e| self.outline.is_in_subtree(node, e))
        {
            return Ok(Err(Skip::Editing));
        }
        if self.outline.has_children(node) && !self.renderer.confirm_delete(node) {
            return Ok(Err(Skip::DeleteDeclined));
        }
        let removed = self.remove(node);
        #[cfg(feature = "tracing")]
        tracing::debug!(%node, removed = removed.len(), "subtree deleted");
        Ok(Ok(removed))
    }

    /// Flip the collapse state of `node`.
    pub fn toggle(&mut self, node: NodeId) -> Result<Outcome, OutlineError> {
        self.ensure_live(node)?;
        let collapse = self.outline.collapse(node).unwrap_or_default().toggled();
        self.outline.set_collapse(node, collapse);
        self.settle();
        #[cfg(feature = "tracing")]
        tracing::debug!(%node, ?collapse, "collapse toggled");
        Ok(Outcome::Toggled { node, collapse })
    }

    /// Move `node` under `parent` at `index`, counted before `node` leaves its
    /// current list.
    pub fn move_node(
        &mut self,
        node: NodeId,
        parent: NodeId,
        index: usize,
    ) -> Result<Outcome, OutlineError> {
        self.ensure_live(node)?;
        if !self.outline.contains(parent) {
            return Err(OutlineError::InvalidParent(parent));
        }
        if !self.config.draggable {
            return skip(Skip::Disabled);
        }
        if self.session.editing.is_some() {
            return skip(Skip::Editing);
        }
        let Some(old_parent) = self.outline.parent_of(node) else {
            return skip(Skip::RootConstraint);
        };
        if self.is_slot(node) || self.is_slot(parent) {
            return skip(Skip::InputSlot);
        }
        if index == 0
            && self
                .outline
                .children_of(parent)
                .first()
                .is_some_and(|&first| self.is_slot(first))
        {
            return skip(Skip::InputSlot);
        }
        if self.outline.is_in_subtree(node, parent) {
            return skip(Skip::IllegalMove);
        }

        let settled = settled_index(&self.outline, node, parent, index);
        let depth = self.outline.layout(parent).map_or(0, |l| l.depth) + 1;
        if !is_legal_move(&self.outline, node, parent, settled, depth) {
            return skip(Skip::IllegalMove);
        }

        let old_index = self.outline.layout(node).map_or(0, |l| l.child_index);
        self.outline.detach_child(old_parent, node)?;
        if let Err(err) = self.outline.insert_child(parent, node, Some(settled)) {
            self.outline.insert_child(old_parent, node, Some(old_index))?;
            return Err(err);
        }
        self.settle();

        #[cfg(feature = "tracing")]
        tracing::debug!(%node, %parent, index = settled, "node moved");
        Ok(Outcome::Moved {
            node,
            parent,
            index: settled,
        })
    }

    /// Replace the leaf-count bounds of `node` and bring input slots in line.
    pub fn set_leaf_bounds(
        &mut self,
        node: NodeId,
        bounds: Option<LeafBounds>,
    ) -> Result<Outcome, OutlineError> {
        self.ensure_live(node)?;
        if self.is_slot(node) {
            return skip(Skip::InputSlot);
        }
        let previous = self.outline.leaf_bounds(node);
        self.outline.set_leaf_bounds(node, bounds);
        let sync = match sync_input_slots(&mut self.outline, &self.config.input_slot_label) {
            Ok(sync) => sync,
            Err(err) => {
                self.outline.set_leaf_bounds(node, previous);
                return Err(err);
            }
        };
        let outline = &self.outline;
        self.session.selection.retain(|id| outline.contains(id));
        self.settle();
        Ok(Outcome::BoundsChanged(sync))
    }

    /// Replace the selection. Repeated ids are kept once.
    pub fn select(
        &mut self,
        ids: impl IntoIterator<Item = NodeId>,
    ) -> Result<Outcome, OutlineError> {
        let ids: Vec<NodeId> = ids.into_iter().collect();
        for &id in &ids {
            self.ensure_live(id)?;
        }
        self.session.selection.set(ids);
        self.refresh();
        Ok(Outcome::SelectionChanged)
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> Result<Outcome, OutlineError> {
        if self.session.selection.is_empty() {
            return skip(Skip::NoSelection);
        }
        self.session.selection.clear();
        self.refresh();
        Ok(Outcome::SelectionChanged)
    }

    /// Move the selection from its primary node in `direction`.
    pub fn navigate(&mut self, direction: Direction) -> Result<Outcome, OutlineError> {
        if self.session.editing.is_some() {
            return skip(Skip::Editing);
        }
        let Some(origin) = self.session.selection.primary() else {
            return skip(Skip::NoSelection);
        };
        let Some(target) = navigate(&self.outline, origin, direction) else {
            return skip(Skip::NoTarget);
        };
        self.session.selection.set_single(target);
        self.refresh();
        Ok(Outcome::Focused(target))
    }

    /// Start dragging `node`; it becomes the selection.
    pub fn begin_drag(&mut self, node: NodeId) -> Result<Outcome, OutlineError> {
        self.ensure_live(node)?;
        if !self.config.draggable {
            return skip(Skip::Disabled);
        }
        if self.session.editing.is_some() {
            return skip(Skip::Editing);
        }
        if self.outline.parent_of(node).is_none() {
            return skip(Skip::RootConstraint);
        }
        if self.is_slot(node) {
            return skip(Skip::InputSlot);
        }
        self.session.dragging = Some(Drag { node });
        self.session.selection.set_single(node);
        self.refresh();
        Ok(Outcome::DragStarted(node))
    }

    /// Finish the drag, dropping onto `zone` or aborting when `None`.
    ///
    /// Dropping onto a disabled zone is an illegal move.
    pub fn end_drag(&mut self, zone: Option<DropZone>) -> Result<Outcome, OutlineError> {
        let Some(drag) = self.session.dragging.take() else {
            return skip(Skip::NoTarget);
        };
        let Some(zone) = zone else {
            self.refresh();
            return Ok(Outcome::DragCancelled);
        };
        if !zone.enabled {
            self.refresh();
            return skip(Skip::IllegalMove);
        }
        let outcome = self.move_node(drag.node, zone.parent, zone.index);
        if matches!(outcome, Ok(Outcome::Skipped(_)) | Err(_)) {
            self.refresh();
        }
        outcome
    }

    /// React to a key press.
    pub fn handle_key(&mut self, key: Key) -> Result<Outcome, OutlineError> {
        let direction = match key {
            Key::Delete => return self.delete_selection(),
            Key::Enter | Key::Tab => {
                let Some(anchor) = self.session.selection.primary() else {
                    return skip(Skip::NoSelection);
                };
                return self.append(anchor, key == Key::Tab);
            }
            Key::Up => Direction::Up,
            Key::Down => Direction::Down,
            Key::Left => Direction::Left,
            Key::Right => Direction::Right,
        };
        self.navigate(direction)
    }

    // --- internals ---

    fn ensure_live(&self, id: NodeId) -> Result<(), OutlineError> {
        if self.outline.contains(id) {
            Ok(())
        } else {
            Err(OutlineError::UnknownNode(id))
        }
    }

    fn is_slot(&self, id: NodeId) -> bool {
        self.outline
            .flags(id)
            .is_some_and(|f| f.contains(NodeFlags::INPUT_SLOT))
    }

    /// Free the subtree of `node` and forget it in the session. Layout is stale afterwards.
    fn remove(&mut self, node: NodeId) -> Vec<NodeId> {
        let removed = self.outline.remove_subtree(node);
        self.session.selection.retain(|id| !removed.contains(&id));
        if self
            .session
            .dragging
            .is_some_and(|d| removed.contains(&d.node))
        {
            self.session.dragging = None;
        }
        removed
    }

    /// Recompute layout and redraw.
    fn settle(&mut self) {
        self.outline.commit();
        self.refresh();
    }

    /// Redraw without touching the tree.
    fn refresh(&mut self) {
        let views = collect_views(&self.outline, Some(&self.session));
        self.renderer.update(&views);
    }
}

fn skip(reason: Skip) -> Result<Outcome, OutlineError> {
    #[cfg(feature = "tracing")]
    tracing::trace!(?reason, "edit skipped");
    Ok(Outcome::Skipped(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Debug, Default)]
    struct Recorder {
        updates: usize,
        last: Vec<NodeView>,
        renames: Vec<NodeId>,
        asked: Vec<NodeId>,
        confirm: bool,
    }

    impl Renderer for Recorder {
        fn update(&mut self, nodes: &[NodeView]) {
            self.updates += 1;
            self.last = nodes.to_vec();
        }

        fn begin_rename(&mut self, node: NodeId) {
            self.renames.push(node);
        }

        fn confirm_delete(&mut self, node: NodeId) -> bool {
            self.asked.push(node);
            self.confirm
        }
    }

    const ROOT: NodeId = NodeId::new(0);
    const A: NodeId = NodeId::new(1);
    const B: NodeId = NodeId::new(2);
    const C: NodeId = NodeId::new(3);

    // root -> A, B, C
    fn abc<R: Renderer>(renderer: R) -> Editor<R> {
        let doc = Document::leaf(0, "root")
            .child(Document::leaf(1, "A"))
            .child(Document::leaf(2, "B"))
            .child(Document::leaf(3, "C"));
        Editor::load(&doc, EditorConfig::default(), renderer).unwrap()
    }

    fn row(editor: &Editor<impl Renderer>, id: NodeId) -> usize {
        editor.outline().layout(id).unwrap().row
    }

    #[test]
    fn loading_draws_once() {
        let editor = abc(Recorder::default());
        assert_eq!(editor.renderer().updates, 1);
        assert_eq!(editor.renderer().last.len(), 4);
        assert!(editor.renderer().last[3].is_last());
    }

    #[test]
    fn blank_placeholder_is_dropped_and_shape_restored() {
        let mut editor = abc(Recorder::default());
        let before = editor.views();

        let Outcome::Inserted(temp) = editor.append_child(B).unwrap() else {
            panic!("append should apply");
        };
        assert_eq!(temp, NodeId::new(4), "next id is above every id seen");
        assert_eq!(editor.outline().flags(temp), Some(NodeFlags::TEMP));
        assert_eq!(editor.session().editing(), Some(temp));
        assert_eq!(editor.session().selection().primary(), Some(temp));
        assert_eq!(editor.renderer().renames, [temp]);
        assert_eq!(editor.outline().layout(B).unwrap().child_count, 1);

        assert_eq!(editor.commit_rename("   ").unwrap(), Outcome::Deleted(vec![temp]));
        assert_eq!(editor.session().editing(), None);
        assert!(editor.session().selection().is_empty());
        assert_eq!(editor.views(), before);
    }

    #[test]
    fn rename_applies_verbatim_and_clears_temp() {
        let mut editor = abc(());
        let Outcome::Inserted(temp) = editor.append_sibling(A).unwrap() else {
            panic!("append should apply");
        };
        assert_eq!(editor.outline().children_of(ROOT), &[A, temp, B, C]);
        assert_eq!(editor.commit_rename(" New ").unwrap(), Outcome::Renamed(temp));
        assert_eq!(editor.outline().name(temp), Some(" New "));
        assert_eq!(editor.outline().flags(temp), Some(NodeFlags::empty()));
        assert_eq!(
            [A, temp, B, C].map(|id| row(&editor, id)),
            [0, 1, 2, 3]
        );

        // Ids are never reused, even after the highest one is deleted.
        editor.delete(temp).unwrap();
        let Outcome::Inserted(next) = editor.append_sibling(A).unwrap() else {
            panic!("append should apply");
        };
        assert_eq!(next, NodeId::new(5));
    }

    #[test]
    fn blank_rename_of_named_node_reverts() {
        let mut editor = abc(());
        assert_eq!(editor.begin_edit(A).unwrap(), Outcome::EditStarted(A));
        assert_eq!(editor.cancel_edit().unwrap(), Outcome::Reverted(A));
        assert_eq!(editor.outline().name(A), Some("A"));
        assert_eq!(editor.commit_rename("x").unwrap(), Outcome::Skipped(Skip::NoTarget));
    }

    #[test]
    fn direct_rename_rejects_blank_names() {
        let mut editor = abc(());
        assert_eq!(editor.rename(B, " \t").unwrap(), Outcome::Skipped(Skip::EmptyName));
        assert_eq!(
            editor
                .apply(Intent::RenameNode {
                    node: B,
                    name: "Beta".into()
                })
                .unwrap(),
            Outcome::Renamed(B)
        );
        assert_eq!(editor.outline().name(B), Some("Beta"));
    }

    #[test]
    fn append_preconditions() {
        let mut editor = abc(());
        assert_eq!(
            editor.append_sibling(ROOT).unwrap(),
            Outcome::Skipped(Skip::RootConstraint)
        );
        editor.begin_edit(A).unwrap();
        assert_eq!(
            editor.append_child(A).unwrap(),
            Outcome::Skipped(Skip::Editing)
        );
        editor.cancel_edit().unwrap();

        let mut locked = Editor::new(
            editor.outline().clone(),
            EditorConfig {
                addable: false,
                editable: false,
                ..EditorConfig::default()
            },
            (),
        )
        .unwrap();
        assert_eq!(locked.append_child(A).unwrap(), Outcome::Skipped(Skip::Disabled));
        assert_eq!(locked.begin_edit(A).unwrap(), Outcome::Skipped(Skip::Disabled));
        assert_eq!(
            locked.append_child(NodeId::new(99)),
            Err(OutlineError::UnknownNode(NodeId::new(99)))
        );
    }

    #[test]
    fn appending_into_collapsed_parent_expands_it() {
        let mut editor = abc(());
        editor.append_child(A).unwrap();
        editor.commit_rename("A1").unwrap();
        editor.toggle(A).unwrap();
        let Outcome::Inserted(temp) = editor.append_child(A).unwrap() else {
            panic!("append should apply");
        };
        assert_eq!(editor.outline().collapse(A), Some(Collapse::Expanded));
        assert!(editor.outline().layout(temp).unwrap().visible);
    }

    #[test]
    fn move_under_sibling() {
        let mut editor = abc(());
        assert_eq!(
            editor.move_node(C, A, 0).unwrap(),
            Outcome::Moved {
                node: C,
                parent: A,
                index: 0
            }
        );
        assert_eq!(editor.outline().layout(A).unwrap().child_count, 1);
        assert_eq!(editor.outline().layout(ROOT).unwrap().child_count, 2);
        assert_eq!(editor.outline().layout(C).unwrap().depth, 2);
        assert_eq!([A, C, B].map(|id| row(&editor, id)), [0, 0, 1]);
    }

    #[test]
    fn moves_that_change_nothing_are_skipped() {
        let mut editor = abc(());
        // Right after itself.
        assert_eq!(
            editor.move_node(B, ROOT, 2).unwrap(),
            Outcome::Skipped(Skip::IllegalMove)
        );
        // Onto itself.
        assert_eq!(
            editor.move_node(B, ROOT, 1).unwrap(),
            Outcome::Skipped(Skip::IllegalMove)
        );
        editor.move_node(C, A, 0).unwrap();
        assert_eq!(
            editor.move_node(A, C, 0).unwrap(),
            Outcome::Skipped(Skip::IllegalMove),
            "a node cannot move into its own subtree"
        );
        assert_eq!(
            editor.move_node(ROOT, A, 0).unwrap(),
            Outcome::Skipped(Skip::RootConstraint)
        );
        assert_eq!(editor.outline().children_of(ROOT), &[A, B]);

        // Moving down past a sibling lands after it.
        assert_eq!(
            editor.move_node(A, ROOT, 2).unwrap(),
            Outcome::Moved {
                node: A,
                parent: ROOT,
                index: 1
            }
        );
        assert_eq!(editor.outline().children_of(ROOT), &[B, A]);
    }

    #[test]
    fn deleting_a_branch_needs_confirmation() {
        let mut editor = abc(());
        editor.move_node(C, A, 0).unwrap();
        assert_eq!(
            editor.delete(A).unwrap(),
            Outcome::Skipped(Skip::DeleteDeclined)
        );
        assert!(editor.outline().contains(C));

        let (outline, ()) = editor.into_parts();
        let mut editor = Editor::new(
            outline,
            EditorConfig::default(),
            Recorder {
                confirm: true,
                ..Recorder::default()
            },
        )
        .unwrap();
        assert_eq!(editor.delete(A).unwrap(), Outcome::Deleted(vec![A, C]));
        assert_eq!(editor.renderer().asked, [A]);
        assert_eq!(editor.outline().layout(B).unwrap().child_index, 0);
        assert_eq!(editor.outline().len(), 2);
    }

    #[test]
    fn moves_wait_for_the_rename_to_finish() {
        let mut editor = abc(Recorder::default());
        editor.move_node(C, B, 0).unwrap();
        let Outcome::Inserted(temp) = editor.append_child(A).unwrap() else {
            panic!("append should apply");
        };

        assert_eq!(
            editor.move_node(B, temp, 0).unwrap(),
            Outcome::Skipped(Skip::Editing)
        );
        assert_eq!(
            editor.apply(Intent::Move {
                node: C,
                parent: temp,
                index: 0
            }),
            Ok(Outcome::Skipped(Skip::Editing))
        );
        assert!(!editor.outline().has_children(temp));

        // The blank placeholder goes alone; nothing was hidden beneath it.
        assert_eq!(editor.commit_rename("").unwrap(), Outcome::Deleted(vec![temp]));
        assert!(editor.outline().contains(B) && editor.outline().contains(C));
        assert_eq!(editor.outline().children_of(B), &[C]);
        assert!(editor.renderer().asked.is_empty());
    }

    #[test]
    fn exhausted_ids_leave_the_tree_alone() {
        let doc = Document::leaf(u64::MAX, "root").child(Document::leaf(1, "A"));
        let mut editor = Editor::load(&doc, EditorConfig::default(), Recorder::default()).unwrap();
        let before = editor.views();

        assert_eq!(editor.append_child(A), Err(OutlineError::IdsExhausted));
        assert_eq!(editor.append_sibling(A), Err(OutlineError::IdsExhausted));
        assert_eq!(editor.session().editing(), None);
        assert!(editor.renderer().renames.is_empty());

        let bounds = Some(LeafBounds {
            minimum: 0,
            maximum: 1,
        });
        assert_eq!(
            editor.set_leaf_bounds(A, bounds),
            Err(OutlineError::IdsExhausted)
        );
        assert_eq!(editor.outline().leaf_bounds(A), None);
        assert_eq!(editor.views(), before);
    }

    #[test]
    fn delete_guards() {
        let mut editor = abc(());
        assert_eq!(
            editor.delete(ROOT).unwrap(),
            Outcome::Skipped(Skip::RootConstraint)
        );
        editor.begin_edit(B).unwrap();
        assert_eq!(editor.delete(B).unwrap(), Outcome::Skipped(Skip::Editing));
        editor.cancel_edit().unwrap();
        assert_eq!(editor.delete(B).unwrap(), Outcome::Deleted(vec![B]));
        assert_eq!(editor.outline().layout(C).unwrap().child_index, 1);
    }

    #[test]
    fn delete_selection_skips_already_removed() {
        let mut editor = abc(Recorder {
            confirm: true,
            ..Recorder::default()
        });
        editor.move_node(C, A, 0).unwrap();
        editor.select([A, C, B]).unwrap();
        assert_eq!(
            editor.delete_selection().unwrap(),
            Outcome::Deleted(vec![A, C, B])
        );
        assert!(editor.session().selection().is_empty());
        assert_eq!(
            editor.delete_selection().unwrap(),
            Outcome::Skipped(Skip::NoSelection)
        );
    }

    #[test]
    fn toggle_cycles_and_relayouts() {
        let mut editor = abc(());
        editor.move_node(C, A, 0).unwrap();
        editor.append_child(A).unwrap();
        editor.commit_rename("A2").unwrap();
        assert_eq!(row(&editor, B), 2);

        assert_eq!(
            editor.toggle(A).unwrap(),
            Outcome::Toggled {
                node: A,
                collapse: Collapse::Collapsed
            }
        );
        assert_eq!(row(&editor, B), 1);
        assert!(!editor.outline().layout(C).unwrap().visible);
        assert!(editor.outline().layout(A).unwrap().visible);

        editor.toggle(A).unwrap();
        assert_eq!(editor.outline().collapse(A), Some(Collapse::Expanded));
        assert_eq!(row(&editor, B), 2);
    }

    #[test]
    fn keys_navigate_and_append() {
        let mut editor = abc(());
        assert_eq!(
            editor.handle_key(Key::Down).unwrap(),
            Outcome::Skipped(Skip::NoSelection)
        );
        editor.select([B]).unwrap();
        assert_eq!(editor.handle_key(Key::Up).unwrap(), Outcome::Focused(A));
        assert_eq!(editor.handle_key(Key::Left).unwrap(), Outcome::Focused(ROOT));
        assert_eq!(editor.handle_key(Key::Right).unwrap(), Outcome::Focused(A));
        assert_eq!(
            editor.handle_key(Key::Up).unwrap(),
            Outcome::Skipped(Skip::NoTarget)
        );

        let Outcome::Inserted(temp) = editor.handle_key(Key::Tab).unwrap() else {
            panic!("tab should append a child");
        };
        assert_eq!(editor.outline().parent_of(temp), Some(A));
        assert_eq!(
            editor.handle_key(Key::Down).unwrap(),
            Outcome::Skipped(Skip::Editing)
        );
        editor.commit_rename("A1").unwrap();

        let Outcome::Inserted(sibling) = editor.handle_key(Key::Enter).unwrap() else {
            panic!("enter should append a sibling");
        };
        assert_eq!(editor.outline().children_of(A), &[temp, sibling]);
    }

    #[test]
    fn drag_and_drop() {
        let mut editor = abc(Recorder::default());
        assert_eq!(editor.begin_drag(A).unwrap(), Outcome::DragStarted(A));
        let dragging: Vec<_> = editor
            .renderer()
            .last
            .iter()
            .filter(|v| v.dragging)
            .map(|v| v.id)
            .collect();
        assert_eq!(dragging, [A]);

        let after_c = editor
            .drop_zones()
            .into_iter()
            .find(|z| z.anchor == C && z.after)
            .unwrap();
        assert_eq!(
            editor.end_drag(Some(after_c)).unwrap(),
            Outcome::Moved {
                node: A,
                parent: ROOT,
                index: 2
            }
        );
        assert_eq!(editor.outline().children_of(ROOT), &[B, C, A]);
        assert!(editor.session().dragging().is_none());
        assert!(editor.renderer().last.iter().all(|v| !v.dragging));

        editor.begin_drag(B).unwrap();
        assert_eq!(editor.end_drag(None).unwrap(), Outcome::DragCancelled);
        assert!(editor.drop_zones().is_empty());
        assert_eq!(
            editor.begin_drag(ROOT).unwrap(),
            Outcome::Skipped(Skip::RootConstraint)
        );
    }

    #[test]
    fn bounds_manage_input_slot() {
        let mut editor = abc(());
        let Outcome::BoundsChanged(sync) = editor
            .set_leaf_bounds(
                B,
                Some(LeafBounds {
                    minimum: 0,
                    maximum: 3,
                }),
            )
            .unwrap()
        else {
            panic!("bounds should apply");
        };
        assert_eq!(sync.added.len(), 1);
        let slot = sync.added[0];
        assert_eq!(editor.outline().children_of(B), &[slot]);
        assert_eq!(editor.outline().name(slot), Some(DEFAULT_INPUT_SLOT_LABEL));

        assert_eq!(editor.append_child(slot).unwrap(), Outcome::Skipped(Skip::InputSlot));
        assert_eq!(editor.begin_edit(slot).unwrap(), Outcome::Skipped(Skip::InputSlot));
        assert_eq!(editor.begin_drag(slot).unwrap(), Outcome::Skipped(Skip::InputSlot));
        assert_eq!(editor.delete(slot).unwrap(), Outcome::Skipped(Skip::InputSlot));
        assert_eq!(editor.move_node(C, B, 0).unwrap(), Outcome::Skipped(Skip::InputSlot));
        assert!(matches!(editor.move_node(C, B, 1).unwrap(), Outcome::Moved { .. }));
        assert_eq!(editor.outline().children_of(B), &[slot, C]);

        let Outcome::BoundsChanged(sync) = editor.set_leaf_bounds(B, None).unwrap() else {
            panic!("bounds should apply");
        };
        assert_eq!(sync.removed, [slot]);
        assert_eq!(editor.outline().children_of(B), &[C]);
    }

    #[test]
    fn apply_dispatches() {
        let mut editor = abc(());
        assert_eq!(
            editor.apply(Intent::Select(vec![C])).unwrap(),
            Outcome::SelectionChanged
        );
        assert_eq!(
            editor.apply(Intent::Key(Key::Up)).unwrap(),
            Outcome::Focused(B)
        );
        assert_eq!(
            editor
                .apply(Intent::Move {
                    node: B,
                    parent: ROOT,
                    index: 0
                })
                .unwrap(),
            Outcome::Moved {
                node: B,
                parent: ROOT,
                index: 0
            }
        );
        assert_eq!(
            editor.apply(Intent::Delete(NodeId::new(42))),
            Err(OutlineError::UnknownNode(NodeId::new(42)))
        );
        assert_eq!(
            editor.apply(Intent::ClearSelection).unwrap(),
            Outcome::SelectionChanged
        );
    }
}
