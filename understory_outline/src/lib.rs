// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline --heading-base-level=0

//! Understory Outline: layout and mutation engine for collapsible tree editors.
//!
//! Understory Outline models an editable outline diagram (think mind map or question
//! tree laid out left to right) and keeps its layout consistent while a user adds,
//! renames, deletes, reorders, and collapses nodes.
//!
//! - Each node gets a column (its depth) and a row, shared with its first child.
//! - A node reserves one row per visible leaf below it, so collapsing a branch
//!   pulls everything after it up.
//! - Moves that would leave a node where it already is are rejected.
//!
//! ## Not a renderer
//!
//! This crate draws nothing and handles no pointer events. A host implements
//! [`Renderer`] to receive the laid-out [`NodeView`] list after every edit, and
//! reports gestures back as [`Intent`]s or direct [`Editor`] calls. Row height is
//! a constant supplied through [`GridMetrics`]; labels are never measured.
//!
//! ## API overview
//!
//! - [`Outline`]: arena of nodes with structural queries and the
//!   [`insert_child`](Outline::insert_child)/[`detach_child`](Outline::detach_child) primitives.
//! - [`Outline::commit`]: recomputes [`NodeLayout`] for the whole tree and returns a [`LayoutSummary`].
//! - [`Editor`]: applies edits, tracks the [`Session`] (selection, rename, drag), and
//!   notifies the [`Renderer`]. Each call returns an [`Outcome`]; defined no-ops come
//!   back as [`Outcome::Skipped`] with a [`Skip`] reason.
//! - [`Document`]: serde input format, loaded with [`Outline::from_document`] or [`Editor::load`].
//! - [`sync_input_slots`]: keeps one synthetic answer slot under every node with active [`LeafBounds`].
//! - [`is_legal_move`], [`settled_index`], and [`drop_zones`]: move legality and drag targets.
//! - [`navigate`]: directional keyboard moves over the laid-out rows.
//!
//! ## Example
//!
//! ```rust
//! use understory_outline::{Document, Editor, EditorConfig, Outcome};
//!
//! // root -> A -> (A1, A2), B
//! let doc = Document::leaf(0, "root")
//!     .child(
//!         Document::leaf(1, "A")
//!             .child(Document::leaf(2, "A1"))
//!             .child(Document::leaf(3, "A2")),
//!     )
//!     .child(Document::leaf(4, "B"));
//! let mut editor = Editor::load(&doc, EditorConfig::default(), ()).unwrap();
//! let outline = editor.outline();
//! let rows: Vec<_> = outline.iter().map(|id| outline.layout(id).unwrap().row).collect();
//! assert_eq!(rows, [0, 0, 0, 1, 2]);
//!
//! let a = outline.children_of(outline.root())[0];
//! let b = outline.children_of(outline.root())[1];
//! assert!(matches!(editor.toggle(a), Ok(Outcome::Toggled { .. })));
//! assert_eq!(editor.outline().layout(b).unwrap().row, 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to dependencies.
//! - `libm`: `no_std` float math for [`kurbo`].
//! - `tracing`: emits `tracing` events for commits and edits.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod editor;
mod error;
mod geometry;
mod host;
mod layout;
mod moves;
mod navigation;
mod selection;
mod slots;
mod tree;
mod types;

pub use document::Document;
pub use editor::{Drag, Editor, EditorConfig, Intent, Key, Outcome, Session, Skip};
pub use error::{LoadError, OutlineError};
pub use geometry::GridMetrics;
pub use host::{NodeView, Renderer};
pub use layout::LayoutSummary;
pub use moves::{DropZone, drop_zones, is_legal_move, settled_index};
pub use navigation::{Direction, navigate};
pub use selection::Selection;
pub use slots::{DEFAULT_INPUT_SLOT_LABEL, SlotSync, sync_input_slots};
pub use tree::Outline;
pub use types::{Collapse, LeafBounds, NodeFlags, NodeId, NodeLayout};

pub use kurbo;
