// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input documents and loading them into an [`Outline`].

use alloc::{string::String, vec, vec::Vec};
use serde::Deserialize;

use crate::error::LoadError;
use crate::slots::sync_input_slots;
use crate::tree::Outline;
use crate::types::{LeafBounds, NodeFlags, NodeId};

/// A tree document: a root node with optional nested children.
///
/// Deserializes from the usual JSON shape:
///
/// ```json
/// { "id": 1, "name": "root", "children": [
///     { "id": 2, "name": "question", "minimumLeafCount": 0, "maximumLeafCount": 2 }
/// ] }
/// ```
///
/// `minimum_leaf_count` and `maximum_leaf_count` are accepted as aliases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Document {
    /// Node identifier; must be unique within the document.
    pub id: u64,
    /// Node label.
    pub name: String,
    /// Child nodes; `null` and missing both mean a leaf.
    #[serde(default)]
    pub children: Option<Vec<Document>>,
    /// Lower answer bound.
    #[serde(default, rename = "minimumLeafCount", alias = "minimum_leaf_count")]
    pub minimum_leaf_count: Option<i64>,
    /// Upper answer bound.
    #[serde(default, rename = "maximumLeafCount", alias = "maximum_leaf_count")]
    pub maximum_leaf_count: Option<i64>,
}

impl Document {
    /// A leaf document node.
    pub fn leaf(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a child, builder style.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Set both leaf-count bounds, builder style.
    #[must_use]
    pub fn with_leaf_bounds(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum_leaf_count = Some(minimum);
        self.maximum_leaf_count = Some(maximum);
        self
    }
}

impl Outline {
    /// Build an outline from a document, add input slots, and commit the layout.
    ///
    /// Fails on the first repeated identifier, or when input slots cannot be
    /// given identifiers; nothing is partially loaded.
    pub fn from_document(doc: &Document, input_slot_label: &str) -> Result<Self, LoadError> {
        let mut outline = Self::new(NodeId(doc.id), doc.name.clone());
        let root = outline.root();
        outline.set_leaf_bounds(
            root,
            LeafBounds::from_parts(doc.minimum_leaf_count, doc.maximum_leaf_count),
        );

        let mut stack: Vec<(NodeId, &Document)> = vec![(root, doc)];
        while let Some((id, node)) = stack.pop() {
            for child in node.children.iter().flatten() {
                let child_id = NodeId(child.id);
                if !outline.alloc_with_id(child_id, child.name.clone(), NodeFlags::empty()) {
                    return Err(LoadError::DuplicateId(child_id));
                }
                outline.set_leaf_bounds(
                    child_id,
                    LeafBounds::from_parts(child.minimum_leaf_count, child.maximum_leaf_count),
                );
                if outline.insert_child(id, child_id, None).is_err() {
                    unreachable!("fresh node under a live parent");
                }
                stack.push((child_id, child));
            }
        }

        sync_input_slots(&mut outline, input_slot_label)?;
        outline.commit();
        Ok(outline)
    }
}
