// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for structural edits and document loading.

use thiserror::Error;

use crate::types::NodeId;

/// Structural failure of an outline operation.
///
/// Every operation validates its inputs before touching the tree, so an error
/// always leaves the outline exactly as it was.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OutlineError {
    /// The requested parent is not a live node.
    #[error("invalid parent {0}")]
    InvalidParent(NodeId),
    /// The node is not a child of the given parent.
    #[error("{node} is not a child of {parent}")]
    NotFound {
        /// Parent that was searched.
        parent: NodeId,
        /// Node that was expected among its children.
        node: NodeId,
    },
    /// The identifier does not refer to a live node.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// The node already has a parent (or is the root) and cannot be inserted again.
    #[error("{0} is already attached")]
    AlreadyAttached(NodeId),
    /// Inserting would make a node its own ancestor.
    #[error("inserting {node} under {parent} would create a cycle")]
    Cycle {
        /// The would-be parent, inside `node`'s subtree.
        parent: NodeId,
        /// The node being inserted.
        node: NodeId,
    },
    /// Every identifier up to `u64::MAX` has been used; identifiers are never reused.
    #[error("node identifiers exhausted")]
    IdsExhausted,
}

/// Failure to build an outline from a [`Document`](crate::Document).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// Two document nodes share an identifier.
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),
    /// The loaded tree could not be completed, for example because input slots
    /// needed identifiers past `u64::MAX`.
    #[error(transparent)]
    Outline(#[from] OutlineError),
}
