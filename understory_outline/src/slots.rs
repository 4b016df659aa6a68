// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic input slots for nodes with leaf-count bounds.

use alloc::{string::String, vec::Vec};

use crate::error::OutlineError;
use crate::tree::Outline;
use crate::types::{NodeFlags, NodeId};

/// Label given to generated input slots when none is configured.
pub const DEFAULT_INPUT_SLOT_LABEL: &str = "Respondent input";

/// Changes made by [`sync_input_slots`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotSync {
    /// Slots created, one per node that was missing one.
    pub added: Vec<NodeId>,
    /// Slots dropped because they were duplicates or their owner lost its bounds.
    pub removed: Vec<NodeId>,
}

impl SlotSync {
    /// Returns `true` if the tree was left unchanged.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Bring input slots in line with the leaf-count bounds of every node.
///
/// A node whose [`LeafBounds`](crate::LeafBounds) are active ends up with exactly
/// one [`NodeFlags::INPUT_SLOT`] child, at index 0. Every other slot is removed.
/// Running this twice in a row changes nothing the second time.
///
/// Layout is not recomputed; call [`Outline::commit`] afterwards.
///
/// Fails with [`OutlineError::IdsExhausted`] before touching anything if the
/// missing slots cannot all be given identifiers.
pub fn sync_input_slots(outline: &mut Outline, label: &str) -> Result<SlotSync, OutlineError> {
    let order: Vec<NodeId> = outline.iter().collect();
    let missing = order
        .iter()
        .filter(|&&id| {
            !is_slot(outline, id)
                && outline.leaf_bounds(id).is_some_and(|b| b.is_active())
                && !outline.children_of(id).iter().any(|&c| is_slot(outline, c))
        })
        .count();
    if (missing as u64) > outline.free_ids() {
        return Err(OutlineError::IdsExhausted);
    }

    let mut sync = SlotSync::default();

    for id in order {
        if !outline.contains(id) || is_slot(outline, id) {
            continue;
        }
        let wants_slot = outline.leaf_bounds(id).is_some_and(|b| b.is_active());

        let mut kept = None;
        for (i, child) in outline.children_of(id).to_vec().into_iter().enumerate() {
            if !is_slot(outline, child) {
                continue;
            }
            if wants_slot && kept.is_none() {
                kept = Some((i, child));
            } else {
                sync.removed.extend(outline.remove_subtree(child));
            }
        }

        match kept {
            Some((0, _)) => {}
            Some((_, slot)) => {
                reattach_first(outline, id, slot);
            }
            None if wants_slot => {
                let slot = outline.alloc(String::from(label), NodeFlags::INPUT_SLOT)?;
                reattach_first(outline, id, slot);
                sync.added.push(slot);
            }
            None => {}
        }
    }

    #[cfg(feature = "tracing")]
    if !sync.is_empty() {
        tracing::debug!(
            added = sync.added.len(),
            removed = sync.removed.len(),
            "input slots synced"
        );
    }

    Ok(sync)
}

fn is_slot(outline: &Outline, id: NodeId) -> bool {
    outline
        .flags(id)
        .is_some_and(|f| f.contains(NodeFlags::INPUT_SLOT))
}

fn reattach_first(outline: &mut Outline, parent: NodeId, slot: NodeId) {
    if outline.parent_of(slot).is_some() && outline.detach_child(parent, slot).is_err() {
        unreachable!("slot is a child of its owner");
    }
    if outline.insert_child(parent, slot, Some(0)).is_err() {
        unreachable!("detached slot under a live node");
    }
}
