// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based checks of the row layout over random trees.
//!
//! Trees are described by a parent choice per node: node `i` hangs under node
//! `choice % i`, which keeps every shape reachable and acyclic.

use std::collections::HashSet;

use proptest::prelude::*;
use understory_outline::{
    Collapse, Editor, EditorConfig, NodeId, Outline, Outcome, Renderer, is_legal_move,
    settled_index,
};

fn build(parents: &[usize]) -> (Outline, Vec<NodeId>) {
    let mut outline = Outline::new(NodeId::new(0), "root");
    let mut ids = vec![outline.root()];
    for (i, &choice) in parents.iter().enumerate() {
        let parent = ids[choice % (i + 1)];
        let id = outline.create_node(format!("n{}", i + 1)).unwrap();
        outline.insert_child(parent, id, None).unwrap();
        ids.push(id);
    }
    outline.commit();
    (outline, ids)
}

fn shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0_usize..64, 0..40)
}

fn visible_without_collapsed_ancestor(outline: &Outline, id: NodeId) -> bool {
    let mut current = outline.parent_of(id);
    while let Some(p) = current {
        if outline.collapse(p) == Some(Collapse::Collapsed) {
            return false;
        }
        current = outline.parent_of(p);
    }
    true
}

struct Confirming;

impl Renderer for Confirming {
    fn confirm_delete(&mut self, _node: NodeId) -> bool {
        true
    }
}

proptest! {
    #[test]
    fn child_index_matches_stored_order(parents in shape()) {
        let (outline, ids) = build(&parents);
        for &id in &ids {
            let children = outline.children_of(id);
            prop_assert_eq!(outline.layout(id).unwrap().child_count, children.len());
            for (i, &child) in children.iter().enumerate() {
                prop_assert_eq!(outline.layout(child).unwrap().child_index, i);
            }
        }
        let root = outline.layout(outline.root()).unwrap();
        prop_assert_eq!(root.depth, 0);
        prop_assert_eq!(root.row, 0);
        prop_assert!(root.visible);
    }

    #[test]
    fn rows_follow_the_sibling_rule(
        parents in shape(),
        collapsed in prop::collection::vec(any::<bool>(), 40),
    ) {
        let (mut outline, ids) = build(&parents);
        for (&id, &c) in ids.iter().zip(&collapsed) {
            if c {
                outline.set_collapse(id, Collapse::Collapsed);
            }
        }
        let summary = outline.commit();

        let mut leaf_rows = HashSet::new();
        for &id in &ids {
            let layout = outline.layout(id).unwrap();
            prop_assert_eq!(layout.visible, visible_without_collapsed_ancestor(&outline, id));
            if !layout.visible {
                prop_assert_eq!(layout.leaf_span, 0);
            }
            let Some(parent) = outline.parent_of(id) else {
                continue;
            };
            let parent_layout = outline.layout(parent).unwrap();
            prop_assert_eq!(layout.depth, parent_layout.depth + 1);
            if layout.child_index == 0 || !layout.visible {
                prop_assert_eq!(layout.row, parent_layout.row);
            } else {
                let prev = outline.children_of(parent)[layout.child_index - 1];
                let prev = outline.layout(prev).unwrap();
                prop_assert_eq!(layout.row, prev.row + prev.leaf_span.saturating_sub(1) + 1);
            }
            if layout.visible && layout.leaf_span == 0 {
                prop_assert!(leaf_rows.insert(layout.row), "visible leaves never share a row");
                prop_assert!(layout.row < summary.rows);
            }
        }
    }

    #[test]
    fn collapse_then_expand_restores_rows(parents in shape(), pick in any::<usize>()) {
        let (mut outline, ids) = build(&parents);
        let before: Vec<_> = ids.iter().map(|&id| outline.layout(id).unwrap()).collect();
        let rows_before = outline.summary().rows;

        let target = ids[pick % ids.len()];
        let span = outline.layout(target).unwrap().leaf_span;
        outline.set_collapse(target, Collapse::Collapsed);
        let collapsed = outline.commit();
        prop_assert_eq!(rows_before - collapsed.rows, span.saturating_sub(1));

        outline.set_collapse(target, Collapse::Expanded);
        outline.commit();
        let after: Vec<_> = ids.iter().map(|&id| outline.layout(id).unwrap()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn staying_in_place_is_never_legal(parents in shape()) {
        let (outline, ids) = build(&parents);
        for &id in &ids[1..] {
            let parent = outline.parent_of(id).unwrap();
            let layout = outline.layout(id).unwrap();
            prop_assert!(!is_legal_move(&outline, id, parent, layout.child_index, layout.depth));
            // Dropping right after itself settles onto the same index.
            let settled = settled_index(&outline, id, parent, layout.child_index + 1);
            prop_assert!(!is_legal_move(&outline, id, parent, settled, layout.depth));
        }
    }

    #[test]
    fn delete_removes_exactly_the_subtree(parents in shape(), pick in any::<usize>()) {
        prop_assume!(!parents.is_empty());
        let (outline, ids) = build(&parents);
        let target = ids[1 + pick % (ids.len() - 1)];
        let parent = outline.parent_of(target).unwrap();
        let expected: HashSet<_> =
            ids.iter().copied().filter(|&id| outline.is_in_subtree(target, id)).collect();

        let mut editor = Editor::new(outline, EditorConfig::default(), Confirming).unwrap();
        let Outcome::Deleted(removed) = editor.delete(target).unwrap() else {
            panic!("confirmed delete must apply");
        };
        prop_assert_eq!(removed.iter().copied().collect::<HashSet<_>>(), expected.clone());

        let outline = editor.outline();
        prop_assert_eq!(outline.len(), ids.len() - expected.len());
        for (i, &sibling) in outline.children_of(parent).iter().enumerate() {
            prop_assert_eq!(outline.layout(sibling).unwrap().child_index, i);
        }
    }
}
