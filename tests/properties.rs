//! Structural properties checked over randomly built trees.

use std::collections::HashMap;

use proptest::prelude::*;

use pathtree::{NodeKey, TraverseOrder, Tree};

/// Replays a build script: each step adds a node either at the top level or under one of the
/// previously created nodes.
fn build(ops: &[(usize, String)]) -> (Tree<String>, Vec<NodeKey>) {
    let mut tree = Tree::<String>::new();
    let mut keys: Vec<NodeKey> = Vec::new();
    for (pick, value) in ops {
        let slot = pick % (keys.len() + 1);
        let key = if slot == 0 {
            tree.add_child(value.clone())
        } else {
            let parent = keys[slot - 1];
            tree.node_mut(parent)
                .expect("created earlier")
                .add_child(value.clone())
        };
        keys.push(key);
    }
    (tree, keys)
}

fn build_script() -> impl Strategy<Value = Vec<(usize, String)>> {
    proptest::collection::vec((any::<usize>(), "[a-z]{1,6}"), 0..40)
}

proptest! {
    #[test]
    fn paths_agree_with_depths_and_indices(ops in build_script()) {
        let (tree, keys) = build(&ops);
        prop_assert_eq!(tree.len(), keys.len());

        for &key in &keys {
            let node = tree.node(key).expect("still attached");
            let path = node.path();
            prop_assert_eq!(path.len(), node.depth());

            // Recomputing without intervening mutation yields the same path.
            prop_assert_eq!(&path, &node.path());

            // The final rank indexes the node within its parent's child sequence.
            let rank = *path.last().expect("attached nodes have nonempty paths");
            let parent = node.parent().expect("attached nodes have parents");
            let by_rank = parent.children().nth(rank - 1).expect("rank is in range");
            prop_assert_eq!(by_rank.key(), key);

            // The path addresses exactly this node.
            let found = tree
                .node_at_path(path.as_slice())
                .expect("computed paths resolve");
            prop_assert_eq!(found.key(), key);

            // The immediate parent's descendants include the node itself.
            if !parent.is_sentinel() {
                prop_assert!(parent.descendants().any(|d| d.key() == key));
                prop_assert_eq!(node.ancestors().next().expect("parent is an ancestor").key(), parent.key());
            }
        }
    }

    #[test]
    fn flattenings_respect_their_orders(ops in build_script()) {
        let (tree, keys) = build(&ops);

        let dfs = tree.to_list(TraverseOrder::DepthFirst);
        prop_assert_eq!(dfs.len(), keys.len());

        let position: HashMap<NodeKey, usize> = dfs
            .iter()
            .enumerate()
            .map(|(index, node)| (node.key(), index))
            .collect();
        for node in &dfs {
            if let Some(parent) = node.parent() {
                if !parent.is_sentinel() {
                    // A parent is listed strictly before all of its descendants.
                    prop_assert!(position[&parent.key()] < position[&node.key()]);
                }
            }
            // Siblings keep their child-sequence order.
            let child_positions = node
                .children()
                .map(|child| position[&child.key()])
                .collect::<Vec<_>>();
            prop_assert!(child_positions.windows(2).all(|pair| pair[0] < pair[1]));
        }

        // Level order: every node of depth k comes before any node of depth k + 1.
        let depths = tree
            .traverse(TraverseOrder::BreadthFirst)
            .map(|node| node.depth())
            .collect::<Vec<_>>();
        prop_assert_eq!(depths.len(), keys.len());
        prop_assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn detaching_removes_exactly_one_subtree(ops in build_script(), pick in any::<usize>()) {
        let (mut tree, keys) = build(&ops);
        prop_assume!(!keys.is_empty());

        let victim = keys[pick % keys.len()];
        let subtree_size = 1 + tree.node(victim).expect("attached").count();
        let total = tree.len();

        let survivors = tree
            .iter()
            .map(|node| node.key())
            .filter(|&key| {
                key != victim
                    && !tree
                        .node(key)
                        .expect("attached")
                        .ancestors()
                        .any(|ancestor| ancestor.key() == victim)
            })
            .collect::<Vec<_>>();

        prop_assert!(tree.node_mut(victim).expect("attached").detach());

        // The detached node keeps its subtree; the tree keeps everything else, in order.
        prop_assert_eq!(tree.len(), total - subtree_size);
        prop_assert_eq!(tree.node(victim).expect("in the arena").count(), subtree_size - 1);
        prop_assert!(!tree.contains(victim));
        let remaining = tree.iter().map(|node| node.key()).collect::<Vec<_>>();
        prop_assert_eq!(remaining, survivors);

        // Detaching twice reports nothing to do.
        prop_assert!(!tree.node_mut(victim).expect("in the arena").detach());
    }
}
