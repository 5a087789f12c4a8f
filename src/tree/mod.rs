//! The tree container and the node reference types used to work with it.
//!
//! A [`Tree`] owns all of its nodes in a backing arena and hands out [`NodeKey`]s as non-owning
//! handles. [`NodeRef`] and [`NodeRefMut`] pair a borrow of the tree with one key and carry the
//! structural queries and mutations.
//!
//! # Example
//! ```rust
//! use pathtree::tree::Tree;
//!
//! let mut tree = Tree::<_>::new();
//! let top = tree.add_child("top");
//! let mut top_ref = tree.node_mut(top).expect("the key was just returned by add_child");
//! let below = top_ref.add_child("below");
//!
//! assert_eq!(tree.node(below).expect("attached").depth(), 2);
//! assert_eq!(tree.node(below).expect("attached").path_string(), "1.1");
//! ```

use core::any;
use core::fmt::{self, Debug, Display, Formatter};
use core::marker::PhantomData;

use slotmap::SlotMap;

use crate::path::{GroupNumbering, Numbering, Ordinal};
use crate::traversal::{Traverse, TraverseOrder};
use crate::TreeError;

mod node;
mod node_ref;

pub(crate) use node::NodeData;
pub use node_ref::{Ancestors, Children, Descendants, NodeRef, NodeRefMut, Siblings};


slotmap::new_key_type! {
    /// The non-owning handle addressing one node inside a [`Tree`]'s arena.
    ///
    /// Keys stay valid across unrelated mutations — including detaching the node they point to —
    /// and are invalidated only when the node is removed from the arena by [`Tree::prune`].
    pub struct NodeKey;
}

/// An ordered, path-addressable tree of `T` payloads.
///
/// The tree owns a *sentinel root*: an invisible, valueless node under which all real top-level
/// nodes hang. The sentinel is never produced by traversals, is not counted by [`len`], and has
/// the empty path. `N` is the [`Numbering`] strategy used for all path computations in this tree.
///
/// See the [module-level documentation] for more.
///
/// [`len`]: Tree::len
/// [module-level documentation]: self
pub struct Tree<T, N = Ordinal> {
    pub(crate) arena: SlotMap<NodeKey, NodeData<T>>,
    pub(crate) root: NodeKey,
    _numbering: PhantomData<N>,
}

/// A tree using [`GroupNumbering`] for its paths, provided for convenience.
pub type GroupedTree<T> = Tree<T, GroupNumbering>;

impl<T, N> Tree<T, N> {
    /// Creates an empty tree: a sentinel root and nothing else.
    ///
    /// # Example
    /// ```rust
    /// # use pathtree::Tree;
    /// // The turbofish there is needed to state that we are using the default ordinal
    /// // numbering instead of asking the compiler to infer it, which would be impossible.
    /// let tree = Tree::<u32>::new();
    /// assert_eq!(tree.len(), 0);
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(NodeData::sentinel());
        Self {
            arena,
            root,
            _numbering: PhantomData,
        }
    }

    /// Returns a reference to the sentinel root.
    ///
    /// The sentinel is a real node as far as the node-level operations are concerned — its
    /// children are the tree's top-level nodes — but it carries no value, has depth 0 and the
    /// empty path, and traversals never produce it.
    pub fn root(&self) -> NodeRef<'_, T, N> {
        NodeRef {
            tree: self,
            key: self.root,
        }
    }

    /// Returns a *mutable* reference to the sentinel root, allowing modifications to the entire
    /// tree.
    pub fn root_mut(&mut self) -> NodeRefMut<'_, T, N> {
        let key = self.root;
        NodeRefMut { tree: self, key }
    }

    /// Returns a reference to the node behind `key`, or `None` if the key does not belong to
    /// this tree's arena (e.g. after a prune).
    pub fn node(&self, key: NodeKey) -> Option<NodeRef<'_, T, N>> {
        self.arena
            .contains_key(key)
            .then(|| NodeRef { tree: self, key })
    }

    /// Returns a *mutable* reference to the node behind `key`, or `None` if the key does not
    /// belong to this tree's arena.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<NodeRefMut<'_, T, N>> {
        if self.arena.contains_key(key) {
            Some(NodeRefMut { tree: self, key })
        } else {
            None
        }
    }

    /// Creates a new detached node holding `value` and returns its key.
    ///
    /// The node lives in this tree's arena but hangs nowhere; it is its own subtree top (depth 1,
    /// path `[1]`) until one of the attach operations splices it into place.
    pub fn new_node(&mut self, value: T) -> NodeKey {
        self.arena.insert(NodeData::new(value, None))
    }

    /// Appends a new node holding `value` to the end of the tree's top level and returns its key.
    pub fn add_child(&mut self, value: T) -> NodeKey {
        self.root_mut().add_child(value)
    }

    /// Attaches the detached node `node` to the end of the tree's top level.
    ///
    /// # Errors
    /// [`TreeError::AlreadyAttached`] if `node` still has a parent, [`TreeError::WouldCycle`] if
    /// attaching it would make it an ancestor of itself, [`TreeError::NotAChild`] if the key is
    /// not part of this arena.
    pub fn attach_child(&mut self, node: NodeKey) -> Result<NodeKey, TreeError> {
        self.root_mut().attach_child(node)
    }

    /// Inserts a new node holding `value` immediately before `existing`, which may sit anywhere
    /// in the tree.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree.
    pub fn insert_before(&mut self, existing: NodeKey, value: T) -> Result<NodeKey, TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.insert_before(existing, value)
    }

    /// Inserts a new node holding `value` immediately after `existing`, which may sit anywhere
    /// in the tree.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree.
    pub fn insert_after(&mut self, existing: NodeKey, value: T) -> Result<NodeKey, TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.insert_after(existing, value)
    }

    /// Appends a new node holding `value` to the child sequence of `existing`, which may sit
    /// anywhere in the tree.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree.
    pub fn insert_below(&mut self, existing: NodeKey, value: T) -> Result<NodeKey, TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.insert_below(existing, value)
    }

    /// Attaches the detached node `node` immediately before `existing`, which may sit anywhere
    /// in the tree.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree; the attach rejections of
    /// [`attach_child`](Tree::attach_child) for `node`.
    pub fn attach_before(&mut self, existing: NodeKey, node: NodeKey) -> Result<NodeKey, TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.attach_before(existing, node)
    }

    /// Attaches the detached node `node` immediately after `existing`, which may sit anywhere
    /// in the tree.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree; the attach rejections of
    /// [`attach_child`](Tree::attach_child) for `node`.
    pub fn attach_after(&mut self, existing: NodeKey, node: NodeKey) -> Result<NodeKey, TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.attach_after(existing, node)
    }

    /// Attaches the detached node `node` to the end of the child sequence of `existing`, which
    /// may sit anywhere in the tree.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree; the attach rejections of
    /// [`attach_child`](Tree::attach_child) for `node`.
    pub fn attach_below(&mut self, existing: NodeKey, node: NodeKey) -> Result<NodeKey, TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.attach_below(existing, node)
    }

    /// Detaches `existing`, which may sit anywhere in the tree, from its parent's child sequence.
    /// The subtree below it stays in the arena, addressable through the caller's keys.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if `existing` is not part of this tree.
    pub fn remove(&mut self, existing: NodeKey) -> Result<(), TreeError> {
        let parent = self.member_parent(existing)?;
        NodeRefMut { tree: self, key: parent }.remove_child(existing)
    }

    /// Removes a subtree from the arena, invalidating every key into it, and returns the number
    /// of nodes freed. An attached node is detached first; a detached one is freed as-is.
    ///
    /// This is the only operation that reclaims memory; detached subtrees otherwise stay alive
    /// for as long as the tree does.
    ///
    /// # Errors
    /// [`TreeError::NotAChild`] if the key is not part of this arena or names the sentinel root,
    /// which cannot be pruned.
    pub fn prune(&mut self, key: NodeKey) -> Result<usize, TreeError> {
        match self.arena.get(key) {
            None => return Err(TreeError::NotAChild),
            Some(data) if data.sentinel => return Err(TreeError::NotAChild),
            Some(_) => {}
        }
        NodeRefMut {
            tree: &mut *self,
            key,
        }
        .detach();
        let mut stack = vec![key];
        let mut freed = 0;
        while let Some(next) = stack.pop() {
            let data = self
                .arena
                .remove(next)
                .expect("subtree key vanished during prune");
            stack.extend(data.children);
            freed += 1;
        }
        Ok(freed)
    }

    /// Returns `true` if `key` names a node reachable from the sentinel root, `false` for
    /// detached nodes, foreign keys and the sentinel itself.
    pub fn contains(&self, key: NodeKey) -> bool {
        let Some(data) = self.arena.get(key) else {
            return false;
        };
        if data.sentinel {
            return false;
        }
        let mut current = data.parent;
        while let Some(ancestor) = current {
            if ancestor == self.root {
                return true;
            }
            current = self.arena[ancestor].parent;
        }
        false
    }

    /// Returns the number of nodes in the tree, the sentinel root excluded.
    ///
    /// Computed by walking the tree, in time proportional to its size.
    pub fn len(&self) -> usize {
        self.root().count()
    }

    /// Returns `true` if the tree holds no nodes besides the sentinel root.
    pub fn is_empty(&self) -> bool {
        self.arena[self.root].children.is_empty()
    }

    /// Returns an iterator over the tree's nodes in depth-first order, the sentinel excluded.
    pub fn iter(&self) -> Traverse<'_, T, N> {
        self.traverse(TraverseOrder::DepthFirst)
    }

    /// Returns an iterator over the tree's nodes in the given order, the sentinel excluded.
    pub fn traverse(&self, order: TraverseOrder) -> Traverse<'_, T, N> {
        Traverse::new(self, self.root, order)
    }

    /// Collects the tree's nodes into a flat list in the given order, the sentinel excluded.
    pub fn to_list(&self, order: TraverseOrder) -> Vec<NodeRef<'_, T, N>> {
        self.traverse(order).collect()
    }
}

impl<T, N: Numbering<T>> Tree<T, N> {
    /// Locates the node whose computed path equals `ranks`, or `None` if no node matches.
    ///
    /// This is a linear scan over the tree comparing computed paths — paths are never stored or
    /// indexed — so it costs a full traversal in the worst case.
    ///
    /// # Example
    /// ```rust
    /// # use pathtree::Tree;
    /// let mut tree = Tree::<_>::new();
    /// let first = tree.add_child("first");
    /// let below = tree.insert_below(first, "below").expect("first is part of the tree");
    ///
    /// assert_eq!(tree.node_at_path(&[1, 1]).expect("occupied").key(), below);
    /// assert!(tree.node_at_path(&[9, 9]).is_none());
    /// ```
    pub fn node_at_path(&self, ranks: &[usize]) -> Option<NodeRef<'_, T, N>> {
        self.iter().find(|node| node.path().as_slice() == ranks)
    }

    /// Renders the tree as one indented line per node, depth-first, using each node's `Display`
    /// form.
    pub fn to_text(&self) -> String
    where
        T: Display + Default + PartialEq,
    {
        self.to_text_with("  ", |node| node.to_string())
    }
}

impl<T, N> Tree<T, N> {
    /// Renders the tree as one line per node, depth-first, indenting each line `depth - 1`
    /// repetitions of `indent` and formatting nodes with `format`.
    pub fn to_text_with<F>(&self, indent: &str, mut format: F) -> String
    where
        F: FnMut(NodeRef<'_, T, N>) -> String,
    {
        let mut out = String::new();
        for node in self.iter() {
            for _ in 1..node.depth() {
                out.push_str(indent);
            }
            out.push_str(&format(node));
            out.push('\n');
        }
        out
    }

    /// Resolves the parent a container-level operation delegates to: `existing` must be
    /// reachable from the sentinel, in which case it always has a parent.
    fn member_parent(&self, existing: NodeKey) -> Result<NodeKey, TreeError> {
        if !self.contains(existing) {
            return Err(TreeError::NotAChild);
        }
        self.arena[existing].parent.ok_or(TreeError::NotAChild)
    }
}

impl<T, N> Default for Tree<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, N> Clone for Tree<T, N> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            _numbering: PhantomData,
        }
    }
}

impl<T: Debug, N> Debug for Tree<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("arena", &self.arena)
            .field("root", &self.root)
            .finish()
    }
}

/// Renders as `Tree of Type "<short type name>" with <n> descendant node(s).`, the plural form
/// selected by the count.
impl<T, N> Display for Tree<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = any::type_name::<T>();
        let name = name.rsplit("::").next().unwrap_or(name);
        let count = self.len();
        if count == 1 {
            write!(f, "Tree of Type \"{name}\" with {count} descendant node.")
        } else {
            write!(f, "Tree of Type \"{name}\" with {count} descendant nodes.")
        }
    }
}

impl<'a, T, N> IntoIterator for &'a Tree<T, N> {
    type Item = NodeRef<'a, T, N>;
    type IntoIter = Traverse<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
