//! Implements an arena-allocated, ordered, path-addressable tree data structure and interfaces
//! to work with it.
//!
//! # Overview
//! A [`Tree`] is a container for arbitrarily typed payloads arranged hierarchically, where the
//! order of children matters and every node can be addressed by its *path* — the list of 1-based
//! sibling ranks leading from the top of the tree down to the node, conventionally rendered as a
//! dotted string like `1.2.1`. Trees of this kind show up wherever positional outlines do:
//! document structures, tables of contents, configuration hierarchies, UI element trees.
//!
//! The tree uses a technique called ["arena-allocated trees"][arena tree blog post], described by
//! Ben Lovy. All nodes live in a backing arena owned by the tree, and instead of using pointers to
//! link parents and children, keys into the arena are used. Parent links are therefore plain
//! non-owning back-references — there are no reference cycles to leak and no `Rc`/`RefCell`
//! ceremony at the API surface. The arena is a [`SlotMap`], so keys stay valid across unrelated
//! insertions and removals and are only invalidated when their node is explicitly pruned.
//!
//! Every tree owns one *sentinel root*: an invisible, valueless node under which all real
//! top-level nodes hang. The sentinel never appears in traversal results, is not counted by
//! [`Tree::len`], and has the empty path. Detaching a node takes its whole subtree out of the
//! parent's child sequence but keeps it in the arena, addressable through the caller's keys, until
//! it is either reattached or pruned.
//!
//! # Path numbering
//! How a node's rank among its siblings is computed — and how a finished path is rendered — is a
//! strategy the tree is generic over, described by the [`Numbering`] trait. The default,
//! [`Ordinal`], ranks nodes by their position in the full child sequence. [`GroupNumbering`]
//! instead numbers sibling groups independently, partitioned by a discriminant the payload
//! exposes through [`Grouping`]; see the [`path`] module for details.
//!
//! # Example
//! ```rust
//! use pathtree::{Tree, TraverseOrder};
//!
//! // Create the tree. The turbofish there is needed to state that we are using the default
//! // ordinal numbering instead of asking the compiler to infer it, which would be impossible.
//! let mut tree = Tree::<_>::new();
//!
//! // Nodes are addressed by the keys the insertion operations return.
//! let chapter1 = tree.add_child("Introduction");
//! let chapter2 = tree.add_child("Fundamentals");
//! tree.node_mut(chapter2)
//!     .expect("the key was just returned by add_child")
//!     .add_child("Terminology");
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(
//!     tree.node(chapter2).expect("still attached").path_string(),
//!     "2",
//! );
//!
//! // Flatten the tree in either of the two supported orders.
//! let level_order = tree
//!     .traverse(TraverseOrder::BreadthFirst)
//!     .filter_map(|node| node.value().copied())
//!     .collect::<Vec<_>>();
//! assert_eq!(level_order, ["Introduction", "Fundamentals", "Terminology"]);
//! # let _ = chapter1;
//! ```
//!
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::explicit_iter_loop,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::mut_mut,
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug
)]
#![deny(anonymous_parameters, bare_trait_objects, clippy::exit)]

pub mod path;
#[doc(no_inline)]
pub use path::{GroupNumbering, Grouping, NodePath, Numbering, Ordinal};

pub mod traversal;
#[doc(no_inline)]
pub use traversal::{Traverse, TraverseOrder};

pub mod tree;
#[doc(no_inline)]
pub use tree::{NodeKey, NodeRef, NodeRefMut, Tree};

/// A prelude containing the most used types for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        path::{GroupNumbering, Grouping, NodePath, Numbering, Ordinal},
        traversal::TraverseOrder,
        tree::{NodeKey, NodeRef, NodeRefMut, Tree},
        TreeError,
    };
}

use thiserror::Error;

/// The error type returned by structural edits on trees.
///
/// There is no recovery or retry logic anywhere in this crate — every variant reports a
/// programming error, surfaced synchronously to the caller, and the tree is left unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum TreeError {
    /// The operation referenced a node which is not a direct child of the node the operation was
    /// invoked on — or, for container-level operations, not part of the tree at all.
    #[error("referenced node is not a direct child of the node the operation was invoked on")]
    NotAChild,
    /// The index passed to [`remove_at`] falls outside of the child sequence.
    ///
    /// [`remove_at`]: tree::NodeRefMut::remove_at
    #[error("no child at index {index}, the node has {len} children")]
    OutOfRange {
        /// The index which was requested.
        index: usize,
        /// The length of the child sequence at the time of the call.
        len: usize,
    },
    /// The node passed to an attach operation is still attached to a parent and must be detached
    /// first. Also returned when attempting to attach a tree's sentinel root, which is
    /// permanently owned by its container.
    #[error("node is still attached to a parent and must be detached first")]
    AlreadyAttached,
    /// Attaching the node would make it an ancestor of itself.
    #[error("attaching the node would make it an ancestor of itself")]
    WouldCycle,
}
