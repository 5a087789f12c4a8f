use smallvec::SmallVec;

use super::NodeKey;

/// The arena record behind one node: payload, non-owning parent back-reference and the ordered
/// child sequence. Never exposed directly; all access goes through `NodeRef`/`NodeRefMut`.
#[derive(Clone, Debug)]
pub(crate) struct NodeData<T> {
    /// `None` for the sentinel root only; every node created through the public API has a value.
    pub(crate) value: Option<T>,
    pub(crate) parent: Option<NodeKey>,
    /// The authoritative source of sibling order and, therefore, of computed ranks.
    pub(crate) children: SmallVec<[NodeKey; 4]>,
    pub(crate) sentinel: bool,
}

impl<T> NodeData<T> {
    pub(crate) fn new(value: T, parent: Option<NodeKey>) -> Self {
        Self {
            value: Some(value),
            parent,
            children: SmallVec::new(),
            sentinel: false,
        }
    }

    /// Creates the record for a tree's sentinel root. Called exactly once per tree.
    pub(crate) fn sentinel() -> Self {
        Self {
            value: None,
            parent: None,
            children: SmallVec::new(),
            sentinel: true,
        }
    }
}
