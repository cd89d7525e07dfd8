use core::fmt::{self, Debug, Formatter};
use generational_arena::Index;
use smallvec::SmallVec;

/// The handle of a node in a [`Tree`].
///
/// Ids are generational: once the node is removed, the id keeps being reported as absent even after the slot is reused by a new node.
///
/// [`Tree`]: struct.Tree.html " "
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) Index);
impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "NodeId({}v{})", slot, generation)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}
impl<T> Node<T> {
    #[inline]
    pub(crate) fn new(data: T, parent: Option<NodeId>) -> Self {
        Self {
            data,
            parent,
            children: SmallVec::new(),
        }
    }
    /// Position of `child` among the children, if it is one.
    #[inline]
    pub(crate) fn index_of(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }
}

/// A node which is not part of a tree yet.
///
/// Carries a payload and the parent it should be attached to once it's added with [`Tree::add`].
///
/// [`Tree::add`]: struct.Tree.html#method.add " "
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Detached<T> {
    data: T,
    parent: Option<NodeId>,
}
impl<T> Detached<T> {
    /// Creates a detached node without a parent, which will become the root of the tree it's added to.
    #[inline(always)]
    pub const fn new(data: T) -> Self {
        Self { data, parent: None }
    }
    /// Creates a detached node which will be appended to the children of `parent`.
    #[inline(always)]
    pub const fn with_parent(data: T, parent: NodeId) -> Self {
        Self {
            data,
            parent: Some(parent),
        }
    }
    /// Changes the parent the node will be attached to.
    #[inline(always)]
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
    /// Returns the parent the node will be attached to.
    #[inline(always)]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    /// Returns a reference to the payload.
    #[inline(always)]
    pub const fn data(&self) -> &T {
        &self.data
    }
    /// Consumes the node, returning its payload.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // destructors can't run in const fn
    pub fn into_data(self) -> T {
        self.data
    }
    #[inline(always)]
    pub(crate) fn into_parts(self) -> (T, Option<NodeId>) {
        (self.data, self.parent)
    }
}
