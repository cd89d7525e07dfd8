use core::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem,
    ptr,
    slice,
};
use tracing::{instrument, trace};
use crate::{
    traversal::Traversable,
    util::Stack,
    TreeError,
    TreeResult,
};
use super::{Tree, Node, NodeId};

/// A reference to a node in a tree.
///
/// Since this type does not point to the node directly, but rather to the tree the node is in and the id of the node, it can be used to move around the tree.
///
/// Two references are equal if they point to the same node of the same tree, or if they are *structurally* equal: their parents sit at the same position relative to their roots, their payloads are equal and their children are pairwise equal, in order. This makes equal shapes in different trees compare equal.
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}
impl<'a, T> NodeRef<'a, T> {
    #[inline(always)]
    pub(crate) const fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }
    #[inline]
    fn node(&self) -> &'a Node<T> {
        self.tree.entry(self.id)
    }
    #[inline(always)]
    fn wrap(&self, id: NodeId) -> Self {
        Self::new(self.tree, id)
    }
    /// Returns the id of the node.
    #[inline(always)]
    pub const fn id(&self) -> NodeId {
        self.id
    }
    /// Returns the tree the node is in.
    #[inline(always)]
    pub const fn tree(&self) -> &'a Tree<T> {
        self.tree
    }
    /// Returns a reference to the payload of the node.
    #[inline]
    pub fn data(&self) -> &'a T {
        &self.node().data
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|parent| self.wrap(parent))
    }
    /// Returns `true` if the node has a parent, i.e. is not the root node.
    #[inline]
    pub fn has_parent(&self) -> bool {
        self.node().parent.is_some()
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[inline]
    pub fn is_root(&self) -> bool {
        !self.has_parent()
    }
    /// Returns an iterator over references to the children of the node, in order.
    #[inline]
    pub fn children(&self) -> NodeChildrenIter<'a, T> {
        NodeChildrenIter {
            tree: self.tree,
            ids: self.node().children.iter(),
        }
    }
    /// Returns the ids of the children of the node, in order.
    #[inline]
    pub fn child_ids(&self) -> &'a [NodeId] {
        self.node().children.as_slice()
    }
    /// Returns the number of children of the node.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }
    /// Returns `true` if the node has one or more children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.node().children.is_empty()
    }
    /// Returns `true` if the node has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.has_children()
    }
    /// Returns a reference to the first child of the node, or `None` if it has no children.
    #[inline]
    pub fn first_child(&self) -> Option<Self> {
        self.node().children.first().map(|&child| self.wrap(child))
    }
    /// Returns a reference to the last child of the node, or `None` if it has no children.
    #[inline]
    pub fn last_child(&self) -> Option<Self> {
        self.node().children.last().map(|&child| self.wrap(child))
    }
    /// Returns a reference to the sibling of the pointee which comes before it in order, or `None` if it's the first child of its parent or the root.
    pub fn prev_sibling(&self) -> Option<Self> {
        let index = self.position()?.checked_sub(1)?;
        self.parent()?.child_ids().get(index).map(|&sibling| self.wrap(sibling))
    }
    /// Returns a reference to the sibling of the pointee which comes after it in order, or `None` if it's the last child of its parent or the root.
    pub fn next_sibling(&self) -> Option<Self> {
        let index = self.position()? + 1;
        self.parent()?.child_ids().get(index).map(|&sibling| self.wrap(sibling))
    }
    /// Returns the number of nodes in the subtree rooted at this node, including the node itself. Saturates at `usize::MAX` instead of overflowing.
    pub fn size(&self) -> usize {
        let mut count = 0_usize;
        let mut pending: Stack<NodeId> = Stack::new();
        pending.push(self.id);
        while let Some(id) = pending.pop() {
            count = count.saturating_add(1);
            pending.extend(self.tree.children_of(id).iter().copied());
        }
        count
    }
    /// Returns the child indices leading from the root to this node. The path of the root is empty.
    #[inline]
    pub fn path(&self) -> Vec<usize> {
        self.tree.path_of(self.id)
    }
    /// Position among the children of the parent.
    fn position(&self) -> Option<usize> {
        let parent = self.node().parent?;
        self.tree.entry(parent).index_of(self.id)
    }
    fn parent_path(&self) -> Option<Vec<usize>> {
        self.node().parent.map(|parent| self.tree.path_of(parent))
    }

    /// Returns the structural hash code of the node.
    ///
    /// Folds, with the multiplier 31, the position of the parent (or nothing for the root), then the payload, then the hash code of every child in order.
    pub fn hash_code(&self) -> i32
    where
        T: Hash,
    {
        self.tree
            .node_codes(self.id)
            .remove(&self.id)
            .unwrap_or_default()
    }
}
impl<T> Copy for NodeRef<'_, T> {}
impl<T> Clone for NodeRef<'_, T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: Debug> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("data", self.data())
            .field("children", &self.child_ids())
            .finish()
    }
}
impl<'b, T: PartialEq> PartialEq<NodeRef<'b, T>> for NodeRef<'_, T> {
    fn eq(&self, other: &NodeRef<'b, T>) -> bool {
        if ptr::eq(self.tree, other.tree) && self.id == other.id {
            return true;
        }
        if self.parent_path() != other.parent_path() {
            return false;
        }
        // Children of both sides must have positionally equal parents too.
        if self.has_children() && self.position() != other.position() {
            return false;
        }
        let mut pending: Stack<(NodeId, NodeId)> = Stack::new();
        pending.push((self.id, other.id));
        while let Some((a, b)) = pending.pop() {
            let (a, b) = (self.tree.entry(a), other.tree.entry(b));
            if a.data != b.data || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().copied().zip(b.children.iter().copied()));
        }
        true
    }
}
impl<T: Eq> Eq for NodeRef<'_, T> {}
impl<T: Hash> Hash for NodeRef<'_, T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

/// A *mutable* reference to a node in a tree.
///
/// Every mutating method fails with [`TreeError::Unsupported`] if the tree is read-only, and bumps the modification counter of the tree once if it succeeds.
///
/// [`TreeError::Unsupported`]: ../enum.TreeError.html#variant.Unsupported " "
#[derive(Debug)]
pub struct NodeRefMut<'a, T> {
    tree: &'a mut Tree<T>,
    id: NodeId,
}
impl<'a, T> NodeRefMut<'a, T> {
    #[inline(always)]
    pub(crate) fn new(tree: &'a mut Tree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }
    /// Returns the id of the node.
    #[inline(always)]
    pub const fn id(&self) -> NodeId {
        self.id
    }
    /// Returns a reference to the payload of the node.
    #[inline]
    pub fn data(&self) -> &T {
        &self.tree.entry(self.id).data
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::from(self).parent()
    }
    /// Returns a *mutable* reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent_mut(&mut self) -> Option<NodeRefMut<'_, T>> {
        let parent = self.tree.entry(self.id).parent?;
        Some(NodeRefMut::new(self.tree, parent))
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.tree.entry(self.id).parent.is_none()
    }

    /// Replaces the payload of the node, returning the previous one.
    ///
    /// # Errors
    /// Fails with `Unsupported` if the tree is read-only.
    pub fn set_data(&mut self, data: T) -> TreeResult<T> {
        self.tree.check_writable()?;
        let old = mem::replace(&mut self.tree.entry_mut(self.id).data, data);
        self.tree.bump();
        trace!(node = ?self.id, mod_count = self.tree.mod_count(), "replaced payload");
        Ok(old)
    }
    /// Moves the node, together with its subtree, to the end of the children of `parent`.
    ///
    /// `None` is only accepted for the root node, for which it changes nothing.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `InvalidArgument` if `parent` is `None` and the node is not the root
    /// - `InvalidArgument` if `parent` is the node itself or one of its descendants, which includes every node if this one is the root
    /// - `NotFound` if the parent is not in the tree
    /// - `Unsupported` if the tree is read-only
    pub fn set_parent(&mut self, parent: Option<NodeId>) -> TreeResult<()> {
        self.tree.check_writable()?;
        let current = self.tree.entry(self.id).parent;
        let parent = match parent {
            Some(parent) => parent,
            None if current.is_none() => return Ok(()),
            None => {
                return Err(TreeError::InvalidArgument(
                    "an attached non-root node requires a parent",
                ))
            }
        };
        if !self.tree.contains(parent) {
            return Err(TreeError::NotFound);
        }
        if self.tree.is_ancestor_or_self(self.id, parent) {
            return Err(TreeError::InvalidArgument(
                "a node cannot be moved under itself or one of its descendants",
            ));
        }
        self.tree.unlink(self.id);
        self.tree.entry_mut(self.id).parent = Some(parent);
        self.tree.entry_mut(parent).children.push(self.id);
        self.tree.bump();
        trace!(node = ?self.id, ?parent, mod_count = self.tree.mod_count(), "moved node");
        Ok(())
    }
    /// Appends a new child to the node, returning its id.
    ///
    /// # Errors
    /// Fails with `Unsupported` if the tree is read-only.
    #[inline]
    pub fn add(&mut self, data: T) -> TreeResult<NodeId> {
        self.tree.add_child(self.id, data)
    }
    /// Detaches a direct child of the node, returning its subtree as a new tree.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `NotFound` if `child` is not a child of this node
    /// - `Unsupported` if the tree is read-only
    pub fn remove(&mut self, child: NodeId) -> TreeResult<Tree<T>> {
        self.tree.check_writable()?;
        if self.tree.parent_of(child) != Some(self.id) {
            return Err(TreeError::NotFound);
        }
        let removed = self.tree.extract(child);
        self.tree.bump();
        trace!(node = ?self.id, ?child, mod_count = self.tree.mod_count(), "detached child");
        Ok(removed)
    }
    /// Detaches every child of the node, returning their subtrees as new trees, in order.
    ///
    /// # Errors
    /// Fails with `Unsupported` if the tree is read-only.
    #[instrument(level = "debug", skip(self), fields(node = ?self.id))]
    pub fn remove_children(&mut self) -> TreeResult<Vec<Tree<T>>> {
        self.tree.check_writable()?;
        let children = self.tree.children_of(self.id).to_vec();
        if children.is_empty() {
            return Ok(Vec::new());
        }
        let removed = children
            .into_iter()
            .map(|child| self.tree.extract(child))
            .collect::<Vec<_>>();
        self.tree.bump();
        trace!(count = removed.len(), mod_count = self.tree.mod_count(), "detached children");
        Ok(removed)
    }
}
impl<'a, T> From<&'a NodeRefMut<'_, T>> for NodeRef<'a, T> {
    #[inline]
    fn from(node: &'a NodeRefMut<'_, T>) -> Self {
        NodeRef::new(&*node.tree, node.id)
    }
}

/// An iterator over references to the children of a node, in order.
pub struct NodeChildrenIter<'a, T> {
    tree: &'a Tree<T>,
    ids: slice::Iter<'a, NodeId>,
}
impl<'a, T> Iterator for NodeChildrenIter<'a, T> {
    type Item = NodeRef<'a, T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let &id = self.ids.next()?;
        Some(NodeRef::new(self.tree, id))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
impl<T> DoubleEndedIterator for NodeChildrenIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let &id = self.ids.next_back()?;
        Some(NodeRef::new(self.tree, id))
    }
}
impl<T> ExactSizeIterator for NodeChildrenIter<'_, T> {}
impl<T> FusedIterator for NodeChildrenIter<'_, T> {}
impl<T> Debug for NodeChildrenIter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeChildrenIter")
            .field("remaining", &self.ids.as_slice())
            .finish()
    }
}
