use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    marker::PhantomData,
};
use std::vec;
use tracing::trace;
use crate::{util::TreeId, TreeError, TreeResult};
use super::{Tree, NodeId, NodeRef};

/// An iterator over references to the nodes of a tree, in the order chosen when it was created.
///
/// Created by [`Tree::iter`] and [`Tree::iter_in`].
///
/// [`Tree::iter`]: struct.Tree.html#method.iter " "
/// [`Tree::iter_in`]: struct.Tree.html#method.iter_in " "
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    ids: vec::IntoIter<NodeId>,
}
impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(tree: &'a Tree<T>, ids: Vec<NodeId>) -> Self {
        Self {
            tree,
            ids: ids.into_iter(),
        }
    }
}
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = NodeRef<'a, T>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| NodeRef::new(self.tree, id))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| NodeRef::new(self.tree, id))
    }
}
impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
impl<T> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.ids.as_slice())
            .finish()
    }
}

/// A fail-fast iterator over the nodes of a tree which does not borrow it.
///
/// The walker receives the tree on every call, which lets it remove the node it returned last. If the tree is modified in any other way after the walker was created, every further call fails with [`TreeError::ConcurrentModification`].
///
/// # Example
/// ```rust
/// use kindling::{Tree, TraversalOrder};
///
/// let mut tree = Tree::with_root(0);
/// let root = tree.root_id().unwrap();
/// let one = tree.add_child(root, 1).unwrap();
/// tree.add_child(one, 2).unwrap();
///
/// let mut walker = tree.walker_in(TraversalOrder::PreOrder);
/// while walker.has_next() {
///     if *walker.next(&tree).unwrap().data() == 1 {
///         walker.remove(&mut tree).unwrap();
///     }
/// }
/// let remaining: Vec<i32> = tree.iter().map(|node| *node.data()).collect();
/// assert_eq!(remaining, [0, 2]);
/// ```
///
/// [`TreeError::ConcurrentModification`]: ../enum.TreeError.html#variant.ConcurrentModification " "
pub struct Walker<T> {
    tree: TreeId,
    ids: vec::IntoIter<NodeId>,
    last: Option<NodeId>,
    mod_count: usize,
    _phantom: PhantomData<fn() -> T>,
}
impl<T> Walker<T> {
    pub(crate) fn new(tree: &Tree<T>, ids: Vec<NodeId>) -> Self {
        Self {
            tree: tree.tree_id(),
            ids: ids.into_iter(),
            last: None,
            mod_count: tree.mod_count(),
            _phantom: PhantomData,
        }
    }
    fn check(&self, tree: &Tree<T>) -> TreeResult<()> {
        if tree.tree_id() != self.tree {
            Err(TreeError::ForeignTree)
        } else if tree.mod_count() != self.mod_count {
            Err(TreeError::ConcurrentModification)
        } else {
            Ok(())
        }
    }
    /// Returns `true` if there are nodes left to visit.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.ids.len() != 0
    }
    /// Returns the number of nodes left to visit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.ids.len()
    }
    /// Returns a reference to the next node.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the walker was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this walker
    /// - `NoSuchElement` if every node was already visited
    pub fn next<'t>(&mut self, tree: &'t Tree<T>) -> TreeResult<NodeRef<'t, T>> {
        self.check(tree)?;
        let id = self.ids.next().ok_or(TreeError::NoSuchElement)?;
        self.last = Some(id);
        Ok(NodeRef::new(tree, id))
    }
    /// Removes the node returned by the last call to [`next`], promoting its children into its place, and returns its payload.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the walker was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this walker
    /// - `IllegalState` if `next` was not called yet or the node it returned was already removed
    /// - any error of [`Tree::remove_node`]
    ///
    /// [`next`]: #method.next " "
    /// [`Tree::remove_node`]: struct.Tree.html#method.remove_node " "
    pub fn remove(&mut self, tree: &mut Tree<T>) -> TreeResult<T> {
        self.check(tree)?;
        let id = self.last.ok_or(TreeError::IllegalState(
            "there is no last returned node to remove",
        ))?;
        let data = tree.remove_node(id)?;
        self.last = None;
        self.mod_count = tree.mod_count();
        trace!(node = ?id, mod_count = self.mod_count, "walker removed node");
        Ok(data)
    }
}
impl<T> Clone for Walker<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            ids: self.ids.clone(),
            last: self.last,
            mod_count: self.mod_count,
            _phantom: PhantomData,
        }
    }
}
impl<T> Debug for Walker<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("remaining", &self.ids.as_slice())
            .field("last", &self.last)
            .field("mod_count", &self.mod_count)
            .finish()
    }
}
