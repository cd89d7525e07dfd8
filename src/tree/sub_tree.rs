use core::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
};
use tracing::trace;
use crate::{
    traversal::{Traversable, TraversalOrder, Traverser},
    util::TreeId,
    TreeError,
    TreeResult,
};
use super::{Tree, NodeId, NodeRef, Iter};

/// A live view of the subtree rooted at one node of a tree.
///
/// The view does not borrow the tree: the backing tree is passed to every call instead. Mutations made through the view are forwarded to the tree and keep the view valid, while any other modification of the tree makes every further call fail with [`TreeError::ConcurrentModification`].
///
/// # Example
/// ```rust
/// use kindling::Tree;
///
/// let mut tree = Tree::with_root("root");
/// let root = tree.root_id().unwrap();
/// let branch = tree.add_child(root, "branch").unwrap();
/// tree.add_child(root, "other").unwrap();
///
/// let mut view = tree.sub_tree(branch).unwrap();
/// view.add_child(&mut tree, branch, "leaf").unwrap();
/// assert_eq!(view.size(&tree).unwrap(), 2);
/// assert_eq!(tree.size(), 4);
///
/// tree.add_child(root, "behind the view's back").unwrap();
/// assert!(view.size(&tree).is_err());
/// ```
///
/// [`TreeError::ConcurrentModification`]: ../enum.TreeError.html#variant.ConcurrentModification " "
pub struct SubTree<T> {
    tree: TreeId,
    root: NodeId,
    mod_count: usize,
    _phantom: PhantomData<fn() -> T>,
}
impl<T> SubTree<T> {
    pub(crate) fn new(tree: &Tree<T>, root: NodeId) -> Self {
        Self {
            tree: tree.tree_id(),
            root,
            mod_count: tree.mod_count(),
            _phantom: PhantomData,
        }
    }
    /// Checks, in order, that the tree is the backing tree, that it was not modified behind the view's back and that the root of the view still exists.
    fn check(&self, tree: &Tree<T>) -> TreeResult<()> {
        if tree.tree_id() != self.tree {
            return Err(TreeError::ForeignTree);
        }
        if tree.mod_count() != self.mod_count {
            return Err(TreeError::ConcurrentModification);
        }
        if !tree.contains(self.root) {
            return Err(TreeError::NotFound);
        }
        Ok(())
    }
    fn check_inside(&self, tree: &Tree<T>, id: NodeId) -> TreeResult<()> {
        self.check(tree)?;
        if tree.contains(id) && tree.is_ancestor_or_self(self.root, id) {
            Ok(())
        } else {
            Err(TreeError::NotFound)
        }
    }
    /// Runs a forwarded mutation and mirrors the counter of the tree, whether the mutation succeeded or not.
    fn forward<R>(
        &mut self,
        tree: &mut Tree<T>,
        mutation: impl FnOnce(&mut Tree<T>) -> TreeResult<R>,
    ) -> TreeResult<R> {
        let result = mutation(tree);
        self.mod_count = tree.mod_count();
        trace!(root = ?self.root, mod_count = self.mod_count, ok = result.is_ok(), "forwarded mutation");
        result
    }

    /// Returns the id of the root of the view.
    #[inline(always)]
    pub const fn root_id(&self) -> NodeId {
        self.root
    }
    /// Returns a reference to the root of the view.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the view was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this view
    /// - `NotFound` if the root of the view was removed through the view
    pub fn root<'t>(&self, tree: &'t Tree<T>) -> TreeResult<NodeRef<'t, T>> {
        self.check(tree)?;
        Ok(NodeRef::new(tree, self.root))
    }
    /// Returns the number of nodes in the view.
    ///
    /// # Errors
    /// Same as [`root`].
    ///
    /// [`root`]: #method.root " "
    pub fn size(&self, tree: &Tree<T>) -> TreeResult<usize> {
        self.root(tree).map(|root| root.size())
    }
    /// Returns `true` if the node is inside the view.
    ///
    /// # Errors
    /// Same as [`root`].
    ///
    /// [`root`]: #method.root " "
    pub fn contains(&self, tree: &Tree<T>, id: NodeId) -> TreeResult<bool> {
        self.check(tree)?;
        Ok(tree.contains(id) && tree.is_ancestor_or_self(self.root, id))
    }
    /// Finds the first node of the view, in pre-order from its root, whose payload equals `data`.
    ///
    /// # Errors
    /// Same as [`root`].
    ///
    /// [`root`]: #method.root " "
    pub fn get_node(&self, tree: &Tree<T>, data: &T) -> TreeResult<Option<NodeId>>
    where
        T: PartialEq,
    {
        self.check(tree)?;
        Ok(tree.find_from(self.root, |candidate| candidate == data))
    }
    /// Returns an iterator over the nodes of the view in the default order of the tree.
    ///
    /// # Errors
    /// Same as [`root`].
    ///
    /// [`root`]: #method.root " "
    #[inline]
    pub fn iter<'t>(&self, tree: &'t Tree<T>) -> TreeResult<Iter<'t, T>> {
        self.iter_in(tree, tree.default_order())
    }
    /// Returns an iterator over the nodes of the view in the specified order.
    ///
    /// # Errors
    /// Same as [`root`].
    ///
    /// [`root`]: #method.root " "
    pub fn iter_in<'t>(&self, tree: &'t Tree<T>, order: TraversalOrder) -> TreeResult<Iter<'t, T>> {
        self.check(tree)?;
        Ok(Iter::new(tree, tree.collect_from(self.root, order)))
    }
    /// Returns a traverser focused on the root of the view.
    ///
    /// # Errors
    /// Same as [`root`].
    ///
    /// [`root`]: #method.root " "
    pub fn traverser(&self, tree: &Tree<T>) -> TreeResult<Traverser<T>> {
        self.check(tree)?;
        tree.traverser_at(self.root)
    }
    /// Creates a view of a subtree of this view.
    ///
    /// # Errors
    /// Same as [`root`], and `NotFound` if the node is not inside the view.
    ///
    /// [`root`]: #method.root " "
    pub fn sub_tree(&self, tree: &Tree<T>, id: NodeId) -> TreeResult<SubTree<T>> {
        self.check_inside(tree, id)?;
        Ok(SubTree::new(tree, id))
    }

    /// Appends a new node to the children of `parent`, which must be inside the view.
    ///
    /// # Errors
    /// Same as [`root`], `NotFound` if the parent is not inside the view, and any error of [`Tree::add_child`].
    ///
    /// [`root`]: #method.root " "
    /// [`Tree::add_child`]: struct.Tree.html#method.add_child " "
    pub fn add_child(&mut self, tree: &mut Tree<T>, parent: NodeId, data: T) -> TreeResult<NodeId> {
        self.check_inside(tree, parent)?;
        self.forward(tree, |tree| tree.add_child(parent, data))
    }
    /// Inserts a new node between `node`, which must be inside the view, and its parent.
    ///
    /// # Errors
    /// Same as [`root`], `NotFound` if the node is not inside the view, and any error of [`Tree::insert`].
    ///
    /// [`root`]: #method.root " "
    /// [`Tree::insert`]: struct.Tree.html#method.insert " "
    pub fn insert(&mut self, tree: &mut Tree<T>, node: NodeId, data: T) -> TreeResult<NodeId> {
        self.check_inside(tree, node)?;
        self.forward(tree, |tree| tree.insert(node, data))
    }
    /// Removes the first node of the view, in pre-order from its root, whose payload equals `data`, promoting its children into its place. Returns `Ok(None)` if there is no such node.
    ///
    /// Removing the root of the view is allowed, and makes every further query fail with `NotFound`.
    ///
    /// # Errors
    /// Same as [`root`], and any error of [`Tree::remove_node`].
    ///
    /// [`root`]: #method.root " "
    /// [`Tree::remove_node`]: struct.Tree.html#method.remove_node " "
    pub fn remove(&mut self, tree: &mut Tree<T>, data: &T) -> TreeResult<Option<T>>
    where
        T: PartialEq,
    {
        let found = self.get_node(tree, data)?;
        match found {
            Some(id) => self.forward(tree, |tree| tree.remove_node(id)).map(Some),
            None => Ok(None),
        }
    }
    /// Removes the subtree rooted at `id`, which must be inside the view, returning the number of removed nodes.
    ///
    /// # Errors
    /// Same as [`root`], `NotFound` if the node is not inside the view, and any error of [`Tree::trim`].
    ///
    /// [`root`]: #method.root " "
    /// [`Tree::trim`]: struct.Tree.html#method.trim " "
    pub fn trim(&mut self, tree: &mut Tree<T>, id: NodeId) -> TreeResult<usize> {
        self.check_inside(tree, id)?;
        self.forward(tree, |tree| tree.trim(id))
    }
    /// Moves every node of `other` under `parent`, which must be inside the view. Returns the new id of the grafted root, or `None` if `other` was empty.
    ///
    /// # Errors
    /// Same as [`root`], `NotFound` if the parent is not inside the view, and any error of [`Tree::add_subtree`].
    ///
    /// [`root`]: #method.root " "
    /// [`Tree::add_subtree`]: struct.Tree.html#method.add_subtree " "
    pub fn add_subtree(
        &mut self,
        tree: &mut Tree<T>,
        parent: NodeId,
        other: Tree<T>,
    ) -> TreeResult<Option<NodeId>> {
        self.check_inside(tree, parent)?;
        self.forward(tree, |tree| tree.add_subtree(parent, other))
    }
}
impl<T> Clone for SubTree<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            root: self.root,
            mod_count: self.mod_count,
            _phantom: PhantomData,
        }
    }
}
impl<T> Debug for SubTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubTree")
            .field("root", &self.root)
            .field("mod_count", &self.mod_count)
            .finish()
    }
}
