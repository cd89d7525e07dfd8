//! Ordered multi-way trees.
//!
//! The module is home to the following items:
//! - [`Tree`], the collection itself, which owns every node in an arena
//! - [`NodeRef`] and [`NodeRefMut`], borrowing handles to a single node, read-only and read-write respectively
//! - [`SubTree`], a live view of the part of a tree rooted at one node
//! - [`Iter`] and [`Walker`], iterators over a tree in a [`TraversalOrder`]; the latter does not borrow the tree and can remove nodes
//! - [`NodeId`] and [`Detached`], a node handle and a node which has not been added to a tree yet
//!
//! [`Tree`]: struct.Tree.html " "
//! [`NodeRef`]: struct.NodeRef.html " "
//! [`NodeRefMut`]: struct.NodeRefMut.html " "
//! [`SubTree`]: struct.SubTree.html " "
//! [`Iter`]: struct.Iter.html " "
//! [`Walker`]: struct.Walker.html " "
//! [`NodeId`]: struct.NodeId.html " "
//! [`Detached`]: struct.Detached.html " "
//! [`TraversalOrder`]: ../traversal/enum.TraversalOrder.html " "

mod node;
pub use node::{NodeId, Detached};
pub(crate) use node::Node;

mod node_ref;
pub use node_ref::{NodeRef, NodeRefMut, NodeChildrenIter};

mod iter;
pub use iter::{Iter, Walker};

mod sub_tree;
pub use sub_tree::SubTree;

use core::hash::{Hash, Hasher};
use std::collections::HashMap;
use generational_arena::Arena;
use tracing::{instrument, trace};
use crate::{
    traversal::{Traversable, TraversalOrder, Traverser},
    util::{Stack, TreeId},
    HashFolder,
    TreeError,
    TreeResult,
};

/// Hash multiplier of nodes.
pub(crate) const NODE_MULTIPLIER: i32 = 31;
/// Hash multiplier of whole trees, distinct from the one of nodes.
pub(crate) const TREE_MULTIPLIER: i32 = 43;

/// An ordered multi-way tree.
///
/// Every node can have any number of children, kept in the order they were added in. Nodes live in an arena owned by the tree and are addressed with [`NodeId`]s.
///
/// Each successful mutation bumps the [modification counter] of the tree exactly once. Detached handles created by the tree ([`SubTree`], [`Walker`] and [`Traverser`]) remember the counter and refuse to operate once the tree was modified by anything other than themselves.
///
/// # Example
/// ```rust
/// use kindling::Tree;
///
/// let mut tree = Tree::with_root(1);
/// let root = tree.root_id().unwrap();
/// let two = tree.add_child(root, 2).unwrap();
/// tree.add_child(root, 3).unwrap();
/// tree.add_child(two, 4).unwrap();
///
/// let level_order: Vec<i32> = tree.iter().map(|node| *node.data()).collect();
/// assert_eq!(level_order, [1, 2, 3, 4]);
/// assert_eq!(tree.trim(two).unwrap(), 2);
/// assert_eq!(tree.size(), 2);
/// ```
///
/// [`NodeId`]: struct.NodeId.html " "
/// [modification counter]: #method.mod_count " "
/// [`SubTree`]: struct.SubTree.html " "
/// [`Walker`]: struct.Walker.html " "
/// [`Traverser`]: ../traversal/struct.Traverser.html " "
#[derive(Debug)]
pub struct Tree<T> {
    arena: Arena<Node<T>>,
    root: Option<NodeId>,
    mod_count: usize,
    order: TraversalOrder,
    read_only: bool,
    id: TreeId,
}
impl<T> Tree<T> {
    /// Creates an empty tree.
    #[inline]
    pub fn new() -> Self {
        Self::from_arena(Arena::new())
    }
    /// Creates an empty tree with space for at least the specified number of nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_arena(Arena::with_capacity(capacity))
    }
    /// Creates a tree with a single root node.
    pub fn with_root(data: T) -> Self {
        let mut tree = Self::new();
        tree.root = Some(NodeId(tree.arena.insert(Node::new(data, None))));
        tree
    }
    fn from_arena(arena: Arena<Node<T>>) -> Self {
        Self {
            arena,
            root: None,
            mod_count: 0,
            order: TraversalOrder::default(),
            read_only: false,
            id: TreeId::fresh(),
        }
    }

    /// Sets the default traversal order, used by [`iter`], [`walker`], equality and hashing.
    ///
    /// [`iter`]: #method.iter " "
    /// [`walker`]: #method.walker " "
    #[inline]
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }
    /// Changes the default traversal order. This is not a modification of the tree.
    #[inline]
    pub fn set_default_order(&mut self, order: TraversalOrder) {
        self.order = order;
    }
    /// Returns the default traversal order.
    #[inline(always)]
    pub const fn default_order(&self) -> TraversalOrder {
        self.order
    }
    /// Turns the tree into a read-only one. Every mutating operation on a read-only tree fails with [`TreeError::Unsupported`].
    ///
    /// [`TreeError::Unsupported`]: ../enum.TreeError.html#variant.Unsupported " "
    #[inline]
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
    /// Returns `true` if the tree rejects mutations, `false` otherwise.
    #[inline(always)]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }
    /// Returns the modification counter, which increases by one with every successful mutation and wraps on overflow.
    #[inline(always)]
    pub const fn mod_count(&self) -> usize {
        self.mod_count
    }

    /// Returns a reference to the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|root| NodeRef::new(self, root))
    }
    /// Returns the id of the root node, or `None` if the tree is empty.
    #[inline(always)]
    pub const fn root_id(&self) -> Option<NodeId> {
        self.root
    }
    /// Returns a *mutable* reference to the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root_mut(&mut self) -> Option<NodeRefMut<'_, T>> {
        let root = self.root?;
        Some(NodeRefMut::new(self, root))
    }
    /// Returns a reference to the specified node, or `None` if it's not in the tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        if self.contains(id) {
            Some(NodeRef::new(self, id))
        } else {
            None
        }
    }
    /// Returns a *mutable* reference to the specified node, or `None` if it's not in the tree.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeRefMut<'_, T>> {
        if self.contains(id) {
            Some(NodeRefMut::new(self, id))
        } else {
            None
        }
    }
    /// Returns a reference to the payload of the specified node, or `None` if it's not in the tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id.0).map(|node| &node.data)
    }
    /// Returns `true` if the specified node is in the tree, `false` otherwise.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }
    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn size(&self) -> usize {
        self.arena.len()
    }
    /// Returns `true` if the tree has no nodes, i.e. no root.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    /// Finds the first node, in pre-order from the root, whose payload equals `data`.
    pub fn get_node(&self, data: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        self.find_from(self.root?, |candidate| candidate == data)
    }

    /// Adds a detached node to the tree, under its recorded parent or as the root.
    ///
    /// # Errors
    /// Same as [`add_child`].
    ///
    /// [`add_child`]: #method.add_child " "
    #[inline]
    pub fn add(&mut self, node: Detached<T>) -> TreeResult<NodeId> {
        let (data, parent) = node.into_parts();
        self.add_child(parent, data)
    }
    /// Appends a new node to the children of `parent`, or creates the root of an empty tree if `parent` is `None`.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `NotFound` if the parent is not in the tree
    /// - `InvalidArgument` if `parent` is `None` but the tree already has a root
    /// - `Unsupported` if the tree is read-only
    pub fn add_child(&mut self, parent: impl Into<Option<NodeId>>, data: T) -> TreeResult<NodeId> {
        self.check_writable()?;
        let parent = parent.into();
        let id = self.attach(parent, data)?;
        self.bump();
        trace!(?parent, node = ?id, mod_count = self.mod_count, "added node");
        Ok(id)
    }
    /// Inserts a new node between `node` and its parent.
    ///
    /// The new node is appended to the children of the former parent of `node`, and `node` becomes its only child. The tree is left unchanged if the new node cannot be added, which is always the case when `node` is the root.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `NotFound` if `node` is not in the tree
    /// - `InvalidArgument` if `node` is the root
    /// - `Unsupported` if the tree is read-only
    pub fn insert(&mut self, node: NodeId, data: T) -> TreeResult<NodeId> {
        self.check_writable()?;
        let old_parent = self.arena.get(node.0).ok_or(TreeError::NotFound)?.parent;
        let inserted = self.attach(old_parent, data)?;
        self.unlink(node);
        self.entry_mut(node).parent = Some(inserted);
        self.entry_mut(inserted).children.push(node);
        self.bump();
        trace!(node = ?node, ?inserted, mod_count = self.mod_count, "inserted parent");
        Ok(inserted)
    }
    /// Removes the first node, in pre-order from the root, whose payload equals `data`, promoting its children into its place. Returns `Ok(None)` if there is no such node.
    ///
    /// # Errors
    /// Same as [`remove_node`].
    ///
    /// [`remove_node`]: #method.remove_node " "
    pub fn remove(&mut self, data: &T) -> TreeResult<Option<T>>
    where
        T: PartialEq,
    {
        self.check_writable()?;
        match self.get_node(data) {
            Some(id) => self.remove_node(id).map(Some),
            None => Ok(None),
        }
    }
    /// Removes a single node, splicing its children into its parent's children at the position the node occupied.
    ///
    /// If the node is the root, it's replaced with its only child; a childless root leaves the tree empty.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `NotFound` if the node is not in the tree
    /// - `IllegalState` if the node is the root and has more than one child
    /// - `Unsupported` if the tree is read-only
    pub fn remove_node(&mut self, id: NodeId) -> TreeResult<T> {
        self.check_writable()?;
        let data = self.splice_out(id)?;
        self.bump();
        trace!(node = ?id, mod_count = self.mod_count, "removed node");
        Ok(data)
    }
    /// Removes the subtree rooted at the specified node, returning the number of removed nodes.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `NotFound` if the node is not in the tree
    /// - `Unsupported` if the tree is read-only
    #[instrument(level = "debug", skip(self))]
    pub fn trim(&mut self, id: NodeId) -> TreeResult<usize> {
        self.check_writable()?;
        if !self.contains(id) {
            return Err(TreeError::NotFound);
        }
        let removed = self.cut(id);
        self.bump();
        trace!(removed, mod_count = self.mod_count, "trimmed subtree");
        Ok(removed)
    }
    /// Removes every node, returning how many there were.
    ///
    /// # Errors
    /// Fails with `Unsupported` if the tree is read-only.
    pub fn clear(&mut self) -> TreeResult<usize> {
        match self.root {
            Some(root) => self.trim(root),
            None => self.check_writable().map(|()| 0),
        }
    }
    /// Replaces the whole content of the tree with a single root node.
    ///
    /// # Errors
    /// Fails with `Unsupported` if the tree is read-only.
    pub fn set_root(&mut self, data: T) -> TreeResult<NodeId> {
        self.check_writable()?;
        self.arena.clear();
        let root = NodeId(self.arena.insert(Node::new(data, None)));
        self.root = Some(root);
        self.bump();
        trace!(?root, mod_count = self.mod_count, "replaced tree content");
        Ok(root)
    }
    /// Moves every node of `other` into this tree, appending its root to the children of `parent`, or making it the root of this tree if `parent` is `None`. Returns the new id of the grafted root, or `None` if `other` was empty.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `NotFound` if the parent is not in the tree
    /// - `InvalidArgument` if `parent` is `None` but the tree already has a root
    /// - `Unsupported` if the tree is read-only
    #[instrument(level = "debug", skip_all, fields(grafted = other.size()))]
    pub fn add_subtree(
        &mut self,
        parent: impl Into<Option<NodeId>>,
        mut other: Tree<T>,
    ) -> TreeResult<Option<NodeId>> {
        self.check_writable()?;
        let parent = parent.into();
        match parent {
            Some(parent) if !self.contains(parent) => return Err(TreeError::NotFound),
            None if self.root.is_some() => {
                return Err(TreeError::InvalidArgument("the tree already has a root"))
            }
            _ => {}
        }
        let top = match other.root.take() {
            Some(top) => top,
            None => return Ok(None),
        };
        let grafted = transplant(&mut other, top, self, parent);
        self.bump();
        trace!(?parent, ?grafted, mod_count = self.mod_count, "grafted subtree");
        Ok(Some(grafted))
    }

    /// Creates a live view of the subtree rooted at the specified node.
    ///
    /// # Errors
    /// Fails with `NotFound` if the node is not in the tree.
    #[inline]
    pub fn sub_tree(&self, id: NodeId) -> TreeResult<SubTree<T>> {
        if self.contains(id) {
            Ok(SubTree::new(self, id))
        } else {
            Err(TreeError::NotFound)
        }
    }
    /// Returns an iterator over the nodes of the tree in the default order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.iter_in(self.order)
    }
    /// Returns an iterator over the nodes of the tree in the specified order.
    ///
    /// The order of nodes is computed when the iterator is created.
    pub fn iter_in(&self, order: TraversalOrder) -> Iter<'_, T> {
        let ids = self.root.map_or_else(Vec::new, |root| self.collect_from(root, order));
        Iter::new(self, ids)
    }
    /// Returns a fail-fast iterator over the nodes of the tree in the default order, which does not borrow the tree.
    #[inline]
    pub fn walker(&self) -> Walker<T> {
        self.walker_in(self.order)
    }
    /// Returns a fail-fast iterator over the nodes of the tree in the specified order, which does not borrow the tree.
    pub fn walker_in(&self, order: TraversalOrder) -> Walker<T> {
        let ids = self.root.map_or_else(Vec::new, |root| self.collect_from(root, order));
        Walker::new(self, ids)
    }
    /// Returns a fail-fast iterator over the subtree rooted at the specified node, in the specified order.
    ///
    /// # Errors
    /// Fails with `NotFound` if the node is not in the tree.
    pub fn walker_from(&self, id: NodeId, order: TraversalOrder) -> TreeResult<Walker<T>> {
        if !self.contains(id) {
            return Err(TreeError::NotFound);
        }
        Ok(Walker::new(self, self.collect_from(id, order)))
    }
    /// Returns a traverser focused on the root, or an unfocused one if the tree is empty.
    #[inline]
    pub fn traverser(&self) -> Traverser<T> {
        Traverser::new(self, self.root)
    }
    /// Returns a traverser focused on the specified node.
    ///
    /// # Errors
    /// Fails with `NotFound` if the node is not in the tree.
    pub fn traverser_at(&self, id: NodeId) -> TreeResult<Traverser<T>> {
        if self.contains(id) {
            Ok(Traverser::new(self, Some(id)))
        } else {
            Err(TreeError::NotFound)
        }
    }

    /// Returns the structural hash code of the tree: the hash codes of its nodes, in the default order, folded with the multiplier 43.
    #[inline]
    pub fn hash_code(&self) -> i32
    where
        T: Hash,
    {
        self.hash_code_in(self.order)
    }
    /// Returns the structural hash code of the tree with its nodes folded in the specified order.
    pub fn hash_code_in(&self, order: TraversalOrder) -> i32
    where
        T: Hash,
    {
        let mut folder = HashFolder::from_parts(1, TREE_MULTIPLIER);
        if let Some(root) = self.root {
            let codes = self.node_codes(root);
            for id in self.collect_from(root, order) {
                folder.fold_code(codes.get(&id).copied().unwrap_or_default());
            }
        }
        folder.hash_value()
    }

    #[inline(always)]
    pub(crate) const fn tree_id(&self) -> TreeId {
        self.id
    }
    #[inline]
    pub(crate) fn check_writable(&self) -> TreeResult<()> {
        if self.read_only {
            Err(TreeError::Unsupported)
        } else {
            Ok(())
        }
    }
    #[inline]
    pub(crate) fn bump(&mut self) {
        self.mod_count = self.mod_count.wrapping_add(1);
    }
    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> &Node<T> {
        self.arena.get(id.0).expect("dangling node id")
    }
    #[inline]
    pub(crate) fn entry_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.arena.get_mut(id.0).expect("dangling node id")
    }
    /// `true` if `ancestor` is `node` or lies on the path from `node` to the root.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent_of(current);
        }
        false
    }
    /// Child indices leading from the root to the node.
    pub(crate) fn path_of(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            path.push(self.entry(parent).index_of(current).expect("parent does not list its child"));
            current = parent;
        }
        path.reverse();
        path
    }

    /// Computes the structural hash code of every node in the subtree rooted at `top` in a single depth-first pass.
    pub(crate) fn node_codes(&self, top: NodeId) -> HashMap<NodeId, i32>
    where
        T: Hash,
    {
        enum Visit {
            Enter(NodeId, usize),
            Exit(NodeId),
        }
        let mut codes = HashMap::new();
        // Always the path of the node being entered or exited.
        let mut path = self.path_of(top);
        let mut pending: Stack<Visit> = Stack::new();
        pending.push(Visit::Enter(top, 0));
        while let Some(visit) = pending.pop() {
            match visit {
                Visit::Enter(id, index) => {
                    if id != top {
                        path.push(index);
                    }
                    pending.push(Visit::Exit(id));
                    let children = &self.entry(id).children;
                    pending.extend(
                        children
                            .iter()
                            .enumerate()
                            .rev()
                            .map(|(index, &child)| Visit::Enter(child, index)),
                    );
                }
                Visit::Exit(id) => {
                    let node = self.entry(id);
                    let mut folder = HashFolder::from_parts(1, NODE_MULTIPLIER);
                    folder.fold(node.parent.map(|_| &path[..path.len() - 1]));
                    folder.fold(Some(&node.data));
                    for child in &node.children {
                        folder.fold_code(codes.get(child).copied().unwrap_or_default());
                    }
                    codes.insert(id, folder.hash_value());
                    if id != top {
                        path.pop();
                    }
                }
            }
        }
        codes
    }

    /// Creates a new root and moves the current one under it. Creates a plain root if the tree is empty.
    pub(crate) fn raise_root(&mut self, data: T) -> TreeResult<NodeId> {
        self.check_writable()?;
        let old_root = match self.root {
            Some(old_root) => old_root,
            None => return self.add_child(None, data),
        };
        let mut node = Node::new(data, None);
        node.children.push(old_root);
        let id = NodeId(self.arena.insert(node));
        self.entry_mut(old_root).parent = Some(id);
        self.root = Some(id);
        self.bump();
        trace!(node = ?id, ?old_root, mod_count = self.mod_count, "raised root");
        Ok(id)
    }
    /// Links a new node without touching the counter.
    pub(crate) fn attach(&mut self, parent: Option<NodeId>, data: T) -> TreeResult<NodeId> {
        match parent {
            None => {
                if self.root.is_some() {
                    return Err(TreeError::InvalidArgument("the tree already has a root"));
                }
                let id = NodeId(self.arena.insert(Node::new(data, None)));
                self.root = Some(id);
                Ok(id)
            }
            Some(parent) => {
                if !self.contains(parent) {
                    return Err(TreeError::NotFound);
                }
                let id = NodeId(self.arena.insert(Node::new(data, Some(parent))));
                self.entry_mut(parent).children.push(id);
                Ok(id)
            }
        }
    }
    /// Drops the link from the parent of the node to it, or the root link. The node keeps its own parent link.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let parent = self.entry(id).parent;
        match parent {
            Some(parent) => {
                let parent = self.entry_mut(parent);
                let index = parent.index_of(id).expect("parent does not list its child");
                parent.children.remove(index);
            }
            None => self.root = None,
        }
    }
    /// Moves the subtree rooted at the node out into a new tree, without touching the counter.
    pub(crate) fn extract(&mut self, id: NodeId) -> Tree<T> {
        self.unlink(id);
        let mut extracted = Tree::new().with_order(self.order);
        transplant(self, id, &mut extracted, None);
        extracted
    }
    fn splice_out(&mut self, id: NodeId) -> TreeResult<T> {
        let node = self.arena.get(id.0).ok_or(TreeError::NotFound)?;
        let (parent, only_child) = (node.parent, node.children.first().copied());
        let child_count = node.children.len();
        match parent {
            Some(parent) => {
                let node = self.arena.remove(id.0).expect("dangling node id");
                let siblings = &mut self.entry_mut(parent).children;
                let index = siblings
                    .iter()
                    .position(|&c| c == id)
                    .expect("parent does not list its child");
                siblings.remove(index);
                siblings.insert_many(index, node.children.iter().copied());
                for &child in &node.children {
                    self.entry_mut(child).parent = Some(parent);
                }
                Ok(node.data)
            }
            None if child_count > 1 => Err(TreeError::IllegalState(
                "cannot remove a root which has more than one child",
            )),
            None => {
                let node = self.arena.remove(id.0).expect("dangling node id");
                if let Some(child) = only_child {
                    self.entry_mut(child).parent = None;
                }
                self.root = only_child;
                Ok(node.data)
            }
        }
    }
    fn cut(&mut self, id: NodeId) -> usize {
        let doomed = self.collect_from(id, TraversalOrder::PostOrder);
        self.unlink(id);
        for node in &doomed {
            self.arena.remove(node.0);
        }
        doomed.len()
    }
}

/// Moves the subtree rooted at `top`, which must already be unlinked in `from`, under `parent` in `to`. Returns the new id of `top`.
fn transplant<T>(
    from: &mut Tree<T>,
    top: NodeId,
    to: &mut Tree<T>,
    parent: Option<NodeId>,
) -> NodeId {
    let order = from.collect_from(top, TraversalOrder::PreOrder);
    let mut moved = HashMap::with_capacity(order.len());
    for old in order {
        let node = from.arena.remove(old.0).expect("subtree node vanished during a move");
        let new_parent = if old == top {
            parent
        } else {
            node.parent.and_then(|p| moved.get(&p).copied())
        };
        let new = NodeId(to.arena.insert(Node::new(node.data, new_parent)));
        match new_parent {
            Some(p) => to.entry_mut(p).children.push(new),
            None => to.root = Some(new),
        }
        moved.insert(old, new);
    }
    moved.get(&top).copied().expect("the top of a moved subtree is always moved")
}

impl<T> Traversable for Tree<T> {
    type Value = T;
    type Cursor = NodeId;

    #[inline(always)]
    fn cursor_to_root(&self) -> Option<NodeId> {
        self.root
    }
    #[inline]
    fn value_of(&self, cursor: NodeId) -> Option<&T> {
        self.get(cursor)
    }
    #[inline]
    fn parent_of(&self, cursor: NodeId) -> Option<NodeId> {
        self.arena.get(cursor.0).and_then(|node| node.parent)
    }
    #[inline]
    fn children_of(&self, cursor: NodeId) -> &[NodeId] {
        self.arena.get(cursor.0).map_or(&[][..], |node| node.children.as_slice())
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = NodeRef<'a, T>;
    type IntoIter = Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for Tree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Clone> Clone for Tree<T> {
    /// Clones every node. Node ids of the original stay valid in the clone, but the clone is a different tree for the purposes of detached handles.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            mod_count: 0,
            order: self.order,
            read_only: self.read_only,
            id: TreeId::fresh(),
        }
    }
}
impl<T: PartialEq> PartialEq for Tree<T> {
    /// Two trees are equal if both are empty or their roots are structurally equal, which makes every pair of nodes at the same position equal as well. The default orders of the trees play no part.
    fn eq(&self, other: &Self) -> bool {
        match (self.root(), other.root()) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
impl<T: Eq> Eq for Tree<T> {}
impl<T: Hash> Hash for Tree<T> {
    /// Writes the hash code in level order, whatever the default order, so that equal trees hash equally.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code_in(TraversalOrder::LevelOrder));
    }
}
