use core::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
};
use tracing::trace;
use crate::{
    tree::{Tree, NodeId, NodeRefMut},
    util::{Stack, TreeId},
    TreeError,
    TreeResult,
};
use super::{Direction, Traversable};

/// One level of the cursor: the focused node of that level and its siblings on either side.
#[derive(Clone, Debug)]
struct Frame {
    /// Previous siblings, nearest on top.
    prev: Stack<NodeId>,
    current: NodeId,
    /// Next siblings, nearest on top.
    next: Stack<NodeId>,
}
impl Frame {
    /// Builds the frame of `node` from the children of its parent.
    fn around<T>(tree: &Tree<T>, node: NodeId) -> Self {
        let siblings: &[NodeId] = match tree.parent_of(node) {
            Some(parent) => tree.children_of(parent),
            None => &[],
        };
        let (before, after) = match siblings.iter().position(|&s| s == node) {
            Some(index) => (&siblings[..index], &siblings[index + 1..]),
            None => (&[][..], &[][..]),
        };
        Self {
            prev: before.iter().copied().collect(),
            current: node,
            next: after.iter().rev().copied().collect(),
        }
    }
    /// Builds the frame of the first of `children`.
    fn first_of(children: &[NodeId]) -> Option<Self> {
        let (&first, rest) = children.split_first()?;
        Some(Self {
            prev: Stack::new(),
            current: first,
            next: rest.iter().rev().copied().collect(),
        })
    }
}

/// The siblings around the focused node of a [`Traverser`], in document order.
///
/// [`Traverser`]: struct.Traverser.html " "
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SiblingContext {
    /// The siblings which come before the focused node.
    pub before: Vec<NodeId>,
    /// The siblings which come after the focused node.
    pub after: Vec<NodeId>,
}

/// A cursor over a tree, which moves to the parent, first child, previous sibling or next sibling of its focused node and can mutate the tree where it stands.
///
/// The traverser keeps a stack of frames, one per level it descended through; each holds the siblings of the node of that level, so that moving between siblings is O(1). Like the other detached handles, it receives the tree on every call and fails with [`TreeError::ConcurrentModification`] once the tree was changed by anything other than itself.
///
/// A traverser with no focused node is *unfocused*: it cannot move anywhere, and adding a node to it creates the root of an empty tree.
///
/// # Example
/// ```rust
/// use kindling::{Tree, Direction};
///
/// let mut tree = Tree::with_root('R');
/// let root = tree.root_id().unwrap();
/// let a = tree.add_child(root, 'A').unwrap();
/// tree.add_child(root, 'B').unwrap();
/// tree.add_child(a, 'C').unwrap();
///
/// let mut traverser = tree.traverser();
/// traverser.next(&tree, Direction::Child).unwrap();
/// assert_eq!(traverser.trim(&mut tree).unwrap(), 2);
/// assert_eq!(traverser.current(), Some(root));
/// assert_eq!(tree.size(), 2);
/// ```
///
/// [`TreeError::ConcurrentModification`]: ../enum.TreeError.html#variant.ConcurrentModification " "
pub struct Traverser<T> {
    tree: TreeId,
    stack: Vec<Frame>,
    mod_count: usize,
    _phantom: PhantomData<fn() -> T>,
}
impl<T> Traverser<T> {
    pub(crate) fn new(tree: &Tree<T>, focus: Option<NodeId>) -> Self {
        Self {
            tree: tree.tree_id(),
            stack: focus.map(|node| Frame::around(tree, node)).into_iter().collect(),
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
    fn focused(&self) -> TreeResult<NodeId> {
        self.current()
            .ok_or(TreeError::IllegalState("the traverser is not focused on any node"))
    }
    fn sync(&mut self, tree: &Tree<T>) {
        self.mod_count = tree.mod_count();
    }
    /// Focuses the parent, rebuilt from the tree, in place of the frame below if that frame is centered on it.
    fn refocus_on(&mut self, tree: &Tree<T>, parent: NodeId) {
        let frame = Frame::around(tree, parent);
        match self.stack.last_mut() {
            Some(below) if below.current == parent => *below = frame,
            _ => self.stack.push(frame),
        }
    }

    /// Returns the id of the focused node, or `None` if the traverser is unfocused.
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().map(|frame| frame.current)
    }
    /// Returns the number of frames on the stack, which is 0 for an unfocused traverser.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
    /// Returns the siblings around the focused node, in document order, or `None` if the traverser is unfocused.
    pub fn sibling_context(&self) -> Option<SiblingContext> {
        let frame = self.stack.last()?;
        Some(SiblingContext {
            before: frame.prev.iter().copied().collect(),
            after: frame.next.iter().rev().copied().collect(),
        })
    }
    /// Returns a reference to the payload of the focused node.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    /// - `IllegalState` if the traverser is unfocused
    pub fn data<'t>(&self, tree: &'t Tree<T>) -> TreeResult<&'t T> {
        self.check(tree)?;
        let focus = self.focused()?;
        tree.get(focus).ok_or(TreeError::NotFound)
    }

    /// Returns `true` if the traverser can move in the specified direction. An unfocused traverser cannot move anywhere.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    pub fn has_next(&self, tree: &Tree<T>, direction: Direction) -> TreeResult<bool> {
        self.check(tree)?;
        let frame = match self.stack.last() {
            Some(frame) => frame,
            None => return Ok(false),
        };
        Ok(match direction {
            Direction::Parent => tree.parent_of(frame.current).is_some(),
            Direction::Child => tree.num_children_of(frame.current) != 0,
            Direction::PrevSibling => !frame.prev.is_empty(),
            Direction::NextSibling => !frame.next.is_empty(),
        })
    }
    /// Moves the cursor in the specified direction, returning the id of the newly focused node.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    /// - `NoSuchElement` if there is no node in that direction, which is always the case for an unfocused traverser
    pub fn next(&mut self, tree: &Tree<T>, direction: Direction) -> TreeResult<NodeId> {
        self.check(tree)?;
        let frame = self.stack.last_mut().ok_or(TreeError::NoSuchElement)?;
        match direction {
            Direction::Parent => {
                let parent = tree.parent_of(frame.current).ok_or(TreeError::NoSuchElement)?;
                self.stack.pop();
                self.refocus_on(tree, parent);
            }
            Direction::Child => {
                let child = Frame::first_of(tree.children_of(frame.current))
                    .ok_or(TreeError::NoSuchElement)?;
                self.stack.push(child);
            }
            Direction::PrevSibling => {
                let prev = frame.prev.pop().ok_or(TreeError::NoSuchElement)?;
                frame.next.push(frame.current);
                frame.current = prev;
            }
            Direction::NextSibling => {
                let next = frame.next.pop().ok_or(TreeError::NoSuchElement)?;
                frame.prev.push(frame.current);
                frame.current = next;
            }
        }
        self.focused()
    }

    /// Replaces the payload of the focused node, returning the previous one.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    /// - `IllegalState` if the traverser is unfocused
    /// - `Unsupported` if the tree is read-only
    pub fn set_data(&mut self, tree: &mut Tree<T>, data: T) -> TreeResult<T> {
        self.check(tree)?;
        let focus = self.focused()?;
        let old = NodeRefMut::new(tree, focus).set_data(data)?;
        self.sync(tree);
        Ok(old)
    }
    /// Appends a new child to the focused node, leaving the cursor where it is.
    ///
    /// An unfocused traverser instead makes the new node the root of the tree and focuses it. If the tree already has a root, as happens after removing a root with a single child, the old root becomes the only child of the new one.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    /// - `Unsupported` if the tree is read-only
    pub fn add(&mut self, tree: &mut Tree<T>, data: T) -> TreeResult<NodeId> {
        self.check(tree)?;
        let added = match self.current() {
            Some(focus) => tree.add_child(focus, data)?,
            None => {
                let root = tree.raise_root(data)?;
                self.stack.push(Frame::around(tree, root));
                root
            }
        };
        self.sync(tree);
        trace!(node = ?added, mod_count = self.mod_count, "traverser added node");
        Ok(added)
    }
    /// Inserts a new node between the focused node and its parent, keeping the focus on the same node. An unfocused traverser behaves like [`add`].
    ///
    /// # Errors
    /// Same as [`add`], and any error of [`Tree::insert`], which notably fails for the root.
    ///
    /// [`add`]: #method.add " "
    /// [`Tree::insert`]: ../tree/struct.Tree.html#method.insert " "
    pub fn insert(&mut self, tree: &mut Tree<T>, data: T) -> TreeResult<NodeId> {
        self.check(tree)?;
        let focus = match self.current() {
            Some(focus) => focus,
            None => return self.add(tree, data),
        };
        let inserted = tree.insert(focus, data)?;
        if let Some(frame) = self.stack.last_mut() {
            *frame = Frame::around(tree, focus);
        }
        self.sync(tree);
        trace!(node = ?inserted, mod_count = self.mod_count, "traverser inserted node");
        Ok(inserted)
    }
    /// Removes the focused node, promoting its children into its place, and returns its payload. The focus moves to the parent, or the traverser becomes unfocused if the root was removed.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    /// - `IllegalState` if the traverser is unfocused
    /// - any error of [`Tree::remove_node`], which notably fails for a root with more than one child
    ///
    /// [`Tree::remove_node`]: ../tree/struct.Tree.html#method.remove_node " "
    pub fn remove(&mut self, tree: &mut Tree<T>) -> TreeResult<T> {
        self.check(tree)?;
        let focus = self.focused()?;
        let parent = tree.parent_of(focus);
        let data = tree.remove_node(focus)?;
        self.leave(tree, parent);
        trace!(node = ?focus, mod_count = self.mod_count, "traverser removed node");
        Ok(data)
    }
    /// Removes the subtree rooted at the focused node, returning the number of removed nodes. The focus moves to the parent, or the traverser becomes unfocused if the root was removed.
    ///
    /// # Errors
    /// Will fail in the following scenarios:
    /// - `ForeignTree` if the traverser was created by another tree
    /// - `ConcurrentModification` if the tree was modified other than through this traverser
    /// - `IllegalState` if the traverser is unfocused
    /// - `Unsupported` if the tree is read-only
    pub fn trim(&mut self, tree: &mut Tree<T>) -> TreeResult<usize> {
        self.check(tree)?;
        let focus = self.focused()?;
        let parent = tree.parent_of(focus);
        let removed = tree.trim(focus)?;
        self.leave(tree, parent);
        Ok(removed)
    }
    /// Moves the focus off a node which no longer exists.
    fn leave(&mut self, tree: &Tree<T>, parent: Option<NodeId>) {
        self.stack.pop();
        match parent {
            Some(parent) => self.refocus_on(tree, parent),
            None => self.stack.clear(),
        }
        self.sync(tree);
    }
}
impl<T> Clone for Traverser<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            mod_count: self.mod_count,
            _phantom: PhantomData,
        }
    }
}
impl<T> Debug for Traverser<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traverser")
            .field("stack", &self.stack)
            .field("mod_count", &self.mod_count)
            .finish()
    }
}
