//! Everything related to traversing trees in general.
//!
//! The module is home to the following items:
//! - [`Traversable`], a *trait for types which describe tree-like structures* which can be walked from any node in any [`TraversalOrder`]
//! - [`Traverser`], a *cursor* over a [`Tree`] which moves in one of four [`Direction`]s and can mutate the tree where it stands
//! - The order and direction tags: [`TraversalOrder`] and [`Direction`]
//!
//! [`Traversable`]: trait.Traversable.html " "
//! [`Traverser`]: struct.Traverser.html " "
//! [`Tree`]: ../tree/struct.Tree.html " "
//! [`TraversalOrder`]: enum.TraversalOrder.html " "
//! [`Direction`]: enum.Direction.html " "

mod traverser;
pub use traverser::{Traverser, SiblingContext};

use core::fmt::Debug;
use std::collections::VecDeque;
use crate::util::Stack;

/// The order in which a whole tree or subtree is visited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Every node before its children, children in order.
    PreOrder,
    /// Has no universal meaning for trees of arbitrary arity. Visits nodes like [`LevelOrder`] does.
    ///
    /// [`LevelOrder`]: #variant.LevelOrder " "
    InOrder,
    /// Every node after its children, children in order.
    PostOrder,
    /// Breadth-first: the root, then all nodes of depth 1 in order, then all nodes of depth 2, and so on.
    LevelOrder,
}
impl Default for TraversalOrder {
    #[inline(always)]
    fn default() -> Self {
        Self::LevelOrder
    }
}

/// The direction in which a [`Traverser`] moves from its focused node.
///
/// [`Traverser`]: struct.Traverser.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move to the parent of the focused node.
    Parent,
    /// Move to the first child of the focused node.
    Child,
    /// Move to the sibling of the focused node which comes before it in order.
    PrevSibling,
    /// Move to the sibling of the focused node which comes after it in order.
    NextSibling,
}

/// Data structures which can be walked node by node using cursors.
///
/// Cursors which do not point to a node of the traversable are never a logic error: the methods report them as having no value, no parent and no children.
pub trait Traversable: Sized {
    /// The payload of a node.
    type Value;
    /// The type for the cursor which will be used for keeping track of the traversed nodes.
    type Cursor: Copy + Debug + Eq;

    /// Returns the cursor pointing to the root node, or `None` if the traversable is empty.
    fn cursor_to_root(&self) -> Option<Self::Cursor>;
    /// Returns a reference to the payload of the node at the specified cursor.
    fn value_of(&self, cursor: Self::Cursor) -> Option<&Self::Value>;
    /// Returns a cursor to the parent of the node at the specified cursor, or `None` if that node is the root node.
    fn parent_of(&self, cursor: Self::Cursor) -> Option<Self::Cursor>;
    /// Returns the cursors to the children of the node at the specified cursor, in order.
    fn children_of(&self, cursor: Self::Cursor) -> &[Self::Cursor];

    /// Returns the number of children of the node at the specified cursor.
    #[inline]
    fn num_children_of(&self, cursor: Self::Cursor) -> usize {
        self.children_of(cursor).len()
    }
    /// Returns a cursor to the *`n`*th child of the node at the specified cursor, or `None` if the child at that index does not exist.
    #[inline]
    fn nth_child_of(&self, cursor: Self::Cursor, child_num: usize) -> Option<Self::Cursor> {
        self.children_of(cursor).get(child_num).copied()
    }

    /// Collects the cursors of the subtree starting at `start`, in the specified order.
    fn collect_from(&self, start: Self::Cursor, order: TraversalOrder) -> Vec<Self::Cursor> {
        let mut visited = Vec::new();
        if self.value_of(start).is_none() {
            return visited;
        }
        match order {
            TraversalOrder::PreOrder => {
                let mut stack: Stack<Self::Cursor> = Stack::new();
                stack.push(start);
                while let Some(cursor) = stack.pop() {
                    visited.push(cursor);
                    stack.extend(self.children_of(cursor).iter().rev().copied());
                }
            }
            TraversalOrder::PostOrder => {
                // Parents before right-to-left children, then reversed.
                let mut stack: Stack<Self::Cursor> = Stack::new();
                stack.push(start);
                while let Some(cursor) = stack.pop() {
                    visited.push(cursor);
                    stack.extend(self.children_of(cursor).iter().copied());
                }
                visited.reverse();
            }
            TraversalOrder::InOrder | TraversalOrder::LevelOrder => {
                let mut queue = VecDeque::new();
                queue.push_back(start);
                while let Some(cursor) = queue.pop_front() {
                    visited.push(cursor);
                    queue.extend(self.children_of(cursor).iter().copied());
                }
            }
        }
        visited
    }
    /// Finds the first node of the subtree starting at `start`, in pre-order, whose payload satisfies the predicate.
    fn find_from(
        &self,
        start: Self::Cursor,
        mut predicate: impl FnMut(&Self::Value) -> bool,
    ) -> Option<Self::Cursor> {
        self.value_of(start)?;
        let mut stack: Stack<Self::Cursor> = Stack::new();
        stack.push(start);
        while let Some(cursor) = stack.pop() {
            if self.value_of(cursor).map_or(false, &mut predicate) {
                return Some(cursor);
            }
            stack.extend(self.children_of(cursor).iter().rev().copied());
        }
        None
    }
}
impl<'a, T: Traversable> Traversable for &'a T {
    type Value = T::Value;
    type Cursor = T::Cursor;

    #[inline(always)]
    fn cursor_to_root(&self) -> Option<Self::Cursor> {
        T::cursor_to_root(*self)
    }
    #[inline(always)]
    fn value_of(&self, cursor: Self::Cursor) -> Option<&Self::Value> {
        T::value_of(*self, cursor)
    }
    #[inline(always)]
    fn parent_of(&self, cursor: Self::Cursor) -> Option<Self::Cursor> {
        T::parent_of(*self, cursor)
    }
    #[inline(always)]
    fn children_of(&self, cursor: Self::Cursor) -> &[Self::Cursor] {
        T::children_of(*self, cursor)
    }
    #[inline(always)]
    fn num_children_of(&self, cursor: Self::Cursor) -> usize {
        T::num_children_of(*self, cursor)
    }
    #[inline(always)]
    fn nth_child_of(&self, cursor: Self::Cursor, child_num: usize) -> Option<Self::Cursor> {
        T::nth_child_of(*self, cursor, child_num)
    }
}

#[cfg(test)]
mod tests;
