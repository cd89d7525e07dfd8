//! Implements an ordered multi-way tree collection and a bidirectional, mutation-capable traverser over it.
//!
//! # Overview
//! Kindling stores the nodes of a [`Tree`] in an arena and links them with [`NodeId`]s instead of pointers. Children are owned by the arena and kept in insertion order; parent links are plain ids, so a node can be reached from its parent, its children and its siblings without any reference cycles. The arena is [generational][generational-arena]: once a node is removed, every `NodeId` that pointed to it is reported as absent rather than silently aliasing a newer node.
//!
//! On top of the tree sit three kinds of *detached* handles, which only store ids and a copy of the tree's modification counter and receive the tree as an argument on every call:
//! - [`Traverser`], a cursor which moves to the parent, first child, previous sibling or next sibling of its focused node in O(1) amortized steps, and can replace, add, insert, remove and trim at the cursor
//! - [`Walker`], a pre-materialized iterator over the tree in a [`TraversalOrder`] which can remove the node it last returned
//! - [`SubTree`], a live view of the part of a tree rooted at a chosen node
//!
//! Every mutation bumps the tree's modification counter exactly once. Handles compare their copy of the counter with the tree's before doing anything and fail with [`TreeError::ConcurrentModification`] when some other path changed the tree in the meantime.
//!
//! Borrowing iteration is available too, through [`Tree::iter`] and [`NodeRef`]; the borrow checker makes fail-fast checks unnecessary there.
//!
//! # Structural equality and hashing
//! Nodes and trees compare structurally and hash through a [`HashFolder`], an incremental polynomial hash accumulator. Nodes use the multiplier 31 and trees use 43, so that a tree node and a tree with the same shape do not fold to the same value.
//!
//! # Example
//! ```rust
//! use kindling::{Tree, Direction};
//!
//! let mut tree = Tree::with_root('R');
//! let root = tree.root_id().unwrap();
//! let a = tree.add_child(root, 'A').unwrap();
//! tree.add_child(root, 'B').unwrap();
//! tree.add_child(a, 'C').unwrap();
//!
//! let mut traverser = tree.traverser();
//! assert_eq!(traverser.next(&tree, Direction::Child).unwrap(), a);
//! traverser.next(&tree, Direction::Child).unwrap();
//! assert_eq!(traverser.data(&tree).unwrap(), &'C');
//! traverser.next(&tree, Direction::Parent).unwrap();
//! assert!(traverser.has_next(&tree, Direction::NextSibling).unwrap());
//! traverser.next(&tree, Direction::NextSibling).unwrap();
//! assert_eq!(traverser.data(&tree).unwrap(), &'B');
//! ```
//!
//! [generational-arena]: https://docs.rs/generational-arena " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_hasher,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unicode_not_nfc,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
    clippy::verbose_file_reads,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]

pub mod hash_folder;
pub use hash_folder::{HashFolder, HashFolderError};

pub mod tree;
pub use tree::{Tree, SubTree, NodeId, NodeRef, NodeRefMut, Detached, Iter, Walker};

pub mod traversal;
pub use traversal::{Traversable, TraversalOrder, Direction, Traverser};

/// A prelude for using Kindling, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::tree::{
        Tree,
        SubTree as TreeView,
        NodeId as TreeNodeId,
        NodeRef as TreeNodeRef,
        NodeRefMut as TreeNodeRefMut,
        Detached as DetachedTreeNode,
    };
    #[doc(no_inline)]
    pub use crate::traversal::{
        Traverser as TreeTraverser,
        TraversalOrder as TreeTraversalOrder,
        Direction as TreeTraversalDirection,
        Traversable,
    };
    #[doc(no_inline)]
    pub use crate::{TreeError, ErrorKind as TreeErrorKind, HashFolder};
}

pub(crate) mod util;

use thiserror::Error;

/// The broad category of an error produced by the crate.
///
/// Every error type in the crate maps onto one of these through its `kind` method, so that callers who only care about the category don't have to match on every variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument was unsuitable for the operation: a non-positive initial hash value, a non-prime multiplier, an illegal parent or a handle belonging to another tree.
    InvalidArgument,
    /// The operation is not available for this capability variant, e.g. a mutation on a read-only tree.
    Unsupported,
    /// The operation needs a focused or current element and there is none.
    IllegalState,
    /// A node, parent or requested neighbour does not exist.
    NotFound,
    /// The tree was structurally modified behind the back of the handle performing the operation.
    ConcurrentModification,
}

/// The error type returned by tree, subtree, walker and traverser operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum TreeError {
    /// Some aspect of an argument prevents the operation, as explained by the contained message.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The tree is read-only and cannot be mutated.
    #[error("the operation is not supported by a read-only tree")]
    Unsupported,
    /// The operation requires a current node and there is none, as explained by the contained message.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
    /// The specified node is not present in the tree.
    #[error("the node is not present in the tree")]
    NotFound,
    /// There is no node in the requested direction, or the iteration is exhausted.
    #[error("no such element")]
    NoSuchElement,
    /// The tree was modified without going through the handle which detected it.
    #[error("the tree was modified concurrently with this handle")]
    ConcurrentModification,
    /// The handle was created by a different tree than the one it was used with.
    #[error("the handle belongs to a different tree")]
    ForeignTree,
}
impl TreeError {
    /// Returns the category of the error.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(..) | Self::ForeignTree => ErrorKind::InvalidArgument,
            Self::Unsupported => ErrorKind::Unsupported,
            Self::IllegalState(..) => ErrorKind::IllegalState,
            Self::NotFound | Self::NoSuchElement => ErrorKind::NotFound,
            Self::ConcurrentModification => ErrorKind::ConcurrentModification,
        }
    }
}

/// A result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
