use core::sync::atomic::{AtomicU64, Ordering};
use smallvec::SmallVec;

const INLINE_STACK_SIZE: usize = 8;

/// Inline-first stack used for sibling buffers and traversal worklists.
pub(crate) type Stack<T> = SmallVec<[T; INLINE_STACK_SIZE]>;

/// Identity of one tree instance, used by detached handles to reject being used with another tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);
impl TreeId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
