use std::cell::Ref;

use block::{Attributes, Block};
use handle_arena::{Handle, Key};

/// A persistent position into one block of a [`crate::Page`].
///
/// A `BlockCursor` survives insertion, deletion, splitting, and replacement
/// of blocks elsewhere in the page: it keeps reading the block it was
/// minted against even after that block is unlinked from the page's
/// ordering (H2), until the caller re-derives a cursor from a still-live
/// one. Use [`crate::Page::is_valid`] to ask whether a cursor's block is
/// still reachable through the page's own ordering.
#[derive(Debug, Clone)]
pub struct BlockCursor<A: Attributes> {
    pub(crate) handle: Handle<Block<A>>,
    pub(crate) pos: usize,
}

impl<A: Attributes> BlockCursor<A> {
    pub(crate) fn new(handle: Handle<Block<A>>, pos: usize) -> Self {
        Self { handle, pos }
    }

    /// The byte offset within the cursor's block.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The arena key of the cursor's block.
    pub fn key(&self) -> Key {
        self.handle.key()
    }

    /// Borrows the block this cursor points at.
    pub fn block(&self) -> Ref<'_, Block<A>> {
        self.handle.borrow()
    }
}
