use block::{Attributes, Block};
use handle_arena::{Arena, Key};

use crate::cursor::BlockCursor;

mod delete;
mod insert;
mod navigate;

/// An ordered run of blocks kept close to a target size.
///
/// A page does not own its blocks' storage. It only keeps `order`, its own
/// left-to-right sequence of [`handle_arena::Key`]s into a block
/// [`Arena`] that its owning `page-buffer` holds and shares across every
/// page. That sharing is what lets [`crate::Page::split_block`]'s sibling
/// in `page-buffer`, `split_page`, relocate a block from one page to
/// another by moving its key between two `order` vectors without ever
/// touching the arena slot a live [`BlockCursor`] already pointed at.
///
/// A page is never truly empty: deleting its last block leaves one empty
/// sentinel block behind (I1), so [`Page::first`] and [`Page::last`]
/// always have something to return.
#[derive(Debug)]
pub struct Page<A: Attributes> {
    order: Vec<Key>,
    target_size: usize,
    cached_size: usize,
    file_offset: Option<u64>,
}

impl<A: Attributes> Page<A> {
    /// Creates an empty page (one empty sentinel block, inserted into
    /// `blocks`) targeting `target_size` bytes.
    pub fn new(target_size: usize, blocks: &mut Arena<Block<A>>) -> Self {
        Self::from_blocks(target_size, Vec::new(), blocks)
    }

    /// Creates a page pre-populated with `items`, each inserted into
    /// `blocks`, targeting `target_size` bytes. An empty `items` vector
    /// still yields a page holding one empty sentinel block.
    pub fn from_blocks(target_size: usize, items: Vec<Block<A>>, blocks: &mut Arena<Block<A>>) -> Self {
        let mut order = Vec::with_capacity(items.len().max(1));
        let mut cached_size = 0;

        if items.is_empty() {
            order.push(blocks.insert(Block::empty()));
        } else {
            for item in items {
                cached_size += item.size();
                order.push(blocks.insert(item));
            }
        }

        Self {
            order,
            target_size,
            cached_size,
            file_offset: None,
        }
    }

    /// Builds a page directly from existing arena keys, without touching
    /// the arena. Used by `page-buffer` when relocating blocks between
    /// pages on a split: the blocks already live in the shared arena, only
    /// their page's `order` membership changes.
    pub fn from_existing_keys(target_size: usize, order: Vec<Key>, blocks: &Arena<Block<A>>) -> Self {
        let cached_size = order
            .iter()
            .map(|key| blocks.handle(*key).expect("relocated key is live").borrow().size())
            .sum();
        Self {
            order,
            target_size,
            cached_size,
            file_offset: None,
        }
    }

    /// Splits this page's ordering at `index`, removing and returning
    /// every key from `index` onward. Leaves at least one key behind in
    /// `self`.
    pub fn split_off_keys(&mut self, index: usize, blocks: &Arena<Block<A>>) -> Vec<Key> {
        debug_assert!(index > 0 && index < self.order.len());
        let moved = self.order.split_off(index);
        let moved_size: usize = moved
            .iter()
            .map(|key| blocks.handle(*key).expect("split key is live").borrow().size())
            .sum();
        self.cached_size -= moved_size;
        moved
    }

    /// Merges the block at `index + 1` into the block at `index`, which
    /// must carry the same attribute, and removes the absorbed key from
    /// both this page's ordering and `blocks`. Used by housekeeping
    /// compaction; never called from `insert_bytes`/`delete_bytes`.
    pub fn merge_next(&mut self, index: usize, blocks: &mut Arena<Block<A>>) {
        debug_assert!(index + 1 < self.order.len());
        let next_key = self.order[index + 1];
        let absorbed = blocks.handle(next_key).expect("merged key is live").borrow().clone();
        let current = blocks.handle(self.order[index]).expect("order keys are always live");
        let pos = current.borrow().size();
        current.borrow_mut().insert_bytes(pos, absorbed.bytes());
        drop(current);
        blocks.remove(next_key);
        self.order.remove(index + 1);
    }

    /// The page's target size in bytes, used by its owning
    /// `page-buffer` to decide when to split this page.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Overrides the page's target size.
    pub fn set_target_size(&mut self, target_size: usize) {
        self.target_size = target_size;
    }

    /// Total size in bytes of every block this page holds.
    pub fn size(&self) -> usize {
        self.cached_size
    }

    /// True if the page holds no bytes (the lone block is the empty
    /// sentinel).
    pub fn is_empty(&self) -> bool {
        self.cached_size == 0
    }

    /// Number of blocks this page currently holds (always at least one).
    pub fn block_count(&self) -> usize {
        self.order.len()
    }

    /// This page's blocks, in order, as arena keys.
    pub fn order(&self) -> &[Key] {
        &self.order
    }

    /// The byte offset this page's content started at in the file it was
    /// loaded from, if it was loaded rather than created fresh.
    pub fn file_offset(&self) -> Option<u64> {
        self.file_offset
    }

    /// Records the file offset this page's content was loaded from.
    pub fn set_file_offset(&mut self, offset: Option<u64>) {
        self.file_offset = offset;
    }

    /// True if `at`'s block is still reachable through this page's
    /// ordering.
    pub fn is_valid(&self, at: &BlockCursor<A>) -> bool {
        self.order.contains(&at.key())
    }

    fn is_sentinel_empty(&self, blocks: &Arena<Block<A>>) -> bool {
        self.order.len() == 1 && blocks.handle(self.order[0]).is_some_and(|h| h.borrow().is_empty())
    }

    fn index_of(&self, key: Key) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    fn offset_of(&self, cursor: &BlockCursor<A>, blocks: &Arena<Block<A>>) -> Option<usize> {
        let idx = self.index_of(cursor.key())?;
        let before: usize = self.order[..idx]
            .iter()
            .map(|key| blocks.handle(*key).expect("order keys are always live").borrow().size())
            .sum();
        Some(before + cursor.pos)
    }
}
