//! The replayable record of one edit.
//!
//! A [`ChangeSet`] is self-contained: replaying it is enough to reproduce
//! the inverse of the edit it describes. Deletes carry every block that was
//! removed, in the order they appeared in the document; inserts carry only
//! the offset and size of the range that was inserted (the bytes themselves
//! are still owned by the buffer, not duplicated into the change-set).

#![forbid(unsafe_code)]

use block::{Attributes, Block};
use byte_array::ByteArray;

/// What kind of edit a [`ChangeSet`] records.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeKind<A: Attributes> {
    /// Bytes were inserted; the change-set only needs to remember where and
    /// how many, since the inserted bytes already live in the buffer.
    Insert,
    /// Bytes were deleted; `blocks` holds every removed block, forward
    /// order, each carrying the attributes it had at the time of removal.
    Delete {
        /// Removed blocks in original left-to-right order.
        blocks: Vec<Block<A>>,
    },
}

/// A single recorded edit against a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet<A: Attributes> {
    kind: ChangeKind<A>,
    offset: usize,
    size: usize,
}

impl<A: Attributes> ChangeSet<A> {
    /// Records an insert of `size` bytes starting at `offset`.
    pub fn for_insert(offset: usize, size: usize) -> Self {
        Self {
            kind: ChangeKind::Insert,
            offset,
            size,
        }
    }

    /// Records a delete of `blocks`, which started at `offset` in the
    /// document. `size` is redundant with the sum of block sizes but is
    /// kept alongside so callers never need to recompute it.
    pub fn for_delete(offset: usize, blocks: Vec<Block<A>>) -> Self {
        let size = blocks.iter().map(Block::size).sum();
        Self {
            kind: ChangeKind::Delete { blocks },
            offset,
            size,
        }
    }

    /// An empty delete change-set at `offset` — used when a delete request
    /// had nothing left to remove (e.g. a request past the end of the
    /// buffer).
    pub fn empty_delete(offset: usize) -> Self {
        Self::for_delete(offset, Vec::new())
    }

    /// The absolute offset at which this edit begins.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The size in bytes of the edit.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The kind of edit this change-set records.
    pub fn kind(&self) -> &ChangeKind<A> {
        &self.kind
    }

    /// The blocks removed by a delete, in forward order. Empty for inserts.
    pub fn removed_blocks(&self) -> &[Block<A>] {
        match &self.kind {
            ChangeKind::Delete { blocks } => blocks,
            ChangeKind::Insert => &[],
        }
    }

    /// Concatenates the bytes of every removed block, in forward order.
    /// This is the "faithfulness" property (P7): it must equal the bytes
    /// that existed at the deletion point immediately before the delete.
    pub fn removed_bytes(&self) -> ByteArray {
        let mut out = ByteArray::new();
        for block in self.removed_blocks() {
            out.append(block.bytes());
        }
        out
    }

    /// Appends another change-set's removed blocks to this one's, as
    /// happens when a cross-page delete concatenates each page's partial
    /// `ChangeSet` in order. Both change-sets must be deletes.
    pub fn extend_delete(&mut self, other: ChangeSet<A>) {
        let ChangeKind::Delete { blocks: other_blocks } = other.kind else {
            panic!("extend_delete called with a non-delete change-set");
        };
        let ChangeKind::Delete { blocks } = &mut self.kind else {
            panic!("extend_delete called on a non-delete change-set");
        };
        self.size += other.size;
        blocks.extend(other_blocks);
    }
}
