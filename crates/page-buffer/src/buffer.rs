use block::{Attributes, Block};
use handle_arena::{Arena, Key};
use page::{BlockCursor, Page};

mod compact;
mod delete;
mod insert;
mod navigate;
mod split;

/// A whole document: an ordered run of pages sharing one block arena.
#[derive(Debug)]
pub struct PageBuffer<A: Attributes> {
    order: Vec<Key>,
    pages: Arena<Page<A>>,
    blocks: Arena<Block<A>>,
    target_page_size: usize,
}

impl<A: Attributes> PageBuffer<A> {
    /// Creates an empty buffer (one empty page) targeting `target_page_size`
    /// bytes per page.
    pub fn new(target_page_size: usize) -> Self {
        let mut blocks = Arena::new();
        let mut pages = Arena::new();
        let page = Page::new(target_page_size, &mut blocks);
        let key = pages.insert(page);
        Self {
            order: vec![key],
            pages,
            blocks,
            target_page_size,
        }
    }

    /// The buffer's target size per page, in bytes.
    pub fn target_page_size(&self) -> usize {
        self.target_page_size
    }

    /// Total size in bytes across every page.
    pub fn size(&self) -> usize {
        self.order
            .iter()
            .map(|key| self.pages.handle(*key).expect("order keys are always live").borrow().size())
            .sum()
    }

    /// True if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of pages currently in the buffer (always at least one, B1).
    pub fn page_count(&self) -> usize {
        self.order.len()
    }

    /// True if `at` still resolves to a block some page in this buffer
    /// owns.
    pub fn is_valid(&self, at: &BlockCursor<A>) -> bool {
        self.locate(at).is_some()
    }

    /// Finds which page currently lists `at`'s block in its ordering,
    /// returning that page's position in `order` and its arena key.
    ///
    /// This is computed fresh on every call rather than cached on the
    /// cursor, which is what lets a cursor survive its block moving from
    /// one page to another on a split: there is no stale "owning page"
    /// reference anywhere to go stale.
    pub(crate) fn locate(&self, at: &BlockCursor<A>) -> Option<(usize, Key)> {
        self.order.iter().enumerate().find_map(|(idx, key)| {
            let page = self.pages.handle(*key)?;
            page.borrow().is_valid(at).then_some((idx, *key))
        })
    }
}
