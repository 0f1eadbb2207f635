use block::{Attributes, Block};
use change_set::ChangeSet;
use page::{BlockCursor, Page};

use crate::errors::{PageBufferError, PageBufferResult};

use super::PageBuffer;

impl<A: Attributes> PageBuffer<A> {
    /// Appends a new page holding `items` to the end of the buffer. If the
    /// buffer currently holds only its initial empty page, `items`
    /// replaces that page's content instead of leaving a stray empty page
    /// in front of it.
    pub fn append_page(&mut self, items: Vec<Block<A>>) {
        if self.order.len() == 1 {
            let key = self.order[0];
            let empty = self.pages.handle(key).expect("order keys are always live").borrow().is_empty();
            if empty {
                self.remove_page(0);
            }
        }
        let page = Page::from_blocks(self.target_page_size, items, &mut self.blocks);
        let key = self.pages.insert(page);
        self.order.push(key);
    }

    /// Inserts a new page holding `items` immediately after the page
    /// `at` currently points into.
    pub fn insert_page(&mut self, at: &BlockCursor<A>, items: Vec<Block<A>>) -> PageBufferResult<()> {
        let (page_index, _) = self.locate(at).ok_or(PageBufferError::InvalidHandleUse)?;
        let page = Page::from_blocks(self.target_page_size, items, &mut self.blocks);
        let key = self.pages.insert(page);
        self.order.insert(page_index + 1, key);
        Ok(())
    }

    /// Removes the whole page `at` points into, returning the change-set
    /// of everything it held. The buffer's last remaining page is cleared
    /// to empty instead of being removed outright (B1).
    pub fn delete_page(&mut self, at: &BlockCursor<A>) -> PageBufferResult<ChangeSet<A>> {
        let (page_index, page_key) = self.locate(at).ok_or(PageBufferError::InvalidHandleUse)?;

        if self.order.len() == 1 {
            let page = self.pages.handle(page_key).expect("located page is live");
            let first = page.borrow().first(&self.blocks);
            let last = page.borrow().last(&self.blocks);
            let (cs, _) = page.borrow_mut().delete_bytes(&first, &last, &mut self.blocks)?;
            return Ok(cs);
        }

        let page = self.pages.handle(page_key).expect("located page is live");
        let removed_blocks: Vec<Block<A>> = page
            .borrow()
            .order()
            .iter()
            .map(|key| self.blocks.handle(*key).expect("block key is live").borrow().clone())
            .collect();
        drop(page);
        self.remove_page(page_index);

        Ok(ChangeSet::for_delete(0, removed_blocks))
    }

    /// Keeps the page at `page_index` (and whatever tail pages peel off
    /// it) within `target_page_size`. A block boundary at the target is
    /// used when one lines up; otherwise the block straddling the target
    /// is carved in two with [`Page::split_block`] so the first page lands
    /// on exactly `target_page_size` bytes. Repeats on the tail page as
    /// long as it is still oversized, so one overlong insert can produce
    /// more than one new page.
    pub(crate) fn split_page(&mut self, page_index: usize) {
        let target = self.target_page_size;
        let mut index = page_index;

        loop {
            let page_key = self.order[index];
            let page_size = self.pages.handle(page_key).expect("order keys are always live").borrow().size();
            if page_size <= target {
                break;
            }

            let (mut split_at, need_carve) = {
                let page = self.pages.handle(page_key).expect("order keys are always live");
                let page = page.borrow();
                let mut acc = 0;
                let mut split_at = page.block_count();
                let mut need_carve = false;
                for (i, key) in page.order().iter().enumerate() {
                    if acc == target {
                        split_at = i;
                        break;
                    }
                    let block_size = self.blocks.handle(*key).expect("block key is live").borrow().size();
                    if acc + block_size > target {
                        split_at = i;
                        need_carve = true;
                        break;
                    }
                    acc += block_size;
                }
                (split_at, need_carve)
            };

            if need_carve {
                let page = self.pages.handle(page_key).expect("order keys are always live");
                let first = page.borrow().first(&self.blocks);
                let (_, at) = page.borrow().next(&first, target, &self.blocks);
                page.borrow_mut().split_block(&at, &mut self.blocks);
                split_at += 1;
            }

            let block_count = self.pages.handle(page_key).expect("order keys are always live").borrow().block_count();
            if split_at == 0 || split_at >= block_count {
                break;
            }

            let moved_keys = {
                let page = self.pages.handle(page_key).expect("order keys are always live");
                page.borrow_mut().split_off_keys(split_at, &self.blocks)
            };

            tracing::debug!(page_index = index, moved = moved_keys.len(), "splitting page");

            let new_page = Page::from_existing_keys(target, moved_keys, &self.blocks);
            let new_key = self.pages.insert(new_page);
            self.order.insert(index + 1, new_key);

            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use byte_array::ByteArray;

    use super::*;
    use crate::PageBuffer;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    #[test]
    fn append_page_replaces_a_stray_initial_empty_page() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![Block::new(ByteArray::from("AAA"), Style(1))]);
        assert_eq!(buffer.page_count(), 1);
        assert_eq!(buffer.size(), 3);
    }

    #[test]
    fn append_page_adds_a_new_page_when_content_already_exists() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![Block::new(ByteArray::from("AAA"), Style(1))]);
        buffer.append_page(vec![Block::new(ByteArray::from("BBB"), Style(1))]);
        assert_eq!(buffer.page_count(), 2);
        assert_eq!(buffer.bytes(&buffer.first(), 100).as_slice(), b"AAABBB");
    }

    #[test]
    fn delete_page_on_the_sole_page_clears_it_instead_of_removing_it() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![Block::new(ByteArray::from("AAA"), Style(1))]);
        let at = buffer.first();
        let cs = buffer.delete_page(&at).unwrap();
        assert_eq!(cs.removed_bytes().as_slice(), b"AAA");
        assert_eq!(buffer.page_count(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn delete_page_removes_a_non_sole_page_outright() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![Block::new(ByteArray::from("AAA"), Style(1))]);
        buffer.append_page(vec![Block::new(ByteArray::from("BBB"), Style(1))]);
        let at = buffer.first();
        let cs = buffer.delete_page(&at).unwrap();
        assert_eq!(cs.removed_bytes().as_slice(), b"AAA");
        assert_eq!(buffer.page_count(), 1);
        assert_eq!(buffer.bytes(&buffer.first(), 100).as_slice(), b"BBB");
    }

    #[test]
    fn split_page_keeps_total_content_intact() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(4);
        let at = buffer.first();
        buffer.insert_bytes(&at, &ByteArray::from("AAAAAAAAAAAAAAAAAAAA"), Style(1)).unwrap();
        assert!(buffer.page_count() > 1);
        assert_eq!(buffer.bytes(&buffer.first(), 100).size(), 20);
    }
}
