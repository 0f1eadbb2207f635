//! A cursor minted before a page split must keep reading the same bytes
//! whether its block stayed on the original page or was relocated onto
//! the new one — the property `split_page` exists to prove.

use byte_array::ByteArray;

use crate::PageBuffer;

#[derive(Clone, Debug, Default, PartialEq)]
struct Style(u8);

#[test]
fn a_cursor_into_a_relocated_block_keeps_reading_after_a_split() {
    let mut buffer: PageBuffer<Style> = PageBuffer::new(8);
    let at = buffer.first();
    buffer.insert_bytes(&at, &ByteArray::from("AAAA"), Style(1)).unwrap();

    let tail = buffer.last();
    buffer.insert_bytes(&tail, &ByteArray::from("BBBB"), Style(2)).unwrap();
    assert_eq!(buffer.page_count(), 1, "two 4-byte blocks still fit in one 8-byte page");

    // This insert's own attribute-mismatch block lands exactly on the page's
    // overflow boundary and gets relocated onto a freshly split-off page.
    let tail = buffer.last();
    let (_, mid) = buffer.insert_bytes(&tail, &ByteArray::from("CCCCDDDD"), Style(3)).unwrap();
    assert!(buffer.page_count() > 1, "16 bytes across three blocks overflows one 8-byte page");
    assert!(buffer.is_valid(&mid));
    let expected = mid.block().bytes().clone();

    // A further overflow elsewhere in the buffer must not disturb `mid`'s
    // block, wherever it now lives.
    let more_tail = buffer.last();
    buffer.insert_bytes(&more_tail, &ByteArray::from("EEEEFFFFGGGGHHHH"), Style(4)).unwrap();
    assert!(buffer.page_count() > 2, "another overflow produces yet another page");

    assert!(buffer.is_valid(&mid));
    assert_eq!(mid.block().bytes().as_slice(), expected.as_slice());
}

#[test]
fn full_content_is_preserved_byte_for_byte_across_many_splits() {
    let mut buffer: PageBuffer<Style> = PageBuffer::new(4);
    let at = buffer.first();
    let text = "0123456789".repeat(5);
    buffer.insert_bytes(&at, &ByteArray::from(text.as_str()), Style(1)).unwrap();

    assert!(buffer.page_count() > 5);
    assert_eq!(buffer.bytes(&buffer.first(), text.len()).as_slice(), text.as_bytes());
}
