//! A small demonstration of the `textbuf` core: load a file (or a built-in
//! sample) into a buffer, run a scripted sequence of edits against it, and
//! print the result. Not a text editor — just enough to exercise the core
//! outside of its own test suite.

use std::env;
use std::num::NonZeroUsize;

use textbuf::{BufferConfig, ByteArray, PageBuffer};
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Debug, Default, PartialEq)]
struct PlainText;

fn main() {
    init_logging();

    let content = match env::args().nth(1) {
        Some(path) => std::fs::read(&path).unwrap_or_else(|e| {
            tracing::error!(path, %e, "failed to read input file, falling back to the sample");
            SAMPLE.to_vec()
        }),
        None => SAMPLE.to_vec(),
    };

    let config = BufferConfig::new(NonZeroUsize::new(16).expect("16 is nonzero"));
    let mut buffer: PageBuffer<PlainText> = config.build();

    let at = buffer.first();
    buffer
        .insert_bytes(&at, &ByteArray::from(content), PlainText)
        .expect("inserting into a fresh buffer never fails");

    tracing::info!(pages = buffer.page_count(), bytes = buffer.size(), "loaded buffer");
    print_buffer(&buffer);

    let first = buffer.first();
    let (_, ten) = buffer.next(&first, 10.min(buffer.size()));
    buffer
        .insert_bytes(&ten, &ByteArray::from(" [edited]"), PlainText)
        .expect("insert into a live cursor never fails");

    tracing::info!("inserted a marker after the first 10 bytes");
    print_buffer(&buffer);
}

fn print_buffer(buffer: &PageBuffer<PlainText>) {
    let text = buffer.bytes(&buffer.first(), buffer.size());
    println!("{}", String::from_utf8_lossy(text.as_slice()));
}

const SAMPLE: &[u8] = b"Hello from the sample buffer! It can grow far past one page.";

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish()
        .try_init()
        .ok();
}
