use bytecarve::{RangeTable, SharedSource};
use std::io::Cursor;
use std::time::Instant;

const FRAME_COUNT: usize = 1000;
const FRAME_SIZE: usize = 4096;

fn main() {
    println!("Example: bytecarve frames");

    // Synthetic container: FRAME_COUNT frames laid out back to back
    let blob: Vec<u8> = (0..FRAME_COUNT * FRAME_SIZE)
        .map(|i| (i % 251) as u8)
        .collect();
    let source = SharedSource::new(Cursor::new(blob));

    // Indexing: describe every frame without reading any of them
    let t_index = Instant::now();
    let offsets = (0..FRAME_COUNT).map(|i| (i * FRAME_SIZE) as u64).collect();
    let sizes = vec![FRAME_SIZE; FRAME_COUNT];
    let table = RangeTable::new(offsets, sizes).unwrap();
    let buffers = table.buffers(&source);
    println!(
        "Described {} in {}us",
        table,
        t_index.elapsed().as_micros()
    );

    // Fetch a single frame on demand
    let t_fetch = Instant::now();
    let frame = buffers[42].bytes().unwrap();
    println!(
        "Fetched frame 42 ({} bytes) in {}us",
        frame.len(),
        t_fetch.elapsed().as_micros()
    );
    println!("First bytes: {:?}", &frame[..8]);
}
