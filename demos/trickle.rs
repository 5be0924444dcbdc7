use bytecarve::{ByteSource, FetchMode, RangeBuffer, SharedSource};
use std::io::Result;

const STREAM_LEN: usize = 100;
const DRIP: usize = 50;

// A source that refuses to hand out more than DRIP bytes per read call,
// the way a network or block-buffered stream does.
struct TrickleSource {
    data: Vec<u8>,
    position: u64,
}

impl ByteSource for TrickleSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let start = (self.position as usize).min(self.data.len());
        let n = DRIP.min(buf.len()).min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    fn position(&mut self) -> Result<u64> {
        Ok(self.position)
    }

    fn set_position(&mut self, pos: u64) -> Result<u64> {
        self.position = pos;
        Ok(pos)
    }
}

fn main() {
    tracing_subscriber::fmt().init();
    println!("Example: bytecarve trickle");

    let data: Vec<u8> = (1..=STREAM_LEN as u8).collect();
    let source = SharedSource::new(TrickleSource {
        data,
        position: 0,
    });

    // The accumulating fetch keeps asking until the range is full
    let buffer = RangeBuffer::new(source.clone(), 0, STREAM_LEN);
    let bytes = buffer.bytes().unwrap();
    println!(
        "FillToLength got {} bytes, byte 50 is {}",
        bytes.len(),
        bytes[50]
    );

    // One read call cannot fill the range; the under-fill is an error,
    // not a zero-padded tail
    let single = RangeBuffer::new(source, 0, STREAM_LEN).with_mode(FetchMode::SingleRead);
    match single.bytes() {
        Ok(_) => println!("SingleRead unexpectedly succeeded"),
        Err(e) => println!("SingleRead failed as it should: {e}"),
    }
}
