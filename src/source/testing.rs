// Test sources
//   ChunkedSource hands out at most max_chunk bytes per read call, the way a
//   buffered or framed stream does, and counts every read so tests can prove
//   when I/O happened. close() flips is_readable for dead-stream cases.

use super::ByteSource;
use std::io::{Error, ErrorKind, Result};

pub(crate) struct ChunkedSource {
    data: Vec<u8>,
    position: u64,
    max_chunk: usize,
    reads: usize,
    closed: bool,
}

impl ChunkedSource {
    pub fn new(data: Vec<u8>, max_chunk: usize) -> Self {
        Self {
            data,
            position: 0,
            max_chunk,
            reads: 0,
            closed: false,
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ByteSource for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.closed {
            return Err(Error::new(ErrorKind::Other, "source closed"));
        }
        self.reads += 1;
        let start = (self.position as usize).min(self.data.len());
        let n = self.max_chunk.min(buf.len()).min(self.data.len() - start);
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

    fn is_readable(&self) -> bool {
        !self.closed
    }
}

#[cfg(feature = "async")]
pub(crate) use not_sync::*;
#[cfg(feature = "async")]
mod not_sync {
    use std::io::{Error, ErrorKind, Result, SeekFrom};
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncSeek, ReadBuf};

    pub(crate) struct ChunkedAsyncSource {
        data: Vec<u8>,
        position: u64,
        max_chunk: usize,
    }

    impl ChunkedAsyncSource {
        pub fn new(data: Vec<u8>, max_chunk: usize) -> Self {
            Self {
                data,
                position: 0,
                max_chunk,
            }
        }
    }

    impl AsyncRead for ChunkedAsyncSource {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<Result<()>> {
            let this = self.get_mut();
            let start = (this.position as usize).min(this.data.len());
            let n = this
                .max_chunk
                .min(buf.remaining())
                .min(this.data.len() - start);
            buf.put_slice(&this.data[start..start + n]);
            this.position += n as u64;
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncSeek for ChunkedAsyncSource {
        fn start_seek(self: Pin<&mut Self>, position: SeekFrom) -> Result<()> {
            let this = self.get_mut();
            match position {
                SeekFrom::Start(pos) => {
                    this.position = pos;
                    Ok(())
                }
                SeekFrom::Current(offset) => {
                    this.position = this
                        .position
                        .checked_add_signed(offset)
                        .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "seek overflow"))?;
                    Ok(())
                }
                SeekFrom::End(_) => Err(Error::new(
                    ErrorKind::Unsupported,
                    "seek from end not supported",
                )),
            }
        }

        fn poll_complete(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<u64>> {
            Poll::Ready(Ok(self.position))
        }
    }
}
