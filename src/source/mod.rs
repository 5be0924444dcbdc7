// Source traits
//   Includes ByteSource and AsyncByteSource cursor-style I/O
//   These are thin supersets of Read + Seek and AsyncRead + AsyncSeek
//   Key addition is is_readable, so a consumer can refuse an access up front
//   instead of discovering a dead stream halfway through a range
//   Required methods
//     fn read(&mut self, buf: &mut [u8]) -> Result<usize> { ... }
//     fn position(&mut self) -> Result<u64> { ... }
//     fn set_position(&mut self, pos: u64) -> Result<u64> { ... }
//   Provided methods
//     fn is_readable(&self) -> bool { ... }
//     fn read_fully(&mut self, buf: &mut [u8]) -> Result<usize> { ... }
//   Async has similar

use std::fs::File;
use std::io::Result;
use std::io::{BufReader, Cursor};
use std::io::{Read, Seek, SeekFrom};

mod fs;

pub use fs::PathSource;

pub trait ByteSource {
    /// Read up to `buf.len()` bytes at the current cursor, advancing it.
    ///
    /// Returning fewer bytes than requested is legitimate whenever the
    /// source buffers internally (disk blocks, network frames); 0 means
    /// exhausted at the current cursor.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Absolute cursor position in bytes.
    fn position(&mut self) -> Result<u64>;

    /// Move the cursor to an absolute position. Positions past the end are
    /// allowed; the next read reports 0.
    fn set_position(&mut self, pos: u64) -> Result<u64>;

    /// Whether an access can be attempted at all. False once the backing
    /// stream is closed or gone.
    fn is_readable(&self) -> bool {
        true
    }

    /// Keep reading until `buf` is full or the source is exhausted.
    ///
    /// Returns how many bytes were actually placed in `buf`, which is less
    /// than `buf.len()` only when the source genuinely ran out. Whether an
    /// under-fill is an error is the caller's call, not this trait's.
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Read::read(self, buf)
    }

    fn position(&mut self) -> Result<u64> {
        Ok(Cursor::position(self))
    }

    fn set_position(&mut self, pos: u64) -> Result<u64> {
        Cursor::set_position(self, pos);
        Ok(pos)
    }
}

impl ByteSource for File {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Read::read(self, buf)
    }

    fn position(&mut self) -> Result<u64> {
        self.stream_position()
    }

    fn set_position(&mut self, pos: u64) -> Result<u64> {
        self.seek(SeekFrom::Start(pos))
    }
}

impl<R: Read + Seek> ByteSource for BufReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Read::read(self, buf)
    }

    fn position(&mut self) -> Result<u64> {
        self.stream_position()
    }

    fn set_position(&mut self, pos: u64) -> Result<u64> {
        self.seek(SeekFrom::Start(pos))
    }
}

#[cfg(feature = "async")]
pub use not_sync::*;
#[cfg(feature = "async")]
mod not_sync {
    use super::*;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

    pub trait AsyncByteSource: Send {
        /// Asynchronously read up to `buf.len()` bytes at the cursor.
        ///
        /// Same contract as ByteSource::read: short returns are legitimate,
        /// 0 means exhausted at the current cursor.
        fn read_async<'a>(&'a mut self, buf: &'a mut [u8]) -> BoxFuture<'a, Result<usize>>;

        fn position_async(&mut self) -> BoxFuture<'_, Result<u64>>;

        fn set_position_async(&mut self, pos: u64) -> BoxFuture<'_, Result<u64>>;

        fn is_readable(&self) -> bool {
            true
        }

        fn read_fully_async<'a>(&'a mut self, buf: &'a mut [u8]) -> BoxFuture<'a, Result<usize>> {
            async move {
                let mut filled = 0;
                while filled < buf.len() {
                    let n = self.read_async(&mut buf[filled..]).await?;
                    if n == 0 {
                        break;
                    }
                    filled += n;
                }
                Ok(filled)
            }
            .boxed()
        }
    }

    impl<R: AsyncRead + AsyncSeek + Send + Unpin> AsyncByteSource for R {
        fn read_async<'a>(&'a mut self, buf: &'a mut [u8]) -> BoxFuture<'a, Result<usize>> {
            async move { AsyncReadExt::read(self, buf).await }.boxed()
        }

        fn position_async(&mut self) -> BoxFuture<'_, Result<u64>> {
            async move { self.stream_position().await }.boxed()
        }

        fn set_position_async(&mut self, pos: u64) -> BoxFuture<'_, Result<u64>> {
            async move { self.seek(SeekFrom::Start(pos)).await }.boxed()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests {
    use super::testing::ChunkedSource;
    use super::*;

    #[test]
    fn cursor_source_tracks_its_cursor() {
        let mut source = Cursor::new(vec![10u8, 11, 12, 13, 14]);
        ByteSource::set_position(&mut source, 2).unwrap();
        let mut buf = [0u8; 2];
        assert_eq!(ByteSource::read(&mut source, &mut buf).unwrap(), 2);
        assert_eq!(buf, [12, 13]);
        assert_eq!(ByteSource::position(&mut source).unwrap(), 4);
    }

    #[test]
    fn read_fully_accumulates_across_short_reads() {
        let data: Vec<u8> = (1..=40).collect();
        let mut source = ChunkedSource::new(data.clone(), 7);
        let mut buf = vec![0u8; 40];
        assert_eq!(source.read_fully(&mut buf).unwrap(), 40);
        assert_eq!(buf, data);
        assert_eq!(source.reads(), 6); // ceil(40 / 7)
    }

    #[test]
    fn read_fully_reports_exhaustion_count() {
        let mut source = ChunkedSource::new(vec![1u8, 2, 3], 2);
        let mut buf = vec![0u8; 10];
        assert_eq!(source.read_fully(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }
}
