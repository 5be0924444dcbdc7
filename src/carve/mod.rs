// Lazy range carving
//   A Range says where the bytes live, a RangeBuffer turns that into bytes
//   on demand. Construction never touches the stream, so a parser can hand
//   out one buffer per frame before any frame is read.
//
//   The fetch holds the source lock for its whole duration: reposition and
//   the following reads are one critical section, so buffers sharing a
//   source never interleave mid-range.

use crate::source::ByteSource;
use std::fmt;
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use tracing::{trace, warn};

mod error;
mod table;

pub use error::{CarveError, CarveResult};
pub use table::RangeTable;

/// A contiguous byte span within a larger stream.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Range {
    pub position: u64,
    pub size: usize,
}

impl Range {
    pub fn new(position: u64, size: usize) -> Self {
        Self { position, size }
    }

    /// One past the last byte of the span.
    pub fn end(&self) -> u64 {
        self.position + self.size as u64
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Range({}..{})", self.position, self.end())
    }
}

/// How a fetch drives the source's read primitive.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum FetchMode {
    /// Loop until the range is filled or the source reports exhaustion.
    /// Correct for any source, including ones that chunk their reads.
    #[default]
    FillToLength,
    /// Issue exactly one read call. Only correct for sources that guarantee
    /// to fill the buffer whenever data remains; against a chunking source
    /// the under-fill surfaces as IncompleteRange rather than bad data.
    SingleRead,
}

/// One stream shared by many consumers, access serialized by a lock.
#[derive(Clone)]
pub struct SharedSource(Arc<Mutex<dyn ByteSource>>);

impl SharedSource {
    pub fn new<S: ByteSource + 'static>(source: S) -> Self {
        Self(Arc::new(Mutex::new(source)))
    }

    pub fn from_arc<S: ByteSource + 'static>(source: Arc<Mutex<S>>) -> Self {
        Self(source)
    }

    /// Whether an access could be attempted right now. A poisoned lock
    /// counts as unreadable.
    pub fn is_readable(&self) -> bool {
        self.0.lock().map(|s| s.is_readable()).unwrap_or(false)
    }
}

impl fmt::Debug for SharedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSource")
    }
}

/// A lazy handle over one byte range of a shared stream.
///
/// Holding a buffer costs one Arc clone and two integers. The bytes are
/// materialized by bytes(), every call of which repositions the source and
/// re-reads, so a fetch is idempotent over an unmodified source and nothing
/// is cached in between.
#[derive(Clone, Debug)]
pub struct RangeBuffer {
    source: SharedSource,
    range: Range,
    mode: FetchMode,
}

impl RangeBuffer {
    /// Describe a range. No I/O happens here, nor is the source inspected;
    /// a buffer over a dead stream constructs fine and fails at bytes().
    pub fn new(source: SharedSource, position: u64, size: usize) -> Self {
        Self {
            source,
            range: Range::new(position, size),
            mode: FetchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn position(&self) -> u64 {
        self.range.position
    }

    pub fn size(&self) -> usize {
        self.range.size
    }

    /// Materialize the range.
    ///
    /// Returns exactly size bytes or an error, never a short or padded vec:
    /// a source that runs out before the range is filled yields
    /// IncompleteRange carrying the count actually obtained. The source
    /// cursor is left where the last read ended.
    pub fn bytes(&self) -> CarveResult<Vec<u8>> {
        let mut source = self.source.0.lock()?;
        if !source.is_readable() {
            return Err(CarveError::SourceUnavailable);
        }

        let Range { position, size } = self.range;
        let mut data = vec![0; size];
        if size == 0 {
            return Ok(data);
        }

        trace!("carving {size} bytes at offset {position}");
        source.set_position(position)?;
        let obtained = match self.mode {
            FetchMode::FillToLength => source.read_fully(&mut data)?,
            FetchMode::SingleRead => source.read(&mut data)?,
        };

        if obtained < size {
            warn!("source exhausted at {obtained} of {size} bytes");
            return Err(CarveError::IncompleteRange((size, obtained)));
        }
        Ok(data)
    }
}

impl Display for RangeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeBuffer({}, {:?})", self.range, self.mode)
    }
}

#[cfg(feature = "async")]
pub use not_sync::*;
#[cfg(feature = "async")]
mod not_sync {
    use super::*;
    use crate::source::AsyncByteSource;
    use tokio::sync::Mutex as AsyncMutex;

    /// Async twin of SharedSource.
    #[derive(Clone)]
    pub struct AsyncSharedSource(Arc<AsyncMutex<dyn AsyncByteSource>>);

    impl AsyncSharedSource {
        pub fn new<S: AsyncByteSource + 'static>(source: S) -> Self {
            Self(Arc::new(AsyncMutex::new(source)))
        }

        pub fn from_arc<S: AsyncByteSource + 'static>(source: Arc<AsyncMutex<S>>) -> Self {
            Self(source)
        }
    }

    impl fmt::Debug for AsyncSharedSource {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "AsyncSharedSource")
        }
    }

    /// Async twin of RangeBuffer, same contract per call.
    #[derive(Clone, Debug)]
    pub struct AsyncRangeBuffer {
        source: AsyncSharedSource,
        range: Range,
        mode: FetchMode,
    }

    impl AsyncRangeBuffer {
        pub fn new(source: AsyncSharedSource, position: u64, size: usize) -> Self {
            Self {
                source,
                range: Range::new(position, size),
                mode: FetchMode::default(),
            }
        }

        pub fn with_mode(mut self, mode: FetchMode) -> Self {
            self.mode = mode;
            self
        }

        pub fn range(&self) -> Range {
            self.range
        }

        pub fn position(&self) -> u64 {
            self.range.position
        }

        pub fn size(&self) -> usize {
            self.range.size
        }

        pub async fn bytes_async(&self) -> CarveResult<Vec<u8>> {
            let mut source = self.source.0.lock().await;
            if !source.is_readable() {
                return Err(CarveError::SourceUnavailable);
            }

            let Range { position, size } = self.range;
            let mut data = vec![0; size];
            if size == 0 {
                return Ok(data);
            }

            trace!("carving {size} bytes at offset {position}");
            source.set_position_async(position).await?;
            let obtained = match self.mode {
                FetchMode::FillToLength => source.read_fully_async(&mut data).await?,
                FetchMode::SingleRead => source.read_async(&mut data).await?,
            };

            if obtained < size {
                warn!("source exhausted at {obtained} of {size} bytes");
                return Err(CarveError::IncompleteRange((size, obtained)));
            }
            Ok(data)
        }
    }
}
