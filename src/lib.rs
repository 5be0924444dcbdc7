// bytecarve
//   Lazy byte-range extraction over seekable streams
//
//   A format parser scans a container and notes where the interesting bytes
//   live; this crate turns those (position, size) notes into bytes on demand,
//   reading as many times as the source needs to fill the range.
//
//   Key types
//     ByteSource   cursor-style readable stream, reads may come up short
//     SharedSource one stream shared by many buffers, access serialized
//     RangeBuffer  lazy handle over one range, O(1) until bytes() is called
//     RangeTable   parallel offset/size bookkeeping, one range per frame

mod carve;
pub mod source;

pub use carve::{CarveError, CarveResult, FetchMode, Range, RangeBuffer, RangeTable, SharedSource};
pub use source::ByteSource;

#[cfg(feature = "async")]
pub use carve::{AsyncRangeBuffer, AsyncSharedSource};
#[cfg(feature = "async")]
pub use source::AsyncByteSource;
