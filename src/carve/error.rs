use std::fmt;
use std::io;
use std::sync::PoisonError;

pub type CarveResult<T> = Result<T, CarveError>;

#[derive(Debug)]
pub enum CarveError {
    /// The source reported not-readable before any byte was requested.
    SourceUnavailable,
    /// The source ran out before the range was filled. (expected, obtained)
    IncompleteRange((usize, usize)),
    /// (index, max valid index)
    RangeIndexOutOfRange((usize, usize)),
    /// Offset and size vectors differ in length. (offsets, sizes)
    TableShapeMismatch((usize, usize)),
    ReadError(io::Error),
    MutexError(String),
}

impl fmt::Display for CarveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for CarveError {}

impl From<io::Error> for CarveError {
    fn from(e: io::Error) -> Self {
        CarveError::ReadError(e)
    }
}

impl<G> From<PoisonError<G>> for CarveError {
    fn from(e: PoisonError<G>) -> Self {
        CarveError::MutexError(format!("{e:?}"))
    }
}
