use super::ByteSource;
use std::fs::File;
use std::io::{Read, Result, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// File-backed source that opens lazily.
///
/// Holding a PathSource costs nothing until the first read, so a parser can
/// point thousands of ranges at a file that is only opened when one of them
/// is actually fetched. While the path does not resolve to a file,
/// is_readable reports false and no open is attempted.
#[derive(Debug)]
pub struct PathSource {
    path: PathBuf,
    file: Option<File>,
}

impl PathSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&mut self) -> Result<&mut File> {
        if self.file.is_none() {
            self.file = Some(File::open(&self.path)?);
        }
        Ok(self.file.as_mut().unwrap())
    }
}

impl ByteSource for PathSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Read::read(self.open()?, buf)
    }

    fn position(&mut self) -> Result<u64> {
        self.open()?.stream_position()
    }

    fn set_position(&mut self, pos: u64) -> Result<u64> {
        self.open()?.seek(SeekFrom::Start(pos))
    }

    fn is_readable(&self) -> bool {
        self.file.is_some() || self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarveError, RangeBuffer, SharedSource};

    #[test]
    fn reads_a_range_out_of_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.bin");
        std::fs::write(&path, (0u8..=99).collect::<Vec<u8>>()).unwrap();

        let source = SharedSource::new(PathSource::new(&path));
        let buffer = RangeBuffer::new(source, 40, 20);
        let bytes = buffer.bytes().unwrap();
        assert_eq!(bytes, (40u8..60).collect::<Vec<u8>>());
    }

    #[test]
    fn missing_file_is_unreadable_not_a_construction_failure() {
        let source = SharedSource::new(PathSource::new("/no/such/file.bin"));
        let buffer = RangeBuffer::new(source, 0, 16);
        assert_eq!(buffer.size(), 16);
        match buffer.bytes() {
            Err(CarveError::SourceUnavailable) => {}
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }
}
