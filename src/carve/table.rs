use super::{CarveError, CarveResult, FetchMode, Range, RangeBuffer, SharedSource};
use std::fmt::Display;

/// Parallel offset/size bookkeeping for a set of ranges, typically one per
/// frame of a tiled or framed container. Cheap to build and to index; no
/// range is read until one of the handed-out buffers is.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RangeTable {
    offsets: Vec<u64>,
    sizes: Vec<usize>,
}

impl RangeTable {
    pub fn new(offsets: Vec<u64>, sizes: Vec<usize>) -> CarveResult<Self> {
        if offsets.len() != sizes.len() {
            return Err(CarveError::TableShapeMismatch((offsets.len(), sizes.len())));
        }
        Ok(Self { offsets, sizes })
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn total_size(&self) -> usize {
        self.sizes.iter().sum()
    }

    pub fn range(&self, index: usize) -> CarveResult<Range> {
        // Validate index
        if index >= self.len() {
            let max_valid_index = self.len().saturating_sub(1);
            return Err(CarveError::RangeIndexOutOfRange((index, max_valid_index)));
        }
        Ok(Range::new(self.offsets[index], self.sizes[index]))
    }

    pub fn byte_range(&self, index: usize) -> CarveResult<(u64, u64)> {
        let range = self.range(index)?;
        Ok((range.position, range.end()))
    }

    /// Hand out a lazy buffer over one entry. O(1): an Arc clone plus the
    /// range copy, no I/O.
    pub fn buffer(&self, index: usize, source: &SharedSource) -> CarveResult<RangeBuffer> {
        let range = self.range(index)?;
        Ok(RangeBuffer::new(source.clone(), range.position, range.size))
    }

    pub fn buffer_with_mode(
        &self,
        index: usize,
        source: &SharedSource,
        mode: FetchMode,
    ) -> CarveResult<RangeBuffer> {
        Ok(self.buffer(index, source)?.with_mode(mode))
    }

    /// One lazy buffer per entry, all sharing the same source.
    pub fn buffers(&self, source: &SharedSource) -> Vec<RangeBuffer> {
        self.iter()
            .map(|range| RangeBuffer::new(source.clone(), range.position, range.size))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Range> + '_ {
        self.offsets
            .iter()
            .zip(self.sizes.iter())
            .map(|(offset, size)| Range::new(*offset, *size))
    }
}

impl Display for RangeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RangeTable({} ranges, {} bytes)",
            self.len(),
            self.total_size()
        )
    }
}
