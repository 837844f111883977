// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the columns of an image between workers.  Every worker gets
//! `width / workers` columns; when that doesn't divide evenly the last
//! worker picks up the leftovers, so no column is ever skipped.

use std::fmt;
use std::ops::Range;
use std::slice;

use crate::errors::{Error, Result};

/// A half-open range of columns, `[start, end)`, owned by one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// First column in the chunk.
    pub start: usize,
    /// One past the last column in the chunk.
    pub end: usize,
}

impl Chunk {
    /// Number of columns in the chunk.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Chunks produced by `partition` are never empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if `column` belongs to this chunk.
    pub fn contains(&self, column: usize) -> bool {
        column >= self.start && column < self.end
    }

    /// The columns themselves.
    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An ordered list of chunks that exactly covers `[0, width)`.  The
/// only way to get one is `partition`, so anything holding a Partition
/// can rely on the chunks being disjoint, ascending and complete.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    width: usize,
    chunks: Vec<Chunk>,
}

impl Partition {
    /// The number of columns covered.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of chunks, which is also the number of workers.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// A partition always has at least one chunk.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The chunks, in column order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Iterates the chunks in column order.
    pub fn iter(&self) -> slice::Iter<Chunk> {
        self.chunks.iter()
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Chunk;
    type IntoIter = slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Divide `width` columns between `workers` workers.  Fails if there
/// are no workers, or more workers than columns to give them.
pub fn partition(width: usize, workers: usize) -> Result<Partition> {
    if workers == 0 || workers > width {
        return Err(Error::InvalidWorkerCount { workers, width });
    }

    let size = width / workers;
    let chunks = (0..workers)
        .map(|i| Chunk {
            start: i * size,
            end: if i + 1 == workers { width } else { (i + 1) * size },
        })
        .collect();

    Ok(Partition { width, chunks })
}
