// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between choosing a viewport and
//! writing the finished image.  Nothing in here aborts the process;
//! that decision belongs to whoever called us.

use std::io;

use crate::chunks::Chunk;

/// The one error type for the crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// Zero workers, or more workers than there are columns to hand out.
    #[fail(
        display = "cannot split {} columns between {} workers",
        width, workers
    )]
    InvalidWorkerCount {
        /// The worker count we were asked for.
        workers: usize,
        /// The number of columns in the image.
        width: usize,
    },

    /// The viewport's corners are out of order or not finite.
    #[fail(display = "invalid viewport: {}", _0)]
    InvalidViewport(String),

    /// The image is empty, or too large for the 16-bit fields of the
    /// TGA header.
    #[fail(display = "invalid image dimensions {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// An iteration bound of zero can't classify anything.
    #[fail(display = "the iteration limit must be at least 1")]
    InvalidIterationLimit,

    /// The partition was computed for a different image width.
    #[fail(
        display = "partition covers {} columns but the image has {}",
        partition, image
    )]
    PartitionMismatch {
        /// Width the partition covers.
        partition: usize,
        /// Width of the image buffer.
        image: usize,
    },

    /// A worker tried to write a cell that belongs to someone else.
    #[fail(display = "pixel ({}, {}) is outside this worker's band", column, row)]
    OutOfBand {
        /// Column of the offending write.
        column: usize,
        /// Row of the offending write.
        row: usize,
    },

    /// A chunk's worker returned an error or panicked.
    #[fail(display = "rendering columns {} failed: {}", chunk, cause)]
    RenderFailed {
        /// The chunk whose worker failed.
        chunk: Chunk,
        /// What the worker reported.
        cause: String,
    },

    /// The encoder was handed a buffer that still has holes in it.
    #[fail(display = "pixel ({}, {}) was never rendered", column, row)]
    Unrendered {
        /// Column of the first empty cell.
        column: usize,
        /// Row of the first empty cell.
        row: usize,
    },

    /// Writing the image failed.
    #[fail(display = "could not write image: {}", cause)]
    EncodeFailed {
        /// The underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The bytes handed to the decoder aren't an uncompressed 24-bit TGA.
    #[fail(display = "malformed image: {}", _0)]
    MalformedImage(String),

    /// Appending to the run report failed.
    #[fail(display = "could not write run report: {}", cause)]
    ReportFailed {
        /// The underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
