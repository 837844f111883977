#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit of zero under `z -> z*z + c` stays bounded.
//! This crate samples a rectangle of the plane at every pixel of an
//! image, colours each pixel one of two colours depending on whether
//! its point escaped, and writes the result as an uncompressed 24-bit
//! TGA file.
//!
//! The work is split by columns: `chunks::partition` hands each worker
//! a contiguous run of columns, `ImageBuffer::bands_mut` turns those
//! into disjoint mutable slices, and `Renderer::render` runs one
//! scoped thread per slice and joins them all before giving the image
//! back.
//!
//! ```no_run
//! use mandelbrot::{partition, targa, ColorPair, ImageBuffer, NamedColor, Renderer, Viewport};
//!
//! let colors = ColorPair::new(NamedColor::Black.color(), NamedColor::White.color());
//! let renderer = Renderer::new(Viewport::default(), colors, 1024)?;
//! let parts = partition(1280, 8)?;
//! let result = renderer.render(ImageBuffer::new(1280, 960)?, &parts)?;
//! targa::write_image("mandelbrot.tga", &result.image)?;
//! # Ok::<(), mandelbrot::Error>(())
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
extern crate num;

pub mod buffer;
pub mod chunks;
pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod render;
pub mod report;
pub mod targa;

pub use buffer::{Color, ColorPair, ImageBuffer};
pub use chunks::{partition, Chunk, Partition};
pub use errors::{Error, Result};
pub use palette::NamedColor;
pub use planes::{PlaneMapper, Viewport};
pub use render::{RenderResult, Renderer};
pub use report::RunReport;

/// Default image width, in pixels.
pub const DEFAULT_WIDTH: usize = 1280;

/// Default image height, in pixels.
pub const DEFAULT_HEIGHT: usize = 960;

/// Default number of iterations before a point is assumed to be in
/// the set.
pub const DEFAULT_LIMIT: usize = 1024;
