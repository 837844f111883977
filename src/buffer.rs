// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel store.  Cells are kept column-major: column `x` is the
//! contiguous run `cells[x * height .. (x + 1) * height]`.  That way a
//! chunk of columns is a single slice, and handing every worker its
//! own slice with `split_at_mut` lets the borrow checker prove that no
//! two workers ever touch the same cell.

use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::chunks::{Chunk, Partition};
use crate::errors::{Error, Result};

/// A packed 24-bit `0xRRGGBB` colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Anything above the low 24 bits is dropped.
    pub const fn new(packed: u32) -> Color {
        Color(packed & 0x00ff_ffff)
    }

    /// Build a colour from its channels.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color((u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue))
    }

    /// The packed value.
    pub fn packed(self) -> u32 {
        self.0
    }

    /// Red channel.
    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The three bytes in the order TGA stores them.
    pub fn bgr(self) -> [u8; 3] {
        [self.blue(), self.green(), self.red()]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Accepts `#RRGGBB`, `0xRRGGBB`, or plain `RRGGBB`.
impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Color, String> {
        let digits = s
            .trim_start_matches('#')
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        if digits.is_empty() || digits.len() > 6 {
            return Err(format!("'{}' is not a 24-bit hex colour", s));
        }
        u32::from_str_radix(digits, 16)
            .map(Color::new)
            .map_err(|_| format!("'{}' is not a 24-bit hex colour", s))
    }
}

/// The colour for points in the set and the colour for points that
/// escaped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorPair {
    /// Points that never escaped.
    pub inside: Color,
    /// Points that did.
    pub outside: Color,
}

impl ColorPair {
    /// Pair up the two colours.
    pub fn new(inside: Color, outside: Color) -> ColorPair {
        ColorPair { inside, outside }
    }

    /// Pick the colour for a classification.
    #[inline]
    pub fn pick(&self, in_set: bool) -> Color {
        if in_set {
            self.inside
        } else {
            self.outside
        }
    }
}

/// The largest side the 16-bit TGA header fields can describe.
pub const MAX_SIDE: usize = 0xffff;

/// A `width x height` grid of colours.  A cell is `None` until a
/// render pass writes it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
}

impl ImageBuffer {
    /// Allocate an empty image.  Both sides must be between 1 and
    /// `MAX_SIDE`.
    pub fn new(width: usize, height: usize) -> Result<ImageBuffer> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(ImageBuffer {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at `column`, `row`; `None` if it is unrendered or out of
    /// bounds.
    pub fn get(&self, column: usize, row: usize) -> Option<Color> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells[column * self.height + row]
    }

    /// Paint every cell the same colour.
    pub fn fill(&mut self, color: Color) {
        for cell in self.cells.iter_mut() {
            *cell = Some(color);
        }
    }

    /// Forget every cell, ready for the next render pass.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }

    /// The first unrendered cell, scanning in row-major order.
    pub fn first_unrendered(&self) -> Option<(usize, usize)> {
        for row in 0..self.height {
            for column in 0..self.width {
                if self.cells[column * self.height + row].is_none() {
                    return Some((column, row));
                }
            }
        }
        None
    }

    /// True once every cell has been written.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Walks one row left to right.  Fails on the first hole.
    pub fn row(&self, row: usize) -> Result<Vec<Color>> {
        (0..self.width)
            .map(|column| {
                self.cells[column * self.height + row].ok_or(Error::Unrendered { column, row })
            })
            .collect()
    }

    /// Carve the buffer into one mutable band per chunk.  The bands come
    /// back in the partition's order.
    pub fn bands_mut(&mut self, partition: &Partition) -> Result<Vec<ColumnBand>> {
        if partition.width() != self.width {
            return Err(Error::PartitionMismatch {
                partition: partition.width(),
                image: self.width,
            });
        }

        let height = self.height;
        let mut rest: &mut [Option<Color>] = &mut self.cells;
        let mut bands = Vec::with_capacity(partition.len());
        for chunk in partition {
            let (cells, tail) = mem::replace(&mut rest, &mut []).split_at_mut(chunk.len() * height);
            bands.push(ColumnBand {
                chunk: *chunk,
                height,
                cells,
            });
            rest = tail;
        }
        Ok(bands)
    }
}

/// A worker's exclusive view of its chunk of columns.
#[derive(Debug)]
pub struct ColumnBand<'a> {
    chunk: Chunk,
    height: usize,
    cells: &'a mut [Option<Color>],
}

impl<'a> ColumnBand<'a> {
    /// The columns this band may write.
    pub fn chunk(&self) -> Chunk {
        self.chunk
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Write one cell.  `column` is in image coordinates.
    pub fn set(&mut self, column: usize, row: usize, color: Color) -> Result<()> {
        if !self.chunk.contains(column) || row >= self.height {
            return Err(Error::OutOfBand { column, row });
        }
        self.cells[(column - self.chunk.start) * self.height + row] = Some(color);
        Ok(())
    }
}
