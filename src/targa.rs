// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Uncompressed 24-bit truecolor TGA.
//!
//! The file is an 18-byte header followed by the pixels, row-major,
//! top row first, three bytes per pixel in blue-green-red order.  No
//! run-length encoding, no colour map, no image ID, no footer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::buffer::{Color, ImageBuffer};
use crate::errors::{Error, Result};

/// Size of the fixed header.
pub const HEADER_LEN: usize = 18;

/// Image type 2: uncompressed truecolor.
pub const UNCOMPRESSED_TRUECOLOR: u8 = 2;

/// Three bytes per pixel.
pub const BITS_PER_PIXEL: u8 = 24;

/// The TGA header, one field per member, in file order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargaHeader {
    /// Length of the image ID field that follows the header.
    pub id_length: u8,
    /// 0: no colour map.
    pub color_map_type: u8,
    /// 2: uncompressed truecolor.
    pub image_type: u8,
    /// First entry index, entry count and entry size; unused here.
    pub color_map_spec: [u8; 5],
    /// Horizontal origin of the image.
    pub x_origin: u16,
    /// Vertical origin of the image.
    pub y_origin: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Bits per pixel.
    pub bits_per_pixel: u8,
    /// Alpha depth and origin flags.
    pub descriptor: u8,
}

impl TargaHeader {
    /// The header for an uncompressed 24-bit image of this size.
    pub fn truecolor(width: u16, height: u16) -> TargaHeader {
        TargaHeader {
            id_length: 0,
            color_map_type: 0,
            image_type: UNCOMPRESSED_TRUECOLOR,
            color_map_spec: [0; 5],
            x_origin: 0,
            y_origin: 0,
            width,
            height,
            bits_per_pixel: BITS_PER_PIXEL,
            descriptor: 0,
        }
    }

    /// Serialize in file order; the 16-bit fields are little-endian.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = self.id_length;
        bytes[1] = self.color_map_type;
        bytes[2] = self.image_type;
        bytes[3..8].copy_from_slice(&self.color_map_spec);
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.bits_per_pixel;
        bytes[17] = self.descriptor;
        bytes
    }

    /// Read a header back out of the first 18 bytes.
    pub fn parse(bytes: &[u8]) -> Result<TargaHeader> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::MalformedImage(format!(
                "{} bytes is too short for a header",
                bytes.len()
            )));
        }
        let word = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let mut color_map_spec = [0u8; 5];
        color_map_spec.copy_from_slice(&bytes[3..8]);
        Ok(TargaHeader {
            id_length: bytes[0],
            color_map_type: bytes[1],
            image_type: bytes[2],
            color_map_spec,
            x_origin: word(8),
            y_origin: word(10),
            width: word(12),
            height: word(14),
            bits_per_pixel: bytes[16],
            descriptor: bytes[17],
        })
    }

    /// Bytes of pixel data that follow this header.
    pub fn pixel_bytes(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * 3
    }
}

fn encode_failed(cause: std::io::Error) -> Error {
    Error::EncodeFailed { cause }
}

/// Write the image to `out`.  A buffer with unrendered cells is
/// refused before anything is written.
#[tracing::instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn encode<W: Write>(image: &ImageBuffer, mut out: W) -> Result<()> {
    if let Some((column, row)) = image.first_unrendered() {
        return Err(Error::Unrendered { column, row });
    }

    // ImageBuffer::new already capped both sides at u16::MAX.
    let header = TargaHeader::truecolor(image.width() as u16, image.height() as u16);
    out.write_all(&header.to_bytes()).map_err(encode_failed)?;

    let mut line = Vec::with_capacity(image.width() * 3);
    for row in 0..image.height() {
        line.clear();
        for color in image.row(row)? {
            line.extend_from_slice(&color.bgr());
        }
        out.write_all(&line).map_err(encode_failed)?;
    }
    out.flush().map_err(encode_failed)
}

/// Encode into memory.
pub fn encode_to_vec(image: &ImageBuffer) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + image.width() * image.height() * 3);
    encode(image, &mut bytes)?;
    Ok(bytes)
}

/// Create (or truncate) `path` and encode the image into it.
pub fn write_image<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> Result<()> {
    if let Some((column, row)) = image.first_unrendered() {
        return Err(Error::Unrendered { column, row });
    }
    let file = File::create(path.as_ref()).map_err(encode_failed)?;
    encode(image, BufWriter::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), "image written");
    Ok(())
}

/// Read back what `encode` wrote: the header and the pixels, row-major.
/// Only the uncompressed 24-bit layout is understood.
pub fn decode(bytes: &[u8]) -> Result<(TargaHeader, Vec<Color>)> {
    let header = TargaHeader::parse(bytes)?;
    if header.image_type != UNCOMPRESSED_TRUECOLOR {
        return Err(Error::MalformedImage(format!(
            "image type {} is not uncompressed truecolor",
            header.image_type
        )));
    }
    if header.bits_per_pixel != BITS_PER_PIXEL {
        return Err(Error::MalformedImage(format!(
            "{} bits per pixel is not 24",
            header.bits_per_pixel
        )));
    }
    if header.color_map_type != 0 {
        return Err(Error::MalformedImage("colour maps are not supported".to_string()));
    }

    let start = HEADER_LEN + usize::from(header.id_length);
    let end = start + header.pixel_bytes();
    if bytes.len() < end {
        return Err(Error::MalformedImage(format!(
            "expected {} bytes of pixels, found {}",
            header.pixel_bytes(),
            bytes.len().saturating_sub(start)
        )));
    }

    let pixels = bytes[start..end]
        .chunks(3)
        .map(|bgr| Color::from_rgb(bgr[2], bgr[1], bgr[0]))
        .collect();
    Ok((header, pixels))
}
