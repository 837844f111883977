// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The nine named colours offered on the command line, numbered 1
//! through 9 in menu order.

use std::fmt;
use std::str::FromStr;

use crate::buffer::Color;

/// A colour with a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamedColor {
    /// `#FFFFFF`
    White,
    /// `#000000`
    Black,
    /// `#FF0000`
    Red,
    /// `#FFA500`
    Orange,
    /// `#FFFF00`
    Yellow,
    /// `#00FF00`
    Green,
    /// `#0000FF`
    Blue,
    /// `#4B0082`
    Indigo,
    /// `#8F00FF`
    Violet,
}

/// Menu order.
pub const PALETTE: [NamedColor; 9] = [
    NamedColor::White,
    NamedColor::Black,
    NamedColor::Red,
    NamedColor::Orange,
    NamedColor::Yellow,
    NamedColor::Green,
    NamedColor::Blue,
    NamedColor::Indigo,
    NamedColor::Violet,
];

impl NamedColor {
    /// The packed colour.
    pub fn color(self) -> Color {
        Color::new(match self {
            NamedColor::White => 0xFFFFFF,
            NamedColor::Black => 0x000000,
            NamedColor::Red => 0xFF0000,
            NamedColor::Orange => 0xFFA500,
            NamedColor::Yellow => 0xFFFF00,
            NamedColor::Green => 0x00FF00,
            NamedColor::Blue => 0x0000FF,
            NamedColor::Indigo => 0x4B0082,
            NamedColor::Violet => 0x8F00FF,
        })
    }

    /// The display name.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::White => "White",
            NamedColor::Black => "Black",
            NamedColor::Red => "Red",
            NamedColor::Orange => "Orange",
            NamedColor::Yellow => "Yellow",
            NamedColor::Green => "Green",
            NamedColor::Blue => "Blue",
            NamedColor::Indigo => "Indigo",
            NamedColor::Violet => "Violet",
        }
    }

    /// Look a colour up by its 1-based menu number.
    pub fn from_index(index: usize) -> Option<NamedColor> {
        if index == 0 {
            return None;
        }
        PALETTE.get(index - 1).cloned()
    }

    /// The palette entry with exactly this colour, if any.
    pub fn find(color: Color) -> Option<NamedColor> {
        PALETTE.iter().cloned().find(|named| named.color() == color)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a menu number or a name, ignoring case.
impl FromStr for NamedColor {
    type Err = String;

    fn from_str(s: &str) -> Result<NamedColor, String> {
        if let Ok(index) = usize::from_str(s) {
            return NamedColor::from_index(index)
                .ok_or_else(|| format!("colour number {} is not between 1 and 9", index));
        }
        PALETTE
            .iter()
            .cloned()
            .find(|named| named.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("'{}' is not a palette colour", s))
    }
}

/// Parse a palette number, a palette name, or a hex colour.
pub fn parse_color(s: &str) -> Result<Color, String> {
    match NamedColor::from_str(s) {
        Ok(named) => Ok(named.color()),
        Err(err) => {
            if usize::from_str(s).is_ok() {
                return Err(err);
            }
            Color::from_str(s)
                .map_err(|_| format!("'{}' is neither a palette colour nor a hex colour", s))
        }
    }
}

/// A colour's palette name if it has one, otherwise its hex code.
pub fn describe(color: Color) -> String {
    match NamedColor::find(color) {
        Some(named) => named.name().to_string(),
        None => color.to_string(),
    }
}
