// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper left, and a rectangle on the complex plane described by
//! a Viewport.
use num::Complex;

use crate::errors::{Error, Result};

/// The rectangle of the complex plane we sample.  The real axis runs
/// left to right, the imaginary axis runs bottom to top, so the
/// image's first row is `top` and its first column is `left`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real part of the image's left edge.
    pub left: f64,
    /// Real part of the image's right edge.
    pub right: f64,
    /// Imaginary part of the image's top edge.
    pub top: f64,
    /// Imaginary part of the image's bottom edge.
    pub bottom: f64,
}

impl Viewport {
    /// Checks that the corners are finite and in order.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Result<Viewport> {
        if !(left.is_finite() && right.is_finite() && top.is_finite() && bottom.is_finite()) {
            return Err(Error::InvalidViewport(
                "every bound must be a finite number".to_string(),
            ));
        }

        if left >= right {
            return Err(Error::InvalidViewport(
                "the left edge is not to the left of the right edge".to_string(),
            ));
        }

        if bottom >= top {
            return Err(Error::InvalidViewport(
                "the bottom edge is not below the top edge".to_string(),
            ));
        }

        Ok(Viewport {
            left,
            right,
            top,
            bottom,
        })
    }

    /// Builds a viewport out of the upper-left and lower-right corners.
    pub fn from_corners(upper_left: Complex<f64>, lower_right: Complex<f64>) -> Result<Viewport> {
        Viewport::new(upper_left.re, lower_right.re, upper_left.im, lower_right.im)
    }

    /// Width of the viewport on the real axis.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the viewport on the imaginary axis.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// The whole set, with a little room to spare.
impl Default for Viewport {
    fn default() -> Viewport {
        Viewport {
            left: -2.0,
            right: 1.0,
            top: 1.125,
            bottom: -1.125,
        }
    }
}

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels from one to points in
/// the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The lower-right hand corner of the integral cartesian plane.
    /// The upper-left is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The region of the complex plane the pixels cover.
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// viewport it is projected onto.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// corresponding point on the complex plane by linear
    /// interpolation.  Pixels outside the plane are not checked; they
    /// land outside the viewport.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let vp = &self.viewport;
        Complex::new(
            vp.left + (pixel.0 as f64) * (vp.right - vp.left) / (self.integral_plane.0 as f64),
            vp.top + (pixel.1 as f64) * (vp.bottom - vp.top) / (self.integral_plane.1 as f64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_shape() {
        assert!(Viewport::new(1.0, -1.0, 1.0, -1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, -1.0, 1.0, -1.0).is_err());
        assert!(Viewport::new(std::f64::NAN, 1.0, 1.0, -1.0).is_err());
        assert!(Viewport::new(-1.0, std::f64::INFINITY, 1.0, -1.0).is_err());
    }

    #[test]
    fn viewport_passes_on_good_shape() {
        let vp = Viewport::new(-2.0, 1.0, 1.125, -1.125).unwrap();
        assert_eq!(vp, Viewport::default());
        assert_eq!(vp.width(), 3.0);
        assert_eq!(vp.height(), 2.25);
    }

    #[test]
    fn viewport_from_corners() {
        let vp = Viewport::from_corners(Complex::new(-1.0, 0.5), Complex::new(0.5, -0.5)).unwrap();
        assert_eq!(vp, Viewport::new(-1.0, 0.5, 0.5, -0.5).unwrap());
    }

    #[test]
    fn planemapper_fails_on_empty_plane() {
        assert!(PlaneMapper::new(0, 4, Viewport::default()).is_err());
        assert!(PlaneMapper::new(4, 0, Viewport::default()).is_err());
    }

    #[test]
    fn pixel_to_point_on_the_default_viewport() {
        let pm = PlaneMapper::new(4, 2, Viewport::default()).unwrap();
        assert_eq!(pm.len(), 8);
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 1.125));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 1)), Complex::new(-0.5, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(0.25, 0.0));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let vp = Viewport::new(0.0, 5.0, 5.0, 0.0).unwrap();
        let pm = PlaneMapper::new(5, 5, vp).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 5.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 3.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 1.0));
    }

    #[test]
    fn pixel_to_point_on_large_mixed_planes() {
        let vp = Viewport::new(-2.0, 2.0, 2.0, -2.0).unwrap();
        let pm = PlaneMapper::new(640, 640, vp).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(320, 320)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(480, 160)), Complex::new(1.0, 1.0));
    }

    #[test]
    fn pixel_to_point_is_deterministic() {
        let vp = Viewport::new(-0.7453, -0.7433, 0.1318, 0.1303).unwrap();
        let a = PlaneMapper::new(1280, 960, vp).unwrap();
        let b = PlaneMapper::new(1280, 960, vp).unwrap();
        for &(x, y) in &[(0, 0), (17, 933), (1279, 959), (640, 480)] {
            let p = a.pixel_to_point(&Pixel(x, y));
            assert_eq!(p, a.pixel_to_point(&Pixel(x, y)));
            assert_eq!(p, b.pixel_to_point(&Pixel(x, y)));
        }
    }
}
