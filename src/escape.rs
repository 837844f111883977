// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test.  A point `c` is in the Mandelbrot set if,
//! starting from zero, repeatedly squaring and adding `c` never
//! carries the orbit outside the circle of radius 2.  We can't iterate
//! forever, so after `limit` steps we give up and call it a member.

use num::Complex;

/// Once the orbit's modulus reaches this, it is gone for good.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// The classic iterator: returns the number of steps it took the
/// orbit of `c` to reach the escape radius, or `None` if it was still
/// inside after `limit` steps.
pub fn escape_time(c: Complex<f64>, limit: usize) -> Option<usize> {
    let mut z = Complex { re: 0.0_f64, im: 0.0_f64 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm() >= ESCAPE_RADIUS {
            return Some(i + 1);
        }
    }
    None
}

/// True if `c` survived `limit` iterations.
#[inline]
pub fn in_set(c: Complex<f64>, limit: usize) -> bool {
    escape_time(c, limit).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for limit in &[1, 2, 50, 1024] {
            assert!(in_set(Complex::new(0.0, 0.0), *limit));
        }
    }

    #[test]
    fn far_points_escape_on_the_first_step() {
        assert_eq!(escape_time(Complex::new(2.5, 0.0), 1), Some(1));
        assert_eq!(escape_time(Complex::new(0.0, -3.0), 1024), Some(1));
        assert_eq!(escape_time(Complex::new(1.5, 1.5), 7), Some(1));
    }

    #[test]
    fn escape_test_is_inclusive_at_the_radius() {
        // z1 = c = 2 exactly.
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 10), Some(1));
        // -2 is the tip of the set: z1 = -2 sits on the circle.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 10), Some(1));
    }

    #[test]
    fn known_members_stay_inside() {
        assert!(in_set(Complex::new(-1.0, 0.0), 1000));
        assert!(in_set(Complex::new(-0.1, 0.1), 1000));
        assert!(in_set(Complex::new(0.25, 0.0), 1000));
    }

    #[test]
    fn slow_escapers_need_more_than_one_step() {
        // 0 -> 1 -> 2: reaches the radius on the second step.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 10), Some(2));
        // ... so with a single step it still looks like a member.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 1), None);
    }
}
