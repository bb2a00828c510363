//! Small vector helpers used by the path generator and the handles.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `angle` (radians, y down).
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*self - *other).magnitude()
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Linear interpolation `p1 + (p2 - p1) * t`. `t` outside `[0, 1]` extrapolates.
pub fn interpolate(p1: Point, p2: Point, t: f64) -> Point {
    p1 + (p2 - p1) * t
}

/// Scale a vector's magnitude per axis, keeping its direction.
///
/// A zero vector is returned unchanged.
pub fn scale_vector_magnitude(vector: Point, factor: Point) -> Point {
    let magnitude = vector.magnitude();
    if magnitude == 0.0 {
        return vector;
    }
    Point::new(
        vector.x * (magnitude * factor.x) / magnitude,
        vector.y * (magnitude * factor.y) / magnitude,
    )
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`, then clamp.
pub fn remap_clamped(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let mapped = (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min;
    clamp(mapped, out_min, out_max)
}
