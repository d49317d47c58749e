//! Geometric primitives: Point, Velocity, bounds

use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean distance from the origin.
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        (*self - other).length()
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

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Two-dimensional velocity in logical pixels per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub fn speed(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Inclusive range on one axis. Either end may be open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub min: f32,
    pub max: f32,
}

impl AxisBounds {
    pub const UNBOUNDED: AxisBounds = AxisBounds {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-extent, extent]`.
    pub const fn symmetric(extent: f32) -> Self {
        Self {
            min: -extent,
            max: extent,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Signed distance past the nearest end, or zero inside the range.
    pub fn overflow(&self, value: f32) -> f32 {
        if value < self.min {
            value - self.min
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Per-axis drag bounds.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DragBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

impl DragBounds {
    pub const fn new(x: AxisBounds, y: AxisBounds) -> Self {
        Self { x, y }
    }

    pub fn horizontal(x: AxisBounds) -> Self {
        Self {
            x,
            y: AxisBounds::UNBOUNDED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_is_signed_and_zero_inside() {
        let bounds = AxisBounds::symmetric(100.0);
        assert_eq!(bounds.overflow(50.0), 0.0);
        assert_eq!(bounds.overflow(130.0), 30.0);
        assert_eq!(bounds.overflow(-120.0), -20.0);
        assert_eq!(bounds.clamp(-120.0), -100.0);
    }

    #[test]
    fn unbounded_contains_everything() {
        let bounds = AxisBounds::default();
        assert!(bounds.contains(1.0e9));
        assert_eq!(bounds.overflow(-1.0e9), 0.0);
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a - Point::new(3.0, 0.0), Point::new(0.0, 4.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
        assert_eq!(Point::ZERO.distance_to(a), 5.0);
    }
}
