//! Pattern rotation.
//!
//! Points are rotated counter-clockwise by a fixed angle, either about the
//! configured pattern center (absolute positions) or about the origin
//! (relative vectors such as arc center offsets).

use nozzlecal_core::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    center: Point,
    angle: f64,
    cos: f64,
    sin: f64,
}

impl CoordinateTransform {
    pub fn new(center: Point, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            center,
            angle,
            cos,
            sin,
        }
    }

    pub fn identity() -> Self {
        Self::new(Point::ORIGIN, 0.0)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Rotation angle in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Rotation by the opposite angle about the same center
    pub fn inverse(&self) -> Self {
        Self::new(self.center, -self.angle)
    }

    pub fn rotate_about_origin(&self, p: Point) -> Point {
        Point::new(
            self.cos * p.x - self.sin * p.y,
            self.sin * p.x + self.cos * p.y,
        )
    }

    pub fn rotate_about_center(&self, p: Point) -> Point {
        self.rotate_about_origin(p - self.center) + self.center
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::identity()
    }
}
