use crate::geometry::{self, Point, Polar};
use palette::Srgba;

/// One drawn mark, stored in the canonical sector-relative form. Every sector copy is derived
/// from this single value at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    polar: Polar,
    size: u32,
    color: Srgba<f64>,
}

impl Dot {
    pub fn new(polar: Polar, size: u32, color: Srgba<f64>) -> Self {
        Self {
            polar,
            size: size.max(1),
            color,
        }
    }

    pub fn from_pointer(
        pointer: Point,
        center: Point,
        angular_step: f64,
        size: u32,
        color: Srgba<f64>,
    ) -> Self {
        Self::new(geometry::to_polar(pointer, center, angular_step), size, color)
    }

    pub fn polar(&self) -> Polar {
        self.polar
    }

    pub fn angle_fraction(&self) -> f64 {
        self.polar.angle_fraction
    }

    pub fn radius_from_center(&self) -> f64 {
        self.polar.radius
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn color(&self) -> Srgba<f64> {
        self.color
    }

    /// Copy mirrored across the sector's bisector.
    pub fn reflected(&self) -> Self {
        Self {
            polar: self.polar.reflected(),
            ..*self
        }
    }

    /// Chord distance between the two dots inside one canonical sector (law of cosines).
    pub fn distance_to(&self, other: &Dot, angular_step: f64) -> f64 {
        let (r1, r2) = (self.polar.radius, other.polar.radius);
        let delta = (other.polar.angle_fraction - self.polar.angle_fraction) * angular_step;
        // clamp: rounding may push the radicand slightly below zero for coincident dots
        (r1 * r1 + r2 * r2 - 2.0 * r1 * r2 * delta.cos())
            .max(0.0)
            .sqrt()
    }

    /// Only `self.size` is used as reach, so the eraser's footprint alone decides what it hits.
    pub fn overlaps(&self, other: &Dot, angular_step: f64) -> bool {
        self.distance_to(other, angular_step) < self.size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn dot(fraction: f64, radius: f64, size: u32) -> Dot {
        Dot::new(Polar::new(fraction, radius), size, Srgba::new(1.0, 0.0, 0.0, 1.0))
    }

    #[test]
    fn test_overlap_uses_eraser_size_only() {
        let step = PI / 2.0;
        let eraser = dot(0.0, 100.0, 20);
        let near = dot(0.05, 102.0, 2);
        let far = dot(0.5, 100.0, 200);

        assert!(eraser.distance_to(&near, step) < 20.0);
        assert!(eraser.overlaps(&near, step));
        assert!(!eraser.overlaps(&far, step));
        // the big dot would reach the eraser the other way round
        assert!(far.overlaps(&eraser, step));
    }

    #[test]
    fn test_coincident_dots_have_zero_distance() {
        let a = dot(0.3, 57.0, 4);
        assert_eq!(a.distance_to(&a, PI / 3.0), 0.0);
        assert!(a.overlaps(&a, PI / 3.0));
    }

    #[test]
    fn test_reflected_keeps_everything_but_angle() {
        let a = dot(0.2, 10.0, 8);
        let r = a.reflected();
        assert!((r.angle_fraction() - 0.8).abs() < 1e-12);
        assert_eq!(r.radius_from_center(), 10.0);
        assert_eq!(r.size(), 8);
        assert_eq!(r.color(), a.color());
    }

    #[test]
    fn test_size_is_at_least_one() {
        assert_eq!(dot(0.0, 0.0, 0).size(), 1);
    }
}
