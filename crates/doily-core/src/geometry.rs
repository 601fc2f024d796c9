use crate::error::SurfaceError;
use derive_more::{Deref, Display, Into};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Sector-relative polar coordinates. `angle_fraction` is the position inside one sector as a
/// fraction of its angular width, so it is independent of the sector count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polar {
    pub angle_fraction: f64,
    pub radius: f64,
}

impl Polar {
    pub fn new(angle_fraction: f64, radius: f64) -> Self {
        Self {
            angle_fraction,
            radius,
        }
    }

    pub fn reflected(&self) -> Self {
        Self::new(reflect_fraction(self.angle_fraction), self.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deref, Into)]
pub struct SectorCount(u32);

impl SectorCount {
    pub fn new(count: i32) -> Result<Self, SurfaceError> {
        u32::try_from(count)
            .ok()
            .filter(|&n| n >= 1)
            .map(Self)
            .ok_or_else(|| {
                SurfaceError::InvalidConfiguration(format!(
                    "sector count must be at least 1, got {count}"
                ))
            })
    }

    pub fn angular_step(&self) -> f64 {
        2.0 * PI / self.0 as f64
    }

    pub fn is_odd(&self) -> bool {
        self.0 % 2 == 1
    }

    /// Rotation applied to the whole drawing before sector iteration. Odd counts are shifted by
    /// half a sector so the boundaries are centered instead of starting at angle 0.
    pub fn pre_rotation(&self) -> f64 {
        if self.is_odd() {
            -self.angular_step() / 2.0
        } else {
            0.0
        }
    }
}

impl Default for SectorCount {
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<i32> for SectorCount {
    type Error = SurfaceError;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

pub fn to_polar(pointer: Point, center: Point, angular_step: f64) -> Polar {
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    // shift by PI so the angle is never negative before taking the remainder
    let fraction = (dy.atan2(dx) + PI).rem_euclid(angular_step) / angular_step;
    // rounding can land exactly on the trailing edge
    let fraction = if fraction >= 1.0 { 0.0 } else { fraction };
    Polar::new(fraction, pointer.distance(center))
}

pub fn to_cartesian(polar: Polar, angular_step: f64, center: Point) -> Point {
    let angle = polar.angle_fraction * angular_step;
    Point::new(
        center.x + angle.cos() * polar.radius,
        center.y + angle.sin() * polar.radius,
    )
}

/// Absolute position of the copy of `polar` that lands in `sector`, before any pre-rotation.
pub fn sector_to_cartesian(polar: Polar, angular_step: f64, sector: u32, center: Point) -> Point {
    rotate_about(
        to_cartesian(polar, angular_step, center),
        center,
        sector as f64 * angular_step,
    )
}

pub fn reflect_fraction(angle_fraction: f64) -> f64 {
    1.0 - angle_fraction
}

/// Rotates `point` about `center` the same way `cairo::Context::rotate` turns user space
/// (positive angles go clockwise on screen since y grows downwards).
pub fn rotate_about(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_sector_count_rejects_non_positive() {
        assert!(SectorCount::new(0).is_err());
        assert!(SectorCount::new(-3).is_err());
        assert_eq!(*SectorCount::new(1).unwrap(), 1);
        assert_eq!(SectorCount::try_from(12).unwrap().to_string(), "12");
    }

    #[test]
    fn test_pre_rotation_only_for_odd_counts() {
        assert_eq!(SectorCount::new(4).unwrap().pre_rotation(), 0.0);
        let three = SectorCount::new(3).unwrap();
        assert_close(three.pre_rotation(), -PI / 3.0);
    }

    #[test]
    fn test_to_polar_fraction_is_normalized() {
        let center = Point::new(100.0, 100.0);
        let step = SectorCount::new(6).unwrap().angular_step();
        for i in 0..360 {
            let a = (i as f64).to_radians();
            let pointer = Point::new(center.x + 40.0 * a.cos(), center.y + 40.0 * a.sin());
            let polar = to_polar(pointer, center, step);
            assert!((0.0..1.0).contains(&polar.angle_fraction), "{polar:?}");
            assert_close(polar.radius, 40.0);
        }
    }

    #[test]
    fn test_to_polar_shifts_by_half_turn() {
        let center = Point::new(0.0, 0.0);
        let step = PI / 2.0;
        // atan2 = -PI/4 -> +PI gives 3PI/4 -> remainder PI/4 -> half a sector
        let polar = to_polar(Point::new(10.0, -10.0), center, step);
        assert_close(polar.angle_fraction, 0.5);

        // pointer straight left: atan2 = PI, shifted to 2PI which folds back to 0
        let polar = to_polar(Point::new(-10.0, 0.0), center, step);
        assert!(polar.angle_fraction < EPS || polar.angle_fraction > 1.0 - EPS);
        assert!(polar.angle_fraction < 1.0);
    }

    #[test]
    fn test_to_cartesian_inverts_intra_sector_angle() {
        let center = Point::new(50.0, 50.0);
        let step = PI / 2.0;
        let p = to_cartesian(Polar::new(0.5, 20.0), step, center);
        assert_close(p.x, 50.0 + 20.0 * (PI / 4.0).cos());
        assert_close(p.y, 50.0 + 20.0 * (PI / 4.0).sin());
    }

    #[test]
    fn test_sector_to_cartesian_rotates_by_sector() {
        let center = Point::new(0.0, 0.0);
        let step = PI / 2.0;
        let p = sector_to_cartesian(Polar::new(0.0, 10.0), step, 1, center);
        assert_close(p.x, 0.0);
        assert_close(p.y, 10.0);
        let p = sector_to_cartesian(Polar::new(0.0, 10.0), step, 2, center);
        assert_close(p.x, -10.0);
        assert_close(p.y, 0.0);
    }

    #[test]
    fn test_reflection() {
        assert_close(reflect_fraction(0.25), 0.75);
        assert_eq!(Polar::new(0.0, 3.0).reflected(), Polar::new(1.0, 3.0));
    }
}
