use crate::error::SimError;
use std::fmt;

/// Plain 2D vector value used by the bubble physics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector pointing along `angle` (radians) with the given length
    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self {
            x: magnitude * angle.cos(),
            y: magnitude * angle.sin(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).magnitude()
    }

    /// Unit vector with the same heading
    pub fn normalize(self) -> Result<Self, SimError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(SimError::ZeroLengthVector);
        }
        Ok(self.scale(1.0 / magnitude))
    }

    /// Sum of a set of forces
    pub fn sum<I: IntoIterator<Item = Self>>(forces: I) -> Self {
        forces.into_iter().fold(Self::ZERO, Self::add)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}) |{:.4}| theta {:.4}",
            self.x,
            self.y,
            self.magnitude(),
            self.angle()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn angle_and_magnitude_round_trip() {
        let samples = [
            Vector2::new(3.0, 4.0),
            Vector2::new(-2.5, 0.1),
            Vector2::new(0.0, -7.0),
            Vector2::new(-1.0, -1.0),
            Vector2::new(1e-3, 250.0),
        ];
        for v in samples {
            let rebuilt = Vector2::from_angle(v.angle(), v.magnitude());
            assert!(close(rebuilt.x, v.x), "{v} -> {rebuilt}");
            assert!(close(rebuilt.y, v.y), "{v} -> {rebuilt}");
        }
    }

    #[test]
    fn from_angle_points_up_for_half_pi() {
        let up = Vector2::from_angle(PI / 2.0, 2.0);
        assert!(close(up.x, 0.0));
        assert!(close(up.y, 2.0));
    }

    #[test]
    fn sum_of_forces() {
        let total = Vector2::sum([
            Vector2::new(1.0, 2.0),
            Vector2::new(-0.5, 0.5),
            Vector2::new(0.0, -3.0),
        ]);
        assert_eq!(total, Vector2::new(0.5, -0.5));
        assert_eq!(Vector2::sum(std::iter::empty()), Vector2::ZERO);
    }

    #[test]
    fn add_and_sub_are_named_methods() {
        let a = Vector2::new(1.5, -2.0);
        let b = Vector2::new(0.5, 4.0);
        assert_eq!(a.add(b), Vector2::new(2.0, 2.0));
        assert_eq!(a.sub(b), Vector2::new(1.0, -6.0));
        assert_eq!(a.add(b).sub(b), a);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vector2::new(300.0, 385.0);
        let b = Vector2::new(303.0, 381.0);
        assert!(close(a.distance(b), 5.0));
        assert!(close(b.distance(a), 5.0));
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(Vector2::ZERO.normalize(), Err(SimError::ZeroLengthVector));
        let unit = Vector2::new(0.0, -4.0).normalize().unwrap();
        assert_eq!(unit, Vector2::new(0.0, -1.0));
    }
}
