use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Axis across which [`Vector2D::flip`] mirrors a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Negates the `j` component.
    Vertical,
    /// Negates the `i` component.
    Horizontal,
}

/// Immutable 2D vector. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub i: f64,
    pub j: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, -1.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    pub const fn new(i: f64, j: f64) -> Self {
        Self { i, j }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.i * other.i + self.j * other.j
    }

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction: its result is non-finite. Callers
    /// must check `magnitude() > 0` first.
    pub fn normalized(self) -> Self {
        let c = 1.0 / self.magnitude();
        self.scale(c)
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.i + other.i, self.j + other.j)
    }

    pub fn sub(self, other: Self) -> Self {
        self.add(other.inverse())
    }

    pub fn inverse(self) -> Self {
        Self::new(-self.i, -self.j)
    }

    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.i * scalar, self.j * scalar)
    }

    pub fn flip(self, axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Self::new(self.i, -self.j),
            Axis::Horizontal => Self::new(-self.i, self.j),
        }
    }

    /// Rotates counter-clockwise by `theta` radians.
    pub fn rotate(self, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos * self.i - sin * self.j, sin * self.i + cos * self.j)
    }

    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).magnitude()
    }

    pub fn is_finite(self) -> bool {
        self.i.is_finite() && self.j.is_finite()
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2D::add(self, rhs)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Vector2D::sub(self, rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        self.inverse()
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}
