use num::{Float, Num};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul, Sub};

/// A 3D vector generic over any numeric type.
///
/// This struct represents a point or vector in the local world frame
/// (x east, y north, z up) and provides the common mathematical operations
/// needed for telemetry integration and path planning.
///
/// # Type Parameters
/// * `T` - The functionality for the vector depends on traits implemented by `T`.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec3D<T> {
    /// The x-component (east) of the vector.
    x: T,
    /// The y-component (north) of the vector.
    y: T,
    /// The z-component (up) of the vector.
    z: T,
}

impl<T: Copy> Vec3D<T> {
    /// Creates a new vector with the given x, y and z components.
    pub const fn new(x: T, y: T, z: T) -> Self { Self { x, y, z } }

    pub const fn x(&self) -> T { self.x }

    pub const fn y(&self) -> T { self.y }

    pub const fn z(&self) -> T { self.z }

    /// Returns a copy of the vector with its z-component replaced.
    pub fn with_z(self, z: T) -> Self { Self { x: self.x, y: self.y, z } }
}

impl<T: Num + Copy> Vec3D<T> {
    /// Creates a zero vector (x = 0, y = 0, z = 0).
    pub fn zero() -> Self { Self::new(T::zero(), T::zero(), T::zero()) }

    /// Checks whether all three components are zero.
    pub fn is_zero(&self) -> bool { self.x.is_zero() && self.y.is_zero() && self.z.is_zero() }

    /// Computes the dot product of the current vector with another vector.
    ///
    /// ```text
    /// dot_product = (x1 * x2) + (y1 * y2) + (z1 * z2)
    /// ```
    pub fn dot(self, other: Self) -> T { self.x * other.x + self.y * other.y + self.z * other.z }

    /// Creates a vector pointing from the current vector (`self`) to another vector (`other`).
    pub fn to(&self, other: &Self) -> Self {
        Self::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }
}

impl<T: Float> Vec3D<T> {
    /// Computes the magnitude (absolute value) of the vector.
    pub fn abs(&self) -> T { self.dot(*self).sqrt() }

    /// Computes the magnitude of the vector projected onto the horizontal plane.
    pub fn horizontal_abs(&self) -> T { self.x.hypot(self.y) }

    /// Normalizes the vector to have a magnitude of 1.
    /// If the magnitude is zero, the original vector is returned unmodified.
    pub fn normalize(self) -> Self {
        let magnitude = self.abs();
        if magnitude.is_zero() { self } else { self / magnitude }
    }

    /// Computes the Euclidean distance between the current vector and another vector.
    pub fn euclid_distance(&self, other: &Self) -> T { self.to(other).abs() }

    /// Checks if the current vector is within a radius of another vector.
    ///
    /// # Arguments
    /// * `other` - The other `Vec3D` vector to compare against.
    /// * `rad` - The radius, inclusive.
    pub fn in_radius_of(&self, other: &Self, rad: T) -> bool { self.euclid_distance(other) <= rad }

    /// Rotates the horizontal components of the vector clockwise by a heading angle
    /// in degrees, leaving `z` untouched. A heading of 90 degrees turns north into east.
    ///
    /// # Arguments
    /// * `angle_degrees` - The heading to rotate by, in degrees.
    pub fn rotate_heading_by(&mut self, angle_degrees: T) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let new_x = self.x * cos + self.y * sin;
        self.y = self.y * cos - self.x * sin;
        self.x = new_x;
    }

    /// Returns `true` if no component is `NaN` or infinite.
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() && self.z.is_finite() }
}

impl<T: Num> Add for Vec3D<T> {
    type Output = Vec3D<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<T: Num> Sub for Vec3D<T> {
    type Output = Vec3D<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<T: Num + Copy> Mul<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `*` operator for a `Vec3D` and a scalar.
    fn mul(self, rhs: T) -> Self::Output {
        Self::Output { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl<T: Num + Copy> Div<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `/` operator for a `Vec3D` and a scalar.
    fn div(self, rhs: T) -> Self::Output {
        Self::Output { x: self.x / rhs, y: self.y / rhs, z: self.z / rhs }
    }
}

impl<T: Display> Display for Vec3D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.1}, {:.1}, {:.1}]", self.x, self.y, self.z)
    }
}
