//! 3D point, vector and orientation primitives.

use std::fmt;

/// A point in world coordinates (meters).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3D {
    /// X coordinate in meters.
    pub x: f64,
    /// Y coordinate in meters.
    pub y: f64,
    /// Z coordinate in meters.
    pub z: f64,
}

impl Point3D {
    /// Origin (0, 0, 0).
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar point (z = 0).
    #[inline]
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// True when no coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to another point, all three axes.
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Angle of the XY-projected direction from `self` to `target`.
    ///
    /// Result in (-π, π], from `atan2(Δy, Δx)`.
    #[inline]
    pub fn bearing_to(&self, target: &Point3D) -> f64 {
        (target.y - self.y).atan2(target.x - self.x)
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// A free 3D vector (velocities).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Orientation as a unit quaternion (x, y, z, w).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a quaternion from raw components.
    ///
    /// Components are stored as given; only their ratios matter to
    /// [`yaw`](Self::yaw).
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Pure rotation about +Z by `yaw` radians.
    #[inline]
    pub fn from_yaw(yaw: f64) -> Self {
        let (s, c) = (yaw * 0.5).sin_cos();
        Self::new(0.0, 0.0, s, c)
    }

    /// Euclidean norm of the four components.
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Yaw (rotation about Z) of the equivalent roll/pitch/yaw Euler angles.
    ///
    /// Static-frame XYZ convention, the same extraction ROS `tf` performs;
    /// roll and pitch are discarded. Result in (-π, π]. Independent of the
    /// quaternion's scale.
    #[inline]
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp =
            self.w * self.w + self.x * self.x - self.y * self.y - self.z * self.z;
        siny_cosp.atan2(cosy_cosp)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orient({:.2}, {:.2}, {:.2}, {:.2})",
            self.x, self.y, self.z, self.w
        )
    }
}
