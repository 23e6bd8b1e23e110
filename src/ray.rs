//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use crate::vec3::{Point3, Vector3};

/// Ray in 3D space defined by origin and direction.
///
/// The direction is not required to be unit length and is not validated;
/// intersection routines assume it is non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<V: Vector3> {
    /// Starting point of the ray in world coordinates.
    pub origin: Point3<V>,
    /// Direction vector of the ray.
    pub direction: V,
}

impl<V: Vector3> Ray<V> {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3<V>, direction: V) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    #[inline]
    pub fn at(&self, t: V::Scalar) -> Point3<V> {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, Vec3A};

    #[test]
    fn at_walks_along_direction() {
        let r = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 0.0, -2.0));
        assert_eq!(r.at(0.0), r.origin);
        assert_eq!(r.at(1.5), DVec3::new(1.0, 2.0, 0.0));
        assert_eq!(r.at(-1.0), DVec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn zero_direction_stays_put() {
        let r = Ray::new(Vec3A::ONE, Vec3A::ZERO);
        assert_eq!(r.at(100.0), Vec3A::ONE);
    }
}
