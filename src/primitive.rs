//! Closed set of primitive kinds with a single dispatch point.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::vec3::Vector3;

/// Any geometric primitive the scene can hold.
#[derive(Debug, Clone)]
pub enum Primitive<V: Vector3> {
    /// Analytic sphere.
    Sphere(Sphere<V>),
    /// Flat triangle.
    Triangle(Triangle<V>),
}

impl<V: Vector3> Primitive<V> {
    /// Short kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Triangle(_) => "triangle",
        }
    }
}

impl<V: Vector3> Hittable<V> for Primitive<V> {
    #[inline]
    fn hit(&self, r: &Ray<V>, ray_t: Interval<V::Scalar>) -> Option<HitRecord<V>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(r, ray_t),
            Primitive::Triangle(triangle) => triangle.hit(r, ray_t),
        }
    }
}

impl<V: Vector3> From<Sphere<V>> for Primitive<V> {
    fn from(sphere: Sphere<V>) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl<V: Vector3> From<Triangle<V>> for Primitive<V> {
    fn from(triangle: Triangle<V>) -> Self {
        Primitive::Triangle(triangle)
    }
}
