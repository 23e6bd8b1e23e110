//! Sphere primitive for ray tracing.
//!
//! Ray-sphere intersection using the half-b form of the quadratic formula.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Real, Vector3};

/// Sphere primitive defined by center, radius, and optional material.
#[derive(Debug, Clone)]
pub struct Sphere<V: Vector3> {
    /// Center point of the sphere in world coordinates.
    pub center: Point3<V>,
    /// Radius of the sphere.
    pub radius: V::Scalar,
    /// Shared surface description reported with every hit.
    pub material: Option<Arc<Material<V>>>,
}

impl<V: Vector3> Sphere<V> {
    /// Create a new sphere without a material.
    pub fn new(center: Point3<V>, radius: V::Scalar) -> Self {
        Self {
            center,
            radius,
            material: None,
        }
    }

    /// Attach a shared material.
    pub fn with_material(mut self, material: Arc<Material<V>>) -> Self {
        self.material = Some(material);
        self
    }
}

impl<V: Vector3> Hittable<V> for Sphere<V> {
    fn hit(&self, r: &Ray<V>, ray_t: Interval<V::Scalar>) -> Option<HitRecord<V>> {
        // Vector from sphere center to ray origin
        let oc = r.origin - self.center;

        let a = r.direction.length_squared();
        let half_b = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < V::Scalar::ZERO {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, root, outward_normal, self.material.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, Vec3A};

    #[test]
    fn hits_near_side_from_outside() {
        let s = Sphere::new(DVec3::ZERO, 1.0);
        let r = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        let rec = s.hit(&r, Interval::from_min(0.0)).expect("hit");
        assert_eq!(rec.t, 4.0);
        assert_eq!(rec.p, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(rec.normal, DVec3::new(0.0, 0.0, 1.0));
        assert!(rec.front_face);
        assert!(rec.material.is_none());
    }

    #[test]
    fn falls_back_to_far_root_from_inside() {
        let s = Sphere::new(Vec3A::ZERO, 2.0);
        let r = Ray::new(Vec3A::ZERO, Vec3A::X);
        let rec = s.hit(&r, Interval::from_min(0.0)).expect("hit");
        assert!((rec.t - 2.0).abs() < 1e-6);
        assert!(!rec.front_face);
        assert!((rec.normal - -Vec3A::X).length() < 1e-6);
    }

    #[test]
    fn misses() {
        let s = Sphere::new(DVec3::ZERO, 1.0);
        let beside = Ray::new(DVec3::new(2.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(s.hit(&beside, Interval::from_min(0.0)).is_none());

        let behind = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, 1.0));
        assert!(s.hit(&behind, Interval::from_min(0.0)).is_none());

        let toward = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(s.hit(&toward, Interval::new(0.0, 3.9)).is_none());
    }

    #[test]
    fn unnormalized_direction_scales_t() {
        let s = Sphere::new(DVec3::ZERO, 1.0);
        let r = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -2.0));
        let rec = s.hit(&r, Interval::from_min(0.0)).expect("hit");
        assert_eq!(rec.t, 2.0);
        assert_eq!(rec.p, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn reports_shared_material() {
        let m = Arc::new(Material::new("clay", DVec3::new(0.9, 0.8, 0.7)));
        let s = Sphere::new(DVec3::ZERO, 1.0).with_material(m.clone());
        let r = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        let rec = s.hit(&r, Interval::from_min(0.0)).expect("hit");
        assert!(Arc::ptr_eq(rec.material.as_ref().expect("material"), &m));
    }
}
