//! Flat-shaded triangle primitive.
//!
//! Intersection solves `origin - A = l1 (B - A) + l2 (C - A) + t (-direction)`
//! for `(l1, l2, t)` with Cramer's rule. The reported normal is the face
//! normal, identical for every point on the triangle.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{det, Point3, Real, Vector3};

/// Systems whose determinant magnitude is at or below this are treated as
/// having no solution (ray nearly parallel to the plane, or a degenerate
/// triangle).
pub const ILL_CONDITIONED_DETERMINANT: f64 = 1e-3;

/// Triangle with vertices `a`, `b`, `c`.
///
/// Edges and the face normal are computed once at construction.
#[derive(Debug, Clone)]
pub struct Triangle<V: Vector3> {
    a: Point3<V>,
    b: Point3<V>,
    c: Point3<V>,
    edge_ab: V,
    edge_ac: V,
    normal: V,
    /// Shared surface description reported with every hit.
    pub material: Option<Arc<Material<V>>>,
}

impl<V: Vector3> Triangle<V> {
    /// Create a triangle without a material.
    pub fn new(a: Point3<V>, b: Point3<V>, c: Point3<V>) -> Self {
        let edge_ab = b - a;
        let edge_ac = c - a;
        Self {
            a,
            b,
            c,
            edge_ab,
            edge_ac,
            normal: edge_ab.cross(edge_ac).normalize(),
            material: None,
        }
    }

    /// Attach a shared material.
    pub fn with_material(mut self, material: Arc<Material<V>>) -> Self {
        self.material = Some(material);
        self
    }

    /// The three vertices in construction order.
    pub fn vertices(&self) -> [Point3<V>; 3] {
        [self.a, self.b, self.c]
    }

    /// Unit face normal, `normalize((B - A) x (C - A))`.
    pub fn normal(&self) -> V {
        self.normal
    }

    /// Point `A + l1 (B - A) + l2 (C - A)` in the triangle's plane.
    pub fn point_at(&self, l1: V::Scalar, l2: V::Scalar) -> Point3<V> {
        self.a + self.edge_ab * l1 + self.edge_ac * l2
    }
}

impl<V: Vector3> Hittable<V> for Triangle<V> {
    fn hit(&self, r: &Ray<V>, ray_t: Interval<V::Scalar>) -> Option<HitRecord<V>> {
        let neg_dir = -r.direction;
        let o_a = r.origin - self.a;

        // Columns [B - A, C - A, -dir]
        let d = det(self.edge_ab, self.edge_ac, neg_dir);
        if d.abs() <= V::Scalar::from_f64(ILL_CONDITIONED_DETERMINANT) {
            return None;
        }

        let l1 = det(o_a, self.edge_ac, neg_dir) / d;
        let l2 = det(self.edge_ab, o_a, neg_dir) / d;
        let t = det(self.edge_ab, self.edge_ac, o_a) / d;

        let zero = V::Scalar::ZERO;
        let inside = l1 >= zero && l2 >= zero && l1 + l2 <= V::Scalar::ONE;
        if !inside || !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(r, t, self.normal, self.material.clone()))
    }
}
