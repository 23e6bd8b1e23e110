//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait for geometric primitives, [`HitRecord`] for
//! storing intersection data and [`HittableList`], the linear aggregate that
//! keeps the closest hit.

use std::fmt;
use std::sync::Arc;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Real, Vector3};

/// Ray-object intersection information.
#[derive(Debug, Clone)]
pub struct HitRecord<V: Vector3> {
    /// Point where the ray intersects the object
    pub p: Point3<V>,
    /// Unit surface normal, always facing against the incident ray
    pub normal: V,
    /// Ray parameter of the intersection point
    pub t: V::Scalar,
    /// True if the geometric outward normal already faced the ray
    pub front_face: bool,
    /// Material of the object at the hit point, if any
    pub material: Option<Arc<Material<V>>>,
}

impl<V: Vector3> HitRecord<V> {
    /// Build a record for a hit at `t` on `r` with the given geometric
    /// outward normal, orienting it against the ray.
    pub fn new(
        r: &Ray<V>,
        t: V::Scalar,
        outward_normal: V,
        material: Option<Arc<Material<V>>>,
    ) -> Self {
        let mut rec = Self {
            p: r.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set surface normal and determine front/back face.
    ///
    /// Ensures normal always points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray<V>, outward_normal: V) {
        self.front_face = r.direction.dot(outward_normal) < V::Scalar::ZERO;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) so a scene can be shared by parallel
/// scanline workers.
pub trait Hittable<V: Vector3>: Sync + Send {
    /// Closest intersection with `r` whose parameter lies in `ray_t`, if any.
    fn hit(&self, r: &Ray<V>, ray_t: Interval<V::Scalar>) -> Option<HitRecord<V>>;
}

impl<V: Vector3, H: Hittable<V> + ?Sized> Hittable<V> for Arc<H> {
    #[inline]
    fn hit(&self, r: &Ray<V>, ray_t: Interval<V::Scalar>) -> Option<HitRecord<V>> {
        (**self).hit(r, ray_t)
    }
}

/// Collection of objects forming a scene.
///
/// Members are shared, so scene construction code may keep its own handles.
/// Uses linear search for intersection testing.
pub struct HittableList<V: Vector3> {
    /// Shared hittable objects, tested in insertion order
    pub objects: Vec<Arc<dyn Hittable<V>>>,
}

impl<V: Vector3> HittableList<V> {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a new list with a single hittable object
    pub fn with_object(object: Arc<dyn Hittable<V>>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable<V>>) {
        self.objects.push(object);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the list has no members.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<V: Vector3> Default for HittableList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vector3> fmt::Debug for HittableList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HittableList")
            .field("objects", &self.objects.len())
            .finish()
    }
}

impl<V: Vector3> Hittable<V> for HittableList<V> {
    fn hit(&self, r: &Ray<V>, ray_t: Interval<V::Scalar>) -> Option<HitRecord<V>> {
        let mut closest: Option<HitRecord<V>> = None;
        let mut closest_so_far = ray_t.max;

        // A member can only win if it beats the best t seen so far
        for object in &self.objects {
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
