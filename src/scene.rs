//! Built-in demo scene: two spheres, a triangle and a ground sphere.

use std::sync::Arc;

use log::debug;

use crate::camera::CameraConfig;
use crate::hittable::HittableList;
use crate::material::Material;
use crate::primitive::Primitive;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::vec3::{Real, Vector3};

/// Build the demo world.
///
/// Both small-scene spheres share one "clay" material; the triangle and the
/// ground carry none and are shaded by their normals alone.
pub fn demo_scene<V: Vector3>() -> HittableList<V> {
    let clay = Arc::new(Material::new("clay", V::from_f64(0.9, 0.8, 0.7)));

    let primitives: Vec<Primitive<V>> = vec![
        Sphere::new(V::from_f64(-3.0, 0.0, -1.0), V::Scalar::from_f64(2.0))
            .with_material(clay.clone())
            .into(),
        Triangle::new(
            V::from_f64(0.25, 0.0, -1.0),
            V::from_f64(0.125, 0.5, -1.25),
            V::from_f64(0.0, 0.0, -2.0),
        )
        .into(),
        Sphere::new(V::from_f64(0.5, 0.0, -1.0), V::Scalar::from_f64(0.4))
            .with_material(clay)
            .into(),
        Sphere::new(V::from_f64(0.0, -100.5, -1.0), V::Scalar::from_f64(100.0)).into(),
    ];

    let mut world = HittableList::new();
    for primitive in primitives {
        debug!("Adding {} to scene", primitive.kind());
        world.add(Arc::new(primitive));
    }
    world
}

/// Camera for the demo world: at the origin looking down -z.
pub fn demo_camera<V: Vector3>(aspect_ratio: f64, vfov: f64, aperture: f64) -> CameraConfig<V> {
    CameraConfig {
        vfov: V::Scalar::from_f64(vfov),
        aspect_ratio: V::Scalar::from_f64(aspect_ratio),
        aperture: V::Scalar::from_f64(aperture),
        ..CameraConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::interval::Interval;
    use crate::ray::Ray;
    use glam::{DVec3, Vec3A};

    #[test]
    fn demo_scene_contents() {
        let world = demo_scene::<DVec3>();
        assert_eq!(world.len(), 4);

        // Straight down hits the ground sphere just below its top
        let r = Ray::new(DVec3::ZERO, -DVec3::Y);
        let rec = world.hit(&r, Interval::from_min(0.0)).expect("ground");
        assert!((rec.t - (100.5 - 9999.0_f64.sqrt())).abs() < 1e-9);
        assert!(rec.normal.y > 0.99);
        assert!(rec.material.is_none());
    }

    #[test]
    fn spheres_share_material() {
        let world = demo_scene::<Vec3A>();
        let left = world
            .hit(&Ray::new(Vec3A::ZERO, Vec3A::new(-1.0, 0.0, 0.0)), Interval::from_min(0.0))
            .expect("left sphere");
        let down_z = Ray::new(Vec3A::new(0.5, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        let right = world.hit(&down_z, Interval::from_min(0.0)).expect("right sphere");
        let (a, b) = (left.material.expect("clay"), right.material.expect("clay"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name, "clay");
    }
}
