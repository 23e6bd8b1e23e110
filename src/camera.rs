//! Camera for ray generation with thin-lens depth of field.

use rand::Rng;

use crate::ray::Ray;
use crate::vec3::{Point3, Real, Vector3};

/// Everything needed to place and shape a [`Camera`].
///
/// Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig<V: Vector3> {
    /// Point camera is looking from (camera position)
    pub lookfrom: Point3<V>,
    /// Point camera is looking at (look target)
    pub lookat: Point3<V>,
    /// Camera-relative "up" direction hint
    pub vup: V,
    /// Vertical field of view in degrees
    pub vfov: V::Scalar,
    /// Image width divided by image height
    pub aspect_ratio: V::Scalar,
    /// Lens diameter; zero gives a pinhole camera
    pub aperture: V::Scalar,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: V::Scalar,
}

impl<V: Vector3> Default for CameraConfig<V> {
    /// Pinhole at the origin looking down -z, 90 degree FOV, 16:9.
    fn default() -> Self {
        Self {
            lookfrom: V::from_f64(0.0, 0.0, 0.0),
            lookat: V::from_f64(0.0, 0.0, -1.0),
            vup: V::from_f64(0.0, 1.0, 0.0),
            vfov: V::Scalar::from_f64(90.0),
            aspect_ratio: V::Scalar::from_f64(16.0 / 9.0),
            aperture: V::Scalar::ZERO,
            focus_dist: V::Scalar::ONE,
        }
    }
}

/// Maps normalized image-plane coordinates to world-space rays.
///
/// Immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct Camera<V: Vector3> {
    /// Camera position in world space (same as lookfrom)
    origin: Point3<V>,
    /// World position of the viewport's lower-left corner on the focus plane
    lower_left_corner: Point3<V>,
    /// Full viewport extent along u
    horizontal: V,
    /// Full viewport extent along v
    vertical: V,
    /// Camera frame basis vector pointing right
    u: V,
    /// Camera frame basis vector pointing up
    v: V,
    /// Camera frame basis vector pointing opposite view direction
    w: V,
    lens_radius: V::Scalar,
}

impl<V: Vector3> Camera<V> {
    /// Derive the camera frame and viewport from `config`.
    pub fn new(config: &CameraConfig<V>) -> Self {
        let two = V::Scalar::from_f64(2.0);

        // Determine viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / two).tan();
        let viewport_height = two * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.lookfrom;
        let horizontal = u * (config.focus_dist * viewport_width);
        let vertical = v * (config.focus_dist * viewport_height);
        let lower_left_corner =
            origin - horizontal / two - vertical / two - w * config.focus_dist;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / two,
        }
    }

    /// Ray through viewport point `(s, t)`, both in `[0, 1]` with `(0, 0)`
    /// at the lower-left.
    ///
    /// The origin is jittered over the lens disk, so with a non-zero
    /// aperture only points on the focus plane stay sharp.
    pub fn get_ray<R: Rng>(&self, s: V::Scalar, t: V::Scalar, rng: &mut R) -> Ray<V> {
        let rd = V::random_in_unit_disk(rng) * self.lens_radius;
        let offset = self.u * rd.x() + self.v * rd.y();

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + self.horizontal * s + self.vertical * t
                - self.origin
                - offset,
        )
    }

    /// Camera position.
    pub fn origin(&self) -> Point3<V> {
        self.origin
    }

    /// Orthonormal frame `(u, v, w)`: right, up, backwards.
    pub fn basis(&self) -> (V, V, V) {
        (self.u, self.v, self.w)
    }

    /// Radius of the lens disk.
    pub fn lens_radius(&self) -> V::Scalar {
        self.lens_radius
    }
}
