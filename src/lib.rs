//! weekend_simd ray tracer
//!
//! Casts camera rays into a scene of spheres and triangles. All geometry is
//! generic over [`vec3::Vector3`], which has a double-precision scalar
//! backend and a single-precision SIMD backend.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod primitive;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod triangle;
pub mod vec3;
