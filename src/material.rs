//! Surface descriptors attached to primitives.
//!
//! Materials are created once during scene construction and shared read-only
//! between any number of primitives through [`Arc`](std::sync::Arc). The
//! renderer only reads the albedo; scattering models are not part of this
//! crate.

use crate::vec3::{Color, Vector3};

/// Named surface with a reflectance color.
#[derive(Debug, Clone, PartialEq)]
pub struct Material<V: Vector3> {
    /// Label used in logs and scene dumps.
    pub name: String,
    /// Surface color/reflectance, each channel in `[0, 1]`.
    pub albedo: Color<V>,
}

impl<V: Vector3> Material<V> {
    /// Create a material with the given label and albedo.
    pub fn new(name: impl Into<String>, albedo: Color<V>) -> Self {
        Self {
            name: name.into(),
            albedo,
        }
    }
}
