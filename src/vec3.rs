//! 3D vector algebra with two interchangeable backends.
//!
//! [`Vector3`] is the contract every geometric type is generic over. It is
//! implemented for:
//!
//! - [`glam::DVec3`]: scalar reference form, double precision.
//! - [`glam::Vec3A`]: SIMD form, single precision in a 16-byte aligned 4-lane
//!   register with the fourth lane unused.
//!
//! A render picks one backend for its whole lifetime; the generic parameter
//! keeps the two precisions from being mixed.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub};

use glam::{DVec3, Vec3A};
use rand::distr::uniform::SampleUniform;
use rand::Rng;

use crate::random::{random_scalar, random_scalar_range};

/// Components with an absolute value below this are treated as zero by
/// [`Vector3::near_zero`].
pub const NEAR_ZERO_EPSILON: f64 = 1e-6;

/// Floating-point scalar of a vector backend (`f32` or `f64`).
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + PartialOrd
    + Send
    + Sync
    + SampleUniform
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// Positive infinity.
    const INFINITY: Self;
    /// Negative infinity.
    const NEG_INFINITY: Self;

    /// Convert from `f64`, rounding if the target is narrower.
    fn from_f64(value: f64) -> Self;
    /// Widen to `f64`.
    fn to_f64(self) -> f64;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Tangent of an angle in radians.
    fn tan(self) -> Self;
    /// Degrees to radians.
    fn to_radians(self) -> Self;
    /// `1 / self`.
    fn recip(self) -> Self;
}

macro_rules! impl_real {
    ($t:ident) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const INFINITY: Self = $t::INFINITY;
            const NEG_INFINITY: Self = $t::NEG_INFINITY;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }
            #[inline]
            fn abs(self) -> Self {
                $t::abs(self)
            }
            #[inline]
            fn tan(self) -> Self {
                $t::tan(self)
            }
            #[inline]
            fn to_radians(self) -> Self {
                $t::to_radians(self)
            }
            #[inline]
            fn recip(self) -> Self {
                $t::recip(self)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);

/// Approximate `1 / sqrt(x)`.
///
/// Uses the SSE reciprocal square root estimate when the target has it
/// (relative error at most 1.5 * 2^-12). Elsewhere falls back to the bit-level
/// initial guess refined by two Newton-Raphson steps.
#[inline]
#[allow(unused_unsafe)]
pub fn fast_rsqrt(x: f32) -> f32 {
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse"))]
    {
        #[cfg(target_arch = "x86")]
        use std::arch::x86::{_mm_cvtss_f32, _mm_rsqrt_ss, _mm_set_ss};
        #[cfg(target_arch = "x86_64")]
        use std::arch::x86_64::{_mm_cvtss_f32, _mm_rsqrt_ss, _mm_set_ss};

        // SAFETY: the `sse` target feature is statically enabled.
        unsafe {
            _mm_cvtss_f32(_mm_rsqrt_ss(_mm_set_ss(x)))
        }
    }
    #[cfg(not(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse")))]
    {
        let half = 0.5 * x;
        let mut y = f32::from_bits(0x5f37_5a86 - (x.to_bits() >> 1));
        y *= 1.5 - half * y * y;
        y *= 1.5 - half * y * y;
        y
    }
}

/// Ties a vector backend to its scalar type.
///
/// Kept apart from [`Vector3`] so the operator supertraits of `Vector3` can
/// name the scalar.
pub trait Coords: Sized {
    /// Component type; also supports `scalar * vector`.
    type Scalar: Real + Mul<Self, Output = Self>;
}

/// Three-component vector used as direction, point and RGB color.
///
/// All operations are pure and return new values.
pub trait Vector3:
    Coords
    + Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Mul<<Self as Coords>::Scalar, Output = Self>
    + Div<<Self as Coords>::Scalar, Output = Self>
    + MulAssign<<Self as Coords>::Scalar>
    + DivAssign<<Self as Coords>::Scalar>
{
    /// Human readable backend name, used in logs.
    const BACKEND: &'static str;

    /// Construct from three components.
    fn new(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self;
    /// First component.
    fn x(self) -> Self::Scalar;
    /// Second component.
    fn y(self) -> Self::Scalar;
    /// Third component.
    fn z(self) -> Self::Scalar;
    /// Dot product.
    fn dot(self, other: Self) -> Self::Scalar;
    /// Cross product.
    fn cross(self, other: Self) -> Self;
    /// Squared Euclidean length.
    fn length_squared(self) -> Self::Scalar;

    /// Construct from `f64` literals, rounding for single precision.
    #[inline]
    fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            Self::Scalar::from_f64(x),
            Self::Scalar::from_f64(y),
            Self::Scalar::from_f64(z),
        )
    }

    /// Same value in all three components.
    #[inline]
    fn splat(value: Self::Scalar) -> Self {
        Self::new(value, value, value)
    }

    /// Components widened to `f64`.
    #[inline]
    fn to_f64_array(self) -> [f64; 3] {
        [self.x().to_f64(), self.y().to_f64(), self.z().to_f64()]
    }

    /// Euclidean length.
    #[inline]
    fn length(self) -> Self::Scalar {
        self.length_squared().sqrt()
    }

    /// Exact unit vector: divides by the true length.
    ///
    /// A zero vector yields non-finite components.
    #[inline]
    fn normalize(self) -> Self {
        self / self.length()
    }

    /// Approximate unit vector: multiplies by a reciprocal square root
    /// estimate instead of dividing by the exact length.
    fn qnormalize(self) -> Self;

    /// True when every component is closer to zero than [`NEAR_ZERO_EPSILON`].
    #[inline]
    fn near_zero(self) -> bool {
        let s = Self::Scalar::from_f64(NEAR_ZERO_EPSILON);
        self.x().abs() < s && self.y().abs() < s && self.z().abs() < s
    }

    /// Uniform sample from the box `[min, max]^3`.
    ///
    /// Each component is drawn with [`random_scalar_range`], so the upper face
    /// is never produced.
    fn random_range<R: Rng>(rng: &mut R, min: Self::Scalar, max: Self::Scalar) -> Self {
        Self::new(
            random_scalar_range(rng, min, max),
            random_scalar_range(rng, min, max),
            random_scalar_range(rng, min, max),
        )
    }

    /// Uniform sample inside the unit sphere, by rejection.
    fn random_in_unit_sphere<R: Rng>(rng: &mut R) -> Self {
        let one = Self::Scalar::ONE;
        loop {
            let p = Self::random_range(rng, -one, one);
            if p.length_squared() < one {
                return p;
            }
        }
    }

    /// Uniform sample inside the unit disk in the `z = 0` plane, by rejection.
    fn random_in_unit_disk<R: Rng>(rng: &mut R) -> Self {
        let one = Self::Scalar::ONE;
        let two = Self::Scalar::from_f64(2.0);
        loop {
            let p = Self::new(
                two * random_scalar::<Self::Scalar, R>(rng) - one,
                two * random_scalar::<Self::Scalar, R>(rng) - one,
                Self::Scalar::ZERO,
            );
            if p.length_squared() < one {
                return p;
            }
        }
    }

    /// Approximately unit-length random direction.
    fn random_unit_vector<R: Rng>(rng: &mut R) -> Self {
        Self::random_in_unit_sphere(rng).qnormalize()
    }

    /// Sample inside the unit sphere, flipped into the hemisphere of `normal`.
    fn random_in_hemisphere<R: Rng>(rng: &mut R, normal: Self) -> Self {
        let in_unit_sphere = Self::random_in_unit_sphere(rng);
        if in_unit_sphere.dot(normal) > Self::Scalar::ZERO {
            in_unit_sphere
        } else {
            -in_unit_sphere
        }
    }
}

/// Point in space.
pub type Point3<V> = V;
/// Linear RGB color.
pub type Color<V> = V;

impl Coords for DVec3 {
    type Scalar = f64;
}

impl Vector3 for DVec3 {
    const BACKEND: &'static str = "scalar f64";

    #[inline]
    fn new(x: f64, y: f64, z: f64) -> Self {
        DVec3::new(x, y, z)
    }
    #[inline]
    fn x(self) -> f64 {
        self.x
    }
    #[inline]
    fn y(self) -> f64 {
        self.y
    }
    #[inline]
    fn z(self) -> f64 {
        self.z
    }
    #[inline]
    fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    #[inline]
    fn cross(self, other: Self) -> Self {
        DVec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
    #[inline]
    fn length_squared(self) -> f64 {
        Vector3::dot(self, self)
    }
    #[inline]
    fn qnormalize(self) -> Self {
        let len_sq = Vector3::length_squared(self);
        // The estimate works in f32; lengths it cannot represent take the exact path
        if !(f64::from(f32::MIN_POSITIVE)..=f64::from(f32::MAX)).contains(&len_sq) {
            return Vector3::normalize(self);
        }
        self * f64::from(fast_rsqrt(len_sq as f32))
    }
}

impl Coords for Vec3A {
    type Scalar = f32;
}

// Vec3A lowers to SSE2 (or NEON/wasm simd128) lane operations; dot and cross
// are shuffle-based in glam, so these are thin forwards.
impl Vector3 for Vec3A {
    const BACKEND: &'static str = "simd f32x4";

    #[inline]
    fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3A::new(x, y, z)
    }
    #[inline]
    fn x(self) -> f32 {
        self.x
    }
    #[inline]
    fn y(self) -> f32 {
        self.y
    }
    #[inline]
    fn z(self) -> f32 {
        self.z
    }
    #[inline]
    fn dot(self, other: Self) -> f32 {
        Vec3A::dot(self, other)
    }
    #[inline]
    fn cross(self, other: Self) -> Self {
        Vec3A::cross(self, other)
    }
    #[inline]
    fn length_squared(self) -> f32 {
        Vec3A::length_squared(self)
    }
    #[inline]
    fn qnormalize(self) -> Self {
        self * fast_rsqrt(Vec3A::length_squared(self))
    }
}

/// Scalar triple product `a . (b x c)`: determinant of the matrix with
/// columns `a`, `b`, `c`.
#[inline]
pub fn det<V: Vector3>(a: V, b: V, c: V) -> V::Scalar {
    a.dot(b.cross(c))
}

/// Mirror `v` about the plane with unit normal `n`.
#[inline]
pub fn reflect<V: Vector3>(v: V, n: V) -> V {
    v - n * (V::Scalar::from_f64(2.0) * v.dot(n))
}

/// Refract unit direction `uv` through a surface with unit normal `n`
/// (Snell's law, `etai_over_etat = n1 / n2`).
pub fn refract<V: Vector3>(uv: V, n: V, etai_over_etat: V::Scalar) -> V {
    let one = V::Scalar::ONE;
    let mut cos_theta = (-uv).dot(n);
    if cos_theta > one {
        cos_theta = one;
    }
    let r_out_perp = (uv + n * cos_theta) * etai_over_etat;
    let r_out_parallel = n * -(one - r_out_perp.length_squared()).abs().sqrt();
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    fn assert_close<V: Vector3>(a: V, b: V, tol: f64) {
        let [ax, ay, az] = a.to_f64_array();
        let [bx, by, bz] = b.to_f64_array();
        assert!(
            (ax - bx).abs() < tol && (ay - by).abs() < tol && (az - bz).abs() < tol,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn check_algebra<V: Vector3>(tol: f64) {
        let a = V::from_f64(1.0, 2.0, 3.0);
        let b = V::from_f64(-4.0, 0.5, 2.0);

        assert_close(a + b, V::from_f64(-3.0, 2.5, 5.0), tol);
        assert_close(a - b, V::from_f64(5.0, 1.5, 1.0), tol);
        assert_close(a * b, V::from_f64(-4.0, 1.0, 6.0), tol);
        assert_close(-a, V::from_f64(-1.0, -2.0, -3.0), tol);
        assert_close(a * V::Scalar::from_f64(2.0), V::from_f64(2.0, 4.0, 6.0), tol);
        assert_close(V::Scalar::from_f64(2.0) * a, V::from_f64(2.0, 4.0, 6.0), tol);
        assert_close(a / V::Scalar::from_f64(2.0), V::from_f64(0.5, 1.0, 1.5), tol);

        assert!((a.dot(b).to_f64() - 3.0).abs() < tol);
        assert_close(a.cross(b), V::from_f64(2.5, -14.0, 8.5), tol);
        assert!((a.length_squared().to_f64() - 14.0).abs() < tol);
        assert!((V::from_f64(3.0, 4.0, 0.0).length().to_f64() - 5.0).abs() < tol);
    }

    #[test]
    fn scalar_backend_algebra() {
        check_algebra::<DVec3>(1e-12);
    }

    #[test]
    fn simd_backend_algebra() {
        check_algebra::<Vec3A>(1e-5);
    }

    #[test]
    fn cross_is_orthogonal_to_both_inputs() {
        let a = Vec3A::new(0.3, -1.7, 2.2);
        let b = Vec3A::new(5.0, 0.25, -0.5);
        let c = Vector3::cross(a, b);
        assert!(Vector3::dot(c, a).abs() < 1e-4);
        assert!(Vector3::dot(c, b).abs() < 1e-4);
    }

    #[test]
    fn normalize_variants_are_unit_and_parallel() {
        let v = DVec3::new(3.0, -4.0, 12.0);
        let exact = Vector3::normalize(v);
        let quick = v.qnormalize();
        assert!((Vector3::length(exact) - 1.0).abs() < 1e-9);
        assert!((Vector3::length(quick) - 1.0).abs() < 1e-3);
        assert!(Vector3::length(Vector3::cross(quick, v)) < 1e-9 * Vector3::length(v) * 13.0);

        let w = Vec3A::new(0.001, 0.002, -0.003);
        assert!((Vector3::length(Vector3::normalize(w)) - 1.0).abs() < 1e-6);
        assert!((Vector3::length(w.qnormalize()) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn qnormalize_handles_extreme_double_lengths() {
        for v in [
            DVec3::new(1e-20, 0.0, 0.0),
            DVec3::new(3e19, 0.0, 0.0),
            DVec3::new(-1e-30, 2e-30, 5e-31),
            DVec3::new(4e100, -1e100, 3e100),
        ] {
            let exact = Vector3::normalize(v);
            let quick = v.qnormalize();
            assert!((Vector3::length(exact) - 1.0).abs() < 1e-9, "{:?}", v);
            assert!((Vector3::length(quick) - 1.0).abs() < 1e-3, "{:?}", v);
            assert!(Vector3::dot(exact, quick) > 0.999, "{:?}", v);
        }
    }

    #[test]
    fn random_unit_vector_is_unit_length() {
        let mut rng = seeded(13);
        for _ in 0..500 {
            let d = <DVec3 as Vector3>::random_unit_vector(&mut rng);
            assert!((Vector3::length(d) - 1.0).abs() < 1e-3);
            let s = <Vec3A as Vector3>::random_unit_vector(&mut rng);
            assert!((Vector3::length(s) - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn normalize_zero_is_not_finite() {
        let n = Vector3::normalize(DVec3::ZERO);
        assert!(!n.is_finite());
    }

    #[test]
    fn fast_rsqrt_is_close() {
        for x in [1e-4_f32, 0.25, 1.0, 2.0, 14.0, 1e6] {
            let exact = 1.0 / x.sqrt();
            assert!(((fast_rsqrt(x) - exact) / exact).abs() < 1e-3, "x = {}", x);
        }
    }

    #[test]
    fn near_zero_uses_epsilon() {
        assert!(DVec3::new(1e-7, -1e-7, 0.0).near_zero());
        assert!(!DVec3::new(1e-7, 2e-6, 0.0).near_zero());
        assert!(Vec3A::ZERO.near_zero());
    }

    #[test]
    fn scale_then_divide_round_trips() {
        let v = DVec3::new(1.5, -2.25, 8.0);
        for t in [-3.0, 0.001, 7.5, 1e6] {
            let back = (v * t) / t;
            assert_close(back, v, 1e-9);
        }
    }

    #[test]
    fn random_samplers_stay_in_bounds() {
        let mut rng = seeded(7);
        for _ in 0..1000 {
            let b = <Vec3A as Vector3>::random_range(&mut rng, -2.0, 3.0);
            for c in b.to_array() {
                assert!((-2.0..3.0).contains(&c));
            }
            let s = <DVec3 as Vector3>::random_in_unit_sphere(&mut rng);
            assert!(Vector3::length_squared(s) < 1.0);
            let d = <DVec3 as Vector3>::random_in_unit_disk(&mut rng);
            assert!(Vector3::length_squared(d) < 1.0);
            assert_eq!(d.z, 0.0);
            let n = DVec3::Y;
            let h = <DVec3 as Vector3>::random_in_hemisphere(&mut rng, n);
            assert!(Vector3::dot(h, n) >= 0.0);
        }
    }

    #[test]
    fn det_matches_cofactor_expansion() {
        let a = DVec3::new(1.0, 0.0, 2.0);
        let b = DVec3::new(-1.0, 3.0, 1.0);
        let c = DVec3::new(2.0, 1.0, 0.0);
        // columns a, b, c expanded along the first row
        let expected = a.x * (b.y * c.z - c.y * b.z) - b.x * (a.y * c.z - c.y * a.z)
            + c.x * (a.y * b.z - b.y * a.z);
        assert!((det(a, b, c) - expected).abs() < 1e-12);
    }

    #[test]
    fn reflect_and_refract() {
        let n = DVec3::Y;
        let v = DVec3::new(1.0, -1.0, 0.0);
        assert_close(reflect(v, n), DVec3::new(1.0, 1.0, 0.0), 1e-12);

        let straight = refract(DVec3::new(0.0, -1.0, 0.0), n, 1.0 / 1.5);
        assert_close(straight, DVec3::new(0.0, -1.0, 0.0), 1e-12);
    }
}
