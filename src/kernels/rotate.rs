//! Rotation and conjugation primitives
//!
//! The building blocks of every complex product in [`super::complex`] and [`super::twiddle`].
use crate::vector::SimdVector;

/// Exchanges the real and imaginary lane of every complex number.
#[inline(always)]
pub fn flip_ri<V: SimdVector>(x: V) -> V {
    x.flip_ri()
}

/// Complex conjugate of every lane pair.
///
/// Flips the sign bit of the imaginary lanes with the global mask, so the real lanes are returned
/// bit for bit and `-0.0`/NaN payloads survive unchanged.
#[inline(always)]
pub fn vconj<V: SimdVector>(x: V) -> V {
    V::conj_mask().xor(x)
}

/// Multiplies every complex number by `i`: `(re, im) -> (-im, re)`.
#[inline(always)]
pub fn vbyi<V: SimdVector>(x: V) -> V {
    flip_ri(vconj(x))
}
