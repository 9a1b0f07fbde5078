//! Multiply-add shapes without a fused instruction
//!
//! SSE2 has no fused multiply-add, so these are the plain algebraic identities: the product is
//! rounded, then the sum is rounded again. Callers get the shape of an FMA, never its precision.
use super::rotate::{vbyi, vconj};
use crate::vector::SimdVector;

/// `c + a * b`
#[inline(always)]
pub fn vfma<V: SimdVector>(a: V, b: V, c: V) -> V {
    c.add(a.mul(b))
}

/// `c - a * b`
#[inline(always)]
pub fn vfnms<V: SimdVector>(a: V, b: V, c: V) -> V {
    c.sub(a.mul(b))
}

/// `a * b - c`
#[inline(always)]
pub fn vfms<V: SimdVector>(a: V, b: V, c: V) -> V {
    a.mul(b).sub(c)
}

/// `c + i * b`
#[inline(always)]
pub fn vfmai<V: SimdVector>(b: V, c: V) -> V {
    c.add(vbyi(b))
}

/// `c - i * b`
#[inline(always)]
pub fn vfnmsi<V: SimdVector>(b: V, c: V) -> V {
    c.sub(vbyi(b))
}

/// `conj(b) + c`
#[inline(always)]
pub fn vfmaconj<V: SimdVector>(b: V, c: V) -> V {
    vconj(b).add(c)
}

/// `conj(b) - c`
#[inline(always)]
pub fn vfmsconj<V: SimdVector>(b: V, c: V) -> V {
    vconj(b).sub(c)
}

/// `c - conj(b)`
#[inline(always)]
pub fn vfnmsconj<V: SimdVector>(b: V, c: V) -> V {
    c.sub(vconj(b))
}
