//! Twiddle application
//!
//! Each pair of routines decodes one [`TwiddleFormat`](crate::twiddles::TwiddleFormat) at `t` and
//! multiplies the data operand by the twiddle (`bytw*`) or by its conjugate (`bytwj*`). `t` must
//! point at the start of the twiddle's slot for the current vector step and be vector aligned.
//!
//! | routines             | format       | scalars read at `t` |
//! |----------------------|--------------|---------------------|
//! | [`bytw1`], [`bytwj1`] | `Compact`    | `2 * VL`            |
//! | [`bytw2`], [`bytwj2`] | `Expanded`   | `4 * VL`            |
//! | [`bytw3`], [`bytwj3`] | `PerComplex` | `2 * VL`            |
//! | [`bytws`], [`bytwjs`] | `Split`      | `4 * VL`            |
use super::complex::{vzmul, vzmulj};
use super::rotate::{flip_ri, vbyi};
use crate::memory::lda;
use crate::vector::SimdVector;

/// Unpacks a compact twiddle into duplicated cosines and duplicated sines.
///
/// # Safety
///
/// `t..t + LANES` must be readable and vector aligned.
#[inline(always)]
unsafe fn compact_parts<V: SimdVector>(t: *const V::Scalar) -> (V, V) {
    let tx: V = lda(t, 0, t);
    (tx.unpack_lo(tx), tx.unpack_hi(tx))
}

/// Multiplies `sr` by the compact twiddle at `t`.
///
/// # Safety
///
/// `t..t + LANES` must be readable and vector aligned.
#[inline(always)]
pub unsafe fn bytw1<V: SimdVector>(t: *const V::Scalar, sr: V) -> V {
    let (tr, ti) = compact_parts::<V>(t);
    tr.mul(sr).add(ti.mul(vbyi(sr)))
}

/// Multiplies `sr` by the conjugate of the compact twiddle at `t`.
///
/// # Safety
///
/// `t..t + LANES` must be readable and vector aligned.
#[inline(always)]
pub unsafe fn bytwj1<V: SimdVector>(t: *const V::Scalar, sr: V) -> V {
    let (tr, ti) = compact_parts::<V>(t);
    tr.mul(sr).sub(ti.mul(vbyi(sr)))
}

/// Multiplies `sr` by the expanded twiddle at `t`.
///
/// The sines are stored pre-signed, so the product is two multiplies and one add.
///
/// # Safety
///
/// `t..t + 2 * LANES` must be readable and `t` vector aligned.
#[inline(always)]
pub unsafe fn bytw2<V: SimdVector>(t: *const V::Scalar, sr: V) -> V {
    let tr: V = lda(t, 0, t);
    let ti: V = lda(t.add(V::LANES), 0, t);
    tr.mul(sr).add(ti.mul(flip_ri(sr)))
}

/// Multiplies `sr` by the conjugate of the expanded twiddle at `t`.
///
/// # Safety
///
/// `t..t + 2 * LANES` must be readable and `t` vector aligned.
#[inline(always)]
pub unsafe fn bytwj2<V: SimdVector>(t: *const V::Scalar, sr: V) -> V {
    let tr: V = lda(t, 0, t);
    let ti: V = lda(t.add(V::LANES), 0, t);
    tr.mul(sr).sub(ti.mul(flip_ri(sr)))
}

/// Multiplies `sr` by the per-complex twiddle at `t`.
///
/// # Safety
///
/// `t..t + LANES` must be readable and vector aligned.
#[inline(always)]
pub unsafe fn bytw3<V: SimdVector>(t: *const V::Scalar, sr: V) -> V {
    vzmul(lda(t, 0, t), sr)
}

/// Multiplies `sr` by the conjugate of the per-complex twiddle at `t`.
///
/// # Safety
///
/// `t..t + LANES` must be readable and vector aligned.
#[inline(always)]
pub unsafe fn bytwj3<V: SimdVector>(t: *const V::Scalar, sr: V) -> V {
    vzmulj(lda(t, 0, t), sr)
}

/// Multiplies split data by the split twiddle at `t`.
///
/// `re` and `im` hold the real and imaginary parts of `LANES` independent complex numbers. Returns
/// the new `(re, im)`.
///
/// # Safety
///
/// `t..t + 2 * LANES` must be readable and `t` vector aligned.
#[inline(always)]
pub unsafe fn bytws<V: SimdVector>(t: *const V::Scalar, re: V, im: V) -> (V, V) {
    let c: V = lda(t, 0, t);
    let s: V = lda(t.add(V::LANES), 0, t);
    (c.mul(re).sub(s.mul(im)), c.mul(im).add(s.mul(re)))
}

/// Multiplies split data by the conjugate of the split twiddle at `t`.
///
/// # Safety
///
/// `t..t + 2 * LANES` must be readable and `t` vector aligned.
#[inline(always)]
pub unsafe fn bytwjs<V: SimdVector>(t: *const V::Scalar, re: V, im: V) -> (V, V) {
    let c: V = lda(t, 0, t);
    let s: V = lda(t.add(V::LANES), 0, t);
    (c.mul(re).add(s.mul(im)), c.mul(im).sub(s.mul(re)))
}
