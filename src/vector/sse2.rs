//! SSE/SSE2 backend
//!
//! Single precision uses `__m128` (two complex numbers per register), double precision uses
//! `__m128d` (one complex number per register). The half-register accesses of the strided
//! single-precision loads and stores go through 64-bit integer moves, which have no alignment
//! requirement and never touch the other half of the register.
#![allow(unused_unsafe)] // intrinsics are safe to call on newer compilers with SSE2 enabled

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::SimdVector;
use crate::constants::{CONJ_MASK_F32, CONJ_MASK_F64};

/// Builds the immediate of `shufps` from the source lane of each destination lane.
const fn shufval(fp0: i32, fp1: i32, fp2: i32, fp3: i32) -> i32 {
    (fp3 << 6) | (fp2 << 4) | (fp1 << 2) | fp0
}

const FLIP_RI_32: i32 = shufval(1, 0, 3, 2);
const DUP_RE_32: i32 = shufval(0, 0, 2, 2);
const DUP_IM_32: i32 = shufval(1, 1, 3, 3);

/// Two single-precision complex numbers in an `__m128`.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Sse2F32(pub __m128);

/// One double-precision complex number in an `__m128d`.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Sse2F64(pub __m128d);

impl SimdVector for Sse2F32 {
    type Scalar = f32;
    const SIMD_SUFFIX: &'static str = "_sse2";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    fn from_slice(lanes: &[f32]) -> Self {
        assert!(lanes.len() >= 4);
        Self(unsafe { _mm_loadu_ps(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn write_to_slice(self, out: &mut [f32]) {
        assert!(out.len() >= 4);
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { _mm_xor_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn unpack_lo(self, rhs: Self) -> Self {
        Self(unsafe { _mm_unpacklo_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn unpack_hi(self, rhs: Self) -> Self {
        Self(unsafe { _mm_unpackhi_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn flip_ri(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<FLIP_RI_32>(self.0, self.0) })
    }

    #[inline(always)]
    fn dup_re(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<DUP_RE_32>(self.0, self.0) })
    }

    #[inline(always)]
    fn dup_im(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<DUP_IM_32>(self.0, self.0) })
    }

    #[inline(always)]
    fn conj_mask() -> Self {
        Self(unsafe { _mm_load_ps(CONJ_MASK_F32.0.as_ptr()) })
    }

    #[inline(always)]
    unsafe fn lda(x: *const f32, _ivs: isize, _aligned_like: *const f32) -> Self {
        Self(_mm_load_ps(x))
    }

    #[inline(always)]
    unsafe fn sta(x: *mut f32, v: Self, _ovs: isize, _aligned_like: *const f32) {
        _mm_store_ps(x, v.0)
    }

    #[inline(always)]
    unsafe fn ld(x: *const f32, ivs: isize, _aligned_like: *const f32) -> Self {
        let lo = _mm_loadl_epi64(x as *const __m128i);
        let hi = _mm_loadl_epi64(x.offset(ivs) as *const __m128i);
        Self(_mm_castsi128_ps(_mm_unpacklo_epi64(lo, hi)))
    }

    #[inline(always)]
    unsafe fn st(x: *mut f32, v: Self, ovs: isize, _aligned_like: *const f32) {
        let bits = _mm_castps_si128(v.0);
        _mm_storel_epi64(
            x.offset(ovs) as *mut __m128i,
            _mm_unpackhi_epi64(bits, bits),
        );
        _mm_storel_epi64(x as *mut __m128i, bits);
    }

    #[inline(always)]
    unsafe fn store_packed4(x: *mut f32, v: [Self; 4], ovs: isize) {
        let [v0, v1, v2, v3] = v;
        let t0 = _mm_unpacklo_ps(v0.0, v2.0);
        let t1 = _mm_unpackhi_ps(v0.0, v2.0);
        let t2 = _mm_unpacklo_ps(v1.0, v3.0);
        let t3 = _mm_unpackhi_ps(v1.0, v3.0);
        _mm_store_ps(x, _mm_unpacklo_ps(t0, t2));
        _mm_store_ps(x.offset(ovs), _mm_unpackhi_ps(t0, t2));
        _mm_store_ps(x.offset(2 * ovs), _mm_unpacklo_ps(t1, t3));
        _mm_store_ps(x.offset(3 * ovs), _mm_unpackhi_ps(t1, t3));
    }
}

impl SimdVector for Sse2F64 {
    type Scalar = f64;
    const SIMD_SUFFIX: &'static str = "_sse2";

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self(unsafe { _mm_set1_pd(value) })
    }

    #[inline(always)]
    fn from_slice(lanes: &[f64]) -> Self {
        assert!(lanes.len() >= 2);
        Self(unsafe { _mm_loadu_pd(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn write_to_slice(self, out: &mut [f64]) {
        assert!(out.len() >= 2);
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm_sub_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm_mul_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { _mm_xor_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn unpack_lo(self, rhs: Self) -> Self {
        Self(unsafe { _mm_unpacklo_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn unpack_hi(self, rhs: Self) -> Self {
        Self(unsafe { _mm_unpackhi_pd(self.0, rhs.0) })
    }

    #[inline(always)]
    fn flip_ri(self) -> Self {
        Self(unsafe { _mm_shuffle_pd::<1>(self.0, self.0) })
    }

    #[inline(always)]
    fn dup_re(self) -> Self {
        Self(unsafe { _mm_unpacklo_pd(self.0, self.0) })
    }

    #[inline(always)]
    fn dup_im(self) -> Self {
        Self(unsafe { _mm_unpackhi_pd(self.0, self.0) })
    }

    #[inline(always)]
    fn conj_mask() -> Self {
        Self(unsafe { _mm_load_pd(CONJ_MASK_F64.0.as_ptr()) })
    }

    #[inline(always)]
    unsafe fn lda(x: *const f64, _ivs: isize, _aligned_like: *const f64) -> Self {
        Self(_mm_load_pd(x))
    }

    #[inline(always)]
    unsafe fn sta(x: *mut f64, v: Self, _ovs: isize, _aligned_like: *const f64) {
        _mm_store_pd(x, v.0)
    }

    // One complex number fills the register, so the stride never comes into play.
    #[inline(always)]
    unsafe fn ld(x: *const f64, _ivs: isize, _aligned_like: *const f64) -> Self {
        Self(_mm_loadu_pd(x))
    }

    #[inline(always)]
    unsafe fn st(x: *mut f64, v: Self, _ovs: isize, _aligned_like: *const f64) {
        _mm_storeu_pd(x, v.0)
    }

    #[inline(always)]
    unsafe fn store_packed4(x: *mut f64, v: [Self; 4], ovs: isize) {
        for (k, vk) in v.iter().enumerate() {
            let xk = x.add(k);
            _mm_storel_pd(xk, vk.0);
            _mm_storeh_pd(xk.offset(ovs), vk.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_immediates() {
        assert_eq!(FLIP_RI_32, 0xB1);
        assert_eq!(DUP_RE_32, 0xA0);
        assert_eq!(DUP_IM_32, 0xF5);
    }

    #[test]
    fn lane_order_f32() {
        let v = Sse2F32::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let mut out = [0.0; 4];

        v.flip_ri().write_to_slice(&mut out);
        assert_eq!(out, [2.0, 1.0, 4.0, 3.0]);

        v.dup_re().write_to_slice(&mut out);
        assert_eq!(out, [1.0, 1.0, 3.0, 3.0]);

        v.dup_im().write_to_slice(&mut out);
        assert_eq!(out, [2.0, 2.0, 4.0, 4.0]);

        let w = Sse2F32::from_slice(&[5.0, 6.0, 7.0, 8.0]);
        v.unpack_lo(w).write_to_slice(&mut out);
        assert_eq!(out, [1.0, 5.0, 2.0, 6.0]);
        v.unpack_hi(w).write_to_slice(&mut out);
        assert_eq!(out, [3.0, 7.0, 4.0, 8.0]);
    }

    #[test]
    fn lane_order_f64() {
        let v = Sse2F64::from_slice(&[1.0, 2.0]);
        let w = Sse2F64::from_slice(&[3.0, 4.0]);
        let mut out = [0.0; 2];

        v.flip_ri().write_to_slice(&mut out);
        assert_eq!(out, [2.0, 1.0]);
        v.dup_re().write_to_slice(&mut out);
        assert_eq!(out, [1.0, 1.0]);
        v.dup_im().write_to_slice(&mut out);
        assert_eq!(out, [2.0, 2.0]);
        v.unpack_lo(w).write_to_slice(&mut out);
        assert_eq!(out, [1.0, 3.0]);
        v.unpack_hi(w).write_to_slice(&mut out);
        assert_eq!(out, [2.0, 4.0]);
    }

    #[test]
    fn strided_store_writes_low_half_last() {
        let mut buf = [0.0_f32; 4];
        let v = Sse2F32::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        unsafe { Sse2F32::st(buf.as_mut_ptr(), v, 0, buf.as_ptr()) };
        assert_eq!(&buf[..2], &[1.0, 2.0]);
    }
}
