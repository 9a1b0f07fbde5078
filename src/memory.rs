//! Vector loads and stores
//!
//! Thin, contract-checking wrappers around the backend memory primitives, plus the addressability
//! predicates a code generator must consult before emitting a vectorized access.
//!
//! The predicates are pure functions of the stride (or pointer) and the precision. A stride that
//! fails them must be handled with scalar code by the caller; the wrappers only re-check the
//! contract in debug builds.
use core::mem::size_of;

use crate::precision::Precision;
use crate::vector::SimdVector;

/// `true` if `x` is aligned for [`ld`]/[`st`].
#[inline(always)]
pub fn is_aligned<T: Precision>(x: *const T) -> bool {
    x as usize % T::ALIGNMENT == 0
}

/// `true` if `x` is aligned for [`lda`]/[`sta`].
#[inline(always)]
pub fn is_aligned_a<T: Precision>(x: *const T) -> bool {
    x as usize % T::ALIGNMENTA == 0
}

/// `true` if a stride of `x` scalars keeps every complex number aligned for [`ld`]/[`st`].
#[inline(always)]
pub fn stride_ok<T: Precision>(x: isize) -> bool {
    (x * size_of::<T>() as isize) % T::ALIGNMENT as isize == 0
}

/// `true` if a stride of `x` scalars keeps every access aligned for [`lda`]/[`sta`].
#[inline(always)]
pub fn stride_ok_aligned<T: Precision>(x: isize) -> bool {
    (x * size_of::<T>() as isize) % T::ALIGNMENTA as isize == 0
}

/// Stride test for the distance between successive vectors of a loop.
#[inline(always)]
pub fn vstride_ok<T: Precision>(x: isize) -> bool {
    stride_ok::<T>(x)
}

/// `true` if successive vectors `x` scalars apart can use the aligned forms.
///
/// With one complex number per register any stride works. With two, the pair must be contiguous.
#[inline(always)]
pub fn vstride_ok_aligned<T: Precision>(x: isize) -> bool {
    T::VL == 1 || x == 2
}

/// Stride test for the paired stores of [`store_packed2`].
#[inline(always)]
pub fn stride_ok_pair<T: Precision>(x: isize) -> bool {
    stride_ok::<T>(x)
}

/// Loads a whole register from a vector-aligned address.
///
/// # Safety
///
/// See [`SimdVector::lda`].
#[inline(always)]
pub unsafe fn lda<V: SimdVector>(
    x: *const V::Scalar,
    ivs: isize,
    aligned_like: *const V::Scalar,
) -> V {
    debug_assert!(is_aligned_a(x), "lda: {x:p} is not vector aligned");
    V::lda(x, ivs, aligned_like)
}

/// Stores a whole register at a vector-aligned address.
///
/// # Safety
///
/// See [`SimdVector::sta`].
#[inline(always)]
pub unsafe fn sta<V: SimdVector>(
    x: *mut V::Scalar,
    v: V,
    ovs: isize,
    aligned_like: *const V::Scalar,
) {
    debug_assert!(is_aligned_a(x as *const V::Scalar), "sta: {x:p} is not vector aligned");
    V::sta(x, v, ovs, aligned_like)
}

/// Loads complex number `c` of the result from `x + c * ivs`.
///
/// # Safety
///
/// See [`SimdVector::ld`].
#[inline(always)]
pub unsafe fn ld<V: SimdVector>(x: *const V::Scalar, ivs: isize, aligned_like: *const V::Scalar) -> V {
    debug_assert!(is_aligned(x), "ld: {x:p} is misaligned");
    debug_assert!(V::VL == 1 || stride_ok::<V::Scalar>(ivs), "ld: bad stride {ivs}");
    V::ld(x, ivs, aligned_like)
}

/// Stores complex number `c` of `v` at `x + c * ovs`.
///
/// # Safety
///
/// See [`SimdVector::st`].
#[inline(always)]
pub unsafe fn st<V: SimdVector>(x: *mut V::Scalar, v: V, ovs: isize, aligned_like: *const V::Scalar) {
    debug_assert!(is_aligned(x as *const V::Scalar), "st: {x:p} is misaligned");
    debug_assert!(V::VL == 1 || stride_ok::<V::Scalar>(ovs), "st: bad stride {ovs}");
    V::st(x, v, ovs, aligned_like)
}

/// Stores the two halves of a packed pair: complex number `c` of `v` lands at `x + c * ovs`.
///
/// With one complex number per register the store is a single aligned write. With two, it is the
/// strided [`st`], so the pair is scattered to `x` and `x + ovs`.
///
/// # Safety
///
/// See [`SimdVector::sta`] for double precision and [`SimdVector::st`] for single precision.
#[inline(always)]
pub unsafe fn store_packed2<V: SimdVector>(x: *mut V::Scalar, v: V, ovs: isize) {
    if V::VL == 1 {
        sta(x, v, ovs, x)
    } else {
        st(x, v, ovs, x)
    }
}

/// Transposes four registers into memory: lane `j` of `v[k]` lands at `x + k + j * ovs`.
///
/// Single precision performs two rounds of unpacking (a 4x4 transpose) and four aligned row
/// stores. Double precision splits each register into its low and high lane.
///
/// # Safety
///
/// See [`SimdVector::store_packed4`].
#[inline(always)]
pub unsafe fn store_packed4<V: SimdVector>(x: *mut V::Scalar, v: [V; 4], ovs: isize) {
    debug_assert!(
        V::VL == 1 || (is_aligned_a(x as *const V::Scalar) && stride_ok_aligned::<V::Scalar>(ovs)),
        "store_packed4: rows of {x:p} with stride {ovs} are not vector aligned"
    );
    V::store_packed4(x, v, ovs)
}

#[cfg(test)]
mod tests {
    use num_traits::{NumCast, Zero};

    use super::*;
    use crate::constants::Aligned;
    use crate::vector::{PortableF32, PortableF64};

    fn lanes<V: SimdVector>(v: V) -> Vec<V::Scalar> {
        let mut out = vec![<V::Scalar as Zero>::zero(); V::LANES];
        v.write_to_slice(&mut out);
        out
    }

    fn ramp<T: Precision, const N: usize>(scale: f64, shift: f64) -> Aligned<[T; N]> {
        Aligned(core::array::from_fn(|i| <T as NumCast>::from(i as f64 * scale + shift).unwrap()))
    }

    #[test]
    fn addressability_predicates_f64() {
        assert!(stride_ok::<f64>(2));
        assert!(stride_ok::<f64>(-4));
        assert!(!stride_ok::<f64>(1));
        assert!(!stride_ok::<f64>(3));
        assert!(stride_ok_aligned::<f64>(2));
        assert!(vstride_ok_aligned::<f64>(7));
        assert!(stride_ok_pair::<f64>(6));
        assert!(vstride_ok::<f64>(0));
    }

    #[test]
    fn addressability_predicates_f32() {
        assert!(stride_ok::<f32>(2));
        assert!(stride_ok::<f32>(6));
        assert!(!stride_ok::<f32>(1));
        assert!(!stride_ok::<f32>(3));
        assert!(stride_ok_aligned::<f32>(4));
        assert!(!stride_ok_aligned::<f32>(2));
        assert!(vstride_ok_aligned::<f32>(2));
        assert!(!vstride_ok_aligned::<f32>(4));
    }

    #[test]
    fn pointer_alignment() {
        let buf = Aligned([0.0_f32; 8]);
        let p = buf.0.as_ptr();
        assert!(is_aligned_a(p));
        assert!(is_aligned(p.wrapping_add(2)));
        assert!(!is_aligned_a(p.wrapping_add(2)));
        assert!(!is_aligned(p.wrapping_add(1)));
    }

    fn round_trip<V: SimdVector>(buf: &mut [V::Scalar], offset: usize, stride: isize) {
        let before = buf.to_vec();
        unsafe {
            let x = buf.as_mut_ptr().add(offset);
            let v: V = ld(x, stride, x);
            st(x, v, stride, x);
        }
        assert_eq!(buf, &before[..], "offset {offset}, stride {stride}");
    }

    fn round_trip_all<V: SimdVector>() {
        let mut buf = ramp::<V::Scalar, 64>(0.37, -5.0);

        for stride in [2_isize, 4, 6, 10, 16] {
            if V::VL > 1 && !stride_ok::<V::Scalar>(stride) {
                continue;
            }
            for offset in (0..16).step_by(2) {
                round_trip::<V>(&mut buf.0, offset, stride);
            }
        }

        let before = buf.0;
        unsafe {
            let x = buf.0.as_mut_ptr();
            let v: V = lda(x, 0, x);
            sta(x, v, 0, x);
        }
        assert_eq!(before, buf.0);
    }

    #[test]
    fn round_trip_portable() {
        round_trip_all::<PortableF32>();
        round_trip_all::<PortableF64>();
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
    #[test]
    fn round_trip_sse2() {
        use crate::vector::{Sse2F32, Sse2F64};
        round_trip_all::<Sse2F32>();
        round_trip_all::<Sse2F64>();
    }

    fn strided_load_layout<V: SimdVector>() {
        let data = ramp::<V::Scalar, 32>(1.0, 0.0);
        let v: V = unsafe { ld(data.0.as_ptr().add(4), 10, data.0.as_ptr()) };
        let expected: Vec<V::Scalar> = (0..V::VL)
            .flat_map(|c| [4 + 10 * c, 5 + 10 * c])
            .map(|i| <V::Scalar as NumCast>::from(i).unwrap())
            .collect();
        assert_eq!(lanes(v), expected);
    }

    #[test]
    fn strided_loads() {
        strided_load_layout::<PortableF32>();
        strided_load_layout::<PortableF64>();
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
        {
            strided_load_layout::<crate::vector::Sse2F32>();
            strided_load_layout::<crate::vector::Sse2F64>();
        }
    }

    fn strided_store_layout<V: SimdVector>() {
        let mut out = Aligned([<V::Scalar as Zero>::zero(); 32]);
        let src = ramp::<V::Scalar, 4>(1.0, 1.0);
        let v = V::from_slice(&src.0);
        unsafe { st(out.0.as_mut_ptr().add(2), v, 12, out.0.as_ptr()) };

        for c in 0..V::VL {
            assert_eq!(out.0[2 + 12 * c], src.0[2 * c]);
            assert_eq!(out.0[3 + 12 * c], src.0[2 * c + 1]);
        }
        let written = 2 * V::VL;
        assert_eq!(out.0.iter().filter(|x| !x.is_zero()).count(), written);
    }

    #[test]
    fn strided_stores() {
        strided_store_layout::<PortableF32>();
        strided_store_layout::<PortableF64>();
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
        {
            strided_store_layout::<crate::vector::Sse2F32>();
            strided_store_layout::<crate::vector::Sse2F64>();
        }
    }

    fn packed4_layout<V: SimdVector>() {
        let ovs: isize = 8;
        let mut out = Aligned([<V::Scalar as Zero>::zero(); 32]);
        let regs: [V; 4] = core::array::from_fn(|k| {
            let lanes: Vec<V::Scalar> = (0..V::LANES)
                .map(|j| <V::Scalar as NumCast>::from(100 * k + j).unwrap())
                .collect();
            V::from_slice(&lanes)
        });

        unsafe { store_packed4(out.0.as_mut_ptr(), regs, ovs) };

        for k in 0..4 {
            for j in 0..V::LANES {
                assert_eq!(
                    out.0[k + j * ovs as usize],
                    <V::Scalar as NumCast>::from(100 * k + j).unwrap(),
                    "lane {j} of register {k}"
                );
            }
        }
    }

    #[test]
    fn packed4_transposes() {
        packed4_layout::<PortableF32>();
        packed4_layout::<PortableF64>();
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
        {
            packed4_layout::<crate::vector::Sse2F32>();
            packed4_layout::<crate::vector::Sse2F64>();
        }
    }

    #[test]
    fn packed2_scatters_single_precision() {
        let mut out = Aligned([0.0_f32; 8]);
        let v = PortableF32::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        unsafe { store_packed2(out.0.as_mut_ptr(), v, 6) };
        assert_eq!(&out.0[..2], &[1.0, 2.0]);
        assert_eq!(&out.0[6..8], &[3.0, 4.0]);
        assert!(out.0[2..6].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn packed2_double_precision_is_one_store() {
        let mut out = Aligned([0.0_f64; 4]);
        let v = PortableF64::from_slice(&[1.0, 2.0]);
        unsafe { store_packed2(out.0.as_mut_ptr(), v, 2) };
        assert_eq!(out.0, [1.0, 2.0, 0.0, 0.0]);
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
    #[test]
    fn packed2_sse2_matches_portable() {
        use crate::vector::{Sse2F32, Sse2F64};

        let mut sse = Aligned([0.0_f32; 12]);
        let mut portable = Aligned([0.0_f32; 12]);
        let lanes = [1.0, -2.0, 3.5, 4.0];
        unsafe {
            store_packed2(sse.0.as_mut_ptr(), Sse2F32::from_slice(&lanes), 10);
            store_packed2(portable.0.as_mut_ptr(), PortableF32::from_slice(&lanes), 10);
        }
        assert_eq!(sse.0, portable.0);
        assert_eq!(&sse.0[10..12], &[3.5, 4.0]);

        let mut out = Aligned([0.0_f64; 2]);
        unsafe { store_packed2(out.0.as_mut_ptr(), Sse2F64::from_slice(&[5.0, 6.0]), 8) };
        assert_eq!(out.0, [5.0, 6.0]);
    }
}
