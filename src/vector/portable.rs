//! Portable backend
//!
//! A register is a plain `[T; N]` with `N = 2 * VL`. Every operation is written lane by lane so
//! the results match the intrinsics backend bit for bit: the same IEEE-754 operations happen in
//! the same order on the same lanes.
use super::SimdVector;
use crate::precision::Precision;

/// `N` scalars forming one 128-bit register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(16))]
pub struct Portable<T, const N: usize>(pub [T; N]);

/// Two single-precision complex numbers.
pub type PortableF32 = Portable<f32, 4>;

/// One double-precision complex number.
pub type PortableF64 = Portable<f64, 2>;

impl<T: Precision, const N: usize> Portable<T, N> {
    #[inline(always)]
    fn map2(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = self.0;
        out.iter_mut()
            .zip(rhs.0.iter())
            .for_each(|(a, b)| *a = f(*a, *b));
        Self(out)
    }

    #[inline(always)]
    fn from_fn(f: impl Fn(usize) -> T) -> Self {
        let mut out = [T::zero(); N];
        out.iter_mut().enumerate().for_each(|(i, x)| *x = f(i));
        Self(out)
    }
}

macro_rules! impl_portable_for {
    ($precision:ty, $lanes:literal) => {
        impl SimdVector for Portable<$precision, $lanes> {
            type Scalar = $precision;
            const SIMD_SUFFIX: &'static str = "_portable";

            #[inline(always)]
            fn splat(value: $precision) -> Self {
                Self([value; $lanes])
            }

            #[inline(always)]
            fn from_slice(lanes: &[$precision]) -> Self {
                assert!(lanes.len() >= $lanes);
                let mut out = [0.0; $lanes];
                out.copy_from_slice(&lanes[..$lanes]);
                Self(out)
            }

            #[inline(always)]
            fn write_to_slice(self, out: &mut [$precision]) {
                assert!(out.len() >= $lanes);
                out[..$lanes].copy_from_slice(&self.0);
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a + b)
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a - b)
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a * b)
            }

            #[inline(always)]
            fn xor(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a.xor_bits(b))
            }

            #[inline(always)]
            fn unpack_lo(self, rhs: Self) -> Self {
                Self::from_fn(|i| if i % 2 == 0 { self.0[i / 2] } else { rhs.0[i / 2] })
            }

            #[inline(always)]
            fn unpack_hi(self, rhs: Self) -> Self {
                const HALF: usize = $lanes / 2;
                Self::from_fn(|i| {
                    if i % 2 == 0 {
                        self.0[HALF + i / 2]
                    } else {
                        rhs.0[HALF + i / 2]
                    }
                })
            }

            #[inline(always)]
            fn flip_ri(self) -> Self {
                Self::from_fn(|i| self.0[i ^ 1])
            }

            #[inline(always)]
            fn dup_re(self) -> Self {
                Self::from_fn(|i| self.0[i & !1])
            }

            #[inline(always)]
            fn dup_im(self) -> Self {
                Self::from_fn(|i| self.0[i | 1])
            }

            #[inline(always)]
            fn conj_mask() -> Self {
                Self::from_slice(<$precision as Precision>::conj_mask())
            }

            #[inline(always)]
            unsafe fn lda(
                x: *const $precision,
                _ivs: isize,
                _aligned_like: *const $precision,
            ) -> Self {
                Self(core::ptr::read(x as *const [$precision; $lanes]))
            }

            #[inline(always)]
            unsafe fn sta(
                x: *mut $precision,
                v: Self,
                _ovs: isize,
                _aligned_like: *const $precision,
            ) {
                core::ptr::write(x as *mut [$precision; $lanes], v.0)
            }

            #[inline(always)]
            unsafe fn ld(
                x: *const $precision,
                ivs: isize,
                _aligned_like: *const $precision,
            ) -> Self {
                let mut out = [0.0; $lanes];
                for (c, pair) in out.chunks_exact_mut(2).enumerate() {
                    let src = x.offset(c as isize * ivs);
                    pair[0] = *src;
                    pair[1] = *src.add(1);
                }
                Self(out)
            }

            #[inline(always)]
            unsafe fn st(
                x: *mut $precision,
                v: Self,
                ovs: isize,
                _aligned_like: *const $precision,
            ) {
                for (c, pair) in v.0.chunks_exact(2).enumerate().rev() {
                    let dst = x.offset(c as isize * ovs);
                    *dst = pair[0];
                    *dst.add(1) = pair[1];
                }
            }

            #[inline(always)]
            unsafe fn store_packed4(x: *mut $precision, v: [Self; 4], ovs: isize) {
                for (k, vk) in v.iter().enumerate() {
                    for (j, lane) in vk.0.iter().enumerate() {
                        *x.add(k).offset(j as isize * ovs) = *lane;
                    }
                }
            }
        }
    };
}

impl_portable_for!(f32, 4);
impl_portable_for!(f64, 2);
