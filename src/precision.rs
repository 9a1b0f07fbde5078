//! Precision parameterization
//!
//! Everything that depends on the scalar element type lives behind [`Precision`]: the number of
//! complex values per 128-bit register, the alignment the fast paths require, the sign mask used
//! for conjugation and the suffix used to mangle per-precision symbol names.
//!
//! The trait is implemented for `f32` and `f64` only. Extended precision has no 128-bit vector
//! representation and is rejected at build time.
use core::fmt::{Debug, Display};

use num_traits::Float;

use crate::constants::{CONJ_MASK_F32, CONJ_MASK_F64};
use crate::vector::{Native32, Native64, SimdVector};

/// Width of the vector registers this layer targets, in bytes.
pub const VECTOR_BYTES: usize = 16;

/// A scalar element type the vector layer can be instantiated with.
pub trait Precision:
    Float + Default + Debug + Display + Send + Sync + 'static
{
    /// The vector type selected for this precision by the build configuration.
    type Native: SimdVector<Scalar = Self>;

    /// Complex numbers per vector register.
    const VL: usize;

    /// Scalars per vector register.
    const LANES: usize = 2 * Self::VL;

    /// Suffix appended to per-precision names (`s` for single, `d` for double).
    const SUFFIX: &'static str;

    /// Alignment, in bytes, required by [`ld`](crate::memory::ld) and [`st`](crate::memory::st).
    const ALIGNMENT: usize;

    /// Alignment, in bytes, required by [`lda`](crate::memory::lda) and
    /// [`sta`](crate::memory::sta).
    const ALIGNMENTA: usize = VECTOR_BYTES;

    /// Bitwise XOR of the IEEE-754 representations.
    fn xor_bits(self, mask: Self) -> Self;

    /// Lanes of the process-wide conjugation mask: `+0` on real lanes, `-0` on imaginary lanes.
    fn conj_mask() -> &'static [Self];

    /// Relative tolerance within which the twiddle storage formats must agree.
    fn twiddle_tolerance() -> Self {
        Self::epsilon() * Self::from(8.0).unwrap()
    }

    /// Appends the precision suffix to `name`.
    fn mangle(name: &str) -> String {
        format!("{name}{}", Self::SUFFIX)
    }
}

macro_rules! impl_precision_for {
    ($precision:ty, $native:ty, $vl:expr, $suffix:expr, $alignment:expr, $mask:ident) => {
        impl Precision for $precision {
            type Native = $native;

            const VL: usize = $vl;
            const SUFFIX: &'static str = $suffix;
            const ALIGNMENT: usize = $alignment;

            #[inline(always)]
            fn xor_bits(self, mask: Self) -> Self {
                <$precision>::from_bits(self.to_bits() ^ mask.to_bits())
            }

            #[inline(always)]
            fn conj_mask() -> &'static [Self] {
                &$mask.0
            }
        }
    };
}

impl_precision_for!(f32, Native32, 2, "s", 8, CONJ_MASK_F32);
impl_precision_for!(f64, Native64, 1, "d", 16, CONJ_MASK_F64);
