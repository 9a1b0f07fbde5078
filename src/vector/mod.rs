//! Vector backends
//!
//! [`SimdVector`] is the seam between the generic arithmetic in [`crate::kernels`] and the
//! hardware. A backend provides lane-wise arithmetic, a handful of fixed shuffles and the raw
//! memory primitives. Everything else is built on top of those in a precision- and
//! backend-agnostic way.
//!
//! ## Backends
//!
//! - `sse2`: `__m128`/`__m128d` registers driven by `core::arch` intrinsics. Only compiled for
//!   x86/x86_64 targets with SSE2 enabled.
//! - `portable`: plain scalar arrays. Always compiled, so it can serve as a reference for the
//!   intrinsics backend.
//!
//! Which one becomes [`Native32`]/[`Native64`] is decided by cargo features at build time.
use core::fmt::Debug;

use crate::precision::Precision;

pub mod portable;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub mod sse2;

pub use portable::{PortableF32, PortableF64};
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use sse2::{Sse2F32, Sse2F64};

/// Single-precision vector type selected by the build configuration.
#[cfg(all(
    feature = "sse2",
    not(feature = "portable"),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub type Native32 = Sse2F32;
/// Double-precision vector type selected by the build configuration.
#[cfg(all(
    feature = "sse2",
    not(feature = "portable"),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub type Native64 = Sse2F64;

/// Single-precision vector type selected by the build configuration.
#[cfg(not(all(feature = "sse2", not(feature = "portable"))))]
pub type Native32 = PortableF32;
/// Double-precision vector type selected by the build configuration.
#[cfg(not(all(feature = "sse2", not(feature = "portable"))))]
pub type Native64 = PortableF64;

/// A 128-bit register holding [`SimdVector::VL`] interleaved complex numbers.
///
/// Lane `2c` holds the real part and lane `2c + 1` the imaginary part of complex number `c`.
///
/// # Safety of the memory primitives
///
/// The `unsafe` methods take raw pointers and perform no checks. The caller guarantees that every
/// address they touch is valid for the access, and for the `*a` forms that it is aligned to
/// [`Precision::ALIGNMENTA`]. The `aligned_like` arguments are hints only and are never read.
pub trait SimdVector: Copy + Debug + Send + Sync + 'static {
    /// Scalar element type of every lane.
    type Scalar: Precision;

    /// Complex numbers per register.
    const VL: usize = <Self::Scalar as Precision>::VL;

    /// Scalars per register.
    const LANES: usize = 2 * Self::VL;

    /// Suffix appended to the names of codelets built on this backend.
    const SIMD_SUFFIX: &'static str;

    /// Every lane set to `value`.
    fn splat(value: Self::Scalar) -> Self;

    /// Reads `LANES` scalars from the front of `lanes`.
    ///
    /// # Panics
    ///
    /// Panics if `lanes.len() < Self::LANES`
    fn from_slice(lanes: &[Self::Scalar]) -> Self;

    /// Writes `LANES` scalars to the front of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() < Self::LANES`
    fn write_to_slice(self, out: &mut [Self::Scalar]);

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;

    /// Interleaves the low halves: `[a0, b0, a1, b1]` (`f32`) or `[a0, b0]` (`f64`).
    fn unpack_lo(self, rhs: Self) -> Self;

    /// Interleaves the high halves: `[a2, b2, a3, b3]` (`f32`) or `[a1, b1]` (`f64`).
    fn unpack_hi(self, rhs: Self) -> Self;

    /// Exchanges the real and imaginary lane of every complex number.
    fn flip_ri(self) -> Self;

    /// Copies the real part of every complex number into both of its lanes.
    fn dup_re(self) -> Self;

    /// Copies the imaginary part of every complex number into both of its lanes.
    fn dup_im(self) -> Self;

    /// The global conjugation mask as a register.
    fn conj_mask() -> Self;

    /// Loads one contiguous register from `x`, which must be vector aligned.
    ///
    /// # Safety
    ///
    /// `x..x + LANES` must be readable and `x` aligned to 16 bytes.
    unsafe fn lda(x: *const Self::Scalar, ivs: isize, aligned_like: *const Self::Scalar) -> Self;

    /// Stores one contiguous register at `x`, which must be vector aligned.
    ///
    /// # Safety
    ///
    /// `x..x + LANES` must be writable and `x` aligned to 16 bytes.
    unsafe fn sta(x: *mut Self::Scalar, v: Self, ovs: isize, aligned_like: *const Self::Scalar);

    /// Loads complex number `c` of the register from `x + c * ivs`.
    ///
    /// # Safety
    ///
    /// Every `x + c * ivs .. x + c * ivs + 2` must be readable. Only the alignment of the scalar
    /// is required; [`crate::memory::ld`] additionally checks the codelet layout of
    /// [`Precision::ALIGNMENT`].
    unsafe fn ld(x: *const Self::Scalar, ivs: isize, aligned_like: *const Self::Scalar) -> Self;

    /// Stores complex number `c` of `v` at `x + c * ovs`. The lowest complex number is written
    /// last.
    ///
    /// # Safety
    ///
    /// Every `x + c * ovs .. x + c * ovs + 2` must be writable. Only the alignment of the scalar
    /// is required; [`crate::memory::st`] additionally checks the codelet layout of
    /// [`Precision::ALIGNMENT`].
    unsafe fn st(x: *mut Self::Scalar, v: Self, ovs: isize, aligned_like: *const Self::Scalar);

    /// Scatters four registers: lane `j` of `v[k]` goes to `x + k + j * ovs`.
    ///
    /// # Safety
    ///
    /// Every destination must be writable. For `f32` each row `x + j * ovs` is written with one
    /// aligned store and must be vector aligned.
    unsafe fn store_packed4(x: *mut Self::Scalar, v: [Self; 4], ovs: isize);
}

/// Name of the codelet `name` when compiled for the vector type `V`.
pub fn codelet_symbol<V: SimdVector>(name: &str) -> String {
    format!(
        "{}{}",
        <V::Scalar as Precision>::mangle(name),
        V::SIMD_SUFFIX
    )
}
