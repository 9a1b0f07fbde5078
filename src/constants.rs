//! Read-only constant tables shared by every backend.
//!
//! The conjugation masks are plain `static` items, so they are fully initialised before any code
//! runs and every thread observes the same bytes without synchronization.

/// Wrapper forcing the alignment of a vector register.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy)]
pub struct Aligned<T>(pub T);

/// Sign bits of the imaginary lanes, single precision.
pub static CONJ_MASK_F32: Aligned<[f32; 4]> = Aligned([0.0, -0.0, 0.0, -0.0]);

/// Sign bits of the imaginary lanes, double precision.
pub static CONJ_MASK_F64: Aligned<[f64; 2]> = Aligned([0.0, -0.0]);
