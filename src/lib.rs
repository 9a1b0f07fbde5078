//! Complex arithmetic on 128-bit vector registers
//!
//! This crate is the layer that generated FFT codelets are written against. It provides vector
//! loads and stores with strides, conjugation and rotation by `i`, complex products, the decoding
//! of twiddle tables and multiply-add shapes, generic over the scalar precision and the vector
//! backend.
//!
//! The precision ([`R`]) and the vector type ([`V`]) of a build are chosen with cargo features:
//!
//! - `single`: `f32` with two complex numbers per register. Without it, `f64` with one.
//! - `sse2` (default): SSE2 intrinsics. Requires an x86/x86_64 target with SSE2 enabled.
//! - `portable`: plain scalar arrays. Takes precedence over `sse2`.

#[cfg(any(feature = "long-double", feature = "quad"))]
compile_error!("extended precision has no 128-bit vector representation; use `single` or the default double precision");

#[cfg(all(
    feature = "sse2",
    not(feature = "portable"),
    not(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))
))]
compile_error!("the `sse2` backend needs an x86/x86_64 target with SSE2 enabled; build with the `portable` feature instead");

pub mod batch;
pub mod constants;
pub mod kernels;
pub mod memory;
pub mod precision;
pub mod twiddles;
#[cfg(feature = "complex-nums")]
pub mod utils;
pub mod vector;

pub use precision::Precision;
pub use twiddles::{Direction, TwInstr, TwOp, TwiddleFormat};
pub use vector::{codelet_symbol, SimdVector};

/// Scalar type of this build.
#[cfg(feature = "single")]
pub type R = f32;

/// Scalar type of this build.
#[cfg(not(feature = "single"))]
pub type R = f64;

/// Vector type of this build.
pub type V = <R as Precision>::Native;

/// Complex numbers per vector register in this build.
pub const VL: usize = <R as Precision>::VL;
