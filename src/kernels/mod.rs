//! Complex Arithmetic Kernels
//!
//! This module contains the complex arithmetic that generated codelets are built from. Every
//! function is generic over [`SimdVector`](crate::vector::SimdVector), so the same source serves
//! both precisions and both backends. The backend is picked at build time.
//!
//! ## Organization
//!
//! - `rotate`: Conjugation and multiplication by `i`
//! - `complex`: Complex products with a constant factor
//! - `twiddle`: Decoding of the twiddle table formats and multiplication by the twiddle
//! - `fma`: Multiply-add shapes, emulated with separate roundings

pub mod complex;
pub mod fma;
pub mod rotate;
pub mod twiddle;
