//! Utility functions for moving between `num_complex` and interleaved scalar buffers

use bytemuck::{cast_slice, cast_slice_mut};
use num_complex::Complex;
use num_traits::Float;

use crate::precision::Precision;

/// Views a slice of [`Complex`] as the interleaved `re, im, re, im, ...` scalars the slice drivers
/// operate on.
pub fn as_interleaved<T>(signal: &[Complex<T>]) -> &[T]
where
    T: Precision + bytemuck::Pod,
    Complex<T>: bytemuck::Pod,
{
    cast_slice(signal)
}

/// Mutable counterpart of [`as_interleaved`].
pub fn as_interleaved_mut<T>(signal: &mut [Complex<T>]) -> &mut [T]
where
    T: Precision + bytemuck::Pod,
    Complex<T>: bytemuck::Pod,
{
    cast_slice_mut(signal)
}

/// Utility function to combine separate vectors of real and imaginary components
/// into a single vector of Complex Number Structs.
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`.
pub fn combine_re_im<T: Float>(reals: &[T], imags: &[T]) -> Vec<Complex<T>> {
    assert_eq!(reals.len(), imags.len());

    reals
        .iter()
        .zip(imags.iter())
        .map(|(z_re, z_im)| Complex::new(*z_re, *z_im))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{multiply, rotate_by_i};
    use crate::twiddles::Direction;
    use crate::vector::PortableF64;

    #[test]
    fn interleaved_view_order() {
        let signal = combine_re_im(&[1.0_f32, 3.0], &[2.0, 4.0]);
        assert_eq!(as_interleaved(&signal), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn drivers_on_complex_buffers() {
        let mut signal = combine_re_im(&[1.0_f64, 0.0, -2.0, 0.5], &[0.0, 1.0, 3.0, -0.5]);
        let expected: Vec<_> = signal.iter().map(|z| z * Complex::i()).collect();
        rotate_by_i::<PortableF64>(as_interleaved_mut(&mut signal));
        assert_eq!(signal, expected);

        let factors = combine_re_im(&[0.5_f64, 2.0, 1.0, -1.0], &[0.25, 0.0, -1.0, 0.0]);
        let expected: Vec<_> = signal.iter().zip(&factors).map(|(s, f)| s * f).collect();
        multiply::<PortableF64>(
            as_interleaved_mut(&mut signal),
            as_interleaved(&factors),
            Direction::Forward,
        );
        assert_eq!(signal, expected);
    }

    #[test]
    #[should_panic]
    fn combine_mismatched_lengths() {
        let _ = combine_re_im(&[1.0_f64, 2.0], &[1.0]);
    }
}
