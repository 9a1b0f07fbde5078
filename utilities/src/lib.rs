use num_traits::Float;
use rand::{distributions::uniform::SampleUniform, distributions::Uniform, prelude::*};

/// Asserts that two fp numbers are approximately equal.
///
/// # Panics
///
/// Panics if `actual` and `expected` are too far from each other
#[allow(dead_code)]
#[track_caller]
pub fn assert_float_closeness<T: Float + std::fmt::Display>(actual: T, expected: T, epsilon: T) {
    if (actual - expected).abs() >= epsilon {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (with epsilon {epsilon})",
        );
    }
}

/// Asserts that two fp numbers are equal up to a tolerance relative to `scale`.
///
/// # Panics
///
/// Panics if `|actual - expected| > rel_tol * scale`
#[track_caller]
pub fn assert_relative_closeness<T: Float + std::fmt::Display>(
    actual: T,
    expected: T,
    scale: T,
    rel_tol: T,
) {
    let bound = rel_tol * scale.abs().max(T::min_positive_value());
    if (actual - expected).abs() > bound {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (relative tolerance {rel_tol}, scale {scale})",
        );
    }
}

/// Generate a random, complex, signal in the provided buffers
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`
pub fn gen_random_signal<T>(reals: &mut [T], imags: &mut [T])
where
    T: Float + SampleUniform,
{
    assert_eq!(
        reals.len(),
        imags.len(),
        "Real and imaginary slices must be of equal length"
    );

    let mut rng = thread_rng();

    let uniform_dist = Uniform::new(T::from(-1.0).unwrap(), T::from(1.0).unwrap());
    for (real, imag) in reals.iter_mut().zip(imags.iter_mut()) {
        *real = uniform_dist.sample(&mut rng);
        *imag = uniform_dist.sample(&mut rng);
    }
}

/// Generate `n` random complex numbers laid out as `re, im, re, im, ...`
pub fn gen_random_interleaved<T>(n: usize) -> Vec<T>
where
    T: Float + SampleUniform,
{
    let mut rng = thread_rng();
    let uniform_dist = Uniform::new(T::from(-1.0).unwrap(), T::from(1.0).unwrap());
    (0..2 * n).map(|_| uniform_dist.sample(&mut rng)).collect()
}
