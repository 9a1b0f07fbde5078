//! Slice drivers
//!
//! Safe loops that run the kernels over whole interleaved buffers (`re, im, re, im, ...`), one
//! register of `VL` complex numbers per step.
//!
//! All drivers are compiled for several target feature levels, but the level is picked when the
//! crate is built, never at run time.
use crate::kernels::complex::{vzmul, vzmulj};
use crate::kernels::rotate::{vbyi, vconj};
use crate::kernels::twiddle::{bytw1, bytw2, bytw3, bytwj1, bytwj2, bytwj3};
use crate::twiddles::{Direction, TwiddleFormat};
use crate::vector::SimdVector;

/// Contiguous complex numbers are two scalars apart.
const CONTIGUOUS: isize = 2;

#[track_caller]
fn check_buffer<V: SimdVector>(data: &[V::Scalar]) {
    assert_eq!(
        data.len() % V::LANES,
        0,
        "buffer of {} scalars does not split into registers of {}",
        data.len(),
        V::LANES
    );
}

/// Applies `f` to every register of `data` in place.
#[inline(always)]
fn map_registers<V: SimdVector>(data: &mut [V::Scalar], mut f: impl FnMut(usize, V) -> V) {
    let ptr = data.as_mut_ptr();
    for step in 0..data.len() / V::LANES {
        // SAFETY: `check_buffer` established that `data` holds whole registers, and the
        // unaligned `ld`/`st` of the backends only need scalar alignment
        unsafe {
            let x = ptr.add(step * V::LANES);
            let v = V::ld(x, CONTIGUOUS, x);
            V::st(x, f(step, v), CONTIGUOUS, x);
        }
    }
}

/// Multiplies complex number `k` of `data` by twiddle `k` of `table`.
///
/// `table` holds the twiddles in `format`, one twiddle per vector step, already packed into
/// registers (see [`pack_registers`](crate::twiddles::pack_registers)). With
/// [`Direction::Reverse`] every twiddle is conjugated first.
///
/// # Panics
///
/// Panics if `format` is [`TwiddleFormat::Split`], if `data` does not split into whole
/// registers, or if `table` does not hold exactly one twiddle per register of `data`
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ),
    dispatcher = "static"
)]
pub fn apply_twiddles<V: SimdVector>(
    data: &mut [V::Scalar],
    table: &[V],
    format: TwiddleFormat,
    direction: Direction,
) {
    assert_ne!(
        format,
        TwiddleFormat::Split,
        "split twiddles need split data"
    );
    check_buffer::<V>(data);

    let width = format.scalars_per_twiddle::<V::Scalar>();
    let steps = data.len() / V::LANES;
    assert_eq!(
        table.len() * V::LANES,
        steps * width,
        "twiddle table does not match {steps} vector steps"
    );

    let apply: unsafe fn(*const V::Scalar, V) -> V = match (format, direction) {
        (TwiddleFormat::Compact, Direction::Forward) => bytw1::<V>,
        (TwiddleFormat::Compact, Direction::Reverse) => bytwj1::<V>,
        (TwiddleFormat::Expanded, Direction::Forward) => bytw2::<V>,
        (TwiddleFormat::Expanded, Direction::Reverse) => bytwj2::<V>,
        (TwiddleFormat::PerComplex, Direction::Forward) => bytw3::<V>,
        (TwiddleFormat::PerComplex, Direction::Reverse) => bytwj3::<V>,
        (TwiddleFormat::Split, _) => unreachable!(),
    };

    let t = table.as_ptr().cast::<V::Scalar>();
    map_registers::<V>(data, |step, s| {
        // SAFETY: the length check above keeps every slot inside `table`, and `&[V]` keeps the
        // registers vector aligned
        unsafe { apply(t.add(step * width), s) }
    });
}

/// Conjugates every complex number of `data` in place.
///
/// # Panics
///
/// Panics if `data` does not split into whole registers
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ),
    dispatcher = "static"
)]
pub fn conjugate<V: SimdVector>(data: &mut [V::Scalar]) {
    check_buffer::<V>(data);
    map_registers::<V>(data, |_, v| vconj(v));
}

/// Multiplies every complex number of `data` by `i` in place.
///
/// # Panics
///
/// Panics if `data` does not split into whole registers
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ),
    dispatcher = "static"
)]
pub fn rotate_by_i<V: SimdVector>(data: &mut [V::Scalar]) {
    check_buffer::<V>(data);
    map_registers::<V>(data, |_, v| vbyi(v));
}

/// Multiplies `data` element-wise by `factors`, or by their conjugates with
/// [`Direction::Reverse`].
///
/// # Panics
///
/// Panics if `data.len() != factors.len()` or if either buffer does not split into whole
/// registers
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ),
    dispatcher = "static"
)]
pub fn multiply<V: SimdVector>(data: &mut [V::Scalar], factors: &[V::Scalar], direction: Direction) {
    assert_eq!(data.len(), factors.len());
    check_buffer::<V>(data);
    check_buffer::<V>(factors);

    let f = factors.as_ptr();
    map_registers::<V>(data, |step, s| {
        // SAFETY: `factors` has the same whole registers as `data`
        let t = unsafe {
            let x = f.add(step * V::LANES);
            V::ld(x, CONTIGUOUS, x)
        };
        match direction {
            Direction::Forward => vzmul(t, s),
            Direction::Reverse => vzmulj(t, s),
        }
    });
}
