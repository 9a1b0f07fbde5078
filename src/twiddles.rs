//! Twiddle table layouts
//!
//! A codelet does not compute its twiddle factors. It reads them, positionally, from a flat table
//! that a generator filled in ahead of time. This module is the contract between the two: for each
//! [`TwiddleFormat`] it lists the symbolic records ([`TwInstr`]) the generator has to expand, in
//! table order, for one twiddle of one vector step.
//!
//! [`generate_twiddle_table`] is the reference expansion of those records. The routines in
//! [`crate::kernels::twiddle`] decode exactly this layout.
use std::f64::consts::PI;

use crate::precision::Precision;
use crate::vector::SimdVector;

/// Reverse is for applying conjugated twiddles (inverse transforms)
/// Forward is for applying the twiddles as stored
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Multiply by the twiddle factor
    Forward,
    /// Multiply by the conjugate of the twiddle factor
    Reverse,
}

/// What a table slot holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TwOp {
    /// `cos(θ)`, one scalar
    Cos,
    /// `sin(θ)`, one scalar
    Sin,
    /// `cos(θ), sin(θ)`, two scalars
    Cexp,
}

/// One symbolic table record.
///
/// For column `j` of a transform of size `n`, the angle is `θ = 2π · (j + v) · i / n`. A negative
/// `i` therefore stores a negated sine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TwInstr {
    pub op: TwOp,
    /// Offset of the column within the vector step
    pub v: isize,
    /// Signed multiplier of the base angle
    pub i: isize,
}

impl TwInstr {
    pub const fn new(op: TwOp, v: isize, i: isize) -> Self {
        Self { op, v, i }
    }

    /// Number of scalars this record occupies in the table.
    pub const fn width(&self) -> usize {
        match self.op {
            TwOp::Cexp => 2,
            TwOp::Cos | TwOp::Sin => 1,
        }
    }

    /// Appends the value(s) of this record for column `j` of a size-`n` transform.
    pub fn expand<T: Precision>(&self, j: usize, n: usize, out: &mut Vec<T>) {
        let n = n as isize;
        // reduce first so the angle stays accurate for large tables
        let k = ((j as isize + self.v) * self.i.abs()).rem_euclid(n);
        let theta = 2.0 * PI * (k as f64) / (n as f64);
        let (st, ct) = theta.sin_cos();
        let st = if self.i < 0 { -st } else { st };

        match self.op {
            TwOp::Cos => out.push(T::from(ct).unwrap()),
            TwOp::Sin => out.push(T::from(st).unwrap()),
            TwOp::Cexp => {
                out.push(T::from(ct).unwrap());
                out.push(T::from(st).unwrap());
            }
        }
    }
}

/// How the twiddles of one vector step are stored.
///
/// The formats trade table size against decoding work. Pick one per call site.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TwiddleFormat {
    /// Cosines then sines, one register per twiddle. Decoding needs two unpacks.
    Compact,
    /// Cosines duplicated across each complex lane, sines duplicated with the sign already applied.
    /// Twice the memory of [`TwiddleFormat::Compact`], but decoding is free.
    Expanded,
    /// One full `(cos, sin)` pair per complex lane.
    PerComplex,
    /// `2 * VL` cosines then `2 * VL` sines, for split real/imaginary data.
    Split,
}

impl TwiddleFormat {
    /// Table advance per twiddle, in units of `VL` complex numbers (`TWVL1`, `TWVL2`, `TWVL3`,
    /// `TWVLS`).
    pub const fn twvl<T: Precision>(self) -> usize {
        match self {
            TwiddleFormat::Compact | TwiddleFormat::PerComplex => T::VL,
            TwiddleFormat::Expanded | TwiddleFormat::Split => 2 * T::VL,
        }
    }

    /// Scalars per twiddle per vector step.
    pub const fn scalars_per_twiddle<T: Precision>(self) -> usize {
        2 * self.twvl::<T>()
    }

    /// Columns (complex numbers of one stream) covered by one vector step.
    pub const fn columns_per_step<T: Precision>(self) -> usize {
        match self {
            TwiddleFormat::Split => 2 * T::VL,
            _ => T::VL,
        }
    }

    /// The records for twiddle multiplier `x` at column offset `v`, in table order.
    pub fn instructions<T: Precision>(self, v: isize, x: isize) -> Vec<TwInstr> {
        let vl = T::VL as isize;
        match self {
            TwiddleFormat::Compact if vl == 1 => vec![TwInstr::new(TwOp::Cexp, v, x)],
            TwiddleFormat::Compact => (0..vl)
                .map(|c| TwInstr::new(TwOp::Cos, v + c, x))
                .chain((0..vl).map(|c| TwInstr::new(TwOp::Sin, v + c, x)))
                .collect(),
            TwiddleFormat::Expanded => (0..vl)
                .flat_map(|c| [TwInstr::new(TwOp::Cos, v + c, x); 2])
                .chain((0..vl).flat_map(|c| {
                    [
                        TwInstr::new(TwOp::Sin, v + c, -x),
                        TwInstr::new(TwOp::Sin, v + c, x),
                    ]
                }))
                .collect(),
            TwiddleFormat::PerComplex => (0..vl)
                .map(|c| TwInstr::new(TwOp::Cexp, v + c, x))
                .collect(),
            TwiddleFormat::Split => (0..2 * vl)
                .map(|c| TwInstr::new(TwOp::Cos, v + c, x))
                .chain((0..2 * vl).map(|c| TwInstr::new(TwOp::Sin, v + c, x)))
                .collect(),
        }
    }

    /// The records of one vector step for a codelet using the twiddle multipliers `factors`.
    pub fn layout<T: Precision>(self, factors: &[isize]) -> Vec<TwInstr> {
        factors
            .iter()
            .flat_map(|&x| self.instructions::<T>(0, x))
            .collect()
    }
}

/// Expands the table of a codelet with twiddle multipliers `factors`, for `m` columns of a
/// size-`n` transform.
///
/// # Panics
///
/// Panics if `n == 0` or if `m` is not a multiple of the columns covered by one vector step
pub fn generate_twiddle_table<T: Precision>(
    format: TwiddleFormat,
    factors: &[isize],
    m: usize,
    n: usize,
) -> Vec<T> {
    let step = format.columns_per_step::<T>();
    assert!(n > 0);
    assert_eq!(m % step, 0, "{m} columns do not fill whole vector steps of {step}");

    let layout = format.layout::<T>(factors);
    let mut table = Vec::with_capacity(m / step * factors.len() * format.scalars_per_twiddle::<T>());

    for j in (0..m).step_by(step) {
        for instr in &layout {
            instr.expand(j, n, &mut table);
        }
    }

    table
}

/// Packs a scalar table into vector registers, which guarantees the alignment the twiddle
/// routines need.
///
/// # Panics
///
/// Panics if `scalars.len()` is not a multiple of `V::LANES`
pub fn pack_registers<V: SimdVector>(scalars: &[V::Scalar]) -> Vec<V> {
    assert_eq!(scalars.len() % V::LANES, 0);
    scalars.chunks_exact(V::LANES).map(V::from_slice).collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_1_SQRT_2;

    use utilities::assert_float_closeness;

    use super::*;

    #[test]
    fn table_sizes_match_layouts() {
        for format in [
            TwiddleFormat::Compact,
            TwiddleFormat::Expanded,
            TwiddleFormat::PerComplex,
            TwiddleFormat::Split,
        ] {
            for (vl, width) in [
                (f32::VL, format.scalars_per_twiddle::<f32>()),
                (f64::VL, format.scalars_per_twiddle::<f64>()),
            ] {
                let instrs = if vl == 1 {
                    format.instructions::<f64>(0, 3)
                } else {
                    format.instructions::<f32>(0, 3)
                };
                assert_eq!(instrs.iter().map(TwInstr::width).sum::<usize>(), width);
            }
        }
    }

    #[test]
    fn twvl_constants() {
        assert_eq!(TwiddleFormat::Compact.twvl::<f32>(), 2);
        assert_eq!(TwiddleFormat::Expanded.twvl::<f32>(), 4);
        assert_eq!(TwiddleFormat::PerComplex.twvl::<f32>(), 2);
        assert_eq!(TwiddleFormat::Split.twvl::<f32>(), 4);
        assert_eq!(TwiddleFormat::Compact.twvl::<f64>(), 1);
        assert_eq!(TwiddleFormat::Expanded.twvl::<f64>(), 2);
        assert_eq!(TwiddleFormat::PerComplex.twvl::<f64>(), 1);
        assert_eq!(TwiddleFormat::Split.twvl::<f64>(), 2);
    }

    #[test]
    fn single_precision_layouts() {
        use TwOp::*;
        let t = |op, v, i| TwInstr::new(op, v, i);

        assert_eq!(
            TwiddleFormat::Compact.instructions::<f32>(4, 1),
            vec![t(Cos, 4, 1), t(Cos, 5, 1), t(Sin, 4, 1), t(Sin, 5, 1)]
        );
        assert_eq!(
            TwiddleFormat::Expanded.instructions::<f32>(0, 2),
            vec![
                t(Cos, 0, 2),
                t(Cos, 0, 2),
                t(Cos, 1, 2),
                t(Cos, 1, 2),
                t(Sin, 0, -2),
                t(Sin, 0, 2),
                t(Sin, 1, -2),
                t(Sin, 1, 2),
            ]
        );
        assert_eq!(
            TwiddleFormat::PerComplex.instructions::<f32>(0, 1),
            vec![t(Cexp, 0, 1), t(Cexp, 1, 1)]
        );
    }

    #[test]
    fn double_precision_layouts() {
        use TwOp::*;
        let t = |op, v, i| TwInstr::new(op, v, i);

        assert_eq!(
            TwiddleFormat::Compact.instructions::<f64>(0, 3),
            vec![t(Cexp, 0, 3)]
        );
        assert_eq!(
            TwiddleFormat::PerComplex.instructions::<f64>(0, 3),
            TwiddleFormat::Compact.instructions::<f64>(0, 3)
        );
        assert_eq!(
            TwiddleFormat::Expanded.instructions::<f64>(0, 1),
            vec![t(Cos, 0, 1), t(Cos, 0, 1), t(Sin, 0, -1), t(Sin, 0, 1)]
        );
        assert_eq!(
            TwiddleFormat::Split.instructions::<f64>(0, 1),
            vec![t(Cos, 0, 1), t(Cos, 1, 1), t(Sin, 0, 1), t(Sin, 1, 1)]
        );
    }

    #[test]
    fn expansion_values() {
        let table: Vec<f64> = generate_twiddle_table(TwiddleFormat::Compact, &[1], 4, 8);
        let expected = [
            (1.0, 0.0),
            (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            (0.0, 1.0),
            (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        ];
        assert_eq!(table.len(), 8);
        for (pair, (c, s)) in table.chunks_exact(2).zip(expected) {
            assert_float_closeness(pair[0], c, 1e-12);
            assert_float_closeness(pair[1], s, 1e-12);
        }
    }

    #[test]
    fn negative_multiplier_negates_sine() {
        let mut out = Vec::<f32>::new();
        TwInstr::new(TwOp::Sin, 1, -1).expand(0, 4, &mut out);
        TwInstr::new(TwOp::Cos, 1, -1).expand(0, 4, &mut out);
        assert_float_closeness(out[0], -1.0, 1e-6);
        assert_float_closeness(out[1], 0.0, 1e-6);
    }

    #[test]
    fn table_length() {
        let factors = [1, 2, 3];
        let table: Vec<f32> = generate_twiddle_table(TwiddleFormat::Expanded, &factors, 16, 64);
        assert_eq!(
            table.len(),
            16 / f32::VL * factors.len() * TwiddleFormat::Expanded.scalars_per_twiddle::<f32>()
        );
    }

    #[test]
    #[should_panic]
    fn partial_vector_step() {
        let _ = generate_twiddle_table::<f32>(TwiddleFormat::Compact, &[1], 3, 8);
    }
}
