//! Complex multiplication
//!
//! `tx` supplies the constant factor `t = a + bi`, which is split into a register of real parts and
//! a register of imaginary parts. `sr` is the data operand `s`, which gets rotated by `i`. Every
//! product is then one or two real multiplies and a single add or subtract, each rounded once.
//!
//! | function  | result          |
//! |-----------|-----------------|
//! | [`vzmul`]   | `t * s`         |
//! | [`vzmulj`]  | `conj(t) * s`   |
//! | [`vzmuli`]  | `i * t * s`     |
//! | [`vzmulij`] | `i * conj(t) * s` |
use super::rotate::vbyi;
use crate::vector::SimdVector;

/// `t * s`
#[inline(always)]
pub fn vzmul<V: SimdVector>(tx: V, sr: V) -> V {
    let tr = tx.dup_re();
    let ti = tx.dup_im();
    let tr = sr.mul(tr);
    let sr = vbyi(sr);
    tr.add(ti.mul(sr))
}

/// `conj(t) * s`
#[inline(always)]
pub fn vzmulj<V: SimdVector>(tx: V, sr: V) -> V {
    let tr = tx.dup_re();
    let ti = tx.dup_im();
    let tr = sr.mul(tr);
    let sr = vbyi(sr);
    tr.sub(ti.mul(sr))
}

/// `i * t * s`
#[inline(always)]
pub fn vzmuli<V: SimdVector>(tx: V, sr: V) -> V {
    let tr = tx.dup_re();
    let ti = tx.dup_im();
    let ti = ti.mul(sr);
    let sr = vbyi(sr);
    tr.mul(sr).sub(ti)
}

/// `i * conj(t) * s`
#[inline(always)]
pub fn vzmulij<V: SimdVector>(tx: V, sr: V) -> V {
    let tr = tx.dup_re();
    let ti = tx.dup_im();
    let ti = ti.mul(sr);
    let sr = vbyi(sr);
    tr.mul(sr).add(ti)
}
