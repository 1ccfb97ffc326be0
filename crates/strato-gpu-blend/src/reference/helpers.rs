//! Shared emission helpers for the reference generators.
//!
//! The generators all follow the same skeleton: recover straight (non
//! premultiplied) source/destination colors, emit the op-specific blend core
//! into `Temp2`, then fold the core's result together with the coverage
//! weights of the overlap model. Register conventions:
//!
//! - `Temp0` holds the straight source color for premultiplied variants
//!   (straight variants read `SrcRgb` directly).
//! - `Temp1` holds the straight destination color.
//! - `Temp2` receives the blend core's output; cores may scratch the
//!   accumulator but must leave `Temp0`/`Temp1` alone.
//! - The final result lands in the accumulator.

use crate::assembler::UcodeAssembler;
use crate::ucode::CondCode::{Ge, Gt, True};
use crate::ucode::{Dest, DestRegister, OpAc, OpBd};

/// Operand pair addressing the straight source color from either domain.
#[derive(Clone, Copy)]
pub(super) struct SrcColor {
    pub ac: OpAc,
    pub bd: OpBd,
}

pub(super) const fn reg_ac(register: DestRegister) -> OpAc {
    match register {
        DestRegister::Temp0 => OpAc::Temp0,
        DestRegister::Temp1 => OpAc::Temp1,
        DestRegister::Temp2 => OpAc::Temp2,
        DestRegister::Accum => OpAc::Accum,
    }
}

pub(super) const fn reg_bd(register: DestRegister) -> OpBd {
    match register {
        DestRegister::Temp0 => OpBd::Temp0,
        DestRegister::Temp1 => OpBd::Temp1,
        DestRegister::Temp2 => OpBd::Temp2,
        DestRegister::Accum => OpBd::Accum,
    }
}

/// Recovers the straight destination color into `Temp1`.
pub(super) fn load_straight_dst(asm: &mut UcodeAssembler) {
    asm.rcp(True, Dest::TEMP1, OpAc::DstAaa);
    asm.mul(True, Dest::TEMP1, OpAc::DstRgb, OpBd::Temp1);
}

/// Recovers straight colors; returns the operand holding the straight
/// source. Premultiplied variants divide the source through its alpha into
/// `Temp0`; straight variants use `SrcRgb` as-is.
pub(super) fn load_straight_colors(asm: &mut UcodeAssembler, premult: bool) -> SrcColor {
    if premult {
        asm.rcp(True, Dest::TEMP0, OpAc::SrcAaa);
        asm.mul(True, Dest::TEMP0, OpAc::SrcRgb, OpBd::Temp0);
    }
    load_straight_dst(asm);
    if premult {
        SrcColor {
            ac: OpAc::Temp0,
            bd: OpBd::Temp0,
        }
    } else {
        SrcColor {
            ac: OpAc::SrcRgb,
            bd: OpBd::SrcRgb,
        }
    }
}

/// Addresses the premultiplied source color: `SrcRgb` as-is when the source
/// already arrives premultiplied, otherwise multiplied through its alpha
/// into `Temp0`.
pub(super) fn premultiplied_src(asm: &mut UcodeAssembler, premult: bool) -> SrcColor {
    if premult {
        SrcColor {
            ac: OpAc::SrcRgb,
            bd: OpBd::SrcRgb,
        }
    } else {
        asm.mul(True, Dest::TEMP0, OpAc::SrcRgb, OpBd::SrcAaa);
        SrcColor {
            ac: OpAc::Temp0,
            bd: OpBd::Temp0,
        }
    }
}

/// Folds the core result in `Temp2` with the uncorrelated coverage terms:
/// `accum = f * as * ad + Cs * (1 - ad) + Cd * (1 - as)` over premultiplied
/// colors. Straight variants premultiply the source on the way.
pub(super) fn uncorrelated_combine(asm: &mut UcodeAssembler, premult: bool) {
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::SrcAaa);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::DstAaa);
    if premult {
        asm.madd(True, Dest::ACCUM, OpAc::SrcRgb, OpBd::OneMinusDstAaa, OpAc::Temp2);
    } else {
        asm.mul(True, Dest::ACCUM, OpAc::SrcRgb, OpBd::SrcAaa);
        asm.madd(True, Dest::ACCUM, OpAc::Accum, OpBd::OneMinusDstAaa, OpAc::Temp2);
    }
    asm.madd(True, Dest::ACCUM, OpAc::DstRgb, OpBd::OneMinusSrcAaa, OpAc::Accum);
}

/// Overlap model for the coverage-weight emitters.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum OverlapKind {
    /// `p0 = max(as + ad - 1, 0)`, `p1 = min(as, 1 - ad)`, `p2 = min(ad, 1 - as)`
    Disjoint,
    /// `p0 = min(as, ad)`, `p1 = max(as - ad, 0)`, `p2 = max(ad - as, 0)`
    Conjoint,
}

/// Emits the weight of the overlapped region into `dest`.
pub(super) fn coverage_p0(asm: &mut UcodeAssembler, kind: OverlapKind, dest: Dest) {
    match kind {
        OverlapKind::Disjoint => {
            asm.add(True, dest, OpBd::SrcAaa, OpBd::DstAaa);
            asm.sub(True, dest, reg_bd(dest.register), OpBd::ConstOne);
            asm.max(True, dest, reg_ac(dest.register), OpBd::ConstZero);
        }
        OverlapKind::Conjoint => {
            asm.min(True, dest, OpAc::SrcAaa, OpBd::DstAaa);
        }
    }
}

/// Emits the weight of the source-only region into `dest`.
pub(super) fn coverage_p1(asm: &mut UcodeAssembler, kind: OverlapKind, dest: Dest) {
    match kind {
        OverlapKind::Disjoint => {
            asm.min(True, dest, OpAc::SrcAaa, OpBd::OneMinusDstAaa);
        }
        OverlapKind::Conjoint => {
            asm.sub(True, dest, OpBd::SrcAaa, OpBd::DstAaa);
            asm.max(True, dest, reg_ac(dest.register), OpBd::ConstZero);
        }
    }
}

/// Emits the weight of the destination-only region into `dest`.
pub(super) fn coverage_p2(asm: &mut UcodeAssembler, kind: OverlapKind, dest: Dest) {
    match kind {
        OverlapKind::Disjoint => {
            asm.min(True, dest, OpAc::DstAaa, OpBd::OneMinusSrcAaa);
        }
        OverlapKind::Conjoint => {
            asm.sub(True, dest, OpBd::DstAaa, OpBd::SrcAaa);
            asm.max(True, dest, reg_ac(dest.register), OpBd::ConstZero);
        }
    }
}

/// What the overlapped region contributes in a Porter-Duff mode.
#[derive(Clone, Copy)]
pub(super) enum RegionSource {
    Src,
    Dst,
}

/// Emits a complete overlapped Porter-Duff program body:
/// `accum = f * p0 + Cs * p1 + Cd * p2` over straight colors, with each term
/// present only when its coefficient is set. Straight colors must already be
/// loaded; `sc` addresses the straight source.
pub(super) fn overlapped_pd(
    asm: &mut UcodeAssembler,
    kind: OverlapKind,
    sc: SrcColor,
    f: Option<RegionSource>,
    p1: bool,
    p2: bool,
) {
    let mut have_term = false;
    if let Some(region) = f {
        let operand = match region {
            RegionSource::Src => sc.bd,
            RegionSource::Dst => OpBd::Temp1,
        };
        asm.mov(True, Dest::TEMP2, operand);
        coverage_p0(asm, kind, Dest::ACCUM);
        asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Accum);
        have_term = true;
    }
    if p1 {
        coverage_p1(asm, kind, Dest::ACCUM);
        if have_term {
            asm.madd(True, Dest::TEMP2, sc.ac, OpBd::Accum, OpAc::Temp2);
        } else {
            asm.mul(True, Dest::TEMP2, sc.ac, OpBd::Accum);
        }
        have_term = true;
    }
    if p2 {
        coverage_p2(asm, kind, Dest::ACCUM);
        if have_term {
            asm.madd(True, Dest::ACCUM, OpAc::Temp1, OpBd::Accum, OpAc::Temp2);
        } else {
            asm.mul(True, Dest::ACCUM, OpAc::Temp1, OpBd::Accum);
        }
    } else {
        asm.mov(True, Dest::ACCUM, OpBd::Temp2);
    }
}

/// Folds a separable core result in `Temp2` with all three coverage terms of
/// an overlap model: `accum = f * p0 + Cs * p1 + Cd * p2`.
pub(super) fn overlapped_combine(asm: &mut UcodeAssembler, kind: OverlapKind, sc: SrcColor) {
    coverage_p0(asm, kind, Dest::ACCUM);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Accum);
    coverage_p1(asm, kind, Dest::ACCUM);
    asm.madd(True, Dest::TEMP2, sc.ac, OpBd::Accum, OpAc::Temp2);
    coverage_p2(asm, kind, Dest::ACCUM);
    asm.madd(True, Dest::ACCUM, OpAc::Temp1, OpBd::Accum, OpAc::Temp2);
}

// --- Separable blend cores -------------------------------------------------
//
// Every core reads the straight source through `sc` and the straight
// destination from Temp1, writes `f(Sc, Dc)` to Temp2, and may scratch the
// accumulator only.

pub(super) fn core_multiply(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.mul(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
}

pub(super) fn core_screen(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Sc + Dc - Sc * Dc
    asm.mmsub(True, Dest::TEMP2, sc.ac, OpBd::ConstOne, sc.ac, OpBd::Temp1);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Temp1);
}

pub(super) fn core_darken(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.min(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
}

pub(super) fn core_lighten(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.max(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
}

pub(super) fn core_difference(asm: &mut UcodeAssembler, sc: SrcColor) {
    // |Sc - Dc| = max(Sc, Dc) - min(Sc, Dc)
    asm.max(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
    asm.min(True, Dest::ACCUM, sc.ac, OpBd::Temp1);
    asm.sub(True, Dest::TEMP2, OpBd::Temp2, OpBd::Accum);
}

pub(super) fn core_exclusion(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Sc + Dc - 2 * Sc * Dc
    asm.mul(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
    asm.add(True, Dest::ACCUM, sc.bd, OpBd::Temp1);
    asm.sub(True, Dest::ACCUM, OpBd::Accum, OpBd::Temp2);
    asm.sub(True, Dest::TEMP2, OpBd::Accum, OpBd::Temp2);
}

pub(super) fn core_overlay(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Dc <= 0.5 ? 2 * Sc * Dc : 2 * (Sc + Dc) - 2 * Sc * Dc - 1
    asm.mul(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Temp2);
    asm.set_constant(0, 0.5, 0.5, 0.5);
    asm.sub(True, Dest::ACCUM.cc(), OpBd::Temp1, OpBd::ConstRgb);
    asm.add(True, Dest::ACCUM, sc.bd, OpBd::Temp1);
    asm.add(True, Dest::ACCUM, OpBd::Accum, OpBd::Accum);
    asm.sub(True, Dest::ACCUM, OpBd::Accum, OpBd::Temp2);
    asm.sub(Gt, Dest::TEMP2, OpBd::Accum, OpBd::ConstOne);
}

pub(super) fn core_hard_light(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Overlay with the roles of source and destination swapped in the
    // condition: Sc <= 0.5 selects the multiply branch.
    asm.mul(True, Dest::TEMP2, sc.ac, OpBd::Temp1);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Temp2);
    asm.set_constant(0, 0.5, 0.5, 0.5);
    asm.sub(True, Dest::ACCUM.cc(), sc.bd, OpBd::ConstRgb);
    asm.add(True, Dest::ACCUM, sc.bd, OpBd::Temp1);
    asm.add(True, Dest::ACCUM, OpBd::Accum, OpBd::Accum);
    asm.sub(True, Dest::ACCUM, OpBd::Accum, OpBd::Temp2);
    asm.sub(Gt, Dest::TEMP2, OpBd::Accum, OpBd::ConstOne);
}

pub(super) fn core_color_dodge(asm: &mut UcodeAssembler, sc: SrcColor) {
    // min(1, Dc / (1 - Sc))
    asm.sub(True, Dest::TEMP2, OpBd::ConstOne, sc.bd);
    asm.rcp(True, Dest::TEMP2, OpAc::Temp2);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp1);
    asm.min(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
}

pub(super) fn core_color_burn(asm: &mut UcodeAssembler, sc: SrcColor) {
    // 1 - min(1, (1 - Dc) / Sc)
    asm.sub(True, Dest::TEMP2, OpBd::ConstOne, OpBd::Temp1);
    asm.rcp(True, Dest::ACCUM, sc.ac);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Accum);
    asm.min(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
    asm.sub(True, Dest::TEMP2, OpBd::ConstOne, OpBd::Temp2);
}

pub(super) fn core_soft_light(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Dc + (2 * Sc - 1) * (D(Dc) - Dc), with D approximated by the cubic
    // 0.2605 * x^3 - 0.7817 * x^2 + 0.3022 * x + 0.2192 evaluated by Horner
    // steps, coefficients broadcast out of the constant file.
    asm.set_constant(0, 0.2605, -0.7817, 0.3022);
    asm.mov(True, Dest::TEMP2.rrr(), OpBd::ConstRgb);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp1);
    asm.mov(True, Dest::ACCUM.ggg(), OpBd::ConstRgb);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Accum);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp1);
    asm.mov(True, Dest::ACCUM.bbb(), OpBd::ConstRgb);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Accum);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp1);
    asm.set_constant(1, 0.2192, 0.2192, 0.2192);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::ConstRgb);
    asm.sub(True, Dest::ACCUM, OpBd::Temp2, OpBd::Temp1);
    asm.add(True, Dest::TEMP2, sc.bd, sc.bd);
    asm.sub(True, Dest::TEMP2, OpBd::Temp2, OpBd::ConstOne);
    asm.madd(True, Dest::TEMP2, OpAc::Temp2, OpBd::Accum, OpAc::Temp1);
}

pub(super) fn core_linear_dodge(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.add(True, Dest::TEMP2, sc.bd, OpBd::Temp1);
    asm.min(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
}

pub(super) fn core_linear_burn(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.add(True, Dest::TEMP2, sc.bd, OpBd::Temp1);
    asm.sub(True, Dest::TEMP2, OpBd::Temp2, OpBd::ConstOne);
    asm.max(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstZero);
}

pub(super) fn core_vivid_light(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Sc <= 0.5 ? 1 - min(1, (1 - Dc) / (2 * Sc))
    //           : min(1, Dc / (2 * (1 - Sc)))
    asm.set_constant(0, 0.5, 0.5, 0.5);
    asm.sub(True, Dest::ACCUM.cc(), sc.bd, OpBd::ConstRgb);
    asm.add(True, Dest::TEMP2, sc.bd, sc.bd);
    asm.rcp(True, Dest::TEMP2, OpAc::Temp2);
    asm.sub(True, Dest::ACCUM, OpBd::ConstOne, OpBd::Temp1);
    asm.mul(True, Dest::TEMP2, OpAc::Accum, OpBd::Temp2);
    asm.min(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
    asm.sub(True, Dest::TEMP2, OpBd::ConstOne, OpBd::Temp2);
    asm.sub(True, Dest::ACCUM, OpBd::ConstOne, sc.bd);
    asm.add(True, Dest::ACCUM, OpBd::Accum, OpBd::Accum);
    asm.rcp(True, Dest::ACCUM, OpAc::Accum);
    asm.mul(Gt, Dest::TEMP2, OpAc::Accum, OpBd::Temp1);
    asm.min(Gt, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
}

pub(super) fn core_linear_light(asm: &mut UcodeAssembler, sc: SrcColor) {
    // clamp(2 * Sc + Dc - 1)
    asm.add(True, Dest::TEMP2, sc.bd, sc.bd);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Temp1);
    asm.sub(True, Dest::TEMP2, OpBd::Temp2, OpBd::ConstOne);
    asm.max(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstZero);
    asm.min(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
}

pub(super) fn core_pin_light(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Sc <= 0.5 ? min(Dc, 2 * Sc) : max(Dc, 2 * Sc - 1)
    asm.set_constant(0, 0.5, 0.5, 0.5);
    asm.sub(True, Dest::ACCUM.cc(), sc.bd, OpBd::ConstRgb);
    asm.add(True, Dest::ACCUM, sc.bd, sc.bd);
    asm.min(True, Dest::TEMP2, OpAc::Accum, OpBd::Temp1);
    asm.sub(True, Dest::ACCUM, OpBd::Accum, OpBd::ConstOne);
    asm.max(Gt, Dest::TEMP2, OpAc::Accum, OpBd::Temp1);
}

pub(super) fn core_hard_mix(asm: &mut UcodeAssembler, sc: SrcColor) {
    // Sc + Dc >= 1 ? 1 : 0
    asm.add(True, Dest::ACCUM, sc.bd, OpBd::Temp1);
    asm.sub(True, Dest::ACCUM.cc(), OpBd::Accum, OpBd::ConstOne);
    asm.mov(True, Dest::TEMP2, OpBd::ConstZero);
    asm.mov(Ge, Dest::TEMP2, OpBd::ConstOne);
}

pub(super) fn core_red(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.mov(True, Dest::TEMP2, OpBd::Temp1);
    asm.mov(True, Dest::TEMP2.mask_r(), sc.bd);
}

pub(super) fn core_green(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.mov(True, Dest::TEMP2, OpBd::Temp1);
    asm.mov(True, Dest::TEMP2.mask_g(), sc.bd);
}

pub(super) fn core_blue(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.mov(True, Dest::TEMP2, OpBd::Temp1);
    asm.mov(True, Dest::TEMP2.mask_b(), sc.bd);
}
