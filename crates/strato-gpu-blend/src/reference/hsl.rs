//! Hue/saturation/luminosity blend cores.
//!
//! The HSL ops need horizontal operations (channel min/max, luminance dot
//! product) that the blend unit lacks; the reference programs synthesize them
//! with the GBR rotation swizzle. Rotating a pairwise min/max once more and
//! folding it back in leaves the full horizontal reduction replicated across
//! all three channels using a single scratch register.

use crate::assembler::UcodeAssembler;
use crate::reference::helpers::{reg_bd, SrcColor};
use crate::ucode::CondCode::True;
use crate::ucode::{Dest, OpAc, OpBd};

/// ITU-R BT.601 luma weights, loaded into constant slot 0 by every HSL core.
const LUMA_R: f32 = 0.3;
const LUMA_G: f32 = 0.59;
const LUMA_B: f32 = 0.11;

/// `dest = max(color.r, color.g, color.b)` replicated across RGB.
fn channel_max(asm: &mut UcodeAssembler, color: (OpAc, OpBd), dest: Dest) {
    asm.mov(True, dest.gbr(), color.1);
    asm.max(True, dest, color.0, reg_bd(dest.register));
    asm.mov(True, dest.gbr(), reg_bd(dest.register));
    asm.max(True, dest, color.0, reg_bd(dest.register));
}

/// `dest = min(color.r, color.g, color.b)` replicated across RGB.
fn channel_min(asm: &mut UcodeAssembler, color: (OpAc, OpBd), dest: Dest) {
    asm.mov(True, dest.gbr(), color.1);
    asm.min(True, dest, color.0, reg_bd(dest.register));
    asm.mov(True, dest.gbr(), reg_bd(dest.register));
    asm.min(True, dest, color.0, reg_bd(dest.register));
}

/// `dest = lum(color)` replicated across RGB. Reads `color` once (so `dest`
/// may alias it) and scratches the accumulator. Constant slot 0 must already
/// hold the luma weights.
fn luminance(asm: &mut UcodeAssembler, color: OpAc, dest: Dest) {
    asm.mul(True, Dest::ACCUM, color, OpBd::ConstRgb);
    asm.mov(True, dest.gbr(), OpBd::Accum);
    asm.add(True, Dest::ACCUM, OpBd::Accum, reg_bd(dest.register));
    asm.mov(True, dest.gbr(), reg_bd(dest.register));
    asm.add(True, dest, OpBd::Accum, reg_bd(dest.register));
}

/// Reapplies `lum_reg - lum(Temp2)` to the color in `Temp2` and clamps.
///
/// `lum_reg` is consumed; `Temp1` is scratched for `lum(Temp2)`.
fn apply_luminance(asm: &mut UcodeAssembler, lum_reg: Dest) {
    luminance(asm, OpAc::Temp2, Dest::TEMP1);
    asm.sub(True, lum_reg, reg_bd(lum_reg.register), OpBd::Temp1);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, reg_bd(lum_reg.register));
    asm.max(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstZero);
    asm.min(True, Dest::TEMP2, OpAc::Temp2, OpBd::ConstOne);
}

const DC: (OpAc, OpBd) = (OpAc::Temp1, OpBd::Temp1);

/// `f = set_lum(set_sat(Sc, sat(Dc)), lum(Dc))`
pub(super) fn core_hue(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.set_constant(0, LUMA_R, LUMA_G, LUMA_B);
    // Normalize the source against its own saturation: (Sc - minc) / sat.
    channel_max(asm, (sc.ac, sc.bd), Dest::TEMP2);
    channel_min(asm, (sc.ac, sc.bd), Dest::ACCUM);
    asm.sub(True, Dest::TEMP2, OpBd::Temp2, OpBd::Accum);
    asm.rcp(True, Dest::TEMP2, OpAc::Temp2);
    asm.sub(True, Dest::ACCUM, sc.bd, OpBd::Accum);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Accum);
    // Rescale by the destination's saturation.
    channel_max(asm, DC, Dest::TEMP0);
    channel_min(asm, DC, Dest::ACCUM);
    asm.sub(True, Dest::TEMP0, OpBd::Temp0, OpBd::Accum);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp0);
    // Move the result to the destination's luminance.
    luminance(asm, OpAc::Temp1, Dest::TEMP0);
    apply_luminance(asm, Dest::TEMP0);
}

/// `f = set_lum(set_sat(Dc, sat(Sc)), lum(Dc))`
pub(super) fn core_saturation(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.set_constant(0, LUMA_R, LUMA_G, LUMA_B);
    // sat(Sc), stashed while the destination terms are built.
    channel_max(asm, (sc.ac, sc.bd), Dest::TEMP2);
    channel_min(asm, (sc.ac, sc.bd), Dest::ACCUM);
    asm.sub(True, Dest::TEMP2, OpBd::Temp2, OpBd::Accum);
    // Normalize the destination: (Dc - minc) / sat, folded as
    // sat(Sc) / sat(Dc) * (Dc - minc).
    channel_max(asm, DC, Dest::TEMP0);
    channel_min(asm, DC, Dest::ACCUM);
    asm.sub(True, Dest::TEMP0, OpBd::Temp0, OpBd::Accum);
    asm.rcp(True, Dest::TEMP0, OpAc::Temp0);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp0);
    asm.sub(True, Dest::TEMP0, OpBd::Temp1, OpBd::Accum);
    asm.mul(True, Dest::TEMP2, OpAc::Temp2, OpBd::Temp0);
    // Restore the destination's luminance.
    luminance(asm, OpAc::Temp1, Dest::TEMP0);
    apply_luminance(asm, Dest::TEMP0);
}

/// `f = set_lum(Sc, lum(Dc))`
pub(super) fn core_color(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.set_constant(0, LUMA_R, LUMA_G, LUMA_B);
    asm.mov(True, Dest::TEMP2, sc.bd);
    luminance(asm, OpAc::Temp1, Dest::TEMP0);
    apply_luminance(asm, Dest::TEMP0);
}

/// `f = set_lum(Dc, lum(Sc))`
pub(super) fn core_luminosity(asm: &mut UcodeAssembler, sc: SrcColor) {
    asm.set_constant(0, LUMA_R, LUMA_G, LUMA_B);
    luminance(asm, sc.ac, Dest::TEMP0);
    asm.mov(True, Dest::TEMP2, OpBd::Temp1);
    apply_luminance(asm, Dest::TEMP0);
}
