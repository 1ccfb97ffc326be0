//! Reference programs for the uncorrelated overlap model.
//!
//! Coverages are assumed independent, so the Porter-Duff ops reduce to their
//! direct premultiplied-space forms and the separable/HSL ops use the
//! `f * as * ad + Cs * (1 - ad) + Cd * (1 - as)` coverage fold. Alpha is
//! always expressible on the fixed-function path; no program here computes
//! alpha in-band.

use crate::assembler::UcodeAssembler;
use crate::reference::helpers::{
    core_blue, core_color_burn, core_color_dodge, core_darken, core_difference, core_exclusion,
    core_green, core_hard_light, core_hard_mix, core_lighten, core_linear_burn, core_linear_dodge,
    core_linear_light, core_multiply, core_overlay, core_pin_light, core_red, core_screen,
    core_soft_light, core_vivid_light, load_straight_colors, premultiplied_src,
    uncorrelated_combine, SrcColor,
};
use crate::reference::hsl::{core_color, core_hue, core_luminosity, core_saturation};
use crate::state::{BlendFactor, BlendOp, FixedFunctionAlpha};
use crate::ucode::CondCode::True;
use crate::ucode::{Dest, OpAc, OpBd};

/// `ao = as + ad - as * ad`, the union coverage of independent regions.
const UNION_ALPHA: FixedFunctionAlpha =
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::OneMinusSrcAlpha);

fn separable(
    asm: &mut UcodeAssembler,
    premult: bool,
    core: fn(&mut UcodeAssembler, SrcColor),
    alpha: FixedFunctionAlpha,
) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    core(asm, sc);
    uncorrelated_combine(asm, premult);
    alpha
}

// --- Porter-Duff ops, direct premultiplied-space forms ---------------------

pub(super) fn zero(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    asm.mov(True, Dest::ACCUM, OpBd::ConstZero);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::Zero, BlendFactor::Zero)
}

fn src_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.mov(True, Dest::ACCUM, cs.bd);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::Zero)
}

pub(super) fn src(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_impl(asm, true)
}

pub(super) fn src_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_impl(asm, false)
}

pub(super) fn dst(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    asm.mov(True, Dest::ACCUM, OpBd::DstRgb);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::Zero, BlendFactor::One)
}

fn src_over_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.madd(True, Dest::ACCUM, OpAc::DstRgb, OpBd::OneMinusSrcAaa, cs.ac);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::OneMinusSrcAlpha)
}

pub(super) fn src_over(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_over_impl(asm, true)
}

pub(super) fn src_over_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_over_impl(asm, false)
}

fn dst_over_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.madd(True, Dest::ACCUM, cs.ac, OpBd::OneMinusDstAaa, OpAc::DstRgb);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::OneMinusDstAlpha, BlendFactor::One)
}

pub(super) fn dst_over(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_over_impl(asm, true)
}

pub(super) fn dst_over_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_over_impl(asm, false)
}

fn src_in_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.mul(True, Dest::ACCUM, cs.ac, OpBd::DstAaa);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::DstAlpha, BlendFactor::Zero)
}

pub(super) fn src_in(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_in_impl(asm, true)
}

pub(super) fn src_in_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_in_impl(asm, false)
}

pub(super) fn dst_in(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    asm.mul(True, Dest::ACCUM, OpAc::DstRgb, OpBd::SrcAaa);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::Zero, BlendFactor::SrcAlpha)
}

fn src_out_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.mul(True, Dest::ACCUM, cs.ac, OpBd::OneMinusDstAaa);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::OneMinusDstAlpha, BlendFactor::Zero)
}

pub(super) fn src_out(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_out_impl(asm, true)
}

pub(super) fn src_out_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_out_impl(asm, false)
}

pub(super) fn dst_out(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    asm.mul(True, Dest::ACCUM, OpAc::DstRgb, OpBd::OneMinusSrcAaa);
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::Zero, BlendFactor::OneMinusSrcAlpha)
}

fn src_atop_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.mmadd(
        True,
        Dest::ACCUM,
        cs.ac,
        OpBd::DstAaa,
        OpAc::DstRgb,
        OpBd::OneMinusSrcAaa,
    );
    FixedFunctionAlpha::rgba(
        BlendOp::Add,
        BlendFactor::DstAlpha,
        BlendFactor::OneMinusSrcAlpha,
    )
}

pub(super) fn src_atop(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_atop_impl(asm, true)
}

pub(super) fn src_atop_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_atop_impl(asm, false)
}

fn dst_atop_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.mmadd(
        True,
        Dest::ACCUM,
        cs.ac,
        OpBd::OneMinusDstAaa,
        OpAc::DstRgb,
        OpBd::SrcAaa,
    );
    FixedFunctionAlpha::rgba(
        BlendOp::Add,
        BlendFactor::OneMinusDstAlpha,
        BlendFactor::SrcAlpha,
    )
}

pub(super) fn dst_atop(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_atop_impl(asm, true)
}

pub(super) fn dst_atop_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_atop_impl(asm, false)
}

fn xor_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.mmadd(
        True,
        Dest::ACCUM,
        cs.ac,
        OpBd::OneMinusDstAaa,
        OpAc::DstRgb,
        OpBd::OneMinusSrcAaa,
    );
    FixedFunctionAlpha::rgba(
        BlendOp::Add,
        BlendFactor::OneMinusDstAlpha,
        BlendFactor::OneMinusSrcAlpha,
    )
}

pub(super) fn xor(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    xor_impl(asm, true)
}

pub(super) fn xor_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    xor_impl(asm, false)
}

fn minus_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.sub(True, Dest::ACCUM, OpBd::DstRgb, cs.bd);
    FixedFunctionAlpha::rgba(BlendOp::ReverseSubtract, BlendFactor::One, BlendFactor::One)
}

pub(super) fn minus(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    minus_impl(asm, true)
}

pub(super) fn minus_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    minus_impl(asm, false)
}

pub(super) fn invert(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    asm.sub(True, Dest::ACCUM, OpBd::ConstOne, OpBd::DstRgb);
    FixedFunctionAlpha::rgb()
}

fn invert_rgb_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let cs = premultiplied_src(asm, premult);
    asm.sub(True, Dest::TEMP2, OpBd::ConstOne, OpBd::DstRgb);
    asm.mul(True, Dest::ACCUM, OpAc::Temp2, cs.bd);
    UNION_ALPHA
}

pub(super) fn invert_rgb(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    invert_rgb_impl(asm, true)
}

pub(super) fn invert_rgb_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    invert_rgb_impl(asm, false)
}

// --- Separable and HSL ops -------------------------------------------------

macro_rules! separable_pair {
    ($name:ident, $straight:ident, $core:path) => {
        pub(super) fn $name(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
            separable(asm, true, $core, UNION_ALPHA)
        }

        pub(super) fn $straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
            separable(asm, false, $core, UNION_ALPHA)
        }
    };
    ($name:ident, $straight:ident, $core:path, keep_dst_alpha) => {
        pub(super) fn $name(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
            separable(asm, true, $core, FixedFunctionAlpha::rgb())
        }

        pub(super) fn $straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
            separable(asm, false, $core, FixedFunctionAlpha::rgb())
        }
    };
}

separable_pair!(multiply, multiply_straight, core_multiply);
separable_pair!(screen, screen_straight, core_screen);
separable_pair!(overlay, overlay_straight, core_overlay);
separable_pair!(darken, darken_straight, core_darken);
separable_pair!(lighten, lighten_straight, core_lighten);
separable_pair!(color_dodge, color_dodge_straight, core_color_dodge);
separable_pair!(color_burn, color_burn_straight, core_color_burn);
separable_pair!(hard_light, hard_light_straight, core_hard_light);
separable_pair!(soft_light, soft_light_straight, core_soft_light);
separable_pair!(difference, difference_straight, core_difference);
separable_pair!(exclusion, exclusion_straight, core_exclusion);
separable_pair!(linear_dodge, linear_dodge_straight, core_linear_dodge);
separable_pair!(linear_burn, linear_burn_straight, core_linear_burn);
separable_pair!(vivid_light, vivid_light_straight, core_vivid_light);
separable_pair!(linear_light, linear_light_straight, core_linear_light);
separable_pair!(pin_light, pin_light_straight, core_pin_light);
separable_pair!(hard_mix, hard_mix_straight, core_hard_mix);
separable_pair!(red, red_straight, core_red, keep_dst_alpha);
separable_pair!(green, green_straight, core_green, keep_dst_alpha);
separable_pair!(blue, blue_straight, core_blue, keep_dst_alpha);
separable_pair!(hue, hue_straight, core_hue);
separable_pair!(saturation, saturation_straight, core_saturation);
separable_pair!(color, color_straight, core_color);
separable_pair!(luminosity, luminosity_straight, core_luminosity);
