//! Reference programs for the conjoint overlap model.
//!
//! Source and destination regions are assumed to overlap as much as
//! possible: the overlapped weight is `min(as, ad)` and only the coverage
//! excess `max(as - ad, 0)` / `max(ad - as, 0)` shows either region alone.
//! Union alpha becomes `max(as, ad)` and the intersection `min(as, ad)`,
//! both of which the fixed-function min/max equations express directly; only
//! XOR's `|as - ad|` needs in-band alpha.

use crate::assembler::UcodeAssembler;
use crate::reference::helpers::{
    core_darken, core_lighten, core_multiply, coverage_p1, coverage_p2, load_straight_colors,
    load_straight_dst, overlapped_combine, overlapped_pd, OverlapKind, RegionSource, SrcColor,
};
use crate::state::{BlendFactor, BlendOp, FixedFunctionAlpha};
use crate::ucode::CondCode::True;
use crate::ucode::{Dest, OpAc, OpBd};

const KIND: OverlapKind = OverlapKind::Conjoint;

/// Placeholder for generators whose body never reads the source color.
const NO_SRC: SrcColor = SrcColor {
    ac: OpAc::SrcRgb,
    bd: OpBd::SrcRgb,
};

/// `ao = max(as, ad)`, the conjoint union coverage.
const UNION_ALPHA: FixedFunctionAlpha =
    FixedFunctionAlpha::rgba(BlendOp::Maximum, BlendFactor::One, BlendFactor::One);

/// `ao = min(as, ad)`, the conjoint intersection coverage.
const INTERSECT_ALPHA: FixedFunctionAlpha =
    FixedFunctionAlpha::rgba(BlendOp::Minimum, BlendFactor::One, BlendFactor::One);

const SRC_ALPHA: FixedFunctionAlpha =
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::Zero);

const DST_ALPHA: FixedFunctionAlpha =
    FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::Zero, BlendFactor::One);

fn separable(
    asm: &mut UcodeAssembler,
    premult: bool,
    core: fn(&mut UcodeAssembler, SrcColor),
) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    core(asm, sc);
    overlapped_combine(asm, KIND, sc);
    UNION_ALPHA
}

// --- Porter-Duff ops -------------------------------------------------------

fn src_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, Some(RegionSource::Src), true, false);
    SRC_ALPHA
}

pub(super) fn src(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_impl(asm, true)
}

pub(super) fn src_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_impl(asm, false)
}

pub(super) fn dst(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    load_straight_dst(asm);
    overlapped_pd(asm, KIND, NO_SRC, Some(RegionSource::Dst), false, true);
    DST_ALPHA
}

fn src_over_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, Some(RegionSource::Src), true, true);
    UNION_ALPHA
}

pub(super) fn src_over(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_over_impl(asm, true)
}

pub(super) fn src_over_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_over_impl(asm, false)
}

fn dst_over_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, Some(RegionSource::Dst), true, true);
    UNION_ALPHA
}

pub(super) fn dst_over(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_over_impl(asm, true)
}

pub(super) fn dst_over_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_over_impl(asm, false)
}

fn src_in_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, Some(RegionSource::Src), false, false);
    INTERSECT_ALPHA
}

pub(super) fn src_in(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_in_impl(asm, true)
}

pub(super) fn src_in_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_in_impl(asm, false)
}

pub(super) fn dst_in(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    load_straight_dst(asm);
    overlapped_pd(asm, KIND, NO_SRC, Some(RegionSource::Dst), false, false);
    INTERSECT_ALPHA
}

fn src_out_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, None, true, false);
    FixedFunctionAlpha::rgba(BlendOp::Subtract, BlendFactor::One, BlendFactor::One)
}

pub(super) fn src_out(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_out_impl(asm, true)
}

pub(super) fn src_out_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_out_impl(asm, false)
}

pub(super) fn dst_out(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    load_straight_dst(asm);
    overlapped_pd(asm, KIND, NO_SRC, None, false, true);
    FixedFunctionAlpha::rgba(BlendOp::ReverseSubtract, BlendFactor::One, BlendFactor::One)
}

fn src_atop_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, Some(RegionSource::Src), false, true);
    DST_ALPHA
}

pub(super) fn src_atop(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_atop_impl(asm, true)
}

pub(super) fn src_atop_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    src_atop_impl(asm, false)
}

fn dst_atop_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    overlapped_pd(asm, KIND, sc, Some(RegionSource::Dst), true, false);
    SRC_ALPHA
}

pub(super) fn dst_atop(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_atop_impl(asm, true)
}

pub(super) fn dst_atop_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    dst_atop_impl(asm, false)
}

fn xor_impl(asm: &mut UcodeAssembler, premult: bool) -> FixedFunctionAlpha {
    let sc = load_straight_colors(asm, premult);
    coverage_p1(asm, KIND, Dest::TEMP2);
    asm.mul(True, Dest::ACCUM, sc.ac, OpBd::Temp2);
    coverage_p2(asm, KIND, Dest::TEMP0);
    asm.madd(True, Dest::ACCUM, OpAc::Temp1, OpBd::Temp0, OpAc::Accum);
    asm.add(True, Dest::TEMP2, OpBd::Temp2, OpBd::Temp0);
    asm.mov(True, Dest::ACCUM.red_to_alpha(), OpBd::Temp2);
    FixedFunctionAlpha::Disabled
}

pub(super) fn xor(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    xor_impl(asm, true)
}

pub(super) fn xor_straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
    xor_impl(asm, false)
}

// --- Separable ops ---------------------------------------------------------

macro_rules! separable_pair {
    ($name:ident, $straight:ident, $core:path) => {
        pub(super) fn $name(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
            separable(asm, true, $core)
        }

        pub(super) fn $straight(asm: &mut UcodeAssembler) -> FixedFunctionAlpha {
            separable(asm, false, $core)
        }
    };
}

separable_pair!(multiply, multiply_straight, core_multiply);
separable_pair!(darken, darken_straight, core_darken);
separable_pair!(lighten, lighten_straight, core_lighten);
