//! Reference programs for every recognized advanced blend mode.
//!
//! Each supported (operation, overlap, premultiplied) combination has a
//! dedicated generator that drives the assembler to reproduce that mode's
//! exact reference microcode and reports the fixed-function alpha state the
//! program expects. The generator bodies are recognition targets: their
//! encoded output is hashed into the catalog, so the emitted sequences are
//! fixed data and must not be "improved".
//!
//! Combinations are only registered where their encodings are distinct.
//! Operations whose program never reads the source color (Zero, Dst, DstIn,
//! DstOut, Invert) encode identically for both premultiplication variants
//! and are registered once; Plus is registered under the disjoint model
//! where its short add form is unique.

mod conjoint;
mod disjoint;
mod helpers;
mod hsl;
mod uncorrelated;

use crate::assembler::{BlendUcode, UcodeAssembler};
use crate::descriptor::AdvancedBlendDescriptor;
use crate::descriptor::AdvancedBlendOp as Op;
use crate::descriptor::AdvancedBlendOverlap as Overlap;
use crate::state::FixedFunctionAlpha;

/// Emits one reference program and returns its fixed-function alpha
/// requirement.
pub type Generator = fn(&mut UcodeAssembler) -> FixedFunctionAlpha;

/// One row of the reference table.
pub(crate) struct Registration {
    pub descriptor: AdvancedBlendDescriptor,
    pub generate: Generator,
}

const fn entry(op: Op, overlap: Overlap, premult: bool, generate: Generator) -> Registration {
    Registration {
        descriptor: AdvancedBlendDescriptor::new(op, overlap, premult),
        generate,
    }
}

const fn pre(op: Op, overlap: Overlap, generate: Generator) -> Registration {
    entry(op, overlap, true, generate)
}

const fn straight(op: Op, overlap: Overlap, generate: Generator) -> Registration {
    entry(op, overlap, false, generate)
}

/// Runs the registered generator for `descriptor`, if the combination is
/// supported.
pub fn generate(descriptor: AdvancedBlendDescriptor) -> Option<(BlendUcode, FixedFunctionAlpha)> {
    let registration = REGISTRATIONS
        .iter()
        .find(|r| r.descriptor == descriptor)?;
    let mut asm = UcodeAssembler::new();
    let alpha = (registration.generate)(&mut asm);
    Some((asm.finish(), alpha))
}

pub(crate) static REGISTRATIONS: &[Registration] = &[
    // Uncorrelated
    pre(Op::Zero, Overlap::Uncorrelated, uncorrelated::zero),
    pre(Op::Src, Overlap::Uncorrelated, uncorrelated::src),
    straight(Op::Src, Overlap::Uncorrelated, uncorrelated::src_straight),
    pre(Op::Dst, Overlap::Uncorrelated, uncorrelated::dst),
    pre(Op::SrcOver, Overlap::Uncorrelated, uncorrelated::src_over),
    straight(Op::SrcOver, Overlap::Uncorrelated, uncorrelated::src_over_straight),
    pre(Op::DstOver, Overlap::Uncorrelated, uncorrelated::dst_over),
    straight(Op::DstOver, Overlap::Uncorrelated, uncorrelated::dst_over_straight),
    pre(Op::SrcIn, Overlap::Uncorrelated, uncorrelated::src_in),
    straight(Op::SrcIn, Overlap::Uncorrelated, uncorrelated::src_in_straight),
    pre(Op::DstIn, Overlap::Uncorrelated, uncorrelated::dst_in),
    pre(Op::SrcOut, Overlap::Uncorrelated, uncorrelated::src_out),
    straight(Op::SrcOut, Overlap::Uncorrelated, uncorrelated::src_out_straight),
    pre(Op::DstOut, Overlap::Uncorrelated, uncorrelated::dst_out),
    pre(Op::SrcAtop, Overlap::Uncorrelated, uncorrelated::src_atop),
    straight(Op::SrcAtop, Overlap::Uncorrelated, uncorrelated::src_atop_straight),
    pre(Op::DstAtop, Overlap::Uncorrelated, uncorrelated::dst_atop),
    straight(Op::DstAtop, Overlap::Uncorrelated, uncorrelated::dst_atop_straight),
    pre(Op::Xor, Overlap::Uncorrelated, uncorrelated::xor),
    straight(Op::Xor, Overlap::Uncorrelated, uncorrelated::xor_straight),
    pre(Op::Minus, Overlap::Uncorrelated, uncorrelated::minus),
    straight(Op::Minus, Overlap::Uncorrelated, uncorrelated::minus_straight),
    pre(Op::Invert, Overlap::Uncorrelated, uncorrelated::invert),
    pre(Op::InvertRgb, Overlap::Uncorrelated, uncorrelated::invert_rgb),
    straight(Op::InvertRgb, Overlap::Uncorrelated, uncorrelated::invert_rgb_straight),
    pre(Op::Multiply, Overlap::Uncorrelated, uncorrelated::multiply),
    straight(Op::Multiply, Overlap::Uncorrelated, uncorrelated::multiply_straight),
    pre(Op::Screen, Overlap::Uncorrelated, uncorrelated::screen),
    straight(Op::Screen, Overlap::Uncorrelated, uncorrelated::screen_straight),
    pre(Op::Overlay, Overlap::Uncorrelated, uncorrelated::overlay),
    straight(Op::Overlay, Overlap::Uncorrelated, uncorrelated::overlay_straight),
    pre(Op::Darken, Overlap::Uncorrelated, uncorrelated::darken),
    straight(Op::Darken, Overlap::Uncorrelated, uncorrelated::darken_straight),
    pre(Op::Lighten, Overlap::Uncorrelated, uncorrelated::lighten),
    straight(Op::Lighten, Overlap::Uncorrelated, uncorrelated::lighten_straight),
    pre(Op::ColorDodge, Overlap::Uncorrelated, uncorrelated::color_dodge),
    straight(Op::ColorDodge, Overlap::Uncorrelated, uncorrelated::color_dodge_straight),
    pre(Op::ColorBurn, Overlap::Uncorrelated, uncorrelated::color_burn),
    straight(Op::ColorBurn, Overlap::Uncorrelated, uncorrelated::color_burn_straight),
    pre(Op::HardLight, Overlap::Uncorrelated, uncorrelated::hard_light),
    straight(Op::HardLight, Overlap::Uncorrelated, uncorrelated::hard_light_straight),
    pre(Op::SoftLight, Overlap::Uncorrelated, uncorrelated::soft_light),
    straight(Op::SoftLight, Overlap::Uncorrelated, uncorrelated::soft_light_straight),
    pre(Op::Difference, Overlap::Uncorrelated, uncorrelated::difference),
    straight(Op::Difference, Overlap::Uncorrelated, uncorrelated::difference_straight),
    pre(Op::Exclusion, Overlap::Uncorrelated, uncorrelated::exclusion),
    straight(Op::Exclusion, Overlap::Uncorrelated, uncorrelated::exclusion_straight),
    pre(Op::LinearDodge, Overlap::Uncorrelated, uncorrelated::linear_dodge),
    straight(Op::LinearDodge, Overlap::Uncorrelated, uncorrelated::linear_dodge_straight),
    pre(Op::LinearBurn, Overlap::Uncorrelated, uncorrelated::linear_burn),
    straight(Op::LinearBurn, Overlap::Uncorrelated, uncorrelated::linear_burn_straight),
    pre(Op::VividLight, Overlap::Uncorrelated, uncorrelated::vivid_light),
    straight(Op::VividLight, Overlap::Uncorrelated, uncorrelated::vivid_light_straight),
    pre(Op::LinearLight, Overlap::Uncorrelated, uncorrelated::linear_light),
    straight(Op::LinearLight, Overlap::Uncorrelated, uncorrelated::linear_light_straight),
    pre(Op::PinLight, Overlap::Uncorrelated, uncorrelated::pin_light),
    straight(Op::PinLight, Overlap::Uncorrelated, uncorrelated::pin_light_straight),
    pre(Op::HardMix, Overlap::Uncorrelated, uncorrelated::hard_mix),
    straight(Op::HardMix, Overlap::Uncorrelated, uncorrelated::hard_mix_straight),
    pre(Op::Red, Overlap::Uncorrelated, uncorrelated::red),
    straight(Op::Red, Overlap::Uncorrelated, uncorrelated::red_straight),
    pre(Op::Green, Overlap::Uncorrelated, uncorrelated::green),
    straight(Op::Green, Overlap::Uncorrelated, uncorrelated::green_straight),
    pre(Op::Blue, Overlap::Uncorrelated, uncorrelated::blue),
    straight(Op::Blue, Overlap::Uncorrelated, uncorrelated::blue_straight),
    pre(Op::Hue, Overlap::Uncorrelated, uncorrelated::hue),
    straight(Op::Hue, Overlap::Uncorrelated, uncorrelated::hue_straight),
    pre(Op::Saturation, Overlap::Uncorrelated, uncorrelated::saturation),
    straight(Op::Saturation, Overlap::Uncorrelated, uncorrelated::saturation_straight),
    pre(Op::Color, Overlap::Uncorrelated, uncorrelated::color),
    straight(Op::Color, Overlap::Uncorrelated, uncorrelated::color_straight),
    pre(Op::Luminosity, Overlap::Uncorrelated, uncorrelated::luminosity),
    straight(Op::Luminosity, Overlap::Uncorrelated, uncorrelated::luminosity_straight),
    // Disjoint
    pre(Op::Src, Overlap::Disjoint, disjoint::src),
    straight(Op::Src, Overlap::Disjoint, disjoint::src_straight),
    pre(Op::Dst, Overlap::Disjoint, disjoint::dst),
    pre(Op::SrcOver, Overlap::Disjoint, disjoint::src_over),
    straight(Op::SrcOver, Overlap::Disjoint, disjoint::src_over_straight),
    pre(Op::DstOver, Overlap::Disjoint, disjoint::dst_over),
    straight(Op::DstOver, Overlap::Disjoint, disjoint::dst_over_straight),
    pre(Op::SrcIn, Overlap::Disjoint, disjoint::src_in),
    straight(Op::SrcIn, Overlap::Disjoint, disjoint::src_in_straight),
    pre(Op::DstIn, Overlap::Disjoint, disjoint::dst_in),
    pre(Op::SrcOut, Overlap::Disjoint, disjoint::src_out),
    straight(Op::SrcOut, Overlap::Disjoint, disjoint::src_out_straight),
    pre(Op::DstOut, Overlap::Disjoint, disjoint::dst_out),
    pre(Op::SrcAtop, Overlap::Disjoint, disjoint::src_atop),
    straight(Op::SrcAtop, Overlap::Disjoint, disjoint::src_atop_straight),
    pre(Op::DstAtop, Overlap::Disjoint, disjoint::dst_atop),
    straight(Op::DstAtop, Overlap::Disjoint, disjoint::dst_atop_straight),
    pre(Op::Xor, Overlap::Disjoint, disjoint::xor),
    straight(Op::Xor, Overlap::Disjoint, disjoint::xor_straight),
    pre(Op::Plus, Overlap::Disjoint, disjoint::plus),
    straight(Op::Plus, Overlap::Disjoint, disjoint::plus_straight),
    pre(Op::Multiply, Overlap::Disjoint, disjoint::multiply),
    straight(Op::Multiply, Overlap::Disjoint, disjoint::multiply_straight),
    pre(Op::Screen, Overlap::Disjoint, disjoint::screen),
    straight(Op::Screen, Overlap::Disjoint, disjoint::screen_straight),
    pre(Op::Overlay, Overlap::Disjoint, disjoint::overlay),
    straight(Op::Overlay, Overlap::Disjoint, disjoint::overlay_straight),
    pre(Op::Darken, Overlap::Disjoint, disjoint::darken),
    straight(Op::Darken, Overlap::Disjoint, disjoint::darken_straight),
    pre(Op::Lighten, Overlap::Disjoint, disjoint::lighten),
    straight(Op::Lighten, Overlap::Disjoint, disjoint::lighten_straight),
    pre(Op::ColorDodge, Overlap::Disjoint, disjoint::color_dodge),
    straight(Op::ColorDodge, Overlap::Disjoint, disjoint::color_dodge_straight),
    pre(Op::ColorBurn, Overlap::Disjoint, disjoint::color_burn),
    straight(Op::ColorBurn, Overlap::Disjoint, disjoint::color_burn_straight),
    pre(Op::HardLight, Overlap::Disjoint, disjoint::hard_light),
    straight(Op::HardLight, Overlap::Disjoint, disjoint::hard_light_straight),
    pre(Op::SoftLight, Overlap::Disjoint, disjoint::soft_light),
    straight(Op::SoftLight, Overlap::Disjoint, disjoint::soft_light_straight),
    pre(Op::Difference, Overlap::Disjoint, disjoint::difference),
    straight(Op::Difference, Overlap::Disjoint, disjoint::difference_straight),
    pre(Op::Exclusion, Overlap::Disjoint, disjoint::exclusion),
    straight(Op::Exclusion, Overlap::Disjoint, disjoint::exclusion_straight),
    // Conjoint
    pre(Op::Src, Overlap::Conjoint, conjoint::src),
    straight(Op::Src, Overlap::Conjoint, conjoint::src_straight),
    pre(Op::Dst, Overlap::Conjoint, conjoint::dst),
    pre(Op::SrcOver, Overlap::Conjoint, conjoint::src_over),
    straight(Op::SrcOver, Overlap::Conjoint, conjoint::src_over_straight),
    pre(Op::DstOver, Overlap::Conjoint, conjoint::dst_over),
    straight(Op::DstOver, Overlap::Conjoint, conjoint::dst_over_straight),
    pre(Op::SrcIn, Overlap::Conjoint, conjoint::src_in),
    straight(Op::SrcIn, Overlap::Conjoint, conjoint::src_in_straight),
    pre(Op::DstIn, Overlap::Conjoint, conjoint::dst_in),
    pre(Op::SrcOut, Overlap::Conjoint, conjoint::src_out),
    straight(Op::SrcOut, Overlap::Conjoint, conjoint::src_out_straight),
    pre(Op::DstOut, Overlap::Conjoint, conjoint::dst_out),
    pre(Op::SrcAtop, Overlap::Conjoint, conjoint::src_atop),
    straight(Op::SrcAtop, Overlap::Conjoint, conjoint::src_atop_straight),
    pre(Op::DstAtop, Overlap::Conjoint, conjoint::dst_atop),
    straight(Op::DstAtop, Overlap::Conjoint, conjoint::dst_atop_straight),
    pre(Op::Xor, Overlap::Conjoint, conjoint::xor),
    straight(Op::Xor, Overlap::Conjoint, conjoint::xor_straight),
    pre(Op::Multiply, Overlap::Conjoint, conjoint::multiply),
    straight(Op::Multiply, Overlap::Conjoint, conjoint::multiply_straight),
    pre(Op::Darken, Overlap::Conjoint, conjoint::darken),
    straight(Op::Darken, Overlap::Conjoint, conjoint::darken_straight),
    pre(Op::Lighten, Overlap::Conjoint, conjoint::lighten),
    straight(Op::Lighten, Overlap::Conjoint, conjoint::lighten_straight),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registrations_are_unique_per_descriptor() {
        let mut seen = HashSet::new();
        for registration in REGISTRATIONS {
            assert!(
                seen.insert(registration.descriptor),
                "{:?} registered twice",
                registration.descriptor
            );
        }
    }

    #[test]
    fn source_free_ops_register_a_single_variant() {
        for registration in REGISTRATIONS {
            let d = registration.descriptor;
            if matches!(d.op, Op::Zero | Op::Dst | Op::DstIn | Op::DstOut | Op::Invert) {
                assert!(d.src_premultiplied, "{d:?} must only exist premultiplied");
            }
        }
    }

    #[test]
    fn every_generator_emits_at_least_one_word() {
        for registration in REGISTRATIONS {
            let mut asm = UcodeAssembler::new();
            (registration.generate)(&mut asm);
            let ucode = asm.finish();
            assert!(
                !ucode.code().is_empty() && ucode.code().len() <= 128,
                "{:?} emitted {} words",
                registration.descriptor,
                ucode.code().len()
            );
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for registration in REGISTRATIONS {
            let (a, _) = generate(registration.descriptor).unwrap();
            let (b, _) = generate(registration.descriptor).unwrap();
            assert_eq!(a, b, "{:?} not deterministic", registration.descriptor);
        }
    }
}
