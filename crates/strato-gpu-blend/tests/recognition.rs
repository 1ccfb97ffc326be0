//! End-to-end recognition tests: every catalog entry round-trips through the
//! upload buffer, and structural matches are rejected when the guest's
//! constants or alpha state disagree with the reference program's.

use half::f16;
use pretty_assertions::assert_eq;
use strato_gpu_blend::reference;
use strato_gpu_blend::ucode::{encode_instruction, CondCode, Dest, OpAc, OpBd, UcodeOp};
use strato_gpu_blend::{
    ucode_hash, AdvancedBlendDescriptor, AdvancedBlendOp, AdvancedBlendOverlap, AdvancedBlendState,
    BlendCatalog, BlendFactor, BlendOp, BlendUcode, FixedFunctionAlpha,
};

fn catalog() -> BlendCatalog {
    BlendCatalog::build().expect("catalog build")
}

/// Builds guest-side state exactly matching a generated reference program.
fn state_for(ucode: &BlendUcode, alpha: FixedFunctionAlpha) -> AdvancedBlendState {
    let mut state = AdvancedBlendState::new();
    state.set_code_start(0);
    for &word in ucode.code() {
        state.push_code_word(word);
    }
    for (slot, constant) in ucode.constants().iter().enumerate() {
        if let Some(constant) = constant {
            state.set_constant(slot, constant.to_f16());
        }
    }
    state.set_alpha_state(alpha);
    state
}

fn soft_light() -> AdvancedBlendDescriptor {
    AdvancedBlendDescriptor::new(
        AdvancedBlendOp::SoftLight,
        AdvancedBlendOverlap::Uncorrelated,
        true,
    )
}

#[test]
fn every_catalog_entry_round_trips() {
    let catalog = catalog();
    let mut descriptors = Vec::new();
    for overlap in [
        AdvancedBlendOverlap::Uncorrelated,
        AdvancedBlendOverlap::Disjoint,
        AdvancedBlendOverlap::Conjoint,
    ] {
        for premult in [true, false] {
            for op in ALL_OPS {
                descriptors.push(AdvancedBlendDescriptor::new(op, overlap, premult));
            }
        }
    }
    let mut recognized = 0;
    for descriptor in descriptors {
        let Some((ucode, alpha)) = reference::generate(descriptor) else {
            continue;
        };
        let state = state_for(&ucode, alpha);
        assert_eq!(
            state.try_recognize(&catalog, ucode.code().len()),
            Some(descriptor),
            "{descriptor:?} did not round-trip"
        );
        recognized += 1;
    }
    assert_eq!(recognized, catalog.len());
}

#[test]
fn no_two_entries_share_a_hash() {
    // `build` fails loudly on collisions; cross-check the raw programs too.
    let mut hashes = std::collections::HashMap::new();
    for overlap in [
        AdvancedBlendOverlap::Uncorrelated,
        AdvancedBlendOverlap::Disjoint,
        AdvancedBlendOverlap::Conjoint,
    ] {
        for premult in [true, false] {
            for op in ALL_OPS {
                let descriptor = AdvancedBlendDescriptor::new(op, overlap, premult);
                if let Some((ucode, _)) = reference::generate(descriptor) {
                    if let Some(other) = hashes.insert(ucode_hash(ucode.code()), descriptor) {
                        panic!("{descriptor:?} collides with {other:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn stale_tail_words_do_not_affect_recognition() {
    let catalog = catalog();
    let descriptor = AdvancedBlendDescriptor::new(
        AdvancedBlendOp::SrcOver,
        AdvancedBlendOverlap::Uncorrelated,
        true,
    );
    let (ucode, alpha) = reference::generate(descriptor).unwrap();
    let mut state = state_for(&ucode, alpha);
    // A previous, longer upload left garbage behind the program.
    for garbage in 0..32u32 {
        state.push_code_word(0xdead_0000 | garbage);
    }
    assert_eq!(
        state.try_recognize(&catalog, ucode.code().len()),
        Some(descriptor)
    );
}

#[test]
fn disjoint_plus_straight_is_the_two_instruction_reference_shape() {
    let descriptor = AdvancedBlendDescriptor::new(
        AdvancedBlendOp::Plus,
        AdvancedBlendOverlap::Disjoint,
        false,
    );
    let (ucode, alpha) = reference::generate(descriptor).unwrap();

    // Multiply the source by its alpha, then add the destination.
    let expected = [
        encode_instruction(
            CondCode::True,
            UcodeOp::Mmadd,
            0,
            Dest::ACCUM,
            OpAc::SrcRgb,
            OpBd::SrcAaa,
            OpAc::SrcRgb,
            OpBd::ConstZero,
        ),
        encode_instruction(
            CondCode::True,
            UcodeOp::Add,
            0,
            Dest::ACCUM,
            OpAc::SrcRgb,
            OpBd::Accum,
            OpAc::SrcRgb,
            OpBd::DstRgb,
        ),
    ];
    assert_eq!(ucode.code(), expected.as_slice());
    assert_eq!(
        alpha,
        FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::One)
    );

    let catalog = catalog();
    let state = state_for(&ucode, alpha);
    assert_eq!(state.try_recognize(&catalog, 2), Some(descriptor));
}

#[test]
fn zero_length_program_never_matches() {
    let catalog = catalog();
    let descriptor = AdvancedBlendDescriptor::new(
        AdvancedBlendOp::SrcOver,
        AdvancedBlendOverlap::Uncorrelated,
        true,
    );
    let (ucode, alpha) = reference::generate(descriptor).unwrap();
    let state = state_for(&ucode, alpha);
    assert_eq!(state.try_recognize(&catalog, 0), None);
}

#[test]
fn perturbed_constant_is_rejected_despite_matching_code() {
    let catalog = catalog();
    let (ucode, alpha) = reference::generate(soft_light()).unwrap();
    let mut state = state_for(&ucode, alpha);
    // Slot 0 holds the 0.2605 / -0.7817 / 0.3022 cubic coefficients; nudge
    // one of them past half-precision rounding.
    state.set_constant(
        0,
        [
            f16::from_f32(0.27),
            f16::from_f32(-0.7817),
            f16::from_f32(0.3022),
        ],
    );
    assert_eq!(state.try_recognize(&catalog, ucode.code().len()), None);
}

#[test]
fn constant_differences_below_half_precision_still_match() {
    let catalog = catalog();
    let (ucode, alpha) = reference::generate(soft_light()).unwrap();
    let mut state = state_for(&ucode, alpha);
    // 1e-5 is far below f16 resolution around 0.26, so the rounded value is
    // bit-identical to the reference's.
    state.set_constant(
        0,
        [
            f16::from_f32(0.2605 + 1e-5),
            f16::from_f32(-0.7817),
            f16::from_f32(0.3022),
        ],
    );
    assert_eq!(
        state.try_recognize(&catalog, ucode.code().len()),
        Some(soft_light())
    );
}

#[test]
fn missing_constants_are_rejected() {
    let catalog = catalog();
    let (ucode, alpha) = reference::generate(soft_light()).unwrap();
    let mut state = AdvancedBlendState::new();
    for &word in ucode.code() {
        state.push_code_word(word);
    }
    state.set_alpha_state(alpha);
    // Constants were never programmed; the all-zero slots must not match.
    assert_eq!(state.try_recognize(&catalog, ucode.code().len()), None);
}

#[test]
fn rgba_alpha_equation_mismatch_is_rejected() {
    let catalog = catalog();
    let descriptor = AdvancedBlendDescriptor::new(
        AdvancedBlendOp::SrcOver,
        AdvancedBlendOverlap::Uncorrelated,
        true,
    );
    let (ucode, alpha) = reference::generate(descriptor).unwrap();
    let mut state = state_for(&ucode, alpha);
    state.set_alpha_state(FixedFunctionAlpha::rgba(
        BlendOp::Add,
        BlendFactor::One,
        BlendFactor::One,
    ));
    assert_eq!(state.try_recognize(&catalog, ucode.code().len()), None);
}

#[test]
fn in_band_alpha_entry_rejects_fixed_function_state() {
    let catalog = catalog();
    let descriptor = AdvancedBlendDescriptor::new(
        AdvancedBlendOp::SrcIn,
        AdvancedBlendOverlap::Disjoint,
        true,
    );
    let (ucode, alpha) = reference::generate(descriptor).unwrap();
    assert_eq!(alpha, FixedFunctionAlpha::Disabled);
    let mut state = state_for(&ucode, alpha);
    state.set_alpha_state(FixedFunctionAlpha::rgba(
        BlendOp::Add,
        BlendFactor::One,
        BlendFactor::One,
    ));
    assert_eq!(state.try_recognize(&catalog, ucode.code().len()), None);
}

const ALL_OPS: [AdvancedBlendOp; 40] = [
    AdvancedBlendOp::Zero,
    AdvancedBlendOp::Src,
    AdvancedBlendOp::Dst,
    AdvancedBlendOp::SrcOver,
    AdvancedBlendOp::DstOver,
    AdvancedBlendOp::SrcIn,
    AdvancedBlendOp::DstIn,
    AdvancedBlendOp::SrcOut,
    AdvancedBlendOp::DstOut,
    AdvancedBlendOp::SrcAtop,
    AdvancedBlendOp::DstAtop,
    AdvancedBlendOp::Xor,
    AdvancedBlendOp::Plus,
    AdvancedBlendOp::Minus,
    AdvancedBlendOp::Multiply,
    AdvancedBlendOp::Screen,
    AdvancedBlendOp::Overlay,
    AdvancedBlendOp::Darken,
    AdvancedBlendOp::Lighten,
    AdvancedBlendOp::ColorDodge,
    AdvancedBlendOp::ColorBurn,
    AdvancedBlendOp::HardLight,
    AdvancedBlendOp::SoftLight,
    AdvancedBlendOp::Difference,
    AdvancedBlendOp::Exclusion,
    AdvancedBlendOp::Invert,
    AdvancedBlendOp::InvertRgb,
    AdvancedBlendOp::LinearDodge,
    AdvancedBlendOp::LinearBurn,
    AdvancedBlendOp::VividLight,
    AdvancedBlendOp::LinearLight,
    AdvancedBlendOp::PinLight,
    AdvancedBlendOp::HardMix,
    AdvancedBlendOp::Red,
    AdvancedBlendOp::Green,
    AdvancedBlendOp::Blue,
    AdvancedBlendOp::Hue,
    AdvancedBlendOp::Saturation,
    AdvancedBlendOp::Color,
    AdvancedBlendOp::Luminosity,
];
