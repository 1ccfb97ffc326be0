//! Workspace-level smoke test: the advanced blend pipeline end to end, the
//! way the GPU command processor drives it — seek, stream words, program
//! blend state, recognize.

use half::f16;
use strato_gpu_blend::{
    AdvancedBlendOp, AdvancedBlendOverlap, AdvancedBlendState, BlendCatalog, BlendFactor, BlendOp,
    FixedFunctionAlpha,
};

#[test]
fn command_stream_recognizes_disjoint_plus() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let catalog = BlendCatalog::global().expect("catalog");
    assert!(!catalog.is_empty());

    let descriptor = strato_gpu_blend::AdvancedBlendDescriptor::new(
        AdvancedBlendOp::Plus,
        AdvancedBlendOverlap::Disjoint,
        false,
    );
    let (ucode, alpha) = strato_gpu_blend::reference::generate(descriptor).expect("reference");

    let mut state = AdvancedBlendState::new();
    state.set_code_start(0);
    for &word in ucode.code() {
        state.push_code_word(word);
    }
    state.set_alpha_state(alpha);
    assert_eq!(state.try_recognize(catalog, 2), Some(descriptor));

    // The same upload stops matching as soon as the guest reprograms the
    // fixed-function alpha equation underneath it.
    state.set_alpha_state(FixedFunctionAlpha::rgba(
        BlendOp::Add,
        BlendFactor::One,
        BlendFactor::OneMinusSrcAlpha,
    ));
    assert_eq!(state.try_recognize(catalog, 2), None);

    // Blend constants are ignored for programs that reference none.
    state.set_alpha_state(alpha);
    state.set_constant(0, [f16::from_f32(0.25); 3]);
    assert_eq!(state.try_recognize(catalog, 2), Some(descriptor));
}
