//! Advanced blend recognition over the upload buffer.
//!
//! Per-context state fed by the GPU command processor: the microcode upload
//! buffer plus the blend constants and fixed-function alpha configuration
//! the guest last programmed (those arrive through separate set-state
//! commands, not the code stream). Recognition hashes the declared prefix of
//! the buffer, looks the hash up in the catalog, and cross-checks constants
//! and alpha state before trusting the match.

use crate::assembler::{MAX_UCODE_CONSTANTS, MAX_UCODE_WORDS};
use crate::catalog::BlendCatalog;
use crate::descriptor::AdvancedBlendDescriptor;
use crate::state::FixedFunctionAlpha;
use crate::ucode_hash;
use crate::upload::UcodeUploadBuffer;
use half::f16;
use tracing::trace;

/// Per-render-context advanced blend tracking.
///
/// Single-writer: the thread driving the context's command stream. No
/// operation here blocks, retries, or errors; recognition misses are the
/// routine outcome.
#[derive(Debug, Clone)]
pub struct AdvancedBlendState {
    buffer: UcodeUploadBuffer,
    /// Half-precision RGB constants, one slot per constant file entry.
    constants: [[f16; 3]; MAX_UCODE_CONSTANTS],
    alpha: FixedFunctionAlpha,
}

impl Default for AdvancedBlendState {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvancedBlendState {
    pub fn new() -> Self {
        AdvancedBlendState {
            buffer: UcodeUploadBuffer::new(),
            constants: [[f16::ZERO; 3]; MAX_UCODE_CONSTANTS],
            alpha: FixedFunctionAlpha::Disabled,
        }
    }

    /// Repositions the microcode upload cursor.
    pub fn set_code_start(&mut self, offset: u32) {
        self.buffer.set_start(offset);
    }

    /// Streams one microcode word into the upload buffer.
    pub fn push_code_word(&mut self, word: u32) {
        self.buffer.push_word(word);
    }

    /// Records the half-precision RGB constant the guest wrote to `slot`.
    /// Out-of-range slots are ignored, matching the hardware's register
    /// decode.
    pub fn set_constant(&mut self, slot: usize, rgb: [f16; 3]) {
        let Some(entry) = self.constants.get_mut(slot) else {
            trace!(slot, "blend constant write out of range");
            return;
        };
        *entry = rgb;
    }

    /// Records the fixed-function alpha state the guest configured.
    pub fn set_alpha_state(&mut self, alpha: FixedFunctionAlpha) {
        self.alpha = alpha;
    }

    /// Identifies which known blend operation the buffer's current contents
    /// implement, if any.
    ///
    /// `declared_len` is the instruction count the guest claims to have
    /// uploaded; it is untrusted and clamped to the buffer capacity. Absence
    /// from the catalog, a constant mismatch beyond half-precision rounding,
    /// or a differing alpha configuration all yield `None`.
    pub fn try_recognize(
        &self,
        catalog: &BlendCatalog,
        declared_len: usize,
    ) -> Option<AdvancedBlendDescriptor> {
        let len = declared_len.min(MAX_UCODE_WORDS);
        let entry = catalog.get(ucode_hash(&self.buffer.words()[..len]))?;
        for (slot, constant) in entry.constants.iter().enumerate() {
            let Some(constant) = constant else { continue };
            if constant.to_f16() != self.constants[slot] {
                return None;
            }
        }
        if !entry.alpha.matches(&self.alpha) {
            return None;
        }
        trace!(descriptor = ?entry.descriptor, "advanced blend recognized");
        Some(entry.descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_recognizes_nothing() {
        let catalog = BlendCatalog::build().unwrap();
        let state = AdvancedBlendState::new();
        assert_eq!(state.try_recognize(&catalog, 0), None);
    }

    #[test]
    fn out_of_range_constant_slot_is_ignored() {
        let mut state = AdvancedBlendState::new();
        state.set_constant(MAX_UCODE_CONSTANTS, [f16::ONE; 3]);
        assert_eq!(state.constants, [[f16::ZERO; 3]; MAX_UCODE_CONSTANTS]);
    }

    #[test]
    fn declared_length_is_clamped_to_capacity() {
        let catalog = BlendCatalog::build().unwrap();
        let state = AdvancedBlendState::new();
        // Absurd guest-supplied lengths must neither panic nor read out of
        // bounds; an all-zero buffer matches nothing either way.
        assert_eq!(state.try_recognize(&catalog, usize::MAX), None);
    }
}
