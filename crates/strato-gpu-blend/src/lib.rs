//! Advanced-blend microcode recognition for the guest GPU.
//!
//! The guest GPU exposes advanced blend operations through a tiny
//! programmable blend unit: drivers upload a fixed-width, non-branching
//! microcode program plus a small constant file, and the hardware runs it
//! per fragment. Interpreting that microcode per pixel is a non-starter for
//! emulation, so this crate instead *recognizes* uploads: it carries a
//! catalog of every reference program the guest driver can produce (one per
//! supported blend operation x coverage-overlap model x premultiplication
//! variant, keyed by a 128-bit content hash of the encoded words) and maps
//! an uploaded buffer back to the blend operation it implements. The
//! emulator then substitutes a native blend path for the program.
//!
//! The microcode is never executed here; programs are recognition targets
//! only.

#![forbid(unsafe_code)]

pub mod assembler;
pub mod catalog;
pub mod descriptor;
pub mod recognizer;
pub mod reference;
pub mod state;
pub mod ucode;
pub mod upload;

pub use crate::assembler::{BlendUcode, RgbConstant, UcodeAssembler};
pub use crate::catalog::{BlendCatalog, CatalogBuildError, CatalogEntry};
pub use crate::descriptor::{AdvancedBlendDescriptor, AdvancedBlendOp, AdvancedBlendOverlap};
pub use crate::recognizer::AdvancedBlendState;
pub use crate::state::{AlphaCoverage, BlendFactor, BlendOp, FixedFunctionAlpha};
pub use crate::upload::UcodeUploadBuffer;

/// 128-bit content hash over a program's native byte representation.
///
/// The hash choice is frozen at catalog-generation time; every precomputed
/// catalog key depends on it.
pub fn ucode_hash(code: &[u32]) -> u128 {
    xxhash_rust::xxh3::xxh3_128(bytemuck::cast_slice(code))
}
