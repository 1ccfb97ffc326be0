//! Content-addressed catalog of reference blend programs.
//!
//! The catalog is built once by running every registered reference generator
//! and keying the result by a 128-bit content hash of the encoded words.
//! The hash function is frozen: changing it invalidates every precomputed
//! key and must be done as one atomic regeneration of the whole catalog.

use crate::assembler::RgbConstant;
use crate::descriptor::AdvancedBlendDescriptor;
use crate::reference::{self, REGISTRATIONS};
use crate::state::FixedFunctionAlpha;
use crate::ucode_hash;
use hashbrown::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Everything recognition needs to cross-check a structural hash match.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub descriptor: AdvancedBlendDescriptor,
    /// Constant pool the program expects, sparse by slot.
    pub constants: Vec<Option<RgbConstant>>,
    /// Fixed-function alpha state the program expects.
    pub alpha: FixedFunctionAlpha,
}

/// Fatal catalog construction failure.
#[derive(Debug, Clone, Error)]
pub enum CatalogBuildError {
    /// Two distinct reference programs hashed identically. The catalog would
    /// silently drop one of them, so construction aborts instead.
    #[error(
        "advanced blend programs {first:?} and {second:?} collide on hash {hash:#034x}"
    )]
    HashCollision {
        hash: u128,
        first: AdvancedBlendDescriptor,
        second: AdvancedBlendDescriptor,
    },
}

/// Immutable map from code hash to catalog entry. Built once at startup and
/// shared read-only afterwards.
#[derive(Debug)]
pub struct BlendCatalog {
    entries: HashMap<u128, CatalogEntry>,
}

impl BlendCatalog {
    /// Runs every reference generator and indexes the results by content
    /// hash. A duplicate hash between two entries is a configuration error,
    /// never a silent overwrite.
    pub fn build() -> Result<BlendCatalog, CatalogBuildError> {
        let mut entries = HashMap::with_capacity(REGISTRATIONS.len());
        for registration in REGISTRATIONS {
            let Some((ucode, alpha)) = reference::generate(registration.descriptor) else {
                // Registrations are generated from the same table `generate`
                // consults, so every descriptor resolves.
                continue;
            };
            let hash = ucode_hash(ucode.code());
            let entry = CatalogEntry {
                descriptor: registration.descriptor,
                constants: ucode.constants().to_vec(),
                alpha,
            };
            if let Some(existing) = entries.insert(hash, entry) {
                warn!(
                    ?hash,
                    first = ?existing.descriptor,
                    second = ?registration.descriptor,
                    "advanced blend catalog hash collision"
                );
                return Err(CatalogBuildError::HashCollision {
                    hash,
                    first: existing.descriptor,
                    second: registration.descriptor,
                });
            }
        }
        debug!(entries = entries.len(), "built advanced blend catalog");
        Ok(BlendCatalog { entries })
    }

    /// The process-wide catalog, built on first use.
    pub fn global() -> Result<&'static BlendCatalog, CatalogBuildError> {
        static CATALOG: OnceLock<Result<BlendCatalog, CatalogBuildError>> = OnceLock::new();
        CATALOG.get_or_init(BlendCatalog::build).as_ref().map_err(Clone::clone)
    }

    pub fn get(&self, hash: u128) -> Option<&CatalogEntry> {
        self.entries.get(&hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_succeeds_with_one_entry_per_registration() {
        let catalog = BlendCatalog::build().unwrap();
        assert_eq!(catalog.len(), REGISTRATIONS.len());
    }

    #[test]
    fn every_entry_is_found_by_its_own_code_hash() {
        let catalog = BlendCatalog::build().unwrap();
        for registration in REGISTRATIONS {
            let (ucode, _) = reference::generate(registration.descriptor).unwrap();
            let entry = catalog
                .get(ucode_hash(ucode.code()))
                .unwrap_or_else(|| panic!("{:?} missing", registration.descriptor));
            assert_eq!(entry.descriptor, registration.descriptor);
        }
    }

    #[test]
    fn global_returns_one_shared_instance() {
        let a = BlendCatalog::global().unwrap();
        let b = BlendCatalog::global().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn empty_code_hash_is_absent() {
        let catalog = BlendCatalog::build().unwrap();
        assert!(catalog.get(ucode_hash(&[])).is_none());
    }
}
