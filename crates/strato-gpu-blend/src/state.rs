//! Fixed-function alpha state accompanying a blend microcode program.
//!
//! Most reference programs only compute the RGB result in microcode and lean
//! on the ordinary fixed-function blender for the alpha channel. Each catalog
//! entry therefore records the alpha configuration the program was generated
//! against, and recognition cross-checks it against the state the guest has
//! actually programmed.

/// Blend equation for the fixed-function alpha path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    /// `src * src_factor + dst * dst_factor`
    Add,
    /// `src * src_factor - dst * dst_factor`
    Subtract,
    /// `dst * dst_factor - src * src_factor`
    ReverseSubtract,
    /// `min(src, dst)`; factors do not apply.
    Minimum,
    /// `max(src, dst)`; factors do not apply.
    Maximum,
}

/// Blend factor for the fixed-function alpha path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

/// Channels the fixed-function blender covers while microcode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaCoverage {
    /// RGB only; destination alpha is preserved and the alpha equation
    /// fields are irrelevant.
    Rgb,
    /// RGB plus an alpha channel equation.
    Rgba,
}

/// Fixed-function alpha requirement of a blend microcode program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixedFunctionAlpha {
    /// The program computes alpha in-band (via the red-to-alpha swizzle);
    /// fixed-function blending must be off.
    Disabled,
    Enabled {
        coverage: AlphaCoverage,
        op: BlendOp,
        src_factor: BlendFactor,
        dst_factor: BlendFactor,
    },
}

impl FixedFunctionAlpha {
    /// RGB-only coverage; destination alpha passes through untouched. The
    /// equation fields are placeholders and never compared.
    pub const fn rgb() -> Self {
        FixedFunctionAlpha::Enabled {
            coverage: AlphaCoverage::Rgb,
            op: BlendOp::Add,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
        }
    }

    /// Full coverage with an explicit alpha equation.
    pub const fn rgba(op: BlendOp, src_factor: BlendFactor, dst_factor: BlendFactor) -> Self {
        FixedFunctionAlpha::Enabled {
            coverage: AlphaCoverage::Rgba,
            op,
            src_factor,
            dst_factor,
        }
    }

    /// Whether the state the guest programmed satisfies this requirement.
    ///
    /// Enable masks must agree exactly. The alpha equation participates only
    /// under [`AlphaCoverage::Rgba`]; with RGB-only coverage the hardware
    /// never evaluates it, so mismatching equation fields are accepted.
    pub fn matches(&self, programmed: &FixedFunctionAlpha) -> bool {
        match (*self, *programmed) {
            (FixedFunctionAlpha::Disabled, FixedFunctionAlpha::Disabled) => true,
            (
                FixedFunctionAlpha::Enabled {
                    coverage,
                    op,
                    src_factor,
                    dst_factor,
                },
                FixedFunctionAlpha::Enabled {
                    coverage: got_coverage,
                    op: got_op,
                    src_factor: got_src,
                    dst_factor: got_dst,
                },
            ) => {
                if coverage != got_coverage {
                    return false;
                }
                match coverage {
                    AlphaCoverage::Rgb => true,
                    AlphaCoverage::Rgba => {
                        op == got_op && src_factor == got_src && dst_factor == got_dst
                    }
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_only_matches_disabled() {
        assert!(FixedFunctionAlpha::Disabled.matches(&FixedFunctionAlpha::Disabled));
        assert!(!FixedFunctionAlpha::Disabled.matches(&FixedFunctionAlpha::rgb()));
        assert!(!FixedFunctionAlpha::rgb().matches(&FixedFunctionAlpha::Disabled));
    }

    #[test]
    fn rgb_coverage_ignores_equation_fields() {
        let programmed = FixedFunctionAlpha::Enabled {
            coverage: AlphaCoverage::Rgb,
            op: BlendOp::Maximum,
            src_factor: BlendFactor::DstAlpha,
            dst_factor: BlendFactor::SrcAlpha,
        };
        assert!(FixedFunctionAlpha::rgb().matches(&programmed));
    }

    #[test]
    fn rgba_coverage_compares_the_full_equation() {
        let want = FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::One);
        assert!(want.matches(&FixedFunctionAlpha::rgba(
            BlendOp::Add,
            BlendFactor::One,
            BlendFactor::One
        )));
        assert!(!want.matches(&FixedFunctionAlpha::rgba(
            BlendOp::Add,
            BlendFactor::One,
            BlendFactor::OneMinusSrcAlpha
        )));
        assert!(!want.matches(&FixedFunctionAlpha::rgba(
            BlendOp::Subtract,
            BlendFactor::One,
            BlendFactor::One
        )));
    }

    #[test]
    fn coverage_mask_mismatch_is_rejected() {
        let want = FixedFunctionAlpha::rgba(BlendOp::Add, BlendFactor::One, BlendFactor::Zero);
        assert!(!want.matches(&FixedFunctionAlpha::rgb()));
    }
}
