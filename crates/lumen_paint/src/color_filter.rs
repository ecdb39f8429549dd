//! Color filters
//!
//! Color filters are immutable value objects applied per-pixel after a color
//! source is sampled. They are shared by reference (`Arc`) between the paint
//! state and image-filter graphs that wrap them.

use bytemuck::{Pod, Zeroable};
use lumen_core::Color;

use crate::formats::BlendMode;

/// 4x5 color transform in row-major order.
///
/// Output channels are computed as `out = m * [r, g, b, a, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ColorMatrix {
    pub array: [f32; 20],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix {
        array: [
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    };
}

/// A per-pixel color transformation
#[derive(Clone, Debug, PartialEq)]
pub enum ColorFilter {
    /// Blend a constant color over the source with the given mode.
    Blend { mode: BlendMode, color: Color },
    /// Apply a 4x5 color matrix.
    Matrix(ColorMatrix),
    /// Convert sRGB-encoded colors to linear.
    SrgbToLinear,
    /// Convert linear colors to sRGB encoding.
    LinearToSrgb,
}
