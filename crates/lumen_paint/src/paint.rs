//! Paint state
//!
//! The attribute bag read by every draw call. `Paint` is a plain value:
//! saving and restoring attribute state across nested scopes is done by
//! copying the whole struct, never by diffing individual fields.

use std::sync::Arc;

use lumen_core::{Color, Sigma};

use crate::color_filter::ColorFilter;
use crate::color_source::ColorSource;
use crate::formats::{BlendMode, BlurStyle, Cap, Join, PaintStyle};
use crate::image_filter::ImageFilter;

/// Blur applied to the coverage mask of a draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskBlurDescriptor {
    pub style: BlurStyle,
    pub sigma: Sigma,
}

/// The current set of attributes applied to draw calls
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub color_source: ColorSource,
    pub style: PaintStyle,
    pub blend_mode: BlendMode,

    pub stroke_width: f32,
    pub stroke_cap: Cap,
    pub stroke_join: Join,
    pub stroke_miter: f32,

    pub color_filter: Option<Arc<ColorFilter>>,
    pub image_filter: Option<Arc<ImageFilter>>,
    pub mask_blur: Option<MaskBlurDescriptor>,

    pub invert_colors: bool,
    pub dither: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            color_source: ColorSource::Solid,
            style: PaintStyle::Fill,
            blend_mode: BlendMode::SourceOver,
            stroke_width: 0.0,
            stroke_cap: Cap::Butt,
            stroke_join: Join::Miter,
            stroke_miter: 4.0,
            color_filter: None,
            image_filter: None,
            mask_blur: None,
            invert_colors: false,
            dither: false,
        }
    }
}
