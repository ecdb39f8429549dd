//! Color sources
//!
//! The procedural or sampled origin of color for filled and stroked
//! geometry. A color source is rebuilt wholesale whenever the corresponding
//! paint attribute changes; there is no incremental mutation.

use std::sync::Arc;

use lumen_core::{Mat4, Point};
use smallvec::SmallVec;

use crate::formats::TileMode;
use crate::sampler::SamplerDescriptor;
use crate::texture::Texture;

/// One color/offset pair of a gradient.
///
/// Stop lists held by gradient variants are canonical: offsets are
/// non-decreasing, the first is 0.0 and the last is 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub color: lumen_core::Color,
    pub stop: f32,
}

/// Inline storage covers the common small gradients.
pub type GradientStops = SmallVec<[GradientStop; 8]>;

/// Handle to an externally-compiled runtime shader effect.
#[derive(Debug, PartialEq)]
pub struct RuntimeEffect {
    debug_label: Option<String>,
}

impl RuntimeEffect {
    pub fn new() -> Self {
        Self { debug_label: None }
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            debug_label: Some(label.into()),
        }
    }

    pub fn debug_label(&self) -> Option<&str> {
        self.debug_label.as_deref()
    }
}

impl Default for RuntimeEffect {
    fn default() -> Self {
        Self::new()
    }
}

/// A texture bound as an input of a runtime effect.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureInput {
    pub sampling: SamplerDescriptor,
    pub texture: Arc<Texture>,
}

/// Where color comes from when geometry is filled or stroked
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColorSource {
    /// The paint's own color.
    #[default]
    Solid,
    LinearGradient {
        start: Point,
        end: Point,
        stops: GradientStops,
        tile_mode: TileMode,
        transform: Mat4,
    },
    RadialGradient {
        center: Point,
        radius: f32,
        stops: GradientStops,
        tile_mode: TileMode,
        transform: Mat4,
    },
    ConicalGradient {
        center: Point,
        radius: f32,
        focus_center: Point,
        focus_radius: f32,
        stops: GradientStops,
        tile_mode: TileMode,
        transform: Mat4,
    },
    SweepGradient {
        center: Point,
        start_degrees: f32,
        end_degrees: f32,
        stops: GradientStops,
        tile_mode: TileMode,
        transform: Mat4,
    },
    Image {
        texture: Arc<Texture>,
        x_tile_mode: TileMode,
        y_tile_mode: TileMode,
        sampling: SamplerDescriptor,
        transform: Mat4,
    },
    RuntimeEffect {
        effect: Arc<RuntimeEffect>,
        uniforms: Arc<Vec<u8>>,
        texture_inputs: Vec<TextureInput>,
    },
    #[cfg(feature = "scene")]
    Scene {
        node: Arc<crate::texture::SceneNode>,
        camera: Mat4,
    },
}

impl ColorSource {
    /// Whether this source is the paint's own solid color.
    pub fn is_solid(&self) -> bool {
        matches!(self, ColorSource::Solid)
    }
}
