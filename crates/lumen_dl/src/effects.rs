//! Effect descriptors
//!
//! Declarative descriptions of color sources, filters, and path effects as
//! they appear in a recorded directive stream. Descriptors are plain data;
//! deriving the backend's composed effects from them is the dispatcher's
//! job.

use std::sync::Arc;

use lumen_core::Point;
use lumen_paint::{RuntimeEffect, SceneNode, Texture};

use crate::color::DlColor;
use crate::error::DlError;
use crate::ops::{DlBlendMode, DlBlurStyle, DlImageSampling, DlTileMode};

/// Reference to a recorded image. The backing texture belongs to the host's
/// texture provider and may be absent, in which case draws using the image
/// are no-ops.
#[derive(Clone, Debug, PartialEq)]
pub struct DlImage {
    texture: Option<Arc<Texture>>,
}

impl DlImage {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self {
            texture: Some(texture),
        }
    }

    /// An image with no backing texture.
    pub fn unbacked() -> Self {
        Self { texture: None }
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }
}

/// Validated gradient color/stop arrays.
///
/// Construction enforces what dispatch relies on: at least two stops, one
/// color per stop, offsets non-decreasing within [0, 1]. The stop list is
/// *not* required to start at 0.0 or end at 1.0; dispatch normalizes that.
#[derive(Clone, Debug, PartialEq)]
pub struct DlGradient {
    colors: Vec<DlColor>,
    stops: Vec<f32>,
}

impl DlGradient {
    pub fn new(colors: Vec<DlColor>, stops: Vec<f32>) -> Result<Self, DlError> {
        if colors.len() != stops.len() {
            return Err(DlError::StopCountMismatch {
                colors: colors.len(),
                stops: stops.len(),
            });
        }
        if stops.len() < 2 {
            return Err(DlError::TooFewStops(stops.len()));
        }
        let mut previous = 0.0f32;
        for (index, &value) in stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) || value < previous {
                return Err(DlError::InvalidStop { index, value });
            }
            previous = value;
        }
        Ok(Self { colors, stops })
    }

    pub fn colors(&self) -> &[DlColor] {
        &self.colors
    }

    pub fn stops(&self) -> &[f32] {
        &self.stops
    }
}

/// Recorded color source descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum DlColorSource {
    Solid(DlColor),
    LinearGradient {
        start: Point,
        end: Point,
        gradient: DlGradient,
        tile_mode: DlTileMode,
        matrix: [f32; 9],
    },
    RadialGradient {
        center: Point,
        radius: f32,
        gradient: DlGradient,
        tile_mode: DlTileMode,
        matrix: [f32; 9],
    },
    ConicalGradient {
        start_center: Point,
        start_radius: f32,
        end_center: Point,
        end_radius: f32,
        gradient: DlGradient,
        tile_mode: DlTileMode,
        matrix: [f32; 9],
    },
    SweepGradient {
        center: Point,
        start_degrees: f32,
        end_degrees: f32,
        gradient: DlGradient,
        tile_mode: DlTileMode,
        matrix: [f32; 9],
    },
    Image {
        image: DlImage,
        horizontal_tile_mode: DlTileMode,
        vertical_tile_mode: DlTileMode,
        sampling: DlImageSampling,
        matrix: [f32; 9],
    },
    RuntimeEffect {
        effect: Arc<RuntimeEffect>,
        uniforms: Arc<Vec<u8>>,
        /// Sampler inputs in binding order. `None` entries and non-image
        /// sources are malformed; the whole assignment is abandoned.
        samplers: Vec<Option<Box<DlColorSource>>>,
    },
    Scene {
        node: Arc<SceneNode>,
        camera: [f32; 16],
    },
}

/// Recorded color filter descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum DlColorFilter {
    Blend { color: DlColor, mode: DlBlendMode },
    Matrix([f32; 20]),
    SrgbToLinearGamma,
    LinearToSrgbGamma,
}

/// Recorded image filter descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum DlImageFilter {
    Blur {
        sigma_x: f32,
        sigma_y: f32,
        tile_mode: DlTileMode,
    },
    Dilate {
        radius_x: f32,
        radius_y: f32,
    },
    Erode {
        radius_x: f32,
        radius_y: f32,
    },
    Matrix {
        matrix: [f32; 9],
        sampling: DlImageSampling,
    },
    Compose {
        outer: Box<DlImageFilter>,
        inner: Box<DlImageFilter>,
    },
    ColorFilter(DlColorFilter),
    LocalMatrix {
        matrix: [f32; 9],
        filter: Box<DlImageFilter>,
    },
}

/// Recorded mask filter descriptor
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DlMaskFilter {
    Blur { style: DlBlurStyle, sigma: f32 },
}

/// Recorded path effect descriptor. Path effects are carried through the
/// stream but not supported by the dispatcher; they log a diagnostic and
/// leave geometry unmodified.
#[derive(Clone, Debug, PartialEq)]
pub enum DlPathEffect {
    Dash { intervals: Vec<f32>, phase: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_validation() {
        let two = DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.0, 1.0]);
        assert!(two.is_ok());

        assert_eq!(
            DlGradient::new(vec![DlColor::RED], vec![0.5]),
            Err(DlError::TooFewStops(1))
        );
        assert_eq!(
            DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.0]),
            Err(DlError::StopCountMismatch { colors: 2, stops: 1 })
        );
        assert_eq!(
            DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.5, 0.2]),
            Err(DlError::InvalidStop {
                index: 1,
                value: 0.2
            })
        );
        assert_eq!(
            DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.0, 1.5]),
            Err(DlError::InvalidStop {
                index: 1,
                value: 1.5
            })
        );
    }

    #[test]
    fn test_unbacked_image() {
        assert!(DlImage::unbacked().texture().is_none());
    }
}
