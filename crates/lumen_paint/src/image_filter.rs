//! Image filter graphs
//!
//! An [`ImageFilter`] is a tree describing a chain of raster effects. The
//! tree is built eagerly with every parameter captured by value, then walked
//! lazily by the rendering backend when the filtered content is drawn. Trees
//! compare by value, so composition rules are directly testable.

use std::sync::Arc;

use lumen_core::{Mat4, Sigma};

use crate::color_filter::ColorFilter;
use crate::formats::{MorphType, TileMode};
use crate::sampler::SamplerDescriptor;

/// A node in an image filter graph
#[derive(Clone, Debug, PartialEq)]
pub enum ImageFilter {
    /// Gaussian blur. Image-filter blurs always use the normal blur style;
    /// the solid/outer/inner styles exist only for mask blurs.
    Blur {
        sigma_x: Sigma,
        sigma_y: Sigma,
        tile_mode: TileMode,
    },
    /// Dilate or erode by a pixel radius per axis.
    Morphology {
        radius_x: f32,
        radius_y: f32,
        morph: MorphType,
    },
    /// Resample through a transform. The backend receives the subpass flag at
    /// evaluation time so it can special-case subpass sampling.
    MatrixTransform {
        matrix: Mat4,
        sampling: SamplerDescriptor,
    },
    /// Evaluate `inner`, then feed its output to `outer`.
    Compose {
        outer: Arc<ImageFilter>,
        inner: Arc<ImageFilter>,
    },
    /// A color filter applied as an image filter. `absorb_opacity` is always
    /// false here: image filters defer opacity blending until the filter
    /// chain's result is composited with the layer, unlike color filters
    /// applied directly as paint attributes.
    FromColorFilter {
        filter: Arc<ColorFilter>,
        absorb_opacity: bool,
    },
    /// Evaluate `inner`, then rebase its output under a local transform.
    LocalMatrix {
        matrix: Mat4,
        inner: Arc<ImageFilter>,
    },
}

impl ImageFilter {
    pub fn blur(sigma_x: Sigma, sigma_y: Sigma, tile_mode: TileMode) -> Self {
        ImageFilter::Blur {
            sigma_x,
            sigma_y,
            tile_mode,
        }
    }

    /// A morphology filter. Negative radii describe no filter at all, not an
    /// error, so the result is absent.
    pub fn morphology(radius_x: f32, radius_y: f32, morph: MorphType) -> Option<Self> {
        if radius_x < 0.0 || radius_y < 0.0 {
            tracing::debug!(radius_x, radius_y, "negative morphology radius, filter is absent");
            return None;
        }
        Some(ImageFilter::Morphology {
            radius_x,
            radius_y,
            morph,
        })
    }

    pub fn matrix_transform(matrix: Mat4, sampling: SamplerDescriptor) -> Self {
        ImageFilter::MatrixTransform { matrix, sampling }
    }

    /// Compose two optional filters, inner first. Absence is the identity:
    /// if either side is absent the composition is the other side unchanged.
    pub fn compose(
        outer: Option<Arc<ImageFilter>>,
        inner: Option<Arc<ImageFilter>>,
    ) -> Option<Arc<ImageFilter>> {
        match (outer, inner) {
            (Some(outer), Some(inner)) => Some(Arc::new(ImageFilter::Compose { outer, inner })),
            (Some(outer), None) => Some(outer),
            (None, inner) => inner,
        }
    }

    /// Wrap a color filter for use in an image filter chain. Opacity
    /// absorption is forced off regardless of how the color filter behaves
    /// as a direct paint attribute.
    pub fn from_color_filter(filter: Arc<ColorFilter>) -> Self {
        ImageFilter::FromColorFilter {
            filter,
            absorb_opacity: false,
        }
    }

    /// Rebase `inner` under a local transform. Absent inner means the whole
    /// filter is absent.
    pub fn local_matrix(matrix: Mat4, inner: Option<Arc<ImageFilter>>) -> Option<Arc<ImageFilter>> {
        inner.map(|inner| Arc::new(ImageFilter::LocalMatrix { matrix, inner }))
    }
}
