//! Texture sampler descriptors

use crate::formats::{MinMagFilter, MipFilter};

/// Describes how a texture is sampled.
///
/// The `label` is a human-readable tag surfaced by GPU debugging tools; it is
/// part of the descriptor's identity so tests can assert which sampler a draw
/// ended up with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplerDescriptor {
    pub min_filter: MinMagFilter,
    pub mag_filter: MinMagFilter,
    pub mip_filter: MipFilter,
    pub label: &'static str,
}

impl SamplerDescriptor {
    pub fn nearest() -> Self {
        Self {
            min_filter: MinMagFilter::Nearest,
            mag_filter: MinMagFilter::Nearest,
            mip_filter: MipFilter::None,
            label: "Nearest Sampler",
        }
    }

    pub fn linear() -> Self {
        Self {
            min_filter: MinMagFilter::Linear,
            mag_filter: MinMagFilter::Linear,
            mip_filter: MipFilter::None,
            label: "Linear Sampler",
        }
    }

    pub fn mipmap_linear() -> Self {
        Self {
            min_filter: MinMagFilter::Linear,
            mag_filter: MinMagFilter::Linear,
            mip_filter: MipFilter::Linear,
            label: "Mipmap Linear Sampler",
        }
    }
}
