//! Lumen Paint Model
//!
//! The canvas-side attribute model consumed by rendering backends:
//!
//! - `Paint`: the mutable attribute bag applied to draw calls
//! - `ColorSource`: solid colors, gradients, images, runtime effects
//! - `ColorFilter` and the `ImageFilter` graph
//! - `Canvas`: the trait rendering backends implement
//!
//! Nothing in this crate touches the GPU; filter graphs and color sources
//! only *describe* work for a backend behind the [`Canvas`] trait.

pub mod canvas;
pub mod color_filter;
pub mod color_source;
pub mod formats;
pub mod image_filter;
pub mod paint;
pub mod sampler;
pub mod texture;
pub mod vertices;

pub use canvas::Canvas;
pub use color_filter::{ColorFilter, ColorMatrix};
pub use color_source::{ColorSource, GradientStop, RuntimeEffect, TextureInput};
pub use formats::{
    BlendMode, BlurStyle, Cap, ClipOp, Join, MinMagFilter, MipFilter, MorphType, PaintStyle,
    PointStyle, SrcRectConstraint, TileMode, VertexMode,
};
pub use image_filter::ImageFilter;
pub use paint::{MaskBlurDescriptor, Paint};
pub use sampler::SamplerDescriptor;
pub use texture::{SceneNode, TextFrame, Texture};
pub use vertices::{RSTransform, Vertices};
