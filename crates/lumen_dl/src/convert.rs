//! Recording-format to paint-model conversions
//!
//! Total, stateless remaps from the enums a directive stream records to the
//! enums the paint model and canvas consume. The only lossy cases are
//! documented degradations: stroke-and-fill falls back to fill, and cubic
//! image sampling is approximated as linear.

use lumen_core::Mat4;
use lumen_paint::{
    BlendMode, BlurStyle, Cap, ClipOp, Join, PaintStyle, SamplerDescriptor, SrcRectConstraint,
    TileMode, VertexMode, Vertices,
};

use crate::ops::{
    DlBlendMode, DlBlurStyle, DlClipOp, DlDrawStyle, DlFilterMode, DlImageSampling,
    DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlTileMode, DlVertexMode, DlVertices,
};

pub fn to_blend_mode(mode: DlBlendMode) -> BlendMode {
    match mode {
        DlBlendMode::Clear => BlendMode::Clear,
        DlBlendMode::Src => BlendMode::Source,
        DlBlendMode::Dst => BlendMode::Destination,
        DlBlendMode::SrcOver => BlendMode::SourceOver,
        DlBlendMode::DstOver => BlendMode::DestinationOver,
        DlBlendMode::SrcIn => BlendMode::SourceIn,
        DlBlendMode::DstIn => BlendMode::DestinationIn,
        DlBlendMode::SrcOut => BlendMode::SourceOut,
        DlBlendMode::DstOut => BlendMode::DestinationOut,
        DlBlendMode::SrcATop => BlendMode::SourceATop,
        DlBlendMode::DstATop => BlendMode::DestinationATop,
        DlBlendMode::Xor => BlendMode::Xor,
        DlBlendMode::Plus => BlendMode::Plus,
        DlBlendMode::Modulate => BlendMode::Modulate,
        DlBlendMode::Screen => BlendMode::Screen,
        DlBlendMode::Overlay => BlendMode::Overlay,
        DlBlendMode::Darken => BlendMode::Darken,
        DlBlendMode::Lighten => BlendMode::Lighten,
        DlBlendMode::ColorDodge => BlendMode::ColorDodge,
        DlBlendMode::ColorBurn => BlendMode::ColorBurn,
        DlBlendMode::HardLight => BlendMode::HardLight,
        DlBlendMode::SoftLight => BlendMode::SoftLight,
        DlBlendMode::Difference => BlendMode::Difference,
        DlBlendMode::Exclusion => BlendMode::Exclusion,
        DlBlendMode::Multiply => BlendMode::Multiply,
        DlBlendMode::Hue => BlendMode::Hue,
        DlBlendMode::Saturation => BlendMode::Saturation,
        DlBlendMode::Color => BlendMode::Color,
        DlBlendMode::Luminosity => BlendMode::Luminosity,
    }
}

pub fn to_tile_mode(mode: DlTileMode) -> TileMode {
    match mode {
        DlTileMode::Clamp => TileMode::Clamp,
        DlTileMode::Repeat => TileMode::Repeat,
        DlTileMode::Mirror => TileMode::Mirror,
        DlTileMode::Decal => TileMode::Decal,
    }
}

/// Stroke-and-fill has no backend support; it degrades to fill with a
/// diagnostic rather than failing the stream.
pub fn to_paint_style(style: DlDrawStyle) -> PaintStyle {
    match style {
        DlDrawStyle::Fill => PaintStyle::Fill,
        DlDrawStyle::Stroke => PaintStyle::Stroke,
        DlDrawStyle::StrokeAndFill => {
            tracing::warn!("stroke-and-fill draw style is unsupported, falling back to fill");
            PaintStyle::Fill
        }
    }
}

pub fn to_cap(cap: DlStrokeCap) -> Cap {
    match cap {
        DlStrokeCap::Butt => Cap::Butt,
        DlStrokeCap::Round => Cap::Round,
        DlStrokeCap::Square => Cap::Square,
    }
}

pub fn to_join(join: DlStrokeJoin) -> Join {
    match join {
        DlStrokeJoin::Miter => Join::Miter,
        DlStrokeJoin::Round => Join::Round,
        DlStrokeJoin::Bevel => Join::Bevel,
    }
}

pub fn to_blur_style(style: DlBlurStyle) -> BlurStyle {
    match style {
        DlBlurStyle::Normal => BlurStyle::Normal,
        DlBlurStyle::Solid => BlurStyle::Solid,
        DlBlurStyle::Outer => BlurStyle::Outer,
        DlBlurStyle::Inner => BlurStyle::Inner,
    }
}

pub fn to_clip_op(op: DlClipOp) -> ClipOp {
    match op {
        DlClipOp::Intersect => ClipOp::Intersect,
        DlClipOp::Difference => ClipOp::Difference,
    }
}

pub fn to_src_rect_constraint(constraint: DlSrcRectConstraint) -> SrcRectConstraint {
    match constraint {
        DlSrcRectConstraint::Strict => SrcRectConstraint::Strict,
        DlSrcRectConstraint::Fast => SrcRectConstraint::Fast,
    }
}

/// Map sampling options to a sampler. There is no cubic filtering support;
/// linear is closer to correct than nearest for that case, so cubic requests
/// use the linear sampler.
pub fn to_sampler_descriptor(sampling: DlImageSampling) -> SamplerDescriptor {
    match sampling {
        DlImageSampling::NearestNeighbor => SamplerDescriptor::nearest(),
        DlImageSampling::Linear | DlImageSampling::Cubic => SamplerDescriptor::linear(),
        DlImageSampling::MipmapLinear => SamplerDescriptor::mipmap_linear(),
    }
}

pub fn filter_mode_sampler(filter: DlFilterMode) -> SamplerDescriptor {
    match filter {
        DlFilterMode::Nearest => SamplerDescriptor::nearest(),
        DlFilterMode::Linear => SamplerDescriptor::linear(),
    }
}

/// Promote a row-major 3x3 2D matrix to the canvas's column-major 4x4.
pub fn to_matrix(m: &[f32; 9]) -> Mat4 {
    Mat4::from_affine2d(m)
}

pub fn to_vertex_mode(mode: DlVertexMode) -> VertexMode {
    match mode {
        DlVertexMode::Triangles => VertexMode::Triangles,
        DlVertexMode::TriangleStrip => VertexMode::TriangleStrip,
        DlVertexMode::TriangleFan => VertexMode::TriangleFan,
    }
}

pub fn to_vertices(vertices: &DlVertices) -> Vertices {
    Vertices {
        mode: to_vertex_mode(vertices.mode),
        positions: vertices.positions.clone(),
        tex_coords: vertices.tex_coords.clone(),
        colors: vertices
            .colors
            .as_ref()
            .map(|colors| colors.iter().map(|c| c.to_color()).collect()),
        indices: vertices.indices.clone(),
    }
}
