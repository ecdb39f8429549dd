//! Recorded directives
//!
//! The ordered operation stream of a display list. Ops carry the recording
//! format's own enums and packed colors; nothing here depends on the
//! internal paint model, so the stream shape stays stable as the backend
//! model evolves.

use std::sync::Arc;

use lumen_core::{Path, Point, Rect, RoundedRect};
use lumen_paint::TextFrame;

use crate::color::DlColor;
use crate::display_list::DisplayList;
use crate::effects::{
    DlColorFilter, DlColorSource, DlImage, DlImageFilter, DlMaskFilter, DlPathEffect,
};

// ─────────────────────────────────────────────────────────────────────────────
// Recording-format enums
// ─────────────────────────────────────────────────────────────────────────────

/// Blend modes as recorded upstream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlBlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
    Plus,
    Modulate,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlTileMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
    Decal,
}

/// Draw styles as recorded upstream. `StrokeAndFill` exists in the recording
/// format but has no backend support.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlDrawStyle {
    #[default]
    Fill,
    Stroke,
    StrokeAndFill,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlStrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlStrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlBlurStyle {
    #[default]
    Normal,
    Solid,
    Outer,
    Inner,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlClipOp {
    #[default]
    Intersect,
    Difference,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DlPointMode {
    /// Each point renders as a disc or square, by stroke cap.
    Points,
    /// Consecutive pairs render as line segments.
    Lines,
    /// All points chain into a polyline.
    Polygon,
}

/// Image sampling quality as recorded upstream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlImageSampling {
    NearestNeighbor,
    #[default]
    Linear,
    MipmapLinear,
    Cubic,
}

/// Single-level filter quality, used where full sampling options are not
/// recorded (nine-patch draws)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlFilterMode {
    Nearest,
    #[default]
    Linear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlVertexMode {
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DlSrcRectConstraint {
    Strict,
    #[default]
    Fast,
}

// ─────────────────────────────────────────────────────────────────────────────
// Recorded value types
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded vertex mesh
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DlVertices {
    pub mode: DlVertexMode,
    pub positions: Vec<Point>,
    pub tex_coords: Option<Vec<Point>>,
    pub colors: Option<Vec<DlColor>>,
    pub indices: Option<Vec<u16>>,
}

/// Rotation+scale+translation transform for one atlas sprite
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DlRSTransform {
    pub scaled_cos: f32,
    pub scaled_sin: f32,
    pub tx: f32,
    pub ty: f32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Directives
// ─────────────────────────────────────────────────────────────────────────────

/// One recorded directive
#[derive(Clone, Debug, PartialEq)]
pub enum DlOp {
    // Attribute setters
    SetAntiAlias(bool),
    SetDither(bool),
    SetDrawStyle(DlDrawStyle),
    SetColor(DlColor),
    SetStrokeWidth(f32),
    SetStrokeMiter(f32),
    SetStrokeCap(DlStrokeCap),
    SetStrokeJoin(DlStrokeJoin),
    SetColorSource(Option<DlColorSource>),
    SetColorFilter(Option<DlColorFilter>),
    SetInvertColors(bool),
    SetBlendMode(DlBlendMode),
    SetPathEffect(Option<DlPathEffect>),
    SetMaskFilter(Option<DlMaskFilter>),
    SetImageFilter(Option<DlImageFilter>),

    // Save stack
    Save,
    SaveLayer {
        bounds: Option<Rect>,
        with_attributes: bool,
        backdrop: Option<DlImageFilter>,
    },
    Restore,

    // Transforms
    Translate {
        tx: f32,
        ty: f32,
    },
    Scale {
        sx: f32,
        sy: f32,
    },
    Rotate {
        degrees: f32,
    },
    Skew {
        sx: f32,
        sy: f32,
    },
    /// Row-major 2D affine: [mxx, mxy, mxt, myx, myy, myt]
    Transform2DAffine {
        matrix: [f32; 6],
    },
    /// Row-major 4x4
    TransformFullPerspective {
        matrix: [f32; 16],
    },
    TransformReset,

    // Clips
    ClipRect {
        rect: Rect,
        op: DlClipOp,
        is_aa: bool,
    },
    ClipRoundedRect {
        rrect: RoundedRect,
        op: DlClipOp,
        is_aa: bool,
    },
    ClipPath {
        path: Path,
        op: DlClipOp,
        is_aa: bool,
    },

    // Draws
    DrawColor {
        color: DlColor,
        mode: DlBlendMode,
    },
    DrawPaint,
    DrawLine {
        p0: Point,
        p1: Point,
    },
    DrawRect {
        rect: Rect,
    },
    DrawOval {
        bounds: Rect,
    },
    DrawCircle {
        center: Point,
        radius: f32,
    },
    DrawRoundedRect {
        rrect: RoundedRect,
    },
    /// Ring between two rounded rects, filled even-odd.
    DrawDoubleRoundedRect {
        outer: RoundedRect,
        inner: RoundedRect,
    },
    DrawPath {
        path: Path,
    },
    DrawArc {
        bounds: Rect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
    },
    DrawPoints {
        mode: DlPointMode,
        points: Vec<Point>,
    },
    DrawVertices {
        vertices: DlVertices,
        mode: DlBlendMode,
    },
    DrawImage {
        image: DlImage,
        point: Point,
        sampling: DlImageSampling,
        with_attributes: bool,
    },
    DrawImageRect {
        image: DlImage,
        src: Rect,
        dst: Rect,
        sampling: DlImageSampling,
        with_attributes: bool,
        constraint: DlSrcRectConstraint,
    },
    DrawImageNine {
        image: DlImage,
        center: Rect,
        dst: Rect,
        filter: DlFilterMode,
        with_attributes: bool,
    },
    DrawAtlas {
        atlas: DlImage,
        transforms: Vec<DlRSTransform>,
        tex_rects: Vec<Rect>,
        colors: Vec<DlColor>,
        mode: DlBlendMode,
        sampling: DlImageSampling,
        cull_rect: Option<Rect>,
        with_attributes: bool,
    },
    /// Inline replay of a nested display list with group opacity.
    DrawDisplayList {
        list: Arc<DisplayList>,
        opacity: f32,
    },
    DrawTextFrame {
        frame: Arc<TextFrame>,
        x: f32,
        y: f32,
    },
    DrawShadow {
        path: Path,
        color: DlColor,
        elevation: f32,
        transparent_occluder: bool,
        dpr: f32,
    },
}
