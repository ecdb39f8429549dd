//! Vertex meshes and sprite transforms

use lumen_core::{Color, Point, Rect};

use crate::formats::VertexMode;

/// A triangle mesh drawn with `draw_vertices`.
///
/// `tex_coords` and `colors`, when present, run parallel to `positions`;
/// `indices`, when present, index into all three.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vertices {
    pub mode: VertexMode,
    pub positions: Vec<Point>,
    pub tex_coords: Option<Vec<Point>>,
    pub colors: Option<Vec<Color>>,
    pub indices: Option<Vec<u16>>,
}

impl Vertices {
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(&self.positions)
    }
}

/// Rotation+scale+translation transform for one atlas sprite.
///
/// Encodes `[cos*scale, sin*scale]` plus a translation, the compact form
/// sprite batchers use instead of a full matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RSTransform {
    pub scaled_cos: f32,
    pub scaled_sin: f32,
    pub tx: f32,
    pub ty: f32,
}

impl RSTransform {
    pub fn new(scaled_cos: f32, scaled_sin: f32, tx: f32, ty: f32) -> Self {
        Self {
            scaled_cos,
            scaled_sin,
            tx,
            ty,
        }
    }

    /// Identity rotation/scale at a translation.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, tx, ty)
    }
}
