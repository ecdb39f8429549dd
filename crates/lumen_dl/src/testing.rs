//! Recording canvas for tests and headless hosts
//!
//! [`RecordingCanvas`] implements [`Canvas`] by recording every call as a
//! comparable value, with just enough transform/save bookkeeping to answer
//! the queries a dispatcher makes. Tests assert on the recorded call list
//! instead of rasterized output.

use std::sync::Arc;

use lumen_core::{Color, Mat4, Path, Point, Rect};
use lumen_paint::{
    BlendMode, Canvas, ClipOp, ImageFilter, Paint, PointStyle, RSTransform, SamplerDescriptor,
    SrcRectConstraint, TextFrame, Texture, Vertices,
};

/// One recorded canvas call
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCall {
    Save,
    SaveLayer {
        paint: Paint,
        bounds: Option<Rect>,
        has_backdrop: bool,
    },
    Restore,
    RestoreToCount {
        count: usize,
    },
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
    Concat {
        matrix: Mat4,
    },
    ResetTransform,
    ClipRect {
        rect: Rect,
        op: ClipOp,
    },
    ClipRoundedRect {
        rect: Rect,
        corner_radius: f32,
        op: ClipOp,
    },
    ClipPath {
        op: ClipOp,
    },
    DrawPaint {
        paint: Paint,
    },
    DrawRect {
        rect: Rect,
        paint: Paint,
    },
    DrawOval {
        bounds: Rect,
        paint: Paint,
    },
    DrawCircle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    DrawRoundedRect {
        rect: Rect,
        corner_radius: f32,
        paint: Paint,
    },
    DrawPath {
        path: Path,
        paint: Paint,
    },
    DrawPoints {
        count: usize,
        radius: f32,
        style: PointStyle,
        paint: Paint,
    },
    DrawVertices {
        vertex_count: usize,
        blend_mode: BlendMode,
        paint: Paint,
    },
    DrawImageRect {
        src: Rect,
        dst: Rect,
        sampler_label: &'static str,
        constraint: SrcRectConstraint,
        paint: Paint,
    },
    DrawAtlas {
        sprite_count: usize,
        blend_mode: BlendMode,
        paint: Paint,
    },
    DrawTextFrame {
        position: Point,
        paint: Paint,
    },
}

/// The artifact a [`RecordingCanvas`] produces
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedPicture {
    pub calls: Vec<CanvasCall>,
}

/// A [`Canvas`] that records calls instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<CanvasCall>,
    transform: Mat4,
    saved_transforms: Vec<Mat4>,
    cull_bounds: Option<Rect>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas that reports the given local culling bounds.
    pub fn with_local_culling_bounds(bounds: Rect) -> Self {
        Self {
            cull_bounds: Some(bounds),
            ..Self::default()
        }
    }

    pub fn set_local_culling_bounds(&mut self, bounds: Option<Rect>) {
        self.cull_bounds = bounds;
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Recorded draw calls only, skipping state management.
    pub fn draw_calls(&self) -> Vec<&CanvasCall> {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    CanvasCall::DrawPaint { .. }
                        | CanvasCall::DrawRect { .. }
                        | CanvasCall::DrawOval { .. }
                        | CanvasCall::DrawCircle { .. }
                        | CanvasCall::DrawRoundedRect { .. }
                        | CanvasCall::DrawPath { .. }
                        | CanvasCall::DrawPoints { .. }
                        | CanvasCall::DrawVertices { .. }
                        | CanvasCall::DrawImageRect { .. }
                        | CanvasCall::DrawAtlas { .. }
                        | CanvasCall::DrawTextFrame { .. }
                )
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    type Picture = RecordedPicture;

    fn save(&mut self) {
        self.saved_transforms.push(self.transform);
        self.calls.push(CanvasCall::Save);
    }

    fn save_layer(&mut self, paint: &Paint, bounds: Option<Rect>, backdrop: Option<&Arc<ImageFilter>>) {
        self.saved_transforms.push(self.transform);
        self.calls.push(CanvasCall::SaveLayer {
            paint: paint.clone(),
            bounds,
            has_backdrop: backdrop.is_some(),
        });
    }

    fn restore(&mut self) {
        match self.saved_transforms.pop() {
            Some(transform) => {
                self.transform = transform;
                self.calls.push(CanvasCall::Restore);
            }
            None => {
                tracing::warn!("restore without matching save, ignored");
            }
        }
    }

    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            match self.saved_transforms.pop() {
                Some(transform) => self.transform = transform,
                None => break,
            }
        }
        self.calls.push(CanvasCall::RestoreToCount { count });
    }

    fn save_count(&self) -> usize {
        self.saved_transforms.len() + 1
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.transform = self.transform.mul(&Mat4::translation(tx, ty, 0.0));
        self.calls.push(CanvasCall::Translate { tx, ty });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transform = self.transform.mul(&Mat4::scale(sx, sy, 1.0));
        self.calls.push(CanvasCall::Scale { sx, sy });
    }

    fn rotate(&mut self, degrees: f32) {
        self.transform = self.transform.mul(&Mat4::rotation_z(degrees.to_radians()));
        self.calls.push(CanvasCall::Rotate { degrees });
    }

    fn skew(&mut self, sx: f32, sy: f32) {
        self.transform = self.transform.mul(&Mat4::skew(sx, sy));
        self.calls.push(CanvasCall::Skew { sx, sy });
    }

    fn concat(&mut self, matrix: &Mat4) {
        self.transform = self.transform.mul(matrix);
        self.calls.push(CanvasCall::Concat { matrix: *matrix });
    }

    fn reset_transform(&mut self) {
        self.transform = Mat4::IDENTITY;
        self.calls.push(CanvasCall::ResetTransform);
    }

    fn current_transform(&self) -> Mat4 {
        self.transform
    }

    fn current_local_culling_bounds(&self) -> Option<Rect> {
        self.cull_bounds
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOp) {
        self.calls.push(CanvasCall::ClipRect { rect, op });
    }

    fn clip_rounded_rect(&mut self, rect: Rect, corner_radius: f32, op: ClipOp) {
        self.calls.push(CanvasCall::ClipRoundedRect {
            rect,
            corner_radius,
            op,
        });
    }

    fn clip_path(&mut self, _path: &Path, op: ClipOp) {
        self.calls.push(CanvasCall::ClipPath { op });
    }

    fn draw_paint(&mut self, paint: &Paint) {
        self.calls.push(CanvasCall::DrawPaint {
            paint: paint.clone(),
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_oval(&mut self, bounds: Rect, paint: &Paint) {
        self.calls.push(CanvasCall::DrawOval {
            bounds,
            paint: paint.clone(),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, corner_radius: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRoundedRect {
            rect,
            corner_radius,
            paint: paint.clone(),
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.calls.push(CanvasCall::DrawPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn draw_points(&mut self, points: &[Point], radius: f32, paint: &Paint, style: PointStyle) {
        self.calls.push(CanvasCall::DrawPoints {
            count: points.len(),
            radius,
            style,
            paint: paint.clone(),
        });
    }

    fn draw_vertices(&mut self, vertices: &Vertices, blend_mode: BlendMode, paint: &Paint) {
        self.calls.push(CanvasCall::DrawVertices {
            vertex_count: vertices.positions.len(),
            blend_mode,
            paint: paint.clone(),
        });
    }

    fn draw_image_rect(
        &mut self,
        _texture: &Arc<Texture>,
        src: Rect,
        dst: Rect,
        paint: &Paint,
        sampling: &SamplerDescriptor,
        constraint: SrcRectConstraint,
    ) {
        self.calls.push(CanvasCall::DrawImageRect {
            src,
            dst,
            sampler_label: sampling.label,
            constraint,
            paint: paint.clone(),
        });
    }

    fn draw_atlas(
        &mut self,
        _atlas: &Arc<Texture>,
        transforms: &[RSTransform],
        _tex_rects: &[Rect],
        _colors: &[Color],
        blend_mode: BlendMode,
        _sampling: &SamplerDescriptor,
        _cull_rect: Option<Rect>,
        paint: &Paint,
    ) {
        self.calls.push(CanvasCall::DrawAtlas {
            sprite_count: transforms.len(),
            blend_mode,
            paint: paint.clone(),
        });
    }

    fn draw_text_frame(&mut self, _frame: &Arc<TextFrame>, position: Point, paint: &Paint) {
        self.calls.push(CanvasCall::DrawTextFrame {
            position,
            paint: paint.clone(),
        });
    }

    fn end_recording(&mut self) -> RecordedPicture {
        self.transform = Mat4::IDENTITY;
        self.saved_transforms.clear();
        RecordedPicture {
            calls: std::mem::take(&mut self.calls),
        }
    }
}
