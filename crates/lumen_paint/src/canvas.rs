//! The canvas seam
//!
//! [`Canvas`] is the collaborator interface rendering backends implement.
//! The canvas owns its own transform/clip/save stack and produces the final
//! immutable artifact; callers only describe what to draw. Geometry is
//! expressed in a single convention: column-major 4x4 transforms, with
//! row-major inputs transposed before they reach this seam.

use std::sync::Arc;

use lumen_core::{Color, Mat4, Path, Point, Rect};

use crate::formats::{BlendMode, ClipOp, PointStyle, SrcRectConstraint};
use crate::image_filter::ImageFilter;
use crate::paint::Paint;
use crate::sampler::SamplerDescriptor;
use crate::texture::{TextFrame, Texture};
use crate::vertices::{RSTransform, Vertices};

/// A stateful rendering canvas.
///
/// Save/restore, transforms, and clips are the canvas's own bookkeeping;
/// callers never mirror that stack, they only snapshot their *paint* state
/// around nested scopes and restore the canvas by recorded depth.
pub trait Canvas {
    /// The immutable renderable artifact produced by `end_recording`.
    type Picture;

    // ─────────────────────────────────────────────────────────────────────────
    // Save stack
    // ─────────────────────────────────────────────────────────────────────────

    fn save(&mut self);

    /// Push an offscreen compositing layer. `bounds` is a size hint;
    /// `backdrop` filters what is already underneath the layer.
    fn save_layer(&mut self, paint: &Paint, bounds: Option<Rect>, backdrop: Option<&Arc<ImageFilter>>);

    fn restore(&mut self);

    /// Pop until the save stack is `count` deep. Restoring by recorded depth
    /// is how callers unwind an unknown number of nested saves.
    fn restore_to_count(&mut self, count: usize);

    fn save_count(&self) -> usize;

    // ─────────────────────────────────────────────────────────────────────────
    // Transforms
    // ─────────────────────────────────────────────────────────────────────────

    fn translate(&mut self, tx: f32, ty: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    fn rotate(&mut self, degrees: f32);

    fn skew(&mut self, sx: f32, sy: f32);

    /// Concatenate a column-major transform onto the current one.
    fn concat(&mut self, matrix: &Mat4);

    fn reset_transform(&mut self);

    /// The accumulated transform at this point of recording.
    fn current_transform(&self) -> Mat4;

    /// The current culling bounds translated into local coordinates, when
    /// the canvas can compute them.
    fn current_local_culling_bounds(&self) -> Option<Rect>;

    // ─────────────────────────────────────────────────────────────────────────
    // Clips
    // ─────────────────────────────────────────────────────────────────────────

    fn clip_rect(&mut self, rect: Rect, op: ClipOp);

    fn clip_rounded_rect(&mut self, rect: Rect, corner_radius: f32, op: ClipOp);

    fn clip_path(&mut self, path: &Path, op: ClipOp);

    // ─────────────────────────────────────────────────────────────────────────
    // Draws
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill the current clip.
    fn draw_paint(&mut self, paint: &Paint);

    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    fn draw_oval(&mut self, bounds: Rect, paint: &Paint);

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    fn draw_rounded_rect(&mut self, rect: Rect, corner_radius: f32, paint: &Paint);

    fn draw_path(&mut self, path: &Path, paint: &Paint);

    fn draw_points(&mut self, points: &[Point], radius: f32, paint: &Paint, style: PointStyle);

    fn draw_vertices(&mut self, vertices: &Vertices, blend_mode: BlendMode, paint: &Paint);

    #[allow(clippy::too_many_arguments)]
    fn draw_image_rect(
        &mut self,
        texture: &Arc<Texture>,
        src: Rect,
        dst: Rect,
        paint: &Paint,
        sampling: &SamplerDescriptor,
        constraint: SrcRectConstraint,
    );

    #[allow(clippy::too_many_arguments)]
    fn draw_atlas(
        &mut self,
        atlas: &Arc<Texture>,
        transforms: &[RSTransform],
        tex_rects: &[Rect],
        colors: &[Color],
        blend_mode: BlendMode,
        sampling: &SamplerDescriptor,
        cull_rect: Option<Rect>,
        paint: &Paint,
    );

    fn draw_text_frame(&mut self, frame: &Arc<TextFrame>, position: Point, paint: &Paint);

    // ─────────────────────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────────────────────

    /// Finalize the accumulated drawing into an immutable artifact and reset
    /// the canvas for a fresh recording.
    fn end_recording(&mut self) -> Self::Picture;
}
