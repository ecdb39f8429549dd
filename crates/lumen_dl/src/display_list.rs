//! Display lists and the recorder that builds them
//!
//! A [`DisplayList`] is an immutable ordered directive stream plus optional
//! precomputed culling data: a conservative bounding rect per draw op, in
//! the list's root coordinate space. [`DisplayListBuilder`] records ops and
//! maintains the transform bookkeeping needed to compute those bounds at
//! record time.

use std::sync::Arc;

use lumen_core::{Mat4, Path, Point, Rect, RoundedRect};
use lumen_paint::TextFrame;

use crate::color::DlColor;
use crate::effects::{
    DlColorFilter, DlColorSource, DlImage, DlImageFilter, DlMaskFilter, DlPathEffect,
};
use crate::ops::{
    DlBlendMode, DlClipOp, DlDrawStyle, DlFilterMode, DlImageSampling, DlOp, DlPointMode,
    DlRSTransform, DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlVertices,
};
use crate::shadow;

/// An immutable recorded directive stream
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DlOp>,
    bounds: Option<Rect>,
    op_bounds: Option<Vec<Option<Rect>>>,
}

impl DisplayList {
    pub fn ops(&self) -> &[DlOp] {
        &self.ops
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Conservative bounds of everything the list draws, in root space.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether the list carries per-op culling bounds.
    pub fn has_culling_bounds(&self) -> bool {
        self.op_bounds.is_some()
    }

    /// Per-op culling bounds, parallel to `ops()`. `None` entries always
    /// dispatch (attribute/transform ops and unbounded draws).
    pub fn op_bounds(&self) -> Option<&[Option<Rect>]> {
        self.op_bounds.as_deref()
    }
}

/// Records directives into a [`DisplayList`]
#[derive(Debug)]
pub struct DisplayListBuilder {
    ops: Vec<DlOp>,
    op_bounds: Vec<Option<Rect>>,
    track_culling: bool,
    bounds: Option<Rect>,

    // Record-time transform bookkeeping for bounds computation.
    matrix: Mat4,
    matrix_stack: Vec<Mat4>,

    // Attributes that affect draw coverage.
    style: DlDrawStyle,
    stroke_width: f32,
}

impl Default for DisplayListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayListBuilder {
    pub fn new() -> Self {
        Self::with_culling(true)
    }

    /// `track_culling: false` records a list without per-op bounds; nested
    /// replay of such a list is never cull-constrained.
    pub fn with_culling(track_culling: bool) -> Self {
        Self {
            ops: Vec::new(),
            op_bounds: Vec::new(),
            track_culling,
            bounds: None,
            matrix: Mat4::IDENTITY,
            matrix_stack: Vec::new(),
            style: DlDrawStyle::Fill,
            stroke_width: 0.0,
        }
    }

    pub fn build(self) -> DisplayList {
        if !self.matrix_stack.is_empty() {
            tracing::warn!(
                open_saves = self.matrix_stack.len(),
                "display list recorded with unmatched saves"
            );
        }
        DisplayList {
            ops: self.ops,
            bounds: self.bounds,
            op_bounds: self.track_culling.then_some(self.op_bounds),
        }
    }

    fn push(&mut self, op: DlOp) {
        self.ops.push(op);
        self.op_bounds.push(None);
    }

    /// Push a draw op with local-space coverage; bounds land in root space.
    fn push_draw(&mut self, op: DlOp, local_bounds: Option<Rect>) {
        let mapped = local_bounds.map(|b| self.matrix.transform_rect(&b));
        if let Some(rect) = mapped {
            self.bounds = Some(match self.bounds {
                Some(total) => total.union(&rect),
                None => rect,
            });
        }
        self.ops.push(op);
        self.op_bounds.push(mapped);
    }

    fn stroke_pad(&self) -> f32 {
        match self.style {
            DlDrawStyle::Fill => 0.0,
            DlDrawStyle::Stroke | DlDrawStyle::StrokeAndFill => (self.stroke_width * 0.5).max(0.0),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_anti_alias(&mut self, aa: bool) {
        self.push(DlOp::SetAntiAlias(aa));
    }

    pub fn set_dither(&mut self, dither: bool) {
        self.push(DlOp::SetDither(dither));
    }

    pub fn set_draw_style(&mut self, style: DlDrawStyle) {
        self.style = style;
        self.push(DlOp::SetDrawStyle(style));
    }

    pub fn set_color(&mut self, color: DlColor) {
        self.push(DlOp::SetColor(color));
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
        self.push(DlOp::SetStrokeWidth(width));
    }

    pub fn set_stroke_miter(&mut self, miter: f32) {
        self.push(DlOp::SetStrokeMiter(miter));
    }

    pub fn set_stroke_cap(&mut self, cap: DlStrokeCap) {
        self.push(DlOp::SetStrokeCap(cap));
    }

    pub fn set_stroke_join(&mut self, join: DlStrokeJoin) {
        self.push(DlOp::SetStrokeJoin(join));
    }

    pub fn set_color_source(&mut self, source: Option<DlColorSource>) {
        self.push(DlOp::SetColorSource(source));
    }

    pub fn set_color_filter(&mut self, filter: Option<DlColorFilter>) {
        self.push(DlOp::SetColorFilter(filter));
    }

    pub fn set_invert_colors(&mut self, invert: bool) {
        self.push(DlOp::SetInvertColors(invert));
    }

    pub fn set_blend_mode(&mut self, mode: DlBlendMode) {
        self.push(DlOp::SetBlendMode(mode));
    }

    pub fn set_path_effect(&mut self, effect: Option<DlPathEffect>) {
        self.push(DlOp::SetPathEffect(effect));
    }

    pub fn set_mask_filter(&mut self, filter: Option<DlMaskFilter>) {
        self.push(DlOp::SetMaskFilter(filter));
    }

    pub fn set_image_filter(&mut self, filter: Option<DlImageFilter>) {
        self.push(DlOp::SetImageFilter(filter));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save stack and transforms
    // ─────────────────────────────────────────────────────────────────────────

    pub fn save(&mut self) {
        self.matrix_stack.push(self.matrix);
        self.push(DlOp::Save);
    }

    pub fn save_layer(
        &mut self,
        bounds: Option<Rect>,
        with_attributes: bool,
        backdrop: Option<DlImageFilter>,
    ) {
        self.matrix_stack.push(self.matrix);
        self.push(DlOp::SaveLayer {
            bounds,
            with_attributes,
            backdrop,
        });
    }

    pub fn restore(&mut self) {
        match self.matrix_stack.pop() {
            Some(matrix) => {
                self.matrix = matrix;
                self.push(DlOp::Restore);
            }
            None => {
                tracing::warn!("restore without matching save, ignored");
            }
        }
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.matrix = self.matrix.mul(&Mat4::translation(tx, ty, 0.0));
        self.push(DlOp::Translate { tx, ty });
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.matrix = self.matrix.mul(&Mat4::scale(sx, sy, 1.0));
        self.push(DlOp::Scale { sx, sy });
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.matrix = self.matrix.mul(&Mat4::rotation_z(degrees.to_radians()));
        self.push(DlOp::Rotate { degrees });
    }

    pub fn skew(&mut self, sx: f32, sy: f32) {
        self.matrix = self.matrix.mul(&Mat4::skew(sx, sy));
        self.push(DlOp::Skew { sx, sy });
    }

    /// Row-major 2D affine: [mxx, mxy, mxt, myx, myy, myt]
    pub fn transform_2d_affine(&mut self, matrix: [f32; 6]) {
        let [mxx, mxy, mxt, myx, myy, myt] = matrix;
        let full = Mat4::from_row_major(
            mxx, mxy, 0.0, mxt, //
            myx, myy, 0.0, myt, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        self.matrix = self.matrix.mul(&full);
        self.push(DlOp::Transform2DAffine { matrix });
    }

    /// Row-major 4x4
    pub fn transform_full_perspective(&mut self, matrix: [f32; 16]) {
        let m = matrix;
        let full = Mat4::from_row_major(
            m[0], m[1], m[2], m[3], //
            m[4], m[5], m[6], m[7], //
            m[8], m[9], m[10], m[11], //
            m[12], m[13], m[14], m[15],
        );
        self.matrix = self.matrix.mul(&full);
        self.push(DlOp::TransformFullPerspective { matrix });
    }

    pub fn transform_reset(&mut self) {
        self.matrix = Mat4::IDENTITY;
        self.push(DlOp::TransformReset);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clips
    // ─────────────────────────────────────────────────────────────────────────

    pub fn clip_rect(&mut self, rect: Rect, op: DlClipOp, is_aa: bool) {
        self.push(DlOp::ClipRect { rect, op, is_aa });
    }

    pub fn clip_rounded_rect(&mut self, rrect: RoundedRect, op: DlClipOp, is_aa: bool) {
        self.push(DlOp::ClipRoundedRect { rrect, op, is_aa });
    }

    pub fn clip_path(&mut self, path: Path, op: DlClipOp, is_aa: bool) {
        self.push(DlOp::ClipPath { path, op, is_aa });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Draws
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw_color(&mut self, color: DlColor, mode: DlBlendMode) {
        self.push_draw(DlOp::DrawColor { color, mode }, None);
    }

    pub fn draw_paint(&mut self) {
        self.push_draw(DlOp::DrawPaint, None);
    }

    pub fn draw_line(&mut self, p0: Point, p1: Point) {
        let pad = (self.stroke_width * 0.5).max(0.0);
        let bounds = Rect::bounding(&[p0, p1]).map(|b| b.outset(pad, pad));
        self.push_draw(DlOp::DrawLine { p0, p1 }, bounds);
    }

    pub fn draw_rect(&mut self, rect: Rect) {
        let pad = self.stroke_pad();
        self.push_draw(DlOp::DrawRect { rect }, Some(rect.outset(pad, pad)));
    }

    pub fn draw_oval(&mut self, bounds: Rect) {
        let pad = self.stroke_pad();
        self.push_draw(DlOp::DrawOval { bounds }, Some(bounds.outset(pad, pad)));
    }

    pub fn draw_circle(&mut self, center: Point, radius: f32) {
        let pad = self.stroke_pad();
        let r = radius + pad;
        let bounds = Rect::new(center.x - r, center.y - r, 2.0 * r, 2.0 * r);
        self.push_draw(DlOp::DrawCircle { center, radius }, Some(bounds));
    }

    pub fn draw_rounded_rect(&mut self, rrect: RoundedRect) {
        let pad = self.stroke_pad();
        self.push_draw(
            DlOp::DrawRoundedRect { rrect },
            Some(rrect.rect.outset(pad, pad)),
        );
    }

    pub fn draw_double_rounded_rect(&mut self, outer: RoundedRect, inner: RoundedRect) {
        let pad = self.stroke_pad();
        self.push_draw(
            DlOp::DrawDoubleRoundedRect { outer, inner },
            Some(outer.rect.outset(pad, pad)),
        );
    }

    pub fn draw_path(&mut self, path: Path) {
        let pad = self.stroke_pad();
        let bounds = path.bounds().map(|b| b.outset(pad, pad));
        self.push_draw(DlOp::DrawPath { path }, bounds);
    }

    pub fn draw_arc(&mut self, bounds: Rect, start_degrees: f32, sweep_degrees: f32, use_center: bool) {
        let pad = self.stroke_pad();
        self.push_draw(
            DlOp::DrawArc {
                bounds,
                start_degrees,
                sweep_degrees,
                use_center,
            },
            Some(bounds.outset(pad, pad)),
        );
    }

    pub fn draw_points(&mut self, mode: DlPointMode, points: Vec<Point>) {
        let pad = self.stroke_width.max(0.0);
        let bounds = Rect::bounding(&points).map(|b| b.outset(pad, pad));
        self.push_draw(DlOp::DrawPoints { mode, points }, bounds);
    }

    pub fn draw_vertices(&mut self, vertices: DlVertices, mode: DlBlendMode) {
        let bounds = Rect::bounding(&vertices.positions);
        self.push_draw(DlOp::DrawVertices { vertices, mode }, bounds);
    }

    pub fn draw_image(
        &mut self,
        image: DlImage,
        point: Point,
        sampling: DlImageSampling,
        with_attributes: bool,
    ) {
        let bounds = image.texture().map(|texture| {
            let size = texture.size();
            Rect::new(point.x, point.y, size.width, size.height)
        });
        self.push_draw(
            DlOp::DrawImage {
                image,
                point,
                sampling,
                with_attributes,
            },
            bounds,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_image_rect(
        &mut self,
        image: DlImage,
        src: Rect,
        dst: Rect,
        sampling: DlImageSampling,
        with_attributes: bool,
        constraint: DlSrcRectConstraint,
    ) {
        self.push_draw(
            DlOp::DrawImageRect {
                image,
                src,
                dst,
                sampling,
                with_attributes,
                constraint,
            },
            Some(dst),
        );
    }

    pub fn draw_image_nine(
        &mut self,
        image: DlImage,
        center: Rect,
        dst: Rect,
        filter: DlFilterMode,
        with_attributes: bool,
    ) {
        self.push_draw(
            DlOp::DrawImageNine {
                image,
                center,
                dst,
                filter,
                with_attributes,
            },
            Some(dst),
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_atlas(
        &mut self,
        atlas: DlImage,
        transforms: Vec<DlRSTransform>,
        tex_rects: Vec<Rect>,
        colors: Vec<DlColor>,
        mode: DlBlendMode,
        sampling: DlImageSampling,
        cull_rect: Option<Rect>,
        with_attributes: bool,
    ) {
        let bounds = atlas_bounds(&transforms, &tex_rects);
        self.push_draw(
            DlOp::DrawAtlas {
                atlas,
                transforms,
                tex_rects,
                colors,
                mode,
                sampling,
                cull_rect,
                with_attributes,
            },
            bounds,
        );
    }

    pub fn draw_display_list(&mut self, list: Arc<DisplayList>, opacity: f32) {
        let bounds = list.bounds();
        self.push_draw(DlOp::DrawDisplayList { list, opacity }, bounds);
    }

    pub fn draw_text_frame(&mut self, frame: Arc<TextFrame>, x: f32, y: f32) {
        let bounds = frame.bounds().offset(x, y);
        self.push_draw(DlOp::DrawTextFrame { frame, x, y }, Some(bounds));
    }

    pub fn draw_shadow(
        &mut self,
        path: Path,
        color: DlColor,
        elevation: f32,
        transparent_occluder: bool,
        dpr: f32,
    ) {
        let occluder_z = dpr * elevation;
        let blur_pad = shadow::LIGHT_RADIUS * occluder_z;
        let bounds = path.bounds().map(|b| {
            b.union(&b.offset(0.0, occluder_z))
                .outset(blur_pad, blur_pad)
        });
        self.push_draw(
            DlOp::DrawShadow {
                path,
                color,
                elevation,
                transparent_occluder,
                dpr,
            },
            bounds,
        );
    }
}

/// Conservative root-space bounds of a sprite batch.
fn atlas_bounds(transforms: &[DlRSTransform], tex_rects: &[Rect]) -> Option<Rect> {
    let mut total: Option<Rect> = None;
    for (xform, tex) in transforms.iter().zip(tex_rects) {
        let (w, h) = (tex.width(), tex.height());
        let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)].map(|(x, y)| Point {
            x: xform.scaled_cos * x - xform.scaled_sin * y + xform.tx,
            y: xform.scaled_sin * x + xform.scaled_cos * y + xform.ty,
        });
        if let Some(sprite) = Rect::bounding(&corners) {
            total = Some(match total {
                Some(t) => t.union(&sprite),
                None => sprite,
            });
        }
    }
    total
}
