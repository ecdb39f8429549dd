//! Directive dispatch
//!
//! [`Dispatcher`] replays a recorded directive stream against a [`Canvas`].
//! Attribute directives mutate the current paint; draw directives convert
//! their arguments and delegate to the canvas with that paint. Nested
//! display lists replay inline through the same dispatcher with the caller's
//! paint baseline snapshotted on an explicit frame stack, so a malformed or
//! partial nested stream can never corrupt the caller's state.
//!
//! No directive fails outward: unsupported features degrade with a
//! diagnostic, malformed descriptors abandon the whole attribute assignment,
//! and draws without backing resources are no-ops.

use std::sync::Arc;

use lumen_core::{Color, Convexity, FillType, Mat4, Path, PathBuilder, Point, Rect, Sigma};
use lumen_paint::{
    Canvas, Cap, ColorSource, MaskBlurDescriptor, Paint, PaintStyle, PointStyle, RSTransform,
    SrcRectConstraint, TextFrame, TextureInput,
};

use crate::compose::{to_color_filter, to_image_filter};
use crate::convert::{
    filter_mode_sampler, to_blend_mode, to_blur_style, to_cap, to_clip_op, to_join, to_matrix,
    to_paint_style, to_sampler_descriptor, to_src_rect_constraint, to_tile_mode, to_vertices,
};
use crate::display_list::DisplayList;
use crate::effects::{DlColorSource, DlMaskFilter};
use crate::gradient::normalize_stops;
use crate::nine_patch;
use crate::ops::{DlOp, DlPointMode};
use crate::shadow;

/// Caller baselines snapshotted around one nested replay.
#[derive(Debug)]
struct ReplayFrame {
    paint: Paint,
    initial_matrix: Mat4,
    canvas_depth: usize,
}

/// Replays directive streams against a canvas
pub struct Dispatcher<C: Canvas> {
    canvas: C,
    paint: Paint,
    /// Baseline transform that `TransformReset` reinstates. Rebased for the
    /// duration of a nested replay.
    initial_matrix: Mat4,
    replay_stack: Vec<ReplayFrame>,
}

impl<C: Canvas> Dispatcher<C> {
    pub fn new(canvas: C) -> Self {
        let initial_matrix = canvas.current_transform();
        Self {
            canvas,
            paint: Paint::default(),
            initial_matrix,
            replay_stack: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// The current paint state.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// The baseline transform for `TransformReset`.
    pub fn initial_matrix(&self) -> Mat4 {
        self.initial_matrix
    }

    /// Nesting depth of in-progress nested replays. Zero between dispatches.
    pub fn replay_depth(&self) -> usize {
        self.replay_stack.len()
    }

    /// Finalize the canvas's accumulated drawing.
    pub fn end_recording(&mut self) -> C::Picture {
        self.canvas.end_recording()
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Replay every op of a list in order.
    pub fn dispatch_display_list(&mut self, list: &DisplayList) {
        for op in list.ops() {
            self.dispatch(op);
        }
    }

    /// Replay a list, skipping draw ops that cannot intersect `cull`.
    fn dispatch_culled(&mut self, list: &DisplayList, cull: Rect) {
        let Some(op_bounds) = list.op_bounds() else {
            self.dispatch_display_list(list);
            return;
        };
        for (op, bounds) in list.ops().iter().zip(op_bounds) {
            if let Some(rect) = bounds {
                if !rect.intersects(&cull) {
                    continue;
                }
            }
            self.dispatch(op);
        }
    }

    /// Route one directive.
    pub fn dispatch(&mut self, op: &DlOp) {
        match op {
            // ─────────────────────────────────────────────────────────────────
            // Attributes
            // ─────────────────────────────────────────────────────────────────
            // Anti-aliasing is implicit in the backend.
            DlOp::SetAntiAlias(_) => {}
            DlOp::SetDither(dither) => {
                self.paint.dither = *dither;
            }
            DlOp::SetDrawStyle(style) => {
                self.paint.style = to_paint_style(*style);
            }
            DlOp::SetColor(color) => {
                self.paint.color = color.to_color();
            }
            DlOp::SetStrokeWidth(width) => {
                self.paint.stroke_width = *width;
            }
            DlOp::SetStrokeMiter(miter) => {
                self.paint.stroke_miter = *miter;
            }
            DlOp::SetStrokeCap(cap) => {
                self.paint.stroke_cap = to_cap(*cap);
            }
            DlOp::SetStrokeJoin(join) => {
                self.paint.stroke_join = to_join(*join);
            }
            DlOp::SetColorSource(source) => {
                self.set_color_source(source.as_ref());
            }
            DlOp::SetColorFilter(filter) => {
                self.paint.color_filter = filter.as_ref().map(|f| Arc::new(to_color_filter(f)));
            }
            DlOp::SetInvertColors(invert) => {
                self.paint.invert_colors = *invert;
            }
            DlOp::SetBlendMode(mode) => {
                self.paint.blend_mode = to_blend_mode(*mode);
            }
            DlOp::SetPathEffect(effect) => {
                if effect.is_some() {
                    tracing::warn!("path effects are unsupported, ignoring");
                }
            }
            DlOp::SetMaskFilter(filter) => match filter {
                None => self.paint.mask_blur = None,
                Some(DlMaskFilter::Blur { style, sigma }) => {
                    self.paint.mask_blur = Some(MaskBlurDescriptor {
                        style: to_blur_style(*style),
                        sigma: Sigma(*sigma),
                    });
                }
            },
            DlOp::SetImageFilter(filter) => {
                self.paint.image_filter = filter.as_ref().and_then(to_image_filter);
            }

            // ─────────────────────────────────────────────────────────────────
            // Save stack
            // ─────────────────────────────────────────────────────────────────
            DlOp::Save => {
                self.canvas.save();
            }
            DlOp::SaveLayer {
                bounds,
                with_attributes,
                backdrop,
            } => {
                let paint = if *with_attributes {
                    self.paint.clone()
                } else {
                    Paint::default()
                };
                let backdrop_filter = backdrop.as_ref().and_then(to_image_filter);
                self.canvas
                    .save_layer(&paint, *bounds, backdrop_filter.as_ref());
            }
            DlOp::Restore => {
                self.canvas.restore();
            }

            // ─────────────────────────────────────────────────────────────────
            // Transforms
            // ─────────────────────────────────────────────────────────────────
            DlOp::Translate { tx, ty } => {
                self.canvas.translate(*tx, *ty);
            }
            DlOp::Scale { sx, sy } => {
                self.canvas.scale(*sx, *sy);
            }
            DlOp::Rotate { degrees } => {
                self.canvas.rotate(*degrees);
            }
            DlOp::Skew { sx, sy } => {
                self.canvas.skew(*sx, *sy);
            }
            DlOp::Transform2DAffine { matrix } => {
                let [mxx, mxy, mxt, myx, myy, myt] = *matrix;
                self.canvas.concat(&Mat4::from_row_major(
                    mxx, mxy, 0.0, mxt, //
                    myx, myy, 0.0, myt, //
                    0.0, 0.0, 1.0, 0.0, //
                    0.0, 0.0, 0.0, 1.0,
                ));
            }
            DlOp::TransformFullPerspective { matrix } => {
                let m = matrix;
                self.canvas.concat(&Mat4::from_row_major(
                    m[0], m[1], m[2], m[3], //
                    m[4], m[5], m[6], m[7], //
                    m[8], m[9], m[10], m[11], //
                    m[12], m[13], m[14], m[15],
                ));
            }
            DlOp::TransformReset => {
                self.canvas.reset_transform();
                self.canvas.concat(&self.initial_matrix);
            }

            // ─────────────────────────────────────────────────────────────────
            // Clips
            // ─────────────────────────────────────────────────────────────────
            DlOp::ClipRect { rect, op, .. } => {
                self.canvas.clip_rect(*rect, to_clip_op(*op));
            }
            DlOp::ClipRoundedRect { rrect, op, .. } => {
                if rrect.is_simple() {
                    self.canvas
                        .clip_rounded_rect(rrect.rect, rrect.simple_radius(), to_clip_op(*op));
                } else {
                    let path = PathBuilder::new().add_rounded_rect(*rrect).take_path();
                    self.canvas.clip_path(&path, to_clip_op(*op));
                }
            }
            DlOp::ClipPath { path, op, .. } => {
                self.canvas.clip_path(path, to_clip_op(*op));
            }

            // ─────────────────────────────────────────────────────────────────
            // Draws
            // ─────────────────────────────────────────────────────────────────
            DlOp::DrawColor { color, mode } => {
                let paint = Paint {
                    color: color.to_color(),
                    blend_mode: to_blend_mode(*mode),
                    ..Paint::default()
                };
                self.canvas.draw_paint(&paint);
            }
            DlOp::DrawPaint => {
                self.canvas.draw_paint(&self.paint);
            }
            DlOp::DrawLine { p0, p1 } => {
                let path = PathBuilder::new()
                    .add_line(*p0, *p1)
                    .set_convexity(Convexity::Convex)
                    .take_path();
                let paint = Paint {
                    style: PaintStyle::Stroke,
                    ..self.paint.clone()
                };
                self.canvas.draw_path(&path, &paint);
            }
            DlOp::DrawRect { rect } => {
                self.canvas.draw_rect(*rect, &self.paint);
            }
            DlOp::DrawOval { bounds } => {
                if bounds.width() == bounds.height() {
                    self.canvas
                        .draw_circle(bounds.center(), bounds.width() * 0.5, &self.paint);
                } else {
                    self.canvas.draw_oval(*bounds, &self.paint);
                }
            }
            DlOp::DrawCircle { center, radius } => {
                self.canvas.draw_circle(*center, *radius, &self.paint);
            }
            DlOp::DrawRoundedRect { rrect } => {
                if rrect.is_simple() {
                    self.canvas
                        .draw_rounded_rect(rrect.rect, rrect.simple_radius(), &self.paint);
                } else {
                    let path = PathBuilder::new().add_rounded_rect(*rrect).take_path();
                    self.canvas.draw_path(&path, &self.paint);
                }
            }
            DlOp::DrawDoubleRoundedRect { outer, inner } => {
                let path = PathBuilder::new()
                    .add_rounded_rect(*outer)
                    .add_rounded_rect(*inner)
                    .set_fill_type(FillType::EvenOdd)
                    .take_path();
                self.canvas.draw_path(&path, &self.paint);
            }
            DlOp::DrawPath { path } => {
                self.draw_path_with_fast_paths(path);
            }
            DlOp::DrawArc {
                bounds,
                start_degrees,
                sweep_degrees,
                use_center,
            } => {
                let path = PathBuilder::new()
                    .add_arc(*bounds, *start_degrees, *sweep_degrees, *use_center)
                    .take_path();
                self.canvas.draw_path(&path, &self.paint);
            }
            DlOp::DrawPoints { mode, points } => {
                self.draw_points(*mode, points);
            }
            DlOp::DrawVertices { vertices, mode } => {
                self.canvas
                    .draw_vertices(&to_vertices(vertices), to_blend_mode(*mode), &self.paint);
            }
            DlOp::DrawImage {
                image,
                point,
                sampling,
                with_attributes,
            } => {
                let Some(texture) = image.texture() else {
                    tracing::debug!("image draw without backing texture, skipping");
                    return;
                };
                let size = texture.size();
                let src = Rect::from_size(size);
                let dst = Rect::new(point.x, point.y, size.width, size.height);
                let paint = if *with_attributes {
                    self.paint.clone()
                } else {
                    Paint::default()
                };
                self.canvas.draw_image_rect(
                    texture,
                    src,
                    dst,
                    &paint,
                    &to_sampler_descriptor(*sampling),
                    SrcRectConstraint::Strict,
                );
            }
            DlOp::DrawImageRect {
                image,
                src,
                dst,
                sampling,
                with_attributes,
                constraint,
            } => {
                let Some(texture) = image.texture() else {
                    tracing::debug!("image draw without backing texture, skipping");
                    return;
                };
                let paint = if *with_attributes {
                    self.paint.clone()
                } else {
                    Paint::default()
                };
                self.canvas.draw_image_rect(
                    texture,
                    *src,
                    *dst,
                    &paint,
                    &to_sampler_descriptor(*sampling),
                    to_src_rect_constraint(*constraint),
                );
            }
            DlOp::DrawImageNine {
                image,
                center,
                dst,
                filter,
                ..
            } => {
                let Some(texture) = image.texture() else {
                    tracing::debug!("nine-patch draw without backing texture, skipping");
                    return;
                };
                nine_patch::draw_nine_patch(
                    &mut self.canvas,
                    texture,
                    *center,
                    *dst,
                    &filter_mode_sampler(*filter),
                    &self.paint,
                );
            }
            DlOp::DrawAtlas {
                atlas,
                transforms,
                tex_rects,
                colors,
                mode,
                sampling,
                cull_rect,
                ..
            } => {
                let Some(texture) = atlas.texture() else {
                    tracing::debug!("atlas draw without backing texture, skipping");
                    return;
                };
                let transforms: Vec<RSTransform> = transforms
                    .iter()
                    .map(|t| RSTransform::new(t.scaled_cos, t.scaled_sin, t.tx, t.ty))
                    .collect();
                let colors: Vec<Color> = colors.iter().map(|c| c.to_color()).collect();
                self.canvas.draw_atlas(
                    texture,
                    &transforms,
                    tex_rects,
                    &colors,
                    to_blend_mode(*mode),
                    &to_sampler_descriptor(*sampling),
                    *cull_rect,
                    &self.paint,
                );
            }
            DlOp::DrawDisplayList { list, opacity } => {
                self.draw_display_list(list, *opacity);
            }
            DlOp::DrawTextFrame { frame, x, y } => {
                self.draw_text_frame(frame, *x, *y);
            }
            DlOp::DrawShadow {
                path,
                color,
                elevation,
                transparent_occluder,
                dpr,
            } => {
                shadow::draw_shadow(
                    &mut self.canvas,
                    path,
                    color.to_color(),
                    *elevation,
                    *transparent_occluder,
                    *dpr,
                );
            }
        }
    }

    /// Inline replay of a nested display list with group opacity.
    ///
    /// The caller's paint and reset baseline are snapshotted on the replay
    /// stack and the canvas is unwound strictly to its recorded depth, so
    /// the caller observes identical state whether or not the nested stream
    /// was well formed.
    pub fn draw_display_list(&mut self, list: &DisplayList, opacity: f32) {
        self.replay_stack.push(ReplayFrame {
            paint: self.paint.clone(),
            initial_matrix: self.initial_matrix,
            canvas_depth: self.canvas.save_count(),
        });

        // The nested stream may alter the clip; isolate it.
        self.canvas.save();

        // Nested content interprets transforms relative to the current
        // accumulated transform and starts from default attributes.
        self.initial_matrix = self.canvas.current_transform();
        self.paint = Paint::default();

        // Group opacity composites through a save-layer over the whole
        // nested content rather than being pushed into leaf draws.
        if opacity < 1.0 {
            let layer_paint = Paint {
                color: Color::rgba(0.0, 0.0, 0.0, opacity),
                ..Paint::default()
            };
            self.canvas.save_layer(&layer_paint, None, None);
        }

        // Cull the nested stream when it carries bounds data and the current
        // transform can be meaningfully inverted into its space.
        if list.has_culling_bounds() && !self.initial_matrix.has_perspective() {
            match self.canvas.current_local_culling_bounds() {
                Some(cull) => self.dispatch_culled(list, cull),
                None => self.dispatch_display_list(list),
            }
        } else {
            self.dispatch_display_list(list);
        }

        if let Some(frame) = self.replay_stack.pop() {
            self.canvas.restore_to_count(frame.canvas_depth);
            self.paint = frame.paint;
            self.initial_matrix = frame.initial_matrix;
        }
    }

    fn draw_path_with_fast_paths(&mut self, path: &Path) {
        if let Some(rect) = path.as_rect() {
            self.canvas.draw_rect(rect, &self.paint);
        } else if let Some((rect, radius)) = path.as_simple_rounded_rect() {
            self.canvas.draw_rounded_rect(rect, radius, &self.paint);
        } else if let Some((center, radius)) = path.as_circle() {
            self.canvas.draw_circle(center, radius, &self.paint);
        } else {
            self.canvas.draw_path(path, &self.paint);
        }
    }

    fn draw_points(&mut self, mode: DlPointMode, points: &[Point]) {
        let paint = Paint {
            style: PaintStyle::Stroke,
            ..self.paint.clone()
        };
        match mode {
            DlPointMode::Points => {
                // Butt caps are also treated as squares.
                let style = if paint.stroke_cap == Cap::Round {
                    PointStyle::Round
                } else {
                    PointStyle::Square
                };
                let mut radius = paint.stroke_width;
                if radius > 0.0 {
                    radius /= 2.0;
                }
                self.canvas.draw_points(points, radius, &paint, style);
            }
            DlPointMode::Lines => {
                for pair in points.chunks_exact(2) {
                    let path = PathBuilder::new().add_line(pair[0], pair[1]).take_path();
                    self.canvas.draw_path(&path, &paint);
                }
            }
            DlPointMode::Polygon => {
                for segment in points.windows(2) {
                    let path = PathBuilder::new()
                        .add_line(segment[0], segment[1])
                        .take_path();
                    self.canvas.draw_path(&path, &paint);
                }
            }
        }
    }

    fn draw_text_frame(&mut self, frame: &Arc<TextFrame>, x: f32, y: f32) {
        // Glyph-atlas rendering only covers solid fills; everything else
        // renders the outline geometry.
        if self.paint.style == PaintStyle::Stroke || !self.paint.color_source.is_solid() {
            match frame.outline() {
                Some(outline) => {
                    self.canvas.save();
                    self.canvas.translate(x, y);
                    self.canvas.draw_path(outline, &self.paint);
                    self.canvas.restore();
                }
                None => {
                    tracing::warn!(
                        "text frame has no outline for stroked or non-solid paint, skipping"
                    );
                }
            }
            return;
        }
        self.canvas
            .draw_text_frame(frame, Point::new(x, y), &self.paint);
    }

    fn set_color_source(&mut self, source: Option<&DlColorSource>) {
        let Some(source) = source else {
            self.paint.color_source = ColorSource::Solid;
            return;
        };
        match source {
            DlColorSource::Solid(color) => {
                self.paint.color_source = ColorSource::Solid;
                self.paint.color = color.to_color();
            }
            DlColorSource::LinearGradient {
                start,
                end,
                gradient,
                tile_mode,
                matrix,
            } => {
                self.paint.color_source = ColorSource::LinearGradient {
                    start: *start,
                    end: *end,
                    stops: normalize_stops(gradient),
                    tile_mode: to_tile_mode(*tile_mode),
                    transform: to_matrix(matrix),
                };
            }
            DlColorSource::RadialGradient {
                center,
                radius,
                gradient,
                tile_mode,
                matrix,
            } => {
                self.paint.color_source = ColorSource::RadialGradient {
                    center: *center,
                    radius: *radius,
                    stops: normalize_stops(gradient),
                    tile_mode: to_tile_mode(*tile_mode),
                    transform: to_matrix(matrix),
                };
            }
            DlColorSource::ConicalGradient {
                start_center,
                start_radius,
                end_center,
                end_radius,
                gradient,
                tile_mode,
                matrix,
            } => {
                self.paint.color_source = ColorSource::ConicalGradient {
                    center: *end_center,
                    radius: *end_radius,
                    focus_center: *start_center,
                    focus_radius: *start_radius,
                    stops: normalize_stops(gradient),
                    tile_mode: to_tile_mode(*tile_mode),
                    transform: to_matrix(matrix),
                };
            }
            DlColorSource::SweepGradient {
                center,
                start_degrees,
                end_degrees,
                gradient,
                tile_mode,
                matrix,
            } => {
                self.paint.color_source = ColorSource::SweepGradient {
                    center: *center,
                    start_degrees: *start_degrees,
                    end_degrees: *end_degrees,
                    stops: normalize_stops(gradient),
                    tile_mode: to_tile_mode(*tile_mode),
                    transform: to_matrix(matrix),
                };
            }
            DlColorSource::Image {
                image,
                horizontal_tile_mode,
                vertical_tile_mode,
                sampling,
                matrix,
            } => {
                let Some(texture) = image.texture() else {
                    tracing::warn!("image color source has no backing texture, attribute unchanged");
                    return;
                };
                self.paint.color_source = ColorSource::Image {
                    texture: texture.clone(),
                    x_tile_mode: to_tile_mode(*horizontal_tile_mode),
                    y_tile_mode: to_tile_mode(*vertical_tile_mode),
                    sampling: to_sampler_descriptor(*sampling),
                    transform: to_matrix(matrix),
                };
            }
            DlColorSource::RuntimeEffect {
                effect,
                uniforms,
                samplers,
            } => {
                let mut texture_inputs = Vec::with_capacity(samplers.len());
                for sampler in samplers {
                    let Some(sampler) = sampler else {
                        tracing::warn!("runtime effect sampler is null, attribute unchanged");
                        return;
                    };
                    let DlColorSource::Image {
                        image, sampling, ..
                    } = sampler.as_ref()
                    else {
                        tracing::warn!(
                            "runtime effect samplers must be images, attribute unchanged"
                        );
                        return;
                    };
                    let Some(texture) = image.texture() else {
                        tracing::warn!(
                            "runtime effect sampler has no backing texture, attribute unchanged"
                        );
                        return;
                    };
                    texture_inputs.push(TextureInput {
                        sampling: to_sampler_descriptor(*sampling),
                        texture: texture.clone(),
                    });
                }
                self.paint.color_source = ColorSource::RuntimeEffect {
                    effect: effect.clone(),
                    uniforms: uniforms.clone(),
                    texture_inputs,
                };
            }
            #[cfg(feature = "scene")]
            DlColorSource::Scene { node, camera } => {
                let m = camera;
                self.paint.color_source = ColorSource::Scene {
                    node: node.clone(),
                    camera: Mat4::from_row_major(
                        m[0], m[1], m[2], m[3], //
                        m[4], m[5], m[6], m[7], //
                        m[8], m[9], m[10], m[11], //
                        m[12], m[13], m[14], m[15],
                    ),
                };
            }
            #[cfg(not(feature = "scene"))]
            DlColorSource::Scene { .. } => {
                tracing::error!("scene color sources require the `scene` feature");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DlColor;
    use crate::display_list::DisplayListBuilder;
    use crate::effects::{DlGradient, DlImage};
    use crate::ops::{
        DlBlendMode, DlDrawStyle, DlImageSampling, DlSrcRectConstraint, DlStrokeCap,
    };
    use crate::testing::{CanvasCall, RecordingCanvas};
    use lumen_core::{RoundedRect, Size};
    use lumen_paint::{BlendMode, Texture};

    fn dispatcher() -> Dispatcher<RecordingCanvas> {
        Dispatcher::new(RecordingCanvas::new())
    }

    fn rect_10() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_attribute_setters_update_paint() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetColor(DlColor::RED));
        dispatcher.dispatch(&DlOp::SetDrawStyle(DlDrawStyle::Stroke));
        dispatcher.dispatch(&DlOp::SetStrokeWidth(3.0));
        dispatcher.dispatch(&DlOp::SetStrokeCap(DlStrokeCap::Round));
        dispatcher.dispatch(&DlOp::SetBlendMode(DlBlendMode::Multiply));
        dispatcher.dispatch(&DlOp::SetInvertColors(true));
        dispatcher.dispatch(&DlOp::SetDither(true));

        let paint = dispatcher.paint();
        assert_eq!(paint.color, Color::RED);
        assert_eq!(paint.style, PaintStyle::Stroke);
        assert_eq!(paint.stroke_width, 3.0);
        assert_eq!(paint.stroke_cap, Cap::Round);
        assert_eq!(paint.blend_mode, BlendMode::Multiply);
        assert!(paint.invert_colors);
        assert!(paint.dither);
    }

    #[test]
    fn test_stroke_and_fill_degrades_to_fill() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetDrawStyle(DlDrawStyle::StrokeAndFill));
        assert_eq!(dispatcher.paint().style, PaintStyle::Fill);
    }

    #[test]
    fn test_solid_color_source_sets_color() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetColorSource(Some(DlColorSource::Solid(
            DlColor::GREEN,
        ))));
        assert!(dispatcher.paint().color_source.is_solid());
        assert_eq!(dispatcher.paint().color, Color::GREEN);
    }

    #[test]
    fn test_gradient_color_source_normalizes_stops() {
        let mut dispatcher = dispatcher();
        let gradient = DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.25, 0.75]).unwrap();
        dispatcher.dispatch(&DlOp::SetColorSource(Some(DlColorSource::LinearGradient {
            start: Point::ZERO,
            end: Point::new(10.0, 0.0),
            gradient,
            tile_mode: crate::ops::DlTileMode::Mirror,
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        })));
        match &dispatcher.paint().color_source {
            ColorSource::LinearGradient { stops, tile_mode, .. } => {
                assert_eq!(stops.len(), 4);
                assert_eq!(stops[0].stop, 0.0);
                assert_eq!(stops[3].stop, 1.0);
                assert_eq!(*tile_mode, lumen_paint::TileMode::Mirror);
            }
            other => panic!("unexpected color source {other:?}"),
        }
    }

    #[test]
    fn test_clearing_color_source_restores_solid() {
        let mut dispatcher = dispatcher();
        let gradient = DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.0, 1.0]).unwrap();
        dispatcher.dispatch(&DlOp::SetColorSource(Some(DlColorSource::RadialGradient {
            center: Point::ZERO,
            radius: 5.0,
            gradient,
            tile_mode: crate::ops::DlTileMode::Clamp,
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        })));
        assert!(!dispatcher.paint().color_source.is_solid());
        dispatcher.dispatch(&DlOp::SetColorSource(None));
        assert!(dispatcher.paint().color_source.is_solid());
    }

    #[test]
    fn test_malformed_runtime_effect_leaves_state_unchanged() {
        let mut dispatcher = dispatcher();
        let gradient = DlGradient::new(vec![DlColor::RED, DlColor::BLUE], vec![0.0, 1.0]).unwrap();
        let original = DlColorSource::LinearGradient {
            start: Point::ZERO,
            end: Point::new(1.0, 0.0),
            gradient,
            tile_mode: crate::ops::DlTileMode::Clamp,
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        };
        dispatcher.dispatch(&DlOp::SetColorSource(Some(original)));
        let before = dispatcher.paint().color_source.clone();

        dispatcher.dispatch(&DlOp::SetColorSource(Some(DlColorSource::RuntimeEffect {
            effect: Arc::new(lumen_paint::RuntimeEffect::new()),
            uniforms: Arc::new(vec![0u8; 16]),
            samplers: vec![None],
        })));
        assert_eq!(dispatcher.paint().color_source, before);
    }

    #[test]
    fn test_draw_oval_circle_fast_path() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawOval {
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
        });
        dispatcher.dispatch(&DlOp::DrawOval {
            bounds: Rect::new(0.0, 0.0, 10.0, 20.0),
        });
        let calls = dispatcher.canvas().calls();
        assert!(matches!(
            &calls[0],
            CanvasCall::DrawCircle { center, radius, .. }
                if *center == Point::new(5.0, 5.0) && *radius == 5.0
        ));
        assert!(matches!(calls[1], CanvasCall::DrawOval { .. }));
    }

    #[test]
    fn test_path_shape_fast_paths() {
        let mut dispatcher = dispatcher();
        let rect_path = PathBuilder::new().add_rect(rect_10()).take_path();
        let rrect_path = PathBuilder::new()
            .add_rounded_rect(RoundedRect::simple(rect_10(), 2.0))
            .take_path();
        let circle_path = PathBuilder::new().add_oval(rect_10()).take_path();
        let generic = PathBuilder::new()
            .move_to(Point::ZERO)
            .line_to(Point::new(4.0, 9.0))
            .line_to(Point::new(9.0, 1.0))
            .close()
            .take_path();

        dispatcher.dispatch(&DlOp::DrawPath { path: rect_path });
        dispatcher.dispatch(&DlOp::DrawPath { path: rrect_path });
        dispatcher.dispatch(&DlOp::DrawPath { path: circle_path });
        dispatcher.dispatch(&DlOp::DrawPath { path: generic });

        let calls = dispatcher.canvas().calls();
        assert!(matches!(calls[0], CanvasCall::DrawRect { .. }));
        assert!(matches!(calls[1], CanvasCall::DrawRoundedRect { .. }));
        assert!(matches!(calls[2], CanvasCall::DrawCircle { .. }));
        assert!(matches!(calls[3], CanvasCall::DrawPath { .. }));
    }

    #[test]
    fn test_draw_line_forces_stroke() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawLine {
            p0: Point::ZERO,
            p1: Point::new(5.0, 5.0),
        });
        match &dispatcher.canvas().calls()[0] {
            CanvasCall::DrawPath { paint, .. } => assert_eq!(paint.style, PaintStyle::Stroke),
            other => panic!("unexpected call {other:?}"),
        }
        // The dispatcher's own paint is untouched.
        assert_eq!(dispatcher.paint().style, PaintStyle::Fill);
    }

    #[test]
    fn test_point_mode_styles() {
        let points = vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(2.0, 0.0)];

        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetStrokeWidth(4.0));
        dispatcher.dispatch(&DlOp::DrawPoints {
            mode: DlPointMode::Points,
            points: points.clone(),
        });
        match &dispatcher.canvas().calls()[0] {
            CanvasCall::DrawPoints {
                count,
                radius,
                style,
                paint,
            } => {
                assert_eq!(*count, 3);
                assert_eq!(*radius, 2.0);
                // Butt caps render as squares.
                assert_eq!(*style, PointStyle::Square);
                assert_eq!(paint.style, PaintStyle::Stroke);
            }
            other => panic!("unexpected call {other:?}"),
        }

        let mut dispatcher = self::dispatcher();
        dispatcher.dispatch(&DlOp::SetStrokeCap(DlStrokeCap::Round));
        dispatcher.dispatch(&DlOp::DrawPoints {
            mode: DlPointMode::Points,
            points: points.clone(),
        });
        assert!(matches!(
            dispatcher.canvas().calls()[0],
            CanvasCall::DrawPoints {
                style: PointStyle::Round,
                ..
            }
        ));

        // Lines pair up points, dropping an unpaired tail; polygons chain.
        let mut dispatcher = self::dispatcher();
        dispatcher.dispatch(&DlOp::DrawPoints {
            mode: DlPointMode::Lines,
            points: points.clone(),
        });
        assert_eq!(dispatcher.canvas().draw_calls().len(), 1);

        let mut dispatcher = self::dispatcher();
        dispatcher.dispatch(&DlOp::DrawPoints {
            mode: DlPointMode::Polygon,
            points,
        });
        assert_eq!(dispatcher.canvas().draw_calls().len(), 2);
    }

    #[test]
    fn test_transform_reset_reinstates_initial_matrix() {
        let mut canvas = RecordingCanvas::new();
        canvas.concat(&Mat4::translation(7.0, 11.0, 0.0));
        let initial = canvas.current_transform();

        let mut dispatcher = Dispatcher::new(canvas);
        dispatcher.dispatch(&DlOp::Translate { tx: 50.0, ty: 0.0 });
        dispatcher.dispatch(&DlOp::TransformReset);

        let calls = dispatcher.canvas().calls();
        let n = calls.len();
        assert_eq!(calls[n - 2], CanvasCall::ResetTransform);
        assert_eq!(calls[n - 1], CanvasCall::Concat { matrix: initial });
        assert_eq!(dispatcher.canvas().current_transform(), initial);
    }

    #[test]
    fn test_nested_replay_restores_state() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetColor(DlColor::RED));
        dispatcher.dispatch(&DlOp::SetDrawStyle(DlDrawStyle::Stroke));

        let mut nested = DisplayListBuilder::new();
        nested.set_color(DlColor::BLUE);
        nested.save();
        nested.clip_rect(rect_10(), crate::ops::DlClipOp::Intersect, true);
        nested.draw_rect(rect_10());
        nested.restore();
        let nested = Arc::new(nested.build());

        let depth = dispatcher.canvas().save_count();
        let paint = dispatcher.paint().clone();
        let matrix = dispatcher.initial_matrix();

        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: nested,
            opacity: 1.0,
        });

        assert_eq!(dispatcher.canvas().save_count(), depth);
        assert_eq!(*dispatcher.paint(), paint);
        assert_eq!(dispatcher.initial_matrix(), matrix);
        assert_eq!(dispatcher.replay_depth(), 0);
    }

    #[test]
    fn test_nested_replay_restores_after_malformed_stream() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetColor(DlColor::RED));

        // Three unmatched saves and a mid-stream clip.
        let mut nested = DisplayListBuilder::new();
        nested.save();
        nested.save();
        nested.clip_rect(rect_10(), crate::ops::DlClipOp::Intersect, true);
        nested.save();
        nested.draw_rect(rect_10());
        let nested = Arc::new(nested.build());

        let depth = dispatcher.canvas().save_count();
        let paint = dispatcher.paint().clone();

        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: nested,
            opacity: 0.5,
        });

        assert_eq!(dispatcher.canvas().save_count(), depth);
        assert_eq!(*dispatcher.paint(), paint);
        assert_eq!(dispatcher.replay_depth(), 0);
    }

    #[test]
    fn test_group_opacity_uses_save_layer() {
        let mut nested = DisplayListBuilder::new();
        nested.draw_rect(rect_10());
        let nested = Arc::new(nested.build());

        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: nested.clone(),
            opacity: 0.5,
        });
        let layer = dispatcher
            .canvas()
            .calls()
            .iter()
            .find_map(|call| match call {
                CanvasCall::SaveLayer { paint, .. } => Some(paint.clone()),
                _ => None,
            })
            .expect("group opacity should push a save layer");
        assert_eq!(layer.color, Color::rgba(0.0, 0.0, 0.0, 0.5));

        // Full opacity composites without a layer.
        let mut dispatcher = self::dispatcher();
        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: nested,
            opacity: 1.0,
        });
        assert!(!dispatcher
            .canvas()
            .calls()
            .iter()
            .any(|call| matches!(call, CanvasCall::SaveLayer { .. })));
    }

    #[test]
    fn test_nested_cull_bounds_skip_draws() {
        let mut nested = DisplayListBuilder::new();
        nested.draw_rect(Rect::new(5.0, 5.0, 5.0, 5.0));
        nested.draw_rect(Rect::new(100.0, 100.0, 5.0, 5.0));
        let nested = Arc::new(nested.build());
        assert!(nested.has_culling_bounds());

        let canvas = RecordingCanvas::with_local_culling_bounds(Rect::new(0.0, 0.0, 20.0, 20.0));
        let mut dispatcher = Dispatcher::new(canvas);
        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: nested.clone(),
            opacity: 1.0,
        });
        assert_eq!(dispatcher.canvas().draw_calls().len(), 1);

        // Without culling data the replay is unconstrained.
        let mut unculled = DisplayListBuilder::with_culling(false);
        unculled.draw_rect(Rect::new(5.0, 5.0, 5.0, 5.0));
        unculled.draw_rect(Rect::new(100.0, 100.0, 5.0, 5.0));
        let unculled = Arc::new(unculled.build());

        let canvas = RecordingCanvas::with_local_culling_bounds(Rect::new(0.0, 0.0, 20.0, 20.0));
        let mut dispatcher = Dispatcher::new(canvas);
        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: unculled,
            opacity: 1.0,
        });
        assert_eq!(dispatcher.canvas().draw_calls().len(), 2);

        // A perspective transform disables culling entirely.
        let mut perspective = Mat4::IDENTITY;
        perspective.cols[2][3] = 0.002;
        let mut canvas = RecordingCanvas::with_local_culling_bounds(Rect::new(0.0, 0.0, 20.0, 20.0));
        canvas.concat(&perspective);
        let mut dispatcher = Dispatcher::new(canvas);
        dispatcher.dispatch(&DlOp::DrawDisplayList {
            list: nested,
            opacity: 1.0,
        });
        assert_eq!(dispatcher.canvas().draw_calls().len(), 2);
    }

    #[test]
    fn test_image_without_texture_is_noop() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawImage {
            image: DlImage::unbacked(),
            point: Point::ZERO,
            sampling: DlImageSampling::Linear,
            with_attributes: true,
        });
        dispatcher.dispatch(&DlOp::DrawImageRect {
            image: DlImage::unbacked(),
            src: rect_10(),
            dst: rect_10(),
            sampling: DlImageSampling::Linear,
            with_attributes: true,
            constraint: DlSrcRectConstraint::Fast,
        });
        assert!(dispatcher.canvas().calls().is_empty());
    }

    #[test]
    fn test_draw_image_expands_to_strict_image_rect() {
        let texture = Arc::new(Texture::new(Size::new(16.0, 8.0)));
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawImage {
            image: DlImage::new(texture),
            point: Point::new(2.0, 3.0),
            sampling: DlImageSampling::Cubic,
            with_attributes: false,
        });
        match &dispatcher.canvas().calls()[0] {
            CanvasCall::DrawImageRect {
                src,
                dst,
                sampler_label,
                constraint,
                paint,
            } => {
                assert_eq!(*src, Rect::new(0.0, 0.0, 16.0, 8.0));
                assert_eq!(*dst, Rect::new(2.0, 3.0, 16.0, 8.0));
                // Cubic approximates to linear.
                assert_eq!(*sampler_label, "Linear Sampler");
                assert_eq!(*constraint, SrcRectConstraint::Strict);
                assert_eq!(*paint, Paint::default());
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_nine_patch_emits_nine_cells() {
        let texture = Arc::new(Texture::new(Size::new(30.0, 30.0)));
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawImageNine {
            image: DlImage::new(texture),
            center: Rect::new(10.0, 10.0, 10.0, 10.0),
            dst: Rect::new(0.0, 0.0, 90.0, 90.0),
            filter: crate::ops::DlFilterMode::Nearest,
            with_attributes: true,
        });
        let calls = dispatcher.canvas().calls();
        assert_eq!(calls.len(), 9);
        // Center cell stretches.
        assert!(calls.iter().any(|call| matches!(
            call,
            CanvasCall::DrawImageRect { src, dst, .. }
                if *src == Rect::new(10.0, 10.0, 10.0, 10.0)
                    && *dst == Rect::new(10.0, 10.0, 70.0, 70.0)
        )));
    }

    #[test]
    fn test_text_falls_back_to_outline_for_stroke() {
        let outline = PathBuilder::new()
            .move_to(Point::ZERO)
            .line_to(Point::new(8.0, 0.0))
            .take_path();
        let frame = Arc::new(TextFrame::with_outline(rect_10(), outline));

        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetDrawStyle(DlDrawStyle::Stroke));
        dispatcher.dispatch(&DlOp::DrawTextFrame {
            frame: frame.clone(),
            x: 4.0,
            y: 6.0,
        });
        let calls = dispatcher.canvas().calls();
        assert!(matches!(calls[0], CanvasCall::Save));
        assert_eq!(calls[1], CanvasCall::Translate { tx: 4.0, ty: 6.0 });
        assert!(matches!(calls[2], CanvasCall::DrawPath { .. }));
        assert!(matches!(calls[3], CanvasCall::Restore));

        // Solid fill takes the glyph path.
        let mut dispatcher = self::dispatcher();
        dispatcher.dispatch(&DlOp::DrawTextFrame { frame, x: 4.0, y: 6.0 });
        assert!(matches!(
            &dispatcher.canvas().calls()[0],
            CanvasCall::DrawTextFrame { position, .. } if *position == Point::new(4.0, 6.0)
        ));
    }

    #[test]
    fn test_text_without_outline_skips_under_stroke() {
        let frame = Arc::new(TextFrame::new(rect_10()));
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetDrawStyle(DlDrawStyle::Stroke));
        dispatcher.dispatch(&DlOp::DrawTextFrame { frame, x: 0.0, y: 0.0 });
        assert!(dispatcher.canvas().draw_calls().is_empty());
    }

    #[test]
    fn test_zero_elevation_shadow_is_unblurred_and_unmoved() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::DrawShadow {
            path: PathBuilder::new().add_rect(rect_10()).take_path(),
            color: DlColor::RED,
            elevation: 0.0,
            transparent_occluder: false,
            dpr: 2.0,
        });
        let calls = dispatcher.canvas().calls();
        assert!(matches!(calls[0], CanvasCall::Save));
        assert_eq!(calls[1], CanvasCall::Translate { tx: 0.0, ty: 0.0 });
        match &calls[2] {
            CanvasCall::DrawRect { paint, .. } => {
                let mask = paint.mask_blur.expect("shadow paint carries a mask blur");
                assert_eq!(mask.sigma, Sigma(0.0));
            }
            other => panic!("unexpected call {other:?}"),
        }
        assert!(matches!(calls[3], CanvasCall::Restore));
    }

    #[test]
    fn test_save_layer_attribute_selection() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetColor(DlColor::RED));
        dispatcher.dispatch(&DlOp::SaveLayer {
            bounds: None,
            with_attributes: true,
            backdrop: None,
        });
        dispatcher.dispatch(&DlOp::SaveLayer {
            bounds: Some(rect_10()),
            with_attributes: false,
            backdrop: None,
        });
        let calls = dispatcher.canvas().calls();
        match (&calls[0], &calls[1]) {
            (
                CanvasCall::SaveLayer { paint: with, .. },
                CanvasCall::SaveLayer { paint: without, bounds, .. },
            ) => {
                assert_eq!(with.color, Color::RED);
                assert_eq!(*without, Paint::default());
                assert_eq!(*bounds, Some(rect_10()));
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn test_mask_filter_set_and_clear() {
        let mut dispatcher = dispatcher();
        dispatcher.dispatch(&DlOp::SetMaskFilter(Some(DlMaskFilter::Blur {
            style: crate::ops::DlBlurStyle::Outer,
            sigma: 3.0,
        })));
        assert_eq!(
            dispatcher.paint().mask_blur,
            Some(MaskBlurDescriptor {
                style: lumen_paint::BlurStyle::Outer,
                sigma: Sigma(3.0),
            })
        );
        dispatcher.dispatch(&DlOp::SetMaskFilter(None));
        assert_eq!(dispatcher.paint().mask_blur, None);
    }
}
