//! Tonal shadow rendering
//!
//! Physically-plausible shadows are approximated by redrawing the occluder
//! shape with a perceptually tone-mapped spot color and a mask blur sized by
//! the occluder's elevation. The tone mapping reproduces the reference
//! formula exactly; deviating changes shadow appearance on real content.

use lumen_core::{BlurRadius, Color, Path, Sigma, Vec3};
use lumen_paint::{BlurStyle, Canvas, MaskBlurDescriptor, Paint, PaintStyle};

/// Light radius over light height.
pub(crate) const LIGHT_RADIUS: f32 = 800.0 / 600.0;

/// Fixed directional key light.
const LIGHT_POSITION: Vec3 = Vec3 {
    x: 0.0,
    y: -1.0,
    z: 1.0,
};

/// Tone-map an occluder color into the shadow's spot color.
pub fn compute_tonal_color(occluder_color: Color) -> Color {
    let alpha = occluder_color.a * 0.25;

    let max = occluder_color.r.max(occluder_color.g).max(occluder_color.b);
    let min = occluder_color.r.min(occluder_color.g).min(occluder_color.b);
    let luminance = (min + max) * 0.5;

    let alpha_adjust = (2.6 + (-2.66667 + 1.06667 * alpha) * alpha) * alpha;
    let color_alpha = (3.544_762 + (-4.891_428 + 2.3466 * luminance) * luminance) * luminance;
    let color_alpha = (alpha_adjust * color_alpha).clamp(0.0, 1.0);

    let greyscale_alpha = (alpha * (1.0 - 0.4 * luminance)).clamp(0.0, 1.0);

    let color_scale = color_alpha * (1.0 - greyscale_alpha);
    let tonal_alpha = color_scale + greyscale_alpha;
    let unpremul_scale = if tonal_alpha != 0.0 {
        color_scale / tonal_alpha
    } else {
        0.0
    };
    Color::rgba(
        unpremul_scale * occluder_color.r,
        unpremul_scale * occluder_color.g,
        unpremul_scale * occluder_color.b,
        tonal_alpha,
    )
}

/// Redraw the occluder shape as its soft shadow.
///
/// `transparent_occluder` is accepted for interface fidelity; the tone
/// formula does not currently use it.
pub fn draw_shadow<C: Canvas>(
    canvas: &mut C,
    path: &Path,
    occluder_color: Color,
    elevation: f32,
    _transparent_occluder: bool,
    dpr: f32,
) {
    let spot_color = compute_tonal_color(occluder_color);
    let occluder_z = dpr * elevation;
    let vertical_scale = canvas.current_transform().basis_scale().y;

    let paint = Paint {
        style: PaintStyle::Fill,
        color: spot_color,
        mask_blur: Some(MaskBlurDescriptor {
            style: BlurStyle::Normal,
            sigma: Sigma::from(BlurRadius(LIGHT_RADIUS * occluder_z / vertical_scale)),
        }),
        ..Paint::default()
    };

    canvas.save();
    canvas.translate(0.0, -occluder_z * LIGHT_POSITION.y);

    // Cheapest matching primitive first; general path rendering is last.
    if let Some(rect) = path.as_rect() {
        canvas.draw_rect(rect, &paint);
    } else if let Some((rect, radius)) = path.as_simple_rounded_rect() {
        canvas.draw_rounded_rect(rect, radius, &paint);
    } else if let Some((center, radius)) = path.as_circle() {
        canvas.draw_circle(center, radius, &paint);
    } else {
        canvas.draw_path(path, &paint);
    }

    canvas.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_red_tonal_color() {
        let tonal = compute_tonal_color(Color::RED);

        // Expected values follow from the formula with alpha 0.25 and
        // luminance 0.5.
        let alpha = 0.25f32;
        let luminance = 0.5f32;
        let alpha_adjust = (2.6 + (-2.66667 + 1.06667 * alpha) * alpha) * alpha;
        let color_alpha = ((3.544_762 + (-4.891_428 + 2.3466 * luminance) * luminance) * luminance
            * alpha_adjust)
            .clamp(0.0, 1.0);
        let greyscale_alpha = (alpha * (1.0 - 0.4 * luminance)).clamp(0.0, 1.0);
        let color_scale = color_alpha * (1.0 - greyscale_alpha);
        let tonal_alpha = color_scale + greyscale_alpha;
        let unpremul_scale = color_scale / tonal_alpha;

        assert!((tonal.r - unpremul_scale).abs() < 1e-6);
        assert_eq!(tonal.g, 0.0);
        assert_eq!(tonal.b, 0.0);
        assert!((tonal.a - tonal_alpha).abs() < 1e-6);
    }

    #[test]
    fn test_fully_transparent_occluder_has_no_tone() {
        let tonal = compute_tonal_color(Color::TRANSPARENT);
        assert_eq!(tonal.a, 0.0);
        assert_eq!(tonal.r, 0.0);
    }
}
