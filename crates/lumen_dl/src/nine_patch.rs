//! Nine-patch image stretching
//!
//! Decomposes a nine-patch draw into at most nine plain image-rect draws:
//! corners keep their source size, edges stretch along one axis, the center
//! stretches along both. Cells that collapse to nothing on either side are
//! skipped.

use std::sync::Arc;

use lumen_core::Rect;
use lumen_paint::{Canvas, Paint, SamplerDescriptor, SrcRectConstraint, Texture};

pub fn draw_nine_patch<C: Canvas>(
    canvas: &mut C,
    texture: &Arc<Texture>,
    center: Rect,
    dst: Rect,
    sampler: &SamplerDescriptor,
    paint: &Paint,
) {
    if dst.is_empty() {
        return;
    }
    let size = texture.size();
    let (w, h) = (size.width, size.height);

    let center_left = center.left().clamp(0.0, w);
    let center_right = center.right().clamp(center_left, w);
    let center_top = center.top().clamp(0.0, h);
    let center_bottom = center.bottom().clamp(center_top, h);

    let left_w = center_left;
    let right_w = w - center_right;
    let top_h = center_top;
    let bottom_h = h - center_bottom;

    // When the destination is smaller than the fixed edges, shrink the edges
    // proportionally instead of letting the middle invert.
    let scale_x = if left_w + right_w > dst.width() && left_w + right_w > 0.0 {
        dst.width() / (left_w + right_w)
    } else {
        1.0
    };
    let scale_y = if top_h + bottom_h > dst.height() && top_h + bottom_h > 0.0 {
        dst.height() / (top_h + bottom_h)
    } else {
        1.0
    };

    let src_x = [0.0, center_left, center_right, w];
    let src_y = [0.0, center_top, center_bottom, h];
    let dst_x = [
        dst.left(),
        dst.left() + left_w * scale_x,
        dst.right() - right_w * scale_x,
        dst.right(),
    ];
    let dst_y = [
        dst.top(),
        dst.top() + top_h * scale_y,
        dst.bottom() - bottom_h * scale_y,
        dst.bottom(),
    ];

    for row in 0..3 {
        for col in 0..3 {
            let src = Rect::from_ltrb(src_x[col], src_y[row], src_x[col + 1], src_y[row + 1]);
            let dest = Rect::from_ltrb(dst_x[col], dst_y[row], dst_x[col + 1], dst_y[row + 1]);
            if src.is_empty() || dest.is_empty() {
                continue;
            }
            canvas.draw_image_rect(texture, src, dest, paint, sampler, SrcRectConstraint::Fast);
        }
    }
}
