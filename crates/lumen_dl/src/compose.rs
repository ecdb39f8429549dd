//! Filter composition
//!
//! Builds the paint model's filter values from recorded descriptors. Image
//! filters become a graph of [`ImageFilter`] nodes with every parameter
//! captured by value, since the backend walks the graph long after dispatch
//! has moved on. Absence is meaningful: a descriptor can legitimately build
//! to no filter at all (negative morphology radii), and composition must
//! short-circuit around absent sides.

use std::sync::Arc;

use lumen_core::Sigma;
use lumen_paint::{ColorFilter, ColorMatrix, ImageFilter, MorphType};

use crate::convert::{to_blend_mode, to_matrix, to_sampler_descriptor, to_tile_mode};
use crate::effects::{DlColorFilter, DlImageFilter};

/// Build a color filter value from its descriptor.
pub fn to_color_filter(filter: &DlColorFilter) -> ColorFilter {
    match filter {
        DlColorFilter::Blend { color, mode } => ColorFilter::Blend {
            mode: to_blend_mode(*mode),
            color: color.to_color(),
        },
        DlColorFilter::Matrix(array) => ColorFilter::Matrix(ColorMatrix { array: *array }),
        DlColorFilter::SrgbToLinearGamma => ColorFilter::SrgbToLinear,
        DlColorFilter::LinearToSrgbGamma => ColorFilter::LinearToSrgb,
    }
}

/// Build an image filter graph from its descriptor. `None` means the
/// descriptor describes no effect.
pub fn to_image_filter(filter: &DlImageFilter) -> Option<Arc<ImageFilter>> {
    match filter {
        DlImageFilter::Blur {
            sigma_x,
            sigma_y,
            tile_mode,
        } => Some(Arc::new(ImageFilter::blur(
            Sigma(*sigma_x),
            Sigma(*sigma_y),
            to_tile_mode(*tile_mode),
        ))),
        DlImageFilter::Dilate { radius_x, radius_y } => {
            ImageFilter::morphology(*radius_x, *radius_y, MorphType::Dilate).map(Arc::new)
        }
        DlImageFilter::Erode { radius_x, radius_y } => {
            ImageFilter::morphology(*radius_x, *radius_y, MorphType::Erode).map(Arc::new)
        }
        DlImageFilter::Matrix { matrix, sampling } => Some(Arc::new(
            ImageFilter::matrix_transform(to_matrix(matrix), to_sampler_descriptor(*sampling)),
        )),
        DlImageFilter::Compose { outer, inner } => {
            ImageFilter::compose(to_image_filter(outer), to_image_filter(inner))
        }
        DlImageFilter::ColorFilter(color_filter) => Some(Arc::new(
            ImageFilter::from_color_filter(Arc::new(to_color_filter(color_filter))),
        )),
        DlImageFilter::LocalMatrix { matrix, filter } => {
            ImageFilter::local_matrix(to_matrix(matrix), to_image_filter(filter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DlColor;
    use crate::ops::{DlBlendMode, DlImageSampling, DlTileMode};
    use lumen_paint::{BlendMode, TileMode};

    fn blur_descriptor() -> DlImageFilter {
        DlImageFilter::Blur {
            sigma_x: 2.0,
            sigma_y: 3.0,
            tile_mode: DlTileMode::Decal,
        }
    }

    #[test]
    fn test_blur_captures_parameters() {
        let filter = to_image_filter(&blur_descriptor()).unwrap();
        assert_eq!(
            *filter,
            ImageFilter::Blur {
                sigma_x: Sigma(2.0),
                sigma_y: Sigma(3.0),
                tile_mode: TileMode::Decal,
            }
        );
    }

    #[test]
    fn test_negative_morphology_builds_nothing() {
        let dilate = DlImageFilter::Dilate {
            radius_x: -1.0,
            radius_y: 4.0,
        };
        assert_eq!(to_image_filter(&dilate), None);

        let erode = DlImageFilter::Erode {
            radius_x: 4.0,
            radius_y: -0.5,
        };
        assert_eq!(to_image_filter(&erode), None);
    }

    #[test]
    fn test_compose_degenerates_around_absent_side() {
        // The inner side builds to nothing, so the compose is just the blur.
        let compose = DlImageFilter::Compose {
            outer: Box::new(blur_descriptor()),
            inner: Box::new(DlImageFilter::Dilate {
                radius_x: -1.0,
                radius_y: -1.0,
            }),
        };
        let built = to_image_filter(&compose).unwrap();
        assert_eq!(built, to_image_filter(&blur_descriptor()).unwrap());

        // Both sides absent: the whole compose is absent.
        let empty = DlImageFilter::Compose {
            outer: Box::new(DlImageFilter::Erode {
                radius_x: -1.0,
                radius_y: 0.0,
            }),
            inner: Box::new(DlImageFilter::Dilate {
                radius_x: -1.0,
                radius_y: 0.0,
            }),
        };
        assert_eq!(to_image_filter(&empty), None);
    }

    #[test]
    fn test_compose_orders_inner_then_outer() {
        let outer = blur_descriptor();
        let inner = DlImageFilter::Matrix {
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            sampling: DlImageSampling::Linear,
        };
        let built = to_image_filter(&DlImageFilter::Compose {
            outer: Box::new(outer.clone()),
            inner: Box::new(inner.clone()),
        })
        .unwrap();
        match &*built {
            ImageFilter::Compose {
                outer: built_outer,
                inner: built_inner,
            } => {
                assert_eq!(Some(built_outer.clone()), to_image_filter(&outer));
                assert_eq!(Some(built_inner.clone()), to_image_filter(&inner));
            }
            other => panic!("unexpected filter {other:?}"),
        }
    }

    #[test]
    fn test_color_filter_wrap_defers_opacity() {
        let descriptor = DlImageFilter::ColorFilter(DlColorFilter::Blend {
            color: DlColor::GREEN,
            mode: DlBlendMode::Multiply,
        });
        match &*to_image_filter(&descriptor).unwrap() {
            ImageFilter::FromColorFilter {
                filter,
                absorb_opacity,
            } => {
                assert!(!absorb_opacity);
                assert_eq!(
                    **filter,
                    ColorFilter::Blend {
                        mode: BlendMode::Multiply,
                        color: DlColor::GREEN.to_color(),
                    }
                );
            }
            other => panic!("unexpected filter {other:?}"),
        }
    }

    #[test]
    fn test_local_matrix_of_absent_inner_is_absent() {
        let descriptor = DlImageFilter::LocalMatrix {
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            filter: Box::new(DlImageFilter::Dilate {
                radius_x: -2.0,
                radius_y: -2.0,
            }),
        };
        assert_eq!(to_image_filter(&descriptor), None);
    }
}
