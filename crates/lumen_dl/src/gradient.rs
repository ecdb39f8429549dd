//! Gradient stop normalization
//!
//! Backends require stop lists that begin at 0.0 and end at 1.0. Recorded
//! gradients only guarantee non-decreasing stops inside [0, 1], so dispatch
//! pads both ends by repeating the edge colors. The same normalization runs
//! for every gradient kind.

use lumen_paint::color_source::{GradientStop, GradientStops};

use crate::effects::DlGradient;

/// Produce a canonical stop list: same colors and offsets, with a synthetic
/// leading entry when the first stop is not 0.0 and a synthetic trailing
/// entry when the last stop is not 1.0.
pub fn normalize_stops(gradient: &DlGradient) -> GradientStops {
    let colors = gradient.colors();
    let stops = gradient.stops();

    let mut normalized = GradientStops::new();
    if stops[0] != 0.0 {
        normalized.push(GradientStop {
            color: colors[0].to_color(),
            stop: 0.0,
        });
    }
    for (color, &stop) in colors.iter().zip(stops) {
        normalized.push(GradientStop {
            color: color.to_color(),
            stop,
        });
    }
    if let Some(&GradientStop { color, stop }) = normalized.last() {
        if stop != 1.0 {
            normalized.push(GradientStop { color, stop: 1.0 });
        }
    }
    normalized
}
