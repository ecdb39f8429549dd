//! Gaussian blur metrics
//!
//! Blur strength is expressed either as a Gaussian sigma or as the radius of
//! the sampled kernel. Backends consume sigma; public drawing APIs usually
//! speak in radii. The two newtypes keep the units from being mixed up.

/// 90% of samples of a Gaussian fall within this many sigma of the mean, so a
/// kernel of this radius (in sigmas) covers the visually significant extent.
const KERNEL_RADIUS_PER_SIGMA: f32 = 1.73205080757;

/// Blur strength as a Gaussian standard deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Sigma(pub f32);

/// Blur strength as a kernel radius in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct BlurRadius(pub f32);

impl From<BlurRadius> for Sigma {
    fn from(radius: BlurRadius) -> Self {
        Sigma(if radius.0 > 0.0 {
            radius.0 / KERNEL_RADIUS_PER_SIGMA + 0.5
        } else {
            0.0
        })
    }
}

impl From<Sigma> for BlurRadius {
    fn from(sigma: Sigma) -> Self {
        BlurRadius(if sigma.0 > 0.5 {
            (sigma.0 - 0.5) * KERNEL_RADIUS_PER_SIGMA
        } else {
            0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_radius_is_zero_sigma() {
        assert_eq!(Sigma::from(BlurRadius(0.0)), Sigma(0.0));
        assert_eq!(BlurRadius::from(Sigma(0.0)), BlurRadius(0.0));
    }

    #[test]
    fn test_round_trip() {
        let sigma = Sigma::from(BlurRadius(4.0));
        let radius = BlurRadius::from(sigma);
        assert!((radius.0 - 4.0).abs() < 1e-4);
    }
}
