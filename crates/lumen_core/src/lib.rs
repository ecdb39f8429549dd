//! Lumen Core Value Types
//!
//! Foundational geometry and color primitives shared by the display-list
//! format, the paint model, and rendering backends:
//!
//! - Points, sizes, rectangles, and rounded rectangles
//! - Column-major 4x4 transforms
//! - RGBA colors (linear space, f32 components)
//! - Paths with canonical-shape fast paths
//! - Gaussian blur metrics (sigma and kernel radius)

pub mod blur;
pub mod color;
pub mod geometry;
pub mod matrix;
pub mod path;

pub use blur::{BlurRadius, Sigma};
pub use color::Color;
pub use geometry::{CornerRadius, Point, Rect, RoundedRect, Size, Vec2, Vec3};
pub use matrix::Mat4;
pub use path::{Convexity, FillType, Path, PathBuilder, PathVerb};
