//! Lumen Display Lists
//!
//! The recorded drawing format and its dispatcher:
//!
//! - [`DisplayListBuilder`] records directives into an immutable
//!   [`DisplayList`], computing conservative per-op culling bounds
//! - [`Dispatcher`] replays a display list against any [`lumen_paint::Canvas`],
//!   maintaining paint state, composing filter graphs, and isolating nested
//!   list replay
//! - [`testing::RecordingCanvas`] records canvas calls for assertion-based
//!   tests and headless hosts
//!
//! Dispatch never fails outward: unsupported features degrade with a logged
//! diagnostic, malformed descriptors leave state unchanged, and draws
//! without backing resources are no-ops.

pub mod color;
pub mod compose;
pub mod convert;
pub mod dispatcher;
pub mod display_list;
pub mod effects;
pub mod error;
pub mod gradient;
pub mod nine_patch;
pub mod ops;
pub mod shadow;
pub mod testing;

pub use color::DlColor;
pub use dispatcher::Dispatcher;
pub use display_list::{DisplayList, DisplayListBuilder};
pub use effects::{
    DlColorFilter, DlColorSource, DlGradient, DlImage, DlImageFilter, DlMaskFilter, DlPathEffect,
};
pub use error::DlError;
pub use ops::{
    DlBlendMode, DlBlurStyle, DlClipOp, DlDrawStyle, DlFilterMode, DlImageSampling, DlOp,
    DlPointMode, DlRSTransform, DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlTileMode,
    DlVertexMode, DlVertices,
};
