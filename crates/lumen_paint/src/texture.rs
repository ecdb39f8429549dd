//! Opaque handles to externally-owned resources
//!
//! The paint model never decodes, uploads, or shapes anything. These handles
//! identify resources owned by the host's texture provider and text-shaping
//! subsystem; identity is the `Arc` pointer.

use lumen_core::{Path, Rect, Size};

/// Handle to an externally-owned GPU texture.
#[derive(Debug, PartialEq)]
pub struct Texture {
    size: Size,
    debug_label: Option<String>,
}

impl Texture {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            debug_label: None,
        }
    }

    pub fn with_label(size: Size, label: impl Into<String>) -> Self {
        Self {
            size,
            debug_label: Some(label.into()),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn debug_label(&self) -> Option<&str> {
        self.debug_label.as_deref()
    }
}

/// Handle to a shaped text run produced by the text subsystem.
///
/// The outline path, when the shaper provides one, is the fallback geometry
/// for styles the glyph atlas cannot render (strokes, gradient fills).
#[derive(Debug, PartialEq)]
pub struct TextFrame {
    bounds: Rect,
    outline: Option<Path>,
}

impl TextFrame {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            outline: None,
        }
    }

    pub fn with_outline(bounds: Rect, outline: Path) -> Self {
        Self {
            bounds,
            outline: Some(outline),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn outline(&self) -> Option<&Path> {
        self.outline.as_ref()
    }
}

/// Handle to a 3D scene graph node. Drawing one requires the `scene`
/// feature; the handle itself is always representable so hosts can record
/// scene directives and get a diagnostic instead of a compile error.
#[derive(Debug, PartialEq)]
pub struct SceneNode {
    debug_label: Option<String>,
}

impl SceneNode {
    pub fn new() -> Self {
        Self { debug_label: None }
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            debug_label: Some(label.into()),
        }
    }

    pub fn debug_label(&self) -> Option<&str> {
        self.debug_label.as_deref()
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}
