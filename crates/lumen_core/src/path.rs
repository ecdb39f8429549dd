//! Paths and path building
//!
//! Paths are immutable verb/point sequences produced by [`PathBuilder`]. A
//! path built from a single canonical shape (rect, oval, rounded rect)
//! remembers that shape, so consumers can route it to a cheaper draw
//! primitive instead of general path rendering.

use crate::geometry::{CornerRadius, Point, Rect, RoundedRect};

/// Cubic handle length for a quarter-circle approximation.
const KAPPA: f32 = 0.552_284_8;

/// Path segment verbs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathVerb {
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
    Close,
}

/// Winding rule used to fill a path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillType {
    #[default]
    NonZero,
    EvenOdd,
}

/// Convexity hint for tessellation backends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Convexity {
    #[default]
    Unknown,
    Convex,
}

/// Canonical shape a path was built from, when it was built from exactly one.
#[derive(Clone, Copy, Debug, PartialEq)]
enum CanonicalShape {
    Rect(Rect),
    Oval(Rect),
    RoundedRect(RoundedRect),
}

/// An immutable path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
    points: Vec<Point>,
    fill_type: FillType,
    convexity: Convexity,
    shape: Option<CanonicalShape>,
}

impl Path {
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    pub fn convexity(&self) -> Convexity {
        self.convexity
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Control-point bounding box. Conservative for curved segments.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(&self.points)
    }

    /// The rect this path was built from, if it is exactly one rect.
    pub fn as_rect(&self) -> Option<Rect> {
        match self.shape {
            Some(CanonicalShape::Rect(rect)) => Some(rect),
            _ => None,
        }
    }

    /// The (rect, corner radius) this path was built from, if it is exactly
    /// one rounded rect with uniform radii.
    pub fn as_simple_rounded_rect(&self) -> Option<(Rect, f32)> {
        match self.shape {
            Some(CanonicalShape::RoundedRect(rrect)) if rrect.is_simple() => {
                Some((rrect.rect, rrect.simple_radius()))
            }
            _ => None,
        }
    }

    /// The (center, radius) this path was built from, if it is exactly one
    /// circular oval.
    pub fn as_circle(&self) -> Option<(Point, f32)> {
        match self.shape {
            Some(CanonicalShape::Oval(bounds)) if bounds.width() == bounds.height() => {
                Some((bounds.center(), bounds.width() * 0.5))
            }
            _ => None,
        }
    }
}

/// Builder for [`Path`]
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    verbs: Vec<PathVerb>,
    points: Vec<Point>,
    fill_type: FillType,
    convexity: Convexity,
    shape: Option<CanonicalShape>,
    contour_ops: u32,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn note_contour_op(&mut self, shape: Option<CanonicalShape>) {
        self.contour_ops += 1;
        self.shape = if self.contour_ops == 1 { shape } else { None };
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.note_contour_op(None);
        self.verbs.push(PathVerb::MoveTo);
        self.points.push(point);
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.note_contour_op(None);
        self.verbs.push(PathVerb::LineTo);
        self.points.push(point);
        self
    }

    pub fn quad_to(mut self, control: Point, point: Point) -> Self {
        self.note_contour_op(None);
        self.verbs.push(PathVerb::QuadTo);
        self.points.push(control);
        self.points.push(point);
        self
    }

    pub fn cubic_to(mut self, control1: Point, control2: Point, point: Point) -> Self {
        self.note_contour_op(None);
        self.verbs.push(PathVerb::CubicTo);
        self.points.push(control1);
        self.points.push(control2);
        self.points.push(point);
        self
    }

    pub fn close(mut self) -> Self {
        self.verbs.push(PathVerb::Close);
        self
    }

    /// Single line segment from `p0` to `p1`.
    pub fn add_line(mut self, p0: Point, p1: Point) -> Self {
        self.note_contour_op(None);
        self.raw_move_to(p0);
        self.raw_line_to(p1);
        self
    }

    pub fn add_rect(mut self, rect: Rect) -> Self {
        self.note_contour_op(Some(CanonicalShape::Rect(rect)));
        self.push_rect_contour(rect);
        self
    }

    pub fn add_oval(mut self, bounds: Rect) -> Self {
        self.note_contour_op(Some(CanonicalShape::Oval(bounds)));
        self.push_oval_contour(bounds);
        self
    }

    pub fn add_rounded_rect(mut self, rrect: RoundedRect) -> Self {
        self.note_contour_op(Some(CanonicalShape::RoundedRect(rrect)));
        self.push_rounded_rect_contour(rrect);
        self
    }

    /// Arc over the oval inscribed in `bounds`, angles in degrees, sweeping
    /// clockwise for positive values. With `use_center` the contour is a pie
    /// wedge closed through the oval center.
    pub fn add_arc(mut self, bounds: Rect, start_degrees: f32, sweep_degrees: f32, use_center: bool) -> Self {
        self.note_contour_op(None);
        self.push_arc_contour(bounds, start_degrees, sweep_degrees, use_center);
        self
    }

    /// Append all contours of another path.
    pub fn add_path(mut self, path: &Path) -> Self {
        self.note_contour_op(None);
        self.verbs.extend_from_slice(&path.verbs);
        self.points.extend_from_slice(&path.points);
        self
    }

    pub fn set_fill_type(mut self, fill_type: FillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    pub fn set_convexity(mut self, convexity: Convexity) -> Self {
        self.convexity = convexity;
        self
    }

    pub fn take_path(self) -> Path {
        Path {
            verbs: self.verbs,
            points: self.points,
            fill_type: self.fill_type,
            convexity: self.convexity,
            shape: self.shape,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Contour emission
    // ─────────────────────────────────────────────────────────────────────────

    fn raw_move_to(&mut self, point: Point) {
        self.verbs.push(PathVerb::MoveTo);
        self.points.push(point);
    }

    fn raw_line_to(&mut self, point: Point) {
        self.verbs.push(PathVerb::LineTo);
        self.points.push(point);
    }

    fn raw_cubic_to(&mut self, c1: Point, c2: Point, point: Point) {
        self.verbs.push(PathVerb::CubicTo);
        self.points.push(c1);
        self.points.push(c2);
        self.points.push(point);
    }

    fn raw_close(&mut self) {
        self.verbs.push(PathVerb::Close);
    }

    fn push_rect_contour(&mut self, rect: Rect) {
        self.raw_move_to(Point::new(rect.left(), rect.top()));
        self.raw_line_to(Point::new(rect.right(), rect.top()));
        self.raw_line_to(Point::new(rect.right(), rect.bottom()));
        self.raw_line_to(Point::new(rect.left(), rect.bottom()));
        self.raw_close();
    }

    fn push_oval_contour(&mut self, bounds: Rect) {
        let rx = bounds.width() * 0.5;
        let ry = bounds.height() * 0.5;
        let center = bounds.center();
        let (cx, cy) = (center.x, center.y);
        let (hx, hy) = (rx * KAPPA, ry * KAPPA);

        self.raw_move_to(Point::new(cx, cy - ry));
        self.raw_cubic_to(
            Point::new(cx + hx, cy - ry),
            Point::new(cx + rx, cy - hy),
            Point::new(cx + rx, cy),
        );
        self.raw_cubic_to(
            Point::new(cx + rx, cy + hy),
            Point::new(cx + hx, cy + ry),
            Point::new(cx, cy + ry),
        );
        self.raw_cubic_to(
            Point::new(cx - hx, cy + ry),
            Point::new(cx - rx, cy + hy),
            Point::new(cx - rx, cy),
        );
        self.raw_cubic_to(
            Point::new(cx - rx, cy - hy),
            Point::new(cx - hx, cy - ry),
            Point::new(cx, cy - ry),
        );
        self.raw_close();
    }

    fn push_rounded_rect_contour(&mut self, rrect: RoundedRect) {
        let rect = rrect.rect;
        let max = 0.5 * rect.width().min(rect.height());
        let CornerRadius {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } = rrect.radii;
        let tl = top_left.clamp(0.0, max);
        let tr = top_right.clamp(0.0, max);
        let br = bottom_right.clamp(0.0, max);
        let bl = bottom_left.clamp(0.0, max);
        let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

        self.raw_move_to(Point::new(l + tl, t));
        self.raw_line_to(Point::new(r - tr, t));
        self.raw_cubic_to(
            Point::new(r - tr + tr * KAPPA, t),
            Point::new(r, t + tr - tr * KAPPA),
            Point::new(r, t + tr),
        );
        self.raw_line_to(Point::new(r, b - br));
        self.raw_cubic_to(
            Point::new(r, b - br + br * KAPPA),
            Point::new(r - br + br * KAPPA, b),
            Point::new(r - br, b),
        );
        self.raw_line_to(Point::new(l + bl, b));
        self.raw_cubic_to(
            Point::new(l + bl - bl * KAPPA, b),
            Point::new(l, b - bl + bl * KAPPA),
            Point::new(l, b - bl),
        );
        self.raw_line_to(Point::new(l, t + tl));
        self.raw_cubic_to(
            Point::new(l, t + tl - tl * KAPPA),
            Point::new(l + tl - tl * KAPPA, t),
            Point::new(l + tl, t),
        );
        self.raw_close();
    }

    fn push_arc_contour(&mut self, bounds: Rect, start_degrees: f32, sweep_degrees: f32, use_center: bool) {
        let rx = bounds.width() * 0.5;
        let ry = bounds.height() * 0.5;
        let center = bounds.center();
        let point_at = |angle: f32| {
            Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        };

        let start = start_degrees.to_radians();
        let sweep = sweep_degrees.to_radians();

        if use_center {
            self.raw_move_to(center);
            self.raw_line_to(point_at(start));
        } else {
            self.raw_move_to(point_at(start));
        }

        // Split the sweep into segments of at most a quarter turn, each
        // approximated by one cubic.
        let segments = (sweep.abs() / std::f32::consts::FRAC_PI_2).ceil().max(1.0) as u32;
        let step = sweep / segments as f32;
        let handle = 4.0 / 3.0 * (step / 4.0).tan();
        let mut angle = start;
        for _ in 0..segments {
            let next = angle + step;
            let p0 = point_at(angle);
            let p1 = point_at(next);
            let c1 = Point::new(
                p0.x - handle * rx * angle.sin(),
                p0.y + handle * ry * angle.cos(),
            );
            let c2 = Point::new(
                p1.x + handle * rx * next.sin(),
                p1.y - handle * ry * next.cos(),
            );
            self.raw_cubic_to(c1, c2, p1);
            angle = next;
        }

        if use_center {
            self.raw_close();
        }
    }
}
