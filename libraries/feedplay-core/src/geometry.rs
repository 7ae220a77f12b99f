//! Screen geometry for visibility decisions
//!
//! All rectangles are in the same (screen) coordinate space, with `right` and
//! `bottom` exclusive. Containment and intersection follow the semantics most
//! UI toolkits use: an empty rectangle contains nothing, and rectangles that
//! only share an edge do not intersect.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive)
    pub left: i32,
    /// Top edge (inclusive)
    pub top: i32,
    /// Right edge (exclusive)
    pub right: i32,
    /// Bottom edge (exclusive)
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its edges
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size
    pub const fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(
            left,
            top,
            left.saturating_add(width),
            top.saturating_add(height),
        )
    }

    /// Width, zero or negative for degenerate rectangles
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    /// Height, zero or negative for degenerate rectangles
    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Area in square pixels (0 for empty rectangles)
    ///
    /// Saturates at `i64::MAX` for rectangles spanning the whole plane.
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width().saturating_mul(self.height())
        }
    }

    /// True iff `self` is non-empty and `other` lies entirely inside it
    pub fn contains(&self, other: &Rect) -> bool {
        !self.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// True iff the two rectangles overlap by a positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        Some(Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        ))
    }

    /// Same rectangle moved by `(dx, dy)`, clamped at the coordinate limits
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }
}

/// Fraction of `item` that is visible inside `container`, in `[0, 1]`
///
/// Returns `0.0` for a zero-area item or when nothing overlaps, and `1.0`
/// only when the whole item lies within the container.
pub fn visible_area_ratio(item: &Rect, container: &Rect) -> f32 {
    let item_area = item.area();
    if item_area <= 0 {
        return 0.0;
    }

    let Some(visible) = item.intersection(container) else {
        return 0.0;
    };

    if container.contains(item) {
        return 1.0;
    }

    (visible.area() as f64 / item_area as f64).clamp(0.0, 1.0) as f32
}

/// Gate used by "allowed to play"
///
/// True iff `window` fully contains `container`, and `container` either
/// contains or intersects `item`. Rejects items whose container is itself
/// partly off-screen (under a system bar, for example) even when the
/// item/container overlap looks fine.
pub fn containment_check(window: &Rect, container: &Rect, item: &Rect) -> bool {
    window.contains(container) && (container.contains(item) || container.intersects(item))
}
