//! Axis-aligned bounding-box overlap
//!
//! The whole game runs on one pure predicate. Half-open semantics:
//! rectangles that merely touch along an edge do not overlap.

use super::state::Rect;

/// True iff the interiors of `a` and `b` intersect
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
