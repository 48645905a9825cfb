// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement laws: tolerant hit checks, edge snapping, anchored and popup placement.
//!
//! These are the pure functions behind every geometric decision the overlay
//! stack makes. They take all of their inputs explicitly (current anchor,
//! current size, current screen) and hold no state, so the same function
//! serves both the initial placement of a panel and its re-placement on
//! every frame of a drag.

use kurbo::Point;

use crate::{ScreenMetrics, ScreenRect};

/// Touch tolerance around the bubble and its menu, in density-independent pixels.
///
/// Deliberately generous: the bubble is small and always visible, and a
/// missed grab on it is more disruptive than a missed tap on a node box.
pub const BUBBLE_TOUCH_TOLERANCE_DP: i32 = 30;

/// Touch tolerance around inspected node boxes, in density-independent pixels.
pub const NODE_TOUCH_TOLERANCE_DP: i32 = 10;

/// Gap between an anchor and a panel docked beside it, in density-independent pixels.
pub const ANCHOR_MARGIN_DP: i32 = 2;

/// Minimum finger travel before a touch is classified as a drag, in
/// density-independent pixels.
pub const TOUCH_SLOP_DP: i32 = 8;

/// Returns `true` iff `p` lies within `rect` expanded uniformly by `tolerance_px`.
///
/// ```
/// use kurbo::Point;
/// use scrim_geometry::{place, ScreenRect};
///
/// let r = ScreenRect::new(100, 100, 200, 200);
/// assert!(place::point_in_rect(Point::new(95.0, 100.0), r, 10));
/// assert!(!place::point_in_rect(Point::new(95.0, 100.0), r, 0));
/// ```
#[must_use]
pub fn point_in_rect(p: Point, rect: ScreenRect, tolerance_px: i32) -> bool {
    rect.expand(tolerance_px).contains_point(p)
}

/// The edge-snap law for a released drag: relocate `rect` so it hugs the
/// nearest horizontal screen edge, keeping its vertical position but clamping
/// it on screen.
///
/// Horizontal: `0` when the rect's center is left of the screen center,
/// `screen_w - width` otherwise. Vertical: unchanged, clamped into
/// `[0, screen_h - height]`.
#[must_use]
pub fn snap_target(rect: ScreenRect, screen: &ScreenMetrics) -> ScreenRect {
    let x = if rect.center_x() < screen.width_px / 2 {
        0
    } else {
        (screen.width_px - rect.width()).max(0)
    };
    let max_y = (screen.height_px - rect.height()).max(0);
    let y = rect.top().clamp(0, max_y);
    rect.with_origin(x, y)
}

/// Places a panel of `size` adjacent to `anchor`, hugging it without leaving
/// the viewport.
///
/// Side selection mirrors the snap law: when the anchor's horizontal center
/// is on the left half of the screen the panel docks to the anchor's right
/// (`anchor.right + margin`), otherwise to its left. Vertically the panel is
/// centered on the anchor's midpoint. The result is clamped into
/// `[0, screen_w - w] x [0, screen_h - h]`.
///
/// Stateless on purpose: callers pass the anchor's *current* rect on every
/// drag update, so a following panel can never desynchronize from it.
///
/// ```
/// use scrim_geometry::{place, ScreenMetrics, ScreenRect};
///
/// let screen = ScreenMetrics::new(1080, 2000, 1.0);
/// let bubble = ScreenRect::new(50, 200, 110, 260);
/// let menu = place::anchored_placement(bubble, (200, 300), &screen, 2);
/// assert_eq!(menu.left(), 112); // docked right of the anchor
/// assert_eq!(menu.top(), 80); // centered on the anchor's midpoint
/// ```
#[must_use]
pub fn anchored_placement(
    anchor: ScreenRect,
    size: (i32, i32),
    screen: &ScreenMetrics,
    margin_px: i32,
) -> ScreenRect {
    let (w, h) = (size.0.max(0), size.1.max(0));
    let dock_right = anchor.center_x() < screen.width_px / 2;
    let x = if dock_right {
        anchor.right() + margin_px
    } else {
        anchor.left() - w - margin_px
    };
    let y = anchor.top() + (anchor.height() - h) / 2;
    ScreenRect::from_origin_size(x, y, w, h).clamp_within(screen.width_px, screen.height_px)
}

/// Places a popup of `size` at a tap point, flipping to the left/up when it
/// would overflow the right/bottom screen edge, then clamping to `(0, 0)`.
///
/// Used for the node context menu, which opens where the user tapped rather
/// than beside a persistent anchor.
#[must_use]
pub fn popup_at_point(x: i32, y: i32, size: (i32, i32), screen: &ScreenMetrics) -> ScreenRect {
    let (w, h) = (size.0.max(0), size.1.max(0));
    let mut px = x;
    let mut py = y;
    if px + w > screen.width_px {
        px = x - w;
    }
    if py + h > screen.height_px {
        py = y - h;
    }
    ScreenRect::from_origin_size(px.max(0), py.max(0), w, h)
}

/// A rect centered on the screen, sized as a fraction of it.
///
/// Fractions are clamped into `[0, 1]`. Used for the info and tree panels
/// (0.8 x 0.7 and 0.9 x 0.8 of the screen respectively).
#[must_use]
pub fn centered_fraction(screen: &ScreenMetrics, frac_w: f64, frac_h: f64) -> ScreenRect {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "screen dimensions scaled by a [0, 1] fraction fit i32"
    )]
    let (w, h) = (
        (screen.width_px as f64 * frac_w.clamp(0.0, 1.0)) as i32,
        (screen.height_px as f64 * frac_h.clamp(0.0, 1.0)) as i32,
    );
    ScreenRect::from_origin_size(
        (screen.width_px - w) / 2,
        (screen.height_px - h) / 2,
        w,
        h,
    )
}
