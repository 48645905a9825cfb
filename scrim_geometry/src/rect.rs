// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer screen-absolute rectangle.

use kurbo::Point;

/// An axis-aligned rectangle in screen-absolute integer pixel coordinates.
///
/// Invariant: `right >= left` and `bottom >= top`. Constructors normalize,
/// so a degenerate request yields an empty rect rather than a negative size.
/// Empty rects ([`ScreenRect::is_empty`]) are excluded from indexing and
/// hit-testing by the layers above.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScreenRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl ScreenRect {
    /// An empty rect at the origin.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Creates a rect from edges, clamping so `right >= left` and `bottom >= top`.
    #[must_use]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right: right.max(left),
            bottom: bottom.max(top),
        }
    }

    /// Creates a rect from a top-left origin and a size, clamping negative sizes to zero.
    #[must_use]
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width.max(0)), y.saturating_add(height.max(0)))
    }

    /// Left edge.
    #[must_use]
    pub const fn left(self) -> i32 {
        self.left
    }

    /// Top edge.
    #[must_use]
    pub const fn top(self) -> i32 {
        self.top
    }

    /// Right edge.
    #[must_use]
    pub const fn right(self) -> i32 {
        self.right
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.bottom
    }

    /// Width in pixels (never negative).
    #[must_use]
    pub const fn width(self) -> i32 {
        self.right - self.left
    }

    /// Height in pixels (never negative).
    #[must_use]
    pub const fn height(self) -> i32 {
        self.bottom - self.top
    }

    /// Returns `true` if the rect has zero area.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.right == self.left || self.bottom == self.top
    }

    /// Horizontal center, rounded down.
    #[must_use]
    pub const fn center_x(self) -> i32 {
        self.left + (self.right - self.left) / 2
    }

    /// Vertical center, rounded down.
    #[must_use]
    pub const fn center_y(self) -> i32 {
        self.top + (self.bottom - self.top) / 2
    }

    /// Center as a floating-point [`Point`].
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(
            (self.left + self.right) as f64 / 2.0,
            (self.top + self.bottom) as f64 / 2.0,
        )
    }

    /// Returns `true` if an integer pixel position lies within the rect (edges inclusive).
    #[must_use]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Returns `true` if a touch position lies within the rect (edges inclusive).
    #[must_use]
    pub fn contains_point(self, p: Point) -> bool {
        p.x >= self.left as f64
            && p.x <= self.right as f64
            && p.y >= self.top as f64
            && p.y <= self.bottom as f64
    }

    /// The rect expanded uniformly by `amount` pixels on all sides.
    ///
    /// A negative `amount` shrinks; shrinking past empty collapses toward the
    /// center rather than inverting the edges.
    #[must_use]
    pub fn expand(self, amount: i32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// The rect translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// The rect relocated so its top-left corner is `(x, y)`, preserving size.
    #[must_use]
    pub fn with_origin(self, x: i32, y: i32) -> Self {
        Self::from_origin_size(x, y, self.width(), self.height())
    }

    /// Returns `true` if `self` lies fully within `[0, screen_w] x [0, screen_h]`.
    #[must_use]
    pub const fn within_screen(self, screen_w: i32, screen_h: i32) -> bool {
        self.left >= 0 && self.top >= 0 && self.right <= screen_w && self.bottom <= screen_h
    }

    /// Translates the rect so it lies within `[0, screen_w - w] x [0, screen_h - h]`,
    /// preserving size. A rect larger than the screen pins to the origin.
    #[must_use]
    pub fn clamp_within(self, screen_w: i32, screen_h: i32) -> Self {
        let max_x = (screen_w - self.width()).max(0);
        let max_y = (screen_h - self.height()).max(0);
        let x = self.left.clamp(0, max_x);
        let y = self.top.clamp(0, max_y);
        self.with_origin(x, y)
    }
}
