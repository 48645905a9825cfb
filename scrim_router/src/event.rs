// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input and routed output events.

use kurbo::Point;
use scrim_geometry::ScreenRect;
use scrim_surfaces::SurfaceId;

/// One raw touch event with its screen-absolute point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// A finger went down.
    Down(Point),
    /// The finger moved.
    Move(Point),
    /// The finger lifted.
    Up(Point),
    /// The input source aborted the gesture.
    Cancel,
}

/// The router's verdict on one touch event.
///
/// `H` is the provider's node handle type. A [`NodeHit`](Self::NodeHit)
/// hands its handle to the caller, who releases it after use.
#[derive(Clone, Debug, PartialEq)]
pub enum RoutedEvent<H> {
    /// Not ours; forward to whatever the surface's own widgets do with it.
    PassThrough,
    /// A non-bubble overlay surface owns the point.
    SurfaceConsumed(SurfaceId),
    /// An inspected node sits under the point.
    NodeHit {
        /// The front-most node at the point.
        handle: H,
        /// The point relative to the node's top-left corner.
        local: Point,
    },
    /// No surface and no node; swallowed so the tap cannot leak to the
    /// foreground app while inspection is active.
    NoHit,
    /// A drag moved (or, with `ended`, snapped) the surface to `rect`.
    DragUpdate {
        /// The dragged surface.
        surface: SurfaceId,
        /// Its new rect, already mirrored into the registry.
        rect: ScreenRect,
        /// `true` on the terminal, snapped update.
        ended: bool,
    },
}

impl<H> RoutedEvent<H> {
    /// Whether the overlay stack consumed the event.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}
