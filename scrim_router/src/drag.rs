// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-snap state machine for the draggable bubble.

use kurbo::Point;
use scrim_geometry::{ScreenMetrics, ScreenRect, place};
use scrim_surfaces::SurfaceId;

#[derive(Copy, Clone, Debug)]
struct Gesture {
    surface: SurfaceId,
    origin_rect: ScreenRect,
    origin_touch: Point,
    dragging: bool,
}

/// One in-flight drag gesture, at most one system-wide.
///
/// `Idle -> Candidate` on a down over the draggable surface, `Candidate ->
/// Dragging` the first time the finger travels past the slop threshold on
/// either axis, back to `Idle` on up or cancel. Before the threshold the
/// gesture stays a candidate, so an ordinary tap still reaches the
/// surface's own tap handler untouched.
#[derive(Debug)]
pub struct DragSnap {
    gesture: Option<Gesture>,
    slop_px: i32,
}

impl DragSnap {
    /// Creates an idle state machine with the given slop threshold.
    #[must_use]
    pub fn new(slop_px: i32) -> Self {
        Self {
            gesture: None,
            slop_px: slop_px.max(0),
        }
    }

    /// Starts a candidate gesture, replacing any previous one.
    pub fn begin(&mut self, surface: SurfaceId, origin_rect: ScreenRect, touch: Point) {
        self.gesture = Some(Gesture {
            surface,
            origin_rect,
            origin_touch: touch,
            dragging: false,
        });
    }

    /// Whether a gesture is in flight, dragging or not.
    #[must_use]
    pub fn is_candidate(&self) -> bool {
        self.gesture.is_some()
    }

    /// Whether the gesture has crossed the slop threshold.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|g| g.dragging)
    }

    /// Advances the gesture to `touch`.
    ///
    /// Returns the dragged surface and its new rect (origin rect shifted by
    /// the total gesture delta) once the slop threshold has been crossed,
    /// `None` before then or when no gesture is in flight.
    pub fn on_move(&mut self, touch: Point) -> Option<(SurfaceId, ScreenRect)> {
        let gesture = self.gesture.as_mut()?;
        let (dx, dy) = delta(gesture.origin_touch, touch);
        if !gesture.dragging {
            if dx.abs().max(dy.abs()) <= self.slop_px {
                return None;
            }
            gesture.dragging = true;
        }
        Some((gesture.surface, gesture.origin_rect.offset(dx, dy)))
    }

    /// Ends the gesture.
    ///
    /// When it was a drag, returns the surface and its final rect, snapped
    /// to the nearest horizontal screen edge. A release before the slop
    /// threshold returns `None`: the gesture was a tap, not a drag.
    pub fn on_up(
        &mut self,
        touch: Point,
        screen: &ScreenMetrics,
    ) -> Option<(SurfaceId, ScreenRect)> {
        let gesture = self.gesture.take()?;
        if !gesture.dragging {
            return None;
        }
        let (dx, dy) = delta(gesture.origin_touch, touch);
        let rect = gesture.origin_rect.offset(dx, dy);
        Some((gesture.surface, place::snap_target(rect, screen)))
    }

    /// Aborts the gesture without snapping.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }
}

fn delta(from: Point, to: Point) -> (i32, i32) {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "touch coordinates are pixel-scale and fit i32"
    )]
    let d = ((to.x - from.x) as i32, (to.y - from.y) as i32);
    d
}
