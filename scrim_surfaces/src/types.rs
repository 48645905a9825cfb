// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface touch geometry.

use scrim_geometry::{ScreenMetrics, ScreenRect};
use scrim_provider::SurfaceId;

/// One live overlay surface: identity, screen rect, arbitration priority, and
/// touch tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OverlaySurface {
    /// Which surface this is.
    pub id: SurfaceId,
    /// Current position and size, screen-absolute.
    pub rect: ScreenRect,
    /// Arbitration priority; higher wins [`owner_at`](crate::SurfaceRegistry::owner_at).
    pub priority: i32,
    /// Uniform expansion applied to `rect` during arbitration, in pixels.
    pub touch_tolerance_px: i32,
}

impl OverlaySurface {
    /// Creates a surface with its canonical priority and tolerance, the
    /// latter scaled to pixels by the current screen density.
    #[must_use]
    pub fn new(id: SurfaceId, rect: ScreenRect, metrics: &ScreenMetrics) -> Self {
        Self {
            id,
            rect,
            priority: id.priority(),
            touch_tolerance_px: metrics.dp(id.touch_tolerance_dp()),
        }
    }

    /// Overrides the arbitration priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Overrides the touch tolerance, in pixels.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance_px: i32) -> Self {
        self.touch_tolerance_px = tolerance_px;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tolerance_scales_with_density() {
        let metrics = ScreenMetrics::new(1080, 2000, 2.0);
        let s = OverlaySurface::new(SurfaceId::Bubble, ScreenRect::ZERO, &metrics);
        assert_eq!(s.touch_tolerance_px, 60);
        let layer = OverlaySurface::new(SurfaceId::InspectorLayer, ScreenRect::ZERO, &metrics);
        assert_eq!(layer.touch_tolerance_px, 0);
    }
}
