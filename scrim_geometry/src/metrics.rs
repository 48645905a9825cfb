// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen size and density.

/// Screen dimensions in pixels plus the density scale factor.
///
/// Hosts construct a fresh value per geometry computation rather than caching
/// one: a rotation changes all three fields at once.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenMetrics {
    /// Screen width in pixels.
    pub width_px: i32,
    /// Screen height in pixels.
    pub height_px: i32,
    /// Density scale factor (pixels per density-independent pixel).
    pub density: f64,
}

impl ScreenMetrics {
    /// Creates metrics for a screen. A non-positive density falls back to `1.0`.
    #[must_use]
    pub fn new(width_px: i32, height_px: i32, density: f64) -> Self {
        Self {
            width_px: width_px.max(0),
            height_px: height_px.max(0),
            density: if density > 0.0 { density } else { 1.0 },
        }
    }

    /// Converts density-independent pixels to physical pixels, rounding half up.
    #[must_use]
    pub fn dp(&self, dp: i32) -> i32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "dp values are small UI constants; the product fits i32"
        )]
        let px = (dp as f64 * self.density + 0.5) as i32;
        px
    }
}
