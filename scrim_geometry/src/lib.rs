// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Geometry: integer screen rectangles and pure placement math for overlay surfaces.
//!
//! ## Overview
//!
//! Overlay surfaces (a draggable bubble, its menu, transient panels, a
//! full-screen inspector layer) live in screen-absolute integer pixel
//! coordinates, because that is what the externally owned UI tree reports
//! for its node bounds. Raw touch input, however, arrives as floating-point
//! positions. This crate provides both halves:
//!
//! - [`ScreenRect`]: an integer, screen-absolute AABB with normalizing
//!   constructors and the usual containment/clamping queries.
//! - [`ScreenMetrics`]: screen size plus density, with [`ScreenMetrics::dp`]
//!   for converting density-independent constants to pixels. Metrics are
//!   meant to be read per computation, not cached across a rotation.
//! - The placement laws in [`place`]: tolerant point-in-rect checks, the
//!   post-drag edge snap, anchored placement for a panel hugging a moving
//!   anchor, flip-and-clamp popup placement at a tap point, and centered
//!   fractional panels.
//!
//! Every function here is stateless and total: degenerate inputs (zero-size
//! rects, anchors off screen, panels larger than the screen) clamp to the
//! nearest valid non-negative result rather than producing out-of-range
//! coordinates.
//!
//! ## Minimal example
//!
//! ```
//! use scrim_geometry::{ScreenRect, ScreenMetrics, place};
//!
//! let screen = ScreenMetrics::new(1080, 2000, 2.0);
//! let bubble = ScreenRect::from_origin_size(900, 300, 60, 60);
//!
//! // Released on the right half of the screen: snap to the right edge.
//! let snapped = place::snap_target(bubble, &screen);
//! assert_eq!(snapped.left(), 1020);
//! assert_eq!(snapped.top(), 300);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod metrics;
mod rect;
pub mod place;

pub use metrics::ScreenMetrics;
pub use rect::ScreenRect;
