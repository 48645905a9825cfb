// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Surfaces: tracks the currently live overlay surfaces and arbitrates
//! which of them owns a screen point.
//!
//! ## Overview
//!
//! An overlay stack is made of up to six independently positioned,
//! always-on-top regions: the control bubble, the menu it spawns, the
//! full-screen inspector layer, the node context menu, and the info and tree
//! panels. At most one live instance of each exists at any time. The
//! [`SurfaceRegistry`] owns that set exclusively; callers create, move, and
//! tear down surfaces only through its methods, so there is never an aliased
//! rect to go stale.
//!
//! Ownership of a touch point is decided by strict priority:
//! Bubble > BubbleMenu > InfoPanel > TreePanel > NodeMenu > InspectorLayer.
//! The control affordances must never be shadowed by the thing they control,
//! so the bubble and its menu always win arbitration over the full-screen
//! layer beneath them.
//!
//! ```
//! use kurbo::Point;
//! use scrim_geometry::{ScreenMetrics, ScreenRect};
//! use scrim_surfaces::{OverlaySurface, SurfaceId, SurfaceRegistry};
//!
//! let metrics = ScreenMetrics::new(1080, 2000, 1.0);
//! let mut registry = SurfaceRegistry::new();
//! registry.register(OverlaySurface::new(
//!     SurfaceId::InspectorLayer,
//!     ScreenRect::new(0, 0, 1080, 2000),
//!     &metrics,
//! ));
//! registry.register(OverlaySurface::new(
//!     SurfaceId::Bubble,
//!     ScreenRect::from_origin_size(50, 200, 60, 60),
//!     &metrics,
//! ));
//!
//! // The bubble outranks the full-screen layer underneath it.
//! assert_eq!(
//!     registry.owner_at(Point::new(80.0, 230.0)),
//!     Some(SurfaceId::Bubble)
//! );
//! assert_eq!(
//!     registry.owner_at(Point::new(700.0, 700.0)),
//!     Some(SurfaceId::InspectorLayer)
//! );
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod registry;
mod types;

pub use registry::SurfaceRegistry;
pub use scrim_provider::SurfaceId;
pub use types::OverlaySurface;
