// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Router: touch arbitration for the overlay inspection stack.
//!
//! ## Overview
//!
//! While inspection is active, the host forwards its raw touch stream to a
//! single [`TouchRouter`], which decides per event who the touch belongs
//! to and answers with a [`RoutedEvent`]:
//!
//! - a registered overlay surface (the bubble, its menu, a panel), found
//!   through the [`SurfaceRegistry`](scrim_surfaces::SurfaceRegistry) in
//!   descending priority order;
//! - an inspected node, found by hit-testing the provider's current tree
//!   when no surface claims the point;
//! - nobody, in which case the down is still consumed so it cannot leak to
//!   the foreground app while the full-screen layer is up.
//!
//! A down on the bubble is special: it arms a drag candidate without yet
//! consuming anything, because taps and drags start identically. The first
//! move past the slop threshold commits the gesture to a drag; from then on
//! every move emits [`RoutedEvent::DragUpdate`] and mirrors the new rect
//! into the registry, dragging the bubble's open menu along via anchored
//! placement in the same update. Release snaps the bubble to the nearest
//! horizontal screen edge.
//!
//! ```
//! use kurbo::Point;
//! use scrim_geometry::{ScreenMetrics, ScreenRect};
//! use scrim_router::{RoutedEvent, TouchEvent, TouchRouter};
//! use scrim_surfaces::{OverlaySurface, SurfaceId};
//! use scrim_tree_ref::RefTree;
//!
//! let metrics = ScreenMetrics::new(1080, 2000, 1.0);
//! let mut router = TouchRouter::new(metrics);
//! router.registry_mut().register(OverlaySurface::new(
//!     SurfaceId::Bubble,
//!     ScreenRect::from_origin_size(50, 200, 60, 60),
//!     &metrics,
//! ));
//!
//! let tree = RefTree::new();
//! let routed = router.route(TouchEvent::Down(Point::new(80.0, 230.0)), &tree);
//! // A down on the bubble is not yet consumed; the slop verdict comes later.
//! assert_eq!(routed, RoutedEvent::PassThrough);
//! ```
//!
//! Events are delivered from one input timeline; the router holds no locks
//! and no global state.
//!
//! This crate is `no_std`.

#![no_std]

mod drag;
mod event;
mod router;

pub use drag::DragSnap;
pub use event::{RoutedEvent, TouchEvent};
pub use router::TouchRouter;
