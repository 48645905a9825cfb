// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Inspector: presentation control for the overlay inspection stack.
//!
//! ## Overview
//!
//! An [`Inspector`] sits between a host's
//! [`SurfaceHost`](scrim_provider::SurfaceHost) (the thing that can put
//! always-on-top regions on screen) and the
//! [`TouchRouter`](scrim_router::TouchRouter) (the thing that decides who a
//! touch belongs to). Every surface it shows, moves, or hides goes through
//! both in the same call, so compositing and arbitration never disagree.
//!
//! It implements the inspection session's lifecycle:
//!
//! - the floating bubble and its anchored menu
//!   ([`show_bubble`](Inspector::show_bubble),
//!   [`toggle_menu`](Inspector::toggle_menu));
//! - the full-screen inspection layer with pass-through compositing
//!   ([`enable_layer`](Inspector::enable_layer)) and the node boxes drawn
//!   on it ([`refresh`](Inspector::refresh));
//! - the transient node menu, info panel, and tree panel, and the back-key
//!   cascade that closes them ([`handle_back`](Inspector::handle_back));
//! - scripted node interaction
//!   ([`click_node`](Inspector::click_node) and the dispatch forwarders),
//!   where a provider refusal is reported, never retried.
//!
//! ```
//! use scrim_geometry::{ScreenMetrics, ScreenRect};
//! use scrim_inspector::Inspector;
//! use scrim_provider::{EphemeralPrefs, PassThroughPolicy, SurfaceHost, SurfaceId};
//!
//! struct Host(u32);
//!
//! impl SurfaceHost for Host {
//!     type Surface = u32;
//!     fn create_surface(
//!         &mut self,
//!         _: SurfaceId,
//!         _: ScreenRect,
//!         _: PassThroughPolicy,
//!     ) -> Option<u32> {
//!         self.0 += 1;
//!         Some(self.0)
//!     }
//!     fn move_surface(&mut self, _: &u32, _: ScreenRect) -> bool {
//!         true
//!     }
//!     fn destroy_surface(&mut self, _: u32) {}
//! }
//!
//! let metrics = ScreenMetrics::new(1080, 2000, 1.0);
//! let mut inspector = Inspector::new(Host(0), EphemeralPrefs::default(), metrics);
//! assert!(inspector.show_bubble());
//! assert!(inspector.enable_layer());
//! assert!(inspector.handle_back()); // tears the layer down
//! assert!(!inspector.handle_back()); // nothing left to close
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod inspector;

pub use inspector::{
    BUBBLE_INITIAL_POS, BUBBLE_SIZE_DP, INFO_PANEL_FRACTION, Inspector, TAP_DURATION_MS,
    TREE_PANEL_FRACTION,
};
