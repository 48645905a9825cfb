// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Provider: capability traits at the seam between the overlay core and its host.
//!
//! ## Overview
//!
//! The overlay core never owns the UI tree it inspects, never composites its
//! own pixels, and never persists its own settings. Those capabilities are
//! supplied by the host environment through the traits in this crate:
//!
//! - [`TreeProvider`]: the live, externally mutable UI tree of the foreground
//!   application, plus synthetic input dispatch (taps, swipes, text entry).
//! - [`SurfaceHost`]: the compositing primitive that actually creates, moves,
//!   and destroys always-on-top screen regions, each named by a [`SurfaceId`].
//! - [`InspectorPrefs`]: the single persisted "inspector enabled" boolean.
//!
//! ## Failure model
//!
//! Every capability may fail, and none may abort the caller: tree queries
//! return `None`/empty when the provider has no active window or a handle went
//! stale, and input dispatch returns `false` when the host rejects a gesture.
//! The core treats each such failure at the smallest possible scope (one
//! node, one call) and degrades to an empty result.
//!
//! ## Handle discipline
//!
//! [`TreeProvider::Handle`] values are borrows scoped to one snapshot of the
//! tree. The provider may invalidate them asynchronously whenever the
//! foreground app repaints. Callers release every handle they obtained and do
//! not return, and never retain a handle across snapshots; a stale handle is
//! answered with `None`/`false`, never with a handle that aliases a
//! different live node.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
mod prefs;
mod tree;

pub use host::{PassThroughPolicy, SurfaceHost, SurfaceId};
pub use prefs::{EphemeralPrefs, InspectorPrefs};
pub use tree::{NodeStateFlags, TreeProvider};
