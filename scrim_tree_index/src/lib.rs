// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Tree Index: spatial queries over one snapshot of an externally owned UI tree.
//!
//! ## Overview
//!
//! The inspected tree belongs to the foreground application, not to us: its
//! nodes are reached through borrowed, snapshot-scoped
//! [`TreeProvider`](scrim_provider::TreeProvider) handles that the provider
//! may invalidate whenever the app repaints. A [`TreeIndex`] wraps one such
//! snapshot together with the current screen size and answers:
//!
//! - [`TreeIndex::collect_rects`]: the flat list of visible node boxes to
//!   render, excluding empty and partially off-screen nodes.
//! - [`TreeIndex::hit_test`]: the front-most node at a screen point, where
//!   "front-most" means the deepest matching descendant, because descendants
//!   draw on top of their ancestors.
//! - [`TreeIndex::depth`]: a node's distance from the root, for diagnostics.
//!
//! A refresh is simply a new `TreeIndex`: indices are never mutated in
//! place, so replacing the snapshot can never interrupt a query already
//! accepted against the previous one.
//!
//! ## Totality
//!
//! Every query is a total function. A missing root, a handle gone stale
//! mid-walk, or a malformed subtree shrinks the result (one branch, one
//! node) instead of failing the query, so one bad subtree never blanks the
//! whole inspector.
//!
//! ## Supplements
//!
//! - [`outline`](TreeIndex::outline): a box-drawing textual dump of the tree.
//! - [`PropertyTable`]: a capability table describing one node as labeled
//!   rows, built once and iterated generically.
//! - [`find_by_text`](TreeIndex::find_by_text) and friends: whole-tree
//!   attribute searches.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod outline;
mod properties;

pub use index::TreeIndex;
pub use properties::{PropertyRow, PropertyTable};
