// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The externally owned UI tree and synthetic input dispatch.

use alloc::string::String;
use alloc::vec::Vec;

use scrim_geometry::ScreenRect;

bitflags::bitflags! {
    /// Interaction state reported for a tree node.
    ///
    /// Providers set only the bits they can observe; an absent capability is
    /// simply an unset bit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeStateFlags: u16 {
        /// Node accepts taps.
        const CLICKABLE      = 1 << 0;
        /// Node accepts long presses.
        const LONG_CLICKABLE = 1 << 1;
        /// Node can take input focus.
        const FOCUSABLE      = 1 << 2;
        /// Node currently holds input focus.
        const FOCUSED        = 1 << 3;
        /// Node is selected.
        const SELECTED       = 1 << 4;
        /// Node is enabled.
        const ENABLED        = 1 << 5;
        /// Node scrolls its content.
        const SCROLLABLE     = 1 << 6;
        /// Node accepts text editing.
        const EDITABLE       = 1 << 7;
        /// Node is a checkable control.
        const CHECKABLE      = 1 << 8;
        /// Node is currently checked.
        const CHECKED        = 1 << 9;
        /// Node masks its text.
        const PASSWORD       = 1 << 10;
        /// Node is visible to the user.
        const VISIBLE        = 1 << 11;
    }
}

/// The live UI tree of the foreground application, owned by the host.
///
/// ## Contract
///
/// - [`Handle`](Self::Handle) values are snapshot-scoped borrows. Release
///   every handle you obtain and do not return; never retain one across a
///   snapshot boundary.
/// - Every query is total: a missing root, a stale handle, or a node torn
///   down mid-walk answers `None`/empty/`false`, never a fault.
/// - Synthetic input ([`dispatch_tap`](Self::dispatch_tap) and friends)
///   reports rejection as `false`. Callers decide whether to retry; the core
///   never retries on its own.
pub trait TreeProvider {
    /// Borrowed reference to one node of the current snapshot.
    type Handle: Clone + PartialEq + core::fmt::Debug;

    /// The root of the foreground app's active window, if any.
    fn current_root(&self) -> Option<Self::Handle>;

    /// The node's bounds in screen-absolute pixels, or `None` if stale.
    fn bounds(&self, node: &Self::Handle) -> Option<ScreenRect>;

    /// The node's children in child-index order; empty if stale or leaf.
    fn children(&self, node: &Self::Handle) -> Vec<Self::Handle>;

    /// The node's parent, or `None` at the root (or if stale).
    fn parent(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// Gives a handle back to the provider. Call exactly once per handle that
    /// is not handed onward.
    fn release(&self, node: Self::Handle);

    /// The node's widget class name, if the provider exposes one.
    fn class_name(&self, node: &Self::Handle) -> Option<String> {
        let _ = node;
        None
    }

    /// The node's text content, if any.
    fn text(&self, node: &Self::Handle) -> Option<String> {
        let _ = node;
        None
    }

    /// The node's content description (accessibility label), if any.
    fn content_description(&self, node: &Self::Handle) -> Option<String> {
        let _ = node;
        None
    }

    /// The node's resource/view identifier, if any.
    fn view_id(&self, node: &Self::Handle) -> Option<String> {
        let _ = node;
        None
    }

    /// The package/application name owning the node, if known.
    fn package_name(&self, node: &Self::Handle) -> Option<String> {
        let _ = node;
        None
    }

    /// The node's interaction state. Stale handles report no flags.
    fn state_flags(&self, node: &Self::Handle) -> NodeStateFlags {
        let _ = node;
        NodeStateFlags::empty()
    }

    /// Dispatches a synthetic tap at screen coordinates, held for
    /// `duration_ms`. Returns `false` if the host rejects the gesture.
    fn dispatch_tap(&self, x: i32, y: i32, duration_ms: u32) -> bool;

    /// Dispatches a synthetic swipe between two screen points over
    /// `duration_ms`. Returns `false` if the host rejects the gesture.
    fn dispatch_swipe(&self, x1: i32, y1: i32, x2: i32, y2: i32, duration_ms: u32) -> bool;

    /// Replaces the node's text. Returns `false` if the node is stale,
    /// not editable, or the host refuses.
    fn set_text(&self, node: &Self::Handle, text: &str) -> bool;

    /// Performs the node's default action (typically a click).
    fn perform_default_action(&self, node: &Self::Handle) -> bool;
}
