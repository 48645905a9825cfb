// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface-compositing capability.

use scrim_geometry::ScreenRect;
use scrim_geometry::place::BUBBLE_TOUCH_TOLERANCE_DP;

/// How the OS-level compositor should treat touches the surface does not claim.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PassThroughPolicy {
    /// The surface owns its whole region; nothing falls through.
    Opaque,
    /// Unclaimed touches fall through to windows beneath the surface.
    ///
    /// Required for the full-screen inspector layer, whose arbitration
    /// decides per touch whether a higher-priority surface should see it.
    PassThrough,
}

/// Identity of an overlay surface. At most one live instance exists per id.
///
/// Both sides of the host seam speak in these: the core requests creation
/// and movement by id, and the host may style or layer each surface by what
/// it is rather than guessing from geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// The persistent draggable control bubble.
    Bubble,
    /// The menu spawned from (and anchored to) the bubble.
    BubbleMenu,
    /// The centered node-properties panel.
    InfoPanel,
    /// The centered textual tree-dump panel.
    TreePanel,
    /// The context menu opened by tapping a node box.
    NodeMenu,
    /// The full-screen layer that draws node boxes and catches inspection taps.
    InspectorLayer,
}

impl SurfaceId {
    /// All ids in descending arbitration priority.
    pub const ALL: [Self; 6] = [
        Self::Bubble,
        Self::BubbleMenu,
        Self::InfoPanel,
        Self::TreePanel,
        Self::NodeMenu,
        Self::InspectorLayer,
    ];

    /// Canonical arbitration priority; higher wins.
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Self::Bubble => 50,
            Self::BubbleMenu => 40,
            Self::InfoPanel => 30,
            Self::TreePanel => 20,
            Self::NodeMenu => 10,
            Self::InspectorLayer => 0,
        }
    }

    /// Canonical touch tolerance in density-independent pixels.
    ///
    /// The bubble and its menu are forgiving of finger placement; panels and
    /// the full-screen layer are hit on their exact bounds.
    #[must_use]
    pub const fn touch_tolerance_dp(self) -> i32 {
        match self {
            Self::Bubble | Self::BubbleMenu => BUBBLE_TOUCH_TOLERANCE_DP,
            _ => 0,
        }
    }

    /// Dense index in `0..6`, distinct per id, for per-surface slot storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Bubble => 0,
            Self::BubbleMenu => 1,
            Self::InfoPanel => 2,
            Self::TreePanel => 3,
            Self::NodeMenu => 4,
            Self::InspectorLayer => 5,
        }
    }
}

/// Creates, moves, and destroys layered always-on-top screen regions.
///
/// Z-order is assumed correct by creation order (later surfaces composite on
/// top); the core does not attempt to reconcile overlay rendering beyond
/// that. Creation may fail (`None`) when the host lacks the overlay
/// permission; moves report `false` for surfaces the host already tore down.
pub trait SurfaceHost {
    /// Host-side handle to one live surface.
    type Surface: core::fmt::Debug;

    /// Creates the surface identified by `id`, covering `rect` with the
    /// given pass-through policy.
    fn create_surface(
        &mut self,
        id: SurfaceId,
        rect: ScreenRect,
        policy: PassThroughPolicy,
    ) -> Option<Self::Surface>;

    /// Moves/resizes a live surface. Returns `false` if the surface is gone.
    fn move_surface(&mut self, surface: &Self::Surface, rect: ScreenRect) -> bool;

    /// Destroys a surface. Idempotent from the caller's point of view: the
    /// handle is consumed, so it cannot be destroyed twice.
    fn destroy_surface(&mut self, surface: Self::Surface);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_strictly_ordered() {
        let mut prev = i32::MAX;
        for id in SurfaceId::ALL {
            assert!(id.priority() < prev, "ALL must be strictly descending");
            prev = id.priority();
        }
    }

    #[test]
    fn indices_are_distinct() {
        for (i, id) in SurfaceId::ALL.iter().enumerate() {
            for other in &SurfaceId::ALL[i + 1..] {
                assert_ne!(id.index(), other.index());
            }
        }
    }
}
