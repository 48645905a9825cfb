// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The registry of live surfaces.

use kurbo::Point;

use scrim_geometry::{place, ScreenRect};

use crate::{OverlaySurface, SurfaceId};

/// Tracks the set of currently live overlay surfaces and answers which of
/// them owns a screen point.
///
/// Storage is a fixed six-slot array scanned linearly; with at most six live
/// surfaces no cleverer structure is warranted. The registry exclusively owns
/// the set: geometry changes go through [`update`](Self::update), teardown
/// through [`unregister`](Self::unregister), so no caller ever holds an
/// aliased rect.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    slots: [Option<OverlaySurface>; 6],
}

impl SurfaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surface, replacing any live surface with the same id.
    pub fn register(&mut self, surface: OverlaySurface) {
        self.slots[surface.id.index()] = Some(surface);
    }

    /// Moves/resizes a live surface. A no-op returning `false` when the id is
    /// not live: a surface may legitimately be torn down by user action while
    /// a geometry update from a drag is still in flight.
    pub fn update(&mut self, id: SurfaceId, rect: ScreenRect) -> bool {
        match &mut self.slots[id.index()] {
            Some(surface) => {
                surface.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Unregisters a surface. A no-op when the id is not live.
    pub fn unregister(&mut self, id: SurfaceId) {
        self.slots[id.index()] = None;
    }

    /// The live surface with this id, if any.
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&OverlaySurface> {
        self.slots[id.index()].as_ref()
    }

    /// Returns `true` if any surface with this id is live.
    #[must_use]
    pub fn is_live(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns `true` if no surface is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// The highest-priority live surface whose tolerance-expanded rect
    /// contains `p`, or `None` if no surface claims the point.
    #[must_use]
    pub fn owner_at(&self, p: Point) -> Option<SurfaceId> {
        let mut best: Option<(i32, SurfaceId)> = None;
        for id in SurfaceId::ALL {
            let Some(surface) = self.get(id) else {
                continue;
            };
            if surface.rect.is_empty()
                || !place::point_in_rect(p, surface.rect, surface.touch_tolerance_px)
            {
                continue;
            }
            // ALL is in canonical order, so ties keep the earlier id.
            if best.is_none_or(|(priority, _)| surface.priority > priority) {
                best = Some((surface.priority, id));
            }
        }
        best.map(|(_, id)| id)
    }
}
