// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The touch arbiter.

use kurbo::Point;
use scrim_geometry::{ScreenMetrics, ScreenRect, place};
use scrim_provider::TreeProvider;
use scrim_surfaces::{SurfaceId, SurfaceRegistry};
use scrim_tree_index::TreeIndex;

use crate::drag::DragSnap;
use crate::event::{RoutedEvent, TouchEvent};

/// Routes raw touches across the overlay surfaces and the inspected tree.
///
/// The router owns the [`SurfaceRegistry`] and the drag state machine;
/// hosts mirror every shown, moved, or hidden surface into the registry so
/// arbitration and compositing never disagree. Events are delivered from a
/// single input timeline, so nothing here locks.
#[derive(Debug)]
pub struct TouchRouter {
    registry: SurfaceRegistry,
    drag: DragSnap,
    metrics: ScreenMetrics,
}

impl TouchRouter {
    /// Creates a router for a screen, with the standard touch slop.
    #[must_use]
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            registry: SurfaceRegistry::new(),
            drag: DragSnap::new(metrics.dp(place::TOUCH_SLOP_DP)),
            metrics,
        }
    }

    /// The surface registry.
    #[must_use]
    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Mutable access to the surface registry, for showing and hiding
    /// surfaces.
    pub fn registry_mut(&mut self) -> &mut SurfaceRegistry {
        &mut self.registry
    }

    /// The screen metrics the router is arbitrating against.
    #[must_use]
    pub fn metrics(&self) -> &ScreenMetrics {
        &self.metrics
    }

    /// Replaces the screen metrics (rotation). Aborts any drag in flight,
    /// since its origin geometry no longer exists.
    pub fn set_metrics(&mut self, metrics: ScreenMetrics) {
        self.metrics = metrics;
        self.drag = DragSnap::new(metrics.dp(place::TOUCH_SLOP_DP));
    }

    /// Routes one touch event.
    ///
    /// The provider is consulted only on a `Down` that no surface claims; a
    /// provider with no root yields [`RoutedEvent::NoHit`], which is still
    /// consumed.
    pub fn route<P: TreeProvider>(
        &mut self,
        event: TouchEvent,
        provider: &P,
    ) -> RoutedEvent<P::Handle> {
        match event {
            TouchEvent::Down(p) => self.on_down(p, provider),
            TouchEvent::Move(p) => self.on_move(p),
            TouchEvent::Up(p) => self.on_up(p),
            TouchEvent::Cancel => {
                self.drag.cancel();
                RoutedEvent::PassThrough
            }
        }
    }

    fn on_down<P: TreeProvider>(&mut self, p: Point, provider: &P) -> RoutedEvent<P::Handle> {
        match self.registry.owner_at(p) {
            Some(SurfaceId::Bubble) => {
                // A tap and a drag start identically; stay a pass-through
                // candidate until the slop verdict on a later move.
                if let Some(bubble) = self.registry.get(SurfaceId::Bubble) {
                    self.drag.begin(SurfaceId::Bubble, bubble.rect, p);
                }
                RoutedEvent::PassThrough
            }
            Some(owner) => RoutedEvent::SurfaceConsumed(owner),
            None => {
                let index = TreeIndex::new(provider, &self.metrics);
                match index.hit_test(p) {
                    Some(handle) => match provider.bounds(&handle) {
                        Some(bounds) => RoutedEvent::NodeHit {
                            local: Point::new(
                                p.x - f64::from(bounds.left()),
                                p.y - f64::from(bounds.top()),
                            ),
                            handle,
                        },
                        None => {
                            // Went stale between the hit and the bounds read.
                            provider.release(handle);
                            RoutedEvent::NoHit
                        }
                    },
                    None => RoutedEvent::NoHit,
                }
            }
        }
    }

    fn on_move<H>(&mut self, p: Point) -> RoutedEvent<H> {
        match self.drag.on_move(p) {
            Some((surface, rect)) => {
                self.apply_drag(surface, rect);
                RoutedEvent::DragUpdate {
                    surface,
                    rect,
                    ended: false,
                }
            }
            None => RoutedEvent::PassThrough,
        }
    }

    fn on_up<H>(&mut self, p: Point) -> RoutedEvent<H> {
        match self.drag.on_up(p, &self.metrics) {
            Some((surface, rect)) => {
                self.apply_drag(surface, rect);
                RoutedEvent::DragUpdate {
                    surface,
                    rect,
                    ended: true,
                }
            }
            None => RoutedEvent::PassThrough,
        }
    }

    /// Mirrors a dragged rect into the registry and repositions the surface
    /// anchored to it within the same update, so the two never visibly
    /// desynchronize.
    fn apply_drag(&mut self, surface: SurfaceId, rect: ScreenRect) {
        self.registry.update(surface, rect);
        if surface == SurfaceId::Bubble
            && let Some(menu) = self.registry.get(SurfaceId::BubbleMenu)
        {
            let size = (menu.rect.width(), menu.rect.height());
            let margin = self.metrics.dp(place::ANCHOR_MARGIN_DP);
            let moved = place::anchored_placement(rect, size, &self.metrics, margin);
            self.registry.update(SurfaceId::BubbleMenu, moved);
        }
    }
}
