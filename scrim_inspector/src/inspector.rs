// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation controller.

use alloc::vec::Vec;
use core::array;
use core::fmt;

use kurbo::Point;

use scrim_geometry::{ScreenMetrics, ScreenRect, place};
use scrim_provider::{InspectorPrefs, PassThroughPolicy, SurfaceHost, TreeProvider};
use scrim_router::{RoutedEvent, TouchEvent, TouchRouter};
use scrim_surfaces::{OverlaySurface, SurfaceId};
use scrim_tree_index::TreeIndex;

/// Initial bubble position, in pixels from the top-left corner.
pub const BUBBLE_INITIAL_POS: (i32, i32) = (50, 200);

/// Bubble side length, in density-independent pixels.
pub const BUBBLE_SIZE_DP: i32 = 60;

/// Info panel size as a fraction of the screen.
pub const INFO_PANEL_FRACTION: (f64, f64) = (0.8, 0.7);

/// Tree panel size as a fraction of the screen.
pub const TREE_PANEL_FRACTION: (f64, f64) = (0.9, 0.8);

/// Duration of the synthetic tap used as the click fallback, in milliseconds.
pub const TAP_DURATION_MS: u32 = 50;

/// Orchestrates the overlay surfaces over one [`SurfaceHost`].
///
/// Every show, move, and hide goes through both the host and the router's
/// registry in the same call, so touch arbitration and compositing can
/// never disagree about where a surface is. Hosts drive the inspector from
/// their input and lifecycle callbacks and render from [`boxes`](Self::boxes)
/// after a [`refresh`](Self::refresh).
pub struct Inspector<H: SurfaceHost, P: InspectorPrefs> {
    host: H,
    prefs: P,
    router: TouchRouter,
    surfaces: [Option<H::Surface>; 6],
    enabled: bool,
    boxes: Vec<ScreenRect>,
}

impl<H: SurfaceHost, P: InspectorPrefs> fmt::Debug for Inspector<H, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("router", &self.router)
            .field("surfaces", &self.surfaces)
            .field("enabled", &self.enabled)
            .field("boxes", &self.boxes)
            .finish_non_exhaustive()
    }
}

impl<H: SurfaceHost, P: InspectorPrefs> Inspector<H, P> {
    /// Creates a controller; the enabled flag is read from `prefs` once.
    pub fn new(host: H, prefs: P, metrics: ScreenMetrics) -> Self {
        let enabled = prefs.load_enabled();
        Self {
            host,
            prefs,
            router: TouchRouter::new(metrics),
            surfaces: array::from_fn(|_| None),
            enabled,
            boxes: Vec::new(),
        }
    }

    /// Whether inspection is enabled (the persisted flag, not whether any
    /// surface is currently shown).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the enabled flag, persisting it on change.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.prefs.store_enabled(enabled);
        }
    }

    /// The router, for reading surface and arbitration state.
    #[must_use]
    pub fn router(&self) -> &TouchRouter {
        &self.router
    }

    /// Replaces the screen metrics after a rotation. Shown surfaces keep
    /// their rects; hosts typically hide and re-show what matters.
    pub fn set_metrics(&mut self, metrics: ScreenMetrics) {
        self.router.set_metrics(metrics);
    }

    /// Shows the bubble at its initial position. `false` if the host
    /// refuses the surface.
    pub fn show_bubble(&mut self) -> bool {
        let metrics = *self.router.metrics();
        let side = metrics.dp(BUBBLE_SIZE_DP);
        let (x, y) = BUBBLE_INITIAL_POS;
        let rect = ScreenRect::from_origin_size(x, y, side, side);
        self.show(SurfaceId::Bubble, rect, PassThroughPolicy::Opaque)
    }

    /// Hides the bubble, tearing down its menu first.
    pub fn hide_bubble(&mut self) {
        self.hide(SurfaceId::BubbleMenu);
        self.hide(SurfaceId::Bubble);
    }

    /// Opens the bubble menu anchored beside the bubble, or closes it when
    /// it is already open. Returns whether the menu is open afterwards.
    pub fn toggle_menu(&mut self, menu_size: (i32, i32)) -> bool {
        if self.hide(SurfaceId::BubbleMenu) {
            return false;
        }
        let Some(bubble) = self.router.registry().get(SurfaceId::Bubble) else {
            return false;
        };
        let anchor = bubble.rect;
        let metrics = *self.router.metrics();
        let margin = metrics.dp(place::ANCHOR_MARGIN_DP);
        let rect = place::anchored_placement(anchor, menu_size, &metrics, margin);
        self.show(SurfaceId::BubbleMenu, rect, PassThroughPolicy::Opaque)
    }

    /// Shows the full-screen inspection layer. Unclaimed touches fall
    /// through it at the compositor level; claim decisions happen per touch
    /// in the router.
    pub fn enable_layer(&mut self) -> bool {
        let metrics = *self.router.metrics();
        let rect = ScreenRect::from_origin_size(0, 0, metrics.width_px, metrics.height_px);
        self.show(SurfaceId::InspectorLayer, rect, PassThroughPolicy::PassThrough)
    }

    /// Tears down the inspection layer and everything shown on it.
    pub fn disable_layer(&mut self) {
        self.close_transients();
        self.boxes.clear();
        self.hide(SurfaceId::InspectorLayer);
    }

    /// Whether the inspection layer is up.
    #[must_use]
    pub fn layer_enabled(&self) -> bool {
        self.router.registry().is_live(SurfaceId::InspectorLayer)
    }

    /// Re-collects the visible node boxes from a fresh tree snapshot.
    ///
    /// Called from the tree-changed signal; the new boxes take effect for
    /// rendering and the next routed event, never an event already handled.
    pub fn refresh<T: TreeProvider>(&mut self, provider: &T) -> &[ScreenRect] {
        let metrics = *self.router.metrics();
        self.boxes = TreeIndex::new(provider, &metrics).collect_rects();
        &self.boxes
    }

    /// The node boxes from the last [`refresh`](Self::refresh).
    #[must_use]
    pub fn boxes(&self) -> &[ScreenRect] {
        &self.boxes
    }

    /// The node box under a finger, tolerant of slightly-off taps.
    ///
    /// Scans the boxes from the last [`refresh`](Self::refresh), each
    /// expanded by the canonical node tolerance. When several boxes contain
    /// the point the smallest wins, which favors the deepest node of a
    /// nested layout.
    #[must_use]
    pub fn box_at(&self, p: Point) -> Option<ScreenRect> {
        let tolerance = self.router.metrics().dp(place::NODE_TOUCH_TOLERANCE_DP);
        let mut best: Option<ScreenRect> = None;
        for &rect in &self.boxes {
            if !place::point_in_rect(p, rect, tolerance) {
                continue;
            }
            if best.is_none_or(|b| area(rect) < area(b)) {
                best = Some(rect);
            }
        }
        best
    }

    /// Opens the node context menu at a tap point, flipped and clamped to
    /// stay on screen.
    pub fn open_node_menu(&mut self, x: i32, y: i32, size: (i32, i32)) -> bool {
        let metrics = *self.router.metrics();
        let rect = place::popup_at_point(x, y, size, &metrics);
        self.show(SurfaceId::NodeMenu, rect, PassThroughPolicy::Opaque)
    }

    /// Opens the node info panel, centered.
    pub fn open_info_panel(&mut self) -> bool {
        self.open_centered(SurfaceId::InfoPanel, INFO_PANEL_FRACTION)
    }

    /// Opens the tree outline panel, centered.
    pub fn open_tree_panel(&mut self) -> bool {
        self.open_centered(SurfaceId::TreePanel, TREE_PANEL_FRACTION)
    }

    fn open_centered(&mut self, id: SurfaceId, fraction: (f64, f64)) -> bool {
        let metrics = *self.router.metrics();
        let rect = place::centered_fraction(&metrics, fraction.0, fraction.1);
        self.show(id, rect, PassThroughPolicy::Opaque)
    }

    /// Closes the node menu and both panels. Returns whether anything was
    /// open.
    pub fn close_transients(&mut self) -> bool {
        let mut closed = self.hide(SurfaceId::NodeMenu);
        closed |= self.hide(SurfaceId::InfoPanel);
        closed |= self.hide(SurfaceId::TreePanel);
        closed
    }

    /// The back-key cascade: close transients if any are open, else tear
    /// down the inspection layer, else report the key unhandled.
    pub fn handle_back(&mut self) -> bool {
        if self.close_transients() {
            return true;
        }
        if self.layer_enabled() {
            self.disable_layer();
            return true;
        }
        false
    }

    /// Routes one touch event, moving host surfaces along with any drag.
    pub fn route<T: TreeProvider>(
        &mut self,
        event: TouchEvent,
        provider: &T,
    ) -> RoutedEvent<T::Handle> {
        let routed = self.router.route(event, provider);
        if let RoutedEvent::DragUpdate { surface, rect, .. } = &routed {
            let (surface, rect) = (*surface, *rect);
            self.move_host_surface(surface, rect);
            if surface == SurfaceId::Bubble
                && let Some(menu) = self.router.registry().get(SurfaceId::BubbleMenu)
            {
                let menu_rect = menu.rect;
                self.move_host_surface(SurfaceId::BubbleMenu, menu_rect);
            }
        }
        routed
    }

    /// Clicks a node: its default action when it accepts one, else a
    /// synthetic tap at its center. Never retried on failure.
    pub fn click_node<T: TreeProvider>(&self, provider: &T, node: &T::Handle) -> bool {
        if provider.perform_default_action(node) {
            return true;
        }
        match provider.bounds(node) {
            Some(b) if !b.is_empty() => {
                provider.dispatch_tap(b.center_x(), b.center_y(), TAP_DURATION_MS)
            }
            _ => false,
        }
    }

    /// Forwards a synthetic tap; the provider's verdict is final.
    pub fn dispatch_tap<T: TreeProvider>(
        &self,
        provider: &T,
        x: i32,
        y: i32,
        duration_ms: u32,
    ) -> bool {
        provider.dispatch_tap(x, y, duration_ms)
    }

    /// Forwards a synthetic swipe; the provider's verdict is final.
    pub fn dispatch_swipe<T: TreeProvider>(
        &self,
        provider: &T,
        from: (i32, i32),
        to: (i32, i32),
        duration_ms: u32,
    ) -> bool {
        provider.dispatch_swipe(from.0, from.1, to.0, to.1, duration_ms)
    }

    /// Forwards a text replacement; the provider's verdict is final.
    pub fn set_node_text<T: TreeProvider>(
        &self,
        provider: &T,
        node: &T::Handle,
        text: &str,
    ) -> bool {
        provider.set_text(node, text)
    }

    /// Creates the host surface and registers it for arbitration in the
    /// same call. Replaces a surface already shown under this id.
    fn show(&mut self, id: SurfaceId, rect: ScreenRect, policy: PassThroughPolicy) -> bool {
        self.hide(id);
        match self.host.create_surface(id, rect, policy) {
            Some(surface) => {
                self.surfaces[id.index()] = Some(surface);
                let metrics = *self.router.metrics();
                self.router
                    .registry_mut()
                    .register(OverlaySurface::new(id, rect, &metrics));
                true
            }
            None => false,
        }
    }

    fn hide(&mut self, id: SurfaceId) -> bool {
        match self.surfaces[id.index()].take() {
            Some(surface) => {
                self.host.destroy_surface(surface);
                self.router.registry_mut().unregister(id);
                true
            }
            None => false,
        }
    }

    fn move_host_surface(&mut self, id: SurfaceId, rect: ScreenRect) {
        if let Some(surface) = &self.surfaces[id.index()] {
            self.host.move_surface(surface, rect);
        }
    }
}

fn area(rect: ScreenRect) -> i64 {
    i64::from(rect.width()) * i64::from(rect.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrim_provider::EphemeralPrefs;
    use scrim_tree_ref::RefTree;

    /// Counts live surfaces; handles are opaque sequence numbers.
    #[derive(Debug, Default)]
    struct CountingHost {
        next: u32,
        live: u32,
        refuse: bool,
    }

    impl SurfaceHost for CountingHost {
        type Surface = u32;

        fn create_surface(
            &mut self,
            _id: SurfaceId,
            _rect: ScreenRect,
            _policy: PassThroughPolicy,
        ) -> Option<u32> {
            if self.refuse {
                return None;
            }
            self.next += 1;
            self.live += 1;
            Some(self.next)
        }

        fn move_surface(&mut self, _surface: &u32, _rect: ScreenRect) -> bool {
            true
        }

        fn destroy_surface(&mut self, _surface: u32) {
            self.live -= 1;
        }
    }

    fn inspector() -> Inspector<CountingHost, EphemeralPrefs> {
        Inspector::new(
            CountingHost::default(),
            EphemeralPrefs::default(),
            ScreenMetrics::new(1080, 2000, 1.0),
        )
    }

    #[test]
    fn show_bubble_registers_for_arbitration() {
        let mut inspector = inspector();
        assert!(inspector.show_bubble());
        let bubble = inspector.router().registry().get(SurfaceId::Bubble).unwrap();
        assert_eq!(bubble.rect, ScreenRect::new(50, 200, 110, 260));
        assert_eq!(inspector.host.live, 1);
    }

    #[test]
    fn refused_surface_registers_nothing() {
        let mut inspector = inspector();
        inspector.host.refuse = true;
        assert!(!inspector.show_bubble());
        assert!(!inspector.router().registry().is_live(SurfaceId::Bubble));
    }

    #[test]
    fn hide_bubble_tears_down_the_menu_first() {
        let mut inspector = inspector();
        inspector.show_bubble();
        assert!(inspector.toggle_menu((200, 300)));
        inspector.hide_bubble();
        assert!(!inspector.router().registry().is_live(SurfaceId::Bubble));
        assert!(!inspector.router().registry().is_live(SurfaceId::BubbleMenu));
        assert_eq!(inspector.host.live, 0);
    }

    #[test]
    fn toggle_menu_is_anchored_and_closes_on_second_call() {
        let mut inspector = inspector();
        inspector.show_bubble();
        assert!(inspector.toggle_menu((200, 300)));
        let menu = inspector
            .router()
            .registry()
            .get(SurfaceId::BubbleMenu)
            .unwrap();
        // Bubble center is in the left half, so the menu docks to its right.
        assert_eq!(menu.rect.left(), 112);
        assert!(!inspector.toggle_menu((200, 300)));
        assert!(!inspector.router().registry().is_live(SurfaceId::BubbleMenu));
    }

    #[test]
    fn toggle_menu_without_a_bubble_stays_closed() {
        let mut inspector = inspector();
        assert!(!inspector.toggle_menu((200, 300)));
    }

    #[test]
    fn back_cascade_closes_transients_then_the_layer() {
        let mut inspector = inspector();
        inspector.enable_layer();
        inspector.open_info_panel();
        inspector.open_tree_panel();

        assert!(inspector.handle_back()); // both panels
        assert!(inspector.layer_enabled());
        assert!(inspector.handle_back()); // the layer
        assert!(!inspector.layer_enabled());
        assert!(!inspector.handle_back()); // nothing left
        assert_eq!(inspector.host.live, 0);
    }

    #[test]
    fn refresh_collects_boxes_for_rendering() {
        let mut inspector = inspector();
        let mut tree = RefTree::new();
        let root = tree.insert_root(ScreenRect::new(0, 0, 1080, 2000));
        tree.insert(root, ScreenRect::new(100, 500, 300, 600));

        assert_eq!(inspector.refresh(&tree).len(), 2);
        assert_eq!(inspector.boxes().len(), 2);
        assert_eq!(tree.outstanding(), 0);

        inspector.disable_layer();
        assert!(inspector.boxes().is_empty());
    }

    #[test]
    fn enabled_flag_is_read_at_init() {
        let mut prefs = EphemeralPrefs::default();
        prefs.store_enabled(true);
        let restored = Inspector::new(
            CountingHost::default(),
            prefs,
            ScreenMetrics::new(1080, 2000, 1.0),
        );
        assert!(restored.is_enabled());
    }

    #[test]
    fn enabled_flag_is_persisted_on_change() {
        let mut fresh = inspector();
        assert!(!fresh.is_enabled());
        fresh.set_enabled(true);
        assert!(fresh.is_enabled());
        assert!(fresh.prefs.load_enabled());
    }

    #[test]
    fn box_at_is_tolerant_and_prefers_the_innermost_box() {
        let mut inspector = inspector();
        let mut tree = RefTree::new();
        let root = tree.insert_root(ScreenRect::new(0, 0, 1080, 2000));
        tree.insert(root, ScreenRect::new(100, 500, 300, 600));
        inspector.refresh(&tree);
        assert_eq!(tree.outstanding(), 0);

        // 5px outside the inner box, within the 10dp tolerance band.
        assert_eq!(
            inspector.box_at(Point::new(95.0, 550.0)),
            Some(ScreenRect::new(100, 500, 300, 600))
        );
        // Both boxes contain the point; the inner (smaller) one wins.
        assert_eq!(
            inspector.box_at(Point::new(150.0, 550.0)),
            Some(ScreenRect::new(100, 500, 300, 600))
        );
        // Root territory away from the inner box.
        assert_eq!(
            inspector.box_at(Point::new(800.0, 1500.0)),
            Some(ScreenRect::new(0, 0, 1080, 2000))
        );
        assert!(inspector.box_at(Point::new(-50.0, -50.0)).is_none());
    }

    #[test]
    fn click_node_falls_back_to_a_center_tap() {
        let inspector = inspector();
        let mut tree = RefTree::new();
        let key = tree.insert_root(ScreenRect::new(100, 100, 300, 200));

        // Not clickable: the default action is refused, the tap lands.
        assert!(inspector.click_node(&tree, &key));
        assert_eq!(
            tree.input_log(),
            alloc::vec![scrim_tree_ref::RecordedInput::Tap(200, 150, 50)]
        );
    }
}
