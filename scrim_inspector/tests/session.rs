// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A whole inspection session against a recording host.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use scrim_geometry::{ScreenMetrics, ScreenRect};
use scrim_inspector::Inspector;
use scrim_provider::{EphemeralPrefs, PassThroughPolicy, SurfaceHost, TreeProvider};
use scrim_router::{RoutedEvent, TouchEvent};
use scrim_surfaces::SurfaceId;
use scrim_tree_ref::RefTree;

#[derive(Clone, Debug, PartialEq)]
enum HostOp {
    Create(SurfaceId, ScreenRect, PassThroughPolicy),
    Move(u32, ScreenRect),
    Destroy(u32),
}

/// Records every compositor call; surfaces are sequence numbers.
#[derive(Debug, Default)]
struct RecordingHost {
    next: u32,
    ops: Rc<RefCell<Vec<HostOp>>>,
}

impl SurfaceHost for RecordingHost {
    type Surface = u32;

    fn create_surface(
        &mut self,
        id: SurfaceId,
        rect: ScreenRect,
        policy: PassThroughPolicy,
    ) -> Option<u32> {
        self.next += 1;
        self.ops.borrow_mut().push(HostOp::Create(id, rect, policy));
        Some(self.next)
    }

    fn move_surface(&mut self, surface: &u32, rect: ScreenRect) -> bool {
        self.ops.borrow_mut().push(HostOp::Move(*surface, rect));
        true
    }

    fn destroy_surface(&mut self, surface: u32) {
        self.ops.borrow_mut().push(HostOp::Destroy(surface));
    }
}

fn metrics() -> ScreenMetrics {
    ScreenMetrics::new(1080, 2000, 1.0)
}

fn session() -> (Inspector<RecordingHost, EphemeralPrefs>, Rc<RefCell<Vec<HostOp>>>) {
    let host = RecordingHost::default();
    let ops = Rc::clone(&host.ops);
    (
        Inspector::new(host, EphemeralPrefs::default(), metrics()),
        ops,
    )
}

#[test]
fn layer_is_created_with_pass_through_compositing() {
    let (mut inspector, ops) = session();
    assert!(inspector.enable_layer());
    assert_eq!(
        ops.borrow()[0],
        HostOp::Create(
            SurfaceId::InspectorLayer,
            ScreenRect::new(0, 0, 1080, 2000),
            PassThroughPolicy::PassThrough
        )
    );
}

#[test]
fn host_is_told_which_surface_each_create_is_for() {
    let (mut inspector, ops) = session();
    assert!(inspector.show_bubble());
    assert!(inspector.toggle_menu((200, 300)));
    assert!(inspector.open_node_menu(400, 600, (240, 320)));

    // Same policy throughout; only the id distinguishes the two menus.
    let created: Vec<_> = ops
        .borrow()
        .iter()
        .filter_map(|op| match op {
            HostOp::Create(id, _, policy) => Some((*id, *policy)),
            _ => None,
        })
        .collect();
    assert_eq!(
        created,
        vec![
            (SurfaceId::Bubble, PassThroughPolicy::Opaque),
            (SurfaceId::BubbleMenu, PassThroughPolicy::Opaque),
            (SurfaceId::NodeMenu, PassThroughPolicy::Opaque),
        ]
    );
}

#[test]
fn node_tap_opens_the_node_menu_where_the_finger_was() {
    let (mut inspector, _) = session();
    inspector.enable_layer();

    let mut tree = RefTree::new();
    let root = tree.insert_root(ScreenRect::new(0, 0, 1080, 2000));
    tree.insert(root, ScreenRect::new(100, 500, 300, 600));
    inspector.refresh(&tree);

    let routed = inspector.route(TouchEvent::Down(Point::new(150.0, 550.0)), &tree);
    let RoutedEvent::NodeHit { handle, .. } = routed else {
        panic!("expected NodeHit, got {routed:?}");
    };
    tree.release(handle);

    assert!(inspector.open_node_menu(150, 550, (240, 320)));
    let menu = inspector
        .router()
        .registry()
        .get(SurfaceId::NodeMenu)
        .unwrap();
    assert_eq!(menu.rect, ScreenRect::new(150, 550, 390, 870));
    assert_eq!(tree.outstanding(), 0);
}

#[test]
fn drag_moves_host_surfaces_in_lockstep_with_the_registry() {
    let (mut inspector, ops) = session();
    assert!(inspector.show_bubble());
    assert!(inspector.toggle_menu((200, 300)));
    let tree = RefTree::new();

    inspector.route(TouchEvent::Down(Point::new(80.0, 230.0)), &tree);
    inspector.route(TouchEvent::Move(Point::new(300.0, 230.0)), &tree);
    inspector.route(TouchEvent::Up(Point::new(700.0, 230.0)), &tree);

    let bubble = inspector.router().registry().get(SurfaceId::Bubble).unwrap();
    let menu = inspector
        .router()
        .registry()
        .get(SurfaceId::BubbleMenu)
        .unwrap();
    // Snapped flush right, with the menu docked on the bubble's left.
    assert_eq!(bubble.rect, ScreenRect::new(1020, 200, 1080, 260));
    assert_eq!(menu.rect.right(), 1018);

    // Each drag update moved both host surfaces to the registry rects.
    let ops = ops.borrow();
    let moves: Vec<_> = ops
        .iter()
        .filter(|op| matches!(op, HostOp::Move(..)))
        .collect();
    assert_eq!(moves.len(), 4);
    assert_eq!(*moves[2], HostOp::Move(1, bubble.rect));
    assert_eq!(*moves[3], HostOp::Move(2, menu.rect));
}

#[test]
fn back_key_closes_panels_before_the_layer_and_never_the_bubble() {
    let (mut inspector, _) = session();
    inspector.show_bubble();
    inspector.enable_layer();
    inspector.open_tree_panel();

    assert!(inspector.handle_back());
    assert!(!inspector.router().registry().is_live(SurfaceId::TreePanel));
    assert!(inspector.layer_enabled());

    assert!(inspector.handle_back());
    assert!(!inspector.layer_enabled());
    assert!(inspector.router().registry().is_live(SurfaceId::Bubble));

    assert!(!inspector.handle_back());
}

#[test]
fn empty_space_tap_is_consumed_while_the_layer_is_up() {
    let (mut inspector, _) = session();
    inspector.enable_layer();
    let tree = RefTree::new(); // provider unavailable

    let routed = inspector.route(TouchEvent::Down(Point::new(600.0, 1200.0)), &tree);
    assert_eq!(routed, RoutedEvent::NoHit);
    assert!(routed.is_consumed());
}

#[test]
fn panels_are_centered_fractions_of_the_screen() {
    let (mut inspector, _) = session();
    assert!(inspector.open_info_panel());
    assert!(inspector.open_tree_panel());

    let info = inspector
        .router()
        .registry()
        .get(SurfaceId::InfoPanel)
        .unwrap();
    let tree = inspector
        .router()
        .registry()
        .get(SurfaceId::TreePanel)
        .unwrap();
    assert_eq!(info.rect, ScreenRect::new(108, 300, 972, 1700));
    assert_eq!(tree.rect, ScreenRect::new(54, 200, 1026, 1800));
}
