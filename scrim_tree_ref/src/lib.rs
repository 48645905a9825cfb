// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim Tree Ref: an in-memory reference [`TreeProvider`].
//!
//! ## Overview
//!
//! A real host backs [`TreeProvider`] with a live accessibility (or similar)
//! connection to the foreground application. This crate provides the
//! reference implementation: a plain in-memory tree with the same handle
//! discipline, used by the workspace's tests and doctests and usable by
//! hosts that want to drive the overlay core against synthetic content.
//!
//! Two properties make it useful as a test harness:
//!
//! - **Borrow accounting.** Every handle the provider issues counts as an
//!   outstanding borrow until released; [`RefTree::outstanding`] turns the
//!   "release everything you do not return" contract into an assertion.
//! - **Invalidation on demand.** [`RefTree::detach`] simulates a node torn
//!   down by an asynchronous repaint: subsequent queries on its key answer
//!   `None`/empty/`false`, exactly as a stale live handle would. Keys are
//!   never reused, so a stale key can never alias a different live node.
//!
//! ```
//! use scrim_geometry::ScreenRect;
//! use scrim_provider::TreeProvider;
//! use scrim_tree_ref::RefTree;
//!
//! let mut tree = RefTree::new();
//! let root = tree.insert_root(ScreenRect::new(0, 0, 1080, 2000));
//! tree.insert(root, ScreenRect::new(100, 100, 300, 200));
//!
//! let handle = tree.current_root().unwrap();
//! assert_eq!(tree.children(&handle).len(), 1);
//! // ...two borrows are now outstanding: the root and the child.
//! assert_eq!(tree.outstanding(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use hashbrown::HashMap;

use scrim_geometry::ScreenRect;
use scrim_provider::{NodeStateFlags, TreeProvider};

/// Key of one node in a [`RefTree`].
///
/// Keys are allocated monotonically and never reused, which gives the same
/// no-aliasing guarantee a generational handle would: a key outlives its
/// node only as a stale key that every query answers with `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey(u32);

#[derive(Debug, Default)]
struct NodeData {
    bounds: ScreenRect,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    class_name: Option<String>,
    text: Option<String>,
    content_description: Option<String>,
    view_id: Option<String>,
    package_name: Option<String>,
    flags: NodeStateFlags,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<NodeKey, NodeData>,
    root: Option<NodeKey>,
    next: u32,
}

/// Synthetic input recorded by the reference provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedInput {
    /// A tap at `(x, y)` held for the given milliseconds.
    Tap(i32, i32, u32),
    /// A swipe from `(x1, y1)` to `(x2, y2)` over the given milliseconds.
    Swipe(i32, i32, i32, i32, u32),
    /// Text set on a node.
    SetText(NodeKey, String),
    /// Default action performed on a node.
    DefaultAction(NodeKey),
}

/// In-memory [`TreeProvider`] with borrow accounting.
#[derive(Debug)]
pub struct RefTree {
    inner: RefCell<Inner>,
    borrows: Cell<isize>,
    input_log: RefCell<Vec<RecordedInput>>,
    accept_input: Cell<bool>,
}

impl Default for RefTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RefTree {
    /// Creates an empty tree (no root; all queries answer empty).
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner::default()),
            borrows: Cell::new(0),
            input_log: RefCell::new(Vec::new()),
            accept_input: Cell::new(true),
        }
    }

    /// Inserts the root node, replacing any previous tree content's root
    /// link. Returns its key.
    pub fn insert_root(&mut self, bounds: ScreenRect) -> NodeKey {
        let key = self.alloc(bounds, None);
        self.inner.get_mut().root = Some(key);
        key
    }

    /// Inserts a child under `parent`, appended in child-index order.
    /// A stale parent key leaves the node unreachable from the root.
    pub fn insert(&mut self, parent: NodeKey, bounds: ScreenRect) -> NodeKey {
        let key = self.alloc(bounds, Some(parent));
        let inner = self.inner.get_mut();
        if let Some(p) = inner.nodes.get_mut(&parent) {
            p.children.push(key);
        }
        key
    }

    fn alloc(&mut self, bounds: ScreenRect, parent: Option<NodeKey>) -> NodeKey {
        let inner = self.inner.get_mut();
        let key = NodeKey(inner.next);
        inner.next += 1;
        inner.nodes.insert(
            key,
            NodeData {
                bounds,
                parent,
                ..NodeData::default()
            },
        );
        key
    }

    /// The root's key without counting a borrow (test convenience).
    #[must_use]
    pub fn root_key(&self) -> Option<NodeKey> {
        self.inner.borrow().root
    }

    /// Simulates asynchronous invalidation: the node disappears from its
    /// parent's child list and every query on its key now answers stale.
    pub fn detach(&mut self, key: NodeKey) {
        let inner = self.inner.get_mut();
        if let Some(node) = inner.nodes.remove(&key) {
            if let Some(parent) = node.parent
                && let Some(p) = inner.nodes.get_mut(&parent)
            {
                p.children.retain(|c| *c != key);
            }
            if inner.root == Some(key) {
                inner.root = None;
            }
        }
    }

    /// Moves/resizes a node, as a live app relayout would.
    pub fn set_bounds(&mut self, key: NodeKey, bounds: ScreenRect) {
        if let Some(node) = self.inner.get_mut().nodes.get_mut(&key) {
            node.bounds = bounds;
        }
    }

    /// Sets the node's class name.
    pub fn set_class_name(&mut self, key: NodeKey, class_name: &str) {
        self.with_node(key, |n| n.class_name = Some(class_name.to_string()));
    }

    /// Sets the node's text.
    pub fn set_text(&mut self, key: NodeKey, text: &str) {
        self.with_node(key, |n| n.text = Some(text.to_string()));
    }

    /// Sets the node's content description.
    pub fn set_content_description(&mut self, key: NodeKey, description: &str) {
        self.with_node(key, |n| n.content_description = Some(description.to_string()));
    }

    /// Sets the node's view id.
    pub fn set_view_id(&mut self, key: NodeKey, view_id: &str) {
        self.with_node(key, |n| n.view_id = Some(view_id.to_string()));
    }

    /// Sets the node's package name.
    pub fn set_package_name(&mut self, key: NodeKey, package: &str) {
        self.with_node(key, |n| n.package_name = Some(package.to_string()));
    }

    /// Sets the node's interaction-state flags.
    pub fn set_state_flags(&mut self, key: NodeKey, flags: NodeStateFlags) {
        self.with_node(key, |n| n.flags = flags);
    }

    fn with_node(&mut self, key: NodeKey, f: impl FnOnce(&mut NodeData)) {
        if let Some(node) = self.inner.get_mut().nodes.get_mut(&key) {
            f(node);
        }
    }

    /// Number of issued-but-unreleased handles. Zero after a well-behaved
    /// query (plus one per handle the query returned to you).
    #[must_use]
    pub fn outstanding(&self) -> isize {
        self.borrows.get()
    }

    /// Whether synthetic input is accepted (`true` by default). Set `false`
    /// to exercise dispatch-failure paths.
    pub fn set_accept_input(&mut self, accept: bool) {
        self.accept_input.set(accept);
    }

    /// The synthetic input recorded so far, in dispatch order.
    #[must_use]
    pub fn input_log(&self) -> Vec<RecordedInput> {
        self.input_log.borrow().clone()
    }

    fn borrow_handle(&self, key: NodeKey) -> NodeKey {
        self.borrows.set(self.borrows.get() + 1);
        key
    }

    fn attr(&self, key: &NodeKey, f: impl FnOnce(&NodeData) -> Option<String>) -> Option<String> {
        self.inner.borrow().nodes.get(key).and_then(f)
    }
}

impl TreeProvider for RefTree {
    type Handle = NodeKey;

    fn current_root(&self) -> Option<NodeKey> {
        let root = self.inner.borrow().root?;
        Some(self.borrow_handle(root))
    }

    fn bounds(&self, node: &NodeKey) -> Option<ScreenRect> {
        self.inner.borrow().nodes.get(node).map(|n| n.bounds)
    }

    fn children(&self, node: &NodeKey) -> Vec<NodeKey> {
        let keys = match self.inner.borrow().nodes.get(node) {
            Some(n) => n.children.clone(),
            None => return Vec::new(),
        };
        keys.into_iter().map(|k| self.borrow_handle(k)).collect()
    }

    fn parent(&self, node: &NodeKey) -> Option<NodeKey> {
        let parent = self.inner.borrow().nodes.get(node)?.parent?;
        Some(self.borrow_handle(parent))
    }

    fn release(&self, _node: NodeKey) {
        self.borrows.set(self.borrows.get() - 1);
    }

    fn class_name(&self, node: &NodeKey) -> Option<String> {
        self.attr(node, |n| n.class_name.clone())
    }

    fn text(&self, node: &NodeKey) -> Option<String> {
        self.attr(node, |n| n.text.clone())
    }

    fn content_description(&self, node: &NodeKey) -> Option<String> {
        self.attr(node, |n| n.content_description.clone())
    }

    fn view_id(&self, node: &NodeKey) -> Option<String> {
        self.attr(node, |n| n.view_id.clone())
    }

    fn package_name(&self, node: &NodeKey) -> Option<String> {
        self.attr(node, |n| n.package_name.clone())
    }

    fn state_flags(&self, node: &NodeKey) -> NodeStateFlags {
        self.inner
            .borrow()
            .nodes
            .get(node)
            .map(|n| n.flags)
            .unwrap_or_default()
    }

    fn dispatch_tap(&self, x: i32, y: i32, duration_ms: u32) -> bool {
        if !self.accept_input.get() {
            return false;
        }
        self.input_log
            .borrow_mut()
            .push(RecordedInput::Tap(x, y, duration_ms));
        true
    }

    fn dispatch_swipe(&self, x1: i32, y1: i32, x2: i32, y2: i32, duration_ms: u32) -> bool {
        if !self.accept_input.get() {
            return false;
        }
        self.input_log
            .borrow_mut()
            .push(RecordedInput::Swipe(x1, y1, x2, y2, duration_ms));
        true
    }

    fn set_text(&self, node: &NodeKey, text: &str) -> bool {
        if !self.accept_input.get() {
            return false;
        }
        let mut inner = self.inner.borrow_mut();
        let Some(data) = inner.nodes.get_mut(node) else {
            return false;
        };
        if !data.flags.contains(NodeStateFlags::EDITABLE) {
            return false;
        }
        data.text = Some(text.to_string());
        drop(inner);
        self.input_log
            .borrow_mut()
            .push(RecordedInput::SetText(*node, text.to_string()));
        true
    }

    fn perform_default_action(&self, node: &NodeKey) -> bool {
        if !self.accept_input.get()
            || !self.state_flags(node).contains(NodeStateFlags::CLICKABLE)
        {
            return false;
        }
        self.input_log
            .borrow_mut()
            .push(RecordedInput::DefaultAction(*node));
        true
    }
}
