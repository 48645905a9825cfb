// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snapshot-scoped index: box collection, hit testing, searches.

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use scrim_geometry::{ScreenMetrics, ScreenRect};
use scrim_provider::TreeProvider;

/// Spatial queries over one snapshot of a [`TreeProvider`] tree.
///
/// Construction is free; build a fresh index (with fresh metrics) per
/// refresh. The index holds no handles of its own: each query acquires what
/// it needs and releases everything it does not return.
#[derive(Debug)]
pub struct TreeIndex<'p, P: TreeProvider> {
    provider: &'p P,
    screen_w: i32,
    screen_h: i32,
}

impl<'p, P: TreeProvider> TreeIndex<'p, P> {
    /// Creates an index over the provider's current snapshot.
    #[must_use]
    pub fn new(provider: &'p P, metrics: &ScreenMetrics) -> Self {
        Self {
            provider,
            screen_w: metrics.width_px,
            screen_h: metrics.height_px,
        }
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &'p P {
        self.provider
    }

    /// Collects the screen boxes of every node worth rendering.
    ///
    /// A node contributes its rect only if the rect is non-empty and lies
    /// fully within `[0, screen_w] x [0, screen_h]`; partially off-screen
    /// nodes are deliberately excluded, since a clipped box would mislead
    /// about the element's true extent. Traversal is iterative with an
    /// explicit stack: tree depth is externally controlled, and unbounded
    /// recursion over a hostile tree is a crash risk.
    #[must_use]
    pub fn collect_rects(&self) -> Vec<ScreenRect> {
        let mut rects = Vec::new();
        let Some(root) = self.provider.current_root() else {
            return rects;
        };
        let mut stack: SmallVec<[P::Handle; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(node) = stack.pop() {
            if let Some(bounds) = self.provider.bounds(&node)
                && !bounds.is_empty()
                && bounds.within_screen(self.screen_w, self.screen_h)
            {
                rects.push(bounds);
            }
            // A stale node simply reports no children; the branch ends there.
            for child in self.provider.children(&node).into_iter().rev() {
                stack.push(child);
            }
            self.provider.release(node);
        }
        rects
    }

    /// The front-most node whose bounds contain `p`, or `None`.
    ///
    /// Matching descends child-index order: the first child whose bounds
    /// contain the point is entered, and the walk bottoms out at the deepest
    /// such node. Descendants draw on top of ancestors, so the deepest match
    /// is the front-most one. The returned handle is the caller's to
    /// release; every other handle touched during the walk is released here.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<P::Handle> {
        let root = self.provider.current_root()?;
        if !self.node_contains(&root, p) {
            self.provider.release(root);
            return None;
        }
        let mut current = root;
        loop {
            let mut next = None;
            for child in self.provider.children(&current) {
                if next.is_none() && self.node_contains(&child, p) {
                    next = Some(child);
                } else {
                    self.provider.release(child);
                }
            }
            match next {
                Some(child) => {
                    self.provider.release(current);
                    current = child;
                }
                None => return Some(current),
            }
        }
    }

    fn node_contains(&self, node: &P::Handle, p: Point) -> bool {
        self.provider
            .bounds(node)
            .is_some_and(|b| !b.is_empty() && b.contains_point(p))
    }

    /// The node's distance from the root, counted in parent links.
    ///
    /// Diagnostic display only; hit-test ordering never consults it. A stale
    /// node reports the depth of however far the parent chain still reaches.
    #[must_use]
    pub fn depth(&self, node: &P::Handle) -> usize {
        let mut depth = 0;
        let mut current = self.provider.parent(node);
        while let Some(parent) = current {
            depth += 1;
            current = self.provider.parent(&parent);
            self.provider.release(parent);
        }
        depth
    }

    /// Collects a handle to every node in the snapshot, in depth-first
    /// order. The caller releases all of them.
    #[must_use]
    pub fn collect_nodes(&self) -> Vec<P::Handle> {
        let mut nodes = Vec::new();
        let Some(root) = self.provider.current_root() else {
            return nodes;
        };
        let mut stack: SmallVec<[P::Handle; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(node) = stack.pop() {
            for child in self.provider.children(&node).into_iter().rev() {
                stack.push(child);
            }
            nodes.push(node);
        }
        nodes
    }

    /// Nodes whose text or content description equals `needle` exactly.
    /// Matches are returned (caller releases); non-matches are released here.
    #[must_use]
    pub fn find_by_text(&self, needle: &str) -> Vec<P::Handle> {
        self.retain_nodes(|provider, node| {
            provider.text(node).as_deref() == Some(needle)
                || provider.content_description(node).as_deref() == Some(needle)
        })
    }

    /// Nodes whose class name contains `needle`.
    #[must_use]
    pub fn find_by_class_name(&self, needle: &str) -> Vec<P::Handle> {
        self.retain_nodes(|provider, node| {
            provider
                .class_name(node)
                .is_some_and(|class| class.contains(needle))
        })
    }

    /// Nodes whose view id equals `needle` exactly.
    #[must_use]
    pub fn find_by_view_id(&self, needle: &str) -> Vec<P::Handle> {
        self.retain_nodes(|provider, node| provider.view_id(node).as_deref() == Some(needle))
    }

    fn retain_nodes(&self, keep: impl Fn(&P, &P::Handle) -> bool) -> Vec<P::Handle> {
        let mut matches = Vec::new();
        for node in self.collect_nodes() {
            if keep(self.provider, &node) {
                matches.push(node);
            } else {
                self.provider.release(node);
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use scrim_tree_ref::RefTree;

    use super::*;

    fn metrics() -> ScreenMetrics {
        ScreenMetrics::new(1080, 2000, 1.0)
    }

    /// Root with a full-screen child and a nested button inside it.
    fn sample_tree() -> RefTree {
        let mut tree = RefTree::new();
        let root = tree.insert_root(ScreenRect::new(0, 0, 1080, 2000));
        let panel = tree.insert(root, ScreenRect::new(0, 100, 1080, 1900));
        let button = tree.insert(panel, ScreenRect::new(100, 500, 300, 600));
        RefTree::set_text(&mut tree, button, "OK");
        tree.set_class_name(button, "android.widget.Button");
        tree
    }

    #[test]
    fn collect_rects_includes_all_onscreen_nodes() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree, &metrics());
        assert_eq!(index.collect_rects().len(), 3);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn collect_rects_excludes_empty_and_offscreen() {
        let mut tree = sample_tree();
        let root = tree.root_key().unwrap();
        // Empty rect and a rect hanging off the right edge.
        tree.insert(root, ScreenRect::new(10, 10, 10, 50));
        tree.insert(root, ScreenRect::new(1000, 0, 1100, 100));
        let index = TreeIndex::new(&tree, &metrics());
        assert_eq!(index.collect_rects().len(), 3);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn collect_rects_with_no_root_is_empty() {
        let tree = RefTree::new();
        let index = TreeIndex::new(&tree, &metrics());
        assert!(index.collect_rects().is_empty());
    }

    #[test]
    fn hit_test_returns_deepest_descendant() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree, &metrics());
        let hit = index.hit_test(Point::new(200.0, 550.0)).unwrap();
        assert_eq!(tree.text(&hit), Some("OK".into()));
        tree.release(hit);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn hit_test_falls_back_to_containing_ancestor() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree, &metrics());
        // Inside the panel but outside the button.
        let hit = index.hit_test(Point::new(700.0, 1500.0)).unwrap();
        assert_eq!(index.depth(&hit), 1);
        tree.release(hit);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn hit_test_outside_root_is_none() {
        let mut tree = RefTree::new();
        tree.insert_root(ScreenRect::new(100, 100, 200, 200));
        let index = TreeIndex::new(&tree, &metrics());
        assert!(index.hit_test(Point::new(50.0, 50.0)).is_none());
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn hit_test_is_idempotent_within_snapshot() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree, &metrics());
        let p = Point::new(200.0, 550.0);
        let first = index.hit_test(p).unwrap();
        let second = index.hit_test(p).unwrap();
        assert_eq!(first, second);
        tree.release(first);
        tree.release(second);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn hit_test_sibling_order_prefers_first_matching_child() {
        let mut tree = RefTree::new();
        let root = tree.insert_root(ScreenRect::new(0, 0, 1000, 1000));
        let first = tree.insert(root, ScreenRect::new(0, 0, 500, 500));
        tree.insert(root, ScreenRect::new(0, 0, 500, 500));
        RefTree::set_text(&mut tree, first, "first");
        let index = TreeIndex::new(&tree, &metrics());
        let hit = index.hit_test(Point::new(100.0, 100.0)).unwrap();
        assert_eq!(tree.text(&hit), Some("first".into()));
        tree.release(hit);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn detached_branch_degrades_not_fails() {
        let mut tree = sample_tree();
        let root = tree.root_key().unwrap();
        let orphan = tree.insert(root, ScreenRect::new(600, 100, 700, 200));
        tree.detach(orphan);
        let index = TreeIndex::new(&tree, &metrics());
        // The detached node contributes nothing; everything else survives.
        assert_eq!(index.collect_rects().len(), 3);
        assert!(index.hit_test(Point::new(650.0, 150.0)).is_some());
        assert_eq!(tree.outstanding(), 1); // the hit we did not release
    }

    #[test]
    fn depth_counts_parent_links() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree, &metrics());
        let hit = index.hit_test(Point::new(200.0, 550.0)).unwrap();
        assert_eq!(index.depth(&hit), 2);
        tree.release(hit);
        let root = tree.current_root().unwrap();
        assert_eq!(index.depth(&root), 0);
        tree.release(root);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn find_by_text_matches_text_and_description() {
        let mut tree = sample_tree();
        let root = tree.root_key().unwrap();
        let labeled = tree.insert(root, ScreenRect::new(400, 400, 500, 500));
        tree.set_content_description(labeled, "OK");
        let index = TreeIndex::new(&tree, &metrics());
        let found = index.find_by_text("OK");
        assert_eq!(found.len(), 2);
        for node in found {
            tree.release(node);
        }
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn find_by_class_name_is_substring() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree, &metrics());
        let found = index.find_by_class_name("Button");
        assert_eq!(found.len(), 1);
        for node in found {
            tree.release(node);
        }
        assert_eq!(tree.outstanding(), 0);
    }
}
