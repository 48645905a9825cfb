// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability table describing one node as labeled text rows.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use scrim_provider::{NodeStateFlags, TreeProvider};

/// One row of a [`PropertyTable`]: a label plus the extractor producing its
/// value for a given node. An extractor returns `None` when the provider
/// lacks the capability (or the handle is stale), and the row is skipped.
pub struct PropertyRow<P: TreeProvider> {
    /// Row label, e.g. `"className"`.
    pub label: &'static str,
    /// Produces the row's value, or `None` to skip the row.
    pub extract: Box<dyn Fn(&P, &P::Handle) -> Option<String>>,
}

impl<P: TreeProvider> core::fmt::Debug for PropertyRow<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRow")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<P: TreeProvider> PropertyRow<P> {
    /// Creates a row from a label and extractor.
    pub fn new(
        label: &'static str,
        extract: impl Fn(&P, &P::Handle) -> Option<String> + 'static,
    ) -> Self {
        Self {
            label,
            extract: Box::new(extract),
        }
    }
}

/// A table of property extractors, built once and iterated generically.
///
/// This replaces per-capability conditional dispatch: a provider that cannot
/// answer a row simply yields no value for it, and adding a capability means
/// adding a row, not another branch.
///
/// ```
/// use scrim_geometry::ScreenRect;
/// use scrim_provider::TreeProvider;
/// use scrim_tree_index::PropertyTable;
/// use scrim_tree_ref::RefTree;
///
/// let mut tree = RefTree::new();
/// let root = tree.insert_root(ScreenRect::new(0, 0, 100, 50));
/// tree.set_class_name(root, "android.widget.Button");
///
/// let table = PropertyTable::standard();
/// let root = tree.current_root().unwrap();
/// let rows = table.describe(&tree, &root);
/// assert!(rows.contains(&("className", "android.widget.Button".into())));
/// assert!(rows.contains(&("boundsInScreen", "(0, 0, 100, 50) 100x50".into())));
/// tree.release(root);
/// ```
#[derive(Debug)]
pub struct PropertyTable<P: TreeProvider> {
    rows: Vec<PropertyRow<P>>,
}

impl<P: TreeProvider + 'static> Default for PropertyTable<P> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<P: TreeProvider> PropertyTable<P> {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// The standard table: identity, text, geometry, hierarchy, and one row
    /// per interaction-state flag.
    #[must_use]
    pub fn standard() -> Self
    where
        P: 'static,
    {
        let mut table = Self::empty();
        table.push(PropertyRow::new("className", |p: &P, n| p.class_name(n)));
        table.push(PropertyRow::new("viewIdResourceName", |p: &P, n| {
            p.view_id(n)
        }));
        table.push(PropertyRow::new("packageName", |p: &P, n| {
            p.package_name(n)
        }));
        table.push(PropertyRow::new("text", |p: &P, n| p.text(n)));
        table.push(PropertyRow::new("contentDescription", |p: &P, n| {
            p.content_description(n)
        }));
        table.push(PropertyRow::new("boundsInScreen", |p: &P, n| {
            p.bounds(n).map(|b| {
                format!(
                    "({}, {}, {}, {}) {}x{}",
                    b.left(),
                    b.top(),
                    b.right(),
                    b.bottom(),
                    b.width(),
                    b.height()
                )
            })
        }));
        table.push(PropertyRow::new("center", |p: &P, n| {
            p.bounds(n)
                .map(|b| format!("({}, {})", b.center_x(), b.center_y()))
        }));
        table.push(PropertyRow::new("childCount", |p: &P, n| {
            let children = p.children(n);
            let count = children.len();
            for child in children {
                p.release(child);
            }
            Some(format!("{count}"))
        }));
        table.push(PropertyRow::new("depth", |p: &P, n| {
            let mut depth = 0_usize;
            let mut current = p.parent(n);
            while let Some(parent) = current {
                depth += 1;
                current = p.parent(&parent);
                p.release(parent);
            }
            Some(format!("{depth}"))
        }));
        for (label, flag) in STATE_ROWS {
            table.push(PropertyRow::new(label, move |p: &P, n| {
                Some(
                    if p.state_flags(n).contains(flag) {
                        "true"
                    } else {
                        "false"
                    }
                    .to_owned(),
                )
            }));
        }
        table
    }

    /// Appends a row.
    pub fn push(&mut self, row: PropertyRow<P>) {
        self.rows.push(row);
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Runs every extractor against one node, keeping the rows that answered.
    #[must_use]
    pub fn describe(&self, provider: &P, node: &P::Handle) -> Vec<(&'static str, String)> {
        self.rows
            .iter()
            .filter_map(|row| (row.extract)(provider, node).map(|value| (row.label, value)))
            .collect()
    }
}

const STATE_ROWS: [(&str, NodeStateFlags); 12] = [
    ("isClickable", NodeStateFlags::CLICKABLE),
    ("isLongClickable", NodeStateFlags::LONG_CLICKABLE),
    ("isFocusable", NodeStateFlags::FOCUSABLE),
    ("isFocused", NodeStateFlags::FOCUSED),
    ("isSelected", NodeStateFlags::SELECTED),
    ("isEnabled", NodeStateFlags::ENABLED),
    ("isScrollable", NodeStateFlags::SCROLLABLE),
    ("isEditable", NodeStateFlags::EDITABLE),
    ("isCheckable", NodeStateFlags::CHECKABLE),
    ("isChecked", NodeStateFlags::CHECKED),
    ("isPassword", NodeStateFlags::PASSWORD),
    ("isVisibleToUser", NodeStateFlags::VISIBLE),
];

#[cfg(test)]
mod tests {
    use scrim_geometry::{ScreenMetrics, ScreenRect};
    use scrim_provider::NodeStateFlags;
    use scrim_tree_ref::RefTree;

    use super::*;
    use crate::TreeIndex;

    #[test]
    fn describe_skips_absent_capabilities() {
        let mut tree = RefTree::new();
        let key = tree.insert_root(ScreenRect::new(0, 0, 100, 50));
        tree.set_class_name(key, "Button");
        // No text, no view id: those rows must not appear.
        let table = PropertyTable::standard();
        let root = tree.current_root().unwrap();
        let rows = table.describe(&tree, &root);
        assert!(rows.iter().any(|(label, _)| *label == "className"));
        assert!(!rows.iter().any(|(label, _)| *label == "text"));
        assert!(!rows.iter().any(|(label, _)| *label == "viewIdResourceName"));
        tree.release(root);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn state_flags_render_as_booleans() {
        let mut tree = RefTree::new();
        let key = tree.insert_root(ScreenRect::new(0, 0, 100, 50));
        tree.set_state_flags(key, NodeStateFlags::CLICKABLE | NodeStateFlags::ENABLED);
        let table = PropertyTable::standard();
        let root = tree.current_root().unwrap();
        let rows = table.describe(&tree, &root);
        assert!(rows.contains(&("isClickable", "true".into())));
        assert!(rows.contains(&("isEnabled", "true".into())));
        assert!(rows.contains(&("isScrollable", "false".into())));
        tree.release(root);
    }

    #[test]
    fn hierarchy_rows_use_parent_links() {
        let mut tree = RefTree::new();
        let root = tree.insert_root(ScreenRect::new(0, 0, 1000, 1000));
        let child = tree.insert(root, ScreenRect::new(0, 0, 100, 100));
        tree.insert(child, ScreenRect::new(0, 0, 50, 50));
        let table = PropertyTable::standard();
        let index = TreeIndex::new(&tree, &ScreenMetrics::new(1000, 1000, 1.0));
        let hit = index.hit_test(kurbo::Point::new(25.0, 25.0)).unwrap();
        let rows = table.describe(&tree, &hit);
        assert!(rows.contains(&("depth", "2".into())));
        assert!(rows.contains(&("childCount", "0".into())));
        tree.release(hit);
        assert_eq!(tree.outstanding(), 0);
    }

    #[test]
    fn custom_rows_extend_the_table() {
        let mut tree = RefTree::new();
        tree.insert_root(ScreenRect::new(0, 0, 100, 50));
        let mut table: PropertyTable<RefTree> = PropertyTable::empty();
        table.push(PropertyRow::new("area", |p: &RefTree, n| {
            p.bounds(n).map(|b| format!("{}", b.width() * b.height()))
        }));
        let root = tree.current_root().unwrap();
        assert_eq!(table.describe(&tree, &root), alloc::vec![("area", "5000".to_owned())]);
        tree.release(root);
    }
}
