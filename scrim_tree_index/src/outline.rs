// Copyright 2025 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Textual tree dump with box-drawing connectors.

use alloc::string::String;
use alloc::vec::Vec;

use scrim_provider::TreeProvider;

use crate::TreeIndex;

/// Longest node text echoed into the outline before truncation.
const TEXT_PREVIEW_CHARS: usize = 20;

impl<P: TreeProvider> TreeIndex<'_, P> {
    /// Renders the whole snapshot as an indented outline:
    ///
    /// ```text
    /// └─ android.widget.FrameLayout
    ///    ├─ android.widget.TextView [Hello]
    ///    └─ android.widget.Button [OK]
    /// ```
    ///
    /// Node text longer than twenty characters is truncated with an
    /// ellipsis. Returns an empty string when the provider has no root.
    #[must_use]
    pub fn outline(&self) -> String {
        let provider = self.provider();
        let mut out = String::new();
        let Some(root) = provider.current_root() else {
            return out;
        };
        // (node, prefix for its children, is-last-sibling)
        let mut stack: Vec<(P::Handle, String, bool)> = Vec::new();
        stack.push((root, String::new(), true));
        while let Some((node, prefix, is_last)) = stack.pop() {
            out.push_str(&prefix);
            out.push_str(if is_last { "└─ " } else { "├─ " });
            if let Some(class) = provider.class_name(&node) {
                out.push_str(&class);
            }
            if let Some(text) = provider.text(&node)
                && !text.is_empty()
            {
                out.push_str(" [");
                push_truncated(&mut out, &text);
                out.push(']');
            }
            out.push('\n');

            let child_prefix = {
                let mut p = prefix.clone();
                p.push_str(if is_last { "   " } else { "│  " });
                p
            };
            let children = provider.children(&node);
            let count = children.len();
            // Reverse so the stack pops children in child-index order.
            for (i, child) in children.into_iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), i == count - 1));
            }
            provider.release(node);
        }
        out
    }
}

fn push_truncated(out: &mut String, text: &str) {
    if text.chars().count() > TEXT_PREVIEW_CHARS {
        out.extend(text.chars().take(TEXT_PREVIEW_CHARS));
        out.push_str("...");
    } else {
        out.push_str(text);
    }
}
