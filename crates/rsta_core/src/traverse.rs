/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Tree traversal utilities.
//!
//! Passes do not implement a visitor per node type. Instead they take a
//! classification predicate over [`NodeKind`] and let the traversal decide
//! which subtrees to enter.

use crate::node::{Node, NodeKind};

/// Pre-order walk over every node.
pub fn walk<'a>(node: &'a Node, f: &mut impl FnMut(&'a Node)) {
    f(node);
    for child in &node.children {
        walk(child, f);
    }
}

/// Lazily yields the text of every [`NodeKind::Text`] leaf in document order,
/// never entering a subtree whose root satisfies `skip`.
///
/// The iterator keeps an explicit stack, so it is restartable by simply
/// calling this function again on the same root.
pub fn text_leaves<'a, F>(root: &'a Node, skip: F) -> TextLeaves<'a, F>
where
    F: Fn(&NodeKind) -> bool,
{
    TextLeaves {
        stack: vec![root],
        skip,
    }
}

/// Iterator returned by [`text_leaves`].
pub struct TextLeaves<'a, F> {
    stack: Vec<&'a Node>,
    skip: F,
}

impl<'a, F> Iterator for TextLeaves<'a, F>
where
    F: Fn(&NodeKind) -> bool,
{
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if (self.skip)(&node.kind) {
                continue;
            }
            if let NodeKind::Text(s) = &node.kind {
                return Some(s.as_str());
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}
