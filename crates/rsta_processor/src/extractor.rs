/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain-text reconstruction for grammar checking.
//!
//! Text leaves are collected in document order, role markup left over from
//! unregistered extensions is stripped, and the fragments are joined so that
//! words from neighbouring nodes neither fuse nor gain a double space.

use crate::parser::RstParser;
use regex::{Captures, Regex};
use rsta_core::traverse::text_leaves;
use rsta_core::{Node, NodeKind};
use std::sync::LazyLock;

/// One or more interpreted-text roles with their surrounding blanks.
static INLINE_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([ \t]+)?(?:\s*:[a-z]+:`[^`]+`)+([ \t]+)?").expect("inline role pattern")
});

/// Subtrees the extractor never enters.
fn is_diagnostic(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::SystemMessage { .. })
}

/// Remove role markup from a text fragment.
///
/// A match with blanks on either side collapses to one space, otherwise it
/// vanishes.
pub fn strip_roles(text: &str) -> String {
    INLINE_ROLE
        .replace_all(text, |caps: &Captures| {
            if caps.get(1).is_some() || caps.get(2).is_some() {
                " "
            } else {
                ""
            }
        })
        .into_owned()
}

/// Cleaned text fragments in document order, skipping diagnostics and
/// fragments that hold nothing but spaces, newlines and periods.
pub fn fragments(root: &Node) -> impl Iterator<Item = String> + '_ {
    text_leaves(root, is_diagnostic)
        .map(strip_roles)
        .filter(|text| !text.trim_matches([' ', '\n', '.']).is_empty())
}

/// Join fragments, deciding the separator from their boundary characters.
pub fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    let mut prev_ends_blank = false;

    for (idx, fragment) in fragments.into_iter().enumerate() {
        let starts_blank = fragment.starts_with(char::is_whitespace);
        let piece: &str = if idx == 0 {
            &fragment
        } else if prev_ends_blank && starts_blank {
            let mut chars = fragment.chars();
            chars.next();
            chars.as_str()
        } else if !prev_ends_blank && !starts_blank {
            out.push(' ');
            &fragment
        } else {
            &fragment
        };

        out.push_str(piece);
        // A fragment reduced to nothing keeps the previous boundary.
        if !piece.is_empty() {
            prev_ends_blank = piece.ends_with(char::is_whitespace);
        }
    }

    out
}

/// Plain text of a document tree.
pub fn extract_text(root: &Node) -> String {
    join_fragments(fragments(root))
}

/// Parse `source` without the article extensions and extract its text.
pub fn rst_to_text(source: &str) -> String {
    extract_text(&RstParser::plain().parse_standalone(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsta_core::SystemLevel;

    fn texts(parts: &[&str]) -> Node {
        Node::paragraph(parts.iter().map(|p| Node::text(*p)).collect())
    }

    #[test]
    fn test_join_single_space() {
        assert_eq!(extract_text(&texts(&["Hello ", "world."])), "Hello world.");
        assert_eq!(extract_text(&texts(&["Hello", " world."])), "Hello world.");
    }

    #[test]
    fn test_join_inserts_space_between_words() {
        assert_eq!(extract_text(&texts(&["Hello", "world."])), "Hello world.");
    }

    #[test]
    fn test_join_drops_double_space() {
        assert_eq!(extract_text(&texts(&["Hello ", " world."])), "Hello world.");
    }

    #[test]
    fn test_join_whitespace_fragment_keeps_boundary() {
        let joined = join_fragments(["Hello ", "\t", "world."].map(String::from));
        assert_eq!(joined, "Hello world.");
    }

    #[test]
    fn test_diagnostics_are_skipped() {
        let doc = Node::document(vec![
            texts(&["Before."]),
            Node::with_children(
                NodeKind::SystemMessage {
                    level: SystemLevel::Error,
                    message: "Unknown interpreted text role \"abbrev\".".to_string(),
                    line: Some(1),
                },
                vec![texts(&["hidden diagnostic text"])],
            ),
            texts(&["After."]),
        ]);
        assert_eq!(extract_text(&doc), "Before. After.");
    }

    #[test]
    fn test_punctuation_only_fragments_dropped() {
        let doc = texts(&["First", " . ", "\n", "second"]);
        assert_eq!(fragments(&doc).count(), 2);
        assert_eq!(extract_text(&doc), "First second");
    }

    #[test]
    fn test_strip_roles() {
        assert_eq!(strip_roles("Use :abbrev:`AI` daily."), "Use daily.");
        assert_eq!(strip_roles(":abbrev:`AI`"), "");
        assert_eq!(strip_roles("see:ref:`x`"), "see");
        assert_eq!(strip_roles("a :x:`1` :y:`2` b"), "a b");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(extract_text(&Node::document(Vec::new())), "");
    }

    #[test]
    fn test_rst_to_text_drops_custom_markup() {
        let src = concat!(
            "Intro\n=====\n\nWe use :abbrev:`AI` for *many* things.\n\n",
            ".. new-def:: AI\n   :long: Artificial intelligence\n",
        );
        assert_eq!(rst_to_text(src), "Intro We use for many things.");
    }
}
