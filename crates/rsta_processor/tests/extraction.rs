/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use rsta_core::{Node, NodeKind, SystemLevel};
use rsta_processor::extractor::fragments;
use rsta_processor::{extract_text, rst_to_text};

#[test]
fn test_adjacent_nodes_join_with_one_space() {
    let doc = Node::paragraph(vec![Node::text("Hello "), Node::text("world.")]);
    assert_eq!(extract_text(&doc), "Hello world.");
}

#[test]
fn test_diagnostic_text_never_reaches_output() {
    let doc = Node::document(vec![
        Node::paragraph(vec![Node::text("Visible text.")]),
        Node::with_children(
            NodeKind::SystemMessage {
                level: SystemLevel::Warning,
                message: "Title underline too short.".to_string(),
                line: Some(2),
            },
            vec![Node::with_children(
                NodeKind::LiteralBlock,
                vec![Node::text("Secret diagnostic source")],
            )],
        ),
    ]);

    let text = extract_text(&doc);
    assert_eq!(text, "Visible text.");
    assert!(fragments(&doc).all(|f| !f.contains("Secret")));
}

#[test]
fn test_list_bullets_and_titles_do_not_fuse() {
    let text = rst_to_text("Results\n=======\n\n- fast\n- safe\n\nDone.\n");
    assert_eq!(text, "Results fast safe Done.");
}

#[test]
fn test_unknown_directive_is_skipped() {
    let source = concat!(
        "Before.\n\n",
        ".. floating-figure:: a.png\n   :width: 40%\n\n   Caption text.\n\n",
        "After.\n",
    );
    let text = rst_to_text(source);
    assert_eq!(text, "Before. After.");
}

#[test]
fn test_literal_spans_kept_as_words() {
    let text = rst_to_text("Call ``main`` now.\n");
    assert_eq!(text, "Call main now.");
}
