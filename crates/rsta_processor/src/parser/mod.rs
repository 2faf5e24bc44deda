/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! reStructuredText-subset front-end.
//!
//! Produces an [`rsta_core::Node`] tree from article sources. The parser works
//! in two modes:
//!
//! - [`Extensions::Article`]: the article roles (`abbrev`, `fcite`, `cite`) and
//!   directives (`new-def`, `definitions`, `new-page`, `floating-figure`,
//!   `toctree`) are
//!   registered. Directive handlers write to the [`BuildState`] registry.
//! - [`Extensions::Plain`]: nothing beyond standard markup is known. Unknown
//!   roles become `Problematic` nodes followed by a diagnostic, and unknown
//!   directives become diagnostics. The linter reads sources in this mode.

pub mod directives;
pub mod inline;

use rsta_core::{BuildState, Node, NodeKind, SystemLevel};

use self::inline::Inline;

/// Which roles and directives the parser knows about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extensions {
    #[default]
    Article,
    Plain,
}

/// A source line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub number: usize,
}

/// The markup parser.
#[derive(Debug, Clone, Default)]
pub struct RstParser {
    extensions: Extensions,
}

impl RstParser {
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }

    pub fn article() -> Self {
        Self::new(Extensions::Article)
    }

    pub fn plain() -> Self {
        Self::new(Extensions::Plain)
    }

    pub fn extensions(&self) -> Extensions {
        self.extensions
    }

    /// Parse `source` into a document tree. Directives register terms in `state`.
    pub fn parse(&self, source: &str, state: &mut BuildState) -> Node {
        let lines: Vec<Line> = source
            .lines()
            .enumerate()
            .map(|(i, text)| Line {
                text: text.trim_end(),
                number: i + 1,
            })
            .collect();

        let mut ctx = Context {
            extensions: self.extensions,
            state,
            adornments: Vec::new(),
        };
        let blocks = ctx.parse_blocks(&lines, true);
        Node::document(nest_sections(blocks))
    }

    /// Parse without keeping any session state.
    pub fn parse_standalone(&self, source: &str) -> Node {
        let mut state = BuildState::default();
        self.parse(source, &mut state)
    }
}

enum Block {
    Title { depth: usize, title: Node },
    Body(Node),
}

pub(crate) struct Context<'s> {
    extensions: Extensions,
    state: &'s mut BuildState,
    /// Underline characters in order of first appearance; index + 1 is the depth.
    adornments: Vec<char>,
}

const ADORNMENT_CHARS: &str = "=-~^\"'*+#";

/// Indentation in bytes. Only spaces and tabs indent, so slicing a line at
/// any width up to its indentation stays on a char boundary.
fn indent_of(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

fn is_blank(line: &Line) -> bool {
    line.text.trim().is_empty()
}

fn is_adornment(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if ADORNMENT_CHARS.contains(first) => {
            text.chars().count() >= 2 && chars.all(|c| c == first)
        }
        _ => false,
    }
}

/// An underline shorter than its title still counts from four characters on.
fn is_title(text: &str, underline: &str) -> bool {
    if is_adornment(text) || !is_adornment(underline) {
        return false;
    }
    let underline_len = underline.chars().count();
    underline_len >= text.trim().chars().count() || underline_len >= 4
}

/// Width of a bullet marker plus its following space, if `text` starts a list item.
fn bullet_marker(text: &str) -> Option<(char, usize)> {
    let mut chars = text.chars();
    let marker = chars.next().filter(|c| matches!(c, '-' | '*' | '+'))?;
    match chars.next() {
        Some(' ') => {
            let after = &text[1..];
            Some((marker, 1 + indent_of(after)))
        }
        None => Some((marker, 2)),
        _ => None,
    }
}

/// End index (exclusive) of the block of lines indented by at least `min`
/// starting at `start`. Trailing blank lines are not included.
fn indented_end(lines: &[Line], start: usize, min: usize) -> usize {
    let mut end = start;
    let mut i = start;
    while i < lines.len() {
        if is_blank(&lines[i]) {
            i += 1;
            continue;
        }
        if indent_of(lines[i].text) < min {
            break;
        }
        i += 1;
        end = i;
    }
    end
}

/// Remove the common indentation of `lines`.
pub(crate) fn dedent<'a>(lines: &[Line<'a>]) -> Vec<Line<'a>> {
    let common = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_of(l.text))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| Line {
            text: if is_blank(l) { "" } else { &l.text[common..] },
            number: l.number,
        })
        .collect()
}

fn join_lines(lines: &[Line]) -> String {
    lines.iter().map(|l| l.text).collect::<Vec<_>>().join("\n")
}

impl Context<'_> {
    fn parse_blocks(&mut self, lines: &[Line], top_level: bool) -> Vec<Block> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            if is_blank(&line) {
                i += 1;
                continue;
            }

            if indent_of(line.text) > 0 {
                let end = indented_end(lines, i, 1);
                let inner = dedent(&lines[i..end]);
                out.extend(self.parse_blocks(&inner, false));
                i = end;
                continue;
            }

            if line.text == ".." || line.text.starts_with(".. ") {
                let end = indented_end(lines, i + 1, 1);
                let nodes = self.explicit_markup(&lines[i..end]);
                out.extend(nodes.into_iter().map(Block::Body));
                i = end;
                continue;
            }

            if top_level && i + 1 < lines.len() && is_title(line.text, lines[i + 1].text) {
                let (title, messages) = self.title(line, lines[i + 1]);
                out.push(title);
                out.extend(messages.into_iter().map(Block::Body));
                i += 2;
                continue;
            }

            if let Some((marker, _)) = bullet_marker(line.text) {
                let (list, end) = self.bullet_list(lines, i, marker);
                out.push(Block::Body(list));
                i = end;
                continue;
            }

            let start = i;
            while i < lines.len() && !is_blank(&lines[i]) {
                i += 1;
            }
            let (nodes, end) = self.paragraph(lines, start, i);
            out.extend(nodes.into_iter().map(Block::Body));
            i = end;
        }

        out
    }

    fn title(&mut self, line: Line, underline: Line) -> (Block, Vec<Node>) {
        let adornment = underline.text.chars().next().unwrap_or('=');
        let depth = match self.adornments.iter().position(|c| *c == adornment) {
            Some(idx) => idx + 1,
            None => {
                self.adornments.push(adornment);
                self.adornments.len()
            }
        };

        let text = line.text.trim();
        let mut messages = Vec::new();
        if underline.text.chars().count() < text.chars().count() {
            messages.push(Node::system_message(
                SystemLevel::Warning,
                "Title underline too short.",
                Some(underline.number),
            ));
        }
        let children = self.inlines(text, line.number, &mut messages);
        let title = Node::with_children(NodeKind::Title, children);
        (Block::Title { depth, title }, messages)
    }

    fn paragraph(&mut self, lines: &[Line], start: usize, end: usize) -> (Vec<Node>, usize) {
        let mut text = join_lines(&lines[start..end]);
        let mut nodes = Vec::new();
        let mut next = end;

        let literal_follows = text.ends_with("::");
        if literal_follows {
            if text == "::" {
                text.clear();
            } else if text.ends_with(" ::") {
                text.truncate(text.len() - 3);
            } else {
                text.truncate(text.len() - 1);
            }
        }

        if !text.is_empty() {
            let mut messages = Vec::new();
            let children = self.inlines(&text, lines[start].number, &mut messages);
            nodes.push(Node::paragraph(children));
            nodes.extend(messages);
        }

        if literal_follows {
            let mut body_start = end;
            while body_start < lines.len() && is_blank(&lines[body_start]) {
                body_start += 1;
            }
            if body_start < lines.len() && indent_of(lines[body_start].text) > 0 {
                let body_end = indented_end(lines, body_start, 1);
                let body = dedent(&lines[body_start..body_end]);
                nodes.push(Node::with_children(
                    NodeKind::LiteralBlock,
                    vec![Node::text(join_lines(&body))],
                ));
                next = body_end;
            } else {
                nodes.push(Node::system_message(
                    SystemLevel::Warning,
                    "Literal block expected; none found.",
                    Some(lines[end - 1].number),
                ));
            }
        }

        (nodes, next)
    }

    fn bullet_list(&mut self, lines: &[Line], start: usize, marker: char) -> (Node, usize) {
        let mut items = Vec::new();
        let mut i = start;

        while i < lines.len() {
            let Some((item_marker, width)) = bullet_marker(lines[i].text) else {
                break;
            };
            if item_marker != marker {
                break;
            }

            let first = lines[i].text.get(width..).unwrap_or("");
            let mut item_lines = vec![Line {
                text: first,
                number: lines[i].number,
            }];
            let end = indented_end(lines, i + 1, width);
            for line in &lines[i + 1..end] {
                item_lines.push(Line {
                    text: if is_blank(line) {
                        ""
                    } else {
                        &line.text[width..]
                    },
                    number: line.number,
                });
            }

            let blocks = self.parse_blocks(&item_lines, false);
            items.push(Node::with_children(NodeKind::ListItem, flatten(blocks)));

            i = end;
            while i < lines.len() && is_blank(&lines[i]) {
                i += 1;
            }
        }

        (Node::with_children(NodeKind::BulletList, items), i)
    }

    /// Comments and directives (`.. name:: argument`).
    fn explicit_markup(&mut self, block: &[Line]) -> Vec<Node> {
        let first = block[0];
        let after = first.text.get(2..).unwrap_or("").trim_start();
        match directives::parse_header(after) {
            Some((name, argument)) => {
                let body = dedent(&block[1..]);
                let directive =
                    directives::Directive::new(name, argument, &body, first.number, block);
                self.run_directive(directive)
            }
            None => Vec::new(),
        }
    }

    /// Convert inline tokens to nodes. Diagnostics for unknown roles go to `messages`.
    pub(crate) fn inlines(
        &mut self,
        text: &str,
        line: usize,
        messages: &mut Vec<Node>,
    ) -> Vec<Node> {
        inline::tokenize(text)
            .into_iter()
            .map(|token| match token {
                Inline::Text(s) => Node::text(s),
                Inline::Emphasis(s) => styled(NodeKind::Emphasis, s),
                Inline::Strong(s) => styled(NodeKind::Strong, s),
                Inline::Literal(s) => Node::literal(s),
                Inline::Role { name, content, raw } => {
                    self.role(name, content, raw, line, messages)
                }
            })
            .collect()
    }

    fn role(
        &mut self,
        name: &str,
        content: &str,
        raw: &str,
        line: usize,
        messages: &mut Vec<Node>,
    ) -> Node {
        use rsta_core::Placeholder;

        let article = self.extensions == Extensions::Article;
        let key = content.trim();
        match name {
            "emphasis" => styled(NodeKind::Emphasis, content),
            "strong" => styled(NodeKind::Strong, content),
            "literal" | "code" => Node::literal(content),
            "abbrev" if article => Node::placeholder(Placeholder::abbreviation(key, raw)),
            "fcite" if article => Node::placeholder(Placeholder::first_cite(key, raw)),
            "cite" if article => Node::with_children(
                NodeKind::CitationReference {
                    refname: key.to_string(),
                },
                vec![Node::text(key)],
            ),
            _ => {
                messages.push(Node::system_message(
                    SystemLevel::Error,
                    format!("Unknown interpreted text role \"{}\".", name),
                    Some(line),
                ));
                Node::with_children(NodeKind::Problematic, vec![Node::text(raw)])
            }
        }
    }
}

fn styled(kind: NodeKind, text: &str) -> Node {
    Node::with_children(kind, vec![Node::text(text)])
}

fn flatten(blocks: Vec<Block>) -> Vec<Node> {
    blocks
        .into_iter()
        .map(|b| match b {
            Block::Title { title, .. } => Node::paragraph(title.children),
            Block::Body(node) => node,
        })
        .collect()
}

/// Turn a flat list of titles and body blocks into nested sections.
fn nest_sections(blocks: Vec<Block>) -> Vec<Node> {
    let mut root = Vec::new();
    let mut stack: Vec<(usize, Node)> = Vec::new();

    for block in blocks {
        match block {
            Block::Title { depth, title } => {
                close_sections(&mut stack, &mut root, depth);
                stack.push((
                    depth,
                    Node::with_children(NodeKind::Section { depth }, vec![title]),
                ));
            }
            Block::Body(node) => match stack.last_mut() {
                Some((_, section)) => section.children.push(node),
                None => root.push(node),
            },
        }
    }

    close_sections(&mut stack, &mut root, 0);
    root
}

/// Pop every open section at `depth` or deeper into its parent.
fn close_sections(stack: &mut Vec<(usize, Node)>, root: &mut Vec<Node>, depth: usize) {
    while stack.last().is_some_and(|(d, _)| *d >= depth) {
        let Some((_, section)) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some((_, parent)) => parent.children.push(section),
            None => root.push(section),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsta_core::PlaceholderKind;

    fn parse(src: &str) -> Node {
        RstParser::article().parse_standalone(src)
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let doc = parse("First line\ncontinues.\n\nSecond.");
        assert_eq!(doc.children.len(), 2);
        assert_eq!(doc.children[0].as_text(), "First line\ncontinues.");
        assert_eq!(doc.children[1].as_text(), "Second.");
    }

    #[test]
    fn test_sections_nest_by_adornment_order() {
        let doc = parse("Intro\n=====\n\nText.\n\nDetail\n------\n\nMore.\n\nNext\n====\n");
        assert_eq!(doc.children.len(), 2);
        let intro = &doc.children[0];
        assert_eq!(intro.kind, NodeKind::Section { depth: 1 });
        assert_eq!(intro.children[0].as_text(), "Intro");
        assert_eq!(intro.children[2].kind, NodeKind::Section { depth: 2 });
        assert_eq!(doc.children[1].children[0].as_text(), "Next");
    }

    #[test]
    fn test_short_underline_warns() {
        let doc = parse("A long title\n=====\n");
        assert_eq!(doc.system_messages().len(), 1);
        assert_eq!(doc.children[0].kind, NodeKind::Section { depth: 1 });

        let not_a_title = parse("A long title\n==\n");
        assert_eq!(not_a_title.children[0].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_bullet_list_items() {
        let doc = parse("- one\n- two\n  continued\n\n- three\n");
        let list = &doc.children[0];
        assert_eq!(list.kind, NodeKind::BulletList);
        assert_eq!(list.children.len(), 3);
        assert_eq!(list.children[1].as_text(), "two\ncontinued");
    }

    #[test]
    fn test_literal_block_after_double_colon() {
        let doc = parse("Example::\n\n    let x = 1;\n\nAfter.");
        assert_eq!(doc.children[0].as_text(), "Example:");
        assert_eq!(doc.children[1].kind, NodeKind::LiteralBlock);
        assert_eq!(doc.children[1].as_text(), "let x = 1;");
        assert_eq!(doc.children[2].as_text(), "After.");
    }

    #[test]
    fn test_comment_is_dropped() {
        let doc = parse(".. a comment\n   spanning lines\n\nText.");
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].as_text(), "Text.");
    }

    #[test]
    fn test_article_roles_become_placeholders() {
        let doc = parse("Use :abbrev:`AI` and :fcite:`kuhn1962`.");
        let kinds: Vec<PlaceholderKind> = doc.placeholders().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![PlaceholderKind::Abbreviation, PlaceholderKind::FirstCite]
        );
        assert!(doc.system_messages().is_empty());
    }

    #[test]
    fn test_plain_mode_marks_roles_problematic() {
        let doc = RstParser::plain().parse_standalone("Use :abbrev:`AI` here.");
        let para = &doc.children[0];
        assert_eq!(para.children[1].kind, NodeKind::Problematic);
        assert_eq!(para.children[1].as_text(), ":abbrev:`AI`");
        assert_eq!(doc.system_messages().len(), 1);
        assert!(doc.placeholders().is_empty());
    }

    #[test]
    fn test_no_break_space_does_not_indent() {
        let doc = parse("Intro.\n\n a\n\u{a0}b\n");
        assert_eq!(doc.children.len(), 3);
        assert_eq!(doc.children[1].as_text(), "a");
        assert_eq!(doc.children[2].as_text(), "\u{a0}b");
    }

    #[test]
    fn test_ideographic_space_in_directive_body() {
        let mut state = BuildState::default();
        let src =
            ".. new-def:: AI\n   :long: Artificial intelligence\n  \u{3000}:short: AI\n\nAfter.\n";
        let doc = RstParser::article().parse(src, &mut state);
        assert!(state.registry.get("AI").is_some());
        assert_eq!(
            doc.children.last().map(Node::as_text).as_deref(),
            Some("After.")
        );
    }

    #[test]
    fn test_wide_space_inside_list_item() {
        let doc = parse("- one\n  \u{3000}two\n");
        let list = &doc.children[0];
        assert_eq!(list.kind, NodeKind::BulletList);
        assert_eq!(list.children[0].as_text(), "one\n\u{3000}two");
    }
}
