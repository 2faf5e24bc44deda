/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Document tree rendering.

use super::format::OutputFormat;
use super::latex::escape;
use rsta_core::{ArticleConfig, Node, NodeKind};

/// Render a resolved document tree with format `F`.
pub fn render_document<F: OutputFormat>(root: &Node) -> String {
    let fmt = F::default();
    let output = render_block(&fmt, root);
    fmt.finish(output)
}

/// Blocks are separated by a blank line; empty renderings are dropped.
fn render_blocks<F: OutputFormat>(fmt: &F, nodes: &[Node]) -> F::Output {
    let items = nodes
        .iter()
        .map(|node| render_block(fmt, node))
        .filter(|output| !fmt.is_empty(output))
        .collect();
    fmt.join(items, "\n\n")
}

fn render_inlines<F: OutputFormat>(fmt: &F, nodes: &[Node]) -> F::Output {
    let items = nodes.iter().map(|node| render_inline(fmt, node)).collect();
    fmt.join(items, "")
}

fn render_block<F: OutputFormat>(fmt: &F, node: &Node) -> F::Output {
    match &node.kind {
        NodeKind::Document
        | NodeKind::ListItem
        | NodeKind::DefinitionListItem
        | NodeKind::Definition => render_blocks(fmt, &node.children),
        NodeKind::Section { depth } => {
            let (title, body) = match node.children.split_first() {
                Some((first, rest)) if first.kind == NodeKind::Title => {
                    (Some(render_inlines(fmt, &first.children)), rest)
                }
                _ => (None, node.children.as_slice()),
            };
            let mut parts = Vec::new();
            if let Some(title) = title {
                parts.push(fmt.heading(*depth, title));
            }
            let body = render_blocks(fmt, body);
            if !fmt.is_empty(&body) {
                parts.push(body);
            }
            fmt.join(parts, "\n\n")
        }
        NodeKind::Title | NodeKind::Paragraph => fmt.paragraph(render_inlines(fmt, &node.children)),
        NodeKind::BulletList => {
            let items = node
                .children
                .iter()
                .map(|item| render_block(fmt, item))
                .collect();
            fmt.bullet_list(items)
        }
        NodeKind::DefinitionList => {
            let items = node
                .children
                .iter()
                .map(|item| {
                    let term = item
                        .children
                        .iter()
                        .find(|c| c.kind == NodeKind::Term)
                        .map(|t| render_inlines(fmt, &t.children))
                        .unwrap_or_else(|| fmt.text(""));
                    let definition = item
                        .children
                        .iter()
                        .find(|c| c.kind == NodeKind::Definition)
                        .map(|d| render_block(fmt, d))
                        .unwrap_or_else(|| fmt.text(""));
                    (term, definition)
                })
                .collect();
            fmt.definition_list(items)
        }
        NodeKind::LiteralBlock => fmt.literal_block(&node.as_text()),
        NodeKind::SystemMessage {
            level,
            message,
            line,
        } => {
            let mut parts = vec![fmt.diagnostic(*level, message, *line)];
            parts.extend(node.children.iter().map(|child| render_block(fmt, child)));
            fmt.join(parts, "\n\n")
        }
        NodeKind::FloatingFigure(figure) => {
            let caption = node
                .children
                .iter()
                .find(|c| c.kind == NodeKind::Caption)
                .map(|c| render_inlines(fmt, &c.children))
                .unwrap_or_else(|| fmt.text(""));
            fmt.floating_figure(figure, caption)
        }
        NodeKind::NewPage { pages } => fmt.new_page(*pages),
        NodeKind::Target { name } => fmt.target(name),
        NodeKind::Image { uri } => fmt.image(uri),
        _ => render_inline(fmt, node),
    }
}

fn render_inline<F: OutputFormat>(fmt: &F, node: &Node) -> F::Output {
    match &node.kind {
        NodeKind::Text(s) => fmt.text(s),
        NodeKind::Emphasis => fmt.emph(render_inlines(fmt, &node.children)),
        NodeKind::Strong => fmt.strong(render_inlines(fmt, &node.children)),
        NodeKind::Literal | NodeKind::Problematic => fmt.literal(&node.as_text()),
        NodeKind::CitationReference { refname } => fmt.citation(refname),
        NodeKind::Target { name } => fmt.target(name),
        NodeKind::Image { uri } => fmt.image(uri),
        NodeKind::Placeholder(placeholder) => {
            log::warn!("rendering unresolved placeholder {:?}", placeholder.kind);
            fmt.literal(&placeholder.raw)
        }
        NodeKind::Caption | NodeKind::Term | NodeKind::Title => render_inlines(fmt, &node.children),
        _ => render_block(fmt, node),
    }
}

/// Whether the tree cites anything, so a bibliography is needed.
pub fn has_citations(root: &Node) -> bool {
    root.contains(|kind| matches!(kind, NodeKind::CitationReference { .. }))
}

/// A complete LaTeX document: preamble, title page and body.
#[derive(Debug, Clone)]
pub struct LatexDocument<'a> {
    config: &'a ArticleConfig,
    abstract_text: Option<String>,
}

impl<'a> LatexDocument<'a> {
    pub fn new(config: &'a ArticleConfig) -> Self {
        Self {
            config,
            abstract_text: None,
        }
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.abstract_text = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Wrap an already rendered LaTeX `body`.
    pub fn render(&self, body: &str, cites: bool) -> String {
        let latex = &self.config.latex;
        let project = &self.config.project;
        let mut out = String::new();

        out.push_str(&format!(
            "\\documentclass[{},{}]{{{}}}\n",
            latex.paper_size, latex.point_size, latex.document_class
        ));
        out.push_str("\\usepackage[utf8]{inputenc}\n");
        out.push_str("\\usepackage{graphicx}\n");
        out.push_str("\\usepackage{wrapfig}\n");
        out.push_str("\\usepackage{xcolor}\n");
        out.push_str("\\usepackage{hyperref}\n");
        if latex.dark {
            out.push_str("\\pagecolor{black}\n\\color{white}\n");
        }
        if let Some(preamble) = &latex.preamble {
            out.push_str(preamble.trim_end());
            out.push('\n');
        }

        out.push_str(&format!("\\title{{{}", escape(&project.title)));
        if let Some(subtitle) = &project.subtitle {
            out.push_str(&format!("\\\\\n\\large {}", escape(subtitle)));
        }
        out.push_str("}\n");
        out.push_str(&format!("\\author{{{}", escape(&project.author)));
        if let Some(institution) = &project.institution {
            out.push_str(&format!("\\\\\n{}", escape(institution)));
        }
        out.push_str("}\n");

        out.push_str("\n\\begin{document}\n\n");
        if !project.title.is_empty() {
            out.push_str("\\maketitle\n\n");
        }
        if let Some(text) = &self.abstract_text {
            out.push_str(&format!(
                "\\begin{{abstract}}\n{}\n\\end{{abstract}}\n\n",
                escape(text.trim())
            ));
        }

        out.push_str(body.trim());
        out.push('\n');

        if cites {
            out.push_str(&format!(
                "\n\\bibliographystyle{{{}}}\n\\bibliography{{{}}}\n",
                latex.bibliography_style, latex.bibliography
            ));
        }
        out.push_str("\n\\end{document}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RstParser;
    use crate::render::{Latex, PlainText};

    fn latex(src: &str) -> String {
        render_document::<Latex>(&RstParser::article().parse_standalone(src))
    }

    #[test]
    fn test_sections_and_paragraphs() {
        let out =
            latex("Intro\n=====\n\nHello *world*.\n\nDetail\n------\n\n**Bold** and ``code_x``.\n");
        assert_eq!(
            out,
            "\\section{Intro}\n\nHello \\textit{world}.\n\n\
             \\subsection{Detail}\n\n\\textbf{Bold} and \\texttt{code\\_x}."
        );
    }

    #[test]
    fn test_bullet_list() {
        let out = latex("- one\n- two\n");
        assert_eq!(
            out,
            "\\begin{itemize}\n\\item one\n\\item two\n\\end{itemize}"
        );
    }

    #[test]
    fn test_citations_new_page_and_target() {
        let out = latex("See :cite:`kuhn1962`.\n\n.. new-page::\n   :pages: 2\n");
        assert_eq!(out, "See \\cite{kuhn1962}.\n\n\\newpage\n\\newpage");
    }

    #[test]
    fn test_floating_figure_rendered_with_label() {
        let src = concat!(
            ".. floating-figure:: a.png\n   :name: fig\n   :width: 50%\n\n",
            "   Caption *here*.\n",
        );
        let out = latex(src);
        let head = "\\label{fig}\n\n\\begin{wrapfigure}{l}{0.50\\linewidth}\n\\centering\n";
        assert!(out.starts_with(head));
        assert!(out.contains("\\caption{Caption \\textit{here}. \\label{figure:fig}}"));
    }

    #[test]
    fn test_diagnostics_stay_visible() {
        let doc = RstParser::plain().parse_standalone("Use :abbrev:`AI`.");
        let out = render_document::<Latex>(&doc);
        assert!(out.contains("\\texttt{:abbrev:`AI`}"));
        assert!(out.contains("(ERROR) line 1: Unknown interpreted text role \"abbrev\"."));
    }

    #[test]
    fn test_plain_text_definition_list() {
        let doc = Node::with_children(
            NodeKind::DefinitionList,
            vec![Node::with_children(
                NodeKind::DefinitionListItem,
                vec![
                    Node::with_children(
                        NodeKind::Term,
                        vec![Node::text("Artificial intelligence (AI)")],
                    ),
                    Node::with_children(
                        NodeKind::Definition,
                        vec![Node::paragraph(vec![Node::text("Machines that think.")])],
                    ),
                ],
            )],
        );
        assert_eq!(
            render_document::<PlainText>(&doc),
            "Artificial intelligence (AI)\n    Machines that think."
        );
    }

    #[test]
    fn test_latex_document_wraps_body() {
        let mut config = ArticleConfig::default();
        config.project.title = "On Crabs".to_string();
        config.project.author = "F. Errís".to_string();
        config.latex.dark = true;

        let out = LatexDocument::new(&config)
            .with_abstract("Short & sweet.")
            .render("Body.", true);

        assert!(out.starts_with("\\documentclass[a4paper,11pt]{article}\n"));
        assert!(out.contains("\\usepackage{wrapfig}\n"));
        assert!(out.contains("\\pagecolor{black}\n\\color{white}\n"));
        assert!(out.contains("\\title{On Crabs}\n\\author{F. Errís}\n"));
        assert!(out.contains("\\begin{abstract}\nShort \\& sweet.\n\\end{abstract}"));
        assert!(out.contains("\\bibliographystyle{unsrt}\n\\bibliography{bibliography}\n"));
        assert!(out.ends_with("\\end{document}\n"));
    }

    #[test]
    fn test_latex_document_without_citations() {
        let config = ArticleConfig::default();
        let out = LatexDocument::new(&config).render("Body.", false);
        assert!(!out.contains("\\bibliography"));
        assert!(!out.contains("\\maketitle"));
    }
}
