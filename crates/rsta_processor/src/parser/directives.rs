/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Directive parsing and the article directive handlers.

use super::{join_lines, Context, Extensions, Line};
use rsta_core::{Definition, Figure, FigureAlign, Node, NodeKind, Placeholder, SystemLevel};
use std::fmt;
use winnow::ascii::space0;
use winnow::combinator::{delimited, terminated};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{rest, take_while};

/// A parsed directive block.
#[derive(Debug, Clone)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub argument: &'a str,
    pub options: Vec<(&'a str, &'a str)>,
    pub content: Vec<Line<'a>>,
    /// Line number of the `.. name::` line.
    pub line: usize,
    /// Original source of the whole block.
    pub source: String,
}

impl<'a> Directive<'a> {
    /// Split a dedented directive body into options and content.
    pub fn new(
        name: &'a str,
        argument: &'a str,
        body: &[Line<'a>],
        line: usize,
        block: &[Line<'_>],
    ) -> Self {
        let mut options = Vec::new();
        let mut idx = 0;
        while idx < body.len() {
            let mut input = body[idx].text;
            match option_line(&mut input) {
                Ok(option) => options.push(option),
                Err(_) => break,
            }
            idx += 1;
        }
        while idx < body.len() && body[idx].text.is_empty() {
            idx += 1;
        }

        Self {
            name,
            argument,
            options,
            content: body[idx..].to_vec(),
            line,
            source: join_lines(block),
        }
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// A diagnostic carrying the directive source, as a stock reST reader reports it.
    pub fn error(&self, message: impl Into<String>) -> Node {
        Node::with_children(
            NodeKind::SystemMessage {
                level: SystemLevel::Error,
                message: message.into(),
                line: Some(self.line),
            },
            vec![Node::with_children(
                NodeKind::LiteralBlock,
                vec![Node::text(self.source.clone())],
            )],
        )
    }

    /// Diagnostic for an option whose value does not parse.
    pub fn invalid_option(&self, option: &str, value: impl fmt::Display) -> Node {
        self.error(format!(
            "Error in \"{}\" directive:\ninvalid option value: (option: \"{}\"; value: {}).",
            self.name, option, value
        ))
    }
}

fn directive_name<'a>(input: &mut &'a str) -> winnow::Result<&'a str, ContextError> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '-' || c == '_').parse_next(input)
}

/// Parse `name:: argument` (the text after `.. `).
pub fn parse_header(text: &str) -> Option<(&str, &str)> {
    let mut input = text;
    let name = terminated(directive_name, "::")
        .parse_next(&mut input)
        .ok()?;
    if !input.is_empty() && !input.starts_with(char::is_whitespace) {
        return None;
    }
    Some((name, input.trim()))
}

/// Parse `:name: value`.
fn option_line<'a>(input: &mut &'a str) -> winnow::Result<(&'a str, &'a str), ContextError> {
    let name = delimited(
        ':',
        take_while(1.., |c: char| c != ':' && !c.is_whitespace()),
        ':',
    )
    .parse_next(input)?;
    let _ = space0.parse_next(input)?;
    let value: &str = rest.parse_next(input)?;
    Ok((name, value.trim()))
}

impl Context<'_> {
    pub(super) fn run_directive(&mut self, directive: Directive) -> Vec<Node> {
        match (directive.name, self.extensions) {
            ("new-def", Extensions::Article) => self.new_definition(&directive),
            ("definitions", Extensions::Article) => {
                vec![Node::placeholder(Placeholder::term_list())]
            }
            ("new-page", Extensions::Article) => self.new_page(&directive),
            // Read by the build session to order sources; renders nothing.
            ("toctree", Extensions::Article) => Vec::new(),
            ("floating-figure", Extensions::Article) => self.floating_figure(&directive),
            (name, _) => vec![directive.error(format!("Unknown directive type \"{}\".", name))],
        }
    }

    fn new_definition(&mut self, directive: &Directive) -> Vec<Node> {
        if directive.argument.is_empty() {
            return vec![directive.error(
                "Error in \"new-def\" directive:\n1 argument(s) required, 0 supplied.",
            )];
        }

        match Definition::from_options(directive.options.iter().copied()) {
            Ok(definition) => {
                log::debug!("registered definition {}", directive.argument);
                self.state.registry.register(directive.argument, definition);
                Vec::new()
            }
            Err(e) => vec![directive.error(format!("Error in \"new-def\" directive:\n{}.", e))],
        }
    }

    fn new_page(&mut self, directive: &Directive) -> Vec<Node> {
        let pages = match directive.option("pages") {
            None => 1,
            Some(value) => match value.parse::<usize>() {
                Ok(n) => n,
                Err(_) => return vec![directive.invalid_option("pages", format!("\"{}\"", value))],
            },
        };
        vec![Node::new(NodeKind::NewPage { pages })]
    }

    fn floating_figure(&mut self, directive: &Directive) -> Vec<Node> {
        if directive.argument.is_empty() {
            return vec![directive.error(
                "Error in \"floating-figure\" directive:\n1 argument(s) required, 0 supplied.",
            )];
        }

        for (name, _) in &directive.options {
            if !matches!(*name, "name" | "width" | "height" | "align") {
                return vec![directive.error(format!(
                    "Error in \"floating-figure\" directive:\nunknown option: \"{}\".",
                    name
                ))];
            }
        }

        let align = match directive.option("align") {
            None => FigureAlign::Center,
            Some(value) => match value.parse::<FigureAlign>() {
                Ok(align) => align,
                Err(e) => return vec![directive.invalid_option("align", e)],
            },
        };

        let figure = Figure {
            uri: directive.argument.to_string(),
            name: directive.option("name").map(str::to_string),
            width: directive.option("width").map(str::to_string),
            height: directive.option("height").map(str::to_string),
            align,
        };

        let mut messages = Vec::new();
        let caption_text = join_lines(&directive.content);
        let caption = self.inlines(&caption_text, directive.line, &mut messages);

        let mut nodes = Vec::new();
        if let Some(name) = &figure.name {
            nodes.push(Node::new(NodeKind::Target { name: name.clone() }));
        }
        let uri = figure.uri.clone();
        nodes.push(Node::with_children(
            NodeKind::FloatingFigure(figure),
            vec![
                Node::new(NodeKind::Image { uri }),
                Node::with_children(NodeKind::Caption, caption),
            ],
        ));
        nodes.extend(messages);
        nodes
    }
}
