/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain text output format.

use super::format::OutputFormat;
use rsta_core::{Figure, SystemLevel};

#[derive(Debug, Default, Clone)]
pub struct PlainText;

impl OutputFormat for PlainText {
    type Output = String;

    fn text(&self, s: &str) -> Self::Output {
        s.to_string()
    }

    fn join(&self, items: Vec<Self::Output>, delimiter: &str) -> Self::Output {
        items.join(delimiter)
    }

    fn finish(&self, output: Self::Output) -> String {
        output
    }

    fn is_empty(&self, output: &Self::Output) -> bool {
        output.is_empty()
    }

    fn emph(&self, content: Self::Output) -> Self::Output {
        if content.is_empty() {
            return content;
        }
        format!("_{}_", content)
    }

    fn strong(&self, content: Self::Output) -> Self::Output {
        if content.is_empty() {
            return content;
        }
        format!("**{}**", content)
    }

    fn literal(&self, code: &str) -> Self::Output {
        format!("`{}`", code)
    }

    fn literal_block(&self, code: &str) -> Self::Output {
        code.lines()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn heading(&self, depth: usize, title: Self::Output) -> Self::Output {
        let underline = if depth <= 1 { '=' } else { '-' };
        let rule: String = std::iter::repeat(underline)
            .take(title.chars().count())
            .collect();
        format!("{}\n{}", title, rule)
    }

    fn paragraph(&self, content: Self::Output) -> Self::Output {
        content
    }

    fn bullet_list(&self, items: Vec<Self::Output>) -> Self::Output {
        items
            .iter()
            .map(|item| format!("- {}", item.replace('\n', "\n  ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn definition_list(&self, items: Vec<(Self::Output, Self::Output)>) -> Self::Output {
        items
            .iter()
            .map(|(term, definition)| {
                let definition = definition.replace('\n', "\n    ");
                format!("{}\n    {}", term, definition)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn citation(&self, key: &str) -> Self::Output {
        format!("[{}]", key)
    }

    fn target(&self, _name: &str) -> Self::Output {
        String::new()
    }

    fn new_page(&self, pages: usize) -> Self::Output {
        "\u{c}".repeat(pages)
    }

    fn image(&self, uri: &str) -> Self::Output {
        format!("[image: {}]", uri)
    }

    fn floating_figure(&self, figure: &Figure, caption: Self::Output) -> Self::Output {
        if caption.is_empty() {
            return self.image(&figure.uri);
        }
        format!("{}\n{}", self.image(&figure.uri), caption)
    }

    fn diagnostic(&self, level: SystemLevel, message: &str, line: Option<usize>) -> Self::Output {
        match line {
            Some(line) => format!("({}) line {}: {}", level, line, message),
            None => format!("({}) {}", level, message),
        }
    }
}
