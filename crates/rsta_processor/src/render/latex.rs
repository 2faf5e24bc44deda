/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! LaTeX output format.

use super::format::OutputFormat;
use rsta_core::{Figure, FigureAlign, SystemLevel};

/// LaTeX renderer.
#[derive(Debug, Clone, Default)]
pub struct Latex;

/// Escape LaTeX special characters.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

impl OutputFormat for Latex {
    type Output = String;

    fn text(&self, s: &str) -> Self::Output {
        escape(s)
    }

    fn join(&self, items: Vec<Self::Output>, delimiter: &str) -> Self::Output {
        items.join(delimiter)
    }

    fn finish(&self, output: Self::Output) -> String {
        output
    }

    fn is_empty(&self, output: &Self::Output) -> bool {
        output.trim().is_empty()
    }

    fn emph(&self, content: Self::Output) -> Self::Output {
        format!(r"\textit{{{}}}", content)
    }

    fn strong(&self, content: Self::Output) -> Self::Output {
        format!(r"\textbf{{{}}}", content)
    }

    fn literal(&self, code: &str) -> Self::Output {
        format!(r"\texttt{{{}}}", escape(code))
    }

    fn literal_block(&self, code: &str) -> Self::Output {
        format!("\\begin{{verbatim}}\n{}\n\\end{{verbatim}}", code)
    }

    fn heading(&self, depth: usize, title: Self::Output) -> Self::Output {
        let command = match depth {
            0 | 1 => "section",
            2 => "subsection",
            3 => "subsubsection",
            _ => "paragraph",
        };
        format!(r"\{}{{{}}}", command, title)
    }

    fn paragraph(&self, content: Self::Output) -> Self::Output {
        content
    }

    fn bullet_list(&self, items: Vec<Self::Output>) -> Self::Output {
        let mut out = String::from("\\begin{itemize}\n");
        for item in items {
            out.push_str(&format!("\\item {}\n", item));
        }
        out.push_str("\\end{itemize}");
        out
    }

    fn definition_list(&self, items: Vec<(Self::Output, Self::Output)>) -> Self::Output {
        let mut out = String::from("\\begin{description}\n");
        for (term, definition) in items {
            out.push_str(&format!("\\item[{}] {}\n", term, definition));
        }
        out.push_str("\\end{description}");
        out
    }

    fn citation(&self, key: &str) -> Self::Output {
        format!(r"\cite{{{}}}", key)
    }

    fn target(&self, name: &str) -> Self::Output {
        format!(r"\label{{{}}}", name)
    }

    fn new_page(&self, pages: usize) -> Self::Output {
        vec![r"\newpage"; pages].join("\n")
    }

    fn image(&self, uri: &str) -> Self::Output {
        format!(r"\includegraphics{{{}}}", uri)
    }

    fn floating_figure(&self, figure: &Figure, caption: Self::Output) -> Self::Output {
        wrapfigure(figure, &caption)
    }

    fn diagnostic(&self, level: SystemLevel, message: &str, line: Option<usize>) -> Self::Output {
        let text = match line {
            Some(line) => format!("({}) line {}: {}", level, line, message),
            None => format!("({}) {}", level, message),
        };
        self.literal(&text)
    }
}

/// Placement code of the `wrapfigure` environment.
fn placement(align: FigureAlign) -> char {
    match align {
        FigureAlign::Right => 'r',
        FigureAlign::Left | FigureAlign::Center => 'l',
    }
}

/// `N%` or a bare number as a fraction of the line width.
fn width_ratio(width: &str) -> Option<f64> {
    match width.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
        None => width.parse::<f64>().ok(),
    }
}

/// A `wrapfig` environment for a floating figure.
///
/// The wrap width comes from the figure width; the image always fills it.
/// Widths that are not a ratio (e.g. `5cm`) are passed through verbatim.
pub fn wrapfigure(figure: &Figure, caption: &str) -> String {
    let width = figure.width.as_deref().map(str::trim).unwrap_or("100%");
    let height = figure
        .height
        .as_deref()
        .map(|h| format!(",height={}", h))
        .unwrap_or_default();

    let (wrap_width, options) = match width_ratio(width) {
        Some(ratio) => (
            format!(r"{:.2}\linewidth", ratio),
            format!(r"width=\linewidth{}", height),
        ),
        None => (width.to_string(), format!("width={}{}", width, height)),
    };

    let side = placement(figure.align);
    let mut out = format!("\\begin{{wrapfigure}}{{{}}}{{{}}}\n", side, wrap_width);
    if figure.align == FigureAlign::Center {
        out.push_str("\\centering\n");
    }
    if figure.uri.is_empty() {
        out.push_str("% Missing image URI\n");
    } else {
        out.push_str(&format!("\\includegraphics[{}]{{{}}}\n", options, figure.uri));
    }

    let mut caption = caption.trim().to_string();
    if let Some(name) = &figure.name {
        if !caption.is_empty() {
            caption.push(' ');
        }
        caption.push_str(&format!(r"\label{{figure:{}}}", name));
    }
    out.push_str(&format!("\\caption{{{}}}\n", caption));
    out.push_str("\\end{wrapfigure}");
    out
}
