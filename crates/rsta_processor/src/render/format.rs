/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Output format trait for pluggable renderers.

use rsta_core::{Figure, SystemLevel};

/// Trait for defining how document nodes are written in a specific format.
///
/// The document walker in [`super::document`] decides structure (which nodes
/// are blocks, how children are grouped); implementations only decide markup.
pub trait OutputFormat: Default + Clone {
    /// The type used for intermediate rendered content.
    type Output;

    /// Convert a raw string into the format's output type.
    ///
    /// The implementation should handle any necessary character escaping
    /// required by the target format.
    fn text(&self, s: &str) -> Self::Output;

    /// Join multiple outputs into a single output using a delimiter.
    fn join(&self, items: Vec<Self::Output>, delimiter: &str) -> Self::Output;

    /// Convert the intermediate output into the final result string.
    fn finish(&self, output: Self::Output) -> String;

    /// Whether an output holds nothing worth emitting.
    fn is_empty(&self, output: &Self::Output) -> bool;

    /// Render content with emphasis (typically italics).
    fn emph(&self, content: Self::Output) -> Self::Output;

    /// Render content with strong emphasis (typically bold).
    fn strong(&self, content: Self::Output) -> Self::Output;

    /// Inline code. `code` is raw source text.
    fn literal(&self, code: &str) -> Self::Output;

    /// A preformatted block. `code` is raw source text.
    fn literal_block(&self, code: &str) -> Self::Output;

    /// A section heading at `depth` (1 = top level).
    fn heading(&self, depth: usize, title: Self::Output) -> Self::Output;

    fn paragraph(&self, content: Self::Output) -> Self::Output;

    fn bullet_list(&self, items: Vec<Self::Output>) -> Self::Output;

    /// A glossary-style list of `(term, definition)` pairs.
    fn definition_list(&self, items: Vec<(Self::Output, Self::Output)>) -> Self::Output;

    /// A bibliography citation for `key`.
    fn citation(&self, key: &str) -> Self::Output;

    /// An anchor other parts of the document can refer to.
    fn target(&self, name: &str) -> Self::Output;

    /// `pages` forced page breaks.
    fn new_page(&self, pages: usize) -> Self::Output;

    fn image(&self, uri: &str) -> Self::Output;

    /// A figure that text flows around.
    fn floating_figure(&self, figure: &Figure, caption: Self::Output) -> Self::Output;

    /// A diagnostic left in the tree by the front-end, kept visible.
    fn diagnostic(&self, level: SystemLevel, message: &str, line: Option<usize>) -> Self::Output;
}
