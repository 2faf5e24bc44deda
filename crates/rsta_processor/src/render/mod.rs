/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Rendering of resolved document trees.

pub mod document;
pub mod format;
pub mod latex;
pub mod plain;

pub use document::{has_citations, render_document, LatexDocument};
pub use format::OutputFormat;
pub use latex::Latex;
pub use plain::PlainText;
