/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! rsta Processor
//!
//! This crate turns reStructuredText articles into LaTeX. It parses sources
//! with the article extensions (glossary definitions, first citations,
//! floating figures, page breaks), resolves deferred references once every
//! source has been read, and renders the result. It also reconstructs plain
//! text from markup for grammar checking.
//!
//! # Example
//!
//! ```rust
//! use rsta_core::BuildState;
//! use rsta_processor::{render_document, DescriptionResolver, Latex, OfflineSummarizer, Resolver, RstParser};
//!
//! let source = r#"
//! .. new-def:: AI
//!    :short: AI
//!    :long: Artificial intelligence
//!
//! We study :abbrev:`AI`. Later, :abbrev:`AI` is short.
//! "#;
//!
//! let mut state = BuildState::default();
//! let mut doc = RstParser::article().parse(source, &mut state);
//!
//! let resolver = Resolver::new(DescriptionResolver::new(OfflineSummarizer, "source/definitions"));
//! resolver.resolve(&mut doc, &mut state).unwrap();
//!
//! assert_eq!(
//!     render_document::<Latex>(&doc),
//!     "We study Artificial intelligence (AI). Later, AI is short."
//! );
//! ```

pub mod article;
pub mod description;
pub mod error;
pub mod extractor;
pub mod linter;
pub mod parser;
pub mod render;
pub mod resolver;
pub mod summary;

pub use article::{Article, BuildOutput, FileReport};
pub use description::DescriptionResolver;
pub use error::ProcessorError;
pub use extractor::{extract_text, rst_to_text};
pub use linter::{GrammarChecker, GrammarMatch, LanguageToolClient, Linter};
pub use parser::{Extensions, RstParser};
pub use render::{render_document, Latex, LatexDocument, OutputFormat, PlainText};
pub use resolver::{ResolveReport, Resolver};
pub use summary::{OfflineSummarizer, Summarizer, WikipediaSummarizer};
