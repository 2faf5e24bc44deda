/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! rsta core model
//!
//! Shared data structures for the rsta article toolkit. `rsta_processor` uses
//! them, and any host that wants to build document trees by hand can use them
//! too:
//!
//! - [`Node`] / [`NodeKind`]: the document tree produced by the markup front-end.
//! - [`traverse`]: leaf iteration with predicate-driven subtree skipping.
//! - [`Definition`] and [`TermRegistry`]: the glossary registered by
//!   `new-def` directives.
//! - [`BuildState`]: per-build session state (registry plus seen-sets), passed
//!   explicitly into every pass that needs it.
//! - [`ArticleConfig`]: project configuration loaded from `article.yaml`.
//!
//! # Example
//!
//! ```rust
//! use rsta_core::{BuildState, Definition};
//!
//! let mut state = BuildState::default();
//! state.registry.register(
//!     "AI",
//!     Definition {
//!         short: Some("AI".to_string()),
//!         long: Some("Artificial intelligence".to_string()),
//!         ..Default::default()
//!     },
//! );
//!
//! assert!(state.abbreviations.insert("AI"));
//! assert!(!state.abbreviations.insert("AI"));
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod node;
pub mod registry;
pub mod traverse;

pub use config::{ArticleConfig, DefinitionsConfig, LatexConfig, LinterConfig, ProjectInfo};
pub use definition::{Definition, DefinitionOptionError};
pub use error::ConfigError;
pub use node::{Figure, FigureAlign, Node, NodeKind, Placeholder, PlaceholderKind, SystemLevel};
pub use registry::{BuildState, SeenKeys, TermRegistry};
