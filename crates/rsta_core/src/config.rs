/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Article project configuration.
//!
//! Loaded from `article.yaml` (or `.json`) at the project root. Every section
//! is optional; a missing file yields [`ArticleConfig::default`].

use crate::error::ConfigError;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub struct ArticleConfig {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub latex: LatexConfig,
    #[serde(default)]
    pub definitions: DefinitionsConfig,
    #[serde(default)]
    pub linter: LinterConfig,
}

/// Title page metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub struct ProjectInfo {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Path to a plain-text abstract, relative to the source directory.
    #[serde(skip_serializing_if = "Option::is_none", rename = "abstract")]
    pub abstract_file: Option<PathBuf>,
}

/// LaTeX output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub struct LatexConfig {
    #[serde(default = "default_document_class")]
    pub document_class: String,
    #[serde(default = "default_paper_size")]
    pub paper_size: String,
    #[serde(default = "default_point_size")]
    pub point_size: String,
    /// White text on a black page.
    #[serde(default)]
    pub dark: bool,
    /// Extra preamble lines appended verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    /// BibTeX database name, without extension.
    #[serde(default = "default_bibliography")]
    pub bibliography: String,
    #[serde(default = "default_bibliography_style")]
    pub bibliography_style: String,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            document_class: default_document_class(),
            paper_size: default_paper_size(),
            point_size: default_point_size(),
            dark: false,
            preamble: None,
            bibliography: default_bibliography(),
            bibliography_style: default_bibliography_style(),
        }
    }
}

/// Glossary and description lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub struct DefinitionsConfig {
    /// Directory holding cached descriptions, one file per search query.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Source file read before every other document.
    #[serde(default = "default_definitions_file")]
    pub file: PathBuf,
    /// Summarization language used when a definition sets none.
    #[serde(default = "default_summary_language")]
    pub language: String,
    /// HTTP timeout for summary lookups, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            file: default_definitions_file(),
            language: default_summary_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Prose linter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub struct LinterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_linter_language")]
    pub language: String,
    /// Base URL of a LanguageTool server.
    #[serde(default = "default_linter_server")]
    pub server: String,
    /// Words never reported as errors (compared case-insensitively).
    #[serde(default)]
    pub custom_words: Vec<String>,
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: default_linter_language(),
            server: default_linter_server(),
            custom_words: Vec::new(),
            max_line_length: default_max_line_length(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_document_class() -> String {
    "article".to_string()
}

fn default_paper_size() -> String {
    "a4paper".to_string()
}

fn default_point_size() -> String {
    "11pt".to_string()
}

fn default_bibliography() -> String {
    "bibliography".to_string()
}

fn default_bibliography_style() -> String {
    "unsrt".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("source/definitions")
}

fn default_definitions_file() -> PathBuf {
    PathBuf::from("definitions.rst")
}

fn default_summary_language() -> String {
    "en".to_string()
}

fn default_linter_language() -> String {
    "en-US".to_string()
}

fn default_linter_server() -> String {
    "http://localhost:8081".to_string()
}

fn default_max_line_length() -> usize {
    79
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl ArticleConfig {
    /// Load a configuration file. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
        let config = match ext {
            "json" => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Load `article.yaml` / `article.json` from `dir`, or defaults when neither exists.
    pub fn load_from_project(dir: &Path) -> Result<Self, ConfigError> {
        for name in ["article.yaml", "article.yml", "article.json"] {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }
}
