/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Article build session.
//!
//! A build reads every source with one [`BuildState`], resolves references
//! only once all sources are read, and writes a single `doc.tex`.

use crate::description::DescriptionResolver;
use crate::error::ProcessorError;
use crate::linter::{GrammarChecker, LanguageError, Linter, SyntaxError};
use crate::parser::directives::parse_header;
use crate::parser::RstParser;
use crate::render::{has_citations, render_document, Latex, LatexDocument};
use crate::resolver::{ResolveReport, Resolver};
use crate::summary::Summarizer;
use rsta_core::{ArticleConfig, BuildState, Node};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the generated LaTeX file inside the build directory.
pub const OUTPUT_FILE: &str = "doc.tex";

const INDEX_FILE: &str = "index.rst";

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub tex_path: PathBuf,
    /// Sources in the order they were read.
    pub sources: Vec<PathBuf>,
    pub report: ResolveReport,
}

/// Lint results for one source file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub syntax: Vec<SyntaxError>,
    pub language: Vec<LanguageError>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.syntax.is_empty() && self.language.is_empty()
    }
}

/// A project of article sources.
#[derive(Debug, Clone)]
pub struct Article<S> {
    config: ArticleConfig,
    summarizer: S,
    /// Directory relative configured paths are resolved against.
    root: PathBuf,
}

impl<S: Summarizer> Article<S> {
    pub fn new(config: ArticleConfig, summarizer: S) -> Self {
        Self {
            config,
            summarizer,
            root: PathBuf::from("."),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn config(&self) -> &ArticleConfig {
        &self.config
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.config.definitions.cache_dir)
    }

    /// Sources of the project in build order.
    ///
    /// The definitions file comes first so that every later document sees a
    /// complete registry while reading. Then `index.rst` and its toctree
    /// entries, or every `.rst` file sorted by path when there is no index.
    pub fn collect_sources(&self, source_dir: &Path) -> Result<Vec<PathBuf>, ProcessorError> {
        let mut sources: Vec<PathBuf> = Vec::new();
        let mut push = |path: PathBuf| {
            if !sources.contains(&path) {
                sources.push(path);
            }
        };

        let definitions = source_dir.join(&self.config.definitions.file);
        if definitions.is_file() {
            push(definitions);
        }

        let index = source_dir.join(INDEX_FILE);
        if index.is_file() {
            let content = fs::read_to_string(&index)?;
            push(index);
            for entry in toctree_entries(&content) {
                let mut path = source_dir.join(&entry);
                if path.extension().is_none() {
                    path.set_extension("rst");
                }
                if path.is_file() {
                    push(path);
                } else {
                    log::warn!("toctree entry \"{}\" not found", entry);
                }
            }
        } else {
            let mut found: Vec<PathBuf> = WalkDir::new(source_dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "rst"))
                .collect();
            found.sort();
            for path in found {
                push(path);
            }
        }

        Ok(sources)
    }

    /// Parse every source with one session state and resolve references.
    pub fn read(&self, sources: &[PathBuf]) -> Result<(Vec<Node>, ResolveReport), ProcessorError> {
        let parser = RstParser::article();
        let mut state = BuildState::default();

        let mut docs = Vec::with_capacity(sources.len());
        for path in sources {
            log::debug!("reading {}", path.display());
            let source = fs::read_to_string(path)?;
            docs.push(parser.parse(&source, &mut state));
        }
        log::debug!("{} definitions registered", state.registry.len());

        let descriptions = DescriptionResolver::new(&self.summarizer, self.cache_dir())
            .with_default_language(self.config.definitions.language.clone());
        let resolver = Resolver::new(descriptions);

        let mut report = ResolveReport::default();
        for doc in &mut docs {
            report.merge(resolver.resolve(doc, &mut state)?);
        }
        Ok((docs, report))
    }

    /// Build `<build_dir>/doc.tex` from the sources in `source_dir`.
    pub fn build(
        &self,
        source_dir: &Path,
        build_dir: &Path,
    ) -> Result<BuildOutput, ProcessorError> {
        let sources = self.collect_sources(source_dir)?;
        if sources.is_empty() {
            log::warn!("no sources found in {}", source_dir.display());
        }
        let (docs, report) = self.read(&sources)?;

        let body = docs
            .iter()
            .map(render_document::<Latex>)
            .filter(|rendered| !rendered.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        let cites = docs.iter().any(has_citations);

        let mut document = LatexDocument::new(&self.config);
        if let Some(file) = &self.config.project.abstract_file {
            let path = source_dir.join(file);
            match fs::read_to_string(&path) {
                Ok(text) => document = document.with_abstract(text),
                Err(e) => log::warn!("abstract {} not read: {}", path.display(), e),
            }
        }

        fs::create_dir_all(build_dir)?;
        let tex_path = build_dir.join(OUTPUT_FILE);
        fs::write(&tex_path, document.render(&body, cites))?;
        log::info!("Generated LaTeX at: {}", tex_path.display());

        Ok(BuildOutput {
            tex_path,
            sources,
            report,
        })
    }

    /// Lint every source, then build. A grammar checker failure aborts the
    /// run before anything is written.
    pub fn lint_and_build<C: GrammarChecker>(
        &self,
        source_dir: &Path,
        build_dir: &Path,
        linter: &mut Linter<C>,
    ) -> Result<(BuildOutput, Vec<FileReport>), ProcessorError> {
        let sources = self.collect_sources(source_dir)?;
        let reports = self.lint(&sources, linter)?;
        let output = self.build(source_dir, build_dir)?;
        Ok((output, reports))
    }

    /// Lint each source. Language checks are skipped for the definitions file,
    /// which holds no prose.
    pub fn lint<C: GrammarChecker>(
        &self,
        sources: &[PathBuf],
        linter: &mut Linter<C>,
    ) -> Result<Vec<FileReport>, ProcessorError> {
        let definitions = self.config.definitions.file.as_path();
        let mut reports = Vec::with_capacity(sources.len());

        for path in sources {
            let content = fs::read_to_string(path)?;
            let syntax = linter.lint_syntax(&content).to_vec();
            let language = if path.ends_with(definitions) {
                Vec::new()
            } else {
                let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                linter.lint_language(&content, extension)?.to_vec()
            };
            reports.push(FileReport {
                path: path.clone(),
                syntax,
                language,
            });
        }

        Ok(reports)
    }
}

/// Entries of every `toctree` directive in `source`, in order.
pub fn toctree_entries(source: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut in_toctree = false;

    for line in source.lines() {
        if let Some(after) = line.strip_prefix(".. ") {
            in_toctree = matches!(parse_header(after.trim_start()), Some(("toctree", _)));
            continue;
        }
        if !in_toctree {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with(char::is_whitespace) {
            in_toctree = false;
            continue;
        }
        let entry = line.trim();
        if !entry.starts_with(':') {
            entries.push(entry.to_string());
        }
    }

    entries
}
