use clap::{Parser, Subcommand, ValueEnum};
use rsta_core::{ArticleConfig, BuildState};
use rsta_processor::linter::Report;
use rsta_processor::{
    render_document, rst_to_text, Article, DescriptionResolver, FileReport, LanguageToolClient,
    Latex, Linter, OfflineSummarizer, PlainText, Resolver, RstParser, Summarizer,
    WikipediaSummarizer,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build doc.tex from the project sources
    Build {
        /// Project directory holding article.yaml
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Source directory (default: <project>/source)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output directory (default: <project>/build)
        #[arg(long)]
        build: Option<PathBuf>,

        /// Never fetch descriptions; only explicit and cached ones are used
        #[arg(long)]
        offline: bool,

        /// Skip linting even if enabled in article.yaml
        #[arg(long)]
        no_lint: bool,
    },
    /// Lint sources for syntax and language problems
    Lint {
        /// Files to lint (default: every project source)
        files: Vec<PathBuf>,

        /// Project directory holding article.yaml
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Only run the syntax checks
        #[arg(long)]
        syntax_only: bool,

        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Print the plain text, rendering or tree of one source
    Extract {
        path: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print the parsed document tree as JSON
        #[arg(long)]
        tree: bool,
    },
    /// Generate JSON schema for article.yaml
    #[cfg(feature = "schema")]
    Schema,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Format {
    /// Text as sent to the grammar checker
    Text,
    Latex,
    Plain,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            project,
            source,
            build,
            offline,
            no_lint,
        } => {
            let config = load_config(&project);
            let source_dir = source.unwrap_or_else(|| project.join("source"));
            let build_dir = build.unwrap_or_else(|| project.join("build"));

            let summarizer: Box<dyn Summarizer> = if offline {
                Box::new(OfflineSummarizer)
            } else {
                let timeout = Duration::from_secs(config.definitions.timeout_secs);
                match WikipediaSummarizer::new(timeout) {
                    Ok(s) => Box::new(s),
                    Err(e) => fail(format!("Error creating HTTP client: {}", e)),
                }
            };
            let article = Article::new(config, summarizer).with_root(&project);

            let result = if article.config().linter.enabled && !no_lint {
                let mut linter = make_linter(article.config());
                article
                    .lint_and_build(&source_dir, &build_dir, &mut linter)
                    .map(|(output, reports)| {
                        print_reports(&reports);
                        output
                    })
            } else {
                article.build(&source_dir, &build_dir)
            };

            match result {
                Ok(output) => {
                    let report = &output.report;
                    log::info!(
                        "{} sources, {} abbreviations, {} citations, {} glossaries",
                        output.sources.len(),
                        report.abbreviations,
                        report.citations,
                        report.term_lists
                    );
                    if !report.unresolved.is_empty() {
                        log::warn!("undefined terms: {}", report.unresolved.join(", "));
                    }
                    println!("Generated LaTeX at: {}", output.tex_path.display());
                }
                Err(e) => fail(format!("Error building article: {}", e)),
            }
        }
        Commands::Lint {
            files,
            project,
            syntax_only,
            format,
        } => {
            let config = load_config(&project);
            let files = if files.is_empty() {
                let article = Article::new(config.clone(), OfflineSummarizer).with_root(&project);
                match article.collect_sources(&project.join("source")) {
                    Ok(s) => s,
                    Err(e) => fail(e),
                }
            } else {
                files
            };

            let mut linter = make_linter(&config);
            let mut reports = Vec::new();
            for path in files {
                let content = match fs::read_to_string(&path) {
                    Ok(c) => c,
                    Err(e) => fail(format!("Error reading {}: {}", path.display(), e)),
                };
                let syntax = linter.lint_syntax(&content).to_vec();
                let language = if syntax_only {
                    Vec::new()
                } else {
                    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                    match linter.lint_language(&content, extension) {
                        Ok(errors) => errors.to_vec(),
                        Err(e) => fail(format!("Error checking {}: {}", path.display(), e)),
                    }
                };
                reports.push(FileReport {
                    path,
                    syntax,
                    language,
                });
            }

            match format {
                ReportFormat::Text => print_reports(&reports),
                ReportFormat::Json => match serde_json::to_string_pretty(&reports) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(e),
                },
            }
            if reports.iter().any(|r| !r.is_clean()) {
                std::process::exit(1);
            }
        }
        Commands::Extract { path, format, tree } => {
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => fail(format!("Error reading file: {}", e)),
            };

            if tree {
                let doc = match format {
                    Format::Text => RstParser::plain().parse_standalone(&content),
                    _ => RstParser::article().parse_standalone(&content),
                };
                match serde_json::to_string_pretty(&doc) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(e),
                }
                return;
            }

            match format {
                Format::Text => println!("{}", rst_to_text(&content)),
                Format::Latex | Format::Plain => {
                    let mut state = BuildState::default();
                    let mut doc = RstParser::article().parse(&content, &mut state);
                    let cache_dir = path
                        .parent()
                        .map(|p| p.join("definitions"))
                        .unwrap_or_else(|| PathBuf::from("definitions"));
                    let descriptions = DescriptionResolver::new(OfflineSummarizer, cache_dir);
                    let resolver = Resolver::new(descriptions);
                    if let Err(e) = resolver.resolve(&mut doc, &mut state) {
                        fail(format!("Error resolving references: {}", e));
                    }
                    let rendered = match format {
                        Format::Latex => render_document::<Latex>(&doc),
                        _ => render_document::<PlainText>(&doc),
                    };
                    println!("{}", rendered);
                }
            }
        }
        #[cfg(feature = "schema")]
        Commands::Schema => {
            let schema = schemars::schema_for!(ArticleConfig);
            match serde_json::to_string_pretty(&schema) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(e),
            }
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn load_config(project: &Path) -> ArticleConfig {
    match ArticleConfig::load_from_project(project) {
        Ok(config) => config,
        Err(e) => fail(format!("Error loading configuration: {}", e)),
    }
}

fn make_linter(config: &ArticleConfig) -> Linter<LanguageToolClient> {
    let timeout = Duration::from_secs(config.linter.timeout_secs);
    let client = match LanguageToolClient::new(config.linter.server.clone(), timeout) {
        Ok(c) => c,
        Err(e) => fail(format!("Error creating HTTP client: {}", e)),
    };
    let mut linter = Linter::new(client, config.linter.language.clone())
        .with_max_line_length(config.linter.max_line_length);
    linter.add_custom_words(&config.linter.custom_words);
    linter
}

fn print_reports(reports: &[FileReport]) {
    for report in reports {
        if report.is_clean() {
            continue;
        }
        println!("== {} ==", report.path.display());
        print!(
            "{}",
            Report {
                syntax: &report.syntax,
                language: &report.language,
            }
        );
    }
}
