//! Subcommand implementations. Each writes its report to `out`.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tscat_i18n::{
    CatalogOptions, CatalogStats, CoverageReport, Issue, NumerusRule, Severity, TranslationCatalog,
    TranslatorChain, TsDocument, check_document_with, locate_catalog, placeholder,
};

use crate::config::CliConfig;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// Catalogs to consult; later files take precedence.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long)]
    pub context: String,

    #[arg(long)]
    pub source: String,

    /// Disambiguation comment.
    #[arg(long)]
    pub comment: Option<String>,

    /// Plural count substituted for `%n`.
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Values for `%1`, `%2`, ... in order.
    #[arg(long = "arg")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also list per-context coverage.
    #[arg(long)]
    pub contexts: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Fail on warnings too.
    #[arg(long = "warnings-as-errors")]
    pub warnings_as_errors: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DumpArgs {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct LocateArgs {
    pub dir: PathBuf,

    #[arg(long, default_value = "qt")]
    pub prefix: String,

    #[arg(long)]
    pub locale: String,
}

pub fn run_lookup(args: LookupArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let expected = placeholder::arg_indices(&args.source)
        .last()
        .map_or(0, |&index| usize::from(index));
    if args.args.len() > expected {
        return Err(CliError::invalid(format!(
            "{} --arg value(s) given, but the source uses {expected} argument placeholder(s)",
            args.args.len()
        )));
    }

    let options: CatalogOptions = config.catalog;
    let mut chain = TranslatorChain::new();
    for file in &args.files {
        chain.install(TranslationCatalog::load_with(file, &options)?);
    }
    let comment = args.comment.as_deref();
    let text = match args.count {
        Some(count) => chain.translate_plural(&args.context, &args.source, comment, count),
        None => chain
            .translate(&args.context, &args.source, comment)
            .to_string(),
    };
    let text = if args.args.is_empty() {
        text
    } else {
        let values: Vec<&str> = args.args.iter().map(String::as_str).collect();
        placeholder::arg(&text, &values)
    };
    writeln!(out, "{text}")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct FileStats<'a> {
    path: &'a Path,
    stats: CatalogStats,
    coverage: CoverageReport,
}

pub fn run_stats(args: StatsArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let options: CatalogOptions = config.catalog;
    let mut reports = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let catalog = TranslationCatalog::load_with(file, &options)?;
        reports.push(FileStats {
            path: file,
            stats: catalog.stats(),
            coverage: catalog.coverage_report(),
        });
    }

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
        return Ok(());
    }
    for report in &reports {
        let stats = &report.stats;
        writeln!(
            out,
            "{}: {} {}/{} translated ({:.1}%), {} unfinished, {} numerus, {} contexts",
            report.path.display(),
            report.coverage.language.as_deref().unwrap_or("-"),
            stats.translated,
            stats.messages,
            report.coverage.coverage_percent,
            stats.unfinished,
            stats.numerus,
            stats.contexts,
        )?;
        if args.contexts {
            for context in &report.coverage.contexts {
                writeln!(
                    out,
                    "  {}: {}/{} ({:.1}%)",
                    context.context, context.translated, context.total, context.coverage_percent
                )?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct FileIssues<'a> {
    path: &'a Path,
    issues: Vec<Issue>,
}

pub fn run_check(args: CheckArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let rule = config.catalog.numerus_rule;
    let mut results = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let document = TsDocument::from_path(file)?;
        let rule = rule.or_else(|| {
            document
                .language
                .as_deref()
                .map(NumerusRule::for_locale)
        });
        results.push(FileIssues {
            path: file,
            issues: check_document_with(&document, rule),
        });
    }

    let issues = || results.iter().flat_map(|r| r.issues.iter());
    let errors = issues()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warnings = issues()
        .filter(|i| i.severity == Severity::Warning)
        .count();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
    } else {
        for result in &results {
            for issue in &result.issues {
                writeln!(out, "{}: {issue}", result.path.display())?;
            }
        }
    }

    let strict = args.warnings_as_errors || config.check.warnings_as_errors;
    if errors > 0 || (strict && warnings > 0) {
        return Err(CliError::CheckFailed { errors, warnings });
    }
    Ok(())
}

pub fn run_dump(args: DumpArgs, out: &mut dyn Write) -> Result<()> {
    let document = TsDocument::from_path(&args.file)?;
    for entry in document.entries() {
        serde_json::to_writer(&mut *out, &entry)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn run_locate(args: LocateArgs, out: &mut dyn Write) -> Result<()> {
    let found = locate_catalog(&args.dir, &args.prefix, &args.locale).ok_or_else(|| {
        CliError::NotFound {
            dir: args.dir.clone(),
            locale: args.locale.clone(),
        }
    })?;
    writeln!(out, "{}", found.display())?;
    Ok(())
}
