//! Validation workflow.
//!
//! Sequencing is fixed: manifest, placement, usage, report. Only a malformed
//! manifest or config stops a run; everything else narrows the report.
use crate::cli::ValidateArgs;
use crate::config::{self, ConfigOverrides, ScanConfig};
use crate::manifest::read_declared_assets;
use crate::placement::check_placement;
use crate::report::{build_report, no_declaration_report, AssetSummary, SummaryStatus};
use crate::sink::{ConsoleOutput, ConsoleProgress, OutputSink, ProgressSink};
use crate::usage::{scan_usage, SourceCorpus};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Inputs for one validation run.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// Active project root; `None` means there is nothing to validate.
    pub project_root: Option<PathBuf>,
    pub config: ScanConfig,
}

/// What a run concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoRoot,
    NoDeclaration,
    Completed {
        declared: Vec<String>,
        missing: Vec<String>,
        unused: Vec<String>,
    },
}

impl Outcome {
    pub fn has_findings(&self) -> bool {
        match self {
            Outcome::Completed { missing, unused, .. } => {
                !missing.is_empty() || !unused.is_empty()
            }
            Outcome::NoRoot | Outcome::NoDeclaration => false,
        }
    }
}

/// Run one validation pass against the injected progress and output sinks.
///
/// The output sink is cleared before anything is written and shown once the
/// report is complete. A `NoRoot` run touches neither sink.
pub fn validate_assets(
    request: &ValidationRequest,
    progress: &mut dyn ProgressSink,
    output: &mut dyn OutputSink,
) -> Result<Outcome> {
    let Some(root) = request.project_root.as_deref() else {
        tracing::debug!("no project root, nothing to validate");
        return Ok(Outcome::NoRoot);
    };
    let manifest_rel = request.config.manifest.as_str();

    let declared = read_declared_assets(root, manifest_rel)?;
    output.clear();

    let declared = match declared {
        Some(declared) if !declared.is_empty() => declared,
        _ => {
            tracing::info!(manifest = manifest_rel, "no assets declared");
            emit(output, no_declaration_report(manifest_rel).lines());
            output.show();
            return Ok(Outcome::NoDeclaration);
        }
    };

    progress.report("Starting asset validation...", None);

    progress.report("Checking asset placements...", None);
    let missing = check_placement(root, &declared);

    progress.report("Checking asset usage...", None);
    let corpus = SourceCorpus::discover(
        root,
        &request.config.extensions,
        &request.config.exclude_dirs,
    );
    let unused = scan_usage(&declared, &corpus, progress);

    tracing::info!(
        declared = declared.len(),
        missing = missing.len(),
        unused = unused.len(),
        files = corpus.files().len(),
        "asset validation complete"
    );

    emit(output, build_report(&declared, &missing, &unused).lines());
    output.show();

    Ok(Outcome::Completed {
        declared,
        missing,
        unused,
    })
}

fn emit(output: &mut dyn OutputSink, lines: &[String]) {
    for line in lines {
        output.append_line(line);
    }
}

/// Pick the active root: the first candidate, when it is a directory.
///
/// With no candidates the current directory is used.
pub fn resolve_project_root(candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    let candidate = match candidates.first() {
        Some(candidate) => candidate.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };
    if !candidate.is_dir() {
        tracing::debug!(path = %candidate.display(), "project root is not a directory");
        return Ok(None);
    }
    let root = candidate
        .canonicalize()
        .with_context(|| format!("resolve project root {}", candidate.display()))?;
    Ok(Some(root))
}

/// Load `.assetval.json` (when there is a root) and layer CLI flags on top.
pub fn resolve_config(root: Option<&Path>, overrides: &ConfigOverrides) -> Result<ScanConfig> {
    let loaded = match root {
        Some(root) => config::load_config(root)?,
        None => ScanConfig::default(),
    };
    let config = config::apply_overrides(loaded, overrides);
    config::validate_config(&config).context("invalid scan config")?;
    Ok(config)
}

/// Entry point for `assetval validate`.
pub fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let Some(project_root) = resolve_project_root(&args.projects)? else {
        return Ok(ExitCode::SUCCESS);
    };
    let overrides = ConfigOverrides {
        manifest: args.manifest.clone(),
        extensions: args.extensions.clone(),
        exclude_dirs: args.exclude.clone(),
    };
    let config = resolve_config(Some(&project_root), &overrides)?;
    let request = ValidationRequest {
        project_root: Some(project_root),
        config,
    };

    let mut progress = ConsoleProgress::new(args.verbose);
    let mut output = ConsoleOutput::new(!args.json);
    let outcome = validate_assets(&request, &mut progress, &mut output)?;

    if args.json {
        if let Some(summary) = summarize(&request, &outcome) {
            let text =
                serde_json::to_string_pretty(&summary).context("serialize asset summary")?;
            println!("{text}");
        }
    }

    if args.strict && outcome.has_findings() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Machine-readable view of an outcome; `None` for a run without a root.
pub fn summarize(request: &ValidationRequest, outcome: &Outcome) -> Option<AssetSummary> {
    let root = request.project_root.as_deref()?;
    let manifest = request.config.manifest.clone();
    let project_root = root.display().to_string();
    let summary = match outcome {
        Outcome::NoRoot => return None,
        Outcome::NoDeclaration => AssetSummary {
            project_root,
            manifest,
            status: SummaryStatus::NoDeclaration,
            declared: Vec::new(),
            missing: Vec::new(),
            unused: Vec::new(),
        },
        Outcome::Completed {
            declared,
            missing,
            unused,
        } => AssetSummary {
            project_root,
            manifest,
            status: if outcome.has_findings() {
                SummaryStatus::Findings
            } else {
                SummaryStatus::Clean
            },
            declared: declared.clone(),
            missing: missing.clone(),
            unused: unused.clone(),
        },
    };
    Some(summary)
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
