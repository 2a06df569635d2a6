//! Library interface for the tokensmith CLI
//!
//! Each subcommand has a handler here so integration tests can drive the
//! pipeline without spawning the binary.

pub mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use tokensmith_codegen::{emit_target, ArtifactSet};
use tokensmith_core::{resolve, ResolvedGraph};
use tokensmith_drift::{ChangeSeverity, DriftReport, SeverityPolicy};
use tokensmith_govern::Validator;

pub use config::EngineConfig;

/// Load a document set and resolve every reference to a concrete value.
pub fn resolve_documents<P: AsRef<Path>>(paths: &[P]) -> Result<ResolvedGraph> {
    let graph =
        tokensmith_parser::load_files(paths).context("failed to load token documents")?;
    let resolved = resolve(&graph).context("reference resolution failed")?;
    Ok(resolved)
}

/// Full pipeline: load, resolve, validate, then emit every target.
///
/// Governance errors block emission entirely. Past that gate each target
/// emits independently; one target's failure never corrupts another's
/// output, and without `--fail-fast` the remaining targets still run.
pub async fn handle_build(config_path: &Path, fail_fast: bool) -> Result<()> {
    let config = EngineConfig::load(config_path)?;
    let resolved = resolve_documents(&config.documents)?;

    let validator = Validator::new(&config.targets);
    let report = validator.validate(&resolved);
    for violation in report
        .violations
        .iter()
        .filter(|v| v.severity == tokensmith_govern::Severity::Warning)
    {
        warn!("{violation}");
    }
    if report.has_blocking() {
        eprintln!("{report}");
        bail!(
            "governance failed with {} error(s); nothing was emitted",
            report.error_count()
        );
    }

    let graph = Arc::new(resolved);
    let mut tasks = tokio::task::JoinSet::new();
    for target in config.targets.clone() {
        let graph = Arc::clone(&graph);
        tasks.spawn_blocking(move || {
            let artifacts = emit_target(&graph, &target)
                .with_context(|| format!("target {} failed to emit", target.name))?;
            write_artifacts(&artifacts)
                .with_context(|| format!("target {} failed to write output", target.name))?;
            Ok::<(String, usize), anyhow::Error>((target.name, artifacts.len()))
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined.context("emit task panicked")? {
            Ok((name, count)) => info!(target = %name, artifacts = count, "target written"),
            Err(err) => {
                failed += 1;
                error!("{err:#}");
                if fail_fast {
                    tasks.abort_all();
                    bail!("aborting after first emit failure");
                }
            }
        }
    }
    if failed > 0 {
        bail!("{failed} target(s) failed to emit");
    }
    info!(targets = config.targets.len(), "build complete");
    Ok(())
}

/// Run governance only and print the report. Exits nonzero on errors so
/// CI can gate on it; warnings alone pass.
pub fn handle_check(config_path: &Path, json: bool) -> Result<()> {
    let config = EngineConfig::load(config_path)?;
    let resolved = resolve_documents(&config.documents)?;
    let report = Validator::new(&config.targets).validate(&resolved);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    if report.has_blocking() {
        bail!("governance failed with {} error(s)", report.error_count());
    }
    Ok(())
}

/// Diff two document sets and print the drift report. With a gate
/// severity, exits nonzero when any change is at least that severe.
pub fn handle_diff(
    config_path: Option<&Path>,
    before: &[PathBuf],
    after: &[PathBuf],
    fail_on: Option<ChangeSeverity>,
    json: bool,
) -> Result<()> {
    let policy = match config_path {
        Some(path) => EngineConfig::load(path)?.drift,
        None => SeverityPolicy::default(),
    };
    let old = resolve_documents(before).context("failed to resolve the before set")?;
    let new = resolve_documents(after).context("failed to resolve the after set")?;
    let report: DriftReport = tokensmith_drift::diff(&old, &new, &policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    if let (Some(gate), Some(worst)) = (fail_on, report.max_severity()) {
        // Severity orders most severe first, so "at least as severe" is <=.
        if worst <= gate {
            bail!("drift contains {worst} change(s), at or above the {gate} gate");
        }
    }
    Ok(())
}

fn write_artifacts(artifacts: &ArtifactSet) -> Result<()> {
    for (path, content) in artifacts {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
