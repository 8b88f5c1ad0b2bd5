use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::ReconcileRunManifestView;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.output_root.join("manifests");
    let canonical_path = args.output_root.join("canonical_checklist.json");
    let discrepancy_path = args.output_root.join("discrepancy_report.json");

    info!(output_root = %args.output_root.display(), "status requested");

    match latest_run_manifest(&manifest_dir)? {
        Some(path) => {
            let raw = fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let manifest: ReconcileRunManifestView = serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?;

            info!(
                path = %path.display(),
                run_id = %manifest.run_id.unwrap_or_default(),
                status = %manifest.status.unwrap_or_default(),
                checklist = %manifest.checklist_name.unwrap_or_default(),
                version = %manifest.checklist_version.unwrap_or_default(),
                started_at = %manifest.started_at.unwrap_or_default(),
                updated_at = %manifest.updated_at.unwrap_or_default(),
                warning_count = manifest.warnings.map(|warnings| warnings.len()).unwrap_or(0),
                "loaded latest reconcile run manifest"
            );
        }
        None => {
            warn!(path = %manifest_dir.display(), "no reconcile run manifest found");
        }
    }

    if canonical_path.exists() {
        info!(path = %canonical_path.display(), "canonical checklist document present");
    } else {
        warn!(path = %canonical_path.display(), "canonical checklist document missing");
    }

    if discrepancy_path.exists() {
        info!(path = %discrepancy_path.display(), "discrepancy report present");
    } else {
        warn!(path = %discrepancy_path.display(), "discrepancy report missing");
    }

    Ok(())
}

fn latest_run_manifest(manifest_dir: &std::path::Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let mut candidates = Vec::<PathBuf>::new();
    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to list {}", manifest_dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("reconcile_run_") && name.ends_with(".json"));
        if is_run_manifest {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates.pop())
}
