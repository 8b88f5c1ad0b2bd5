use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ReconcileArgs;
use crate::model::{
    AuthoritativeIdDocument, CanonicalChecklistDocument, CanonicalNode,
    DiscrepancyReportDocument, InputHash, ReconcilePaths, ReconcileRunManifest,
    VisualScrapeDocument,
};
use crate::util::{
    ensure_directory, now_utc_string, sha256_file, utc_compact_string, write_json_pretty,
};

use super::pipeline::reconcile;

pub fn run(args: ReconcileArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let output_root = args.output_root.clone();
    let manifest_dir = output_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let canonical_path = args
        .canonical_path
        .clone()
        .unwrap_or_else(|| output_root.join("canonical_checklist.json"));
    let discrepancy_path = args
        .discrepancy_path
        .clone()
        .unwrap_or_else(|| output_root.join("discrepancy_report.json"));
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!(
            "reconcile_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    info!(output_root = %output_root.display(), run_id = %run_id, "starting reconciliation");

    let authoritative = load_authoritative_document(&args.authoritative_path)?;
    let scrape = load_scrape_document(&args.scrape_path)?;

    info!(
        checklist = %authoritative.checklist_name,
        version = %authoritative.version,
        identifiers = authoritative.identifiers.len(),
        nodes = scrape.nodes.len(),
        "loaded input documents"
    );

    let outcome = reconcile(&authoritative, &scrape)?;

    for warning in &outcome.warnings {
        warn!(warning = %warning, "reconciliation warning");
    }

    if args.dry_run {
        info!(
            matched = outcome.counts.matched_identifier_total,
            discrepancies = outcome.counts.discrepancy_total,
            "dry run requested; skipping output files"
        );
        return Ok(());
    }

    let generated_at = now_utc_string();

    let canonical_document = CanonicalChecklistDocument {
        checklist_name: scrape.checklist_name.clone(),
        version: scrape.version.clone(),
        generated_at: generated_at.clone(),
        node_count: count_nodes(&outcome.roots),
        roots: outcome.roots,
    };
    write_json_pretty(&canonical_path, &canonical_document)?;

    let discrepancy_document = DiscrepancyReportDocument {
        checklist_name: scrape.checklist_name.clone(),
        version: scrape.version.clone(),
        generated_at: generated_at.clone(),
        entries: outcome.report.entries,
        by_kind: outcome.report.by_kind,
        by_format: outcome.report.by_format,
    };
    write_json_pretty(&discrepancy_path, &discrepancy_document)?;

    let manifest = ReconcileRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_reconcile_command(&args),
        checklist_name: scrape.checklist_name.clone(),
        checklist_version: scrape.version.clone(),
        paths: ReconcilePaths {
            output_root: output_root.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            authoritative_path: args.authoritative_path.display().to_string(),
            scrape_path: args.scrape_path.display().to_string(),
            canonical_path: canonical_path.display().to_string(),
            discrepancy_path: discrepancy_path.display().to_string(),
        },
        counts: outcome.counts,
        source_hashes: vec![
            InputHash {
                role: "authoritative".to_string(),
                path: args.authoritative_path.display().to_string(),
                sha256: sha256_file(&args.authoritative_path)?,
            },
            InputHash {
                role: "scrape".to_string(),
                path: args.scrape_path.display().to_string(),
                sha256: sha256_file(&args.scrape_path)?,
            },
        ],
        warnings: outcome.warnings,
        notes: vec![
            "Reconciliation ran greedy in-order assignment with the fixed confidence floor."
                .to_string(),
            "Canonical tree hierarchy derives from visual order alone; parent hints are ignored."
                .to_string(),
        ],
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %canonical_path.display(), "wrote canonical checklist document");
    info!(path = %discrepancy_path.display(), "wrote discrepancy report");
    info!(path = %manifest_path.display(), "wrote reconcile run manifest");

    Ok(())
}

fn load_authoritative_document(path: &Path) -> Result<AuthoritativeIdDocument> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_scrape_document(path: &Path) -> Result<VisualScrapeDocument> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn count_nodes(roots: &[CanonicalNode]) -> usize {
    roots
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}

fn render_reconcile_command(args: &ReconcileArgs) -> String {
    let mut parts = vec![
        "reqrecon reconcile".to_string(),
        format!("--output-root {}", args.output_root.display()),
        format!("--authoritative-path {}", args.authoritative_path.display()),
        format!("--scrape-path {}", args.scrape_path.display()),
    ];

    if let Some(path) = &args.canonical_path {
        parts.push(format!("--canonical-path {}", path.display()));
    }
    if let Some(path) = &args.discrepancy_path {
        parts.push(format!("--discrepancy-path {}", path.display()));
    }
    if let Some(path) = &args.manifest_path {
        parts.push(format!("--manifest-path {}", path.display()));
    }
    if args.dry_run {
        parts.push("--dry-run".to_string());
    }

    parts.join(" ")
}
