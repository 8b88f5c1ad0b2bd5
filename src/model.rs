use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoritativeIdDocument {
    pub checklist_name: String,
    pub version: String,
    #[serde(default)]
    pub occurrence_count: usize,
    pub identifiers: Vec<String>,
}

impl AuthoritativeIdDocument {
    pub fn occurrence_total(&self) -> usize {
        if self.occurrence_count > 0 {
            self.occurrence_count
        } else {
            self.identifiers.len()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualNodeRecord {
    #[serde(default)]
    pub display_label: Option<String>,
    pub description: String,
    pub has_checkbox: bool,
    #[serde(default)]
    pub parent_hint: Option<String>,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
}

fn default_accessible() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualScrapeDocument {
    pub checklist_name: String,
    pub version: String,
    #[serde(default)]
    pub scraped_at: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default = "default_accessible")]
    pub accessible: bool,
    pub nodes: Vec<VisualNodeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalNode {
    pub resolved_id: String,
    pub is_header: bool,
    pub description: String,
    pub display_order: usize,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
    #[serde(default)]
    pub children: Vec<CanonicalNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalChecklistDocument {
    pub checklist_name: String,
    pub version: String,
    pub generated_at: String,
    pub node_count: usize,
    pub roots: Vec<CanonicalNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    CsvNotInUi,
    UiNotMatched,
    BadgeNotAccessible,
    AmbiguousMatch,
    VersionMismatch,
}

impl DiscrepancyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CsvNotInUi => "csv_not_in_ui",
            Self::UiNotMatched => "ui_not_matched",
            Self::BadgeNotAccessible => "badge_not_accessible",
            Self::AmbiguousMatch => "ambiguous_match",
            Self::VersionMismatch => "version_mismatch",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscrepancyEntry {
    pub kind: DiscrepancyKind,
    pub identifier: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscrepancyReportDocument {
    pub checklist_name: String,
    pub version: String,
    pub generated_at: String,
    pub entries: Vec<DiscrepancyEntry>,
    pub by_kind: BTreeMap<String, usize>,
    pub by_format: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputHash {
    pub role: String,
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcilePaths {
    pub output_root: String,
    pub manifest_dir: String,
    pub authoritative_path: String,
    pub scrape_path: String,
    pub canonical_path: String,
    pub discrepancy_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileCounts {
    pub identifier_total: usize,
    pub distinct_identifier_total: usize,
    pub node_total: usize,
    pub header_node_total: usize,
    pub completable_node_total: usize,
    pub matched_identifier_total: usize,
    pub unmatched_identifier_total: usize,
    pub unmatched_node_total: usize,
    pub unparsed_identifier_total: usize,
    pub ambiguous_match_total: usize,
    pub root_node_total: usize,
    pub discrepancy_total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub checklist_name: String,
    pub checklist_version: String,
    pub paths: ReconcilePaths,
    pub counts: ReconcileCounts,
    pub source_hashes: Vec<InputHash>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileRunManifestView {
    pub run_id: Option<String>,
    pub status: Option<String>,
    pub started_at: Option<String>,
    pub updated_at: Option<String>,
    pub checklist_name: Option<String>,
    pub checklist_version: Option<String>,
    pub warnings: Option<Vec<String>>,
}
