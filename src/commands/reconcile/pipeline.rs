use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use tracing::info;

use crate::model::{
    AuthoritativeIdDocument, CanonicalNode, DiscrepancyEntry, DiscrepancyKind, ReconcileCounts,
    VisualScrapeDocument,
};

use super::assignment::{MatchAssignment, assign_all};
use super::context::precompute_contexts;
use super::discrepancy::{DiscrepancyReport, build_report};
use super::hierarchy::build_tree;
use super::id_grammar::IdGrammar;

#[derive(Debug)]
pub struct ReconciliationOutcome {
    pub roots: Vec<CanonicalNode>,
    pub assignments: Vec<MatchAssignment>,
    pub report: DiscrepancyReport,
    pub counts: ReconcileCounts,
    pub warnings: Vec<String>,
}

pub fn reconcile(
    authoritative: &AuthoritativeIdDocument,
    scrape: &VisualScrapeDocument,
) -> Result<ReconciliationOutcome> {
    let grammar = IdGrammar::new()?;
    let mut warnings = Vec::<String>::new();
    let mut advisory = Vec::<DiscrepancyEntry>::new();

    if !scrape.accessible {
        advisory.push(DiscrepancyEntry {
            kind: DiscrepancyKind::BadgeNotAccessible,
            identifier: scrape.checklist_name.clone(),
            explanation: "scrape marked the rendered checklist as not accessible".to_string(),
        });
        warnings.push(format!(
            "scrape of {} marked not accessible; matches may be incomplete",
            scrape.checklist_name
        ));
    }

    if authoritative.checklist_name != scrape.checklist_name
        || authoritative.version != scrape.version
    {
        advisory.push(DiscrepancyEntry {
            kind: DiscrepancyKind::VersionMismatch,
            identifier: format!("{} {}", authoritative.checklist_name, authoritative.version),
            explanation: format!(
                "authoritative document is {} {} but scrape is {} {}",
                authoritative.checklist_name,
                authoritative.version,
                scrape.checklist_name,
                scrape.version
            ),
        });
        warnings.push("input documents disagree on checklist name or version".to_string());
    }

    let contexts = precompute_contexts(&scrape.nodes);
    let outcome = assign_all(&authoritative.identifiers, &grammar, &scrape.nodes, &contexts);

    for identifier in &outcome.unparsed_identifiers {
        warnings.push(format!("identifier \"{identifier}\" fits no known grammar"));
    }

    let resolved_ids: BTreeMap<usize, String> = outcome
        .assignments
        .iter()
        .map(|assignment| (assignment.node_index, assignment.identifier.clone()))
        .collect();
    let roots = build_tree(&scrape.nodes, &resolved_ids);

    let claimed_identifiers: HashSet<String> = outcome
        .assignments
        .iter()
        .map(|assignment| assignment.identifier.clone())
        .collect();

    let report = build_report(
        &grammar,
        &authoritative.identifiers,
        &claimed_identifiers,
        &scrape.nodes,
        &outcome.claimed_nodes,
        &outcome.ambiguous,
        advisory,
    );

    let distinct_identifier_total = authoritative
        .identifiers
        .iter()
        .collect::<HashSet<_>>()
        .len();
    let completable_node_total = scrape
        .nodes
        .iter()
        .filter(|node| node.has_checkbox)
        .count();

    let counts = ReconcileCounts {
        identifier_total: authoritative.occurrence_total(),
        distinct_identifier_total,
        node_total: scrape.nodes.len(),
        header_node_total: scrape.nodes.len() - completable_node_total,
        completable_node_total,
        matched_identifier_total: outcome.assignments.len(),
        unmatched_identifier_total: distinct_identifier_total - outcome.assignments.len(),
        unmatched_node_total: completable_node_total - outcome.claimed_nodes.len(),
        unparsed_identifier_total: outcome.unparsed_identifiers.len(),
        ambiguous_match_total: outcome.ambiguous.len(),
        root_node_total: roots.len(),
        discrepancy_total: report.entries.len(),
    };

    info!(
        checklist = %scrape.checklist_name,
        version = %scrape.version,
        identifiers = counts.distinct_identifier_total,
        nodes = counts.node_total,
        matched = counts.matched_identifier_total,
        discrepancies = counts.discrepancy_total,
        "reconciliation completed"
    );

    Ok(ReconciliationOutcome {
        roots,
        assignments: outcome.assignments,
        report,
        counts,
        warnings,
    })
}
