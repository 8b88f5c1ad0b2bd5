use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::model::{DiscrepancyEntry, DiscrepancyKind, VisualNodeRecord};
use crate::util::truncate_for_id;

use super::assignment::AmbiguousCandidate;
use super::id_grammar::IdGrammar;

#[derive(Debug, Default)]
pub struct DiscrepancyReport {
    pub entries: Vec<DiscrepancyEntry>,
    pub by_kind: BTreeMap<String, usize>,
    pub by_format: BTreeMap<String, usize>,
}

pub fn build_report(
    grammar: &IdGrammar,
    identifiers: &[String],
    claimed_identifiers: &HashSet<String>,
    nodes: &[VisualNodeRecord],
    claimed_nodes: &BTreeSet<usize>,
    ambiguous: &[AmbiguousCandidate],
    advisory: Vec<DiscrepancyEntry>,
) -> DiscrepancyReport {
    let mut report = DiscrepancyReport {
        entries: advisory,
        ..DiscrepancyReport::default()
    };

    let mut seen = HashSet::<&str>::new();
    for identifier in identifiers {
        if !seen.insert(identifier.as_str()) {
            continue;
        }
        if claimed_identifiers.contains(identifier) {
            continue;
        }

        let format = grammar.parse(identifier).format;
        *report
            .by_format
            .entry(format.as_str().to_string())
            .or_insert(0) += 1;

        report.entries.push(DiscrepancyEntry {
            kind: DiscrepancyKind::CsvNotInUi,
            identifier: identifier.clone(),
            explanation: format!(
                "authoritative identifier ({} grammar) matched no visual node",
                format.as_str()
            ),
        });
    }

    for (index, node) in nodes.iter().enumerate() {
        if !node.has_checkbox || claimed_nodes.contains(&index) {
            continue;
        }

        let label = node
            .display_label
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("position {index}"));

        report.entries.push(DiscrepancyEntry {
            kind: DiscrepancyKind::UiNotMatched,
            identifier: label,
            explanation: format!(
                "completable visual node \"{}\" claimed by no identifier",
                truncate_for_id(&node.description, 60)
            ),
        });
    }

    for candidate in ambiguous {
        report.entries.push(DiscrepancyEntry {
            kind: DiscrepancyKind::AmbiguousMatch,
            identifier: candidate.identifier.clone(),
            explanation: format!(
                "positions {} and {} scored {} equally; earliest position kept",
                candidate.chosen_index, candidate.rival_index, candidate.confidence
            ),
        });
    }

    for entry in &report.entries {
        *report
            .by_kind
            .entry(entry.kind.as_str().to_string())
            .or_insert(0) += 1;
    }

    report
}
