use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::model::VisualNodeRecord;

use super::context::AddressingContext;
use super::id_grammar::{IdFormat, IdGrammar, ParsedId};
use super::matcher::try_match;

pub const MIN_MATCH_CONFIDENCE: u8 = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchAssignment {
    pub identifier: String,
    pub node_index: usize,
    pub confidence: u8,
    pub match_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousCandidate {
    pub identifier: String,
    pub chosen_index: usize,
    pub rival_index: usize,
    pub confidence: u8,
}

#[derive(Debug, Default)]
pub struct AssignmentOutcome {
    pub assignments: Vec<MatchAssignment>,
    pub claimed_nodes: BTreeSet<usize>,
    pub ambiguous: Vec<AmbiguousCandidate>,
    pub unparsed_identifiers: Vec<String>,
}

pub fn find_best_match(
    identifier: &str,
    grammar: &IdGrammar,
    nodes: &[VisualNodeRecord],
    contexts: &[AddressingContext],
    already_claimed: &BTreeSet<usize>,
) -> (Option<MatchAssignment>, Option<usize>) {
    let parsed = grammar.parse(identifier);
    scan_candidates(identifier, &parsed, nodes, contexts, already_claimed)
}

fn scan_candidates(
    identifier: &str,
    parsed: &ParsedId,
    nodes: &[VisualNodeRecord],
    contexts: &[AddressingContext],
    already_claimed: &BTreeSet<usize>,
) -> (Option<MatchAssignment>, Option<usize>) {
    if parsed.format == IdFormat::Unknown {
        return (None, None);
    }

    let mut best: Option<MatchAssignment> = None;
    let mut rival_index: Option<usize> = None;

    for (index, node) in nodes.iter().enumerate() {
        if already_claimed.contains(&index) {
            continue;
        }

        let decision = try_match(parsed, node, &contexts[index]);
        if !decision.matched {
            continue;
        }

        match best.as_ref() {
            Some(current) if decision.confidence > current.confidence => {
                best = Some(MatchAssignment {
                    identifier: identifier.to_string(),
                    node_index: index,
                    confidence: decision.confidence,
                    match_type: decision.reason,
                });
                rival_index = None;
            }
            Some(current) if decision.confidence == current.confidence => {
                if rival_index.is_none() {
                    rival_index = Some(index);
                }
            }
            Some(_) => {}
            None => {
                best = Some(MatchAssignment {
                    identifier: identifier.to_string(),
                    node_index: index,
                    confidence: decision.confidence,
                    match_type: decision.reason,
                });
            }
        }
    }

    match best {
        Some(assignment) if assignment.confidence >= MIN_MATCH_CONFIDENCE => {
            (Some(assignment), rival_index)
        }
        _ => (None, None),
    }
}

pub fn assign_all(
    identifiers: &[String],
    grammar: &IdGrammar,
    nodes: &[VisualNodeRecord],
    contexts: &[AddressingContext],
) -> AssignmentOutcome {
    let mut outcome = AssignmentOutcome::default();
    let mut seen = HashSet::<&str>::new();

    for identifier in identifiers {
        if !seen.insert(identifier.as_str()) {
            continue;
        }

        let parsed = grammar.parse(identifier);
        if parsed.format == IdFormat::Unknown {
            warn!(identifier = %identifier, "identifier fits no known grammar");
            outcome.unparsed_identifiers.push(identifier.clone());
            continue;
        }

        let (best, rival_index) = scan_candidates(
            identifier,
            &parsed,
            nodes,
            contexts,
            &outcome.claimed_nodes,
        );

        let Some(assignment) = best else {
            debug!(identifier = %identifier, "no candidate reached the confidence floor");
            continue;
        };

        if let Some(rival_index) = rival_index {
            outcome.ambiguous.push(AmbiguousCandidate {
                identifier: identifier.clone(),
                chosen_index: assignment.node_index,
                rival_index,
                confidence: assignment.confidence,
            });
        }

        outcome.claimed_nodes.insert(assignment.node_index);
        outcome.assignments.push(assignment);
    }

    outcome
}
