use std::collections::BTreeMap;

use crate::model::{CanonicalNode, VisualNodeRecord};
use crate::util::{sanitize_for_id, truncate_for_id};

use super::context::{clean_label, is_wrapped_label};
use super::options::extract_option;

pub fn build_tree(
    nodes: &[VisualNodeRecord],
    resolved_ids: &BTreeMap<usize, String>,
) -> Vec<CanonicalNode> {
    let mut roots = Vec::<CanonicalNode>::new();
    let mut stack = Vec::<(CanonicalNode, i64)>::new();

    for (index, record) in nodes.iter().enumerate() {
        let is_header = !record.has_checkbox;
        let resolved_id = resolved_ids
            .get(&index)
            .cloned()
            .unwrap_or_else(|| synthesize_node_id(index, record, is_header));

        let mut node = CanonicalNode {
            resolved_id,
            is_header,
            description: record.description.clone(),
            display_order: index,
            parent_id: None,
            links: record.links.clone(),
            children: Vec::new(),
        };

        if is_header {
            let level = header_level(record, &stack);
            while stack.last().is_some_and(|(_, top_level)| *top_level >= level) {
                if let Some((finished, _)) = stack.pop() {
                    attach(&mut roots, &mut stack, finished);
                }
            }
            node.parent_id = stack.last().map(|(parent, _)| parent.resolved_id.clone());
            stack.push((node, level));
        } else {
            node.parent_id = stack.last().map(|(parent, _)| parent.resolved_id.clone());
            attach(&mut roots, &mut stack, node);
        }
    }

    while let Some((finished, _)) = stack.pop() {
        attach(&mut roots, &mut stack, finished);
    }

    roots
}

fn attach(
    roots: &mut Vec<CanonicalNode>,
    stack: &mut Vec<(CanonicalNode, i64)>,
    node: CanonicalNode,
) {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn header_level(record: &VisualNodeRecord, stack: &[(CanonicalNode, i64)]) -> i64 {
    let raw = record.display_label.as_deref().unwrap_or("").trim();
    let clean = clean_label(raw);
    let wrapped = is_wrapped_label(raw);
    let top_level = stack.last().map(|(_, level)| *level);

    if !wrapped && is_bounded_number(&clean, 20) {
        return 0;
    }

    if raw.is_empty() && extract_option(&record.description).is_some() {
        return 1;
    }

    if clean.len() == 1 && clean.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return 2;
    }

    if !clean.is_empty() && clean.chars().all(|ch| ch.is_ascii_digit()) {
        if top_level.is_some_and(|level| level >= 2) {
            return 3;
        }
        if wrapped {
            return top_level.unwrap_or(-1) + 1;
        }
    }

    derive_label_level(&clean).unwrap_or_else(|| top_level.unwrap_or(-1) + 1)
}

fn derive_label_level(clean: &str) -> Option<i64> {
    let mut segments = Vec::<bool>::new();

    for ch in clean.chars() {
        let is_digit = ch.is_ascii_digit();
        if !is_digit && !ch.is_ascii_alphabetic() {
            return None;
        }
        if segments.last() != Some(&is_digit) {
            segments.push(is_digit);
        }
    }

    match segments.as_slice() {
        [true] => Some(0),
        [false] => Some(2),
        [true, false] => Some(2),
        [true, false, true] => Some(3),
        _ => None,
    }
}

fn is_bounded_number(clean: &str, max: u32) -> bool {
    !clean.is_empty()
        && clean.chars().all(|ch| ch.is_ascii_digit())
        && clean.parse::<u32>().is_ok_and(|number| number <= max)
}

fn synthesize_node_id(index: usize, record: &VisualNodeRecord, is_header: bool) -> String {
    let label = record.display_label.as_deref().unwrap_or("").trim();
    let source = if label.is_empty() {
        truncate_for_id(&record.description, 40)
    } else {
        label
    };

    let slug = sanitize_for_id(source);
    let prefix = if is_header { "header" } else { "item" };

    if slug.is_empty() {
        format!("{}:{:03}", prefix, index + 1)
    } else {
        format!("{}:{:03}:{}", prefix, index + 1, slug)
    }
}
