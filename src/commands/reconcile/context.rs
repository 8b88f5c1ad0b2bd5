use crate::model::VisualNodeRecord;

use super::options::extract_option;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressingContext {
    pub main_number: Option<String>,
    pub letter: Option<char>,
    pub letter_is_header: bool,
    pub sub_letter: Option<char>,
    pub option: Option<String>,
}

#[derive(Debug, Default)]
struct Tracker {
    context: AddressingContext,
    letter_position: Option<usize>,
}

impl Tracker {
    fn apply(&mut self, node: &VisualNodeRecord, position: usize) {
        let raw = node.display_label.as_deref().unwrap_or("").trim();
        let clean = clean_label(raw);
        let wrapped = is_wrapped_label(raw);

        if let Some(number) = parse_bounded_number(&clean, 20) {
            if !wrapped {
                self.context.main_number = Some(number.to_string());
                self.context.letter = None;
                self.context.letter_is_header = false;
                self.context.sub_letter = None;
                self.context.option = None;
                self.letter_position = None;
                return;
            }
        }

        if raw.is_empty() {
            if let Some(option) = extract_option(&node.description) {
                self.context.option = Some(option);
                self.context.letter = None;
                self.context.letter_is_header = false;
                self.context.sub_letter = None;
                self.letter_position = None;
            }
            return;
        }

        if let Some(letter) = single_letter(&clean) {
            if !wrapped {
                if self.context.letter != Some(letter) {
                    self.context.sub_letter = None;
                }
                self.context.letter = Some(letter);
                self.context.letter_is_header = !node.has_checkbox;
                self.letter_position = Some(position);
                return;
            }
        }

        if wrapped && parse_bounded_number(&clean, 10).is_some() {
            return;
        }

        if let Some(letter) = single_letter(&clean) {
            let after_letter = self
                .letter_position
                .is_some_and(|letter_position| position > letter_position);
            if after_letter {
                self.context.sub_letter = Some(letter);
            }
        }
    }
}

pub fn precompute_contexts(nodes: &[VisualNodeRecord]) -> Vec<AddressingContext> {
    let mut tracker = Tracker::default();
    let mut contexts = Vec::<AddressingContext>::with_capacity(nodes.len());

    for (position, node) in nodes.iter().enumerate() {
        tracker.apply(node, position);
        contexts.push(tracker.context.clone());
    }

    contexts
}

pub fn context_at(nodes: &[VisualNodeRecord], cursor: usize) -> AddressingContext {
    let mut tracker = Tracker::default();

    for (position, node) in nodes.iter().enumerate().take(cursor + 1) {
        tracker.apply(node, position);
    }

    tracker.context
}

pub fn clean_label(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '(' | ')' | '[' | ']' | '.' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn is_wrapped_label(raw: &str) -> bool {
    let trimmed = raw.trim();
    let starts = trimmed.starts_with('(') || trimmed.starts_with('[');
    let ends = trimmed.ends_with(')') || trimmed.ends_with(']');
    starts && ends
}

fn parse_bounded_number(clean: &str, max: u32) -> Option<u32> {
    if clean.is_empty() || !clean.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    clean.parse::<u32>().ok().filter(|number| *number <= max)
}

fn single_letter(clean: &str) -> Option<char> {
    let mut chars = clean.chars();
    let first = chars.next()?;
    if chars.next().is_some() || !first.is_ascii_alphabetic() {
        return None;
    }
    Some(first.to_ascii_lowercase())
}
