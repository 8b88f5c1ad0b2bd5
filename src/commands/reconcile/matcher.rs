use crate::model::VisualNodeRecord;

use super::context::{AddressingContext, clean_label};
use super::id_grammar::{IdFormat, ParsedId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDecision {
    pub matched: bool,
    pub confidence: u8,
    pub reason: String,
}

impl MatchDecision {
    fn rejected(reason: &str) -> Self {
        Self {
            matched: false,
            confidence: 0,
            reason: reason.to_string(),
        }
    }
}

fn format_confidence(format: IdFormat) -> u8 {
    match format {
        IdFormat::Simple => 95,
        IdFormat::NumberOnly => 93,
        IdFormat::ThreePart => 92,
        IdFormat::BracketOnly => 90,
        IdFormat::BracketOption => 88,
        IdFormat::ParenNested => 87,
        IdFormat::OptionFormat => 85,
        IdFormat::OptDotFormat => 84,
        IdFormat::ParenOption => 82,
        IdFormat::OptFormat => 80,
        IdFormat::SpaceOption => 79,
        IdFormat::OptNumFormat => 78,
        IdFormat::Other => 78,
        IdFormat::Unknown => 0,
    }
}

pub fn try_match(
    parsed: &ParsedId,
    node: &VisualNodeRecord,
    context: &AddressingContext,
) -> MatchDecision {
    let option_required = match parsed.format {
        IdFormat::Unknown => return MatchDecision::rejected("identifier did not parse"),
        IdFormat::OptionFormat
        | IdFormat::OptDotFormat
        | IdFormat::Other
        | IdFormat::ParenOption
        | IdFormat::OptFormat
        | IdFormat::OptNumFormat
        | IdFormat::BracketOption
        | IdFormat::SpaceOption => true,
        IdFormat::BracketOnly
        | IdFormat::ParenNested
        | IdFormat::ThreePart
        | IdFormat::Simple
        | IdFormat::NumberOnly => false,
    };

    if !node.has_checkbox {
        return MatchDecision::rejected("node is a header, not a completable");
    }

    let Some(main_number) = parsed.main_number.as_deref() else {
        return MatchDecision::rejected("parsed identifier carries no main number");
    };

    if context.main_number.as_deref() != Some(main_number) {
        return MatchDecision::rejected("main number disagrees with context");
    }

    if option_required && parsed.option != context.option {
        return MatchDecision::rejected("option token disagrees with context");
    }

    let (expected, field) = expected_label(parsed, main_number);
    let label = clean_label(node.display_label.as_deref().unwrap_or("")).to_lowercase();

    if label.is_empty() {
        return MatchDecision::rejected("node carries no label");
    }

    if label != expected {
        return MatchDecision::rejected("label disagrees with expected field");
    }

    MatchDecision {
        matched: true,
        confidence: format_confidence(parsed.format),
        reason: format!("{}:{}", parsed.format.as_str(), field),
    }
}

fn expected_label(parsed: &ParsedId, main_number: &str) -> (String, &'static str) {
    if let Some(sub_letter) = parsed.sub_letter {
        return (sub_letter.to_string(), "sub_letter");
    }
    if let Some(sub_number) = parsed.sub_number.as_deref() {
        return (sub_number.to_lowercase(), "sub_number");
    }
    if let Some(letter) = parsed.letter {
        return (letter.to_string(), "letter");
    }
    (main_number.to_string(), "main_number")
}
