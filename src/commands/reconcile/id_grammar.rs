use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdFormat {
    OptionFormat,
    OptDotFormat,
    Other,
    ParenOption,
    OptFormat,
    OptNumFormat,
    BracketOption,
    BracketOnly,
    ParenNested,
    SpaceOption,
    ThreePart,
    Simple,
    NumberOnly,
    #[default]
    Unknown,
}

impl IdFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OptionFormat => "option_format",
            Self::OptDotFormat => "opt_dot_format",
            Self::Other => "other",
            Self::ParenOption => "paren_option",
            Self::OptFormat => "opt_format",
            Self::OptNumFormat => "opt_num_format",
            Self::BracketOption => "bracket_option",
            Self::BracketOnly => "bracket_only",
            Self::ParenNested => "paren_nested",
            Self::SpaceOption => "space_option",
            Self::ThreePart => "three_part",
            Self::Simple => "simple",
            Self::NumberOnly => "number_only",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedId {
    pub format: IdFormat,
    pub main_number: Option<String>,
    pub letter: Option<char>,
    pub sub_number: Option<String>,
    pub sub_letter: Option<char>,
    pub option: Option<String>,
}

impl ParsedId {
    fn unknown() -> Self {
        Self::default()
    }
}

pub struct IdGrammar {
    option_format: Regex,
    opt_dot_format: Regex,
    other: Regex,
    paren_option: Regex,
    opt_format: Regex,
    opt_num_letter: Regex,
    opt_num_letter_number: Regex,
    bracket_option: Regex,
    bracket_only: Regex,
    paren_nested: Regex,
    space_option: Regex,
    three_part: Regex,
    simple: Regex,
    number_only: Regex,
}

impl IdGrammar {
    pub fn new() -> Result<Self> {
        Ok(Self {
            option_format: compile(r"^(\d+)\s+Option\s+([A-Za-z])\((\d+)\)(?:\(([a-z])\))?$")?,
            opt_dot_format: compile(r"^(\d+)\.Opt([A-Za-z])\((\d+)\)$")?,
            other: compile(r"^(\d+)\s+([A-Za-z]+)\((\d+)\)(?:\(([a-z])\))?$")?,
            paren_option: compile(r"^(\d+)\((\d+)\)\s+([A-Za-z]+)$")?,
            opt_format: compile(r"^(\d+)([a-z])?(?:\[(\d+)\])?([a-z])?\s+Opt\s+([A-Za-z]+)$")?,
            opt_num_letter: compile(r"^(\d+)([a-z])\s+Opt\s+(\d+)$")?,
            opt_num_letter_number: compile(r"^(\d+)([a-z])(\d+)\s+Opt\s+(\d+)$")?,
            bracket_option: compile(r"^(\d+)([a-z])\[(\d+)\]\s+([A-Za-z]+)$")?,
            bracket_only: compile(r"^(\d+)([a-z])\[(\d+)\]$")?,
            paren_nested: compile(r"^(\d+)([a-z])?\(([a-z0-9]+)\)(?:\((\d+)\))?$")?,
            space_option: compile(r"^(\d+)([a-z])(\d+)?\s+(.+)$")?,
            three_part: compile(r"^(\d+)([a-z])(\d+)$")?,
            simple: compile(r"^(\d+)([a-z])\.?$")?,
            number_only: compile(r"^(\d+)\.?$")?,
        })
    }

    pub fn parse(&self, raw: &str) -> ParsedId {
        let id = raw.trim();
        if id.is_empty() {
            return ParsedId::unknown();
        }

        if let Some(captures) = self.option_format.captures(id) {
            return ParsedId {
                format: IdFormat::OptionFormat,
                main_number: capture_string(&captures, 1),
                letter: None,
                sub_number: capture_string(&captures, 3),
                sub_letter: capture_char(&captures, 4),
                option: capture_char(&captures, 2).map(|ch| format!("option {ch}")),
            };
        }

        if let Some(captures) = self.opt_dot_format.captures(id) {
            return ParsedId {
                format: IdFormat::OptDotFormat,
                main_number: capture_string(&captures, 1),
                letter: None,
                sub_number: capture_string(&captures, 3),
                sub_letter: None,
                option: capture_char(&captures, 2).map(|ch| format!("opt {ch}")),
            };
        }

        if let Some(captures) = self.other.captures(id) {
            return ParsedId {
                format: IdFormat::Other,
                main_number: capture_string(&captures, 1),
                letter: None,
                sub_number: capture_string(&captures, 3),
                sub_letter: capture_char(&captures, 4),
                option: capture_lower(&captures, 2),
            };
        }

        if let Some(captures) = self.paren_option.captures(id) {
            return ParsedId {
                format: IdFormat::ParenOption,
                main_number: capture_string(&captures, 1),
                letter: None,
                sub_number: capture_string(&captures, 2),
                sub_letter: None,
                option: capture_lower(&captures, 3),
            };
        }

        if let Some(captures) = self.opt_format.captures(id) {
            return ParsedId {
                format: IdFormat::OptFormat,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: capture_string(&captures, 3),
                sub_letter: capture_char(&captures, 4),
                option: capture_lower(&captures, 5).map(|word| format!("opt {word}")),
            };
        }

        if let Some(captures) = self.opt_num_letter.captures(id) {
            return ParsedId {
                format: IdFormat::OptNumFormat,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: None,
                sub_letter: None,
                option: capture_string(&captures, 3).map(|num| format!("opt {num}")),
            };
        }

        if let Some(captures) = self.opt_num_letter_number.captures(id) {
            return ParsedId {
                format: IdFormat::OptNumFormat,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: capture_string(&captures, 3),
                sub_letter: None,
                option: capture_string(&captures, 4).map(|num| format!("opt {num}")),
            };
        }

        if let Some(captures) = self.bracket_option.captures(id) {
            return ParsedId {
                format: IdFormat::BracketOption,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: capture_string(&captures, 3),
                sub_letter: None,
                option: capture_lower(&captures, 4),
            };
        }

        if let Some(captures) = self.bracket_only.captures(id) {
            return ParsedId {
                format: IdFormat::BracketOnly,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: capture_string(&captures, 3),
                sub_letter: None,
                option: None,
            };
        }

        if let Some(captures) = self.paren_nested.captures(id) {
            if let Some(parsed) = disambiguate_paren_nested(&captures) {
                return parsed;
            }
        }

        if let Some(captures) = self.space_option.captures(id) {
            return ParsedId {
                format: IdFormat::SpaceOption,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: capture_string(&captures, 3),
                sub_letter: None,
                option: capture_lower(&captures, 4).map(|rest| rest.trim().to_string()),
            };
        }

        if let Some(captures) = self.three_part.captures(id) {
            return ParsedId {
                format: IdFormat::ThreePart,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: capture_string(&captures, 3),
                sub_letter: None,
                option: None,
            };
        }

        if let Some(captures) = self.simple.captures(id) {
            return ParsedId {
                format: IdFormat::Simple,
                main_number: capture_string(&captures, 1),
                letter: capture_char(&captures, 2),
                sub_number: None,
                sub_letter: None,
                option: None,
            };
        }

        if let Some(captures) = self.number_only.captures(id) {
            return ParsedId {
                format: IdFormat::NumberOnly,
                main_number: capture_string(&captures, 1),
                letter: None,
                sub_number: None,
                sub_letter: None,
                option: None,
            };
        }

        ParsedId::unknown()
    }
}

fn disambiguate_paren_nested(captures: &regex::Captures<'_>) -> Option<ParsedId> {
    let main_number = capture_string(captures, 1);
    let letter = capture_char(captures, 2);
    let content = captures.get(3).map(|value| value.as_str()).unwrap_or("");
    let trailing_number = capture_string(captures, 4);

    if content.chars().all(|ch| ch.is_ascii_digit()) {
        if trailing_number.is_some() {
            return None;
        }
        return Some(ParsedId {
            format: IdFormat::ParenNested,
            main_number,
            letter,
            sub_number: Some(content.to_string()),
            sub_letter: None,
            option: None,
        });
    }

    if letter.is_some() && is_roman_numeral(content) {
        if trailing_number.is_some() {
            return None;
        }
        return Some(ParsedId {
            format: IdFormat::ParenNested,
            main_number,
            letter,
            sub_number: Some(content.to_string()),
            sub_letter: None,
            option: None,
        });
    }

    if letter.is_none() && content.len() == 1 && content.chars().all(|ch| ch.is_ascii_alphabetic())
    {
        let inner_letter = content.chars().next().map(|ch| ch.to_ascii_lowercase());
        return Some(ParsedId {
            format: IdFormat::ParenNested,
            main_number,
            letter: inner_letter,
            sub_number: trailing_number,
            sub_letter: None,
            option: None,
        });
    }

    None
}

fn is_roman_numeral(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| matches!(ch, 'i' | 'v' | 'x' | 'l' | 'c' | 'd' | 'm'))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("failed to compile id grammar: {pattern}"))
}

fn capture_string(captures: &regex::Captures<'_>, index: usize) -> Option<String> {
    captures.get(index).map(|value| value.as_str().to_string())
}

fn capture_lower(captures: &regex::Captures<'_>, index: usize) -> Option<String> {
    captures
        .get(index)
        .map(|value| value.as_str().to_lowercase())
}

fn capture_char(captures: &regex::Captures<'_>, index: usize) -> Option<char> {
    captures
        .get(index)
        .and_then(|value| value.as_str().chars().next())
        .map(|ch| ch.to_ascii_lowercase())
}
