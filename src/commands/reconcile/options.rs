const OPTION_SYNONYMS: &[(&str, &str)] = &[
    ("beef cattle", "beef"),
    ("dairy cattle", "dairy"),
    ("dairying", "dairy"),
    ("hog production", "hog"),
    ("swine", "hog"),
    ("hog", "hog"),
    ("horse", "horse"),
    ("sheep", "sheep"),
    ("goat", "goat"),
    ("poultry", "avian"),
    ("avian", "avian"),
    ("bird study", "avian"),
    ("ice skating", "ice"),
    ("in-line skating", "in-line"),
    ("inline skating", "in-line"),
    ("roller skating", "roller"),
    ("skateboarding", "skateboarding"),
    ("mountain biking", "mountain"),
    ("road biking", "road"),
    ("swimming", "swimming"),
    ("snorkeling", "snorkeling"),
    ("hiking", "hiking"),
    ("backpacking", "backpacking"),
    ("cycling", "cycling"),
    ("rowing", "rowing"),
    ("canoeing", "canoeing"),
    ("kayaking", "kayaking"),
    ("rafting", "rafting"),
    ("snowboarding", "snowboarding"),
    ("downhill skiing", "downhill"),
    ("cross-country skiing", "cross-country"),
    ("group one", "group 1"),
    ("group two", "group 2"),
    ("group 1", "group 1"),
    ("group 2", "group 2"),
    ("group a", "group a"),
    ("group b", "group b"),
    ("opt a", "opt a"),
    ("opt b", "opt b"),
    ("opt 1", "opt 1"),
    ("opt 2", "opt 2"),
];

pub fn extract_option(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("Option ") {
        let rest = rest.trim_start();
        let mut chars = rest.chars();
        if let Some(first) = chars.next() {
            if first.is_ascii_alphabetic() {
                let boundary = chars.next().is_none_or(|ch| !ch.is_ascii_alphanumeric());
                if boundary {
                    return Some(format!("option {}", first.to_ascii_lowercase()));
                }
            }
        }

        let digits: String = rest.chars().take_while(|ch| ch.is_ascii_digit()).collect();
        if !digits.is_empty() {
            return Some(format!("option {digits}"));
        }
    }

    let lowered = trimmed.to_lowercase();
    for (phrase, token) in OPTION_SYNONYMS {
        if lowered.contains(phrase) {
            return Some((*token).to_string());
        }
    }

    if let Some(prefix) = trimmed.strip_suffix(" Option") {
        let first_word = prefix
            .split_whitespace()
            .next()
            .map(|word| word.trim_matches(|ch: char| !ch.is_ascii_alphanumeric()))
            .filter(|word| !word.is_empty())?;
        return Some(first_word.to_lowercase());
    }

    None
}
