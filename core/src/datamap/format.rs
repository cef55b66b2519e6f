use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const SEGMENT_SEPARATOR: &str = " › ";

// Root collation order for punctuation and symbols; anything unlisted sorts after these.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// `advertising.third_party` -> `Advertising › Third Party`.
pub fn format_data_use(data_use: &str) -> String {
    data_use
        .split('.')
        .map(|segment| {
            segment
                .split('_')
                .map(capitalize_first)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Locale-style string ordering over the canonical decomposition.
/// Primary: base letters with case and accents ignored, where
/// whitespace < punctuation < digits < letters. Secondary: accents,
/// unaccented first. Tertiary: lowercase before uppercase. Last: code points.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let da: Vec<char> = a.nfd().collect();
    let db: Vec<char> = b.nfd().collect();
    let bases = |d: &[char]| -> Vec<char> {
        d.iter().copied().filter(|c| !is_combining_mark(*c)).collect()
    };
    let (ba, bb) = (bases(&da[..]), bases(&db[..]));

    ba.iter()
        .map(|c| primary_weight(*c))
        .cmp(bb.iter().map(|c| primary_weight(*c)))
        .then_with(|| {
            da.iter()
                .map(|c| accent_weight(*c))
                .cmp(db.iter().map(|c| accent_weight(*c)))
        })
        .then_with(|| {
            ba.iter()
                .map(|c| case_weight(*c))
                .cmp(bb.iter().map(|c| case_weight(*c)))
        })
        .then_with(|| a.cmp(b))
}

// Base characters share the lowest weight, so a bare letter sorts before its accented form.
fn accent_weight(c: char) -> u32 {
    if is_combining_mark(c) {
        c as u32
    } else {
        0
    }
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, c as u32)
    } else if let Some(idx) = PUNCTUATION_ORDER.find(c) {
        (1, idx as u32)
    } else if !c.is_alphanumeric() {
        (2, c as u32)
    } else if c.is_numeric() {
        (3, c.to_digit(10).unwrap_or(c as u32))
    } else {
        let folded = c.to_lowercase().next().unwrap_or(c);
        (4, folded as u32)
    }
}

fn case_weight(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
