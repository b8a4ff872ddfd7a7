//! Numeral handling for Indic scripts
//!
//! Speech services return digits in whichever script the recognizer
//! prefers. Devanagari, Bengali, Tamil and Telugu digits are treated as
//! equivalent to ASCII digits.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Zero code points of the supported native digit blocks
const NATIVE_ZEROS: [u32; 4] = [
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0BE6, // Tamil
    0x0C66, // Telugu
];

const DIGIT_CLASS: &str =
    r"[0-9\x{0966}-\x{096F}\x{09E6}-\x{09EF}\x{0BE6}-\x{0BEF}\x{0C66}-\x{0C6F}]";

/// Digit runs, optionally joined by single commas
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{d}+(?:,{d}+)*", d = DIGIT_CLASS))
        .expect("numeral pattern is a valid regex")
});

/// Value of a digit in any supported script
pub fn digit_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        return c.to_digit(10);
    }
    let code = c as u32;
    NATIVE_ZEROS
        .iter()
        .find(|zero| (**zero..**zero + 10).contains(&code))
        .map(|zero| code - zero)
}

/// Replace native-script digits with ASCII digits
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match digit_value(c) {
            Some(d) if !c.is_ascii_digit() => char::from_digit(d, 10).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// A number found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberMatch {
    pub value: u64,
    /// Byte range in the original text
    pub span: Range<usize>,
}

/// All numbers in `text`, in order of appearance
///
/// Comma-separated digit groups form one number when they follow Indian
/// (`1,50,000`) or international (`150,000`) thousands grouping; any other
/// comma separates numbers. Numbers that overflow `u64` are dropped.
pub fn extract_numbers(text: &str) -> Vec<NumberMatch> {
    let mut numbers = Vec::new();

    for m in NUMBER_PATTERN.find_iter(text) {
        let groups = group_spans(m.as_str(), m.start());
        let lengths: Vec<usize> = groups
            .iter()
            .map(|span| text[span.clone()].chars().count())
            .collect();

        if groups.len() > 1 && is_thousands_grouping(&lengths) {
            if let Some(value) = parse_digits(m.as_str()) {
                numbers.push(NumberMatch {
                    value,
                    span: m.range(),
                });
            }
            continue;
        }

        for span in groups {
            if let Some(value) = parse_digits(&text[span.clone()]) {
                numbers.push(NumberMatch { value, span });
            }
        }
    }

    numbers
}

/// Byte ranges of the comma-separated groups of a match
fn group_spans(matched: &str, offset: usize) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = offset;
    for group in matched.split(',') {
        spans.push(start..start + group.len());
        start += group.len() + 1;
    }
    spans
}

fn is_thousands_grouping(lengths: &[usize]) -> bool {
    let (first, rest) = match lengths.split_first() {
        Some(parts) => parts,
        None => return false,
    };
    let (last, middle) = match rest.split_last() {
        Some(parts) => parts,
        None => return false,
    };
    if *last != 3 {
        return false;
    }

    let international = (1..=3).contains(first) && middle.iter().all(|len| *len == 3);
    let indian = (1..=2).contains(first) && middle.iter().all(|len| *len == 2);
    international || indian
}

/// Parse digits in any script, skipping commas; `None` on overflow
fn parse_digits(text: &str) -> Option<u64> {
    let mut value: u64 = 0;
    let mut seen = false;
    for c in text.chars() {
        if c == ',' {
            continue;
        }
        let digit = digit_value(c)?;
        value = value.checked_mul(10)?.checked_add(u64::from(digit))?;
        seen = true;
    }
    seen.then_some(value)
}
