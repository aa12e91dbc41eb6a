// Filename collation - pure logic, no host imports.
// A key splits a name into text runs, digit runs, dots and path separators.
// Text runs compare through the Unicode Collation Algorithm (CLDR root
// order), digit runs numerically, and dots/separators before everything else.

use feruca::Collator;
use std::cmp::Ordering;
use std::path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Separator,
    Dot,
    /// Significant digits only; leading zeros are kept on the key.
    Number(String),
    /// Lowercased text
    Text(String),
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Segment::Separator => 0,
            Segment::Dot => 1,
            Segment::Number(_) => 2,
            Segment::Text(_) => 3,
        }
    }
}

/// Comparable form of a filename or path.
///
/// Equal keys imply equal inputs: after the segments, ties fall back to the
/// leading-zero counts and finally the original text, so `Readme` and
/// `README` still compare deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollationKey {
    segments: Vec<Segment>,
    zeros: Vec<usize>,
    original: String,
}

/// Builds the collation key for a filename or path.
pub fn collation_key_for_filename(text: &str) -> CollationKey {
    let mut segments = Vec::new();
    let mut zeros = Vec::new();
    let mut run = String::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let marker = if path::is_separator(c) {
            Some(Segment::Separator)
        } else if c == '.' {
            Some(Segment::Dot)
        } else if c.is_ascii_digit() {
            let mut end = start + 1;
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = i + 1;
                chars.next();
            }
            let digits = &text[start..end];
            let trimmed = digits.trim_start_matches('0');
            // "0", "00" rank as the number zero
            let significant = if trimmed.is_empty() { &digits[digits.len() - 1..] } else { trimmed };
            zeros.push(digits.len() - significant.len());
            Some(Segment::Number(significant.to_string()))
        } else {
            if !c.is_control() {
                run.extend(c.to_lowercase());
            }
            None
        };

        if let Some(marker) = marker {
            if !run.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut run)));
            }
            segments.push(marker);
        }
    }
    if !run.is_empty() {
        segments.push(Segment::Text(run));
    }

    CollationKey {
        segments,
        zeros,
        original: text.to_string(),
    }
}

/// Compares [`CollationKey`]s. Holds the collator for the duration of one
/// sort.
pub struct Collation {
    collator: Collator,
}

impl Default for Collation {
    fn default() -> Self {
        Self::new()
    }
}

impl Collation {
    pub fn new() -> Self {
        Self {
            collator: Collator::default(),
        }
    }

    pub fn compare(&mut self, a: &CollationKey, b: &CollationKey) -> Ordering {
        for (x, y) in a.segments.iter().zip(&b.segments) {
            let ord = match (x, y) {
                (Segment::Text(x), Segment::Text(y)) => self.collator.collate(x.as_str(), y.as_str()),
                // More digits means a bigger number
                (Segment::Number(x), Segment::Number(y)) => {
                    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
                }
                _ => x.rank().cmp(&y.rank()),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        a.segments
            .len()
            .cmp(&b.segments.len())
            // Fewer leading zeros first: "file1" < "file01" < "file001"
            .then_with(|| a.zeros.cmp(&b.zeros))
            .then_with(|| a.original.cmp(&b.original))
    }
}
