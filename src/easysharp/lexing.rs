//! Lexing
//!
//! E# has no token stream. The unit of work is the physical line, and the only
//! lexical work done before classification is:
//!
//! 1. Line normalization: trim spaces and horizontal tabs from both ends.
//!    Other whitespace (newlines, carriage returns) belongs to the line
//!    reading boundary, not to this module.
//! 2. Blank line removal: a line that is empty after normalization is
//!    dropped entirely, no placeholder is kept.
//! 3. Value splitting for directive arguments (see [`splitter`]).

pub mod splitter;

pub use splitter::{split_values, split_values_with};

/// Characters stripped by [`normalize`].
const TRIM_CHARS: [char; 2] = [' ', '\t'];

/// Trim spaces and horizontal tabs from both ends of a line.
pub fn normalize(line: &str) -> &str {
    line.trim_matches(TRIM_CHARS.as_slice())
}

/// A normalized, non-blank physical line together with its 1-based position
/// in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Normalize every line and drop the ones that end up empty.
///
/// Line numbers count every physical line, blank ones included, so they can be
/// used to point back into the source file.
pub fn source_lines<'a, I>(lines: I) -> impl Iterator<Item = SourceLine<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let text = normalize(line);
            (!text.is_empty()).then_some(SourceLine {
                number: index + 1,
                text,
            })
        })
}
