//! Value splitting for directive arguments
//!
//! Directive arguments are lists such as `"a, b", f(x, y), z`. A delimiter only
//! separates values when it sits outside string literals and outside any
//! `()`, `[]` or `{}` grouping:
//!
//! ```text
//! a,"b,c",d    -> [a] ["b,c"] [d]
//! a,(b,c),d    -> [a] [(b,c)] [d]
//! ```
//!
//! A quote directly after a `\` never toggles the literal. Only one character
//! is looked at, so in `"\\"` the final quote counts as escaped and the
//! literal stays open.
//!
//! Splitting never fails. Unbalanced brackets or an unterminated literal just
//! leave the scan in whatever state it ended in; that state is reported at
//! debug level.

use super::normalize;
use tracing::debug;

/// Ordered, trimmed values produced by splitting one argument string.
pub type ValueList<'a> = Vec<&'a str>;

/// Default separator for directive arguments.
pub const DEFAULT_DELIMITER: char = ',';

/// Split `text` on commas, with no limit on the number of values.
pub fn split_values(text: &str) -> ValueList<'_> {
    split_values_with(text, DEFAULT_DELIMITER, 0)
}

/// Split `text` on `delimiter`.
///
/// When `max_values` is greater than zero, at most `max_values` values are
/// produced: once `max_values - 1` separators have been consumed the rest of
/// the input, delimiters included, becomes the last value. The result always
/// holds at least one value, so `split_values("")` is `[""]`.
pub fn split_values_with(text: &str, delimiter: char, max_values: usize) -> ValueList<'_> {
    let mut values = Vec::new();
    let mut value_start = 0;
    let mut inside_quotes = false;
    let mut depth: i64 = 0;
    let mut previous: Option<char> = None;

    for (index, c) in text.char_indices() {
        if c == '"' && previous != Some('\\') {
            inside_quotes = !inside_quotes;
        } else if !inside_quotes {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ if depth == 0 && c == delimiter => {
                    if max_values > 0 && values.len() + 1 >= max_values {
                        break;
                    }
                    values.push(normalize(&text[value_start..index]));
                    value_start = index + c.len_utf8();
                }
                _ => {}
            }
        }
        previous = Some(c);
    }

    values.push(normalize(&text[value_start..]));

    if inside_quotes || depth != 0 {
        debug!(
            text,
            inside_quotes, depth, "value split ended inside a literal or grouping"
        );
    }

    values
}
