//! Directive classification
//!
//! Every normalized, non-blank line is exactly one of:
//!
//! | Keyword  | Argument                         | Directive                 |
//! |----------|----------------------------------|---------------------------|
//! | `import` | comma separated namespaces       | [`Directive::Import`]     |
//! | `assert` | one condition expression         | [`Directive::Assert`]     |
//! | `print`  | comma separated expressions      | [`Directive::Print`]      |
//! | `for`    | `<variable> in <enumerable>`     | [`Directive::ForHeader`]  |
//! | (none)   |                                  | [`Directive::Regular`]    |
//!
//! A keyword matches only when followed by a single space. Keywords are tried in
//! the order of the table and the first match wins, so `print import` is a print
//! of `import`. A `for` line that does not have the `<variable> in <enumerable>`
//! shape is not a directive at all and falls through to a regular line.

use crate::easysharp::lexing::{self, normalize, split_values, split_values_with, SourceLine};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const KEY_IMPORT: &str = "import";
pub const KEY_ASSERT: &str = "assert";
pub const KEY_PRINT: &str = "print";
pub const KEY_FOR: &str = "for";
pub const KEY_IN: &str = "in";

/// The kind of a classified line, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    Import,
    Assert,
    Print,
    ForHeader,
    Regular,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveKind::Import => "import",
            DirectiveKind::Assert => "assert",
            DirectiveKind::Print => "print",
            DirectiveKind::ForHeader => "for-header",
            DirectiveKind::Regular => "regular",
        };
        f.write_str(name)
    }
}

/// A classified line with its typed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Directive {
    /// `import a, b` - one namespace per value, in source order.
    Import { names: Vec<String> },
    /// `assert cond` - the condition text, used both as code and as message.
    Assert { condition: String },
    /// `print a, b` - values printed on one line separated by a space.
    Print { values: Vec<String> },
    /// `for v in xs` - a loop header without a body.
    #[serde(rename = "for-header")]
    ForHeader { variable: String, enumerable: String },
    /// Anything else, passed through as code.
    Regular { code: String },
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Import { .. } => DirectiveKind::Import,
            Directive::Assert { .. } => DirectiveKind::Assert,
            Directive::Print { .. } => DirectiveKind::Print,
            Directive::ForHeader { .. } => DirectiveKind::ForHeader,
            Directive::Regular { .. } => DirectiveKind::Regular,
        }
    }
}

/// A directive together with the physical line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub line_number: usize,
    pub source: String,
    pub directive: Directive,
}

impl From<SourceLine<'_>> for ClassifiedLine {
    fn from(line: SourceLine<'_>) -> Self {
        ClassifiedLine {
            line_number: line.number,
            source: line.text.to_string(),
            directive: classify_line(line.text),
        }
    }
}

/// If `line` starts with `keyword` followed by a space, return the normalized
/// rest of the line.
pub fn keyword_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.strip_prefix(keyword)?.strip_prefix(' ').map(normalize)
}

/// Classify a normalized, non-blank line.
pub fn classify_line(line: &str) -> Directive {
    if let Some(argument) = keyword_argument(line, KEY_IMPORT) {
        return Directive::Import {
            names: owned(split_values(argument)),
        };
    }

    if let Some(argument) = keyword_argument(line, KEY_ASSERT) {
        return Directive::Assert {
            condition: argument.to_string(),
        };
    }

    if let Some(argument) = keyword_argument(line, KEY_PRINT) {
        return Directive::Print {
            values: owned(split_values(argument)),
        };
    }

    if let Some((variable, enumerable)) = for_header(line) {
        return Directive::ForHeader {
            variable: variable.to_string(),
            enumerable: enumerable.to_string(),
        };
    }

    Directive::Regular {
        code: line.to_string(),
    }
}

/// Recognize `for <variable> in <enumerable>`.
///
/// The argument is split on spaces into at most three values, so the
/// enumerable keeps any spaces it contains.
fn for_header(line: &str) -> Option<(&str, &str)> {
    let argument = keyword_argument(line, KEY_FOR)?;
    match split_values_with(argument, ' ', 3).as_slice() {
        [variable, KEY_IN, enumerable] => Some((*variable, *enumerable)),
        _ => {
            debug!(line, "for line is not a loop header, passing through");
            None
        }
    }
}

/// Classify every non-blank line of `lines`.
pub fn classify_lines<'a, I>(lines: I) -> Vec<ClassifiedLine>
where
    I: IntoIterator<Item = &'a str>,
{
    lexing::source_lines(lines)
        .map(ClassifiedLine::from)
        .collect()
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
