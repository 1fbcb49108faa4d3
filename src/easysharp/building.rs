//! Building
//!
//! Turns classified lines into the pieces of a C# program:
//!
//! - the `using` names, in first-seen order, duplicates kept
//! - the body statements of the entry point, in source order
//! - whether the assertion helper has to be emitted
//!
//! The pieces are collected by folding over the directives into a
//! [`Translation`]. Nothing is shared between translations.
//!
//! Regular lines go through [`finalize_statement`], which appends a `;` unless
//! the line already ends with one or opens a C# block (`if`, `else`, `while`,
//! `for`, `foreach`). The test is local to the line: there is no brace or paren
//! balancing, so an expression spread over several lines gets a `;` on each.

use crate::easysharp::assembling::{self, ProgramLayout};
use crate::easysharp::lexing;
use crate::easysharp::parsing::{classify_line, Directive};
use std::borrow::Cow;

pub const STATEMENT_TERMINATOR: char = ';';

/// C# keywords whose lines must not be terminated.
pub const BLOCK_KEYWORDS: [&str; 5] = ["if", "else", "while", "for", "foreach"];

/// Whether `line` starts a C# block construct.
///
/// Looser than directive matching: the keyword may be followed either by a
/// space or by an opening parenthesis. A `for` must reach its parenthesis,
/// since `for x of items` is an E# loop header that did not match and is
/// passed through as a plain statement.
pub fn opens_block(line: &str) -> bool {
    BLOCK_KEYWORDS.iter().any(|&keyword| {
        line.strip_prefix(keyword).is_some_and(|rest| {
            if keyword == "for" {
                rest.trim_start_matches(' ').starts_with('(')
            } else {
                rest.starts_with(' ') || rest.starts_with('(')
            }
        })
    })
}

/// Append a statement terminator to a regular line when it needs one.
pub fn finalize_statement(line: &str) -> Cow<'_, str> {
    if line.ends_with(STATEMENT_TERMINATOR) || opens_block(line) {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(format!("{line}{STATEMENT_TERMINATOR}"))
    }
}

/// Everything collected from one E# source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub imports: Vec<String>,
    pub body: Vec<String>,
    pub assert_needed: bool,
}

impl Translation {
    /// Normalize, classify and fold all `lines`.
    pub fn from_lines<I, S>(lines: I, layout: &ProgramLayout) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().fold(Translation::default(), |translation, line| {
            let text = lexing::normalize(line.as_ref());
            if text.is_empty() {
                translation
            } else {
                translation.with(classify_line(text), layout)
            }
        })
    }

    /// Fold already classified directives.
    pub fn from_directives<I>(directives: I, layout: &ProgramLayout) -> Self
    where
        I: IntoIterator<Item = Directive>,
    {
        directives
            .into_iter()
            .fold(Translation::default(), |translation, directive| {
                translation.with(directive, layout)
            })
    }

    /// Add one directive.
    pub fn with(mut self, directive: Directive, layout: &ProgramLayout) -> Self {
        match directive {
            Directive::Import { names } => self.imports.extend(names),
            Directive::Assert { condition } => {
                self.body
                    .push(render_assert(&condition, &layout.assert_helper));
                self.assert_needed = true;
            }
            Directive::Print { values } => self.body.push(render_print(&values)),
            Directive::ForHeader {
                variable,
                enumerable,
            } => self.body.push(render_for_header(&variable, &enumerable)),
            Directive::Regular { code } => {
                self.body.push(finalize_statement(&code).into_owned())
            }
        }
        self
    }

    /// Produce the C# program text.
    pub fn assemble(&self, layout: &ProgramLayout) -> String {
        assembling::assemble(&self.imports, &self.body, self.assert_needed, layout)
    }
}

/// `System.Console.WriteLine(...)` printing all values separated by a space.
///
/// With more than one value every operand is parenthesized, so `print 1, 2`
/// prints `1 2` rather than adding the numbers.
pub fn render_print(values: &[String]) -> String {
    let argument = match values {
        [single] => single.clone(),
        _ => values
            .iter()
            .map(|value| format!("({value})"))
            .collect::<Vec<_>>()
            .join(" + \" \" + "),
    };
    format!("System.Console.WriteLine({argument});")
}

/// A call to the assertion helper with the condition and its source text.
pub fn render_assert(condition: &str, helper: &str) -> String {
    format!(
        "{helper}({condition}, \"{}\");",
        escape_string_literal(condition)
    )
}

pub fn render_for_header(variable: &str, enumerable: &str) -> String {
    format!("foreach (var {variable} in {enumerable})")
}

/// Escape text for use inside a regular C# string literal.
pub fn escape_string_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("x = 5", "x = 5;")]
    #[case("x = 5;", "x = 5;")]
    #[case("if (x > 0)", "if (x > 0)")]
    #[case("if(x > 0)", "if(x > 0)")]
    #[case("else if (y)", "else if (y)")]
    #[case("else", "else;")]
    #[case("while (true)", "while (true)")]
    #[case("for (int i = 0; i < 3; i++)", "for (int i = 0; i < 3; i++)")]
    #[case("for(;;)", "for(;;)")]
    #[case("for x of items", "for x of items;")]
    #[case("foreach (var c in s)", "foreach (var c in s)")]
    #[case("iffy = 1", "iffy = 1;")]
    #[case("format(x)", "format(x);")]
    #[case("{", "{;")]
    #[case("}", "};")]
    fn test_finalize_statement(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(finalize_statement(line), expected);
    }

    #[test]
    fn test_finalize_borrows_when_unchanged() {
        assert!(matches!(finalize_statement("x();"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_render_print_single() {
        assert_eq!(
            render_print(&["\"hi\"".to_string()]),
            "System.Console.WriteLine(\"hi\");"
        );
    }

    #[test]
    fn test_render_print_many() {
        assert_eq!(
            render_print(&["\"hi\"".to_string(), "1+1".to_string()]),
            "System.Console.WriteLine((\"hi\") + \" \" + (1+1));"
        );
    }

    #[test]
    fn test_render_assert_escapes_source_text() {
        assert_eq!(
            render_assert("s == \"a\\b\"", "Check"),
            "Check(s == \"a\\b\", \"s == \\\"a\\\\b\\\"\");"
        );
    }

    #[test]
    fn test_fold_collects_in_order() {
        let layout = ProgramLayout::default();
        let translation = Translation::from_lines(
            ["import A, B", "x = 1", "import A", "", "print x"],
            &layout,
        );

        assert_eq!(translation.imports, vec!["A", "B", "A"]);
        assert_eq!(
            translation.body,
            vec!["x = 1;", "System.Console.WriteLine(x);"]
        );
        assert!(!translation.assert_needed);
    }

    #[test]
    fn test_fold_sets_assert_flag() {
        let layout = ProgramLayout::default();
        let translation = Translation::from_lines(["assert a", "assert b"], &layout);

        assert!(translation.assert_needed);
        assert_eq!(
            translation.body,
            vec![
                "EasySharpAssert(a, \"a\");".to_string(),
                "EasySharpAssert(b, \"b\");".to_string()
            ]
        );
    }

    #[test]
    fn test_for_header_is_not_terminated_or_nested() {
        let layout = ProgramLayout::default();
        let translation = Translation::from_lines(["for i in range", "x = i"], &layout);

        assert_eq!(
            translation.body,
            vec!["foreach (var i in range)", "x = i;"]
        );
    }

    #[test]
    fn test_fold_from_directives_matches_lines() {
        let layout = ProgramLayout::default();
        let lines = ["import System", "print 1, 2", "for x of y"];
        let directives = crate::easysharp::parsing::classify_lines(lines)
            .into_iter()
            .map(|line| line.directive);

        assert_eq!(
            Translation::from_directives(directives, &layout),
            Translation::from_lines(lines, &layout)
        );
    }
}
