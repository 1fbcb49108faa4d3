//! Main module for easysharp library functionality
//!
//! The pipeline is strictly one way:
//!
//! ```text
//! raw lines -> lexing (normalize, drop blanks) -> parsing (classify directives)
//!           -> building (fold into a Translation) -> assembling (C# text)
//! ```
//!
//! Everything up to and including assembling is pure and total. File access,
//! configuration and the external toolchain live in `processor`, `config` and
//! `toolchain`.

pub mod assembling;
pub mod building;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod toolchain;

use assembling::ProgramLayout;
use building::Translation;
use parsing::ClassifiedLine;

/// Translate a sequence of E# lines into a C# program using the default layout.
pub fn translate<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    translate_with(lines, &ProgramLayout::default())
}

/// Translate a sequence of E# lines into a C# program using `layout`.
pub fn translate_with<I, S>(lines: I, layout: &ProgramLayout) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Translation::from_lines(lines, layout).assemble(layout)
}

/// Translate a whole E# source text using the default layout.
///
/// Accepts both `\n` and `\r\n` line endings.
pub fn translate_source(source: &str) -> String {
    translate(source.lines())
}

/// Classify every non-blank line of an E# source text.
pub fn classify_source(source: &str) -> Vec<ClassifiedLine> {
    parsing::classify_lines(source.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_source_handles_crlf() {
        let unix = translate_source("import System\nx = 1\n");
        let windows = translate_source("import System\r\nx = 1\r\n");
        assert_eq!(unix, windows);
    }

    #[test]
    fn test_translate_empty_input_has_scaffold() {
        let output = translate(Vec::<String>::new());
        assert!(output.contains("public class Program"));
        assert!(output.contains("private static void Main(string[] args)"));
        assert!(!output.contains("using "));
    }

    #[test]
    fn test_classify_source_skips_blank_lines() {
        let lines = classify_source("print 1\n\n   \n\tx = 2");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line_number, 4);
    }
}
