//! Code assembly
//!
//! Wraps the collected imports and body statements in the C# program
//! scaffold. The output always has this shape:
//!
//! ```text
//! using <import>;                       one per import, duplicates kept
//!
//! public class <class_name>
//! {
//!     private static void <entry_point>(string[] args)
//!     {
//!         <statement>                   one per line, source order
//!     }
//!
//!     private static void <assert_helper>(bool condition, string expression)
//!     {                                 only when an assert was translated
//!         ...
//!     }
//! }
//! ```
//!
//! Body statements are written at a single indentation level. The translator
//! does not track nesting, so braces written by the E# author are emitted
//! where they appear.

use serde::{Deserialize, Serialize};

/// Message printed by the assertion helper before the failing expression.
pub const ASSERTION_FAILED_MESSAGE: &str = "Assertion failed: ";

/// Prompt printed by the assertion helper before it waits for input.
pub const EXIT_PROMPT: &str = "Press enter to exit...";

/// Names and formatting used for the generated program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramLayout {
    pub class_name: String,
    pub entry_point: String,
    pub assert_helper: String,
    pub indent: String,
}

impl Default for ProgramLayout {
    fn default() -> Self {
        ProgramLayout {
            class_name: "Program".to_string(),
            entry_point: "Main".to_string(),
            assert_helper: "EasySharpAssert".to_string(),
            indent: "    ".to_string(),
        }
    }
}

/// Line writer that tracks the indentation depth.
struct CodeWriter<'a> {
    out: String,
    indent: &'a str,
}

impl<'a> CodeWriter<'a> {
    fn new(indent: &'a str) -> Self {
        CodeWriter {
            out: String::new(),
            indent,
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(self.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Assemble the final C# program text.
///
/// Pure function of its inputs. The assertion helper is emitted once when
/// `assert_needed` is set and is left out entirely otherwise.
pub fn assemble(
    imports: &[String],
    body: &[String],
    assert_needed: bool,
    layout: &ProgramLayout,
) -> String {
    let mut writer = CodeWriter::new(&layout.indent);

    for import in imports {
        writer.line(0, &format!("using {import};"));
    }
    if !imports.is_empty() {
        writer.blank();
    }

    writer.line(0, &format!("public class {}", layout.class_name));
    writer.line(0, "{");

    writer.line(
        1,
        &format!("private static void {}(string[] args)", layout.entry_point),
    );
    writer.line(1, "{");
    for statement in body {
        writer.line(2, statement);
    }
    writer.line(1, "}");

    if assert_needed {
        writer.blank();
        write_assert_helper(&mut writer, &layout.assert_helper);
    }

    writer.line(0, "}");
    writer.finish()
}

fn write_assert_helper(writer: &mut CodeWriter<'_>, helper: &str) {
    writer.line(
        1,
        &format!("private static void {helper}(bool condition, string expression)"),
    );
    writer.line(1, "{");
    writer.line(2, "if (!condition)");
    writer.line(2, "{");
    writer.line(
        3,
        &format!(
            "System.Console.WriteLine(\"{ASSERTION_FAILED_MESSAGE}\" + expression + System.Environment.NewLine + \"{EXIT_PROMPT}\");"
        ),
    );
    writer.line(3, "System.Console.ReadLine();");
    writer.line(3, "System.Environment.Exit(-1);");
    writer.line(2, "}");
    writer.line(1, "}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_minimal_program() {
        let output = assemble(&[], &[], false, &ProgramLayout::default());
        let expected = "\
public class Program
{
    private static void Main(string[] args)
    {
    }
}
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_imports_precede_scaffold_and_keep_duplicates() {
        let output = assemble(
            &strings(&["System", "System.Linq", "System"]),
            &strings(&["x = 1;"]),
            false,
            &ProgramLayout::default(),
        );
        let expected = "\
using System;
using System.Linq;
using System;

public class Program
{
    private static void Main(string[] args)
    {
        x = 1;
    }
}
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_helper_emitted_after_entry_point() {
        let output = assemble(
            &[],
            &strings(&["EasySharpAssert(x, \"x\");"]),
            true,
            &ProgramLayout::default(),
        );

        let main = output.find("private static void Main").unwrap();
        let helper = output
            .find("private static void EasySharpAssert(bool condition, string expression)")
            .unwrap();
        assert!(main < helper);
        assert_eq!(output.matches("EasySharpAssert(bool").count(), 1);
        assert!(output.contains("\"Assertion failed: \" + expression"));
        assert!(output.contains("System.Console.ReadLine();"));
        assert!(output.contains("System.Environment.Exit(-1);"));
        assert!(output.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_no_helper_without_assert() {
        let output = assemble(&[], &strings(&["x();"]), false, &ProgramLayout::default());
        assert!(!output.contains("Assertion failed"));
        assert!(!output.contains("\n\n"));
    }

    #[test]
    fn test_braces_balance() {
        let output = assemble(
            &strings(&["System"]),
            &strings(&["x();"]),
            true,
            &ProgramLayout::default(),
        );
        assert_eq!(output.matches('{').count(), output.matches('}').count());
    }

    #[test]
    fn test_custom_layout() {
        let layout = ProgramLayout {
            class_name: "Script".to_string(),
            entry_point: "Run".to_string(),
            assert_helper: "Check".to_string(),
            indent: "\t".to_string(),
        };
        let output = assemble(&[], &strings(&["go();"]), true, &layout);

        assert!(output.contains("public class Script\n{\n"));
        assert!(output.contains("\tprivate static void Run(string[] args)\n"));
        assert!(output.contains("\t\tgo();\n"));
        assert!(output.contains("\tprivate static void Check(bool condition, string expression)\n"));
    }
}
