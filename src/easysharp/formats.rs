//! Output formats
//!
//! - `csharp`: the assembled C# program
//! - `directives-json` / `directives-yaml`: the classified lines, one entry
//!   per non-blank source line, for inspecting how a source was read

pub mod registry;

pub use registry::{FormatError, FormatRegistry, Formatter};

use crate::easysharp::assembling::ProgramLayout;
use crate::easysharp::building::Translation;
use crate::easysharp::parsing::ClassifiedLine;

/// Name of the format used when none is given.
pub const DEFAULT_FORMAT: &str = "csharp";

/// Assembles the C# program.
pub struct CSharpFormatter;

impl Formatter for CSharpFormatter {
    fn name(&self) -> &str {
        "csharp"
    }

    fn serialize(
        &self,
        lines: &[ClassifiedLine],
        layout: &ProgramLayout,
    ) -> Result<String, FormatError> {
        let directives = lines.iter().map(|line| line.directive.clone());
        Ok(Translation::from_directives(directives, layout).assemble(layout))
    }

    fn description(&self) -> &str {
        "Generated C# program"
    }
}

/// Pretty printed JSON array of classified lines.
pub struct DirectivesJsonFormatter;

impl Formatter for DirectivesJsonFormatter {
    fn name(&self) -> &str {
        "directives-json"
    }

    fn serialize(
        &self,
        lines: &[ClassifiedLine],
        _layout: &ProgramLayout,
    ) -> Result<String, FormatError> {
        serde_json::to_string_pretty(lines)
            .map(|json| json + "\n")
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Classified source lines as JSON"
    }
}

/// YAML sequence of classified lines.
pub struct DirectivesYamlFormatter;

impl Formatter for DirectivesYamlFormatter {
    fn name(&self) -> &str {
        "directives-yaml"
    }

    fn serialize(
        &self,
        lines: &[ClassifiedLine],
        _layout: &ProgramLayout,
    ) -> Result<String, FormatError> {
        serde_yaml::to_string(lines).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Classified source lines as YAML"
    }
}
