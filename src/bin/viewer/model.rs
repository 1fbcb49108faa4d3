//! Viewer model: the E# source, the generated C# and the line classification

use easysharp::easysharp::assembling::ProgramLayout;
use easysharp::easysharp::parsing::{classify_lines, ClassifiedLine, DirectiveKind};
use easysharp::translate_with;

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Source,
    Generated,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Source => Focus::Generated,
            Focus::Generated => Focus::Source,
        }
    }
}

/// Immutable data shown by the viewer
#[derive(Debug, Clone)]
pub struct Model {
    pub source_lines: Vec<String>,
    pub generated_lines: Vec<String>,
    pub classified: Vec<ClassifiedLine>,
    /// Directive kind per source line, indexed by `line_number - 1`
    kinds: Vec<Option<DirectiveKind>>,
}

impl Model {
    pub fn new(source: &str, layout: &ProgramLayout) -> Self {
        let generated = translate_with(source.lines(), layout);
        let source_lines: Vec<String> = source.lines().map(str::to_string).collect();
        let classified = classify_lines(source.lines());

        let mut kinds = vec![None; source_lines.len()];
        for line in &classified {
            if let Some(slot) = kinds.get_mut(line.line_number - 1) {
                *slot = Some(line.directive.kind());
            }
        }

        Model {
            source_lines,
            generated_lines: generated.lines().map(str::to_string).collect(),
            classified,
            kinds,
        }
    }

    /// Kind of the directive on a 1-based source line, if it is not blank
    pub fn kind_at(&self, line_number: usize) -> Option<DirectiveKind> {
        let index = line_number.checked_sub(1)?;
        self.kinds.get(index).copied().flatten()
    }

    /// Number of lines of each directive kind, in a fixed order
    pub fn summary(&self) -> Vec<(DirectiveKind, usize)> {
        [
            DirectiveKind::Import,
            DirectiveKind::Assert,
            DirectiveKind::Print,
            DirectiveKind::ForHeader,
            DirectiveKind::Regular,
        ]
        .into_iter()
        .map(|kind| {
            let count = self
                .classified
                .iter()
                .filter(|line| line.directive.kind() == kind)
                .count();
            (kind, count)
        })
        .collect()
    }
}
