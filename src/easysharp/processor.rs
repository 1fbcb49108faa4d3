//! File processing API
//!
//! Reads an E# source file, classifies it and serializes the result through a
//! named format from the [`FormatRegistry`]:
//!
//! ```rust,ignore
//! use easysharp::easysharp::processor::Processor;
//!
//! let processor = Processor::default();
//! let csharp = processor.process_file("hello.es", "csharp")?;
//! let listing = processor.process_file("hello.es", "directives-json")?;
//! ```

use crate::easysharp::assembling::ProgramLayout;
use crate::easysharp::formats::{FormatError, FormatRegistry};
use crate::easysharp::parsing::classify_lines;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, info_span};

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Translates sources with a fixed layout and set of formats.
pub struct Processor {
    registry: FormatRegistry,
    layout: ProgramLayout,
}

impl Processor {
    pub fn new(layout: ProgramLayout) -> Self {
        Self::with_registry(FormatRegistry::with_defaults(), layout)
    }

    pub fn with_registry(registry: FormatRegistry, layout: ProgramLayout) -> Self {
        Processor { registry, layout }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Serialize E# source text in `format`.
    pub fn process_source(&self, source: &str, format: &str) -> Result<String, ProcessingError> {
        let lines = classify_lines(source.lines());
        debug!(lines = lines.len(), format, "classified source");
        Ok(self.registry.serialize(&lines, &self.layout, format)?)
    }

    /// Read an E# file and serialize it in `format`.
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
        format: &str,
    ) -> Result<String, ProcessingError> {
        let path = path.as_ref();
        let _span = info_span!("process_file", path = %path.display(), format).entered();
        let source = read_source(path)?;
        self.process_source(&source, format)
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProgramLayout::default())
    }
}

/// Read a whole source file.
pub fn read_source(path: &Path) -> Result<String, ProcessingError> {
    let source = fs::read_to_string(path).map_err(|source| ProcessingError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = source.len(), "read source");
    Ok(source)
}

/// Write generated text to `path`.
pub fn write_output(path: &Path, text: &str) -> Result<(), ProcessingError> {
    fs::write(path, text).map_err(|source| ProcessingError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(())
}
