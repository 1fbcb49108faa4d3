//! External toolchain
//!
//! The translator itself only produces text. `build` hands that text to two
//! external programs configured in `[toolchain]`:
//!
//! - an editor, started in the background to show the generated C#
//! - the C# compiler, run to completion to produce the executable
//!
//! Argument lists may contain the `{source}` and `{output}` placeholders.

use crate::easysharp::config::ToolchainConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use thiserror::Error;
use tracing::{info, warn};

pub const SOURCE_PLACEHOLDER: &str = "{source}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("'{program}' was not found: {source}")]
    NotFound {
        program: String,
        source: which::Error,
    },
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("failed to write temporary source: {0}")]
    TempFile(#[source] std::io::Error),
}

/// Replace the `{source}` and `{output}` placeholders in `args`.
pub fn expand_args(args: &[String], source: &Path, output: Option<&Path>) -> Vec<String> {
    let source = source.to_string_lossy();
    let output = output.map(|path| path.to_string_lossy());
    args.iter()
        .map(|arg| {
            let arg = arg.replace(SOURCE_PLACEHOLDER, &source);
            match &output {
                Some(output) => arg.replace(OUTPUT_PLACEHOLDER, output),
                None => arg,
            }
        })
        .collect()
}

/// Write generated C# to a temporary `.cs` file that outlives the process.
pub fn write_temporary_source(text: &str) -> Result<PathBuf, ToolchainError> {
    let mut file = tempfile::Builder::new()
        .prefix("easysharp-")
        .suffix(".cs")
        .tempfile()
        .map_err(ToolchainError::TempFile)?;
    file.write_all(text.as_bytes())
        .map_err(ToolchainError::TempFile)?;
    let (_, path) = file.keep().map_err(|e| ToolchainError::TempFile(e.error))?;
    info!(path = %path.display(), "wrote temporary C# source");
    Ok(path)
}

/// Runs the configured editor and compiler.
#[derive(Debug, Clone)]
pub struct Toolchain {
    config: ToolchainConfig,
}

impl Toolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Toolchain { config }
    }

    /// Whether an editor is configured.
    pub fn has_editor(&self) -> bool {
        !self.config.editor.trim().is_empty()
    }

    /// Open `source` in the configured editor without waiting for it.
    ///
    /// Returns `None` when no editor is configured.
    pub fn show(&self, source: &Path) -> Result<Option<Child>, ToolchainError> {
        if !self.has_editor() {
            return Ok(None);
        }
        let args = expand_args(&self.config.editor_args, source, None);
        let child = command(&self.config.editor, &args)?
            .spawn()
            .map_err(|source| ToolchainError::Spawn {
                program: self.config.editor.clone(),
                source,
            })?;
        info!(editor = %self.config.editor, "opened generated source");
        Ok(Some(child))
    }

    /// Compile `source` into `output` and wait for the compiler.
    pub fn compile(&self, source: &Path, output: &Path) -> Result<(), ToolchainError> {
        let args = expand_args(&self.config.compiler_args, source, Some(output));
        info!(compiler = %self.config.compiler, ?args, "running compiler");
        let status = command(&self.config.compiler, &args)?
            .status()
            .map_err(|source| ToolchainError::Spawn {
                program: self.config.compiler.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            warn!(compiler = %self.config.compiler, %status, "compiler failed");
            Err(ToolchainError::Failed {
                program: self.config.compiler.clone(),
                status,
            })
        }
    }
}

fn command(program: &str, args: &[String]) -> Result<Command, ToolchainError> {
    let resolved = which::which(program).map_err(|source| ToolchainError::NotFound {
        program: program.to_string(),
        source,
    })?;
    let mut command = Command::new(resolved);
    command.args(args);
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(compiler: &str, compiler_args: &[&str]) -> ToolchainConfig {
        ToolchainConfig {
            compiler: compiler.to_string(),
            compiler_args: compiler_args.iter().map(|s| s.to_string()).collect(),
            editor: String::new(),
            editor_args: vec![SOURCE_PLACEHOLDER.to_string()],
        }
    }

    #[test]
    fn test_expand_args() {
        let args = vec![
            "{source}".to_string(),
            "/out:{output}".to_string(),
            "-nologo".to_string(),
        ];
        assert_eq!(
            expand_args(&args, Path::new("a.cs"), Some(Path::new("a.exe"))),
            vec!["a.cs", "/out:a.exe", "-nologo"]
        );
    }

    #[test]
    fn test_expand_args_without_output_keeps_placeholder() {
        let args = vec!["{source}".to_string(), "{output}".to_string()];
        assert_eq!(
            expand_args(&args, Path::new("a.cs"), None),
            vec!["a.cs", "{output}"]
        );
    }

    #[test]
    fn test_write_temporary_source() {
        let path = write_temporary_source("public class Program {}").unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("cs"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "public class Program {}"
        );
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_no_editor_configured() {
        let toolchain = Toolchain::new(config("csc", &[]));
        assert!(!toolchain.has_editor());
        assert!(toolchain.show(Path::new("a.cs")).unwrap().is_none());
    }

    #[test]
    fn test_missing_compiler() {
        let toolchain = Toolchain::new(config("easysharp-no-such-compiler", &[]));
        let result = toolchain.compile(Path::new("a.cs"), Path::new("a.exe"));
        assert!(matches!(result, Err(ToolchainError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_compile_runs_with_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("prog.cs");
        let output = dir.path().join("prog.exe");
        std::fs::write(&source, "generated").unwrap();

        let toolchain = Toolchain::new(config("sh", &["-c", "cp \"$0\" \"$1\"", "{source}", "{output}"]));
        toolchain.compile(&source, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "generated");
    }

    #[cfg(unix)]
    #[test]
    fn test_compile_failure_reports_status() {
        let toolchain = Toolchain::new(config("sh", &["-c", "exit 3"]));
        match toolchain.compile(Path::new("a.cs"), Path::new("a.exe")) {
            Err(ToolchainError::Failed { program, status }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected compiler failure, got {other:?}"),
        }
    }
}
