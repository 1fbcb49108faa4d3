//! Configuration loading
//!
//! `defaults/easysharp.default.toml` is embedded into the binary. Callers
//! layer their own files and single-key overrides on top of it through
//! [`Loader`] before deserializing into [`EasySharpConfig`].
//!
//! Names used in the generated program are checked after loading: each must
//! be a C# identifier that is not a reserved keyword (unless written with a
//! leading `@`), and neither method may share the class name.

use crate::easysharp::assembling::ProgramLayout;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../../defaults/easysharp.default.toml");

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@?[\p{L}_][\p{L}\p{Nd}_]*$").expect("valid identifier regex"));

/// C# reserved keywords. Contextual keywords (`var`, `async`, ...) are
/// valid identifiers and are not listed.
const RESERVED_KEYWORDS: [&str; 77] = [
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A source could not be read, parsed or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// A program name is not a usable C# identifier
    #[error("'{value}' is not a valid C# identifier for program.{key}")]
    InvalidIdentifier { key: &'static str, value: String },
    /// A method would be named after its enclosing class
    #[error("program.{key} '{value}' must differ from program.class_name")]
    InvalidLayout { key: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EasySharpConfig {
    pub program: ProgramLayout,
    pub toolchain: ToolchainConfig,
}

/// External programs used by `build`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolchainConfig {
    pub compiler: String,
    pub compiler_args: Vec<String>,
    pub editor: String,
    pub editor_args: Vec<String>,
}

/// The identifier a name declares, without its `@` prefix.
fn unescaped(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}

impl EasySharpConfig {
    fn validate(self) -> Result<Self, ConfigurationError> {
        let program = &self.program;
        for (key, value) in [
            ("class_name", &program.class_name),
            ("entry_point", &program.entry_point),
            ("assert_helper", &program.assert_helper),
        ] {
            if !is_identifier(value) {
                return Err(ConfigurationError::InvalidIdentifier {
                    key,
                    value: value.clone(),
                });
            }
        }

        // C# rejects members named after their enclosing type (CS0542).
        let class_name = unescaped(&program.class_name);
        for (key, value) in [
            ("entry_point", &program.entry_point),
            ("assert_helper", &program.assert_helper),
        ] {
            if unescaped(value) == class_name {
                return Err(ConfigurationError::InvalidLayout {
                    key,
                    value: value.clone(),
                });
            }
        }
        Ok(self)
    }
}

/// Whether `name` is usable as a C# identifier.
///
/// Reserved keywords are only accepted with the `@` prefix.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
        && (name.starts_with('@') || !RESERVED_KEYWORDS.contains(&name))
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigurationError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate.
    pub fn build(self) -> Result<EasySharpConfig, ConfigurationError> {
        let config: EasySharpConfig = self.builder.build()?.try_deserialize()?;
        config.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
