//! # easysharp
//!
//! A translator for the E# scripting dialect. E# source is line oriented: a
//! handful of keyword directives (`import`, `assert`, `print`, `for`) are
//! rewritten into C#, everything else passes through with statement
//! terminators added where needed, and the result is wrapped in a C# program
//! scaffold.
//!
//! The translation engine lives in the [`easysharp`] module. The most common
//! entry points are re-exported here.

pub mod easysharp;

pub use easysharp::assembling::ProgramLayout;
pub use easysharp::{classify_source, translate, translate_source, translate_with};
