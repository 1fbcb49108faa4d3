//! Command-line interface for easysharp
//!
//! Usage:
//!   easysharp translate `<path>` [-o `<file>`] [-f `<format>`]  - Translate an E# file
//!   easysharp build `<path>` [-o `<exe>`] [--show]           - Translate and compile
//!   easysharp view `<path>`                                 - Side-by-side TUI viewer
//!   easysharp list-formats                                  - List output formats
//!
//! Configuration is layered: built-in defaults, `./easysharp.toml` if present,
//! then `--config <file>` and `--class-name <name>`. Logging goes to stderr
//! and is controlled by `EASYSHARP_LOG` or `--verbose`.
mod viewer;

use clap::{Arg, ArgAction, ArgMatches, Command};
use easysharp::easysharp::config::{EasySharpConfig, Loader};
use easysharp::easysharp::formats::DEFAULT_FORMAT;
use easysharp::easysharp::processor::{write_output, Processor};
use easysharp::easysharp::toolchain::{write_temporary_source, Toolchain, ToolchainError};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EASYSHARP_LOG";
/// Project configuration picked up from the working directory when present.
const LOCAL_CONFIG: &str = "easysharp.toml";

fn main() {
    let matches = Command::new("easysharp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate E# scripts into C# programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("class-name")
                .long("class-name")
                .global(true)
                .help("Name of the generated class"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate an E# file")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)")
                        .default_value(DEFAULT_FORMAT),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Translate an E# file and compile the generated C#")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Executable to produce (default: <path> with .exe extension)"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Open the generated C# in the configured editor")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Open an interactive viewer of the source and generated C#")
                .arg(path_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));
    let config = load_config(&matches);

    match matches.subcommand() {
        Some(("translate", sub)) => {
            let format = sub
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or(DEFAULT_FORMAT);
            handle_translate_command(
                &config,
                required_path(sub),
                sub.get_one::<String>("output").map(PathBuf::from),
                format,
            );
        }
        Some(("build", sub)) => {
            handle_build_command(
                &config,
                required_path(sub),
                sub.get_one::<String>("output").map(PathBuf::from),
                sub.get_flag("show"),
            );
        }
        Some(("view", sub)) => handle_view_command(&config, required_path(sub)),
        Some(("list-formats", _)) => handle_list_formats_command(&config),
        _ => unreachable!("subcommand is required"),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the E# source file")
        .required(true)
        .index(1)
}

fn required_path(matches: &ArgMatches) -> &Path {
    matches
        .get_one::<String>("path")
        .map(Path::new)
        .unwrap_or_else(|| fail("a source path is required"))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> EasySharpConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(class_name) = matches.get_one::<String>("class-name") {
        loader = loader
            .set_override("program.class_name", class_name.as_str())
            .unwrap_or_else(|e| fail(e));
    }
    loader.build().unwrap_or_else(|e| fail(e))
}

/// Handle the translate command
fn handle_translate_command(
    config: &EasySharpConfig,
    path: &Path,
    output: Option<PathBuf>,
    format: &str,
) {
    let processor = Processor::new(config.program.clone());
    let text = processor
        .process_file(path, format)
        .unwrap_or_else(|e| fail(e));

    match output {
        Some(output) => write_output(&output, &text).unwrap_or_else(|e| fail(e)),
        None => print!("{}", text),
    }
}

/// Handle the build command
fn handle_build_command(
    config: &EasySharpConfig,
    path: &Path,
    output: Option<PathBuf>,
    show: bool,
) {
    let processor = Processor::new(config.program.clone());
    let csharp = processor
        .process_file(path, DEFAULT_FORMAT)
        .unwrap_or_else(|e| fail(e));
    let source = write_temporary_source(&csharp).unwrap_or_else(|e| fail(e));
    println!("{}", source.display());

    let toolchain = Toolchain::new(config.toolchain.clone());
    if show {
        if toolchain.has_editor() {
            toolchain.show(&source).unwrap_or_else(|e| fail(e));
        } else {
            warn!("--show requested but no editor is configured (toolchain.editor)");
        }
    }

    let output = output.unwrap_or_else(|| path.with_extension("exe"));
    match toolchain.compile(&source, &output) {
        Ok(()) => println!("{}", output.display()),
        Err(ToolchainError::Failed { program, status }) => {
            eprintln!("Error: '{}' exited with {}", program, status);
            std::process::exit(status.code().unwrap_or(1));
        }
        Err(e) => fail(e),
    }
}

/// Handle the view command
fn handle_view_command(config: &EasySharpConfig, path: &Path) {
    if let Err(e) = viewer::viewer_main::run_viewer(path.to_path_buf(), &config.program) {
        fail(e);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &EasySharpConfig) {
    let processor = Processor::new(config.program.clone());
    println!("Available output formats:\n");
    for (name, description) in processor.registry().describe_formats() {
        println!("  {}", name);
        println!("    {}", description);
    }
}
