//! CLI logic for the Tagsmith expander.
//!
//! Expands a file of markup builder declarations the same way
//! `markup_builder!` does and writes the formatted result, so generated
//! types and methods can be inspected.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::{CliError, ConfigError};

use std::{fs, io::Write as _, path::Path};

use log::info;

use tagsmith_codegen::Generator;

/// Run the Tagsmith CLI application
///
/// This function expands the declarations in the input file and writes the
/// generated Rust to the output file, or to stdout when none is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Diagnostics reported for the declarations
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Expanding declarations"
    );

    let config = config::load_config(args.config.as_ref())?;

    let generator = Generator::new(config);
    let expanded = generator.expand_file(Path::new(&args.input))?;

    match &args.output {
        Some(output) => {
            fs::write(output, expanded)?;
            info!(output_file = output; "Expansion written");
        }
        None => {
            std::io::stdout().write_all(expanded.as_bytes())?;
        }
    }

    Ok(())
}
