//! Command line interface for inspecting a loaded model run.

use crate::model::Model;
use clap::Command;
use std::io::{self, Write};

/// Builds a representation of the `summary` command line subcommand.
pub fn create_summary_subcommand() -> Command {
    Command::new("summary").about("Print a summary of the model run")
}

/// Builds a representation of the `metadata` command line subcommand.
pub fn create_metadata_subcommand() -> Command {
    Command::new("metadata").about("Print every metadata entry of the model run")
}

/// Builds a representation of the `modified` command line subcommand.
pub fn create_modified_subcommand() -> Command {
    Command::new("modified")
        .about("Print the settings that deviate from the standard empirical models")
}

/// Writes the summary of the given model.
pub fn write_summary<W: Write>(writer: &mut W, model: &Model) -> io::Result<()> {
    writeln!(writer, "{}", model)
}

/// Writes every metadata entry of the given model as `key: value` lines.
pub fn write_metadata<W: Write>(writer: &mut W, model: &Model) -> io::Result<()> {
    for (key, value) in model.metadata().iter() {
        writeln!(writer, "{}: {}", key, value)?;
    }
    Ok(())
}

/// Writes the keys of the settings of the given model that deviate from
/// the standard empirical models, one per line.
pub fn write_modified_keys<W: Write>(writer: &mut W, model: &Model) -> io::Result<()> {
    let modified_keys = model.check_standard_model();
    if modified_keys.is_empty() {
        writeln!(writer, "No modifications to empirical models")
    } else {
        for key in modified_keys {
            writeln!(writer, "{}", key)?;
        }
        Ok(())
    }
}
