//! Functions for building the command line hierarchy.

use super::inspect::{
    create_metadata_subcommand, create_modified_subcommand, create_summary_subcommand,
};
use clap::{self, value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Builds the `sami2rs` command line hierarchy.
pub fn build() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Print status messages while loading (repeat for more detail)"),
        )
        .subcommand(add_run_arguments(create_summary_subcommand()))
        .subcommand(add_run_arguments(create_metadata_subcommand()))
        .subcommand(add_run_arguments(create_modified_subcommand()))
}

/// Adds the arguments identifying and locating a model run to the given command.
pub fn add_run_arguments(command: Command) -> Command {
    command
        .arg(
            Arg::new("tag")
                .long("tag")
                .value_name("NAME")
                .required(true)
                .help("Name of the model run"),
        )
        .arg(
            Arg::new("lon")
                .long("lon")
                .value_name("DEGREES")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32))
                .help("Reference longitude of the run [deg]"),
        )
        .arg(
            Arg::new("year")
                .long("year")
                .value_name("YEAR")
                .required(true)
                .value_parser(value_parser!(i32))
                .help("Year of the run"),
        )
        .arg(
            Arg::new("day")
                .long("day")
                .value_name("DAY")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("Day of year of the run"),
        )
        .arg(
            Arg::new("outn")
                .long("outn")
                .action(ArgAction::SetTrue)
                .help("Also load the neutral density and wind output"),
        )
        .arg(
            Arg::new("test")
                .long("test")
                .action(ArgAction::SetTrue)
                .help("Look the run up in the test data directory"),
        )
        .arg(
            Arg::new("archive-dir")
                .long("archive-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help(
                    "Root directory of the model run archive\n\
                     [default: $SAMI2_ARCHIVE_DIR]",
                ),
        )
        .arg(
            Arg::new("test-data-dir")
                .long("test-data-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help(
                    "Root directory of the test runs\n\
                     [default: $SAMI2_TEST_DATA_DIR or tests/data]",
                ),
        )
        .arg(
            Arg::new("endianness")
                .short('e')
                .long("endianness")
                .require_equals(true)
                .value_name("ENDIANNESS")
                .help("Endianness to assume for unformatted output files")
                .value_parser(["little", "big", "native"])
                .default_value("native"),
        )
}
