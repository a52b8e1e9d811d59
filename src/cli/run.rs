//! Functions for running the command line program.

use super::{build, inspect};
use crate::{
    error::Result,
    exit_on_error, exit_with_error,
    io::{
        archive::{ArchiveConfig, RunIdentity},
        Endianness,
    },
    model::{LoadOptions, Model},
};
use clap::ArgMatches;
use log::LevelFilter;
use std::{io, path::PathBuf};

/// Runs the `sami2rs` command line program.
pub fn run() {
    let arguments = build::build().get_matches();
    run_with_arguments(&arguments);
}

/// Runs the `sami2rs` command line program with the given parsed arguments.
pub fn run_with_arguments(arguments: &ArgMatches) {
    setup_logging(arguments.get_count("verbose"));

    let (subcommand_name, subcommand_arguments) = match arguments.subcommand() {
        Some(subcommand) => subcommand,
        None => exit_with_error!("Error: No subcommand given"),
    };

    let model = exit_on_error!(
        load_model_from_arguments(subcommand_arguments),
        "Error: Could not load model run: {}"
    );

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let result = match subcommand_name {
        "summary" => inspect::write_summary(&mut writer, &model),
        "metadata" => inspect::write_metadata(&mut writer, &model),
        "modified" => inspect::write_modified_keys(&mut writer, &model),
        _ => unreachable!(),
    };
    exit_on_error!(result, "Error: Could not write output: {}");
}

/// Sets up logging to standard error, with more detail for higher verbosity.
pub fn setup_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.format_target(false);
    builder.filter_level(match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
    // Logging may already be set up when running repeatedly in one process
    let _ = builder.try_init();
}

/// Creates the configuration for locating model runs from the given arguments,
/// falling back to the environment for directories that are not specified.
pub fn archive_config_from_arguments(arguments: &ArgMatches) -> Result<ArchiveConfig> {
    let mut config = ArchiveConfig::from_env();
    if let Some(test_data_dir) = arguments.get_one::<PathBuf>("test-data-dir") {
        config = config.with_test_data_dir(test_data_dir);
    }
    if let Some(archive_dir) = arguments.get_one::<PathBuf>("archive-dir") {
        config = config.with_archive_dir(archive_dir)?;
    }
    Ok(config)
}

/// Creates the identity of the model run specified by the given arguments.
pub fn run_identity_from_arguments(arguments: &ArgMatches) -> Result<RunIdentity> {
    let tag = arguments
        .get_one::<String>("tag")
        .expect("No value for required argument");
    let lon = *arguments
        .get_one::<i32>("lon")
        .expect("No value for required argument");
    let year = *arguments
        .get_one::<i32>("year")
        .expect("No value for required argument");
    let day = *arguments
        .get_one::<u32>("day")
        .expect("No value for required argument");
    Ok(RunIdentity::new(tag.as_str(), lon, year, day)?
        .with_neutral_outputs(arguments.get_flag("outn"))
        .with_test_data(arguments.get_flag("test")))
}

/// Creates the reading options specified by the given arguments.
pub fn load_options_from_arguments(arguments: &ArgMatches) -> LoadOptions {
    let endianness = match arguments
        .get_one::<String>("endianness")
        .map(String::as_str)
        .expect("No value for argument with default")
    {
        "little" => Endianness::Little,
        "big" => Endianness::Big,
        "native" => Endianness::Native,
        invalid => exit_with_error!("Error: Invalid endianness {}", invalid),
    };
    LoadOptions {
        endianness,
        ..LoadOptions::default()
    }
}

/// Loads the model run specified by the given subcommand arguments.
pub fn load_model_from_arguments(arguments: &ArgMatches) -> Result<Model> {
    let config = archive_config_from_arguments(arguments)?;
    let identity = run_identity_from_arguments(arguments)?;
    let options = load_options_from_arguments(arguments);
    Model::load(&config, identity, &options)
}
