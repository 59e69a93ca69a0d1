use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;

use crate::Error;

/// What the tool should do with the build directory.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildAction {
    /// Run CMake and exit
    Cmake,
    /// Delete CMakeCache.txt, then run CMake
    Recmake,
    /// Delete the build directory and exit
    Clean,
    /// Run CMake, then MSBuild on every generated solution file
    Build,
    /// Delete the build directory, then run CMake and MSBuild
    Rebuild,
}

impl BuildAction {
    /// Actions that need MSBuild after configuring.
    pub fn builds(self) -> bool {
        matches!(self, BuildAction::Build | BuildAction::Rebuild)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildType {
    #[value(name = "Debug")]
    Debug,
    #[value(name = "Release")]
    Release,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Debug => f.write_str("Debug"),
            BuildType::Release => f.write_str("Release"),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "CMake wrapper for building a test suite", long_about = None)]
pub struct AppConfig {
    /// Relative path to the test case directory
    #[clap(long, value_parser, default_value = "test")]
    pub test_dir: PathBuf,

    /// Relative path to the build output directory
    #[clap(long, value_parser, default_value = "build")]
    pub build_dir: PathBuf,

    /// cmake: run CMake and exit. recmake: delete CMakeCache.txt and run CMake.
    /// clean: delete the build directory and exit. build: run CMake, then MSBuild
    /// on the generated solution files. rebuild: clean, then build.
    #[clap(long, value_enum, default_value_t = BuildAction::Build)]
    pub action: BuildAction,

    /// Path to a JSON object of extra CMake definitions, e.g. {"KEY": "VALUE"}
    #[clap(long, value_parser, default_value = "cmake_options.json")]
    pub cmake_options: PathBuf,

    #[clap(long, value_enum, default_value_t = BuildType::Debug)]
    pub build_type: BuildType,

    /// Explicit generator choice; turns off generator detection. Without it,
    /// 'Visual Studio NN [Win64]' is passed to CMake on Windows when Visual
    /// Studio is installed on a searched drive.
    #[clap(long)]
    pub generator: Option<String>,

    /// Drive searched for Visual Studio and MSBuild (repeatable)
    #[clap(long = "search-drive", value_name = "DRIVE")]
    pub search_drives: Vec<String>,

    /// Optional TOML settings file
    #[clap(long, value_parser, default_value = "suite_builder.toml")]
    pub config: PathBuf,

    /// Print debug messages
    #[clap(long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Suppress execution log messages
    #[clap(long)]
    pub quiet: bool,
}

impl AppConfig {
    pub fn new() -> Self {
        AppConfig::parse()
    }

    /// Rejects flag combinations clap cannot see when the config is built by hand.
    pub fn validate(&self) -> Result<(), Error> {
        if self.debug && self.quiet {
            return Err(Error::Usage(
                "--debug and --quiet cannot be used together".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_flags(self.debug, self.quiet)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::parse_from(["suite_builder"])
    }
}

/// Verbosity chosen on the command line; installs the process-wide logger once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    level: LevelFilter,
}

impl LogConfig {
    pub fn from_flags(debug: bool, quiet: bool) -> Self {
        let level = if quiet {
            LevelFilter::Off
        } else if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        LogConfig { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Installs the stderr logger. Later calls are no-ops.
    pub fn init(&self) {
        env_logger::Builder::new()
            .filter_level(self.level)
            .format_timestamp(None)
            .target(env_logger::Target::Stderr)
            .try_init()
            .ok();
    }
}
