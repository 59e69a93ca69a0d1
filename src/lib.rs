//! `suite_builder` is a command-line wrapper that configures a CMake test suite
//! and, on Windows, builds the generated Visual Studio solutions with MSBuild.
//!
//! ## Features
//! - Detects the newest `Microsoft Visual Studio NN.N` install on the searched
//!   drives and passes the matching `Visual Studio NN [Win64]` generator to CMake.
//! - Reads extra `-D` definitions from a JSON file (`cmake_options.json`).
//! - Cleans the build directory, refusing to touch a filesystem root.
//! - Runs MSBuild over every `.sln` file CMake generated.
//!
//! ## Usage (CLI)
//! ```bash
//! suite_builder --test-dir test --build-dir build --action rebuild --build-type Release
//! ```
//!
//! Actions: `cmake`, `recmake`, `clean`, `build` (default) and `rebuild`.

pub mod app_config;
pub mod cmake;
pub mod settings;
pub mod toolchain;
pub mod utils;

use std::path::PathBuf;

use app_config::{AppConfig, BuildAction};
use cmake::{load_cmake_options, run_build, CMakeCommandBuilder};
use settings::ToolSettings;
use toolchain::{locate_toolchain, ToolchainInfo};
use utils::command_runner::CommandRunner;
use utils::file_system;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(String),
    #[error("Refusing to delete {0:?}: it is a filesystem root")]
    UnsafeClean(PathBuf),
    #[error("Cannot reconfigure: {0:?} does not exist")]
    MissingCache(PathBuf),
    #[error("Invalid CMake options file {0}")]
    OptionsParse(String),
    #[error("Toolchain not found: {0}")]
    ToolchainNotFound(String),
    #[error("Command execution failed: {0}")]
    Subprocess(String),
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File system operation failed: {0}")]
    FileSystem(String),
}

impl Error {
    /// Process exit code for this error. A refused clean is always `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnsafeClean(_) => 1,
            Error::Usage(_) => 2,
            Error::MissingCache(_) => 3,
            Error::OptionsParse(_) => 4,
            Error::ToolchainNotFound(_) => 5,
            Error::Subprocess(_) => 6,
            Error::Settings(_) => 7,
            Error::Io(_) | Error::FileSystem(_) => 8,
        }
    }
}

pub fn run(config: &AppConfig) -> Result<(), Error> {
    config.validate()?;

    let log_config = config.log_config();
    log_config.init();
    let runner = CommandRunner::new();

    log::debug!("Using configuration: {:?}", config);
    let settings = ToolSettings::load(&config.config)?;
    let build_dir = &config.build_dir;

    match config.action {
        BuildAction::Clean => return file_system::clean_dir(build_dir),
        BuildAction::Rebuild => file_system::clean_dir(build_dir)?,
        BuildAction::Recmake => file_system::remove_cmake_cache(build_dir)?,
        BuildAction::Cmake | BuildAction::Build => {}
    }

    let toolchain = locate_toolchain(&settings.search_drives(&config.search_drives))
        .with_msbuild(settings.msbuild.clone());
    if config.action.builds() {
        toolchain.require_msbuild()?;
    }

    configure(config, &settings, &toolchain, &runner)?;

    if config.action.builds() {
        run_build(build_dir, &toolchain, &runner)?;
        log::info!("Build finished in {:?}", build_dir);
    }
    Ok(())
}

fn configure(
    config: &AppConfig,
    settings: &ToolSettings,
    toolchain: &ToolchainInfo,
    runner: &CommandRunner,
) -> Result<(), Error> {
    let cmake_options = load_cmake_options(&config.cmake_options)?;
    file_system::ensure_dir_exists(&config.build_dir)?;

    let command = CMakeCommandBuilder::new(config)
        .cmake_program(settings.cmake_program())
        .configure_command(&config.build_dir, toolchain, &cmake_options);

    log::info!("Configuring {:?} in {:?}", config.test_dir, config.build_dir);
    log::debug!("{}", command.to_command_line());
    let output = runner.run_command(&command.program, command.args.as_slice(), Some(&command.working_dir))?;
    log::info!("{}", output.stdout);
    log::info!("{}", output.stderr);

    if !output.success() {
        return Err(Error::Subprocess(format!(
            "'{}' exited with {}",
            command.to_command_line(),
            output.status
        )));
    }
    Ok(())
}
