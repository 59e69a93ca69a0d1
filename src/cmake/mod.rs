//! The `cmake` module turns the parsed options into a CMake configure command
//! and drives MSBuild over the solutions CMake generates.

pub mod command_builder;
pub mod msbuild;
pub mod options;

pub use command_builder::{build_configure_command, CMakeCommandBuilder, ConfigureCommand};
pub use msbuild::run_build;
pub use options::{load_cmake_options, CMakeOptionMap};
