//! The `utils` module provides helpers for running external commands and for
//! the file system work around the build directory.

pub mod command_runner;
pub mod file_system;
