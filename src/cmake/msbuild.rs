use std::path::Path;

use crate::toolchain::ToolchainInfo;
use crate::utils::command_runner::CommandRunner;
use crate::utils::file_system;
use crate::Error;

pub const SOLUTION_EXTENSION: &str = "sln";

/// Runs MSBuild on every solution file CMake generated in `build_dir`.
///
/// A failing solution does not stop the others; the failures are collected
/// and reported together once every solution has been attempted.
pub fn run_build(build_dir: &Path, toolchain: &ToolchainInfo, runner: &CommandRunner) -> Result<(), Error> {
    let msbuild = toolchain.require_msbuild()?;
    let solutions = file_system::find_files_by_extension(build_dir, SOLUTION_EXTENSION)?;
    if solutions.is_empty() {
        log::warn!("No .{} files found in {:?}", SOLUTION_EXTENSION, build_dir);
        return Ok(());
    }

    let mut failed = Vec::new();
    for solution in &solutions {
        log::info!("Building {:?}", solution);
        let output = runner.run_command(msbuild, &[solution.as_os_str()], None)?;

        log::info!("{}", output.stdout);
        if !output.stderr.trim().is_empty() {
            log::error!("{}", output.stderr);
        }
        if !output.success() {
            log::error!("MSBuild failed for {:?} ({})", solution, output.status);
            failed.push(solution.display().to_string());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::Subprocess(format!("MSBuild failed for: {}", failed.join(", "))))
    }
}
