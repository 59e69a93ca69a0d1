use std::path::{Component, Path, PathBuf};

use super::options::CMakeOptionMap;
use crate::app_config::AppConfig;
use crate::toolchain::ToolchainInfo;

/// One CMake configure invocation: the program, its arguments, and the
/// build directory it runs in.
///
/// Executed directly (no shell), so every `-DKEY=VALUE` stays one argument
/// whatever characters the value holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl ConfigureCommand {
    /// Shell form for logs and copy-paste:
    ///
    /// `cd <build> && cmake <test> -DCMAKE_BUILD_TYPE=<type> [-DKEY=VALUE ...] [-G "<generator>"]`
    pub fn to_command_line(&self) -> String {
        let cd = if cfg!(windows) { "cd /d" } else { "cd" };
        let mut parts = vec![
            cd.to_string(),
            shell_quote(&self.working_dir.to_string_lossy()),
            "&&".to_string(),
            shell_quote(&self.program),
        ];
        parts.extend(self.args.iter().map(|arg| shell_quote(arg)));
        parts.join(" ")
    }
}

/// Assembles the command that configures the test suite.
pub struct CMakeCommandBuilder<'a> {
    config: &'a AppConfig,
    cmake_program: &'a str,
}

impl<'a> CMakeCommandBuilder<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        CMakeCommandBuilder {
            config,
            cmake_program: "cmake",
        }
    }

    pub fn cmake_program(mut self, program: &'a str) -> Self {
        self.cmake_program = program;
        self
    }

    pub fn configure_command(
        &self,
        build_dir: &Path,
        toolchain: &ToolchainInfo,
        cmake_options: &CMakeOptionMap,
    ) -> ConfigureCommand {
        let source_dir = source_dir_from(build_dir, &self.config.test_dir);

        let mut args = vec![
            source_dir.to_string_lossy().into_owned(),
            format!("-DCMAKE_BUILD_TYPE={}", self.config.build_type),
        ];

        for (key, value) in cmake_options {
            args.push(format!("-D{}={}", key, value));
        }

        if let Some(generator) = self.generator(toolchain) {
            args.push("-G".to_string());
            args.push(generator);
        }

        ConfigureCommand {
            program: self.cmake_program.to_string(),
            args,
            working_dir: build_dir.to_path_buf(),
        }
    }

    /// The detected generator, unless the user chose their own.
    fn generator(&self, toolchain: &ToolchainInfo) -> Option<String> {
        if let Some(generator) = &self.config.generator {
            log::debug!("Generator override {:?} given, skipping detection", generator);
            return None;
        }
        let detected = toolchain.generator();
        if detected.is_none() && cfg!(windows) {
            log::warn!("Visual Studio was not found; CMake will pick its default generator.");
        }
        detected
    }
}

/// The configure command in its shell form.
pub fn build_configure_command(
    config: &AppConfig,
    toolchain: &ToolchainInfo,
    cmake_options: &CMakeOptionMap,
    build_dir: &Path,
) -> String {
    CMakeCommandBuilder::new(config)
        .configure_command(build_dir, toolchain, cmake_options)
        .to_command_line()
}

/// `test_dir` as seen from inside `build_dir`.
fn source_dir_from(build_dir: &Path, test_dir: &Path) -> PathBuf {
    if test_dir.is_absolute() {
        return test_dir.to_path_buf();
    }

    let mut depth = 0;
    for component in build_dir.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            _ => {
                return std::env::current_dir()
                    .map(|cwd| cwd.join(test_dir))
                    .unwrap_or_else(|_| test_dir.to_path_buf());
            }
        }
    }

    let mut relative: PathBuf = std::iter::repeat("..").take(depth).collect();
    relative.push(test_dir);
    relative
}

fn is_plain(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%\\".contains(c))
}

/// Quotes `s` as a single word for `sh` (or `cmd` on Windows).
fn shell_quote(s: &str) -> String {
    if is_plain(s) {
        s.to_string()
    } else if cfg!(windows) {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}
