//! Project-level settings read from an optional TOML file.
//!
//! ```toml
//! search_drives = ["C:", "E:"]
//! cmake = "C:/Tools/cmake/bin/cmake.exe"
//! msbuild = "C:/BuildTools/MSBuild/Current/Bin/MSBuild.exe"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Error;

pub const DEFAULT_SEARCH_DRIVES: [&str; 2] = ["C:", "D:"];

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    /// Drives searched for Visual Studio when none are given on the command line.
    pub search_drives: Option<Vec<String>>,
    /// Configure tool invoked inside the build directory.
    pub cmake: Option<String>,
    /// MSBuild executable used instead of the detected one.
    pub msbuild: Option<PathBuf>,
}

impl ToolSettings {
    /// A missing file is not an error; it just means defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if path.as_os_str().is_empty() || !path.is_file() {
            log::debug!("No settings file at {:?}, using defaults", path);
            return Ok(ToolSettings::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Settings(format!("failed to read {:?}: {}", path, e)))?;
        let settings: ToolSettings = toml::from_str(&content)
            .map_err(|e| Error::Settings(format!("failed to parse {:?}: {}", path, e)))?;
        log::debug!("Loaded settings from {:?}: {:?}", path, settings);
        Ok(settings)
    }

    pub fn cmake_program(&self) -> &str {
        self.cmake.as_deref().unwrap_or("cmake")
    }

    /// Command-line drives win over the settings file, which wins over the defaults.
    pub fn search_drives(&self, cli_drives: &[String]) -> Vec<String> {
        if !cli_drives.is_empty() {
            return cli_drives.to_vec();
        }
        match &self.search_drives {
            Some(drives) => drives.clone(),
            None => DEFAULT_SEARCH_DRIVES.iter().map(|d| d.to_string()).collect(),
        }
    }
}
