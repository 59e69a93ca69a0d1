//! Visual Studio / MSBuild discovery.
//!
//! Detection only happens on Windows. Everywhere else [`locate_toolchain`]
//! hands back an empty [`ToolchainInfo`], and the rest of the crate treats
//! "no Visual Studio" the same way on every platform.

pub mod visual_studio;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::Error;
use visual_studio::VisualStudioLocator;

/// A Visual Studio `major.minor` version, e.g. `14.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VsVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for VsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// What was found on this machine. Both fields are `None` off Windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainInfo {
    pub version: Option<VsVersion>,
    pub msbuild_path: Option<PathBuf>,
}

impl ToolchainInfo {
    /// `Visual Studio <major> [Win64]` for the detected version.
    pub fn generator(&self) -> Option<String> {
        self.version
            .map(|v| generator_label(v, cfg!(target_pointer_width = "64")))
    }

    /// Replaces the detected MSBuild with an explicitly configured one.
    pub fn with_msbuild(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.msbuild_path = path;
        }
        self
    }

    pub fn require_msbuild(&self) -> Result<&Path, Error> {
        self.msbuild_path.as_deref().ok_or_else(|| {
            Error::ToolchainNotFound(
                "MSBuild.exe was not found. Install Visual Studio on a searched drive \
                 (--search-drive), or set `msbuild` in the settings file."
                    .to_string(),
            )
        })
    }
}

pub fn generator_label(version: VsVersion, win64: bool) -> String {
    if win64 {
        format!("Visual Studio {} Win64", version.major)
    } else {
        format!("Visual Studio {}", version.major)
    }
}

/// Finds the installed toolchain. Implementations must not fail: anything
/// that cannot be inspected counts as not installed.
pub trait ToolchainLocator {
    fn locate(&self) -> ToolchainInfo;
}

/// Used on platforms without Visual Studio.
pub struct NoopLocator;

impl ToolchainLocator for NoopLocator {
    fn locate(&self) -> ToolchainInfo {
        ToolchainInfo::default()
    }
}

pub fn locate_toolchain(search_drives: &[String]) -> ToolchainInfo {
    let locator: Box<dyn ToolchainLocator> = if cfg!(windows) {
        Box::new(VisualStudioLocator::new(search_drives))
    } else {
        Box::new(NoopLocator)
    };
    let info = locator.locate();
    log::debug!("Detected toolchain: {:?}", info);
    info
}
