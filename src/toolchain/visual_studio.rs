use std::collections::BTreeSet;
use std::path::PathBuf;

use super::{ToolchainInfo, ToolchainLocator, VsVersion};
use crate::utils::file_system;

const PROGRAM_FILES_DIRS: [&str; 2] = ["Program Files", "Program Files (x86)"];
const VS_DIR_PREFIX: &str = "Microsoft Visual Studio ";

/// Scans `<drive>\Program Files*` for `Microsoft Visual Studio NN.N`
/// directories and the matching `MSBuild\NN.N\Bin\MSBuild.exe`.
pub struct VisualStudioLocator {
    roots: Vec<PathBuf>,
}

impl VisualStudioLocator {
    pub fn new(search_drives: &[String]) -> Self {
        let roots = search_drives
            .iter()
            .flat_map(|drive| {
                PROGRAM_FILES_DIRS
                    .iter()
                    .map(move |dir| PathBuf::from(format!("{}\\{}", drive, dir)))
            })
            .collect();
        VisualStudioLocator { roots }
    }

    /// Scans the given directories as if they were `Program Files` roots.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        VisualStudioLocator { roots }
    }

    fn detect_versions(&self) -> BTreeSet<VsVersion> {
        let mut versions = BTreeSet::new();
        for root in &self.roots {
            let Some(children) = file_system::list_child_dirs(root) else {
                log::debug!("cannot list {:?}, skipping", root);
                continue;
            };
            versions.extend(children.iter().filter_map(|name| parse_vs_dir_name(name)));
        }
        versions
    }

    fn detect_msbuild(&self, versions: &BTreeSet<VsVersion>) -> Option<PathBuf> {
        for root in &self.roots {
            let Some(children) = file_system::list_child_dirs(root) else {
                continue;
            };
            if !children.iter().any(|name| name == "MSBuild") {
                continue;
            }

            for version in versions.iter().rev() {
                let candidate = root
                    .join("MSBuild")
                    .join(version.to_string())
                    .join("Bin")
                    .join("MSBuild.exe");
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

impl ToolchainLocator for VisualStudioLocator {
    fn locate(&self) -> ToolchainInfo {
        let versions = self.detect_versions();
        let version = versions.iter().next_back().copied();
        let msbuild_path = self.detect_msbuild(&versions);

        match version {
            Some(v) => log::debug!("Found Visual Studio {}", v),
            None => log::debug!("No Visual Studio installation found in {:?}", self.roots),
        }
        if msbuild_path.is_none() {
            log::debug!("MSBuild.exe not found");
        }

        ToolchainInfo { version, msbuild_path }
    }
}

/// Pulls `NN.N` out of a name containing `Microsoft Visual Studio NN.N`.
fn parse_vs_dir_name(name: &str) -> Option<VsVersion> {
    let start = name.find(VS_DIR_PREFIX)? + VS_DIR_PREFIX.len();
    let rest = &name[start..];

    let major_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let major = rest[..major_len].parse().ok()?;
    let rest = rest[major_len..].strip_prefix('.')?;

    let minor_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let minor = rest[..minor_len].parse().ok()?;

    Some(VsVersion { major, minor })
}
