use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Error;

pub const CMAKE_CACHE_FILE: &str = "CMakeCache.txt";

pub fn ensure_dir_exists(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::FileSystem(format!("Failed to create directory {:?}: {}", path, e)))?;
        log::info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// True for `/`, and on Windows also for a bare drive such as `C:` or `C:\`.
pub fn is_root_dir_path(path: &Path) -> bool {
    is_root_dir_str(&path.to_string_lossy(), cfg!(windows))
}

fn is_root_dir_str(path: &str, windows: bool) -> bool {
    if windows {
        let bytes = path.as_bytes();
        let is_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
        if is_drive && (bytes.len() == 2 || (bytes.len() == 3 && (bytes[2] == b'\\' || bytes[2] == b'/'))) {
            return true;
        }
    }
    path == "/"
}

/// Deletes `build_dir` and everything under it.
///
/// An empty path means there is nothing to clean. Roots are refused without
/// touching the disk. Failures on individual entries are logged and skipped.
pub fn clean_dir(build_dir: &Path) -> Result<(), Error> {
    if build_dir.as_os_str().is_empty() {
        return Ok(());
    }

    if is_root_dir_path(build_dir) {
        return Err(Error::UnsafeClean(build_dir.to_path_buf()));
    }

    if !build_dir.exists() {
        log::debug!("{:?} does not exist, nothing to clean", build_dir);
        return Ok(());
    }

    log::debug!("delete {:?} directory", build_dir);
    for entry in WalkDir::new(build_dir).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        let removed = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };
        if let Err(e) = removed {
            log::debug!("failed to delete {:?}: {}", entry.path(), e);
        }
    }
    Ok(())
}

/// Deletes only `CMakeCache.txt`, so the next configure starts fresh.
pub fn remove_cmake_cache(build_dir: &Path) -> Result<(), Error> {
    let cache_path = build_dir.join(CMAKE_CACHE_FILE);
    log::debug!("delete {:?}", cache_path);
    fs::remove_file(&cache_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingCache(cache_path.clone()),
        _ => Error::Io(e),
    })
}

/// Files directly inside `dir` whose extension is `extension`, sorted by name.
pub fn find_files_by_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::FileSystem(format!("Error reading directory entry: {}", e)))?;
        if entry.file_type().is_file() && entry.path().extension().map_or(false, |ext| ext == extension) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// Names of the immediate subdirectories of `dir`, or `None` if it cannot be listed.
pub fn list_child_dirs(dir: &Path) -> Option<Vec<String>> {
    let entries = fs::read_dir(dir).ok()?;
    Some(
        entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map_or(false, |t| t.is_dir()))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
    )
}
