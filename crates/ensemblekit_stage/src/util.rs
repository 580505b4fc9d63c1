use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::spec::StageRunError;

////////////////////////////////////////////////////////////////////////////////
// #region PathResolution

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

fn _normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    _absolutize_path(path)
}

/// Resolve the input root to an absolute path and validate it exists and
/// is a directory.
pub(crate) fn resolve_input_dir(path_input: &Path) -> Result<PathBuf, StageRunError> {
    let path_dir_input = _normalize_path(path_input);
    if !path_dir_input.exists() {
        return Err(StageRunError::PathNotFound(path_dir_input));
    }
    if !path_dir_input.is_dir() {
        return Err(StageRunError::NotADirectory(path_dir_input));
    }
    Ok(path_dir_input)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CandidateEnumeration

#[derive(Debug, Clone)]
pub(crate) struct SpecCandidateDir {
    pub(crate) path_dir_src: PathBuf,
    pub(crate) name_dir: String,
}

/// Enumerate immediate child directories of `path_dir_input` whose name
/// does not end with `suffix_results`, sorted by name for deterministic
/// processing order regardless of filesystem enumeration order.
pub(crate) fn list_candidate_dirs(
    path_dir_input: &Path,
    suffix_results: &str,
) -> Result<Vec<SpecCandidateDir>, StageRunError> {
    let iter_entries = fs::read_dir(path_dir_input).map_err(|e| StageRunError::ScanFailed {
        path: path_dir_input.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut l_candidates: Vec<SpecCandidateDir> = Vec::new();
    for _entry_res in iter_entries {
        let entry = _entry_res.map_err(|e| StageRunError::ScanFailed {
            path: path_dir_input.to_path_buf(),
            message: e.to_string(),
        })?;

        let path_entry = entry.path();
        let cfg_file_type = entry.file_type().map_err(|e| StageRunError::ScanFailed {
            path: path_entry.clone(),
            message: e.to_string(),
        })?;

        // Symlinked directories count as candidates, like a plain `is_dir`.
        let b_is_dir =
            cfg_file_type.is_dir() || (cfg_file_type.is_symlink() && path_entry.is_dir());
        if !b_is_dir {
            continue;
        }

        let c_name = entry.file_name().to_string_lossy().to_string();
        if c_name.ends_with(suffix_results) {
            continue;
        }

        l_candidates.push(SpecCandidateDir {
            path_dir_src: path_entry,
            name_dir: c_name,
        });
    }

    l_candidates.sort_by(|a, b| a.name_dir.cmp(&b.name_dir));
    Ok(l_candidates)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy one file and carry over its metadata (permissions, timestamps and
/// xattrs on Linux). An existing destination file is replaced.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;
    #[cfg(target_os = "linux")]
    {
        apply_metadata_linux(path_file_src, path_file_dst)?;
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn apply_metadata_linux(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    copy_xattrs_linux(path_file_src, path_file_dst);
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        let _ = xattr::set(path_file_dst, &name, &raw_value);
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
