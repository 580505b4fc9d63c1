//! Staging specification models, observer seam and top-level error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region Constants

/// Suffix appended to a candidate directory name to form its results
/// directory name. Directories already carrying the suffix are never
/// treated as candidates, so repeated runs do not nest outputs.
pub const C_SUFFIX_FINAL_RESULTS: &str = "_final_results";

/// Canonical required-filename set for an ensemble run directory.
pub const C_NAMES_REQUIRED_DEFAULT: [&str; 3] =
    ["topology.pdb", "samples.xtc", "sequence.fasta"];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for `stage_ensembles`.
#[derive(Debug, Clone)]
pub struct SpecStageOptions {
    /// Filenames copied from each candidate, in order. Duplicates are
    /// processed independently; an empty list copies nothing.
    pub names_required: Vec<String>,
    /// Results-directory suffix marker.
    pub suffix_results: String,
}

impl Default for SpecStageOptions {
    fn default() -> Self {
        Self {
            names_required: C_NAMES_REQUIRED_DEFAULT
                .iter()
                .map(|c| c.to_string())
                .collect(),
            suffix_results: C_SUFFIX_FINAL_RESULTS.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ObserverSeam

/// Progress notifications emitted while a staging run executes, in
/// chronological order. One event per console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecStageEvent {
    /// Run setup finished; candidates are enumerated and sorted.
    RunStarted {
        /// Resolved absolute input directory.
        path_dir_input: PathBuf,
        /// Number of candidate subdirectories found.
        cnt_candidates: usize,
        /// Required-filename set in effect for this run.
        names_required: Vec<String>,
    },
    /// A candidate directory begins processing (1-based index).
    CandidateStarted {
        /// Position of this candidate in the sorted order.
        n_index: usize,
        /// Total candidate count.
        cnt_candidates: usize,
        /// Candidate directory basename.
        name_dir: String,
    },
    /// Destination directory already exists; a confirmation follows.
    DestinationExists {
        /// Destination directory basename.
        name_dir_dst: String,
    },
    /// Destination directory was newly created.
    DestinationCreated {
        /// Destination directory basename.
        name_dir_dst: String,
    },
    /// Operator declined overwrite; candidate contributes no copies.
    CandidateSkipped {
        /// Destination directory basename.
        name_dir_dst: String,
    },
    /// Per-file copy phase begins for the current candidate.
    CopyPhaseStarted,
    /// One required file copied successfully.
    FileCopied {
        /// Copied filename.
        name_file: String,
    },
    /// One required file absent at the source (non-fatal).
    FileMissing {
        /// Missing filename.
        name_file: String,
    },
    /// One required file failed to copy (non-fatal).
    FileErrored {
        /// Failed filename.
        name_file: String,
        /// Underlying error text.
        message: String,
    },
}

/// Decision and progress seam between the staging engine and its caller.
///
/// The engine never touches stdin/stdout; interactive confirmation and
/// line-by-line progress rendering are the observer's concern. How an
/// end-of-input condition during confirmation is handled is up to the
/// implementor (the bundled CLI treats it as a decline).
pub trait StageObserver {
    /// Decide whether to reuse an already existing destination directory.
    /// Returning `false` skips the candidate without copying anything.
    fn confirm_overwrite(&mut self, name_dir_dst: &str) -> bool;

    /// Receive one progress event.
    fn on_event(&mut self, event: &SpecStageEvent);
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// One per-file copy failure with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStageError {
    /// Source path that failed to copy.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// "Top-level call failed" errors (input validation / setup stage).
///
/// Per-file failures never surface here; they are recorded in the run
/// report and processing continues.
#[derive(Debug)]
pub enum StageRunError {
    /// Input path does not exist.
    PathNotFound(PathBuf),
    /// Input path exists but is not a directory.
    NotADirectory(PathBuf),
    /// Enumerating the input directory failed.
    ScanFailed {
        /// Directory that failed to enumerate.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Destination directory creation failed. Fatal to the remaining
    /// batch; there is no per-directory recovery.
    DestinationInitFailed {
        /// Destination path that failed initialization.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for StageRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathNotFound(path) => {
                write!(f, "Input path does not exist: {}", path.display())
            }
            Self::NotADirectory(path) => {
                write!(f, "Input path is not a directory: {}", path.display())
            }
            Self::ScanFailed { path, message } => {
                write!(f, "Failed to scan input directory {}: {message}", path.display())
            }
            Self::DestinationInitFailed { path, message } => {
                write!(
                    f,
                    "Failed to create destination {}: {message}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for StageRunError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
