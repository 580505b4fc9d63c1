//! `ensemblekit_stage` v1:
//! Batch staging engine for ensemble result directories.
//!
//! For every candidate subdirectory of an input root, copy a required set
//! of result files into a sibling `<name>_final_results` directory and
//! aggregate per-file outcomes into a run report.
//!
//! - `stage`  : candidate iteration and copy orchestration
//! - `spec`   : options/events/errors and the observer seam
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod report;
pub mod spec;
pub mod stage;
mod util;

pub use report::{EnumStageRunStatus, ReportFileSet, ReportStage, ReportStageBuilder};
pub use spec::{
    C_NAMES_REQUIRED_DEFAULT, C_SUFFIX_FINAL_RESULTS, SpecStageError, SpecStageEvent,
    SpecStageOptions, StageObserver, StageRunError,
};
pub use stage::{copy_required_files, stage_ensembles};
