//! Staging report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::SpecStageError;

/// Per-candidate copy outcome: one entry per required filename, each in
/// exactly one of the three buckets.
#[derive(Debug, Default, Clone)]
pub struct ReportFileSet {
    /// Filenames copied successfully, in processing order.
    pub l_copied: Vec<String>,
    /// Filenames absent at the source.
    pub l_missing: Vec<String>,
    /// Per-file copy failures.
    pub errors: Vec<SpecStageError>,
}

impl ReportFileSet {
    /// Number of filenames this outcome accounts for. Equals the length
    /// of the required-filename list handed to `copy_required_files`.
    pub fn total_count(&self) -> usize {
        self.l_copied.len() + self.l_missing.len() + self.errors.len()
    }
}

/// Final run status, checked in priority order: errors beat missing
/// files beat a clean completion. Informational only; it never changes
/// the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStageRunStatus {
    /// At least one copy failure occurred.
    CompletedWithErrors,
    /// No failures, but at least one required file was missing.
    CompletedWithMissing,
    /// Every required file in every processed candidate was copied.
    CompletedClean,
}

/// Aggregate counters and diagnostics for one `stage_ensembles` run.
#[derive(Debug, Default, Clone)]
pub struct ReportStage {
    /// Candidate directories found during enumeration.
    pub cnt_candidates: u64,
    /// Candidates processed (skipped candidates included).
    pub cnt_processed: u64,
    /// Destination directories newly created.
    pub cnt_created: u64,
    /// Candidates skipped at the overwrite confirmation.
    pub cnt_skipped: u64,
    /// Files copied across the whole run.
    pub cnt_copied: u64,
    /// Files missing at their source across the whole run.
    pub cnt_missing: u64,
    /// Per-file failures across the whole run.
    pub errors: Vec<SpecStageError>,
}

impl ReportStage {
    /// Number of collected per-file errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_candidates".to_string(), self.cnt_candidates);
        dict_counts.insert("cnt_processed".to_string(), self.cnt_processed);
        dict_counts.insert("cnt_created".to_string(), self.cnt_created);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_missing".to_string(), self.cnt_missing);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} processed={} created={} skipped={} copied={} missing={} errors={}",
            dict_counts["cnt_processed"],
            dict_counts["cnt_created"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_copied"],
            dict_counts["cnt_missing"],
            dict_counts["cnt_errors"]
        )
    }

    /// Final status classification (errors > missing > clean).
    pub fn run_status(&self) -> EnumStageRunStatus {
        if !self.errors.is_empty() {
            return EnumStageRunStatus::CompletedWithErrors;
        }
        if self.cnt_missing > 0 {
            return EnumStageRunStatus::CompletedWithMissing;
        }
        EnumStageRunStatus::CompletedClean
    }
}

impl fmt::Display for ReportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[STAGE]"))
    }
}

/// Mutable accumulator for staging statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportStageBuilder {
    /// See [`ReportStage::cnt_candidates`].
    pub cnt_candidates: u64,
    /// See [`ReportStage::cnt_processed`].
    pub cnt_processed: u64,
    /// See [`ReportStage::cnt_created`].
    pub cnt_created: u64,
    /// See [`ReportStage::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportStage::cnt_copied`].
    pub cnt_copied: u64,
    /// See [`ReportStage::cnt_missing`].
    pub cnt_missing: u64,
    /// See [`ReportStage::errors`].
    pub errors: Vec<SpecStageError>,
}

impl ReportStageBuilder {
    /// Record the enumerated candidate count.
    pub fn set_candidates(&mut self, cnt_candidates: u64) {
        self.cnt_candidates = cnt_candidates;
    }

    /// Increment processed count by one.
    pub fn add_processed(&mut self) {
        self.cnt_processed += 1;
    }

    /// Increment created count by one.
    pub fn add_created(&mut self) {
        self.cnt_created += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Fold one candidate's per-file outcome into the run counters.
    pub fn merge_file_set(&mut self, report_file_set: ReportFileSet) {
        self.cnt_copied += report_file_set.l_copied.len() as u64;
        self.cnt_missing += report_file_set.l_missing.len() as u64;
        self.errors.extend(report_file_set.errors);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportStage {
        ReportStage {
            cnt_candidates: self.cnt_candidates,
            cnt_processed: self.cnt_processed,
            cnt_created: self.cnt_created,
            cnt_skipped: self.cnt_skipped,
            cnt_copied: self.cnt_copied,
            cnt_missing: self.cnt_missing,
            errors: self.errors,
        }
    }
}
