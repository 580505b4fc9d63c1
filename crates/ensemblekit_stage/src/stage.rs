//! Candidate enumeration and batch staging orchestration.

use std::fs;
use std::path::Path;

use crate::report::{ReportFileSet, ReportStage, ReportStageBuilder};
use crate::spec::{SpecStageError, SpecStageEvent, SpecStageOptions, StageObserver, StageRunError};
use crate::util::{copy_file_with_metadata, list_candidate_dirs, resolve_input_dir};

/// Copy each required filename from `dir_source` into `dir_destination`,
/// in list order.
///
/// Per filename exactly one outcome is recorded: copied, missing at the
/// source, or errored. A copy failure never aborts the batch; it is
/// recorded and processing moves to the next filename. Existing
/// destination files of the same name are replaced, metadata included.
/// Duplicate filenames are processed independently.
///
/// The returned [`ReportFileSet`] satisfies
/// `total_count() == names_required.len()`.
pub fn copy_required_files(
    dir_source: &Path,
    dir_destination: &Path,
    names_required: &[String],
    observer: &mut dyn StageObserver,
) -> ReportFileSet {
    let mut report_file_set = ReportFileSet::default();

    for name_file in names_required {
        let path_file_src = dir_source.join(name_file);
        let path_file_dst = dir_destination.join(name_file);

        if !path_file_src.exists() {
            report_file_set.l_missing.push(name_file.clone());
            observer.on_event(&SpecStageEvent::FileMissing {
                name_file: name_file.clone(),
            });
            continue;
        }

        match copy_file_with_metadata(&path_file_src, &path_file_dst) {
            Ok(_) => {
                report_file_set.l_copied.push(name_file.clone());
                observer.on_event(&SpecStageEvent::FileCopied {
                    name_file: name_file.clone(),
                });
            }
            Err(e) => {
                report_file_set.errors.push(SpecStageError {
                    path: path_file_src,
                    exception: e.to_string(),
                });
                observer.on_event(&SpecStageEvent::FileErrored {
                    name_file: name_file.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report_file_set
}

/// Stage every candidate subdirectory of `dir_input` into its sibling
/// results directory.
///
/// Candidates are the immediate child directories whose name does not end
/// with the results suffix, processed in alphabetical order. Per candidate:
/// - destination exists: ask `observer.confirm_overwrite`; a decline skips
///   the candidate (no files touched), an accept reuses the directory
///   without recreating it;
/// - destination absent: create it (with parents), counted as created;
/// - then copy the required filename set via [`copy_required_files`].
///
/// Every candidate increments the processed count, skipped or not.
///
/// Returns [`ReportStage`] when the run completes (per-file failures are
/// stored in the report). Returns [`StageRunError`] only for setup
/// failures and for destination directory creation failures; the latter
/// abort the remaining batch.
pub fn stage_ensembles<P>(
    dir_input: P,
    spec_stage_options: SpecStageOptions,
    observer: &mut dyn StageObserver,
) -> Result<ReportStage, StageRunError>
where
    P: AsRef<Path>,
{
    let path_dir_input = resolve_input_dir(dir_input.as_ref())?;
    let l_candidates = list_candidate_dirs(&path_dir_input, &spec_stage_options.suffix_results)?;
    let cnt_candidates = l_candidates.len();

    observer.on_event(&SpecStageEvent::RunStarted {
        path_dir_input: path_dir_input.clone(),
        cnt_candidates,
        names_required: spec_stage_options.names_required.clone(),
    });

    let mut builder_stage_report = ReportStageBuilder::default();
    builder_stage_report.set_candidates(cnt_candidates as u64);

    for (n_idx, spec_candidate) in l_candidates.into_iter().enumerate() {
        observer.on_event(&SpecStageEvent::CandidateStarted {
            n_index: n_idx + 1,
            cnt_candidates,
            name_dir: spec_candidate.name_dir.clone(),
        });

        let name_dir_dst = format!(
            "{}{}",
            spec_candidate.name_dir, spec_stage_options.suffix_results
        );
        let path_dir_dst = path_dir_input.join(&name_dir_dst);

        if path_dir_dst.exists() {
            observer.on_event(&SpecStageEvent::DestinationExists {
                name_dir_dst: name_dir_dst.clone(),
            });
            if !observer.confirm_overwrite(&name_dir_dst) {
                observer.on_event(&SpecStageEvent::CandidateSkipped { name_dir_dst });
                builder_stage_report.add_skipped();
                builder_stage_report.add_processed();
                continue;
            }
        } else {
            fs::create_dir_all(&path_dir_dst).map_err(|e| {
                StageRunError::DestinationInitFailed {
                    path: path_dir_dst.clone(),
                    message: e.to_string(),
                }
            })?;
            observer.on_event(&SpecStageEvent::DestinationCreated {
                name_dir_dst: name_dir_dst.clone(),
            });
            builder_stage_report.add_created();
        }

        observer.on_event(&SpecStageEvent::CopyPhaseStarted);
        let report_file_set = copy_required_files(
            &spec_candidate.path_dir_src,
            &path_dir_dst,
            &spec_stage_options.names_required,
            observer,
        );
        builder_stage_report.merge_file_set(report_file_set);
        builder_stage_report.add_processed();
    }

    Ok(builder_stage_report.build())
}
