//! `ensemble-stage` CLI entrypoint.
//!
//! Thin console front-end over `ensemblekit_stage`: parse the flat argument
//! list, render progress events line by line, ask for overwrite
//! confirmation on stdin, print the run summary and exit with 0 on
//! success ("nothing to do" included) or 1 on any fatal condition.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use ensemblekit_stage::{
    EnumStageRunStatus, ReportStage, SpecStageEvent, SpecStageOptions, StageObserver,
    stage_ensembles,
};

const C_USAGE: &str = "\
Prepare ensemble results for analysis.

For each subdirectory in the input path, create a sister directory named
<sub_dir_name>_final_results and copy the essential files
(topology.pdb, samples.xtc, sequence.fasta by default).

Usage:
    ensemble-stage <input_path> [filename1 filename2 ...]

Example:
    ensemble-stage ./bioemu_runs

    This will process:
        ./bioemu_runs/run_1/ -> ./bioemu_runs/run_1_final_results/
        ./bioemu_runs/run_2/ -> ./bioemu_runs/run_2_final_results/
        etc.";

const C_RULER: &str =
    "================================================================================";

#[derive(Debug, Clone, PartialEq, Eq)]
struct SpecCliArgs {
    path_input: PathBuf,
    names_required: Option<Vec<String>>,
}

/// Parse the flat argument list (program name included). Trailing
/// arguments, when present, replace the default filename list entirely.
fn parse_args(l_args: &[String]) -> Option<SpecCliArgs> {
    if l_args.len() < 2 {
        return None;
    }
    let names_required = if l_args.len() > 2 {
        Some(l_args[2..].to_vec())
    } else {
        None
    };
    Some(SpecCliArgs {
        path_input: PathBuf::from(&l_args[1]),
        names_required,
    })
}

/// Console renderer: one printed line per event, confirmation read from
/// stdin. End-of-input during the prompt counts as a decline.
#[derive(Debug, Default)]
struct ConsoleObserver {
    path_dir_input: Option<PathBuf>,
}

impl StageObserver for ConsoleObserver {
    fn confirm_overwrite(&mut self, _name_dir_dst: &str) -> bool {
        print!("    Overwrite contents? (y/n): ");
        let _ = io::stdout().flush();

        let mut c_line = String::new();
        match io::stdin().lock().read_line(&mut c_line) {
            Ok(0) => false,
            Ok(_) => c_line.trim().eq_ignore_ascii_case("y"),
            Err(_) => false,
        }
    }

    fn on_event(&mut self, event: &SpecStageEvent) {
        match event {
            SpecStageEvent::RunStarted {
                path_dir_input,
                cnt_candidates,
                names_required,
            } => {
                self.path_dir_input = Some(path_dir_input.clone());
                if *cnt_candidates == 0 {
                    return;
                }
                println!(
                    "\nProcessing {cnt_candidates} subdirectories in: {}",
                    path_dir_input.display()
                );
                println!("Required files: {}\n", names_required.join(", "));
                println!("{C_RULER}");
            }
            SpecStageEvent::CandidateStarted {
                n_index,
                cnt_candidates,
                name_dir,
            } => println!("\n[{n_index}/{cnt_candidates}] Processing: {name_dir}"),
            SpecStageEvent::DestinationExists { name_dir_dst } => {
                println!("  → Destination already exists: {name_dir_dst}");
            }
            SpecStageEvent::DestinationCreated { name_dir_dst } => {
                println!("  → Created: {name_dir_dst}");
            }
            SpecStageEvent::CandidateSkipped { .. } => println!("    Skipped."),
            SpecStageEvent::CopyPhaseStarted => println!("  → Copying files..."),
            SpecStageEvent::FileCopied { name_file } => {
                println!("    ✓ Copied: {name_file}");
            }
            SpecStageEvent::FileMissing { name_file } => {
                println!("    ⚠ Missing: {name_file}");
            }
            SpecStageEvent::FileErrored { name_file, message } => {
                println!("    ✗ Error copying {name_file}: {message}");
            }
        }
    }
}

fn print_summary(report: &ReportStage) {
    println!("\n{C_RULER}");
    println!("SUMMARY");
    println!("{C_RULER}");
    println!("Directories processed: {}", report.cnt_processed);
    println!("Directories created:   {}", report.cnt_created);
    println!("Directories skipped:   {}", report.cnt_skipped);
    println!("Files copied:          {}", report.cnt_copied);
    println!("Files missing:         {}", report.cnt_missing);
    println!("Errors:                {}", report.error_count());
    println!("{C_RULER}");

    match report.run_status() {
        EnumStageRunStatus::CompletedWithErrors => {
            println!("\n⚠ Warning: Some errors occurred during processing.");
        }
        EnumStageRunStatus::CompletedWithMissing => {
            println!("\n⚠ Warning: Some required files were missing.");
        }
        EnumStageRunStatus::CompletedClean => {
            println!("\n✓ All operations completed successfully!");
        }
    }
}

fn main() -> ExitCode {
    let l_args: Vec<String> = std::env::args().collect();
    let Some(spec_cli_args) = parse_args(&l_args) else {
        eprintln!("{C_USAGE}");
        eprintln!("\nError: Input path required");
        return ExitCode::from(1);
    };

    // An interrupt (including one delivered while blocked on the
    // confirmation prompt) exits with a notice instead of a stack trace.
    let res_handler = ctrlc::set_handler(|| {
        println!("\n\nOperation cancelled by user.");
        std::process::exit(1);
    });
    if let Err(e) = res_handler {
        eprintln!("Warning: failed to install interrupt handler: {e}");
    }

    let mut spec_stage_options = SpecStageOptions::default();
    if let Some(names_required) = spec_cli_args.names_required {
        println!("Custom file list provided: {}", names_required.join(", "));
        spec_stage_options.names_required = names_required;
    }

    let mut observer = ConsoleObserver::default();
    match stage_ensembles(&spec_cli_args.path_input, spec_stage_options, &mut observer) {
        Ok(report) => {
            if report.cnt_candidates == 0 {
                let path_dir_input = observer
                    .path_dir_input
                    .unwrap_or(spec_cli_args.path_input);
                println!("No subdirectories found in: {}", path_dir_input.display());
                return ExitCode::SUCCESS;
            }
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{SpecCliArgs, parse_args};

    fn args(l_args: &[&str]) -> Vec<String> {
        l_args.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn parse_args_requires_input_path() {
        assert_eq!(parse_args(&args(&["ensemble-stage"])), None);
    }

    #[test]
    fn parse_args_defaults_filename_list() {
        let spec_cli_args = parse_args(&args(&["ensemble-stage", "./bioemu_runs"]))
            .expect("input path present");
        assert_eq!(
            spec_cli_args,
            SpecCliArgs {
                path_input: PathBuf::from("./bioemu_runs"),
                names_required: None,
            }
        );
    }

    #[test]
    fn parse_args_trailing_names_replace_defaults() {
        let spec_cli_args = parse_args(&args(&[
            "ensemble-stage",
            "/data/runs",
            "topology.pdb",
            "extra.npz",
        ]))
        .expect("input path present");
        assert_eq!(
            spec_cli_args.names_required,
            Some(vec!["topology.pdb".to_string(), "extra.npz".to_string()])
        );
    }
}
