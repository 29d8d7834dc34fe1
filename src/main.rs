use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use gradecard::grading::{grade, Statistics};
use gradecard::params::RawParams;
use gradecard::report::{self, RunLog, Summary};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_IO: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "gradecard")]
#[command(about = "Exam grade report generator (parameters from the environment)", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory the artifacts are written to
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Open the HTML report in the default browser after a successful run
    #[arg(long)]
    open: bool,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // The output directory must exist before any artifact write
    if let Err(e) = fs::create_dir_all(&cli.out_dir) {
        eprintln!(
            "Failed to create output directory {}: {}",
            cli.out_dir.display(),
            e
        );
        std::process::exit(EXIT_IO);
    }

    let log = match RunLog::create(&cli.out_dir.join("run.log")) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Log error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    };

    // Any failure to append to the run log is fatal from here on
    let log_line = |message: &str| {
        if let Err(e) = log.line(message) {
            eprintln!("Log error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    };

    log_line("Script started");

    let raw = RawParams::from_env();
    match serde_json::to_string(&raw) {
        Ok(json) => log_line(&format!("Params {}", json)),
        Err(e) => {
            eprintln!("Failed to serialize parameters: {}", e);
            std::process::exit(EXIT_IO);
        }
    }

    if cli.verbose {
        eprintln!("Read parameters for student {:?}", raw.student_name);
    }

    let params = match gradecard::grading::validate_params(&raw) {
        Ok(params) => params,
        Err(e) => {
            let message = e.to_string();
            if let Err(io) = log.error(&message) {
                eprintln!("Log error: {:#}", io);
                std::process::exit(EXIT_IO);
            }
            eprintln!("{}", message);
            std::process::exit(EXIT_VALIDATION);
        }
    };
    log_line("Validation passed");

    let stats = Statistics::compute(&params.scores);
    let outcome = grade(&stats, &params);

    match serde_json::to_string(&stats) {
        Ok(json) => log_line(&format!("Stats: {}", json)),
        Err(e) => {
            eprintln!("Failed to serialize statistics: {}", e);
            std::process::exit(EXIT_IO);
        }
    }
    log_line(&format!(
        "FinalScore = {:.2} Status = {}",
        outcome.final_score, outcome.status
    ));

    let summary_path = cli.out_dir.join("summary.json");
    let summary = Summary::build(&params, &stats, &outcome);
    if let Err(e) = report::write_summary(&summary_path, &summary) {
        eprintln!("Failed to write summary: {:#}", e);
        std::process::exit(EXIT_IO);
    }
    log_line(&format!(
        "Wrote summary JSON: {}",
        summary_path.display()
    ));

    let report_path = cli.out_dir.join("report.html");
    if let Err(e) = report::write_html_report(&report_path, &params, &stats, &outcome) {
        eprintln!("Failed to write HTML report: {:#}", e);
        std::process::exit(EXIT_IO);
    }
    log_line(&format!("Wrote HTML report: {}", report_path.display()));

    log_line("Script finished successfully");

    let use_colors = report::console::should_use_colors();
    println!(
        "{}",
        report::console::format_outcome(&params, &stats, &outcome, use_colors)
    );
    if cli.verbose {
        println!("{}", report::console::format_score_table(&params.scores));
    }
    println!("{}", report::console::format_artifacts(&cli.out_dir));

    if cli.verbose {
        eprintln!("Finished in {:?}", start_time.elapsed());
    }

    if cli.open {
        if let Err(e) = gradecard::browser::open_report(&report_path) {
            eprintln!("Failed to open browser: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
