//! Segment a parsed document into its chapter/section tree.
//!
//! Reads the page-level OCR/parse JSON and the detected table of contents,
//! runs the segmentation pipeline, and writes the populated section tree.
//!
//! Usage:
//!   cargo run --release --bin segment_document -- pages.json chapters.json
//!   cargo run --release --bin segment_document -- pages.json chapters.json \
//!       --output chapters_with_text.json --report coverage_report.json

use doc_segmenter::pipeline::SegmentationPipeline;
use std::path::PathBuf;
use std::process::ExitCode;

struct CliArgs {
    pages_path: PathBuf,
    toc_path: PathBuf,
    output_path: PathBuf,
    report_path: Option<PathBuf>,
}

impl CliArgs {
    fn from_env() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut positional: Vec<String> = Vec::new();
        let mut output_path = PathBuf::from("chapters_with_text.json");
        let mut report_path = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    output_path = PathBuf::from(args.get(i)?);
                },
                "--report" => {
                    i += 1;
                    report_path = Some(PathBuf::from(args.get(i)?));
                },
                other => positional.push(other.to_string()),
            }
            i += 1;
        }

        if positional.len() != 2 {
            return None;
        }
        let mut positional = positional.into_iter();
        Some(Self {
            pages_path: PathBuf::from(positional.next()?),
            toc_path: PathBuf::from(positional.next()?),
            output_path,
            report_path,
        })
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = CliArgs::from_env() else {
        eprintln!(
            "Usage: segment_document <pages.json> <chapters.json> \
             [--output <out.json>] [--report <report.json>]"
        );
        return ExitCode::FAILURE;
    };

    let pipeline = SegmentationPipeline::new();
    let output = match pipeline.run_files(&args.pages_path, &args.toc_path) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("Segmentation failed: {err}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(err) = output.write_json(&args.output_path) {
        eprintln!("Failed to write {}: {err}", args.output_path.display());
        return ExitCode::FAILURE;
    }

    if let Some(report_path) = &args.report_path {
        if let Err(err) = output.write_report_json(report_path) {
            eprintln!("Failed to write {}: {err}", report_path.display());
            return ExitCode::FAILURE;
        }
    }

    println!("Sections written to {}", args.output_path.display());
    println!("  sections:           {}", output.sections.len());
    println!("  pages walked:       {}", output.stats.pages_walked);
    println!("  boundary splits:    {}", output.stats.boundary_pages);
    println!("  fallback pages:     {}", output.stats.fallback_pages);
    println!("  level corrections:  {}", output.corrections.total);
    println!(
        "  coverage:           {:.1}% ({})",
        output.report.coverage_ratio * 100.0,
        output.report.verdict
    );
    println!("  duplication factor: {:.2}", output.report.duplication_factor);
    if !output.report.uncovered_pages.is_empty() {
        println!("  uncovered pages:    {:?}", output.report.uncovered_pages);
    }

    ExitCode::SUCCESS
}
