use std::time::Instant;

use randseq_core::{IngestConfig, SequenceReport, SequenceTester};

use super::OutputFormat;

/// Label used for standard input.
const STDIN: &str = "-";

pub struct AnalyzeCommandConfig<'a> {
    pub inputs: &'a [String],
    pub chunk_size: usize,
    pub format: OutputFormat,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: AnalyzeCommandConfig<'_>) -> i32 {
    let ingest = IngestConfig::with_chunk_size(cfg.chunk_size);
    let inputs: Vec<&str> = if cfg.inputs.is_empty() {
        vec![STDIN]
    } else {
        cfg.inputs.iter().map(String::as_str).collect()
    };

    let mut reports = Vec::with_capacity(inputs.len());
    let mut failures = 0usize;

    for input in &inputs {
        let t0 = Instant::now();
        match analyze_input(input, ingest) {
            Ok(report) => {
                log::info!(
                    "{input}: {} bytes in {:.3}s",
                    report.total_bytes,
                    t0.elapsed().as_secs_f64()
                );
                reports.push(report);
            }
            Err(e) => {
                eprintln!("{input}: {e}");
                failures += 1;
            }
        }
    }

    match cfg.format {
        OutputFormat::Text => print!("{}", render_text(&reports)),
        OutputFormat::Json => match render_json(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize reports: {e}");
                failures += 1;
            }
        },
    }

    if let Some(path) = cfg.output_path {
        match render_json(&reports) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    eprintln!("Failed to write reports to {path}: {e}");
                    failures += 1;
                } else {
                    eprintln!("Reports saved to: {path}");
                }
            }
            Err(e) => {
                eprintln!("Failed to serialize reports: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 { 1 } else { 0 }
}

/// Stream one input through a fresh tester.
pub fn analyze_input(input: &str, ingest: IngestConfig) -> randseq_core::Result<SequenceReport> {
    let mut tester = SequenceTester::with_config(ingest);
    if input == STDIN {
        tester.add_reader(std::io::stdin().lock())?;
    } else {
        tester.add_file(input)?;
    }
    Ok(tester.finish()?.with_source(input))
}

/// Plain-text reports; a header names each input when there is more than one.
pub fn render_text(reports: &[SequenceReport]) -> String {
    let mut out = String::new();
    let multiple = reports.len() > 1;
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if multiple {
            let label = report.source.as_deref().unwrap_or(STDIN);
            out.push_str(&format!("==> {label} <==\n"));
        }
        out.push_str(&report.text());
    }
    out
}

pub fn render_json(reports: &[SequenceReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
