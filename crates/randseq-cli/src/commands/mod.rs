pub mod analyze;
pub mod probability;

/// How reports are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse an output format string into the enum.
pub fn parse_format(s: &str) -> OutputFormat {
    match s {
        "text" | "txt" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        _ => {
            eprintln!("Unknown output format '{s}', using text");
            OutputFormat::Text
        }
    }
}
