//! CLI for randseq — how random does this byte stream look?

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "randseq")]
#[command(about = "randseq — entropy, chi-square, mean, Monte Carlo pi and serial correlation of byte streams")]
#[command(version = randseq_core::VERSION)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze files (or stdin) and print one randomness report per input
    Analyze {
        /// Input files; none or "-" reads stdin
        files: Vec<String>,

        /// Read size in bytes; does not affect results
        #[arg(long, default_value_t = randseq_core::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Also write all reports as JSON to this path
        #[arg(long)]
        output: Option<String>,
    },

    /// Upper-tail probability of a chi-square statistic
    Probability {
        /// Observed chi-square statistic
        chi_square: f64,

        /// Degrees of freedom
        #[arg(long, default_value_t = randseq_core::DEGREES_OF_FREEDOM)]
        df: u32,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Analyze {
            files,
            chunk_size,
            format,
            output,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            inputs: &files,
            chunk_size,
            format: commands::parse_format(&format),
            output_path: output.as_deref(),
        }),
        Commands::Probability { chi_square, df } => commands::probability::run(chi_square, df),
    };
    std::process::exit(code);
}
