//! genai-fit CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use genai_fit_core::model::Section;

mod commands;

#[derive(Parser)]
#[command(
    name = "genai-fit",
    version,
    about = "Should I Learn Generative AI? A career-fit self-assessment"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a file of answers
    Score {
        /// Answers TOML file
        #[arg(long)]
        answers: PathBuf,

        /// Question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the questions of a bank
    Questions {
        /// Question bank TOML (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Only list one section: psychological, technical, wiscar
        #[arg(long)]
        section: Option<Section>,
    },

    /// Validate a question bank TOML file
    Validate {
        /// Path to the question bank
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create a starter config and answers file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("genai_fit=info".parse().expect("valid directive"))
                .add_directive("genai_fit_core=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            bank,
            config,
            format,
            output,
        } => commands::take::execute(bank, config, format, output),
        Commands::Score {
            answers,
            bank,
            config,
            format,
            output,
        } => commands::score::execute(answers, bank, config, format, output),
        Commands::Questions { bank, section } => commands::questions::execute(bank, section),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
