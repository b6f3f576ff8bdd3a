//! studysense command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, Subcommand};

use studysense_core::config::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(
    name = "studysense",
    version,
    about = "Study technique recommendations from learning style and history"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the learning-style questionnaire
    Questions,

    /// Classify questionnaire answers into a learning style
    Assess {
        /// JSON object of question id -> rating (1-5)
        #[arg(long)]
        responses: PathBuf,

        /// Learner name stored in the profile
        #[arg(long, default_value = "Learner")]
        name: String,

        /// Write a new learner profile here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Rank study techniques for a learner
    Recommend {
        /// Learner profile JSON
        #[arg(long)]
        profile: PathBuf,

        /// Number of recommendations
        #[arg(long)]
        limit: Option<usize>,

        /// TOML catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// TOML phrasebook overriding reasoning and tip text
        #[arg(long)]
        phrasebook: Option<PathBuf>,

        /// Output format: table, json
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Fail on invalid profile records
        #[arg(long)]
        strict: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show quiz and study session statistics
    Summary {
        /// Learner profile JSON
        #[arg(long)]
        profile: PathBuf,
    },

    /// Check a learner profile or technique catalog for problems
    #[command(group(ArgGroup::new("input").required(true).multiple(true)))]
    Validate {
        /// Learner profile JSON
        #[arg(long, group = "input")]
        profile: Option<PathBuf>,

        /// TOML catalog file or directory
        #[arg(long, group = "input")]
        catalog: Option<PathBuf>,
    },

    /// List the technique catalog
    Catalog {
        /// TOML catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example profile
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studysense=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Questions => commands::questions::execute(),
        Commands::Assess {
            responses,
            name,
            output,
        } => commands::assess::execute(responses, name, output),
        Commands::Recommend {
            profile,
            limit,
            catalog,
            phrasebook,
            format,
            strict,
            config,
        } => commands::recommend::execute(
            profile, limit, catalog, phrasebook, format, strict, config,
        ),
        Commands::Summary { profile } => commands::summary::execute(profile),
        Commands::Validate { profile, catalog } => commands::validate::execute(profile, catalog),
        Commands::Catalog { catalog, config } => commands::catalog::execute(catalog, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
