mod boundary;
mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tactica_core::artifacts::{
    ArtifactPaths, DEFAULT_DECODER_PATH, DEFAULT_ENCODERS_PATH, DEFAULT_MODEL_PATH,
};

#[derive(Parser)]
#[command(
    name = "tactica",
    version,
    about = "Formation and tactics recommendations from opponent match statistics"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the classifier artifacts live.
#[derive(Args)]
pub struct ArtifactArgs {
    /// Decision-forest model (JSON)
    #[arg(long, env = "TACTICA_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Categorical feature encoders (JSON)
    #[arg(long, env = "TACTICA_ENCODERS", default_value = DEFAULT_ENCODERS_PATH)]
    pub encoders: PathBuf,

    /// Output label decoder (JSON)
    #[arg(long, env = "TACTICA_DECODER", default_value = DEFAULT_DECODER_PATH)]
    pub decoder: PathBuf,
}

impl ArtifactArgs {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model.clone(),
            encoders: self.encoders.clone(),
            decoder: self.decoder.clone(),
        }
    }
}

/// Opponent statistics. Sources merge in order: --input, then --field, then
/// the named flags.
#[derive(Args)]
pub struct MatchArgs {
    /// JSON object with the match fields ("-" reads stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Form-style field, e.g. --field pass_accuracy=85 (repeatable)
    #[arg(short = 'F', long = "field", value_name = "KEY=VALUE", value_parser = boundary::parse_key_val)]
    pub fields: Vec<(String, String)>,

    /// Opponent formation, e.g. 4-3-3
    #[arg(long)]
    pub formation: Option<String>,

    /// Opponent possession in percent
    #[arg(long)]
    pub possession: Option<String>,

    /// Opponent pass accuracy in percent
    #[arg(long)]
    pub pass_accuracy: Option<String>,

    /// Opponent shots on target
    #[arg(long)]
    pub shots: Option<String>,

    /// Opponent pressing style: Low, Medium or High
    #[arg(long)]
    pub pressing: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a formation, tactics and key player against an opponent
    Recommend {
        #[command(flatten)]
        request: MatchArgs,

        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Skip artifact loading and decide by rules and the default only
        #[arg(long)]
        rules_only: bool,

        /// Prefix for the formation and player image URLs
        #[arg(long, env = "TACTICA_ASSET_BASE", default_value = "")]
        asset_base: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Include the decision trace
        #[arg(long)]
        trace: bool,
    },
    /// Inspect the rule ladder and directive thresholds
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Diagnose classifier artifacts
    Artifacts {
        #[command(subcommand)]
        action: ArtifactsAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List the formation rules in evaluation order
    List,
    /// Explain how tactics and the key player are derived
    Explain,
}

#[derive(Subcommand)]
enum ArtifactsAction {
    /// Strictly load each artifact and report its status
    Check {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
    /// Encode a sample input and show every step through the classifier
    Probe {
        #[command(flatten)]
        request: MatchArgs,

        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Recommend {
            request,
            artifacts,
            rules_only,
            asset_base,
            output,
            trace,
        } => {
            let options = commands::recommend::Options {
                rules_only,
                asset_base: &asset_base,
                output: &output,
                trace,
            };
            if let Err(e) = commands::recommend::run(&request, &artifacts, &options) {
                std::process::exit(boundary::report_error(&e, &output));
            }
            Ok(())
        }
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain => commands::rules::explain(),
        },
        Commands::Artifacts { action } => match action {
            ArtifactsAction::Check { artifacts } => commands::artifacts::check(&artifacts.paths()),
            ArtifactsAction::Probe { request, artifacts } => {
                commands::artifacts::probe(&request, &artifacts.paths())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(boundary::Status::for_error(&e).exit_code());
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
