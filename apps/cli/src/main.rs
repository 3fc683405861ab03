//! fhirkit command line
//!
//! Usage:
//!   fhirkit normalize patient.json --fhir-version r5
//!   fhirkit validate patient.json --server https://hapi.fhir.org/baseR4

use anyhow::Result;
use clap::{Parser, Subcommand};
use fhirkit_cli::{commands, logging};
use fhirkit_models::FhirVersion;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "fhirkit", version, about = "Normalize and validate FHIR JSON resources")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a resource with the typed models and print it in canonical order
    Normalize {
        /// Path to a FHIR JSON resource
        file: PathBuf,

        /// FHIR release to decode against (r4, r4b, r5)
        #[arg(short = 'f', long, default_value = "r4")]
        fhir_version: FhirVersion,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Decode a resource and send it to a server's $validate operation
    Validate {
        /// Path to a FHIR JSON resource
        file: PathBuf,

        /// FHIR base URL of the validating server
        #[arg(short, long, env = "FHIRKIT_VALIDATOR_URL")]
        server: String,

        /// FHIR release to decode against (r4, r4b, r5)
        #[arg(short = 'f', long, default_value = "r4")]
        fhir_version: FhirVersion,

        /// Bearer token for the validating server
        #[arg(long, env = "FHIRKIT_VALIDATOR_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Normalize {
            file,
            fhir_version,
            compact,
        } => {
            let output = commands::normalize_file(&file, fhir_version, compact)?;
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            file,
            server,
            fhir_version,
            token,
            timeout,
        } => {
            let mut config = fhirkit_validator::RemoteValidatorConfig::new(server)
                .with_timeout(std::time::Duration::from_secs(timeout));
            if let Some(token) = token {
                config = config.with_bearer_token(token);
            }

            let report = commands::validate_file(&file, fhir_version, config).await?;
            Ok(report.emit())
        }
    }
}
