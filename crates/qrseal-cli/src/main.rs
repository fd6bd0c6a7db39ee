//! qrseal CLI - sign, render and verify signed QR artifacts.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod config;
mod output;

use args::{EncodeKind, SignArgs};
use commands::{canonicalize, encode, keygen, sign, verify};

#[derive(Parser)]
#[command(name = "qrseal")]
#[command(about = "Signed QR artifacts: ECDSA P-256 over canonical JSON, rendered at level H")]
#[command(version)]
struct Cli {
    /// Increase log detail on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// TOML file with [render], [render.logo] and [stamp] defaults
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a P-256 key pair as PEM files
    Keygen {
        /// Private key output (PKCS#8 PEM)
        #[arg(long, default_value = "signer.pem")]
        out: PathBuf,
        /// Public key output (SPKI PEM); defaults to <out stem>.pub.pem
        #[arg(long)]
        public: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Build and sign a payload, print the artifact and optionally write its QR image
    Sign(SignArgs),
    /// Verify a signed artifact
    Verify {
        /// Public key (SPKI PEM)
        #[arg(long)]
        key: PathBuf,
        /// Artifact JSON file (or stdin if not provided)
        input: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with 2 when invalid and 3 when expired
        #[arg(long)]
        strict: bool,
        /// Evaluate expiry at this RFC 3339 instant instead of now
        #[arg(long, value_parser = args::parse_instant)]
        at: Option<chrono::DateTime<chrono::Utc>>,
    },
    /// Show canonical bytes and fingerprint for a payload or artifact
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<PathBuf>,
    },
    /// Write an unsigned QR code for a link, contact or event
    Encode {
        #[command(subcommand)]
        kind: EncodeKind,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Keygen { out, public, force } => keygen::run(out, public, force),
        Commands::Sign(args) => sign::run(args, &config),
        Commands::Verify {
            key,
            input,
            json,
            strict,
            at,
        } => verify::run(key, input, json, strict, at),
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Encode { kind } => encode::run(kind, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
