//! Operator tool: verify one bearer token against the configured trust anchor

use clap::Parser;
use cryypt_bearer::{TrustConfiguration, Verifier};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bearer-verify")]
#[command(about = "Verify an RS256 bearer token using JWT_* settings")]
struct Cli {
    /// Token to verify; read from stdin when omitted
    #[arg(long)]
    token: Option<String>,

    /// TOML settings file, overlaid by JWT_* environment variables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluate at this unix time instead of now
    #[arg(long)]
    at: Option<i64>,

    /// Also print the stage that rejected the token
    #[arg(long)]
    explain: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match TrustConfiguration::load_with(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    let raw = match cli.token {
        Some(token) => token,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("failed to read token from stdin: {e}");
                return ExitCode::from(2);
            }
            buf
        }
    };
    let raw = raw.trim();

    let verifier = Verifier::new(config);
    let now = cli.at.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let outcome = verifier.verify(raw, now);

    let mut report = serde_json::json!({
        "authorized": outcome.authorized,
        "scope": outcome.scope,
    });
    if cli.explain {
        if let Err(e) = verifier.diagnose(raw, now) {
            report["stage"] = e.stage().into();
            report["reason"] = e.to_string().into();
        }
    }
    println!("{report}");

    if outcome.authorized {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
