use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use tracing::info;

use sigil_auth::{TokenConfig, TokenKind, generate_pair};
use sigil_cli::session::{build_pair, parse_claim};
use sigil_config::TokenSettings;

#[derive(Parser)]
#[command(name = "sigil-cli")]
#[command(about = "Sigil CLI - Issue, refresh and inspect signed tokens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue an access/refresh token pair
    Issue {
        /// Subject (`sub` claim) for both tokens
        #[arg(short = 's', long)]
        subject: Option<String>,

        /// Custom access token claim as key=value (repeatable)
        #[arg(short = 'c', long = "claim")]
        claims: Vec<String>,
    },
    /// Issue a pair, then refresh the access token
    Refresh {
        /// Subject (`sub` claim) for both tokens
        #[arg(short = 's', long)]
        subject: Option<String>,

        /// Seconds to wait before refreshing
        #[arg(short = 'w', long, default_value = "1")]
        wait: u64,
    },
    /// Verify a token and print its claims
    Inspect {
        /// The token to verify
        #[arg(short = 't', long)]
        token: String,

        /// Which secret to verify against
        #[arg(short = 'k', long, value_enum, default_value = "access")]
        kind: KindArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Access,
    Refresh,
}

fn main() -> Result<()> {
    dotenv().ok();
    sigil_observability::init_basic_console_logging();

    let cli = Cli::parse();
    let settings = TokenSettings::from_env();

    match cli.command {
        Commands::Issue { subject, claims } => handle_issue(&settings, subject, claims),
        Commands::Refresh { subject, wait } => handle_refresh(&settings, subject, wait),
        Commands::Inspect { token, kind } => handle_inspect(&settings, &token, kind),
    }
}

fn handle_issue(
    settings: &TokenSettings,
    subject: Option<String>,
    claims: Vec<String>,
) -> Result<()> {
    let claims = claims
        .iter()
        .map(|raw| parse_claim(raw))
        .collect::<Result<Vec<_>>>()?;

    let (mut access, mut refresh) = build_pair(settings, subject.as_deref(), claims)?;
    let (access_token, refresh_token) = generate_pair(Some(&mut access), Some(&mut refresh))
        .context("failed to generate token pair")?;

    info!(
        access_ttl = access.expiration().num_seconds(),
        refresh_ttl = refresh.expiration().num_seconds(),
        "Token pair issued"
    );
    println!("Access Token:  {}", access_token);
    println!("Refresh Token: {}", refresh_token);
    Ok(())
}

fn handle_refresh(settings: &TokenSettings, subject: Option<String>, wait: u64) -> Result<()> {
    let (mut access, mut refresh) = build_pair(settings, subject.as_deref(), Vec::new())?;
    let (access_token, _) = generate_pair(Some(&mut access), Some(&mut refresh))
        .context("failed to generate token pair")?;

    if wait > 0 {
        info!(seconds = wait, "Waiting before refresh");
        thread::sleep(Duration::from_secs(wait));
    }

    let refreshed = access
        .refresh_token(Some(&refresh))
        .context("failed to refresh access token")?;

    println!("Original Access Token:  {}", access_token);
    println!("Refreshed Access Token: {}", refreshed);
    Ok(())
}

fn handle_inspect(settings: &TokenSettings, token: &str, kind: KindArg) -> Result<()> {
    let (lifetime, kind) = match kind {
        KindArg::Access => (&settings.access, TokenKind::Access),
        KindArg::Refresh => (&settings.refresh, TokenKind::Refresh),
    };

    // Only the secret and algorithm matter for verification.
    let verifier = TokenConfig::builder(lifetime.secret.as_bytes())
        .signing_method(&lifetime.signing_method)
        .kind(kind)
        .build()
        .context("failed to build verifier")?;

    let parsed = match verifier.verify(token) {
        Ok(parsed) => parsed,
        Err(err) => bail!("{} token rejected: {}", kind, err),
    };

    println!("Algorithm: {:?}", parsed.header.alg);
    println!("{}", serde_json::to_string_pretty(&parsed.claims)?);
    Ok(())
}
