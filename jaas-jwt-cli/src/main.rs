use anyhow::Context;
use clap::Parser;
use jaas_jwt::sign_token;
use jaas_jwt_cli::cli_args::Opt;
use jaas_jwt_cli::write_token;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};

fn main() -> anyhow::Result<()> {
    // stdout carries the token and nothing else.
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            )
            .with_writer(std::io::stderr)
            .finish(),
    )
    .context("failed to install tracing subscriber")?;

    let opt = Opt::parse();

    let key = opt.signing_key().map_err(|e| {
        error!("Failed to load private key: {e}");
        e
    })?;
    debug!("Using {:?}", key);

    let input = opt.claims_input();
    let token = sign_token(&input, &key).map_err(|e| {
        error!("Failed to generate JaaS token: {e}");
        e
    })?;

    write_token(&mut std::io::stdout().lock(), &token).context("failed to write token")?;
    Ok(())
}
