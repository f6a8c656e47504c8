use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    foliosync::logging::init().context("init logging")?;

    let cli = foliosync::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        foliosync::cli::Command::Badges(args) => {
            foliosync::badges::run(args).await.context("badges")?;
        }
        foliosync::cli::Command::Articles(args) => {
            foliosync::articles::run(args).await.context("articles")?;
        }
    }

    Ok(())
}
