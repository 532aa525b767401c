mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use kubelift_core::ClusterContext;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut context = ClusterContext::default()
        .with_namespace(cli.namespace.as_str())
        .with_store_dir(&cli.store_dir)
        .with_backend(cli.backend);
    if let Some(url) = &cli.api_url {
        context = context.with_api_url(url.as_str());
    }
    if let Some(url) = &cli.discovery_url {
        context = context.with_discovery_url(url.as_str());
    }
    if let Some(path) = &cli.kubeconfig {
        context = context.with_kubeconfig(path);
    }

    let outcome = match cli.command {
        Commands::Explain { kind } => commands::explain::run(&context, &kind).await,
        Commands::Save { name, file } => commands::save::run(&context, &name, &file).await,
        Commands::Submit { name, to_namespace } => {
            commands::submit::run(&context, &name, to_namespace.as_deref()).await
        }
        Commands::BuildDeployment {
            image,
            port,
            name,
            replicas,
            save_as,
        } => commands::build::run(&context, &image, port, &name, replicas, save_as.as_deref()).await,
    }?;

    if !outcome {
        std::process::exit(1);
    }
    Ok(())
}
