//! Operator CLI for a running `reaper-agent` instance.
//!
//! Read-only by design: there is no policy authoring here, only the checks
//! an operator actually runs against a live decision point — health, a
//! manual `/check` probe for debugging, and a peek at `/metrics`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reaper")]
#[command(about = "Reaper CLI - operator tool for a running reaper-agent")]
#[command(version = reaper_core::VERSION)]
struct Cli {
    /// Base URL of the reaper-agent instance, e.g. http://localhost:8080
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    host: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the agent's health endpoint
    Health,
    /// Fetch the agent's Prometheus metrics
    Metrics,
    /// Send a manual decision request, for debugging
    Check {
        /// Username to evaluate the request as
        #[arg(long)]
        user: String,
        /// Bucket name
        #[arg(long)]
        bucket: String,
        /// Object key within the bucket, if any
        #[arg(long)]
        object: Option<String>,
        /// S3 action verb, e.g. s3:GetObject
        #[arg(long, default_value = "s3:GetObject")]
        action: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let body = reaper_cli::fetch_health(&client, &cli.host).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Metrics => {
            println!("{}", reaper_cli::fetch_metrics(&client, &cli.host).await?);
        }
        Commands::Check {
            user,
            bucket,
            object,
            action,
        } => {
            let (status, body) = reaper_cli::send_check(&client, &cli.host, &user, &bucket, object.as_deref(), &action).await?;
            println!("{status}: {}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}
