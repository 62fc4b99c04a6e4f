use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crm::api::{self, ApiBoundary, HttpApi, LocalApi};
use crm::config::{ConfigLoader, CrmConfig};
use crm::jobs::{register_jobs, Clock, IntervalScheduler, Job, JobKind, SystemClock};
use crm::lifecycle::{setup_tracing, CrmSystem};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "crm", version, about = "CRM backend and maintenance jobs")]
struct Cli {
    /// Optional .env file loaded before reading CRM_* variables.
    #[arg(long, global = true, env = "CRM_ENV_FILE")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the API.
    Serve {
        /// Also run the maintenance jobs in process.
        #[arg(long)]
        with_jobs: bool,
    },
    /// Run one job once against CRM_API_URL.
    RunJob {
        #[arg(value_enum)]
        job: JobKind,
    },
    /// Run every job on its interval against CRM_API_URL until interrupted.
    Schedule,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    let config = ConfigLoader::new(cli.env_file)
        .load()
        .context("loading configuration")?;
    info!(?config, "Configuration loaded");

    match cli.command {
        Command::Serve { with_jobs } => serve(&config, with_jobs).await,
        Command::RunJob { job } => {
            let api = http_api(&config)?;
            job.build_with_file_sink(&config, api, Arc::new(SystemClock))
                .run()
                .await;
            Ok(())
        }
        Command::Schedule => {
            let mut scheduler = IntervalScheduler::new();
            register_jobs(&mut scheduler, &config, http_api(&config)?, clock());
            tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
            scheduler.shutdown().await;
            Ok(())
        }
    }
}

async fn serve(config: &CrmConfig, with_jobs: bool) -> anyhow::Result<()> {
    let system = CrmSystem::new(config.store_buffer);
    let service = system.service();

    let mut scheduler = IntervalScheduler::new();
    if with_jobs {
        let local: Arc<dyn ApiBoundary> = Arc::new(LocalApi::new(service.clone()));
        register_jobs(&mut scheduler, config, local, clock());
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(with_jobs, "Starting API");

    api::serve(listener, service, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .context("serving API")?;

    // In-process jobs hold service clones; stop them before closing the stores.
    scheduler.shutdown().await;
    system.shutdown().await?;
    Ok(())
}

fn http_api(config: &CrmConfig) -> anyhow::Result<Arc<dyn ApiBoundary>> {
    let api = HttpApi::new(config.api_url.clone(), config.http_timeout)?;
    Ok(Arc::new(api))
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
