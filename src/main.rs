use clap::{Parser, Subcommand};
use distributed_recommender::aggregator::ranking::aggregate;
use distributed_recommender::aggregator::store::RecommendationStore;
use distributed_recommender::config::{CoordinatorConfig, WorkerConfig};
use distributed_recommender::coordinator::service::Coordinator;
use distributed_recommender::dataset::loader::{load_reviews, Dataset};
use distributed_recommender::dataset::partitioner::{shuffle_seeded, split};
use distributed_recommender::engine::recommend::RecommendationEngine;
use distributed_recommender::query::handlers::router;
use distributed_recommender::query::prompt::run_prompt;
use distributed_recommender::worker::client::{WorkerClient, WorkerOutcome};
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recommender")]
#[command(about = "Distributed collaborative-filtering recommender", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Partition the dataset, distribute it to workers and serve the rankings
    Coordinator {
        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Review CSV, overrides dataset.path
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Number of partitions, overrides dataset.partitions
        #[arg(long)]
        partitions: Option<usize>,

        /// Serve HTTP only, without the terminal prompt
        #[arg(long)]
        no_prompt: bool,
    },
    /// Process one partition from the coordinator and exit
    Worker {
        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Coordinator address, overrides server.address
        #[arg(long)]
        server: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Coordinator {
            config,
            dataset,
            partitions,
            no_prompt,
        } => {
            let mut settings = match config {
                Some(path) => CoordinatorConfig::load(&path)?,
                None => CoordinatorConfig::default(),
            };
            if let Some(path) = dataset {
                settings.dataset.path = path;
            }
            if let Some(count) = partitions {
                settings.dataset.partitions = count;
            }
            settings.validate()?;

            run_coordinator(settings, no_prompt).await
        }
        Command::Worker { config, server } => {
            let mut settings = match config {
                Some(path) => WorkerConfig::load(&path)?,
                None => WorkerConfig::default(),
            };
            if let Some(address) = server {
                settings.server.address = address;
            }
            settings.validate()?;

            run_worker(settings).await
        }
    }
}

async fn run_coordinator(config: CoordinatorConfig, no_prompt: bool) -> anyhow::Result<()> {
    // 1. Ingestion:
    let Dataset {
        mut reviews,
        categories,
    } = load_reviews(&config.dataset.path)?;

    if let Some(seed) = config.dataset.shuffle_seed {
        tracing::info!("Shuffling reviews with seed {}", seed);
        shuffle_seeded(&mut reviews, seed);
    }

    // 2. Partitioning:
    let partitions = split(reviews, config.dataset.partitions)?;
    tracing::info!("Dataset split into {} partitions", partitions.len());

    // 3. Distribution:
    let coordinator = Coordinator::new(partitions, config.server.session_timeout);
    let listener = TcpListener::bind(&config.server.bind).await?;
    let summary = coordinator
        .clone()
        .serve(listener, config.server.accept_timeout)
        .await;

    if !summary.forfeited.is_empty() || summary.unclaimed > 0 {
        tracing::warn!(
            "Rankings are partial: partitions {:?} forfeited, {} never claimed",
            summary.forfeited,
            summary.unclaimed
        );
    }

    // 4. Aggregation:
    let results = coordinator.take_results();
    tracing::info!("Aggregating {} worker results", results.len());
    let state = aggregate(&results, &categories);

    let store = RecommendationStore::new();
    store.publish(state).await;

    // 5. Query surface:
    let app = router(store.clone());
    let http_listener = TcpListener::bind(&config.server.query_bind).await?;
    tracing::info!("HTTP query endpoint listening on {}", http_listener.local_addr()?);

    let http = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server failed: {}", e);
        }
    });

    if no_prompt {
        tokio::signal::ctrl_c().await?;
    } else {
        let input = BufReader::new(tokio::io::stdin());
        tokio::select! {
            result = run_prompt(&store, input, tokio::io::stdout()) => result?,
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    tracing::info!("Shutting down");
    http.abort();
    Ok(())
}

async fn run_worker(config: WorkerConfig) -> anyhow::Result<()> {
    let engine = RecommendationEngine::new(config.computation.threshold);
    let client = WorkerClient::new(engine);

    match client
        .run(&config.server.address, config.server.connect_timeout)
        .await?
    {
        WorkerOutcome::Processed {
            partition,
            reviews,
            users,
        } => tracing::info!(
            "Finished partition {} ({} reviews, {} users)",
            partition,
            reviews,
            users
        ),
        WorkerOutcome::NoMoreWork => tracing::info!("Nothing to do, exiting"),
    }

    Ok(())
}
