use clap::Parser;
use course_search::backend::SearchBackend;
use course_search::backend::elastic::ElasticsearchBackend;
use course_search::backend::memory::MemoryBackend;
use course_search::catalog::loader::load_sample_data;
use course_search::config::{BackendKind, Config};
use course_search::search::engine::CourseSearchService;
use course_search::search::handlers::router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "course-search", about = "Course search HTTP service")]
struct Cli {
    /// Path to a TOML config file layered over the built-in defaults.
    #[arg(long, default_value = "course-search.toml")]
    config: PathBuf,

    /// Address to listen on (overrides `server.bind`).
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(Some(&cli.config))?;

    let bind_addr: SocketAddr = match cli.bind {
        Some(addr) => addr,
        None => config.server.bind.parse()?,
    };

    // 1. Search backend:
    let backend: Arc<dyn SearchBackend> = match config.backend.kind {
        BackendKind::Elasticsearch => {
            tracing::info!(
                "Using Elasticsearch at {} (index '{}')",
                config.elasticsearch.url,
                config.elasticsearch.index
            );
            Arc::new(ElasticsearchBackend::new(
                &config.elasticsearch.url,
                &config.elasticsearch.index,
                config.elasticsearch.timeout(),
            )?)
        }
        BackendKind::Memory => {
            tracing::info!("Using in-memory backend");
            Arc::new(MemoryBackend::new())
        }
    };

    // 2. Sample data:
    if config.catalog.load_on_startup {
        load_sample_data(backend.as_ref(), Path::new(&config.catalog.sample_data)).await?;
    }

    // 3. HTTP Router:
    let service = Arc::new(CourseSearchService::new(backend));
    let app = router(service);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
