//! cane-ops server binary.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cane_ops::adapters::http::{api_router, AppState, ServiceLayers};
use cane_ops::adapters::memory::seed_demo_data;
use cane_ops::adapters::{
    CatalogLoadError, InMemoryBlocStore, InMemoryCropCycleRepository, InMemoryWorkPlanStore,
    PostgresBlocReader, PostgresCropCycleRepository, PostgresWorkPlanReader, StaticCatalog,
};
use cane_ops::config::{
    AppConfig, BackendKind, ConfigError, LogFormat, ServerConfig, ValidationError,
};
use cane_ops::domain::foundation::{DomainError, Timestamp};
use cane_ops::ports::CatalogProvider;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("{0}")]
    Catalog(#[from] CatalogLoadError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Demo seed failed: {0}")]
    Seed(#[from] DomainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cane-ops: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;
    let addr = config.server.socket_addr()?;

    let catalog: Arc<dyn CatalogProvider> = match &config.catalog.path {
        Some(path) => Arc::new(StaticCatalog::from_path(path).await?),
        None => Arc::new(StaticCatalog::embedded()?),
    };

    let state = build_state(&config, catalog).await?;

    let layers = ServiceLayers {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
        enable_tracing: config.features.enable_tracing,
        enable_compression: config.features.enable_compression,
    };
    let app = layers.apply(api_router(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        backend = ?config.backend.kind,
        supports_mutation = config.backend.supports_mutation,
        "cane-ops listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cane-ops stopped");
    Ok(())
}

async fn build_state(
    config: &AppConfig,
    catalog: Arc<dyn CatalogProvider>,
) -> Result<AppState, StartupError> {
    let capabilities = config.backend.capabilities();

    match config.backend.kind {
        BackendKind::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("database.url"))?;
            let pool = database.pool_options().connect(&database.url).await?;
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database migrations applied");
            }

            Ok(AppState {
                cycles: Arc::new(PostgresCropCycleRepository::new(pool.clone(), capabilities)),
                blocs: Arc::new(PostgresBlocReader::new(pool.clone())),
                work_plans: Arc::new(PostgresWorkPlanReader::new(pool)),
                catalog,
                capabilities,
            })
        }
        BackendKind::Memory => {
            let blocs = Arc::new(InMemoryBlocStore::new());
            let cycles = Arc::new(InMemoryCropCycleRepository::new(capabilities));
            let work_plans = Arc::new(InMemoryWorkPlanStore::new());

            if capabilities.auto_seed {
                let summary =
                    seed_demo_data(&blocs, &cycles, &work_plans, Timestamp::now().date()).await?;
                tracing::info!(
                    blocs = summary.blocs,
                    cycles = summary.cycles,
                    "In-memory backend seeded"
                );
            }

            Ok(AppState {
                cycles,
                blocs,
                work_plans,
                catalog,
                capabilities,
            })
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
