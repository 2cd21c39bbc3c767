mod cli;

use crate::cli::{CacheBackendArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use shortlink_cache::{CacheConfig, MokaLinkCache, NoopLinkCache, RedisLinkCache};
use shortlink_core::LinkRepository;
use shortlink_gateway::{App, AppState};
use shortlink_generator::RandomGenerator;
use shortlink_service::{LinkService, LinkShortener, ServiceConfig};
use shortlink_storage::{InMemoryRepository, PostgresRepository};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

const MOKA_MAX_CAPACITY: u64 = 10_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    shortlink_telemetry::init(config.log_format.into())?;
    let metrics = shortlink_telemetry::install_metrics()?;
    shortlink_service::metrics::register_metrics();

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        "starting shortlink gateway"
    );

    let shortener = match config.storage {
        StorageBackendArg::InMemory => build_shortener(&config, InMemoryRepository::new()).await?,
        StorageBackendArg::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("database url is required when storage backend is postgres")?;
            let repository = PostgresRepository::connect(database_url)
                .await
                .context("failed to connect to postgres")?;
            repository
                .migrate()
                .await
                .context("failed to apply postgres schema")?;
            build_shortener(&config, repository).await?
        }
    };

    let router = App::router(AppState::new(shortener).with_metrics(metrics));
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn build_shortener<R: LinkRepository>(
    config: &CLI,
    repository: R,
) -> anyhow::Result<Arc<dyn LinkShortener>> {
    let service_config = match config.operation_timeout() {
        Some(timeout) => ServiceConfig::builder().operation_timeout(timeout).build(),
        None => ServiceConfig::default(),
    };
    let generator = RandomGenerator::default();

    let shortener: Arc<dyn LinkShortener> = match config.cache {
        CacheBackendArg::None => Arc::new(LinkService::with_config(
            repository,
            NoopLinkCache,
            generator,
            service_config,
        )),
        CacheBackendArg::Moka => {
            let cache: MokaLinkCache = CacheConfig::builder()
                .max_capacity(MOKA_MAX_CAPACITY)
                .ttl(config.cache_ttl())
                .build()
                .into();
            Arc::new(LinkService::with_config(
                repository,
                cache,
                generator,
                service_config,
            ))
        }
        CacheBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            let mut cache = RedisLinkCache::connect(redis_url)
                .await
                .context("failed to connect to redis")?;
            if let Some(ttl) = config.cache_ttl() {
                cache = cache.with_ttl(ttl);
            }
            Arc::new(LinkService::with_config(
                repository,
                cache,
                generator,
                service_config,
            ))
        }
    };
    Ok(shortener)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
