use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use da_api::app::create_app;
use da_api::routes::drivers::AppState;
use da_core::services::verification::{VerificationService, VerificationServiceConfig};
use da_infra::database::{DatabasePool, MySqlDeviceRepository, MySqlDriverRepository};
use da_infra::search::{ElasticsearchDriverIndex, QueuedSearchIndexer};
use da_shared::config::AppConfig;

/// Upper bound on flushing queued search documents after the server stops
const SEARCH_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    );
    if !config.logging.timestamp {
        logger.format_timestamp(None);
    }
    logger.init();

    info!("Starting DriverApp API Server ({})", config.environment);

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let drivers = Arc::new(MySqlDriverRepository::new(pool.get_pool().clone()));
    let devices = Arc::new(MySqlDeviceRepository::new(pool.get_pool().clone()));

    let (search, search_worker) = if config.search.enabled {
        let index = Arc::new(
            ElasticsearchDriverIndex::new(config.search.clone())
                .context("Failed to build search index client")?,
        );
        let (indexer, worker) = QueuedSearchIndexer::spawn(index, config.search.queue_capacity);
        info!(
            "Mirroring drivers into index {} at {}",
            config.search.driver_index, config.search.url
        );
        (indexer, Some(worker))
    } else {
        info!("Search mirroring disabled");
        (QueuedSearchIndexer::disabled(), None)
    };

    let verification_service = Arc::new(VerificationService::new(
        drivers,
        devices,
        Arc::new(search),
        VerificationServiceConfig::from(&config.verification),
    ));
    let app_state = web::Data::new(AppState {
        verification_service,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), environment, &server_config)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    // The app factories held the last queue senders, so the worker sees a closed queue
    if let Some(worker) = search_worker {
        info!("Draining search reindex queue");
        match actix_web::rt::time::timeout(SEARCH_DRAIN_TIMEOUT, worker).await {
            Ok(Ok(())) => info!("Search reindex queue drained"),
            Ok(Err(e)) => warn!("Search reindex worker failed: {}", e),
            Err(_) => warn!(
                "Search reindex queue not drained within {}s",
                SEARCH_DRAIN_TIMEOUT.as_secs()
            ),
        }
    }

    pool.close().await;
    Ok(())
}
