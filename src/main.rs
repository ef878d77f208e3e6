use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use tob_reform_dashboard::config::AppConfig;
use tob_reform_dashboard::models::ScoringType;
use tob_reform_dashboard::routes;
use tob_reform_dashboard::services::store::DatasetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = AppConfig::from_env()?;
    let catalog = config.load_catalog()?;
    info!("Catalog holds {} reform options", catalog.reforms.len());

    let store = Arc::new(DatasetStore::new(
        config.data_source(),
        config.parse_policy,
        config.data_ttl,
        catalog,
    ));

    // Warm the cache; a failure here is retried on the first request
    for scoring_type in ScoringType::ALL {
        if let Err(e) = store.reload(scoring_type).await {
            warn!("Initial {} load failed: {}", scoring_type, e);
        }
    }

    // Bind to 0.0.0.0 for Heroku
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    // Set up routes
    let api = routes::routes(store).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;

    Ok(())
}
