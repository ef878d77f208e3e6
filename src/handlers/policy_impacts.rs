// src/handlers/policy_impacts.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use log::{error, info};

use crate::services::policy_impacts::load_policy_impacts;
use crate::services::store::DatasetStore;
use super::error::ApiError;

pub async fn get_policy_impacts(store: Arc<DatasetStore>) -> Result<Json, Rejection> {
    info!("Handling request for policy impact table");

    match load_policy_impacts(store.source()).await {
        Ok(data) => Ok(warp::reply::json(&data)),
        Err(e) => {
            error!("Failed to load policy impacts: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}
