// src/handlers/export.rs
use log::{error, info};
use std::sync::Arc;
use warp::http::{header, Response};
use warp::Rejection;

use crate::services::export::{export_file_name, export_to_csv};
use crate::services::store::DatasetStore;
use super::error::ApiError;
use super::parse_scoring;

pub async fn get_export(
    scoring: String,
    reform_id: String,
    store: Arc<DatasetStore>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling CSV export of {} for {}", reform_id, scoring);
    let scoring_type = parse_scoring(&scoring)?;

    let dataset = store.get(scoring_type).await.map_err(|e| {
        error!("Failed to load {} data: {}", scoring_type, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let series = dataset.series(&reform_id).ok_or_else(|| {
        warp::reject::custom(ApiError::not_found(format!(
            "No {} results for reform '{}'",
            scoring_type, reform_id
        )))
    })?;

    let reform_name = store
        .catalog()
        .find(&reform_id)
        .map(|r| r.name.as_str())
        .unwrap_or(reform_id.as_str());

    let body = export_to_csv(series, reform_name).map_err(|e| {
        error!("Failed to write CSV export for {}: {}", reform_id, e);
        warp::reject::custom(ApiError::internal(e.to_string()))
    })?;

    Response::builder()
        .header(header::CONTENT_TYPE, "text/csv;charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export_file_name(&reform_id)),
        )
        .body(body)
        .map_err(|e| warp::reject::custom(ApiError::internal(e.to_string())))
}
