// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use crate::handlers::export::get_export;
use crate::handlers::impacts::{get_impacts, get_totals, ImpactQuery};
use crate::handlers::policy_impacts::get_policy_impacts;
use crate::handlers::reforms::get_reforms;
use crate::services::store::DatasetStore;
use log::info;

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::{ApiError, ErrorKind};

// Add recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;
    let kind;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
        kind = ErrorKind::NotFound;
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
        kind = api_error.kind;
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = invalid.to_string();
        kind = ErrorKind::BadRequest;
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
        kind = ErrorKind::BadRequest;
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
        kind = ErrorKind::Internal;
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
            "kind": kind,
        })),
        code,
    ))
}

pub fn routes(
    store: Arc<DatasetStore>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let reforms_route = warp::path!("api" / "v1" / "reforms")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_reforms);

    let impacts_route = warp::path!("api" / "v1" / "impacts" / String / String)
        .and(warp::get())
        .and(warp::query::<ImpactQuery>())
        .and(store_filter.clone())
        .and_then(get_impacts);

    let totals_route = warp::path!("api" / "v1" / "totals" / String)
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_totals);

    let export_route = warp::path!("api" / "v1" / "export" / String / String)
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_export);

    let policy_impacts_route = warp::path!("api" / "v1" / "policy_impacts")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_policy_impacts);

    info!("All routes configured successfully.");

    reforms_route
        .or(impacts_route)
        .or(totals_route)
        .or(export_route)
        .or(policy_impacts_route)
        .recover(handle_rejection)
}
