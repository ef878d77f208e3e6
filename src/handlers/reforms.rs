// src/handlers/reforms.rs
use serde::Serialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;
use log::info;

use crate::models::ReformOption;
use crate::services::allocation::AllocationRule;
use crate::services::store::DatasetStore;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReformEntry<'a> {
    #[serde(flatten)]
    reform: &'a ReformOption,
    allocation_rule: AllocationRule,
    external_estimate_count: usize,
}

pub async fn get_reforms(store: Arc<DatasetStore>) -> Result<Json, Rejection> {
    info!("Handling request to list reforms");

    let catalog = store.catalog();
    let entries: Vec<ReformEntry> = catalog
        .reforms
        .iter()
        .map(|reform| ReformEntry {
            reform,
            allocation_rule: AllocationRule::for_reform(&reform.id),
            external_estimate_count: catalog.estimates_for(&reform.id).len(),
        })
        .collect();

    Ok(warp::reply::json(&entries))
}
