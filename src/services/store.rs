// src/services/store.rs
use chrono::Duration;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::models::ScoringType;

use super::catalog::Catalog;
use super::error::LoadError;
use super::loader::{load_data, Dataset};
use super::numeric::ParsePolicy;
use super::source::DataSource;

struct Slot {
    dataset: Arc<Dataset>,
    ticket: u64,
}

/// Latest dataset per scoring type.
///
/// Each load is stamped with a ticket when it starts. A finished load only
/// replaces the held dataset if no later-started load has already been
/// installed, so a slow superseded fetch never overwrites newer data.
/// Reloads of one scoring type run one at a time; requests that arrive while
/// a reload is in flight wait for it and share its result.
pub struct DatasetStore {
    source: DataSource,
    policy: ParsePolicy,
    ttl: Duration,
    catalog: Arc<Catalog>,
    slots: RwLock<HashMap<ScoringType, Slot>>,
    next_ticket: AtomicU64,
    static_reload: Mutex<()>,
    dynamic_reload: Mutex<()>,
}

impl DatasetStore {
    pub fn new(source: DataSource, policy: ParsePolicy, ttl: Duration, catalog: Catalog) -> Self {
        DatasetStore {
            source,
            policy,
            ttl,
            catalog: Arc::new(catalog),
            slots: RwLock::new(HashMap::new()),
            next_ticket: AtomicU64::new(0),
            static_reload: Mutex::new(()),
            dynamic_reload: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub async fn current(&self, scoring_type: ScoringType) -> Option<Arc<Dataset>> {
        self.slots
            .read()
            .await
            .get(&scoring_type)
            .map(|slot| slot.dataset.clone())
    }

    async fn fresh(&self, scoring_type: ScoringType) -> Option<Arc<Dataset>> {
        self.current(scoring_type)
            .await
            .filter(|dataset| !dataset.is_stale(self.ttl))
    }

    fn reload_lock(&self, scoring_type: ScoringType) -> &Mutex<()> {
        match scoring_type {
            ScoringType::Static => &self.static_reload,
            ScoringType::Dynamic => &self.dynamic_reload,
        }
    }

    /// Cached dataset if it is fresh, otherwise a new load. When the reload
    /// fails for any reason, a previously loaded copy is served instead.
    pub async fn get(&self, scoring_type: ScoringType) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.fresh(scoring_type).await {
            debug!("Serving cached {} dataset from {}", scoring_type, dataset.loaded_at);
            return Ok(dataset);
        }

        let _reloading = self.reload_lock(scoring_type).lock().await;

        // A reload may have finished while this request waited for the lock
        let cached = self.current(scoring_type).await;
        if let Some(dataset) = &cached {
            if !dataset.is_stale(self.ttl) {
                debug!("Serving {} dataset reloaded at {}", scoring_type, dataset.loaded_at);
                return Ok(dataset.clone());
            }
            info!("Cached {} dataset is stale, reloading", scoring_type);
        }

        match self.load_and_install(scoring_type).await {
            Ok(dataset) => Ok(dataset),
            Err(e) => match cached {
                Some(stale) => {
                    warn!(
                        "Reload of {} data failed ({}), serving data from {}",
                        scoring_type, e, stale.loaded_at
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Load unconditionally, replacing the held dataset on success.
    pub async fn reload(&self, scoring_type: ScoringType) -> Result<Arc<Dataset>, LoadError> {
        let _reloading = self.reload_lock(scoring_type).lock().await;
        self.load_and_install(scoring_type).await
    }

    async fn load_and_install(&self, scoring_type: ScoringType) -> Result<Arc<Dataset>, LoadError> {
        let ticket = self.issue_ticket();
        let dataset = match load_data(&self.source, scoring_type, self.policy).await {
            Ok(dataset) => dataset,
            Err(e) => {
                error!("Failed to load {} data: {}", scoring_type, e);
                return Err(e);
            }
        };
        self.catalog.unmatched_ids(dataset.reform_ids());
        Ok(self.install(ticket, dataset).await)
    }

    fn issue_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn install(&self, ticket: u64, dataset: Dataset) -> Arc<Dataset> {
        let scoring_type = dataset.scoring_type;
        let mut slots = self.slots.write().await;
        if let Some(slot) = slots.get(&scoring_type) {
            if slot.ticket > ticket {
                info!(
                    "Discarding {} load #{}; load #{} already installed",
                    scoring_type, ticket, slot.ticket
                );
                return slot.dataset.clone();
            }
        }

        let dataset = Arc::new(dataset);
        slots.insert(scoring_type, Slot { dataset: dataset.clone(), ticket });
        dataset
    }
}
