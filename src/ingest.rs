use crate::aggregator::Aggregator;
use crate::common::error::{AgendaError, Result};
use crate::domain::{CanonicalEvent, EventFilter, EventSource, PersistedEvent};
use crate::storage::EventStore;
use chrono::Local;
use metrics::counter;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Outcome counts of one refresh cycle.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RefreshSummary {
    pub fetched: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

/// Ties the aggregator, the duplicate gate and the store together into the
/// refresh flow the boundary layer calls.
pub struct IngestService {
    store: Arc<dyn EventStore>,
    aggregator: Aggregator,
}

impl IngestService {
    pub fn new(store: Arc<dyn EventStore>, aggregator: Aggregator) -> Self {
        Self { store, aggregator }
    }

    /// Fetch from all providers and persist what is genuinely new.
    ///
    /// An event duplicates a stored one iff both source and source_url match
    /// and the url is non-empty; events without a source_url are always
    /// inserted. The duplicate check and the insert are not atomic across
    /// concurrent cycles; deployments run at most one cycle at a time.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        let existing = self.store.list_all().await?;
        let mut seen: HashSet<(EventSource, String)> = existing
            .iter()
            .filter_map(|persisted| dedup_key(&persisted.event))
            .collect();

        let fetched = self.aggregator.fetch_all().await;
        let mut summary = RefreshSummary {
            fetched: fetched.len(),
            ..Default::default()
        };

        for event in fetched {
            if let Some(key) = dedup_key(&event) {
                if !seen.insert(key) {
                    debug!("Skipping duplicate from {}: {}", event.source, event.title);
                    summary.duplicates += 1;
                    continue;
                }
            }
            self.store.create(event).await?;
            summary.inserted += 1;
        }

        counter!("agenda_events_inserted_total").increment(summary.inserted as u64);
        counter!("agenda_events_deduplicated_total").increment(summary.duplicates as u64);
        info!(
            "Refresh complete: {} fetched, {} inserted, {} duplicates",
            summary.fetched, summary.inserted, summary.duplicates
        );
        Ok(summary)
    }

    /// Refresh, then return the stored set narrowed by the filter. When
    /// every provider fails the refresh inserts nothing and the previously
    /// stored events still come back.
    pub async fn refresh_and_list(&self, filter: &EventFilter) -> Result<Vec<PersistedEvent>> {
        self.refresh().await?;
        self.list(filter).await
    }

    /// Stored events narrowed by the filter, ordered by start date.
    pub async fn list(&self, filter: &EventFilter) -> Result<Vec<PersistedEvent>> {
        let today = Local::now().date_naive();
        let mut events: Vec<PersistedEvent> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|persisted| filter.matches(&persisted.event, today))
            .collect();
        events.sort_by_key(|persisted| persisted.event.date);
        Ok(events)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PersistedEvent> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AgendaError::NotFound(id))
    }

    /// Persist a manually submitted event after validating it.
    pub async fn create_manual(&self, event: CanonicalEvent) -> Result<PersistedEvent> {
        validate_event(&event)?;
        let persisted = self.store.create(event).await?;
        info!(
            "Manually created event {} ({})",
            persisted.event.title, persisted.id
        );
        Ok(persisted)
    }
}

/// Natural key for duplicate detection. None when the event has no usable
/// source link, which makes it always count as new.
fn dedup_key(event: &CanonicalEvent) -> Option<(EventSource, String)> {
    let url = event.source_url.as_deref()?.trim();
    if url.is_empty() {
        None
    } else {
        Some((event.source, url.to_string()))
    }
}

/// Collect every field that violates the schema constraints, so the caller
/// sees all problems at once.
fn validate_event(event: &CanonicalEvent) -> Result<()> {
    let mut fields = Vec::new();
    if event.title.trim().is_empty() {
        fields.push("title".to_string());
    }
    if !(-90.0..=90.0).contains(&event.latitude) {
        fields.push("latitude".to_string());
    }
    if !(-180.0..=180.0).contains(&event.longitude) {
        fields.push("longitude".to_string());
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(AgendaError::Validation { fields })
    }
}
