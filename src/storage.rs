use crate::common::error::Result;
use crate::domain::{CanonicalEvent, PersistedEvent};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// Storage boundary for persisted events. The pipeline only ever appends;
/// stored events are immutable once created.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<PersistedEvent>>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<PersistedEvent>>;
    /// Persist an event, assigning its surrogate id.
    async fn create(&self, event: CanonicalEvent) -> Result<PersistedEvent>;
}

/// In-memory store for development and testing. A durable backend slots in
/// behind the same trait.
pub struct InMemoryEventStore {
    events: Arc<Mutex<HashMap<Uuid, PersistedEvent>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list_all(&self) -> Result<Vec<PersistedEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PersistedEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events.get(&id).cloned())
    }

    async fn create(&self, event: CanonicalEvent) -> Result<PersistedEvent> {
        let persisted = PersistedEvent {
            id: Uuid::new_v4(),
            event,
        };

        let mut events = self.events.lock().unwrap();
        events.insert(persisted.id, persisted.clone());

        debug!("Stored event: {} with id {}", persisted.event.title, persisted.id);
        Ok(persisted)
    }
}
