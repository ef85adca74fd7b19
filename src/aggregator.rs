use crate::common::types::EventProvider;
use crate::domain::CanonicalEvent;
use futures::future::join_all;
use metrics::{counter, histogram};
use tracing::{info, instrument, warn};

/// Fans out to every configured provider concurrently and collects whatever
/// succeeded. One provider's failure never affects the others.
pub struct Aggregator {
    providers: Vec<Box<dyn EventProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Box<dyn EventProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Run every provider's fetch concurrently, wait for all of them to
    /// settle, and flatten the successful batches in provider order.
    /// Failures are logged and dropped; this never errors.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<CanonicalEvent> {
        let fetches = self.providers.iter().map(|provider| async move {
            let started = std::time::Instant::now();
            let outcome = provider.fetch_events().await;
            (provider.name(), outcome, started.elapsed())
        });
        let settled = join_all(fetches).await;

        let mut combined = Vec::new();
        for (name, outcome, elapsed) in settled {
            histogram!("agenda_provider_fetch_duration_seconds", "provider" => name)
                .record(elapsed.as_secs_f64());
            match outcome {
                Ok(events) => {
                    counter!("agenda_provider_events_fetched_total", "provider" => name)
                        .increment(events.len() as u64);
                    combined.extend(events);
                }
                Err(e) if e.is_not_configured() => {
                    info!("Provider {} is not configured, skipping", name);
                }
                Err(e) => {
                    counter!("agenda_provider_failures_total", "provider" => name).increment(1);
                    warn!("Provider {} failed: {}", name, e);
                }
            }
        }

        info!(
            "Aggregated {} events across {} providers",
            combined.len(),
            self.providers.len()
        );
        combined
    }
}
