use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use bxl_agenda::aggregator::Aggregator;
use bxl_agenda::apis;
use bxl_agenda::common::constants::{self, ALL_PROVIDERS};
use bxl_agenda::common::types::EventProvider;
use bxl_agenda::config::AppConfig;
use bxl_agenda::domain::{DateWindow, EventCategory, EventFilter, PersistedEvent};
use bxl_agenda::ingest::IngestService;
use bxl_agenda::normalize::distance_km;
use bxl_agenda::storage::{EventStore, InMemoryEventStore};
use bxl_agenda::{logging, samples};

#[derive(Parser)]
#[command(name = "bxl_agenda")]
#[command(about = "Brussels event aggregation pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch upcoming events from the configured providers
    Refresh {
        /// Specific providers to run (comma-separated). Available: facebook, eventbrite, meetup, brussels_open_data, ticketmaster
        #[arg(long)]
        providers: Option<String>,
    },
    /// Refresh, then print the stored events
    List {
        /// Only events in this category (music, art, food, sports, nightlife, cultural, theater)
        #[arg(long)]
        category: Option<String>,
        /// Only events in this window (today, tomorrow, weekend, next-week)
        #[arg(long)]
        date: Option<String>,
        /// Annotate each event with its distance from LAT,LNG
        #[arg(long)]
        near: Option<String>,
        /// Seed a handful of demo events before refreshing
        #[arg(long)]
        demo: bool,
        /// Print full records as JSON instead of summary lines
        #[arg(long)]
        json: bool,
    },
    /// Refresh, then print one stored event as JSON
    Show {
        /// Event id to look up
        #[arg(long)]
        id: Uuid,
    },
    /// List the known providers and whether they are configured
    Providers,
}

fn select_providers(
    selection: Option<&str>,
    config: &Arc<AppConfig>,
) -> Result<Vec<Box<dyn EventProvider>>, Box<dyn std::error::Error>> {
    let names: Vec<&str> = match selection {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect(),
        None => ALL_PROVIDERS.to_vec(),
    };

    let mut providers = Vec::new();
    for name in names {
        match apis::create_provider(name, config) {
            Some(provider) => providers.push(provider),
            None => {
                return Err(format!(
                    "unknown provider '{}' (available: {})",
                    name,
                    ALL_PROVIDERS.join(", ")
                )
                .into())
            }
        }
    }
    Ok(providers)
}

fn build_service(providers: Vec<Box<dyn EventProvider>>) -> IngestService {
    let store: Arc<dyn EventStore> = Arc::new(InMemoryEventStore::new());
    IngestService::new(store, Aggregator::new(providers))
}

fn parse_point(raw: &str) -> Result<(f64, f64), String> {
    let mut parts = raw.splitn(2, ',');
    let latitude = parts.next().unwrap_or("").trim().parse::<f64>();
    let longitude = parts.next().unwrap_or("").trim().parse::<f64>();
    match (latitude, longitude) {
        (Ok(latitude), Ok(longitude)) => Ok((latitude, longitude)),
        _ => Err(format!("expected LAT,LNG, got '{raw}'")),
    }
}

fn print_event(persisted: &PersistedEvent, near: Option<(f64, f64)>) {
    let event = &persisted.event;
    let star = if event.featured { " ⭐" } else { "" };
    let mut line = format!(
        "   {} [{}] {}{}",
        event.date.format("%Y-%m-%d %H:%M"),
        event.category,
        event.title,
        star
    );
    if let Some((latitude, longitude)) = near {
        let km = distance_km(latitude, longitude, event.latitude, event.longitude);
        line.push_str(&format!(" ({km:.1} km away)"));
    }
    println!("{line}");
    println!(
        "      {} | {} | id {}",
        event.location, event.source, persisted.id
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load()?);

    match cli.command {
        Commands::Refresh { providers } => {
            let providers = select_providers(providers.as_deref(), &config)?;
            let service = build_service(providers);

            println!("🔄 Refreshing events...");
            let summary = service.refresh().await?;

            println!("\n📊 Refresh results:");
            println!("   Fetched: {}", summary.fetched);
            println!("   Inserted: {}", summary.inserted);
            println!("   Duplicates skipped: {}", summary.duplicates);
        }
        Commands::List {
            category,
            date,
            near,
            demo,
            json,
        } => {
            let filter = EventFilter {
                category: match category.as_deref() {
                    Some(raw) => Some(raw.parse::<EventCategory>()?),
                    None => None,
                },
                date: match date.as_deref() {
                    Some(raw) => Some(raw.parse::<DateWindow>()?),
                    None => None,
                },
            };
            let near = match near.as_deref() {
                Some(raw) => Some(parse_point(raw)?),
                None => None,
            };

            let service = build_service(apis::all_providers(&config));

            if demo {
                let seeds = samples::sample_events();
                println!("🌱 Seeding {} demo events...", seeds.len());
                for event in seeds {
                    service.create_manual(event).await?;
                }
            }

            println!("🔄 Refreshing events from all providers...");
            let events = service.refresh_and_list(&filter).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                println!("\n📅 {} events", events.len());
                for persisted in &events {
                    print_event(persisted, near);
                }
            }
        }
        Commands::Show { id } => {
            let service = build_service(apis::all_providers(&config));
            service.refresh().await?;

            match service.get_by_id(id).await {
                Ok(persisted) => println!("{}", serde_json::to_string_pretty(&persisted)?),
                Err(e) => {
                    error!("Lookup failed: {}", e);
                    println!("❌ {}", e);
                }
            }
        }
        Commands::Providers => {
            println!("📡 Known providers:");
            for name in ALL_PROVIDERS {
                let status = if config.credential(name).is_some() {
                    "configured"
                } else if name == constants::BRUSSELS_OPEN_DATA_PROVIDER {
                    "no API key, will query anonymously"
                } else {
                    "not configured"
                };
                match constants::credential_env_key(name) {
                    Some(key) => println!("   {name:18} {status} ({key})"),
                    None => println!("   {name:18} {status}"),
                }
            }
        }
    }
    Ok(())
}
