use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use rm_client::{
    ApiCache, CacheMode, CachedClient, CharacterFilters, CharacterGender, CharacterStatus,
    HttpClient, RickAndMortyClient,
};
use rm_compare::{ComparisonState, SelectionStore, Slot};
use rm_config::AppConfig;

mod commands;
mod logger;
mod session_store;

use session_store::SessionSelectionStore;

#[derive(Parser)]
#[command(
    name = "rm-episodes",
    version,
    about = "Compare the episodes two Rick and Morty characters appear in"
)]
struct Cli {
    #[arg(long, help = "Override the API base URL from the config file")]
    api_url: Option<String>,

    #[arg(long, help = "Bypass the response cache")]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List one page of the character catalog")]
    Characters {
        #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
        page: u32,
        #[arg(long, help = "Only characters whose name contains this text")]
        name: Option<String>,
        #[arg(long, value_enum, ignore_case = true, help = "Only characters with this status")]
        status: Option<StatusArg>,
        #[arg(long, help = "Only characters of this species")]
        species: Option<String>,
        #[arg(long, value_enum, ignore_case = true, help = "Only characters of this gender")]
        gender: Option<GenderArg>,
    },
    #[command(about = "Put a character into a comparison slot")]
    Select {
        #[arg(value_enum, help = "Slot to fill")]
        slot: SlotArg,
        #[arg(help = "Character ID")]
        id: u32,
    },
    #[command(about = "Clear one slot, or both when no slot is given")]
    Clear {
        #[arg(value_enum, help = "Slot to clear")]
        slot: Option<SlotArg>,
    },
    #[command(about = "Show the selected character ids")]
    Show,
    #[command(about = "Compare the episodes of the selected characters")]
    Compare,
}

#[derive(Clone, Copy, ValueEnum)]
enum SlotArg {
    First,
    Second,
}

impl From<SlotArg> for Slot {
    fn from(arg: SlotArg) -> Self {
        match arg {
            SlotArg::First => Slot::First,
            SlotArg::Second => Slot::Second,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Alive,
    Dead,
    Unknown,
}

impl From<StatusArg> for CharacterStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Alive => CharacterStatus::Alive,
            StatusArg::Dead => CharacterStatus::Dead,
            StatusArg::Unknown => CharacterStatus::Unknown,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl From<GenderArg> for CharacterGender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Female => CharacterGender::Female,
            GenderArg::Male => CharacterGender::Male,
            GenderArg::Genderless => CharacterGender::Genderless,
            GenderArg::Unknown => CharacterGender::Unknown,
        }
    }
}

fn build_client(
    config: &AppConfig,
    cache: Arc<Mutex<ApiCache>>,
    no_cache: bool,
) -> Result<Arc<dyn RickAndMortyClient>> {
    let http = HttpClient::from_config(config).context("Failed to create API client")?;

    let mode = if no_cache {
        CacheMode::None
    } else {
        CacheMode::ReadWrite
    };

    Ok(Arc::new(CachedClient::new(http, cache, mode)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = logger::init()?;
    log::info!("Starting rm-episodes, logging to {:?}", log_file);

    let mut config = AppConfig::load();
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }

    let ttl = chrono::TimeDelta::from_std(Duration::from_secs(config.cache_ttl_secs))
        .unwrap_or(chrono::TimeDelta::MAX);
    let cache = Arc::new(Mutex::new(ApiCache::with_ttl(ttl)));
    let client = build_client(&config, cache.clone(), cli.no_cache)?;
    let mut store = SessionSelectionStore::load();

    match cli.command {
        Commands::Characters {
            page,
            name,
            status,
            species,
            gender,
        } => {
            let filters = CharacterFilters {
                name,
                status: status.map(CharacterStatus::from),
                species,
                gender: gender.map(CharacterGender::from),
            };
            commands::characters(client.as_ref(), page, &filters).await?;
        }
        Commands::Select { slot, id } => {
            let slot = Slot::from(slot);
            let character = commands::select(client.as_ref(), &mut store, slot, id).await?;
            store.save()?;
            println!("Selected {} (#{}) as {} character", character.name, character.id, slot);
        }
        Commands::Clear { slot } => {
            commands::clear(&mut store, slot.map(Slot::from));
            store.save()?;
        }
        Commands::Show => {
            commands::print_selection(&store);
        }
        Commands::Compare => {
            let stored = (store.get(Slot::First), store.get(Slot::Second));
            let (selection, state) = commands::compare(client, &mut store).await?;

            if (store.get(Slot::First), store.get(Slot::Second)) != stored {
                // Stale slots were cleared while restoring
                store.save()?;
            }

            match (&selection.first, &selection.second, state) {
                (Some(first), Some(second), ComparisonState::Ready(comparison)) => {
                    commands::print_comparison(&first.name, &second.name, &comparison);
                }
                (_, _, ComparisonState::Failed(message)) => {
                    anyhow::bail!("Failed to load episodes: {}", message);
                }
                _ => {
                    println!("Select two characters first: rm-episodes select <first|second> <id>");
                }
            }
        }
    }

    if let Ok(cache) = cache.lock() {
        let stats = cache.stats();
        log::debug!(
            "Cache: {} hits, {} misses, {} entries",
            stats.hits,
            stats.misses,
            stats.entries
        );
    }

    log::info!("Exiting rm-episodes");
    Ok(())
}
