//! Subcommand handlers
//!
//! Handlers take the client and selection store as trait objects so they run
//! against the live API, a cached client or a test double alike.

use anyhow::{Context, Result};
use log::{info, warn};
use rm_client::{
    ApiError, Character, CharacterFilters, CharacterId, Episode, Page, RickAndMortyClient,
};
use rm_compare::{
    character_stats, episode_stats, format_air_date, format_episode_code, persist_selection,
    reduce, ComparisonOrchestrator, ComparisonState, EpisodeComparison, Pagination, Selection,
    SelectionAction, SelectionStore, Slot,
};
use std::sync::Arc;

fn is_not_found(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<ApiError>(), Some(ApiError::NotFound(_)))
}

/// Rebuild the selection from the stored ids
///
/// Characters that no longer exist are dropped from their slot.
pub async fn restore_selection(
    client: &dyn RickAndMortyClient,
    store: &mut dyn SelectionStore,
) -> Result<Selection> {
    let mut selection = Selection::default();

    for slot in Slot::ALL {
        let Some(id) = store.get(slot) else {
            continue;
        };

        match client.fetch_character(id).await {
            Ok(character) => {
                selection = reduce(selection, &SelectionAction::Select(slot, character));
            }
            Err(e) if is_not_found(&e) => {
                warn!("Stored {} character {} no longer exists, clearing slot", slot, id);
                store.set(slot, None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to restore {} character {}", slot, id));
            }
        }
    }

    Ok(selection)
}

/// Fetch one catalog page, narrowed by `filters` when any are set
pub async fn fetch_characters(
    client: &dyn RickAndMortyClient,
    page: u32,
    filters: &CharacterFilters,
) -> Result<Page<Character>> {
    if filters.is_empty() {
        client
            .fetch_character_page(page)
            .await
            .with_context(|| format!("Failed to fetch character page {}", page))
    } else {
        client
            .search_characters(page, filters)
            .await
            .with_context(|| format!("Failed to search characters on page {}", page))
    }
}

fn filter_args(filters: &CharacterFilters) -> String {
    filters
        .query_params()
        .iter()
        .map(|(key, value)| format!(" --{} {:?}", key, value))
        .collect()
}

pub async fn characters(
    client: &dyn RickAndMortyClient,
    page: u32,
    filters: &CharacterFilters,
) -> Result<()> {
    let page_data = fetch_characters(client, page, filters).await?;

    if page_data.results.is_empty() {
        println!("No characters match");
        return Ok(());
    }

    let pagination = Pagination::new(page, page_data.total_pages());

    println!("{:<6} {:<32} {:<10} {:<16}", "ID", "NAME", "STATUS", "SPECIES");
    println!("{}", "-".repeat(66));
    for character in &page_data.results {
        println!(
            "{:<6} {:<32} {:<10} {:<16}",
            character.id, character.name, character.status, character.species
        );
    }

    let stats = character_stats(&page_data.results);
    println!();
    println!(
        "{} ({} characters total) | {} alive, {} dead, {} unknown",
        pagination, page_data.info.count, stats.alive, stats.dead, stats.unknown
    );

    let mut next = pagination;
    if next.next() {
        println!(
            "Next: rm-episodes characters --page {}{}",
            next.current_page(),
            filter_args(filters)
        );
    }

    Ok(())
}

/// Put a character into a slot
pub async fn select(
    client: &dyn RickAndMortyClient,
    store: &mut dyn SelectionStore,
    slot: Slot,
    id: CharacterId,
) -> Result<Character> {
    let character = client
        .fetch_character(id)
        .await
        .with_context(|| format!("Failed to fetch character {}", id))?;

    let selection = restore_selection(client, store).await?;
    let selection = reduce(selection, &SelectionAction::Select(slot, character.clone()));
    persist_selection(&selection, store);

    info!("Selected {} as {} character", character.name, slot);
    Ok(character)
}

/// Clear one slot, or both when `slot` is `None`
pub fn clear(store: &mut dyn SelectionStore, slot: Option<Slot>) {
    let slots: &[Slot] = match &slot {
        Some(slot) => std::slice::from_ref(slot),
        None => &Slot::ALL,
    };

    for slot in slots {
        store.set(*slot, None);
        info!("Cleared {} slot", slot);
    }
}

/// Compare the stored selection
pub async fn compare(
    client: Arc<dyn RickAndMortyClient>,
    store: &mut dyn SelectionStore,
) -> Result<(Selection, ComparisonState)> {
    let selection = restore_selection(client.as_ref(), store).await?;
    let orchestrator = ComparisonOrchestrator::new(client);
    let state = orchestrator.compare_selection(&selection).await;
    Ok((selection, state))
}

pub fn print_selection(store: &dyn SelectionStore) {
    for slot in Slot::ALL {
        match store.get(slot) {
            Some(id) => println!("{:<7} {}", slot, id),
            None => println!("{:<7} -", slot),
        }
    }
}

fn print_group(title: &str, episodes: &[Episode]) {
    println!("{} ({})", title, episodes.len());
    for episode in episodes {
        println!(
            "  {:<8} {:<40} {}",
            format_episode_code(&episode.code),
            episode.name,
            format_air_date(&episode.air_date)
        );
    }
    println!();
}

pub fn print_comparison(first: &str, second: &str, comparison: &EpisodeComparison) {
    print_group(&format!("Only {}", first), &comparison.only_a);
    print_group(&format!("{} & {}", first, second), &comparison.shared);
    print_group(&format!("Only {}", second), &comparison.only_b);

    let episodes: Vec<Episode> = comparison.all_episodes().cloned().collect();
    let stats = episode_stats(&episodes);
    println!(
        "{} episodes, ~{} characters per episode",
        stats.total, stats.average_characters_per_episode
    );
    for (season, count) in &stats.seasons {
        println!("  {:<10} {}", season, count);
    }
}
