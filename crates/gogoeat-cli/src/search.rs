//! Live search commands backed by the Maps web services.

use anyhow::{bail, Context};
use gogoeat_core::{AppConfig, Coordinate, RestaurantCandidate};
use gogoeat_places::PlacesClient;
use gogoeat_search::{
    resolve_user_location, ExplorerSession, FixedLocation, MapView, SearchOrchestrator,
    SearchOutcome, SearchSettings, StaticMapView,
};

use crate::filters::{FilterArgs, LocationArgs};
use crate::output::{print_candidates, print_selection, Format};

fn build_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    let Some(api_key) = config.maps_api_key.as_deref() else {
        bail!("GOOGLE_MAPS_API_KEY must be set for live search; try `catalog` instead");
    };
    let client =
        PlacesClient::with_base_url(api_key, config.request_timeout_secs, &config.maps_base_url)
            .context("failed to build maps client")?
            .with_retry(config.max_retries, config.retry_backoff_base_ms);
    Ok(client)
}

async fn build_orchestrator(
    config: &AppConfig,
    client: PlacesClient,
    location: &LocationArgs,
) -> SearchOrchestrator<PlacesClient, StaticMapView> {
    let center =
        resolve_user_location(&FixedLocation(location.coordinate()), config.default_center).await;
    let map = StaticMapView::from_zoom(
        center,
        config.default_zoom,
        config.viewport_width_px,
        config.viewport_height_px,
    );
    SearchOrchestrator::new(client, map, SearchSettings::from_config(config))
}

/// Run the tiered search for `query` and print the filtered results.
///
/// # Errors
///
/// Returns an error if no API key is configured, the query is empty, or the
/// random pick's details lookup fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    location: &LocationArgs,
    filters: &FilterArgs,
    format: Format,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let orchestrator = build_orchestrator(config, client.clone(), location).await;

    let candidates = match orchestrator.search(query).await {
        SearchOutcome::Found { tier, candidates } => {
            tracing::debug!(%tier, count = candidates.len(), "search finished");
            candidates
        }
        SearchOutcome::AllTiersExhausted => {
            println!("no restaurants found for '{}'; try another keyword", query.trim());
            return Ok(());
        }
        SearchOutcome::InputRejected => bail!("search query must not be empty"),
    };

    let origin = orchestrator.map().current_center();
    present(client, candidates, origin, filters, format).await
}

/// List restaurants around the current location.
///
/// # Errors
///
/// Returns an error if no API key is configured or the random pick's details
/// lookup fails.
pub(crate) async fn run_nearby(
    config: &AppConfig,
    location: &LocationArgs,
    filters: &FilterArgs,
    format: Format,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let orchestrator = build_orchestrator(config, client.clone(), location).await;
    let origin = orchestrator.map().current_center();
    let candidates = orchestrator.nearby(origin).await;
    if candidates.is_empty() {
        println!("no restaurants found nearby");
        return Ok(());
    }
    present(client, candidates, origin, filters, format).await
}

async fn present(
    client: PlacesClient,
    candidates: Vec<RestaurantCandidate>,
    origin: Coordinate,
    filters: &FilterArgs,
    format: Format,
) -> anyhow::Result<()> {
    let mut session = ExplorerSession::new(client);
    session.replace_candidates(candidates);
    *session.criteria_mut() = filters.to_criteria();

    let visible = session.visible();
    if visible.is_empty() {
        println!("no restaurants match the selected filters");
        return Ok(());
    }

    if !filters.random {
        return print_candidates(&visible, origin, format);
    }

    let Some(pick) = session.pick_random() else {
        return Ok(());
    };
    session.event_sender().select(pick.identity);
    let selection = session
        .next_selection()
        .await
        .context("failed to load the picked restaurant")?;
    print_selection(&selection, origin, format)
}
