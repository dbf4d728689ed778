//! Outlet map command handlers for the CLI.
//!
//! Each handler drives a fresh [`MapApp`] the same way the map page does and
//! prints the outcome to stdout. Logs go to stderr so `scene` output stays
//! pipeable.

use catchment_client::OutletClient;
use catchment_core::{AppConfig, Outlet};
use catchment_map::MapApp;

/// Build the outlet client for this run.
///
/// # Errors
///
/// Returns an error if a configured base URL is invalid or the HTTP client
/// cannot be built.
pub(crate) fn build_client(config: &AppConfig, direct: bool) -> anyhow::Result<OutletClient> {
    let client = if direct {
        OutletClient::direct(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
    } else {
        OutletClient::from_config(config)?
    };
    tracing::debug!(routing = ?client.routing(), "outlet client ready");
    Ok(client)
}

async fn load(client: OutletClient) -> anyhow::Result<MapApp> {
    let mut app = MapApp::new(client);
    if !app.load_outlets().await {
        anyhow::bail!("failed to load outlets; is the outlet API reachable?");
    }
    Ok(app)
}

fn hours(outlet: &Outlet) -> &str {
    outlet.operating_hours.as_deref().unwrap_or("\u{2014}")
}

/// List overlapping catchment pairs with the distance between their outlets.
///
/// # Errors
///
/// Returns an error if the outlet feed cannot be loaded.
pub(crate) async fn run_overlaps(client: OutletClient) -> anyhow::Result<()> {
    let app = load(client).await?;
    let store = app.store();

    if store.overlaps().is_empty() {
        println!("no overlapping catchments among {} outlets", store.len());
        return Ok(());
    }

    println!("{:<36}{:<36}DISTANCE", "OUTLET", "OVERLAPS WITH");
    for (index, overlap) in store.overlaps().iter().enumerate() {
        let Some((first, second)) = store.overlap_outlets(index) else {
            continue;
        };
        let pair = &overlap.annotation;
        let distance_km = store
            .get(pair.first)
            .zip(store.get(pair.second))
            .map(|(a, b)| a.coordinate.distance_to(&b.coordinate) / 1000.0)
            .unwrap_or_default();
        println!("{:<36}{:<36}{distance_km:.2} km", first.name, second.name);
    }
    println!();
    println!(
        "{} overlapping pairs among {} outlets",
        store.overlaps().len(),
        store.len()
    );

    Ok(())
}

/// Run one search and print its titled result list.
///
/// Results whose outlet has a marker on the loaded map are flagged, as those
/// are the ones the map would focus.
///
/// # Errors
///
/// Returns an error if the outlet feed cannot be loaded or the search
/// request fails.
pub(crate) async fn run_search(client: OutletClient, query: &str) -> anyhow::Result<()> {
    let mut app = load(client).await?;

    let Some(results) = catchment_map::route(app.client(), query).await? else {
        println!("nothing to search for in {query:?}; try `how many outlets in <area>`");
        return Ok(());
    };
    app.show_results(&results);

    println!("{}", results.title);
    if results.outlets.is_empty() {
        println!("No outlets found.");
        return Ok(());
    }
    println!();
    println!("{:<8}{:<36}{:<8}HOURS", "ID", "NAME", "ON MAP");
    for outlet in &results.outlets {
        let on_map = outlet
            .coordinate()
            .and_then(|at| app.store().marker_at(at))
            .is_some();
        println!(
            "{:<8}{:<36}{:<8}{}",
            outlet.id,
            outlet.name,
            if on_map { "yes" } else { "no" },
            hours(outlet)
        );
    }

    Ok(())
}

/// Print the full record of one outlet.
///
/// # Errors
///
/// Returns an error if the outlet does not exist or the request fails.
pub(crate) async fn run_outlet(client: &OutletClient, id: i64) -> anyhow::Result<()> {
    let outlet = client.outlet(id).await?;

    println!("{}", outlet.name);
    println!("Address:         {}", outlet.address.as_deref().unwrap_or("\u{2014}"));
    println!("Operating Hours: {}", hours(&outlet));
    println!(
        "Waze:            {}",
        outlet.waze_link.as_deref().unwrap_or("\u{2014}")
    );
    match outlet.coordinate() {
        Some(at) => println!("Coordinates:     {at}"),
        None => println!("Coordinates:     unknown"),
    }

    Ok(())
}

/// Print the drawn scene as pretty JSON.
///
/// # Errors
///
/// Returns an error if the outlet feed cannot be loaded or the scene cannot
/// be serialized.
pub(crate) async fn run_scene(client: OutletClient) -> anyhow::Result<()> {
    let app = load(client).await?;
    println!("{}", serde_json::to_string_pretty(app.scene())?);
    Ok(())
}
