//! Application shell wiring the store, scene, panel and router together.

use catchment_client::OutletClient;

use crate::panel::{outlet_detail_html, overlap_html, search_results_html, InfoPanel};
use crate::router::{route, SearchResults};
use crate::scene::MapScene;
use crate::store::OutletStore;

/// One map session.
///
/// Failure policy: a failed initial load replaces the panel with an error
/// message; every later failure (search, detail lookup) is logged and leaves
/// the panel and map untouched. Nothing is retried, and responses are applied
/// in whatever order the caller awaits them.
#[derive(Debug)]
pub struct MapApp {
    client: OutletClient,
    store: OutletStore,
    scene: MapScene,
    panel: InfoPanel,
}

impl MapApp {
    #[must_use]
    pub fn new(client: OutletClient) -> Self {
        Self {
            client,
            store: OutletStore::new(),
            scene: MapScene::default(),
            panel: InfoPanel::default(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &OutletClient {
        &self.client
    }

    #[must_use]
    pub fn store(&self) -> &OutletStore {
        &self.store
    }

    #[must_use]
    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    #[must_use]
    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    /// Fetches the geocoded outlet feed, draws every outlet, then computes
    /// overlaps once. Returns `false` if the feed could not be loaded.
    pub async fn load_outlets(&mut self) -> bool {
        let outlets = match self.client.outlets(true).await {
            Ok(outlets) => outlets,
            Err(e) => {
                tracing::error!(error = %e, "failed to load outlets");
                self.panel.show_load_error();
                return false;
            }
        };

        let fetched = outlets.len();
        for outlet in outlets {
            let id = outlet.id;
            if self.store.insert(outlet, &mut self.scene).is_none() {
                tracing::debug!(outlet_id = id, "skipping outlet without coordinates");
            }
        }
        let overlaps = self.store.recompute_overlaps(&mut self.scene);
        tracing::info!(
            fetched,
            drawn = self.store.len(),
            overlaps,
            "outlets loaded"
        );
        true
    }

    /// Runs a search and renders its results. Returns the results when a
    /// request was issued and succeeded.
    pub async fn search(&mut self, input: &str) -> Option<SearchResults> {
        match route(&self.client, input).await {
            Ok(Some(results)) => {
                self.show_results(&results);
                Some(results)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, query = input, "error searching outlets");
                None
            }
        }
    }

    /// Renders a result list and focuses any listed outlet that has a marker.
    pub fn show_results(&mut self, results: &SearchResults) {
        self.panel
            .set(search_results_html(&results.title, &results.outlets));

        for outlet in &results.outlets {
            let Some(at) = outlet.coordinate() else {
                continue;
            };
            if let Some(entry) = self.store.marker_at(at) {
                let marker = entry.marker;
                self.scene.pan_to(at);
                self.scene.open_popup(marker);
            }
        }
    }

    /// Handles a click on a result item: fetches the outlet's full record,
    /// shows it, and re-centers on it. The open popup is left as is.
    pub async fn select_result(&mut self, outlet_id: i64) -> bool {
        match self.client.outlet(outlet_id).await {
            Ok(outlet) => {
                self.panel.set(outlet_detail_html(&outlet));
                if let Some(at) = outlet.coordinate() {
                    self.scene.pan_to(at);
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, outlet_id, "error fetching outlet details");
                false
            }
        }
    }

    /// Handles a click on outlet marker `index`.
    pub fn select_marker(&mut self, index: usize) -> bool {
        let Some(entry) = self.store.get(index) else {
            return false;
        };
        self.panel.set(outlet_detail_html(&entry.outlet));
        true
    }

    /// Handles a click on overlap highlight `index`.
    pub fn select_overlap(&mut self, index: usize) -> bool {
        let Some((first, second)) = self.store.overlap_outlets(index) else {
            return false;
        };
        self.panel.set(overlap_html(first, second));
        true
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
