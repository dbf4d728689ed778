//! Map layers, view and popup state.
//!
//! The scene stands in for the browser map: it records what would be drawn
//! so the site can replay it in Leaflet and the CLI can print it.

use catchment_core::{CatchmentCircle, CircleStyle, LatLng};
use serde::Serialize;

/// Kuala Lumpur city center at street-level zoom.
pub const INITIAL_VIEW: MapView = MapView {
    center: LatLng::new(3.1390, 101.6869),
    zoom: 12,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerKind {
    Marker {
        at: LatLng,
        popup_html: String,
    },
    Circle {
        circle: CatchmentCircle,
        style: CircleStyle,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub id: LayerId,
    #[serde(flatten)]
    pub kind: LayerKind,
    /// Panel content shown when the layer is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_html: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapScene {
    layers: Vec<Layer>,
    view: MapView,
    open_popup: Option<LayerId>,
    #[serde(skip)]
    next_id: u64,
}

impl Default for MapScene {
    fn default() -> Self {
        Self::new(INITIAL_VIEW)
    }
}

impl MapScene {
    #[must_use]
    pub fn new(view: MapView) -> Self {
        Self {
            layers: Vec::new(),
            view,
            open_popup: None,
            next_id: 1,
        }
    }

    pub fn add_marker(
        &mut self,
        at: LatLng,
        popup_html: String,
        panel_html: Option<String>,
    ) -> LayerId {
        self.push(LayerKind::Marker { at, popup_html }, panel_html)
    }

    pub fn add_circle(
        &mut self,
        circle: CatchmentCircle,
        style: CircleStyle,
        panel_html: Option<String>,
    ) -> LayerId {
        self.push(LayerKind::Circle { circle, style }, panel_html)
    }

    /// Removes a layer; closes its popup if it was open. Unknown IDs are ignored.
    pub fn remove_layer(&mut self, id: LayerId) {
        self.layers.retain(|layer| layer.id != id);
        if self.open_popup == Some(id) {
            self.open_popup = None;
        }
    }

    /// Re-centers the view without changing zoom.
    pub fn pan_to(&mut self, center: LatLng) {
        self.view.center = center;
    }

    /// Opens the popup of a marker layer. Returns `false` for anything else.
    pub fn open_popup(&mut self, id: LayerId) -> bool {
        let is_marker = self
            .layer(id)
            .is_some_and(|layer| matches!(layer.kind, LayerKind::Marker { .. }));
        if is_marker {
            self.open_popup = Some(id);
        }
        is_marker
    }

    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn view(&self) -> MapView {
        self.view
    }

    #[must_use]
    pub fn popup(&self) -> Option<LayerId> {
        self.open_popup
    }

    fn push(&mut self, kind: LayerKind, panel_html: Option<String>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer {
            id,
            kind,
            panel_html,
        });
        id
    }
}
