//! The map page.
//!
//! The page only draws what the server computed: `/api/scene` supplies
//! markers, catchments and overlap highlights with their popup and panel
//! HTML; `/api/query/{q}` and `/api/detail/{id}` supply panel content for
//! searches and result clicks.

use catchment_core::{LatLng, CATCHMENT_RADIUS_M};
use catchment_map::INITIAL_VIEW;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Outlet Catchment Map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<style>
body { margin: 0; font-family: system-ui, sans-serif; display: flex; height: 100vh; }
#map { flex: 1; }
#sidebar { width: 340px; padding: 16px; overflow-y: auto; border-left: 1px solid #ddd; }
#search { display: flex; gap: 6px; margin-bottom: 12px; }
#search-input { flex: 1; padding: 6px; }
.outlet-item { cursor: pointer; padding: 6px 0; border-bottom: 1px solid #eee; }
.error { color: #b00020; }
</style>
</head>
<body>
<div id="map"></div>
<div id="sidebar">
  <div id="search">
    <input id="search-input" type="text" placeholder="e.g. how many outlets in Cheras">
    <button id="search-button">Search</button>
  </div>
  <div id="outlet-info"><p>Select an outlet or search.</p></div>
</div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
const map = L.map('map').setView([__LAT__, __LNG__], __ZOOM__);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
}).addTo(map);

const panel = document.getElementById('outlet-info');
const markers = [];

function toOptions(style) {
    return { color: style.color, fillColor: style.fill_color, fillOpacity: style.fill_opacity, radius: __RADIUS__ };
}

function drawScene(scene) {
    scene.layers.forEach(layer => {
        let drawn;
        if (layer.kind === 'marker') {
            drawn = L.marker([layer.at.lat, layer.at.lng]).addTo(map).bindPopup(layer.popup_html);
            markers.push(drawn);
        } else {
            const c = layer.circle.center;
            const opts = toOptions(layer.style);
            opts.radius = layer.circle.radius_m;
            drawn = L.circle([c.lat, c.lng], opts).addTo(map);
        }
        if (layer.panel_html) {
            drawn.on('click', () => { panel.innerHTML = layer.panel_html; });
        }
    });
}

fetch('/api/scene')
    .then(r => { if (!r.ok) throw new Error(r.status); return r.json(); })
    .then(body => drawScene(body.data.scene))
    .catch(error => {
        console.error('Error fetching outlets:', error);
        panel.innerHTML = '<p class="error">Failed to load outlets. Please try again later.</p>';
    });

function wireResultItems() {
    document.querySelectorAll('.outlet-item').forEach(item => {
        item.addEventListener('click', () => {
            fetch('/api/detail/' + item.getAttribute('data-id'))
                .then(r => { if (!r.ok) throw new Error(r.status); return r.json(); })
                .then(body => {
                    const o = body.data.outlet;
                    panel.innerHTML = body.data.panel_html;
                    if (o.latitude != null && o.longitude != null) {
                        map.panTo([o.latitude, o.longitude]);
                    }
                })
                .catch(error => console.error('Error fetching outlet details:', error));
        });
    });
}

function performSearch() {
    const query = document.getElementById('search-input').value.trim();
    if (!query) return;
    fetch('/api/query/' + encodeURIComponent(query))
        .then(r => {
            if (r.status === 204) return null;
            if (!r.ok) throw new Error(r.status);
            return r.json();
        })
        .then(body => {
            if (!body) return;
            panel.innerHTML = body.data.panel_html;
            body.data.outlets.forEach(o => {
                if (o.latitude == null || o.longitude == null) return;
                const m = markers.find(m => m.getLatLng().lat === o.latitude && m.getLatLng().lng === o.longitude);
                if (m) { map.panTo(m.getLatLng()); m.openPopup(); }
            });
            wireResultItems();
        })
        .catch(error => console.error('Error searching outlets:', error));
}

document.getElementById('search-button').addEventListener('click', performSearch);
document.getElementById('search-input').addEventListener('keypress', e => {
    if (e.key === 'Enter') performSearch();
});
</script>
</body>
</html>
"#;

/// Render the map page centered on the initial view.
#[must_use]
pub fn render_index() -> String {
    let LatLng { lat, lng } = INITIAL_VIEW.center;
    PAGE_TEMPLATE
        .replace("__LAT__", &lat.to_string())
        .replace("__LNG__", &lng.to_string())
        .replace("__ZOOM__", &INITIAL_VIEW.zoom.to_string())
        .replace("__RADIUS__", &CATCHMENT_RADIUS_M.to_string())
}
