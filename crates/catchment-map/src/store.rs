//! Outlets currently on the map, with their layers and overlap highlights.

use catchment_core::{
    detect_overlaps, CatchmentCircle, LatLng, OverlapAnnotation, Outlet, CATCHMENT_STYLE,
    HIGHLIGHT_STYLE,
};

use crate::panel::{outlet_detail_html, overlap_html, popup_html};
use crate::scene::{LayerId, MapScene};

#[derive(Debug, Clone)]
pub struct StoredOutlet {
    pub outlet: Outlet,
    pub coordinate: LatLng,
    pub catchment: CatchmentCircle,
    pub marker: LayerId,
    pub circle: LayerId,
}

#[derive(Debug, Clone)]
pub struct StoredOverlap {
    pub annotation: OverlapAnnotation,
    pub layer: LayerId,
}

/// Ordered outlet list paired with the scene layers drawn for each entry.
///
/// Only outlets with a coordinate are admitted. Overlap highlights are
/// rebuilt wholesale by [`OutletStore::recompute_overlaps`].
#[derive(Debug, Clone, Default)]
pub struct OutletStore {
    entries: Vec<StoredOutlet>,
    overlaps: Vec<StoredOverlap>,
}

impl OutletStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a marker and catchment circle for `outlet`.
    ///
    /// Returns the entry index, or `None` if the outlet has no coordinate (in
    /// which case nothing is drawn).
    pub fn insert(&mut self, outlet: Outlet, scene: &mut MapScene) -> Option<usize> {
        let coordinate = outlet.coordinate()?;
        let catchment = CatchmentCircle::new(coordinate);

        let marker = scene.add_marker(
            coordinate,
            popup_html(&outlet),
            Some(outlet_detail_html(&outlet)),
        );
        let circle = scene.add_circle(catchment, CATCHMENT_STYLE, None);

        self.entries.push(StoredOutlet {
            outlet,
            coordinate,
            catchment,
            marker,
            circle,
        });
        Some(self.entries.len() - 1)
    }

    /// Drops every existing highlight and derives a fresh set from the
    /// current catchment circles. Returns the number of overlapping pairs.
    pub fn recompute_overlaps(&mut self, scene: &mut MapScene) -> usize {
        for overlap in self.overlaps.drain(..) {
            scene.remove_layer(overlap.layer);
        }

        let circles: Vec<CatchmentCircle> = self.entries.iter().map(|e| e.catchment).collect();
        for annotation in detect_overlaps(&circles) {
            let first = &self.entries[annotation.first].outlet;
            let second = &self.entries[annotation.second].outlet;
            let layer = scene.add_circle(
                CatchmentCircle {
                    center: annotation.center,
                    radius_m: annotation.radius_m,
                },
                HIGHLIGHT_STYLE,
                Some(overlap_html(first, second)),
            );
            self.overlaps.push(StoredOverlap { annotation, layer });
        }
        self.overlaps.len()
    }

    /// First entry whose marker sits exactly on `at`.
    #[must_use]
    pub fn marker_at(&self, at: LatLng) -> Option<&StoredOutlet> {
        self.entries.iter().find(|entry| entry.coordinate == at)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StoredOutlet> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[StoredOutlet] {
        &self.entries
    }

    #[must_use]
    pub fn overlaps(&self) -> &[StoredOverlap] {
        &self.overlaps
    }

    /// The two outlets referenced by overlap `index`.
    #[must_use]
    pub fn overlap_outlets(&self, index: usize) -> Option<(&Outlet, &Outlet)> {
        let overlap = self.overlaps.get(index)?;
        let first = &self.entries.get(overlap.annotation.first)?.outlet;
        let second = &self.entries.get(overlap.annotation.second)?.outlet;
        Some((first, second))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::scene::LayerKind;

    use super::*;

    fn outlet(id: i64, name: &str, coord: Option<(f64, f64)>) -> Outlet {
        Outlet {
            id,
            name: name.to_string(),
            address: None,
            operating_hours: None,
            waze_link: None,
            latitude: coord.map(|c| c.0),
            longitude: coord.map(|c| c.1),
        }
    }

    fn highlight_count(scene: &MapScene) -> usize {
        scene
            .layers()
            .iter()
            .filter(|l| matches!(&l.kind, LayerKind::Circle { style, .. } if *style == HIGHLIGHT_STYLE))
            .count()
    }

    #[test]
    fn outlet_without_coordinate_gets_no_layers() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        assert_eq!(store.insert(outlet(1, "Subway Nowhere", None), &mut scene), None);
        assert!(store.is_empty());
        assert!(scene.layers().is_empty());
    }

    #[test]
    fn geocoded_outlet_gets_marker_and_catchment() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        let idx = store
            .insert(outlet(1, "Subway Bangsar", Some((3.13, 101.671))), &mut scene)
            .expect("geocoded outlet is stored");
        let entry = store.get(idx).unwrap();

        assert!(matches!(scene.layer(entry.marker).unwrap().kind, LayerKind::Marker { .. }));
        match &scene.layer(entry.circle).unwrap().kind {
            LayerKind::Circle { circle, style } => {
                assert_eq!(*style, CATCHMENT_STYLE);
                assert!((circle.radius_m - 5_000.0).abs() < f64::EPSILON);
            }
            LayerKind::Marker { .. } => panic!("expected circle layer"),
        }
    }

    #[test]
    fn recompute_replaces_previous_highlights() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        store.insert(outlet(1, "Subway Bangsar", Some((3.130, 101.671))), &mut scene);
        store.insert(outlet(2, "Subway Mid Valley", Some((3.118, 101.677))), &mut scene);

        assert_eq!(store.recompute_overlaps(&mut scene), 1);
        assert_eq!(store.recompute_overlaps(&mut scene), 1);
        assert_eq!(highlight_count(&scene), 1);
    }

    #[test]
    fn uncoordinated_outlets_are_excluded_from_overlaps() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        store.insert(outlet(1, "Subway Bangsar", Some((3.130, 101.671))), &mut scene);
        store.insert(outlet(2, "Subway Unknown", None), &mut scene);
        store.insert(outlet(3, "Subway Penang", Some((5.4164, 100.3327))), &mut scene);

        assert_eq!(store.recompute_overlaps(&mut scene), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn overlap_references_both_outlets() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        store.insert(outlet(1, "Subway Bangsar", Some((3.130, 101.671))), &mut scene);
        store.insert(outlet(2, "Subway Mid Valley", Some((3.118, 101.677))), &mut scene);
        store.recompute_overlaps(&mut scene);

        let (a, b) = store.overlap_outlets(0).expect("one overlap");
        assert_eq!((a.id, b.id), (1, 2));
        let layer = scene.layer(store.overlaps()[0].layer).unwrap();
        assert!(layer
            .panel_html
            .as_deref()
            .unwrap()
            .contains("<li>Subway Bangsar</li><li>Subway Mid Valley</li>"));
    }

    #[test]
    fn three_way_overlap_gets_three_highlights() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        store.insert(outlet(1, "A", Some((3.10, 101.60))), &mut scene);
        store.insert(outlet(2, "B", Some((3.11, 101.61))), &mut scene);
        store.insert(outlet(3, "C", Some((3.12, 101.62))), &mut scene);

        assert_eq!(store.recompute_overlaps(&mut scene), 3);
        assert_eq!(highlight_count(&scene), 3);
    }

    #[test]
    fn marker_lookup_uses_exact_coordinates() {
        let mut scene = MapScene::default();
        let mut store = OutletStore::new();
        store.insert(outlet(1, "Subway Bangsar", Some((3.130, 101.671))), &mut scene);

        assert!(store.marker_at(LatLng::new(3.130, 101.671)).is_some());
        assert!(store.marker_at(LatLng::new(3.1300001, 101.671)).is_none());
    }
}
