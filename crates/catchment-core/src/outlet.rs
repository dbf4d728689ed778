use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// A single retail outlet as served by the backend API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub operating_hours: Option<String>,
    #[serde(default)]
    pub waze_link: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Outlet {
    /// The outlet's coordinate, present only when both halves are.
    #[must_use]
    pub fn coordinate(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }
}

/// Response of the count-by-location endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    #[serde(default)]
    pub location: Option<String>,
    pub count: u64,
    #[serde(default)]
    pub outlets: Vec<Outlet>,
}
