//! Pairwise catchment overlap detection.
//!
//! Every outlet with a coordinate owns one fixed-radius catchment circle.
//! [`detect_overlaps`] scans all pairs `(i, j)` with `i < j` and flags those
//! whose centers are strictly closer than the sum of their radii. The scan is
//! quadratic and meant for single-city outlet counts; callers always rerun it
//! from scratch over the current circle set rather than patching old results.

use serde::Serialize;

use crate::geo::{haversine_m, LatLng};
use crate::outlet::Outlet;

/// Catchment radius shared by every outlet, in metres.
pub const CATCHMENT_RADIUS_M: f64 = 5_000.0;

/// Stroke and fill settings for a circle layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

pub const CATCHMENT_STYLE: CircleStyle = CircleStyle {
    color: "#009959",
    fill_color: "#009959",
    fill_opacity: 0.2,
};

pub const HIGHLIGHT_STYLE: CircleStyle = CircleStyle {
    color: "#ffcb00",
    fill_color: "#ffcb00",
    fill_opacity: 0.3,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatchmentCircle {
    pub center: LatLng,
    pub radius_m: f64,
}

impl CatchmentCircle {
    #[must_use]
    pub const fn new(center: LatLng) -> Self {
        Self {
            center,
            radius_m: CATCHMENT_RADIUS_M,
        }
    }

    /// Circle for `outlet`, or `None` when it has no coordinate.
    #[must_use]
    pub fn for_outlet(outlet: &Outlet) -> Option<Self> {
        outlet.coordinate().map(Self::new)
    }

    #[must_use]
    pub fn overlaps(&self, other: &CatchmentCircle) -> bool {
        haversine_m(self.center, other.center) < self.radius_m + other.radius_m
    }
}

/// One overlapping pair of catchment circles.
///
/// `first` and `second` index into the circle slice given to
/// [`detect_overlaps`], with `first < second`. The highlight is drawn at the
/// first circle's center with the catchment radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapAnnotation {
    pub first: usize,
    pub second: usize,
    pub center: LatLng,
    pub radius_m: f64,
}

/// Find every overlapping pair, outer index ascending then inner ascending.
#[must_use]
pub fn detect_overlaps(circles: &[CatchmentCircle]) -> Vec<OverlapAnnotation> {
    let mut annotations = Vec::new();
    for (i, a) in circles.iter().enumerate() {
        for (j, b) in circles.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                annotations.push(OverlapAnnotation {
                    first: i,
                    second: j,
                    center: a.center,
                    radius_m: CATCHMENT_RADIUS_M,
                });
            }
        }
    }
    annotations
}
