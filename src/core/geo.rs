//! Geografische Basistypen.

use super::provider::CoordOrder;
use serde::{Deserialize, Serialize};

/// Geografische Position in Grad.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    /// Erstellt eine neue Position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Übersetzt die Position in das native Koordinatenpaar des Anbieters.
    pub fn to_native(self, order: CoordOrder) -> NativePosition {
        match order {
            CoordOrder::LngLat => NativePosition::LngLat {
                lng: self.longitude,
                lat: self.latitude,
            },
            CoordOrder::LatLng => NativePosition::LatLng {
                lat: self.latitude,
                lng: self.longitude,
            },
        }
    }
}

/// Natives Positions-Objekt in anbieterspezifischer Argument-Reihenfolge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NativePosition {
    /// `new LngLat(lng, lat)`
    LngLat { lng: f64, lat: f64 },
    /// `new LatLng(lat, lng)`
    LatLng { lat: f64, lng: f64 },
}

impl NativePosition {
    /// Rückübersetzung in eine anbieterneutrale Position.
    pub fn lat_lng(self) -> LatLng {
        match self {
            NativePosition::LngLat { lng, lat } | NativePosition::LatLng { lat, lng } => {
                LatLng::new(lat, lng)
            }
        }
    }
}
