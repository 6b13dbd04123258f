use crate::core::{LatLng, MarkerId};
use serde::Serialize;

/// Ausgehendes Event an den Host.
/// Wird nur für adressierbare Marker (nicht-leere, numerische ID) erzeugt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MarkerEvent {
    /// Klick auf den Marker
    #[serde(rename = "markertap", rename_all = "camelCase")]
    MarkerTap {
        marker_id: MarkerId,
        latitude: f64,
        longitude: f64,
    },
    /// Klick auf das Callout
    #[serde(rename = "callouttap", rename_all = "camelCase")]
    CalloutTap { marker_id: MarkerId },
}

impl MarkerEvent {
    pub fn marker_tap(marker_id: MarkerId, position: LatLng) -> Self {
        MarkerEvent::MarkerTap {
            marker_id,
            latitude: position.latitude,
            longitude: position.longitude,
        }
    }

    pub fn marker_id(&self) -> MarkerId {
        match self {
            MarkerEvent::MarkerTap { marker_id, .. } | MarkerEvent::CalloutTap { marker_id } => {
                *marker_id
            }
        }
    }
}
