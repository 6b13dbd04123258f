use crate::app::normalizer::{DomEvent, VendorClickEvent};
use crate::core::MarkerSpec;
use crate::render::{IconTicket, ImageSize};

/// Host-seitige Instanz-Kennung eines logischen Markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerSlot(pub u64);

impl std::fmt::Display for MarkerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot#{}", self.0)
    }
}

/// Eingaben des Hosts an die Marker-Schicht.
/// Intents beschreiben, was passiert ist; die Schicht entscheidet, was daraus folgt.
#[derive(Debug)]
pub enum LayerIntent {
    /// Logischer Marker wurde deklariert (Erzeugungs-Hook)
    MarkerDeclared { slot: MarkerSlot, spec: MarkerSpec },
    /// Karten-Container meldet "bereit"
    MapReady,
    /// Neues vollständiges Property-Set für einen Marker
    MarkerSpecChanged { slot: MarkerSlot, spec: MarkerSpec },
    /// Icon wurde geladen
    IconLoaded {
        slot: MarkerSlot,
        ticket: IconTicket,
        size: ImageSize,
    },
    /// Icon konnte nicht geladen werden
    IconLoadFailed {
        slot: MarkerSlot,
        ticket: IconTicket,
        reason: String,
    },
    /// Nativer Klick auf den Marker
    MarkerClicked {
        slot: MarkerSlot,
        event: VendorClickEvent,
    },
    /// Klick auf das Callout
    CalloutClicked {
        slot: MarkerSlot,
        dom_event: Option<DomEvent>,
    },
    /// Logischer Marker wurde entfernt (Zerstörungs-Hook)
    MarkerRemoved { slot: MarkerSlot },
}
