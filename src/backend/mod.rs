//! Vendor-Backend: die native Karten-SDK-Oberfläche, gegen die synchronisiert wird.
//!
//! Native Objekte werden über typisierte Schlüssel adressiert; das Backend
//! besitzt die eigentlichen SDK-Objekte, der Marker-Controller besitzt die
//! Schlüssel.

pub mod recording;

use crate::core::{NativePosition, Provider, ProviderCapabilities};
use crate::render::{CalloutOptions, IconDescriptor, MarkerLabel, NativeLabel};
use serde::Serialize;

pub use recording::{CallLog, NativeCall, RecordingBackend};

macro_rules! native_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

native_key!(
    /// Schlüssel eines nativen Marker-Objekts.
    MarkerKey
);
native_key!(
    /// Schlüssel eines nativen Label-Objekts.
    LabelKey
);
native_key!(
    /// Schlüssel eines nativen Callout-Overlays.
    CalloutKey
);
native_key!(
    /// Schlüssel eines injizierten Stylesheet-Elements.
    StylesheetKey
);

/// Konstruktor-Optionen für native Marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerInit {
    /// Marker liegt flach auf der Karte
    pub flat: bool,
    /// Marker dreht sich nicht automatisch mit der Fahrtrichtung
    pub auto_rotation: bool,
}

impl Default for MarkerInit {
    fn default() -> Self {
        Self {
            flat: true,
            auto_rotation: false,
        }
    }
}

/// Native Karte samt Vendor-SDK.
///
/// Implementierungen kapseln genau einen Anbieter. Vendor-spezifische
/// Details (z.B. wie ein Callout entfernt wird) bleiben hinter diesen
/// Methoden; die Auswahl des Aufrufpfads erfolgt über [`ProviderCapabilities`].
pub trait MapBackend {
    /// Aktiver Anbieter.
    fn provider(&self) -> Provider;

    /// Capabilities der aktiven SDK-Instanz.
    fn capabilities(&self) -> ProviderCapabilities {
        self.provider().capabilities()
    }

    // ── Marker ──────────────────────────────────────────────────

    /// Erstellt einen Marker auf der Karte.
    fn create_marker(&mut self, init: MarkerInit) -> MarkerKey;
    /// Nimmt den Marker von der Karte und gibt ihn frei.
    fn remove_marker(&mut self, marker: MarkerKey);
    fn set_position(&mut self, marker: MarkerKey, position: NativePosition);
    fn set_icon(&mut self, marker: MarkerKey, icon: &IconDescriptor);
    /// Nur aufrufen, wenn `capabilities().rotation` gesetzt ist.
    fn set_rotation(&mut self, marker: MarkerKey, degrees: f64);

    // ── Labels ──────────────────────────────────────────────────

    /// Erstellt ein eigenständiges natives Label auf der Karte.
    fn create_label(&mut self, label: &NativeLabel) -> LabelKey;
    /// Hängt ein natives Label von der Karte ab.
    fn detach_label(&mut self, label: LabelKey);
    /// Setzt (oder entfernt mit `None`) das Marker-eigene Label.
    fn set_marker_label(&mut self, marker: MarkerKey, label: Option<&MarkerLabel>);

    // ── Stylesheets ─────────────────────────────────────────────

    /// Legt ein `<style>`-Element mit der angegebenen Element-ID an.
    fn create_stylesheet(&mut self, element_id: &str) -> StylesheetKey;
    /// Überschreibt den Regeltext eines Stylesheets.
    fn write_stylesheet(&mut self, sheet: StylesheetKey, css: &str);
    fn remove_stylesheet(&mut self, sheet: StylesheetKey);

    // ── Callouts ────────────────────────────────────────────────

    fn create_callout(&mut self, options: &CalloutOptions, visible: bool) -> CalloutKey;
    fn update_callout(&mut self, callout: CalloutKey, options: &CalloutOptions);
    /// DOM-Overlay: Sichtbarkeits-Flag setzen.
    fn set_callout_visible(&mut self, callout: CalloutKey, visible: bool);
    /// DOM-Overlay: Element an das Ende der Paint-Reihenfolge hängen.
    fn raise_callout(&mut self, callout: CalloutKey);
    /// Text-Overlay: Textobjekt auf der Karte erzeugen.
    fn mount_callout_text(&mut self, callout: CalloutKey);
    /// Text-Overlay: Textobjekt von der Karte entfernen (Inhalt bleibt erhalten).
    fn unmount_callout_text(&mut self, callout: CalloutKey);
    /// Entfernt das Callout vollständig.
    fn remove_callout(&mut self, callout: CalloutKey);
}
