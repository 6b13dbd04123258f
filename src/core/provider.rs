//! Provider-Capability-Tabelle: welche nativen Konstrukte ein Karten-Anbieter bereitstellt.
//!
//! Dies ist die einzige Stelle, an der nach Anbieter-Identität verzweigt wird
//! (abgesehen von der Klick-Koordinaten-Extraktion). Alle nachgelagerten
//! Komponenten entscheiden anhand der Capabilities.

use serde::{Deserialize, Serialize};

/// Aktiver Karten-Anbieter (bereits upstream ausgewählt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Anbieter A: AMap (Gaode)
    AMap,
    /// Anbieter B: Tencent / QQ Maps
    Tencent,
    /// Anbieter C: Google Maps
    Google,
}

impl Provider {
    /// Alle bekannten Anbieter.
    pub const ALL: [Provider; 3] = [Provider::AMap, Provider::Tencent, Provider::Google];

    /// Liefert die statische Capability-Beschreibung dieses Anbieters.
    pub const fn capabilities(self) -> ProviderCapabilities {
        match self {
            Provider::AMap => ProviderCapabilities {
                icon_model: IconModel::Icon,
                label_model: LabelModel::MarkupLabel,
                rotation: true,
                callout_model: CalloutModel::TextOverlay,
                coord_order: CoordOrder::LngLat,
            },
            Provider::Tencent => ProviderCapabilities {
                icon_model: IconModel::MarkerImage,
                label_model: LabelModel::NativeLabel,
                rotation: true,
                callout_model: CalloutModel::DomOverlay,
                coord_order: CoordOrder::LatLng,
            },
            Provider::Google => ProviderCapabilities {
                icon_model: IconModel::MarkerImage,
                label_model: LabelModel::StyledClass,
                rotation: false,
                callout_model: CalloutModel::DomOverlay,
                coord_order: CoordOrder::LatLng,
            },
        }
    }

    /// Parst einen Anbieter-Namen (z.B. aus CLI oder Szenen-Datei).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "amap" | "gaode" => Some(Provider::AMap),
            "tencent" | "qq" => Some(Provider::Tencent),
            "google" => Some(Provider::Google),
            _ => None,
        }
    }
}

/// Icon-Modell des Anbieters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconModel {
    /// `MarkerImage(url, anchor, scaledSize)` — Pixel-Anchor
    MarkerImage,
    /// `Icon { image, size, imageSize, imageOffset }`
    Icon,
    /// Plain-Object-Fallback `{ url, anchor (fraktional), size }`
    PlainObject,
}

/// Label-Modell des Anbieters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelModel {
    /// Eigenständiges natives Label-Objekt auf der Karte
    NativeLabel,
    /// `setLabel` mit rohem Markup
    MarkupLabel,
    /// `setLabel` mit CSS-Klasse, Regel in injiziertem Stylesheet
    StyledClass,
}

/// Callout-Modell des Anbieters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalloutModel {
    /// Text-Overlay: Sichtbarkeit durch Ein-/Aushängen des Textobjekts
    TextOverlay,
    /// DOM-Overlay: Sichtbarkeits-Flag, beim Einblenden nach oben holen
    DomOverlay,
}

/// Reihenfolge des Koordinatenpaars im nativen Positions-Konstruktor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordOrder {
    /// `LngLat(lng, lat)`
    LngLat,
    /// `LatLng(lat, lng)`
    LatLng,
}

/// Unveränderliche Capability-Beschreibung für eine Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub icon_model: IconModel,
    pub label_model: LabelModel,
    /// Marker besitzt einen Rotations-Setter
    pub rotation: bool,
    pub callout_model: CalloutModel,
    pub coord_order: CoordOrder,
}

impl ProviderCapabilities {
    /// Ersetzt das Icon-Modell (z.B. SDK-Build ohne Icon-Konstruktor).
    pub fn with_icon_model(mut self, icon_model: IconModel) -> Self {
        self.icon_model = icon_model;
        self
    }

    /// Ersetzt das Label-Modell.
    pub fn with_label_model(mut self, label_model: LabelModel) -> Self {
        self.label_model = label_model;
        self
    }

    /// Setzt, ob ein Rotations-Setter verfügbar ist.
    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }
}
