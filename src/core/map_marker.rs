//! Deklarative Marker-Beschreibung: MarkerSpec, LabelSpec, CalloutSpec.

use super::geo::LatLng;
use super::number;
use anyhow::{bail, Context, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Standard-Anchor eines Icons: horizontal mittig, unterer Rand.
pub const DEFAULT_ANCHOR: DVec2 = DVec2::new(0.5, 1.0);

/// Rohe Marker-ID, wie sie im Property-Set steht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMarkerId {
    Number(f64),
    Text(String),
}

/// Normalisierte, adressierbare Marker-ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub i64);

impl MarkerId {
    /// Parst eine Marker-ID aus einem Text.
    ///
    /// Akzeptiert ganze Zahlen auch in Gleitkomma-Schreibweise (`"7.0"`),
    /// lehnt leere, gebrochene und nicht-endliche Werte ab.
    pub fn parse(text: &str) -> Result<Self> {
        let value = number::parse_lenient(text)
            .map_err(anyhow::Error::msg)
            .context("Marker-ID ist keine gueltige Zahl")?;
        let Some(value) = value else {
            bail!("Marker-ID ist leer");
        };
        Self::from_f64(value)
    }

    fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            bail!("Marker-ID muss endlich sein");
        }
        if value.fract() != 0.0 {
            bail!("Marker-ID muss ganzzahlig sein");
        }
        if value.abs() > i64::MAX as f64 {
            bail!("Marker-ID liegt ausserhalb des gueltigen Bereichs");
        }
        Ok(Self(value as i64))
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RawMarkerId {
    /// Normalisiert die rohe ID. Nicht-numerische IDs sind nicht adressierbar.
    pub fn normalize(&self) -> Option<MarkerId> {
        let parsed = match self {
            RawMarkerId::Number(value) => MarkerId::from_f64(*value),
            RawMarkerId::Text(text) if text.trim().is_empty() => return None,
            RawMarkerId::Text(text) => MarkerId::parse(text),
        };
        match parsed {
            Ok(id) => Some(id),
            Err(e) => {
                log::debug!("Marker-ID {:?} nicht adressierbar: {:#}", self, e);
                None
            }
        }
    }
}

/// Fraktionaler Icon-Anchor `{x, y}` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorSpec {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl AnchorSpec {
    /// Fehlende Achsen werden aus `fallback` übernommen.
    pub fn resolve(&self, fallback: DVec2) -> DVec2 {
        DVec2::new(self.x.unwrap_or(fallback.x), self.y.unwrap_or(fallback.y))
    }
}

/// Label-Beschreibung. Leerer `content` bedeutet "kein Label".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSpec {
    pub content: Option<String>,
    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub border_color: Option<String>,
    #[serde(deserialize_with = "number::opt")]
    pub border_width: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub border_radius: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub padding: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub font_size: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub anchor_x: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub anchor_y: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub y: Option<f64>,
}

impl LabelSpec {
    /// Label mit Inhalt, restliche Felder leer.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Nicht-leerer Inhalt oder `None`.
    pub fn effective_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Anzeige-Modus eines Callouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalloutDisplay {
    /// Per Klick auf den Marker ein-/ausblenden
    #[default]
    #[serde(rename = "BYCLICK", alias = "byclick")]
    ByClick,
    /// Immer sichtbar, Klick schaltet nicht um
    #[serde(rename = "ALWAYS", alias = "always")]
    Always,
}

/// Callout-Beschreibung. Inhalt fällt auf den Marker-Titel zurück.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalloutSpec {
    pub content: Option<String>,
    pub color: Option<String>,
    pub bg_color: Option<String>,
    #[serde(deserialize_with = "number::opt")]
    pub font_size: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub border_radius: Option<f64>,
    #[serde(deserialize_with = "number::opt")]
    pub padding: Option<f64>,
    pub box_shadow: Option<String>,
    pub display: CalloutDisplay,
}

impl CalloutSpec {
    /// Callout mit Inhalt, restliche Felder leer.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Nicht-leerer Inhalt oder `None`.
    pub fn effective_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

fn default_alpha() -> f64 {
    1.0
}

/// Deklarative Beschreibung eines logischen Markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    #[serde(default)]
    pub id: Option<RawMarkerId>,
    #[serde(deserialize_with = "number::required")]
    pub latitude: f64,
    #[serde(deserialize_with = "number::required")]
    pub longitude: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon_path: String,
    /// Rotation in Grad
    #[serde(default, deserialize_with = "number::opt")]
    pub rotate: Option<f64>,
    /// Deckkraft, wird mitgeführt aber nicht ausgewertet
    #[serde(default = "default_alpha", deserialize_with = "number::required")]
    pub alpha: f64,
    #[serde(default, deserialize_with = "number::opt")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "number::opt")]
    pub height: Option<f64>,
    #[serde(default)]
    pub callout: Option<CalloutSpec>,
    #[serde(default)]
    pub label: Option<LabelSpec>,
    #[serde(default)]
    pub anchor: Option<AnchorSpec>,
}

impl MarkerSpec {
    /// Erstellt einen Marker mit Position und Icon, alles andere Standard.
    pub fn new(latitude: f64, longitude: f64, icon_path: impl Into<String>) -> Self {
        Self {
            id: None,
            latitude,
            longitude,
            title: String::new(),
            icon_path: icon_path.into(),
            rotate: None,
            alpha: default_alpha(),
            width: None,
            height: None,
            callout: None,
            label: None,
            anchor: None,
        }
    }

    /// Setzt die ID als Text.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(RawMarkerId::Text(id.into()));
        self
    }

    /// Setzt den Titel.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Setzt eine explizite Icon-Größe (einzelne Achsen optional).
    pub fn with_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Setzt das Label.
    pub fn with_label(mut self, label: LabelSpec) -> Self {
        self.label = Some(label);
        self
    }

    /// Setzt das Callout.
    pub fn with_callout(mut self, callout: CalloutSpec) -> Self {
        self.callout = Some(callout);
        self
    }

    /// Position des Markers.
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Adressierbare ID oder `None`.
    pub fn marker_id(&self) -> Option<MarkerId> {
        self.id.as_ref().and_then(RawMarkerId::normalize)
    }

    /// String-Form der ID für die Marker-Registry (leer, falls nicht adressierbar).
    pub fn id_string(&self) -> String {
        self.marker_id().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Rotation mit Standardwert 0.
    pub fn rotation(&self) -> f64 {
        self.rotate.unwrap_or(0.0)
    }

    /// Explizite Breite; 0 zählt als "nicht gesetzt".
    pub fn explicit_width(&self) -> Option<f64> {
        self.width.filter(|w| *w != 0.0)
    }

    /// Explizite Höhe; 0 zählt als "nicht gesetzt".
    pub fn explicit_height(&self) -> Option<f64> {
        self.height.filter(|h| *h != 0.0)
    }

    /// Aufgelöster fraktionaler Anchor.
    pub fn anchor_or(&self, fallback: DVec2) -> DVec2 {
        self.anchor
            .map(|a| a.resolve(fallback))
            .unwrap_or(fallback)
    }
}
