//! Zentrale Konfiguration für die Marker-Synchronisation.
//!
//! `SyncOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_ANCHOR;

// ── Labels ──────────────────────────────────────────────────────────

/// Standard-Schriftgröße (und Zeilenhöhe) von Labels in Pixeln.
pub const LABEL_FONT_SIZE: f64 = 14.0;
/// Präfix der pro Marker erzeugten Label-CSS-Klasse.
pub const LABEL_CLASS_PREFIX: &str = "uni-map-marker-label-";
/// Vertikale Position des Klassen-Labels relativ zum Marker (px).
pub const LABEL_CLASS_TOP_PX: f64 = 70.0;
/// Richtungshinweis für Markup-Labels.
pub const LABEL_MARKUP_DIRECTION: &str = "bottom-right";

// ── Callouts ────────────────────────────────────────────────────────

/// Standard-Schatten eines Callouts.
pub const CALLOUT_BOX_SHADOW: &str = "0px 0px 3px 1px rgba(0,0,0,0.5)";

/// Welche Icon-Höhe für den vertikalen Callout-Versatz (`-h/2`) verwendet wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutOffsetPolicy {
    /// Aufgelöste Icon-Höhe (auch wenn aus dem Seitenverhältnis abgeleitet)
    #[default]
    ResolvedHeight,
    /// Nur explizit gesetzte Höhe, sonst kein Versatz
    ExplicitHeight,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Synchronisations-Optionen.
/// Wird als `map_marker_sync.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOptions {
    // ── Icons ───────────────────────────────────────────────────
    /// Fraktionaler Standard-Anchor `[x, y]`
    pub default_anchor: DVec2,
    /// Basis für relative Icon-Pfade (leer = Pfade unverändert)
    #[serde(default)]
    pub asset_root: String,

    // ── Labels ──────────────────────────────────────────────────
    /// Standard-Schriftgröße in Pixeln
    pub label_font_size: f64,
    /// Präfix der CSS-Klasse für Stylesheet-Labels
    pub label_class_prefix: String,
    /// `top`-Versatz der CSS-Klasse in Pixeln
    pub label_class_top_px: f64,
    /// Richtungshinweis für Markup-Labels
    pub label_markup_direction: String,

    // ── Callouts ────────────────────────────────────────────────
    /// Schatten, falls das Callout keinen eigenen definiert
    pub callout_box_shadow: String,
    /// Höhen-Policy für den vertikalen Callout-Versatz
    #[serde(default)]
    pub callout_offset: CalloutOffsetPolicy,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            default_anchor: DEFAULT_ANCHOR,
            asset_root: String::new(),

            label_font_size: LABEL_FONT_SIZE,
            label_class_prefix: LABEL_CLASS_PREFIX.to_string(),
            label_class_top_px: LABEL_CLASS_TOP_PX,
            label_markup_direction: LABEL_MARKUP_DIRECTION.to_string(),

            callout_box_shadow: CALLOUT_BOX_SHADOW.to_string(),
            callout_offset: CalloutOffsetPolicy::default(),
        }
    }
}

impl SyncOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("map_marker_sync"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("map_marker_sync.toml")
    }
}
