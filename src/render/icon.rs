//! Icon-Resolver: berechnet Icon-Größe, Anchor-Versatz und das anbieterspezifische Icon-Objekt.

use crate::core::IconModel;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intrinsische Pixelgröße eines geladenen Bildes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Fehler bei der Icon-Auflösung. Nie fatal für den Host.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("Marker.iconPath ist erforderlich")]
    EmptyPath,
    #[error("Icon '{url}' konnte nicht geladen werden: {reason}")]
    LoadFailed { url: String, reason: String },
    #[error("Icon hat ungueltige Abmessungen {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// Ticket einer Icon-Ladeanfrage. Monoton steigend pro logischem Marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconTicket(pub u64);

/// Auftrag an den Host, ein Icon zu laden und mit dem Ticket zurückzumelden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub ticket: IconTicket,
    pub url: String,
}

/// Aufgelöste Icon-Geometrie in Pixeln.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedIcon {
    /// Endgültige Breite/Höhe
    pub size: DVec2,
    /// Fraktionaler Anchor
    pub anchor: DVec2,
    /// Anchor in Pixeln: `(x·w, y·h)`
    pub anchor_offset: DVec2,
    /// Abstand vom Anchor zur Oberkante des Icons
    pub top: f64,
}

/// Berechnet die Icon-Geometrie aus intrinsischer Größe, expliziter Größe und Anchor.
///
/// - Ist mindestens eine Achse explizit gesetzt, wird die fehlende aus dem
///   Seitenverhältnis des Bildes abgeleitet.
/// - Ohne explizite Größe: halbe native Pixelgröße.
pub fn resolve_icon(
    intrinsic: ImageSize,
    width: Option<f64>,
    height: Option<f64>,
    anchor: DVec2,
) -> Result<ResolvedIcon, IconError> {
    let zero_size = || IconError::ZeroSize {
        width: intrinsic.width,
        height: intrinsic.height,
    };
    let img_w = f64::from(intrinsic.width);
    let img_h = f64::from(intrinsic.height);

    // Die intrinsische Größe zählt nur, wo sie tatsächlich eingeht.
    let size = match (width, height) {
        (Some(w), Some(h)) => DVec2::new(w, h),
        (Some(w), None) if intrinsic.width > 0 => DVec2::new(w, img_h / img_w * w),
        (None, Some(h)) if intrinsic.height > 0 => DVec2::new(img_w / img_h * h, h),
        (None, None) if intrinsic.width > 0 && intrinsic.height > 0 => {
            DVec2::new(img_w / 2.0, img_h / 2.0)
        }
        _ => return Err(zero_size()),
    };

    let anchor_offset = anchor * size;
    Ok(ResolvedIcon {
        size,
        anchor,
        anchor_offset,
        top: size.y - (size.y - anchor_offset.y),
    })
}

/// Anbieterspezifisches Icon-Objekt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IconDescriptor {
    /// `MarkerImage(url, null, null, Point(anchor), Size(scaled))`
    MarkerImage {
        url: String,
        anchor: DVec2,
        scaled_size: DVec2,
    },
    /// `Icon { image, size, imageSize, imageOffset }`
    Icon {
        image: String,
        size: DVec2,
        image_size: DVec2,
        image_offset: DVec2,
    },
    /// `{ url, anchor: Point(x, y), size }` mit fraktionalem Anchor
    PlainObject {
        url: String,
        anchor: DVec2,
        size: DVec2,
    },
}

impl IconDescriptor {
    /// URL des Bildes, unabhängig vom Modell.
    pub fn url(&self) -> &str {
        match self {
            IconDescriptor::MarkerImage { url, .. } | IconDescriptor::PlainObject { url, .. } => {
                url
            }
            IconDescriptor::Icon { image, .. } => image,
        }
    }

    /// Darstellungsgröße, unabhängig vom Modell.
    pub fn size(&self) -> DVec2 {
        match self {
            IconDescriptor::MarkerImage { scaled_size, .. } => *scaled_size,
            IconDescriptor::Icon { size, .. } | IconDescriptor::PlainObject { size, .. } => *size,
        }
    }
}

impl ResolvedIcon {
    /// Übersetzt die Geometrie in das Icon-Objekt des gegebenen Modells.
    pub fn descriptor(&self, url: &str, model: IconModel) -> IconDescriptor {
        match model {
            IconModel::MarkerImage => IconDescriptor::MarkerImage {
                url: url.to_string(),
                anchor: self.anchor_offset,
                scaled_size: self.size,
            },
            IconModel::Icon => IconDescriptor::Icon {
                image: url.to_string(),
                size: self.size,
                image_size: self.size,
                image_offset: self.anchor_offset,
            },
            IconModel::PlainObject => IconDescriptor::PlainObject {
                url: url.to_string(),
                anchor: self.anchor,
                size: self.size,
            },
        }
    }
}
