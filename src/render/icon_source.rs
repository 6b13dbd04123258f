//! Icon-Quellen: Pfadauflösung und Ermittlung der intrinsischen Bildgröße.

use super::icon::ImageSize;
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Präfixe, die bereits ladbare URLs kennzeichnen.
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "data:", "blob:", "file://", "/"];

/// Übersetzt einen logischen Icon-Pfad in eine ladbare URL.
///
/// Absolute URLs, Data-URIs und wurzelbasierte Pfade bleiben unverändert,
/// relative Pfade werden an `asset_root` gehängt.
pub fn resolve_icon_url(icon_path: &str, asset_root: &str) -> String {
    let path = icon_path.trim();
    if asset_root.is_empty() || ABSOLUTE_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return path.to_string();
    }
    let path = path.strip_prefix("./").unwrap_or(path);
    format!("{}/{}", asset_root.trim_end_matches('/'), path)
}

/// Lädt ein Icon und liefert seine intrinsische Pixelgröße.
pub trait IconLoader {
    fn load_dimensions(&self, url: &str) -> Result<ImageSize>;
}

/// Liest Bildabmessungen aus lokalen Dateien (PNG, JPEG).
#[derive(Debug, Default, Clone, Copy)]
pub struct FileIconLoader;

impl IconLoader for FileIconLoader {
    fn load_dimensions(&self, url: &str) -> Result<ImageSize> {
        if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
            bail!("Nur lokale Icon-Dateien werden unterstuetzt: {}", url);
        }
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Icon-Abmessungen nicht lesbar: {}", path.display()))?;
        log::debug!("Icon '{}' geladen: {}x{}", path.display(), width, height);
        Ok(ImageSize::new(width, height))
    }
}

/// Feste Größentabelle, z.B. aus einer Szenen-Datei.
#[derive(Debug, Default, Clone)]
pub struct FixedIconLoader {
    sizes: IndexMap<String, ImageSize>,
}

impl FixedIconLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hinterlegt die Größe für eine URL.
    pub fn insert(&mut self, url: impl Into<String>, size: ImageSize) {
        self.sizes.insert(url.into(), size);
    }

    pub fn with(mut self, url: impl Into<String>, size: ImageSize) -> Self {
        self.insert(url, size);
        self
    }
}

impl IconLoader for FixedIconLoader {
    fn load_dimensions(&self, url: &str) -> Result<ImageSize> {
        self.sizes
            .get(url)
            .copied()
            .with_context(|| format!("Keine Icon-Groesse hinterlegt fuer: {}", url))
    }
}
