//! Karten-Container: native Karte samt SDK, Marker-Registry und Bereit-Signal.

use crate::backend::{MapBackend, MarkerKey};
use crate::shared::SyncOptions;
use indexmap::IndexMap;

/// Registry ID-String → nativer Marker.
///
/// Jeder Controller schreibt nur seinen eigenen Eintrag.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: IndexMap<String, MarkerKey>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Marker. Liefert einen verdrängten Vorgänger.
    pub fn register(&mut self, id: &str, marker: MarkerKey) -> Option<MarkerKey> {
        let previous = self.entries.insert(id.to_string(), marker);
        if let Some(prev) = previous.filter(|p| *p != marker) {
            log::warn!(
                "Marker-ID '{}' doppelt vergeben: {} ersetzt {}",
                id,
                marker,
                prev
            );
        }
        previous
    }

    /// Entfernt den Eintrag nur, wenn er noch auf `marker` zeigt.
    pub fn deregister(&mut self, id: &str, marker: MarkerKey) -> bool {
        if self.entries.get(id) == Some(&marker) {
            self.entries.shift_remove(id);
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: &str) -> Option<MarkerKey> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MarkerKey)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Karten-Container, in den sich Marker-Controller einhängen.
pub struct MapHost<B: MapBackend> {
    pub(crate) backend: B,
    pub(crate) registry: MarkerRegistry,
    pub(crate) options: SyncOptions,
    ready: bool,
}

impl<B: MapBackend> MapHost<B> {
    /// Erstellt einen noch nicht bereiten Container.
    pub fn new(backend: B, options: SyncOptions) -> Self {
        Self {
            backend,
            registry: MarkerRegistry::new(),
            options,
            ready: false,
        }
    }

    /// Setzt das Bereit-Signal. Liefert `true` nur beim ersten Aufruf.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready {
            return false;
        }
        self.ready = true;
        log::info!("Karte bereit ({:?})", self.backend.provider());
        true
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }
}
