//! Marker-Schicht: verteilt Host-Intents an die Controller der einzelnen Marker.

use super::controller::MarkerController;
use super::events::{LayerIntent, MarkerEvent, MarkerSlot};
use super::host::MapHost;
use crate::backend::MapBackend;
use crate::render::{IconError, IconLoader, IconRequest, IconTicket, ImageSize};
use crate::shared::SyncOptions;
use anyhow::{bail, Context};
use indexmap::IndexMap;

/// Ausstehende Icon-Ladung, die der Host auflösen muss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingIconLoad {
    pub slot: MarkerSlot,
    pub ticket: IconTicket,
    pub url: String,
}

impl PendingIconLoad {
    fn new(slot: MarkerSlot, request: IconRequest) -> Self {
        Self {
            slot,
            ticket: request.ticket,
            url: request.url,
        }
    }
}

/// Reihenfolge, in der `flush_icon_loads` die Ladungen zurückmeldet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadOrder {
    /// In Anfrage-Reihenfolge
    #[default]
    Issued,
    /// Neueste zuerst (ältere Ergebnisse treffen verspätet ein)
    Reversed,
}

/// Alle Marker einer Karte samt Karten-Container.
pub struct MarkerLayer<B: MapBackend> {
    host: MapHost<B>,
    controllers: IndexMap<MarkerSlot, MarkerController>,
    pending_loads: Vec<PendingIconLoad>,
    events: Vec<MarkerEvent>,
}

impl<B: MapBackend> MarkerLayer<B> {
    /// Erstellt eine leere Schicht über einer noch nicht bereiten Karte.
    pub fn new(backend: B, options: SyncOptions) -> Self {
        Self {
            host: MapHost::new(backend, options),
            controllers: IndexMap::new(),
            pending_loads: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Verarbeitet einen Host-Intent.
    ///
    /// Fehler entstehen nur bei Fehlbenutzung durch den Host (unbekannter
    /// oder doppelter Slot), nie durch Marker-Inhalte.
    pub fn handle_intent(&mut self, intent: LayerIntent) -> anyhow::Result<()> {
        match intent {
            LayerIntent::MarkerDeclared { slot, spec } => {
                if self.controllers.contains_key(&slot) {
                    bail!("Marker {} ist bereits deklariert", slot);
                }
                let mut controller = MarkerController::new(spec);
                if let Some(request) = controller.attach(&mut self.host) {
                    self.pending_loads.push(PendingIconLoad::new(slot, request));
                }
                self.controllers.insert(slot, controller);
            }
            LayerIntent::MapReady => {
                if !self.host.mark_ready() {
                    log::debug!("Karte war bereits bereit");
                    return Ok(());
                }
                for (slot, controller) in self.controllers.iter_mut() {
                    if let Some(request) = controller.attach(&mut self.host) {
                        self.pending_loads.push(PendingIconLoad::new(*slot, request));
                    }
                }
            }
            LayerIntent::MarkerSpecChanged { slot, spec } => {
                let controller = self
                    .controllers
                    .get_mut(&slot)
                    .with_context(|| format!("Property-Update fuer unbekannten Marker {}", slot))?;
                if let Some(request) = controller.apply_spec(&mut self.host, spec) {
                    self.pending_loads.push(PendingIconLoad::new(slot, request));
                }
            }
            LayerIntent::IconLoaded { slot, ticket, size } => {
                self.complete_load(slot, ticket, Ok(size));
            }
            LayerIntent::IconLoadFailed {
                slot,
                ticket,
                reason,
            } => {
                let url = self
                    .controllers
                    .get(&slot)
                    .map(|c| c.spec().icon_path.clone())
                    .unwrap_or_default();
                self.complete_load(slot, ticket, Err(IconError::LoadFailed { url, reason }));
            }
            LayerIntent::MarkerClicked { slot, mut event } => {
                let controller = self
                    .controllers
                    .get_mut(&slot)
                    .with_context(|| format!("Klick auf unbekannten Marker {}", slot))?;
                if let Some(event) = controller.handle_click(&mut self.host, &mut event) {
                    self.events.push(event);
                }
            }
            LayerIntent::CalloutClicked {
                slot,
                mut dom_event,
            } => {
                let controller = self
                    .controllers
                    .get_mut(&slot)
                    .with_context(|| format!("Callout-Klick auf unbekannten Marker {}", slot))?;
                if let Some(event) = controller.handle_callout_click(dom_event.as_mut()) {
                    self.events.push(event);
                }
            }
            LayerIntent::MarkerRemoved { slot } => {
                let mut controller = self
                    .controllers
                    .shift_remove(&slot)
                    .with_context(|| format!("Entfernen von unbekanntem Marker {}", slot))?;
                controller.destroy(&mut self.host);
                self.pending_loads.retain(|load| load.slot != slot);
            }
        }
        Ok(())
    }

    /// Ladeergebnisse für entfernte Marker können verspätet eintreffen.
    fn complete_load(
        &mut self,
        slot: MarkerSlot,
        ticket: IconTicket,
        result: Result<ImageSize, IconError>,
    ) {
        let Some(controller) = self.controllers.get_mut(&slot) else {
            log::debug!("Icon-Ergebnis fuer entfernten Marker {} verworfen", slot);
            return;
        };
        let commit = controller.complete_icon_load(&mut self.host, ticket, result);
        log::debug!("Icon-Ergebnis {:?} fuer {}: {:?}", ticket, slot, commit);
    }

    /// Entnimmt alle ausstehenden Icon-Ladungen.
    pub fn take_pending_loads(&mut self) -> Vec<PendingIconLoad> {
        std::mem::take(&mut self.pending_loads)
    }

    pub fn pending_loads(&self) -> &[PendingIconLoad] {
        &self.pending_loads
    }

    /// Entnimmt alle ausgehenden Events.
    pub fn drain_events(&mut self) -> Vec<MarkerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Löst alle ausstehenden Icon-Ladungen über `loader` auf und meldet sie
    /// in der gewählten Reihenfolge zurück. Liefert die Anzahl der Ladungen.
    pub fn flush_icon_loads<L: IconLoader + ?Sized>(
        &mut self,
        loader: &L,
        order: LoadOrder,
    ) -> anyhow::Result<usize> {
        let mut loads = self.take_pending_loads();
        if order == LoadOrder::Reversed {
            loads.reverse();
        }
        let count = loads.len();
        for load in loads {
            let intent = match loader.load_dimensions(&load.url) {
                Ok(size) => LayerIntent::IconLoaded {
                    slot: load.slot,
                    ticket: load.ticket,
                    size,
                },
                Err(e) => LayerIntent::IconLoadFailed {
                    slot: load.slot,
                    ticket: load.ticket,
                    reason: format!("{:#}", e),
                },
            };
            self.handle_intent(intent)?;
        }
        Ok(count)
    }

    pub fn controller(&self, slot: MarkerSlot) -> Option<&MarkerController> {
        self.controllers.get(&slot)
    }

    pub fn controllers(&self) -> impl Iterator<Item = (MarkerSlot, &MarkerController)> {
        self.controllers.iter().map(|(slot, c)| (*slot, c))
    }

    pub fn host(&self) -> &MapHost<B> {
        &self.host
    }

    pub fn backend(&self) -> &B {
        self.host.backend()
    }
}
