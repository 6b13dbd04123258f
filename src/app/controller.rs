//! Marker-Lifecycle-Controller: besitzt den nativen Marker eines logischen Markers.
//!
//! Zustände: `Unattached` → `Active` → `Destroyed`. Jede Änderung am
//! Property-Set löst eine vollständige Synchronisation aus; das Ergebnis wird
//! erst nach dem Laden des Icons übernommen, und nur, wenn das Ticket der
//! Ladeanfrage noch das neueste ist.

use super::events::MarkerEvent;
use super::host::MapHost;
use super::normalizer::{extract_lat_lng, DomEvent, VendorClickEvent};
use crate::backend::{MapBackend, MarkerInit, MarkerKey};
use crate::core::MarkerSpec;
use crate::render::{
    remove_callout, render_callout, render_label, resolve_icon, resolve_icon_url, toggle_callout,
    CalloutPlacement, CalloutState, IconError, IconRequest, IconTicket, ImageSize, LabelState,
    LabelTarget,
};
use crate::shared::CalloutOffsetPolicy;

/// Öffentlich sichtbarer Lifecycle-Zustand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Spec vorhanden, Karte noch nicht bereit
    Unattached,
    /// Nativer Marker existiert und wird synchron gehalten
    Active,
    /// Terminal: alle nativen Ressourcen freigegeben
    Destroyed,
}

/// Ergebnis einer gemeldeten Icon-Ladung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCommit {
    /// Vollständige Synchronisation übernommen
    Applied,
    /// Ticket wurde inzwischen von einer neueren Anfrage abgelöst
    Stale,
    /// Laden oder Auflösen fehlgeschlagen, nichts übernommen
    Failed,
    /// Marker ist nicht (mehr) aktiv
    Detached,
}

/// Nativer Marker samt Sub-Handles.
#[derive(Debug)]
struct NativeMarkerHandle {
    marker: MarkerKey,
    /// Schlüssel, unter dem der Marker in der Registry steht
    registry_id: String,
    label: LabelState,
    callout: Option<CalloutState>,
}

#[derive(Debug)]
enum Lifecycle {
    Unattached,
    Active(NativeMarkerHandle),
    Destroyed,
}

/// Synchronisiert einen logischen Marker mit seinem nativen Gegenstück.
#[derive(Debug)]
pub struct MarkerController {
    spec: MarkerSpec,
    lifecycle: Lifecycle,
    latest_ticket: IconTicket,
    committed_ticket: Option<IconTicket>,
}

impl MarkerController {
    /// Erstellt einen Controller im Zustand `Unattached`.
    pub fn new(spec: MarkerSpec) -> Self {
        Self {
            spec,
            lifecycle: Lifecycle::Unattached,
            latest_ticket: IconTicket(0),
            committed_ticket: None,
        }
    }

    pub fn state(&self) -> MarkerState {
        match self.lifecycle {
            Lifecycle::Unattached => MarkerState::Unattached,
            Lifecycle::Active(_) => MarkerState::Active,
            Lifecycle::Destroyed => MarkerState::Destroyed,
        }
    }

    pub fn spec(&self) -> &MarkerSpec {
        &self.spec
    }

    /// Schlüssel des nativen Markers (nur im Zustand `Active`).
    pub fn native_marker(&self) -> Option<MarkerKey> {
        match &self.lifecycle {
            Lifecycle::Active(handle) => Some(handle.marker),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&LabelState> {
        match &self.lifecycle {
            Lifecycle::Active(handle) => Some(&handle.label),
            _ => None,
        }
    }

    pub fn callout(&self) -> Option<&CalloutState> {
        match &self.lifecycle {
            Lifecycle::Active(handle) => handle.callout.as_ref(),
            _ => None,
        }
    }

    /// Ticket der zuletzt ausgelösten Synchronisation.
    pub fn latest_ticket(&self) -> IconTicket {
        self.latest_ticket
    }

    /// Ticket der zuletzt übernommenen Synchronisation.
    pub fn committed_ticket(&self) -> Option<IconTicket> {
        self.committed_ticket
    }

    /// Übergang `Unattached` → `Active`: nativen Marker anlegen, registrieren, synchronisieren.
    ///
    /// Wirkungslos, solange die Karte nicht bereit ist oder der Marker bereits
    /// eingehängt bzw. zerstört wurde.
    pub fn attach<B: MapBackend>(&mut self, host: &mut MapHost<B>) -> Option<IconRequest> {
        match self.lifecycle {
            Lifecycle::Unattached => {}
            Lifecycle::Active(_) => {
                log::debug!("Marker '{}' ist bereits aktiv", self.spec.id_string());
                return None;
            }
            Lifecycle::Destroyed => {
                log::warn!("Zerstoerter Marker kann nicht eingehaengt werden");
                return None;
            }
        }
        if !host.is_ready() {
            log::debug!("Karte noch nicht bereit, Marker bleibt ausgehaengt");
            return None;
        }

        let marker = host.backend.create_marker(MarkerInit::default());
        let registry_id = self.spec.id_string();
        host.registry.register(&registry_id, marker);
        log::info!("Marker '{}' eingehaengt als {}", registry_id, marker);

        self.lifecycle = Lifecycle::Active(NativeMarkerHandle {
            marker,
            registry_id,
            label: LabelState::new(),
            callout: None,
        });
        self.synchronize(host)
    }

    /// Übernimmt ein neues vollständiges Property-Set.
    ///
    /// Im Zustand `Active` folgt eine vollständige Synchronisation, sonst wird
    /// das Set nur gespeichert.
    pub fn apply_spec<B: MapBackend>(
        &mut self,
        host: &mut MapHost<B>,
        spec: MarkerSpec,
    ) -> Option<IconRequest> {
        if matches!(self.lifecycle, Lifecycle::Destroyed) {
            log::warn!("Property-Update fuer zerstoerten Marker ignoriert");
            return None;
        }
        self.spec = spec;
        self.synchronize(host)
    }

    /// Startet eine Synchronisation: neues Ticket, Icon-Ladeanfrage.
    fn synchronize<B: MapBackend>(&mut self, host: &mut MapHost<B>) -> Option<IconRequest> {
        let Lifecycle::Active(handle) = &mut self.lifecycle else {
            return None;
        };

        let id = self.spec.id_string();
        if id != handle.registry_id {
            host.registry.deregister(&handle.registry_id, handle.marker);
            host.registry.register(&id, handle.marker);
            log::debug!(
                "Marker {} von '{}' nach '{}' umregistriert",
                handle.marker,
                handle.registry_id,
                id
            );
            handle.registry_id = id;
        }

        self.latest_ticket = IconTicket(self.latest_ticket.0 + 1);

        if self.spec.icon_path.trim().is_empty() {
            log::error!("Marker '{}': {}", handle.registry_id, IconError::EmptyPath);
            return None;
        }

        Some(IconRequest {
            ticket: self.latest_ticket,
            url: resolve_icon_url(&self.spec.icon_path, &host.options.asset_root),
        })
    }

    /// Meldet das Ergebnis einer Icon-Ladung.
    ///
    /// Nur das neueste Ticket wird übernommen; ältere Ergebnisse werden
    /// stillschweigend verworfen.
    pub fn complete_icon_load<B: MapBackend>(
        &mut self,
        host: &mut MapHost<B>,
        ticket: IconTicket,
        result: Result<ImageSize, IconError>,
    ) -> IconCommit {
        if !matches!(self.lifecycle, Lifecycle::Active(_)) {
            log::debug!("Icon-Ergebnis {:?} fuer inaktiven Marker verworfen", ticket);
            return IconCommit::Detached;
        }
        if ticket != self.latest_ticket {
            log::debug!(
                "Veraltetes Icon-Ergebnis {:?} verworfen (aktuell {:?})",
                ticket,
                self.latest_ticket
            );
            return IconCommit::Stale;
        }
        match result {
            Ok(size) => self.commit(host, ticket, size),
            Err(e) => {
                log::warn!("Marker '{}': {}", self.spec.id_string(), e);
                IconCommit::Failed
            }
        }
    }

    /// Überträgt Position, Icon, Rotation, Label und Callout in einem Schritt.
    fn commit<B: MapBackend>(
        &mut self,
        host: &mut MapHost<B>,
        ticket: IconTicket,
        size: ImageSize,
    ) -> IconCommit {
        let Lifecycle::Active(handle) = &mut self.lifecycle else {
            return IconCommit::Detached;
        };
        let spec = &self.spec;
        let options = &host.options;
        let backend = &mut host.backend;
        let caps = backend.capabilities();

        let anchor = spec.anchor_or(options.default_anchor);
        let icon = match resolve_icon(size, spec.explicit_width(), spec.explicit_height(), anchor) {
            Ok(icon) => icon,
            Err(e) => {
                log::warn!("Marker '{}': {}", handle.registry_id, e);
                return IconCommit::Failed;
            }
        };
        let url = resolve_icon_url(&spec.icon_path, &options.asset_root);
        let position = spec.position().to_native(caps.coord_order);

        backend.set_position(handle.marker, position);
        backend.set_icon(handle.marker, &icon.descriptor(&url, caps.icon_model));
        if caps.rotation {
            backend.set_rotation(handle.marker, spec.rotation());
        }

        let id_string = spec.id_string();
        render_label(
            backend,
            &mut handle.label,
            LabelTarget {
                marker: handle.marker,
                id_string: &id_string,
                position,
            },
            spec.label.as_ref(),
            options,
        );

        let offset_height = match options.callout_offset {
            CalloutOffsetPolicy::ResolvedHeight => icon.size.y,
            CalloutOffsetPolicy::ExplicitHeight => spec.explicit_height().unwrap_or(0.0),
        };
        render_callout(
            backend,
            &mut handle.callout,
            spec.callout.as_ref(),
            &spec.title,
            CalloutPlacement {
                position,
                top: icon.top,
                offset_y: -offset_height / 2.0,
            },
            options,
        );

        self.committed_ticket = Some(ticket);
        IconCommit::Applied
    }

    /// Klick auf den nativen Marker.
    ///
    /// Schaltet das Callout um, liefert für adressierbare Marker ein
    /// `markertap`-Event und stoppt die Propagation des nativen Events.
    pub fn handle_click<B: MapBackend>(
        &mut self,
        host: &mut MapHost<B>,
        event: &mut VendorClickEvent,
    ) -> Option<MarkerEvent> {
        let Lifecycle::Active(handle) = &mut self.lifecycle else {
            log::debug!("Klick auf inaktiven Marker ignoriert");
            return None;
        };

        if let Some(callout) = handle.callout.as_mut() {
            toggle_callout(&mut host.backend, callout);
        }

        if event.provider() != host.backend.provider() {
            log::warn!(
                "Klick-Event von {:?} auf Karte von {:?}",
                event.provider(),
                host.backend.provider()
            );
        }
        let tap = self
            .spec
            .marker_id()
            .map(|id| MarkerEvent::marker_tap(id, extract_lat_lng(event)));

        match event.native_event_mut() {
            Some(native) => native.stop_propagation(),
            None => log::debug!("Klick-Event ohne natives Event, Propagation nicht gestoppt"),
        }
        tap
    }

    /// Klick auf das Callout. Liefert für adressierbare Marker ein `callouttap`-Event.
    pub fn handle_callout_click(&mut self, dom_event: Option<&mut DomEvent>) -> Option<MarkerEvent> {
        if self.callout().is_none() {
            log::debug!("Callout-Klick ohne Callout ignoriert");
            return None;
        }
        if let Some(dom) = dom_event {
            dom.stop_propagation();
            dom.prevent_default();
        }
        self.spec
            .marker_id()
            .map(|marker_id| MarkerEvent::CalloutTap { marker_id })
    }

    /// Übergang nach `Destroyed`: Label, Callout, Stylesheet und Marker freigeben, deregistrieren.
    ///
    /// Auf einem nie eingehängten Marker werden keine nativen Aufrufe ausgeführt.
    pub fn destroy<B: MapBackend>(&mut self, host: &mut MapHost<B>) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed) {
            Lifecycle::Unattached => {
                log::debug!("Nie eingehaengter Marker '{}' verworfen", self.spec.id_string());
            }
            Lifecycle::Destroyed => {}
            Lifecycle::Active(mut handle) => {
                handle.label.release(&mut host.backend);
                remove_callout(&mut host.backend, &mut handle.callout);
                host.backend.remove_marker(handle.marker);
                host.registry.deregister(&handle.registry_id, handle.marker);
                log::info!("Marker '{}' ({}) entfernt", handle.registry_id, handle.marker);
            }
        }
    }
}
