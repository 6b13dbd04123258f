//! Event-Normalizer: Vendor-Klick-Payloads → anbieterneutrale Position.
//!
//! Die Payload-Form ist nicht selbstbeschreibend, daher wird hier (und nur hier)
//! nach Anbieter-Identität verzweigt.

use crate::core::{LatLng, Provider};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Koordinaten als Felder (`{lat, lng}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

/// Koordinaten über Accessor-Methoden (`latLng.lat()`).
pub trait LatLngAccessor: Debug {
    fn lat(&self) -> f64;
    fn lng(&self) -> f64;
}

/// Einfache Accessor-Implementierung für synthetisierte Events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessorLatLng {
    lat: f64,
    lng: f64,
}

impl AccessorLatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl LatLngAccessor for AccessorLatLng {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

/// Zugrunde liegendes DOM-/Engine-Event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomEvent {
    propagation_stopped: bool,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Mögliche Ablageorte des nativen Events (`event`, `domEvent`, `originEvent`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeEventSlots {
    pub event: Option<DomEvent>,
    pub dom_event: Option<DomEvent>,
    pub origin_event: Option<DomEvent>,
}

impl NativeEventSlots {
    /// Nur `event` belegt.
    pub fn event(event: DomEvent) -> Self {
        Self {
            event: Some(event),
            ..Self::default()
        }
    }

    /// Nur `domEvent` belegt.
    pub fn dom_event(event: DomEvent) -> Self {
        Self {
            dom_event: Some(event),
            ..Self::default()
        }
    }

    /// Nur `originEvent` belegt.
    pub fn origin_event(event: DomEvent) -> Self {
        Self {
            origin_event: Some(event),
            ..Self::default()
        }
    }

    /// Erstes belegtes Feld in der Reihenfolge `event`, `domEvent`, `originEvent`.
    pub fn resolve(&self) -> Option<&DomEvent> {
        self.event
            .as_ref()
            .or(self.dom_event.as_ref())
            .or(self.origin_event.as_ref())
    }

    pub fn resolve_mut(&mut self) -> Option<&mut DomEvent> {
        if self.event.is_some() {
            self.event.as_mut()
        } else if self.dom_event.is_some() {
            self.dom_event.as_mut()
        } else {
            self.origin_event.as_mut()
        }
    }
}

/// Klick-Event eines nativen Markers, je Anbieter unterschiedlich geformt.
#[derive(Debug)]
pub enum VendorClickEvent {
    /// Anbieter A: `e.lnglat.lat` / `e.lnglat.lng`
    AMap {
        lnglat: LatLngLiteral,
        native: NativeEventSlots,
    },
    /// Anbieter B: `e.latLng.lat` / `e.latLng.lng`
    Tencent {
        lat_lng: LatLngLiteral,
        native: NativeEventSlots,
    },
    /// Anbieter C: `e.latLng.lat()` / `e.latLng.lng()`
    Google {
        lat_lng: Box<dyn LatLngAccessor>,
        native: NativeEventSlots,
    },
}

impl VendorClickEvent {
    /// Erzeugt ein Event in der Form, die der Anbieter liefern würde.
    pub fn synthesize(provider: Provider, position: LatLng, native: NativeEventSlots) -> Self {
        let literal = LatLngLiteral {
            lat: position.latitude,
            lng: position.longitude,
        };
        match provider {
            Provider::AMap => VendorClickEvent::AMap {
                lnglat: literal,
                native,
            },
            Provider::Tencent => VendorClickEvent::Tencent {
                lat_lng: literal,
                native,
            },
            Provider::Google => VendorClickEvent::Google {
                lat_lng: Box::new(AccessorLatLng::new(position.latitude, position.longitude)),
                native,
            },
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            VendorClickEvent::AMap { .. } => Provider::AMap,
            VendorClickEvent::Tencent { .. } => Provider::Tencent,
            VendorClickEvent::Google { .. } => Provider::Google,
        }
    }

    fn slots(&self) -> &NativeEventSlots {
        match self {
            VendorClickEvent::AMap { native, .. }
            | VendorClickEvent::Tencent { native, .. }
            | VendorClickEvent::Google { native, .. } => native,
        }
    }

    fn slots_mut(&mut self) -> &mut NativeEventSlots {
        match self {
            VendorClickEvent::AMap { native, .. }
            | VendorClickEvent::Tencent { native, .. }
            | VendorClickEvent::Google { native, .. } => native,
        }
    }

    /// Zugrunde liegendes natives Event (falls vorhanden).
    pub fn native_event(&self) -> Option<&DomEvent> {
        self.slots().resolve()
    }

    pub fn native_event_mut(&mut self) -> Option<&mut DomEvent> {
        self.slots_mut().resolve_mut()
    }
}

/// Extrahiert die Klick-Position aus einem Vendor-Event.
pub fn extract_lat_lng(event: &VendorClickEvent) -> LatLng {
    match event {
        VendorClickEvent::AMap { lnglat, .. } => LatLng::new(lnglat.lat, lnglat.lng),
        VendorClickEvent::Tencent { lat_lng, .. } => LatLng::new(lat_lng.lat, lat_lng.lng),
        VendorClickEvent::Google { lat_lng, .. } => LatLng::new(lat_lng.lat(), lat_lng.lng()),
    }
}
