//! Headless Vendor-Backend: zeichnet alle nativen Aufrufe auf und hält den resultierenden Zustand.
//!
//! Wird von Tests, Benchmarks und der Demo-Binary verwendet.

use super::{CalloutKey, LabelKey, MapBackend, MarkerInit, MarkerKey, StylesheetKey};
use crate::core::{NativePosition, Provider, ProviderCapabilities};
use crate::render::{CalloutOptions, IconDescriptor, MarkerLabel, NativeLabel};
use indexmap::IndexMap;
use serde::Serialize;

/// Ein aufgezeichneter nativer Aufruf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum NativeCall {
    CreateMarker { marker: MarkerKey, init: MarkerInit },
    RemoveMarker { marker: MarkerKey },
    SetPosition { marker: MarkerKey, position: NativePosition },
    SetIcon { marker: MarkerKey, icon: IconDescriptor },
    SetRotation { marker: MarkerKey, degrees: f64 },
    CreateLabel { label: LabelKey, content: String },
    DetachLabel { label: LabelKey },
    SetMarkerLabel { marker: MarkerKey, label: Option<MarkerLabel> },
    CreateStylesheet { sheet: StylesheetKey, element_id: String },
    WriteStylesheet { sheet: StylesheetKey, css: String },
    RemoveStylesheet { sheet: StylesheetKey },
    CreateCallout { callout: CalloutKey, visible: bool },
    UpdateCallout { callout: CalloutKey },
    SetCalloutVisible { callout: CalloutKey, visible: bool },
    RaiseCallout { callout: CalloutKey },
    MountCalloutText { callout: CalloutKey },
    UnmountCalloutText { callout: CalloutKey },
    RemoveCallout { callout: CalloutKey },
}

/// Vollständige, unbegrenzte Aufruf-Historie eines Backends.
///
/// Hält jeden Aufruf über die gesamte Lebensdauer des Backends.
#[derive(Debug, Default)]
pub struct CallLog {
    entries: Vec<NativeCall>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: NativeCall) {
        log::trace!("Nativer Aufruf: {:?}", call);
        self.entries.push(call);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle Aufrufe in Ausführungsreihenfolge.
    pub fn entries(&self) -> &[NativeCall] {
        &self.entries
    }

    /// Anzahl der Aufrufe, auf die `pred` zutrifft.
    pub fn count_where(&self, pred: impl Fn(&NativeCall) -> bool) -> usize {
        self.entries.iter().filter(|call| pred(call)).count()
    }
}

/// Zustand eines nativen Markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedMarker {
    pub init: MarkerInit,
    pub position: Option<NativePosition>,
    pub icon: Option<IconDescriptor>,
    pub rotation: Option<f64>,
    pub label: Option<MarkerLabel>,
}

/// Zustand eines nativen Callouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedCallout {
    pub options: CalloutOptions,
    /// Aktuell sichtbar (DOM-Flag bzw. Textobjekt eingehängt)
    pub shown: bool,
    /// Position in der Paint-Reihenfolge (größer = weiter oben)
    pub z_order: u64,
}

/// Zustand eines injizierten Stylesheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedStylesheet {
    pub element_id: String,
    pub css: String,
}

/// Vollständiger nativer Zustand, z.B. für JSON-Ausgabe.
#[derive(Debug, Serialize)]
pub struct NativeSnapshot<'a> {
    pub provider: Provider,
    pub markers: Vec<(&'a MarkerKey, &'a RecordedMarker)>,
    pub labels: Vec<(&'a LabelKey, &'a NativeLabel)>,
    pub callouts: Vec<(&'a CalloutKey, &'a RecordedCallout)>,
    pub stylesheets: Vec<(&'a StylesheetKey, &'a RecordedStylesheet)>,
}

/// Aufzeichnendes Backend für einen Anbieter.
pub struct RecordingBackend {
    provider: Provider,
    capabilities: ProviderCapabilities,
    next_key: u64,
    next_z: u64,
    markers: IndexMap<MarkerKey, RecordedMarker>,
    labels: IndexMap<LabelKey, NativeLabel>,
    callouts: IndexMap<CalloutKey, RecordedCallout>,
    stylesheets: IndexMap<StylesheetKey, RecordedStylesheet>,
    log: CallLog,
}

impl RecordingBackend {
    /// Backend mit den Standard-Capabilities des Anbieters.
    pub fn new(provider: Provider) -> Self {
        Self::with_capabilities(provider, provider.capabilities())
    }

    /// Backend mit abweichenden Capabilities (z.B. SDK-Build ohne Icon-Modell).
    pub fn with_capabilities(provider: Provider, capabilities: ProviderCapabilities) -> Self {
        Self {
            provider,
            capabilities,
            next_key: 1,
            next_z: 1,
            markers: IndexMap::new(),
            labels: IndexMap::new(),
            callouts: IndexMap::new(),
            stylesheets: IndexMap::new(),
            log: CallLog::new(),
        }
    }

    fn allocate(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn raise(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    pub fn call_log(&self) -> &CallLog {
        &self.log
    }

    pub fn marker(&self, key: MarkerKey) -> Option<&RecordedMarker> {
        self.markers.get(&key)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&MarkerKey, &RecordedMarker)> {
        self.markers.iter()
    }

    pub fn label(&self, key: LabelKey) -> Option<&NativeLabel> {
        self.labels.get(&key)
    }

    pub fn labels(&self) -> impl Iterator<Item = &NativeLabel> {
        self.labels.values()
    }

    pub fn callout(&self, key: CalloutKey) -> Option<&RecordedCallout> {
        self.callouts.get(&key)
    }

    pub fn callouts(&self) -> impl Iterator<Item = &RecordedCallout> {
        self.callouts.values()
    }

    pub fn stylesheets(&self) -> impl Iterator<Item = &RecordedStylesheet> {
        self.stylesheets.values()
    }

    /// Momentaufnahme des gesamten nativen Zustands.
    pub fn snapshot(&self) -> NativeSnapshot<'_> {
        NativeSnapshot {
            provider: self.provider,
            markers: self.markers.iter().collect(),
            labels: self.labels.iter().collect(),
            callouts: self.callouts.iter().collect(),
            stylesheets: self.stylesheets.iter().collect(),
        }
    }

    fn marker_mut(&mut self, key: MarkerKey) -> Option<&mut RecordedMarker> {
        let marker = self.markers.get_mut(&key);
        if marker.is_none() {
            log::warn!("Aufruf auf unbekanntem Marker {}", key);
        }
        marker
    }
}

impl MapBackend for RecordingBackend {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.capabilities
    }

    fn create_marker(&mut self, init: MarkerInit) -> MarkerKey {
        let marker = MarkerKey(self.allocate());
        self.markers.insert(
            marker,
            RecordedMarker {
                init,
                position: None,
                icon: None,
                rotation: None,
                label: None,
            },
        );
        self.log.record(NativeCall::CreateMarker { marker, init });
        marker
    }

    fn remove_marker(&mut self, marker: MarkerKey) {
        self.markers.shift_remove(&marker);
        self.log.record(NativeCall::RemoveMarker { marker });
    }

    fn set_position(&mut self, marker: MarkerKey, position: NativePosition) {
        if let Some(m) = self.marker_mut(marker) {
            m.position = Some(position);
        }
        self.log.record(NativeCall::SetPosition { marker, position });
    }

    fn set_icon(&mut self, marker: MarkerKey, icon: &IconDescriptor) {
        if let Some(m) = self.marker_mut(marker) {
            m.icon = Some(icon.clone());
        }
        self.log.record(NativeCall::SetIcon {
            marker,
            icon: icon.clone(),
        });
    }

    fn set_rotation(&mut self, marker: MarkerKey, degrees: f64) {
        if let Some(m) = self.marker_mut(marker) {
            m.rotation = Some(degrees);
        }
        self.log.record(NativeCall::SetRotation { marker, degrees });
    }

    fn create_label(&mut self, label: &NativeLabel) -> LabelKey {
        let key = LabelKey(self.allocate());
        self.labels.insert(key, label.clone());
        self.log.record(NativeCall::CreateLabel {
            label: key,
            content: label.content.clone(),
        });
        key
    }

    fn detach_label(&mut self, label: LabelKey) {
        self.labels.shift_remove(&label);
        self.log.record(NativeCall::DetachLabel { label });
    }

    fn set_marker_label(&mut self, marker: MarkerKey, label: Option<&MarkerLabel>) {
        if let Some(m) = self.marker_mut(marker) {
            m.label = label.cloned();
        }
        self.log.record(NativeCall::SetMarkerLabel {
            marker,
            label: label.cloned(),
        });
    }

    fn create_stylesheet(&mut self, element_id: &str) -> StylesheetKey {
        let sheet = StylesheetKey(self.allocate());
        self.stylesheets.insert(
            sheet,
            RecordedStylesheet {
                element_id: element_id.to_string(),
                css: String::new(),
            },
        );
        self.log.record(NativeCall::CreateStylesheet {
            sheet,
            element_id: element_id.to_string(),
        });
        sheet
    }

    fn write_stylesheet(&mut self, sheet: StylesheetKey, css: &str) {
        if let Some(s) = self.stylesheets.get_mut(&sheet) {
            s.css = css.to_string();
        }
        self.log.record(NativeCall::WriteStylesheet {
            sheet,
            css: css.to_string(),
        });
    }

    fn remove_stylesheet(&mut self, sheet: StylesheetKey) {
        self.stylesheets.shift_remove(&sheet);
        self.log.record(NativeCall::RemoveStylesheet { sheet });
    }

    fn create_callout(&mut self, options: &CalloutOptions, visible: bool) -> CalloutKey {
        let callout = CalloutKey(self.allocate());
        let z_order = self.raise();
        self.callouts.insert(
            callout,
            RecordedCallout {
                options: options.clone(),
                shown: visible,
                z_order,
            },
        );
        self.log.record(NativeCall::CreateCallout { callout, visible });
        callout
    }

    fn update_callout(&mut self, callout: CalloutKey, options: &CalloutOptions) {
        if let Some(c) = self.callouts.get_mut(&callout) {
            c.options = options.clone();
        }
        self.log.record(NativeCall::UpdateCallout { callout });
    }

    fn set_callout_visible(&mut self, callout: CalloutKey, visible: bool) {
        if let Some(c) = self.callouts.get_mut(&callout) {
            c.shown = visible;
        }
        self.log
            .record(NativeCall::SetCalloutVisible { callout, visible });
    }

    fn raise_callout(&mut self, callout: CalloutKey) {
        let z = self.raise();
        if let Some(c) = self.callouts.get_mut(&callout) {
            c.z_order = z;
        }
        self.log.record(NativeCall::RaiseCallout { callout });
    }

    fn mount_callout_text(&mut self, callout: CalloutKey) {
        if let Some(c) = self.callouts.get_mut(&callout) {
            c.shown = true;
        }
        self.log.record(NativeCall::MountCalloutText { callout });
    }

    fn unmount_callout_text(&mut self, callout: CalloutKey) {
        if let Some(c) = self.callouts.get_mut(&callout) {
            c.shown = false;
        }
        self.log.record(NativeCall::UnmountCalloutText { callout });
    }

    fn remove_callout(&mut self, callout: CalloutKey) {
        self.callouts.shift_remove(&callout);
        self.log.record(NativeCall::RemoveCallout { callout });
    }
}
