//! Callout-Renderer: Sprechblase über dem Marker, in-place aktualisiert und per Klick umschaltbar.

use crate::backend::{CalloutKey, MapBackend};
use crate::core::{CalloutDisplay, CalloutModel, CalloutSpec, NativePosition};
use crate::shared::SyncOptions;
use serde::Serialize;

/// Platzierung des Callouts relativ zum Icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutPlacement {
    pub position: NativePosition,
    /// Abstand Anchor → Icon-Oberkante
    pub top: f64,
    /// Vertikaler Versatz nach oben (negativ)
    pub offset_y: f64,
}

/// Optionen eines nativen Callouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalloutOptions {
    pub position: NativePosition,
    pub top: f64,
    pub offset_y: f64,
    pub content: String,
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub border_radius: Option<f64>,
    pub bg_color: Option<String>,
    pub padding: Option<f64>,
    pub box_shadow: String,
    pub display: CalloutDisplay,
}

impl CalloutOptions {
    /// Leitet die Callout-Optionen ab. `None` bedeutet "kein Callout".
    ///
    /// Eigener Inhalt übernimmt alle Stilfelder; der Titel-Fallback trägt nur
    /// Inhalt und Standard-Schatten.
    pub fn derive(
        spec: Option<&CalloutSpec>,
        title: &str,
        placement: CalloutPlacement,
        options: &SyncOptions,
    ) -> Option<Self> {
        let base = |content: &str| Self {
            position: placement.position,
            top: placement.top,
            offset_y: placement.offset_y,
            content: content.to_string(),
            color: None,
            font_size: None,
            border_radius: None,
            bg_color: None,
            padding: None,
            box_shadow: options.callout_box_shadow.clone(),
            display: CalloutDisplay::ByClick,
        };

        if let Some((spec, content)) = spec.and_then(|s| s.effective_content().map(|c| (s, c))) {
            return Some(Self {
                color: spec.color.clone(),
                font_size: spec.font_size,
                border_radius: spec.border_radius,
                bg_color: spec.bg_color.clone(),
                padding: spec.padding,
                box_shadow: spec
                    .box_shadow
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| options.callout_box_shadow.clone()),
                display: spec.display,
                ..base(content)
            });
        }

        (!title.is_empty()).then(|| base(title))
    }

    pub fn always_visible(&self) -> bool {
        self.display == CalloutDisplay::Always
    }
}

/// Zustand eines existierenden Callouts.
#[derive(Debug)]
pub struct CalloutState {
    key: CalloutKey,
    visible: bool,
    options: CalloutOptions,
}

impl CalloutState {
    pub fn key(&self) -> CalloutKey {
        self.key
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn always_visible(&self) -> bool {
        self.options.always_visible()
    }

    pub fn content(&self) -> &str {
        &self.options.content
    }

    pub fn options(&self) -> &CalloutOptions {
        &self.options
    }
}

fn show<B: MapBackend>(backend: &mut B, callout: CalloutKey) {
    match backend.capabilities().callout_model {
        CalloutModel::TextOverlay => backend.mount_callout_text(callout),
        CalloutModel::DomOverlay => {
            backend.set_callout_visible(callout, true);
            backend.raise_callout(callout);
        }
    }
}

fn hide<B: MapBackend>(backend: &mut B, callout: CalloutKey) {
    match backend.capabilities().callout_model {
        CalloutModel::TextOverlay => backend.unmount_callout_text(callout),
        CalloutModel::DomOverlay => backend.set_callout_visible(callout, false),
    }
}

/// Rendert das Callout: anlegen, in-place aktualisieren oder entfernen.
pub fn render_callout<B: MapBackend>(
    backend: &mut B,
    slot: &mut Option<CalloutState>,
    spec: Option<&CalloutSpec>,
    title: &str,
    placement: CalloutPlacement,
    options: &SyncOptions,
) {
    let Some(callout_options) = CalloutOptions::derive(spec, title, placement, options) else {
        remove_callout(backend, slot);
        return;
    };

    match slot {
        Some(state) => {
            backend.update_callout(state.key, &callout_options);
            let becomes_always = callout_options.always_visible() && !state.visible;
            state.options = callout_options;
            if becomes_always {
                show(backend, state.key);
                state.visible = true;
            }
        }
        None => {
            let visible = callout_options.always_visible();
            let key = backend.create_callout(&callout_options, visible);
            log::debug!("Callout {} angelegt (sichtbar: {})", key, visible);
            *slot = Some(CalloutState {
                key,
                visible,
                options: callout_options,
            });
        }
    }
}

/// Schaltet die Sichtbarkeit um. Liefert die neue Sichtbarkeit oder `None`,
/// wenn das Callout immer sichtbar ist.
pub fn toggle_callout<B: MapBackend>(backend: &mut B, state: &mut CalloutState) -> Option<bool> {
    if state.always_visible() {
        return None;
    }
    state.visible = !state.visible;
    if state.visible {
        show(backend, state.key);
    } else {
        hide(backend, state.key);
    }
    Some(state.visible)
}

/// Entfernt das Callout vollständig (nicht nur ausgeblendet).
pub fn remove_callout<B: MapBackend>(backend: &mut B, slot: &mut Option<CalloutState>) {
    if let Some(state) = slot.take() {
        backend.remove_callout(state.key);
        log::debug!("Callout {} entfernt", state.key);
    }
}
