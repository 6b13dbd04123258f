//! Label-Renderer: normalisierter Label-Stil und Ausgabe über das verfügbare Label-Modell.

use crate::backend::{LabelKey, MapBackend, MarkerKey, StylesheetKey};
use crate::core::{LabelModel, LabelSpec, NativePosition};
use crate::shared::SyncOptions;
use serde::Serialize;

/// Normalisierter Label-Stil (Pixelwerte bereits aufgelöst).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub border_color: Option<String>,
    pub border_width: f64,
    pub border_radius: f64,
    pub padding: f64,
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub font_size: f64,
    pub line_height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
}

impl LabelStyle {
    /// Berechnet den Stil aus der deklarativen Beschreibung.
    ///
    /// `anchorX`/`anchorY` haben Vorrang vor `x`/`y`; ein Wert von 0 gilt als nicht gesetzt.
    pub fn from_spec(spec: &LabelSpec, options: &SyncOptions) -> Self {
        let font_size = spec
            .font_size
            .filter(|s| *s != 0.0)
            .unwrap_or(options.label_font_size);
        Self {
            border_color: non_empty(&spec.border_color),
            border_width: spec.border_width.unwrap_or(0.0),
            border_radius: spec.border_radius.unwrap_or(0.0),
            padding: spec.padding.unwrap_or(0.0),
            background_color: non_empty(&spec.bg_color),
            color: non_empty(&spec.color),
            font_size,
            line_height: font_size,
            margin_left: first_non_zero(spec.anchor_x, spec.x),
            margin_top: first_non_zero(spec.anchor_y, spec.y),
        }
    }

    /// CSS-Deklarationen in fester Reihenfolge; leere Werte entfallen.
    fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = Vec::with_capacity(10);
        if let Some(c) = &self.border_color {
            decls.push(("border-color", c.clone()));
        }
        decls.push(("border-width", px(self.border_width)));
        decls.push(("padding", px(self.padding)));
        decls.push(("border-radius", px(self.border_radius)));
        if let Some(c) = &self.background_color {
            decls.push(("background-color", c.clone()));
        }
        if let Some(c) = &self.color {
            decls.push(("color", c.clone()));
        }
        decls.push(("font-size", px(self.font_size)));
        decls.push(("line-height", px(self.line_height)));
        decls.push(("margin-left", px(self.margin_left)));
        decls.push(("margin-top", px(self.margin_top)));
        decls
    }

    /// Inline-Style-Attribut (`key:value;...`).
    pub fn inline_css(&self) -> String {
        join_declarations(&self.declarations())
    }

    /// Regeltext der Label-Klasse inkl. Positionierung.
    pub fn class_rule(&self, class_name: &str, top_px: f64) -> String {
        let mut decls = self.declarations();
        decls.push(("position", "absolute".to_string()));
        decls.push(("top", px(top_px)));
        decls.push(("border-style", "solid".to_string()));
        format!(".{}{{{}}}", class_name, join_declarations(&decls))
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn first_non_zero(primary: Option<f64>, secondary: Option<f64>) -> f64 {
    primary
        .filter(|v| *v != 0.0)
        .or(secondary)
        .unwrap_or(0.0)
}

fn join_declarations(decls: &[(&'static str, String)]) -> String {
    decls
        .iter()
        .map(|(k, v)| format!("{}:{};", k, v))
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Eigenständiges natives Label-Objekt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeLabel {
    pub position: NativePosition,
    pub content: String,
    pub clickable: bool,
    pub style: LabelStyle,
}

/// Marker-eigenes Label (`setLabel`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerLabel {
    /// Rohes Markup mit Richtungshinweis
    Markup { content: String, direction: String },
    /// Text mit Verweis auf eine injizierte CSS-Klasse
    Styled {
        text: String,
        color: Option<String>,
        font_size: String,
        class_name: String,
    },
}

/// Pro-Marker-Stylesheet für das Klassen-Label-Modell.
///
/// Wird beim ersten Schreiben angelegt, danach nur noch überschrieben und
/// genau einmal beim Zerstören des Markers freigegeben. Ändert sich die
/// Element-ID (neue Marker-ID), wird das alte Element ersetzt.
#[derive(Debug, Default)]
pub struct LabelStylesheet {
    sheet: Option<(StylesheetKey, String)>,
}

impl LabelStylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true`, sobald das Stylesheet-Element existiert.
    pub fn is_acquired(&self) -> bool {
        self.sheet.is_some()
    }

    /// Element-ID des angelegten Stylesheets.
    pub fn element_id(&self) -> Option<&str> {
        self.sheet.as_ref().map(|(_, id)| id.as_str())
    }

    /// Schreibt den Regeltext, legt das Element bei Bedarf an.
    pub fn write<B: MapBackend>(&mut self, backend: &mut B, element_id: &str, css: &str) {
        if self.element_id().is_some_and(|id| id != element_id) {
            self.release(backend);
        }
        let sheet = match self.sheet.as_ref().map(|(sheet, _)| *sheet) {
            Some(sheet) => sheet,
            None => {
                let sheet = backend.create_stylesheet(element_id);
                log::debug!("Stylesheet '{}' angelegt ({})", element_id, sheet);
                self.sheet = Some((sheet, element_id.to_string()));
                sheet
            }
        };
        backend.write_stylesheet(sheet, css);
    }

    /// Leert die Regel, das Element bleibt bestehen.
    pub fn clear<B: MapBackend>(&mut self, backend: &mut B) {
        if let Some((sheet, _)) = &self.sheet {
            backend.write_stylesheet(*sheet, "");
        }
    }

    /// Entfernt das Element. Weitere Aufrufe sind wirkungslos.
    pub fn release<B: MapBackend>(&mut self, backend: &mut B) {
        if let Some((sheet, element_id)) = self.sheet.take() {
            backend.remove_stylesheet(sheet);
            log::debug!("Stylesheet '{}' ({}) entfernt", element_id, sheet);
        }
    }
}

/// Label-Zustand eines nativen Markers.
#[derive(Debug, Default)]
pub struct LabelState {
    native: Option<LabelKey>,
    marker_label: bool,
    stylesheet: LabelStylesheet,
}

impl LabelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schlüssel des angehängten nativen Labels.
    pub fn native_label(&self) -> Option<LabelKey> {
        self.native
    }

    /// `true`, wenn aktuell ein Marker-eigenes Label gesetzt ist.
    pub fn has_marker_label(&self) -> bool {
        self.marker_label
    }

    pub fn stylesheet(&self) -> &LabelStylesheet {
        &self.stylesheet
    }

    /// Hängt das native Label ab (falls vorhanden).
    pub fn detach<B: MapBackend>(&mut self, backend: &mut B) {
        if let Some(label) = self.native.take() {
            backend.detach_label(label);
        }
    }

    /// Gibt alle Label-Ressourcen frei (Marker wird zerstört).
    pub fn release<B: MapBackend>(&mut self, backend: &mut B) {
        self.detach(backend);
        self.marker_label = false;
        self.stylesheet.release(backend);
    }
}

/// Identität des Markers für das Klassen-Label-Modell.
#[derive(Debug, Clone, Copy)]
pub struct LabelTarget<'a> {
    pub marker: MarkerKey,
    /// ID-String des Markers; leer bei nicht adressierbaren Markern
    pub id_string: &'a str,
    pub position: NativePosition,
}

impl LabelTarget<'_> {
    fn class_name(&self, prefix: &str) -> String {
        if self.id_string.is_empty() {
            format!("{}anon-{}", prefix, self.marker.0)
        } else {
            format!("{}{}", prefix, self.id_string)
        }
    }
}

/// Rendert das Label eines Markers über das verfügbare Label-Modell.
///
/// Ein vorhandenes natives Label wird immer zuerst abgehängt; ohne Inhalt
/// wird zusätzlich das Marker-Label entfernt und die Klassen-Regel geleert.
pub fn render_label<B: MapBackend>(
    backend: &mut B,
    state: &mut LabelState,
    target: LabelTarget<'_>,
    spec: Option<&LabelSpec>,
    options: &SyncOptions,
) {
    state.detach(backend);

    let Some((spec, content)) = spec.and_then(|s| s.effective_content().map(|c| (s, c))) else {
        if state.marker_label {
            backend.set_marker_label(target.marker, None);
            state.marker_label = false;
        }
        state.stylesheet.clear(backend);
        return;
    };

    let style = LabelStyle::from_spec(spec, options);

    match backend.capabilities().label_model {
        LabelModel::NativeLabel => {
            let label = NativeLabel {
                position: target.position,
                content: content.to_string(),
                clickable: false,
                style,
            };
            state.native = Some(backend.create_label(&label));
        }
        LabelModel::MarkupLabel => {
            let markup = format!(
                r#"<div style="{}">{}</div>"#,
                style.inline_css(),
                escape_html(content)
            );
            let label = MarkerLabel::Markup {
                content: markup,
                direction: options.label_markup_direction.clone(),
            };
            backend.set_marker_label(target.marker, Some(&label));
            state.marker_label = true;
        }
        LabelModel::StyledClass => {
            let class_name = target.class_name(&options.label_class_prefix);
            let rule = style.class_rule(&class_name, options.label_class_top_px);
            state.stylesheet.write(backend, &class_name, &rule);
            let label = MarkerLabel::Styled {
                text: content.to_string(),
                color: style.color.clone(),
                font_size: px(style.font_size),
                class_name,
            };
            backend.set_marker_label(target.marker, Some(&label));
            state.marker_label = true;
        }
    }
}
