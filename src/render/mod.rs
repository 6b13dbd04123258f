//! Übersetzung der deklarativen Marker-Beschreibung in Vendor-Aufrufe.
//!
//! Icon, Label und Callout werden getrennt aufgelöst; die Auswahl des
//! Aufrufpfads erfolgt ausschließlich über die Provider-Capabilities.

pub mod callout;
pub mod icon;
pub mod icon_source;
pub mod label;

pub use callout::{
    remove_callout, render_callout, toggle_callout, CalloutOptions, CalloutPlacement,
    CalloutState,
};
pub use icon::{
    resolve_icon, IconDescriptor, IconError, IconRequest, IconTicket, ImageSize, ResolvedIcon,
};
pub use icon_source::{resolve_icon_url, FileIconLoader, FixedIconLoader, IconLoader};
pub use label::{
    render_label, LabelState, LabelStyle, LabelStylesheet, LabelTarget, MarkerLabel, NativeLabel,
};
