//! Core-Domänentypen: Marker-Beschreibung, Positionen, Provider-Capabilities.

pub mod geo;
pub mod map_marker;
mod number;
pub mod provider;

pub use geo::{LatLng, NativePosition};
pub use map_marker::{
    AnchorSpec, CalloutDisplay, CalloutSpec, LabelSpec, MarkerId, MarkerSpec, RawMarkerId,
    DEFAULT_ANCHOR,
};
pub use provider::{
    CalloutModel, CoordOrder, IconModel, LabelModel, Provider, ProviderCapabilities,
};
