//! Application-Layer: Marker-Controller, Karten-Container, Events und Intents.

pub mod controller;
pub mod events;
pub mod host;
pub mod layer;
pub mod normalizer;

pub use controller::{IconCommit, MarkerController, MarkerState};
pub use events::{LayerIntent, MarkerEvent, MarkerSlot};
pub use host::{MapHost, MarkerRegistry};
pub use layer::{LoadOrder, MarkerLayer, PendingIconLoad};
pub use normalizer::{
    extract_lat_lng, AccessorLatLng, DomEvent, LatLngAccessor, LatLngLiteral, NativeEventSlots,
    VendorClickEvent,
};
