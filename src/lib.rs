//! Map Marker Sync Library.
//! Hält deklarative Marker-Beschreibungen mit den nativen Markern eines Karten-SDKs synchron.

pub mod app;
pub mod backend;
pub mod core;
pub mod render;
pub mod shared;

pub use app::{
    LayerIntent, LoadOrder, MapHost, MarkerController, MarkerEvent, MarkerLayer, MarkerRegistry,
    MarkerSlot, MarkerState, VendorClickEvent,
};
pub use backend::{MapBackend, RecordingBackend};
pub use core::{
    CalloutSpec, LabelSpec, LatLng, MarkerId, MarkerSpec, Provider, ProviderCapabilities,
};
pub use render::{FileIconLoader, IconError, IconLoader};
pub use shared::SyncOptions;
