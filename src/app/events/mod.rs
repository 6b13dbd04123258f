//! Ein- und ausgehende Events der Marker-Schicht.

mod intent;
mod marker_event;

pub use intent::{LayerIntent, MarkerSlot};
pub use marker_event::MarkerEvent;
