use map_marker_sync::app::PendingIconLoad;
use map_marker_sync::backend::recording::RecordedMarker;
use map_marker_sync::render::{FixedIconLoader, ImageSize};
use map_marker_sync::{
    LayerIntent, LoadOrder, MarkerLayer, MarkerSlot, MarkerSpec, Provider, RecordingBackend,
    SyncOptions,
};

pub type TestLayer = MarkerLayer<RecordingBackend>;

/// Schicht über einer bereits bereiten Karte.
pub fn ready_layer(provider: Provider) -> TestLayer {
    let mut layer = MarkerLayer::new(RecordingBackend::new(provider), SyncOptions::default());
    layer
        .handle_intent(LayerIntent::MapReady)
        .expect("MapReady sollte ohne Fehler durchlaufen");
    layer
}

/// Icon-Größen aller in den Tests verwendeten Bilder.
pub fn loader() -> FixedIconLoader {
    FixedIconLoader::new()
        .with("pin.png", ImageSize::new(64, 64))
        .with("flag.png", ImageSize::new(64, 32))
        .with("wide.png", ImageSize::new(100, 20))
}

pub fn declare(layer: &mut TestLayer, slot: u64, spec: MarkerSpec) {
    layer
        .handle_intent(LayerIntent::MarkerDeclared {
            slot: MarkerSlot(slot),
            spec,
        })
        .expect("Deklaration sollte funktionieren");
}

pub fn update(layer: &mut TestLayer, slot: u64, spec: MarkerSpec) {
    layer
        .handle_intent(LayerIntent::MarkerSpecChanged {
            slot: MarkerSlot(slot),
            spec,
        })
        .expect("Property-Update sollte funktionieren");
}

pub fn flush(layer: &mut TestLayer) {
    layer
        .flush_icon_loads(&loader(), LoadOrder::Issued)
        .expect("Icon-Ladungen sollten zurueckgemeldet werden");
}

pub fn complete(layer: &mut TestLayer, load: &PendingIconLoad, size: ImageSize) {
    layer
        .handle_intent(LayerIntent::IconLoaded {
            slot: load.slot,
            ticket: load.ticket,
            size,
        })
        .expect("IconLoaded sollte ohne Fehler durchlaufen");
}

/// Deklariert einen Marker und meldet sein Icon sofort zurück.
pub fn committed(provider: Provider, spec: MarkerSpec) -> TestLayer {
    let mut layer = ready_layer(provider);
    declare(&mut layer, 1, spec);
    flush(&mut layer);
    layer
}

/// Aktueller nativer Zustand des Markers in `slot`.
pub fn native_marker(layer: &TestLayer, slot: u64) -> RecordedMarker {
    let key = layer
        .controller(MarkerSlot(slot))
        .and_then(|c| c.native_marker())
        .expect("Marker sollte aktiv sein");
    layer
        .backend()
        .marker(key)
        .cloned()
        .expect("Nativer Marker sollte existieren")
}
