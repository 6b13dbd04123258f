use super::common::{committed, declare, flush, native_marker, ready_layer};
use map_marker_sync::backend::NativeCall;
use map_marker_sync::core::{CalloutSpec, LabelSpec};
use map_marker_sync::{
    LayerIntent, MapHost, MarkerController, MarkerLayer, MarkerSlot, MarkerSpec, MarkerState,
    Provider, RecordingBackend, SyncOptions,
};

#[test]
fn test_marker_stays_unattached_until_map_ready() {
    let mut layer = MarkerLayer::new(RecordingBackend::new(Provider::AMap), SyncOptions::default());
    declare(&mut layer, 1, MarkerSpec::new(30.0, 120.0, "pin.png").with_id("1"));

    assert!(layer.backend().call_log().is_empty());
    assert!(layer.pending_loads().is_empty());
    assert_eq!(
        layer.controller(MarkerSlot(1)).map(|c| c.state()),
        Some(MarkerState::Unattached)
    );

    layer
        .handle_intent(LayerIntent::MapReady)
        .expect("MapReady sollte funktionieren");
    flush(&mut layer);

    assert_eq!(
        layer.controller(MarkerSlot(1)).map(|c| c.state()),
        Some(MarkerState::Active)
    );
    assert!(native_marker(&layer, 1).icon.is_some());
    assert!(layer.host().registry().get("1").is_some());
}

#[test]
fn test_destroy_unattached_marker_is_noop() {
    let mut layer = MarkerLayer::new(
        RecordingBackend::new(Provider::Tencent),
        SyncOptions::default(),
    );
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("1"));

    layer
        .handle_intent(LayerIntent::MarkerRemoved {
            slot: MarkerSlot(1),
        })
        .expect("Entfernen sollte funktionieren");

    assert!(layer.backend().call_log().is_empty());
    assert!(layer.host().registry().is_empty());
    assert!(layer.controller(MarkerSlot(1)).is_none());
}

#[test]
fn test_destroyed_marker_cannot_be_reattached() {
    let mut host = MapHost::new(
        RecordingBackend::new(Provider::Tencent),
        SyncOptions::default(),
    );
    let mut controller = MarkerController::new(MarkerSpec::new(0.0, 0.0, "pin.png"));
    controller.destroy(&mut host);
    assert_eq!(controller.state(), MarkerState::Destroyed);

    host.mark_ready();
    assert!(controller.attach(&mut host).is_none());
    assert!(controller
        .apply_spec(&mut host, MarkerSpec::new(1.0, 1.0, "pin.png"))
        .is_none());
    assert!(host.backend().call_log().is_empty());
}

#[test]
fn test_empty_icon_path_applies_nothing() {
    let spec = MarkerSpec::new(10.0, 20.0, "")
        .with_id("3")
        .with_title("Hof")
        .with_label(LabelSpec::with_content("Hof"));
    let layer = committed(Provider::Google, spec);

    assert!(layer.pending_loads().is_empty());
    let marker = native_marker(&layer, 1);
    assert!(marker.icon.is_none());
    assert!(marker.position.is_none());
    assert!(marker.label.is_none());
    assert_eq!(layer.backend().callouts().count(), 0);
    assert_eq!(layer.backend().stylesheets().count(), 0);
}

#[test]
fn test_destroy_releases_every_native_resource() {
    let spec = MarkerSpec::new(10.0, 20.0, "pin.png")
        .with_id("7")
        .with_label(LabelSpec::with_content("Tor"))
        .with_callout(CalloutSpec::with_content("Hallo"));
    let mut layer = committed(Provider::Google, spec);

    assert_eq!(layer.backend().stylesheets().count(), 1);
    assert_eq!(layer.backend().callouts().count(), 1);
    assert_eq!(layer.host().registry().len(), 1);

    layer
        .handle_intent(LayerIntent::MarkerRemoved {
            slot: MarkerSlot(1),
        })
        .expect("Entfernen sollte funktionieren");

    assert_eq!(layer.backend().markers().count(), 0);
    assert_eq!(layer.backend().callouts().count(), 0);
    assert_eq!(layer.backend().stylesheets().count(), 0);
    assert!(layer.host().registry().is_empty());

    let removals = layer
        .backend()
        .call_log()
        .entries()
        .iter()
        .filter(|c| matches!(c, NativeCall::RemoveStylesheet { .. }))
        .count();
    assert_eq!(removals, 1);
}

#[test]
fn test_destroy_twice_issues_no_further_calls() {
    let mut host = MapHost::new(
        RecordingBackend::new(Provider::Tencent),
        SyncOptions::default(),
    );
    host.mark_ready();
    let mut controller = MarkerController::new(MarkerSpec::new(0.0, 0.0, "pin.png").with_id("4"));
    controller.attach(&mut host);
    controller.destroy(&mut host);
    let calls = host.backend().call_log().len();

    controller.destroy(&mut host);
    assert_eq!(host.backend().call_log().len(), calls);
    assert_eq!(controller.state(), MarkerState::Destroyed);
}

#[test]
fn test_registry_tracks_each_addressable_marker() {
    let mut layer = ready_layer(Provider::Tencent);
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("1"));
    declare(&mut layer, 2, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("2"));
    declare(&mut layer, 3, MarkerSpec::new(0.0, 0.0, "pin.png"));

    let registry = layer.host().registry();
    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.get("1"),
        layer.controller(MarkerSlot(1)).and_then(|c| c.native_marker())
    );
    assert_eq!(
        registry.get("2"),
        layer.controller(MarkerSlot(2)).and_then(|c| c.native_marker())
    );
    assert!(registry.get("").is_some());
}
