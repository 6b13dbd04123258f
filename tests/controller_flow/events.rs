use super::common::{committed, declare, flush, ready_layer};
use map_marker_sync::app::{DomEvent, NativeEventSlots};
use map_marker_sync::core::{CalloutSpec, RawMarkerId};
use map_marker_sync::render::ImageSize;
use map_marker_sync::{
    LatLng, LayerIntent, MapHost, MarkerController, MarkerEvent, MarkerId, MarkerSlot,
    MarkerSpec, Provider, RecordingBackend, SyncOptions, VendorClickEvent,
};

fn click(layer: &mut super::common::TestLayer, provider: Provider, lat: f64, lng: f64) {
    layer
        .handle_intent(LayerIntent::MarkerClicked {
            slot: MarkerSlot(1),
            event: VendorClickEvent::synthesize(
                provider,
                LatLng::new(lat, lng),
                NativeEventSlots::event(DomEvent::new()),
            ),
        })
        .expect("Klick sollte funktionieren");
}

/// Aktiver, committeter Controller direkt auf einem Container.
fn active_controller(
    provider: Provider,
    spec: MarkerSpec,
) -> (MapHost<RecordingBackend>, MarkerController) {
    let mut host = MapHost::new(RecordingBackend::new(provider), SyncOptions::default());
    host.mark_ready();
    let mut controller = MarkerController::new(spec);
    let request = controller.attach(&mut host).expect("Ladeanfrage erwartet");
    controller.complete_icon_load(&mut host, request.ticket, Ok(ImageSize::new(64, 64)));
    (host, controller)
}

#[test]
fn test_marker_tap_carries_id_and_click_position_for_every_vendor() {
    for provider in Provider::ALL {
        let mut layer = committed(provider, MarkerSpec::new(9.0, 9.0, "pin.png").with_id("7"));
        click(&mut layer, provider, 1.5, 2.5);

        let events = layer.drain_events();
        assert_eq!(
            events,
            vec![MarkerEvent::MarkerTap {
                marker_id: MarkerId(7),
                latitude: 1.5,
                longitude: 2.5,
            }],
            "Anbieter {provider:?}"
        );
        assert_eq!(
            serde_json::to_value(&events[0]).expect("Serialisierung"),
            serde_json::json!({
                "type": "markertap",
                "markerId": 7,
                "latitude": 1.5,
                "longitude": 2.5
            })
        );
    }
}

#[test]
fn test_anonymous_marker_click_toggles_callout_without_event() {
    let spec = MarkerSpec::new(0.0, 0.0, "pin.png").with_title("Hof");
    let mut layer = committed(Provider::Tencent, spec);
    let callout_key = layer
        .controller(MarkerSlot(1))
        .and_then(|c| c.callout())
        .map(|c| c.key())
        .expect("Callout aus Titel erwartet");
    assert_eq!(layer.backend().callout(callout_key).map(|c| c.shown), Some(false));

    click(&mut layer, Provider::Tencent, 0.0, 0.0);

    assert!(layer.drain_events().is_empty());
    assert_eq!(layer.backend().callout(callout_key).map(|c| c.shown), Some(true));
}

#[test]
fn test_non_integral_ids_are_not_addressable() {
    let mut fractional = MarkerSpec::new(0.0, 0.0, "pin.png");
    fractional.id = Some(RawMarkerId::Number(7.5));
    let mut layer = committed(Provider::AMap, fractional);
    click(&mut layer, Provider::AMap, 0.0, 0.0);
    assert!(layer.drain_events().is_empty());

    let mut layer = committed(Provider::AMap, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("abc"));
    click(&mut layer, Provider::AMap, 0.0, 0.0);
    assert!(layer.drain_events().is_empty());

    let mut numeric = MarkerSpec::new(0.0, 0.0, "pin.png");
    numeric.id = Some(RawMarkerId::Number(12.0));
    let mut layer = committed(Provider::AMap, numeric);
    click(&mut layer, Provider::AMap, 0.0, 0.0);
    assert_eq!(
        layer.drain_events().first().map(MarkerEvent::marker_id),
        Some(MarkerId(12))
    );
}

#[test]
fn test_click_stops_propagation_of_resolved_native_event() {
    let (mut host, mut controller) =
        active_controller(Provider::AMap, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("1"));

    let mut event = VendorClickEvent::synthesize(
        Provider::AMap,
        LatLng::new(0.0, 0.0),
        NativeEventSlots {
            event: None,
            dom_event: None,
            origin_event: Some(DomEvent::new()),
        },
    );
    assert!(controller.handle_click(&mut host, &mut event).is_some());
    assert!(event.native_event().is_some_and(DomEvent::propagation_stopped));
}

#[test]
fn test_click_without_native_event_still_emits() {
    let (mut host, mut controller) =
        active_controller(Provider::Google, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("5"));

    let mut event = VendorClickEvent::synthesize(
        Provider::Google,
        LatLng::new(4.0, 5.0),
        NativeEventSlots::default(),
    );
    assert_eq!(
        controller.handle_click(&mut host, &mut event),
        Some(MarkerEvent::MarkerTap {
            marker_id: MarkerId(5),
            latitude: 4.0,
            longitude: 5.0,
        })
    );
}

#[test]
fn test_callout_click_emits_event_and_consumes_dom_event() {
    let spec = MarkerSpec::new(0.0, 0.0, "pin.png")
        .with_id("8")
        .with_callout(CalloutSpec::with_content("Hallo"));
    let (_host, mut controller) = active_controller(Provider::Tencent, spec);

    let mut dom = DomEvent::new();
    assert_eq!(
        controller.handle_callout_click(Some(&mut dom)),
        Some(MarkerEvent::CalloutTap {
            marker_id: MarkerId(8)
        })
    );
    assert!(dom.propagation_stopped());
    assert!(dom.default_prevented());
}

#[test]
fn test_callout_click_without_callout_is_ignored() {
    let (_host, mut controller) =
        active_controller(Provider::Tencent, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("8"));
    assert_eq!(controller.handle_callout_click(None), None);
}

#[test]
fn test_host_misuse_is_reported_not_emitted() {
    let mut layer = ready_layer(Provider::Tencent);
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png").with_id("1"));
    flush(&mut layer);

    let result = layer.handle_intent(LayerIntent::CalloutClicked {
        slot: MarkerSlot(9),
        dom_event: None,
    });
    assert!(result.is_err());
    assert!(layer.drain_events().is_empty());
}
