use super::common::{complete, declare, flush, loader, native_marker, ready_layer, update};
use map_marker_sync::app::IconCommit;
use map_marker_sync::render::{IconTicket, ImageSize};
use map_marker_sync::{
    IconError, LayerIntent, LoadOrder, MapHost, MarkerController, MarkerSlot, MarkerSpec,
    Provider, RecordingBackend, SyncOptions,
};

#[test]
fn test_older_load_resolving_last_is_dropped() {
    let mut layer = ready_layer(Provider::Tencent);
    declare(&mut layer, 1, MarkerSpec::new(1.0, 2.0, "pin.png").with_id("1"));
    update(&mut layer, 1, MarkerSpec::new(3.0, 4.0, "flag.png").with_id("1"));

    let loads = layer.take_pending_loads();
    assert_eq!(loads.len(), 2);
    assert!(loads[0].ticket < loads[1].ticket);

    complete(&mut layer, &loads[1], ImageSize::new(64, 32));
    complete(&mut layer, &loads[0], ImageSize::new(64, 64));

    let marker = native_marker(&layer, 1);
    let icon = marker.icon.expect("Icon sollte gesetzt sein");
    assert_eq!(icon.url(), "flag.png");
    assert_eq!(icon.size(), glam::DVec2::new(32.0, 16.0));
    assert_eq!(
        marker.position.map(|p| p.lat_lng()),
        Some(map_marker_sync::LatLng::new(3.0, 4.0))
    );
}

#[test]
fn test_reversed_flush_commits_only_latest_request() {
    let mut layer = ready_layer(Provider::AMap);
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png"));
    update(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "flag.png"));
    update(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "wide.png"));

    layer
        .flush_icon_loads(&loader(), LoadOrder::Reversed)
        .expect("Flush sollte funktionieren");

    let icon = native_marker(&layer, 1).icon.expect("Icon sollte gesetzt sein");
    assert_eq!(icon.url(), "wide.png");
    let set_icon_calls = layer
        .backend()
        .call_log()
        .entries()
        .iter()
        .filter(|c| matches!(c, map_marker_sync::backend::NativeCall::SetIcon { .. }))
        .count();
    assert_eq!(set_icon_calls, 1);
}

#[test]
fn test_stale_ticket_is_reported_by_controller() {
    let mut host = MapHost::new(
        RecordingBackend::new(Provider::Tencent),
        SyncOptions::default(),
    );
    host.mark_ready();
    let mut controller = MarkerController::new(MarkerSpec::new(0.0, 0.0, "pin.png"));
    let first = controller.attach(&mut host).expect("Ladeanfrage erwartet");
    let second = controller
        .apply_spec(&mut host, MarkerSpec::new(0.0, 0.0, "flag.png"))
        .expect("Ladeanfrage erwartet");

    assert_eq!(
        controller.complete_icon_load(&mut host, first.ticket, Ok(ImageSize::new(64, 64))),
        IconCommit::Stale
    );
    assert_eq!(
        controller.complete_icon_load(&mut host, IconTicket(99), Ok(ImageSize::new(64, 64))),
        IconCommit::Stale
    );
    assert_eq!(
        controller.complete_icon_load(&mut host, second.ticket, Ok(ImageSize::new(64, 32))),
        IconCommit::Applied
    );
    assert_eq!(controller.committed_ticket(), Some(second.ticket));
}

#[test]
fn test_failed_latest_load_keeps_previous_commit() {
    let mut layer = ready_layer(Provider::Tencent);
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png"));
    flush(&mut layer);

    update(&mut layer, 1, MarkerSpec::new(5.0, 5.0, "missing.png"));
    flush(&mut layer);

    let marker = native_marker(&layer, 1);
    assert_eq!(marker.icon.map(|i| i.url().to_string()), Some("pin.png".into()));
    assert_eq!(
        marker.position.map(|p| p.lat_lng()),
        Some(map_marker_sync::LatLng::new(0.0, 0.0))
    );
}

#[test]
fn test_clearing_icon_path_invalidates_inflight_load() {
    let mut layer = ready_layer(Provider::Google);
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png"));
    let loads = layer.take_pending_loads();

    update(&mut layer, 1, MarkerSpec::new(0.0, 0.0, ""));
    assert!(layer.pending_loads().is_empty());
    complete(&mut layer, &loads[0], ImageSize::new(64, 64));

    assert!(native_marker(&layer, 1).icon.is_none());
}

#[test]
fn test_zero_sized_image_is_not_committed() {
    let mut host = MapHost::new(RecordingBackend::new(Provider::AMap), SyncOptions::default());
    host.mark_ready();
    let mut controller = MarkerController::new(MarkerSpec::new(0.0, 0.0, "pin.png"));
    let request = controller.attach(&mut host).expect("Ladeanfrage erwartet");

    assert_eq!(
        controller.complete_icon_load(&mut host, request.ticket, Ok(ImageSize::new(0, 10))),
        IconCommit::Failed
    );
    assert_eq!(controller.committed_ticket(), None);
}

#[test]
fn test_load_failure_intent_is_not_a_host_error() {
    let mut layer = ready_layer(Provider::Tencent);
    declare(&mut layer, 1, MarkerSpec::new(0.0, 0.0, "pin.png"));
    let loads = layer.take_pending_loads();

    layer
        .handle_intent(LayerIntent::IconLoadFailed {
            slot: MarkerSlot(1),
            ticket: loads[0].ticket,
            reason: "404".into(),
        })
        .expect("Ladefehler sollte kein Host-Fehler sein");
    assert!(native_marker(&layer, 1).icon.is_none());

    let error = IconError::LoadFailed {
        url: "pin.png".into(),
        reason: "404".into(),
    };
    assert!(error.to_string().contains("pin.png"));
}
