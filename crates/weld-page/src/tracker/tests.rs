use std::rc::Rc;
use std::time::Duration;

use weld_common::{HostMessage, MaskRect};

use super::*;
use crate::testing::{FakePage, RecordingBridge};

fn rect(left: f64, top: f64, width: f64, height: f64) -> MaskRect {
    MaskRect::new(left, top, width, height)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn setup() -> (
    Rc<FakePage>,
    Rc<RecordingBridge>,
    MaskTracker<FakePage, RecordingBridge>,
) {
    let page = Rc::new(FakePage::new());
    let bridge = Rc::new(RecordingBridge::new());
    let tracker = MaskTracker::new(
        Rc::clone(&page),
        Rc::clone(&bridge),
        TrackerOptions::default(),
    );
    (page, bridge, tracker)
}

// -- track / untrack --

#[test]
fn track_reports_current_box() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));

    tracker.track(e);

    assert!(tracker.is_tracked(&e));
    assert_eq!(
        bridge.mask_snapshots(),
        vec![vec![rect(10.0, 20.0, 80.0, 40.0)]]
    );
}

#[test]
fn double_track_installs_observers_once() {
    let (page, _bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));

    tracker.track(e);
    tracker.track(e);

    assert_eq!(tracker.len(), 1);
    assert_eq!(page.observer_count(e), 3);
    assert_eq!(page.pending_frames(), 1);
}

#[test]
fn untrack_releases_every_observer() {
    let (page, _bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));

    tracker.track(e);
    tracker.untrack(&e);

    assert!(!tracker.is_tracked(&e));
    assert!(tracker.is_empty());
    assert_eq!(page.observer_count(e), 0);
}

#[test]
fn untrack_without_track_is_a_no_op() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));

    tracker.untrack(&e);

    assert!(bridge.is_empty());
}

#[test]
fn double_untrack_sends_once() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    tracker.track(e);
    bridge.take();

    tracker.untrack(&e);
    tracker.untrack(&e);

    assert_eq!(bridge.mask_snapshots(), vec![Vec::<MaskRect>::new()]);
}

#[test]
fn untrack_bypasses_the_throttle() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    tracker.track(e);

    page.advance(ms(10));
    tracker.untrack(&e);

    assert_eq!(
        bridge.mask_snapshots(),
        vec![vec![rect(0.0, 0.0, 10.0, 10.0)], vec![]]
    );
}

#[test]
fn forced_send_restarts_the_throttle_window() {
    let (page, bridge, tracker) = setup();
    let a = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    let b = page.insert(page.body_id(), &["mask"], rect(20.0, 0.0, 10.0, 10.0));
    tracker.track(a);
    page.advance(ms(200));
    tracker.track(b);
    bridge.take();

    page.advance(ms(200));
    tracker.untrack(&a);
    page.advance(ms(50));
    tracker.notify_host();

    assert_eq!(bridge.len(), 1);
}

#[test]
fn sync_host_flushes_a_throttled_track() {
    let (page, bridge, tracker) = setup();
    let a = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    let b = page.insert(page.body_id(), &["mask"], rect(20.0, 0.0, 10.0, 10.0));
    tracker.track(a);
    page.advance(ms(10));
    tracker.track(b);
    assert_eq!(bridge.len(), 1);

    tracker.sync_host();

    assert_eq!(
        bridge.mask_snapshots().last(),
        Some(&vec![rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 0.0, 10.0, 10.0)])
    );
}

#[test]
fn sync_host_is_throttled_once_membership_was_sent() {
    let (page, bridge, tracker) = setup();
    let a = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    tracker.track(a);
    page.advance(ms(10));

    tracker.sync_host();

    assert_eq!(bridge.len(), 1);
}

#[test]
fn retrack_starts_fresh() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));

    tracker.track(e);
    page.advance(ms(200));
    tracker.untrack(&e);

    // Changes while untracked are invisible.
    page.set_rect(e, rect(50.0, 50.0, 20.0, 20.0));
    assert_eq!(bridge.len(), 2);

    page.advance(ms(200));
    tracker.track(e);
    assert_eq!(page.observer_count(e), 3);
    assert_eq!(
        bridge.mask_snapshots().last(),
        Some(&vec![rect(50.0, 50.0, 20.0, 20.0)])
    );

    // The stale tick from the first registration dies; only the new loop
    // keeps going, and the fresh rect means no spurious change.
    assert_eq!(page.pending_frames(), 2);
    page.advance(ms(200));
    page.run_frame();
    assert_eq!(page.pending_frames(), 1);
    assert_eq!(bridge.len(), 3);
}

// -- change detection --

#[test]
fn resize_inside_throttle_window_is_dropped() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);

    page.advance(ms(50));
    page.set_rect(e, rect(10.0, 20.0, 90.0, 40.0));
    assert_eq!(bridge.len(), 1);

    page.advance(ms(50));
    page.set_rect(e, rect(10.0, 20.0, 100.0, 40.0));
    assert_eq!(
        bridge.mask_snapshots(),
        vec![
            vec![rect(10.0, 20.0, 80.0, 40.0)],
            vec![rect(10.0, 20.0, 100.0, 40.0)],
        ]
    );
}

#[test]
fn style_change_triggers_check() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);
    bridge.take();
    page.advance(ms(200));

    page.set_style(e, rect(10.0, 20.0, 80.0, 60.0));

    assert_eq!(
        bridge.mask_snapshots(),
        vec![vec![rect(10.0, 20.0, 80.0, 60.0)]]
    );
}

#[test]
fn attribute_change_without_geometry_change_is_silent() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);
    bridge.take();
    page.advance(ms(200));

    page.add_class(e, "highlighted");

    assert!(bridge.is_empty());
}

#[test]
fn poll_catches_move_without_resize() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);
    bridge.take();
    page.advance(ms(200));

    page.set_rect(e, rect(30.0, 20.0, 80.0, 40.0));
    assert!(bridge.is_empty());

    page.run_frame();
    assert_eq!(
        bridge.mask_snapshots(),
        vec![vec![rect(30.0, 20.0, 80.0, 40.0)]]
    );
    assert_eq!(page.pending_frames(), 1);
}

#[test]
fn poll_is_quiet_while_nothing_moves() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);
    bridge.take();

    for _ in 0..10 {
        page.advance(ms(16));
        page.run_frame();
    }

    assert!(bridge.is_empty());
    assert_eq!(page.pending_frames(), 1);
}

#[test]
fn poll_stops_after_untrack() {
    let (page, _bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);
    tracker.untrack(&e);

    page.run_frame();

    assert_eq!(page.pending_frames(), 0);
}

#[test]
fn poll_disabled_schedules_nothing() {
    let page = Rc::new(FakePage::new());
    let bridge = Rc::new(RecordingBridge::new());
    let tracker = MaskTracker::new(
        Rc::clone(&page),
        Rc::clone(&bridge),
        TrackerOptions {
            poll: false,
            ..Default::default()
        },
    );
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));

    tracker.track(e);

    assert_eq!(page.pending_frames(), 0);
    assert_eq!(page.observer_count(e), 3);
}

#[test]
fn dropping_the_tracker_releases_everything() {
    let (page, _bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(10.0, 20.0, 80.0, 40.0));
    tracker.track(e);

    drop(tracker);
    page.run_frame();

    assert_eq!(page.observer_count(e), 0);
    assert_eq!(page.pending_frames(), 0);
}

// -- snapshots --

#[test]
fn zero_area_masks_never_sent() {
    let (page, bridge, tracker) = setup();
    let flat = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 0.0, 40.0));
    let thin = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 40.0, 0.0));
    let solid = page.insert(page.body_id(), &["mask"], rect(5.0, 5.0, 10.0, 10.0));

    tracker.track(flat);
    page.advance(ms(100));
    tracker.track(thin);
    page.advance(ms(100));
    tracker.track(solid);

    assert!(tracker.is_tracked(&flat));
    assert!(tracker.is_tracked(&thin));
    assert_eq!(
        bridge.mask_snapshots(),
        vec![vec![], vec![], vec![rect(5.0, 5.0, 10.0, 10.0)]]
    );
}

#[test]
fn snapshot_follows_registry_order() {
    let (page, _bridge, tracker) = setup();
    let a = page.insert(page.body_id(), &["mask"], rect(1.0, 0.0, 1.0, 1.0));
    let b = page.insert(page.body_id(), &["mask"], rect(2.0, 0.0, 1.0, 1.0));
    let c = page.insert(page.body_id(), &["mask"], rect(3.0, 0.0, 1.0, 1.0));

    tracker.track(c);
    tracker.track(a);
    tracker.track(b);

    assert_eq!(tracker.tracked_elements(), vec![c, a, b]);
    assert_eq!(
        tracker.snapshot(),
        vec![
            rect(3.0, 0.0, 1.0, 1.0),
            rect(1.0, 0.0, 1.0, 1.0),
            rect(2.0, 0.0, 1.0, 1.0),
        ]
    );
}

#[test]
fn detached_element_drops_out_of_snapshot() {
    let (page, _bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(1.0, 0.0, 1.0, 1.0));
    tracker.track(e);

    page.remove(e);

    assert!(tracker.is_tracked(&e));
    assert!(tracker.snapshot().is_empty());
}

// -- hover --

#[test]
fn hover_messages_are_unthrottled() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    tracker.track(e);
    bridge.take();

    page.pointer_enter(e);
    page.pointer_leave(e);
    page.pointer_enter(e);

    assert_eq!(
        bridge.messages(),
        vec![
            HostMessage::RemoveInputMask,
            HostMessage::ApplyInputMask,
            HostMessage::RemoveInputMask,
        ]
    );
}

#[test]
fn hover_after_untrack_is_ignored() {
    let (page, bridge, tracker) = setup();
    let e = page.insert(page.body_id(), &["mask"], rect(0.0, 0.0, 10.0, 10.0));
    tracker.track(e);
    tracker.untrack(&e);
    bridge.take();

    page.pointer_enter(e);

    assert!(bridge.is_empty());
}

#[test]
fn options_from_page_options() {
    let opts = weld_common::PageOptions {
        marker_class: "hole".into(),
        throttle_ms: 250,
        poll: false,
        ..Default::default()
    };
    let tracker_opts = TrackerOptions::from(&opts);
    assert_eq!(tracker_opts.marker_class, "hole");
    assert_eq!(tracker_opts.throttle, ms(250));
    assert!(!tracker_opts.poll);
}
