use bevy_math::Vec3;
use spotlight_common::{
    EventBus, EventKind, PursuitEvent,
    events::{PlayerCaptured, PlayerDetected, PlayerEscaped},
};
use std::sync::{Arc, Mutex};

fn detected(time: f32) -> PursuitEvent {
    PursuitEvent::PlayerDetected(PlayerDetected {
        light_position: Vec3::new(0.0, 5.0, 0.0),
        player_position: Vec3::ZERO,
        detection_time: time,
    })
}

fn escaped() -> PursuitEvent {
    PursuitEvent::PlayerEscaped(PlayerEscaped {
        light_position: Vec3::new(0.0, 5.0, 0.0),
        player_position: Vec3::new(9.0, 0.0, 9.0),
    })
}

fn captured() -> PursuitEvent {
    PursuitEvent::PlayerCaptured(PlayerCaptured {
        light_position: Vec3::new(0.0, 5.0, 0.0),
        player_position: Vec3::ZERO,
        detection_time: 3.0,
    })
}

fn counter() -> (Arc<Mutex<usize>>, impl FnMut(&PursuitEvent) + Send + Sync + Clone + 'static) {
    let hits = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&hits);
    (hits, move |_: &PursuitEvent| *sink.lock().expect("counter poisoned") += 1)
}

fn hits(counter: &Arc<Mutex<usize>>) -> usize {
    *counter.lock().expect("counter poisoned")
}

#[test]
fn listeners_only_see_their_kind() {
    let mut bus = EventBus::new();
    let (detections, on_detected) = counter();
    let (escapes, on_escaped) = counter();
    let _ = bus.subscribe(EventKind::PlayerDetected, on_detected);
    let _ = bus.subscribe(EventKind::PlayerEscaped, on_escaped);

    bus.publish(&detected(0.5));
    bus.publish(&captured());

    assert_eq!(hits(&detections), 1);
    assert_eq!(hits(&escapes), 0);
}

#[test]
fn once_listener_fires_a_single_time() {
    let mut bus = EventBus::new();
    let (count, handler) = counter();
    let _ = bus.subscribe_once(EventKind::PlayerCaptured, handler);
    assert_eq!(bus.listener_count(EventKind::PlayerCaptured), 1);

    bus.publish(&captured());
    bus.publish(&captured());

    assert_eq!(hits(&count), 1);
    assert_eq!(bus.listener_count(EventKind::PlayerCaptured), 0);
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut bus = EventBus::new();
    let (count, handler) = counter();
    let id = bus.subscribe(EventKind::PlayerDetected, handler);

    bus.publish(&detected(0.5));
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.publish(&detected(0.5));

    assert_eq!(hits(&count), 1);
}

#[test]
fn unsubscribe_kind_leaves_other_kinds() {
    let mut bus = EventBus::new();
    let (count, handler) = counter();
    let _ = bus.subscribe_all(handler);
    assert_eq!(bus.listener_count(EventKind::PlayerEscaped), 1);

    bus.unsubscribe_kind(EventKind::PlayerEscaped);
    bus.publish(&escaped());
    bus.publish(&detected(0.5));

    assert_eq!(hits(&count), 1);
    assert_eq!(bus.listener_count(EventKind::PlayerEscaped), 0);
    assert_eq!(bus.listener_count(EventKind::PlayerDetected), 1);
}

#[test]
fn flush_delivers_in_queue_order() {
    let mut bus = EventBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let _ = bus.subscribe_all(move |event: &PursuitEvent| sink.lock().expect("log poisoned").push(event.kind()));

    bus.enqueue(detected(0.5));
    bus.enqueue(escaped());
    bus.enqueue(captured());
    assert_eq!(bus.queued().len(), 3);
    assert!(log.lock().expect("log poisoned").is_empty());

    assert_eq!(bus.flush(), 3);
    assert!(bus.queued().is_empty());
    assert_eq!(
        *log.lock().expect("log poisoned"),
        vec![EventKind::PlayerDetected, EventKind::PlayerEscaped, EventKind::PlayerCaptured]
    );
}

#[test]
fn listeners_run_in_subscription_order() {
    let mut bus = EventBus::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in 0..3 {
        let sink = Arc::clone(&order);
        let _ = bus.subscribe(EventKind::PlayerDetected, move |_| sink.lock().expect("order poisoned").push(tag));
    }

    bus.publish(&detected(0.5));
    assert_eq!(*order.lock().expect("order poisoned"), vec![0, 1, 2]);
}

#[test]
fn discarded_events_are_never_delivered() {
    let mut bus = EventBus::new();
    let (count, handler) = counter();
    let _ = bus.subscribe(EventKind::PlayerDetected, handler);

    bus.enqueue(detected(0.5));
    bus.discard_queued();
    assert_eq!(bus.flush(), 0);
    assert_eq!(hits(&count), 0);
}

#[test]
fn payload_reaches_the_listener_intact() {
    let mut bus = EventBus::new();
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let _ = bus.subscribe(EventKind::PlayerDetected, move |event| {
        if let PursuitEvent::PlayerDetected(payload) = event {
            *sink.lock().expect("payload poisoned") = Some(payload.detection_time);
        }
    });

    bus.publish(&detected(0.75));
    assert_eq!(*seen.lock().expect("payload poisoned"), Some(0.75));
}

#[test]
fn clear_drops_listeners_and_queue() {
    let mut bus = EventBus::new();
    let (count, handler) = counter();
    let _ = bus.subscribe_all(handler);
    bus.enqueue(captured());

    bus.clear();
    assert_eq!(bus.flush(), 0);
    bus.publish(&detected(0.5));
    assert_eq!(hits(&count), 0);
    assert_eq!(bus.listener_count(EventKind::PlayerDetected), 0);
}
