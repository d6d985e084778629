#![allow(dead_code)]

use bevy_math::Vec3;
use spotlight_common::{EventKind, PlayerLink, PursuitEngine, PursuitEvent};
use std::sync::{Arc, Mutex};

// Player stand-in that records every illumination flag pushed to it.
#[derive(Debug, Clone)]
pub struct TestPlayer {
    pub position: Vec3,
    pub illuminated: bool,
    pub pushes: usize,
}

impl TestPlayer {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            illuminated: false,
            pushes: 0,
        }
    }
}

impl PlayerLink for TestPlayer {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_illuminated(&mut self, illuminated: bool) {
        self.illuminated = illuminated;
        self.pushes += 1;
    }
}

// Shared log of delivered events.
pub type EventLog = Arc<Mutex<Vec<PursuitEvent>>>;

pub fn record_events(engine: &mut PursuitEngine) -> EventLog {
    let log: EventLog = Arc::default();
    let sink = Arc::clone(&log);
    let _ = engine.events().subscribe_all(move |event| {
        sink.lock().expect("event log poisoned").push(*event);
    });
    log
}

pub fn count(log: &EventLog, kind: EventKind) -> usize {
    log.lock()
        .expect("event log poisoned")
        .iter()
        .filter(|event| event.kind() == kind)
        .count()
}
