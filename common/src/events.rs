use bevy_math::Vec3;
use std::collections::HashMap;
use tracing::trace;

// ============================================================================
// Event Payloads
// ============================================================================

// Alert raised: the player stayed lit past the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerDetected {
    pub light_position: Vec3,
    pub player_position: Vec3,
    pub detection_time: f32,
}

// Alert cancelled: the player stayed hidden past the escape threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerEscaped {
    pub light_position: Vec3,
    pub player_position: Vec3,
}

// Terminal: the player stayed lit past the capture threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCaptured {
    pub light_position: Vec3,
    pub player_position: Vec3,
    pub detection_time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerDetected,
    PlayerEscaped,
    PlayerCaptured,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitEvent {
    PlayerDetected(PlayerDetected),
    PlayerEscaped(PlayerEscaped),
    PlayerCaptured(PlayerCaptured),
}

impl PursuitEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PlayerDetected(_) => EventKind::PlayerDetected,
            Self::PlayerEscaped(_) => EventKind::PlayerEscaped,
            Self::PlayerCaptured(_) => EventKind::PlayerCaptured,
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type EventHandler = Box<dyn FnMut(&PursuitEvent) + Send + Sync>;

struct Listener {
    id: SubscriptionId,
    once: bool,
    handler: EventHandler,
}

/// Typed publish/subscribe dispatch keyed by [`EventKind`].
///
/// Listeners for a kind run in subscription order. Events raised while the
/// engine is mid-tick are queued with [`EventBus::enqueue`] and delivered by
/// [`EventBus::flush`] once the tick's state is final.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<Listener>>,
    queue: Vec<PursuitEvent>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&PursuitEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.register(kind, false, Box::new(handler))
    }

    // Listener removed after its first delivery.
    pub fn subscribe_once(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&PursuitEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.register(kind, true, Box::new(handler))
    }

    // Listen to every kind with one handler; returns one id per kind.
    pub fn subscribe_all(
        &mut self,
        handler: impl FnMut(&PursuitEvent) + Send + Sync + Clone + 'static,
    ) -> [SubscriptionId; 3] {
        [EventKind::PlayerDetected, EventKind::PlayerEscaped, EventKind::PlayerCaptured]
            .map(|kind| self.subscribe(kind, handler.clone()))
    }

    fn register(&mut self, kind: EventKind, once: bool, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push(Listener { id, once, handler });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for listeners in self.listeners.values_mut() {
            let before = listeners.len();
            listeners.retain(|listener| listener.id != id);
            removed |= listeners.len() != before;
        }
        self.listeners.retain(|_, listeners| !listeners.is_empty());
        removed
    }

    // Drop every listener for one kind.
    pub fn unsubscribe_kind(&mut self, kind: EventKind) {
        self.listeners.remove(&kind);
    }

    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    // Deliver immediately.
    pub fn publish(&mut self, event: &PursuitEvent) {
        let kind = event.kind();
        let Some(listeners) = self.listeners.get_mut(&kind) else {
            trace!("no listeners for {:?}", kind);
            return;
        };

        for listener in listeners.iter_mut() {
            (listener.handler)(event);
        }
        listeners.retain(|listener| !listener.once);

        if listeners.is_empty() {
            self.listeners.remove(&kind);
        }
    }

    pub fn enqueue(&mut self, event: PursuitEvent) {
        self.queue.push(event);
    }

    #[must_use]
    pub fn queued(&self) -> &[PursuitEvent] {
        &self.queue
    }

    // Deliver everything queued, oldest first. Returns the number delivered.
    pub fn flush(&mut self) -> usize {
        let events = std::mem::take(&mut self.queue);
        for event in &events {
            self.publish(event);
        }
        events.len()
    }

    // Drop queued events without delivering them.
    pub fn discard_queued(&mut self) {
        self.queue.clear();
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
        self.queue.clear();
    }
}
