use tracing::{debug, info};

use crate::{config::SpotlightConfig, constants::*};

// ============================================================================
// Alert State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertState {
    // Player not lit, no accumulated suspicion
    #[default]
    Idle,
    // Player lit, detection timer below the alert threshold
    Detecting,
    // Alert raised and player currently lit
    Alerted,
    // Alert raised but player hidden; escape timer running
    Escaping,
}

impl AlertState {
    #[must_use]
    pub const fn is_alerted(self) -> bool {
        matches!(self, Self::Alerted | Self::Escaping)
    }
}

// Threshold crossings raised by a single step, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSignal {
    Detected,
    Escaped,
    Captured,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    pub alert: f32,
    pub capture: f32,
    pub escape: f32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            alert: ALERT_THRESHOLD,
            capture: CAPTURE_THRESHOLD,
            escape: ESCAPE_THRESHOLD,
        }
    }
}

impl From<&SpotlightConfig> for AlertThresholds {
    fn from(config: &SpotlightConfig) -> Self {
        Self {
            alert: config.alert_threshold,
            capture: config.capture_threshold,
            escape: config.escape_threshold,
        }
    }
}

// ============================================================================
// Alert State Machine
// ============================================================================

/// Per-tick fold over visibility.
///
/// Visible ticks feed `detection_timer` and zero `escape_timer`; hidden ticks
/// while alerted feed `escape_timer`. Hidden ticks before the alert threshold
/// drop straight back to `Idle`. Once the capture threshold is crossed the
/// machine latches and ignores further input until [`AlertMachine::reset`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertMachine {
    state: AlertState,
    detection_timer: f32,
    escape_timer: f32,
    captured: bool,
    thresholds: AlertThresholds,
}

impl AlertMachine {
    #[must_use]
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn state(&self) -> AlertState {
        self.state
    }

    #[must_use]
    pub const fn detection_timer(&self) -> f32 {
        self.detection_timer
    }

    #[must_use]
    pub const fn escape_timer(&self) -> f32 {
        self.escape_timer
    }

    #[must_use]
    pub const fn is_captured(&self) -> bool {
        self.captured
    }

    // Fraction of the capture threshold already spent in the light.
    #[must_use]
    pub fn detection_progress(&self) -> f32 {
        if self.thresholds.capture <= 0.0 {
            return if self.detection_timer > 0.0 || self.captured { 1.0 } else { 0.0 };
        }
        (self.detection_timer / self.thresholds.capture).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.state = AlertState::Idle;
        self.detection_timer = 0.0;
        self.escape_timer = 0.0;
        self.captured = false;
    }

    // Advance by one tick. `dt` must be finite and non-negative.
    pub fn step(&mut self, visible: bool, dt: f32) -> Vec<AlertSignal> {
        let mut signals = Vec::new();
        if self.captured {
            return signals;
        }

        let previous = self.state;

        if visible {
            self.escape_timer = 0.0;
            self.detection_timer += dt;

            self.state = match self.state {
                AlertState::Idle => AlertState::Detecting,
                AlertState::Escaping => AlertState::Alerted,
                state => state,
            };

            if self.state == AlertState::Detecting && self.detection_timer >= self.thresholds.alert {
                self.state = AlertState::Alerted;
                signals.push(AlertSignal::Detected);
            }

            if self.detection_timer >= self.thresholds.capture {
                self.captured = true;
                signals.push(AlertSignal::Captured);
            }
        } else {
            match self.state {
                AlertState::Idle => {}
                AlertState::Detecting => {
                    self.state = AlertState::Idle;
                    self.detection_timer = 0.0;
                }
                AlertState::Alerted | AlertState::Escaping => {
                    self.state = AlertState::Escaping;
                    self.escape_timer += dt;

                    if self.escape_timer >= self.thresholds.escape {
                        self.state = AlertState::Idle;
                        self.escape_timer = 0.0;
                        self.detection_timer = 0.0;
                        signals.push(AlertSignal::Escaped);
                    }
                }
            }
        }

        if previous != self.state {
            debug!("alert state {:?} -> {:?}", previous, self.state);
        }
        for signal in &signals {
            match signal {
                AlertSignal::Detected => info!("ALERT! player detected after {:.2}s", self.detection_timer),
                AlertSignal::Escaped => info!("alert cancelled, player escaped"),
                AlertSignal::Captured => info!("player caught after {:.2}s in the light", self.detection_timer),
            }
        }

        signals
    }
}
