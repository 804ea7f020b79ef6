//! Maps [`GameEvent`]s to HUD flashes, the terminal bell, and log lines.
//!
//! Binary-only: it bridges pure game events to front-end effects. Everything
//! here is fire-and-forget and never feeds back into the simulation.

use flappy::GameEvent;
use std::time::{Duration, Instant};

/// How long a HUD flash stays visible.
const FLASH_DURATION: Duration = Duration::from_millis(600);

/// Visual style of a flash, picked by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Score,
    Crash,
    Start,
}

/// A short message shown in the status bar.
#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub kind: FlashKind,
    expires_at: Instant,
}

/// Front-end side effects waiting to be shown.
#[derive(Debug, Default)]
pub struct Feedback {
    flash: Option<Flash>,
    bell_pending: bool,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the effects of a batch of events.
    pub fn apply(&mut self, events: &[GameEvent], now: Instant) {
        for event in events {
            match *event {
                GameEvent::Started => {
                    self.show("Go!", FlashKind::Start, now);
                }
                GameEvent::Jumped => {}
                GameEvent::Scored { score } => {
                    self.show(format!("+1  ({})", score), FlashKind::Score, now);
                }
                GameEvent::Collided {
                    score,
                    new_high_score,
                } => {
                    tracing::info!(score, new_high_score, "crash");
                    self.bell_pending = true;
                    let text = if new_high_score && score > 0 {
                        "CRASH! New best!".to_string()
                    } else {
                        "CRASH!".to_string()
                    };
                    self.show(text, FlashKind::Crash, now);
                }
            }
        }
    }

    fn show(&mut self, text: impl Into<String>, kind: FlashKind, now: Instant) {
        self.flash = Some(Flash {
            text: text.into(),
            kind,
            expires_at: now + FLASH_DURATION,
        });
    }

    /// The flash to draw this frame, if it has not expired.
    pub fn active_flash(&self, now: Instant) -> Option<&Flash> {
        self.flash.as_ref().filter(|f| now < f.expires_at)
    }

    /// Returns true once per crash so the caller can ring the bell.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }
}
