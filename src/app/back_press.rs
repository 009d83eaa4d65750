//! Double-back-to-exit automaton.
//!
//! Two states, `Idle` and `PendingExit`. A first press (when the page cannot
//! go back) arms the automaton; a second press inside the window exits. Time
//! is passed in by the caller, so nothing here owns a timer: expiry is noticed
//! on the next tick or the next press, whichever comes first.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackPressState {
    Idle,
    PendingExit { armed_at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The page handles it; the automaton is not touched.
    WebViewBack,
    /// Armed. Another press inside the window exits.
    FirstPress,
    Exit,
}

#[derive(Debug)]
pub struct BackPress {
    window: Duration,
    state: BackPressState,
}

impl BackPress {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: BackPressState::Idle,
        }
    }

    pub fn state(&self) -> BackPressState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, BackPressState::PendingExit { .. })
    }

    /// Time left before an armed automaton falls back to `Idle`.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            BackPressState::Idle => None,
            BackPressState::PendingExit { armed_at } => {
                Some(self.window.saturating_sub(now.saturating_duration_since(armed_at)))
            }
        }
    }

    /// Drop back to `Idle` once the window has elapsed. Returns whether a
    /// transition happened.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            BackPressState::PendingExit { armed_at }
                if now.saturating_duration_since(armed_at) >= self.window =>
            {
                self.state = BackPressState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Callers run [`BackPress::expire`] first so a stale arm is never
    /// mistaken for a second press.
    pub fn press(&mut self, can_go_back: bool, now: Instant) -> BackOutcome {
        if can_go_back {
            return BackOutcome::WebViewBack;
        }
        match self.state {
            BackPressState::Idle => {
                self.state = BackPressState::PendingExit { armed_at: now };
                BackOutcome::FirstPress
            }
            BackPressState::PendingExit { .. } => {
                self.state = BackPressState::Idle;
                BackOutcome::Exit
            }
        }
    }
}
