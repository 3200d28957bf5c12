//! Access gate state machine
//!
//! Locked → Ready (both channels joined) → Counting (access requested)
//! → Unlocked (countdown hit zero). Every input returns the UI/platform
//! effects the driver has to apply; the machine itself touches nothing.

use crate::settings::GateConfig;

/// One of the two prerequisite links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    First,
    Second,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::First => 0,
            Channel::Second => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Waiting for both links to be clicked
    Locked,
    /// Action button enabled
    Ready,
    /// Countdown running
    Counting { remaining: u32 },
    /// Terminal: completion persisted, navigation issued
    Unlocked,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEffect {
    EnableAction,
    DisableAction,
    /// Unhide the status display
    RevealStatus,
    /// Overwrite the status display text
    ShowStatus(String),
    /// Start the repeating countdown timer
    StartTimer,
    /// Stop the countdown timer
    CancelTimer,
    /// Set the persisted completion flag
    PersistCompletion,
    Navigate(String),
}

/// Gate state for one page visit
#[derive(Debug, Clone)]
pub struct AccessGate {
    joined: [bool; 2],
    phase: GatePhase,
    countdown_start: u32,
    destination: String,
}

impl AccessGate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            joined: [false; 2],
            phase: GatePhase::Locked,
            countdown_start: config.countdown_start,
            destination: config.destination.clone(),
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_joined(&self, channel: Channel) -> bool {
        self.joined[channel.index()]
    }

    /// Whether the action control should be clickable
    pub fn action_enabled(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// A channel link was clicked
    pub fn join(&mut self, channel: Channel) -> Vec<GateEffect> {
        self.joined[channel.index()] = true;

        if self.phase == GatePhase::Locked && self.joined.iter().all(|&j| j) {
            self.phase = GatePhase::Ready;
            return vec![GateEffect::EnableAction];
        }
        Vec::new()
    }

    /// The action control was clicked
    pub fn request_access(&mut self) -> Vec<GateEffect> {
        if self.phase != GatePhase::Ready {
            return Vec::new();
        }

        let mut effects = vec![GateEffect::DisableAction, GateEffect::RevealStatus];
        if self.countdown_start == 0 {
            effects.extend(self.unlock(false));
        } else {
            self.phase = GatePhase::Counting {
                remaining: self.countdown_start,
            };
            effects.push(GateEffect::StartTimer);
        }
        effects
    }

    /// One countdown interval elapsed
    pub fn tick(&mut self) -> Vec<GateEffect> {
        let GatePhase::Counting { remaining } = self.phase else {
            return Vec::new();
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            return self.unlock(true);
        }

        self.phase = GatePhase::Counting { remaining };
        vec![GateEffect::ShowStatus(status_message(remaining))]
    }

    fn unlock(&mut self, timer_running: bool) -> Vec<GateEffect> {
        self.phase = GatePhase::Unlocked;
        let mut effects = Vec::with_capacity(3);
        if timer_running {
            effects.push(GateEffect::CancelTimer);
        }
        effects.push(GateEffect::PersistCompletion);
        effects.push(GateEffect::Navigate(self.destination.clone()));
        effects
    }
}

/// Status text shown while counting down
pub fn status_message(remaining: u32) -> String {
    let unit = if remaining == 1 { "minute" } else { "minutes" };
    format!("Wait for verification... ({} {} remaining)", remaining, unit)
}
