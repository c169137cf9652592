use std::time::{Duration, Instant};

use crate::io::kv::KvStore;
use crate::io::opener::{OpenError, UrlOpener};
use crate::model::link::Link;
use crate::ops::store::LinkStore;

/// Whole seconds the user waits before an outbound link can be followed
pub const COUNTDOWN_SECS: u8 = 3;

const TICK: Duration = Duration::from_secs(1);

/// The link staged behind the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundTarget {
    pub link_id: String,
    pub title: String,
    pub url: String,
    pub icon: String,
}

impl OutboundTarget {
    pub fn from_link(link: &Link) -> Self {
        OutboundTarget {
            link_id: link.id.clone(),
            title: link.title.clone(),
            url: link.url.clone(),
            icon: link.display_icon().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    /// No link staged
    #[default]
    Idle,
    /// Waiting; `remaining` whole seconds left
    Counting {
        target: OutboundTarget,
        remaining: u8,
    },
    /// Countdown finished, navigation enabled
    Ready { target: OutboundTarget },
}

/// Result of a confirm attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Not in `Ready`; nothing happened
    NotReady,
    /// The url was opened and the visit recorded (`None` if the link was
    /// deleted while staged)
    Opened {
        link_id: String,
        visits: Option<u64>,
    },
}

/// Timed confirmation step in front of every external navigation.
///
/// The gate owns its one timer: a deadline for the next whole-second tick.
/// Callers feed it the current time via [`OutboundGate::advance`]; leaving
/// `Counting`/`Ready` discards the deadline.
#[derive(Debug, Default)]
pub struct OutboundGate {
    state: GateState,
    next_tick: Option<Instant>,
}

impl OutboundGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GateState::Idle)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, GateState::Ready { .. })
    }

    pub fn target(&self) -> Option<&OutboundTarget> {
        match &self.state {
            GateState::Idle => None,
            GateState::Counting { target, .. } | GateState::Ready { target } => Some(target),
        }
    }

    /// Seconds left on the countdown (0 when ready, `None` when idle)
    pub fn remaining(&self) -> Option<u8> {
        match &self.state {
            GateState::Idle => None,
            GateState::Counting { remaining, .. } => Some(*remaining),
            GateState::Ready { .. } => Some(0),
        }
    }

    /// Stage a link, restarting the countdown even if another run is in flight
    pub fn stage(&mut self, link: &Link, now: Instant) {
        self.state = GateState::Counting {
            target: OutboundTarget::from_link(link),
            remaining: COUNTDOWN_SECS,
        };
        self.next_tick = Some(now + TICK);
    }

    /// One whole second elapsed. No effect outside `Counting`.
    pub fn tick(&mut self) {
        let GateState::Counting { target, remaining } = &mut self.state else {
            return;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            let target = target.clone();
            self.state = GateState::Ready { target };
            self.next_tick = None;
        } else {
            self.next_tick = self.next_tick.map(|t| t + TICK);
        }
    }

    /// Apply every tick whose deadline has passed. Returns true if the state changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(deadline) = self.next_tick {
            if now < deadline {
                break;
            }
            self.tick();
            changed = true;
        }
        changed
    }

    /// Back to `Idle` without navigating. Returns true if something was staged.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        self.state = GateState::Idle;
        self.next_tick = None;
        was_active
    }

    /// Follow the staged link: open it, count the visit, return to `Idle`.
    ///
    /// Only valid in `Ready`. If the opener fails the gate stays `Ready` and
    /// the visit count is untouched.
    pub fn confirm<S: KvStore>(
        &mut self,
        store: &mut LinkStore<S>,
        opener: &dyn UrlOpener,
    ) -> Result<ConfirmOutcome, OpenError> {
        let GateState::Ready { target } = &self.state else {
            return Ok(ConfirmOutcome::NotReady);
        };
        opener.open(&target.url)?;
        let link_id = target.link_id.clone();
        let visits = store.record_visit(&link_id);
        self.cancel();
        Ok(ConfirmOutcome::Opened { link_id, visits })
    }
}
