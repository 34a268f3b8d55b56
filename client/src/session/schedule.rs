//! Idle-timeout and re-validation bookkeeping for the provider's single task.
//!
//! DESIGN
//! ======
//! The provider runs one timer loop and asks this struct what to do on every
//! tick. Time is passed in as milliseconds so the rules are testable without
//! a clock; the browser feeds `Date.now()`.
//!
//! The idle latch fires at most once per idle period: after `IdleLogout` is
//! returned, nothing fires again until activity is recorded or the schedule
//! is reset by a new login.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use crate::config::SessionConfig;

/// Action requested by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Nothing,
    Revalidate,
    IdleLogout,
}

#[derive(Clone, Debug)]
pub struct SessionSchedule {
    idle_timeout_ms: u64,
    revalidate_every_ms: u64,
    last_activity_ms: u64,
    last_validated_ms: u64,
    idle_fired: bool,
}

impl SessionSchedule {
    #[must_use]
    pub fn new(config: &SessionConfig, now_ms: u64) -> Self {
        Self {
            idle_timeout_ms: duration_ms(config.idle_timeout),
            revalidate_every_ms: duration_ms(config.revalidate_every),
            last_activity_ms: now_ms,
            last_validated_ms: now_ms,
            idle_fired: false,
        }
    }

    /// User input seen; restart the idle period.
    pub fn record_activity(&mut self, now_ms: u64) {
        self.last_activity_ms = self.last_activity_ms.max(now_ms);
        self.idle_fired = false;
    }

    pub fn mark_validated(&mut self, now_ms: u64) {
        self.last_validated_ms = now_ms;
    }

    /// Start fresh after a login.
    pub fn reset(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        self.last_validated_ms = now_ms;
        self.idle_fired = false;
    }

    /// Decide what the scheduled task should do at `now_ms`.
    pub fn tick(&mut self, now_ms: u64, authenticated: bool) -> Tick {
        if !authenticated {
            return Tick::Nothing;
        }
        if !self.idle_fired && now_ms.saturating_sub(self.last_activity_ms) >= self.idle_timeout_ms {
            self.idle_fired = true;
            return Tick::IdleLogout;
        }
        if self.idle_fired {
            return Tick::Nothing;
        }
        if now_ms.saturating_sub(self.last_validated_ms) >= self.revalidate_every_ms {
            self.last_validated_ms = now_ms;
            return Tick::Revalidate;
        }
        Tick::Nothing
    }
}

fn duration_ms(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Wall-clock milliseconds since the Unix epoch.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now().max(0.0) as u64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, duration_ms)
    }
}
