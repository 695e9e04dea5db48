//! Cancelable wall-clock interval timers
//!
//! Three independent cadences drive the game (emission, spawn,
//! difficulty). Each schedule is an explicit value owned by the session
//! state and polled once per frame with the frame's timestamp, so cadence
//! stays tied to wall-clock time rather than frame rate, and canceling or
//! replacing a schedule is a plain method call instead of a leaked handle.

/// Upper bound on catch-up fires per poll. If the tab was hidden long
/// enough to owe more than this, the missed fires are dropped and the
/// schedule resyncs to the present.
const MAX_CATCHUP: u32 = 4;

/// A re-armable interval timer driven by caller-supplied timestamps
#[derive(Debug, Clone)]
pub struct Timer {
    period_ms: f64,
    next_fire_ms: f64,
    armed: bool,
}

impl Timer {
    /// Armed timer whose first fire is one period after `now_ms`
    pub fn new(period_ms: f64, now_ms: f64) -> Self {
        Self {
            period_ms,
            next_fire_ms: now_ms + period_ms,
            armed: true,
        }
    }

    /// Number of periods that have elapsed since the last poll (0 if not
    /// yet due or canceled), capped at `MAX_CATCHUP`.
    pub fn fire(&mut self, now_ms: f64) -> u32 {
        if !self.armed {
            return 0;
        }
        let mut fires = 0;
        while now_ms >= self.next_fire_ms && fires < MAX_CATCHUP {
            self.next_fire_ms += self.period_ms;
            fires += 1;
        }
        if now_ms >= self.next_fire_ms {
            // Still behind after the cap: drop the backlog.
            self.next_fire_ms = now_ms + self.period_ms;
        }
        fires
    }

    /// Fire at most once if due. Used for manual triggers that share the
    /// schedule's debounce: a successful consume locks the timer for a
    /// full period.
    pub fn consume(&mut self, now_ms: f64) -> bool {
        if self.armed && now_ms >= self.next_fire_ms {
            self.next_fire_ms = now_ms + self.period_ms;
            true
        } else {
            false
        }
    }

    /// Replace the schedule with a new period starting at `now_ms`.
    /// The old schedule is gone; nothing stacks.
    pub fn restart(&mut self, period_ms: f64, now_ms: f64) {
        self.period_ms = period_ms;
        self.next_fire_ms = now_ms + period_ms;
        self.armed = true;
    }

    /// Stop firing until restarted
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}
