//! Deadline timers owned by the entity that scheduled them
//!
//! Delayed state changes (cooldowns, homing arm, pulse windows, splits) are
//! stored as a deadline plus an action tag and drained during the owner's own
//! step. An entity that is removed takes its pending actions with it.

/// Pending actions keyed by deadline (milliseconds)
#[derive(Debug, Clone)]
pub struct Timers<A> {
    pending: Vec<(f64, A)>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to become due `delay` ms after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, action: A) {
        self.pending.push((now + delay, action));
    }

    /// Remove and return every action whose deadline has passed, in scheduling order
    pub fn take_due(&mut self, now: f64) -> Vec<A> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                due.push(self.pending.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Shoot gate: closed on fire, reopens after a fixed delay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    ready: bool,
    reopen_at: f64,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self {
            ready: true,
            reopen_at: 0.0,
        }
    }
}

impl Cooldown {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Reopen the gate once its deadline has passed
    pub fn update(&mut self, now: f64) {
        if !self.ready && now >= self.reopen_at {
            self.ready = true;
        }
    }

    /// Close the gate and return true if it was open
    pub fn try_fire(&mut self, now: f64, delay: f64) -> bool {
        self.update(now);
        if !self.ready {
            return false;
        }
        self.ready = false;
        self.reopen_at = now + delay;
        true
    }
}
