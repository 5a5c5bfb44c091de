//! Interval timers driven by elapsed host time
//!
//! The game never reads a clock. The host reports elapsed milliseconds and
//! the timer set replays every firing that falls inside that window, in
//! chronological order (ties fire in the order the timers were started).

/// Handle to a running timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Main simulation tick
    Tick,
    /// Explosion animation for the crash event at this index
    Explosion { event: usize },
}

/// A single firing returned by [`Timers::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    /// 1-based count of firings so far
    pub count: u32,
    /// This was the timer's final firing; it has been removed
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct Interval {
    id: TimerId,
    kind: TimerKind,
    period_ms: u32,
    until_next_ms: u32,
    fired: u32,
    /// `None` repeats until cancelled
    limit: Option<u32>,
}

/// Set of active interval timers
#[derive(Debug, Default)]
pub struct Timers {
    active: Vec<Interval>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer firing every `period_ms`, `limit` times (or forever)
    pub fn start(&mut self, kind: TimerKind, period_ms: u32, limit: Option<u32>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period_ms = period_ms.max(1);
        self.active.push(Interval {
            id,
            kind,
            period_ms,
            until_next_ms: period_ms,
            fired: 0,
            limit,
        });
        id
    }

    /// Stop a timer; cancelling an unknown or finished timer is a no-op
    pub fn cancel(&mut self, id: TimerId) {
        self.active.retain(|t| t.id != id);
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Consume time from `budget_ms` up to the next firing.
    ///
    /// Returns the firing, or `None` once nothing is due within the budget
    /// (the remaining budget is then spent and set to zero).
    pub fn advance(&mut self, budget_ms: &mut u32) -> Option<Fired> {
        let Some(due) = self
            .active
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.until_next_ms, t.id))
            .map(|(i, _)| i)
        else {
            *budget_ms = 0;
            return None;
        };

        let wait = self.active[due].until_next_ms;
        if wait > *budget_ms {
            let spent = *budget_ms;
            for timer in &mut self.active {
                timer.until_next_ms -= spent;
            }
            *budget_ms = 0;
            return None;
        }

        *budget_ms -= wait;
        for timer in &mut self.active {
            timer.until_next_ms -= wait;
        }

        let timer = &mut self.active[due];
        timer.fired += 1;
        timer.until_next_ms = timer.period_ms;
        let fired = Fired {
            id: timer.id,
            kind: timer.kind,
            count: timer.fired,
            finished: timer.limit.is_some_and(|limit| timer.fired >= limit),
        };
        if fired.finished {
            self.active.remove(due);
        }
        Some(fired)
    }
}
