//! Scheduled round events
//!
//! Delays (ready banner, hit freeze, scared window, ghost release) are queue
//! entries counted down once per tick. Every entry remembers the round
//! generation it was scheduled in; the dispatcher drops entries from an older
//! round, so a new round can never be touched by a leftover timer.

use serde::{Deserialize, Serialize};

/// What happens when a timer runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Leave the ready banner and start playing
    ReadyElapsed,
    /// End of the freeze after being caught: respawn
    HitPauseElapsed,
    /// Scared window over
    ScaredExpired,
    /// Apply entry `n` of the activation schedule
    Activation(usize),
}

/// When a timer is allowed to count down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerGate {
    /// Every tick
    Always,
    /// Only ticks in which the round is active (not paused, ready or ended)
    WhileActive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    event: TimerEvent,
    remaining: u32,
    gate: TimerGate,
    generation: u32,
}

/// A timer that ran out this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub event: TimerEvent,
    pub generation: u32,
}

/// Pending timers, in scheduling order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire after `ticks` counted ticks
    pub fn schedule(&mut self, event: TimerEvent, ticks: u32, gate: TimerGate, generation: u32) {
        self.timers.push(Timer {
            event,
            remaining: ticks.max(1),
            gate,
            generation,
        });
    }

    /// Drop every pending timer matching the predicate
    pub fn cancel_where(&mut self, mut pred: impl FnMut(TimerEvent) -> bool) {
        self.timers.retain(|t| !pred(t.event));
    }

    /// Drop every pending timer for `event`
    pub fn cancel(&mut self, event: TimerEvent) {
        self.cancel_where(|e| e == event);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, event: TimerEvent) -> bool {
        self.timers.iter().any(|t| t.event == event)
    }

    /// Ticks left on the first pending timer for `event`
    pub fn remaining(&self, event: TimerEvent) -> Option<u32> {
        self.timers
            .iter()
            .find(|t| t.event == event)
            .map(|t| t.remaining)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Count down one tick and return the timers that ran out, in scheduling order
    pub fn advance(&mut self, active: bool) -> Vec<Fired> {
        let mut fired = Vec::new();
        self.timers.retain_mut(|t| {
            if t.gate == TimerGate::WhileActive && !active {
                return true;
            }
            t.remaining -= 1;
            if t.remaining == 0 {
                fired.push(Fired {
                    event: t.event,
                    generation: t.generation,
                });
                false
            } else {
                true
            }
        });
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_exact_ticks() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerEvent::ReadyElapsed, 3, TimerGate::Always, 1);
        assert!(queue.advance(false).is_empty());
        assert!(queue.advance(false).is_empty());
        assert_eq!(
            queue.advance(false),
            vec![Fired {
                event: TimerEvent::ReadyElapsed,
                generation: 1
            }]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_gated_timer_waits_for_active_ticks() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerEvent::ScaredExpired, 2, TimerGate::WhileActive, 1);
        for _ in 0..10 {
            assert!(queue.advance(false).is_empty());
        }
        assert_eq!(queue.remaining(TimerEvent::ScaredExpired), Some(2));
        assert!(queue.advance(true).is_empty());
        assert_eq!(queue.advance(true).len(), 1);
    }

    #[test]
    fn test_cancel_by_event() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerEvent::ScaredExpired, 5, TimerGate::WhileActive, 1);
        queue.schedule(TimerEvent::Activation(0), 5, TimerGate::WhileActive, 1);
        queue.schedule(TimerEvent::Activation(1), 9, TimerGate::WhileActive, 1);
        queue.cancel(TimerEvent::ScaredExpired);
        assert!(!queue.is_pending(TimerEvent::ScaredExpired));
        queue.cancel_where(|e| matches!(e, TimerEvent::Activation(_)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fired_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerEvent::Activation(5), 1, TimerGate::Always, 2);
        queue.schedule(TimerEvent::Activation(6), 1, TimerGate::Always, 2);
        let fired: Vec<_> = queue.advance(true).into_iter().map(|f| f.event).collect();
        assert_eq!(
            fired,
            vec![TimerEvent::Activation(5), TimerEvent::Activation(6)]
        );
    }

    #[test]
    fn test_zero_delay_still_waits_one_tick() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerEvent::ReadyElapsed, 0, TimerGate::Always, 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.advance(false).len(), 1);
    }
}
