use std::time::{Duration, Instant};

/// Computes tick deadlines for a target tick rate.
///
/// The pacer never sleeps; the backend's event pump waits until the deadline.
/// When the loop falls more than one interval behind, the schedule restarts
/// from now instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct TickPacer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl TickPacer {
    /// `fps == 0` disables pacing.
    pub fn new(fps: u32) -> Self {
        let interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        Self { interval, next: None }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Returns the deadline the next tick should wait for, or `None` when
    /// uncapped. The first tick is due immediately.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.next_deadline_at(Instant::now())
    }

    fn next_deadline_at(&mut self, now: Instant) -> Option<Instant> {
        let interval = self.interval?;

        let due = match self.next {
            Some(due) if now <= due + interval => due,
            _ => now,
        };
        self.next = Some(due + interval);
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_has_no_deadline() {
        let mut pacer = TickPacer::new(0);
        assert!(pacer.interval().is_none());
        assert!(pacer.next_deadline().is_none());
    }

    #[test]
    fn deadlines_advance_by_interval() {
        let mut pacer = TickPacer::new(50);
        let t0 = Instant::now();

        assert_eq!(pacer.next_deadline_at(t0), Some(t0));
        assert_eq!(pacer.next_deadline_at(t0), Some(t0 + Duration::from_millis(20)));
        assert_eq!(
            pacer.next_deadline_at(t0 + Duration::from_millis(21)),
            Some(t0 + Duration::from_millis(40))
        );
    }

    #[test]
    fn falling_behind_restarts_schedule() {
        let mut pacer = TickPacer::new(50);
        let t0 = Instant::now();
        pacer.next_deadline_at(t0);

        let late = t0 + Duration::from_secs(1);
        assert_eq!(pacer.next_deadline_at(late), Some(late));
        assert_eq!(pacer.next_deadline_at(late), Some(late + Duration::from_millis(20)));
    }
}
