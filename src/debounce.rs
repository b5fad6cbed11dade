// Collapses a burst of events into one, delivered once the events have been
// quiet for the configured delay. Times are in milliseconds from any monotonic clock.

#[derive(Clone, Debug, PartialEq)]
pub enum Wake<T> {
    // The quiet period is over; here is the last value
    Ready(T),
    // Still inside the quiet period; check again after this many ms
    Wait(f64),
    Idle,
}

pub struct Debounce<T> {
    delay_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay_ms: f64) -> Debounce<T> {
        Debounce {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    // A newer event replaces the pending one and restarts the quiet period
    pub fn trigger(&mut self, now: f64, value: T) {
        self.pending = Some((now + self.delay_ms, value));
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Called whenever a timer fires. Timers may fire before the deadline moved
    /// by a later trigger, so the caller re-arms for the remaining time on `Wait`.
    pub fn wake(&mut self, now: f64) -> Wake<T> {
        match self.deadline() {
            None => Wake::Idle,
            Some(deadline) if now < deadline => Wake::Wait(deadline - now),
            Some(_) => match self.pending.take() {
                Some((_, value)) => Wake::Ready(value),
                None => Wake::Idle,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_event_fires_after_delay() {
        let mut debounce = Debounce::new(200.0);
        assert_eq!(debounce.wake(0.0), Wake::Idle);
        debounce.trigger(1000.0, "a");
        assert_eq!(debounce.wake(1100.0), Wake::Wait(100.0));
        assert_eq!(debounce.wake(1200.0), Wake::Ready("a"));
        assert_eq!(debounce.wake(1500.0), Wake::Idle);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let mut debounce = Debounce::new(200.0);
        let mut fired = Vec::new();
        let mut now = 0.0;
        for i in 0..10 {
            debounce.trigger(now, i);
            if let Wake::Ready(v) = debounce.wake(now) {
                fired.push(v);
            }
            now += 5.0;
        }
        let last_event = 45.0;
        while now < 1000.0 {
            if let Wake::Ready(v) = debounce.wake(now) {
                fired.push(v);
                assert!(now >= last_event + 200.0 && now < last_event + 210.0);
            }
            now += 5.0;
        }
        assert_eq!(fired, vec![9]);
    }

    #[test]
    fn early_wake_reports_remaining_time() {
        let mut debounce = Debounce::new(200.0);
        debounce.trigger(0.0, 1u8);
        debounce.trigger(150.0, 2u8);
        // a timer armed by the first event fires at 200, before the moved deadline
        assert_eq!(debounce.wake(200.0), Wake::Wait(150.0));
        assert_eq!(debounce.deadline(), Some(350.0));
        assert_eq!(debounce.wake(350.0), Wake::Ready(2));
    }
}
