//! Fixed-size ring buffer of probe outcomes.

/// Rolling history of the most recent probe outcomes for one host.
///
/// Every slot starts out as a success, so a fresh window reports a failure
/// rate of zero until failures are actually observed.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    items: Vec<bool>,
    /// Slot holding the oldest outcome, overwritten by the next `put`
    oldest: usize,
    failure_count: f64,
}

impl SlidingWindow {
    /// Create a window holding `capacity` outcomes (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: vec![true; capacity],
            oldest: 0,
            failure_count: 0.0,
        }
    }

    /// Record one outcome, evicting the oldest.
    pub fn put(&mut self, success: bool) {
        if !success {
            self.failure_count += 1.0;
        }
        let slot = self.oldest;
        if !self.items[slot] {
            self.failure_count -= 1.0;
        }
        self.items[slot] = success;
        self.oldest = (slot + 1) % self.items.len();
    }

    /// Fraction of failed outcomes currently held, in `[0, 1]`.
    pub fn failure_rate(&self) -> f64 {
        self.failure_count / self.items.len() as f64
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn failure_count(&self) -> f64 {
        self.failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_window_is_optimistic() {
        let window = SlidingWindow::new(60);
        assert_eq!(window.failure_rate(), 0.0);
        assert_eq!(window.capacity(), 60);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut window = SlidingWindow::new(0);
        assert_eq!(window.capacity(), 1);
        window.put(false);
        assert_eq!(window.failure_rate(), 1.0);
    }

    #[test]
    fn test_failures_counted() {
        let mut window = SlidingWindow::new(10);
        window.put(false);
        window.put(true);
        window.put(false);
        assert!((window.failure_rate() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_old_failures_slide_out() {
        let mut window = SlidingWindow::new(4);
        window.put(false);
        window.put(false);
        assert_eq!(window.failure_count(), 2.0);

        for _ in 0..4 {
            window.put(true);
        }
        assert_eq!(window.failure_rate(), 0.0);
    }

    #[test]
    fn test_eviction_walks_slots_in_order() {
        let mut window = SlidingWindow::new(3);
        window.put(false);
        assert_eq!(window.oldest, 1);
        window.put(true);
        window.put(true);
        assert_eq!(window.oldest, 0);

        // The failure written first is the one evicted by the fourth put.
        window.put(true);
        assert_eq!(window.failure_count(), 0.0);
        assert_eq!(window.oldest, 1);
    }

    #[test]
    fn test_all_failures_saturate() {
        let mut window = SlidingWindow::new(5);
        for _ in 0..20 {
            window.put(false);
        }
        assert_eq!(window.failure_rate(), 1.0);
    }

    fn expected_rate(outcomes: &[bool], capacity: usize) -> f64 {
        let start = outcomes.len().saturating_sub(capacity);
        let failures = outcomes[start..].iter().filter(|ok| !**ok).count();
        failures as f64 / capacity as f64
    }

    proptest! {
        #[test]
        fn prop_rate_tracks_recent_outcomes(
            capacity in 1usize..32,
            outcomes in proptest::collection::vec(any::<bool>(), 0..128),
        ) {
            let mut window = SlidingWindow::new(capacity);
            for ok in &outcomes {
                window.put(*ok);
            }
            let expected = expected_rate(&outcomes, capacity);
            prop_assert!((window.failure_rate() - expected).abs() < 1e-9);
            prop_assert!((0.0..=1.0).contains(&window.failure_rate()));
        }
    }
}
