use std::time::{Duration, Instant};
use tracing::debug;

const CURSOR_HALF_PERIOD: Duration = Duration::from_millis(400);

/// Shows a fixed list one entry at a time, `delay` apart, the first one
/// `delay` after start. Dropping it abandons whatever is still pending.
pub struct Reveal<T> {
    source: Vec<T>,
    delay: Duration,
    started: Instant,
    shown: usize,
}

impl<T> Reveal<T> {
    pub fn start(source: Vec<T>, delay: Duration, now: Instant) -> Self {
        debug!(entries = source.len(), delay_ms = delay.as_millis() as u64, "reveal started");

        Self {
            source,
            delay,
            started: now,
            shown: 0,
        }
    }

    /// Reveals everything due by `now`. Returns how many entries became visible.
    pub fn advance(&mut self, now: Instant) -> usize {
        let due = self.due_at(now);
        let before = self.shown;

        while self.shown < due {
            self.shown += 1;
            debug!(index = self.shown - 1, "entry revealed");
        }

        self.shown - before
    }

    pub fn revealed(&self) -> &[T] {
        &self.source[..self.shown]
    }

    pub fn is_complete(&self) -> bool {
        self.shown == self.source.len()
    }

    /// Blink phase of the prompt cursor drawn after the revealed lines.
    pub fn cursor_on(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_millis() / CURSOR_HALF_PERIOD.as_millis()) % 2 == 0
    }

    fn due_at(&self, now: Instant) -> usize {
        if self.delay.is_zero() {
            return self.source.len();
        }

        let elapsed = now.saturating_duration_since(self.started);
        let ticks = elapsed.as_nanos() / self.delay.as_nanos();

        usize::try_from(ticks)
            .unwrap_or(usize::MAX)
            .min(self.source.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::content::SESSION;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn session_reveals_on_schedule() {
        let start = Instant::now();
        let mut reveal = Reveal::start(SESSION.to_vec(), ms(1000), start);

        reveal.advance(start + ms(500));
        assert!(reveal.revealed().is_empty());

        reveal.advance(start + ms(1500));
        assert_eq!(reveal.revealed().len(), 1);
        assert_eq!(reveal.revealed()[0].input, "whoami");
        assert_eq!(reveal.revealed()[0].output, "Bhavika Salunkhe");

        reveal.advance(start + ms(3500));
        let inputs: Vec<_> = reveal.revealed().iter().map(|line| line.input).collect();
        assert_eq!(inputs, vec!["whoami", "cat skills.txt", "git status"]);
        assert!(reveal.is_complete());
    }

    #[test]
    fn stalled_loop_catches_up_in_order() {
        let start = Instant::now();
        let mut reveal = Reveal::start(vec!['a', 'b', 'c', 'd'], ms(100), start);

        assert_eq!(reveal.advance(start + ms(250)), 2);
        assert_eq!(reveal.advance(start + ms(260)), 0);
        assert_eq!(reveal.advance(start + ms(10_000)), 2);
        assert_eq!(reveal.revealed(), &['a', 'b', 'c', 'd']);
    }

    #[test]
    fn zero_delay_shows_everything() {
        let start = Instant::now();
        let mut reveal = Reveal::start(vec![1, 2], Duration::ZERO, start);

        reveal.advance(start);
        assert_eq!(reveal.revealed(), &[1, 2]);
    }

    #[test]
    fn cursor_blinks() {
        let start = Instant::now();
        let reveal = Reveal::start(Vec::<u8>::new(), ms(1000), start);

        assert!(reveal.cursor_on(start));
        assert!(!reveal.cursor_on(start + ms(500)));
        assert!(reveal.cursor_on(start + ms(800)));
    }

    proptest! {
        #[test]
        fn revealed_count_follows_elapsed_time(
            len in 0usize..10,
            delay in 1u64..2000,
            mut times in prop::collection::vec(0u64..30_000, 1..20),
        ) {
            times.sort_unstable();

            let start = Instant::now();
            let source: Vec<usize> = (0..len).collect();
            let mut reveal = Reveal::start(source.clone(), ms(delay), start);

            for t in times {
                reveal.advance(start + ms(t));

                let expected = ((t / delay) as usize).min(len);
                prop_assert_eq!(reveal.revealed(), &source[..expected]);
            }
        }
    }
}
