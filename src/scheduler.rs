//! Roll animation scheduler.
//!
//! A roll flashes faces from a precomputed cosmetic sequence, slowing down as it
//! nears the end, then commits a freshly drawn result into the history ledger.
//! The scheduler never owns a clock: every call takes a millisecond timestamp and
//! the next frame is requested through a [`Ticker`], so tests can drive a whole
//! roll with synthetic timestamps.

use rand::Rng;
use rand::rngs::SmallRng;

use crate::dice::{DieType, FaceGenerator};
use crate::history::HistoryLedger;
use crate::settings::RollDuration;

/// Cosmetic faces precomputed per roll.
pub const SEQUENCE_LEN: usize = 100;
pub const BASE_INTERVAL_MS: f64 = 50.0;
pub const MAX_INTERVAL_MS: f64 = 300.0;
/// Rolls shorter than this keep the base interval throughout.
pub const DYNAMIC_THRESHOLD_MS: f64 = 4_000.0;
/// Length of the closing phase pinned at `MAX_INTERVAL_MS`.
pub const FINAL_PHASE_MS: f64 = 500.0;

/// Source of frame callbacks. `request_tick` asks for one `RollScheduler::tick`
/// call on the next frame; `cancel` drops a pending request.
pub trait Ticker {
    fn request_tick(&mut self);
    fn cancel(&mut self);
}

/// Minimum time between two displayed-face updates.
pub fn display_interval_ms(duration_ms: f64, elapsed_ms: f64) -> f64 {
    if duration_ms < DYNAMIC_THRESHOLD_MS {
        return BASE_INTERVAL_MS;
    }
    if duration_ms - elapsed_ms <= FINAL_PHASE_MS {
        return MAX_INTERVAL_MS;
    }
    let phase = (elapsed_ms / (duration_ms - FINAL_PHASE_MS)).min(1.0);
    BASE_INTERVAL_MS + (MAX_INTERVAL_MS - BASE_INTERVAL_MS) * phase
}

// --- Session -----------------------------------------------------------------

/// One animation run, from trigger to completion.
#[derive(Clone, Debug)]
pub struct RollSession {
    die: DieType,
    start_ms: f64,
    duration_ms: f64,
    sequence: Vec<u8>,
    index: usize,
    last_update_ms: f64,
}

impl RollSession {
    fn new(die: DieType, sequence: Vec<u8>, now: f64, duration: RollDuration) -> Self {
        Self {
            die,
            start_ms: now,
            duration_ms: duration.as_millis(),
            sequence,
            index: 0,
            last_update_ms: now,
        }
    }

    pub fn die(&self) -> DieType {
        self.die
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start_ms).max(0.0)
    }

    /// Linear progress in [0,1].
    pub fn progress(&self, now: f64) -> f64 {
        (self.elapsed(now) / self.duration_ms).min(1.0)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Cosmetic face currently on display.
    pub fn displayed_face(&self) -> u8 {
        self.sequence[self.index]
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Moves the displayed index if the current interval has passed. Returns true
    /// when the index was updated.
    fn advance(&mut self, now: f64) -> bool {
        let elapsed = self.elapsed(now);
        let interval = display_interval_ms(self.duration_ms, elapsed);
        if now - self.last_update_ms < interval {
            return false;
        }
        let progress = self.progress(now);
        let idx = (progress * self.sequence.len() as f64).floor() as usize;
        self.index = idx.min(self.sequence.len() - 1);
        self.last_update_ms = now;
        true
    }
}

// --- Scheduler ---------------------------------------------------------------

/// What a tick did, for the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// No roll in flight.
    Idle,
    /// Still rolling, displayed face unchanged.
    Waiting,
    /// Displayed face moved.
    Advanced { face: u8 },
    /// Roll finished and `result` was committed.
    Completed { result: u8 },
}

pub struct RollScheduler<T: Ticker, R: Rng = SmallRng> {
    ticker: T,
    generator: FaceGenerator<R>,
    die: DieType,
    session: Option<RollSession>,
    result: Option<u8>,
    history: HistoryLedger,
}

impl<T: Ticker> RollScheduler<T, SmallRng> {
    pub fn new(ticker: T) -> Self {
        Self::with_generator(ticker, FaceGenerator::from_entropy())
    }
}

impl<T: Ticker, R: Rng> RollScheduler<T, R> {
    pub fn with_generator(ticker: T, generator: FaceGenerator<R>) -> Self {
        Self {
            ticker,
            generator,
            die: DieType::default(),
            session: None,
            result: None,
            history: HistoryLedger::new(),
        }
    }

    pub fn die(&self) -> DieType {
        self.die
    }

    /// Changes the active die. Ignored while a roll is in flight.
    pub fn select_die(&mut self, die: DieType) -> bool {
        if self.is_rolling() {
            log::debug!("die selection ignored while rolling");
            return false;
        }
        self.die = die;
        true
    }

    pub fn is_rolling(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&RollSession> {
        self.session.as_ref()
    }

    /// Cosmetic face while rolling.
    pub fn displayed_face(&self) -> Option<u8> {
        self.session.as_ref().map(RollSession::displayed_face)
    }

    /// Last committed result; cleared when a new roll starts.
    pub fn result(&self) -> Option<u8> {
        self.result
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn progress(&self, now: f64) -> Option<f64> {
        self.session.as_ref().map(|s| s.progress(now))
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Starts a roll of the active die. Returns false (and changes nothing) if a
    /// roll is already in flight.
    pub fn trigger(&mut self, now: f64, duration: RollDuration) -> bool {
        if self.session.is_some() {
            log::debug!("roll trigger ignored: already rolling");
            return false;
        }
        let sequence = self.generator.sequence(self.die, SEQUENCE_LEN);
        log::debug!(
            "starting {} roll for {} s",
            self.die.name(),
            duration.seconds()
        );
        self.result = None;
        self.session = Some(RollSession::new(self.die, sequence, now, duration));
        self.ticker.request_tick();
        true
    }

    pub fn tick(&mut self, now: f64) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };
        let advanced = session.advance(now);
        let face = session.displayed_face();
        if session.progress(now) < 1.0 {
            self.ticker.request_tick();
            return if advanced {
                TickOutcome::Advanced { face }
            } else {
                TickOutcome::Waiting
            };
        }
        TickOutcome::Completed {
            result: self.complete(),
        }
    }

    /// Abandons the roll in flight without committing anything. Returns true if a
    /// roll was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        self.ticker.cancel();
        log::debug!("roll cancelled");
        true
    }

    // The committed value is drawn fresh; it may differ from the last cosmetic face.
    fn complete(&mut self) -> u8 {
        let die = self.session.take().map_or(self.die, |s| s.die());
        let value = self.generator.roll(die);
        self.result = Some(value);
        self.history.record(die, value);
        log::debug!("{} roll finished: {}", die.name(), value);
        value
    }
}

impl<T: Ticker, R: Rng> Drop for RollScheduler<T, R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[derive(Default)]
    struct CountingTicker {
        requested: usize,
        cancelled: usize,
    }

    impl Ticker for CountingTicker {
        fn request_tick(&mut self) {
            self.requested += 1;
        }
        fn cancel(&mut self) {
            self.cancelled += 1;
        }
    }

    fn secs(n: u8) -> RollDuration {
        RollDuration::new(n).unwrap()
    }

    fn scheduler() -> RollScheduler<CountingTicker> {
        RollScheduler::with_generator(CountingTicker::default(), FaceGenerator::seeded(3))
    }

    #[test]
    fn short_rolls_keep_base_interval() {
        for elapsed in [0.0, 500.0, 1_500.0, 1_999.0, 2_000.0] {
            assert_eq!(display_interval_ms(2_000.0, elapsed), BASE_INTERVAL_MS);
        }
    }

    #[test]
    fn long_rolls_slow_down_then_pin() {
        assert_abs_diff_eq!(display_interval_ms(5_000.0, 0.0), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(display_interval_ms(5_000.0, 2_250.0), 175.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            display_interval_ms(5_000.0, 4_000.0),
            50.0 + 250.0 * 4_000.0 / 4_500.0,
            epsilon = 1e-9
        );
        for elapsed in [4_500.0, 4_750.0, 5_000.0, 6_000.0] {
            assert_eq!(display_interval_ms(5_000.0, elapsed), MAX_INTERVAL_MS);
        }
    }

    #[test]
    fn interval_never_decreases_within_a_roll() {
        let mut prev = 0.0;
        let mut t = 0.0;
        while t <= 10_000.0 {
            let i = display_interval_ms(10_000.0, t);
            assert!(i >= prev);
            prev = i;
            t += 10.0;
        }
    }

    #[test]
    fn trigger_starts_session_and_requests_tick() {
        let mut s = scheduler();
        assert!(s.trigger(1_000.0, secs(5)));
        assert!(s.is_rolling());
        let session = s.session().unwrap();
        assert_eq!(session.sequence().len(), SEQUENCE_LEN);
        assert_eq!(session.duration_ms(), 5_000.0);
        assert_eq!(session.index(), 0);
        assert_eq!(s.ticker().requested, 1);
    }

    #[test]
    fn index_only_moves_after_interval() {
        let mut s = scheduler();
        s.trigger(0.0, secs(2));
        assert_eq!(s.tick(16.0), TickOutcome::Waiting);
        assert_eq!(s.session().unwrap().index(), 0);
        assert!(matches!(s.tick(125.0), TickOutcome::Advanced { .. }));
        // floor(125 / 2000 * 100)
        assert_eq!(s.session().unwrap().index(), 6);
        assert_eq!(s.tick(150.0), TickOutcome::Waiting);
        assert_eq!(s.session().unwrap().index(), 6);
        assert!(matches!(s.tick(250.0), TickOutcome::Advanced { .. }));
        assert_eq!(s.session().unwrap().index(), 12);
    }

    #[test]
    fn completion_commits_into_active_bucket() {
        let mut s = scheduler();
        s.select_die(DieType::D16);
        s.trigger(0.0, secs(1));
        assert!(matches!(s.tick(500.0), TickOutcome::Advanced { .. }));
        let TickOutcome::Completed { result } = s.tick(1_000.0) else {
            panic!("roll should complete at its duration");
        };
        assert!((1..=16).contains(&result));
        assert_eq!(s.result(), Some(result));
        assert_eq!(s.history().read(DieType::D16), &[result]);
        assert!(!s.is_rolling());
        assert_eq!(s.tick(1_100.0), TickOutcome::Idle);
    }

    #[test]
    fn die_selection_locked_while_rolling() {
        let mut s = scheduler();
        s.trigger(0.0, secs(3));
        assert!(!s.select_die(DieType::D20));
        assert_eq!(s.die(), DieType::D6);
        s.cancel();
        assert!(s.select_die(DieType::D20));
    }

    #[test]
    fn cancel_is_noop_when_idle() {
        let mut s = scheduler();
        assert!(!s.cancel());
        assert_eq!(s.ticker().cancelled, 0);
    }

    #[test]
    fn new_roll_clears_previous_result() {
        let mut s = scheduler();
        s.trigger(0.0, secs(1));
        s.tick(1_000.0);
        assert!(s.result().is_some());
        s.trigger(2_000.0, secs(1));
        assert_eq!(s.result(), None);
    }
}
