use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Search term with a trailing-edge debounce.
///
/// `live` follows every keystroke and feeds the input control. `settled` only
/// catches up once `quiet_period` has passed without another update, and is
/// what requests are built from. Every update restarts the quiet period, there
/// is no maximum wait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    live: String,
    settled: String,
    last_update: Option<Instant>,
    quiet_period: Duration,
}

impl SearchState {
    pub fn new(quiet_period: Duration) -> Self {
        Self::with_term(String::new(), quiet_period)
    }

    /// Starts already settled on `term`.
    pub fn with_term(term: impl Into<String>, quiet_period: Duration) -> Self {
        let term = term.into();
        Self {
            live: term.clone(),
            settled: term,
            last_update: None,
            quiet_period,
        }
    }

    pub fn live(&self) -> &str {
        &self.live
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn update(&mut self, term: impl Into<String>, now: Instant) {
        self.live = term.into();
        self.last_update = Some(now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.update(String::new(), now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_update.is_some()
    }

    /// When the pending update settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.last_update.map(|at| at + self.quiet_period)
    }

    /// Settles the live term if the quiet period is over.  Returns the new
    /// settled term only when it actually changed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match self.deadline() {
            Some(deadline) if deadline <= now => {
                self.last_update = None;
                if self.live != self.settled {
                    self.settled = self.live.clone();
                    Some(&self.settled)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn rapid_updates_settle_on_the_last_term() {
        let t0 = Instant::now();
        let mut search = SearchState::new(DEFAULT_QUIET_PERIOD);

        search.update("g", at(t0, 0));
        search.update("gi", at(t0, 50));
        search.update("gib", at(t0, 100));
        assert_eq!(search.live(), "gib");

        // "g" would have settled here without the restarts.
        assert_eq!(search.poll(at(t0, 300)), None);
        assert_eq!(search.poll(at(t0, 399)), None);
        assert_eq!(search.settled(), "");

        assert_eq!(search.poll(at(t0, 400)), Some("gib"));
        assert_eq!(search.settled(), "gib");
        assert!(!search.is_pending());
    }

    #[test]
    fn deadline_moves_with_each_update() {
        let t0 = Instant::now();
        let mut search = SearchState::new(Duration::from_millis(300));
        assert_eq!(search.deadline(), None);
        search.update("f", t0);
        assert_eq!(search.deadline(), Some(at(t0, 300)));
        search.update("fe", at(t0, 200));
        assert_eq!(search.deadline(), Some(at(t0, 500)));
    }

    #[test]
    fn typing_back_to_the_settled_term_settles_silently() {
        let t0 = Instant::now();
        let mut search = SearchState::with_term("strat", DEFAULT_QUIET_PERIOD);
        search.update("strato", t0);
        search.update("strat", at(t0, 100));
        assert_eq!(search.poll(at(t0, 400)), None);
        assert!(!search.is_pending());
        assert_eq!(search.settled(), "strat");
    }

    #[test]
    fn clear_settles_on_empty_term() {
        let t0 = Instant::now();
        let mut search = SearchState::with_term("tele", DEFAULT_QUIET_PERIOD);
        search.clear(t0);
        assert_eq!(search.live(), "");
        assert_eq!(search.poll(at(t0, 300)), Some(""));
    }
}
