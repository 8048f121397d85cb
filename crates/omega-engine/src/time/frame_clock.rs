use crate::error::FrameError;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the first tick of the loop. Never decreases.
    pub elapsed: f64,

    /// Seconds since the previous tick, clamped to the clock's `max_dt`.
    /// Zero on the first tick.
    pub dt: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock fed by raw host timestamps in milliseconds.
///
/// The clock never reads the system time itself: the host scheduling primitive
/// supplies one timestamp per frame, which keeps the clock deterministic under
/// test. One clock belongs to exactly one render loop.
///
/// The baseline is captured lazily on the first tick, so the first
/// `FrameTime` always reports `elapsed == 0`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start_ms: Option<f64>,
    last_ms: f64,
    last_elapsed: f64,
    frame_index: u64,
    max_dt: f64,
}

impl FrameClock {
    /// Default upper bound for `dt`, in seconds.
    ///
    /// Keeps downstream integration stable after debugger pauses, minimization
    /// or other long stalls. `elapsed` is not affected by the clamp.
    pub const DEFAULT_MAX_DT: f64 = 0.25;

    pub fn new() -> Self {
        Self::with_max_dt(Self::DEFAULT_MAX_DT)
    }

    /// Creates a clock with a custom `dt` clamp (seconds).
    pub fn with_max_dt(max_dt: f64) -> Self {
        debug_assert!(max_dt > 0.0);
        Self {
            start_ms: None,
            last_ms: 0.0,
            last_elapsed: 0.0,
            frame_index: 0,
            max_dt,
        }
    }

    /// Returns `true` once the first timestamp has been recorded.
    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    /// Elapsed seconds reported by the most recent tick.
    pub fn elapsed(&self) -> f64 {
        self.last_elapsed
    }

    /// Advances the clock, reporting a backward or non-finite timestamp as
    /// [`FrameError::ClockRegression`].
    ///
    /// On error the clock state is left untouched.
    pub fn try_tick(&mut self, raw_ms: f64) -> Result<FrameTime, FrameError> {
        let regressed = !raw_ms.is_finite() || (self.is_started() && raw_ms < self.last_ms);
        if regressed {
            return Err(FrameError::ClockRegression {
                previous_ms: self.last_ms,
                current_ms: raw_ms,
            });
        }

        let elapsed = match self.start_ms {
            Some(start) => ((raw_ms - start) / 1000.0).max(self.last_elapsed),
            None => {
                self.start_ms = Some(raw_ms);
                0.0
            }
        };

        Ok(self.advance(raw_ms, elapsed))
    }

    /// Advances the clock, clamping regressions to the previous elapsed value.
    ///
    /// A regressed frame reports `dt == 0` and the previous `elapsed`; the
    /// clock resumes normally once the host timestamps catch up again.
    pub fn tick(&mut self, raw_ms: f64) -> FrameTime {
        match self.try_tick(raw_ms) {
            Ok(ft) => ft,
            Err(err) => {
                log::warn!("{err}; holding elapsed at {:.3}s", self.last_elapsed);
                self.advance(self.last_ms, self.last_elapsed)
            }
        }
    }

    fn advance(&mut self, raw_ms: f64, elapsed: f64) -> FrameTime {
        let dt = (elapsed - self.last_elapsed).clamp(0.0, self.max_dt);

        self.last_ms = raw_ms;
        self.last_elapsed = elapsed;

        let ft = FrameTime {
            elapsed,
            dt,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── first tick ────────────────────────────────────────────────────────

    #[test]
    fn first_tick_reports_zero() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(123_456.0);
        assert_eq!(ft.elapsed, 0.0);
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.frame_index, 0);
        assert!(clock.is_started());
    }

    #[test]
    fn elapsed_is_relative_to_first_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        let ft = clock.tick(1_016.0);
        assert!(close(ft.elapsed, 0.016));
        assert!(close(ft.dt, 0.016));
        assert_eq!(ft.frame_index, 1);
    }

    // ── monotonicity ──────────────────────────────────────────────────────

    #[test]
    fn non_decreasing_inputs_give_non_decreasing_elapsed() {
        let mut clock = FrameClock::new();
        let stamps = [5.0, 5.0, 21.7, 38.3, 38.3, 55.0, 1_000.0, 1_016.6];
        let mut prev = -1.0;
        for (i, raw) in stamps.iter().enumerate() {
            let ft = clock.tick(*raw);
            if i == 0 {
                assert_eq!(ft.elapsed, 0.0);
            }
            assert!(ft.elapsed >= prev, "elapsed went backward at {i}");
            assert!(ft.elapsed >= 0.0);
            prev = ft.elapsed;
        }
    }

    #[test]
    fn dt_is_clamped_but_elapsed_is_not() {
        let mut clock = FrameClock::with_max_dt(0.1);
        clock.tick(0.0);
        let ft = clock.tick(5_000.0);
        assert!(close(ft.elapsed, 5.0));
        assert!(close(ft.dt, 0.1));
    }

    // ── regression ────────────────────────────────────────────────────────

    #[test]
    fn try_tick_reports_regression_without_mutating() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        clock.tick(200.0);

        let err = clock.try_tick(150.0).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ClockRegression { previous_ms, current_ms }
                if previous_ms == 200.0 && current_ms == 150.0
        ));
        assert!(close(clock.elapsed(), 0.1));
    }

    #[test]
    fn tick_clamps_regression_to_previous_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        clock.tick(300.0);

        let ft = clock.tick(250.0);
        assert!(close(ft.elapsed, 0.2));
        assert_eq!(ft.dt, 0.0);

        // Resumes once the host catches up.
        let ft = clock.tick(400.0);
        assert!(close(ft.elapsed, 0.3));
    }

    #[test]
    fn non_finite_timestamp_is_a_regression() {
        let mut clock = FrameClock::new();
        assert!(clock.try_tick(f64::NAN).is_err());
        assert!(!clock.is_started());

        let ft = clock.tick(f64::INFINITY);
        assert_eq!(ft.elapsed, 0.0);
    }
}
