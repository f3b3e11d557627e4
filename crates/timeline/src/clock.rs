use std::time::Duration;

/// Fixed slot every clip occupies on the synthetic timeline, in seconds.
pub const CLIP_SECONDS: f64 = 5.0;

/// Seconds the playhead advances per tick while playing.
pub const TICK_SECONDS: f64 = 0.1;

/// Cadence the host pumps [`PlaybackClock::tick`] at while playing.
pub const TICK_CADENCE: Duration = Duration::from_millis(100);

pub fn total_duration(clip_count: usize) -> f64 {
    clip_count as f64 * CLIP_SECONDS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Timer-driven playhead over the synthetic timeline. Owns only its own
/// state; sequence length is read per call and never mutated from here.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    state: PlaybackState,
    current_time: f64,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            state: PlaybackState::Stopped,
            current_time: 0.0,
        }
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Flip Stopped <-> Playing. An empty sequence has zero duration, so the
    /// Playing transition is refused rather than entering a loop that resets
    /// on every tick. Toggling while playing pauses in place.
    pub fn toggle(&mut self, clip_count: usize) {
        match self.state {
            PlaybackState::Playing => self.state = PlaybackState::Stopped,
            PlaybackState::Stopped => {
                if total_duration(clip_count) > 0.0 {
                    self.state = PlaybackState::Playing;
                }
            }
        }
    }

    /// Advance one tick while playing; a stopped clock ignores ticks, which
    /// makes pumping this at [`TICK_CADENCE`] unconditionally safe. Reaching
    /// the end wraps the playhead to the start and stops (no looping).
    /// Returns whether the displayed position changed.
    pub fn tick(&mut self, clip_count: usize) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.current_time += TICK_SECONDS;
        if self.current_time >= total_duration(clip_count) {
            self.current_time = 0.0;
            self.state = PlaybackState::Stopped;
        }
        true
    }

    /// Scrub to an absolute position, clamped into `[0, total_duration]`.
    pub fn seek(&mut self, seconds: f64, clip_count: usize) {
        self.current_time = seconds.clamp(0.0, total_duration(clip_count));
    }

    /// Playhead position as a fraction of the total, for cursor layout.
    /// Zero-duration timelines report 0 instead of dividing by zero.
    pub fn progress(&self, clip_count: usize) -> f64 {
        let total = total_duration(clip_count);
        if total <= 0.0 {
            return 0.0;
        }
        (self.current_time / total).clamp(0.0, 1.0)
    }
}

/// Render seconds as `m:ss` with floor semantics: 65.4 -> "1:05". Minutes
/// are unpadded, seconds zero-padded to two digits.
pub fn format_clock_time(seconds: f64) -> String {
    let whole = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_refuses_empty_sequence() {
        let mut clock = PlaybackClock::new();
        clock.toggle(0);
        assert_eq!(clock.state(), PlaybackState::Stopped);
        clock.toggle(3);
        assert!(clock.is_playing());
        clock.toggle(3);
        assert_eq!(clock.state(), PlaybackState::Stopped);
    }

    #[test]
    fn tick_advances_by_fixed_step() {
        let mut clock = PlaybackClock::new();
        clock.toggle(2);
        assert!(clock.tick(2));
        assert!((clock.current_time() - TICK_SECONDS).abs() < 1e-9);
    }

    #[test]
    fn reaching_the_end_wraps_and_stops() {
        // Two clips -> total 10s. One tick past 9.95 crosses the end.
        let mut clock = PlaybackClock::new();
        clock.seek(9.95, 2);
        clock.toggle(2);
        assert!(clock.tick(2));
        assert_eq!(clock.current_time(), 0.0);
        assert_eq!(clock.state(), PlaybackState::Stopped);
    }

    #[test]
    fn stopped_clock_ignores_ticks() {
        let mut clock = PlaybackClock::new();
        assert!(!clock.tick(4));
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn seek_clamps_into_range() {
        let mut clock = PlaybackClock::new();
        clock.seek(100.0, 1);
        assert_eq!(clock.current_time(), CLIP_SECONDS);
        clock.seek(-2.0, 1);
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn progress_is_guarded_against_empty_timelines() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.progress(0), 0.0);
        clock.seek(2.5, 1);
        assert!((clock.progress(1) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn clock_time_formatting_uses_floor() {
        assert_eq!(format_clock_time(0.0), "0:00");
        assert_eq!(format_clock_time(65.0), "1:05");
        assert_eq!(format_clock_time(65.4), "1:05");
        assert_eq!(format_clock_time(3599.0), "59:59");
    }
}
