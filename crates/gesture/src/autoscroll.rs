use std::time::Duration;

use crate::ScrollViewport;

/// Distance from a viewport edge, in pointer units, inside which a drag
/// starts scrolling.
pub const EDGE_THRESHOLD: f32 = 50.0;

/// Units scrolled per tick while a direction is active.
pub const SCROLL_STEP: f32 = 5.0;

/// Cadence the host pumps [`AutoScroll::tick`] at during a gesture (~60/s).
pub const SCROLL_CADENCE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Left,
    Right,
    #[default]
    None,
}

/// Fixed-cadence task owned by a controller. `start`/`stop` are idempotent
/// so start/stop races cannot double a loop or cancel a missing one; the
/// host pumps ticks at the task's cadence while it is running.
#[derive(Debug, Clone)]
pub struct TickTask {
    cadence: Duration,
    running: bool,
}

impl TickTask {
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }
}

/// Scrolls the clipped timeline strip while a reorder gesture hovers near
/// one of its edges. The direction is reclassified on every move event; the
/// tick loop exists only between gesture start and end.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    direction: ScrollDirection,
    task: TickTask,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            direction: ScrollDirection::None,
            task: TickTask::new(SCROLL_CADENCE),
        }
    }
}

impl AutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.direction = ScrollDirection::None;
        self.task.start();
    }

    pub fn stop(&mut self) {
        self.task.stop();
        self.direction = ScrollDirection::None;
    }

    pub fn is_active(&self) -> bool {
        self.task.is_running()
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Reclassify against the current viewport edges. Never cached: every
    /// move event lands here.
    pub fn update_direction(&mut self, client_x: f32, viewport: &ScrollViewport) {
        self.direction = classify(client_x, viewport);
    }

    /// One cadence step: nudge the viewport in the active direction.
    /// Returns whether the viewport was scrolled this tick.
    pub fn tick(&mut self, viewport: &mut ScrollViewport) -> bool {
        if !self.task.is_running() {
            return false;
        }
        let before = viewport.scroll_x;
        match self.direction {
            ScrollDirection::Left => viewport.scroll_by(-SCROLL_STEP),
            ScrollDirection::Right => viewport.scroll_by(SCROLL_STEP),
            ScrollDirection::None => return false,
        }
        viewport.scroll_x != before
    }
}

pub fn classify(client_x: f32, viewport: &ScrollViewport) -> ScrollDirection {
    if client_x < viewport.left + EDGE_THRESHOLD {
        ScrollDirection::Left
    } else if client_x > viewport.right - EDGE_THRESHOLD {
        ScrollDirection::Right
    } else {
        ScrollDirection::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ScrollViewport {
        ScrollViewport::new(100.0, 700.0, 300.0)
    }

    #[test]
    fn classification_matches_the_edge_threshold() {
        let viewport = viewport();
        assert_eq!(classify(120.0, &viewport), ScrollDirection::Left);
        assert_eq!(classify(680.0, &viewport), ScrollDirection::Right);
        assert_eq!(classify(400.0, &viewport), ScrollDirection::None);
        // Exactly on the threshold counts as the middle.
        assert_eq!(classify(150.0, &viewport), ScrollDirection::None);
        assert_eq!(classify(650.0, &viewport), ScrollDirection::None);
    }

    #[test]
    fn direction_is_recomputed_on_every_move() {
        let viewport = viewport();
        let mut scroll = AutoScroll::new();
        scroll.start();
        scroll.update_direction(110.0, &viewport);
        assert_eq!(scroll.direction(), ScrollDirection::Left);
        scroll.update_direction(400.0, &viewport);
        assert_eq!(scroll.direction(), ScrollDirection::None);
        scroll.update_direction(699.0, &viewport);
        assert_eq!(scroll.direction(), ScrollDirection::Right);
    }

    #[test]
    fn ticks_move_the_viewport_by_a_fixed_step() {
        let mut viewport = viewport();
        let mut scroll = AutoScroll::new();
        scroll.start();
        scroll.update_direction(699.0, &viewport);
        assert!(scroll.tick(&mut viewport));
        assert!(scroll.tick(&mut viewport));
        assert_eq!(viewport.scroll_x, 2.0 * SCROLL_STEP);

        scroll.update_direction(101.0, &viewport);
        assert!(scroll.tick(&mut viewport));
        assert_eq!(viewport.scroll_x, SCROLL_STEP);
    }

    #[test]
    fn idle_direction_means_no_scroll_that_tick() {
        let mut viewport = viewport();
        let mut scroll = AutoScroll::new();
        scroll.start();
        assert!(!scroll.tick(&mut viewport));
        assert_eq!(viewport.scroll_x, 0.0);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut scroll = AutoScroll::new();
        scroll.stop();
        assert!(!scroll.is_active());
        scroll.start();
        scroll.start();
        assert!(scroll.is_active());
        scroll.stop();
        scroll.stop();
        assert!(!scroll.is_active());
    }

    #[test]
    fn stopping_clears_the_direction_and_silences_ticks() {
        let mut viewport = viewport();
        let mut scroll = AutoScroll::new();
        scroll.start();
        scroll.update_direction(699.0, &viewport);
        scroll.stop();
        assert_eq!(scroll.direction(), ScrollDirection::None);
        assert!(!scroll.tick(&mut viewport));
        assert_eq!(viewport.scroll_x, 0.0);
    }
}
