use timeline::{ClipId, SequenceStore};

use crate::{AutoScroll, ClipBounds, ScrollViewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModality {
    Pointer,
    Touch,
}

/// How a gesture commits its reorder. Pointer drags commit a single move at
/// drop time; touch drags mutate the sequence continuously while the finger
/// moves. Both are deliberate product behaviors and stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderStrategy {
    Transactional,
    Live,
}

impl ReorderStrategy {
    pub fn for_modality(modality: InputModality) -> Self {
        match modality {
            InputModality::Pointer => Self::Transactional,
            InputModality::Touch => Self::Live,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropIndicator {
    Hidden,
    At(f32),
}

/// State of the drag in flight. Created on drag/touch start, destroyed on
/// every exit path. The source is a stable id, resolved to an index only at
/// the moment a move commits.
#[derive(Debug, Clone)]
pub struct GestureState {
    pub source: ClipId,
    pub strategy: ReorderStrategy,
}

/// Funnels both input protocols into `SequenceStore::move_clip`. The engine
/// validates indices against the live sequence before every commit; the
/// store itself stays on the hot path unchecked.
#[derive(Debug, Clone)]
pub struct ReorderEngine {
    gesture: Option<GestureState>,
    indicator: DropIndicator,
    auto_scroll: AutoScroll,
}

impl Default for ReorderEngine {
    fn default() -> Self {
        Self {
            gesture: None,
            indicator: DropIndicator::Hidden,
            auto_scroll: AutoScroll::new(),
        }
    }
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Option<&GestureState> {
        self.gesture.as_ref()
    }

    pub fn indicator(&self) -> DropIndicator {
        self.indicator
    }

    pub fn auto_scroll(&self) -> &AutoScroll {
        &self.auto_scroll
    }

    /// Pump the auto-scroll loop at [`crate::SCROLL_CADENCE`] while a
    /// gesture is active; a finished gesture's ticks are no-ops.
    pub fn tick_scroll(&mut self, viewport: &mut ScrollViewport) -> bool {
        self.auto_scroll.tick(viewport)
    }

    pub fn drag_start(&mut self, source: ClipId) {
        self.begin(source, ReorderStrategy::Transactional);
    }

    /// Pointer moved over a rendered clip. The indicator snaps to the
    /// hovered clip's horizontal center rather than the raw pointer x, which
    /// keeps the feedback stable under jittery motion.
    pub fn drag_over(&mut self, pointer_x: f32, hovered: &ClipBounds, viewport: &ScrollViewport) {
        let Some(gesture) = &self.gesture else {
            return;
        };
        if gesture.strategy != ReorderStrategy::Transactional {
            return;
        }
        self.indicator = DropIndicator::At(hovered.center());
        self.auto_scroll.update_direction(pointer_x, viewport);
    }

    /// Commit the single transactional move. No-op without a captured
    /// source, or when source and target coincide. Cleanup runs either way.
    pub fn drop(&mut self, store: &mut SequenceStore, target: ClipId) -> bool {
        let moved = match &self.gesture {
            Some(gesture) if gesture.strategy == ReorderStrategy::Transactional => {
                match (store.index_of(gesture.source), store.index_of(target)) {
                    (Some(from), Some(to)) if from != to => store.move_clip(from, to),
                    _ => false,
                }
            }
            _ => false,
        };
        self.finish();
        moved
    }

    /// Sole guaranteed cleanup path for pointer drags; fires on cancelled
    /// gestures too, so it must always clear state and stop the scroll loop.
    pub fn drag_end(&mut self) {
        self.finish();
    }

    pub fn touch_start(&mut self, source: ClipId) {
        self.begin(source, ReorderStrategy::Live);
    }

    /// Live reorder: the indicator tracks the raw touch x relative to the
    /// viewport, and the first clip whose midpoint lies right of the touch
    /// becomes the target immediately. The moved entry keeps its id, so the
    /// source follows it to the new index on the next move event.
    pub fn touch_move(
        &mut self,
        store: &mut SequenceStore,
        touch_x: f32,
        bounds: &[ClipBounds],
        viewport: &ScrollViewport,
    ) -> bool {
        let Some(gesture) = &self.gesture else {
            return false;
        };
        if gesture.strategy != ReorderStrategy::Live {
            return false;
        }
        self.indicator = DropIndicator::At(touch_x - viewport.left);
        self.auto_scroll.update_direction(touch_x, viewport);

        let Some(target) = bounds.iter().find(|clip| touch_x < clip.center()) else {
            return false;
        };
        let (Some(from), Some(to)) = (store.index_of(gesture.source), store.index_of(target.id))
        else {
            return false;
        };
        if from == to {
            return false;
        }
        store.move_clip(from, to)
    }

    pub fn touch_end(&mut self) {
        self.finish();
    }

    fn begin(&mut self, source: ClipId, strategy: ReorderStrategy) {
        // At most one scroll loop alive: a new gesture stops the previous
        // one before monitoring starts.
        self.auto_scroll.stop();
        tracing::debug!(%source, ?strategy, "reorder gesture started");
        self.gesture = Some(GestureState { source, strategy });
        self.indicator = DropIndicator::Hidden;
        self.auto_scroll.start();
    }

    fn finish(&mut self) {
        if self.gesture.take().is_some() {
            tracing::debug!("reorder gesture finished");
        }
        self.indicator = DropIndicator::Hidden;
        self.auto_scroll.stop();
    }
}
