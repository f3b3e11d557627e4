use anyhow::Result;
use gesture::{ClipBounds, ReorderEngine, ScrollViewport};
use media_io::{ImportedMedia, MediaKind, TranscodeEngine};
use project::ProjectStore;
use timeline::{
    ClipEntry, ClipId, ClipKind, PlaybackClock, SequenceEvent, SequenceStore, TimelineError,
};

mod theme;
pub use theme::Theme;

/// Composition root: owns the sequence store, the persistence projector,
/// the playback clock and the reorder engine, and routes every mutation so
/// the snapshot write-through happens after each one. The shell renders
/// from the accessors and feeds raw input into the passthroughs.
pub struct Editor {
    store: SequenceStore,
    projector: ProjectStore,
    clock: PlaybackClock,
    engine: ReorderEngine,
    theme: Theme,
    transcoder: Option<TranscodeEngine>,
}

impl Editor {
    /// Restore the persisted snapshot (metadata-only entries) and theme from
    /// the projector's store. A missing transcoder means degraded mode:
    /// preview is unavailable, sequence editing works in full.
    pub fn new(projector: ProjectStore, transcoder: Option<TranscodeEngine>) -> Self {
        let mut store = SequenceStore::new();
        if let Some(saved) = projector.load() {
            for clip in saved.sequences {
                store.append(clip.into_entry());
            }
        }
        let theme = projector
            .load_theme()
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default();
        Self {
            store,
            projector,
            clock: PlaybackClock::new(),
            engine: ReorderEngine::new(),
            theme,
            transcoder,
        }
    }

    /// Open the durable store under the app data dir and locate the
    /// transcoder, degrading instead of failing when it is missing.
    pub fn open_default() -> Result<Self> {
        let projector = ProjectStore::open_default()?;
        let transcoder = match TranscodeEngine::locate() {
            Ok(engine) => Some(engine),
            Err(err) => {
                tracing::warn!(%err, "transcode engine unavailable, preview disabled");
                None
            }
        };
        Ok(Self::new(projector, transcoder))
    }

    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    pub fn entries(&self) -> &[ClipEntry] {
        self.store.entries()
    }

    pub fn projector(&self) -> &ProjectStore {
        &self.projector
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn engine(&self) -> &ReorderEngine {
        &self.engine
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SequenceEvent) + 'static) {
        self.store.subscribe(listener);
    }

    pub fn is_degraded(&self) -> bool {
        self.transcoder.is_none()
    }

    pub fn transcoder(&self) -> Option<&TranscodeEngine> {
        self.transcoder.as_ref()
    }

    /// Append each imported file in the order received, then write through.
    pub fn import(&mut self, media: impl IntoIterator<Item = ImportedMedia>) {
        let mut appended = false;
        for item in media {
            let kind = match item.kind {
                MediaKind::Image => ClipKind::Image,
                MediaKind::Video => ClipKind::Video,
            };
            self.store
                .append(ClipEntry::new(kind, item.display_name, Some(item.path)));
            appended = true;
        }
        if appended {
            self.write_through();
        }
    }

    /// Single-pop undo: drop the final clip. Deeper history is out of scope.
    pub fn undo(&mut self) -> Option<ClipEntry> {
        let removed = self.store.remove_last()?;
        self.write_through();
        Some(removed)
    }

    pub fn select(&mut self, id: ClipId) -> Result<(), TimelineError> {
        self.store.select(id)
    }

    pub fn selection(&self) -> Option<ClipId> {
        self.store.selection()
    }

    pub fn toggle_playback(&mut self) {
        self.clock.toggle(self.store.len());
    }

    /// Pump at [`timeline::TICK_CADENCE`]; stopped clocks ignore the tick.
    pub fn tick_playback(&mut self) -> bool {
        self.clock.tick(self.store.len())
    }

    pub fn seek(&mut self, seconds: f64) {
        self.clock.seek(seconds, self.store.len());
    }

    /// Playhead caption for the time indicator, e.g. "1:05".
    pub fn formatted_position(&self) -> String {
        timeline::format_clock_time(self.clock.current_time())
    }

    pub fn drag_start(&mut self, source: ClipId) {
        self.engine.drag_start(source);
    }

    pub fn drag_over(&mut self, pointer_x: f32, hovered: &ClipBounds, viewport: &ScrollViewport) {
        self.engine.drag_over(pointer_x, hovered, viewport);
    }

    pub fn drop(&mut self, target: ClipId) -> bool {
        let moved = self.engine.drop(&mut self.store, target);
        if moved {
            self.write_through();
        }
        moved
    }

    pub fn drag_end(&mut self) {
        self.engine.drag_end();
    }

    pub fn touch_start(&mut self, source: ClipId) {
        self.engine.touch_start(source);
    }

    pub fn touch_move(
        &mut self,
        touch_x: f32,
        bounds: &[ClipBounds],
        viewport: &ScrollViewport,
    ) -> bool {
        let moved = self
            .engine
            .touch_move(&mut self.store, touch_x, bounds, viewport);
        if moved {
            self.write_through();
        }
        moved
    }

    pub fn touch_end(&mut self) {
        self.engine.touch_end();
    }

    /// Pump at [`gesture::SCROLL_CADENCE`] while a gesture is active.
    pub fn tick_auto_scroll(&mut self, viewport: &mut ScrollViewport) -> bool {
        self.engine.tick_scroll(viewport)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.projector.save_theme(self.theme.as_str());
    }

    fn write_through(&mut self) {
        self.projector.save(self.store.entries());
    }
}
