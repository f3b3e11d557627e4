use crate::{ClipEntry, ClipId, Sequence, TimelineError};

/// Change notification emitted synchronously after every store mutation so
/// the shell can re-render immediately. There is no batching; events fire in
/// dispatch order on the single logical thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEvent {
    Appended { id: ClipId },
    RemovedLast { id: ClipId },
    Moved { from: usize, to: usize },
    SelectionChanged { selected: Option<ClipId> },
}

type Listener = Box<dyn FnMut(&SequenceEvent)>;

/// Owner of the sequence and the selection. All order mutation routes
/// through this API; gesture code never touches the list directly.
#[derive(Default)]
pub struct SequenceStore {
    sequence: Sequence,
    selected: Option<ClipId>,
    listeners: Vec<Listener>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn entries(&self) -> &[ClipEntry] {
        self.sequence.entries()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn index_of(&self, id: ClipId) -> Option<usize> {
        self.sequence.index_of(id)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SequenceEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn append(&mut self, entry: ClipEntry) -> ClipId {
        let id = entry.id;
        self.sequence.append(entry);
        self.emit(SequenceEvent::Appended { id });
        id
    }

    /// Pop the final entry; no-op on an empty sequence. A selection pointing
    /// at the removed entry is cleared rather than left dangling.
    pub fn remove_last(&mut self) -> Option<ClipEntry> {
        let entry = self.sequence.remove_last()?;
        self.emit(SequenceEvent::RemovedLast { id: entry.id });
        if self.selected == Some(entry.id) {
            self.selected = None;
            self.emit(SequenceEvent::SelectionChanged { selected: None });
        }
        Some(entry)
    }

    /// See [`Sequence::move_clip`]. Selection is id-based and survives
    /// reorders untouched.
    pub fn move_clip(&mut self, from: usize, to: usize) -> bool {
        if !self.sequence.move_clip(from, to) {
            return false;
        }
        self.emit(SequenceEvent::Moved { from, to });
        true
    }

    pub fn select(&mut self, id: ClipId) -> Result<(), TimelineError> {
        if self.sequence.index_of(id).is_none() {
            return Err(TimelineError::ClipNotFound(id));
        }
        if self.selected != Some(id) {
            self.selected = Some(id);
            self.emit(SequenceEvent::SelectionChanged { selected: Some(id) });
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.emit(SequenceEvent::SelectionChanged { selected: None });
        }
    }

    pub fn selection(&self) -> Option<ClipId> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&ClipEntry> {
        let id = self.selected?;
        let index = self.sequence.index_of(id)?;
        self.sequence.get(index)
    }

    fn emit(&mut self, event: SequenceEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClipKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn filled(names: &[&str]) -> SequenceStore {
        let mut store = SequenceStore::new();
        for name in names {
            store.append(ClipEntry::new(ClipKind::Video, *name, None));
        }
        store
    }

    #[test]
    fn mutations_notify_in_dispatch_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut store = SequenceStore::new();
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let id = store.append(ClipEntry::new(ClipKind::Image, "one", None));
        store.append(ClipEntry::new(ClipKind::Image, "two", None));
        store.move_clip(0, 1);
        store.select(id).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], SequenceEvent::Appended { id });
        assert_eq!(events[2], SequenceEvent::Moved { from: 0, to: 1 });
        assert_eq!(
            events[3],
            SequenceEvent::SelectionChanged { selected: Some(id) }
        );
    }

    #[test]
    fn selection_survives_reorder_but_not_removal() {
        let mut store = filled(&["A", "B", "C"]);
        let last = store.entries()[2].id;
        store.select(last).unwrap();

        store.move_clip(2, 0);
        assert_eq!(store.selection(), Some(last));
        assert_eq!(store.index_of(last), Some(0));

        // Move it back to the tail; removing it clears the selection.
        store.move_clip(0, 2);
        assert!(store.remove_last().is_some());
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn select_unknown_clip_errors() {
        let mut store = filled(&["A"]);
        let err = store.select(ClipId::new()).unwrap_err();
        assert!(matches!(err, TimelineError::ClipNotFound(_)));
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn failed_moves_emit_nothing() {
        let count = Rc::new(RefCell::new(0usize));
        let sink = count.clone();
        let mut store = filled(&["A", "B"]);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(!store.move_clip(1, 1));
        assert!(!store.move_clip(5, 0));
        assert_eq!(*count.borrow(), 0);
    }
}
