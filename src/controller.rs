use crate::{
    SystemClipboard,
    detector::ChangeDetector,
    entry::ClipEntry,
    presenter::{Button, Presenter, Visibility},
    store::Store,
};

/// Glue between the clipboard poll, the store and the window.
///
/// All failures stop here: they are logged and the operation is abandoned,
/// nothing is propagated to the caller.
pub struct HistoryController<C, P> {
    store: Store,
    detector: ChangeDetector,
    clipboard: C,
    presenter: P,
    history_limit: usize,
    shown: Vec<ClipEntry>,
}

impl<C: SystemClipboard, P: Presenter> HistoryController<C, P> {
    pub fn new(store: Store, clipboard: C, presenter: P, history_limit: usize) -> Self {
        Self {
            store,
            detector: ChangeDetector::new(),
            clipboard,
            presenter,
            history_limit,
            shown: Vec::new(),
        }
    }

    /// One poll of the clipboard; refreshes the window on a new entry.
    pub fn tick(&mut self) {
        match self.detector.tick(&mut self.clipboard, &self.store) {
            Ok(Some(id)) => {
                log::debug!("recorded clipboard entry #{id}");
                self.refresh();
            }
            Ok(None) => {}
            Err(err) => log::error!("clipboard check error: {err:?}"),
        }
    }

    /// Re-reads the recency window and renders it.
    pub fn refresh(&mut self) {
        match self.store.recent(self.history_limit) {
            Ok(entries) => {
                let items: Vec<String> = entries.iter().map(|e| e.content.clone()).collect();
                self.shown = entries;
                self.presenter.render(&items);
            }
            Err(err) => log::error!("database read error: {err:?}"),
        }
    }

    /// Copies the entry currently selected in the window, if any.
    pub fn copy_selected(&mut self) {
        let Some(index) = self.presenter.selected_index() else {
            log::debug!("copy requested without a selection");
            return;
        };
        self.copy_at(index);
    }

    /// Copies the entry at `index` in the list currently shown.
    pub fn copy_at(&mut self, index: usize) {
        let Some(entry) = self.shown.get(index).cloned() else {
            log::warn!("selection {index} is out of range ({} shown)", self.shown.len());
            return;
        };
        self.copy_entry(&entry);
    }

    pub fn copy_entry(&mut self, entry: &ClipEntry) {
        // must be armed before the write, the next tick may run right after it
        self.detector.suppress_next();
        if let Err(err) = self.clipboard.write_text(&entry.content) {
            self.detector.cancel_suppression();
            log::error!("copy error: {err:?}");
        }
    }

    pub fn clear_history(&mut self) {
        if let Err(err) = self.store.clear() {
            log::error!("clear history error: {err:?}");
            return;
        }
        self.refresh();
        self.detector.reset();
    }

    pub fn toggle_visibility(&mut self) {
        match self.presenter.visibility() {
            Visibility::Hidden => self.show(),
            Visibility::Visible => self.hide(),
        }
    }

    pub fn show(&mut self) {
        if let Err(err) = self.presenter.show() {
            log::error!("show window error: {err:?}");
        }
    }

    pub fn hide(&mut self) {
        if let Err(err) = self.presenter.hide() {
            log::error!("hide window error: {err:?}");
        }
    }

    pub fn on_button_press(&mut self, button: Button) {
        match button {
            Button::Copy => self.copy_selected(),
            Button::Clear => self.clear_history(),
            Button::Hide => self.hide(),
        }
    }

    /// Closing the window only hides it.
    pub fn on_close_requested(&mut self) {
        self.hide();
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn into_store(self) -> Store {
        self.store
    }
}
