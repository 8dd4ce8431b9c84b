use crate::{
    Result, SystemClipboard,
    entry::{EntryId, is_blank},
    store::Store,
};

/// Decides once per tick whether the clipboard holds a new user copy.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_clip: String,
    ignore_next_clip: bool,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the clipboard and records its content if it is new.
    ///
    /// A read failure leaves the detector untouched, so the next tick simply
    /// tries again. A failed append still advances `last_clip`: the content
    /// is abandoned, not retried on every tick.
    pub fn tick(
        &mut self,
        clipboard: &mut impl SystemClipboard,
        store: &Store,
    ) -> Result<Option<EntryId>> {
        let current = clipboard.read_text()?;

        if self.ignore_next_clip {
            self.ignore_next_clip = false;
            self.last_clip = current;
            return Ok(None);
        }

        if current == self.last_clip || is_blank(&current) {
            return Ok(None);
        }

        let appended = store.append(&current);
        self.last_clip = current;
        appended.map(Some)
    }

    /// Swallows whatever the next tick reads: our own copy-back echo.
    pub fn suppress_next(&mut self) {
        self.ignore_next_clip = true;
    }

    pub(crate) fn cancel_suppression(&mut self) {
        self.ignore_next_clip = false;
    }

    /// Forgets the last seen text so the next external copy is always new.
    pub fn reset(&mut self) {
        self.last_clip.clear();
    }

    pub fn last_clip(&self) -> &str {
        &self.last_clip
    }

    pub fn is_suppressing(&self) -> bool {
        self.ignore_next_clip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clipboard::fake::FakeClipboard, error::Error};

    fn setup() -> (ChangeDetector, FakeClipboard, Store) {
        (
            ChangeDetector::new(),
            FakeClipboard::default(),
            Store::open_in_memory().unwrap(),
        )
    }

    fn history(store: &Store) -> Vec<String> {
        store
            .recent(50)
            .unwrap()
            .into_iter()
            .map(|entry| entry.content)
            .collect()
    }

    #[test]
    fn new_text_is_recorded_once() {
        let (mut detector, mut clipboard, store) = setup();
        clipboard.copy("hello");

        assert!(detector.tick(&mut clipboard, &store).unwrap().is_some());
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());

        assert_eq!(history(&store), ["hello"]);
        assert_eq!(detector.last_clip(), "hello");
    }

    #[test]
    fn blank_text_is_ignored() {
        let (mut detector, mut clipboard, store) = setup();
        for text in ["", "   ", "\n\t"] {
            clipboard.copy(text);
            assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());
        }
        assert!(history(&store).is_empty());
    }

    #[test]
    fn alternating_copies_are_all_kept() {
        let (mut detector, mut clipboard, store) = setup();
        for text in ["A", "B", "A"] {
            clipboard.copy(text);
            detector.tick(&mut clipboard, &store).unwrap();
        }
        assert_eq!(history(&store), ["A", "B", "A"]);
    }

    #[test]
    fn suppression_lasts_exactly_one_tick() {
        let (mut detector, mut clipboard, store) = setup();

        detector.suppress_next();
        clipboard.copy("echo");
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());
        assert!(!detector.is_suppressing());
        assert_eq!(detector.last_clip(), "echo");

        // same text again is not new either
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());

        clipboard.copy("fresh");
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_some());
        assert_eq!(history(&store), ["fresh"]);
    }

    #[test]
    fn read_failure_keeps_state_and_next_tick_retries() {
        let (mut detector, mut clipboard, store) = setup();
        detector.suppress_next();
        clipboard.copy("later");
        clipboard.fail_reads = 1;

        let err = detector.tick(&mut clipboard, &store).unwrap_err();
        assert!(matches!(err, Error::ClipboardUnavailable(_)));
        assert!(detector.is_suppressing());

        assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());
        assert!(!detector.is_suppressing());
    }

    #[test]
    fn failed_append_is_not_retried() {
        let (mut detector, mut clipboard, store) = setup();
        clipboard.copy("x");
        store.set_query_only(true);

        let err = detector.tick(&mut clipboard, &store).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(detector.last_clip(), "x");
        for _ in 0..4 {
            assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());
        }

        store.set_query_only(false);
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_none());
        clipboard.copy("y");
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_some());
        assert_eq!(history(&store), ["y"]);
    }

    #[test]
    fn reset_makes_repeated_text_new() {
        let (mut detector, mut clipboard, store) = setup();
        clipboard.copy("again");
        detector.tick(&mut clipboard, &store).unwrap();
        store.clear().unwrap();

        detector.reset();
        assert!(detector.tick(&mut clipboard, &store).unwrap().is_some());
        assert_eq!(history(&store), ["again"]);
    }
}
