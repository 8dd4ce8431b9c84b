use crate::{Result, error::Error};

/// Text-only view of the system clipboard.
pub trait SystemClipboard {
    fn read_text(&mut self) -> Result<String>;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
///
/// The native handle is opened on first use and thrown away after any
/// failure, so a clipboard that was briefly locked by another process is
/// re-acquired on the next call. It must stay alive while the worker runs:
/// on X11 the owner of a selection has to keep serving it.
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(unavailable)?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| Error::ClipboardUnavailable("no clipboard handle".to_string()))
    }
}

impl SystemClipboard for ArboardClipboard {
    fn read_text(&mut self) -> Result<String> {
        match self.inner()?.get_text() {
            Ok(text) => Ok(text),
            // nothing (or nothing textual) on the clipboard
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(err) => {
                self.inner = None;
                Err(unavailable(err))
            }
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Err(err) = self.inner()?.set_text(text) {
            self.inner = None;
            return Err(unavailable(err));
        }
        Ok(())
    }
}

fn unavailable(err: arboard::Error) -> Error {
    Error::ClipboardUnavailable(err.to_string())
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory clipboard whose next read can be made to fail.
    #[derive(Default)]
    pub(crate) struct FakeClipboard {
        pub(crate) text: String,
        pub(crate) fail_reads: usize,
        pub(crate) fail_writes: bool,
        pub(crate) writes: Vec<String>,
    }

    impl FakeClipboard {
        pub(crate) fn copy(&mut self, text: &str) {
            self.text = text.to_string();
        }
    }

    impl SystemClipboard for FakeClipboard {
        fn read_text(&mut self) -> Result<String> {
            if self.fail_reads > 0 {
                self.fail_reads -= 1;
                return Err(Error::ClipboardUnavailable("locked".to_string()));
            }
            Ok(self.text.clone())
        }

        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.fail_writes {
                return Err(Error::ClipboardUnavailable("locked".to_string()));
            }
            self.text = text.to_string();
            self.writes.push(text.to_string());
            Ok(())
        }
    }
}
