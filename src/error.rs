/// Failures that can happen inside the history engine.
///
/// Every variant is caught by whoever owns the failing operation, logged,
/// and turned into a no-op for that operation; none of them is fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("clipboard is unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("refusing to store blank clipboard content")]
    InvalidInput,

    #[error("failed to register global hotkey: {0}")]
    HotkeyRegistration(String),

    #[error("window operation failed: {0}")]
    WindowOperation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
