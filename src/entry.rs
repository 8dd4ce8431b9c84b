/// Row id assigned by the store, recency is defined by it.
pub type EntryId = i64;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipEntry {
    pub id: EntryId,
    pub content: String,
    pub timestamp: String,
}

/// Local wall-clock time with second resolution, the format stored on disk.
pub(crate) fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Blank text (empty or whitespace only) is never recorded.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
