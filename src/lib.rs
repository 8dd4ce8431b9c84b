pub use clipboard::{ArboardClipboard, SystemClipboard};
pub use config::{
    Config, ConfigReadOption, quickclip_config_default, quickclip_config_new,
    quickclip_config_read,
};
pub use controller::HistoryController;
pub use detector::ChangeDetector;
pub use entry::{ClipEntry, EntryId};
pub use error::{Error, Result};
pub use handle::{
    Handle, quickclip_handle_close_requested, quickclip_handle_copy, quickclip_handle_poll,
    quickclip_handle_press, quickclip_handle_select, quickclip_handle_show, quickclip_handle_start,
    quickclip_handle_stop, quickclip_handle_toggle,
};
pub use hotkey::HotkeyGuard;
pub use logger::{Logger, quickclip_logger_init};
pub use output::{Output, quickclip_output_drop};
pub use presenter::{Button, Presenter, Visibility};
pub use store::Store;

mod clipboard;
mod command;
mod config;
mod controller;
mod detector;
mod entry;
mod error;
mod event;
mod ffi;
mod handle;
pub mod hotkey;
mod logger;
mod main_loop;
mod output;
mod presenter;
mod store;
mod thread;
