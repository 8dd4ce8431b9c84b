use crate::{
    Config, Output,
    command::Command,
    event::Event,
    hotkey::HotkeyGuard,
    presenter::{Button, Visibility},
    store::Store,
    thread::Thread,
};
use anyhow::{Context as _, Result, anyhow};
use tokio::sync::mpsc::{Receiver, Sender, channel};

/// The window shell's side of a running history worker.
pub struct Handle {
    ctx: Sender<Command>,
    erx: Receiver<Event>,
    hotkey: Option<HotkeyGuard>,
    thread: Thread,
}

impl Handle {
    /// Opens the history store and starts polling the clipboard.
    ///
    /// Failing to open the store is the only startup error; a hotkey that
    /// can't be registered is logged and the worker runs without it. Call
    /// this from the thread that runs the platform event loop.
    pub fn start(config: &Config) -> Result<Self> {
        let store = Store::open(&config.database)
            .with_context(|| format!("failed to open history at {:?}", config.database))?;
        log::info!("history store opened at {:?}", config.database);

        let (ctx, crx) = channel::<Command>(255);
        let (etx, erx) = channel::<Event>(255);

        let hotkey = {
            let ctx = ctx.clone();
            let on_press = move || {
                if ctx.try_send(Command::ToggleVisibility).is_err() {
                    log::error!("failed to deliver hotkey press to the worker");
                }
            };
            match HotkeyGuard::register(&config.hotkey, on_press) {
                Ok(guard) => Some(guard),
                Err(err) => {
                    log::error!("hotkey setup error, continuing without it: {err}");
                    None
                }
            }
        };

        let thread = Thread::spawn(store, config.history_limit, crx, etx)
            .context("failed to spawn worker thread")?;

        Ok(Self {
            ctx,
            erx,
            hotkey,
            thread,
        })
    }

    fn send(&self, command: Command) -> Result<()> {
        self.ctx
            .blocking_send(command)
            .map_err(|_| anyhow!("failed to send command: channel is closed"))
    }

    pub fn press(&self, button: Button) -> Result<()> {
        self.send(Command::Press(button))
    }

    /// Copies row `index` of the last rendered list in one step.
    pub fn copy(&self, index: usize) -> Result<()> {
        self.send(Command::Copy(index))
    }

    /// Reports the row currently selected in the window.
    pub fn select(&self, index: Option<usize>) -> Result<()> {
        self.send(Command::Select(index))
    }

    pub fn request_close(&self) -> Result<()> {
        self.send(Command::CloseRequested)
    }

    pub fn toggle(&self) -> Result<()> {
        self.send(Command::ToggleVisibility)
    }

    pub fn show(&self) -> Result<()> {
        self.send(Command::Show)
    }

    /// Latest list to render and latest visibility, if either changed.
    pub fn recv(&mut self) -> (Option<Vec<String>>, Option<Visibility>) {
        let mut items = None;
        let mut visibility = None;

        while let Ok(event) = self.erx.try_recv() {
            match event {
                Event::Render(value) => items = Some(value),
                Event::Visibility(value) => visibility = Some(value),
            }
        }

        (items, visibility)
    }

    pub fn has_hotkey(&self) -> bool {
        self.hotkey.is_some()
    }

    pub fn stop(self) -> Result<()> {
        drop(self.hotkey);
        self.thread.stop()
    }
}

/// Takes ownership of `config`; the caller must not free it afterwards.
#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_start(config: *mut Config) -> *mut Handle {
    if config.is_null() {
        log::error!("NULL config");
        return std::ptr::null_mut();
    }
    let config = unsafe { Box::from_raw(config) };

    match Handle::start(&config) {
        Ok(handle) => Box::into_raw(Box::new(handle)),
        Err(err) => {
            log::error!("{err:?}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_press(handle: *mut Handle, button_id: u32) {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        log::error!("NULL handle");
        return;
    };
    let Some(button) = Button::from_id(button_id) else {
        log::error!("unknown button id {button_id}");
        return;
    };
    if let Err(err) = handle.press(button) {
        log::error!("{err:?}");
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_copy(handle: *mut Handle, index: usize) {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        log::error!("NULL handle");
        return;
    };
    if let Err(err) = handle.copy(index) {
        log::error!("{err:?}");
    }
}

/// A negative `index` clears the selection.
#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_select(handle: *mut Handle, index: i64) {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        log::error!("NULL handle");
        return;
    };
    let index = usize::try_from(index).ok();
    if let Err(err) = handle.select(index) {
        log::error!("{err:?}");
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_close_requested(handle: *mut Handle) {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        log::error!("NULL handle");
        return;
    };
    if let Err(err) = handle.request_close() {
        log::error!("{err:?}");
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_toggle(handle: *mut Handle) {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        log::error!("NULL handle");
        return;
    };
    if let Err(err) = handle.toggle() {
        log::error!("{err:?}");
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_show(handle: *mut Handle) {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        log::error!("NULL handle");
        return;
    };
    if let Err(err) = handle.show() {
        log::error!("{err:?}");
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_poll(handle: *mut Handle) -> Output {
    let Some(handle) = (unsafe { handle.as_mut() }) else {
        log::error!("NULL handle");
        return Output::null();
    };

    let (items, visibility) = handle.recv();
    Output::new(items, visibility)
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_handle_stop(handle: *mut Handle) -> bool {
    if handle.is_null() {
        log::error!("NULL handle");
        return false;
    }
    let handle = unsafe { Box::from_raw(handle) };
    match handle.stop() {
        Ok(()) => true,
        Err(err) => {
            log::error!("failed to stop thread: {err:?}");
            false
        }
    }
}
