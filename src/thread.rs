use crate::{
    clipboard::ArboardClipboard, command::Command, event::Event, main_loop::MainLoop, store::Store,
};
use anyhow::{Result, anyhow};
use std::thread::JoinHandle;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

/// The worker thread: everything that touches the clipboard, the store or
/// the echo-suppression state runs here.
pub(crate) struct Thread {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Thread {
    pub(crate) fn spawn(
        store: Store,
        history_limit: usize,
        commands_rx: Receiver<Command>,
        events_tx: Sender<Event>,
    ) -> Result<Self> {
        let token = CancellationToken::new();
        let handle = {
            let token = token.clone();
            std::thread::Builder::new()
                .name("quickclip-worker".to_string())
                .spawn(move || {
                    Self::start_tokio_runtime(store, history_limit, commands_rx, events_tx, token);
                })?
        };

        Ok(Self { token, handle })
    }

    pub(crate) fn stop(self) -> Result<()> {
        self.token.cancel();
        self.handle
            .join()
            .map_err(|_| anyhow!("failed to join thread (bug?)"))?;
        Ok(())
    }

    fn start_tokio_runtime(
        store: Store,
        history_limit: usize,
        commands_rx: Receiver<Command>,
        events_tx: Sender<Event>,
        token: CancellationToken,
    ) {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                log::error!("failed to start tokio: {err:?}");
                return;
            }
        };

        // lives as long as the worker, see ArboardClipboard
        let clipboard = ArboardClipboard::new();

        let store = rt.block_on(async move {
            MainLoop::new(store, clipboard, history_limit, commands_rx, events_tx, token)
                .start()
                .await
        });

        match store.close() {
            Ok(()) => log::info!("history store closed"),
            Err(err) => log::error!("cleanup error: {err:?}"),
        }
    }
}
