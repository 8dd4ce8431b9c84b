use crate::{
    SystemClipboard, command::Command, controller::HistoryController, event::Event,
    presenter::ChannelPresenter, store::Store,
};
use std::time::Duration;
use tokio::{
    sync::mpsc::{Receiver, Sender},
    time::MissedTickBehavior,
};
use tokio_util::sync::CancellationToken;

pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Owns the controller; poll ticks and shell commands are handled one at a
/// time on a single task.
pub(crate) struct MainLoop<C> {
    controller: HistoryController<C, ChannelPresenter>,
    commands_rx: Receiver<Command>,
    token: CancellationToken,
}

impl<C: SystemClipboard> MainLoop<C> {
    pub(crate) fn new(
        store: Store,
        clipboard: C,
        history_limit: usize,
        commands_rx: Receiver<Command>,
        events_tx: Sender<Event>,
        token: CancellationToken,
    ) -> Self {
        let presenter = ChannelPresenter::new(events_tx);
        Self {
            controller: HistoryController::new(store, clipboard, presenter, history_limit),
            commands_rx,
            token,
        }
    }

    /// Runs until cancelled and hands the store back for teardown.
    pub(crate) async fn start(self) -> Store {
        let Self {
            mut controller,
            mut commands_rx,
            token,
        } = self;

        controller.refresh();

        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    log::info!("received exit signal, stopping...");
                    break
                }

                _ = interval.tick() => controller.tick(),

                command = commands_rx.recv() => {
                    let Some(command) = command else {
                        log::info!("channel of commands is closed, stopping...");
                        break
                    };
                    log::debug!("command from window: {command:?}");
                    match command {
                        Command::Press(button) => controller.on_button_press(button),
                        Command::Copy(index) => controller.copy_at(index),
                        Command::Select(index) => controller.presenter_mut().select(index),
                        Command::CloseRequested => controller.on_close_requested(),
                        Command::ToggleVisibility => controller.toggle_visibility(),
                        Command::Show => controller.show(),
                    }
                }
            }
        }

        controller.into_store()
    }
}
