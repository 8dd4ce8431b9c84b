use crate::{Result, error::Error, event::Event};
use tokio::sync::mpsc::{Sender, error::TrySendError};

/// Window visibility. The window starts visible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible = 0,
    Hidden = 1,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }
}

/// Buttons the window exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Copy,
    Clear,
    Hide,
}

impl Button {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Button::Copy),
            1 => Some(Button::Clear),
            2 => Some(Button::Hide),
            _ => None,
        }
    }
}

/// Whatever draws the history window.
pub trait Presenter {
    fn render(&mut self, items: &[String]);
    fn selected_index(&self) -> Option<usize>;
    fn visibility(&self) -> Visibility;
    fn show(&mut self) -> Result<()>;
    fn hide(&mut self) -> Result<()>;
}

/// Presenter that forwards everything to a shell running on another thread.
///
/// The shell reports selection changes back through commands; a new
/// rendering drops the selection, like a list widget being refilled.
pub(crate) struct ChannelPresenter {
    tx: Sender<Event>,
    selected: Option<usize>,
    visibility: Visibility,
}

impl ChannelPresenter {
    pub(crate) fn new(tx: Sender<Event>) -> Self {
        Self {
            tx,
            selected: None,
            visibility: Visibility::Visible,
        }
    }

    pub(crate) fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    fn send(&self, event: Event) -> Result<(), TrySendError<Event>> {
        self.tx.try_send(event)
    }

    fn set_visibility(&mut self, visibility: Visibility) -> Result<()> {
        self.send(Event::Visibility(visibility))
            .map_err(|err| Error::WindowOperation(err.to_string()))?;
        self.visibility = visibility;
        Ok(())
    }
}

impl Presenter for ChannelPresenter {
    fn render(&mut self, items: &[String]) {
        self.selected = None;
        if let Err(err) = self.send(Event::Render(items.to_vec())) {
            log::error!("failed to send rendering to the window: {err}");
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn show(&mut self) -> Result<()> {
        self.set_visibility(Visibility::Visible)
    }

    fn hide(&mut self) -> Result<()> {
        self.set_visibility(Visibility::Hidden)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::channel;

    #[test]
    fn button_ids() {
        assert_eq!(Button::from_id(0), Some(Button::Copy));
        assert_eq!(Button::from_id(1), Some(Button::Clear));
        assert_eq!(Button::from_id(2), Some(Button::Hide));
        assert_eq!(Button::from_id(3), None);
    }

    #[test]
    fn channel_presenter_forwards_events() {
        let (tx, mut rx) = channel(8);
        let mut presenter = ChannelPresenter::new(tx);

        presenter.select(Some(1));
        presenter.render(&["a".to_string(), "b".to_string()]);
        assert_eq!(presenter.selected_index(), None);

        presenter.hide().unwrap();
        assert_eq!(presenter.visibility(), Visibility::Hidden);

        assert!(matches!(rx.try_recv(), Ok(Event::Render(items)) if items == ["a", "b"]));
        assert!(matches!(
            rx.try_recv(),
            Ok(Event::Visibility(Visibility::Hidden))
        ));
    }

    #[test]
    fn closed_window_keeps_state() {
        let (tx, rx) = channel(8);
        drop(rx);
        let mut presenter = ChannelPresenter::new(tx);

        assert!(matches!(presenter.hide(), Err(Error::WindowOperation(_))));
        assert_eq!(presenter.visibility(), Visibility::Visible);
    }
}
