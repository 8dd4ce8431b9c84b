use crate::presenter::Button;

/// Sent from the window shell (or the hotkey) to the worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Press(Button),
    Copy(usize),
    Select(Option<usize>),
    CloseRequested,
    ToggleVisibility,
    Show,
}
