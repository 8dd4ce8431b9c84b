use crate::presenter::Visibility;

/// Sent from the worker to the window shell.
#[derive(Debug)]
pub(crate) enum Event {
    Render(Vec<String>),
    Visibility(Visibility),
}
