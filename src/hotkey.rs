use crate::{Result, error::Error};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};

/// Parses combinations like `ctrl+shift+v` (case-insensitive).
pub fn parse(combo: &str) -> Result<HotKey> {
    let combo = combo.trim();
    if combo.is_empty() {
        return Err(Error::HotkeyRegistration("empty hotkey".to_string()));
    }
    let normalized = combo
        .split('+')
        .map(|token| match token.trim().to_ascii_lowercase().as_str() {
            "meta" | "win" => "super".to_string(),
            _ => token.trim().to_string(),
        })
        .collect::<Vec<_>>()
        .join("+");

    normalized
        .parse::<HotKey>()
        .map_err(|err| Error::HotkeyRegistration(format!("{combo:?}: {err}")))
}

/// A registered system-wide hotkey; unregistered on drop.
pub struct HotkeyGuard {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyGuard {
    /// Registers `combo` and calls `on_press` every time it is pressed.
    ///
    /// Must be called from the thread that runs the platform event loop.
    pub fn register<F>(combo: &str, on_press: F) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let hotkey = parse(combo)?;
        let manager = GlobalHotKeyManager::new()
            .map_err(|err| Error::HotkeyRegistration(err.to_string()))?;
        manager
            .register(hotkey)
            .map_err(|err| Error::HotkeyRegistration(err.to_string()))?;

        let id = hotkey.id();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.id == id && event.state == HotKeyState::Pressed {
                on_press();
            }
        }));

        log::info!("registered global hotkey {combo:?}");
        Ok(Self { manager, hotkey })
    }
}

impl Drop for HotkeyGuard {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
        if let Err(err) = self.manager.unregister(self.hotkey) {
            log::error!("failed to unregister global hotkey: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use global_hotkey::hotkey::{Code, Modifiers};

    #[test]
    fn parses_default_combination() {
        let hotkey = parse("ctrl+shift+v").unwrap();
        assert_eq!(
            hotkey,
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyV)
        );
        assert_eq!(parse(" CTRL + Shift + V ").unwrap(), hotkey);
    }

    #[test]
    fn meta_is_super() {
        assert_eq!(
            parse("meta+v").unwrap(),
            HotKey::new(Some(Modifiers::SUPER), Code::KeyV)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(parse(""), Err(Error::HotkeyRegistration(_))));
        assert!(parse("ctrl+shift+nosuchkey").is_err());
    }
}
