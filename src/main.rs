//! Line-oriented terminal window for the clipboard history.
//!
//! Commands: `copy N`, `clear`, `hide`, `show`, `toggle`, `close`, `exit`.

use anyhow::{Context as _, Result};
use quickclip::{Button, Config, ConfigReadOption, Handle, Logger, Visibility};
use std::{
    io::BufRead as _,
    sync::mpsc::{self, RecvTimeoutError},
    time::Duration,
};

const PREVIEW_CHARS: usize = 60;

fn main() -> Result<()> {
    Logger::init();

    let config = Config::read(ConfigReadOption::FromConfigDir)?;
    log::info!("{config:?}");
    let mut handle = Handle::start(&config).context("can't start clipboard history")?;

    let (lines_tx, lines_rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if lines_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Error reading from console: {err}");
                    break;
                }
            }
        }
    });

    let mut window = Window::default();
    loop {
        let (items, visibility) = handle.recv();
        window.update(items, visibility);

        match lines_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(line) => {
                if !window.dispatch(&handle, line.trim())? {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    handle.stop()
}

#[derive(Default)]
struct Window {
    items: Vec<String>,
    hidden: bool,
}

impl Window {
    fn update(&mut self, items: Option<Vec<String>>, visibility: Option<Visibility>) {
        let mut redraw = false;
        if let Some(items) = items {
            self.items = items;
            redraw = true;
        }
        if let Some(visibility) = visibility {
            self.hidden = visibility == Visibility::Hidden;
            if self.hidden {
                println!("[hidden]");
            }
            redraw = true;
        }
        if redraw && !self.hidden {
            self.draw();
        }
    }

    fn draw(&self) {
        println!("--- clipboard history ({}) ---", self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            println!("{:>3}  {}", i + 1, preview(item));
        }
    }

    /// Returns false once the user asked to exit.
    fn dispatch(&self, handle: &Handle, line: &str) -> Result<bool> {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("copy") => {
                let index = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .filter(|index| *index < self.items.len());
                match index {
                    Some(index) => handle.copy(index)?,
                    None => println!("nothing copied: give a row number from the list"),
                }
            }
            Some("clear") => handle.press(Button::Clear)?,
            Some("hide") => handle.press(Button::Hide)?,
            Some("show") => handle.show()?,
            Some("toggle") => handle.toggle()?,
            Some("close") => handle.request_close()?,
            Some("exit") | Some("quit") => return Ok(false),
            Some(other) => println!("unknown command {other:?}"),
            None => {}
        }
        Ok(true)
    }
}

fn preview(item: &str) -> String {
    let flat: String = item
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let flat = flat.trim();
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat.to_string()
    }
}
