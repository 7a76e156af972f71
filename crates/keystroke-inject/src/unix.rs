//! Unix (Linux and macOS) key synthesis, via `enigo`.
//!
//! Neither XTest nor `CGEvent` is wired up directly here: one cross-platform
//! backend covers both Unix targets, the same call made for the Linux path
//! of a comparable desktop-automation tool (see `enigo` usage in the wider
//! example pack's injection module, annotated there as "fallback is fine").

use std::time::Duration;

use enigo::{
    Direction::{Click, Press, Release},
    Enigo, Key, Keyboard, Settings,
};

use crate::config::InjectConfig;
use crate::error::{InjectError, Result};
use crate::protocol::InjectKey;
use crate::traits::KeySynth;

/// `enigo`-backed [`KeySynth`] for Linux and macOS.
pub struct EnigoSynth {
    enigo: Enigo,
    dwell: Duration,
}

impl EnigoSynth {
    /// Initialize the backend, opening whatever platform handle `enigo`
    /// needs (an X11/Wayland connection on Linux, an event source on macOS).
    pub fn new(config: InjectConfig) -> Result<Self> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| InjectError::BackendInit(e.to_string()))?;
        Ok(Self {
            enigo,
            dwell: config.post_event_dwell,
        })
    }

    fn dwell(&self) {
        std::thread::sleep(self.dwell);
    }

    fn chord(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(Key::Control, Press)
            .map_err(|e| InjectError::Os(e.to_string()))?;
        self.enigo
            .key(key, Click)
            .map_err(|e| InjectError::Os(e.to_string()))?;
        self.enigo
            .key(Key::Control, Release)
            .map_err(|e| InjectError::Os(e.to_string()))?;
        self.dwell();
        Ok(())
    }
}

fn map_named_key(key: InjectKey) -> Key {
    match key {
        InjectKey::Enter => Key::Return,
        InjectKey::Backspace => Key::Backspace,
        InjectKey::Tab => Key::Tab,
        InjectKey::Left => Key::LeftArrow,
        InjectKey::Right => Key::RightArrow,
        InjectKey::Home => Key::Home,
        InjectKey::End => Key::End,
    }
}

impl KeySynth for EnigoSynth {
    fn unicode_char(&mut self, ch: char) -> Result<()> {
        let mut buf = [0u8; 4];
        let s = ch.encode_utf8(&mut buf);
        self.enigo.text(s).map_err(|e| InjectError::Os(e.to_string()))?;
        self.dwell();
        Ok(())
    }

    fn key(&mut self, key: InjectKey) -> Result<()> {
        self.enigo
            .key(map_named_key(key), Click)
            .map_err(|e| InjectError::Os(e.to_string()))?;
        self.dwell();
        Ok(())
    }

    fn control_key(&mut self, key: InjectKey) -> Result<()> {
        self.chord(map_named_key(key))
    }

    fn control_chord(&mut self, letter: char) -> Result<()> {
        if !letter.is_ascii_lowercase() {
            return Err(InjectError::InvalidChord(letter));
        }
        self.chord(Key::Unicode(letter))
    }
}
