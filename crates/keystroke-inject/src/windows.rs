//! Windows key synthesis, via `SendInput` with `KEYEVENTF_UNICODE`.
//!
//! Grounded in the `SendInput`/`KEYBDINPUT` batching idiom used by the
//! equivalent Windows injection path in the wider example pack, adapted
//! from the `windows` crate to `windows-sys` to match this workspace's
//! existing Win32 dependency.

use std::mem::size_of;
use std::time::Duration;

use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY,
    KEYEVENTF_KEYUP, KEYEVENTF_UNICODE, VK_BACK, VK_CONTROL, VK_END, VK_HOME, VK_LEFT,
    VK_RETURN, VK_RIGHT, VK_TAB,
};

use crate::config::InjectConfig;
use crate::error::{InjectError, Result};
use crate::protocol::InjectKey;
use crate::traits::KeySynth;

/// `SendInput`-backed [`KeySynth`] for Windows.
pub struct SendInputSynth {
    dwell: Duration,
}

impl SendInputSynth {
    /// Create the backend. `SendInput` needs no handle or connection setup.
    pub fn new(config: InjectConfig) -> Result<Self> {
        Ok(Self {
            dwell: config.post_event_dwell,
        })
    }

    fn dwell(&self) {
        std::thread::sleep(self.dwell);
    }

    fn dispatch(&self, inputs: &[INPUT]) -> Result<()> {
        // SAFETY: `inputs` is a fully initialized, live slice of `INPUT`
        // for the duration of this call; `SendInput` only reads from it.
        let sent =
            unsafe { SendInput(inputs.len() as u32, inputs.as_ptr(), size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(InjectError::Os(format!(
                "SendInput: {sent} of {} events delivered",
                inputs.len()
            )));
        }
        self.dwell();
        Ok(())
    }
}

fn vk_input(vk: u16, flags: u32) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn unicode_input(code_unit: u16, key_up: bool) -> INPUT {
    let flags = if key_up {
        KEYEVENTF_UNICODE | KEYEVENTF_KEYUP
    } else {
        KEYEVENTF_UNICODE
    };
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: 0,
                wScan: code_unit,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

/// Virtual-key code and whether it carries the extended-key flag.
fn named_vk(key: InjectKey) -> Option<(u16, bool)> {
    Some(match key {
        InjectKey::Enter => (VK_RETURN, false),
        InjectKey::Backspace => (VK_BACK, false),
        InjectKey::Tab => (VK_TAB, false),
        InjectKey::Left => (VK_LEFT, true),
        InjectKey::Right => (VK_RIGHT, true),
        InjectKey::Home => (VK_HOME, true),
        InjectKey::End => (VK_END, true),
    })
}

impl KeySynth for SendInputSynth {
    fn unicode_char(&mut self, ch: char) -> Result<()> {
        let mut buf = [0u16; 2];
        let units = ch.encode_utf16(&mut buf);
        let mut inputs = Vec::with_capacity(units.len() * 2);
        for &unit in units.iter() {
            inputs.push(unicode_input(unit, false));
            inputs.push(unicode_input(unit, true));
        }
        self.dispatch(&inputs)
    }

    fn key(&mut self, key: InjectKey) -> Result<()> {
        let (vk, extended) = named_vk(key).ok_or(InjectError::UnsupportedKey(key))?;
        let ext = if extended { KEYEVENTF_EXTENDEDKEY } else { 0 };
        self.dispatch(&[vk_input(vk, ext), vk_input(vk, ext | KEYEVENTF_KEYUP)])
    }

    fn control_key(&mut self, key: InjectKey) -> Result<()> {
        let (vk, extended) = named_vk(key).ok_or(InjectError::UnsupportedKey(key))?;
        let ext = if extended { KEYEVENTF_EXTENDEDKEY } else { 0 };
        self.dispatch(&[
            vk_input(VK_CONTROL, 0),
            vk_input(vk, ext),
            vk_input(vk, ext | KEYEVENTF_KEYUP),
            vk_input(VK_CONTROL, KEYEVENTF_KEYUP),
        ])
    }

    fn control_chord(&mut self, letter: char) -> Result<()> {
        if !letter.is_ascii_lowercase() {
            return Err(InjectError::InvalidChord(letter));
        }
        // VK codes for 'A'-'Z' are their ASCII values.
        let vk = letter.to_ascii_uppercase() as u16;
        self.dispatch(&[
            vk_input(VK_CONTROL, 0),
            vk_input(vk, 0),
            vk_input(vk, KEYEVENTF_KEYUP),
            vk_input(VK_CONTROL, KEYEVENTF_KEYUP),
        ])
    }
}
