//! The platform-facing key-synthesis trait.

use crate::error::Result;
use crate::protocol::InjectKey;

/// Synthesizes OS-level key events for the currently focused window.
///
/// Each method sends exactly one logical unit (a unicode character, a named
/// key, or a chord) as a down event immediately followed by an up event, per
/// the helper contract in the wire grammar.
pub trait KeySynth: Send {
    /// Synthesize a single printable codepoint via the platform's
    /// unicode-scan mechanism.
    fn unicode_char(&mut self, ch: char) -> Result<()>;

    /// Synthesize a down+up of a named key.
    fn key(&mut self, key: InjectKey) -> Result<()>;

    /// Synthesize a named key held together with Control (e.g. Ctrl+End).
    fn control_key(&mut self, key: InjectKey) -> Result<()>;

    /// Synthesize Control plus a lowercase letter.
    fn control_chord(&mut self, letter: char) -> Result<()>;
}
