//! OS keyboard-injection primitives for the typing engine's helper process.
//!
//! This crate owns exactly the privileged part of the system: turning a
//! parsed command token into a synthetic OS key event. It knows nothing
//! about typing plans, timing, or shadow buffers — those live one layer up
//! in `type-cast`. The binary in `src/bin/keystroke-helperd.rs` is the
//! actual subprocess the engine spawns; it reads the wire grammar from
//! stdin and dispatches through [`traits::KeySynth`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
pub mod protocol;
mod traits;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use config::{InjectConfig, InjectConfigBuilder};
pub use error::{InjectError, Result};
pub use traits::KeySynth;

#[cfg(unix)]
pub use unix::EnigoSynth as PlatformSynth;
#[cfg(windows)]
pub use windows::SendInputSynth as PlatformSynth;

/// Construct the platform's default [`KeySynth`] backend.
pub fn platform_synth(config: InjectConfig) -> Result<PlatformSynth> {
    PlatformSynth::new(config)
}
