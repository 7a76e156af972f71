//! Spawns and talks to the `keystroke-helperd` subprocess over line-framed stdio.

pub mod client;
mod locate;

pub use client::{ACK_TIMEOUT, HANDSHAKE_TIMEOUT, HelperClient};
pub use locate::locate_helper;
