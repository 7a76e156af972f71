//! Simulates a human operator typing text into whatever application
//! currently holds OS keyboard focus: realistic speed variation, pauses,
//! typographical errors, and self-correction, ending with the target text.
//!
//! The crate is organized around three cooperating pieces:
//! [`planner`] turns (text, options) into a deterministic [`types::TypingPlan`];
//! [`executor`] drives a plan against the keystroke helper while mirroring
//! the target application's contents in a [`executor::ShadowBuffer`]; and
//! [`engine`] owns the helper subprocess lifecycle end to end, exposing
//! `start`/`stop`/`pause`/`resume` as the single public entry point.

mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod helper;
mod pause;
pub mod planner;
pub mod safety;
pub mod types;

pub use cancel::CancelToken;
pub use config::{AdvancedTypingOptions, TypingOptions, TypingProfile};
pub use engine::{EngineEvent, TypingEngine};
pub use error::{HelperError, Result, TypingError};
pub use executor::Statistics;
pub use pause::PauseLatch;
pub use planner::{plan, plan_seeded, plan_with_entropy};
pub use types::{KeyName, PauseReason, TypingPlan, TypingStep};
