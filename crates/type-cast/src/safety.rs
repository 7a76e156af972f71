//! Process-wide safety net (`§7`): a broken pipe to a dead helper or any
//! other unhandled async fault should be logged, not crash the host process.

use std::panic;

/// Install a panic hook that logs via `tracing` instead of dumping straight
/// to stderr. Idempotent to call more than once; intended to be called once
/// near process startup by the embedding application.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "unhandled panic in typing engine");
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_panic_hook_does_not_panic_itself() {
        install_panic_hook();
    }
}
