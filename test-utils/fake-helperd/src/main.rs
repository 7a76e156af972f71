//! Scripted stand-in for the keystroke helper subprocess: speaks the same
//! `READY` / `OK` / `ERR <reason>` line protocol (`§4.2`, `§4.3`) without
//! touching any real keyboard, so integration tests can drive a real
//! `HelperClient` deterministically.
//!
//! Behavior is controlled entirely through environment variables so each
//! test can script a different helper without a new binary:
//!
//! - `FAKE_HELPERD_NO_READY=1` — never emit `READY`, simulating a helper the
//!   client must downgrade to fire-and-forget for.
//! - `FAKE_HELPERD_READY_DELAY_MS=<n>` — sleep before emitting `READY`.
//! - `FAKE_HELPERD_FAIL_ON=<substr>` — answer `ERR scripted failure` for any
//!   command line containing `<substr>`.
//! - `FAKE_HELPERD_SILENT_ON=<substr>` — never answer a command line
//!   containing `<substr>`, simulating a hung helper for ack-timeout tests.
//! - `FAKE_HELPERD_DELAY_MS=<n>` — sleep before every ack.

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

fn env_ms(name: &str) -> Option<Duration> {
    env::var(name).ok()?.parse::<u64>().ok().map(Duration::from_millis)
}

fn main() {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let no_ready = env::var("FAKE_HELPERD_NO_READY").is_ok();
    let fail_on = env::var("FAKE_HELPERD_FAIL_ON").ok();
    let silent_on = env::var("FAKE_HELPERD_SILENT_ON").ok();
    let ack_delay = env_ms("FAKE_HELPERD_DELAY_MS");

    if let Some(delay) = env_ms("FAKE_HELPERD_READY_DELAY_MS") {
        std::thread::sleep(delay);
    }
    if !no_ready {
        writeln!(out, "READY").ok();
        out.flush().ok();
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let command = line.trim();

        if command == "__EXIT__" {
            break;
        }
        if command.is_empty() {
            continue;
        }
        if silent_on.as_deref().is_some_and(|needle| command.contains(needle)) {
            continue;
        }
        if let Some(delay) = ack_delay {
            std::thread::sleep(delay);
        }

        if fail_on.as_deref().is_some_and(|needle| command.contains(needle)) {
            writeln!(out, "ERR scripted failure").ok();
        } else {
            writeln!(out, "OK").ok();
        }
        out.flush().ok();
    }
}
