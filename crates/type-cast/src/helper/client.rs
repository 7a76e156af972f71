//! Subprocess lifecycle and line-framed request/response client for the
//! keystroke helper (`§4.3`).
//!
//! Grounded on the teacher's child-process spawn pattern (piped stdio,
//! line-delimited reads on a dedicated task) generalized from a PTY child to
//! a plain piped subprocess, since the helper has no pseudo-terminal needs.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, mpsc, oneshot};

use crate::error::HelperError;

/// Handshake window: if `READY` hasn't arrived by this deadline, the client
/// downgrades to fire-and-forget mode (`§5` timeouts).
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(1800);
/// Per-command ack timeout (`§5` timeouts).
pub const ACK_TIMEOUT: Duration = Duration::from_millis(2000);

type PendingAck = oneshot::Sender<Result<(), HelperError>>;

/// A running keystroke helper subprocess plus its line client.
pub struct HelperClient {
    child: Mutex<Child>,
    stdin_tx: mpsc::Sender<String>,
    pending_tx: mpsc::Sender<PendingAck>,
    alive: std::sync::Arc<std::sync::atomic::AtomicBool>,
    downgraded: std::sync::atomic::AtomicBool,
}

impl HelperClient {
    /// Spawn the helper binary at `exe_path` and perform the handshake.
    ///
    /// Returns as soon as either `READY` arrives or the handshake window
    /// expires (in which case the client is left in fire-and-forget mode —
    /// this is not an error, per `§4.3`).
    pub async fn spawn(exe_path: &Path) -> Result<Self, HelperError> {
        let mut child = Command::new(exe_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(HelperError::spawn)?;

        let mut stdin = child.stdin.take().expect("piped stdin");
        let stdout = child.stdout.take().expect("piped stdout");
        let mut lines = BufReader::new(stdout).lines();

        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let (stdin_tx, mut stdin_rx) = mpsc::channel::<String>(8);
        let (pending_tx, mut pending_rx) = mpsc::channel::<PendingAck>(8);

        let writer_alive = alive.clone();
        tokio::spawn(async move {
            while let Some(line) = stdin_rx.recv().await {
                if stdin.write_all(line.as_bytes()).await.is_err() || stdin.write_all(b"\n").await.is_err() {
                    writer_alive.store(false, std::sync::atomic::Ordering::SeqCst);
                    break;
                }
                if stdin.flush().await.is_err() {
                    writer_alive.store(false, std::sync::atomic::Ordering::SeqCst);
                    break;
                }
            }
        });

        let ready_line = tokio::time::timeout(HANDSHAKE_TIMEOUT, lines.next_line()).await;
        let downgraded = !matches!(ready_line, Ok(Ok(Some(ref line))) if line.trim() == "READY");

        let reader_alive = alive.clone();
        tokio::spawn(async move {
            let mut queue: Vec<PendingAck> = Vec::new();
            loop {
                tokio::select! {
                    pending = pending_rx.recv() => {
                        match pending {
                            Some(tx) => queue.push(tx),
                            None => break,
                        }
                    }
                    line = lines.next_line() => {
                        match line {
                            Ok(Some(line)) => {
                                let trimmed = line.trim();
                                if trimmed == "READY" {
                                    continue;
                                }
                                if let Some(tx) = if queue.is_empty() { None } else { Some(queue.remove(0)) } {
                                    let result = if trimmed == "OK" {
                                        Ok(())
                                    } else {
                                        Err(HelperError::ack_error(trimmed.to_string()))
                                    };
                                    let _ = tx.send(result);
                                }
                            }
                            _ => {
                                reader_alive.store(false, std::sync::atomic::Ordering::SeqCst);
                                for tx in queue.drain(..) {
                                    let _ = tx.send(Err(HelperError::Gone));
                                }
                                break;
                            }
                        }
                    }
                }
            }
            for tx in queue.drain(..) {
                let _ = tx.send(Err(HelperError::Gone));
            }
        });

        Ok(Self {
            child: Mutex::new(child),
            stdin_tx,
            pending_tx,
            alive,
            downgraded: std::sync::atomic::AtomicBool::new(downgraded),
        })
    }

    /// True until the helper has been observed to exit or its stdio has failed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// True if the handshake window expired without seeing `READY` — `send`
    /// then writes without waiting for an ack.
    #[must_use]
    pub fn is_downgraded(&self) -> bool {
        self.downgraded.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Send one command line and await its ack (or resolve immediately if
    /// the client is downgraded). Sends are serialized by construction: the
    /// executor never calls `send` concurrently with itself (`§5`).
    pub async fn send(&self, line: &str) -> Result<(), HelperError> {
        if !self.is_alive() {
            return Err(HelperError::Gone);
        }

        if self.is_downgraded() {
            let _ = self.stdin_tx.send(line.to_string()).await;
            return Ok(());
        }

        let (tx, rx) = oneshot::channel();
        if self.pending_tx.send(tx).await.is_err() {
            return Err(HelperError::Gone);
        }
        if self.stdin_tx.send(line.to_string()).await.is_err() {
            return Err(HelperError::Gone);
        }

        let started = Instant::now();
        match tokio::time::timeout(ACK_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(HelperError::Gone),
            Err(_) => Err(HelperError::ack_timeout(started.elapsed())),
        }
    }

    /// Send `__EXIT__` (no ack expected) and kill the process if it hasn't
    /// exited within a short grace window.
    pub async fn shutdown(&self) {
        let _ = self.stdin_tx.send("__EXIT__".to_string()).await;
        let mut child = self.child.lock().await;
        let exited = tokio::time::timeout(Duration::from_millis(500), child.wait()).await;
        if exited.is_err() {
            let _ = child.kill().await;
        }
        self.alive.store(false, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_and_ack_timeouts_match_spec_range() {
        assert!(HANDSHAKE_TIMEOUT >= Duration::from_millis(1500));
        assert!(HANDSHAKE_TIMEOUT <= Duration::from_millis(2000));
        assert_eq!(ACK_TIMEOUT, Duration::from_millis(2000));
    }
}
