//! The keystroke helper subprocess.
//!
//! Reads UTF-8 command lines from stdin, synthesizes the corresponding OS
//! key events, and writes `OK`/`ERR` acks to stdout. See
//! `keystroke_inject::protocol` for the line grammar.

use keystroke_inject::protocol::{Command, InjectKey, Token};
use keystroke_inject::{platform_synth, InjectConfig, KeySynth};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    let mut synth: Box<dyn KeySynth> = match platform_synth(InjectConfig::default()) {
        Ok(synth) => Box::new(synth),
        Err(err) => {
            tracing::error!(error = %err, "helper backend init failed");
            std::process::exit(1);
        }
    };

    if let Err(err) = write_line(&mut stdout, "READY").await {
        tracing::error!(error = %err, "failed to write READY handshake");
        std::process::exit(1);
    }
    tracing::info!("helper ready");

    let mut line = String::new();
    loop {
        line.clear();
        let read = match stdin.read_line(&mut line).await {
            Ok(0) => {
                tracing::info!("stdin closed, exiting");
                break;
            }
            Ok(n) => n,
            Err(err) => {
                tracing::error!(error = %err, "stdin read error, exiting");
                break;
            }
        };
        let _ = read;
        let trimmed = line.trim_end_matches(['\n', '\r']);

        if let Some(command) = Command::parse(trimmed) {
            match command {
                Command::Exit => {
                    tracing::info!("received __EXIT__, terminating");
                    break;
                }
                Command::Ping => {
                    tracing::debug!("ping");
                    if write_line(&mut stdout, "OK").await.is_err() {
                        break;
                    }
                    continue;
                }
            }
        }

        tracing::debug!(line = %trimmed, "dispatching");
        let ack = match dispatch_line(synth.as_mut(), trimmed) {
            Ok(()) => "OK",
            Err(err) => {
                tracing::warn!(error = %err, line = %trimmed, "command failed");
                "ERR"
            }
        };
        if write_line(&mut stdout, ack).await.is_err() {
            tracing::error!("stdout closed, exiting");
            break;
        }
    }
}

fn dispatch_line(synth: &mut dyn KeySynth, line: &str) -> keystroke_inject::Result<()> {
    for token in keystroke_inject::protocol::tokenize(line) {
        dispatch_token(synth, token)?;
    }
    Ok(())
}

fn dispatch_token(synth: &mut dyn KeySynth, token: Token) -> keystroke_inject::Result<()> {
    match token {
        Token::Char(ch) if ch == '\t' => synth.key(InjectKey::Tab),
        Token::Char(ch) => synth.unicode_char(ch),
        Token::Key(key) => synth.key(key),
        Token::ControlKey(key) => synth.control_key(key),
        Token::ControlChord(letter) => synth.control_chord(letter),
    }
}

async fn write_line<W: AsyncWriteExt + Unpin>(out: &mut W, line: &str) -> std::io::Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
