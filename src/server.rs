//! Newline-delimited JSON relay over TCP.
//!
//! Each connection owns one [`Session`]. Clients send `{"command": "..."}`
//! per line and receive the session's [`Response`] as one JSON line, or
//! `{"error": "..."}` when the request could not be handed to the session.
//! Dropping the connection discards the game.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::logutil::escape_log;
use crate::metrics;
use crate::shell::{Response, Session};
use crate::validation::validate_command_line;

/// One client request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub command: String,
}

/// Sent instead of a [`Response`] when a request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayError {
    pub error: String,
}

/// Bind `config.bind` and serve until the listener fails.
pub async fn run(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| anyhow!("Failed to bind relay on {}: {}", config.bind, e))?;
    serve(listener, config).await
}

/// Accept loop over an already-bound listener.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<()> {
    info!("relay listening on {}", listener.local_addr()?);
    let slots = Arc::new(Semaphore::new(config.max_sessions));

    loop {
        let (mut stream, peer) = listener.accept().await?;
        let permit = match slots.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("relay full ({} sessions); refusing {}", config.max_sessions, peer);
                let line = error_line("server is full, try again later")?;
                let _ = stream.write_all(line.as_bytes()).await;
                continue;
            }
        };
        let max_line_bytes = config.max_line_bytes;
        tokio::spawn(async move {
            let _permit = permit;
            if let Err(e) = handle_connection(stream, max_line_bytes).await {
                warn!("relay connection {} failed: {}", peer, e);
            }
        });
    }
}

/// Drive one game over any byte stream until the peer hangs up.
pub async fn handle_connection<S>(stream: S, max_line_bytes: usize) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let id = Uuid::new_v4();
    let mut session = Session::new();
    let active = metrics::record_session_opened();
    info!("session {} opened ({} active)", id, active);

    let result = relay_lines(stream, &mut session, max_line_bytes, id).await;

    let active = metrics::record_session_closed();
    info!(
        "session {} closed after {} commands ({} active, mission complete: {}); totals {:?}",
        id,
        session.history().len(),
        active,
        session.mission_complete(),
        metrics::snapshot()
    );
    result
}

async fn relay_lines<S>(
    stream: S,
    session: &mut Session,
    max_line_bytes: usize,
    id: Uuid,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (rd, mut wr) = tokio::io::split(stream);
    let mut rd = BufReader::new(rd);
    // Room for JSON framing and escapes around the command itself.
    let frame_cap = (max_line_bytes as u64).saturating_mul(4).max(64);
    let mut line = String::new();

    loop {
        line.clear();
        let n = (&mut rd).take(frame_cap).read_line(&mut line).await?;
        if n == 0 {
            return Ok(());
        }
        if !line.ends_with('\n') && n as u64 == frame_cap {
            warn!("session {}: request frame over {} bytes, closing", id, frame_cap);
            wr.write_all(error_line("request too long")?.as_bytes()).await?;
            return Ok(());
        }
        let frame = line.trim();
        if frame.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<RelayRequest>(frame) {
            Err(e) => {
                warn!("session {}: bad request {}: {}", id, escape_log(frame), e);
                error_line(&format!("bad json: {e}"))?
            }
            Ok(req) => match validate_command_line(&req.command, max_line_bytes) {
                Err(e) => {
                    warn!("session {}: rejected input {}: {}", id, escape_log(&req.command), e);
                    error_line(&e.to_string())?
                }
                Ok(command) => {
                    let response = session.process(&command);
                    debug!("session {} -> {}", id, escape_log(&response.result));
                    response_line(&response)?
                }
            },
        };
        wr.write_all(reply.as_bytes()).await?;
        wr.flush().await?;
    }
}

fn response_line(response: &Response) -> Result<String> {
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    Ok(line)
}

fn error_line(message: &str) -> Result<String> {
    let mut line = serde_json::to_string(&RelayError {
        error: message.to_string(),
    })?;
    line.push('\n');
    Ok(line)
}
