//! Connection factory for the control daemon socket.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

use crate::command::ChannelCommand;
use crate::config::RetryConfig;
use crate::downstream::backoff::backoff_delay;
use crate::observability::metrics;

/// Errors from forwarding a command to the control daemon.
///
/// All variants are request-scoped; none terminate the process.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("control daemon unavailable after {attempts} dial attempts: {source}")]
    DaemonUnavailable { attempts: u32, source: io::Error },

    #[error("failed to dial control daemon socket: {0}")]
    Dial(io::Error),

    #[error("failed to write command to control daemon: {0}")]
    Write(io::Error),
}

/// Dials the daemon socket fresh for every command.
///
/// The connection is written once and dropped; it is never stored, shared,
/// or reused across requests.
pub struct DaemonClient {
    socket_path: PathBuf,
    retry: RetryConfig,
}

impl DaemonClient {
    pub fn new(socket_path: impl Into<PathBuf>, retry: RetryConfig) -> Self {
        Self {
            socket_path: socket_path.into(),
            retry,
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Serialize and deliver one command: dial (with bounded retry on
    /// transient failures), one write, shut down the stream.
    ///
    /// The write happens only after a dial succeeds, so a retried dial can
    /// never duplicate a command.
    pub async fn send(&self, command: &ChannelCommand) -> Result<(), ForwardError> {
        let mut stream = self.dial().await?;
        let encoded = command.encode();

        stream
            .write_all(encoded.as_bytes())
            .await
            .map_err(ForwardError::Write)?;
        stream.shutdown().await.map_err(ForwardError::Write)?;

        metrics::record_forwarded();
        tracing::debug!(command = %encoded, "Command forwarded to control daemon");
        Ok(())
    }

    async fn dial(&self) -> Result<UnixStream, ForwardError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match UnixStream::connect(&self.socket_path).await {
                Ok(stream) => return Ok(stream),
                Err(e) if is_transient(&e) => {
                    if attempt >= max_attempts {
                        return Err(ForwardError::DaemonUnavailable {
                            attempts: attempt,
                            source: e,
                        });
                    }
                    let delay =
                        backoff_delay(attempt, self.retry.base_delay_ms, self.retry.max_delay_ms);
                    tracing::warn!(
                        socket = %self.socket_path.display(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient dial failure, backing off"
                    );
                    metrics::record_dial_retry();
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(ForwardError::Dial(e)),
            }
        }
    }
}

/// Dial errors worth retrying: the daemon not listening yet
/// (`ConnectionRefused`), its socket file not created yet (`NotFound`), or
/// the connection dropped mid-handshake.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::NotFound
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::WouldBlock
    )
}
