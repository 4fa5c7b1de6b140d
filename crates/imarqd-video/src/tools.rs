//! Resolution and timeout-bounded invocation of the external `ffmpeg`/
//! `ffprobe` binaries (`spec.md` §6, §5 "Cancellation and timeouts").

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{instrument, warn};

use crate::error::VideoError;

/// Default wall-clock timeout for a single external tool invocation
/// (`spec.md` §5: "default 180 s").
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Resolves the `ffmpeg` binary: `IMARQD_FFMPEG` env var, else `"ffmpeg"` on
/// `PATH` (matching `original_source`'s `FFMPEG_BIN` override).
#[must_use]
pub fn ffmpeg_bin() -> String {
    std::env::var("IMARQD_FFMPEG").unwrap_or_else(|_| "ffmpeg".to_string())
}

/// Resolves the `ffprobe` binary: `IMARQD_FFPROBE` env var, else `"ffprobe"`
/// on `PATH`.
#[must_use]
pub fn ffprobe_bin() -> String {
    std::env::var("IMARQD_FFPROBE").unwrap_or_else(|_| "ffprobe".to_string())
}

/// Runs `tool` with `args`, waiting up to `timeout`. On non-zero exit or
/// timeout, returns a [`VideoError`] carrying captured stderr (or empty, on
/// timeout, since stderr can't be drained from a killed process reliably).
#[instrument(skip(args), fields(tool))]
pub fn run(tool: &str, args: &[&str], timeout: Duration) -> Result<(), VideoError> {
    let mut child: Child = Command::new(tool)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            let output = child.wait_with_output()?;
            if status.success() {
                return Ok(());
            }
            return Err(VideoError::ToolFailure {
                tool: tool.to_string(),
                status: status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if start.elapsed() >= timeout {
            warn!(tool, ?timeout, "external tool timed out, killing");
            let _ = child.kill();
            let _ = child.wait();
            return Err(VideoError::Timeout { tool: tool.to_string(), after: timeout });
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Runs `tool` and captures its stdout, for probing (e.g. `ffprobe`'s
/// frame-rate query).
pub fn run_capture_stdout(tool: &str, args: &[&str], timeout: Duration) -> Result<String, VideoError> {
    let mut child: Child = Command::new(tool)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            let output = child.wait_with_output()?;
            if status.success() {
                return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
            }
            return Err(VideoError::ToolFailure {
                tool: tool.to_string(),
                status: status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(VideoError::Timeout { tool: tool.to_string(), after: timeout });
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}
