//! Bridge to the bundled `IconExtractor.exe` tool.
//!
//! The tool takes one executable path and prints the icon as a
//! `data:image/png;base64,...` string on stdout. [`IconExtractor::extract_icon`]
//! never fails: anything that goes wrong degrades to whatever stdout was
//! captured, usually `""`. [`IconExtractor::try_extract_icon`] exposes the
//! failure instead.

use std::process::Stdio;

use base64::Engine as _;
use tokio::process::Command;

use crate::config::{self, BridgeConfig};
use crate::error::CoreError;

pub use crate::config::BASE64_IMAGE_PREFIX;

/// Runs the external icon tool. Each call spawns an independent process.
#[derive(Debug, Clone, Default)]
pub struct IconExtractor {
    config: BridgeConfig,
}

impl IconExtractor {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Extract the icon of `file_path` as a base64 data URI, or `""` when no
    /// icon could be obtained.
    ///
    /// Paths that are empty or do not end in `.exe` resolve to `""` without
    /// spawning anything. A non-zero exit still yields the captured stdout.
    pub async fn extract_icon(&self, file_path: &str) -> String {
        match self.try_extract_icon(file_path).await {
            Ok(output) => output,
            Err(CoreError::InvalidInput(reason)) => {
                tracing::debug!("Skipping icon extraction: {reason}");
                String::new()
            }
            Err(e) => {
                tracing::warn!("Icon extraction for {file_path} failed: {e}");
                String::new()
            }
        }
    }

    /// Strict form of [`extract_icon`](Self::extract_icon).
    ///
    /// Returns `Ok` with the tool's stdout whenever the tool ran to completion,
    /// whatever its exit status. Errors are reserved for rejected input, a tool
    /// that could not be launched, and a run that exceeded the configured timeout.
    pub async fn try_extract_icon(&self, file_path: &str) -> Result<String, CoreError> {
        validate_executable_path(file_path)?;

        let mut cmd = Command::new(&self.config.tool_path);
        cmd.arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            "Running {} for {file_path}",
            self.config.tool_path.display()
        );

        let output = match self.config.timeout {
            None => cmd.output().await?,
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    CoreError::Timeout(format!(
                        "icon tool did not finish within {}ms",
                        limit.as_millis()
                    ))
                })??,
        };

        if !output.status.success() {
            tracing::warn!(
                "Icon tool exited with {} for {file_path}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Extract the icon of `file_path` using the default tool location.
pub async fn extract_icon(file_path: &str) -> String {
    IconExtractor::default().extract_icon(file_path).await
}

fn validate_executable_path(file_path: &str) -> Result<(), CoreError> {
    if file_path.is_empty() {
        return Err(CoreError::InvalidInput("empty executable path".into()));
    }
    if !file_path.ends_with(config::EXECUTABLE_EXTENSION) {
        return Err(CoreError::InvalidInput(format!(
            "{file_path} does not end with {}",
            config::EXECUTABLE_EXTENSION
        )));
    }
    Ok(())
}

/// Return the part of a Windows path after the last `\`.
///
/// Input without a backslash comes back unchanged; `/` is not a separator.
pub fn extract_filename(path: &str) -> &str {
    match path.rfind(config::WINDOWS_PATH_SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Whether `s` looks like the tool's PNG data URI.
pub fn is_icon_data_uri(s: &str) -> bool {
    s.len() > BASE64_IMAGE_PREFIX.len() && s.starts_with(BASE64_IMAGE_PREFIX)
}

/// Decode the image bytes from tool output, with or without the data-URI prefix.
pub fn decode_icon_data(s: &str) -> Result<Vec<u8>, CoreError> {
    let payload = s.strip_prefix(BASE64_IMAGE_PREFIX).unwrap_or(s).trim();
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}
