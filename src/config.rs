//! Centralized constants and the injected configuration for the icon bridge.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wait used by `debounce` and `throttle` when no duration is given (milliseconds).
pub const DEFAULT_RATE_DURATION_MS: u64 = 500;

/// Extension a path must end with before the icon tool is invoked. Case-sensitive.
pub const EXECUTABLE_EXTENSION: &str = ".exe";

/// Separator recognized by `extract_filename`. Forward slashes are not.
pub const WINDOWS_PATH_SEPARATOR: char = '\\';

/// Prefix the icon tool puts in front of its base64 PNG payload.
pub const BASE64_IMAGE_PREFIX: &str = "data:image/png;base64,";

/// Location of the bundled icon tool, relative to the directory of the running executable.
pub const DEFAULT_TOOL_RELATIVE_PATH: &str = "../lib/IconExtractor.exe";

/// Default debounce/throttle duration as a [`Duration`].
pub const fn default_rate_duration() -> Duration {
    Duration::from_millis(DEFAULT_RATE_DURATION_MS)
}

/// Settings for [`crate::core::IconExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Path of the external icon tool binary.
    pub tool_path: PathBuf,
    /// Upper bound on how long a single tool run may take. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl BridgeConfig {
    /// Use an explicit tool path, with no timeout.
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
            timeout: None,
        }
    }

    /// Bound every tool run by `timeout`. A run that exceeds it is killed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve [`DEFAULT_TOOL_RELATIVE_PATH`] against `base_dir`.
    pub fn relative_to(base_dir: &Path) -> Self {
        Self::new(base_dir.join(DEFAULT_TOOL_RELATIVE_PATH))
    }
}

impl Default for BridgeConfig {
    /// Tool bundled next to the host executable. Falls back to a path relative
    /// to the working directory when the executable location is unknown.
    fn default() -> Self {
        match std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            Some(dir) => Self::relative_to(&dir),
            None => {
                tracing::debug!("Could not resolve current executable; using relative icon tool path");
                Self::new(DEFAULT_TOOL_RELATIVE_PATH)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_duration_is_half_a_second() {
        assert_eq!(default_rate_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_relative_to_joins_default_tool_path() {
        let cfg = BridgeConfig::relative_to(Path::new("/opt/starqi/bin"));
        assert_eq!(
            cfg.tool_path,
            PathBuf::from("/opt/starqi/bin/../lib/IconExtractor.exe")
        );
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn test_with_timeout_sets_bound() {
        let cfg = BridgeConfig::new("tool.exe").with_timeout(Duration::from_secs(3));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(3)));
        assert_eq!(cfg.tool_path, PathBuf::from("tool.exe"));
    }

    #[test]
    fn test_default_config_points_at_icon_extractor() {
        let cfg = BridgeConfig::default();
        assert!(cfg.tool_path.ends_with("IconExtractor.exe"));
        assert!(cfg.timeout.is_none());
    }
}
