use std::time::Duration;

pub const DEFAULT_FOLDER_PATH: &str = "dev/CHATDROID";
pub const DEFAULT_FILE_NAME: &str = "Chat";
pub const DEFAULT_SHEET_COLUMNS: &str = "A:Z";

/// Where the chat sheet lives and how often to re-read it.
///
/// **Environment Variables:**
/// - `CHATDROID_FOLDER_PATH` - slash-separated folder path (default `dev/CHATDROID`)
/// - `CHATDROID_FILE_NAME` - spreadsheet name inside that folder (default `Chat`)
/// - `CHATDROID_SHEET_COLUMNS` - column span to read (default `A:Z`)
/// - `CHATDROID_REFRESH_SECS` - refresh interval; unset or 0 means refresh once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub folder_path: String,
    pub file_name: String,
    pub columns: String,
    pub refresh_interval: Option<Duration>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            folder_path: DEFAULT_FOLDER_PATH.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            columns: DEFAULT_SHEET_COLUMNS.to_string(),
            refresh_interval: None,
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let refresh_interval = value("CHATDROID_REFRESH_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CHATDROID_REFRESH_SECS value '{}'", raw);
                    None
                }
            }
        });

        Self {
            folder_path: value("CHATDROID_FOLDER_PATH").unwrap_or(defaults.folder_path),
            file_name: value("CHATDROID_FILE_NAME").unwrap_or(defaults.file_name),
            columns: value("CHATDROID_SHEET_COLUMNS").unwrap_or(defaults.columns),
            refresh_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> FeedConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FeedConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), FeedConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("CHATDROID_FOLDER_PATH", "/team/chat/"),
            ("CHATDROID_FILE_NAME", "Log"),
            ("CHATDROID_SHEET_COLUMNS", "A:D"),
            ("CHATDROID_REFRESH_SECS", "30"),
        ]);

        assert_eq!(config.folder_path, "/team/chat/");
        assert_eq!(config.file_name, "Log");
        assert_eq!(config.columns, "A:D");
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_blank_or_invalid_interval_means_once() {
        for raw in ["0", "  ", "soon"] {
            let config = config_from(&[("CHATDROID_REFRESH_SECS", raw)]);
            assert_eq!(config.refresh_interval, None, "value {raw:?}");
        }
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("CHATDROID_FILE_NAME", " ")]);
        assert_eq!(config.file_name, DEFAULT_FILE_NAME);
    }
}
