use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_GREETING: [&str; 2] = [
    "Hello! How can I help you today?",
    "Please upload a file to get started.",
];

fn default_greeting() -> Vec<String> {
    DEFAULT_GREETING.iter().map(|s| s.to_string()).collect()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Root configuration, read from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DocgenConfig {
    /// Bot messages that open every conversation.
    #[serde(default = "default_greeting")]
    pub greeting: Vec<String>,
    /// Carry user values over to unchanged paths when the structure changes shape.
    #[serde(default)]
    pub preserve_inputs_on_reshape: bool,
    /// Where generated documents are written. Defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            preserve_inputs_on_reshape: false,
            output_dir: None,
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: DocgenConfig = toml::from_str("").unwrap();
        assert_eq!(config, DocgenConfig::default());
        assert_eq!(config.greeting.len(), 2);
        assert!(!config.preserve_inputs_on_reshape);
    }

    #[test]
    fn test_partial_toml() {
        let config: DocgenConfig = toml::from_str(
            r#"
            preserve_inputs_on_reshape = true
            greeting = ["Hi there"]
            "#,
        )
        .unwrap();
        assert!(config.preserve_inputs_on_reshape);
        assert_eq!(config.greeting, vec!["Hi there".to_string()]);
        assert_eq!(config.log_filter, "info");
    }
}
