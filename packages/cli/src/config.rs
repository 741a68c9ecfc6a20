use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trellis_compiler_html::RenderOptions;

pub const DEFAULT_CONFIG_NAME: &str = "trellis.config.json";

/// Trellis configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Indentation used when pretty-printing HTML
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Pretty-print HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Prefix HTML output with a doctype
    #[serde(default)]
    pub doctype: bool,

    /// Reject malformed element selectors instead of skipping bad tokens
    #[serde(default)]
    pub strict_selectors: bool,
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            doctype: self.doctype,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            pretty: default_pretty(),
            doctype: false,
            strict_selectors: false,
        }
    }
}
