//! Colorizer configuration
//!
//! Read from `~/.config/blockbands/config.yaml`, or from a path given on the
//! command line. Every key is optional:
//!
//! ```yaml
//! regionColor: "#80808014"
//! regionBorder: "#80808066"
//! colorPolicy: depth
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::palette::{Color, ColorPolicy, REGION_BORDER, REGION_COLOR};

/// User-facing settings, as written in the YAML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorizerConfig {
    /// Region background, `#RRGGBB` or `#RRGGBBAA`
    #[serde(default = "default_region_color")]
    pub region_color: String,
    /// Region border color
    #[serde(default = "default_region_border")]
    pub region_border: String,
    #[serde(default)]
    pub color_policy: ColorPolicy,
}

fn default_region_color() -> String {
    format!("{}", REGION_COLOR)
}

fn default_region_border() -> String {
    format!("{}", REGION_BORDER)
}

impl Default for ColorizerConfig {
    fn default() -> Self {
        Self {
            region_color: default_region_color(),
            region_border: default_region_border(),
            color_policy: ColorPolicy::default(),
        }
    }
}

impl ColorizerConfig {
    /// Load config from the user config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Region background, or the default if the configured value is invalid
    pub fn region_color(&self) -> Color {
        resolve_color("regionColor", &self.region_color, REGION_COLOR)
    }

    pub fn region_border(&self) -> Color {
        resolve_color("regionBorder", &self.region_border, REGION_BORDER)
    }
}

fn resolve_color(key: &str, value: &str, fallback: Color) -> Color {
    Color::from_hex(value).unwrap_or_else(|e| {
        tracing::warn!("Invalid {} '{}': {}; using {}", key, value, e, fallback);
        fallback
    })
}
