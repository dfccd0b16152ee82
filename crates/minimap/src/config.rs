#![forbid(unsafe_code)]

//! Minimap configuration.
//!
//! Values are fixed for the lifetime of a [`Minimap`](crate::Minimap): the
//! row height and right margin in particular are baked into every bitmap and
//! every line/pixel conversion, so they are read once at construction.
//!
//! Two environment variables override the defaults when the host opts in via
//! [`MinimapConfig::from_env`]:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MINIMAP_LINE_HEIGHT` | [`MinimapConfig::line_height`] |
//! | `MINIMAP_MARGIN_RIGHT` | [`MinimapConfig::margin_right`] |

use minimap_render::PackedRgba;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default pixel height of one document line.
pub const DEFAULT_LINE_HEIGHT: u32 = 4;
/// Default pixels reserved at the right edge of the content blit.
pub const DEFAULT_MARGIN_RIGHT: u32 = 2;
/// Default visor fill: `rgba(250, 250, 250, 0.2)`.
pub const DEFAULT_VISOR_COLOR: PackedRgba = PackedRgba::rgba(250, 250, 250, 51);

const ENV_LINE_HEIGHT: &str = "MINIMAP_LINE_HEIGHT";
const ENV_MARGIN_RIGHT: &str = "MINIMAP_MARGIN_RIGHT";

/// Rendering parameters for a minimap instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    /// Pixel height of one document line (also the font size).
    pub line_height: u32,
    /// Pixels reserved on the right of the content blit.
    pub margin_right: u32,
    /// Canvas fill drawn before each frame.
    pub background: PackedRgba,
    /// Color of rasterized text.
    pub text_color: PackedRgba,
    /// Visor overlay fill.
    pub visor_color: PackedRgba,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            margin_right: DEFAULT_MARGIN_RIGHT,
            background: PackedRgba::BLACK,
            text_color: PackedRgba::WHITE,
            visor_color: DEFAULT_VISOR_COLOR,
        }
    }
}

impl MinimapConfig {
    /// Set the per-line pixel height.
    #[must_use]
    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set the right margin.
    #[must_use]
    pub fn with_margin_right(mut self, margin_right: u32) -> Self {
        self.margin_right = margin_right;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, color: PackedRgba) -> Self {
        self.background = color;
        self
    }

    /// Set the text color.
    #[must_use]
    pub fn with_text_color(mut self, color: PackedRgba) -> Self {
        self.text_color = color;
        self
    }

    /// Set the visor fill color.
    #[must_use]
    pub fn with_visor_color(mut self, color: PackedRgba) -> Self {
        self.visor_color = color;
        self
    }

    /// Check values that would break geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_height == 0 {
            return Err(ConfigError::ZeroLineHeight);
        }
        Ok(())
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from a custom environment lookup.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_LINE_HEIGHT) {
            config.line_height = parse_px(ENV_LINE_HEIGHT, &value)?;
        }
        if let Some(value) = get_env(ENV_MARGIN_RIGHT) {
            config.margin_right = parse_px(ENV_MARGIN_RIGHT, &value)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_px(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        })
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `line_height` must be at least one pixel.
    ZeroLineHeight,
    /// An environment override did not parse as a pixel count.
    InvalidEnv { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLineHeight => write!(f, "line height must be at least 1px"),
            Self::InvalidEnv { key, value } => {
                write!(f, "{key}={value:?} is not a pixel count")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
