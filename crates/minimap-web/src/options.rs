#![forbid(unsafe_code)]

//! Constructor options passed from JS as a JSON string.

use minimap::{ConfigError, MinimapConfig};
use std::fmt;

/// Options that could not be turned into a [`MinimapConfig`].
#[derive(Debug)]
pub enum OptionsError {
    Json(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid minimap options: {err}"),
            Self::Config(err) => write!(f, "invalid minimap options: {err}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

/// Parse `{"line_height": 4, "visor_color": "#fafafa33", ...}`. Missing
/// fields keep their defaults; `None` or a blank string means all defaults.
pub fn config_from_json(json: Option<&str>) -> Result<MinimapConfig, OptionsError> {
    let config = match json.map(str::trim) {
        None | Some("") => MinimapConfig::default(),
        Some(text) => serde_json::from_str(text).map_err(OptionsError::Json)?,
    };
    config.validate().map_err(OptionsError::Config)?;
    Ok(config)
}
