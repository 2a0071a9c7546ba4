use crate::error::OverlayError;
use crate::render::style::OverlayStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default height budget of the overlay, in surface units.
pub const DEFAULT_MAX_HEIGHT: f32 = 350.0;
pub const DEFAULT_CONTAINER_WIDTH: f32 = 800.0;

/// Layout and styling of rendered overlays, read from YAML.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub container_width: f32,
    pub max_height: f32,
    /// Label font; the bundled DejaVu Sans when unset.
    pub font_path: Option<PathBuf>,
    pub style: OverlayStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            container_width: DEFAULT_CONTAINER_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            font_path: None,
            style: OverlayStyle::default(),
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OverlayError> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| OverlayError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| OverlayError::Config {
            path: path_ref.to_path_buf(),
            source,
        })
    }
}
