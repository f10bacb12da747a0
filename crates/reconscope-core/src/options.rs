//! Configuration options for reconscope.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image_data::ImageOrigin;

/// Name given to the color array when converting decoded images.
pub const DEFAULT_COLOR_ARRAY_NAME: &str = "Color";

/// Configuration options for a reconstruction adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Convention used for the y axis of pixel queries.
    ///
    /// Image data is stored bottom-up. With [`ImageOrigin::UpperLeft`] a query
    /// at row `y` reads stored row `height - 1 - y`.
    pub pixel_origin: ImageOrigin,

    /// Name of the color array created when converting decoded images.
    pub color_array_name: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pixel_origin: ImageOrigin::UpperLeft,
            color_array_name: DEFAULT_COLOR_ARRAY_NAME.to_string(),
        }
    }
}

impl Options {
    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&contents)?;
        log::debug!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the pixel origin convention.
    #[must_use]
    pub fn with_pixel_origin(mut self, origin: ImageOrigin) -> Self {
        self.pixel_origin = origin;
        self
    }

    /// Sets the name used for converted color arrays.
    #[must_use]
    pub fn with_color_array_name(mut self, name: impl Into<String>) -> Self {
        self.color_array_name = name.into();
        self
    }
}
