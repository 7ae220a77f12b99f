/// Simulator configuration
use crate::error::{Result, SimError};
use feedplay_core::Rect;
use feedplay_playback::AutoplayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub autoplay: AutoplayConfig,

    #[serde(default)]
    pub viewport: ViewportSettings,

    #[serde(default)]
    pub trace: TraceSettings,
}

/// Screen geometry of the simulated list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewportSettings {
    #[serde(default = "default_width")]
    pub width: i32,

    /// Full window height, status and navigation bars included
    #[serde(default = "default_window_height")]
    pub window_height: i32,

    /// Offset of the list's top edge inside the window
    #[serde(default = "default_list_top")]
    pub list_top: i32,

    #[serde(default = "default_list_height")]
    pub list_height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TraceSettings {
    #[serde(default)]
    pub format: TraceFormat,

    /// Also print preparation requests and released items
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    #[default]
    Text,
    Json,
}

impl ViewportSettings {
    pub fn window_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.window_height)
    }

    pub fn list_rect(&self) -> Rect {
        Rect::from_size(0, self.list_top, self.width, self.list_height)
    }
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            window_height: default_window_height(),
            list_top: default_list_top(),
            list_height: default_list_height(),
        }
    }
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            format: TraceFormat::Text,
            verbose: false,
        }
    }
}

impl SimConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `feedplay.toml` in the working directory and is
    /// skipped when that file does not exist. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("feedplay.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. FEEDPLAY_AUTOPLAY__STRATEGY
        settings = settings.add_source(
            config::Environment::with_prefix("FEEDPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| SimError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SimError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.autoplay.validate()?;

        let viewport = &self.viewport;
        if viewport.width <= 0 || viewport.list_height <= 0 {
            return Err(SimError::Config(
                "viewport width and list height must be positive".to_string(),
            ));
        }

        if !viewport.window_rect().contains(&viewport.list_rect()) {
            return Err(SimError::Config(format!(
                "list ({}..{}) does not fit in a window of height {}",
                viewport.list_top,
                viewport.list_top + viewport.list_height,
                viewport.window_height
            )));
        }

        Ok(())
    }
}

// Default values
fn default_width() -> i32 {
    1080
}

fn default_window_height() -> i32 {
    2340
}

fn default_list_top() -> i32 {
    120
}

fn default_list_height() -> i32 {
    2000
}
