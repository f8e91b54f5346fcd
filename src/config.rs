//! Runtime configuration, loaded from YAML.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::integration::{CameraSet, Disconnected, FrameSource, ImageFileSource};
use crate::inventory::DEFAULT_LOG_CAPACITY;
use crate::vision::{ColorRange, DEFAULT_MIN_AREA, FRAME_HEIGHT, FRAME_WIDTH, default_color_ranges};

/// Snapshot paths for each camera view. An unset view is treated as a
/// disconnected camera.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub field: Option<PathBuf>,
    pub discard: Option<PathBuf>,
    pub work: Option<PathBuf>,
}

impl CameraConfig {
    pub fn camera_set(&self) -> CameraSet {
        fn source(path: Option<&Path>) -> Box<dyn FrameSource> {
            match path {
                Some(path) => Box::new(ImageFileSource::new(path)),
                None => Box::new(Disconnected),
            }
        }
        CameraSet {
            field: source(self.field.as_deref()),
            discard: source(self.discard.as_deref()),
            work: source(self.work.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cameras: CameraConfig,
    /// Tracked classes, in display order.
    pub color_ranges: Vec<ColorRange>,
    pub min_area: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub log_capacity: usize,
    /// Directory for the per-run audit log files.
    pub log_dir: PathBuf,
    pub bind: String,
    pub tick_interval_ms: u64,
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cameras: CameraConfig::default(),
            color_ranges: default_color_ranges(),
            min_area: DEFAULT_MIN_AREA,
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            log_capacity: DEFAULT_LOG_CAPACITY,
            log_dir: PathBuf::from("backend/log"),
            bind: "0.0.0.0:5001".to_string(),
            tick_interval_ms: 50,
            jpeg_quality: 80,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.color_ranges.is_empty() {
            return Err(Error::Config("at least one color range is required".into()));
        }

        let mut seen = HashSet::new();
        for range in &self.color_ranges {
            if !seen.insert(range.name.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate color range '{}'",
                    range.name
                )));
            }
            if !range.is_valid() {
                return Err(Error::Config(format!(
                    "color range '{}' has a lower bound above its upper bound",
                    range.name
                )));
            }
        }

        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(Error::Config("frame size must be non-zero".into()));
        }
        if self.log_capacity == 0 {
            return Err(Error::Config("log_capacity must be at least 1".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::Config("jpeg_quality must be within 1..=100".into()));
        }
        Ok(())
    }
}
