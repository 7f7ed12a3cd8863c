//! Configuration for the stardrift terminal background.
//!
//! The configuration lives in `config.toml` inside the platform config
//! directory. Every key is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use stardrift_core::{AnimationSpeed, FieldSettings};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Frame rate bounds accepted from the configuration.
const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;
/// Largest accepted `field.max_stars`.
pub const MAX_STARS: usize = 2000;
/// Largest accepted `field.meteor_count`.
pub const MAX_METEORS: usize = 50;

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The platform offers no home or config directory.
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per second for the animation loop.
    pub fps: u32,
    /// Animation speed.
    pub speed: AnimationSpeed,
    /// Forces the reduced-motion preference on or off. Unset defers to the
    /// environment.
    pub reduced_motion: Option<bool>,
    /// Surface pixels per terminal half-block pixel.
    pub pixel_scale: f32,
    /// Particle population tunables.
    pub field: FieldSection,
}

/// The `[field]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldSection {
    /// Star count cap, at most [`MAX_STARS`].
    pub max_stars: usize,
    /// Surface pixels per star.
    pub area_per_star: f32,
    /// Meteor pool size, at most [`MAX_METEORS`].
    pub meteor_count: usize,
}

impl Default for FieldSection {
    fn default() -> Self {
        let defaults = FieldSettings::default();
        Self {
            max_stars: defaults.max_stars,
            area_per_star: defaults.area_per_star,
            meteor_count: defaults.meteor_count,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            speed: AnimationSpeed::default(),
            reduced_motion: None,
            pixel_scale: 6.0,
            field: FieldSection::default(),
        }
    }
}

impl Config {
    /// Platform config directory for stardrift.
    pub fn project_dirs() -> Result<ProjectDirs, ConfigError> {
        ProjectDirs::from("", "", "stardrift").ok_or(ConfigError::NoConfigDir)
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load the configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no configuration at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text, normalizing out-of-range values.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(contents)?;
        Ok(config.normalized())
    }

    /// Settings for the particle field.
    pub fn field_settings(&self) -> FieldSettings {
        FieldSettings {
            max_stars: self.field.max_stars,
            area_per_star: self.field.area_per_star,
            meteor_count: self.field.meteor_count,
            speed: self.speed,
        }
    }

    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        if !is_positive(self.pixel_scale) {
            self.pixel_scale = defaults.pixel_scale;
        }
        if !is_positive(self.field.area_per_star) {
            self.field.area_per_star = defaults.field.area_per_star;
        }
        self.field.max_stars = self.field.max_stars.min(MAX_STARS);
        self.field.meteor_count = self.field.meteor_count.min(MAX_METEORS);
        self
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
