//! Assembly configuration.
//!
//! Defaults are embedded from `default.yaml`; a user file may override any
//! subset of them.

use std::ops::Index;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Face, MAX_ORDER, Rgb};

const CONFIG_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_CONFIG_STR: &str = include_str!("default.yaml");

lazy_static! {
    static ref DEFAULT_CONFIG: CubeletConfig = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG_STR, CONFIG_FILE_FORMAT))
        .build()
        .and_then(|c| c.try_deserialize())
        .expect("error loading default config");
}

/// Configuration shared by every cubelet in an assembly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CubeletConfig {
    /// Number of cubelets along each edge of the assembly.
    pub order: u32,
    /// Distance between the centers of adjacent cubelets, in world units.
    pub cell_size: f32,
    /// Side length of a sticker, as a fraction of `cell_size`.
    pub sticker_scale: f32,
    /// Color of the frame of every cubelet.
    pub core_color: Rgb,
    /// Sticker color for each face.
    pub colors: FaceColors,
}
impl Default for CubeletConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}
impl CubeletConfig {
    /// Loads the default configuration, overridden by the file at `path` if
    /// one is given. The file format is determined by its extension.
    pub fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG_STR, CONFIG_FILE_FORMAT));
        if let Some(path) = path {
            log::debug!("Loading config from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }
        let ret: Self = builder.build()?.try_deserialize()?;
        ret.validate()?;
        Ok(ret)
    }

    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ORDER).contains(&self.order) {
            return Err(ConfigError::BadOrder {
                order: self.order,
                max: MAX_ORDER,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::BadCellSize(self.cell_size));
        }
        if !(self.sticker_scale > 0.0 && self.sticker_scale <= 1.0) {
            return Err(ConfigError::BadStickerScale(self.sticker_scale));
        }
        Ok(())
    }
}

/// Sticker color for each face.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceColors {
    /// Color for [`Face::L`].
    pub left: Rgb,
    /// Color for [`Face::R`].
    pub right: Rgb,
    /// Color for [`Face::D`].
    pub down: Rgb,
    /// Color for [`Face::U`].
    pub up: Rgb,
    /// Color for [`Face::B`].
    pub back: Rgb,
    /// Color for [`Face::F`].
    pub front: Rgb,
}
impl Default for FaceColors {
    fn default() -> Self {
        DEFAULT_CONFIG.colors
    }
}
impl Index<Face> for FaceColors {
    type Output = Rgb;

    fn index(&self, face: Face) -> &Rgb {
        match face {
            Face::L => &self.left,
            Face::R => &self.right,
            Face::D => &self.down,
            Face::U => &self.up,
            Face::B => &self.back,
            Face::F => &self.front,
        }
    }
}
