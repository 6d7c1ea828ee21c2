//! Cubelets for N×N×N twisty cube renderers.
//!
//! A [`Cubelet`] is one cell of an `order × order × order` assembly. It owns a
//! frame mesh plus a sticker and backing mirror on every face that lies on the
//! outside of the assembly, converts between grid vectors and linear indices,
//! and reports which colour faces a given world direction after rotation.
//!
//! Rendering is left to the host scene graph; the types in [`scene`] are plain
//! data for it to read.

#[macro_use]
extern crate lazy_static;

pub mod assembly;
pub mod config;
mod cubelet;
mod error;
pub mod face;
pub mod geometry;
pub mod grid;
pub mod material;
mod resources;
pub mod scene;

pub use assembly::{Assembly, Layers, Twist};
pub use config::CubeletConfig;
pub use cubelet::{Cubelet, StickCommand, Sticker};
pub use error::{ConfigError, CubeletError, NotationError};
pub use face::{Axis, Face};
pub use material::{Material, MaterialRegistry, Rgb, Shading};
pub use resources::Resources;

/// Re-export of the math library used for all vectors and rotations.
pub use cgmath;

/// Small floating-point value used for comparisons.
pub const EPSILON: f32 = 0.0001;

/// Largest supported assembly order.
pub const MAX_ORDER: u32 = 32;

/// Color tag reported for a sticker that is missing or hidden.
pub const UNKNOWN_COLOR: char = '?';
