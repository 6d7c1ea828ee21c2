//! Colors and materials shared by every cubelet in an assembly.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Face;
use crate::config::FaceColors;

/// 8-bit sRGB color, written as a hex string like `"#ff00ff"` in config
/// files.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// sRGB component values.
    pub rgb: [u8; 3],
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
impl FromStr for Rgb {
    type Err = hex::FromHexError;

    /// Parses `#rrggbb` or the shorthand `#rgb`. The `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        let expanded;
        let digits = if digits.len() == 3 {
            expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        } else {
            digits
        };
        let mut rgb = [0; 3];
        hex::decode_to_slice(digits, &mut rgb)?;
        Ok(Self { rgb })
    }
}
impl TryFrom<String> for Rgb {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
impl Rgb {
    /// Constructs a color from sRGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }
}

/// How a material responds to scene lighting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Diffuse shading; used for stickers.
    Lambert,
    /// Unlit flat color; used for mirrors and the core.
    Basic,
}

/// Material for a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name for debugging.
    pub name: String,
    /// Shading model.
    pub shading: Shading,
    /// Diffuse color.
    pub color: Rgb,
}
impl Material {
    fn new(name: impl Into<String>, shading: Shading, color: Rgb) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            shading,
            color,
        })
    }
}

/// Sticker and mirror materials for one face color.
#[derive(Debug, Clone)]
pub struct FaceMaterials {
    /// Shaded material for the sticker.
    pub lambert: Arc<Material>,
    /// Flat material for the mirror behind the sticker.
    pub basic: Arc<Material>,
}

/// Immutable set of materials, constructed once per assembly and shared by
/// every cubelet in it.
#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    core: Arc<Material>,
    faces: [FaceMaterials; 6],
}
impl MaterialRegistry {
    /// Constructs the registry from a core color and one color per face.
    pub fn new(core: Rgb, colors: &FaceColors) -> Self {
        Self {
            core: Material::new("core", Shading::Basic, core),
            faces: Face::ALL.map(|face| FaceMaterials {
                lambert: Material::new(format!("sticker {face}"), Shading::Lambert, colors[face]),
                basic: Material::new(format!("mirror {face}"), Shading::Basic, colors[face]),
            }),
        }
    }

    /// Returns the material for cubelet frames.
    pub fn core(&self) -> &Arc<Material> {
        &self.core
    }
    /// Returns the materials for a face color.
    pub fn face(&self, face: Face) -> &FaceMaterials {
        &self.faces[face.index()]
    }
    /// Returns the face color and its materials for a tag such as `"U"`, or
    /// `None` if the tag is not recognized. Tags are case-sensitive.
    pub fn get(&self, tag: &str) -> Option<(Face, &FaceMaterials)> {
        let face = tag.parse::<Face>().ok()?;
        Some((face, self.face(face)))
    }

    /// Returns the face color whose sticker material is `material` (by
    /// identity, not by value).
    pub fn face_of(&self, material: &Arc<Material>) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|&face| Arc::ptr_eq(&self.face(face).lambert, material))
    }
}
