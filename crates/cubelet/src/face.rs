//! Faces and axes of a cube.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Euler, Rad, Vector3};

use crate::grid::round_half_up;

/// A 3-dimensional axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns an integer index for this axis; X = 0, Y = 1, Z = 2.
    pub const fn index(self) -> usize {
        self as usize
    }
    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vector3<f32>) -> f32 {
        v[self.index()]
    }
    /// Returns the positive unit vector along this axis.
    pub fn unit(self) -> Vector3<f32> {
        let mut ret = Vector3::new(0.0, 0.0, 0.0);
        ret[self.index()] = 1.0;
        ret
    }
}

/// A face of a cube, which doubles as a color tag.
///
/// The discriminant is the face's slot index on a cubelet.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[repr(u8)]
pub enum Face {
    /// Left (−X).
    L = 0,
    /// Right (+X).
    R = 1,
    /// Down (−Y).
    D = 2,
    /// Up (+Y).
    U = 3,
    /// Back (−Z).
    B = 4,
    /// Front (+Z).
    F = 5,
}

/// Sticker orientation for each face, indexed by [`Face::index()`].
///
/// Stickers are modeled facing +Z, so each entry turns +Z onto the face
/// normal. F uses a full turn rather than none so that its mirror still flips.
const STICKER_ROTATIONS: [QuarterTurns; 6] = [
    QuarterTurns([0, -1, 0]),
    QuarterTurns([0, 1, 0]),
    QuarterTurns([1, 0, 0]),
    QuarterTurns([-1, 0, 0]),
    QuarterTurns([2, 0, 0]),
    QuarterTurns([4, 0, 0]),
];

impl Face {
    /// All faces, in slot order.
    pub const ALL: [Face; 6] = [Face::L, Face::R, Face::D, Face::U, Face::B, Face::F];

    /// Returns the slot index of this face (0..6).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis perpendicular to this face.
    pub const fn axis(self) -> Axis {
        match self {
            Face::L | Face::R => Axis::X,
            Face::D | Face::U => Axis::Y,
            Face::B | Face::F => Axis::Z,
        }
    }
    /// Returns the sign of the face normal along its axis (either -1.0 or 1.0).
    pub const fn sign(self) -> f32 {
        match self {
            Face::L | Face::D | Face::B => -1.0,
            Face::R | Face::U | Face::F => 1.0,
        }
    }
    /// Returns the outward unit normal of this face.
    pub fn vector(self) -> Vector3<f32> {
        self.axis().unit() * self.sign()
    }

    /// Returns the single-character color tag for this face.
    pub const fn symbol(self) -> char {
        match self {
            Face::L => 'L',
            Face::R => 'R',
            Face::D => 'D',
            Face::U => 'U',
            Face::B => 'B',
            Face::F => 'F',
        }
    }
    /// Returns the face with the given single-character color tag.
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.symbol() == c)
    }
    /// Returns a human-friendly name for this face.
    pub const fn name(self) -> &'static str {
        match self {
            Face::L => "left",
            Face::R => "right",
            Face::D => "down",
            Face::U => "up",
            Face::B => "back",
            Face::F => "front",
        }
    }

    /// Returns the faces pointing right and up on screen when looking at this
    /// face from outside the cube, with U on top for side faces and F towards
    /// the bottom edge of U.
    pub const fn screen_axes(self) -> (Face, Face) {
        match self {
            Face::L => (Face::F, Face::U),
            Face::R => (Face::B, Face::U),
            Face::D => (Face::R, Face::F),
            Face::U => (Face::R, Face::B),
            Face::B => (Face::L, Face::U),
            Face::F => (Face::R, Face::U),
        }
    }

    /// Returns the rotation that turns a +Z-facing sticker onto this face.
    pub fn sticker_rotation(self) -> QuarterTurns {
        STICKER_ROTATIONS[self.index()]
    }

    /// Classifies a vector by the first nonzero component after rounding
    /// (ties towards positive infinity), checking −X, +X, −Y, +Y, −Z, +Z in that order.
    ///
    /// This is only meaningful for vectors that are (nearly) axis-aligned.
    pub fn classify(v: Vector3<f32>) -> Option<Self> {
        let [x, y, z] = Into::<[f32; 3]>::into(v).map(round_half_up);
        if x < 0.0 {
            Some(Face::L)
        } else if x > 0.0 {
            Some(Face::R)
        } else if y < 0.0 {
            Some(Face::D)
        } else if y > 0.0 {
            Some(Face::U)
        } else if z < 0.0 {
            Some(Face::B)
        } else if z > 0.0 {
            Some(Face::F)
        } else {
            None
        }
    }
}

/// Rotation about each of the X, Y, and Z axes, in quarter turns.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct QuarterTurns(pub [i8; 3]);
impl QuarterTurns {
    /// Returns whether there is no rotation about any axis.
    pub fn is_zero(self) -> bool {
        self.0 == [0; 3]
    }
    /// Returns the rotation as XYZ Euler angles.
    pub fn to_euler(self) -> Euler<Rad<f32>> {
        let [x, y, z] = self.0.map(|q| Rad(q as f32 * FRAC_PI_2));
        Euler::new(x, y, z)
    }
    /// Returns the rotation for a mesh facing back the other way: a half turn
    /// is added on every nonzero axis, or about Y if there are none.
    #[must_use]
    pub fn reversed(self) -> Self {
        let ret = Self(self.0.map(|q| if q == 0 { 0 } else { q + 2 }));
        if ret.is_zero() {
            Self([0, 2, 0])
        } else {
            ret
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Matrix3};
    use strum::IntoEnumIterator;

    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < crate::EPSILON, "{a:?} != {b:?}");
    }

    #[test]
    fn test_face_slot_order() {
        for (i, face) in Face::iter().enumerate() {
            assert_eq!(i, face.index());
            assert_eq!(Face::ALL[i], face);
        }
    }

    #[test]
    fn test_face_tags() {
        for face in Face::iter() {
            assert_eq!(face.to_string(), face.symbol().to_string());
            assert_eq!(Ok(face), face.to_string().parse());
            assert_eq!(Some(face), Face::from_symbol(face.symbol()));
        }
        assert_eq!(None, Face::from_symbol('x'));
        assert!("X".parse::<Face>().is_err());
        assert!("".parse::<Face>().is_err());
    }

    #[test]
    fn test_face_vectors() {
        assert_eq!(Vector3::new(-1.0, 0.0, 0.0), Face::L.vector());
        assert_eq!(Vector3::new(0.0, 1.0, 0.0), Face::U.vector());
        assert_eq!(Vector3::new(0.0, 0.0, 1.0), Face::F.vector());
        for face in Face::iter() {
            assert_eq!(1.0, face.vector().magnitude());
            assert_eq!(Some(face), Face::classify(face.vector()));
        }
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(None, Face::classify(Vector3::new(0.0, 0.0, 0.0)));
        assert_eq!(None, Face::classify(Vector3::new(0.4, -0.4, 0.2)));
        assert_eq!(Some(Face::R), Face::classify(Vector3::new(0.9, -0.7, 0.0)));
        assert_eq!(Some(Face::D), Face::classify(Vector3::new(-0.1, -0.7, 1.0)));
        assert_eq!(Some(Face::F), Face::classify(Vector3::new(1e-7, -1e-7, 0.99)));

        // Halves round towards positive infinity.
        assert_eq!(Some(Face::U), Face::classify(Vector3::new(-0.5, 0.9, 0.0)));
        assert_eq!(Some(Face::R), Face::classify(Vector3::new(0.5, 0.9, 0.0)));
        assert_eq!(None, Face::classify(Vector3::new(-0.5, -0.5, -0.5)));
    }

    #[test]
    fn test_screen_axes_are_perpendicular() {
        for face in Face::iter() {
            let (right, up) = face.screen_axes();
            // right × up points out of the screen, towards the viewer
            assert_close(right.vector().cross(up.vector()), face.vector());
        }
    }

    #[test]
    fn test_sticker_rotation_faces_outward() {
        for face in Face::iter() {
            let rot = Matrix3::from(face.sticker_rotation().to_euler());
            assert_close(rot * Vector3::unit_z(), face.vector());
        }
    }

    #[test]
    fn test_reversed_rotation_faces_inward() {
        for face in Face::iter() {
            let rot = Matrix3::from(face.sticker_rotation().reversed().to_euler());
            assert_close(rot * Vector3::unit_z(), -face.vector());
        }
        assert_eq!(QuarterTurns([0, 2, 0]), QuarterTurns::default().reversed());
        assert_eq!(QuarterTurns([6, 0, 0]), Face::F.sticker_rotation().reversed());
    }
}
