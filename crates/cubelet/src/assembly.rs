//! Full `order × order × order` assembly of cubelets, with layer twists.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use itertools::Itertools;

use crate::{Axis, Cubelet, CubeletError, Face, NotationError, Resources};

/// Layers of the assembly moved by a twist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layers {
    /// Single layer, counting from 1 at the twisted face.
    Single(u32),
    /// Every layer; rotates the whole assembly.
    All,
}

/// Twist of one or more layers of an assembly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Face that the twist is seen from.
    pub face: Face,
    /// Layers to move.
    pub layers: Layers,
    /// Number of clockwise quarter turns as seen from `face`. Negative values
    /// are counterclockwise.
    pub quarter_turns: i8,
}
impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut quarter_turns = self.quarter_turns.rem_euclid(4);
        match self.layers {
            Layers::Single(1) => write!(f, "{}", self.face)?,
            Layers::Single(layer) => write!(f, "{layer}{}", self.face)?,
            Layers::All => {
                let letter = match self.face.axis() {
                    Axis::X => 'x',
                    Axis::Y => 'y',
                    Axis::Z => 'z',
                };
                if self.face.sign() < 0.0 {
                    quarter_turns = (4 - quarter_turns) % 4;
                }
                write!(f, "{letter}")?;
            }
        }
        match quarter_turns {
            0 => write!(f, "0"),
            1 => Ok(()),
            2 => write!(f, "2"),
            _ => write!(f, "'"),
        }
    }
}
impl FromStr for Twist {
    type Err = NotationError;

    /// Parses a move such as `R`, `U'`, `F2`, `2R` (second layer from R), or
    /// `x` (whole-assembly rotation).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (prefix, rest) = s.split_at(digits_end);
        let mut chars = rest.chars();
        let letter = chars.next().ok_or_else(|| match prefix {
            "" => NotationError::Empty,
            _ => NotationError::BadLayer(s.to_string()),
        })?;
        let suffix = chars.as_str();

        let quarter_turns = match suffix {
            "" => 1,
            "'" => -1,
            "2" | "2'" => 2,
            _ => {
                return Err(NotationError::BadSuffix {
                    token: s.to_string(),
                    suffix: suffix.to_string(),
                });
            }
        };

        let rotation_face = match letter {
            'x' => Some(Face::R),
            'y' => Some(Face::U),
            'z' => Some(Face::F),
            _ => None,
        };
        if let Some(face) = rotation_face {
            if !prefix.is_empty() {
                return Err(NotationError::LayerOnRotation(s.to_string()));
            }
            return Ok(Twist::new(face, Layers::All, quarter_turns));
        }

        let face = Face::from_symbol(letter).ok_or(NotationError::UnknownFace(letter))?;
        let layer = match prefix {
            "" => 1,
            _ => prefix
                .parse::<u32>()
                .ok()
                .filter(|&layer| layer > 0)
                .ok_or_else(|| NotationError::BadLayer(s.to_string()))?,
        };
        Ok(Twist::new(face, Layers::Single(layer), quarter_turns))
    }
}
impl Twist {
    /// Constructs a twist.
    pub fn new(face: Face, layers: Layers, quarter_turns: i8) -> Self {
        Self {
            face,
            layers,
            quarter_turns,
        }
    }
    /// Returns the twist that undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            // `i8::MIN` is a multiple of four, so wrapping leaves it unchanged.
            quarter_turns: self.quarter_turns.wrapping_neg(),
            ..self
        }
    }
    /// Returns the rotation applied to the moved cubelets.
    pub fn rotation(self) -> Quaternion<f32> {
        // Clockwise when seen from outside is negative about the face normal.
        let angle = Rad(-FRAC_PI_2 * self.quarter_turns as f32);
        Quaternion::from_axis_angle(self.face.vector(), angle)
    }
}

/// Parses a whitespace-separated sequence of moves, such as `R U R' U'`.
pub fn parse_moves(s: &str) -> Result<Vec<Twist>, NotationError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Every cubelet in an `order × order × order` assembly.
#[derive(Debug, Clone)]
pub struct Assembly {
    resources: Arc<Resources>,
    cubelets: Vec<Cubelet>,
    /// Index into `cubelets` of the cubelet in each grid cell.
    slots: Vec<usize>,
}
impl Assembly {
    /// Constructs a solved assembly with one cubelet per grid cell.
    pub fn new(resources: Arc<Resources>) -> Result<Self, CubeletError> {
        let cubelets = (0..resources.grid.len())
            .map(|index| Cubelet::new(index, Arc::clone(&resources)))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "Constructed assembly of {} cubelets with {} stickers",
            cubelets.len(),
            cubelets.iter().map(|c| c.stickers().count()).sum::<usize>(),
        );
        let mut ret = Self {
            resources,
            cubelets,
            slots: vec![],
        };
        ret.update_slots();
        Ok(ret)
    }

    fn update_slots(&mut self) {
        self.slots = vec![0; self.cubelets.len()];
        for (i, cubelet) in self.cubelets.iter().enumerate() {
            self.slots[cubelet.index()] = i;
        }
    }

    /// Returns the resources shared by every cubelet.
    pub fn resources(&self) -> &Arc<Resources> {
        &self.resources
    }
    /// Returns the number of cubelets along each edge.
    pub fn order(&self) -> u32 {
        self.resources.order()
    }
    /// Returns every cubelet, in order of their initial index.
    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }
    /// Returns the cubelet currently in the cell with linear index `index`.
    pub fn cubelet_at(&self, index: usize) -> Option<&Cubelet> {
        self.cubelets.get(*self.slots.get(index)?)
    }
    /// Returns the cubelet currently in the cell with linear index `index`.
    ///
    /// Moving the cubelet through this reference does not update
    /// [`Assembly::cubelet_at()`].
    pub fn cubelet_at_mut(&mut self, index: usize) -> Option<&mut Cubelet> {
        self.cubelets.get_mut(*self.slots.get(index)?)
    }

    /// Applies a twist to the assembly.
    pub fn twist(&mut self, twist: Twist) -> Result<(), CubeletError> {
        log::trace!("Applying twist {twist}");
        let grid = self.resources.grid;
        let axis = twist.face.axis();
        let target = match twist.layers {
            Layers::Single(layer) => {
                if !(1..=grid.order()).contains(&layer) {
                    return Err(CubeletError::NoSuchLayer {
                        layer,
                        order: grid.order(),
                    });
                }
                Some(twist.face.sign() * (grid.half() - (layer - 1) as f32))
            }
            Layers::All => None,
        };

        let rotation = twist.rotation();
        let moved = self
            .cubelets
            .iter_mut()
            .filter(|c| target.is_none_or(|t| axis.component(c.vector()) == t));
        for cubelet in moved {
            cubelet.rotate(rotation)?;
        }
        self.update_slots();
        Ok(())
    }
    /// Applies a sequence of twists to the assembly.
    pub fn apply_moves(
        &mut self,
        twists: impl IntoIterator<Item = Twist>,
    ) -> Result<(), CubeletError> {
        twists.into_iter().try_for_each(|twist| self.twist(twist))
    }

    /// Returns the colors visible on `face`, row by row from the top left as
    /// seen from outside the assembly (see [`Face::screen_axes()`]).
    ///
    /// Hidden stickers are `None`.
    pub fn face_colors(&self, face: Face) -> Vec<Option<Face>> {
        let grid = self.resources.grid;
        let half = grid.half();
        let (right, up) = face.screen_axes();
        let coords = (0..grid.order()).map(|i| i as f32 - half);
        coords
            .clone()
            .rev()
            .cartesian_product(coords)
            .map(|(v, u)| {
                let vector: Vector3<f32> =
                    face.vector() * half + right.vector() * u + up.vector() * v;
                grid.index_of(vector)
                    .and_then(|index| self.cubelet_at(index))
                    .and_then(|cubelet| cubelet.color_at(face))
            })
            .collect()
    }

    /// Returns whether every face shows a single color.
    ///
    /// A face where every sticker is hidden counts as a single color.
    pub fn is_solved(&self) -> bool {
        Face::ALL
            .into_iter()
            .all(|face| self.face_colors(face).into_iter().all_equal())
    }

    /// Returns every cubelet to its initial cell and orientation and restores
    /// all stickers.
    pub fn reset(&mut self) -> Result<(), CubeletError> {
        for cubelet in &mut self.cubelets {
            cubelet.reset()?;
        }
        self.update_slots();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::CubeletConfig;

    fn assembly(order: u32) -> Assembly {
        let config = CubeletConfig {
            order,
            ..CubeletConfig::default()
        };
        Assembly::new(Arc::new(Resources::new(&config))).expect("valid assembly")
    }

    fn apply(assembly: &mut Assembly, moves: &str) {
        let twists = parse_moves(moves).expect("valid moves");
        assembly.apply_moves(twists).expect("valid twists");
    }

    fn face_string(assembly: &Assembly, face: Face) -> String {
        assembly
            .face_colors(face)
            .into_iter()
            .map(|c| c.map_or(crate::UNKNOWN_COLOR, Face::symbol))
            .collect()
    }

    #[test]
    fn test_new_assembly_is_solved() {
        for order in 1..=4 {
            let a = assembly(order);
            assert_eq!(order.pow(3) as usize, a.cubelets().len());
            assert!(a.is_solved());
            for face in Face::ALL {
                let expected = face.symbol().to_string().repeat(order.pow(2) as usize);
                assert_eq!(expected, face_string(&a, face));
            }
            for (i, c) in a.cubelets().iter().enumerate() {
                assert_eq!(i, c.index());
                assert_eq!(Some(i), a.cubelet_at(i).map(|c| c.initial_index()));
            }
        }
    }

    #[test]
    fn test_single_twist_net() {
        let mut a = assembly(3);
        apply(&mut a, "R");
        assert!(!a.is_solved());
        assert_eq!("UUFUUFUUF", face_string(&a, Face::U));
        assert_eq!("FFDFFDFFD", face_string(&a, Face::F));
        assert_eq!("UBBUBBUBB", face_string(&a, Face::B));
        assert_eq!("RRRRRRRRR", face_string(&a, Face::R));
        assert_eq!("LLLLLLLLL", face_string(&a, Face::L));

        let mut a = assembly(3);
        apply(&mut a, "U");
        assert_eq!("RRRFFFFFF", face_string(&a, Face::F));
        assert_eq!("BBBRRRRRR", face_string(&a, Face::R));
        assert_eq!("UUUUUUUUU", face_string(&a, Face::U));
    }

    #[test]
    fn test_twists_undo() {
        let mut a = assembly(3);
        apply(&mut a, "R U F' D2 L B'");
        assert!(!a.is_solved());
        apply(&mut a, "B L' D2 F U' R'");
        assert!(a.is_solved());

        // Sexy move has order 6.
        let mut a = assembly(3);
        for _ in 0..5 {
            apply(&mut a, "R U R' U'");
            assert!(!a.is_solved());
        }
        apply(&mut a, "R U R' U'");
        assert!(a.is_solved());
        for (i, c) in a.cubelets().iter().enumerate() {
            assert_eq!(i, c.index());
            for face in Face::ALL {
                assert_eq!(face, c.face_at(face));
            }
        }
    }

    #[test]
    fn test_inner_layers() {
        let mut a = assembly(3);
        apply(&mut a, "2R");
        assert_eq!("UFUUFUUFU", face_string(&a, Face::U));
        apply(&mut a, "2R'");
        assert!(a.is_solved());

        let mut a = assembly(4);
        apply(&mut a, "2F");
        assert_eq!("UUUUUUUULLLLUUUU", face_string(&a, Face::U));
        assert!(matches!(
            a.twist("5F".parse().expect("valid notation")),
            Err(CubeletError::NoSuchLayer { layer: 5, order: 4 }),
        ));
    }

    #[test]
    fn test_whole_rotation() {
        let mut a = assembly(3);
        apply(&mut a, "x");
        assert!(a.is_solved());
        assert_eq!("FFFFFFFFF", face_string(&a, Face::U));
        assert_eq!("DDDDDDDDD", face_string(&a, Face::F));
        apply(&mut a, "y2 z'");
        assert!(a.is_solved());
    }

    #[test]
    fn test_hidden_stickers() {
        let mut a = assembly(2);
        let corner = a.cubelet_at_mut(7).expect("corner");
        corner.stick(Face::U, "remove");
        corner.stick(Face::F, "L");
        assert_eq!("UUU?", face_string(&a, Face::U));
        assert_eq!("FLFF", face_string(&a, Face::F));
        assert!(!a.is_solved());

        a.reset().expect("reset");
        assert!(a.is_solved());
    }

    #[test]
    fn test_reset_after_twists() {
        let mut a = assembly(4);
        apply(&mut a, "R 2U' F2 x B");
        a.reset().expect("reset");
        assert!(a.is_solved());
        for (i, c) in a.cubelets().iter().enumerate() {
            assert_eq!(i, c.index());
            assert_eq!(Some(i), a.cubelet_at(i).map(|c| c.index()));
        }
    }

    #[test]
    fn test_parse_twists() {
        let parse = |s: &str| s.parse::<Twist>();
        assert_eq!(Ok(Twist::new(Face::R, Layers::Single(1), 1)), parse("R"));
        assert_eq!(Ok(Twist::new(Face::U, Layers::Single(1), -1)), parse("U'"));
        assert_eq!(Ok(Twist::new(Face::F, Layers::Single(1), 2)), parse("F2"));
        assert_eq!(Ok(Twist::new(Face::L, Layers::Single(12), 1)), parse("12L"));
        assert_eq!(Ok(Twist::new(Face::U, Layers::All, -1)), parse("y'"));

        assert_eq!(Err(NotationError::Empty), parse(""));
        assert_eq!(Err(NotationError::UnknownFace('Q')), parse("Q"));
        assert_eq!(Err(NotationError::BadLayer("0R".to_string())), parse("0R"));
        assert_eq!(Err(NotationError::BadLayer("3".to_string())), parse("3"));
        assert_eq!(
            Err(NotationError::LayerOnRotation("2x".to_string())),
            parse("2x"),
        );
        assert_eq!(
            Err(NotationError::BadSuffix {
                token: "R3".to_string(),
                suffix: "3".to_string(),
            }),
            parse("R3"),
        );
        assert!(parse_moves("R U Q").is_err());
        assert_eq!(Ok(vec![]), parse_moves("   "));
    }

    #[test]
    fn test_display_twists() {
        for s in ["R", "U'", "F2", "2B'", "x", "y2", "z'"] {
            let twist: Twist = s.parse().expect("valid notation");
            assert_eq!(s, twist.to_string());
        }
        assert_eq!("x'", Twist::new(Face::L, Layers::All, 1).to_string());
        assert_eq!("R'", Twist::new(Face::R, Layers::Single(1), 3).to_string());
        assert_eq!("R", Twist::new(Face::R, Layers::Single(1), -1).rev().to_string());
    }

    #[test]
    fn test_extreme_quarter_turns() {
        let twist = Twist::new(Face::L, Layers::All, i8::MIN);
        assert_eq!("x0", twist.to_string());
        assert_eq!(twist, twist.rev());
        assert_eq!("L", Twist::new(Face::L, Layers::Single(1), i8::MAX - 2).to_string());
        assert_eq!("y", Twist::new(Face::D, Layers::All, i8::MAX).to_string());
        assert_eq!(i8::MIN + 1, Twist::new(Face::U, Layers::All, i8::MAX).rev().quarter_turns);

        let mut a = assembly(2);
        a.twist(Twist::new(Face::R, Layers::Single(1), i8::MIN).rev())
            .expect("valid twist");
        assert!(a.is_solved());
    }
}
