//! Single cell of an assembly.

use std::str::FromStr;
use std::sync::Arc;

use cgmath::{InnerSpace, Matrix4, Quaternion, Vector3};

use crate::material::FaceMaterials;
use crate::scene::{Mesh, Node};
use crate::{CubeletError, Face, Resources, UNKNOWN_COLOR, grid};

/// Sticker on one face of a cubelet, along with the mirror behind it.
#[derive(Debug, Clone)]
pub struct Sticker {
    mesh: Mesh,
    mirror: Mesh,
    original: Face,
    color: Face,
}
impl Sticker {
    fn new(face: Face, resources: &Resources) -> Self {
        let rotation = face.sticker_rotation();
        let materials = resources.materials.face(face);

        let mut mesh = Mesh::new(
            Arc::clone(&resources.geometry.sticker),
            Arc::clone(&materials.lambert),
        );
        mesh.rotation = rotation.to_euler();
        mesh.position = face.vector() * (resources.cell_size / 2.0);

        // The mirror sits outside the whole assembly, facing back in, so that
        // the sticker color is still visible through gaps during a twist.
        let mut mirror = Mesh::new(
            Arc::clone(&resources.geometry.mirror),
            Arc::clone(&materials.basic),
        );
        mirror.rotation = rotation.reversed().to_euler();
        mirror.position = mesh.position * (resources.order() + 1) as f32;

        Self {
            mesh,
            mirror,
            original: face,
            color: face,
        }
    }

    /// Returns the sticker mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
    /// Returns the mirror mesh behind the sticker.
    pub fn mirror(&self) -> &Mesh {
        &self.mirror
    }
    /// Returns the current color of the sticker.
    pub fn color(&self) -> Face {
        self.color
    }
    /// Returns the color the sticker had when it was constructed.
    pub fn original_color(&self) -> Face {
        self.original
    }
    /// Returns whether the sticker is visible.
    pub fn is_visible(&self) -> bool {
        self.mesh.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.mesh.visible = visible;
        self.mirror.visible = visible;
    }
    fn set_color(&mut self, color: Face, materials: &FaceMaterials) {
        self.color = color;
        self.mesh.material = Arc::clone(&materials.lambert);
        self.mirror.material = Arc::clone(&materials.basic);
    }
}

/// Change to a sticker, applied by [`Cubelet::stick()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StickCommand {
    /// Hide the sticker and its mirror.
    Remove,
    /// Show the sticker with its original color.
    Restore,
    /// Show the sticker with the given color.
    Color(Face),
}
impl FromStr for StickCommand {
    type Err = strum::ParseError;

    /// Parses `"remove"`, an empty string (restore), or a color tag such as
    /// `"U"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove" => Ok(Self::Remove),
            "" => Ok(Self::Restore),
            tag => tag.parse().map(Self::Color),
        }
    }
}

/// One cell of an `order × order × order` assembly.
///
/// A cubelet has a frame, plus a sticker and mirror on each face that lies on
/// the outside of the assembly when the cubelet is constructed.
#[derive(Debug, Clone)]
pub struct Cubelet {
    resources: Arc<Resources>,
    node: Node,

    vector: Vector3<f32>,
    index: usize,
    initial: usize,

    frame: Mesh,
    /// Sticker for each face, indexed by [`Face::index()`].
    stickers: [Option<Sticker>; 6],
}
impl Cubelet {
    /// Constructs the cubelet that starts at linear index `index`.
    ///
    /// The node transform is frozen after construction; see
    /// [`Cubelet::update_matrix()`].
    pub fn new(index: usize, resources: Arc<Resources>) -> Result<Self, CubeletError> {
        let grid = resources.grid;
        let vector = grid.vector_of(index).ok_or(CubeletError::IndexOutOfRange {
            index,
            order: grid.order(),
        })?;

        let frame = Mesh::new(
            Arc::clone(&resources.geometry.frame),
            Arc::clone(resources.materials.core()),
        );
        let stickers = Face::ALL.map(|face| {
            grid.is_on_face(vector, face)
                .then(|| Sticker::new(face, &resources))
        });

        let mut ret = Self {
            resources,
            node: Node::default(),

            vector,
            index,
            initial: index,

            frame,
            stickers,
        };
        ret.set_vector(vector)?;
        ret.node.freeze();
        Ok(ret)
    }

    /// Returns the resources shared with the rest of the assembly.
    pub fn resources(&self) -> &Arc<Resources> {
        &self.resources
    }

    /// Returns the grid vector of the cell the cubelet is in.
    pub fn vector(&self) -> Vector3<f32> {
        self.vector
    }
    /// Moves the cubelet to the cell containing `vector`, which is snapped to
    /// the nearest half unit on each axis.
    ///
    /// This does not update the node matrix.
    pub fn set_vector(&mut self, vector: Vector3<f32>) -> Result<(), CubeletError> {
        let grid = self.resources.grid;
        let snapped = grid::snap_vector(vector);
        let index = grid.index_of(snapped).ok_or(CubeletError::OutOfBounds {
            vector,
            order: grid.order(),
        })?;
        self.vector = snapped;
        self.index = index;
        self.node.position = snapped * self.resources.cell_size;
        Ok(())
    }

    /// Returns the linear index of the cell the cubelet is in.
    pub fn index(&self) -> usize {
        self.index
    }
    /// Moves the cubelet to the cell with linear index `index`.
    ///
    /// This does not update the node matrix.
    pub fn set_index(&mut self, index: usize) -> Result<(), CubeletError> {
        let grid = self.resources.grid;
        let vector = grid.vector_of(index).ok_or(CubeletError::IndexOutOfRange {
            index,
            order: grid.order(),
        })?;
        self.set_vector(vector)
    }
    /// Returns the linear index the cubelet was constructed with.
    pub fn initial_index(&self) -> usize {
        self.initial
    }

    /// Returns the transform of the cubelet within the assembly.
    pub fn node(&self) -> &Node {
        &self.node
    }
    /// Returns the transform of the cubelet within the assembly, for external
    /// rotation logic. Call [`Cubelet::update_matrix()`] afterwards.
    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
    /// Recomputes the node matrix after a change in position or rotation.
    pub fn update_matrix(&mut self) {
        self.node.update_matrix();
    }

    /// Rotates the cubelet around the center of the assembly, moving it to a
    /// new cell, and updates the node matrix.
    pub fn rotate(&mut self, rotation: Quaternion<f32>) -> Result<(), CubeletError> {
        self.set_vector(rotation * self.vector)?;
        self.node.rotation = (rotation * self.node.rotation).normalize();
        self.update_matrix();
        Ok(())
    }

    /// Returns the frame mesh.
    pub fn frame(&self) -> &Mesh {
        &self.frame
    }
    /// Returns the sticker on the local face `face`, if there is one.
    pub fn sticker(&self, face: Face) -> Option<&Sticker> {
        self.stickers[face.index()].as_ref()
    }
    /// Returns an iterator over the stickers and the local faces they are on.
    pub fn stickers(&self) -> impl Iterator<Item = (Face, &Sticker)> {
        Face::ALL
            .into_iter()
            .filter_map(|face| Some((face, self.sticker(face)?)))
    }
    /// Returns an iterator over the visible meshes of the cubelet, with their
    /// transforms into assembly space.
    pub fn meshes(&self) -> impl Iterator<Item = (Matrix4<f32>, &Mesh)> {
        let parent = self.node.matrix();
        std::iter::once(&self.frame)
            .chain(
                self.stickers
                    .iter()
                    .flatten()
                    .flat_map(|s| [&s.mesh, &s.mirror]),
            )
            .filter(|mesh| mesh.visible)
            .map(move |mesh| (parent * mesh.local_matrix(), mesh))
    }

    /// Recolors or hides the sticker on the local face `face`.
    ///
    /// `value` is `"remove"` to hide the sticker, an empty string to restore
    /// its original color, or a color tag such as `"U"`. Unrecognized tags and
    /// faces without a sticker are ignored.
    pub fn stick(&mut self, face: Face, value: &str) {
        let command = match value {
            "remove" => StickCommand::Remove,
            "" => StickCommand::Restore,
            tag => match self.resources.materials.get(tag) {
                Some((color, _)) => StickCommand::Color(color),
                None => {
                    log::trace!("Ignoring unknown sticker color {tag:?}");
                    return;
                }
            },
        };
        self.apply_stick(face, command);
    }
    /// Applies a sticker change to the local face `face`. Faces without a
    /// sticker are ignored.
    pub fn apply_stick(&mut self, face: Face, command: StickCommand) {
        let Some(sticker) = &mut self.stickers[face.index()] else {
            return;
        };
        let color = match command {
            StickCommand::Remove => {
                sticker.set_visible(false);
                return;
            }
            StickCommand::Restore => sticker.original,
            StickCommand::Color(color) => color,
        };
        sticker.set_visible(true);
        sticker.set_color(color, self.resources.materials.face(color));
    }

    /// Returns the local face that currently points towards the world
    /// direction of `face`.
    ///
    /// This assumes the cubelet has only been rotated by multiples of 90
    /// degrees. If no face points that way, this logs a warning and returns
    /// [`Face::L`].
    pub fn face_at(&self, face: Face) -> Face {
        let local = self.node.rotation.conjugate() * face.vector();
        Face::classify(local).unwrap_or_else(|| {
            log::warn!(
                "No face of cubelet {} points {}; rotation is {:?}",
                self.index,
                face.name(),
                self.node.rotation,
            );
            Face::L
        })
    }
    /// Returns the color of the sticker that currently points towards the
    /// world direction of `face`, or `None` if there is no sticker there or it
    /// is hidden.
    pub fn color_at(&self, face: Face) -> Option<Face> {
        let sticker = self.sticker(self.face_at(face))?;
        if !sticker.is_visible() {
            return None;
        }
        debug_assert_eq!(
            Some(sticker.color),
            self.resources.materials.face_of(&sticker.mesh.material),
            "sticker material does not match its color",
        );
        Some(sticker.color)
    }
    /// Returns the color tag of [`Cubelet::color_at()`], or
    /// [`UNKNOWN_COLOR`].
    pub fn color_char_at(&self, face: Face) -> char {
        self.color_at(face).map_or(UNKNOWN_COLOR, Face::symbol)
    }

    /// Moves the cubelet back to its initial cell and orientation and
    /// restores all its stickers.
    pub fn reset(&mut self) -> Result<(), CubeletError> {
        self.set_index(self.initial)?;
        self.node.rotation = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        self.update_matrix();
        for face in Face::ALL {
            self.apply_stick(face, StickCommand::Restore);
        }
        Ok(())
    }
}
