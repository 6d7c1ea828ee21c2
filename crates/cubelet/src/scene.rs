//! Retained scene objects read by the host renderer.

use std::sync::Arc;

use cgmath::{Euler, Matrix4, One, Quaternion, Rad, Vector3, Zero};

use crate::geometry::Geometry;
use crate::material::Material;

/// Mesh attached to a cubelet, positioned relative to the cubelet's center.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Shared geometry.
    pub geometry: Arc<Geometry>,
    /// Shared material.
    pub material: Arc<Material>,
    /// Offset from the cubelet's center.
    pub position: Vector3<f32>,
    /// Rotation relative to the cubelet.
    pub rotation: Euler<Rad<f32>>,
    /// Whether the mesh should be drawn.
    pub visible: bool,
}
impl Mesh {
    /// Constructs a visible mesh at the cubelet's center with no rotation.
    pub fn new(geometry: Arc<Geometry>, material: Arc<Material>) -> Self {
        Self {
            geometry,
            material,
            position: Vector3::zero(),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            visible: true,
        }
    }

    /// Returns the transform from mesh space to cubelet space.
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.rotation)
    }
}

/// Transform of a scene object.
///
/// Once [`Node::freeze()`] has been called, changes to the position or
/// rotation do not affect [`Node::matrix()`] until [`Node::update_matrix()`]
/// is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Position in the parent's space.
    pub position: Vector3<f32>,
    /// Rotation relative to the parent.
    pub rotation: Quaternion<f32>,

    matrix: Matrix4<f32>,
    matrix_auto_update: bool,
}
impl Default for Node {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
            matrix: Matrix4::one(),
            matrix_auto_update: true,
        }
    }
}
impl Node {
    /// Returns the transform from local space to the parent's space.
    pub fn matrix(&self) -> Matrix4<f32> {
        if self.matrix_auto_update {
            self.compose()
        } else {
            self.matrix
        }
    }
    /// Returns whether the matrix is recomputed automatically.
    pub fn matrix_auto_update(&self) -> bool {
        self.matrix_auto_update
    }

    /// Stops recomputing the matrix automatically and caches the current one.
    pub fn freeze(&mut self) {
        self.matrix_auto_update = false;
        self.update_matrix();
    }
    /// Recomputes the cached matrix from the position and rotation.
    pub fn update_matrix(&mut self) {
        self.matrix = self.compose();
    }

    fn compose(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Rotation3, Vector4};

    use super::*;
    use crate::geometry::GeometryKind;
    use crate::material::{Rgb, Shading};

    #[test]
    fn test_frozen_node_matrix() {
        let mut node = Node::default();
        node.position = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix4::from_translation(node.position), node.matrix());

        node.freeze();
        assert!(!node.matrix_auto_update());
        let frozen = node.matrix();
        node.position = Vector3::new(-1.0, 0.0, 0.0);
        node.rotation = Quaternion::from_angle_y(Rad(1.0));
        assert_eq!(frozen, node.matrix());

        node.update_matrix();
        let expected =
            Matrix4::from_translation(node.position) * Matrix4::from(node.rotation);
        assert_eq!(expected, node.matrix());
    }

    #[test]
    fn test_mesh_local_matrix() {
        let mut mesh = Mesh::new(
            Arc::new(Geometry::quad(GeometryKind::Sticker, 1.0)),
            Arc::new(Material {
                name: "test".to_string(),
                shading: Shading::Lambert,
                color: Rgb::default(),
            }),
        );
        mesh.position = Vector3::new(0.0, 0.0, 5.0);
        let origin = mesh.local_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(Vector4::new(0.0, 0.0, 5.0, 1.0), origin);
    }
}
