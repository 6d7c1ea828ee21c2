//! Mesh geometry shared by every cubelet in an assembly.

use std::sync::Arc;

use cgmath::Point3;

/// Which part of a cubelet a geometry is for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Cube-shaped core of a cubelet.
    Frame,
    /// Colored plane on the outside of a cubelet.
    Sticker,
    /// Plane behind a sticker, facing inwards.
    Mirror,
}

/// Triangle mesh geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Part of the cubelet this is for.
    pub kind: GeometryKind,
    /// Vertex positions.
    pub verts: Vec<Point3<f32>>,
    /// Vertex indices; every three make a triangle, counterclockwise when seen
    /// from outside.
    pub indices: Vec<u16>,
}
impl Geometry {
    /// Constructs an axis-aligned cube centered on the origin.
    pub fn cube(kind: GeometryKind, size: f32) -> Self {
        let h = size / 2.0;
        // Bit 0 of the vertex index is X, bit 1 is Y, bit 2 is Z.
        let verts = (0..8)
            .map(|i| {
                let coord = |bit: usize| if (i >> bit) & 1 == 0 { -h } else { h };
                Point3::new(coord(0), coord(1), coord(2))
            })
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            0, 4, 6, 0, 6, 2, // -X
            1, 3, 7, 1, 7, 5, // +X
            0, 1, 5, 0, 5, 4, // -Y
            2, 6, 7, 2, 7, 3, // +Y
            0, 2, 3, 0, 3, 1, // -Z
            4, 5, 7, 4, 7, 6, // +Z
        ];
        Self {
            kind,
            verts,
            indices,
        }
    }

    /// Constructs a square in the XY plane centered on the origin, facing +Z.
    pub fn quad(kind: GeometryKind, size: f32) -> Self {
        let h = size / 2.0;
        Self {
            kind,
            verts: vec![
                Point3::new(-h, -h, 0.0),
                Point3::new(h, -h, 0.0),
                Point3::new(-h, h, 0.0),
                Point3::new(h, h, 0.0),
            ],
            indices: vec![0, 1, 3, 0, 3, 2],
        }
    }

    /// Returns an iterator over the triangles in the mesh.
    pub fn triangles(&self) -> impl '_ + Iterator<Item = [Point3<f32>; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|tri| [0, 1, 2].map(|i| self.verts[tri[i] as usize]))
    }
}

/// Geometry for each part of a cubelet.
#[derive(Debug, Clone)]
pub struct Geometries {
    /// Cube-shaped core.
    pub frame: Arc<Geometry>,
    /// Outward-facing sticker.
    pub sticker: Arc<Geometry>,
    /// Inward-facing mirror behind each sticker.
    pub mirror: Arc<Geometry>,
}
impl Geometries {
    /// Constructs geometry for cubelets spaced `cell_size` apart, with
    /// stickers `sticker_scale * cell_size` across.
    pub fn new(cell_size: f32, sticker_scale: f32) -> Self {
        let sticker_size = cell_size * sticker_scale;
        Self {
            frame: Arc::new(Geometry::cube(GeometryKind::Frame, cell_size)),
            sticker: Arc::new(Geometry::quad(GeometryKind::Sticker, sticker_size)),
            mirror: Arc::new(Geometry::quad(GeometryKind::Mirror, sticker_size)),
        }
    }
}
