//! Conversion between grid vectors and linear indices.
//!
//! A grid vector is centered on the assembly, so each coordinate lies in
//! `-half..=half` where `half = (order - 1) / 2`. Coordinates are always
//! multiples of one half, which lets even-order assemblies share the same
//! math as odd-order ones.

use cgmath::Vector3;

use crate::Face;

/// Rounds to the nearest integer, with ties rounding towards positive
/// infinity.
pub(crate) fn round_half_up(x: f32) -> f32 {
    (x + 0.5).floor()
}

/// Rounds to the nearest multiple of one half, with ties rounding towards
/// positive infinity.
pub fn snap_half(x: f32) -> f32 {
    round_half_up(x * 2.0) / 2.0
}

/// Snaps each component of a vector to the nearest multiple of one half.
pub fn snap_vector(v: Vector3<f32>) -> Vector3<f32> {
    v.map(snap_half)
}

/// Grid of cells in an `order × order × order` assembly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    order: u32,
}
impl Grid {
    /// Constructs the grid for an assembly with the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `order` is zero.
    pub fn new(order: u32) -> Self {
        assert!(order > 0, "assembly order must be positive");
        Self { order }
    }

    /// Returns the number of cells along each axis.
    pub fn order(self) -> u32 {
        self.order
    }
    /// Returns the largest coordinate of a cell along any axis.
    pub fn half(self) -> f32 {
        (self.order - 1) as f32 / 2.0
    }
    /// Returns the total number of cells.
    pub fn len(self) -> usize {
        (self.order as usize).pow(3)
    }
    /// Returns `false`; every grid has at least one cell.
    pub fn is_empty(self) -> bool {
        false
    }

    /// Returns the linear index of the cell containing `vector`, or `None` if
    /// it lies outside the assembly.
    ///
    /// `vector` is snapped to the nearest half unit before conversion. NaN
    /// and infinite coordinates are outside every cell.
    pub fn index_of(self, vector: Vector3<f32>) -> Option<usize> {
        let half = self.half();
        let order = self.order as i64;
        let mut index = 0;
        for coord in [vector.z, vector.y, vector.x] {
            if !coord.is_finite() {
                return None;
            }
            let i = round_half_up(snap_half(coord) + half) as i64;
            if !(0..order).contains(&i) {
                return None;
            }
            index = index * order + i;
        }
        usize::try_from(index).ok()
    }

    /// Returns the grid vector of the cell with linear index `index`, or
    /// `None` if the index is out of range.
    pub fn vector_of(self, index: usize) -> Option<Vector3<f32>> {
        if index >= self.len() {
            return None;
        }
        let order = self.order as usize;
        let half = self.half();
        let x = index % order;
        let y = (index / order) % order;
        let z = index / (order * order);
        Some(Vector3::new(x as f32, y as f32, z as f32).map(|c| c - half))
    }

    /// Returns whether a cell at `vector` lies on the outside of the assembly
    /// on `face`.
    pub fn is_on_face(self, vector: Vector3<f32>, face: Face) -> bool {
        face.axis().component(vector) == face.sign() * self.half()
    }

    /// Returns an iterator over the grid vectors of every cell, in index
    /// order.
    pub fn vectors(self) -> impl Iterator<Item = Vector3<f32>> {
        (0..self.len()).filter_map(move |i| self.vector_of(i))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn proptest_index_round_trip((order, index) in order_and_index()) {
            let grid = Grid::new(order);
            let vector = grid.vector_of(index).expect("index in range");
            prop_assert_eq!(Some(index), grid.index_of(vector));
        }

        #[test]
        fn proptest_vector_round_trip((order, index) in order_and_index(), jitter in -0.2_f32..0.2) {
            let grid = Grid::new(order);
            let vector = grid.vector_of(index).expect("index in range");
            let jittered = vector.map(|c| c + jitter);
            let index = grid.index_of(jittered).expect("vector in range");
            prop_assert_eq!(Some(vector), grid.vector_of(index));
        }
    }

    fn order_and_index() -> impl Strategy<Value = (u32, usize)> {
        (1..=12_u32).prop_flat_map(|order| (Just(order), 0..(order as usize).pow(3)))
    }

    #[test]
    fn test_snap_half() {
        assert_eq!(0.0, snap_half(0.1));
        assert_eq!(0.5, snap_half(0.3));
        assert_eq!(0.5, snap_half(0.25));
        assert_eq!(0.0, snap_half(-0.25));
        assert_eq!(-1.5, snap_half(-1.6));
        assert_eq!(2.0, snap_half(1.9));
    }

    #[test]
    fn test_3x3x3_corners() {
        let grid = Grid::new(3);
        assert_eq!(1.0, grid.half());
        assert_eq!(27, grid.len());
        assert_eq!(Some(Vector3::new(-1.0, -1.0, -1.0)), grid.vector_of(0));
        assert_eq!(Some(Vector3::new(1.0, 1.0, 1.0)), grid.vector_of(26));
        assert_eq!(Some(Vector3::new(0.0, 0.0, 0.0)), grid.vector_of(13));
        assert_eq!(Some(Vector3::new(1.0, -1.0, -1.0)), grid.vector_of(2));
        assert_eq!(Some(Vector3::new(-1.0, 1.0, -1.0)), grid.vector_of(6));
        assert_eq!(Some(Vector3::new(-1.0, -1.0, 1.0)), grid.vector_of(18));
    }

    #[test]
    fn test_even_order() {
        let grid = Grid::new(2);
        assert_eq!(0.5, grid.half());
        assert_eq!(Some(Vector3::new(-0.5, -0.5, -0.5)), grid.vector_of(0));
        assert_eq!(Some(Vector3::new(0.5, 0.5, 0.5)), grid.vector_of(7));
        assert_eq!(Some(5), grid.index_of(Vector3::new(0.5, -0.5, 0.5)));
    }

    #[test]
    fn test_out_of_range() {
        let grid = Grid::new(3);
        assert_eq!(None, grid.vector_of(27));
        assert_eq!(None, grid.index_of(Vector3::new(2.0, 0.0, 0.0)));
        assert_eq!(None, grid.index_of(Vector3::new(0.0, -2.1, 0.0)));
        assert_eq!(Some(26), grid.index_of(Vector3::new(1.2, 0.9, 1.1)));
    }

    #[test]
    fn test_non_finite_is_out_of_range() {
        let grid = Grid::new(3);
        assert_eq!(None, grid.index_of(Vector3::new(f32::NAN, f32::NAN, f32::NAN)));
        assert_eq!(None, grid.index_of(Vector3::new(-1.0, -1.0, f32::NAN)));
        assert_eq!(None, grid.index_of(Vector3::new(f32::INFINITY, 0.0, 0.0)));
        assert_eq!(None, grid.index_of(Vector3::new(0.0, f32::NEG_INFINITY, 0.0)));
    }

    #[test]
    fn test_is_on_face() {
        let grid = Grid::new(3);
        let v = Vector3::new(-1.0, 0.0, 1.0);
        assert!(grid.is_on_face(v, Face::L));
        assert!(!grid.is_on_face(v, Face::R));
        assert!(!grid.is_on_face(v, Face::D));
        assert!(!grid.is_on_face(v, Face::U));
        assert!(!grid.is_on_face(v, Face::B));
        assert!(grid.is_on_face(v, Face::F));

        // A single cell is on every face.
        let grid = Grid::new(1);
        let v = grid.vector_of(0).expect("index in range");
        assert!(Face::ALL.iter().all(|&f| grid.is_on_face(v, f)));
    }

    #[test]
    fn test_vectors_in_index_order() {
        let grid = Grid::new(4);
        for (i, v) in grid.vectors().enumerate() {
            assert_eq!(Some(i), grid.index_of(v));
        }
        assert_eq!(64, grid.vectors().count());
    }
}
