use crate::geometry::Geometries;
use crate::grid::Grid;
use crate::{CubeletConfig, MaterialRegistry};

/// Immutable data shared by every cubelet in an assembly.
///
/// This is constructed once per assembly and handed to each cubelet behind an
/// [`std::sync::Arc`].
#[derive(Debug, Clone)]
pub struct Resources {
    /// Cell grid of the assembly.
    pub grid: Grid,
    /// Distance between the centers of adjacent cubelets.
    pub cell_size: f32,
    /// Frame, sticker, and mirror geometry.
    pub geometry: Geometries,
    /// Core, sticker, and mirror materials.
    pub materials: MaterialRegistry,
}
impl Resources {
    /// Builds geometry and materials for `config`, which must already be
    /// valid.
    pub fn new(config: &CubeletConfig) -> Self {
        log::debug!(
            "Building resources for {0}x{0}x{0} assembly with cell size {1}",
            config.order,
            config.cell_size,
        );
        Self {
            grid: Grid::new(config.order),
            cell_size: config.cell_size,
            geometry: Geometries::new(config.cell_size, config.sticker_scale),
            materials: MaterialRegistry::new(config.core_color, &config.colors),
        }
    }

    /// Returns the number of cubelets along each edge of the assembly.
    pub fn order(&self) -> u32 {
        self.grid.order()
    }
}
