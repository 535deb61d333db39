//! Two-dimensional terrain grid decoded from a map image
//!
//! Cells are addressed as `(row, col)` with `row < width` and `col < height`.
//! A cell that was never set reads as the shared `unknown` descriptor.

use std::sync::Arc;

use crate::registry::TerrainRegistry;
use crate::terrain::TerrainDescriptor;

/// Fixed-size grid of terrain references bound to the registry it was built
/// against. The binding is informational; cells are not validated against it.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Arc<TerrainDescriptor>>>,
    registry: Arc<TerrainRegistry>,
}

impl TerrainGrid {
    /// Create a grid with every cell unset.
    ///
    /// Zero dimensions are accepted here and rejected by the codecs that
    /// consume the grid.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, registry: Arc<TerrainRegistry>) -> Self {
        let len = match width.checked_mul(height) {
            Some(len) => len,
            None => panic!("grid dimensions {}x{} overflow usize", width, height),
        };
        Self {
            width,
            height,
            cells: vec![None; len],
            registry,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn registry(&self) -> &Arc<TerrainRegistry> {
        &self.registry
    }

    /// Mutable access to the bound registry, cloning it first if it is shared.
    pub fn registry_mut(&mut self) -> &mut TerrainRegistry {
        Arc::make_mut(&mut self.registry)
    }

    /// Terrain at `(row, col)`, or the shared `unknown` descriptor if unset.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> &Arc<TerrainDescriptor> {
        let index = self.index(row, col);
        match &self.cells[index] {
            Some(terrain) => terrain,
            None => TerrainDescriptor::unknown_shared(),
        }
    }

    /// Non-panicking form of [`TerrainGrid::cell_at`].
    pub fn try_cell_at(&self, row: usize, col: usize) -> Option<&Arc<TerrainDescriptor>> {
        if self.in_bounds(row, col) {
            Some(self.cell_at(row, col))
        } else {
            None
        }
    }

    /// The stored terrain at `(row, col)`, `None` if the cell was never set.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&Arc<TerrainDescriptor>> {
        let index = self.index(row, col);
        self.cells[index].as_ref()
    }

    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Overwrite `(row, col)`. Passing `None` clears the cell.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        terrain: impl Into<Option<Arc<TerrainDescriptor>>>,
    ) {
        let index = self.index(row, col);
        self.cells[index] = terrain.into();
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.width && col < self.height
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.in_bounds(row, col),
            "cell ({}, {}) out of range for {}x{} grid",
            row,
            col,
            self.width,
            self.height
        );
        row * self.height + col
    }
}
