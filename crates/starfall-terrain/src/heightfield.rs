//! Heightfield: regular grid of heights with bilinear queries.

use starfall_core::terrain::HeightProvider;

/// Heightfield placement metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightfieldHeader {
    /// World X of column 0.
    pub origin_x: f32,
    /// World Z of row 0.
    pub origin_z: f32,
    /// World units per grid cell.
    pub cell_size: f32,
    /// Number of columns (along X).
    pub width: u32,
    /// Number of rows (along Z).
    pub depth: u32,
}

impl HeightfieldHeader {
    /// Header for a `size`×`size` grid centred on `(center_x, center_z)`.
    pub fn centered(center_x: f32, center_z: f32, size: u32, cell_size: f32) -> Self {
        let half = (size.saturating_sub(1)) as f32 * cell_size / 2.0;
        Self {
            origin_x: center_x - half,
            origin_z: center_z - half,
            cell_size,
            width: size,
            depth: size,
        }
    }
}

/// Loaded heightfield. Positions outside the grid clamp to the nearest edge.
#[derive(Debug, Clone)]
pub struct Heightfield {
    pub header: HeightfieldHeader,
    /// Heights, row-major (row = Z, column = X).
    pub heights: Vec<f32>,
}

impl Heightfield {
    /// Create a heightfield from pre-loaded data.
    ///
    /// Returns `None` if the sample count does not match the header or the
    /// grid is empty.
    pub fn new(header: HeightfieldHeader, heights: Vec<f32>) -> Option<Self> {
        let expected = header.width as usize * header.depth as usize;
        if expected == 0 || heights.len() != expected || header.cell_size <= 0.0 {
            return None;
        }
        Some(Self { header, heights })
    }

    /// Convert world XZ to fractional (row, col), clamped into the grid.
    fn world_to_grid(&self, x: f32, z: f32) -> (f32, f32) {
        let h = &self.header;
        let col = ((x - h.origin_x) / h.cell_size).clamp(0.0, (h.width - 1) as f32);
        let row = ((z - h.origin_z) / h.cell_size).clamp(0.0, (h.depth - 1) as f32);
        (row, col)
    }

    /// Raw height at integer grid coordinates.
    fn raw_height(&self, row: usize, col: usize) -> f32 {
        let h = &self.header;
        let row = row.min(h.depth as usize - 1);
        let col = col.min(h.width as usize - 1);
        self.heights[row * h.width as usize + col]
    }

    /// Bilinear interpolation at fractional row/col.
    fn bilinear(&self, row: f32, col: f32) -> f32 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let fr = row - r0 as f32;
        let fc = col - c0 as f32;

        let e00 = self.raw_height(r0, c0);
        let e01 = self.raw_height(r0, c0 + 1);
        let e10 = self.raw_height(r0 + 1, c0);
        let e11 = self.raw_height(r0 + 1, c0 + 1);

        let top = e00 * (1.0 - fc) + e01 * fc;
        let bot = e10 * (1.0 - fc) + e11 * fc;
        top * (1.0 - fr) + bot * fr
    }

    pub fn min_height(&self) -> f32 {
        self.heights.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max_height(&self) -> f32 {
        self.heights.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

impl HeightProvider for Heightfield {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let (row, col) = self.world_to_grid(x, z);
        self.bilinear(row, col)
    }
}

/// Level ground at a fixed height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatGround {
    pub height: f32,
}

impl HeightProvider for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}
