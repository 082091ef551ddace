use super::descriptors::ScanResolution;
use crate::error::OctLesionError;
use ndarray::{Array2, ArrayView2};

/// Foreground cell value written by all mask-producing stages.
pub const MASK_FOREGROUND: u8 = 255;

/// A binary foreground/background map with the same dimensions as the scan
/// it was derived from. Any nonzero cell counts as foreground.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryMask {
    cells: Array2<u8>,
}

impl BinaryMask {
    //region Constructors

    /// Creates an all-background mask at the given resolution.
    pub fn new(resolution: ScanResolution) -> BinaryMask {
        BinaryMask {
            cells: Array2::<u8>::zeros((resolution.height, resolution.width)),
        }
    }

    /// Wraps an existing (height, width) cell array.
    pub fn from_array(cells: Array2<u8>) -> Result<BinaryMask, OctLesionError> {
        let shape = cells.shape();
        ScanResolution::new(shape[1], shape[0])?;
        Ok(BinaryMask { cells })
    }

    //endregion

    //region Properties

    pub fn get_resolution(&self) -> ScanResolution {
        let shape: &[usize] = self.cells.shape();
        ScanResolution {
            width: shape[1],
            height: shape[0],
        }
    }

    pub fn is_foreground(&self, row: usize, column: usize) -> bool {
        self.cells[(row, column)] != 0
    }

    /// Number of foreground cells in the whole mask.
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    pub fn get_cells_view(&self) -> ArrayView2<u8> {
        self.cells.view()
    }

    pub fn get_internal_data(&self) -> &Array2<u8> {
        &self.cells
    }

    pub fn get_internal_data_mut(&mut self) -> &mut Array2<u8> {
        &mut self.cells
    }

    //endregion

    //region Editing

    pub fn set_foreground(&mut self, row: usize, column: usize) {
        self.cells[(row, column)] = MASK_FOREGROUND;
    }

    /// Forces every cell outside the given half-open row interval to
    /// background. Columns are unaffected.
    pub fn retain_rows(&mut self, rows: std::ops::Range<usize>) {
        let height = self.cells.shape()[0];
        for (row_index, mut row) in self.cells.rows_mut().into_iter().enumerate() {
            if row_index < rows.start || row_index >= rows.end || row_index >= height {
                row.fill(0);
            }
        }
    }

    //endregion
}

impl std::fmt::Display for BinaryMask {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BinaryMask({}, {} foreground)",
            self.get_resolution(),
            self.foreground_count()
        )
    }
}
