//! Square row-major grids for heights and element types.

use crate::element::ElementType;

/// Errors raised when building a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The grid would have fewer than two cells per side.
    #[error("grid size {size} is too small, need at least 2 cells per side")]
    TooSmall { size: usize },

    /// A row handed to [`Grid::from_rows`] has the wrong length.
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A square `size × size` grid stored row-major.
///
/// All reads clamp their indices into `[0, size - 1]`; signed writes outside
/// the grid are skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

/// Terrain elevations, one per cell.
pub type HeightGrid = Grid<f32>;

/// Land-use codes, one per cell.
pub type TypeGrid = Grid<ElementType>;

impl<T: Copy> Grid<T> {
    /// Smallest admissible side length.
    pub const MIN_SIZE: usize = 2;

    /// Create a grid with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Result<Self, GridError> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![value; size * size],
        })
    }

    /// Create a grid by evaluating `f(row, col)` in row-major order.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self, GridError> {
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(f(row, col));
            }
        }
        Ok(Self { size, cells })
    }

    /// Assemble a grid from nested rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let size = rows.len();
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Clamp a signed index into `[0, size - 1]`.
    #[inline]
    pub fn clamp_index(&self, index: isize) -> usize {
        index.clamp(0, self.size as isize - 1) as usize
    }

    /// Read a cell, clamping both indices into range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        let row = row.min(self.size - 1);
        let col = col.min(self.size - 1);
        self.cells[row * self.size + col]
    }

    /// Read a cell with signed indices, clamping both into range.
    #[inline]
    pub fn get_clamped(&self, row: isize, col: isize) -> T {
        self.cells[self.clamp_index(row) * self.size + self.clamp_index(col)]
    }

    /// Read a cell, returning `None` when either index is out of range.
    pub fn try_get(&self, row: isize, col: isize) -> Option<T> {
        self.index_of(row, col).map(|idx| self.cells[idx])
    }

    /// Write a cell. Out-of-range coordinates are skipped.
    ///
    /// Returns `true` if the cell was written.
    pub fn try_set(&mut self, row: isize, col: isize, value: T) -> bool {
        match self.index_of(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `(row, col)` lies inside the grid.
    pub fn contains(&self, row: isize, col: isize) -> bool {
        self.index_of(row, col).is_some()
    }

    /// Row-major cell storage.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact(self.size)
    }

    /// Copy the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Build a same-sized grid by mapping every cell.
    pub fn map<U: Copy>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Build a same-sized grid from `f(row, col, value)`.
    pub fn map_indexed<U: Copy>(&self, mut f: impl FnMut(usize, usize, T) -> U) -> Grid<U> {
        let size = self.size;
        Grid {
            size,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(idx, &v)| f(idx / size, idx % size, v))
                .collect(),
        }
    }

    fn index_of(&self, row: isize, col: isize) -> Option<usize> {
        let n = self.size as isize;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(row as usize * self.size + col as usize)
        } else {
            None
        }
    }
}

fn check_size(size: usize) -> Result<(), GridError> {
    if size < Grid::<u8>::MIN_SIZE {
        Err(GridError::TooSmall { size })
    } else {
        Ok(())
    }
}

impl HeightGrid {
    /// Observed `(min, max)` over every cell.
    pub fn range(&self) -> HeightRange {
        HeightRange::from_values(self.cells.iter().copied())
    }

    /// Heights rescaled to `[0, 1]` against `range`.
    pub fn normalized(&self, range: HeightRange) -> Grid<f32> {
        self.map(|&h| range.normalize(h))
    }

    /// Returns `true` if every cell holds a finite value.
    pub fn is_finite(&self) -> bool {
        self.cells.iter().all(|h| h.is_finite())
    }
}

impl TypeGrid {
    /// Number of cells holding `element`.
    pub fn count(&self, element: ElementType) -> usize {
        self.cells.iter().filter(|&&e| e == element).count()
    }
}

/// A closed elevation interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl HeightRange {
    /// The empty range; observing any value replaces both ends.
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Smallest range containing every value.
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Self {
        values.into_iter().fold(Self::EMPTY, |mut range, h| {
            range.observe(h);
            range
        })
    }

    /// Widen the range to include `h`.
    #[inline]
    pub fn observe(&mut self, h: f32) {
        self.min = self.min.min(h);
        self.max = self.max.max(h);
    }

    /// Returns `true` if nothing has been observed.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// `max - min`, or zero for an empty range.
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Center of the interval.
    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Returns `true` if `h` lies within the closed interval.
    pub fn contains(&self, h: f32) -> bool {
        h >= self.min && h <= self.max
    }

    /// Nearest value to `h` inside the interval.
    pub fn clamp(&self, h: f32) -> f32 {
        h.max(self.min).min(self.max)
    }

    /// Rescale `h` into `[0, 1]`. A degenerate range maps everything to 0.
    pub fn normalize(&self, h: f32) -> f32 {
        let span = self.span();
        if span > 0.0 {
            ((h - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
