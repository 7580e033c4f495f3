use crate::error::GenError;

/// A 2D grid stored as a flat row-major buffer (`index = y * width + x`).
///
/// Reads at integer coordinates come in three flavours: exact (`get`), toroidal
/// (`get_wrapped`, both axes wrap) and edge-clamped (`get_clamped`).
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Tilemap<T> {
    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, GenError> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(GenError::InvalidDimension { width, height });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) outside {}x{}", self.width, self.height);
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Read with wrap-around on both axes (the grid is a torus).
    #[inline]
    pub fn get_wrapped(&self, x: i64, y: i64) -> &T {
        let wx = x.rem_euclid(self.width as i64) as usize;
        let wy = y.rem_euclid(self.height as i64) as usize;
        self.get(wx, wy)
    }

    /// Read with out-of-range coordinates pulled back to the nearest border cell.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> &T {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.get(cx, cy)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterate over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Build a same-sized map by transforming every cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tilemap<U> {
        Tilemap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}
