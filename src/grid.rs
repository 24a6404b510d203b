/// Row-major flat grid. No per-cell objects, f32 friendly.
/// Used as the accumulation buffer for rasterized line strips.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Cell for signed pixel coordinates, `None` when off-grid.
    #[inline]
    pub fn cell(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return None;
        }
        Some((x as usize, y as usize))
    }
}

impl Grid<f32> {
    /// Accumulate into a cell; off-grid writes are dropped.
    #[inline]
    pub fn add(&mut self, x: i64, y: i64, v: f32) {
        if let Some((cx, cy)) = self.cell(x, y) {
            let i = self.idx(cx, cy);
            self.data[i] += v;
        }
    }

    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_and_drops_off_grid() {
        let mut g: Grid<f32> = Grid::new(4, 3);
        g.add(1, 2, 0.5);
        g.add(1, 2, 0.25);
        g.add(-1, 0, 9.0);
        g.add(4, 0, 9.0);
        g.add(0, 3, 9.0);
        assert_eq!(g.get(1, 2), 0.75);
        assert_eq!(g.max(), 0.75);
        assert_eq!(g.data.iter().sum::<f32>(), 0.75);
    }

    #[test]
    fn row_major_layout() {
        let mut g: Grid<u8> = Grid::new(5, 2);
        g.set(3, 1, 7);
        assert_eq!(g.data[8], 7);
        assert_eq!(g.idx(3, 1), 8);
    }
}
