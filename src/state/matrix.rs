/// Query-by-target feasibility grid used by the Ullmann state.
///
/// A cell is `1` while the pair is feasible, `0` if it never was, and
/// `-(row + 1)` if it was eliminated while query row `row` was being fixed.
/// Tagging removals with the depth lets a backtrack restore exactly the
/// cells that depth removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityMatrix {
    data: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl CompatibilityMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `(i, j)` is currently feasible.
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.data[i * self.cols + j] > 0
    }

    pub fn raw(&self, i: usize, j: usize) -> i32 {
        self.data[i * self.cols + j]
    }

    pub fn set1(&mut self, i: usize, j: usize) {
        self.data[i * self.cols + j] = 1;
    }

    pub fn mark(&mut self, i: usize, j: usize, marking: i32) {
        debug_assert!(marking < 0);
        self.data[i * self.cols + j] = marking;
    }

    /// Marks every feasible cell of row `i`.
    pub fn mark_row(&mut self, i: usize, marking: i32) {
        debug_assert!(marking < 0);
        let row = &mut self.data[i * self.cols..(i + 1) * self.cols];
        for cell in row.iter_mut().filter(|c| **c > 0) {
            *cell = marking;
        }
    }

    /// Restores every cell carrying `marking` in rows `i..`.
    pub fn reset_rows(&mut self, i: usize, marking: i32) {
        for cell in self.data[i * self.cols..].iter_mut() {
            if *cell == marking {
                *cell = 1;
            }
        }
    }

    /// Whether row `i` still has a feasible cell.
    pub fn has_candidate(&self, i: usize) -> bool {
        self.data[i * self.cols..(i + 1) * self.cols]
            .iter()
            .any(|&c| c > 0)
    }
}
