//! Coarse occupancy grid that keeps streamlines apart.

use crate::grid::GridSpec;
use crate::math::{Scalar, R2};

/// Mask cell index `(column, row)`.
pub(crate) type Cell = (usize, usize);

#[derive(Debug, Clone)]
pub(crate) struct OccupancyMask {
    size: usize,
    min: Scalar,
    cell_size: Scalar,
    owner: Vec<Option<usize>>,
    // cells claimed by the trajectory in progress, for rollback
    pending: Vec<usize>,
}

impl OccupancyMask {
    pub(crate) fn new(grid: &GridSpec, size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            min: grid.min,
            cell_size: grid.span() / size as Scalar,
            owner: vec![None; size * size],
            pending: Vec::new(),
        }
    }

    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    pub(crate) const fn cell_size(&self) -> Scalar {
        self.cell_size
    }

    #[inline]
    const fn idx(&self, cell: Cell) -> usize {
        cell.1 * self.size + cell.0
    }

    /// Cell containing `p`; points on the upper boundary map to the last cell.
    pub(crate) fn cell_of(&self, p: &R2) -> Cell {
        let to_index = |v: Scalar| {
            let f = ((v - self.min) / self.cell_size).floor();
            (f.max(0.0) as usize).min(self.size - 1)
        };
        (to_index(p.x), to_index(p.y))
    }

    /// Centre of a mask cell in domain coordinates.
    pub(crate) fn centre(&self, (i, j): Cell) -> R2 {
        R2::new(
            self.min + (i as Scalar + 0.5) * self.cell_size,
            self.min + (j as Scalar + 0.5) * self.cell_size,
        )
    }

    pub(crate) fn is_free(&self, cell: Cell) -> bool {
        self.owner[self.idx(cell)].is_none()
    }

    /// Claims `cell` for `line`. Fails when another line, or this line on an
    /// earlier pass, already holds it.
    pub(crate) fn claim(&mut self, cell: Cell, line: usize) -> bool {
        let k = self.idx(cell);
        match self.owner[k] {
            Some(_) => false,
            None => {
                self.owner[k] = Some(line);
                self.pending.push(k);
                true
            }
        }
    }

    /// Keeps every cell claimed since the last commit or rollback.
    pub(crate) fn commit(&mut self) {
        self.pending.clear();
    }

    /// Releases every cell claimed since the last commit or rollback.
    pub(crate) fn rollback(&mut self) {
        for k in self.pending.drain(..) {
            self.owner[k] = None;
        }
    }

    pub(crate) fn occupied(&self) -> usize {
        self.owner.iter().filter(|o| o.is_some()).count()
    }
}

/// Mask cells in a spiral from the outer ring inward, so lines are seeded at
/// the domain boundary first.
pub(crate) struct SpiralCells {
    x: usize,
    y: usize,
    x_first: usize,
    y_first: usize,
    x_last: usize,
    y_last: usize,
    dir: Heading,
    remaining: usize,
}

#[derive(Debug, Clone, Copy)]
enum Heading {
    Right,
    Up,
    Left,
    Down,
}

impl SpiralCells {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            x_first: 0,
            y_first: 1,
            x_last: size.saturating_sub(1),
            y_last: size.saturating_sub(1),
            dir: Heading::Right,
            remaining: size * size,
        }
    }
}

impl Iterator for SpiralCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let out = (self.x, self.y);
        if self.remaining == 0 {
            return Some(out);
        }
        match self.dir {
            Heading::Right => {
                self.x += 1;
                if self.x >= self.x_last {
                    self.x_last -= 1;
                    self.dir = Heading::Up;
                }
            }
            Heading::Up => {
                self.y += 1;
                if self.y >= self.y_last {
                    self.y_last -= 1;
                    self.dir = Heading::Left;
                }
            }
            Heading::Left => {
                self.x -= 1;
                if self.x <= self.x_first {
                    self.x_first += 1;
                    self.dir = Heading::Down;
                }
            }
            Heading::Down => {
                self.y -= 1;
                if self.y <= self.y_first {
                    self.y_first += 1;
                    self.dir = Heading::Right;
                }
            }
        }
        Some(out)
    }
}
