use crate::puzzle::Coord;

/// The ordered path a player is dragging out on the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    cells: Vec<Coord>,
}

fn signed_delta(from: usize, to: usize) -> isize {
    to as isize - from as isize
}

fn offset(coord: Coord, dx: isize, dy: isize, steps: isize) -> Coord {
    Coord::new(
        (coord.x as isize + dx * steps) as usize,
        (coord.y as isize + dy * steps) as usize,
    )
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, coord: Coord) {
        self.cells.clear();
        self.cells.push(coord);
    }

    /// Appends `coord` if it continues the path: not already selected, one of
    /// the eight neighbours of the last cell, and (from the third cell on) in
    /// the same direction the path has been heading.
    pub fn extend(&mut self, coord: Coord) -> bool {
        let Some(&last) = self.cells.last() else {
            self.cells.push(coord);
            return true;
        };

        if self.contains(coord) {
            return false;
        }

        let dx = signed_delta(last.x, coord.x);
        let dy = signed_delta(last.y, coord.y);
        if dx.abs() > 1 || dy.abs() > 1 {
            return false;
        }

        if self.cells.len() >= 2 {
            let first = self.cells[0];
            let heading = (
                signed_delta(first.x, last.x).signum(),
                signed_delta(first.y, last.y).signum(),
            );
            if (dx, dy) != heading {
                return false;
            }
        }

        self.cells.push(coord);
        true
    }

    /// Replaces the path with the straight line from its first cell to
    /// `coord`. Used when the pointer skips cells mid-drag. Returns false and
    /// leaves the path alone if no straight line exists.
    pub fn drag_to(&mut self, coord: Coord) -> bool {
        let Some(&first) = self.cells.first() else {
            self.begin(coord);
            return true;
        };
        match Self::line(first, coord) {
            Some(cells) => {
                self.cells = cells;
                true
            }
            None => false,
        }
    }

    /// Cells from `from` to `to` inclusive, if they lie on a row, a column or
    /// a 45 degree diagonal.
    pub fn line(from: Coord, to: Coord) -> Option<Vec<Coord>> {
        let dx = signed_delta(from.x, to.x);
        let dy = signed_delta(from.y, to.y);
        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return None;
        }
        let steps = dx.abs().max(dy.abs());
        let (sx, sy) = (dx.signum(), dy.signum());
        Some((0..=steps).map(|i| offset(from, sx, sy, i)).collect())
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Hands the path over for matching and clears the selection.
    pub fn take(&mut self) -> Vec<Coord> {
        std::mem::take(&mut self.cells)
    }
}
