//! Uniform grid spatial index
//!
//! Buckets actor indices into square cells with a counting sort, rebuilt from
//! scratch every tick. Pairs are emitted from each cell and four forward
//! neighbours only, so every unordered pair comes out exactly once.

use glam::Vec2;

/// Forward half of the 8-neighbourhood: E, SW, S, SE
const FORWARD_NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Upper bound on grid resolution; cells grow past the requested size on huge arenas
pub const MAX_CELLS_PER_AXIS: usize = 256;

/// Dense uniform grid over the arena
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Prefix offsets into `entries`, one per cell plus a terminator
    cell_start: Vec<usize>,
    /// Item indices grouped by cell, ascending within a cell
    entries: Vec<usize>,
    /// Scratch: (cell, item) per indexed item
    scratch: Vec<(usize, usize)>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the grid from `(item index, position)` pairs.
    ///
    /// Items must arrive in ascending index order for pairs to come out as (lower, higher).
    /// The effective cell size never drops below `cell_size`, but is raised so that
    /// neither axis needs more than [`MAX_CELLS_PER_AXIS`] cells.
    pub fn rebuild<I>(&mut self, arena: Vec2, cell_size: f32, items: I)
    where
        I: IntoIterator<Item = (usize, Vec2)>,
    {
        let coarsest = arena.max_element() / MAX_CELLS_PER_AXIS as f32;
        self.cell_size = cell_size.max(coarsest).max(1.0);
        self.cols = ((arena.x / self.cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS);
        self.rows = ((arena.y / self.cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS);
        let cells = self.cols * self.rows;

        self.scratch.clear();
        for (item, pos) in items {
            let (cx, cy) = self.cell_coords(pos);
            self.scratch.push((cy * self.cols + cx, item));
        }

        // Counting sort: counts -> prefix offsets -> placement
        self.cell_start.clear();
        self.cell_start.resize(cells + 1, 0);
        for &(cell, _) in &self.scratch {
            self.cell_start[cell + 1] += 1;
        }
        for c in 0..cells {
            self.cell_start[c + 1] += self.cell_start[c];
        }
        self.entries.clear();
        self.entries.resize(self.scratch.len(), 0);
        let mut cursor = self.cell_start.clone();
        for &(cell, item) in &self.scratch {
            self.entries[cursor[cell]] = item;
            cursor[cell] += 1;
        }
    }

    /// Cell coordinates for a position, clamped to the grid
    pub fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let cx = (pos.x / self.cell_size).floor().max(0.0) as usize;
        let cy = (pos.y / self.cell_size).floor().max(0.0) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }

    /// Items bucketed in cell (cx, cy)
    pub fn bucket(&self, cx: usize, cy: usize) -> &[usize] {
        if cx >= self.cols || cy >= self.rows {
            return &[];
        }
        let cell = cy * self.cols + cx;
        &self.entries[self.cell_start[cell]..self.cell_start[cell + 1]]
    }

    /// Append every candidate pair `(i, j)` with `i < j` to `out`
    pub fn candidate_pairs(&self, out: &mut Vec<(usize, usize)>) {
        if self.entries.is_empty() {
            return;
        }
        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let own = self.bucket(cx, cy);
                if own.is_empty() {
                    continue;
                }
                for (k, &a) in own.iter().enumerate() {
                    for &b in &own[k + 1..] {
                        out.push((a, b));
                    }
                }
                for (dx, dy) in FORWARD_NEIGHBOURS {
                    let (nx, ny) = (cx as isize + dx, cy as isize + dy);
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    let other = self.bucket(nx as usize, ny as usize);
                    for &a in own {
                        for &b in other {
                            out.push((a.min(b), a.max(b)));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_index() {
        let mut grid = SpatialIndex::new();
        grid.rebuild(Vec2::new(100.0, 100.0), 10.0, std::iter::empty());
        assert!(grid.is_empty());
        let mut pairs = Vec::new();
        grid.candidate_pairs(&mut pairs);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_same_cell_pair() {
        let mut grid = SpatialIndex::new();
        let items = [(0, Vec2::new(5.0, 5.0)), (1, Vec2::new(6.0, 6.0))];
        grid.rebuild(Vec2::new(100.0, 100.0), 10.0, items);
        let mut pairs = Vec::new();
        grid.candidate_pairs(&mut pairs);
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_diagonal_neighbours_across_cell_border() {
        let mut grid = SpatialIndex::new();
        // Straddles a SW/NE border: (1,0) and (0,1) cells
        let items = [(0, Vec2::new(10.5, 9.5)), (1, Vec2::new(9.5, 10.5))];
        grid.rebuild(Vec2::new(100.0, 100.0), 10.0, items);
        let mut pairs = Vec::new();
        grid.candidate_pairs(&mut pairs);
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_out_of_bounds_positions_clamp() {
        let mut grid = SpatialIndex::new();
        let items = [(0, Vec2::new(-3.0, 250.0)), (1, Vec2::new(0.5, 99.0))];
        grid.rebuild(Vec2::new(100.0, 100.0), 10.0, items);
        assert_eq!(grid.cell_coords(Vec2::new(-3.0, 250.0)), (0, 9));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_huge_arena_caps_cell_count() {
        let mut grid = SpatialIndex::new();
        let arena = Vec2::new(1.0e7, 1.0e7);
        let items = [
            (0, Vec2::new(540.0, 540.0)),
            (1, Vec2::new(560.0, 540.0)),
            (2, Vec2::new(9.9e6, 9.9e6)),
        ];
        grid.rebuild(arena, 72.0, items);

        assert!(grid.cell_size() >= 1.0e7 / MAX_CELLS_PER_AXIS as f32);
        assert_eq!(grid.cell_coords(arena), (MAX_CELLS_PER_AXIS - 1, MAX_CELLS_PER_AXIS - 1));
        assert_eq!(grid.len(), 3);

        let mut pairs = Vec::new();
        grid.candidate_pairs(&mut pairs);
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_requested_cell_size_kept_on_small_arena() {
        let mut grid = SpatialIndex::new();
        grid.rebuild(Vec2::new(1080.0, 1080.0), 72.0, std::iter::empty());
        assert_eq!(grid.cell_size(), 72.0);
    }

    proptest! {
        #[test]
        fn prop_close_pairs_are_candidates(
            points in proptest::collection::vec((0.0f32..300.0, 0.0f32..200.0), 0..80),
            cell in 4.0f32..40.0,
        ) {
            let mut grid = SpatialIndex::new();
            grid.rebuild(
                Vec2::new(300.0, 200.0),
                cell,
                points.iter().enumerate().map(|(i, &(x, y))| (i, Vec2::new(x, y))),
            );
            let mut pairs = Vec::new();
            grid.candidate_pairs(&mut pairs);

            let unique: HashSet<_> = pairs.iter().copied().collect();
            prop_assert_eq!(unique.len(), pairs.len(), "pair emitted twice");
            for &(i, j) in &pairs {
                prop_assert!(i < j);
            }

            for i in 0..points.len() {
                for j in i + 1..points.len() {
                    let a = Vec2::new(points[i].0, points[i].1);
                    let b = Vec2::new(points[j].0, points[j].1);
                    if a.distance(b) < grid.cell_size() {
                        prop_assert!(unique.contains(&(i, j)), "missed close pair {} {}", i, j);
                    }
                }
            }
        }
    }
}
