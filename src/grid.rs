use core::fmt;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellId, CellState, N_NEIGHBOURS};

/// Square grid of [Cell]s. Besides the per-cell state it tracks where the start and end cells
/// are, whether the cached adjacency lists still match the barriers, and connected components
/// in a [UnionFind] structure that can be used to answer reachability queries without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    width: u32,
    space: u32,
    cells: Vec<Cell>,
    start: Option<CellId>,
    end: Option<CellId>,
    adjacency_dirty: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Allocates a `rows` x `rows` grid of empty cells spread over `width` pixels. Adjacency
    /// starts out stale; call [recompute_adjacency](Self::recompute_adjacency) before searching.
    pub fn new(rows: usize, width: u32) -> Grid {
        let space = if rows == 0 { 0 } else { width / rows as u32 };
        let cells = iproduct!(0..rows, 0..rows)
            .map(|(row, col)| Cell::new(CellId::new(row, col), space))
            .collect();
        Grid {
            rows,
            width,
            space,
            cells,
            start: None,
            end: None,
            adjacency_dirty: true,
            components: UnionFind::new(rows * rows),
            components_dirty: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Pixel size of a single cell.
    pub fn cell_size(&self) -> u32 {
        self.space
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn start(&self) -> Option<CellId> {
        self.start
    }
    pub fn end(&self) -> Option<CellId> {
        self.end
    }
    /// True when barriers changed after the last adjacency recomputation.
    pub fn adjacency_dirty(&self) -> bool {
        self.adjacency_dirty
    }

    pub fn in_bounds(&self, id: CellId) -> bool {
        id.row < self.rows && id.col < self.rows
    }
    fn get_ix(&self, id: CellId) -> usize {
        id.row * self.rows + id.col
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        if self.in_bounds(id) {
            Some(&self.cells[self.get_ix(id)])
        } else {
            None
        }
    }
    pub fn state(&self, id: CellId) -> Option<CellState> {
        self.get(id).map(|c| c.state)
    }
    pub fn is_blocked(&self, id: CellId) -> bool {
        self.state(id) == Some(CellState::Blocked)
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Cached adjacency of a cell; empty for out-of-bounds identifiers.
    pub fn neighbours(&self, id: CellId) -> &[CellId] {
        self.get(id).map(|c| c.neighbours()).unwrap_or(&[])
    }

    /// Overwrites the state of a cell. Placing a `Start` or `End` demotes any previous holder of
    /// that role to `Empty`. Toggling a barrier marks adjacency and components as stale but
    /// does not touch any adjacency list.
    ///
    /// # Panics
    /// If `id` lies outside the grid.
    pub fn set_state(&mut self, id: CellId, state: CellState) {
        assert!(self.in_bounds(id), "cell {id} is outside the grid");
        let ix = self.get_ix(id);
        let old = self.cells[ix].state;
        if old == state {
            return;
        }
        match state {
            CellState::Start => {
                if let Some(prev) = self.start.replace(id) {
                    let prev_ix = self.get_ix(prev);
                    self.cells[prev_ix].state = CellState::Empty;
                }
            }
            CellState::End => {
                if let Some(prev) = self.end.replace(id) {
                    let prev_ix = self.get_ix(prev);
                    self.cells[prev_ix].state = CellState::Empty;
                }
            }
            _ => {}
        }
        match old {
            CellState::Start if self.start == Some(id) => self.start = None,
            CellState::End if self.end == Some(id) => self.end = None,
            _ => {}
        }
        if (old == CellState::Blocked) != (state == CellState::Blocked) {
            self.adjacency_dirty = true;
            self.components_dirty = true;
        }
        self.cells[ix].state = state;
    }

    fn open_neighbours(&self, id: CellId) -> SmallVec<[CellId; N_NEIGHBOURS]> {
        id.neumann_neighborhood()
            .into_iter()
            .filter(|&n| self.in_bounds(n) && !self.is_blocked(n))
            .collect()
    }

    /// Rebuilds every cell's adjacency from its right, left, up and down neighbours, leaving
    /// out positions outside the grid and blocked cells.
    pub fn recompute_adjacency(&mut self) {
        debug!("Recomputing adjacency for {} cells", self.cells.len());
        for ix in 0..self.cells.len() {
            let neighbours = self.open_neighbours(self.cells[ix].id);
            self.cells[ix].neighbours = neighbours;
        }
        self.adjacency_dirty = false;
    }

    /// Maps a pointer position to the cell containing it. The first coordinate selects the row.
    /// Returns [None] for positions outside the grid.
    pub fn locate(&self, pos: (f32, f32)) -> Option<CellId> {
        let (x, y) = pos;
        if self.space == 0 || !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let id = CellId::new(
            (x as u32 / self.space) as usize,
            (y as u32 / self.space) as usize,
        );
        self.in_bounds(id).then_some(id)
    }

    /// Sets every cell back to `Empty` and forgets start, end and adjacency.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.state = CellState::Empty;
            cell.neighbours.clear();
        }
        self.start = None;
        self.end = None;
        self.adjacency_dirty = true;
        self.components_dirty = true;
    }

    /// Removes the marks left by a previous search, keeping barriers, start and end.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.state.is_search_mark()) {
            cell.state = CellState::Empty;
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open cells with their open right and
    /// down neighbours.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.cells.len());
        for cell in self.cells.iter().filter(|c| c.state != CellState::Blocked) {
            let parent_ix = self.get_ix(cell.id);
            [
                CellId::new(cell.id.row, cell.id.col + 1),
                CellId::new(cell.id.row + 1, cell.id.col),
            ]
            .into_iter()
            .filter(|&n| self.in_bounds(n) && !self.is_blocked(n))
            .for_each(|n| {
                components.union(parent_ix, self.get_ix(n));
            });
        }
        self.components = components;
        self.components_dirty = false;
    }

    /// Checks if two open cells are on the same component. Only meaningful after
    /// [update](Self::update) or [generate_components](Self::generate_components).
    pub fn reachable(&self, a: CellId, b: CellId) -> bool {
        self.in_bounds(a)
            && self.in_bounds(b)
            && !self.is_blocked(a)
            && !self.is_blocked(b)
            && self.components.equiv(self.get_ix(a), self.get_ix(b))
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(crate::DEFAULT_ROWS, crate::DEFAULT_WIDTH)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.rows.max(1)) {
            let line = row.iter().map(|c| c.state.glyph()).collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
