use core::fmt;
use smallvec::SmallVec;

/// Number of axis-aligned neighbours a cell can have.
pub const N_NEIGHBOURS: usize = 4;

/// Position of a cell on the grid, unique per grid location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub const fn new(row: usize, col: usize) -> CellId {
        CellId { row, col }
    }

    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
    pub fn manhattan_distance(&self, other: &CellId) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The four axis-aligned neighbours in the order right, left, up, down. Positions that
    /// would underflow are left out; the upper bound is checked by the grid.
    pub fn neumann_neighborhood(&self) -> SmallVec<[CellId; N_NEIGHBOURS]> {
        let mut n = SmallVec::new();
        n.push(CellId::new(self.row, self.col + 1));
        if self.col > 0 {
            n.push(CellId::new(self.row, self.col - 1));
        }
        if self.row > 0 {
            n.push(CellId::new(self.row - 1, self.col));
        }
        n.push(CellId::new(self.row + 1, self.col));
        n
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellId {
    fn from((row, col): (usize, usize)) -> Self {
        CellId::new(row, col)
    }
}

/// Discrete state of a cell. Painted by the user (`Blocked`, `Start`, `End`) or by the search
/// (`Frontier`, `Visited`, `Path`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Blocked,
    Start,
    End,
    Frontier,
    Visited,
    Path,
}

/// Plain RGB triple used by renderers.
pub type Rgb = (u8, u8, u8);

/// Colour of the grid lines drawn between cells.
pub const GRID_LINE_COLOUR: Rgb = (128, 128, 128);

impl CellState {
    /// True for the states the search paints and [Grid::clear_search_marks](crate::Grid::clear_search_marks) removes.
    pub fn is_search_mark(&self) -> bool {
        matches!(self, CellState::Frontier | CellState::Visited | CellState::Path)
    }

    /// Fill colour for a cell in this state. Purely presentational.
    pub fn colour(&self) -> Rgb {
        match self {
            CellState::Empty => (255, 255, 255),
            CellState::Blocked => (0, 0, 0),
            CellState::Start => (0, 190, 0),
            CellState::End => (255, 0, 0),
            CellState::Frontier => (65, 225, 208),
            CellState::Visited => (0, 0, 255),
            CellState::Path => (188, 19, 254),
        }
    }

    /// Single character used by the text rendering of a grid.
    pub fn glyph(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Blocked => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }
}

/// One grid location. The adjacency list is a cache filled by
/// [Grid::recompute_adjacency](crate::Grid::recompute_adjacency).
#[derive(Clone, Debug)]
pub struct Cell {
    pub id: CellId,
    pub state: CellState,
    pub(crate) neighbours: SmallVec<[CellId; N_NEIGHBOURS]>,
    size: u32,
}

impl Cell {
    pub(crate) fn new(id: CellId, size: u32) -> Cell {
        Cell {
            id,
            state: CellState::Empty,
            neighbours: SmallVec::new(),
            size,
        }
    }

    /// Cached non-blocked axis-aligned neighbours.
    pub fn neighbours(&self) -> &[CellId] {
        &self.neighbours
    }

    /// Pixel position of the cell's corner. The row runs along the horizontal axis.
    pub fn pixel_origin(&self) -> (u32, u32) {
        (self.id.row as u32 * self.size, self.id.col as u32 * self.size)
    }

    /// Side length of the cell in pixels.
    pub fn pixel_size(&self) -> u32 {
        self.size
    }
}
