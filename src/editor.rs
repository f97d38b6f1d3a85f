use log::debug;
use std::ops::ControlFlow;

use crate::cell::{CellId, CellState};
use crate::config::Config;
use crate::error::{SearchError, SearchResult};
use crate::grid::Grid;
use crate::search::{find_path_with, PathResult, SearchConfig, Step};

/// The commands a user interface offers on top of a [Grid]: placing the start and end cells,
/// painting and erasing barriers, resetting, and triggering a search. Nothing here renders or
/// polls input; a front end maps clicks and key presses onto these calls.
#[derive(Clone, Debug)]
pub struct Editor {
    pub grid: Grid,
    pub search: SearchConfig,
}

impl Editor {
    pub fn new(rows: usize, width: u32) -> Editor {
        Editor {
            grid: Grid::new(rows, width),
            search: SearchConfig::default(),
        }
    }

    pub fn from_config(config: &Config) -> Editor {
        Editor {
            grid: Grid::new(config.grid.rows, config.grid.width),
            search: config.search,
        }
    }

    pub fn start(&self) -> Option<CellId> {
        self.grid.start()
    }
    pub fn end(&self) -> Option<CellId> {
        self.grid.end()
    }

    /// Places the start if there is none, then the end, and paints barriers once both exist.
    /// The start and end cells themselves are never painted over. Returns whether the grid
    /// changed.
    pub fn primary_click(&mut self, cell: CellId) -> bool {
        if !self.grid.in_bounds(cell) {
            return false;
        }
        let is_start = self.start() == Some(cell);
        let is_end = self.end() == Some(cell);
        let state = if self.start().is_none() && !is_end {
            CellState::Start
        } else if self.end().is_none() && !is_start {
            CellState::End
        } else if !is_start && !is_end {
            CellState::Blocked
        } else {
            return false;
        };
        debug!("Painting {cell} as {state:?}");
        self.grid.set_state(cell, state);
        true
    }

    /// Erases a cell back to `Empty`, releasing the start or end role if it held one.
    pub fn secondary_click(&mut self, cell: CellId) -> bool {
        if !self.grid.in_bounds(cell) {
            return false;
        }
        debug!("Erasing {cell}");
        self.grid.set_state(cell, CellState::Empty);
        true
    }

    /// [primary_click](Self::primary_click) at a pointer position; ignored outside the grid.
    pub fn primary_click_at(&mut self, pos: (f32, f32)) -> bool {
        match self.grid.locate(pos) {
            Some(cell) => self.primary_click(cell),
            None => false,
        }
    }

    /// [secondary_click](Self::secondary_click) at a pointer position; ignored outside the grid.
    pub fn secondary_click_at(&mut self, pos: (f32, f32)) -> bool {
        match self.grid.locate(pos) {
            Some(cell) => self.secondary_click(cell),
            None => false,
        }
    }

    /// Clears the whole grid, including start and end.
    pub fn reset(&mut self) {
        debug!("Resetting grid");
        self.grid.reset();
    }

    /// Wipes the marks of any earlier run, refreshes adjacency and searches from the start to
    /// the end cell. Fails with [SearchError::InvalidRequest] if either is missing.
    pub fn run_search<F>(&mut self, on_visit: F) -> SearchResult<PathResult>
    where
        F: FnMut(&Grid, Step) -> ControlFlow<()>,
    {
        let start = self
            .start()
            .ok_or(SearchError::InvalidRequest("no start cell placed"))?;
        let end = self
            .end()
            .ok_or(SearchError::InvalidRequest("no end cell placed"))?;
        self.grid.clear_search_marks();
        self.grid.recompute_adjacency();
        find_path_with(&mut self.grid, start, end, &self.search, on_visit)
    }
}

impl Default for Editor {
    fn default() -> Editor {
        Editor::from_config(&Config::default())
    }
}
