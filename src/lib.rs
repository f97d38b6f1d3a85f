//! # grid_astar_vis
//!
//! The computational core of an interactive shortest-path visualizer. A square [Grid] of
//! [Cell]s is painted by the user with barriers and a start and end cell, then
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic searches it
//! over 4-directional unit-cost moves. The search paints the frontier, the expanded cells and
//! the final path into the grid and hands every step to a callback, which a front end uses to
//! animate the run and to cancel it.
//!
//! Rendering, windowing and input handling are left to the caller; [CellState::colour] and
//! the [Display](core::fmt::Display) implementation of [Grid] are the only presentation hooks.
//!
//! ```
//! use grid_astar_vis::{find_path, CellId, CellState, Grid, PathResult};
//! use std::ops::ControlFlow;
//!
//! let mut grid = Grid::new(5, 100);
//! let (start, end) = (CellId::new(0, 0), CellId::new(4, 4));
//! grid.set_state(start, CellState::Start);
//! grid.set_state(end, CellState::End);
//! grid.recompute_adjacency();
//! let result = find_path(&mut grid, start, end, |_, _| ControlFlow::Continue(())).unwrap();
//! assert_eq!(result.path_len(), Some(8));
//! ```
pub mod cell;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod search;

pub use cell::{Cell, CellId, CellState, Rgb, GRID_LINE_COLOUR};
pub use config::{Config, GridConfig, DEFAULT_ROWS, DEFAULT_WIDTH};
pub use editor::Editor;
pub use error::{ConfigError, ConfigResult, SearchError, SearchResult};
pub use grid::Grid;
pub use search::{find_path, find_path_with, heuristic, PathResult, SearchConfig, Step};
