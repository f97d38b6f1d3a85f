use grid_astar_vis::{find_path, CellId, CellState, Grid};
use std::ops::ControlFlow;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// |## |
// |E  |
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood, so the path has to go around the wall.

fn main() {
    let mut grid = Grid::new(3, 30);
    let start = CellId::new(0, 0);
    let end = CellId::new(2, 0);
    grid.set_state(start, CellState::Start);
    grid.set_state(end, CellState::End);
    grid.set_state(CellId::new(1, 0), CellState::Blocked);
    grid.set_state(CellId::new(1, 1), CellState::Blocked);
    grid.recompute_adjacency();
    println!("{}", grid);
    let result = find_path(&mut grid, start, end, |_, _| ControlFlow::Continue(())).unwrap();
    println!("{:?}", result);
    println!("{}", grid);
}
