use grid_astar_vis::{find_path, heuristic, CellId, CellState, Grid, PathResult, Step};
use std::ops::ControlFlow;

fn prepared_grid(n: usize, blocked: &[(usize, usize)], start: CellId, end: CellId) -> Grid {
    let mut grid = Grid::new(n, (n * 16) as u32);
    for &cell in blocked {
        grid.set_state(cell.into(), CellState::Blocked);
    }
    grid.set_state(start, CellState::Start);
    grid.set_state(end, CellState::End);
    grid.recompute_adjacency();
    grid
}

fn record(grid: &mut Grid, start: CellId, end: CellId) -> (PathResult, Vec<Step>) {
    let mut steps = Vec::new();
    let result = find_path(grid, start, end, |_, step| {
        steps.push(step);
        ControlFlow::Continue(())
    })
    .unwrap();
    (result, steps)
}

#[test]
fn open_five_by_five_corner_to_corner() {
    let start = CellId::new(0, 0);
    let end = CellId::new(4, 4);
    let mut grid = prepared_grid(5, &[], start, end);
    assert_eq!(heuristic(&start, &end), 8);
    let (result, _) = record(&mut grid, start, end);
    let PathResult::Found(path) = result else {
        panic!("expected a path");
    };
    assert_eq!(path.len(), 8);
    assert_eq!(path.last(), Some(&end));
    assert!(!path.contains(&start));
    let mut prev = start;
    for &cell in &path {
        assert_eq!(prev.manhattan_distance(&cell), 1);
        prev = cell;
    }
    let painted = grid
        .cells()
        .filter(|c| c.state == CellState::Path)
        .count();
    assert_eq!(painted, 7);
}

#[test]
fn forced_detour_through_single_gap() {
    // |S..|
    // |##.|
    // |E..|
    let start = CellId::new(0, 0);
    let end = CellId::new(2, 0);
    let mut grid = prepared_grid(3, &[(1, 0), (1, 1)], start, end);
    let (result, _) = record(&mut grid, start, end);
    assert_eq!(result.path_len(), Some(6));
    assert_eq!(grid.state(CellId::new(1, 2)), Some(CellState::Path));
    assert_eq!(grid.state(CellId::new(1, 0)), Some(CellState::Blocked));
}

#[test]
fn enclosed_end_is_not_found() {
    let start = CellId::new(0, 0);
    let end = CellId::new(2, 2);
    let mut grid = prepared_grid(5, &[(1, 2), (3, 2), (2, 1), (2, 3)], start, end);
    let (result, steps) = record(&mut grid, start, end);
    assert_eq!(result, PathResult::NotFound);
    assert!(steps.iter().any(|s| *s == Step::Frame));
    assert!(grid.cells().all(|c| c.state != CellState::Frontier));
    assert_eq!(grid.state(start), Some(CellState::Start));
    assert_eq!(grid.state(end), Some(CellState::End));
}

#[test]
fn start_equals_end() {
    let cell = CellId::new(3, 1);
    let mut grid = Grid::new(5, 80);
    grid.recompute_adjacency();
    let (result, steps) = record(&mut grid, cell, cell);
    assert_eq!(result, PathResult::Found(Vec::new()));
    assert!(steps.is_empty());
}

#[test]
fn cancel_at_first_suspension_point() {
    let start = CellId::new(2, 2);
    let end = CellId::new(4, 4);
    let mut grid = prepared_grid(5, &[], start, end);
    let mut calls = 0;
    let result = find_path(&mut grid, start, end, |_, _| {
        calls += 1;
        ControlFlow::Break(())
    })
    .unwrap();
    assert_eq!(result, PathResult::Cancelled);
    assert_eq!(calls, 1);
    assert!(grid.cells().all(|c| c.state != CellState::Visited));
    let frontier = grid
        .cells()
        .filter(|c| c.state == CellState::Frontier)
        .collect::<Vec<_>>();
    assert!(frontier.len() <= 4);
    assert!(frontier.iter().all(|c| c.id.manhattan_distance(&start) == 1));
}

#[test]
fn cancel_after_a_few_frames() {
    let start = CellId::new(0, 0);
    let end = CellId::new(9, 9);
    let mut grid = prepared_grid(10, &[], start, end);
    let mut frames = 0;
    let result = find_path(&mut grid, start, end, |_, step| {
        if step == Step::Frame {
            frames += 1;
        }
        if frames == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();
    assert_eq!(result, PathResult::Cancelled);
    assert_eq!(frames, 3);
    assert!(grid.cells().all(|c| c.state != CellState::Path));
}

#[test]
fn every_frontier_cell_is_resolved() {
    // |S....|
    // |.###.|
    // |...#.|
    // |.#.#.|
    // |.#..E|
    let start = CellId::new(0, 0);
    let end = CellId::new(4, 4);
    let blocked = [(1, 1), (1, 2), (1, 3), (2, 3), (3, 1), (3, 3), (4, 1)];
    let mut grid = prepared_grid(5, &blocked, start, end);
    let (result, steps) = record(&mut grid, start, end);
    assert_eq!(result.path_len(), Some(8));
    for step in &steps {
        if let Step::Marked {
            cell,
            state: CellState::Frontier,
        } = step
        {
            assert!(matches!(
                grid.state(*cell),
                Some(CellState::Visited | CellState::Path)
            ));
        }
    }
}

#[test]
fn frames_match_expansions() {
    // Start, (0, 1) and (0, 2) are expanded before the end is popped. The three cells of the
    // second row that were discovered on the way are closed afterwards.
    let start = CellId::new(0, 0);
    let end = CellId::new(0, 3);
    let mut grid = prepared_grid(4, &[], start, end);
    let (result, steps) = record(&mut grid, start, end);
    assert_eq!(
        result,
        PathResult::Found(vec![CellId::new(0, 1), CellId::new(0, 2), end])
    );
    let frames = steps.iter().filter(|s| **s == Step::Frame).count();
    let visited = steps
        .iter()
        .filter(|s| matches!(s, Step::Marked { state: CellState::Visited, .. }))
        .count();
    assert_eq!(frames, 3);
    assert_eq!(visited, 5);
    // The end is discovered from (0, 2) but keeps its own state and is never reported
    assert!(steps
        .iter()
        .all(|s| !matches!(s, Step::Marked { cell, .. } if *cell == end)));
    assert_eq!(grid.state(end), Some(CellState::End));
    let closed = grid
        .cells()
        .filter(|c| c.state == CellState::Visited)
        .map(|c| c.id)
        .collect::<Vec<_>>();
    assert_eq!(
        closed,
        vec![CellId::new(1, 0), CellId::new(1, 1), CellId::new(1, 2)]
    );
}

#[test]
fn expansion_order_keeps_discovery_ties() {
    // |S..#E|
    // |.#.##|
    // |.....|
    // |..###|
    // |....#|
    // (0, 4) is walled in, so every open cell is expanded. (2, 2) is discovered from (1, 2)
    // at distance 5 and improves to 3 through (2, 1) while still queued. It keeps its first
    // queue entry, so (3, 0) is expanded before it.
    let start = CellId::new(1, 0);
    let end = CellId::new(0, 4);
    let blocked = [(0, 3), (1, 1), (1, 3), (1, 4), (3, 2), (3, 3), (3, 4), (4, 4)];
    let mut grid = prepared_grid(5, &blocked, start, end);
    let (result, steps) = record(&mut grid, start, end);
    assert_eq!(result, PathResult::NotFound);
    let order = |wanted: CellState| {
        steps
            .iter()
            .filter_map(|s| match s {
                Step::Marked { cell, state } if *state == wanted => Some((cell.row, cell.col)),
                _ => None,
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(
        order(CellState::Frontier),
        vec![
            (0, 0),
            (2, 0),
            (0, 1),
            (0, 2),
            (1, 2),
            (2, 1),
            (3, 0),
            (2, 2),
            (3, 1),
            (4, 0),
            (2, 3),
            (2, 4),
            (4, 1),
            (4, 2),
            (4, 3),
        ]
    );
    assert_eq!(
        order(CellState::Visited),
        vec![
            (0, 0),
            (0, 1),
            (0, 2),
            (2, 0),
            (1, 2),
            (2, 1),
            (3, 0),
            (2, 2),
            (2, 3),
            (2, 4),
            (3, 1),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
        ]
    );
}
