//! A* search over the cached 4-adjacency of a [Grid], painting its progress into the grid and
//! reporting every change to a caller supplied callback so the search can be animated.
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::IndexSet;
use log::{debug, info, warn};
use serde::Deserialize;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;

use crate::cell::{CellId, CellState, N_NEIGHBOURS};
use crate::error::{SearchError, SearchResult};
use crate::grid::Grid;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Outcome of a search that was allowed to start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Cells from the start to the end, excluding the start and including the end.
    Found(Vec<CellId>),
    /// The frontier ran empty without reaching the end.
    NotFound,
    /// The callback asked the search to stop.
    Cancelled,
}

impl PathResult {
    /// Number of edges on the found path.
    pub fn path_len(&self) -> Option<usize> {
        match self {
            PathResult::Found(path) => Some(path.len()),
            _ => None,
        }
    }

    /// True if a path to the end was found.
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// Progress notification passed to the visit callback. Each call is a point where the
/// callback may render, poll input and decide whether the search continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The search changed the state of a single cell.
    Marked { cell: CellId, state: CellState },
    /// One expansion finished; the whole grid may be redrawn.
    Frame,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Close cells still waiting in the open set once a path is found, so that no `Frontier`
    /// marks outlive a successful run.
    pub settle_frontier: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            settle_frontier: true,
        }
    }
}

/// Manhattan distance, admissible and consistent for unit-cost 4-directional moves.
pub fn heuristic(a: &CellId, b: &CellId) -> usize {
    a.manhattan_distance(b)
}

struct SmallestCostHolder {
    estimated_cost: usize,
    sequence: u64,
    cell: CellId,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.sequence == other.sequence
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimate first, then earliest insertion
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Bookkeeping for a single run. Cells without a score entry are at infinity.
#[derive(Default)]
struct SearchState {
    g_score: FxHashMap<CellId, usize>,
    f_score: FxHashMap<CellId, usize>,
    came_from: FxHashMap<CellId, CellId>,
    to_see: BinaryHeap<SmallestCostHolder>,
    open_set: FxIndexSet<CellId>,
    closed: FxHashSet<CellId>,
    sequence: u64,
}

impl SearchState {
    /// Queues `cell` keyed by its current estimate and a fresh sequence number.
    fn push(&mut self, cell: CellId) {
        let estimated_cost = self.f_score.get(&cell).copied().unwrap_or(usize::MAX);
        self.sequence += 1;
        self.to_see.push(SmallestCostHolder {
            estimated_cost,
            sequence: self.sequence,
            cell,
        });
    }

    /// Records `tentative_g` if it beats the best known distance to `cell`.
    fn improve(&mut self, cell: CellId, from: CellId, tentative_g: usize, h: usize) -> bool {
        if self
            .g_score
            .get(&cell)
            .is_some_and(|&g| tentative_g >= g)
        {
            return false;
        }
        self.came_from.insert(cell, from);
        self.g_score.insert(cell, tentative_g);
        self.f_score.insert(cell, tentative_g + h);
        true
    }

    /// Predecessors of `end` back to, but excluding, `start`.
    fn walk_back(&self, start: CellId, end: CellId) -> impl Iterator<Item = CellId> + '_ {
        std::iter::successors(self.came_from.get(&end).copied(), |c| {
            self.came_from.get(c).copied()
        })
        .take_while(move |&c| c != start)
    }
}

/// Paints `state` into the grid and reports it. Start, end and barriers are never repainted and
/// unchanged cells are not reported.
fn mark<F>(grid: &mut Grid, cell: CellId, state: CellState, on_visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&Grid, Step) -> ControlFlow<()>,
{
    match grid.state(cell) {
        None | Some(CellState::Start | CellState::End | CellState::Blocked) => {
            ControlFlow::Continue(())
        }
        Some(current) if current == state => ControlFlow::Continue(()),
        Some(_) => {
            grid.set_state(cell, state);
            on_visit(grid, Step::Marked { cell, state })
        }
    }
}

fn check_request(grid: &Grid, start: CellId, end: CellId) -> SearchResult<()> {
    for cell in [start, end] {
        if !grid.in_bounds(cell) {
            return Err(SearchError::OutOfBounds(cell));
        }
        if grid.is_blocked(cell) {
            return Err(SearchError::Blocked(cell));
        }
    }
    if grid.adjacency_dirty() {
        return Err(SearchError::StaleAdjacency);
    }
    Ok(())
}

/// [find_path_with] using the default [SearchConfig].
pub fn find_path<F>(
    grid: &mut Grid,
    start: CellId,
    end: CellId,
    on_visit: F,
) -> SearchResult<PathResult>
where
    F: FnMut(&Grid, Step) -> ControlFlow<()>,
{
    find_path_with(grid, start, end, &SearchConfig::default(), on_visit)
}

/// Runs A* from `start` to `end` over the grid's cached adjacency.
///
/// Newly discovered cells are painted `Frontier` and expanded cells other than the start
/// `Visited`; on success the cells between start and end are painted `Path`. Each change is
/// reported through `on_visit`, followed by one [Step::Frame] per expansion. Returning
/// [ControlFlow::Break] from the callback stops the search with [PathResult::Cancelled].
///
/// A cell is queued once, when it is discovered, and keeps that sequence number for tie-breaks
/// even if its distance improves while it waits. Entries for cells that are already closed are
/// skipped when popped. The end cell keeps its `End` state, so its discovery is not reported.
pub fn find_path_with<F>(
    grid: &mut Grid,
    start: CellId,
    end: CellId,
    config: &SearchConfig,
    mut on_visit: F,
) -> SearchResult<PathResult>
where
    F: FnMut(&Grid, Step) -> ControlFlow<()>,
{
    if let Err(e) = check_request(grid, start, end) {
        warn!("Rejected search from {start} to {end}: {e}");
        return Err(e);
    }
    info!("Searching from {start} to {end}");
    if start == end {
        return Ok(PathResult::Found(Vec::new()));
    }

    let mut state = SearchState::default();
    let h_start = heuristic(&start, &end);
    state.g_score.insert(start, 0);
    state.f_score.insert(start, h_start);
    state.push(start);
    state.open_set.insert(start);

    let mut expanded = 0usize;
    while let Some(SmallestCostHolder { cell: current, .. }) = state.to_see.pop() {
        state.open_set.swap_remove(&current);
        if state.closed.contains(&current) {
            continue;
        }

        if current == end {
            return Ok(finish(grid, &mut state, start, end, config, &mut on_visit, expanded));
        }

        let Some(&current_g) = state.g_score.get(&current) else {
            continue;
        };
        let neighbours: SmallVec<[CellId; N_NEIGHBOURS]> =
            SmallVec::from_slice(grid.neighbours(current));
        for neighbour in neighbours {
            let tentative_g = current_g + 1;
            if !state.improve(neighbour, current, tentative_g, heuristic(&neighbour, &end)) {
                continue;
            }
            if !state.open_set.insert(neighbour) {
                continue;
            }
            state.push(neighbour);
            if mark(grid, neighbour, CellState::Frontier, &mut on_visit).is_break() {
                return Ok(cancelled(expanded));
            }
        }

        if on_visit(grid, Step::Frame).is_break() {
            return Ok(cancelled(expanded));
        }
        state.closed.insert(current);
        expanded += 1;
        if current != start && mark(grid, current, CellState::Visited, &mut on_visit).is_break() {
            return Ok(cancelled(expanded));
        }
    }
    info!("No path from {start} to {end} after expanding {expanded} cells");
    Ok(PathResult::NotFound)
}

fn cancelled(expanded: usize) -> PathResult {
    info!("Search cancelled after expanding {expanded} cells");
    PathResult::Cancelled
}

/// Paints the path found to `end` and settles the remaining frontier if configured.
fn finish<F>(
    grid: &mut Grid,
    state: &mut SearchState,
    start: CellId,
    end: CellId,
    config: &SearchConfig,
    on_visit: &mut F,
    expanded: usize,
) -> PathResult
where
    F: FnMut(&Grid, Step) -> ControlFlow<()>,
{
    let mut path = Vec::new();
    let backward = state.walk_back(start, end).collect::<Vec<_>>();
    for cell in std::iter::once(end).chain(backward) {
        if mark(grid, cell, CellState::Path, on_visit).is_break() {
            return cancelled(expanded);
        }
        path.push(cell);
    }
    path.reverse();
    if config.settle_frontier {
        let leftover = std::mem::take(&mut state.open_set);
        debug!("Settling {} frontier cells", leftover.len());
        for cell in leftover {
            if mark(grid, cell, CellState::Visited, on_visit).is_break() {
                return cancelled(expanded);
            }
        }
    }
    info!(
        "Found path of length {} from {start} to {end} after expanding {expanded} cells",
        path.len()
    );
    PathResult::Found(path)
}
