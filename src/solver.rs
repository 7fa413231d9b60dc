//! Iterative-deepening A* over the face-turn graph of the cube.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use fxhash::FxHashSet;
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::SolverConfig,
    cube::CubeState,
    moves::{FACE_TURNS, Face, Move, MoveSequence},
    start, success, working,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Time limit of {:.3}s exceeded", .limit.as_secs_f64())]
    SearchTimeout { limit: Duration },
    #[error("The search was cancelled")]
    SearchCancelled,
    #[error("No solution of at most {max_depth} moves was found")]
    DepthExceeded { max_depth: u32 },
}

/// A cooperative cancellation flag shared between a running search and
/// whoever wants to stop it. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A snapshot handed to the progress observer before every depth iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchProgress {
    /// The one-based index of the iteration about to run.
    pub depth: u32,
    /// Nodes expanded over all previous iterations.
    pub nodes_expanded: u64,
    /// The f-value bound the iteration searches within.
    pub current_bound: u32,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveStats {
    pub solver_name: String,
    pub move_count: usize,
    pub elapsed: Duration,
    pub moves_per_second: f64,
}

impl SolveStats {
    #[must_use]
    pub fn new(solver_name: impl Into<String>, move_count: usize, elapsed: Duration) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let moves_per_second = move_count as f64 / elapsed.as_secs_f64().max(0.001);
        Self {
            solver_name: solver_name.into(),
            move_count,
            elapsed,
            moves_per_second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub moves: MoveSequence,
    pub stats: SolveStats,
}

/// The number of cubies not in their home position.
fn misplaced(perm: &[u8]) -> u32 {
    let count = perm
        .iter()
        .enumerate()
        .filter(|&(i, &cubie)| i != cubie as usize)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// An estimate of the number of face turns needed to solve `state`: the
/// maximum of the corner twist over three, the edge flip over two, the
/// misplaced corners over three and the misplaced edges over four, each
/// rounded up.
///
/// Zero only for the solved state. A single quarter turn moves four corners,
/// so the estimate can exceed the true distance near the solved state
/// and found solutions are short rather than guaranteed optimal.
#[must_use]
pub fn heuristic(state: &CubeState) -> u32 {
    if state.is_solved() {
        return 0;
    }
    let twist: u32 = state.corner_orient().iter().map(|&co| u32::from(co)).sum();
    let flip: u32 = state.edge_orient().iter().map(|&eo| u32::from(eo)).sum();
    let corners = misplaced(state.corner_perm());
    let edges = misplaced(state.edge_perm());
    [
        twist.div_ceil(3),
        flip.div_ceil(2),
        corners.div_ceil(3),
        edges.div_ceil(4),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
    .max(1)
}

/// The result of one bounded depth-first search. `NewBound(u32::MAX)` stands
/// for an infinite bound.
enum SearchResult {
    Found,
    NewBound(u32),
}

/// Per-search state, owned by a single call to [`IdaStarSolver::solve_with`].
struct IdaStarSolverMutable<'a> {
    path: Vec<Move>,
    on_path: FxHashSet<CubeState>,
    nodes_expanded: u64,
    start: Instant,
    cancel: &'a CancelToken,
}

pub struct IdaStarSolver {
    config: SolverConfig,
}

impl Default for IdaStarSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl IdaStarSolver {
    pub const NAME: &'static str = "IDA*";

    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Searches for a sequence of face turns that solves `state`.
    ///
    /// # Errors
    ///
    /// See [`IdaStarSolver::solve_with`].
    pub fn solve(&self, state: &CubeState) -> Result<Solution, SolverError> {
        self.solve_with(state, &CancelToken::new(), |_| {})
    }

    /// Searches for a sequence of face turns that solves `state`, calling
    /// `observer` before every depth iteration and polling `cancel` at every
    /// node.
    ///
    /// The bound of each iteration is the smallest f-value that exceeded the
    /// previous one, starting at the heuristic value of `state`. At most
    /// `max_depth` iterations run. A solved `state` returns an empty solution
    /// without searching.
    ///
    /// # Errors
    ///
    /// [`SolverError::SearchCancelled`] once `cancel` is set,
    /// [`SolverError::SearchTimeout`] once the time limit runs out and
    /// [`SolverError::DepthExceeded`] when no solution exists within the
    /// configured maximum depth.
    pub fn solve_with(
        &self,
        state: &CubeState,
        cancel: &CancelToken,
        mut observer: impl FnMut(&SearchProgress),
    ) -> Result<Solution, SolverError> {
        info!(start!("Searching for a solution"));
        let start = Instant::now();
        if state.is_solved() {
            info!(success!("The cube is already solved"));
            return Ok(Solution {
                moves: MoveSequence::default(),
                stats: SolveStats::new(Self::NAME, 0, start.elapsed()),
            });
        }
        let mut mutable = IdaStarSolverMutable {
            path: vec![],
            on_path: FxHashSet::default(),
            nodes_expanded: 0,
            start,
            cancel,
        };
        let max_depth = self.config.max_depth;
        let mut bound = heuristic(state);

        for depth in 1..=max_depth {
            if bound == u32::MAX {
                break;
            }
            observer(&SearchProgress {
                depth,
                nodes_expanded: mutable.nodes_expanded,
                current_bound: bound,
                elapsed: mutable.start.elapsed(),
            });
            self.check_interrupts(&mutable)?;

            debug!(working!("Searching depth {} with bound {}..."), depth, bound);
            let depth_start = Instant::now();
            let nodes_before = mutable.nodes_expanded;
            let result = self.search(&mut mutable, state, 0, bound)?;
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                mutable.nodes_expanded - nodes_before,
                depth_start.elapsed().as_secs_f64()
            );

            match result {
                SearchResult::Found => {
                    let elapsed = mutable.start.elapsed();
                    let moves = MoveSequence::new(mutable.path);
                    info!(
                        success!("Found a {} move solution in {:.3}s after {} nodes"),
                        moves.len(),
                        elapsed.as_secs_f64(),
                        mutable.nodes_expanded
                    );
                    let stats = SolveStats::new(Self::NAME, moves.len(), elapsed);
                    return Ok(Solution { moves, stats });
                }
                SearchResult::NewBound(new_bound) => bound = new_bound,
            }
        }

        Err(SolverError::DepthExceeded { max_depth })
    }

    fn check_interrupts(&self, mutable: &IdaStarSolverMutable<'_>) -> Result<(), SolverError> {
        if mutable.cancel.is_cancelled() {
            return Err(SolverError::SearchCancelled);
        }
        if mutable.start.elapsed() >= self.config.time_limit {
            return Err(SolverError::SearchTimeout {
                limit: self.config.time_limit,
            });
        }
        Ok(())
    }

    fn search(
        &self,
        mutable: &mut IdaStarSolverMutable<'_>,
        state: &CubeState,
        g: u32,
        bound: u32,
    ) -> Result<SearchResult, SolverError> {
        self.check_interrupts(mutable)?;
        mutable.nodes_expanded += 1;

        let f = g + heuristic(state);
        if f > bound {
            return Ok(SearchResult::NewBound(f));
        }
        if state.is_solved() {
            return Ok(SearchResult::Found);
        }
        // Only the current path is remembered, so a state reached along a
        // different path is searched again.
        if !mutable.on_path.insert(state.clone()) {
            return Ok(SearchResult::NewBound(u32::MAX));
        }
        let result = self.expand(mutable, state, g, bound);
        mutable.on_path.remove(state);
        result
    }

    fn expand(
        &self,
        mutable: &mut IdaStarSolverMutable<'_>,
        state: &CubeState,
        g: u32,
        bound: u32,
    ) -> Result<SearchResult, SolverError> {
        let previous = mutable.path.last().map(|move_| move_.face());
        let mut min_bound = u32::MAX;
        for move_ in FACE_TURNS {
            if previous.is_some_and(|previous| is_redundant_after(previous, move_.face())) {
                continue;
            }
            mutable.path.push(move_);
            match self.search(mutable, &state.apply_move(&move_), g + 1, bound)? {
                SearchResult::Found => return Ok(SearchResult::Found),
                SearchResult::NewBound(new_bound) => min_bound = min_bound.min(new_bound),
            }
            mutable.path.pop();
        }
        Ok(SearchResult::NewBound(min_bound))
    }
}

/// Turns of the same face are merged into one move, and turns of opposite
/// faces commute so only the `URFDLB` ordered one is kept.
fn is_redundant_after(previous: Face, face: Face) -> bool {
    face == previous || (face == previous.opposite() && face.index() < previous.index())
}
