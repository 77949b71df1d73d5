// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state machine for a fisheye grid.
//!
//! ## States
//!
//! - [`Phase::Idle`]: no cell is enlarged; every line rests at its natural size.
//! - [`Phase::Expanded`]: one row and one column are locked at their maximum.
//! - Animating: a step walk is in progress. This is entered from either phase
//!   and always returns to one of them. Triggers are ignored while animating.
//!
//! ## Transitions
//!
//! A trigger on a cell is classified against the locked row and column:
//!
//! | cell row locked | cell column locked | transition                      |
//! |-----------------|--------------------|---------------------------------|
//! | yes             | yes                | [`Transition::Collapse`]        |
//! | yes             | no                 | [`Transition::SwapColumn`]      |
//! | no              | yes                | [`Transition::SwapRow`]         |
//! | no              | no                 | [`Transition::Expand`]          |
//!
//! ## Walking
//!
//! [`FisheyeController::trigger`] applies the transition's starting marks and
//! puts the walk on step 0. Each [`FisheyeController::tick`] then advances one
//! step; the tick after the last step completes the transition, returns the
//! current step to 0 and makes the controller accept triggers again.
//!
//! ```
//! use understory_fisheye::{CellIndex, FisheyeController, LineMarks, Transition, TriggerOutcome};
//!
//! let mut c = FisheyeController::new(3, 3, 2);
//! assert_eq!(
//!     c.trigger(CellIndex::new(1, 2)),
//!     TriggerOutcome::Started(Transition::Expand { from_expanded: false })
//! );
//! assert_eq!(c.state().row_marks(1), LineMarks::GROWING);
//!
//! // Busy: a second trigger is ignored.
//! assert_eq!(c.trigger(CellIndex::new(0, 0)), TriggerOutcome::Ignored);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use bitflags::bitflags;

/// Position of a cell in the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl CellIndex {
    /// Creates a cell index.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

bitflags! {
    /// Marks carried by one row or one column.
    ///
    /// Every cell in the line shares them.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LineMarks: u8 {
        /// The line grows during the current walk.
        const GROWING = 1 << 0;
        /// The line shrinks during the current walk.
        ///
        /// Locked lines keep this mark so they shrink as soon as the lock is
        /// released.
        const SHRINKING = 1 << 1;
        /// The line is pinned at its maximum size.
        const LOCKED = 1 << 2;
    }
}

impl LineMarks {
    /// Marks of a line that has finished growing.
    pub const AT_MAX: Self = Self::LOCKED.union(Self::SHRINKING);
}

/// Resting phase of the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing is enlarged.
    #[default]
    Idle,
    /// One row and one column are locked at their maximum.
    Expanded,
}

/// The four ways a trigger can move the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The fully active cell was triggered; the grid returns to idle.
    Collapse,
    /// Same row as the active cell: only columns animate.
    SwapColumn,
    /// Same column as the active cell: only rows animate.
    SwapRow,
    /// A new row and column grow.
    Expand {
        /// Whether another row and column were locked when the walk began.
        /// If so, the old lines shrink while the new ones grow.
        from_expanded: bool,
    },
}

/// Result of [`FisheyeController::trigger`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerOutcome {
    /// A walk is already running, or the cell is outside the grid.
    Ignored,
    /// A walk started on step 0.
    Started(Transition),
}

/// Result of [`FisheyeController::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WalkProgress {
    /// No walk is running.
    Idle,
    /// The walk moved to this step.
    Step(u32),
    /// The walk completed; the current step is back at 0.
    Finished(Transition),
}

/// Animation state of one grid.
///
/// This is the source of truth for every class the grid shows; hosts project
/// it instead of reading classes back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationState {
    phase: Phase,
    shrinking: bool,
    rows: Vec<LineMarks>,
    cols: Vec<LineMarks>,
    active: Option<CellIndex>,
    previous: Option<CellIndex>,
}

impl AnimationState {
    /// Idle state for a `rows x cols` grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![LineMarks::empty(); rows],
            cols: vec![LineMarks::empty(); cols],
            ..Self::default()
        }
    }

    /// The resting phase. It switches when a walk starts collapsing or
    /// finishes expanding.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the grid carries the expanded marker.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.phase == Phase::Expanded
    }

    /// Whether the grid is collapsing back to idle.
    #[must_use]
    pub fn is_shrinking(&self) -> bool {
        self.shrinking
    }

    /// Marks of row `row`; empty for rows outside the grid.
    #[must_use]
    pub fn row_marks(&self, row: usize) -> LineMarks {
        self.rows.get(row).copied().unwrap_or_default()
    }

    /// Marks of column `col`; empty for columns outside the grid.
    #[must_use]
    pub fn col_marks(&self, col: usize) -> LineMarks {
        self.cols.get(col).copied().unwrap_or_default()
    }

    /// Marks of every row, in order.
    #[must_use]
    pub fn rows(&self) -> &[LineMarks] {
        &self.rows
    }

    /// Marks of every column, in order.
    #[must_use]
    pub fn cols(&self) -> &[LineMarks] {
        &self.cols
    }

    /// The row currently pinned at maximum height.
    #[must_use]
    pub fn locked_row(&self) -> Option<usize> {
        self.rows.iter().position(|m| m.contains(LineMarks::LOCKED))
    }

    /// The column currently pinned at maximum width.
    #[must_use]
    pub fn locked_col(&self) -> Option<usize> {
        self.cols.iter().position(|m| m.contains(LineMarks::LOCKED))
    }

    /// The cell whose row and column are active, or being activated.
    #[must_use]
    pub fn active(&self) -> Option<CellIndex> {
        self.active
    }

    /// The active cell as of the last completed walk.
    #[must_use]
    pub fn previous(&self) -> Option<CellIndex> {
        self.previous
    }

    /// Returns `true` if no line carries any mark and no grid marker is set.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.phase == Phase::Idle
            && !self.shrinking
            && self.rows.iter().chain(&self.cols).all(LineMarks::is_empty)
    }
}

#[derive(Copy, Clone, Debug)]
struct Walk {
    transition: Transition,
    target: CellIndex,
    released_row: Option<usize>,
    released_col: Option<usize>,
    next_step: u32,
}

/// Drives the [`AnimationState`] of one grid through step walks.
#[derive(Clone, Debug)]
pub struct FisheyeController {
    state: AnimationState,
    steps: u32,
    current_step: u32,
    walk: Option<Walk>,
}

impl FisheyeController {
    /// Creates an idle controller for a `rows x cols` grid animated in `steps`
    /// steps after step 0.
    #[must_use]
    pub fn new(rows: usize, cols: usize, steps: u32) -> Self {
        Self {
            state: AnimationState::new(rows, cols),
            steps,
            current_step: 0,
            walk: None,
        }
    }

    /// The animation state.
    #[must_use]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Number of steps after step 0.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// The step the grid currently shows.
    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Returns `true` while a walk is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.walk.is_some()
    }

    /// The transition being walked, if any.
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        self.walk.map(|w| w.transition)
    }

    /// Classifies what a trigger on `cell` would do, without changing state.
    #[must_use]
    pub fn classify(&self, cell: CellIndex) -> Transition {
        let row_locked = self.state.row_marks(cell.row).contains(LineMarks::LOCKED);
        let col_locked = self.state.col_marks(cell.col).contains(LineMarks::LOCKED);
        match (row_locked, col_locked) {
            (true, true) => Transition::Collapse,
            (true, false) => Transition::SwapColumn,
            (false, true) => Transition::SwapRow,
            (false, false) => Transition::Expand {
                from_expanded: self.state.is_expanded(),
            },
        }
    }

    /// Starts a walk for a trigger on `cell`.
    ///
    /// Ignored while another walk is running; there is no queueing.
    pub fn trigger(&mut self, cell: CellIndex) -> TriggerOutcome {
        if self.walk.is_some() {
            log::trace!("fisheye trigger on {cell:?} ignored: walk in progress");
            return TriggerOutcome::Ignored;
        }
        if cell.row >= self.state.rows.len() || cell.col >= self.state.cols.len() {
            log::warn!("fisheye trigger on {cell:?} is outside the grid");
            return TriggerOutcome::Ignored;
        }

        let transition = self.classify(cell);
        let (rows, cols) = (&mut self.state.rows, &mut self.state.cols);
        let mut released_row = None;
        let mut released_col = None;
        match transition {
            Transition::Collapse => {
                for line in [&mut rows[cell.row], &mut cols[cell.col]] {
                    line.insert(LineMarks::SHRINKING);
                    line.remove(LineMarks::LOCKED);
                }
                self.state.shrinking = true;
                self.state.phase = Phase::Idle;
            }
            Transition::SwapColumn => {
                released_col = release(cols);
                cols[cell.col].insert(LineMarks::GROWING);
            }
            Transition::SwapRow => {
                released_row = release(rows);
                rows[cell.row].insert(LineMarks::GROWING);
            }
            Transition::Expand { from_expanded } => {
                if from_expanded {
                    released_row = release(rows);
                    released_col = release(cols);
                }
                rows[cell.row].insert(LineMarks::GROWING);
                cols[cell.col].insert(LineMarks::GROWING);
            }
        }

        log::debug!("fisheye {transition:?} towards {cell:?}");
        self.state.active = Some(cell);
        self.current_step = 0;
        self.walk = Some(Walk {
            transition,
            target: cell,
            released_row,
            released_col,
            next_step: 1,
        });
        TriggerOutcome::Started(transition)
    }

    /// Advances the running walk by one step, or completes it.
    pub fn tick(&mut self) -> WalkProgress {
        let Some(walk) = self.walk.as_mut() else {
            return WalkProgress::Idle;
        };
        if walk.next_step <= self.steps {
            self.current_step = walk.next_step;
            walk.next_step += 1;
            log::trace!("fisheye step {}", self.current_step);
            return WalkProgress::Step(self.current_step);
        }

        let walk = *walk;
        self.walk = None;
        self.complete(walk);
        WalkProgress::Finished(walk.transition)
    }

    /// Runs the walk to completion immediately, returning the transition.
    pub fn finish(&mut self) -> Option<Transition> {
        loop {
            match self.tick() {
                WalkProgress::Idle => return None,
                WalkProgress::Step(_) => {}
                WalkProgress::Finished(transition) => return Some(transition),
            }
        }
    }

    fn complete(&mut self, walk: Walk) {
        let CellIndex { row, col } = walk.target;
        let (rows, cols) = (&mut self.state.rows, &mut self.state.cols);
        match walk.transition {
            Transition::Collapse => {
                rows[row].remove(LineMarks::SHRINKING);
                cols[col].remove(LineMarks::SHRINKING);
                self.state.shrinking = false;
            }
            Transition::SwapColumn => lock(cols, col, walk.released_col),
            Transition::SwapRow => lock(rows, row, walk.released_row),
            Transition::Expand { .. } => {
                lock(rows, row, walk.released_row);
                lock(cols, col, walk.released_col);
                self.state.phase = Phase::Expanded;
            }
        }

        self.current_step = 0;
        self.state.previous = self.state.active;
        if walk.transition == Transition::Collapse {
            self.state.active = None;
        }
        log::debug!(
            "fisheye {:?} finished; phase {:?}",
            walk.transition,
            self.state.phase
        );
    }
}

/// Unlocks the locked line, leaving it armed to shrink.
fn release(lines: &mut [LineMarks]) -> Option<usize> {
    let index = lines.iter().position(|m| m.contains(LineMarks::LOCKED))?;
    lines[index].remove(LineMarks::LOCKED);
    Some(index)
}

fn lock(lines: &mut [LineMarks], target: usize, released: Option<usize>) {
    if let Some(released) = released {
        lines[released].remove(LineMarks::SHRINKING);
    }
    lines[target] = LineMarks::AT_MAX;
}
