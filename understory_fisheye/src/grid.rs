// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fisheye grid bound to a host.
//!
//! [`FisheyeGrid`] ties together the stylesheet, the step identifiers and the
//! [`FisheyeController`], and writes their effects through a [`GridHost`].
//!
//! Classes are a projection of the [`AnimationState`]: after every transition
//! the grid compares the state with what it last wrote and only toggles the
//! classes that changed. Hosts never read classes back.

use alloc::string::ToString;

use crate::classes::{ClassNames, EXPANDED, LineAxis, SHRINK};
use crate::controller::{
    AnimationState, CellIndex, FisheyeController, LineMarks, Transition, TriggerOutcome,
    WalkProgress,
};
use crate::geometry::{GridGeometry, GridShape};
use crate::options::FisheyeOptions;
use crate::steps::StepSequence;
use crate::stylesheet::FisheyeStyleSheet;

/// The surface a fisheye grid draws on.
///
/// In a browser this is the container element, its row children and their
/// cell children; tests use a recording implementation.
pub trait GridHost {
    /// Inserts the grid's stylesheet text. Called once, at setup.
    fn insert_stylesheet(&mut self, css: &str);

    /// Rewrites the container's identifying attribute.
    fn set_step_id(&mut self, id: &str);

    /// Adds or removes a class on the container.
    fn set_grid_class(&mut self, class: &str, on: bool);

    /// Adds or removes a class on a row.
    fn set_row_class(&mut self, row: usize, class: &str, on: bool);

    /// Adds or removes a class on a cell.
    fn set_cell_class(&mut self, cell: CellIndex, class: &str, on: bool);
}

/// One initialized fisheye grid.
#[derive(Debug)]
pub struct FisheyeGrid<H> {
    host: H,
    controller: FisheyeController,
    steps: StepSequence,
    classes: ClassNames,
    shape: GridShape,
    geometry: GridGeometry,
    stylesheet: FisheyeStyleSheet,
    speed_ms: u32,
    projected: AnimationState,
}

impl<H: GridHost> FisheyeGrid<H> {
    /// Sets up a grid whose container id is `base_id`.
    ///
    /// This classifies rows and cells, puts the container on step 0, and
    /// inserts the generated stylesheet.
    pub fn new(
        mut host: H,
        base_id: &str,
        shape: GridShape,
        options: &FisheyeOptions,
        geometry: GridGeometry,
    ) -> Self {
        let classes = ClassNames {
            grid: base_id.into(),
            cell: options.cell_class.clone(),
            row: options.row_class.clone(),
        };
        let steps = StepSequence::new(base_id, geometry.steps);

        host.set_grid_class(&classes.grid, true);
        host.set_step_id(steps.initial());

        let stylesheet = FisheyeStyleSheet::generate(base_id, &classes.cell, &geometry, shape);
        host.insert_stylesheet(&stylesheet.to_string());

        for row in 0..shape.rows {
            host.set_row_class(row, &classes.row, true);
            for col in 0..shape.cols {
                host.set_cell_class(CellIndex::new(row, col), &classes.cell, true);
            }
        }

        log::debug!(
            "fisheye grid #{base_id}: {}x{} cells, {}x{}px",
            shape.rows,
            shape.cols,
            geometry.width,
            geometry.height
        );
        let controller = FisheyeController::new(shape.rows, shape.cols, geometry.steps);
        let projected = controller.state().clone();
        Self {
            host,
            controller,
            steps,
            classes,
            shape,
            geometry,
            stylesheet,
            speed_ms: options.speed_ms,
            projected,
        }
    }

    /// Handles a trigger on `cell`.
    ///
    /// When a walk starts, the host should call [`Self::tick`] every
    /// [`Self::speed_ms`] milliseconds until it returns
    /// [`WalkProgress::Finished`].
    pub fn trigger(&mut self, cell: CellIndex) -> TriggerOutcome {
        let outcome = self.controller.trigger(cell);
        if let TriggerOutcome::Started(_) = outcome {
            self.project();
            self.host.set_step_id(self.steps.initial());
        }
        outcome
    }

    /// Advances the running walk by one step.
    pub fn tick(&mut self) -> WalkProgress {
        let progress = self.controller.tick();
        match progress {
            WalkProgress::Idle => {}
            WalkProgress::Step(i) => {
                if let Some(id) = self.steps.id(i) {
                    self.host.set_step_id(id);
                }
            }
            WalkProgress::Finished(_) => {
                self.project();
                self.host.set_step_id(self.steps.initial());
            }
        }
        progress
    }

    /// Runs the remaining steps at once, for hosts that can no longer time
    /// the walk.
    ///
    /// The grid ends in the same state and on the same id as after the last
    /// [`Self::tick`]. Returns `None` when no walk is running.
    pub fn finish(&mut self) -> Option<Transition> {
        loop {
            match self.tick() {
                WalkProgress::Idle => return None,
                WalkProgress::Step(_) => {}
                WalkProgress::Finished(transition) => return Some(transition),
            }
        }
    }

    /// Writes every class that differs between the state and the last
    /// projection.
    fn project(&mut self) {
        let state = self.controller.state();
        let host = &mut self.host;

        if state.is_expanded() != self.projected.is_expanded() {
            host.set_grid_class(EXPANDED, state.is_expanded());
        }
        if state.is_shrinking() != self.projected.is_shrinking() {
            host.set_grid_class(SHRINK, state.is_shrinking());
        }

        let cols = self.shape.cols;
        let rows = self.shape.rows;
        for (row, (now, was)) in state.rows().iter().zip(self.projected.rows()).enumerate() {
            for mark in changed(*now, *was) {
                let Some(class) = LineAxis::Row.class_for(mark) else {
                    continue;
                };
                let on = now.contains(mark);
                for col in 0..cols {
                    host.set_cell_class(CellIndex::new(row, col), class, on);
                }
            }
        }
        for (col, (now, was)) in state.cols().iter().zip(self.projected.cols()).enumerate() {
            for mark in changed(*now, *was) {
                let Some(class) = LineAxis::Col.class_for(mark) else {
                    continue;
                };
                let on = now.contains(mark);
                for row in 0..rows {
                    host.set_cell_class(CellIndex::new(row, col), class, on);
                }
            }
        }

        self.projected.clone_from(state);
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The interaction state machine.
    pub fn controller(&self) -> &FisheyeController {
        &self.controller
    }

    /// The animation state.
    pub fn state(&self) -> &AnimationState {
        self.controller.state()
    }

    /// Step identifiers of this grid.
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    /// Class names of this grid.
    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    /// Rows and columns.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Resolved pixel geometry.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The stylesheet inserted at setup.
    pub fn stylesheet(&self) -> &FisheyeStyleSheet {
        &self.stylesheet
    }

    /// Delay between two ticks, in milliseconds.
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }
}

fn changed(now: LineMarks, was: LineMarks) -> impl Iterator<Item = LineMarks> {
    now.symmetric_difference(was).iter()
}
