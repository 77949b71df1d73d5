// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_fisheye --heading-base-level=0

//! Understory Fisheye: stepped fisheye expansion for rectangular grids.
//!
//! Clicking a cell of a fisheye grid enlarges that cell's row and column while
//! the other rows and columns shrink towards a minimum size. Instead of
//! animating sizes continuously, the animation is discretized into a fixed
//! number of frames:
//!
//! - every frame's sizes are precomputed once and encoded as CSS rules scoped
//!   to a per-frame identifier on the grid container (`grid0`, `grid1`, ...);
//! - animating is then only a matter of rewriting the container's identifier
//!   at a fixed interval, while marker classes on rows and columns select
//!   which rule family (growing, shrinking, transitional) applies.
//!
//! The crate is split along those lines:
//!
//! - [`geometry`]: per-axis step tables ([`AxisGeometry`]) with integer
//!   rounding that never under-covers the container.
//! - [`stylesheet`]: turns the step tables into a [`FisheyeStyleSheet`], a typed
//!   rule list that renders to the text of one `<style>` element.
//! - [`controller`]: the interaction state machine ([`FisheyeController`]),
//!   which owns the [`AnimationState`] and walks through the frames one tick at
//!   a time.
//! - [`grid`]: [`FisheyeGrid`], which wires the pieces to a host through the
//!   [`GridHost`] trait and projects the animation state onto classes.
//!
//! This crate does not know about the DOM, timers, or any event system. Hosts
//! (for example `understory_fisheye_web`) call [`FisheyeGrid::trigger`] when a
//! cell is activated and [`FisheyeGrid::tick`] every `speed_ms` milliseconds
//! while a walk is in progress.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_fisheye::{
//!     AxisGeometry, CellIndex, FisheyeController, Phase, TriggerOutcome, WalkProgress,
//! };
//!
//! // 200px wide, two columns, 40px minimum, four steps.
//! let width = AxisGeometry::new(200, 2, 40, 4);
//! assert_eq!(width.cell_size(), 100);
//! assert_eq!(width.step(4).active_growing, 160);
//!
//! let mut controller = FisheyeController::new(2, 2, 4);
//! let outcome = controller.trigger(CellIndex::new(0, 1));
//! assert!(matches!(outcome, TriggerOutcome::Started(_)));
//!
//! // Steps 1..=4, then the completion tick.
//! while !matches!(controller.tick(), WalkProgress::Finished(_)) {}
//! assert_eq!(controller.state().phase(), Phase::Expanded);
//! assert_eq!(controller.state().locked_row(), Some(0));
//! assert_eq!(controller.state().locked_col(), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod classes;
pub mod controller;
pub mod geometry;
pub mod grid;
pub mod options;
pub mod steps;
pub mod stylesheet;

pub use controller::{
    AnimationState, CellIndex, FisheyeController, LineMarks, Phase, Transition, TriggerOutcome,
    WalkProgress,
};
pub use geometry::{AxisGeometry, AxisStep, GridGeometry, GridShape};
pub use grid::{FisheyeGrid, GridHost};
pub use options::{FisheyeOptions, OptionsError};
pub use steps::StepSequence;
pub use stylesheet::{Declaration, FisheyeStyleSheet, Property, RuleGroup, StyleRule};
