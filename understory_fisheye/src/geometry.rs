// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis step geometry.
//!
//! Each axis (widths across columns, heights across rows) is handled
//! independently. With `count` lines sharing `total` pixels:
//!
//! - the resting size of every line is `round(total / count)`;
//! - the maximum size of the active line is what is left once every other line
//!   sits at `min`: `total - (count - 1) * min`;
//! - step `i` of `steps` interpolates the active line linearly from the
//!   resting size to the maximum, and splits the rest evenly across the
//!   inactive lines. The integer remainder of that split goes back to the
//!   active line, so `active + (count - 1) * inactive == total` at every step.
//!
//! A second, "transitional" interpolation runs from `min` to the maximum. It is
//! used when the grid is already expanded and one line grows while another
//! shrinks at the same time.
//!
//! All arithmetic is integral; rounding is half-up (ties go towards positive
//! infinity), computed exactly.

use alloc::vec::Vec;

/// Number of rows and columns of a rectangular grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of cells per row.
    pub cols: usize,
}

impl GridShape {
    /// Creates a shape from explicit dimensions.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Classifies a grid from the number of cells found in each row.
    ///
    /// The column count is taken from the first row. Later rows are not
    /// checked; a ragged grid yields sizes that do not fit those rows.
    #[must_use]
    pub fn from_row_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut lengths = lengths.into_iter();
        let Some(cols) = lengths.next() else {
            log::warn!("fisheye grid has no rows");
            return Self::default();
        };
        let rows = 1 + lengths.count();
        Self { rows, cols }
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}

/// Pixel geometry of a grid, after options have been resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridGeometry {
    /// Grid width in pixels.
    pub width: u32,
    /// Grid height in pixels.
    pub height: u32,
    /// Minimum width of an inactive column.
    pub min_width: u32,
    /// Minimum height of an inactive row.
    pub min_height: u32,
    /// Number of steps after step 0.
    pub steps: u32,
}

impl GridGeometry {
    /// Geometry of the width axis (one line per column).
    #[must_use]
    pub fn width_axis(&self, shape: GridShape) -> AxisGeometry {
        AxisGeometry::new(self.width, shape.cols, self.min_width, self.steps)
    }

    /// Geometry of the height axis (one line per row).
    #[must_use]
    pub fn height_axis(&self, shape: GridShape) -> AxisGeometry {
        AxisGeometry::new(self.height, shape.rows, self.min_height, self.steps)
    }
}

/// Sizes on one axis at one animation step, in pixels.
///
/// Sizes are signed: a minimum that does not fit the container produces
/// negative sizes rather than an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisStep {
    /// Size of every inactive line.
    pub inactive: i64,
    /// Size of the active line while growing from rest.
    pub active_growing: i64,
    /// Size of a line growing from `min` while the grid is expanded.
    pub trans_growing: i64,
    /// Size of a line shrinking to `min` while the grid is expanded.
    pub trans_shrinking: i64,
}

/// Geometry of one axis: container size, line count, minimum and step count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisGeometry {
    total: i64,
    count: usize,
    min: i64,
    steps: u32,
}

impl AxisGeometry {
    /// Creates the geometry for `count` lines sharing `total` pixels.
    #[must_use]
    pub fn new(total: u32, count: usize, min: u32, steps: u32) -> Self {
        Self {
            total: i64::from(total),
            count,
            min: i64::from(min),
            steps,
        }
    }

    /// Total size of the axis.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Number of lines along the axis.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Minimum size of an inactive line.
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Number of steps after step 0.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn inactive_lines(&self) -> i64 {
        line_count(self.count.saturating_sub(1))
    }

    /// Resting size of every line when nothing is active.
    #[must_use]
    pub fn cell_size(&self) -> i64 {
        if self.count == 0 {
            return 0;
        }
        round_ratio(self.total, line_count(self.count))
    }

    /// Size of the active line once all others sit at the minimum.
    #[must_use]
    pub fn max_active(&self) -> i64 {
        if self.count == 0 {
            return 0;
        }
        self.total - self.inactive_lines() * self.min
    }

    /// Computes the sizes at step `i`.
    ///
    /// Steps past [`Self::steps`] keep extrapolating; callers normally stay in
    /// `0..=steps`.
    #[must_use]
    pub fn step(&self, i: u32) -> AxisStep {
        if self.count == 0 {
            return AxisStep::default();
        }
        let max_active = self.max_active();
        let mut active = interpolate(self.cell_size(), max_active, i, self.steps);

        let inactive_lines = self.inactive_lines();
        let inactive = if inactive_lines == 0 {
            0
        } else {
            let rest = self.total - active;
            // Truncating remainder, folded back into the active line.
            let leftovers = rest % inactive_lines;
            active += leftovers;
            (rest - leftovers) / inactive_lines
        };

        let trans_growing = interpolate(self.min, max_active, i, self.steps);
        AxisStep {
            inactive,
            active_growing: active,
            trans_growing,
            trans_shrinking: max_active - trans_growing + self.min,
        }
    }

    /// Computes the sizes for every step in `0..=steps`.
    #[must_use]
    pub fn table(&self) -> Vec<AxisStep> {
        (0..=self.steps).map(|i| self.step(i)).collect()
    }
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "Line counts come from DOM child lists and stay far below i64::MAX."
)]
fn line_count(count: usize) -> i64 {
    count as i64
}

/// `round(from + i * (to - from) / steps)`, with `steps == 0` pinned to `from`.
fn interpolate(from: i64, to: i64, i: u32, steps: u32) -> i64 {
    if steps == 0 {
        return from;
    }
    let steps = i64::from(steps);
    round_ratio(from * steps + i64::from(i) * (to - from), steps)
}

/// Rounds `num / den` half-up. `den` must be positive.
fn round_ratio(num: i64, den: i64) -> i64 {
    (2 * num + den).div_euclid(2 * den)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_ratio_matches_half_up() {
        assert_eq!(round_ratio(200, 3), 67);
        assert_eq!(round_ratio(5, 2), 3);
        assert_eq!(round_ratio(-5, 2), -2);
        assert_eq!(round_ratio(7, 7), 1);
        assert_eq!(round_ratio(-1, 3), 0);
    }

    #[test]
    fn two_by_two_scenario() {
        let axis = AxisGeometry::new(200, 2, 40, 4);
        assert_eq!(axis.cell_size(), 100);
        assert_eq!(axis.max_active(), 160);

        let first = axis.step(0);
        assert_eq!(first.inactive, 100);
        assert_eq!(first.active_growing, 100);

        let last = axis.step(4);
        assert_eq!(last.active_growing, 160);
        assert_eq!(last.inactive, 40);
        assert_eq!(last.trans_growing, 160);
        assert_eq!(last.trans_shrinking, 40);
    }

    #[test]
    fn step_zero_is_the_resting_size_when_it_divides_evenly() {
        let axis = AxisGeometry::new(600, 4, 30, 15);
        assert_eq!(axis.step(0).inactive, axis.cell_size());
        assert_eq!(axis.step(0).active_growing, axis.cell_size());
    }

    #[test]
    fn every_step_covers_the_axis_exactly() {
        for &(total, count, min, steps) in &[
            (200_u32, 3_usize, 40_u32, 4_u32),
            (1000, 7, 33, 15),
            (357, 5, 20, 9),
            (95, 4, 30, 3),
            (640, 12, 17, 1),
        ] {
            let axis = AxisGeometry::new(total, count, min, steps);
            let inactive_lines = i64::try_from(count - 1).unwrap();
            for (i, s) in axis.table().iter().enumerate() {
                assert_eq!(
                    s.active_growing + inactive_lines * s.inactive,
                    i64::from(total),
                    "step {i} of {total}/{count}/{min}/{steps}"
                );
            }
        }
    }

    #[test]
    fn active_growth_is_monotonic_and_ends_near_max() {
        let axis = AxisGeometry::new(1000, 7, 33, 15);
        let table = axis.table();
        for pair in table.windows(2) {
            assert!(
                pair[0].active_growing <= pair[1].active_growing,
                "active size shrank: {pair:?}"
            );
        }
        let last = table.last().unwrap();
        let inactive_lines = 6;
        assert!((last.active_growing - axis.max_active()).abs() < inactive_lines);
    }

    #[test]
    fn transitional_pair_mirrors_between_min_and_max() {
        let axis = AxisGeometry::new(500, 5, 50, 10);
        for s in axis.table() {
            assert_eq!(
                s.trans_growing + s.trans_shrinking,
                axis.max_active() + axis.min()
            );
        }
        assert_eq!(axis.step(0).trans_growing, 50);
        assert_eq!(axis.step(10).trans_growing, axis.max_active());
    }

    #[test]
    fn table_has_one_entry_per_step_identifier() {
        assert_eq!(AxisGeometry::new(100, 2, 10, 15).table().len(), 16);
        assert_eq!(AxisGeometry::new(100, 2, 10, 0).table().len(), 1);
    }

    #[test]
    fn degenerate_axes_do_not_panic() {
        let empty = AxisGeometry::new(300, 0, 40, 5);
        assert_eq!(empty.cell_size(), 0);
        assert_eq!(empty.step(3), AxisStep::default());

        let single = AxisGeometry::new(300, 1, 40, 5);
        for s in single.table() {
            assert_eq!(s.active_growing, 300);
            assert_eq!(s.inactive, 0);
        }

        let no_steps = AxisGeometry::new(300, 3, 40, 0);
        assert_eq!(no_steps.step(0).active_growing + 2 * no_steps.step(0).inactive, 300);
    }

    #[test]
    fn oversized_minimum_goes_negative_without_panicking() {
        let axis = AxisGeometry::new(100, 4, 50, 4);
        assert_eq!(axis.max_active(), -50);
        let last = axis.step(4);
        assert_eq!(last.active_growing + 3 * last.inactive, 100);
    }

    #[test]
    fn shape_takes_columns_from_first_row() {
        assert_eq!(GridShape::from_row_lengths([3, 3, 3]), GridShape::new(3, 3));
        assert_eq!(GridShape::from_row_lengths([4, 2]), GridShape::new(2, 4));
        assert!(GridShape::from_row_lengths(core::iter::empty()).is_empty());
    }
}
