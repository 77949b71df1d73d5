// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class names shared by the generated stylesheet and the state projection.
//!
//! The marker classes are fixed; the stylesheet selects on them and
//! [`FisheyeGrid`](crate::FisheyeGrid) toggles them. The cell and row classes
//! are configurable through [`FisheyeOptions`](crate::FisheyeOptions).

use alloc::string::String;

use crate::controller::LineMarks;

/// Marks cells of a row that is growing towards the maximum height.
pub const ACTIVE_ROW_GROWING: &str = "activeRowGrowing";
/// Marks cells of a column that is growing towards the maximum width.
pub const ACTIVE_COL_GROWING: &str = "activeColGrowing";
/// Marks cells of a row that shrinks during the next walk.
pub const ACTIVE_ROW_SHRINKING: &str = "activeRowShrinking";
/// Marks cells of a column that shrinks during the next walk.
pub const ACTIVE_COL_SHRINKING: &str = "activeColShrinking";
/// Pins cells of the locked row to the maximum active height.
pub const MAX_HEIGHT_LOCK: &str = "maxHeightLock";
/// Pins cells of the locked column to the maximum active width.
pub const MAX_WIDTH_LOCK: &str = "maxWidthLock";
/// Grid class present while one cell is fully enlarged.
pub const EXPANDED: &str = "expanded";
/// Grid class present while the grid collapses back to idle.
pub const SHRINK: &str = "shrink";

/// Class name the web binding gives the inserted `<style>` element.
pub const STYLE_ELEMENT: &str = "fisheye-style";

/// Which axis a set of line marks belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineAxis {
    /// A row; its marks drive heights.
    Row,
    /// A column; its marks drive widths.
    Col,
}

impl LineAxis {
    /// Returns the marker class for a single mark on this axis.
    ///
    /// `mark` must be exactly one of the [`LineMarks`] flags.
    #[must_use]
    pub fn class_for(self, mark: LineMarks) -> Option<&'static str> {
        let class = match (self, mark) {
            (Self::Row, LineMarks::GROWING) => ACTIVE_ROW_GROWING,
            (Self::Row, LineMarks::SHRINKING) => ACTIVE_ROW_SHRINKING,
            (Self::Row, LineMarks::LOCKED) => MAX_HEIGHT_LOCK,
            (Self::Col, LineMarks::GROWING) => ACTIVE_COL_GROWING,
            (Self::Col, LineMarks::SHRINKING) => ACTIVE_COL_SHRINKING,
            (Self::Col, LineMarks::LOCKED) => MAX_WIDTH_LOCK,
            _ => return None,
        };
        Some(class)
    }
}

/// The configurable class names of one grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// Stable class added to the container; equal to its id at setup.
    pub grid: String,
    /// Class added to every cell.
    pub cell: String,
    /// Class added to every row.
    pub row: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_single_mark_has_a_class_on_both_axes() {
        for mark in LineMarks::all().iter() {
            assert!(LineAxis::Row.class_for(mark).is_some());
            assert!(LineAxis::Col.class_for(mark).is_some());
        }
    }

    #[test]
    fn combined_or_empty_marks_have_no_class() {
        assert_eq!(LineAxis::Row.class_for(LineMarks::empty()), None);
        assert_eq!(
            LineAxis::Col.class_for(LineMarks::LOCKED | LineMarks::SHRINKING),
            None
        );
    }

    #[test]
    fn lock_classes_follow_the_axis() {
        assert_eq!(
            LineAxis::Row.class_for(LineMarks::LOCKED),
            Some(MAX_HEIGHT_LOCK)
        );
        assert_eq!(
            LineAxis::Col.class_for(LineMarks::LOCKED),
            Some(MAX_WIDTH_LOCK)
        );
    }
}
