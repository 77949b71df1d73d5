// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and its defaults.
//!
//! ## Minimal example
//!
//! ```
//! use understory_fisheye::FisheyeOptions;
//!
//! let opts = FisheyeOptions::default().with_steps(10).with_speed_ms(20);
//! assert_eq!(opts.min_width, 40);
//!
//! // Width and height fall back to the host's measurement.
//! let geometry = opts.resolve(640, 480);
//! assert_eq!((geometry.width, geometry.height), (640, 480));
//! assert_eq!(geometry.steps, 10);
//! ```

use alloc::string::{String, ToString};
use core::fmt;

use crate::geometry::GridGeometry;

/// Options recognized when setting up a fisheye grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FisheyeOptions {
    /// Minimum width of an inactive cell, in pixels.
    pub min_width: u32,
    /// Minimum height of an inactive cell, in pixels.
    pub min_height: u32,
    /// Number of animation steps after step 0.
    pub steps: u32,
    /// Delay between two steps, in milliseconds.
    pub speed_ms: u32,
    /// Grid width in pixels; `None` uses the container's measured width.
    pub width: Option<u32>,
    /// Grid height in pixels; `None` uses the container's measured height.
    pub height: Option<u32>,
    /// Class set on every cell.
    pub cell_class: String,
    /// Class set on every row.
    pub row_class: String,
    /// Key under which each cell's row/column lookup is attached.
    pub data_name: String,
    /// Space-separated event kinds that trigger a resize.
    pub events: String,
}

impl Default for FisheyeOptions {
    fn default() -> Self {
        Self {
            min_width: 40,
            min_height: 30,
            steps: 15,
            speed_ms: 15,
            width: None,
            height: None,
            cell_class: "fisheye-cell".to_string(),
            row_class: "fisheye-row".to_string(),
            data_name: "cells".to_string(),
            events: "click".to_string(),
        }
    }
}

impl FisheyeOptions {
    /// Sets the minimum inactive cell width.
    #[must_use]
    pub fn with_min_width(mut self, px: u32) -> Self {
        self.min_width = px;
        self
    }

    /// Sets the minimum inactive cell height.
    #[must_use]
    pub fn with_min_height(mut self, px: u32) -> Self {
        self.min_height = px;
        self
    }

    /// Sets the number of animation steps.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the delay between steps.
    #[must_use]
    pub fn with_speed_ms(mut self, ms: u32) -> Self {
        self.speed_ms = ms;
        self
    }

    /// Fixes the grid width instead of measuring the container.
    #[must_use]
    pub fn with_width(mut self, px: u32) -> Self {
        self.width = Some(px);
        self
    }

    /// Fixes the grid height instead of measuring the container.
    #[must_use]
    pub fn with_height(mut self, px: u32) -> Self {
        self.height = Some(px);
        self
    }

    /// Sets the class added to cells.
    #[must_use]
    pub fn with_cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = class.into();
        self
    }

    /// Sets the class added to rows.
    #[must_use]
    pub fn with_row_class(mut self, class: impl Into<String>) -> Self {
        self.row_class = class.into();
        self
    }

    /// Sets the key for per-cell lookup data.
    #[must_use]
    pub fn with_data_name(mut self, name: impl Into<String>) -> Self {
        self.data_name = name.into();
        self
    }

    /// Sets the triggering event kinds (space separated).
    #[must_use]
    pub fn with_events(mut self, events: impl Into<String>) -> Self {
        self.events = events.into();
        self
    }

    /// Iterates the individual event kinds named by [`Self::events`].
    pub fn event_kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.split_ascii_whitespace()
    }

    /// Combines these options with the container's measured box.
    ///
    /// Explicit `width`/`height` win over the measurement.
    #[must_use]
    pub fn resolve(&self, measured_width: u32, measured_height: u32) -> GridGeometry {
        GridGeometry {
            width: self.width.unwrap_or(measured_width),
            height: self.height.unwrap_or(measured_height),
            min_width: self.min_width,
            min_height: self.min_height,
            steps: self.steps,
        }
    }
}

/// Error returned when grid configuration is rejected at setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionsError {
    /// The configuration value was neither absent nor a plain object.
    NotAnObject,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => {
                f.write_str("fisheye grid only accepts a plain object or no options at all")
            }
        }
    }
}

impl core::error::Error for OptionsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn defaults_match_documented_values() {
        let opts = FisheyeOptions::default();
        assert_eq!(opts.min_width, 40);
        assert_eq!(opts.min_height, 30);
        assert_eq!(opts.steps, 15);
        assert_eq!(opts.speed_ms, 15);
        assert_eq!(opts.width, None);
        assert_eq!(opts.height, None);
        assert_eq!(opts.cell_class, "fisheye-cell");
        assert_eq!(opts.row_class, "fisheye-row");
        assert_eq!(opts.data_name, "cells");
        assert_eq!(opts.events, "click");
    }

    #[test]
    fn explicit_size_wins_over_measurement() {
        let opts = FisheyeOptions::default().with_width(200).with_min_height(12);
        let geometry = opts.resolve(999, 300);
        assert_eq!(geometry.width, 200);
        assert_eq!(geometry.height, 300);
        assert_eq!(geometry.min_height, 12);
    }

    #[test]
    fn event_kinds_split_on_whitespace() {
        let opts = FisheyeOptions::default().with_events(" click  touchend\tkeyup ");
        let kinds: Vec<&str> = opts.event_kinds().collect();
        assert_eq!(kinds, ["click", "touchend", "keyup"]);
    }

    #[test]
    fn not_an_object_has_a_descriptive_message() {
        let msg = alloc::format!("{}", OptionsError::NotAnObject);
        assert!(msg.contains("plain object"));
    }
}
