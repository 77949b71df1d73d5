// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_fisheye_web --heading-base-level=0

//! DOM binding for `understory_fisheye` grids.
//!
//! On `wasm32` this crate exports `fisheyeGrid(container, options)`, which turns
//! an element whose children are rows of cells into a fisheye grid:
//!
//! - every child gets the row class and every grandchild the cell class;
//! - every cell gets `{ row, col, rowIndex, colIndex }` attached under the
//!   configured data name, where `row` and `col` are arrays shared by all
//!   cells of that row or column;
//! - the generated stylesheet is appended to `document.head` in a
//!   `<style class="fisheye-style">` element;
//! - one delegated listener per configured event kind is installed on the
//!   container, and step walks are timed with `window.setTimeout`.
//!
//! The container's `id` names the grid and is rewritten on every step, so it
//! must not be used for anything else by the page.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn make_grid(
//!     container: web_sys::HtmlElement,
//! ) -> Result<web_sys::HtmlElement, wasm_bindgen::JsValue> {
//!     understory_fisheye_web::fisheye_grid(container, wasm_bindgen::JsValue::UNDEFINED)
//! }
//! ```
//!
//! Options are read from a plain object using the same keys as
//! [`FisheyeOptions`](understory_fisheye::FisheyeOptions) in camel case
//! (`minWidth`, `minHeight`, `steps`, `speed`, `width`, `height`, `cellClass`,
//! `rowClass`, `dataName`, `events`). Any other argument than `undefined` or a
//! plain object is rejected before the DOM is touched.

#![no_std]

extern crate alloc;
// Host builds of the `cdylib` target need std's allocator and panic handler.
#[cfg(not(target_arch = "wasm32"))]
extern crate std;

#[cfg(target_arch = "wasm32")]
#[allow(
    unsafe_code,
    reason = "`#[wasm_bindgen]` exports expand to unsafe glue code."
)]
mod dom;
#[cfg(target_arch = "wasm32")]
mod options;

#[cfg(target_arch = "wasm32")]
pub use dom::{fisheye_grid, fisheye_grid_all};

/// Rounds a non-negative CSS pixel value to whole pixels.
///
/// Negative and non-finite values yield `None`.
#[must_use]
pub fn round_px(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Checked non-negative above; `as` saturates values beyond u32::MAX."
    )]
    let px = (value + 0.5) as u32;
    Some(px)
}

/// Parses a computed CSS length such as `"200px"` or `"187.5px"`.
#[must_use]
pub fn parse_px(value: &str) -> Option<u32> {
    let number = value.trim().strip_suffix("px")?;
    round_px(number.trim().parse().ok()?)
}

/// Content-box extent of one axis, given its computed size.
///
/// Under `box-sizing: border-box` the computed size includes `padding` and
/// `border` (both sides summed), which are taken off here.
#[must_use]
pub fn content_size(size: u32, border_box: bool, padding: u32, border: u32) -> u32 {
    if border_box {
        size.saturating_sub(padding.saturating_add(border))
    } else {
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_computed_lengths() {
        assert_eq!(parse_px("200px"), Some(200));
        assert_eq!(parse_px(" 187.5px "), Some(188));
        assert_eq!(parse_px("0px"), Some(0));
    }

    #[test]
    fn rejects_non_pixel_values() {
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("12em"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("-4px"), None);
    }

    #[test]
    fn round_px_rejects_nonsense() {
        assert_eq!(round_px(f64::NAN), None);
        assert_eq!(round_px(f64::INFINITY), None);
        assert_eq!(round_px(39.4), Some(39));
        assert_eq!(round_px(1e12), Some(u32::MAX));
    }

    #[test]
    fn border_box_sizes_lose_padding_and_border() {
        assert_eq!(content_size(200, true, 20, 2), 178);
        assert_eq!(content_size(200, false, 20, 2), 200);
        assert_eq!(content_size(10, true, 20, 2), 0);
    }
}
