// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stylesheet generation: every animation frame as CSS rules.
//!
//! The generated sheet addresses frames through the container's id. For step
//! `i` the container carries id `{base}{i}`, and rules scoped to `#{base}{i}`
//! size the cells for that frame. Marker classes select the rule family:
//!
//! - plain step rules size inactive cells and the growing row/column;
//! - `.shrink` rules read the same table in reverse step order, so a forward
//!   walk through the ids collapses the grid;
//! - `.expanded` rules use the transitional table, growing one line from the
//!   minimum while another shrinks back to it.
//!
//! Two `!important` lock rules pin the active row and column to their maximum
//! once a walk completes. A final `#{base}0` rule restores resting sizes
//! whenever the container is back at step 0 without a marker class.
//!
//! Rule order matters: rules with equal specificity cascade by position, so
//! [`RuleGroup`] lists the groups in emission order.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::{SmallVec, smallvec};

use crate::classes::{
    ACTIVE_COL_GROWING, ACTIVE_COL_SHRINKING, ACTIVE_ROW_GROWING, ACTIVE_ROW_SHRINKING, EXPANDED,
    MAX_HEIGHT_LOCK, MAX_WIDTH_LOCK, SHRINK,
};
use crate::geometry::{GridGeometry, GridShape};

/// A sized CSS property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// `width`
    Width,
    /// `height`
    Height,
}

impl Property {
    /// The CSS property name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// A single `property: Npx` declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Sized property.
    pub property: Property,
    /// Size in pixels.
    pub px: i64,
    /// Whether the declaration is `!important`.
    pub important: bool,
}

impl Declaration {
    /// A regular declaration.
    #[must_use]
    pub fn new(property: Property, px: i64) -> Self {
        Self {
            property,
            px,
            important: false,
        }
    }

    /// An `!important` declaration.
    #[must_use]
    pub fn important(property: Property, px: i64) -> Self {
        Self {
            property,
            px,
            important: true,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}px", self.property.name(), self.px)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_str(";")
    }
}

/// The rule families of a fisheye stylesheet, in cascade order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleGroup {
    /// Inactive cells while growing, per step.
    GrowingInactive,
    /// Growing row height, per step.
    RowGrowing,
    /// Growing column width, per step.
    ColGrowing,
    /// Inactive cells while collapsing, per reversed step.
    ShrinkingInactive,
    /// Shrinking row height, per reversed step.
    RowShrinking,
    /// Shrinking column width, per reversed step.
    ColShrinking,
    /// Inactive cells of an expanded grid, per step.
    ExpandedInactive,
    /// Row growing from the minimum in an expanded grid, per step.
    ExpandedRowGrowing,
    /// Row shrinking to the minimum in an expanded grid, per step.
    ExpandedRowShrinking,
    /// Column growing from the minimum in an expanded grid, per step.
    ExpandedColGrowing,
    /// Column shrinking to the minimum in an expanded grid, per step.
    ExpandedColShrinking,
    /// Resting cell size at step 0.
    Rest,
    /// Maximum width lock of the active column.
    WidthLock,
    /// Maximum height lock of the active row.
    HeightLock,
}

/// One selector and its declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    group: RuleGroup,
    selector: String,
    declarations: SmallVec<[Declaration; 2]>,
}

impl StyleRule {
    /// The family this rule belongs to.
    #[must_use]
    pub fn group(&self) -> RuleGroup {
        self.group
    }

    /// The rule's selector.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The rule's declarations.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Looks up the size declared for `property`, if any.
    #[must_use]
    pub fn px(&self, property: Property) -> Option<i64> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.px)
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for decl in &self.declarations {
            write!(f, "{decl}")?;
        }
        f.write_str("}")
    }
}

/// All rules for one grid.
///
/// Rendering with [`Display`](fmt::Display) yields the text of the grid's
/// `<style>` element: one rule per line, groups separated by blank lines.
///
/// ```
/// use understory_fisheye::{FisheyeStyleSheet, GridGeometry, GridShape, Property, RuleGroup};
///
/// let geometry = GridGeometry { width: 200, height: 200, min_width: 40, min_height: 40, steps: 4 };
/// let sheet = FisheyeStyleSheet::generate("grid", "fisheye-cell", &geometry, GridShape::new(2, 2));
///
/// let rest: Vec<_> = sheet.rules_in(RuleGroup::Rest).collect();
/// assert_eq!(rest[0].selector(), "#grid0 .fisheye-cell");
/// assert_eq!(rest[0].px(Property::Width), Some(100));
///
/// let css = sheet.to_string();
/// assert!(css.contains(".grid .maxWidthLock {width:160px !important;}"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FisheyeStyleSheet {
    rules: Vec<StyleRule>,
}

impl FisheyeStyleSheet {
    /// Generates the sheet for a grid whose container id is `base`.
    #[must_use]
    pub fn generate(
        base: &str,
        cell_class: &str,
        geometry: &GridGeometry,
        shape: GridShape,
    ) -> Self {
        let widths = geometry.width_axis(shape);
        let heights = geometry.height_axis(shape);
        let width_table = widths.table();
        let height_table = heights.table();
        let last = geometry.steps;
        let min_width = i64::from(geometry.min_width);
        let min_height = i64::from(geometry.min_height);

        let mut groups: [Vec<StyleRule>; 11] = core::array::from_fn(|_| Vec::new());
        for (i, (w, h)) in (0_u32..).zip(width_table.iter().zip(height_table.iter())) {
            let step = format!("#{base}{i}");
            let shrink = format!("#{base}{}.{SHRINK}", last - i);
            let expanded = format!("#{base}{i}.{EXPANDED}");

            let size = |width: i64, height: i64| -> SmallVec<[Declaration; 2]> {
                smallvec![
                    Declaration::new(Property::Width, width),
                    Declaration::new(Property::Height, height)
                ]
            };
            let width = |px: i64| -> SmallVec<[Declaration; 2]> {
                smallvec![Declaration::new(Property::Width, px)]
            };
            let height = |px: i64| -> SmallVec<[Declaration; 2]> {
                smallvec![Declaration::new(Property::Height, px)]
            };

            let frame = [
                (
                    RuleGroup::GrowingInactive,
                    format!("{step} .{cell_class}"),
                    size(w.inactive, h.inactive),
                ),
                (
                    RuleGroup::RowGrowing,
                    format!("{step} .{ACTIVE_ROW_GROWING}"),
                    height(h.active_growing),
                ),
                (
                    RuleGroup::ColGrowing,
                    format!("{step} .{ACTIVE_COL_GROWING}"),
                    width(w.active_growing),
                ),
                (
                    RuleGroup::ShrinkingInactive,
                    format!("{shrink} .{cell_class}"),
                    size(w.inactive, h.inactive),
                ),
                (
                    RuleGroup::RowShrinking,
                    format!("{shrink} .{ACTIVE_ROW_SHRINKING}"),
                    height(h.active_growing),
                ),
                (
                    RuleGroup::ColShrinking,
                    format!("{shrink} .{ACTIVE_COL_SHRINKING}"),
                    width(w.active_growing),
                ),
                (
                    RuleGroup::ExpandedInactive,
                    format!("{expanded} .{cell_class}"),
                    size(min_width, min_height),
                ),
                (
                    RuleGroup::ExpandedRowGrowing,
                    format!("{expanded} .{ACTIVE_ROW_GROWING}"),
                    height(h.trans_growing),
                ),
                (
                    RuleGroup::ExpandedRowShrinking,
                    format!("{expanded} .{ACTIVE_ROW_SHRINKING}"),
                    height(h.trans_shrinking),
                ),
                (
                    RuleGroup::ExpandedColGrowing,
                    format!("{expanded} .{ACTIVE_COL_GROWING}"),
                    width(w.trans_growing),
                ),
                (
                    RuleGroup::ExpandedColShrinking,
                    format!("{expanded} .{ACTIVE_COL_SHRINKING}"),
                    width(w.trans_shrinking),
                ),
            ];
            for (slot, (group, selector, declarations)) in groups.iter_mut().zip(frame) {
                slot.push(StyleRule {
                    group,
                    selector,
                    declarations,
                });
            }
        }

        let mut rules: Vec<StyleRule> = groups.into_iter().flatten().collect();
        rules.push(StyleRule {
            group: RuleGroup::Rest,
            selector: format!("#{base}0 .{cell_class}"),
            declarations: smallvec![
                Declaration::new(Property::Width, widths.cell_size()),
                Declaration::new(Property::Height, heights.cell_size())
            ],
        });
        rules.push(StyleRule {
            group: RuleGroup::WidthLock,
            selector: format!(".{base} .{MAX_WIDTH_LOCK}"),
            declarations: smallvec![Declaration::important(
                Property::Width,
                widths.max_active()
            )],
        });
        rules.push(StyleRule {
            group: RuleGroup::HeightLock,
            selector: format!(".{base} .{MAX_HEIGHT_LOCK}"),
            declarations: smallvec![Declaration::important(
                Property::Height,
                heights.max_active()
            )],
        });

        log::debug!(
            "generated {} fisheye rules for #{base} ({}x{} cells, {} steps)",
            rules.len(),
            shape.rows,
            shape.cols,
            geometry.steps
        );
        Self { rules }
    }

    /// All rules in cascade order.
    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Rules of a single family, in step order.
    pub fn rules_in(&self, group: RuleGroup) -> impl Iterator<Item = &StyleRule> + '_ {
        self.rules.iter().filter(move |r| r.group == group)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the sheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for FisheyeStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous = None;
        for rule in &self.rules {
            match previous {
                None => {}
                Some(group) if group == rule.group => f.write_str("\n")?,
                Some(_) => f.write_str("\n\n")?,
            }
            write!(f, "{rule}")?;
            previous = Some(rule.group);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn two_by_two() -> FisheyeStyleSheet {
        let geometry = GridGeometry {
            width: 200,
            height: 200,
            min_width: 40,
            min_height: 40,
            steps: 4,
        };
        FisheyeStyleSheet::generate("grid", "fisheye-cell", &geometry, GridShape::new(2, 2))
    }

    #[test]
    fn every_step_group_has_one_rule_per_step() {
        let sheet = two_by_two();
        for group in [
            RuleGroup::GrowingInactive,
            RuleGroup::RowGrowing,
            RuleGroup::ColGrowing,
            RuleGroup::ShrinkingInactive,
            RuleGroup::RowShrinking,
            RuleGroup::ColShrinking,
            RuleGroup::ExpandedInactive,
            RuleGroup::ExpandedRowGrowing,
            RuleGroup::ExpandedRowShrinking,
            RuleGroup::ExpandedColGrowing,
            RuleGroup::ExpandedColShrinking,
        ] {
            let selectors: Vec<&str> = sheet.rules_in(group).map(StyleRule::selector).collect();
            assert_eq!(selectors.len(), 5, "{group:?}");
            let mut unique = selectors.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), 5, "{group:?} has duplicate selectors");
        }
        assert_eq!(sheet.len(), 11 * 5 + 3);
    }

    #[test]
    fn rules_are_emitted_in_cascade_order() {
        let sheet = two_by_two();
        for pair in sheet.rules().windows(2) {
            assert!(pair[0].group() <= pair[1].group());
        }
    }

    #[test]
    fn growing_rows_reach_the_maximum_on_the_last_step() {
        let sheet = two_by_two();
        let rows: Vec<i64> = sheet
            .rules_in(RuleGroup::RowGrowing)
            .filter_map(|r| r.px(Property::Height))
            .collect();
        assert_eq!(rows, vec![100, 115, 130, 145, 160]);
        assert_eq!(
            sheet.rules_in(RuleGroup::RowGrowing).last().unwrap().selector(),
            "#grid4 .activeRowGrowing"
        );
    }

    #[test]
    fn shrinking_reads_the_table_backwards() {
        let sheet = two_by_two();
        let first = sheet.rules_in(RuleGroup::ColShrinking).next().unwrap();
        assert_eq!(first.selector(), "#grid4.shrink .activeColShrinking");
        assert_eq!(first.px(Property::Width), Some(100));

        let last = sheet.rules_in(RuleGroup::ColShrinking).last().unwrap();
        assert_eq!(last.selector(), "#grid0.shrink .activeColShrinking");
        assert_eq!(last.px(Property::Width), Some(160));
    }

    #[test]
    fn expanded_rules_use_minimum_and_transitional_sizes() {
        let sheet = two_by_two();
        let inactive = sheet.rules_in(RuleGroup::ExpandedInactive).nth(2).unwrap();
        assert_eq!(inactive.selector(), "#grid2.expanded .fisheye-cell");
        assert_eq!(inactive.px(Property::Width), Some(40));
        assert_eq!(inactive.px(Property::Height), Some(40));

        let growing = sheet.rules_in(RuleGroup::ExpandedRowGrowing).nth(1).unwrap();
        let shrinking = sheet
            .rules_in(RuleGroup::ExpandedRowShrinking)
            .nth(1)
            .unwrap();
        assert_eq!(growing.px(Property::Height), Some(70));
        assert_eq!(shrinking.px(Property::Height), Some(130));
    }

    #[test]
    fn locks_are_important_and_exact() {
        let sheet = two_by_two();
        let width = sheet.rules_in(RuleGroup::WidthLock).next().unwrap();
        assert_eq!(width.selector(), ".grid .maxWidthLock");
        assert_eq!(
            width.declarations(),
            &[Declaration::important(Property::Width, 160)]
        );
        let height = sheet.rules_in(RuleGroup::HeightLock).next().unwrap();
        assert_eq!(height.px(Property::Height), Some(160));
    }

    #[test]
    fn rendered_text_separates_groups() {
        let css = two_by_two().to_string();
        assert!(css.starts_with("#grid0 .fisheye-cell {width:100px;height:100px;}\n"));
        assert!(css.contains("#grid4 .fisheye-cell {width:40px;height:40px;}\n\n#grid0 .activeRowGrowing"));
        assert!(css.ends_with(".grid .maxHeightLock {height:160px !important;}"));
    }

    #[test]
    fn resting_rule_restores_the_rounded_size_when_it_does_not_divide() {
        let geometry = GridGeometry {
            width: 200,
            height: 100,
            min_width: 40,
            min_height: 30,
            steps: 4,
        };
        let sheet = FisheyeStyleSheet::generate("g", "c", &geometry, GridShape::new(3, 3));

        // 200 / 3 leaves two spare pixels for the active column at step 0.
        let step_zero = sheet
            .rules()
            .iter()
            .position(|r| r.group() == RuleGroup::GrowingInactive && r.selector() == "#g0 .c")
            .unwrap();
        assert_eq!(sheet.rules()[step_zero].px(Property::Width), Some(66));
        assert_eq!(sheet.rules()[step_zero].px(Property::Height), Some(33));

        let rest = sheet
            .rules()
            .iter()
            .position(|r| r.group() == RuleGroup::Rest)
            .unwrap();
        assert_eq!(sheet.rules()[rest].selector(), "#g0 .c");
        assert_eq!(sheet.rules()[rest].px(Property::Width), Some(67));
        assert_eq!(sheet.rules()[rest].px(Property::Height), Some(33));
        assert!(rest > step_zero, "resting rule must win the cascade");
    }

    #[test]
    fn empty_grid_still_renders() {
        let geometry = GridGeometry {
            width: 100,
            height: 100,
            min_width: 10,
            min_height: 10,
            steps: 2,
        };
        let sheet = FisheyeStyleSheet::generate("g", "c", &geometry, GridShape::default());
        assert_eq!(sheet.len(), 11 * 3 + 3);
        assert!(sheet.to_string().contains("#g0 .c {width:0px;height:0px;}"));
    }
}
