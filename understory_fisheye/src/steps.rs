// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step identifiers written to the grid container while animating.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// The `steps + 1` identifiers of one grid, `"{base}0"` through `"{base}{steps}"`.
///
/// ```
/// use understory_fisheye::StepSequence;
///
/// let seq = StepSequence::new("grid", 3);
/// assert_eq!(seq.len(), 4);
/// assert_eq!(seq.initial(), "grid0");
/// assert_eq!(seq.id(3), Some("grid3"));
/// assert_eq!(seq.id(4), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepSequence {
    base: String,
    ids: Vec<String>,
}

impl StepSequence {
    /// Materializes the identifiers for `steps` steps after step 0.
    #[must_use]
    pub fn new(base: &str, steps: u32) -> Self {
        let ids = (0..=steps).map(|i| format!("{base}{i}")).collect();
        Self {
            base: base.into(),
            ids,
        }
    }

    /// The base identifier all steps are derived from.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Identifier of step 0, the resting state between walks.
    #[must_use]
    pub fn initial(&self) -> &str {
        &self.ids[0]
    }

    /// Identifier of step `i`, if it exists.
    #[must_use]
    pub fn id(&self, i: u32) -> Option<&str> {
        let i = usize::try_from(i).ok()?;
        self.ids.get(i).map(String::as_str)
    }

    /// Number of identifiers (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`; step 0 exists even without animation steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the identifiers in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_still_has_an_initial_id() {
        let seq = StepSequence::new("g", 0);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.initial(), "g0");
        assert!(!seq.is_empty());
    }

    #[test]
    fn ids_are_in_walk_order() {
        let seq = StepSequence::new("fisheye", 11);
        let ids: Vec<&str> = seq.iter().collect();
        assert_eq!(ids.first(), Some(&"fisheye0"));
        assert_eq!(ids.last(), Some(&"fisheye11"));
        assert_eq!(ids[10], "fisheye10");
        assert_eq!(seq.base(), "fisheye");
    }
}
