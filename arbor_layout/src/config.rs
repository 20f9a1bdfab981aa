// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry parameters for the layout.

use kurbo::Size;

/// Box size and spacing used by [`crate::LayoutEngine`].
///
/// All values are in abstract layout units; a renderer decides how they map
/// to pixels. Values are expected to be finite and non-negative.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Width of every node box.
    pub node_width: f64,
    /// Height of every node box.
    pub node_height: f64,
    /// Vertical gap between the bottom of one level and the top of the next.
    pub level_gap: f64,
    /// Horizontal gap between adjacent sibling allocations.
    pub sibling_gap: f64,
    /// Left edge of the root box. The root always sits at `y = 0`.
    pub origin_x: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 40.0,
            level_gap: 40.0,
            sibling_gap: 40.0,
            origin_x: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Size of a node box.
    pub const fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    /// Distance between the tops of two consecutive levels.
    pub const fn level_step(&self) -> f64 {
        self.node_height + self.level_gap
    }
}
